//! The child-parser capability abstraction: scalars, repeating
//! (array/optional) elements, and non-represented constructs, unified behind
//! one dispatch-friendly enum rather than a class hierarchy.

use crate::state::ParseState;
use crate::status::{ArrayIndexStatus, ParseAttemptStatus, PoUStatus};

/// Compiled static metadata for a schema term, carried alongside every child
/// parser. Schema compilation itself is out of scope; this is the slice of
/// it the driver actually reads.
#[derive(Debug, Clone)]
pub struct Trd {
    /// The term's prefixed name, used in diagnostics (`Failed to populate
    /// NAME[POS]`) and unordered-sequence reordering.
    pub prefixed_name: String,
    /// `true` if this term is (part of) an array.
    pub is_array: bool,
    /// A short description of where this term lives in the schema, for
    /// diagnostics.
    pub schema_location: String,
}

impl Trd {
    /// Creates a `Trd` for a scalar, non-array term.
    #[inline]
    pub fn scalar(name: impl Into<String>) -> Self {
        Trd {
            prefixed_name: name.into(),
            is_array: false,
            schema_location: String::new(),
        }
    }

    /// Creates a `Trd` for an array term.
    #[inline]
    pub fn array(name: impl Into<String>) -> Self {
        Trd {
            prefixed_name: name.into(),
            is_array: true,
            schema_location: String::new(),
        }
    }
}

/// Trailing validations a child runs once the sequence has moved past it
/// (e.g. *trailingEmptyStrict*, which needs to know whether the last absent
/// attempt followed an empty/absent one).
pub trait FinalChecks {
    /// Runs trailing validations given the last two attempt statuses for
    /// this child (`prior` then `last`). Called once per sequence, after the
    /// driver's main loop has finished with this child.
    fn final_checks(
        &self,
        pstate: &mut ParseState,
        last_result: ParseAttemptStatus,
        prior_result: ParseAttemptStatus,
    );
}

/// Every child exposes these operations, regardless of kind.
pub trait ChildParser: FinalChecks {
    /// Attempts exactly one occurrence.
    ///
    /// `ro_status` is `None` for non-represented children (their result
    /// isn't consulted) and `Some` otherwise, conveying whether the current
    /// occurrence is required or merely speculative.
    fn parse_one(
        &mut self,
        pstate: &mut ParseState,
        ro_status: Option<bool>,
    ) -> ParseAttemptStatus;

    /// Whether this child needs a point of uncertainty around its attempts.
    fn pou_status(&self) -> PoUStatus;

    /// Identity used for PoU labeling and diagnostics.
    fn context(&self) -> &str;

    /// Compiled static metadata.
    fn trd(&self) -> &Trd;
}

/// Additional operations exposed by repeating (array/optional) children.
pub trait RepeatingChildParser: ChildParser {
    /// The minimum number of occurrences required.
    fn min_repeats(&self, pstate: &ParseState) -> u64;

    /// The maximum number of occurrences allowed, or `u64::MAX` if
    /// unbounded (subject to the tunable safety cap regardless).
    fn max_repeats(&self, pstate: &ParseState) -> u64;

    /// `true` if `max_repeats` is a real schema-declared bound, as opposed
    /// to "unbounded" — used by the forward-progress check, which only
    /// applies to unbounded arrays (a bounded array's own max already caps
    /// the loop).
    fn is_bounded_max(&self) -> bool;

    /// `true` if separators/positions for this child are positional (affects
    /// whether an `AbsentRep` still advances `groupPos`).
    fn is_positional(&self) -> bool;

    /// Called once before the first occurrence is attempted.
    fn start_array(&mut self, pstate: &mut ParseState);

    /// Called once after the last occurrence has been attempted (whether it
    /// succeeded, was absent, or failed).
    fn end_array(&mut self, pstate: &mut ParseState);

    /// Computes the per-iteration status from `(min, max, currentOccurrence)`
    /// plus whatever speculative context the child needs from `pstate`.
    /// Pure given those inputs; must return `Done` once `min` is satisfied
    /// and further speculation is disallowed.
    fn array_index_status(&self, min: u64, max: u64, pstate: &ParseState) -> ArrayIndexStatus;
}

/// A non-represented construct (e.g. a schema annotation with no on-wire
/// syntax): it runs for side effects only, and the group index does not
/// advance for it.
pub trait NonRepresentedChildParser: ChildParser {}

/// The polymorphic set of child kinds a sequence may contain, dispatched by
/// an explicit match rather than deep inheritance.
pub enum Child<'a> {
    /// A scalar element.
    Scalar(Box<dyn ScalarChildParser + 'a>),
    /// A repeating (array/optional) element or nested group.
    Repeating(Box<dyn RepeatingChildParser + 'a>),
    /// A non-represented construct.
    NonRepresented(Box<dyn NonRepresentedChildParser + 'a>),
}

/// A scalar child additionally exposes its statically-known required/optional
/// status (scalars don't speculate on occurrence count, so this is always
/// available up front, unlike a repeating child's per-iteration status).
pub trait ScalarChildParser: ChildParser {
    /// `true` if this scalar is required to be present.
    fn maybe_static_required_optional_status(&self) -> bool;
}
