//! The status algebras the driver transitions through: per-attempt parse
//! outcomes and per-iteration array occurrence decisions.

/// The sub-kinds of a successful parse attempt.
///
/// The driver itself never inspects which sub-kind a success is (see
/// `finalChecks` in the design notes); it only needs the predicates on
/// [`ParseAttemptStatus`]. The sub-kinds are kept around so a child parser's
/// `finalChecks` can tell e.g. "empty representation" from "ordinary content"
/// when deciding about trailing-empty-strict semantics.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SuccessKind {
    /// Ordinary parsed content.
    ParsedContent,
    /// The representation was present but empty (e.g. a zero-length string).
    EmptyRep,
    /// Any other success sub-kind a child parser wants to distinguish.
    Other(&'static str),
}

/// The outcome of a single parse attempt for one child term.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParseAttemptStatus {
    /// No attempt has been made yet.
    Uninitialized,
    /// The attempt succeeded.
    Success(SuccessKind),
    /// The child decided it is not present. Benign; may or may not end a
    /// repetition.
    AbsentRep,
    /// A required item was missing.
    MissingItem,
    /// A required separator was missing.
    MissingSeparator,
    /// An unordered-sequence child committed past its point of uncertainty
    /// and then failed; further alternatives must not be tried.
    UnorderedSeqDiscriminatedFailure,
    /// A failure that doesn't fit any of the other named kinds.
    FailureUnspecified,
}

impl ParseAttemptStatus {
    /// `true` if this is [`Success`](ParseAttemptStatus::Success).
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, ParseAttemptStatus::Success(_))
    }

    /// `true` if this is [`AbsentRep`](ParseAttemptStatus::AbsentRep).
    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, ParseAttemptStatus::AbsentRep)
    }

    /// `true` if this is a success or an absent representation, i.e. not a
    /// failure of any kind. This is the "success-or-absent" half of the
    /// status biconditional.
    #[inline]
    pub fn is_success_or_absent(&self) -> bool {
        self.is_success() || self.is_absent()
    }

    /// `true` for any of the failed variants.
    #[inline]
    pub fn is_failed(&self) -> bool {
        matches!(
            self,
            ParseAttemptStatus::MissingItem
                | ParseAttemptStatus::MissingSeparator
                | ParseAttemptStatus::UnorderedSeqDiscriminatedFailure
                | ParseAttemptStatus::FailureUnspecified
        )
    }

    /// `true` if this is specifically [`MissingSeparator`](ParseAttemptStatus::MissingSeparator).
    #[inline]
    pub fn is_missing_separator(&self) -> bool {
        matches!(self, ParseAttemptStatus::MissingSeparator)
    }
}

/// Whether a repeating child's current occurrence is required or merely
/// speculative/optional. Derived from `(min, max, currentOccurrence)` by
/// [`RepeatingChildParser::array_index_status`](crate::child::RepeatingChildParser::array_index_status).
pub trait RequiredOptionalStatus {
    /// `true` if the current occurrence must be present for the array to
    /// satisfy its minimum.
    fn is_required(&self) -> bool;

    /// `true` if the current occurrence is speculative.
    #[inline]
    fn is_optional(&self) -> bool {
        !self.is_required()
    }
}

/// The per-iteration decision the array driver makes about continuing to
/// speculate on further occurrences of a repeating child.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ArrayIndexStatus {
    /// No occurrence has been attempted yet.
    Uninitialized,
    /// Occurrence `n` (1-based) is required to satisfy the array's minimum.
    Required(u64),
    /// Occurrence `n` (1-based) is beyond the minimum; it may be absent.
    Optional(u64),
    /// No further occurrences should be attempted.
    Done,
}

impl ArrayIndexStatus {
    /// `true` if this is [`Done`](ArrayIndexStatus::Done).
    #[inline]
    pub fn is_done(&self) -> bool {
        matches!(self, ArrayIndexStatus::Done)
    }

    /// The 1-based occurrence number, if this status names one.
    #[inline]
    pub fn occurrence(&self) -> Option<u64> {
        match self {
            ArrayIndexStatus::Required(n) | ArrayIndexStatus::Optional(n) => Some(*n),
            ArrayIndexStatus::Uninitialized | ArrayIndexStatus::Done => None,
        }
    }
}

impl RequiredOptionalStatus for ArrayIndexStatus {
    #[inline]
    fn is_required(&self) -> bool {
        matches!(self, ArrayIndexStatus::Required(_))
    }
}

/// Whether a child parser needs a point of uncertainty before an attempt.
///
/// A static property of the child parser, not of any one attempt.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PoUStatus {
    /// The child parser may fail partway through and needs to be rolled back.
    HasPoU,
    /// The child parser either cannot partially consume input, or its
    /// failures are never meant to be recovered from.
    NoPoU,
}

impl PoUStatus {
    /// `true` for [`HasPoU`](PoUStatus::HasPoU).
    #[inline]
    pub fn has_pou(&self) -> bool {
        matches!(self, PoUStatus::HasPoU)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_predicates() {
        let s = ParseAttemptStatus::Success(SuccessKind::ParsedContent);
        assert!(s.is_success());
        assert!(!s.is_absent());
        assert!(s.is_success_or_absent());
        assert!(!s.is_failed());
    }

    #[test]
    fn absent_predicates() {
        let s = ParseAttemptStatus::AbsentRep;
        assert!(!s.is_success());
        assert!(s.is_absent());
        assert!(s.is_success_or_absent());
        assert!(!s.is_failed());
    }

    #[test]
    fn failed_predicates() {
        for s in [
            ParseAttemptStatus::MissingItem,
            ParseAttemptStatus::MissingSeparator,
            ParseAttemptStatus::UnorderedSeqDiscriminatedFailure,
            ParseAttemptStatus::FailureUnspecified,
        ] {
            assert!(!s.is_success_or_absent(), "{:?}", s);
            assert!(s.is_failed(), "{:?}", s);
        }
    }

    #[test]
    fn missing_separator_predicate() {
        assert!(ParseAttemptStatus::MissingSeparator.is_missing_separator());
        assert!(!ParseAttemptStatus::MissingItem.is_missing_separator());
    }

    #[test]
    fn array_index_status_required_optional() {
        assert!(ArrayIndexStatus::Required(1).is_required());
        assert!(ArrayIndexStatus::Optional(2).is_optional());
        assert!(ArrayIndexStatus::Done.is_done());
        assert_eq!(ArrayIndexStatus::Required(3).occurrence(), Some(3));
        assert_eq!(ArrayIndexStatus::Done.occurrence(), None);
    }
}
