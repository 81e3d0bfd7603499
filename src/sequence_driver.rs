//! The single public entry point: drives an ordered or unordered sequence of
//! child terms to completion against a [`ParseState`].

use crate::array_driver::{parse_one_instance, run_array};
use crate::child::Child;
use crate::state::ParseState;
use crate::status::ParseAttemptStatus;

/// A compiled sequence group: its children in schema order, plus whether
/// they are ordered or unordered.
pub struct SequenceGroup<'a> {
    /// The term order a schema compiler produced.
    pub children: Vec<Child<'a>>,
    /// `true` for an ordered sequence, `false` for an unordered one.
    pub is_ordered: bool,
    /// The declared child names, in schema order, used to re-sort an
    /// unordered sequence's matched children on exit.
    pub schema_order: Vec<String>,
}

/// Parses one sequence group against `pstate`, mutating it in place.
///
/// This is the crate's single entry point. Success or failure is
/// communicated through `pstate.processor_status`, not a `Result`: the
/// driver mutates, it does not return one, mirroring the way a streaming
/// parser reports status through its own cursor rather than unwinding.
#[allow(clippy::missing_inline_in_public_items)]
pub fn parse(pstate: &mut ParseState, group: &mut SequenceGroup<'_>) {
    let span = crate::logging::sequence_span(group.is_ordered);
    let _enter = span.enter();

    pstate.push_group_index(1);

    let limit = group.children.len();
    let mut scp_index = 0;
    let mut last_index = None;
    let mut prior = ParseAttemptStatus::Uninitialized;
    let mut result = ParseAttemptStatus::Uninitialized;
    let infoset_start = pstate.infoset.child_count();
    let mut is_done = false;

    while !is_done && scp_index < limit && pstate.is_success() {
        match &mut group.children[scp_index] {
            Child::Repeating(child) => {
                let (p, r) = run_array(pstate, child.as_mut(), group.is_ordered);
                prior = p;
                result = r;
            }

            Child::NonRepresented(child) => {
                // Side effects only; its result isn't consulted and the
                // group index does not advance for it.
                child.parse_one(pstate, None);
            }

            Child::Scalar(child) => {
                let required = child.maybe_static_required_optional_status();
                let next_result =
                    parse_one_instance(pstate, child.as_mut(), required, group.is_ordered);
                prior = result;
                result = next_result;

                match result {
                    ParseAttemptStatus::AbsentRep => {
                        // Trailing-position exit: trailing optional content
                        // is allowed to be wholly missing here.
                        pstate.set_success();
                        is_done = true;
                    }
                    ParseAttemptStatus::UnorderedSeqDiscriminatedFailure => {
                        is_done = true;
                    }
                    ParseAttemptStatus::MissingItem
                    | ParseAttemptStatus::MissingSeparator
                    | ParseAttemptStatus::FailureUnspecified
                        if !group.is_ordered =>
                    {
                        is_done = true;
                        pstate.set_success();
                    }
                    _ => {}
                }

                pstate.group_pos += 1;
            }
        }

        last_index = Some(scp_index);

        if group.is_ordered {
            scp_index += 1;
        } else if is_done {
            let schema_order: Vec<&str> = group.schema_order.iter().map(String::as_str).collect();
            pstate
                .infoset
                .flatten_and_validate_child_nodes(infoset_start, &schema_order);
        }
    }

    if let Some(index) = last_index {
        run_final_checks(&group.children[index], pstate, result, prior);
    }

    pstate.pop_group_index();
}

fn run_final_checks(
    child: &Child<'_>,
    pstate: &mut ParseState,
    result: ParseAttemptStatus,
    prior: ParseAttemptStatus,
) {
    match child {
        Child::Scalar(c) => c.final_checks(pstate, result, prior),
        Child::Repeating(c) => c.final_checks(pstate, result, prior),
        Child::NonRepresented(c) => c.final_checks(pstate, result, prior),
    }
}
