//! The inner loop that iterates occurrences of a repeating child: computes
//! each iteration's [`ArrayIndexStatus`], invokes the child, and applies the
//! forward-progress and occurrence-bound safety rules.

use crate::child::{ChildParser, RepeatingChildParser, Trd};
use crate::pos::BitPos;
use crate::pou::{with_point_of_uncertainty, PoUMark};
use crate::state::ParseState;
use crate::status::{ArrayIndexStatus, ParseAttemptStatus, RequiredOptionalStatus};

/// Runs the array driver for one repeating child term, iterating occurrences
/// until `arrayIndexStatus` says `Done`, the parse fails, or a fatal
/// occurrence-limit is hit.
///
/// Returns the `(prior, last)` attempt-status pair, for the child's own
/// `finalChecks`.
#[allow(clippy::missing_inline_in_public_items)]
pub fn run_array(
    pstate: &mut ParseState,
    child: &mut dyn RepeatingChildParser,
    is_ordered: bool,
) -> (ParseAttemptStatus, ParseAttemptStatus) {
    let span = crate::logging::array_span(&child.trd().prefixed_name);
    let _enter = span.enter();

    child.start_array(pstate);

    let mut prior = ParseAttemptStatus::Uninitialized;
    let mut result = ParseAttemptStatus::Uninitialized;

    loop {
        // Occurrence-limit check, run before every attempt. Placed here
        // rather than inside the per-attempt dispatch (where the design
        // narrates it as the first step) because it's fatal and must never
        // be healed by an abandoned point of uncertainty's automatic
        // rollback; checking before any PoU for this iteration even exists
        // sidesteps that interaction entirely.
        if pstate.array_pos > pstate.tunables.max_occurs_bounds {
            pstate.set_fatal(format!(
                "Occurrence count for {} exceeded the tunable limit of {}",
                child.trd().prefixed_name,
                pstate.tunables.max_occurs_bounds
            ));
            break;
        }

        let min = child.min_repeats(pstate);
        let max = child.max_repeats(pstate);
        let mut ais = child.array_index_status(min, max, pstate);

        if pstate.is_failure() || ais.is_done() {
            break;
        }

        let required = ais.is_required();
        let prior_pos = pstate.bit_pos;

        let next_result = parse_one_instance(pstate, child, required, is_ordered);
        prior = result;
        result = next_result;
        // `ais` only ever stays at its pre-attempt value on Success/AbsentRep;
        // every other outcome (MissingSeparator-while-success, any Failed*)
        // forces the iteration Done, per the dispatch table.
        if !matches!(
            result,
            ParseAttemptStatus::AbsentRep | ParseAttemptStatus::Success(_)
        ) {
            ais = ArrayIndexStatus::Done;
        }

        let curr_pos = pstate.bit_pos;

        if pstate.is_success()
            && !child.is_bounded_max()
            && matches!(
                result,
                ParseAttemptStatus::AbsentRep | ParseAttemptStatus::Success(_)
            )
        {
            ais = check_forward_progress(pstate, curr_pos, prior_pos, ais, child.trd());
        }

        if !ais.is_done() {
            pstate.array_pos += 1;
        }

        if curr_pos > prior_pos
            || (result.is_absent() && pstate.is_success() && child.is_positional())
            || result.is_success()
        {
            pstate.group_pos += 1;
        }

        if ais.is_done() {
            break;
        }
    }

    child.end_array(pstate);
    (prior, result)
}

/// No forward progress: a zero-width speculative match repeated past the
/// first group position would loop forever. Forces `ais = Done` and fails
/// the parse.
fn check_forward_progress(
    pstate: &mut ParseState,
    curr_pos: BitPos,
    prior_pos: BitPos,
    ais: ArrayIndexStatus,
    trd: &Trd,
) -> ArrayIndexStatus {
    if curr_pos == prior_pos && pstate.group_pos > 1 {
        pstate.set_failure(
            crate::error::NoForwardProgress {
                group_pos: pstate.group_pos,
            }
            .build()
            .to_string(),
        );
        tracing::debug!(
            term = %trd.prefixed_name,
            group_pos = pstate.group_pos,
            "no forward progress, ending array"
        );
        ArrayIndexStatus::Done
    } else {
        ais
    }
}

/// A point of uncertainty is needed for an ordered sequence's speculative
/// (non-required) child that declares it can partially consume input.
/// Unordered sequences defer their own PoU handling to the choice layer
/// above this driver.
fn needs_pou<C: ChildParser + ?Sized>(is_ordered: bool, child: &C, required: bool) -> bool {
    is_ordered && child.pou_status().has_pou() && !required
}

/// Wraps one occurrence attempt in a point of uncertainty if the child and
/// context call for one, then dispatches on the result.
///
/// Generic over any [`ChildParser`] rather than tied to
/// [`RepeatingChildParser`]: the sequence driver reuses this same function
/// for scalar children's single attempt, exactly as the design calls for.
pub(crate) fn parse_one_instance<C: ChildParser + ?Sized>(
    pstate: &mut ParseState,
    child: &mut C,
    required: bool,
    is_ordered: bool,
) -> ParseAttemptStatus {
    if needs_pou(is_ordered, child, required) {
        let context = child.context().to_string();
        with_point_of_uncertainty(pstate, "array-occurrence", context, |scope| {
            let mark = scope.mark();
            parse_one_instance_with_maybe_pou(scope.pstate, Some(mark), required, child)
        })
    } else {
        parse_one_instance_with_maybe_pou(pstate, None, required, child)
    }
}

/// Runs exactly one occurrence attempt, then dispatches on its
/// [`ParseAttemptStatus`], rewinding, committing, or raising a parse error as
/// the design's table dictates.
///
/// Operates on the bare `PoUMark` (and `pstate` directly) rather than
/// threading a [`crate::pou::PoUScope`] through, since every exit path here
/// already calls `discard`/`reset` explicitly; the enclosing
/// `with_point_of_uncertainty` scope's `Drop` guard only ever has to step in
/// for a panic, and `force_release` is idempotent against a mark that's
/// already been popped.
fn parse_one_instance_with_maybe_pou<C: ChildParser + ?Sized>(
    pstate: &mut ParseState,
    pou: Option<PoUMark>,
    required: bool,
    child: &mut C,
) -> ParseAttemptStatus {
    let prior_pos = pstate.bit_pos;
    let result = child.parse_one(pstate, Some(required));
    let resolved = pou.map(|mark| pstate.is_resolved(mark)).unwrap_or(true);

    // The MissingSeparator/still-Success combination is the one legitimate
    // case where the result looks failed but the biconditional doesn't
    // apply: the child has already decided this is non-fatal and left
    // `processor_status` alone. Handle it before asserting the invariant.
    if matches!(result, ParseAttemptStatus::MissingSeparator) && pstate.is_success() {
        if let Some(mark) = pou {
            pstate.discard(mark);
        }
        return result;
    }

    debug_assert_eq!(
        pstate.is_success(),
        result.is_success_or_absent(),
        "status biconditional violated: processor is_success={} but attempt status={:?}",
        pstate.is_success(),
        result
    );

    match result {
        ParseAttemptStatus::Success(_) => {
            if let Some(mark) = pou {
                pstate.discard(mark);
            }
            result
        }

        ParseAttemptStatus::AbsentRep => {
            match pou {
                Some(mark) => {
                    assert!(
                        !resolved,
                        "AbsentRep result from an already-resolved point of uncertainty"
                    );
                    pstate.reset(mark);
                }
                None => {
                    // No PoU for this attempt: still ensure the pre-attempt
                    // position is restored (the conservative reading of the
                    // design's open question about rewind semantics).
                    pstate.bit_pos = prior_pos;
                }
            }
            ParseAttemptStatus::AbsentRep
        }

        failed if failed.is_failed() => {
            assert!(
                pstate.is_failure(),
                "status biconditional violated: failed attempt status but processor is_success"
            );

            if pou.is_some() && !resolved {
                // Optional speculative child failed before discriminating:
                // roll back and let the array end gracefully. `result` is
                // deliberately left as the original failed variant (not
                // rewritten to AbsentRep/Success) so it doesn't spuriously
                // register as a zero-width match with the forward-progress
                // check back in `run_array`.
                pstate.reset(pou.expect("checked is_some above"));
                failed
            } else if pou.is_some() && resolved {
                pstate.discard(pou.expect("checked is_some above"));
                ParseAttemptStatus::UnorderedSeqDiscriminatedFailure
            } else if child.trd().is_array {
                pstate.set_failure(
                    crate::error::FailedToPopulate {
                        name: child.trd().prefixed_name.clone(),
                        index: pstate.array_pos + 1,
                    }
                    .build()
                    .to_string(),
                );
                failed
            } else {
                failed
            }
        }

        ParseAttemptStatus::Uninitialized => {
            unreachable!("invariant violation: parse_one returned Uninitialized")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::child::{ChildParser, FinalChecks};
    use crate::state::Tunables;
    use crate::status::{PoUStatus, SuccessKind};

    /// A toy repeating child that succeeds, consuming 8 bits, for its first
    /// `succeed_count` occurrences, then reports `AbsentRep` forever after —
    /// a classic `minOccurs..maxOccurs` array.
    struct CountingArray {
        min: u64,
        max: u64,
        succeed_count: u64,
        attempts: u64,
        pou_status: PoUStatus,
        trd: Trd,
    }

    impl CountingArray {
        fn new(min: u64, max: u64, succeed_count: u64, pou_status: PoUStatus) -> Self {
            CountingArray {
                min,
                max,
                succeed_count,
                attempts: 0,
                pou_status,
                trd: Trd::array("arr"),
            }
        }
    }

    impl FinalChecks for CountingArray {
        fn final_checks(
            &self,
            _pstate: &mut ParseState,
            _last_result: ParseAttemptStatus,
            _prior_result: ParseAttemptStatus,
        ) {
        }
    }

    impl ChildParser for CountingArray {
        fn parse_one(
            &mut self,
            pstate: &mut ParseState,
            ro_status: Option<bool>,
        ) -> ParseAttemptStatus {
            self.attempts += 1;
            if self.attempts <= self.succeed_count {
                pstate.bit_pos = pstate.bit_pos.advance(8);
                ParseAttemptStatus::Success(SuccessKind::ParsedContent)
            } else if ro_status == Some(true) {
                pstate.set_failure("required occurrence did not materialize");
                ParseAttemptStatus::MissingItem
            } else {
                pstate.set_success();
                ParseAttemptStatus::AbsentRep
            }
        }

        fn pou_status(&self) -> PoUStatus {
            self.pou_status
        }

        fn context(&self) -> &str {
            "counting-array"
        }

        fn trd(&self) -> &Trd {
            &self.trd
        }
    }

    impl RepeatingChildParser for CountingArray {
        fn min_repeats(&self, _pstate: &ParseState) -> u64 {
            self.min
        }
        fn max_repeats(&self, _pstate: &ParseState) -> u64 {
            self.max
        }
        fn is_bounded_max(&self) -> bool {
            self.max != u64::MAX
        }
        fn is_positional(&self) -> bool {
            true
        }
        fn start_array(&mut self, _pstate: &mut ParseState) {}
        fn end_array(&mut self, _pstate: &mut ParseState) {}
        fn array_index_status(&self, min: u64, max: u64, pstate: &ParseState) -> ArrayIndexStatus {
            let n = pstate.array_pos + 1;
            if n > max {
                ArrayIndexStatus::Done
            } else if n <= min {
                ArrayIndexStatus::Required(n)
            } else {
                ArrayIndexStatus::Optional(n)
            }
        }
    }

    #[test]
    fn min_zero_max_zero_ends_without_any_attempt() {
        let mut pstate = ParseState::new(Tunables::default());
        let mut child = CountingArray::new(0, 0, 0, PoUStatus::HasPoU);
        let (_, _result) = run_array(&mut pstate, &mut child, true);
        assert!(pstate.is_success());
        assert_eq!(pstate.bit_pos, BitPos(0));
        assert!(pstate.pou_stack_is_empty());
    }

    #[test]
    fn unbounded_array_of_zero_width_absents_triggers_forward_progress_guard() {
        // A naive arrayIndexStatus that keeps offering further optional
        // occurrences without noticing the prior attempt consumed nothing
        // would otherwise loop forever; the driver's forward-progress check
        // is the safety net that catches it instead.
        let mut pstate = ParseState::new(Tunables::default());
        let mut child = CountingArray::new(0, u64::MAX, 0, PoUStatus::HasPoU);
        let (_, _result) = run_array(&mut pstate, &mut child, true);
        assert!(pstate.is_failure());
        assert!(pstate.pou_stack_is_empty());
    }

    #[test]
    fn min_two_max_five_produces_exactly_enough_occurrences() {
        let mut pstate = ParseState::new(Tunables::default());
        let mut child = CountingArray::new(2, 5, 3, PoUStatus::HasPoU);
        let (_, _result) = run_array(&mut pstate, &mut child, true);
        assert!(pstate.is_success());
        assert_eq!(pstate.bit_pos, BitPos(24));
        assert!(pstate.pou_stack_is_empty());
    }

    #[test]
    fn required_occurrence_that_comes_up_absent_fails() {
        let mut pstate = ParseState::new(Tunables::default());
        // min=3 but the child only ever succeeds twice: the third, required
        // attempt gets AbsentRep, which must fail the parse (required
        // occurrences never get a PoU, so there's nothing to roll back to).
        let mut child = CountingArray::new(3, 3, 2, PoUStatus::HasPoU);
        let (_, _result) = run_array(&mut pstate, &mut child, true);
        assert!(pstate.is_failure());
        assert!(pstate.pou_stack_is_empty());
    }

    #[test]
    fn tunable_limit_exceeded_is_fatal() {
        let mut pstate = ParseState::new(Tunables {
            max_occurs_bounds: 3,
        });
        let mut child = CountingArray::new(0, u64::MAX, 1_000, PoUStatus::NoPoU);
        let (_, _result) = run_array(&mut pstate, &mut child, true);
        assert!(pstate.is_failure());
        assert!(pstate.is_fatal());
        assert!(pstate.pou_stack_is_empty());
    }
}
