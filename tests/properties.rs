//! Property-based tests for the sequence driver's structural invariants
//! (spec.md §8, items 1, 2, 3, 5): group-index-stack balance, point-of-uncertainty
//! balance, monotonic position on success, and the forward-progress safety cap.

use dfdl_seq::{
    ArrayIndexStatus, Child, ChildParser, FinalChecks, InfosetNode, ParseAttemptStatus,
    ParseState, PoUStatus, RepeatingChildParser, ScalarChildParser, ScalarValue, SequenceGroup,
    SuccessKind, Trd, Tunables,
};
use proptest::prelude::*;

/// Reads one byte if present at the current offset, otherwise reports
/// absence (optional) or failure (required).
struct ByteOrAbsent<'a> {
    data: &'a [u8],
    name: String,
    required: bool,
    trd: Trd,
}

impl FinalChecks for ByteOrAbsent<'_> {
    fn final_checks(&self, _: &mut ParseState, _: ParseAttemptStatus, _: ParseAttemptStatus) {}
}

impl ChildParser for ByteOrAbsent<'_> {
    fn parse_one(
        &mut self,
        pstate: &mut ParseState,
        _ro_status: Option<bool>,
    ) -> ParseAttemptStatus {
        let offset = pstate.bit_pos.byte_offset() as usize;
        match self.data.get(offset) {
            Some(&b) => {
                pstate.bit_pos = pstate.bit_pos.advance(8);
                pstate
                    .infoset
                    .push_child(InfosetNode::scalar(self.name.clone(), ScalarValue::Bytes(vec![b])));
                ParseAttemptStatus::Success(SuccessKind::ParsedContent)
            }
            None if self.required => {
                pstate.set_failure(format!("missing required byte for {}", self.name));
                ParseAttemptStatus::MissingItem
            }
            None => {
                pstate.set_success();
                ParseAttemptStatus::AbsentRep
            }
        }
    }

    fn pou_status(&self) -> PoUStatus {
        if self.required {
            PoUStatus::NoPoU
        } else {
            PoUStatus::HasPoU
        }
    }

    fn context(&self) -> &str {
        &self.name
    }

    fn trd(&self) -> &Trd {
        &self.trd
    }
}

impl ScalarChildParser for ByteOrAbsent<'_> {
    fn maybe_static_required_optional_status(&self) -> bool {
        self.required
    }
}

proptest! {
    /// Whatever mix of required/optional scalars a schema declares, and
    /// however much input is actually available, a completed `parse` call
    /// always leaves the group-index stack and the point-of-uncertainty
    /// stack exactly as it found them.
    #[test]
    fn group_stack_and_pou_balance_hold_for_any_required_optional_mix(
        flags in prop::collection::vec(any::<bool>(), 1..6),
        input_len in 0usize..6,
    ) {
        let data: Vec<u8> = (0..input_len).map(|i| b'a' + (i as u8 % 26)).collect();
        let names: Vec<String> = (0..flags.len()).map(|i| format!("f{}", i)).collect();

        let mut pstate = ParseState::new(Tunables::default());
        let children: Vec<Child<'_>> = flags
            .iter()
            .zip(names.iter())
            .map(|(&required, name)| {
                Child::Scalar(Box::new(ByteOrAbsent {
                    data: &data,
                    name: name.clone(),
                    required,
                    trd: Trd::scalar(name.clone()),
                }))
            })
            .collect();

        let depth_before = pstate.group_index_stack().depth();

        let mut group = SequenceGroup {
            children,
            is_ordered: true,
            schema_order: names.clone(),
        };
        dfdl_seq::parse(&mut pstate, &mut group);

        prop_assert_eq!(pstate.group_index_stack().depth(), depth_before);
        prop_assert!(pstate.pou_stack_is_empty());
    }

    /// A successful parse never leaves the cursor behind where it started,
    /// and never runs it past the input it was given.
    #[test]
    fn position_is_monotonic_and_bounded_on_success(
        flags in prop::collection::vec(any::<bool>(), 1..6),
        input_len in 0usize..6,
    ) {
        let data: Vec<u8> = (0..input_len).map(|i| b'a' + (i as u8 % 26)).collect();
        let names: Vec<String> = (0..flags.len()).map(|i| format!("f{}", i)).collect();

        let mut pstate = ParseState::new(Tunables::default());
        let children: Vec<Child<'_>> = flags
            .iter()
            .zip(names.iter())
            .map(|(&required, name)| {
                Child::Scalar(Box::new(ByteOrAbsent {
                    data: &data,
                    name: name.clone(),
                    required,
                    trd: Trd::scalar(name.clone()),
                }))
            })
            .collect();

        let mut group = SequenceGroup {
            children,
            is_ordered: true,
            schema_order: names,
        };
        dfdl_seq::parse(&mut pstate, &mut group);

        if pstate.is_success() {
            prop_assert!(pstate.bit_pos.byte_offset() as usize <= data.len());
        }
    }
}

/// An array whose child keeps succeeding forever must still terminate: the
/// tunable occurrence cap always wins.
struct Forever {
    trd: Trd,
}

impl FinalChecks for Forever {
    fn final_checks(&self, _: &mut ParseState, _: ParseAttemptStatus, _: ParseAttemptStatus) {}
}

impl ChildParser for Forever {
    fn parse_one(&mut self, pstate: &mut ParseState, _: Option<bool>) -> ParseAttemptStatus {
        pstate.bit_pos = pstate.bit_pos.advance(1);
        ParseAttemptStatus::Success(SuccessKind::ParsedContent)
    }

    fn pou_status(&self) -> PoUStatus {
        PoUStatus::NoPoU
    }

    fn context(&self) -> &str {
        "forever"
    }

    fn trd(&self) -> &Trd {
        &self.trd
    }
}

impl RepeatingChildParser for Forever {
    fn min_repeats(&self, _pstate: &ParseState) -> u64 {
        0
    }
    fn max_repeats(&self, _pstate: &ParseState) -> u64 {
        u64::MAX
    }
    fn is_bounded_max(&self) -> bool {
        false
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

proptest! {
    #[test]
    fn forward_progress_cap_always_terminates(bound in 1u64..50) {
        let mut pstate = ParseState::new(Tunables {
            max_occurs_bounds: bound,
        });
        let mut group = SequenceGroup {
            children: vec![Child::Repeating(Box::new(Forever {
                trd: Trd::array("forever"),
            }))],
            is_ordered: true,
            schema_order: vec!["forever".into()],
        };

        dfdl_seq::parse(&mut pstate, &mut group);

        prop_assert!(pstate.array_pos <= bound + 1);
        prop_assert!(pstate.is_fatal());
    }
}
