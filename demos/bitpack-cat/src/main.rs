//! Reads a tiny fixed-layout record format (one count byte, then that many
//! RGB triples) and prints the parsed infoset. A smoke test for the sequence
//! driver over real bytes, built the way the teacher crate's own
//! `examples/msgpack.rs` drove `ParseDriver` over a file.

use dfdl_seq::{
    ArrayIndexStatus, Child, ChildParser, FinalChecks, InfosetNode, ParseAttemptStatus,
    ParseState, PoUStatus, RepeatingChildParser, ScalarChildParser, ScalarValue, SequenceGroup,
    SuccessKind, Trd, Tunables,
};

fn main() {
    tracing_subscriber::fmt::init();

    let path = std::env::args_os()
        .nth(1)
        .expect("usage: bitpack-cat <file>");
    let data = std::fs::read(&path).expect("failed to read file");

    let mut pstate = ParseState::new(Tunables::from_env());
    let mut group = SequenceGroup {
        children: vec![
            Child::Scalar(Box::new(RecordCount {
                data: &data,
                trd: Trd::scalar("count"),
            })),
            Child::Repeating(Box::new(PixelTriples {
                data: &data,
                trd: Trd::array("pixel"),
            })),
        ],
        is_ordered: true,
        schema_order: vec!["count".into(), "pixel".into()],
    };

    dfdl_seq::parse(&mut pstate, &mut group);

    if pstate.is_success() {
        for node in pstate.infoset.into_root() {
            println!("{:?}", node);
        }
    } else {
        eprintln!(
            "parse failed at bit {}: {:?}",
            pstate.bit_pos.0, pstate.processor_status
        );
        std::process::exit(1);
    }
}

/// The record-count header: a single byte, always required.
struct RecordCount<'a> {
    data: &'a [u8],
    trd: Trd,
}

impl FinalChecks for RecordCount<'_> {
    fn final_checks(&self, _: &mut ParseState, _: ParseAttemptStatus, _: ParseAttemptStatus) {}
}

impl ChildParser for RecordCount<'_> {
    fn parse_one(
        &mut self,
        pstate: &mut ParseState,
        _ro_status: Option<bool>,
    ) -> ParseAttemptStatus {
        let offset = pstate.bit_pos.byte_offset() as usize;
        match self.data.get(offset) {
            Some(&count) => {
                pstate.bit_pos = pstate.bit_pos.advance(8);
                pstate
                    .infoset
                    .push_child(InfosetNode::scalar("count", ScalarValue::Bytes(vec![count])));
                ParseAttemptStatus::Success(SuccessKind::ParsedContent)
            }
            None => {
                pstate.set_failure("unexpected end of input reading record count");
                ParseAttemptStatus::MissingItem
            }
        }
    }

    fn pou_status(&self) -> PoUStatus {
        PoUStatus::NoPoU
    }

    fn context(&self) -> &str {
        "count"
    }

    fn trd(&self) -> &Trd {
        &self.trd
    }
}

impl ScalarChildParser for RecordCount<'_> {
    fn maybe_static_required_optional_status(&self) -> bool {
        true
    }
}

/// The repeating RGB triples following the header. Runs until fewer than 3
/// bytes remain, at which point it reports absent rather than failing.
struct PixelTriples<'a> {
    data: &'a [u8],
    trd: Trd,
}

impl FinalChecks for PixelTriples<'_> {
    fn final_checks(&self, _: &mut ParseState, _: ParseAttemptStatus, _: ParseAttemptStatus) {}
}

impl ChildParser for PixelTriples<'_> {
    fn parse_one(
        &mut self,
        pstate: &mut ParseState,
        ro_status: Option<bool>,
    ) -> ParseAttemptStatus {
        let offset = pstate.bit_pos.byte_offset() as usize;
        if offset + 3 <= self.data.len() {
            let rgb = self.data[offset..offset + 3].to_vec();
            pstate.bit_pos = pstate.bit_pos.advance(24);
            pstate
                .infoset
                .push_child(InfosetNode::scalar("pixel", ScalarValue::Bytes(rgb)));
            ParseAttemptStatus::Success(SuccessKind::ParsedContent)
        } else if ro_status == Some(true) {
            pstate.set_failure("not enough bytes remaining for a required pixel");
            ParseAttemptStatus::MissingItem
        } else {
            pstate.set_success();
            ParseAttemptStatus::AbsentRep
        }
    }

    fn pou_status(&self) -> PoUStatus {
        PoUStatus::HasPoU
    }

    fn context(&self) -> &str {
        "pixel"
    }

    fn trd(&self) -> &Trd {
        &self.trd
    }
}

impl RepeatingChildParser for PixelTriples<'_> {
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
