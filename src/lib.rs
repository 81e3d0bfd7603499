#![warn(clippy::missing_inline_in_public_items)]
#![deny(rust_2018_idioms)]
#![warn(missing_docs)]

//! A sequence-combinator parser driver for a DFDL-style data description
//! engine: speculative, backtracking parsing of an ordered or unordered
//! sequence of child terms over a bit-addressed input, with points of
//! uncertainty, array-occurrence iteration, and group/array index
//! bookkeeping.

/// An analog to `try!`/`?`, but for `Progress`
#[macro_export]
macro_rules! try_parse {
    ($e:expr) => {
        match $e {
            $crate::Progress {
                pos,
                status: ::std::result::Result::Ok(val),
            } => (pos, val),

            $crate::Progress {
                pos,
                status: ::std::result::Result::Err(val),
            } => {
                return $crate::Progress {
                    pos,
                    status: ::std::result::Result::Err(val.into()),
                }
            }
        }
    };
}

macro_rules! opt_assert {
    ($cond:expr $(,)?) => {
        if cfg!(any(test, feature = "loop_assert")) {
            assert!($cond);
        } else {
            debug_assert!($cond);
        }
    };

    ($cond:expr, $($arg:tt)+) => {{}
        if cfg!(any(test, feature = "loop_assert")) {
            assert!($cond, $($arg)+)
        } else {
            debug_assert!($cond, $($arg)+);
        }
    };
}

mod array_driver;
mod child;
mod config;
mod error;
mod logging;
mod pos;
mod pou;
mod sequence_driver;
mod state;
mod status;

pub use self::array_driver::run_array;
pub use self::child::{
    Child, ChildParser, FinalChecks, NonRepresentedChildParser, RepeatingChildParser,
    ScalarChildParser, Trd,
};
pub use self::error::{FatalError, SeqError};
pub use self::pos::{BitPos, Pos};
pub use self::pou::{with_point_of_uncertainty, PoUMark, PoUScope};
pub use self::sequence_driver::{parse, SequenceGroup};
pub use self::state::{
    GroupIndexStack, Infoset, InfosetNode, InfosetValue, ParseState, ProcessorStatus,
    ScalarValue, Tunables,
};
pub use self::status::{
    ArrayIndexStatus, ParseAttemptStatus, PoUStatus, RequiredOptionalStatus, SuccessKind,
};

// The teacher's original parser-combinator toolkit: `Progress`/`Push`/
// `ParseDriver` plus the `optional`/`alternate`/`count`/`n_or_more`
// combinators built on them. Kept as the foundation the sequence and array
// drivers above are themselves an extended member of, and so downstream
// crates (e.g. `dfdl-seq-diagnostics`) can still attach snafu diagnostics to
// a `Progress` the way the teacher does.
pub mod combinators;
pub mod error_accumulator;
mod parse_driver;
mod progress;
mod push;
pub mod slice;

#[cfg(feature = "with_snafu")]
mod snafu;

pub use self::parse_driver::ParseDriver;
pub use self::progress::Progress;
pub use self::push::Push;

/// Indicates if an error allows a parent parser to recover and try something else.
///
/// Errors usually are irrecoverable if the input is well-formed,
/// but other constraints failed.
pub trait Recoverable {
    /// Returns `true` if the parse failure is recoverable, `false` otherwise.
    fn recoverable(&self) -> bool;
}
