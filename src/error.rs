//! The error taxonomy of spec.md §7: recoverable parse errors that a point of
//! uncertainty can swallow, and fatal errors that never get a second chance.

use snafu::Snafu;

use crate::Recoverable;

/// A recoverable failure encountered while attempting to parse one child term.
///
/// These are the `ParseError` (PE) kinds of the design: surfaced failures
/// that a point of uncertainty may roll back, turning them into a benign
/// absence, or that propagate to fail the whole sequence if there's no PoU
/// (or it was already discriminated).
#[derive(Debug, Snafu, PartialEq, Eq, Clone)]
#[snafu(visibility = "pub")]
pub enum SeqError {
    /// A zero-width speculative match was seen twice in a row past the first
    /// group position; looping would never terminate.
    #[snafu(display("No forward progress at group position {group_pos}"))]
    NoForwardProgress {
        /// The `groupPos` at which the stall was detected.
        group_pos: u64,
    },

    /// A required array element could not be populated.
    #[snafu(display("Failed to populate {name}[{index}]"))]
    FailedToPopulate {
        /// The element's name, for diagnostics.
        name: String,
        /// The 1-based occurrence index that failed.
        index: u64,
    },

    /// A required scalar or group child could not be populated.
    #[snafu(display("Failed to populate {name}"))]
    MissingRequiredItem {
        /// The term's name, for diagnostics.
        name: String,
    },

    /// A separator was required between group members but absent.
    #[snafu(display("Missing separator before {name}"))]
    MissingSeparator {
        /// The term's name, for diagnostics.
        name: String,
    },

    /// A child committed past a point of uncertainty (e.g. consumed a
    /// discriminator) and then failed; alternatives must not be tried.
    #[snafu(display("Discriminated failure in unordered sequence at {name}"))]
    UnorderedSeqDiscriminated {
        /// The term's name, for diagnostics.
        name: String,
    },
}

impl Recoverable for SeqError {
    #[inline]
    fn recoverable(&self) -> bool {
        !matches!(self, SeqError::UnorderedSeqDiscriminated { .. })
    }
}

/// A fatal error: never recoverable via a point of uncertainty, surfaces
/// immediately and aborts the enclosing parse.
#[derive(Debug, Snafu, PartialEq, Eq, Clone)]
#[snafu(visibility = "pub")]
pub enum FatalError {
    /// `arrayPos` exceeded `tunable.maxOccursBounds`; this is a safety cap,
    /// not a schema-correct upper bound, and exceeding it always aborts.
    #[snafu(display(
        "Occurrence count for {name} exceeded the tunable limit of {bound}"
    ))]
    TunableLimitExceeded {
        /// The array's name, for diagnostics.
        name: String,
        /// The configured `maxOccursBounds`.
        bound: u64,
    },

    /// A programmer error: mis-nested PoU marks, or the success/failure
    /// biconditional was violated by a child parser.
    #[snafu(display("Invariant violated: {detail}"))]
    InvariantViolation {
        /// What invariant was broken.
        detail: String,
    },
}

impl Recoverable for FatalError {
    #[inline]
    fn recoverable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_seq_errors_are_recoverable() {
        assert!(SeqError::NoForwardProgress { group_pos: 2 }.recoverable());
        assert!(SeqError::MissingRequiredItem {
            name: "a".to_string()
        }
        .recoverable());
    }

    #[test]
    fn discriminated_failure_is_not_recoverable() {
        assert!(!SeqError::UnorderedSeqDiscriminated {
            name: "b".to_string()
        }
        .recoverable());
    }

    #[test]
    fn fatal_errors_are_never_recoverable() {
        assert!(!FatalError::TunableLimitExceeded {
            name: "arr".to_string(),
            bound: 1_000,
        }
        .recoverable());
    }
}
