//! Tracing spans and events the driver emits at its decision points.
//!
//! The teacher crate ships no logging of its own; this follows the wider
//! example pack's parser crates, which instrument their driving loops with
//! `tracing` spans rather than printing directly.

use tracing::Span;

/// Opens a span for one sequence's `parse` invocation.
#[inline]
pub fn sequence_span(is_ordered: bool) -> Span {
    tracing::debug_span!("sequence", ordered = is_ordered)
}

/// Opens a span for one repeating child's array driver run.
#[inline]
pub fn array_span(name: &str) -> Span {
    tracing::debug_span!("array", term = name)
}
