//! Basic parsers for slices

use snafu::Snafu;

pub mod num;
pub mod pos;

pub use self::pos::*;

use crate::{ParseDriver, Progress};

/// Matches the input slice against the `tag`, succeeding if both are equal.
#[inline]
pub fn tag<'a, T: PartialEq, S>(
    tag: &'a [T],
) -> impl Fn(&mut ParseDriver<S>, SlicePos<'a, T>) -> Progress<SlicePos<'a, T>, &'a [T], TagError> + 'a
{
    move |_, pos| {
        let (newpos, slice) = try_parse!(pos.take(tag.len()).map_err(|_| NotEnoughData.build()));

        if slice == tag {
            newpos.success(slice)
        } else {
            pos.failure(TagMismatch.build())
        }
    }
}

/// Errors that may happen when using [`tag`](tag).
#[derive(Debug, Snafu)]
#[snafu(visibility = "pub")]
pub enum TagError {
    /// The input slice was too short.
    NotEnoughData,
    /// The tag didn't match.
    TagMismatch,
}

/// The input slice didn't have enough elements left for a [`SlicePos::take`].
#[derive(Debug, Snafu, PartialEq, Eq, Clone, Copy)]
#[snafu(display("not enough data left in the input slice"))]
pub struct NotEnoughDataError;
