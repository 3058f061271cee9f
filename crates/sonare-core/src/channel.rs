//! Channel layouts and interleaving.
//!
//! Pure, allocation-free transforms between one interleaved buffer and one or
//! two per-channel buffers. Every function validates all lengths, offsets and
//! counts before writing, so a failed call leaves every buffer untouched.
//!
//! | Function | Layout |
//! |----------|--------|
//! | [`split`] / [`join`] | `L R L R ...` <-> `L L ...` + `R R ...` |
//! | [`interleave`] / [`deinterleave`] | one channel into/out of every other slot |
//! | [`interleave_pair`] / [`deinterleave_pair`] | two channels into/out of consecutive slots |
//!
//! The `*_at` variants take explicit offsets; offsets into interleaved
//! buffers are sample indices, not frame indices.
//!
//! ```rust
//! use sonare_core::channel::{join, split};
//!
//! let interleaved = [0, 1, 2, 3, 4, 5, 6, 7];
//! let mut left = [0; 4];
//! let mut right = [0; 4];
//! split(&interleaved, &mut left, &mut right).unwrap();
//! assert_eq!(left, [0, 2, 4, 6]);
//! assert_eq!(right, [1, 3, 5, 7]);
//!
//! let mut back = [0; 8];
//! join(&left, &right, &mut back).unwrap();
//! assert_eq!(back, interleaved);
//! ```

use crate::error::{DspError, Result};

/// Number of interleaved channels in a sample buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Channels {
    /// One sample per frame.
    #[default]
    Mono,
    /// Two samples per frame, left first.
    Stereo,
}

impl Channels {
    /// Samples per frame.
    #[inline]
    pub const fn count(self) -> usize {
        match self {
            Self::Mono => 1,
            Self::Stereo => 2,
        }
    }

    /// Layout for a channel count of 1 or 2.
    pub fn from_count(count: usize) -> Result<Self> {
        match count {
            1 => Ok(Self::Mono),
            2 => Ok(Self::Stereo),
            _ => Err(DspError::range("channels", "must be 1 or 2")),
        }
    }

    /// `Stereo` if `stereo` is true, otherwise `Mono`.
    pub const fn from_stereo(stereo: bool) -> Self {
        if stereo { Self::Stereo } else { Self::Mono }
    }

    /// Whether this is the stereo layout.
    pub const fn is_stereo(self) -> bool {
        matches!(self, Self::Stereo)
    }
}

/// Check that `offset + count * stride` fits in `len`.
fn check_span(
    param: &'static str,
    len: usize,
    offset: usize,
    count: usize,
    stride: usize,
) -> Result<()> {
    let end = count
        .checked_mul(stride)
        .and_then(|n| n.checked_add(offset));
    match end {
        Some(end) if end <= len => Ok(()),
        _ => Err(DspError::range(param, "offset + count exceeds buffer length")),
    }
}

/// Split an interleaved stereo buffer into left and right channels.
///
/// `left[i] = interleaved[2i]`, `right[i] = interleaved[2i + 1]`.
///
/// # Errors
///
/// [`DspError::ArgumentRange`] unless
/// `interleaved.len() == 2 * left.len() == 2 * right.len()`.
pub fn split<T: Copy>(interleaved: &[T], left: &mut [T], right: &mut [T]) -> Result<()> {
    if left.len() != right.len() {
        return Err(DspError::range("right", "must match the left channel length"));
    }
    if interleaved.len() != left.len() * 2 {
        return Err(DspError::range(
            "interleaved",
            "must be twice the channel length",
        ));
    }

    for ((frame, l), r) in interleaved
        .chunks_exact(2)
        .zip(left.iter_mut())
        .zip(right.iter_mut())
    {
        *l = frame[0];
        *r = frame[1];
    }
    Ok(())
}

/// Join left and right channels into an interleaved stereo buffer.
///
/// Inverse of [`split`], with the same length contract.
pub fn join<T: Copy>(left: &[T], right: &[T], interleaved: &mut [T]) -> Result<()> {
    if left.len() != right.len() {
        return Err(DspError::range("right", "must match the left channel length"));
    }
    if interleaved.len() != left.len() * 2 {
        return Err(DspError::range(
            "interleaved",
            "must be twice the channel length",
        ));
    }

    for ((frame, &l), &r) in interleaved
        .chunks_exact_mut(2)
        .zip(left.iter())
        .zip(right.iter())
    {
        frame[0] = l;
        frame[1] = r;
    }
    Ok(())
}

/// Write `count` samples of `source` into every other slot of `destination`.
///
/// Shorthand for [`interleave_at`] with both offsets at zero.
pub fn interleave<T: Copy>(source: &[T], destination: &mut [T], count: usize) -> Result<()> {
    interleave_at(source, 0, destination, 0, count)
}

/// `destination[destination_offset + 2i] = source[source_offset + i]` for
/// `i < count`.
///
/// The alternate slots of `destination` are left untouched.
///
/// # Errors
///
/// [`DspError::ArgumentRange`] unless `source_offset + count <= source.len()`
/// and `destination_offset + 2 * count <= destination.len()`. Capacity is
/// counted in whole frames, so the slot after the last written sample must
/// exist too even though it is never touched.
pub fn interleave_at<T: Copy>(
    source: &[T],
    source_offset: usize,
    destination: &mut [T],
    destination_offset: usize,
    count: usize,
) -> Result<()> {
    check_span("source", source.len(), source_offset, count, 1)?;
    check_span("destination", destination.len(), destination_offset, count, 2)?;

    let source = &source[source_offset..source_offset + count];
    for (d, &s) in destination[destination_offset..]
        .iter_mut()
        .step_by(2)
        .zip(source)
    {
        *d = s;
    }
    Ok(())
}

/// Write `count` pairs from two sources into consecutive slots.
///
/// Shorthand for [`interleave_pair_at`] with all offsets at zero.
pub fn interleave_pair<T: Copy>(
    first: &[T],
    second: &[T],
    destination: &mut [T],
    count: usize,
) -> Result<()> {
    interleave_pair_at(first, 0, second, 0, destination, 0, count)
}

/// `destination[d + 2i] = first[f + i]` and
/// `destination[d + 2i + 1] = second[s + i]` for `i < count`.
///
/// Typical uses are left/right frames or real/imaginary pairs.
pub fn interleave_pair_at<T: Copy>(
    first: &[T],
    first_offset: usize,
    second: &[T],
    second_offset: usize,
    destination: &mut [T],
    destination_offset: usize,
    count: usize,
) -> Result<()> {
    check_span("first", first.len(), first_offset, count, 1)?;
    check_span("second", second.len(), second_offset, count, 1)?;
    check_span("destination", destination.len(), destination_offset, count, 2)?;

    let first = &first[first_offset..first_offset + count];
    let second = &second[second_offset..second_offset + count];
    let destination = &mut destination[destination_offset..destination_offset + 2 * count];
    for ((pair, &a), &b) in destination.chunks_exact_mut(2).zip(first).zip(second) {
        pair[0] = a;
        pair[1] = b;
    }
    Ok(())
}

/// Extract `count` samples from every other slot of `source`.
///
/// Shorthand for [`deinterleave_at`] with both offsets at zero.
pub fn deinterleave<T: Copy>(source: &[T], destination: &mut [T], count: usize) -> Result<()> {
    deinterleave_at(source, 0, destination, 0, count)
}

/// `destination[destination_offset + i] = source[source_offset + 2i]` for
/// `i < count`.
///
/// # Errors
///
/// [`DspError::ArgumentRange`] unless `source_offset + 2 * count <= source.len()`
/// and `destination_offset + count <= destination.len()`. As with
/// [`interleave_at`], the source must hold `count` whole frames, including
/// the unread slot after the last sample taken.
pub fn deinterleave_at<T: Copy>(
    source: &[T],
    source_offset: usize,
    destination: &mut [T],
    destination_offset: usize,
    count: usize,
) -> Result<()> {
    check_span("source", source.len(), source_offset, count, 2)?;
    check_span("destination", destination.len(), destination_offset, count, 1)?;

    let destination = &mut destination[destination_offset..destination_offset + count];
    for (d, &s) in destination
        .iter_mut()
        .zip(source[source_offset..].iter().step_by(2))
    {
        *d = s;
    }
    Ok(())
}

/// Extract `count` consecutive pairs of `source` into two destinations.
///
/// Shorthand for [`deinterleave_pair_at`] with all offsets at zero.
pub fn deinterleave_pair<T: Copy>(
    source: &[T],
    first: &mut [T],
    second: &mut [T],
    count: usize,
) -> Result<()> {
    deinterleave_pair_at(source, 0, first, 0, second, 0, count)
}

/// `first[f + i] = source[s + 2i]` and `second[g + i] = source[s + 2i + 1]`
/// for `i < count`.
pub fn deinterleave_pair_at<T: Copy>(
    source: &[T],
    source_offset: usize,
    first: &mut [T],
    first_offset: usize,
    second: &mut [T],
    second_offset: usize,
    count: usize,
) -> Result<()> {
    check_span("source", source.len(), source_offset, count, 2)?;
    check_span("first", first.len(), first_offset, count, 1)?;
    check_span("second", second.len(), second_offset, count, 1)?;

    let source = &source[source_offset..source_offset + 2 * count];
    let first = &mut first[first_offset..first_offset + count];
    let second = &mut second[second_offset..second_offset + count];
    for ((pair, a), b) in source
        .chunks_exact(2)
        .zip(first.iter_mut())
        .zip(second.iter_mut())
    {
        *a = pair[0];
        *b = pair[1];
    }
    Ok(())
}
