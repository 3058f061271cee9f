//! Conditional byte-order reversal for fixed-width integers.
//!
//! Binary readers and writers built on this crate call
//! [`ReverseBytes::reverse_bytes`] with `reverse` set when the stream's
//! endianness differs from the host's.

/// Conditionally reverse the byte order of an integer.
///
/// ```rust
/// use sonare_core::ReverseBytes;
///
/// assert_eq!(0x1234_i16.reverse_bytes(true), 0x3412);
/// assert_eq!(0x1234_i16.reverse_bytes(false), 0x1234);
/// ```
pub trait ReverseBytes: Sized {
    /// Return `self` with its bytes reversed if `reverse` is true, otherwise
    /// unchanged.
    fn reverse_bytes(self, reverse: bool) -> Self;
}

macro_rules! impl_reverse_bytes {
    ($($t:ty),*) => {
        $(
            impl ReverseBytes for $t {
                #[inline]
                fn reverse_bytes(self, reverse: bool) -> Self {
                    if reverse { self.swap_bytes() } else { self }
                }
            }
        )*
    };
}

impl_reverse_bytes!(i16, u16, i32, u32, i64, u64);

/// Whether the host stores integers little-endian.
#[inline]
pub const fn host_is_little_endian() -> bool {
    cfg!(target_endian = "little")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverses_each_width() {
        assert_eq!(0x0102_u16.reverse_bytes(true), 0x0201);
        assert_eq!(0x0102_0304_i32.reverse_bytes(true), 0x0403_0201);
        assert_eq!(
            0x0102_0304_0506_0708_u64.reverse_bytes(true),
            0x0807_0605_0403_0201
        );
    }

    #[test]
    fn passthrough_when_not_reversing() {
        assert_eq!((-2_i64).reverse_bytes(false), -2);
        assert_eq!(0x7fff_i16.reverse_bytes(false), 0x7fff);
    }

    #[test]
    fn reversal_is_an_involution() {
        for v in [0_i32, 1, -1, i32::MIN, i32::MAX, 0x00ff_ff00] {
            assert_eq!(v.reverse_bytes(true).reverse_bytes(true), v);
        }
    }

    #[test]
    fn matches_byte_array_round_trip() {
        let v = -12345_i16;
        let swapped = v.reverse_bytes(true);
        let mut bytes = v.to_ne_bytes();
        bytes.reverse();
        assert_eq!(swapped, i16::from_ne_bytes(bytes));
    }

    #[test]
    fn host_endianness_agrees_with_to_le() {
        assert_eq!(host_is_little_endian(), 1_u32.to_le() == 1);
    }
}
