//! Window functions for shaping FIR coefficient sequences.
//!
//! A window tapers a truncated impulse response toward zero at both ends,
//! trading main-lobe width for side-lobe suppression. All windows here are
//! symmetric with their peak at the centre of the sequence and are applied
//! in place:
//!
//! ```rust
//! use sonare_core::Window;
//!
//! let mut taps = vec![1.0; 9];
//! Window::Blackman.apply(&mut taps);
//! assert!((taps[4] - 1.0).abs() < 1e-12);
//! assert!(taps[0].abs() < 1e-12);
//! ```
//!
//! A length-1 sequence is left unscaled.

use core::f64::consts::PI;
use libm::cos;

/// Symmetric window shapes.
///
/// | Window | Side lobes | Main lobe |
/// |--------|-----------|-----------|
/// | [`Rectangular`](Self::Rectangular) | -13 dB | narrowest |
/// | [`Hann`](Self::Hann) | -31 dB | 2x |
/// | [`Hamming`](Self::Hamming) | -43 dB | 2x |
/// | [`Blackman`](Self::Blackman) | -58 dB | 3x |
/// | [`Nuttall`](Self::Nuttall) | -93 dB | 4x |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Window {
    /// No tapering (all weights 1.0).
    Rectangular,
    /// Raised cosine.
    Hann,
    /// Raised cosine on a 0.08 pedestal.
    Hamming,
    /// Three-term Blackman window.
    #[default]
    Blackman,
    /// Four-term Nuttall window.
    Nuttall,
}

impl Window {
    /// Weight of position `index` in a window of `len` points.
    ///
    /// `len <= 1` always yields 1.0.
    #[inline]
    pub fn weight(self, index: usize, len: usize) -> f64 {
        if len <= 1 {
            return 1.0;
        }
        let phase = 2.0 * PI * index as f64 / (len - 1) as f64;
        match self {
            Self::Rectangular => 1.0,
            Self::Hann => 0.5 - 0.5 * cos(phase),
            Self::Hamming => 0.54 - 0.46 * cos(phase),
            Self::Blackman => 0.42 - 0.5 * cos(phase) + 0.08 * cos(2.0 * phase),
            Self::Nuttall => {
                0.355768 - 0.487396 * cos(phase) + 0.144232 * cos(2.0 * phase)
                    - 0.012604 * cos(3.0 * phase)
            }
        }
    }

    /// Multiply every coefficient by its window weight.
    pub fn apply(self, coefficients: &mut [f64]) {
        let len = coefficients.len();
        if len <= 1 || self == Self::Rectangular {
            return;
        }
        for (i, c) in coefficients.iter_mut().enumerate() {
            *c *= self.weight(i, len);
        }
    }
}

/// Apply a Blackman window in place.
///
/// `w[i] = 0.42 - 0.5·cos(2πi/(N-1)) + 0.08·cos(4πi/(N-1))`
#[inline]
pub fn blackman(coefficients: &mut [f64]) {
    Window::Blackman.apply(coefficients);
}
