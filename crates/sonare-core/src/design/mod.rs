//! Impulse-response designers.
//!
//! A designer is a pure function of its configured parameters and the
//! requested length: it writes coefficients into a caller-owned slice and
//! never keeps a reference to it.
//!
//! - [`LowPass`] - windowed-sinc low-pass kernel, plus [`transition_delta`]
//! - [`Comb`] - fractional-delay tap comb (flanging, echo, resonance)
//! - [`Resonator`] - Gaussian-enveloped sinusoid bank
//!
//! # Example
//!
//! ```rust
//! use sonare_core::{ImpulseResponse, LowPass, Window};
//!
//! let lowpass = LowPass::new(48000.0, 4000.0).unwrap();
//! let mut taps = lowpass.generate(64).unwrap();
//! Window::Blackman.apply(&mut taps);
//! assert_eq!(taps.len(), 64);
//! ```

mod comb;
mod lowpass;
mod resonator;

pub use comb::Comb;
pub use lowpass::{LowPass, transition_delta};
pub use resonator::Resonator;

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use crate::error::{DspError, Result};

/// Common interface of all coefficient designers.
pub trait ImpulseResponse {
    /// Write the impulse response into `coefficients`.
    ///
    /// Whether existing values are overwritten or accumulated into is
    /// documented per designer. An empty slice is a range error.
    fn generate_into(&self, coefficients: &mut [f64]) -> Result<()>;

    /// Allocate a zeroed sequence of `length` coefficients and fill it.
    fn generate(&self, length: usize) -> Result<Vec<f64>> {
        if length == 0 {
            return Err(DspError::range("length", "must be greater than 0"));
        }
        let mut coefficients = vec![0.0; length];
        self.generate_into(&mut coefficients)?;
        Ok(coefficients)
    }
}

pub(crate) fn check_not_empty(coefficients: &[f64]) -> Result<()> {
    if coefficients.is_empty() {
        Err(DspError::range("coefficients", "must not be empty"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_length_is_rejected_by_every_designer() {
        let designers: [&dyn ImpulseResponse; 3] = [
            &LowPass::new(48000.0, 1000.0).unwrap(),
            &Comb::new(4.0, 0.5).unwrap(),
            &Resonator::new(48000.0).unwrap(),
        ];
        for designer in designers {
            assert!(matches!(
                designer.generate(0),
                Err(DspError::ArgumentRange { param: "length", .. })
            ));
            assert!(designer.generate_into(&mut []).is_err());
        }
    }

    #[test]
    fn generate_returns_requested_length() {
        let lowpass = LowPass::new(44100.0, 5000.0).unwrap();
        for len in [1, 2, 31, 256] {
            assert_eq!(lowpass.generate(len).unwrap().len(), len);
        }
    }
}
