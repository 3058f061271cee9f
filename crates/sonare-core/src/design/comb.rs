//! Fractional-delay comb design.
//!
//! Places one tap per repetition at multiples of a (possibly fractional)
//! delay, splitting each tap linearly between the two neighbouring indices.
//! Repetition `j` is scaled by `amplifier^j`, so `|amplifier| < 1` gives a
//! decaying echo train and `amplifier = 1` an even comb.

use libm::ceil;

use super::{ImpulseResponse, check_not_empty};
use crate::error::{DspError, Result};

/// Shortest accepted tap spacing in samples.
///
/// Generation walks one repetition per step, so the spacing bounds the work
/// at `length / MIN_DELAY` iterations.
const MIN_DELAY: f64 = 1e-3;

/// Comb impulse-response designer.
///
/// # Example
///
/// ```rust
/// use sonare_core::{Comb, ImpulseResponse};
///
/// let comb = Comb::new(4.0, 1.0).unwrap();
/// let taps = comb.generate(12).unwrap();
/// assert_eq!(taps, vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comb {
    delay: f64,
    amplifier: f64,
}

impl Comb {
    /// Create a comb designer.
    ///
    /// # Arguments
    /// * `delay` - Spacing between repetitions in samples (fractional allowed)
    /// * `amplifier` - Gain applied once per repetition
    ///
    /// # Errors
    ///
    /// [`DspError::ArgumentRange`] if `delay` is not finite or is below
    /// 0.001 samples, or if `amplifier` is not finite.
    pub fn new(delay: f64, amplifier: f64) -> Result<Self> {
        if !(delay.is_finite() && delay > 0.0) {
            return Err(DspError::range("delay", "must be a positive finite number"));
        }
        if delay < MIN_DELAY {
            return Err(DspError::range("delay", "must be at least 0.001 samples"));
        }
        if !amplifier.is_finite() {
            return Err(DspError::range("amplifier", "must be finite"));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(delay, amplifier, "comb designer configured");

        Ok(Self { delay, amplifier })
    }

    /// Repetition spacing in samples.
    pub fn delay(&self) -> f64 {
        self.delay
    }

    /// Per-repetition gain.
    pub fn amplifier(&self) -> f64 {
        self.amplifier
    }
}

impl ImpulseResponse for Comb {
    /// Adds the comb onto the existing contents of `coefficients`.
    fn generate_into(&self, coefficients: &mut [f64]) -> Result<()> {
        check_not_empty(coefficients)?;
        let size = coefficients.len();
        let mut progress = self.delay;
        let mut amp = 1.0;

        loop {
            let upper = ceil(progress);
            let alpha = 1.0 + progress - upper;
            let beta = 1.0 - alpha;
            // progress >= delay > 0, so upper >= 1
            let index = upper as usize - 1;
            progress += self.delay;

            if index >= size {
                break;
            }
            coefficients[index] += alpha * amp;

            if index + 1 >= size {
                break;
            }
            coefficients[index + 1] += beta * amp;

            amp *= self.amplifier;
        }
        Ok(())
    }
}
