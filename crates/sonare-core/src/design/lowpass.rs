//! Windowed-sinc low-pass design.
//!
//! The ideal low-pass response is `h[n] = 2·fc·sinc(2π·fc·n)` with `fc` the
//! cutoff normalised to the sampling rate. Truncating it to a finite length
//! and centring it at `length / 2` gives a linear-phase kernel; apply a
//! [`Window`](crate::Window) afterwards to tame the truncation ripple.

use core::f64::consts::PI;
use libm::{fabs, sin};

use super::{ImpulseResponse, check_not_empty};
use crate::error::{DspError, Result, check_frequency, check_sampling_rate};

/// Transition-width constant for Hann-class windows (in bins).
const TRANSITION_BINS: f64 = 3.1;

/// Minimum guard band, in Hz, between a cutoff and Nyquist for a kernel of
/// `length` taps at `sampling_rate`.
///
/// Callers subtract this from their intended cutoff so the transition band
/// of a `length`-tap kernel does not spill past Nyquist.
///
/// ```rust
/// use sonare_core::transition_delta;
///
/// let wide = transition_delta(48000.0, 32).unwrap();
/// let narrow = transition_delta(48000.0, 256).unwrap();
/// assert!(narrow < wide);
/// ```
pub fn transition_delta(sampling_rate: f64, length: usize) -> Result<f64> {
    check_sampling_rate("sampling_rate", sampling_rate)?;
    if length == 0 {
        return Err(DspError::range("length", "must be greater than 0"));
    }
    Ok(TRANSITION_BINS * sampling_rate / length as f64)
}

/// `sin(x) / x` with the removable singularity filled in.
#[inline]
fn sinc(x: f64) -> f64 {
    if fabs(x) < 1e-12 { 1.0 } else { sin(x) / x }
}

/// Windowed-sinc low-pass designer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowPass {
    sampling_rate: f64,
    cutoff: f64,
}

impl LowPass {
    /// Create a low-pass designer.
    ///
    /// # Errors
    ///
    /// - [`DspError::SamplingRate`] if `sampling_rate <= 0`
    /// - [`DspError::Frequency`] if `cutoff` is outside `[0, sampling_rate]`
    pub fn new(sampling_rate: f64, cutoff: f64) -> Result<Self> {
        check_sampling_rate("sampling_rate", sampling_rate)?;
        check_frequency("cutoff", cutoff, sampling_rate)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(sampling_rate, cutoff, "lowpass designer configured");

        Ok(Self {
            sampling_rate,
            cutoff,
        })
    }

    /// Sampling rate in Hz.
    pub fn sampling_rate(&self) -> f64 {
        self.sampling_rate
    }

    /// Cutoff frequency in Hz.
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Write the kernel centred at a fractional tap position.
    ///
    /// Overwrites `coefficients`. A non-integer `center` yields a
    /// sub-sample-shifted kernel.
    pub fn generate_centered(&self, coefficients: &mut [f64], center: f64) -> Result<()> {
        check_not_empty(coefficients)?;
        let fe = self.cutoff / self.sampling_rate;
        let omega = 2.0 * PI * fe;

        for (i, c) in coefficients.iter_mut().enumerate() {
            let x = i as f64 - center;
            *c = 2.0 * fe * sinc(omega * x);
        }
        Ok(())
    }
}

impl ImpulseResponse for LowPass {
    /// Overwrites `coefficients` with a kernel centred at `len / 2`.
    fn generate_into(&self, coefficients: &mut [f64]) -> Result<()> {
        let center = coefficients.len() as f64 / 2.0;
        self.generate_centered(coefficients, center)
    }
}
