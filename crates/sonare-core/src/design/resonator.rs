//! Resonator design: a bank of sinusoids under a Gaussian envelope.
//!
//! Each target frequency contributes
//! `sin(2π·i·f/fs) · amp · exp(-i² / strength²)` at sample `i`, with
//! `amp = amplifier / (length / 2)`. Larger `strength` lets the sinusoids ring
//! longer and sharpens the emphasis around each target.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::f64::consts::PI;
use libm::{exp, fabs, sin};

use super::{ImpulseResponse, check_not_empty};
use crate::error::{Result, check_frequency, check_sampling_rate};

/// Resonator impulse-response designer.
///
/// Defaults: no frequencies, `amplifier = 1.0`, `strength = +inf` (no decay).
///
/// # Example
///
/// ```rust
/// use sonare_core::{ImpulseResponse, Resonator};
///
/// let resonator = Resonator::new(48000.0)
///     .unwrap()
///     .with_frequencies([440.0, 880.0])
///     .with_strength(200.0);
/// let taps = resonator.generate(512).unwrap();
/// assert_eq!(taps[0], 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Resonator {
    sampling_rate: f64,
    frequencies: Vec<f64>,
    amplifier: f64,
    strength: f64,
}

impl Resonator {
    /// Create a resonator designer at the given sampling rate.
    pub fn new(sampling_rate: f64) -> Result<Self> {
        check_sampling_rate("sampling_rate", sampling_rate)?;
        Ok(Self {
            sampling_rate,
            frequencies: Vec::new(),
            amplifier: 1.0,
            strength: f64::INFINITY,
        })
    }

    /// Replace the set of emphasised frequencies.
    ///
    /// Frequencies are validated when the response is generated.
    pub fn with_frequencies(mut self, frequencies: impl IntoIterator<Item = f64>) -> Self {
        self.frequencies = frequencies.into_iter().collect();
        self
    }

    /// Set the overall gain.
    pub fn with_amplifier(mut self, amplifier: f64) -> Self {
        self.amplifier = amplifier;
        self
    }

    /// Set the Gaussian spread in samples. Zero yields a bare impulse.
    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = strength;
        self
    }

    /// Sampling rate in Hz.
    pub fn sampling_rate(&self) -> f64 {
        self.sampling_rate
    }

    /// Emphasised frequencies in Hz.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Overall gain.
    pub fn amplifier(&self) -> f64 {
        self.amplifier
    }

    /// Gaussian spread in samples.
    pub fn strength(&self) -> f64 {
        self.strength
    }

    fn check_frequencies(&self) -> Result<()> {
        self.frequencies
            .iter()
            .try_for_each(|&f| check_frequency("frequencies", f, self.sampling_rate))
    }
}

impl ImpulseResponse for Resonator {
    /// Clears `coefficients`, then sums one enveloped sinusoid per frequency.
    ///
    /// Every frequency is checked before anything is written.
    fn generate_into(&self, coefficients: &mut [f64]) -> Result<()> {
        check_not_empty(coefficients)?;
        self.check_frequencies()?;

        let size = coefficients.len();
        let amp = self.amplifier / (size as f64 / 2.0);
        coefficients.fill(0.0);

        if fabs(self.strength) < f64::EPSILON {
            coefficients[0] = amp;
            return Ok(());
        }

        let spread = self.strength * self.strength;
        for &frequency in &self.frequencies {
            let omega = 2.0 * PI * frequency / self.sampling_rate;
            for (i, c) in coefficients.iter_mut().enumerate() {
                let n = i as f64;
                *c += sin(omega * n) * amp * exp(-(n * n) / spread);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            frequencies = self.frequencies.len(),
            length = size,
            "resonator response generated"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DspError;

    #[test]
    fn zero_strength_is_single_impulse() {
        let resonator = Resonator::new(48000.0)
            .unwrap()
            .with_frequencies([100.0, 1000.0, 5000.0])
            .with_amplifier(3.0)
            .with_strength(0.0);
        let taps = resonator.generate(16).unwrap();
        assert_eq!(taps[0], 3.0 / 8.0);
        assert!(taps[1..].iter().all(|&t| t == 0.0));
    }

    #[test]
    fn out_of_range_frequency_writes_nothing() {
        let resonator = Resonator::new(8000.0)
            .unwrap()
            .with_frequencies([100.0, 9000.0, -5.0]);
        let mut taps = vec![7.0; 8];
        let err = resonator.generate_into(&mut taps).unwrap_err();
        assert_eq!(
            err,
            DspError::Frequency {
                param: "frequencies",
                value: 9000.0,
                limit: 8000.0
            }
        );
        assert!(taps.iter().all(|&t| t == 7.0));
    }

    #[test]
    fn negative_frequency_rejected() {
        let resonator = Resonator::new(8000.0).unwrap().with_frequencies([-1.0]);
        assert!(matches!(
            resonator.generate(8),
            Err(DspError::Frequency { value, .. }) if value == -1.0
        ));
    }

    #[test]
    fn clears_previous_contents() {
        let resonator = Resonator::new(8000.0).unwrap();
        let mut taps = vec![1.0; 8];
        resonator.generate_into(&mut taps).unwrap();
        assert!(taps.iter().all(|&t| t == 0.0));
    }

    #[test]
    fn infinite_strength_is_plain_sine() {
        let fs = 8000.0;
        let resonator = Resonator::new(fs).unwrap().with_frequencies([1000.0]);
        let taps = resonator.generate(32).unwrap();
        let amp = 1.0 / 16.0;
        for (i, &t) in taps.iter().enumerate() {
            let expected = (2.0 * PI * 1000.0 * i as f64 / fs).sin() * amp;
            assert!((t - expected).abs() < 1e-12, "index {i}");
        }
    }

    #[test]
    fn frequencies_superimpose() {
        let fs = 48000.0;
        let single = |f: f64| {
            Resonator::new(fs)
                .unwrap()
                .with_frequencies([f])
                .with_strength(50.0)
                .generate(64)
                .unwrap()
        };
        let both = Resonator::new(fs)
            .unwrap()
            .with_frequencies([300.0, 2000.0])
            .with_strength(50.0)
            .generate(64)
            .unwrap();
        let a = single(300.0);
        let b = single(2000.0);
        for i in 0..64 {
            assert!((both[i] - (a[i] + b[i])).abs() < 1e-12);
        }
    }

    #[test]
    fn envelope_decays() {
        let taps = Resonator::new(48000.0)
            .unwrap()
            .with_frequencies([3000.0])
            .with_strength(20.0)
            .generate(256)
            .unwrap();
        let head: f64 = taps[..32].iter().map(|t| t.abs()).sum();
        let tail: f64 = taps[128..160].iter().map(|t| t.abs()).sum();
        assert!(tail < head * 1e-6, "head {head}, tail {tail}");
    }
}
