//! Direct-form FIR convolution over interleaved sample buffers.
//!
//! [`ConvolutionFilter`] owns a coefficient set and convolves blocks in place,
//! keeping channels independent: in stereo mode channel 0 output only ever
//! draws on channel 0 input.
//!
//! The engine carries the last `filter_size - 1` input frames between calls,
//! so feeding a long signal block by block gives the same result as
//! convolving it in one piece. Loading new coefficients discards that
//! history.
//!
//! ```rust
//! use sonare_core::{Channels, ConvolutionFilter};
//!
//! // Two-tap moving sum on a stereo buffer
//! let mut filter = ConvolutionFilter::new(Channels::Stereo, &[1.0, 1.0]).unwrap();
//! let mut buffer = [1.0, 10.0, 2.0, 20.0, 3.0, 30.0];
//! filter.filtering(&mut buffer).unwrap();
//! assert_eq!(buffer, [1.0, 10.0, 3.0, 30.0, 5.0, 50.0]);
//! ```
//!
//! A single engine is not meant to be shared between threads while it is
//! being reconfigured; give each thread its own instance.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::channel::Channels;
use crate::error::{DspError, Result};

/// FIR convolution engine for mono or interleaved stereo buffers.
#[derive(Debug, Clone)]
pub struct ConvolutionFilter {
    channels: Channels,
    coefficients: Vec<f64>,
    /// Last `filter_size - 1` input frames, interleaved, oldest first.
    history: Vec<f64>,
    /// Same shape as `history`; receives the next history during a block.
    scratch: Vec<f64>,
}

impl ConvolutionFilter {
    /// Create an engine loaded with `coefficients`.
    ///
    /// # Errors
    ///
    /// [`DspError::ArgumentRange`] if `coefficients` is empty.
    pub fn new(channels: Channels, coefficients: &[f64]) -> Result<Self> {
        let mut filter = Self {
            channels,
            coefficients: Vec::new(),
            history: Vec::new(),
            scratch: Vec::new(),
        };
        filter.set_filter(coefficients)?;
        Ok(filter)
    }

    /// Replace the active coefficients.
    ///
    /// The new length becomes the filter size and any carried history is
    /// cleared.
    pub fn set_filter(&mut self, coefficients: &[f64]) -> Result<()> {
        if coefficients.is_empty() {
            return Err(DspError::range("coefficients", "must not be empty"));
        }

        self.coefficients.clear();
        self.coefficients.extend_from_slice(coefficients);

        let history_len = (coefficients.len() - 1) * self.channels.count();
        self.history.clear();
        self.history.resize(history_len, 0.0);
        self.scratch.clear();
        self.scratch.resize(history_len, 0.0);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            taps = coefficients.len(),
            channels = self.channels.count(),
            "convolution filter loaded"
        );

        Ok(())
    }

    /// Number of taps in the active coefficient set.
    pub fn filter_size(&self) -> usize {
        self.coefficients.len()
    }

    /// Channel layout of the buffers this engine expects.
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Active coefficients.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Forget carried input history; the next block starts from silence.
    pub fn reset(&mut self) {
        self.history.fill(0.0);
    }

    /// Convolve `buffer` with the active coefficients in place.
    ///
    /// # Errors
    ///
    /// [`DspError::ArgumentRange`] if the buffer length is not a multiple of
    /// the channel count or holds fewer frames than the filter size.
    pub fn filtering(&mut self, buffer: &mut [f64]) -> Result<()> {
        let channels = self.channels.count();
        if buffer.len() % channels != 0 {
            return Err(DspError::range(
                "buffer",
                "length must be a multiple of the channel count",
            ));
        }
        let frames = buffer.len() / channels;
        let taps = self.coefficients.len();
        if frames < taps {
            return Err(DspError::range(
                "buffer",
                "must hold at least filter_size frames",
            ));
        }

        let carried = taps - 1;
        // Tail of this block becomes the history of the next one.
        self.scratch
            .copy_from_slice(&buffer[(frames - carried) * channels..]);

        // Walk backwards so every input sample a tap needs is still unwritten.
        for n in (0..frames).rev() {
            for ch in 0..channels {
                let mut acc = 0.0;
                for (k, &h) in self.coefficients.iter().enumerate() {
                    let x = if k <= n {
                        buffer[(n - k) * channels + ch]
                    } else {
                        self.history[(carried + n - k) * channels + ch]
                    };
                    acc += h * x;
                }
                buffer[n * channels + ch] = acc;
            }
        }

        core::mem::swap(&mut self.history, &mut self.scratch);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reference full convolution, truncated to the input length.
    fn convolve(signal: &[f64], taps: &[f64]) -> Vec<f64> {
        (0..signal.len())
            .map(|n| {
                taps.iter()
                    .enumerate()
                    .filter(|(k, _)| *k <= n)
                    .map(|(k, &h)| h * signal[n - k])
                    .sum()
            })
            .collect()
    }

    #[test]
    fn rejects_empty_coefficients() {
        assert!(ConvolutionFilter::new(Channels::Mono, &[]).is_err());
        let mut filter = ConvolutionFilter::new(Channels::Mono, &[1.0]).unwrap();
        assert!(filter.set_filter(&[]).is_err());
        assert_eq!(filter.filter_size(), 1);
    }

    #[test]
    fn identity_filter_is_passthrough() {
        let mut filter = ConvolutionFilter::new(Channels::Mono, &[1.0]).unwrap();
        let mut buffer = [0.1, -0.2, 0.3, 0.4];
        filter.filtering(&mut buffer).unwrap();
        assert_eq!(buffer, [0.1, -0.2, 0.3, 0.4]);
    }

    #[test]
    fn matches_reference_convolution() {
        let taps = [0.5, 0.25, -0.125, 0.0625];
        let signal: Vec<f64> = (0..32).map(|i| ((i * 7) % 11) as f64 - 5.0).collect();
        let mut buffer = signal.clone();
        let mut filter = ConvolutionFilter::new(Channels::Mono, &taps).unwrap();
        filter.filtering(&mut buffer).unwrap();
        let expected = convolve(&signal, &taps);
        for (got, want) in buffer.iter().zip(&expected) {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn block_streaming_equals_single_pass() {
        let taps = [0.3, -0.2, 0.1, 0.05, 0.4];
        let signal: Vec<f64> = (0..48).map(|i| (i as f64 * 0.37).sin()).collect();
        let expected = convolve(&signal, &taps);

        let mut filter = ConvolutionFilter::new(Channels::Mono, &taps).unwrap();
        let mut streamed = signal.clone();
        for block in streamed.chunks_mut(8) {
            filter.filtering(block).unwrap();
        }
        for (got, want) in streamed.iter().zip(&expected) {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn stereo_channels_stay_separate() {
        let mut filter = ConvolutionFilter::new(Channels::Stereo, &[1.0, 0.5]).unwrap();
        // impulse on the left channel only
        let mut buffer = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        filter.filtering(&mut buffer).unwrap();
        assert_eq!(buffer, [1.0, 0.0, 0.5, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn set_filter_clears_history() {
        let mut filter = ConvolutionFilter::new(Channels::Mono, &[0.0, 1.0]).unwrap();
        let mut first = [1.0, 2.0];
        filter.filtering(&mut first).unwrap();
        assert_eq!(first, [0.0, 1.0]);

        // without reset the carried 2.0 would appear at index 0
        filter.set_filter(&[0.0, 1.0]).unwrap();
        let mut second = [5.0, 6.0];
        filter.filtering(&mut second).unwrap();
        assert_eq!(second, [0.0, 5.0]);
    }

    #[test]
    fn history_carries_between_blocks() {
        let mut filter = ConvolutionFilter::new(Channels::Mono, &[0.0, 1.0]).unwrap();
        let mut first = [1.0, 2.0];
        filter.filtering(&mut first).unwrap();
        let mut second = [5.0, 6.0];
        filter.filtering(&mut second).unwrap();
        assert_eq!(second, [2.0, 5.0]);

        filter.reset();
        let mut third = [7.0, 8.0];
        filter.filtering(&mut third).unwrap();
        assert_eq!(third, [0.0, 7.0]);
    }

    #[test]
    fn rejects_bad_buffer_shapes() {
        let mut filter = ConvolutionFilter::new(Channels::Stereo, &[1.0, 1.0, 1.0]).unwrap();
        let mut odd = [0.0; 7];
        assert!(filter.filtering(&mut odd).is_err());
        let mut short = [1.0; 4];
        assert!(matches!(
            filter.filtering(&mut short),
            Err(DspError::ArgumentRange { param: "buffer", .. })
        ));
        assert_eq!(short, [1.0; 4]);
        let mut exact = [0.0; 6];
        assert!(filter.filtering(&mut exact).is_ok());
    }
}
