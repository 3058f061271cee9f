//! Anti-aliased rate conversion between a base rate and an oversampled rate.
//!
//! Processing at `magnification × fs` keeps harmonics generated by nonlinear
//! stages below Nyquist. Getting back to `fs` takes two steps:
//!
//! 1. **Expansion** (caller side): raise the rate by zero-stuffing or
//!    sample-and-hold, see [`expand`]
//! 2. **Filter + decimate** ([`Oversampler::apply`]): windowed-sinc low-pass
//!    at the base Nyquist minus a [`transition_delta`] guard band, then keep
//!    one frame out of every `magnification`
//!
//! ```text
//! base fs → expand (×M) → [processing at M·fs] → FIR low-pass → decimate (÷M) → base fs
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use sonare_core::{Channels, Expansion, Oversampler, expand};
//!
//! let mut os = Oversampler::new(48000.0, 4, Channels::Mono, 256).unwrap();
//! let input = vec![0.5; os.block_frames()];
//! let mut block = vec![0.0; os.filter_size()];
//! expand(&input, &mut block, 4, Channels::Mono, Expansion::SampleHold).unwrap();
//!
//! let kept = os.apply(&mut block).unwrap();
//! assert_eq!(kept, 64);
//! ```

use crate::channel::Channels;
use crate::convolution::ConvolutionFilter;
use crate::design::{ImpulseResponse, LowPass, transition_delta};
use crate::error::{DspError, Result, check_sampling_rate};
use crate::window::blackman;

/// How [`expand`] fills the samples between the original ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expansion {
    /// Insert `magnification - 1` zeros after each sample and scale the kept
    /// sample by `magnification` to preserve pass-band gain.
    ZeroStuff,
    /// Repeat each sample `magnification` times.
    #[default]
    SampleHold,
}

/// Raise the rate of `input` by `magnification` into `output`.
///
/// Works frame-wise, so interleaved stereo stays interleaved. Returns the
/// number of samples written (`input.len() * magnification`); any remaining
/// samples in `output` are left untouched.
///
/// # Errors
///
/// [`DspError::ArgumentRange`] if `magnification` is zero, `input` is not a
/// whole number of frames, or `output` is too short.
pub fn expand(
    input: &[f64],
    output: &mut [f64],
    magnification: usize,
    channels: Channels,
    expansion: Expansion,
) -> Result<usize> {
    if magnification == 0 {
        return Err(DspError::range("magnification", "must be greater than 0"));
    }
    let c = channels.count();
    if input.len() % c != 0 {
        return Err(DspError::range(
            "input",
            "length must be a multiple of the channel count",
        ));
    }
    let written = input
        .len()
        .checked_mul(magnification)
        .filter(|&n| n <= output.len())
        .ok_or(DspError::range(
            "output",
            "must hold input length × magnification samples",
        ))?;

    let gain = match expansion {
        Expansion::ZeroStuff => magnification as f64,
        Expansion::SampleHold => 1.0,
    };
    for (frame, chunk) in input
        .chunks_exact(c)
        .zip(output.chunks_exact_mut(c * magnification))
    {
        for (m, slot) in chunk.chunks_exact_mut(c).enumerate() {
            match expansion {
                Expansion::ZeroStuff if m > 0 => slot.fill(0.0),
                _ => {
                    for (s, &x) in slot.iter_mut().zip(frame) {
                        *s = x * gain;
                    }
                }
            }
        }
    }
    Ok(written)
}

/// Low-pass filter and decimator for pre-expanded blocks.
///
/// Built once per configuration and reused for every block. Each call to
/// [`apply`](Self::apply) consumes `filter_size` samples at the oversampled
/// rate and leaves `filter_size / magnification` samples, rounded down to a
/// whole frame, at the front of the buffer.
#[derive(Debug, Clone)]
pub struct Oversampler {
    sampling_rate: f64,
    magnification: usize,
    channels: Channels,
    filter_size: usize,
    cutoff: f64,
    filter: ConvolutionFilter,
}

impl Oversampler {
    /// Create an oversampler.
    ///
    /// # Arguments
    /// * `sampling_rate` - Base (decimated) rate in Hz
    /// * `magnification` - Oversampling factor
    /// * `channels` - Interleaving of the buffers passed to [`apply`](Self::apply)
    /// * `filter_size` - Block length in samples; the low-pass gets half as many taps
    ///
    /// # Errors
    ///
    /// - [`DspError::SamplingRate`] if `sampling_rate <= 0`
    /// - [`DspError::ArgumentRange`] if `magnification` is zero, or
    ///   `filter_size` is zero or odd
    /// - [`DspError::Frequency`] if `filter_size` is too small to leave a
    ///   positive cutoff after the guard band
    pub fn new(
        sampling_rate: f64,
        magnification: usize,
        channels: Channels,
        filter_size: usize,
    ) -> Result<Self> {
        check_sampling_rate("sampling_rate", sampling_rate)?;
        if magnification == 0 {
            return Err(DspError::range("magnification", "must be greater than 0"));
        }
        if filter_size == 0 {
            return Err(DspError::range("filter_size", "must be greater than 0"));
        }
        if filter_size % 2 != 0 {
            return Err(DspError::range("filter_size", "must be even"));
        }

        let oversampled_rate = sampling_rate * magnification as f64;
        let cutoff = sampling_rate / 2.0 - transition_delta(oversampled_rate, filter_size)?;
        let lowpass = LowPass::new(oversampled_rate, cutoff)?;

        let mut taps = lowpass.generate(filter_size / 2)?;
        blackman(&mut taps);
        let filter = ConvolutionFilter::new(channels, &taps)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sampling_rate,
            magnification,
            filter_size,
            cutoff,
            stereo = channels.is_stereo(),
            "oversampler configured"
        );

        Ok(Self {
            sampling_rate,
            magnification,
            channels,
            filter_size,
            cutoff,
            filter,
        })
    }

    /// Base sampling rate in Hz.
    pub fn sampling_rate(&self) -> f64 {
        self.sampling_rate
    }

    /// Oversampling factor.
    pub fn magnification(&self) -> usize {
        self.magnification
    }

    /// Channel layout.
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Samples consumed per [`apply`](Self::apply) call.
    pub fn filter_size(&self) -> usize {
        self.filter_size
    }

    /// Whole base-rate frames recovered from one block.
    ///
    /// When `filter_size` is not a multiple of `magnification × channels`
    /// the trailing partial stride of each block is filtered but not kept.
    pub fn block_frames(&self) -> usize {
        self.filter_size / (self.magnification * self.channels.count())
    }

    /// Low-pass cutoff in Hz.
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Windowed low-pass coefficients in use.
    pub fn coefficients(&self) -> &[f64] {
        self.filter.coefficients()
    }

    /// Clear the filter history carried between blocks.
    pub fn reset(&mut self) {
        self.filter.reset();
    }

    /// Filter and decimate the first `filter_size` samples of `buffer`.
    ///
    /// Returns the number of samples left at the front of `buffer`, which is
    /// `filter_size / magnification` rounded down to a whole frame. With a
    /// magnification of 1 the buffer is returned untouched and the result is
    /// `filter_size`.
    ///
    /// # Errors
    ///
    /// [`DspError::ArgumentRange`] if `buffer` holds fewer than `filter_size`
    /// samples.
    pub fn apply(&mut self, buffer: &mut [f64]) -> Result<usize> {
        if buffer.len() < self.filter_size {
            return Err(DspError::range(
                "buffer",
                "must hold at least filter_size samples",
            ));
        }
        if self.magnification == 1 {
            return Ok(self.filter_size);
        }

        let block = &mut buffer[..self.filter_size];
        self.filter.filtering(block)?;

        let c = self.channels.count();
        let stride = self.magnification * c;
        let frames = self.block_frames();
        for j in 0..frames {
            let i = j * stride;
            block.copy_within(i..i + c, j * c);
        }

        Ok(frames * c)
    }
}
