//! Convolution command.
//!
//! Reads whitespace-separated samples, runs them through a streaming
//! convolution engine built from a preset, and writes the result.

use super::common::{OutputFormat, load_preset, read_samples, write_samples};
use anyhow::Context;
use clap::Args;
use sonare_core::{Channels, ConvolutionFilter};
use std::path::PathBuf;

#[derive(Args)]
pub struct FilterArgs {
    /// Preset name or path supplying the coefficients
    #[arg(short, long)]
    preset: String,

    /// Input file of whitespace-separated samples (stdin if omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Treat the input as interleaved stereo
    #[arg(long)]
    stereo: bool,

    /// Frames per processing block, raised to the tap count if smaller
    /// (0 processes the whole stream at once)
    #[arg(short, long, default_value = "0")]
    block: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

pub fn run(args: FilterArgs) -> anyhow::Result<()> {
    let preset = load_preset(&args.preset)?;
    let coefficients = preset.coefficients()?;
    let channels = Channels::from_stereo(args.stereo);
    let mut filter = ConvolutionFilter::new(channels, &coefficients)?;

    let mut samples = read_samples(args.input.as_deref())?;
    let width = channels.count();
    if samples.len() % width != 0 {
        anyhow::bail!(
            "stereo input needs an even number of samples, got {}",
            samples.len()
        );
    }

    let frames = samples.len() / width;
    let block = block_frames(args.block, frames, filter.filter_size());
    tracing::info!(
        preset = %preset.name,
        taps = filter.filter_size(),
        frames,
        block,
        "filtering"
    );

    filter_stream(&mut filter, &mut samples, block)?;
    write_samples(&samples, width, args.format)
}

/// Frames per block: the whole stream for 0, never fewer than the taps.
///
/// Only the final block of a stream may be shorter than the kernel, so the
/// history carried between blocks is always real input.
fn block_frames(requested: usize, frames: usize, taps: usize) -> usize {
    let block = if requested == 0 { frames } else { requested };
    block.max(taps).max(1)
}

fn filter_stream(
    filter: &mut ConvolutionFilter,
    samples: &mut [f64],
    block: usize,
) -> anyhow::Result<()> {
    let width = filter.channels().count();
    for chunk in samples.chunks_mut(block * width) {
        filter_block(filter, chunk)?;
    }
    Ok(())
}

/// Filter one block, zero-padding it when it holds fewer frames than taps.
///
/// The engine needs at least one full kernel of frames per call; padding
/// only ever affects the tail of a short stream.
fn filter_block(filter: &mut ConvolutionFilter, chunk: &mut [f64]) -> anyhow::Result<()> {
    let width = filter.channels().count();
    let needed = filter.filter_size() * width;
    if chunk.len() >= needed {
        filter.filtering(chunk)?;
        return Ok(());
    }

    let mut padded = vec![0.0; needed];
    padded[..chunk.len()].copy_from_slice(chunk);
    filter
        .filtering(&mut padded)
        .context("failed to filter padded tail block")?;
    chunk.copy_from_slice(&padded[..chunk.len()]);
    Ok(())
}
