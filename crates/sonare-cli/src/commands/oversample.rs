//! Oversampling command.
//!
//! Expands each base-rate block to the oversampled rate, runs the
//! anti-aliasing low-pass and decimates back. Useful to audition the
//! round-trip colouration of an oversampling stage.

use super::common::{OutputFormat, load_preset, read_samples, write_samples};
use clap::Args;
use sonare_config::{ExpansionKind, OversamplingConfig};
use sonare_core::{Expansion, Oversampler, expand};
use std::path::PathBuf;

#[derive(Args)]
pub struct OversampleArgs {
    /// Preset with an [oversampling] table; replaces the stage flags below
    #[arg(short, long)]
    preset: Option<String>,

    /// Base sampling rate in Hz
    #[arg(short = 'r', long, default_value = "48000")]
    sample_rate: f64,

    /// Oversampling factor
    #[arg(short, long, default_value = "4")]
    magnification: usize,

    /// Samples per block at the oversampled rate
    #[arg(long, default_value = "1024")]
    filter_size: usize,

    /// Treat the input as interleaved stereo
    #[arg(long)]
    stereo: bool,

    /// How base-rate samples are expanded
    #[arg(short, long, value_enum, default_value_t = ExpansionKind::SampleHold)]
    expansion: ExpansionKind,

    /// Input file of whitespace-separated samples (stdin if omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

pub fn run(args: OversampleArgs) -> anyhow::Result<()> {
    let (mut oversampler, expansion) = build_stage(&args)?;
    let input = read_samples(args.input.as_deref())?;
    let output = process(&mut oversampler, expansion, &input)?;
    write_samples(&output, oversampler.channels().count(), args.format)
}

fn build_stage(args: &OversampleArgs) -> anyhow::Result<(Oversampler, Expansion)> {
    let (config, sample_rate) = match &args.preset {
        Some(name) => {
            let preset = load_preset(name)?;
            let Some(config) = preset.oversampling.clone() else {
                anyhow::bail!("preset '{}' has no [oversampling] table", preset.name);
            };
            (config, preset.sample_rate)
        }
        None => (
            OversamplingConfig::new(args.magnification, args.filter_size)
                .with_channels(if args.stereo { 2 } else { 1 })
                .with_expansion(args.expansion),
            args.sample_rate,
        ),
    };

    let oversampler = config.build(sample_rate)?;
    tracing::info!(
        sample_rate,
        magnification = oversampler.magnification(),
        filter_size = oversampler.filter_size(),
        cutoff = oversampler.cutoff(),
        "oversampling stage ready"
    );
    Ok((oversampler, config.expansion.into()))
}

/// Run `input` through the stage block by block.
///
/// A short final block is zero-padded and its output trimmed back.
fn process(
    oversampler: &mut Oversampler,
    expansion: Expansion,
    input: &[f64],
) -> anyhow::Result<Vec<f64>> {
    let width = oversampler.channels().count();
    if input.len() % width != 0 {
        anyhow::bail!(
            "stereo input needs an even number of samples, got {}",
            input.len()
        );
    }

    let stride = oversampler.magnification() * width;
    if oversampler.filter_size() % stride != 0 {
        // a partial stride would leave stale samples in the carried history
        anyhow::bail!(
            "streaming needs filter_size to be a multiple of magnification × channels ({stride}), got {}",
            oversampler.filter_size()
        );
    }

    let block_samples = oversampler.block_frames() * width;
    let mut base = vec![0.0; block_samples];
    let mut block = vec![0.0; oversampler.filter_size()];
    let mut output = Vec::with_capacity(input.len());

    for chunk in input.chunks(block_samples) {
        base.fill(0.0);
        base[..chunk.len()].copy_from_slice(chunk);
        expand(
            &base,
            &mut block,
            oversampler.magnification(),
            oversampler.channels(),
            expansion,
        )?;
        let kept = oversampler.apply(&mut block)?;
        debug_assert_eq!(kept, block_samples);
        output.extend_from_slice(&block[..chunk.len()]);
    }

    Ok(output)
}
