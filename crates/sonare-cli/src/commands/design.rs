//! Coefficient design command.
//!
//! Designs a low-pass, comb or resonator kernel (or realises a preset) and
//! prints the coefficients, or saves the design as a TOML preset.

use super::common::{OutputFormat, check_output_path, load_preset};
use clap::{Args, Subcommand};
use serde::Serialize;
use sonare_config::{DesignPreset, DesignSpec, WindowKind};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Args)]
pub struct DesignArgs {
    #[command(subcommand)]
    command: DesignCommand,
}

#[derive(Subcommand)]
enum DesignCommand {
    /// Windowed-sinc low-pass
    Lowpass {
        /// Cutoff frequency in Hz
        #[arg(short, long)]
        cutoff: f64,

        #[command(flatten)]
        options: DesignOptions,
    },

    /// Comb with fractional tap spacing
    Comb {
        /// Tap spacing in samples
        #[arg(short, long)]
        delay: f64,

        /// Gain ratio between successive taps
        #[arg(short, long, default_value = "1.0")]
        amplifier: f64,

        #[command(flatten)]
        options: DesignOptions,
    },

    /// Gaussian-enveloped sinusoid bank
    Resonator {
        /// Emphasised frequency in Hz (repeatable)
        #[arg(short, long = "frequency", required = true)]
        frequencies: Vec<f64>,

        /// Overall gain
        #[arg(short, long, default_value = "1.0")]
        amplifier: f64,

        /// Gaussian spread in samples (omit for no decay, 0 for an impulse)
        #[arg(short, long)]
        strength: Option<f64>,

        #[command(flatten)]
        options: DesignOptions,
    },

    /// Design from a factory preset name or TOML file
    Preset {
        /// Preset name or path
        name: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Args)]
struct DesignOptions {
    /// Sampling rate in Hz
    #[arg(short = 'r', long, default_value = "48000")]
    sample_rate: f64,

    /// Number of coefficients
    #[arg(short = 'n', long, default_value = "64")]
    length: usize,

    /// Window applied after design
    #[arg(short, long, value_enum)]
    window: Option<WindowKind>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Save the design as a TOML preset instead of printing coefficients
    #[arg(long, value_name = "PATH")]
    save: Option<PathBuf>,

    /// Preset name used with --save
    #[arg(long, default_value = "Untitled")]
    name: String,

    /// Overwrite an existing file with --save
    #[arg(long)]
    force: bool,
}

#[derive(Serialize)]
struct DesignOutput<'a> {
    name: &'a str,
    design: &'a str,
    sample_rate: f64,
    coefficients: &'a [f64],
}

pub fn run(args: DesignArgs) -> anyhow::Result<()> {
    match args.command {
        DesignCommand::Lowpass { cutoff, options } => {
            design(DesignSpec::Lowpass { cutoff }, options)
        }
        DesignCommand::Comb {
            delay,
            amplifier,
            options,
        } => design(DesignSpec::Comb { delay, amplifier }, options),
        DesignCommand::Resonator {
            frequencies,
            amplifier,
            strength,
            options,
        } => design(
            DesignSpec::Resonator {
                frequencies,
                amplifier,
                strength,
            },
            options,
        ),
        DesignCommand::Preset { name, format } => {
            let preset = load_preset(&name)?;
            print_design(&preset, format)
        }
    }
}

fn design(spec: DesignSpec, options: DesignOptions) -> anyhow::Result<()> {
    let mut preset = DesignPreset::new(options.name, options.sample_rate, options.length, spec);
    if let Some(window) = options.window {
        preset = preset.with_window(window);
    }

    match options.save {
        Some(path) => {
            let path = check_output_path(&path, options.force)?;
            preset.validate()?;
            preset.save(&path)?;
            tracing::info!(path = %path.display(), design = preset.design.kind(), "preset saved");
            println!("Saved preset '{}' to {}", preset.name, path.display());
            Ok(())
        }
        None => print_design(&preset, options.format),
    }
}

fn print_design(preset: &DesignPreset, format: OutputFormat) -> anyhow::Result<()> {
    let coefficients = preset.coefficients()?;
    tracing::debug!(
        design = preset.design.kind(),
        length = coefficients.len(),
        "coefficients designed"
    );

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match format {
        OutputFormat::Text => {
            for c in &coefficients {
                writeln!(out, "{c}")?;
            }
        }
        OutputFormat::Json => {
            let doc = DesignOutput {
                name: &preset.name,
                design: preset.design.kind(),
                sample_rate: preset.sample_rate,
                coefficients: &coefficients,
            };
            serde_json::to_writer_pretty(&mut out, &doc)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}
