//! Shared CLI helpers: sample stream I/O, output formats and preset lookup.

use anyhow::Context;
use clap::ValueEnum;
use serde::Serialize;
use sonare_config::{DesignPreset, resolve_preset};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// How numeric results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One value (or one frame) per line
    #[default]
    Text,
    /// A single JSON document
    Json,
}

/// Load a preset by factory name or file path, with a hint on failure.
pub fn load_preset(name: &str) -> anyhow::Result<DesignPreset> {
    resolve_preset(name).with_context(|| {
        format!("could not load preset '{name}'. Use 'sonare presets list' to see factory presets.")
    })
}

/// Parse whitespace-separated samples.
pub fn parse_samples(text: &str) -> anyhow::Result<Vec<f64>> {
    text.split_whitespace()
        .enumerate()
        .map(|(i, token)| {
            token
                .parse::<f64>()
                .with_context(|| format!("invalid sample '{token}' at position {i}"))
        })
        .collect()
}

/// Read samples from `path`, or from stdin when `path` is `None` or `-`.
pub fn read_samples(path: Option<&Path>) -> anyhow::Result<Vec<f64>> {
    let text = match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read input file '{}'", p.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read samples from stdin")?;
            buf
        }
    };
    parse_samples(&text)
}

#[derive(Serialize)]
struct SampleStream<'a> {
    channels: usize,
    samples: &'a [f64],
}

/// Write samples to stdout, one frame per line in text mode.
pub fn write_samples(samples: &[f64], channels: usize, format: OutputFormat) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match format {
        OutputFormat::Text => {
            for frame in samples.chunks(channels.max(1)) {
                let line: Vec<String> = frame.iter().map(f64::to_string).collect();
                writeln!(out, "{}", line.join(" "))?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &SampleStream { channels, samples })?;
            writeln!(out)?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Output path for `save`-style commands, refusing to clobber without `force`.
pub fn check_output_path(path: &Path, force: bool) -> anyhow::Result<PathBuf> {
    if path.exists() && !force {
        anyhow::bail!(
            "'{}' already exists. Use --force to overwrite.",
            path.display()
        );
    }
    Ok(path.to_path_buf())
}
