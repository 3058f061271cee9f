//! Preset commands.
//!
//! Lists the factory presets, shows the details of any preset, and exports a
//! preset to a TOML file for customization.

use super::common::{check_output_path, load_preset};
use clap::{Args, Subcommand};
use sonare_config::{DesignPreset, DesignSpec, factory_presets};
use sonare_core::transition_delta;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List factory presets
    List,

    /// Show details of a preset
    Show {
        /// Preset name or path
        name: String,
    },

    /// Write a preset to a TOML file
    Export {
        /// Preset name or path
        name: String,

        /// Destination file
        output: PathBuf,

        /// Overwrite if the file already exists
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List => list_presets(),
        PresetsCommand::Show { name } => show_preset(&name),
        PresetsCommand::Export {
            name,
            output,
            force,
        } => export_preset(&name, &output, force),
    }
}

fn list_presets() -> anyhow::Result<()> {
    println!("Factory Presets:");
    println!("================");
    for preset in factory_presets() {
        let desc = preset.description.as_deref().unwrap_or("");
        println!(
            "  {:16} {:10} - {}",
            preset.name,
            preset.design.kind(),
            desc
        );
    }
    Ok(())
}

fn show_preset(name: &str) -> anyhow::Result<()> {
    let preset = load_preset(name)?;

    println!("Preset: {}", preset.name);
    println!("{}", "=".repeat(8 + preset.name.len()));
    println!();

    if let Some(desc) = &preset.description {
        println!("Description: {}", desc);
        println!();
    }

    println!("Sample Rate: {} Hz", preset.sample_rate);
    println!("Length:      {} taps", preset.length);
    match preset.window {
        Some(window) => println!("Window:      {:?}", window),
        None => println!("Window:      none"),
    }
    println!();

    print_design(&preset)?;

    if let Some(os) = preset.oversampler()? {
        println!();
        println!("Oversampling:");
        println!("  magnification = {}", os.magnification());
        println!("  filter_size   = {}", os.filter_size());
        println!("  channels      = {}", os.channels().count());
        println!("  block frames  = {}", os.block_frames());
        println!("  cutoff        = {:.1} Hz", os.cutoff());
        if let Some(expansion) = preset.expansion() {
            println!("  expansion     = {:?}", expansion);
        }
    }

    Ok(())
}

fn print_design(preset: &DesignPreset) -> anyhow::Result<()> {
    println!("Design: {}", preset.design.kind());
    match &preset.design {
        DesignSpec::Lowpass { cutoff } => {
            println!("  cutoff     = {} Hz", cutoff);
            let delta = transition_delta(preset.sample_rate, preset.length)?;
            println!("  transition = {:.1} Hz", delta);
        }
        DesignSpec::Comb { delay, amplifier } => {
            println!("  delay      = {} samples", delay);
            println!("  amplifier  = {}", amplifier);
        }
        DesignSpec::Resonator {
            frequencies,
            amplifier,
            strength,
        } => {
            let list: Vec<String> = frequencies.iter().map(|f| format!("{f} Hz")).collect();
            println!("  frequencies = {}", list.join(", "));
            println!("  amplifier   = {}", amplifier);
            match strength {
                Some(s) => println!("  strength    = {}", s),
                None => println!("  strength    = inf"),
            }
        }
    }
    Ok(())
}

fn export_preset(name: &str, output: &Path, force: bool) -> anyhow::Result<()> {
    let preset = load_preset(name)?;
    let path = check_output_path(output, force)?;
    preset.save(&path)?;
    tracing::info!(path = %path.display(), "preset exported");
    println!("Exported '{}' to {}", preset.name, path.display());
    Ok(())
}
