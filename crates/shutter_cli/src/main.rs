//! Shutter CLI
//!
//! Run motion simulations and photo packings outside the app.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use shutter_core::Vec2;
use shutter_motion::SpringPreset;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod pack;
mod simulate;

use config::ShutterConfig;
use pack::Strategy;
use simulate::{parse_vec2, Drive, Simulation};

#[derive(Parser)]
#[command(name = "shutter")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Shutter motion and photo layout tools", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to ./shutter.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a spring or fling and print the frames
    Simulate {
        /// Start position as x,y
        #[arg(long, value_parser = parse_vec2, default_value = "0,0", allow_hyphen_values = true)]
        from: Vec2,

        /// Spring target as x,y
        #[arg(long, value_parser = parse_vec2, default_value = "0,0", allow_hyphen_values = true)]
        to: Vec2,

        /// Initial velocity as x,y (px/s)
        #[arg(long, value_parser = parse_vec2, default_value = "0,0", allow_hyphen_values = true)]
        velocity: Vec2,

        /// Spring preset
        #[arg(long, value_enum, default_value_t = SpringArg::Default)]
        spring: SpringArg,

        /// Coast on release friction instead of a spring
        #[arg(long)]
        fling: bool,

        /// Frame rate the integrator is polled at
        #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=1000))]
        fps: u32,

        /// Print frames as JSON
        #[arg(long)]
        json: bool,
    },

    /// Pack aspect ratios into frames and print them as JSON
    Pack {
        /// Packing strategy
        #[arg(value_enum)]
        strategy: Strategy,

        /// Aspect ratios (width / height), comma separated
        #[arg(
            short,
            long,
            required = true,
            value_delimiter = ',',
            allow_negative_numbers = true
        )]
        ratios: Vec<f32>,

        /// Group width, overriding the configuration
        #[arg(short, long)]
        width: Option<f32>,

        /// Tie-break seed for template grids
        #[arg(short, long, default_value_t = 0)]
        seed: u64,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SpringArg {
    VeryQuick,
    Quick,
    Default,
    Slow,
}

impl From<SpringArg> for SpringPreset {
    fn from(arg: SpringArg) -> Self {
        match arg {
            SpringArg::VeryQuick => SpringPreset::VeryQuick,
            SpringArg::Quick => SpringPreset::Quick,
            SpringArg::Default => SpringPreset::Default,
            SpringArg::Slow => SpringPreset::Slow,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = ShutterConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Simulate {
            from,
            to,
            velocity,
            spring,
            fling,
            fps,
            json,
        } => {
            let drive = if fling {
                Drive::Fling
            } else {
                Drive::Spring {
                    target: to,
                    preset: spring.into(),
                }
            };
            cmd_simulate(&config, from, velocity, drive, fps, json)
        }

        Commands::Pack {
            strategy,
            ratios,
            width,
            seed,
        } => cmd_pack(&config, strategy, &ratios, width, seed),
    }
}

fn cmd_simulate(
    config: &ShutterConfig,
    from: Vec2,
    velocity: Vec2,
    drive: Drive,
    fps: u32,
    json: bool,
) -> Result<()> {
    let sim = simulate::run(&config.motion, from, velocity, drive, fps);

    if json {
        let output = serde_json::to_string_pretty(&sim).context("Failed to serialize frames")?;
        println!("{}", output);
    } else {
        print_frames(&sim);
    }

    if sim.settled {
        info!("Settled after {:.3}s ({} frames)", sim.duration, sim.frames.len());
    } else {
        info!("Stopped at the {:.1}s ceiling without settling", sim.duration);
    }
    Ok(())
}

fn print_frames(sim: &Simulation) {
    println!(
        "{:>8}  {:>10}  {:>10}  {:>10}  {:>10}",
        "t (s)", "x", "y", "vx", "vy"
    );
    for frame in &sim.frames {
        println!(
            "{:>8.3}  {:>10.2}  {:>10.2}  {:>10.2}  {:>10.2}",
            frame.time, frame.position.x, frame.position.y, frame.velocity.x, frame.velocity.y
        );
    }
}

fn cmd_pack(
    config: &ShutterConfig,
    strategy: Strategy,
    ratios: &[f32],
    width: Option<f32>,
    seed: u64,
) -> Result<()> {
    let tiles = match width {
        Some(width) => config.tiles.with_width(width),
        None => config.tiles,
    };

    let packing = pack::pack(strategy, &tiles, ratios, seed)
        .with_context(|| format!("Failed to pack {} photos", ratios.len()))?;

    info!(
        "Packed {} photos into {} rows, {}px tall",
        packing.frames.len(),
        packing.rows,
        packing.height
    );

    let output = serde_json::to_string_pretty(&packing).context("Failed to serialize frames")?;
    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_simulate() {
        let cli = Cli::try_parse_from([
            "shutter",
            "simulate",
            "--from",
            "-40,10",
            "--to",
            "200,0",
            "--spring",
            "very-quick",
        ])
        .unwrap();

        match cli.command {
            Commands::Simulate {
                from, to, spring, ..
            } => {
                assert_eq!(from, Vec2::new(-40.0, 10.0));
                assert_eq!(to, Vec2::new(200.0, 0.0));
                assert!(matches!(spring, SpringArg::VeryQuick));
            }
            Commands::Pack { .. } => panic!("expected simulate"),
        }
    }

    #[test]
    fn test_parse_pack() {
        let cli = Cli::try_parse_from([
            "shutter", "-v", "pack", "4x2", "--ratios", "1.5,0.75,1", "--seed", "3",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Pack {
                strategy,
                ratios,
                width,
                seed,
            } => {
                assert_eq!(strategy, Strategy::Grid4x2);
                assert_eq!(ratios, vec![1.5, 0.75, 1.0]);
                assert_eq!(width, None);
                assert_eq!(seed, 3);
            }
            Commands::Simulate { .. } => panic!("expected pack"),
        }
    }

    #[test]
    fn test_fps_must_be_positive() {
        assert!(Cli::try_parse_from(["shutter", "simulate", "--fps", "0"]).is_err());
    }
}
