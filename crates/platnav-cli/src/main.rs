//! platnav CLI - build navigation graphs and run queries against a level file.
//!
//! - `platnav graph` - grid snapshot (or flight graph with `--flight`)
//! - `platnav query` - one movement decision
//! - `platnav path` - flight path between two points
//! - `platnav simulate` - step an agent toward a goal

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use platnav::core::{NavConfig, Vec2};
use platnav_cli::commands::{self, SimulateOptions};
use platnav_cli::{parse_point, Level};

#[derive(Parser)]
#[command(name = "platnav")]
#[command(about = "2D platformer navigation toolkit", version)]
struct Cli {
    /// Navigation config (YAML); defaults are used when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a graph over the whole level and print it
    Graph {
        /// Level file (YAML)
        level: PathBuf,

        /// Build the flight waypoint graph instead of the walkable grid
        #[arg(long)]
        flight: bool,
    },

    /// Ask for one movement decision
    Query {
        level: PathBuf,

        /// Agent position as `x,y`
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        agent: Vec2,

        /// Goal position as `x,y`
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        goal: Vec2,
    },

    /// Plan a flight path
    Path {
        level: PathBuf,

        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        from: Vec2,

        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        to: Vec2,
    },

    /// Step an agent toward a goal
    Simulate {
        level: PathBuf,

        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        agent: Vec2,

        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        goal: Vec2,

        /// Maximum number of ticks
        #[arg(long, default_value_t = 600)]
        ticks: u64,

        /// Agent speed in world units per second
        #[arg(long, default_value_t = 5.0)]
        speed: f32,

        /// Seconds per tick
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f32,

        /// Follow a flight path instead of walking
        #[arg(long)]
        flight: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => NavConfig::load(path)?,
        None => NavConfig::default(),
    };

    match cli.command {
        Commands::Graph { level, flight } => {
            let level = Level::load(&level)?;
            if flight {
                print_json(&commands::flight_summary(&level, &config))
            } else {
                print_json(&commands::grid_graph(&level, &config))
            }
        }
        Commands::Query { level, agent, goal } => {
            let level = Level::load(&level)?;
            print_json(&commands::query(&level, &config, agent, goal))
        }
        Commands::Path { level, from, to } => {
            let level = Level::load(&level)?;
            print_json(&commands::path(&level, &config, from, to))
        }
        Commands::Simulate {
            level,
            agent,
            goal,
            ticks,
            speed,
            dt,
            flight,
        } => {
            let level = Level::load(&level)?;
            let options = SimulateOptions {
                ticks,
                speed,
                dt_seconds: dt,
            };
            if flight {
                print_json(&commands::simulate_flight(&level, &config, agent, goal, options))
            } else {
                print_json(&commands::simulate_ground(&level, &config, agent, goal, options))
            }
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
