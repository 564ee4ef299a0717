//! Drape CLI: scene simulation, benchmarking, and SDF inspection.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "drape")]
#[command(version, about = "Drape: real-time cloth draping with SDF body collision")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scene from a TOML file.
    Simulate {
        /// Path to the scene file (TOML).
        #[arg(short, long, default_value = "scenes/sphere_drape.toml")]
        config: String,

        /// Override the scene's tick count.
        #[arg(short, long)]
        steps: Option<u32>,

        /// Advance in frames of this rate through a fixed-step accumulator.
        #[arg(long)]
        fps: Option<f32>,

        /// Write the final cloth mesh as JSON.
        #[arg(short, long)]
        output: Option<String>,

        /// Write pipeline events as JSON lines.
        #[arg(long)]
        events: Option<String>,
    },

    /// Run the benchmark suite.
    Benchmark {
        /// Which scenario to run (hanging_sheet, body_drape, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Override every scenario's tick count.
        #[arg(long)]
        steps: Option<u32>,

        /// Run kernels on one thread in index order.
        #[arg(long)]
        sequential: bool,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Build the SDF of a scene's body and print grid statistics.
    Sdf {
        /// Path to the scene file (TOML).
        config: String,

        /// Override the scene's SDF resolution.
        #[arg(short, long)]
        resolution: Option<u32>,
    },

    /// Validate a scene file.
    Validate {
        /// Path to the scene file (TOML).
        path: String,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Simulate {
            config,
            steps,
            fps,
            output,
            events,
        } => commands::simulate(&config, steps, fps, output.as_deref(), events.as_deref()),
        Commands::Benchmark {
            scenario,
            steps,
            sequential,
            output,
        } => commands::benchmark(&scenario, steps, sequential, output.as_deref()),
        Commands::Sdf { config, resolution } => commands::sdf(&config, resolution),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
