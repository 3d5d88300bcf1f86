use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use commands::{
    ChatCommand, ConfigCommand, PlanCommand, ProfileCommand, ResetCommand, StatusCommand,
    WaterCommand, WorkoutCommand,
};
use config::Config;

#[derive(Parser)]
#[command(name = "qalori")]
#[command(version)]
#[command(about = "AI-assisted daily meal planner and nutrition tracker", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage your profile
    Profile(ProfileCommand),

    /// Generate, view and swap meals in your daily plan
    Plan(PlanCommand),

    /// Track water intake
    Water(WaterCommand),

    /// Track workouts
    Workout(WorkoutCommand),

    /// Show today's calorie and water summary
    Status(StatusCommand),

    /// Chat with the nutrition assistant
    Chat(ChatCommand),

    /// Delete all data and start over
    Reset(ResetCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so command output stays clean. `RUST_LOG` overrides the
/// default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Save config path for config commands
    let cli_config_path = cli.config.clone();

    let config = Config::load(cli.config)?;

    match &cli.command {
        Some(Commands::Profile(cmd)) => cmd.run(&config)?,
        Some(Commands::Plan(cmd)) => cmd.run(&config)?,
        Some(Commands::Water(cmd)) => cmd.run(&config)?,
        Some(Commands::Workout(cmd)) => cmd.run(&config)?,
        Some(Commands::Status(cmd)) => cmd.run(&config)?,
        Some(Commands::Chat(cmd)) => cmd.run(&config)?,
        Some(Commands::Reset(cmd)) => cmd.run(&config)?,
        Some(Commands::Config(cmd)) => cmd.run(&config, cli_config_path)?,
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
