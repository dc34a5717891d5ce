pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "panelquote",
    about = "Panelquote operator CLI",
    long_about = "Operate Panelquote migrations, catalog seeding, config inspection, and offline estimation.",
    after_help = "Examples:\n  panelquote doctor --json\n  panelquote seed\n  panelquote estimate --panel-type MCC --feeders 4 --motors 1"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(about = "Load and verify the reference catalog seed dataset")]
    Seed,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config and run database connectivity checks")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(
        about = "Run a BOM/cost estimation against the built-in reference catalog (no database)"
    )]
    Estimate(commands::estimate::EstimateArgs),
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Migrate => commands::migrate::run(),
        Command::Seed => commands::seed::run(),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
        Command::Estimate(args) => commands::estimate::run(args),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
