pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use commands::roi::RoiArgs;

#[derive(Debug, Parser)]
#[command(
    name = "stellar",
    about = "StellarGenix operator CLI",
    long_about = "Run ROI estimates and FAQ questions against the configured collaborator, inspect configuration, and check readiness.",
    after_help = "Examples:\n  stellar roi 2 fair 150 2 --offline\n  stellar ask \"Do you offer financing?\"\n  stellar doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Estimate three-year savings of TBL paint for one parking lot")]
    Roi {
        #[arg(help = "Lot size in acres (at least 0.1)")]
        lot_size_acres: String,
        #[arg(help = "Current paint condition: good, fair or poor")]
        condition: String,
        #[arg(help = "Number of parking spaces")]
        spaces: String,
        #[arg(help = "Standard-paint repaint frequency in years")]
        frequency: String,
        #[arg(long, help = "Skip the collaborator and use the deterministic model")]
        offline: bool,
    },
    #[command(about = "Ask the FAQ assistant a question")]
    Ask {
        #[arg(required = true, num_args = 1.., help = "Question text")]
        question: Vec<String>,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Validate config, prompt templates, fallback model and collaborator reachability")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Roi { lot_size_acres, condition, spaces, frequency, offline } => {
            commands::roi::run(RoiArgs { lot_size_acres, condition, spaces, frequency, offline })
        }
        Command::Ask { question } => commands::ask::run(&question.join(" ")),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => commands::doctor::run(json),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
