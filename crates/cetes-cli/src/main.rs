mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::exercises::ExercisesArgs;
use commands::pricing::{ImpliedRateArgs, PriceArgs};
use commands::simulate::ScenarioArgs;

/// Discount-rate government bond investment simulator
#[derive(Parser)]
#[command(
    name = "cetes",
    version,
    about = "Discount-rate government bond investment simulator",
    long_about = "Simulates buying CETES and other discount paper with decimal precision: \
                  purchase price, whole titles bought, interest, withholding tax, \
                  nominal/net/real yields, and an optional sale before maturity."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log level when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a purchase held to maturity, optionally sold early
    Simulate(ScenarioArgs),
    /// Ordered two-column summary of a simulation, for export
    Report(ScenarioArgs),
    /// Price per title from a discount rate
    Price(PriceArgs),
    /// Discount rate implied by a price
    ImpliedRate(ImpliedRateArgs),
    /// Solve the worked classroom exercises
    Exercises(ExercisesArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(&cli.log_level) {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
    }

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Simulate(args) => commands::simulate::run_simulate(args),
        Commands::Report(args) => commands::simulate::run_report(args),
        Commands::Price(args) => commands::pricing::run_price(args),
        Commands::ImpliedRate(args) => commands::pricing::run_implied_rate(args),
        Commands::Exercises(args) => commands::exercises::run_exercises(args),
        Commands::Version => {
            println!("cetes {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
