use clap::Args;
use serde_json::Value;

use cetes_core::exercises;

/// Arguments for the worked exercises
#[derive(Args)]
pub struct ExercisesArgs {
    /// Solve a single exercise by number
    #[arg(long)]
    pub number: Option<u8>,
}

pub fn run_exercises(args: ExercisesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let solutions = exercises::solve_all()?;
    let selected: Vec<_> = match args.number {
        Some(n) => solutions.into_iter().filter(|s| s.number == n).collect(),
        None => solutions,
    };
    if selected.is_empty() {
        return Err(format!("No exercise numbered {}", args.number.unwrap_or_default()).into());
    }
    Ok(serde_json::to_value(selected)?)
}
