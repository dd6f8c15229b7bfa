//! ortho CLI - interpret line-projection problems and print construction steps as JSON.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;

use ortho::{CaseType, ConstraintSet, Engine, EngineConfig, SlotName};

#[derive(Parser)]
#[command(name = "ortho")]
#[command(about = "Orthographic projections of lines, from problem text to drawing steps", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML engine configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print single-line JSON
    #[arg(long, global = true)]
    compact: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interpret a problem text and print the parse result
    Interpret {
        /// Problem text (read from stdin if omitted)
        text: Option<String>,
    },
    /// Generate construction steps from numeric input
    Steps(StepsArgs),
    /// Interpret a problem text and generate its construction steps
    Solve {
        /// Problem text (read from stdin if omitted)
        text: Option<String>,
    },
}

#[derive(Args)]
struct StepsArgs {
    /// Case: perpendicular_to_hp, perpendicular_to_vp, inclined_to_hp_parallel_to_vp,
    /// inclined_to_vp_parallel_to_hp, inclined_to_both (or its proc id, e.g. LINE-PERP-HP)
    #[arg(long)]
    case: CaseType,
    /// True length (mm)
    #[arg(long)]
    tl: Option<f64>,
    /// Inclination to HP (degrees)
    #[arg(long)]
    theta: Option<f64>,
    /// Inclination to VP (degrees)
    #[arg(long)]
    phi: Option<f64>,
    /// Height of end A above HP (mm)
    #[arg(long = "h-a")]
    h_a: Option<f64>,
    /// Distance of end A in front of VP (mm)
    #[arg(long = "d-a")]
    d_a: Option<f64>,
}

impl StepsArgs {
    fn constraints(&self) -> ConstraintSet {
        ConstraintSet::new()
            .with_opt(SlotName::TrueLength, self.tl)
            .with_opt(SlotName::Theta, self.theta)
            .with_opt(SlotName::Phi, self.phi)
            .with_opt(SlotName::HeightA, self.h_a)
            .with_opt(SlotName::DistanceA, self.d_a)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    tracing::debug!(?config, "engine configured");
    let engine = Engine::new(config);

    match cli.command {
        Commands::Interpret { text } => {
            let text = text_or_stdin(text)?;
            let result = engine.interpret(&text);
            print_json(&result, cli.compact)?;
            if !result.success() {
                std::process::exit(1);
            }
        }
        Commands::Steps(args) => {
            let steps = engine
                .generate_steps(args.case, &args.constraints())
                .with_context(|| format!("cannot generate steps for {}", args.case))?;
            print_json(&steps, cli.compact)?;
        }
        Commands::Solve { text } => {
            let text = text_or_stdin(text)?;
            let solution = engine.solve(&text)?;
            print_json(&solution, cli.compact)?;
        }
    }

    Ok(())
}

fn text_or_stdin(text: Option<String>) -> Result<String> {
    match text {
        Some(t) => Ok(t),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read problem text from stdin")?;
            Ok(buf)
        }
    }
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{json}");
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
    fn test_steps_arguments() {
        let cli = Cli::try_parse_from([
            "ortho", "steps", "--case", "LINE-PERP-HP", "--tl", "70", "--h-a", "10", "--d-a", "15",
            "--compact",
        ])
        .unwrap();
        assert!(cli.compact);
        let Commands::Steps(args) = cli.command else {
            panic!("expected steps");
        };
        assert_eq!(args.case, CaseType::PerpendicularToHp);
        let c = args.constraints();
        assert_eq!(c.get(SlotName::TrueLength), Some(70.0));
        assert_eq!(c.get(SlotName::Theta), None);
        assert_eq!(c.get(SlotName::DistanceA), Some(15.0));
    }

    #[test]
    fn test_unknown_case_is_rejected() {
        assert!(Cli::try_parse_from(["ortho", "steps", "--case", "oblique"]).is_err());
    }
}
