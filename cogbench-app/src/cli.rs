//! Command-line arguments.

use crate::logging::LogFormat;
use clap::{ArgAction, Args, Parser, Subcommand};
use cogbench_core::ParadigmKind;
use std::path::PathBuf;

/// Reaction-time and attention tasks in the terminal.
#[derive(Parser, Debug)]
#[command(name = "cogbench", version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file; `./cogbench.yaml` is read when present.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed for stimulus generation. Random when omitted.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Append session reports to this JSON Lines file instead of printing them.
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Log line format on stderr.
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Play a session at the keyboard.
    Run(RunArgs),

    /// Play a session headless with a scripted participant on a virtual clock.
    Simulate(SimulateArgs),

    /// Show every paradigm with its trial count and keys.
    List,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct RunArgs {
    /// Paradigm id or alias, e.g. `stroop`, `go-no-go`, `1-back`.
    pub paradigm: ParadigmKind,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct SimulateArgs {
    /// Paradigm id or alias, e.g. `stroop`, `go-no-go`, `1-back`.
    pub paradigm: ParadigmKind,

    /// Probability the participant answers correctly, between 0 and 1.
    #[arg(long, default_value_t = 0.85, value_parser = parse_probability)]
    pub accuracy: f64,

    /// Fastest response after onset, in milliseconds.
    #[arg(long, default_value_t = 250)]
    pub min_rt_ms: u64,

    /// Slowest response after onset, in milliseconds.
    #[arg(long, default_value_t = 650)]
    pub max_rt_ms: u64,
}

fn parse_probability(s: &str) -> Result<f64, String> {
    let p: f64 = s.parse().map_err(|e| format!("`{s}` is not a number: {e}"))?;
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(format!("`{s}` is not between 0 and 1"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn run_accepts_aliases() {
        let cli = Cli::try_parse_from(["cogbench", "run", "go-no-go"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Run(RunArgs {
                paradigm: ParadigmKind::GoNoGo
            })
        );
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "cogbench",
            "simulate",
            "stroop",
            "--seed",
            "7",
            "-vv",
            "--log-format",
            "json",
            "--accuracy",
            "0.5",
        ])
        .unwrap();
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_format, Some(LogFormat::Json));
        match cli.command {
            Command::Simulate(args) => {
                assert_eq!(args.paradigm, ParadigmKind::Stroop);
                assert_eq!(args.accuracy, 0.5);
                assert_eq!((args.min_rt_ms, args.max_rt_ms), (250, 650));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn accuracy_must_be_a_probability() {
        for bad in ["NaN", "inf", "-0.2", "1.01", "most"] {
            assert!(
                Cli::try_parse_from(["cogbench", "simulate", "stroop", "--accuracy", bad]).is_err(),
                "accepted {bad}"
            );
        }
        let cli =
            Cli::try_parse_from(["cogbench", "simulate", "stroop", "--accuracy", "1"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Simulate(SimulateArgs { accuracy, .. }) if accuracy == 1.0
        ));
    }

    #[test]
    fn unknown_paradigm_is_rejected() {
        assert!(Cli::try_parse_from(["cogbench", "run", "tetris"]).is_err());
    }
}
