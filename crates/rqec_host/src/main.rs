mod config;
mod generator;
mod stats;
mod throughput;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::{RunArgs, RunConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rqec_core::params::CodeParams;
use rqec_core::{Strategy, run_trials};
use rqec_io::ReplaySource;
use stats::RunSummary;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(about = "Repetition-code memory experiments under bit-flip noise")]
struct Cli {
    /// Log level: off, error, warn, info, debug, or trace.
    #[arg(long, global = true, default_value = "info")]
    log_level: LevelFilter,
    /// JSON file with default run parameters.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample and decode trials, then report logical error rates.
    Run {
        #[command(flatten)]
        args: RunArgs,
        #[arg(long)]
        json: bool,
    },
    /// Run once per noise probability and print a table.
    Sweep {
        #[command(flatten)]
        args: RunArgs,
        #[arg(long = "noise-list", value_delimiter = ',', default_values_t = [0.0, 0.05, 0.1, 0.2])]
        noise_list: Vec<f64>,
        #[arg(long)]
        json: bool,
    },
    /// Single-round distance-3 code with lookup-table correction.
    ThreeQubit {
        #[arg(short, long, default_value_t = 0.1)]
        p: f64,
        #[arg(long, default_value_t = 100_000)]
        shots: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Write sampled measurement records to a .b8 or .01 file.
    Gen {
        #[command(flatten)]
        args: RunArgs,
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Decode measurement records from a .b8 or .01 file.
    Replay {
        #[arg(short, long)]
        distance: usize,
        #[arg(short, long)]
        rounds: usize,
        #[arg(short, long)]
        input: PathBuf,
        /// Number of shots to decode; all by default.
        #[arg(short = 'n', long)]
        trials: Option<usize>,
        #[arg(long)]
        json: bool,
    },
}

fn emit(summary: &RunSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        summary.print_report();
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Run { args, json } => {
            let config = RunConfig::resolve(config_path, &args)?;
            let stats = throughput::execute(&config)?;
            emit(&RunSummary::from(&stats), json)?;
        }
        Commands::Sweep {
            args,
            noise_list,
            json,
        } => {
            let base = RunConfig::resolve(config_path, &args)?;
            let mut rows = Vec::with_capacity(noise_list.len());
            for noise in noise_list {
                let config = RunConfig {
                    noise,
                    ..base.clone()
                };
                rows.push(RunSummary::from(&throughput::execute(&config)?));
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                stats::print_sweep(&rows);
            }
        }
        Commands::ThreeQubit { p, shots, seed } => {
            let rng = match seed {
                Some(s) => StdRng::seed_from_u64(s),
                None => StdRng::from_entropy(),
            };
            let rate = rqec_sim::three_qubit_code(p, shots, rng)?;
            println!("Three-qubit code (p={}): logical error rate {:.6}", p, rate);
        }
        Commands::Gen { args, out } => {
            let config = RunConfig::resolve(config_path, &args)?;
            generator::generate_records(&config, &out)?;
        }
        Commands::Replay {
            distance,
            rounds,
            input,
            trials,
            json,
        } => {
            // Noise is unknown for recorded data.
            let params = CodeParams::new(distance, rounds, 0.0)?;
            let mut source = ReplaySource::open(&input, &params)?;
            let trials = trials.unwrap_or(source.remaining());
            let stats = run_trials(&mut source, &params, trials, Strategy::Batched)?;
            info!(decoded = stats.trial_count, "replay finished");
            emit(&RunSummary::from(&stats), json)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_log_level_is_validated() {
        let cli = Cli::try_parse_from(["rqec", "--log-level", "debug", "three-qubit"]).unwrap();
        assert_eq!(cli.log_level, LevelFilter::DEBUG);

        let cli = Cli::try_parse_from(["rqec", "three-qubit"]).unwrap();
        assert_eq!(cli.log_level, LevelFilter::INFO);

        assert!(Cli::try_parse_from(["rqec", "--log-level", "verbos", "three-qubit"]).is_err());
    }

    #[test]
    fn test_short_flags_per_subcommand() {
        let cli = Cli::try_parse_from(["rqec", "run", "-d", "5", "-r", "2", "-p", "0.1", "-n", "7"])
            .unwrap();
        match cli.command {
            Commands::Run { args, json } => {
                assert_eq!(args.distance, Some(5));
                assert_eq!(args.rounds, Some(2));
                assert_eq!(args.noise, Some(0.1));
                assert_eq!(args.trials, Some(7));
                assert!(!json);
            }
            _ => panic!("expected run"),
        }

        let cli = Cli::try_parse_from([
            "rqec", "replay", "-d", "3", "-r", "1", "-i", "shots.b8", "-n", "4",
        ])
        .unwrap();
        match cli.command {
            Commands::Replay {
                distance,
                rounds,
                input,
                trials,
                ..
            } => {
                assert_eq!((distance, rounds, trials), (3, 1, Some(4)));
                assert_eq!(input, PathBuf::from("shots.b8"));
            }
            _ => panic!("expected replay"),
        }
    }

    #[test]
    fn test_sweep_noise_list() {
        let cli = Cli::try_parse_from(["rqec", "sweep", "--noise-list", "0.01,0.02"]).unwrap();
        match cli.command {
            Commands::Sweep { noise_list, .. } => assert_eq!(noise_list, vec![0.01, 0.02]),
            _ => panic!("expected sweep"),
        }
    }
}
