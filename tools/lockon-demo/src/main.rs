//! lockon-demo: run a target-lock scenario headless and print per-tick snapshots.
//!
//! Usage:
//!   lockon-demo run --scenario scenarios/arena.json --ticks 120
//!   lockon-demo sample > my_scenario.json
//!
//! Snapshots go to stdout as one JSON object per line; logs go to stderr
//! (filter with RUST_LOG, default `info`).

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use lockon_core::error::LockError;
use lockon_world::{LockEngine, Scenario};

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "sample" => cmd_sample(),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(err) = result {
        error!(%err, "lockon-demo failed");
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!(
        "lockon-demo: headless target lock runner\n\
         \n\
         Commands:\n\
         \n\
         run       Run a JSON scenario and print one snapshot per tick\n\
         \n\
           --scenario <path>  Scenario file\n\
           --ticks <N>        Override the scenario's tick count (optional)\n\
         \n\
         sample    Print a sample scenario to stdout\n\
         \n\
         Examples:\n\
         \n\
           lockon-demo run --scenario scenarios/arena.json\n\
           RUST_LOG=lockon_sim=debug lockon-demo run --scenario scenarios/arena.json --ticks 60\n"
    );
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|pair| pair[0] == flag)
        .map(|pair| pair[1].as_str())
}

fn cmd_run(args: &[String]) -> Result<(), LockError> {
    let Some(path) = flag_value(args, "--scenario").map(PathBuf::from) else {
        eprintln!("Error: --scenario is required");
        print_usage();
        process::exit(1);
    };
    let ticks_override = match flag_value(args, "--ticks") {
        Some(raw) => Some(raw.parse::<u64>().map_err(|_| {
            LockError::ScenarioParse(format!("--ticks expects a number, got {raw}"))
        })?),
        None => None,
    };

    let scenario = Scenario::load(&path)?;
    let ticks = ticks_override.unwrap_or(scenario.ticks);
    info!(path = %path.display(), name = %scenario.name, ticks, "running scenario");

    let mut engine = LockEngine::from_scenario(&scenario)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for _ in 0..ticks {
        let snapshot = engine.tick();
        serde_json::to_writer(&mut out, &snapshot).map_err(io::Error::from)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

fn cmd_sample() -> Result<(), LockError> {
    println!("{}", Scenario::sample().to_json_pretty()?);
    Ok(())
}
