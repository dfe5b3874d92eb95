use std::path::{Path, PathBuf};
use std::process::ExitCode;

use dfa_minimization::format::{minimized_file_name, read_dfa, write_dfa, LoadError};
use dfa_minimization::prelude::*;

use itertools::Itertools;
use thiserror::Error;
use tracing::{debug, error, info, trace};
use tracing_subscriber::{filter, prelude::*};

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

const SEPARATOR: &str = "======================";

#[derive(Debug, Error)]
enum DriverError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("minimization failed: {0}")]
    Minimize(#[from] DfaError),
    #[error("could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn cli() -> clap::Command {
    Command::new("dfa-minimize")
        .about("Minimizes deterministic finite automata, writing each result next to its input with a -minimized suffix")
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .num_args(0..=1)
                .require_equals(true)
                .value_parser(["info", "debug", "trace"])
                .default_missing_value("info"),
        )
        .arg(
            Arg::new("dot")
                .long("dot")
                .action(ArgAction::SetTrue)
                .help("additionally write the minimized automaton in the DOT format"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("do not print the minimized automata to the console"),
        )
        .arg(
            Arg::new("files")
                .required(true)
                .num_args(1..)
                .value_parser(value_parser!(PathBuf)),
        )
}

fn setup_logging(matches: &ArgMatches) {
    // failures are always reported, even without a verbosity flag
    let level = match matches.try_get_one::<String>("verbosity") {
        Ok(Some(verbosity)) => match verbosity.as_str() {
            "trace" => filter::LevelFilter::TRACE,
            "debug" => filter::LevelFilter::DEBUG,
            "info" => filter::LevelFilter::INFO,
            _ => unreachable!(),
        },
        _ => filter::LevelFilter::WARN,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

fn report(index: usize, dfa: &Dfa) {
    println!("MINIMIZED DFA {index}");
    println!("Total states  -  {}", dfa.size());
    println!("Alphabet Size -  {}", dfa.alphabet().size());
    println!("Final States  -  {}", dfa.accepting_states().join(" "));
    println!("{}", dfa.build_transition_table());
}

fn process(index: usize, path: &Path, matches: &ArgMatches) -> Result<(), DriverError> {
    let dfa = read_dfa(path)?;
    debug!(
        "read automaton with {} states over {} symbols from {}",
        dfa.size(),
        dfa.alphabet().size(),
        path.display()
    );

    let start = std::time::Instant::now();
    let mut minimizer = Minimizer::new(dfa);
    let renumbering = minimizer.prune_unreachable();
    debug!("{} states are reachable", renumbering.len());
    let rounds = minimizer.minimize()?.rounds();
    let minimized = minimizer.into_dfa();
    info!(
        "minimized {} to {} states in {} rounds, took {}µs",
        path.display(),
        minimized.size(),
        rounds,
        start.elapsed().as_micros()
    );

    if !matches.get_flag("quiet") {
        report(index, &minimized);
    }

    let target = minimized_file_name(path);
    write_dfa(&minimized, &target).map_err(|source| DriverError::Write {
        path: target.clone(),
        source,
    })?;
    debug!("wrote minimized automaton to {}", target.display());

    if matches.get_flag("dot") {
        let dot_target = target.with_extension("dot");
        std::fs::write(&dot_target, minimized.dot_representation()).map_err(|source| {
            DriverError::Write {
                path: dot_target.clone(),
                source,
            }
        })?;
    }
    Ok(())
}

pub fn main() -> ExitCode {
    let matches = cli().get_matches();

    setup_logging(&matches);

    let mut failures = 0;
    for (index, path) in matches
        .get_many::<PathBuf>("files")
        .into_iter()
        .flatten()
        .enumerate()
    {
        println!("{SEPARATOR}");
        if let Err(e) = process(index + 1, path, &matches) {
            error!("could not process {}: {e}", path.display());
            failures += 1;
        }
    }
    println!("{SEPARATOR}");

    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
