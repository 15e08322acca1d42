//! GISO command-line runner
//!
//! Loads two graphs from JSON descriptions, runs the selected isomorphism
//! strategies on them and reports each answer with its running time.

#[global_allocator]
/// Global allocator using jemalloc for better performance in parallel workloads.
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

mod args;

use std::path::Path;
use std::time::Duration;

use clap::Parser;
use giso_common::{Config, GraphDescription, Strategy};
use giso_engine::{CancelToken, EngineError, ExactMatcher, GraphModel, IsomorphismEngine, Verdict};
use itertools::Itertools;
use rayon::prelude::*;
use tracing::{info, warn};

use args::Args;

/// Verdict of the last run together with the mean time over all runs.
struct Report {
    verdict: Verdict,
    runs: u32,
    average: Duration,
}

/// Executes the GISO runner.
///
/// This function:
/// 1. Initializes logging
/// 2. Parses command-line arguments and the configuration
/// 3. Loads and validates both graphs
/// 4. Runs every selected strategy, optionally in parallel
/// 5. Prints the answers and timings
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_thread_ids(true)
        .init();

    let args = Args::parse();
    let config = args.to_config()?;

    let left = load_graph(&args.left)?;
    let right = load_graph(&args.right)?;

    let strategies = args.strategies();
    info!(
        "Running [{}] with {:?}",
        strategies.iter().join(", "),
        config
    );

    let engine = IsomorphismEngine::new(&config);
    let timeout = args.timeout_ms.map(Duration::from_millis);
    let run = |strategy: &Strategy| {
        run_strategy(&engine, &left, &right, *strategy, args.repeat, timeout)
    };

    let reports: Vec<Result<Report, EngineError>> = if args.parallel {
        strategies.par_iter().map(run).collect()
    } else {
        strategies.iter().map(run).collect()
    };

    let mut failure = None;
    for (strategy, report) in strategies.iter().zip(reports) {
        println!("Running {}...", strategy.name());
        match report {
            Ok(report) => print_report(&report),
            Err(err) => {
                println!("Gave up: {err}");
                if failure.is_none() {
                    failure = Some(err);
                }
            }
        }
        println!();
    }

    if args.show_mapping {
        print_mapping(&left, &right, &config, timeout)?;
    }

    match failure {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

fn load_graph(path: &Path) -> Result<GraphModel, Box<dyn std::error::Error>> {
    let description = GraphDescription::from_path(path)?;
    let graph = GraphModel::from_description(&description)?;
    info!(
        "Loaded {}: {} vertices, {} edges",
        path.display(),
        graph.vertex_count(),
        graph.edge_count()
    );
    Ok(graph)
}

fn cancel_token(timeout: Option<Duration>) -> CancelToken {
    timeout.map_or_else(CancelToken::new, CancelToken::with_timeout)
}

fn run_strategy(
    engine: &IsomorphismEngine<'_>,
    left: &GraphModel,
    right: &GraphModel,
    strategy: Strategy,
    runs: u32,
    timeout: Option<Duration>,
) -> Result<Report, EngineError> {
    let mut verdict = engine.run_cancellable(left, right, strategy, &cancel_token(timeout))?;
    let mut total = verdict.elapsed;
    for _ in 1..runs {
        verdict = engine.run_cancellable(left, right, strategy, &cancel_token(timeout))?;
        total += verdict.elapsed;
    }
    let runs = runs.max(1);
    Ok(Report {
        verdict,
        runs,
        average: total / runs,
    })
}

fn print_report(report: &Report) {
    let verdict = &report.verdict;
    if verdict.isomorphic {
        println!("The graphs ARE isomorphic.");
    } else {
        println!("The graphs ARE NOT isomorphic.");
    }
    if !verdict.certain {
        println!("(a refinement pass is not a proof; run the exact strategy to confirm)");
    }
    if report.runs > 1 {
        println!(
            "Average time over {} runs: {:.9} seconds",
            report.runs,
            report.average.as_secs_f64()
        );
    } else {
        println!("Time taken: {:.9} seconds", report.average.as_secs_f64());
    }
}

fn print_mapping(
    left: &GraphModel,
    right: &GraphModel,
    config: &Config,
    timeout: Option<Duration>,
) -> Result<(), EngineError> {
    let matcher = ExactMatcher::new(left, right, config);
    match matcher.try_find_isomorphism(&cancel_token(timeout))? {
        Some(mapping) => {
            println!("Mapping:");
            print!("{mapping}");
        }
        None => {
            warn!("no isomorphism to show");
            println!("No isomorphism exists.");
        }
    }
    Ok(())
}
