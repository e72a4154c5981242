//! Shift Simulator CLI - plays inspection shifts in virtual time.
//!
//! Automated inspectors work through generated queues without a runtime or a
//! wall clock, so thousands of shifts run in seconds. Used to balance category
//! weights and timing constants.

mod analysis;
mod metrics;
mod output;
mod simulator;
mod types;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use inspector::inspectors::registry::{by_name, registered_inspectors, InspectorFactory};
use inspector::{build_report, CategoryWeights, EndTrigger, GameConfig};
use metrics::{build_session_metrics, trigger_key, SessionLabel};
use output::OutputWriter;
use simulator::{SessionResult, Simulator, SimulatorError};
use tracing::{info, warn};
use types::{MetricsLevel, OutputFormat};

#[derive(Parser)]
#[command(name = "shift-simulator")]
#[command(about = "Virtual-time shift simulator for automated inspectors")]
struct Args {
    /// Number of sessions per inspector
    #[arg(short = 'n', long, default_value = "1")]
    sessions: u32,

    /// Inspector name from the registry, or "all"
    #[arg(long, default_value = "all")]
    inspector: String,

    /// Base seed; session k uses seed + k - 1 so every inspector sees the same queues
    #[arg(long)]
    seed: Option<u64>,

    /// Ballots per session (defaults to INSPECTOR_TOTAL_BALLOTS or 20)
    #[arg(long)]
    total_ballots: Option<usize>,

    /// Starting clock in seconds (defaults to INSPECTOR_INITIAL_TIME or 120)
    #[arg(long)]
    initial_time: Option<u32>,

    /// Category weights, e.g. "valid:3,torn:1"
    #[arg(long)]
    weights: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Show output summary and file paths
    #[arg(long)]
    show_output: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: String,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Compress output files
    #[arg(long)]
    compress: bool,

    /// Metrics detail level
    #[arg(long, default_value = "detailed")]
    metrics_level: MetricsLevel,

    /// Analyze an existing JSONL file instead of simulating
    #[arg(long)]
    analyze: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Silent by default, only warnings and errors
    let filter = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    inspector::telemetry::init_tracing(filter);

    if let Some(path) = &args.analyze {
        let results = analysis::analyze_jsonl(path)?;
        print_analysis(&results);
        return Ok(());
    }

    let config = build_config(&args)?;
    let factories = select_inspectors(&args.inspector)?;

    if args.show_output {
        info!("Starting shift simulator");
        info!(
            sessions = args.sessions,
            inspectors = factories.len(),
            total_ballots = config.total_ballots,
            initial_time = config.initial_time,
            "Configuration"
        );
    }

    let mut output_writer =
        OutputWriter::new(&args.output_dir, &args.output_format, args.compress)?;
    if args.show_output {
        info!("Output directory: {}", args.output_dir);
    }

    let start = Instant::now();
    let mut results: Vec<(&'static str, SessionResult)> = Vec::new();
    let mut errors = 0;
    let mut session_id = 0;

    for factory in &factories {
        for session_num in 1..=args.sessions {
            session_id += 1;
            let seed = match args.seed {
                Some(base) => base.wrapping_add(u64::from(session_num - 1)),
                None => rand::random(),
            };

            let session_start = Instant::now();
            match run_session(factory, &config, seed) {
                Ok(result) => {
                    let duration_ms = session_start.elapsed().as_secs_f64() * 1000.0;
                    let label = SessionLabel {
                        session_id,
                        seed,
                        inspector: factory.name,
                        inspector_version: factory.version,
                        total_sessions: args.sessions,
                    };
                    let metrics = build_session_metrics(
                        &label,
                        &config,
                        &result,
                        args.metrics_level,
                        duration_ms,
                    );
                    if let Err(e) = output_writer.write_session(&metrics) {
                        warn!("Failed to write metrics for session {}: {}", session_id, e);
                    }
                    if args.verbose {
                        info!(
                            session_id,
                            inspector = factory.name,
                            score = result.stats.score,
                            trigger = trigger_key(result.trigger),
                            "Session completed"
                        );
                    }
                    results.push((factory.name, result));
                }
                Err(e) => {
                    errors += 1;
                    warn!("Session {} ({}) failed: {}", session_id, factory.name, e);
                }
            }
        }
    }

    let elapsed = start.elapsed();

    let (jsonl_path, csv_path) = output_writer.output_paths();
    let jsonl_path = jsonl_path.cloned();
    let csv_path = csv_path.clone();

    output_writer.finish()?;

    if args.show_output {
        if let Some(path) = jsonl_path {
            info!("Detailed results written to: {}", path.display());
        }
        info!("Summary CSV written to: {}", csv_path.display());

        let total = args.sessions * factories.len() as u32;
        print_summary(&results, errors, elapsed, total);
    }

    Ok(())
}

fn build_config(args: &Args) -> Result<GameConfig, Box<dyn std::error::Error>> {
    let mut config = GameConfig::from_env()?;
    if let Some(total_ballots) = args.total_ballots {
        config.total_ballots = total_ballots;
    }
    if let Some(initial_time) = args.initial_time {
        config.initial_time = initial_time;
    }
    if let Some(spec) = &args.weights {
        config.weights = CategoryWeights::parse(spec)?;
    }
    config.validate()?;
    Ok(config)
}

fn select_inspectors(
    name: &str,
) -> Result<Vec<&'static InspectorFactory>, Box<dyn std::error::Error>> {
    if name.eq_ignore_ascii_case("all") {
        return Ok(registered_inspectors().iter().collect());
    }
    by_name(name)
        .map(|factory| vec![factory])
        .ok_or_else(|| format!("Unknown inspector: {name}").into())
}

fn run_session(
    factory: &InspectorFactory,
    config: &GameConfig,
    seed: u64,
) -> Result<SessionResult, SimulatorError> {
    let bot = (factory.make)(Some(seed));
    Simulator::new(config, seed)?.simulate_session(bot.as_ref())
}

fn print_summary(
    results: &[(&'static str, SessionResult)],
    errors: u32,
    elapsed: Duration,
    total: u32,
) {
    println!("\n=== Simulation Summary ===");
    println!("Sessions completed: {}/{}", results.len(), total);
    if errors > 0 {
        println!("Errors: {}", errors);
    }
    println!("Total time: {:?}", elapsed);
    if !results.is_empty() {
        println!(
            "Average time per session: {:?}",
            elapsed / results.len() as u32
        );
    }

    if results.is_empty() {
        return;
    }

    println!("\n=== Results by Inspector ===");
    for factory in registered_inspectors() {
        let mine: Vec<&SessionResult> = results
            .iter()
            .filter(|(name, _)| *name == factory.name)
            .map(|(_, result)| result)
            .collect();
        if mine.is_empty() {
            continue;
        }

        let count = mine.len() as f64;
        let mut total_score = 0u64;
        let mut total_accuracy = 0u64;
        let mut expired = 0u32;
        let mut grades = [0u32; 6];
        for result in &mine {
            let report = build_report(&result.stats);
            total_score += u64::from(report.score);
            total_accuracy += u64::from(report.accuracy);
            if result.trigger == EndTrigger::TimeExpired {
                expired += 1;
            }
            grades[report.grade.grade as usize] += 1;
        }

        println!(
            "{}: avg score={:.1}, avg accuracy={:.1}%, clock ran out={} ({:.1}%)",
            factory.name,
            total_score as f64 / count,
            total_accuracy as f64 / count,
            expired,
            f64::from(expired) / count * 100.0
        );
        println!(
            "  grades: S={} A={} B={} C={} D={} F={}",
            grades[0], grades[1], grades[2], grades[3], grades[4], grades[5]
        );
    }
}

fn print_analysis(results: &analysis::AnalysisResults) {
    println!("\n=== Analysis ===");
    println!("Sessions: {}", results.session_count());

    let mut by_inspector: Vec<_> = results.performance_by_inspector().into_iter().collect();
    by_inspector.sort_by(|a, b| a.0.cmp(&b.0));
    for (name, stats) in by_inspector {
        let grades: Vec<String> = stats
            .grades
            .iter()
            .map(|(grade, n)| format!("{grade}={n}"))
            .collect();
        println!(
            "{}: sessions={}, avg score={:.1}, avg accuracy={:.1}%, clock ran out={}, grades: {}",
            name,
            stats.sessions,
            stats.avg_score,
            stats.avg_accuracy,
            stats.time_expired,
            grades.join(" ")
        );
    }

    let categories = results.accuracy_by_category();
    if !categories.is_empty() {
        println!("\n=== Accuracy by Category ===");
        for (key, stats) in categories {
            println!(
                "{}: {}/{} ({:.1}%)",
                key, stats.correct, stats.total, stats.percent
            );
        }
    }
}
