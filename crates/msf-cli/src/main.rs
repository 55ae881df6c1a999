#![deny(clippy::correctness)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::pedantic,
    clippy::nursery,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::cast_lossless
)]
#![doc = include_str!("../README.md")]

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use msf::driver::MsfDriver;
use msf::{kruskal, naive, parser};

/// Times the top-tree incremental MSF against two reference oracles over
/// a DIMACS-style edge file.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the DIMACS-style input file.
    input: PathBuf,

    /// Where to write the log file.
    #[arg(long, default_value = "msf.log")]
    log_file: PathBuf,

    /// Minimum log level to record.
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Suppress the console log sink; the file sink still receives everything.
    #[arg(long)]
    quiet: bool,
}

/// CLI-facing mirror of `mt_logger::Level`, so `clap` can derive parsing
/// for it without requiring `mt_logger::Level` itself to implement
/// [`clap::ValueEnum`].
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum LogLevel {
    /// Finest-grained tracing.
    Trace,
    /// Developer-facing diagnostics.
    Debug,
    /// Normal operational messages.
    Info,
    /// Recoverable anomalies.
    Warn,
    /// Failures.
    Error,
}

impl From<LogLevel> for mt_logger::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::Trace,
            LogLevel::Debug => Self::Debug,
            LogLevel::Info => Self::Info,
            LogLevel::Warn => Self::Warning,
            LogLevel::Error => Self::Error,
        }
    }
}

fn main() -> Result<(), String> {
    let args = Args::parse();

    let log_file = args.log_file.to_str().ok_or("--log-file must be valid UTF-8")?;
    let output = if args.quiet {
        mt_logger::OutputStream::File
    } else {
        mt_logger::OutputStream::Both
    };
    mt_logger::mt_new!(Some(log_file), mt_logger::Level::from(args.log_level), output);

    mt_logger::mt_log!(mt_logger::Level::Info, "reading input from {:?}", args.input);
    let graph = parser::parse_dimacs(&args.input).map_err(|e| e.to_string())?;
    mt_logger::mt_log!(
        mt_logger::Level::Info,
        "parsed {} edges over {} declared vertices",
        graph.edges.len(),
        graph.vertex_count
    );

    let start = Instant::now();
    let mut driver = MsfDriver::new();
    for &(u, v, w) in &graph.edges {
        driver.process_edge(u, v, w);
    }
    let top_tree_time = start.elapsed();
    let top_tree_weight = driver.total_weight();
    mt_logger::mt_log!(
        mt_logger::Level::Info,
        "top-tree MSF took {:.6}s, weight {top_tree_weight}",
        top_tree_time.as_secs_f64()
    );

    let start = Instant::now();
    let kruskal_forest = kruskal::minimum_spanning_forest(&graph.edges);
    let kruskal_time = start.elapsed();
    let kruskal_weight: i64 = kruskal_forest.iter().map(|&(_, _, w)| w).sum();
    mt_logger::mt_log!(
        mt_logger::Level::Info,
        "offline Kruskal took {:.6}s, weight {kruskal_weight}",
        kruskal_time.as_secs_f64()
    );

    let start = Instant::now();
    let mut naive_mst = naive::DynamicMst::new();
    for &(u, v, w) in &graph.edges {
        naive_mst.add_edge(u, v, w);
    }
    let naive_time = start.elapsed();
    let naive_weight: i64 = naive_mst.mst_edges().iter().map(|&(_, _, w)| w).sum();
    mt_logger::mt_log!(
        mt_logger::Level::Info,
        "naive dynamic MST took {:.6}s, weight {naive_weight}",
        naive_time.as_secs_f64()
    );

    println!(
        "\n    filename: {:?}\n    Time to run toptree: {:.6}\n    Time to run kruskal offline: {:.6}\n    Time to run naive algorithm: {:.6}\n    # Sum for toptree: {top_tree_weight}\n    # Sum for kruskal: {kruskal_weight}\n    # Sum for naive:  {naive_weight}\n    ",
        args.input,
        top_tree_time.as_secs_f64(),
        kruskal_time.as_secs_f64(),
        naive_time.as_secs_f64(),
    );

    mt_logger::mt_flush!().map_err(|e| e.to_string())
}
