//! Shared types for the simulator.

use clap::ValueEnum;

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Jsonl,
    /// CSV summary only.
    Csv,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MetricsLevel {
    /// Totals and grade.
    Basic,
    /// Adds every decision and the category breakdown.
    Detailed,
}
