//! Metrics collection and output for simulated shifts.

use inspector::domain::ballot::BallotCategory;
use inspector::domain::report::BucketStats;
use inspector::{build_report, Choice, EndTrigger, GameConfig};
use serde::Serialize;

use crate::simulator::SessionResult;
use crate::types::MetricsLevel;

/// Complete session metrics for output.
#[derive(Debug, Clone, Serialize)]
pub struct SessionMetrics {
    pub session_id: u32,
    pub seed: u64,
    pub timestamp: String,
    pub config: SessionConfigMetrics,
    pub result: SessionResultMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<SessionDetail>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionConfigMetrics {
    pub inspector: String,
    pub inspector_version: String,
    pub total_ballots: usize,
    pub initial_time: u32,
    pub total_sessions: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionResultMetrics {
    pub score: u32,
    pub accuracy: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub total_seen: u32,
    pub time_elapsed: u64,
    pub grade: String,
    pub end_trigger: &'static str,
    pub ticks: u32,
    pub virtual_duration_ms: u64,
    /// Wall-clock cost of the simulation itself
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionDetail {
    pub breakdown: Vec<BucketStats>,
    pub decisions: Vec<DecisionMetrics>,
    pub avg_think_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DecisionMetrics {
    pub ballot_id: u32,
    pub category: &'static str,
    pub choice: Choice,
    pub correct: bool,
    pub think_ms: u64,
}

pub fn trigger_key(trigger: EndTrigger) -> &'static str {
    match trigger {
        EndTrigger::TimeExpired => "time_expired",
        EndTrigger::QueueExhausted => "queue_exhausted",
    }
}

/// Everything needed to label one session's metrics.
pub struct SessionLabel<'a> {
    pub session_id: u32,
    pub seed: u64,
    pub inspector: &'a str,
    pub inspector_version: &'a str,
    pub total_sessions: u32,
}

/// Build metrics from a finished session.
pub fn build_session_metrics(
    label: &SessionLabel<'_>,
    config: &GameConfig,
    result: &SessionResult,
    level: MetricsLevel,
    duration_ms: f64,
) -> SessionMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));

    let report = build_report(&result.stats);

    let detail = match level {
        MetricsLevel::Basic => None,
        MetricsLevel::Detailed => Some(build_detail(result, report.breakdown.clone())),
    };

    SessionMetrics {
        session_id: label.session_id,
        seed: label.seed,
        timestamp,
        config: SessionConfigMetrics {
            inspector: label.inspector.to_string(),
            inspector_version: label.inspector_version.to_string(),
            total_ballots: config.total_ballots,
            initial_time: config.initial_time,
            total_sessions: label.total_sessions,
        },
        result: SessionResultMetrics {
            score: report.score,
            accuracy: report.accuracy,
            correct: report.correct,
            incorrect: report.incorrect,
            total_seen: report.total_seen,
            time_elapsed: report.time_elapsed,
            grade: report.grade.grade.letter().to_string(),
            end_trigger: trigger_key(result.trigger),
            ticks: result.ticks,
            virtual_duration_ms: result.virtual_duration.as_millis() as u64,
            duration_ms,
        },
        detail,
    }
}

fn build_detail(result: &SessionResult, breakdown: Vec<BucketStats>) -> SessionDetail {
    let decisions: Vec<DecisionMetrics> = result
        .stats
        .decisions
        .iter()
        .zip(result.think_times.iter())
        .map(|(decision, think)| DecisionMetrics {
            ballot_id: decision.ballot_id.0,
            category: BallotCategory::from_reason(decision.invalid_reason).key(),
            choice: decision.decision,
            correct: decision.correct,
            think_ms: think.as_millis() as u64,
        })
        .collect();

    let avg_think_ms = if decisions.is_empty() {
        0.0
    } else {
        decisions.iter().map(|d| d.think_ms as f64).sum::<f64>() / decisions.len() as f64
    };

    SessionDetail {
        breakdown,
        decisions,
        avg_think_ms,
    }
}

/// CSV summary row for quick analysis.
#[derive(Debug, Serialize)]
pub struct CsvSummaryRow {
    pub session_id: u32,
    pub seed: u64,
    pub inspector: String,
    pub score: u32,
    pub accuracy: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub total_seen: u32,
    pub time_elapsed: u64,
    pub grade: String,
    pub end_trigger: &'static str,
}

impl From<&SessionMetrics> for CsvSummaryRow {
    fn from(metrics: &SessionMetrics) -> Self {
        CsvSummaryRow {
            session_id: metrics.session_id,
            seed: metrics.seed,
            inspector: metrics.config.inspector.clone(),
            score: metrics.result.score,
            accuracy: metrics.result.accuracy,
            correct: metrics.result.correct,
            incorrect: metrics.result.incorrect,
            total_seen: metrics.result.total_seen,
            time_elapsed: metrics.result.time_elapsed,
            grade: metrics.result.grade.clone(),
            end_trigger: metrics.result.end_trigger,
        }
    }
}
