//! Analysis helpers for simulation results.
//!
//! Reads the JSONL written by [`crate::output::OutputWriter`], gzipped or not,
//! and aggregates it per inspector and per ballot category.

use flate2::read::GzDecoder;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Load and analyze a JSONL results file. `.gz` files are decompressed.
pub fn analyze_jsonl<P: AsRef<Path>>(
    path: P,
) -> Result<AnalysisResults, Box<dyn std::error::Error>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        analyze_reader(BufReader::new(GzDecoder::new(file)))
    } else {
        analyze_reader(BufReader::new(file))
    }
}

pub fn analyze_reader<R: BufRead>(
    reader: R,
) -> Result<AnalysisResults, Box<dyn std::error::Error>> {
    let mut sessions = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        sessions.push(serde_json::from_str::<Value>(&line)?);
    }
    Ok(AnalysisResults { sessions })
}

/// Analysis results container.
pub struct AnalysisResults {
    sessions: Vec<Value>,
}

impl AnalysisResults {
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Average score and accuracy, plus grade counts, per inspector.
    pub fn performance_by_inspector(&self) -> HashMap<String, InspectorStats> {
        let mut stats: HashMap<String, InspectorStats> = HashMap::new();

        for session in &self.sessions {
            let Some(name) = session["config"]["inspector"].as_str() else {
                continue;
            };
            let result = &session["result"];
            let entry = stats.entry(name.to_string()).or_default();
            entry.sessions += 1;
            entry.total_score += result["score"].as_u64().unwrap_or(0);
            entry.total_accuracy += result["accuracy"].as_u64().unwrap_or(0);
            if result["end_trigger"] == "time_expired" {
                entry.time_expired += 1;
            }
            if let Some(grade) = result["grade"].as_str() {
                *entry.grades.entry(grade.to_string()).or_insert(0) += 1;
            }
        }

        for stat in stats.values_mut() {
            if stat.sessions > 0 {
                stat.avg_score = stat.total_score as f64 / stat.sessions as f64;
                stat.avg_accuracy = stat.total_accuracy as f64 / stat.sessions as f64;
            }
        }

        stats
    }

    /// Pooled accuracy per ballot category. Needs detailed metrics.
    pub fn accuracy_by_category(&self) -> BTreeMap<String, CategoryStats> {
        let mut stats: BTreeMap<String, CategoryStats> = BTreeMap::new();

        for session in &self.sessions {
            let Some(buckets) = session["detail"]["breakdown"].as_array() else {
                continue;
            };
            for bucket in buckets {
                if let (Some(key), Some(total), Some(correct)) = (
                    bucket["key"].as_str(),
                    bucket["total"].as_u64(),
                    bucket["correct"].as_u64(),
                ) {
                    let entry = stats.entry(key.to_string()).or_default();
                    entry.total += total;
                    entry.correct += correct;
                }
            }
        }

        for stat in stats.values_mut() {
            if stat.total > 0 {
                stat.percent = (stat.correct as f64 / stat.total as f64) * 100.0;
            }
        }

        stats
    }
}

#[derive(Default, Debug)]
pub struct InspectorStats {
    pub sessions: u32,
    pub total_score: u64,
    pub total_accuracy: u64,
    pub time_expired: u32,
    pub grades: BTreeMap<String, u32>,
    pub avg_score: f64,
    pub avg_accuracy: f64,
}

#[derive(Default, Debug)]
pub struct CategoryStats {
    pub total: u64,
    pub correct: u64,
    pub percent: f64,
}
