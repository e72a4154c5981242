use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::ballot::{BallotCategory, InvalidReason};
use crate::error::AppError;

pub const TOTAL_BALLOTS: usize = 20;
pub const INITIAL_TIME: u32 = 120;
pub const CORRECT_BONUS: u32 = 2;
pub const WRONG_PENALTY: u32 = 8;
pub const CORRECT_POINTS: u32 = 10;
pub const WRONG_POINTS: u32 = 5;

const TICK: Duration = Duration::from_secs(1);
const FEEDBACK_DELAY: Duration = Duration::from_millis(900);
const ADVANCE_DELAY: Duration = Duration::from_millis(400);
const SETTLE_DELAY: Duration = Duration::from_millis(700);

/// Relative weights used when planning the categories of a ballot queue.
///
/// A weight of zero removes the category from the plan entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryWeights {
    pub valid: u32,
    pub multiple_marks: u32,
    pub blank: u32,
    pub border_mark: u32,
    pub identifying_marks: u32,
    pub no_signature: u32,
    pub torn: u32,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            valid: 40,
            multiple_marks: 10,
            blank: 10,
            border_mark: 10,
            identifying_marks: 10,
            no_signature: 10,
            torn: 10,
        }
    }
}

impl CategoryWeights {
    pub fn weight(&self, category: BallotCategory) -> u32 {
        match category {
            BallotCategory::Valid => self.valid,
            BallotCategory::Invalid(InvalidReason::MultipleMarks) => self.multiple_marks,
            BallotCategory::Invalid(InvalidReason::Blank) => self.blank,
            BallotCategory::Invalid(InvalidReason::BorderMark) => self.border_mark,
            BallotCategory::Invalid(InvalidReason::IdentifyingMarks) => self.identifying_marks,
            BallotCategory::Invalid(InvalidReason::NoSignature) => self.no_signature,
            BallotCategory::Invalid(InvalidReason::Torn) => self.torn,
        }
    }

    fn weight_mut(&mut self, category: BallotCategory) -> &mut u32 {
        match category {
            BallotCategory::Valid => &mut self.valid,
            BallotCategory::Invalid(InvalidReason::MultipleMarks) => &mut self.multiple_marks,
            BallotCategory::Invalid(InvalidReason::Blank) => &mut self.blank,
            BallotCategory::Invalid(InvalidReason::BorderMark) => &mut self.border_mark,
            BallotCategory::Invalid(InvalidReason::IdentifyingMarks) => {
                &mut self.identifying_marks
            }
            BallotCategory::Invalid(InvalidReason::NoSignature) => &mut self.no_signature,
            BallotCategory::Invalid(InvalidReason::Torn) => &mut self.torn,
        }
    }

    /// Sum of all weights (saturating).
    pub fn total(&self) -> u32 {
        BallotCategory::ALL
            .iter()
            .fold(0u32, |acc, &c| acc.saturating_add(self.weight(c)))
    }

    /// Categories with a non-zero weight, in canonical order.
    pub fn enabled(&self) -> Vec<BallotCategory> {
        BallotCategory::ALL
            .into_iter()
            .filter(|&c| self.weight(c) > 0)
            .collect()
    }

    /// Parse `"valid:40,blank:10,torn:5"`. Unlisted categories keep their default weight.
    pub fn parse(spec: &str) -> Result<Self, AppError> {
        let mut weights = Self::default();
        for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (key, value) = entry.split_once(':').ok_or_else(|| {
                AppError::config(format!("category weight '{entry}' must look like name:weight"))
            })?;
            let category = BallotCategory::from_key(key.trim()).ok_or_else(|| {
                AppError::config(format!("unknown ballot category '{}'", key.trim()))
            })?;
            let weight = value.trim().parse::<u32>().map_err(|_| {
                AppError::config(format!(
                    "weight for '{}' must be a non-negative integer, got '{}'",
                    key.trim(),
                    value.trim()
                ))
            })?;
            *weights.weight_mut(category) = weight;
        }
        Ok(weights)
    }
}

/// Startup constants for a shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Ballots generated per session.
    pub total_ballots: usize,
    /// Clock budget in seconds; also the ceiling for bonus time.
    pub initial_time: u32,
    /// Seconds added for a correct decision.
    pub correct_bonus: u32,
    /// Seconds removed for a wrong decision.
    pub wrong_penalty: u32,
    pub correct_points: u32,
    pub wrong_points: u32,
    /// Clock resolution.
    pub tick: Duration,
    /// How long feedback stays up before the ballot slides out.
    pub feedback_delay: Duration,
    /// Slide-out time before the next ballot becomes selectable.
    pub advance_delay: Duration,
    /// Delay between the end latch and the stats handoff.
    pub settle_delay: Duration,
    pub weights: CategoryWeights,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            total_ballots: TOTAL_BALLOTS,
            initial_time: INITIAL_TIME,
            correct_bonus: CORRECT_BONUS,
            wrong_penalty: WRONG_PENALTY,
            correct_points: CORRECT_POINTS,
            wrong_points: WRONG_POINTS,
            tick: TICK,
            feedback_delay: FEEDBACK_DELAY,
            advance_delay: ADVANCE_DELAY,
            settle_delay: SETTLE_DELAY,
            weights: CategoryWeights::default(),
        }
    }
}

impl GameConfig {
    /// Read startup overrides from the process environment.
    ///
    /// Recognised variables: `INSPECTOR_TOTAL_BALLOTS`, `INSPECTOR_INITIAL_TIME`,
    /// `INSPECTOR_CORRECT_BONUS`, `INSPECTOR_WRONG_PENALTY`, `INSPECTOR_CATEGORY_WEIGHTS`.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`GameConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            total_ballots: parsed_var(&lookup, "INSPECTOR_TOTAL_BALLOTS", defaults.total_ballots)?,
            initial_time: parsed_var(&lookup, "INSPECTOR_INITIAL_TIME", defaults.initial_time)?,
            correct_bonus: parsed_var(&lookup, "INSPECTOR_CORRECT_BONUS", defaults.correct_bonus)?,
            wrong_penalty: parsed_var(&lookup, "INSPECTOR_WRONG_PENALTY", defaults.wrong_penalty)?,
            weights: match lookup("INSPECTOR_CATEGORY_WEIGHTS") {
                Some(spec) => CategoryWeights::parse(&spec)?,
                None => defaults.weights,
            },
            ..defaults
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would make a session meaningless.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.initial_time == 0 {
            return Err(AppError::config("initial time must be greater than zero"));
        }
        if self.tick.is_zero() {
            return Err(AppError::config("clock tick must be greater than zero"));
        }
        if self.weights.total() == 0 {
            return Err(AppError::config(
                "at least one ballot category must have a non-zero weight",
            ));
        }
        Ok(())
    }

    /// Total time a decision keeps the session locked.
    pub fn lock_window(&self) -> Duration {
        self.feedback_delay + self.advance_delay
    }
}

fn parsed_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|_| {
            AppError::config(format!("{name} must be a non-negative integer, got '{raw}'"))
        }),
    }
}
