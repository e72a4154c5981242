//! End-of-shift performance report. Pure reads over finished stats.

use serde::Serialize;

use crate::domain::ballot::BallotCategory;
use crate::domain::ledger::GameStats;

/// Score needed, on top of 90 % accuracy, for the top grade.
const S_GRADE_MIN_SCORE: u32 = 100;

/// Percent of correct calls, rounded half up. Zero when nothing was seen.
pub fn accuracy_percent(correct: u32, total_seen: u32) -> u32 {
    if total_seen == 0 {
        return 0;
    }
    let correct = u64::from(correct);
    let total = u64::from(total_seen);
    ((correct * 200 + total) / (2 * total)) as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Grade {
    S,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub const ALL: [Grade; 6] = [Grade::S, Grade::A, Grade::B, Grade::C, Grade::D, Grade::F];

    pub fn from_performance(accuracy: u32, score: u32) -> Self {
        match accuracy {
            90.. if score >= S_GRADE_MIN_SCORE => Grade::S,
            80.. => Grade::A,
            70.. => Grade::B,
            60.. => Grade::C,
            50.. => Grade::D,
            _ => Grade::F,
        }
    }

    pub fn letter(self) -> &'static str {
        match self {
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::S => "EXEMPLARY",
            Grade::A => "COMMENDABLE",
            Grade::B => "SATISFACTORY",
            Grade::C => "MARGINAL",
            Grade::D => "INADEQUATE",
            Grade::F => "FAILED",
        }
    }

    pub fn nepali(self) -> &'static str {
        match self {
            Grade::S => "उत्कृष्ट",
            Grade::A => "प्रशंसनीय",
            Grade::B => "सन्तोषजनक",
            Grade::C => "सामान्य",
            Grade::D => "अपर्याप्त",
            Grade::F => "असफल",
        }
    }

    pub fn flavor(self) -> &'static str {
        match self {
            Grade::S => {
                "Your dedication to electoral integrity is unmatched. The Commission is proud."
            }
            Grade::A => "Well done. The democratic process is in capable hands.",
            Grade::B => "Satisfactory performance. Further training may improve accuracy.",
            Grade::C => "Several errors were noted. A review of procedures is recommended.",
            Grade::D => "Significant errors compromised ballot integrity. Retraining required.",
            Grade::F => "Your performance has jeopardized the election. You are relieved of duty.",
        }
    }

    /// Threshold wording for the rating scale.
    pub fn requirement(self) -> &'static str {
        match self {
            Grade::S => "90%+ & 100+ pts",
            Grade::A => "80%+",
            Grade::B => "70%+",
            Grade::C => "60%+",
            Grade::D => "50%+",
            Grade::F => "<50%",
        }
    }
}

/// How well one bucket went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// At least 70 % correct.
    Good,
    /// At least 50 % correct.
    Marginal,
    Poor,
}

impl Tier {
    fn of(correct: u32, total: u32) -> Self {
        let (c, t) = (u64::from(correct), u64::from(total));
        if c * 10 >= t * 7 {
            Tier::Good
        } else if c * 2 >= t {
            Tier::Marginal
        } else {
            Tier::Poor
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketStats {
    pub key: &'static str,
    pub label: &'static str,
    pub total: u32,
    pub correct: u32,
    pub percent: u32,
    pub tier: Tier,
}

fn bucket_label(category: BallotCategory) -> &'static str {
    use crate::domain::ballot::InvalidReason as R;
    match category {
        BallotCategory::Valid => "VALID ballots",
        BallotCategory::Invalid(R::MultipleMarks) => "Multiple marks",
        BallotCategory::Invalid(R::Blank) => "Blank ballots",
        BallotCategory::Invalid(R::BorderMark) => "Border marks",
        BallotCategory::Invalid(R::IdentifyingMarks) => "ID marks",
        BallotCategory::Invalid(R::NoSignature) => "No signature",
        BallotCategory::Invalid(R::Torn) => "Torn ballots",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeInfo {
    pub grade: Grade,
    pub label: &'static str,
    pub nepali: &'static str,
    pub flavor: &'static str,
}

impl From<Grade> for GradeInfo {
    fn from(grade: Grade) -> Self {
        Self {
            grade,
            label: grade.label(),
            nepali: grade.nepali(),
            flavor: grade.flavor(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingRow {
    pub grade: Grade,
    pub requirement: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftReport {
    pub score: u32,
    pub accuracy: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub total_seen: u32,
    pub time_elapsed: u64,
    pub grade: GradeInfo,
    /// Buckets with at least one decision, valid first then rule priority.
    pub breakdown: Vec<BucketStats>,
    pub rating_scale: Vec<RatingRow>,
}

/// Summarise finished stats. Reads only; calling twice yields equal reports.
pub fn build_report(stats: &GameStats) -> ShiftReport {
    let accuracy = accuracy_percent(stats.correct, stats.total_seen);
    let grade = Grade::from_performance(accuracy, stats.score);

    ShiftReport {
        score: stats.score,
        accuracy,
        correct: stats.correct,
        incorrect: stats.incorrect,
        total_seen: stats.total_seen,
        time_elapsed: stats.time_elapsed,
        grade: grade.into(),
        breakdown: breakdown(stats),
        rating_scale: rating_scale(),
    }
}

pub fn breakdown(stats: &GameStats) -> Vec<BucketStats> {
    BallotCategory::ALL
        .into_iter()
        .filter_map(|category| {
            let (total, correct) = stats
                .decisions
                .iter()
                .filter(|d| BallotCategory::from_reason(d.invalid_reason) == category)
                .fold((0u32, 0u32), |(t, c), d| (t + 1, c + u32::from(d.correct)));
            (total > 0).then(|| BucketStats {
                key: category.key(),
                label: bucket_label(category),
                total,
                correct,
                percent: accuracy_percent(correct, total),
                tier: Tier::of(correct, total),
            })
        })
        .collect()
}

pub fn rating_scale() -> Vec<RatingRow> {
    Grade::ALL
        .into_iter()
        .map(|grade| RatingRow {
            grade,
            requirement: grade.requirement(),
        })
        .collect()
}
