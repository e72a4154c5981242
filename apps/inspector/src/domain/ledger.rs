//! Decision ledger: what the inspector called and how the shift is going.

use serde::{Deserialize, Serialize};

use crate::domain::ballot::{Ballot, BallotId, InvalidReason};

/// The two verdicts an inspector can give.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    Valid,
    Invalid,
}

impl Choice {
    /// Whether this call agrees with the ballot's ground truth.
    pub fn is_correct_for(self, ballot: &Ballot) -> bool {
        (self == Choice::Valid) == ballot.is_valid()
    }
}

/// One entry in the ledger. Never edited after it is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub ballot_id: BallotId,
    pub decision: Choice,
    pub correct: bool,
    /// Ground-truth defect of the ballot, copied at decision time.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub invalid_reason: Option<InvalidReason>,
}

impl Decision {
    pub fn record(ballot: &Ballot, choice: Choice) -> Self {
        Self {
            ballot_id: ballot.id(),
            decision: choice,
            correct: choice.is_correct_for(ballot),
            invalid_reason: ballot.invalid_reason(),
        }
    }
}

/// Running tallies for a shift.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStats {
    pub score: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub total_seen: u32,
    pub decisions: Vec<Decision>,
    /// Whole seconds from session start to the end latch.
    pub time_elapsed: u64,
}

impl GameStats {
    /// Append a decision and bump the counters. Score is handled by the caller.
    pub fn push(&mut self, decision: Decision) {
        if decision.correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
        self.total_seen += 1;
        self.decisions.push(decision);
    }
}
