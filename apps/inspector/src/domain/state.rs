use serde::Serialize;

use crate::config::game::GameConfig;
use crate::domain::ballot::Ballot;
use crate::domain::ledger::{Choice, Decision, GameStats};
use crate::domain::report::accuracy_percent;
use crate::domain::voter::{voter_for, VoterProfile};

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Queue built, clock not yet running.
    Loading,
    /// Clock running, decisions accepted (subject to the lock).
    Playing,
    /// End latch fired; waiting out the settle delay.
    Ending,
    /// Final stats handed off. Nothing changes after this.
    Ended,
}

/// Inputs to the session machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Start,
    Decide(Choice),
    /// One clock step elapsed.
    Tick,
    /// Feedback and slide-out finished; move to the next ballot.
    Advance,
    /// Settle delay finished; hand off the final stats.
    Settle,
}

/// Which condition fired the end latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndTrigger {
    TimeExpired,
    QueueExhausted,
}

/// What an event changed. Several may be emitted for one event, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionTransition {
    /// Loading -> Playing.
    Started,

    /// A decision was appended to the ledger and the session is now locked.
    DecisionRecorded {
        decision: Decision,
        score: u32,
        time_left: u32,
    },

    /// The clock moved down by one step.
    ClockTicked { time_left: u32 },

    /// The cursor moved and the lock was released.
    Advanced { cursor: usize },

    /// Edge-triggered: Playing -> Ending. Fires at most once per session.
    Ending {
        trigger: EndTrigger,
        time_elapsed: u64,
    },

    /// Edge-triggered: Ending -> Ended, carrying the frozen stats.
    Ended { stats: GameStats },
}

/// Entire session container. The only place clock, cursor and ledger live.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub(crate) phase: Phase,
    pub(crate) queue: Vec<Ballot>,
    /// Index of the ballot currently on the desk.
    pub(crate) cursor: usize,
    pub(crate) time_left: u32,
    pub(crate) stats: GameStats,
    /// Set from a recorded decision until the following advance.
    pub(crate) locked: bool,
    /// End latch. Once set it is never cleared.
    pub(crate) finished: bool,
    pub(crate) config: GameConfig,
}

impl SessionState {
    pub fn new(queue: Vec<Ballot>, config: &GameConfig) -> Self {
        Self {
            phase: Phase::Loading,
            queue,
            cursor: 0,
            time_left: config.initial_time,
            stats: GameStats::default(),
            locked: false,
            finished: false,
            config: config.clone(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn queue(&self) -> &[Ballot] {
        &self.queue
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// True once the end latch has fired.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn current_ballot(&self) -> Option<&Ballot> {
        if self.phase != Phase::Playing {
            return None;
        }
        self.queue.get(self.cursor)
    }

    /// Read-only snapshot for subscribers.
    pub fn view(&self) -> SessionView {
        SessionView {
            phase: self.phase,
            cursor: self.cursor,
            total: self.queue.len(),
            time_left: self.time_left,
            initial_time: self.config.initial_time,
            score: self.stats.score,
            correct: self.stats.correct,
            incorrect: self.stats.incorrect,
            locked: self.locked,
            accuracy: accuracy_percent(self.stats.correct, self.stats.total_seen),
            current_ballot: self.current_ballot().cloned(),
            current_voter: self.current_ballot().map(|_| voter_for(self.cursor)),
        }
    }
}

/// Snapshot of a session for renderers. Owning it grants no way to mutate the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub phase: Phase,
    pub cursor: usize,
    pub total: usize,
    pub time_left: u32,
    pub initial_time: u32,
    pub score: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub locked: bool,
    pub accuracy: u32,
    pub current_ballot: Option<Ballot>,
    pub current_voter: Option<VoterProfile>,
}
