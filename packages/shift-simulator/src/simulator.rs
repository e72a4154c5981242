//! Virtual-time session player.
//!
//! Drives a [`SessionState`] through [`apply`] exactly as the real-time driver
//! does, but moves a simulated clock forward instead of sleeping. Ticks fire on
//! every whole tick crossed, a decision lands after the bot's think time and the
//! next ballot comes up once the lock window has passed.

use std::time::Duration;

use inspector::{
    apply, generate_queue_with_seed, DomainError, EndTrigger, GameConfig, GameStats, Inspector,
    InspectorError, Phase, SessionEvent, SessionState, SessionTransition,
};

/// Result of simulating one complete session.
#[derive(Debug, Clone)]
pub struct SessionResult {
    /// Frozen stats from the hand-off
    pub stats: GameStats,
    /// What fired the end latch
    pub trigger: EndTrigger,
    /// Think time per recorded decision, same order as `stats.decisions`
    pub think_times: Vec<Duration>,
    /// Clock steps applied while playing
    pub ticks: u32,
    /// Simulated time from start to hand-off, settle delay included
    pub virtual_duration: Duration,
}

/// In-memory session simulator.
pub struct Simulator<'a> {
    config: &'a GameConfig,
    state: SessionState,
    /// Simulated time since start
    now: Duration,
    next_tick: Duration,
    ticks: u32,
    think_times: Vec<Duration>,
    trigger: Option<EndTrigger>,
}

impl<'a> Simulator<'a> {
    /// Build the queue for `seed` and wrap it in a session that has not started.
    pub fn new(config: &'a GameConfig, seed: u64) -> Result<Self, SimulatorError> {
        let queue = generate_queue_with_seed(config.total_ballots, seed, &config.weights)
            .map_err(SimulatorError::Domain)?;
        Ok(Self {
            config,
            state: SessionState::new(queue, config),
            now: Duration::ZERO,
            next_tick: config.tick,
            ticks: 0,
            think_times: Vec::new(),
            trigger: None,
        })
    }

    /// Play the whole session with `bot` making every call.
    pub fn simulate_session(mut self, bot: &dyn Inspector) -> Result<SessionResult, SimulatorError> {
        self.step(SessionEvent::Start)?;

        while self.state.phase() == Phase::Playing {
            let Some(ballot) = self.state.current_ballot() else {
                break;
            };
            let verdict = bot
                .inspect(ballot.face(), self.state.time_left())
                .map_err(SimulatorError::Inspector)?;

            // Input wins a tie with the clock.
            self.run_clock_until(self.now + verdict.think_time, false)?;
            if self.state.phase() != Phase::Playing {
                break;
            }
            self.step(SessionEvent::Decide(verdict.choice))?;
            self.think_times.push(verdict.think_time);

            self.run_clock_until(self.now + self.config.lock_window(), true)?;
            if self.state.phase() == Phase::Playing {
                self.step(SessionEvent::Advance)?;
            }
        }

        if self.state.phase() != Phase::Ending {
            return Err(SimulatorError::InvalidState(format!(
                "session stopped in {:?}",
                self.state.phase()
            )));
        }
        let trigger = self
            .trigger
            .ok_or_else(|| SimulatorError::InvalidState("ending without a trigger".into()))?;

        self.now += self.config.settle_delay;
        let stats = self
            .step(SessionEvent::Settle)?
            .into_iter()
            .find_map(|transition| match transition {
                SessionTransition::Ended { stats } => Some(stats),
                _ => None,
            })
            .ok_or_else(|| SimulatorError::InvalidState("settle did not hand off".into()))?;

        Ok(SessionResult {
            stats,
            trigger,
            think_times: self.think_times,
            ticks: self.ticks,
            virtual_duration: self.now,
        })
    }

    /// Apply clock steps up to `target`. With `inclusive`, a tick due exactly at
    /// `target` fires before whatever happens there.
    fn run_clock_until(&mut self, target: Duration, inclusive: bool) -> Result<(), SimulatorError> {
        while self.state.phase() == Phase::Playing
            && (self.next_tick < target || (inclusive && self.next_tick == target))
        {
            self.now = self.next_tick;
            self.next_tick += self.config.tick;
            self.step(SessionEvent::Tick)?;
            self.ticks += 1;
        }
        // The clock stops at the latch; settle is measured from there.
        if self.state.phase() == Phase::Playing {
            self.now = target;
        }
        Ok(())
    }

    fn step(&mut self, event: SessionEvent) -> Result<Vec<SessionTransition>, SimulatorError> {
        let transitions =
            apply(&mut self.state, event, self.now).map_err(SimulatorError::Domain)?;
        for transition in &transitions {
            if let SessionTransition::Ending { trigger, .. } = transition {
                self.trigger = Some(*trigger);
            }
        }
        Ok(transitions)
    }
}

/// Errors that can occur during simulation.
#[derive(Debug)]
pub enum SimulatorError {
    /// Bot failed to make a call
    Inspector(InspectorError),
    /// Session machine rejected an event the simulator should never send
    Domain(DomainError),
    /// Session ended up somewhere the loop cannot continue from
    InvalidState(String),
}

impl std::fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulatorError::Inspector(err) => write!(f, "Inspector error: {err}"),
            SimulatorError::Domain(err) => write!(f, "Domain error: {err}"),
            SimulatorError::InvalidState(msg) => write!(f, "Invalid state: {msg}"),
        }
    }
}

impl std::error::Error for SimulatorError {}
