//! Real-time session driver.
//!
//! One task per shift owns the [`SessionState`], the one-second clock and the
//! pending advance/settle deadlines. Player input arrives over an mpsc channel
//! and every change is routed through [`apply`].

use std::future::pending;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep_until, Instant, MissedTickBehavior};
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::config::game::GameConfig;
use crate::domain::generator::{generate_queue, generate_queue_with_seed};
use crate::domain::ledger::{Choice, Decision, GameStats};
use crate::domain::session::apply;
use crate::domain::state::{Phase, SessionEvent, SessionState, SessionTransition, SessionView};
use crate::error::AppError;
use crate::input::{choice_for_key, InputChannel};

const COMMAND_BUFFER: usize = 32;

/// Input to a running shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftCommand {
    Decide {
        choice: Choice,
        channel: InputChannel,
    },
    /// Raw key press; unmapped keys are ignored.
    Key(char),
    /// Discard the session without handing off stats.
    Abandon,
}

/// Collaborator notified by the driver. Observers only read.
pub trait SessionObserver: Send {
    /// Called after every event that changed the session.
    fn on_state(&mut self, _view: &SessionView) {}

    /// Called when a decision is recorded, before the locked window starts.
    fn on_feedback(&mut self, _decision: &Decision, _reason_display: Option<&str>) {}

    /// Called exactly once with the final stats.
    fn on_end(&mut self, stats: &GameStats);
}

/// Drive one session to completion.
///
/// Returns the final stats, or `None` when the session was abandoned or every
/// command sender was dropped before the hand-off.
pub async fn run_session<O>(
    mut state: SessionState,
    mut commands: mpsc::Receiver<ShiftCommand>,
    observer: &mut O,
) -> Result<Option<GameStats>, AppError>
where
    O: SessionObserver + ?Sized,
{
    let config = state.config().clone();
    let started_at = Instant::now();
    let mut clock = interval_at(started_at + config.tick, config.tick);
    clock.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut advance_at: Option<Instant> = None;
    let mut settle_at: Option<Instant> = None;

    let mut next = Some(SessionEvent::Start);
    loop {
        if let Some(event) = next.take() {
            match apply(&mut state, event, started_at.elapsed()) {
                Ok(transitions) => {
                    for transition in &transitions {
                        match transition {
                            SessionTransition::Started => {
                                info!(ballots = state.queue().len(), "Shift started");
                            }
                            SessionTransition::DecisionRecorded { decision, .. } => {
                                debug!(
                                    ballot = %decision.ballot_id,
                                    choice = ?decision.decision,
                                    correct = decision.correct,
                                    "Decision recorded"
                                );
                                let display = decision.invalid_reason.map(|r| r.display());
                                observer.on_feedback(decision, display);
                                advance_at = Some(Instant::now() + config.lock_window());
                            }
                            SessionTransition::Ending {
                                trigger,
                                time_elapsed,
                            } => {
                                info!(?trigger, time_elapsed, "Shift ending");
                                advance_at = None;
                                settle_at = Some(Instant::now() + config.settle_delay);
                            }
                            SessionTransition::Ended { stats } => {
                                observer.on_state(&state.view());
                                observer.on_end(stats);
                                info!(
                                    score = stats.score,
                                    correct = stats.correct,
                                    total_seen = stats.total_seen,
                                    "Shift ended"
                                );
                                return Ok(Some(stats.clone()));
                            }
                            SessionTransition::ClockTicked { .. }
                            | SessionTransition::Advanced { .. } => {}
                        }
                    }
                    if !transitions.is_empty() {
                        observer.on_state(&state.view());
                    }
                }
                Err(err) if err.is_rejected_decision() => {
                    debug!(error = %err, "Dropped out-of-window decision");
                }
                Err(err) => return Err(err.into()),
            }
        }

        // Commands first so a decision racing the last tick is honoured.
        next = tokio::select! {
            biased;

            command = commands.recv() => match command {
                Some(ShiftCommand::Decide { choice, channel }) => {
                    debug!(?channel, ?choice, "Decision input");
                    Some(SessionEvent::Decide(choice))
                }
                Some(ShiftCommand::Key(key)) => {
                    let choice = choice_for_key(key);
                    debug!(channel = ?InputChannel::Keyboard, ?key, ?choice, "Decision input");
                    choice.map(SessionEvent::Decide)
                }
                Some(ShiftCommand::Abandon) | None => {
                    info!(phase = ?state.phase(), "Shift abandoned");
                    return Ok(None);
                }
            },
            _ = clock.tick(), if state.phase() == Phase::Playing => Some(SessionEvent::Tick),
            _ = deadline(advance_at), if advance_at.is_some() => {
                advance_at = None;
                Some(SessionEvent::Advance)
            }
            _ = deadline(settle_at), if settle_at.is_some() => {
                settle_at = None;
                Some(SessionEvent::Settle)
            }
        };
    }
}

async fn deadline(at: Option<Instant>) {
    match at {
        Some(at) => sleep_until(at).await,
        None => pending().await,
    }
}

/// Builds sessions from one configuration. Each start (and restart) gets a fresh queue.
pub struct Shift {
    config: GameConfig,
    next_seed: Option<u64>,
}

impl Shift {
    pub fn new(config: GameConfig) -> Result<Self, AppError> {
        config.validate()?;
        Ok(Self {
            config,
            next_seed: None,
        })
    }

    /// Make queues reproducible. Successive sessions use `seed`, `seed + 1`, ...
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.next_seed = Some(seed);
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Generate a queue and wrap it in a session that has not started yet.
    pub fn prepare(&mut self) -> Result<SessionState, AppError> {
        let queue = match self.next_seed {
            Some(seed) => {
                self.next_seed = Some(seed.wrapping_add(1));
                generate_queue_with_seed(self.config.total_ballots, seed, &self.config.weights)?
            }
            None => generate_queue(self.config.total_ballots, &self.config.weights)?,
        };
        Ok(SessionState::new(queue, &self.config))
    }

    /// Start a session on its own task.
    pub fn start<O>(&mut self, mut observer: O) -> Result<ShiftHandle, AppError>
    where
        O: SessionObserver + 'static,
    {
        let state = self.prepare()?;
        let (commands, receiver) = mpsc::channel(COMMAND_BUFFER);
        let session_id = Uuid::new_v4();
        let span = info_span!("shift", %session_id);

        let task = tokio::spawn(
            async move { run_session(state, receiver, &mut observer).await }.instrument(span),
        );

        Ok(ShiftHandle {
            session_id,
            commands,
            task,
        })
    }

    /// Discard `previous` and start a brand-new session.
    pub async fn restart<O>(
        &mut self,
        previous: ShiftHandle,
        observer: O,
    ) -> Result<ShiftHandle, AppError>
    where
        O: SessionObserver + 'static,
    {
        let old_id = previous.session_id;
        previous.abandon().await?;
        let handle = self.start(observer)?;
        info!(%old_id, new_id = %handle.session_id, "Shift restarted");
        Ok(handle)
    }
}

/// Sending side of a running shift.
pub struct ShiftHandle {
    session_id: Uuid,
    commands: mpsc::Sender<ShiftCommand>,
    task: JoinHandle<Result<Option<GameStats>, AppError>>,
}

impl ShiftHandle {
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Pointer input. Dropped silently once the session is gone.
    pub async fn click(&self, choice: Choice) {
        self.send(ShiftCommand::Decide {
            choice,
            channel: InputChannel::Pointer,
        })
        .await;
    }

    /// Keyboard input. Unmapped keys are ignored by the driver.
    pub async fn key(&self, key: char) {
        self.send(ShiftCommand::Key(key)).await;
    }

    async fn send(&self, command: ShiftCommand) {
        if self.commands.send(command).await.is_err() {
            debug!(session_id = %self.session_id, ?command, "Shift already closed");
        }
    }

    /// Wait for the session to finish on its own.
    pub async fn join(self) -> Result<Option<GameStats>, AppError> {
        let ShiftHandle { commands, task, .. } = self;
        let result = task.await;
        drop(commands);
        result.map_err(|e| AppError::internal(format!("shift task failed: {e}")))?
    }

    /// Stop the session without a hand-off and wait for its task.
    pub async fn abandon(self) -> Result<Option<GameStats>, AppError> {
        let _ = self.commands.send(ShiftCommand::Abandon).await;
        self.join().await
    }
}
