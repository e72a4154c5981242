//! Session transition function.
//!
//! Every change to a session goes through [`apply`]: the event is evaluated
//! against the current state first, then the end latch is evaluated once.

use std::time::Duration;

use crate::domain::ledger::{Choice, Decision};
use crate::domain::scoring::{score_after, time_after};
use crate::domain::state::{EndTrigger, Phase, SessionEvent, SessionState, SessionTransition};
use crate::errors::domain::{DomainError, ValidationKind};

/// Apply one event. `elapsed` is the time since the session started and is
/// only read when the end latch fires.
pub fn apply(
    state: &mut SessionState,
    event: SessionEvent,
    elapsed: Duration,
) -> Result<Vec<SessionTransition>, DomainError> {
    let mut transitions = match event {
        SessionEvent::Start => start(state)?,
        SessionEvent::Decide(choice) => decide(state, choice)?,
        SessionEvent::Tick => tick(state),
        SessionEvent::Advance => advance(state),
        SessionEvent::Settle => return settle(state),
    };

    if let Some(ending) = check_end(state, elapsed) {
        transitions.push(ending);
    }
    Ok(transitions)
}

fn start(state: &mut SessionState) -> Result<Vec<SessionTransition>, DomainError> {
    if state.phase != Phase::Loading {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Session already started",
        ));
    }
    state.phase = Phase::Playing;
    Ok(vec![SessionTransition::Started])
}

/// Record a decision for the ballot under the cursor.
///
/// Guards are independent and checked in order: finished, phase, lock, clock.
fn decide(state: &mut SessionState, choice: Choice) -> Result<Vec<SessionTransition>, DomainError> {
    if state.finished || matches!(state.phase, Phase::Ending | Phase::Ended) {
        return Err(DomainError::validation(
            ValidationKind::SessionFinished,
            "Session is over",
        ));
    }
    if state.phase != Phase::Playing {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Session has not started",
        ));
    }
    if state.locked {
        return Err(DomainError::validation(
            ValidationKind::DecisionLocked,
            "Previous decision still showing feedback",
        ));
    }
    if state.time_left == 0 {
        return Err(DomainError::validation(
            ValidationKind::TimeExpired,
            "Clock has run out",
        ));
    }
    let Some(ballot) = state.queue.get(state.cursor) else {
        return Err(DomainError::validation(
            ValidationKind::SessionFinished,
            "No ballot left to inspect",
        ));
    };

    let decision = Decision::record(ballot, choice);
    let correct = decision.correct;

    state.stats.score = score_after(state.stats.score, correct, &state.config);
    state.time_left = time_after(state.time_left, correct, &state.config);
    state.stats.push(decision.clone());
    state.locked = true;

    Ok(vec![SessionTransition::DecisionRecorded {
        decision,
        score: state.stats.score,
        time_left: state.time_left,
    }])
}

fn tick(state: &mut SessionState) -> Vec<SessionTransition> {
    if state.phase != Phase::Playing || state.time_left == 0 {
        return Vec::new();
    }
    state.time_left -= 1;
    vec![SessionTransition::ClockTicked {
        time_left: state.time_left,
    }]
}

/// Move past the decided ballot. A no-op unless Playing and locked.
fn advance(state: &mut SessionState) -> Vec<SessionTransition> {
    if state.phase != Phase::Playing || !state.locked {
        return Vec::new();
    }
    state.cursor += 1;
    state.locked = false;
    vec![SessionTransition::Advanced {
        cursor: state.cursor,
    }]
}

fn settle(state: &mut SessionState) -> Result<Vec<SessionTransition>, DomainError> {
    match state.phase {
        Phase::Ending => {
            state.phase = Phase::Ended;
            Ok(vec![SessionTransition::Ended {
                stats: state.stats.clone(),
            }])
        }
        Phase::Ended => Err(DomainError::validation(
            ValidationKind::AlreadyFinalized,
            "Stats already handed off",
        )),
        Phase::Loading | Phase::Playing => Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "Nothing to settle before the session ends",
        )),
    }
}

/// End latch. Fires once, the first time either condition holds while Playing.
/// An expired clock is reported even when the queue is also exhausted.
fn check_end(state: &mut SessionState, elapsed: Duration) -> Option<SessionTransition> {
    if state.finished || state.phase != Phase::Playing {
        return None;
    }
    let trigger = if state.time_left == 0 {
        EndTrigger::TimeExpired
    } else if state.cursor >= state.queue.len() {
        EndTrigger::QueueExhausted
    } else {
        return None;
    };

    state.finished = true;
    state.phase = Phase::Ending;
    state.locked = false;
    state.stats.time_elapsed = elapsed.as_secs();

    Some(SessionTransition::Ending {
        trigger,
        time_elapsed: state.stats.time_elapsed,
    })
}
