use std::time::Duration;

use crate::config::game::GameConfig;
use crate::domain::ballot::{Ballot, BallotFace, BallotId, InvalidReason};
use crate::domain::grid::Cell;
use crate::domain::ledger::Choice;
use crate::domain::report::build_report;
use crate::domain::session::apply;
use crate::domain::state::{EndTrigger, Phase, SessionEvent, SessionState, SessionTransition};
use crate::errors::domain::{DomainError, ValidationKind};

const T0: Duration = Duration::ZERO;

fn valid_ballot(id: u32) -> Ballot {
    Ballot::from_face(BallotId(id), BallotFace::single_mark(Cell::new(0, 1)))
}

fn unsigned_ballot(id: u32) -> Ballot {
    let mut face = BallotFace::single_mark(Cell::new(1, 3));
    face.has_signature = false;
    Ballot::from_face(BallotId(id), face)
}

fn started(queue: Vec<Ballot>, config: &GameConfig) -> SessionState {
    let mut state = SessionState::new(queue, config);
    apply(&mut state, SessionEvent::Start, T0).unwrap();
    state
}

fn rejection_kind(result: Result<Vec<SessionTransition>, DomainError>) -> ValidationKind {
    match result {
        Err(DomainError::Validation(kind, _)) => kind,
        other => panic!("expected validation rejection, got {other:?}"),
    }
}

fn ticks(state: &mut SessionState, n: u32) {
    for _ in 0..n {
        apply(state, SessionEvent::Tick, T0).unwrap();
    }
}

#[test]
fn three_valid_ballots_valid_valid_invalid() {
    let config = GameConfig::default();
    let mut state = started(vec![valid_ballot(1), valid_ballot(2), valid_ballot(3)], &config);

    for choice in [Choice::Valid, Choice::Valid, Choice::Invalid] {
        apply(&mut state, SessionEvent::Decide(choice), T0).unwrap();
        apply(&mut state, SessionEvent::Advance, Duration::from_millis(4_200)).unwrap();
    }

    let stats = state.stats();
    assert_eq!(stats.score, 15);
    assert_eq!(stats.correct, 2);
    assert_eq!(stats.incorrect, 1);
    assert_eq!(stats.total_seen, 3);
    assert_eq!(stats.time_elapsed, 4);
    assert_eq!(state.phase(), Phase::Ending);
    assert_eq!(build_report(stats).accuracy, 67);
}

#[test]
fn correct_then_wrong_nets_minus_six_below_the_ceiling() {
    let config = GameConfig::default();
    let mut state = started(vec![valid_ballot(1), valid_ballot(2), valid_ballot(3)], &config);
    ticks(&mut state, 20);
    assert_eq!(state.time_left(), 100);

    apply(&mut state, SessionEvent::Decide(Choice::Valid), T0).unwrap();
    assert_eq!(state.time_left(), 102);
    apply(&mut state, SessionEvent::Advance, T0).unwrap();
    apply(&mut state, SessionEvent::Decide(Choice::Invalid), T0).unwrap();
    assert_eq!(state.time_left(), 94);
}

/// 120 + 2 - 8: the bonus is clamped at the ceiling before the penalty lands.
#[test]
fn correct_then_wrong_from_full_clock_clamps_each_step() {
    let config = GameConfig::default();
    let mut state = started(vec![valid_ballot(1), valid_ballot(2)], &config);

    apply(&mut state, SessionEvent::Decide(Choice::Valid), T0).unwrap();
    assert_eq!(state.time_left(), config.initial_time);
    apply(&mut state, SessionEvent::Advance, T0).unwrap();
    apply(&mut state, SessionEvent::Decide(Choice::Invalid), T0).unwrap();
    assert_eq!(state.time_left(), 112);
}

#[test]
fn empty_queue_reaches_ending_on_start() {
    let config = GameConfig::default();
    let mut state = SessionState::new(Vec::new(), &config);
    let transitions = apply(&mut state, SessionEvent::Start, T0).unwrap();

    assert_eq!(
        transitions,
        vec![
            SessionTransition::Started,
            SessionTransition::Ending {
                trigger: EndTrigger::QueueExhausted,
                time_elapsed: 0,
            },
        ]
    );
    assert_eq!(state.phase(), Phase::Ending);
}

#[test]
fn decisions_rejected_while_locked() {
    let config = GameConfig::default();
    let mut state = started(vec![valid_ballot(1), valid_ballot(2)], &config);

    apply(&mut state, SessionEvent::Decide(Choice::Valid), T0).unwrap();
    let kind = rejection_kind(apply(&mut state, SessionEvent::Decide(Choice::Invalid), T0));
    assert_eq!(kind, ValidationKind::DecisionLocked);
    assert_eq!(state.stats().total_seen, 1);
    assert_eq!(state.stats().score, 10);

    apply(&mut state, SessionEvent::Advance, T0).unwrap();
    assert!(!state.is_locked());
    apply(&mut state, SessionEvent::Decide(Choice::Valid), T0).unwrap();
    assert_eq!(state.stats().total_seen, 2);
}

#[test]
fn decision_before_start_is_phase_mismatch() {
    let config = GameConfig::default();
    let mut state = SessionState::new(vec![valid_ballot(1)], &config);
    let kind = rejection_kind(apply(&mut state, SessionEvent::Decide(Choice::Valid), T0));
    assert_eq!(kind, ValidationKind::PhaseMismatch);
}

#[test]
fn start_twice_is_phase_mismatch() {
    let config = GameConfig::default();
    let mut state = started(vec![valid_ballot(1)], &config);
    let kind = rejection_kind(apply(&mut state, SessionEvent::Start, T0));
    assert_eq!(kind, ValidationKind::PhaseMismatch);
}

#[test]
fn clock_expiry_ends_session_and_rejects_decisions() {
    let config = GameConfig {
        initial_time: 3,
        ..GameConfig::default()
    };
    let mut state = started(vec![valid_ballot(1)], &config);
    ticks(&mut state, 2);
    let transitions =
        apply(&mut state, SessionEvent::Tick, Duration::from_millis(3_999)).unwrap();

    assert_eq!(
        transitions,
        vec![
            SessionTransition::ClockTicked { time_left: 0 },
            SessionTransition::Ending {
                trigger: EndTrigger::TimeExpired,
                time_elapsed: 3,
            },
        ]
    );
    let kind = rejection_kind(apply(&mut state, SessionEvent::Decide(Choice::Valid), T0));
    assert_eq!(kind, ValidationKind::SessionFinished);

    // The clock stays stopped.
    assert!(apply(&mut state, SessionEvent::Tick, T0).unwrap().is_empty());
}

#[test]
fn zero_clock_guard_rejects_with_time_expired() {
    let config = GameConfig::default();
    let mut state = started(vec![valid_ballot(1)], &config);
    state.time_left = 0;
    let kind = rejection_kind(apply(&mut state, SessionEvent::Decide(Choice::Valid), T0));
    assert_eq!(kind, ValidationKind::TimeExpired);
}

#[test]
fn decision_in_final_second_is_honoured_before_latch() {
    let config = GameConfig {
        initial_time: 5,
        ..GameConfig::default()
    };
    let mut state = started(vec![valid_ballot(1), valid_ballot(2)], &config);
    ticks(&mut state, 4);
    assert_eq!(state.time_left(), 1);

    // Wrong call drops the clock to zero in the same step the ledger records it.
    let transitions = apply(&mut state, SessionEvent::Decide(Choice::Invalid), T0).unwrap();
    assert!(matches!(
        transitions.as_slice(),
        [
            SessionTransition::DecisionRecorded { time_left: 0, .. },
            SessionTransition::Ending {
                trigger: EndTrigger::TimeExpired,
                ..
            },
        ]
    ));
    assert_eq!(state.stats().total_seen, 1);
}

#[test]
fn pending_advance_after_latch_is_noop() {
    let config = GameConfig {
        initial_time: 5,
        ..GameConfig::default()
    };
    let mut state = started(vec![valid_ballot(1)], &config);
    ticks(&mut state, 4);

    // Last ballot, wrong call, clock hits zero; the queued advance must not end the session again.
    apply(&mut state, SessionEvent::Decide(Choice::Invalid), T0).unwrap();
    assert_eq!(state.phase(), Phase::Ending);
    assert!(apply(&mut state, SessionEvent::Advance, T0).unwrap().is_empty());
    assert!(apply(&mut state, SessionEvent::Tick, T0).unwrap().is_empty());
    assert_eq!(state.cursor(), 0);
}

#[test]
fn settle_hands_off_once() {
    let config = GameConfig::default();
    let mut state = started(vec![unsigned_ballot(1)], &config);
    apply(&mut state, SessionEvent::Decide(Choice::Invalid), T0).unwrap();
    apply(&mut state, SessionEvent::Advance, Duration::from_secs(2)).unwrap();

    let transitions = apply(&mut state, SessionEvent::Settle, T0).unwrap();
    let [SessionTransition::Ended { stats }] = transitions.as_slice() else {
        panic!("expected a single Ended transition, got {transitions:?}");
    };
    assert_eq!(stats.correct, 1);
    assert_eq!(
        stats.decisions[0].invalid_reason,
        Some(InvalidReason::NoSignature)
    );
    assert_eq!(state.phase(), Phase::Ended);

    let kind = rejection_kind(apply(&mut state, SessionEvent::Settle, T0));
    assert_eq!(kind, ValidationKind::AlreadyFinalized);
}

#[test]
fn settle_before_ending_is_phase_mismatch() {
    let config = GameConfig::default();
    let mut state = started(vec![valid_ballot(1)], &config);
    let kind = rejection_kind(apply(&mut state, SessionEvent::Settle, T0));
    assert_eq!(kind, ValidationKind::PhaseMismatch);
}

#[test]
fn advance_without_decision_is_noop() {
    let config = GameConfig::default();
    let mut state = started(vec![valid_ballot(1), valid_ballot(2)], &config);
    assert!(apply(&mut state, SessionEvent::Advance, T0).unwrap().is_empty());
    assert_eq!(state.cursor(), 0);
}

#[test]
fn view_exposes_current_ballot_and_voter() {
    let config = GameConfig::default();
    let mut state = started(vec![valid_ballot(1), unsigned_ballot(2)], &config);
    apply(&mut state, SessionEvent::Decide(Choice::Valid), T0).unwrap();
    apply(&mut state, SessionEvent::Advance, T0).unwrap();

    let view = state.view();
    assert_eq!(view.cursor, 1);
    assert_eq!(view.total, 2);
    assert_eq!(view.score, 10);
    assert_eq!(view.accuracy, 100);
    assert!(!view.locked);
    assert_eq!(view.current_ballot.as_ref().map(Ballot::id), Some(BallotId(2)));
    assert_eq!(
        view.current_voter.map(|v| v.name),
        Some("Sita Kumari Sharma")
    );
}
