//! Property tests for the session machine (pure domain).
//!
//! Properties tested:
//! - The clock stays within [0, initial_time] after any event sequence
//! - Ending and Ended each fire at most once
//! - The ledger is frozen once the latch fires
//! - Counters agree with the ledger

use std::time::Duration;

use proptest::prelude::*;

use crate::config::game::GameConfig;
use crate::domain::generator::generate_queue_with_seed;
use crate::domain::session::apply;
use crate::domain::state::{SessionEvent, SessionState, SessionTransition};
use crate::domain::{test_gens, test_prelude};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_session_invariants_hold(
        seed in any::<u64>(),
        count in 0usize..8,
        initial_time in 1u32..30,
        events in prop::collection::vec(test_gens::play_event(), 0..120),
    ) {
        let config = GameConfig { initial_time, ..GameConfig::default() };
        let queue = generate_queue_with_seed(count, seed, &config.weights).unwrap();
        let mut state = SessionState::new(queue, &config);
        apply(&mut state, SessionEvent::Start, Duration::ZERO).unwrap();

        let mut endings = 0;
        let mut ended = 0;
        let mut frozen_ledger = None;

        for (step, event) in events.into_iter().enumerate() {
            let elapsed = Duration::from_millis(step as u64 * 250);
            let Ok(transitions) = apply(&mut state, event, elapsed) else {
                continue;
            };
            for transition in &transitions {
                match transition {
                    SessionTransition::Ending { .. } => endings += 1,
                    SessionTransition::Ended { .. } => ended += 1,
                    _ => {}
                }
            }

            prop_assert!(state.time_left() <= initial_time);
            let stats = state.stats();
            prop_assert_eq!(stats.correct + stats.incorrect, stats.total_seen);
            prop_assert_eq!(stats.total_seen as usize, stats.decisions.len());
            prop_assert!(stats.decisions.len() <= count);

            if state.is_finished() {
                match &frozen_ledger {
                    None => frozen_ledger = Some(stats.clone()),
                    Some(frozen) => prop_assert_eq!(frozen, stats),
                }
            }
        }

        prop_assert!(endings <= 1);
        prop_assert!(ended <= 1);
        prop_assert!(ended <= endings || count == 0);
    }

    /// Property: a wrong call never pushes the score below zero
    #[test]
    fn prop_score_never_underflows(wrong_calls in 1usize..10) {
        let config = GameConfig::default();
        let queue = generate_queue_with_seed(wrong_calls, 11, &config.weights).unwrap();
        let mut state = SessionState::new(queue, &config);
        apply(&mut state, SessionEvent::Start, Duration::ZERO).unwrap();

        for _ in 0..wrong_calls {
            let Some(ballot) = state.current_ballot() else { break };
            let wrong = if ballot.is_valid() {
                crate::domain::ledger::Choice::Invalid
            } else {
                crate::domain::ledger::Choice::Valid
            };
            apply(&mut state, SessionEvent::Decide(wrong), Duration::ZERO).unwrap();
            apply(&mut state, SessionEvent::Advance, Duration::ZERO).unwrap();
        }
        prop_assert_eq!(state.stats().score, 0);
    }
}
