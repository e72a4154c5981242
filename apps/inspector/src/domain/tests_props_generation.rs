//! Property tests for ballot generation and classification (pure domain).
//!
//! Properties tested:
//! - Exactly one category holds per ballot, and `invalidReason` is present iff not valid
//! - The classifier respects rule priority on arbitrary overlapping faces
//! - Valid ballots have one in-cell mark, a signature, no tear and no text
//! - Border marks never point off the grid
//! - Queues are reproducible per seed

use proptest::prelude::*;

use crate::domain::ballot::{Ballot, BallotCategory, BallotId, BorderDir, InvalidReason};
use crate::domain::generator::generate_queue_with_seed;
use crate::domain::grid::{COLS, ROWS};
use crate::domain::rules::{classify, has_identifying_text};
use crate::domain::{test_gens, test_prelude};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: the classifier picks the highest-priority defect present
    #[test]
    fn prop_classifier_follows_priority(face in test_gens::face()) {
        let expected = if face.marks.is_empty() {
            Some(InvalidReason::Blank)
        } else if face.marks.len() > 1 {
            Some(InvalidReason::MultipleMarks)
        } else if face.marks[0].is_border {
            Some(InvalidReason::BorderMark)
        } else if has_identifying_text(&face) {
            Some(InvalidReason::IdentifyingMarks)
        } else if !face.has_signature {
            Some(InvalidReason::NoSignature)
        } else if face.has_tear {
            Some(InvalidReason::Torn)
        } else {
            None
        };
        prop_assert_eq!(classify(&face).reason(), expected);
    }

    /// Property: sloppiness never changes the verdict
    #[test]
    fn prop_sloppy_is_cosmetic(face in test_gens::face()) {
        let mut flipped = face.clone();
        flipped.sloppy_mark = !face.sloppy_mark;
        prop_assert_eq!(classify(&face), classify(&flipped));
    }

    /// Property: ground truth fields agree with each other
    #[test]
    fn prop_truth_fields_consistent(face in test_gens::face(), id in 1u32..1000) {
        let ballot = Ballot::from_face(BallotId(id), face);
        prop_assert_eq!(ballot.is_valid(), ballot.invalid_reason().is_none());
        prop_assert_eq!(
            ballot.invalid_reason().is_some(),
            ballot.invalid_reason_display().is_some()
        );
    }

    /// Property: generated ballots satisfy their category's physical shape
    #[test]
    fn prop_generated_ballots_are_well_formed(
        seed in any::<u64>(),
        count in 0usize..40,
        weights in test_gens::weights(),
    ) {
        let queue = generate_queue_with_seed(count, seed, &weights).unwrap();
        prop_assert_eq!(queue.len(), count);

        for ballot in &queue {
            prop_assert!(weights.weight(ballot.category()) > 0);
            for mark in ballot.marks() {
                prop_assert!(mark.row < ROWS && mark.col < COLS);
                prop_assert!(mark.cell().is_playable());
                match mark.border_dir {
                    Some(BorderDir::Right) => prop_assert!(mark.col < COLS - 1),
                    Some(BorderDir::Bottom) => prop_assert!(mark.row < ROWS - 1),
                    None => prop_assert!(!mark.is_border),
                }
            }
            if ballot.category() == BallotCategory::Valid {
                let face = ballot.face();
                prop_assert_eq!(face.marks.len(), 1);
                prop_assert!(!face.marks[0].is_border);
                prop_assert!(face.has_signature);
                prop_assert!(!face.has_tear);
                prop_assert!(face.identifying_text.is_none());
            }
        }
    }

    /// Property: same seed, same queue
    #[test]
    fn prop_generation_is_reproducible(seed in any::<u64>(), count in 0usize..25) {
        let weights = Default::default();
        let a = generate_queue_with_seed(count, seed, &weights).unwrap();
        let b = generate_queue_with_seed(count, seed, &weights).unwrap();
        prop_assert_eq!(a, b);
    }
}
