// Proptest generators for domain types.
// Faces are built from arbitrary combinations of defects so the classifier
// sees overlapping cases, not only what the generator would produce.

use proptest::prelude::*;

use crate::config::game::CategoryWeights;
use crate::domain::ballot::{BallotFace, BorderDir, Mark, TearPosition};
use crate::domain::grid::{playable_cells, Cell};
use crate::domain::ledger::Choice;
use crate::domain::state::SessionEvent;

pub fn choice() -> impl Strategy<Value = Choice> {
    prop_oneof![Just(Choice::Valid), Just(Choice::Invalid)]
}

pub fn cell() -> impl Strategy<Value = Cell> {
    let cells = playable_cells();
    (0..cells.len()).prop_map(move |i| cells[i])
}

pub fn mark() -> impl Strategy<Value = Mark> {
    (
        cell(),
        prop_oneof![
            Just(None),
            Just(Some(BorderDir::Right)),
            Just(Some(BorderDir::Bottom)),
        ],
    )
        .prop_map(|(cell, dir)| match dir {
            Some(dir) => Mark::straddling(cell, dir),
            None => Mark::inside(cell),
        })
}

pub fn tear_position() -> impl Strategy<Value = TearPosition> {
    prop_oneof![
        Just(TearPosition::TopLeft),
        Just(TearPosition::TopRight),
        Just(TearPosition::BottomRight),
    ]
}

/// Any face, defects freely combined.
pub fn face() -> impl Strategy<Value = BallotFace> {
    (
        prop::collection::vec(mark(), 0..4),
        any::<bool>(),
        prop::option::of(tear_position()),
        prop::option::of("[ a-zA-Z]{0,12}"),
        any::<bool>(),
    )
        .prop_map(|(marks, sloppy_mark, tear, text, has_signature)| BallotFace {
            marks,
            sloppy_mark,
            has_tear: tear.is_some(),
            tear_position: tear,
            identifying_text: text,
            identifying_pos: None,
            has_signature,
        })
}

/// Weights with at least one enabled category.
pub fn weights() -> impl Strategy<Value = CategoryWeights> {
    (prop::array::uniform7(0u32..20), 0usize..7).prop_map(|(w, forced)| {
        let mut weights = CategoryWeights {
            valid: w[0],
            multiple_marks: w[1],
            blank: w[2],
            border_mark: w[3],
            identifying_marks: w[4],
            no_signature: w[5],
            torn: w[6],
        };
        if weights.total() == 0 {
            match forced {
                0 => weights.valid = 1,
                1 => weights.multiple_marks = 1,
                2 => weights.blank = 1,
                3 => weights.border_mark = 1,
                4 => weights.identifying_marks = 1,
                5 => weights.no_signature = 1,
                _ => weights.torn = 1,
            }
        }
        weights
    })
}

/// Events a running session can receive after it has started.
pub fn play_event() -> impl Strategy<Value = SessionEvent> {
    prop_oneof![
        3 => choice().prop_map(SessionEvent::Decide),
        4 => Just(SessionEvent::Tick),
        3 => Just(SessionEvent::Advance),
        1 => Just(SessionEvent::Settle),
    ]
}
