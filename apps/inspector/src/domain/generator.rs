//! Deterministic ballot queue generation.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::config::game::CategoryWeights;
use crate::domain::ballot::{
    Ballot, BallotCategory, BallotFace, BallotId, IdentifyingPos, InvalidReason, Mark,
    TearPosition,
};
use crate::domain::grid::{border_positions, playable_cells, Cell};
use crate::domain::seed_derivation::{derive_ballot_seed, derive_plan_seed};
use crate::errors::domain::{DomainError, ValidationKind};

/// Chance that a ballot with an in-cell mark is drawn with an unsteady hand.
const SLOPPY_MARK_PROBABILITY: f64 = 0.5;

/// Marks placed on a multiple-marks ballot.
const MULTIPLE_MARKS_MIN: usize = 2;
const MULTIPLE_MARKS_MAX: usize = 4;

/// Text a voter might leave behind.
const IDENTIFYING_TEXTS: [&str; 10] = [
    "Ram B. Thapa",
    "Sita Sharma",
    "K. Adhikari",
    "~ Laxmi ~",
    "Bimal Shrestha",
    "Sunita R.",
    "H.B. Karki",
    "Voter #4471",
    "Manita T.",
    "Nabin was here",
];

/// Header band above the grid: (top range, left range), in percent.
const HEADER_BAND: ((u8, u8), (u8, u8)) = ((3, 14), (8, 70));
/// Signature band below the grid, right of the officer's line label.
const FOOTER_BAND: ((u8, u8), (u8, u8)) = ((89, 95), (55, 80));

/// Generate a queue of `count` ballots from OS entropy.
pub fn generate_queue(count: usize, weights: &CategoryWeights) -> Result<Vec<Ballot>, DomainError> {
    let seed: u64 = rand::random();
    generate_queue_with_seed(count, seed, weights)
}

/// Generate a queue of `count` ballots deterministically from `seed`.
///
/// When `count` is at least the number of enabled categories, every enabled
/// category appears at least once. Remaining slots are drawn by weight and the
/// whole plan is shuffled.
pub fn generate_queue_with_seed(
    count: usize,
    seed: u64,
    weights: &CategoryWeights,
) -> Result<Vec<Ballot>, DomainError> {
    let plan = plan_categories(count, seed, weights)?;

    let queue: Vec<Ballot> = plan
        .into_iter()
        .enumerate()
        .map(|(index, category)| {
            let mut rng = ChaCha8Rng::seed_from_u64(derive_ballot_seed(seed, index));
            let id = BallotId(index as u32 + 1);
            Ballot::from_face(id, build_face(category, &mut rng))
        })
        .collect();

    debug!(seed, count = queue.len(), "generated ballot queue");
    Ok(queue)
}

/// Choose the category of every slot in the queue.
pub fn plan_categories(
    count: usize,
    seed: u64,
    weights: &CategoryWeights,
) -> Result<Vec<BallotCategory>, DomainError> {
    let enabled = weights.enabled();
    if enabled.is_empty() {
        return Err(DomainError::config(
            "at least one ballot category must have a non-zero weight",
        ));
    }

    let mut rng = ChaCha8Rng::seed_from_u64(derive_plan_seed(seed));
    let mut plan = Vec::with_capacity(count);

    if count >= enabled.len() {
        plan.extend(enabled.iter().copied());
    }
    while plan.len() < count {
        plan.push(pick_weighted(weights, &mut rng)?);
    }
    plan.shuffle(&mut rng);
    Ok(plan)
}

fn pick_weighted(weights: &CategoryWeights, rng: &mut impl Rng) -> Result<BallotCategory, DomainError> {
    let total = weights.total();
    if total == 0 {
        return Err(DomainError::config(
            "at least one ballot category must have a non-zero weight",
        ));
    }
    let mut roll = rng.random_range(0..total);
    for category in BallotCategory::ALL {
        let weight = weights.weight(category);
        if roll < weight {
            return Ok(category);
        }
        roll -= weight;
    }
    Err(DomainError::validation(
        ValidationKind::InvalidGeneration,
        "weighted roll fell outside the category table",
    ))
}

/// Lay out the physical face for one category.
fn build_face(category: BallotCategory, rng: &mut impl Rng) -> BallotFace {
    let mut face = match category {
        BallotCategory::Valid => BallotFace::single_mark(random_cell(rng)),
        BallotCategory::Invalid(InvalidReason::Blank) => BallotFace {
            marks: Vec::new(),
            ..BallotFace::single_mark(Cell::new(0, 0))
        },
        BallotCategory::Invalid(InvalidReason::MultipleMarks) => {
            let count = rng.random_range(MULTIPLE_MARKS_MIN..=MULTIPLE_MARKS_MAX);
            let mut cells = playable_cells();
            cells.shuffle(rng);
            BallotFace {
                marks: cells.into_iter().take(count).map(Mark::inside).collect(),
                ..BallotFace::single_mark(Cell::new(0, 0))
            }
        }
        BallotCategory::Invalid(InvalidReason::BorderMark) => {
            let positions = border_positions();
            let mark = match positions.choose(rng) {
                Some(&(cell, dir)) => Mark::straddling(cell, dir),
                // Unreachable: the grid always has interior borders.
                None => Mark::inside(random_cell(rng)),
            };
            BallotFace {
                marks: vec![mark],
                ..BallotFace::single_mark(Cell::new(0, 0))
            }
        }
        BallotCategory::Invalid(InvalidReason::IdentifyingMarks) => {
            let mut face = BallotFace::single_mark(random_cell(rng));
            let text = IDENTIFYING_TEXTS
                .choose(rng)
                .copied()
                .unwrap_or(IDENTIFYING_TEXTS[0]);
            face.identifying_text = Some(text.to_string());
            face.identifying_pos = Some(random_identifying_pos(rng));
            face
        }
        BallotCategory::Invalid(InvalidReason::NoSignature) => BallotFace {
            has_signature: false,
            ..BallotFace::single_mark(random_cell(rng))
        },
        BallotCategory::Invalid(InvalidReason::Torn) => {
            let position = TearPosition::ALL
                .choose(rng)
                .copied()
                .unwrap_or(TearPosition::TopRight);
            BallotFace {
                has_tear: true,
                tear_position: Some(position),
                ..BallotFace::single_mark(random_cell(rng))
            }
        }
    };

    let has_inside_mark = face.marks.iter().any(|m| !m.is_border);
    face.sloppy_mark = has_inside_mark && rng.random_bool(SLOPPY_MARK_PROBABILITY);
    face
}

fn random_cell(rng: &mut impl Rng) -> Cell {
    let cells = playable_cells();
    cells.choose(rng).copied().unwrap_or(Cell::new(0, 0))
}

/// Somewhere in the header or signature band, never over the symbol grid.
fn random_identifying_pos(rng: &mut impl Rng) -> IdentifyingPos {
    let ((top_lo, top_hi), (left_lo, left_hi)) = if rng.random_bool(0.5) {
        HEADER_BAND
    } else {
        FOOTER_BAND
    };
    IdentifyingPos {
        top_pct: rng.random_range(top_lo..=top_hi),
        left_pct: rng.random_range(left_lo..=left_hi),
    }
}
