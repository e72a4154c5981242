//! Inspector that applies the full rulebook. Always right, never quick.

use std::sync::Mutex;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::trait_def::{Inspector, InspectorError, Verdict};
use crate::domain::ballot::BallotFace;
use crate::domain::ledger::Choice;
use crate::domain::rules::classify;

const BASE_MS: u64 = 1_800;
const PER_MARK_MS: u64 = 250;
const JITTER_MS: u64 = 700;

pub struct RulebookInspector {
    rng: Mutex<StdRng>,
}

impl RulebookInspector {
    pub const NAME: &'static str = "RulebookInspector";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl Inspector for RulebookInspector {
    fn inspect(&self, face: &BallotFace, _time_left: u32) -> Result<Verdict, InspectorError> {
        let choice = match classify(face).reason() {
            None => Choice::Valid,
            Some(_) => Choice::Invalid,
        };

        let jitter = self
            .rng
            .lock()
            .map_err(|e| InspectorError::Internal(format!("RNG lock poisoned: {e}")))?
            .random_range(0..=JITTER_MS);
        let think = BASE_MS + PER_MARK_MS * face.marks.len() as u64 + jitter;

        Ok(Verdict {
            choice,
            think_time: Duration::from_millis(think),
        })
    }
}
