//! Inspector that only counts marks. Fast, and fooled by anything subtler.

use std::sync::Mutex;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::trait_def::{Inspector, InspectorError, Verdict};
use crate::domain::ballot::BallotFace;
use crate::domain::ledger::Choice;

/// Seconds left below which the glance gets even shorter.
const PANIC_THRESHOLD: u32 = 15;

pub struct HastyInspector {
    rng: Mutex<StdRng>,
}

impl HastyInspector {
    pub const NAME: &'static str = "HastyInspector";
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

impl Inspector for HastyInspector {
    fn inspect(&self, face: &BallotFace, time_left: u32) -> Result<Verdict, InspectorError> {
        // Blank and multiple-marked ballots are the only defects caught at a glance.
        let choice = if face.marks.len() == 1 {
            Choice::Valid
        } else {
            Choice::Invalid
        };

        let range = if time_left < PANIC_THRESHOLD {
            250..=500
        } else {
            500..=1_000
        };
        let think = self
            .rng
            .lock()
            .map_err(|e| InspectorError::Internal(format!("RNG lock poisoned: {e}")))?
            .random_range(range);

        Ok(Verdict {
            choice,
            think_time: Duration::from_millis(think),
        })
    }
}
