//! Coin-flip inspector. Baseline for balancing and a template for other bots.

use std::ops::Range;
use std::sync::Mutex;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::trait_def::{Inspector, InspectorError, Verdict};
use crate::domain::ballot::BallotFace;
use crate::domain::ledger::Choice;

const THINK_MS: Range<u64> = 600..2_500;

/// Inspector that ignores the ballot and stamps at random.
///
/// Interior RNG is behind a `Mutex` since [`Inspector::inspect`] takes `&self`.
pub struct RandomInspector {
    rng: Mutex<StdRng>,
}

impl RandomInspector {
    pub const NAME: &'static str = "RandomInspector";
    pub const VERSION: &'static str = "1.0.0";

    /// `Some(seed)` for reproducible runs, `None` for OS entropy.
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

impl Inspector for RandomInspector {
    fn inspect(&self, _face: &BallotFace, _time_left: u32) -> Result<Verdict, InspectorError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| InspectorError::Internal(format!("RNG lock poisoned: {e}")))?;

        let choice = if rng.random_bool(0.5) {
            Choice::Valid
        } else {
            Choice::Invalid
        };
        Ok(Verdict {
            choice,
            think_time: Duration::from_millis(rng.random_range(THINK_MS)),
        })
    }
}
