//! RNG seed derivation utilities for deterministic queue generation.
//!
//! A single queue seed fans out into one seed for the category plan and one
//! seed per ballot, so ballot `i` depends only on (queue seed, `i`, category).

/// Derive the seed used to plan and shuffle ballot categories.
pub fn derive_plan_seed(queue_seed: u64) -> u64 {
    mix(queue_seed ^ 0x5EED_0F_CA7E_6021)
}

/// Derive the seed used to lay out the ballot at `index`.
///
/// # Arguments
///
/// * `queue_seed` - Base seed of the queue
/// * `index` - 0-based position in the queue
pub fn derive_ballot_seed(queue_seed: u64, index: usize) -> u64 {
    // Different offset from the plan seed so index 0 never collides with it
    mix(queue_seed
        .wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .wrapping_add(1))
}

/// SplitMix64 finaliser.
fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
