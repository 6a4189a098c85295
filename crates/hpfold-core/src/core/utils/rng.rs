use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

pub type SimRng = ChaCha12Rng;

const STREAM_DERIVATION_PRIME: u64 = 0x9E37_79B9_7F4A_7C15;

/// Independent random streams derived from a single run seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Sequence = 1,
    Evolution = 2,
    Lab = 3,
}

pub fn create_rng(seed: u64) -> SimRng {
    SimRng::seed_from_u64(seed)
}

pub fn derive_rng(seed: u64, stream: Stream) -> SimRng {
    SimRng::seed_from_u64(seed.wrapping_add((stream as u64).wrapping_mul(STREAM_DERIVATION_PRIME)))
}

/// Draws one child seed per work item, in order, so that parallel and sequential
/// execution consume the master stream identically.
pub fn child_seeds(rng: &mut impl Rng, count: usize) -> Vec<u64> {
    (0..count).map(|_| rng.r#gen::<u64>()).collect()
}

pub fn random_seed() -> u64 {
    rand::thread_rng().r#gen()
}
