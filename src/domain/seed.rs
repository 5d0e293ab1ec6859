//! Deterministic seeding from symbol strings.
//!
//! Synthetic prices and the dummy fundamental/sentiment generators must
//! produce identical output for the same symbol on every run and platform.
//! `std::hash` makes no cross-version stability promise, so the seed comes
//! from a fixed FNV-1a hash fed into a `ChaCha8Rng`.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a over the input bytes.
pub fn stable_hash(input: &str) -> u64 {
    let mut hash = FNV_OFFSET;
    for byte in input.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// A reproducible RNG seeded from `stable_hash(input)`.
pub fn seeded_rng(input: &str) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(stable_hash(input))
}
