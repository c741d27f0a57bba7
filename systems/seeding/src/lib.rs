#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Reproducible seed derivation and seeded generators.
//!
//! Every random stream in the engine is built fresh from a tuple of
//! identifying values. The tuple is rendered as compact JSON, salted, hashed
//! with SHA-256, and the first four digest bytes become the seed. Nothing
//! depends on a process-local hasher, so the same tuple yields the same
//! stream on any platform and in any run.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Salt prefixed to every canonical payload.
pub const SEED_SALT: &str = "startup-survivor";

/// One primitive component of a seed tuple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedPart<'a> {
    /// Integer component, rendered in plain decimal.
    Int(i64),
    /// Text component, rendered as a JSON string with non-ASCII kept verbatim.
    Text(&'a str),
}

impl From<i64> for SeedPart<'_> {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for SeedPart<'_> {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl<'a> From<&'a str> for SeedPart<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl From<SeedPart<'_>> for Value {
    fn from(part: SeedPart<'_>) -> Self {
        match part {
            SeedPart::Int(value) => Value::from(value),
            SeedPart::Text(value) => Value::from(value),
        }
    }
}

/// Canonical payload hashed for `parts`: the salt, a bar, then a compact JSON array.
#[must_use]
pub fn canonical_payload(parts: &[SeedPart<'_>]) -> String {
    let array = Value::Array(parts.iter().copied().map(Value::from).collect());
    format!("{SEED_SALT}|{array}")
}

/// Derives a stable 32-bit seed from an ordered tuple of primitive values.
#[must_use]
pub fn stable_seed(parts: &[SeedPart<'_>]) -> u32 {
    let mut hasher = Sha256::new();
    hasher.update(canonical_payload(parts).as_bytes());
    finalize_seed(hasher)
}

/// Builds a generator seeded from `base_seed` followed by `parts`.
#[must_use]
pub fn rng_from(base_seed: i64, parts: &[SeedPart<'_>]) -> SeededRng {
    let mut tuple = Vec::with_capacity(parts.len() + 1);
    tuple.push(SeedPart::Int(base_seed));
    tuple.extend_from_slice(parts);
    SeededRng::from_seed_value(stable_seed(&tuple))
}

fn finalize_seed(hasher: Sha256) -> u32 {
    let digest = hasher.finalize();
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Deterministic generator handed to the sampling systems.
#[derive(Clone, Debug)]
pub struct SeededRng {
    seed: u32,
    inner: ChaCha8Rng,
}

impl SeededRng {
    /// Creates a generator from an already derived seed.
    #[must_use]
    pub fn from_seed_value(seed: u32) -> Self {
        Self {
            seed,
            inner: ChaCha8Rng::seed_from_u64(u64::from(seed)),
        }
    }

    /// Seed the generator was built from.
    #[must_use]
    pub const fn seed(&self) -> u32 {
        self.seed
    }

    /// Draws from `[0, 1)`.
    pub fn chance(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Draws `lo + (hi - lo) * u` for `u` in `[0, 1)`.
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.chance()
    }
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}
