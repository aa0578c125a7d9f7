//! Random sources for dungeon generation
//!
//! Every random draw made by the generator goes through the [`RandomSource`]
//! trait so that callers can inject their own source. Two implementations
//! are provided:
//!
//! - [`SeededRng`]: ChaCha8 seeded from a string, reproducible across
//!   platforms. Identical seed strings always produce identical draws.
//! - [`SequenceRng`]: replays a fixed list of values, for tests.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// FNV-1a offset basis (64-bit)
const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
/// FNV-1a prime (64-bit)
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Hash a seed string into the 64-bit seed fed to ChaCha.
///
/// This is FNV-1a over the UTF-8 bytes. It must never change: saved seed
/// strings are expected to reproduce the same dungeon forever.
pub fn hash_seed(seed: &str) -> u64 {
    seed.bytes().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
    })
}

/// A source of uniformly distributed random numbers.
///
/// Only [`next_f64`](RandomSource::next_f64) is required; the integer
/// helpers are derived from it so that every implementation maps draws to
/// integers the same way.
pub trait RandomSource {
    /// Returns a value in `[0, 1)`
    fn next_f64(&mut self) -> f64;

    /// Returns an integer in `[min, max)`. Returns `min` if the range is empty.
    fn range(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        let span = (max as i64 - min as i64) as f64;
        let offset = (self.next_f64() * span).floor() as i64;
        (min as i64 + offset).min(max as i64 - 1) as i32
    }

    /// Returns an integer in `[min, max]` by rounding a scaled float.
    ///
    /// The two endpoints are half as likely as the interior values. Room
    /// sizes rely on this exact distribution.
    fn uneven_range(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        let span = (max as i64 - min as i64) as f64;
        (min as i64 + (self.next_f64() * span).round() as i64) as i32
    }

    /// Returns true with the given probability
    fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// An RNG call trace entry for debugging determinism divergences.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RngTraceEntry {
    /// Sequence number (0-indexed)
    pub seq: u64,
    /// Value returned by `next_f64`
    pub value: f64,
}

/// Seeded generator backed by ChaCha8
#[derive(Clone)]
pub struct SeededRng {
    rng: ChaCha8Rng,
    seed: String,
    /// Total number of draws (for tracing)
    call_count: u64,
    /// If true, record all draws into the trace log
    tracing: bool,
    trace: Vec<RngTraceEntry>,
}

impl core::fmt::Debug for SeededRng {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SeededRng")
            .field("seed", &self.seed)
            .field("call_count", &self.call_count)
            .field("tracing", &self.tracing)
            .finish()
    }
}

impl SeededRng {
    /// Create a generator from a seed string
    pub fn new(seed: impl Into<String>) -> Self {
        let seed = seed.into();
        Self {
            rng: ChaCha8Rng::seed_from_u64(hash_seed(&seed)),
            seed,
            call_count: 0,
            tracing: false,
            trace: Vec::new(),
        }
    }

    /// Create a generator with a random seed.
    ///
    /// The chosen seed is kept so the result can be reproduced later.
    pub fn from_entropy() -> Self {
        let seed: u64 = rand::random();
        Self::new(format!("{seed:016x}"))
    }

    /// Get the seed string used to create this RNG
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Total number of draws made so far
    pub fn call_count(&self) -> u64 {
        self.call_count
    }

    /// Start recording every draw
    pub fn enable_tracing(&mut self) {
        self.tracing = true;
        self.trace.clear();
    }

    /// Stop recording draws (the log is kept)
    pub fn disable_tracing(&mut self) {
        self.tracing = false;
    }

    /// Draws recorded since tracing was enabled
    pub fn trace(&self) -> &[RngTraceEntry] {
        &self.trace
    }
}

impl RandomSource for SeededRng {
    fn next_f64(&mut self) -> f64 {
        let value: f64 = self.rng.r#gen();
        if self.tracing {
            self.trace.push(RngTraceEntry {
                seq: self.call_count,
                value,
            });
        }
        self.call_count += 1;
        value
    }
}

impl Default for SeededRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// Replays a fixed list of values in `[0, 1)`, cycling when exhausted.
///
/// An empty sequence always yields `0.0`.
#[derive(Debug, Clone, Default)]
pub struct SequenceRng {
    values: Vec<f64>,
    pos: usize,
}

impl SequenceRng {
    /// Create a source replaying `values`. Values are clamped into `[0, 1)`.
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values
                .into_iter()
                .map(|v| v.clamp(0.0, 1.0 - f64::EPSILON))
                .collect(),
            pos: 0,
        }
    }

    /// Number of values handed out so far
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl RandomSource for SequenceRng {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.pos % self.values.len()];
        self.pos += 1;
        value
    }
}
