//! Nonce generation for token passports.
//!
//! Every passport carries a pseudo-random alphanumeric nonce between 6 and 64
//! characters long. Together with the timestamp it lets the remote service
//! reject replays of a captured request.
//!
//! The random source is injected through [`RandomSource`] so tests can script
//! exact lengths and characters.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Shortest nonce that will be generated.
pub const NONCE_MIN_LEN: usize = 6;

/// Longest nonce that will be generated.
pub const NONCE_MAX_LEN: usize = 64;

/// Characters a nonce is drawn from, indexed in this order.
pub const NONCE_ALPHABET: &[u8; 62] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A source of uniformly distributed integers.
pub trait RandomSource: Send + Sync {
    /// Return an integer in the closed range `[low, high]`.
    fn random_int(&self, low: usize, high: usize) -> usize;
}

/// Random source backed by the thread-local generator.
///
/// This is a general-purpose generator, not a cryptographically secure one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn random_int(&self, low: usize, high: usize) -> usize {
        if low >= high {
            return low;
        }
        rand::thread_rng().gen_range(low..=high)
    }
}

/// Reproducible random source seeded from a fixed value.
///
/// Two instances created with the same seed yield the same sequence.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    /// Create a new seeded source.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn random_int(&self, low: usize, high: usize) -> usize {
        if low >= high {
            return low;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(low..=high)
    }
}

/// Trait for providing nonces for token passports.
pub trait NonceProvider: Send + Sync {
    /// Generate a fresh nonce.
    fn next_nonce(&self) -> String;
}

/// Generates alphanumeric nonces with a uniformly chosen length.
#[derive(Debug, Clone, Default)]
pub struct AlphanumericNonce<R = ThreadRandom> {
    random: R,
}

impl AlphanumericNonce<ThreadRandom> {
    /// Create a nonce generator using the thread-local random source.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: RandomSource> AlphanumericNonce<R> {
    /// Create a nonce generator over a custom random source.
    pub fn with_source(random: R) -> Self {
        Self { random }
    }
}

impl<R: RandomSource> NonceProvider for AlphanumericNonce<R> {
    fn next_nonce(&self) -> String {
        let len = self.random.random_int(NONCE_MIN_LEN, NONCE_MAX_LEN);
        (0..len)
            .map(|_| {
                let index = self.random.random_int(0, NONCE_ALPHABET.len() - 1);
                char::from(NONCE_ALPHABET[index])
            })
            .collect()
    }
}
