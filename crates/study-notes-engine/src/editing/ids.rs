//! Short block identity tokens.
//!
//! Tokens only key blocks in memory during one process run. Each one is a
//! session seed plus a multiple of a running counter, taken modulo the token
//! space. The multiplier is coprime to that space, so the first 36^7 tokens of
//! a run are pairwise distinct without any lookup.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Characters per token
pub const TOKEN_LEN: usize = 7;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// 36^7
const TOKEN_SPACE: u128 = 78_364_164_096;

/// Odd and not a multiple of three, hence coprime to 2^14 * 3^14
const STRIDE: u128 = 48_271_523_357;

static COUNTER: AtomicU64 = AtomicU64::new(0);

fn session_seed() -> u128 {
    static SEED: OnceLock<u128> = OnceLock::new();
    *SEED.get_or_init(|| {
        let mut hasher = DefaultHasher::new();
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
            .hash(&mut hasher);
        std::process::id().hash(&mut hasher);
        u128::from(hasher.finish()) % TOKEN_SPACE
    })
}

/// Produce the next token for this process
pub fn next_token() -> String {
    let n = u128::from(COUNTER.fetch_add(1, Ordering::Relaxed));
    encode((session_seed() + n * STRIDE) % TOKEN_SPACE)
}

fn encode(mut value: u128) -> String {
    let mut buf = [b'0'; TOKEN_LEN];
    for slot in buf.iter_mut().rev() {
        *slot = ALPHABET[(value % 36) as usize];
        value /= 36;
    }
    buf.iter().map(|&b| b as char).collect()
}
