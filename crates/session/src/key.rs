use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use getrandom::getrandom;
use std::sync::atomic::{AtomicU64, Ordering};

static FALLBACK_COUNTER: AtomicU64 = AtomicU64::new(1);

fn random_u64_best_effort() -> Option<u64> {
    let mut bytes = [0u8; 8];
    getrandom(&mut bytes).ok()?;
    Some(u64::from_be_bytes(bytes))
}

/// A new whitespace-free session key (11 chars of URL-safe base64).
///
/// Falls back to a process-local counter if the OS has no randomness to give.
pub fn fresh_session_key() -> String {
    let id = random_u64_best_effort()
        .unwrap_or_else(|| FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed));
    URL_SAFE_NO_PAD.encode(id.to_be_bytes())
}
