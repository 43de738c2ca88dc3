//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Seeding (page-load time)
//! - Frame scheduling and viewport tracking (`web`)
//! - Form binding and navigation (`web`)

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Seed for a fresh session when settings don't pin one
#[cfg(target_arch = "wasm32")]
pub fn entropy_seed() -> u64 {
    js_sys::Date::now() as u64
}

/// Seed for a fresh session when settings don't pin one
#[cfg(not(target_arch = "wasm32"))]
pub fn entropy_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Derive the gate's seed so it doesn't share a stream with the field
pub fn gate_seed(seed: u64) -> u64 {
    seed ^ 0x9e37_79b9_7f4a_7c15
}
