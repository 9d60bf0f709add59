//! Deterministic noise and hashing primitives.
//!
//! Every synthetic value in the pipeline is derived from these functions,
//! so regenerating a network for the same identifier reproduces it
//! bit-for-bit. All functions are pure and total.

/// Map a seed to a pseudo-random float in `[0, 1)`.
///
/// `frac(sin(seed * 9999) * 10000)` — stable on any IEEE-754 double
/// platform for a given seed.
pub fn noise(seed: f64) -> f64 {
    let x = (seed * 9999.0).sin() * 10000.0;
    x - x.floor()
}

/// Rolling polynomial string hash: `h = h * 31 + code_unit`, wrapped to
/// 32-bit signed, absolute value taken at the end.
///
/// The wrap-around semantics are part of the contract: generated snapshots
/// stay stable across releases only if this function never changes. Hashes
/// UTF-16 code units, so non-BMP characters contribute two units.
pub fn hash_string(s: &str) -> i64 {
    let mut h: i32 = 0;
    for unit in s.encode_utf16() {
        h = h.wrapping_mul(31).wrapping_add(unit as i32);
    }
    (h as i64).abs()
}

/// Weighted code-unit sum: `sum(code_unit(i) * (i + 1))`.
///
/// A second, distinct hash used as a tie-breaker offset so call sites
/// seeded from the same string do not collide with [`hash_string`].
pub fn seed_from_text(s: &str) -> i64 {
    s.encode_utf16()
        .enumerate()
        .map(|(i, unit)| unit as i64 * (i as i64 + 1))
        .sum()
}

/// Clamp `v` into `[lo, hi]`.
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}
