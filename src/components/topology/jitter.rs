//! Decorative flicker derived from (id, time) so a frame is a pure function of its inputs.

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Flicker changes at most this often.
pub const FLICKER_PERIOD_MS: f64 = 250.0;

fn fnv1a(bytes: impl IntoIterator<Item = u8>, seed: u64) -> u64 {
	bytes.into_iter().fold(seed, |hash, b| (hash ^ b as u64).wrapping_mul(FNV_PRIME))
}

/// Uniform-ish value in `[0, 1)` for `(id, slot, elapsed_ms)`.
pub fn noise(id: &str, slot: u32, elapsed_ms: f64) -> f64 {
	let bucket = (elapsed_ms.max(0.0) / FLICKER_PERIOD_MS) as u64;
	let hash = fnv1a(id.bytes(), FNV_OFFSET);
	let hash = fnv1a(slot.to_le_bytes(), hash);
	let hash = fnv1a(bucket.to_le_bytes(), hash);
	(hash >> 11) as f64 / (1u64 << 53) as f64
}

/// Opacity for one signal bar: mostly lit, sometimes dimmed.
pub fn bar_opacity(id: &str, slot: u32, elapsed_ms: f64, lit: f64, dim: f64, threshold: f64) -> f64 {
	if noise(id, slot, elapsed_ms) > threshold { lit } else { dim }
}
