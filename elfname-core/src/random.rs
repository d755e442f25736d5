//! Randomness sources.
//!
//! Seeded generation hashes the seed string with FNV-1a and drives a
//! mulberry32 stream, so the same seed reproduces the same output on every
//! platform. Unseeded generation uses the thread-local platform generator.

use rand::RngCore;
use rand::rngs::ThreadRng;

const FNV_OFFSET: u32 = 0x811C_9DC5;
const FNV_PRIME: u32 = 0x0100_0193;

/// FNV-1a 32-bit hash of a string.
pub fn hash_str(s: &str) -> u32 {
	s.bytes().fold(FNV_OFFSET, |hash, byte| (hash ^ byte as u32).wrapping_mul(FNV_PRIME))
}

/// Maps a string to a reproducible roll in `[0, 1)`.
pub fn unit_hash(s: &str) -> f64 {
	hash_str(s) as f64 / (u32::MAX as f64 + 1.0)
}

/// Mulberry32 generator: one `u32` of state, full 2^32 period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mulberry32 {
	state: u32,
}

impl Mulberry32 {
	pub fn new(seed: u32) -> Self {
		Self { state: seed }
	}

	/// Seeds the generator from the FNV-1a hash of `seed`.
	pub fn from_seed_str(seed: &str) -> Self {
		Self::new(hash_str(seed))
	}
}

impl RngCore for Mulberry32 {
	fn next_u32(&mut self) -> u32 {
		self.state = self.state.wrapping_add(0x6D2B_79F5);
		let mut t = self.state;
		t = (t ^ (t >> 15)).wrapping_mul(t | 1);
		t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
		t ^ (t >> 14)
	}

	fn next_u64(&mut self) -> u64 {
		let low = self.next_u32() as u64;
		let high = self.next_u32() as u64;
		(high << 32) | low
	}

	fn fill_bytes(&mut self, dest: &mut [u8]) {
		for chunk in dest.chunks_mut(4) {
			let bytes = self.next_u32().to_le_bytes();
			chunk.copy_from_slice(&bytes[..chunk.len()]);
		}
	}
}

/// Random source used by one generation request.
pub enum NameRng {
	Seeded(Mulberry32),
	Platform(ThreadRng),
}

impl NameRng {
	/// Seeded stream when `seed` is given, platform randomness otherwise.
	pub fn for_seed(seed: Option<&str>) -> Self {
		match seed {
			Some(s) => NameRng::Seeded(Mulberry32::from_seed_str(s)),
			None => NameRng::Platform(rand::rng()),
		}
	}
}

impl RngCore for NameRng {
	fn next_u32(&mut self) -> u32 {
		match self {
			NameRng::Seeded(rng) => rng.next_u32(),
			NameRng::Platform(rng) => rng.next_u32(),
		}
	}

	fn next_u64(&mut self) -> u64 {
		match self {
			NameRng::Seeded(rng) => rng.next_u64(),
			NameRng::Platform(rng) => rng.next_u64(),
		}
	}

	fn fill_bytes(&mut self, dest: &mut [u8]) {
		match self {
			NameRng::Seeded(rng) => rng.fill_bytes(dest),
			NameRng::Platform(rng) => rng.fill_bytes(dest),
		}
	}
}

/// Session key for a seed: the seed without its last `-suffix`.
///
/// `"test-1"` and `"test-2"` share the family `"test"`; unseeded requests
/// share `"unseeded"`.
pub fn seed_family(seed: Option<&str>) -> String {
	match seed {
		None => "unseeded".to_owned(),
		Some(s) => match s.rsplit_once('-') {
			Some((prefix, _)) if !prefix.is_empty() => prefix.to_owned(),
			_ => s.to_owned(),
		},
	}
}
