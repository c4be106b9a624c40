use rand::{rngs::OsRng, RngCore};

/// Returns `n` cryptographically secure random bytes from the OS CSPRNG.
pub fn random_bytes(n: usize) -> Vec<u8> {
	let mut buf = vec![0u8; n];
	OsRng.fill_bytes(&mut buf);
	buf
}

/// Returns a fixed-size array of cryptographically secure random bytes.
pub fn random_array<const N: usize>() -> [u8; N] {
	let mut buf = [0u8; N];
	OsRng.fill_bytes(&mut buf);
	buf
}

#[cfg(test)]
mod tests {
	use super::{random_array, random_bytes};

	#[test]
	fn length_matches_request() {
		assert_eq!(random_bytes(0).len(), 0);
		assert_eq!(random_bytes(16).len(), 16);
		assert_eq!(random_bytes(64).len(), 64);
	}

	#[test]
	fn not_all_zero() {
		// Vanishingly unlikely for a correct CSPRNG to produce an all-zero buffer.
		let a: [u8; 32] = random_array();
		assert_ne!(a, [0u8; 32]);
	}

	#[test]
	fn distinct_calls_differ() {
		assert_ne!(random_bytes(32), random_bytes(32));
	}
}
