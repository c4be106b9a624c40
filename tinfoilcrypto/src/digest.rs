use sha2::{Digest, Sha512};

/// Calculates the SHA-512 digest of `data`.
pub fn sha512(data: &[u8]) -> [u8; 64] {
	let mut hasher = Sha512::new();
	hasher.update(data);
	hasher.finalize().into()
}

#[cfg(test)]
mod tests {
	use super::sha512;

	#[test]
	fn empty_input() {
		let digest = sha512(b"");
		assert_eq!(digest.len(), 64);
		// SHA-512("") per FIPS 180-4 test vectors.
		assert_eq!(
			data_encoding::HEXLOWER.encode(&digest),
			"cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3"
		);
	}

	#[test]
	fn deterministic() {
		assert_eq!(sha512(b"tinfoil"), sha512(b"tinfoil"));
		assert_ne!(sha512(b"tinfoil"), sha512(b"tinfoiI"));
	}
}
