use crate::error::CryptoError;

/// The Scrypt cost parameters, stored as the literal `N` rather than its exponent.
///
/// The wire format (see `tinfoildb`'s `tinfoil_parameters` table) stores `N` literally;
/// this type converts to the exponent form the `scrypt` crate's `Params` constructor
/// expects, the same conversion the prior-art crate's `FileKeySuite::derive` performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScryptParams {
	pub n: u64,
	pub r: u32,
	pub p: u32,
}

impl ScryptParams {
	pub fn new(n: u64, r: u32, p: u32) -> Result<ScryptParams, CryptoError> {
		if !n.is_power_of_two() || n < 2 {
			return Err(CryptoError::BadScryptParameters);
		}

		Ok(ScryptParams { n, r, p })
	}

	fn log_n(&self) -> Result<u8, CryptoError> {
		u8::try_from(self.n.trailing_zeros()).map_err(|_| CryptoError::BadScryptParameters)
	}
}

/// Derives `output_len` bytes of key material from `password` and `salt` using Scrypt.
///
/// `output_len` is typically `aes_key_size + hmac_key_size`; the caller is responsible
/// for splitting the derived material into the AES and HMAC keys.
pub fn derive(password: &[u8], salt: &[u8], params: ScryptParams, output_len: usize) -> Result<Vec<u8>, CryptoError> {
	let log_n = params.log_n()?;
	let scrypt_params = scrypt::Params::new(log_n, params.r, params.p, output_len).map_err(|_| CryptoError::BadScryptParameters)?;

	let mut output = vec![0u8; output_len];
	scrypt::scrypt(password, salt, &scrypt_params, &mut output).map_err(|_| CryptoError::BadScryptParameters)?;

	Ok(output)
}

#[cfg(test)]
mod tests {
	use super::{derive, ScryptParams};

	// Small but valid parameters, kept tiny so the test suite stays fast.
	fn test_params() -> ScryptParams {
		ScryptParams::new(1 << 10, 8, 1).unwrap()
	}

	#[test]
	fn rejects_non_power_of_two_n() {
		assert!(ScryptParams::new(100, 8, 1).is_err());
		assert!(ScryptParams::new(0, 8, 1).is_err());
		assert!(ScryptParams::new(1, 8, 1).is_err());
	}

	#[test]
	fn accepts_power_of_two_n() {
		assert!(ScryptParams::new(2, 8, 1).is_ok());
		assert!(ScryptParams::new(1 << 18, 8, 1).is_ok());
	}

	#[test]
	fn deterministic_for_same_inputs() {
		let params = test_params();
		let a = derive(b"hunter2", b"salt1234salt5678", params, 96).unwrap();
		let b = derive(b"hunter2", b"salt1234salt5678", params, 96).unwrap();
		assert_eq!(a, b);
	}

	#[test]
	fn differs_for_different_passwords() {
		let params = test_params();
		let a = derive(b"hunter2", b"salt1234salt5678", params, 96).unwrap();
		let b = derive(b"Hunter2", b"salt1234salt5678", params, 96).unwrap();
		assert_ne!(a, b);
	}

	#[test]
	fn differs_for_different_salts() {
		let params = test_params();
		let a = derive(b"hunter2", b"salt1234salt5678", params, 96).unwrap();
		let b = derive(b"hunter2", b"saltsaltsaltsalt", params, 96).unwrap();
		assert_ne!(a, b);
	}

	#[test]
	fn output_length_matches_request() {
		let params = test_params();
		assert_eq!(derive(b"x", b"salt1234salt5678", params, 32).unwrap().len(), 32);
		assert_eq!(derive(b"x", b"salt1234salt5678", params, 96).unwrap().len(), 96);
	}
}
