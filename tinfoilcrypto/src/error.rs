use std::error::Error;

#[derive(Debug)]
pub enum CryptoError {
	/// HMAC tag verification failed; the ciphertext must not be decrypted.
	AuthenticationFailed,
	/// The HMAC tag verified, but PKCS#7 unpadding rejected the decrypted plaintext.
	/// This should be impossible for honestly-produced ciphertext; it indicates a bug
	/// or a tag/ciphertext corruption that happened to still verify.
	BadPadding,
	/// Scrypt parameters (N, r, p) were out of range, or N was not a power of two.
	BadScryptParameters,
	/// A key, iv, or tag argument had the wrong length for the primitive it was used with.
	BadLength,
}

impl Error for CryptoError {}

impl std::fmt::Display for CryptoError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			CryptoError::AuthenticationFailed => write!(f, "authentication failed"),
			CryptoError::BadPadding => write!(f, "padding invalid after a verified tag"),
			CryptoError::BadScryptParameters => write!(f, "bad scrypt parameters"),
			CryptoError::BadLength => write!(f, "argument had unexpected length"),
		}
	}
}
