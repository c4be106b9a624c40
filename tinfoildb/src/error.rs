use tinfoilcrypto::CryptoError;

/// Recoverable-but-exceptional and fatal failure modes of the store layer.
///
/// `WrongPassword`, `KeyExists`, and `NotFound` are *not* represented here: per the
/// store's contract they are ordinary outcomes (`bool`/`Option` return values), not
/// errors a caller has to unwind through. Precondition violations (double-initialize,
/// operating on a locked/uninitialized store, a schema version mismatch) are likewise
/// not represented here; they're programmer errors and surface as panics, never as a
/// value a correct caller would need to match on.
#[derive(Debug)]
pub enum StoreError {
	/// The database file or its containing directory could not be read or written.
	Io(std::io::Error),
	/// The underlying SQLite database returned an error.
	Sqlite(rusqlite::Error),
	/// A cryptographic operation failed. For decryption, this can only happen here if
	/// the PKCS#7 padding was invalid *after* a verified HMAC tag (see `StoreError`'s
	/// sibling `Tampered`, which covers a failed tag instead).
	Crypto(CryptoError),
	/// HMAC verification failed for a stored entry. The database is no longer
	/// trustworthy; this must always reach the caller and must never be silently
	/// retried or dropped.
	Tampered,
}

impl From<std::io::Error> for StoreError {
	fn from(error: std::io::Error) -> StoreError {
		StoreError::Io(error)
	}
}

impl From<rusqlite::Error> for StoreError {
	fn from(error: rusqlite::Error) -> StoreError {
		StoreError::Sqlite(error)
	}
}

impl From<CryptoError> for StoreError {
	fn from(error: CryptoError) -> StoreError {
		StoreError::Crypto(error)
	}
}

impl std::error::Error for StoreError {}

impl std::fmt::Display for StoreError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			StoreError::Io(e) => write!(f, "IO error: {e}"),
			StoreError::Sqlite(e) => write!(f, "database error: {e}"),
			StoreError::Crypto(e) => write!(f, "cryptography error: {e}"),
			StoreError::Tampered => write!(f, "entry failed authentication; the database has been tampered with"),
		}
	}
}
