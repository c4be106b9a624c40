//! The tinfoil storage engine: a password-based, encrypted key-value store.
//!
//! A `Store` wraps a single SQLite file holding two tables — an immutable
//! `tinfoil_parameters` row written once at `initialize` time, and zero or more
//! `tinfoil_entries` rows created by `put` and destroyed by `delete`. Every value is
//! sealed with `tinfoilcrypto`'s encrypt-then-MAC envelope under a pair of master keys
//! derived from the caller's password via Scrypt; every key is stored only as its
//! SHA-512 hash. See `params` for the on-disk schema and `error` for the failure modes
//! a caller needs to branch on.

mod error;
mod params;

pub use error::StoreError;
pub use params::{DEFAULT_AES_KEY_SIZE, DEFAULT_HMAC_KEY_SIZE, DEFAULT_SCRYPT_N, DEFAULT_SCRYPT_P, DEFAULT_SCRYPT_R};

use params::Parameters;
use rusqlite::{params as sql_params, Connection, OptionalExtension};
use std::path::Path;
use tinfoilcrypto::{CryptoError, MasterKeys, ScryptParams};

/// An opened tinfoil database. See the module docs for the on-disk shape, and the
/// individual methods below for the lifecycle (`Opened` → `Initialized` → `Unlocked`).
///
/// `Store` is `Send` but not `Sync`: a caller wanting concurrent readers must serialize
/// access itself (§5 of the design: the engine performs no internal locking).
pub struct Store {
	conn: Connection,
	unlocked: Option<UnlockedState>,
}

struct UnlockedState {
	keys: MasterKeys,
	params: Parameters,
}

impl Store {
	/// Opens or creates the database file at `path`. Does not derive any keys and does
	/// not require the file to already be initialized; callers discover that with
	/// [`Store::is_initialized`].
	pub fn open(path: impl AsRef<Path>) -> Result<Store, StoreError> {
		let conn = Connection::open(path)?;

		Ok(Store { conn, unlocked: None })
	}

	/// True iff both `tinfoil_parameters` and `tinfoil_entries` exist in the schema.
	pub fn is_initialized(&self) -> Result<bool, StoreError> {
		params::is_initialized(&self.conn)
	}

	/// Creates the schema and writes the single `tinfoil_parameters` row.
	///
	/// # Panics
	///
	/// Panics if the database is already initialized; double-initialization is a
	/// programmer error, not a condition a correct caller needs to recover from.
	pub fn initialize(&mut self, password: &str, kdf: ScryptParams, aes_key_size: usize, hmac_key_size: usize) -> Result<(), StoreError> {
		assert!(!self.is_initialized()?, "tinfoildb: database is already initialized");

		let scrypt_salt = tinfoilcrypto::random::random_bytes(params::SCRYPT_SALT_SIZE);
		let keys = tinfoilcrypto::derive_master_keys(password.as_bytes(), &scrypt_salt, kdf, aes_key_size, hmac_key_size)?;
		let opcode = tinfoilcrypto::seal(&keys, params::OPCODE_PLAINTEXT)?;

		params::create_schema(&self.conn)?;
		params::insert(
			&self.conn,
			params::SCHEMA_VERSION,
			kdf,
			&scrypt_salt,
			aes_key_size,
			hmac_key_size,
			&opcode.iv,
			&opcode.ciphertext,
			&opcode.tag,
		)?;

		// Deliberately not cached: initialize and unlock stay symmetric, and the caller
		// must re-enter the password through `unlock` before the store is usable.
		Ok(())
	}

	/// Derives the master keys from `password` and the stored Scrypt parameters, then
	/// verifies them against the opcode. Returns `true` and unlocks the store iff the
	/// password was correct; on `false` the store remains locked.
	///
	/// # Panics
	///
	/// Panics if the database is not yet initialized, if the store is already unlocked,
	/// or if the stored schema version is not one this crate understands — all three
	/// are programmer errors or a corrupted installation, not conditions `unlock`'s
	/// `bool` return is meant to communicate.
	pub fn unlock(&mut self, password: &str) -> Result<bool, StoreError> {
		assert!(self.unlocked.is_none(), "tinfoildb: store is already unlocked");
		assert!(self.is_initialized()?, "tinfoildb: database is not yet initialized");

		let parameters = params::load(&self.conn)?.expect("tinfoildb: tinfoil_parameters row is missing");
		assert_eq!(
			parameters.version,
			params::SCHEMA_VERSION,
			"tinfoildb: unsupported database version {} (expected {})",
			parameters.version,
			params::SCHEMA_VERSION
		);

		let keys = tinfoilcrypto::derive_master_keys(
			password.as_bytes(),
			&parameters.scrypt_salt,
			parameters.scrypt_params,
			parameters.aes_key_size,
			parameters.hmac_key_size,
		)?;

		let decrypted = match tinfoilcrypto::open(&keys, &parameters.opcode_iv, &parameters.opcode_ciphertext, &parameters.opcode_tag) {
			Ok(plaintext) => plaintext,
			Err(CryptoError::AuthenticationFailed) => return Ok(false),
			Err(CryptoError::BadPadding) => return Err(StoreError::Crypto(CryptoError::BadPadding)),
			Err(other) => return Err(StoreError::Crypto(other)),
		};

		if decrypted != parameters.opcode_plaintext {
			return Ok(false);
		}

		self.unlocked = Some(UnlockedState { keys, params: parameters });
		Ok(true)
	}

	/// Inserts `(hash(key), seal(value))`. Returns `false` without writing if `key`
	/// already has an entry; overwriting is not supported here — callers wanting update
	/// semantics must `delete` then `put`.
	///
	/// # Panics
	///
	/// Panics if the store is not unlocked.
	pub fn put(&mut self, key: &str, value: &str) -> Result<bool, StoreError> {
		let state = self.unlocked.as_ref().expect("tinfoildb: store is locked");

		let hashed_key = tinfoilcrypto::hash_key(key);
		let envelope = tinfoilcrypto::seal(&state.keys, value.as_bytes())?;

		let result = self.conn.execute(
			"INSERT INTO tinfoil_entries (hashed_key, encrypted_value, iv, hmac_signature) VALUES (?1, ?2, ?3, ?4)",
			sql_params![&hashed_key[..], &envelope.ciphertext, &envelope.iv[..], &envelope.tag[..]],
		);

		match result {
			Ok(_) => Ok(true),
			Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == rusqlite::ErrorCode::ConstraintViolation => Ok(false),
			Err(e) => Err(e.into()),
		}
	}

	/// Looks up `key`, verifies its entry's tag, and decrypts it.
	///
	/// Returns `Ok(None)` if no entry exists for `key`. Returns
	/// `Err(StoreError::Tampered)` if the entry's HMAC tag does not verify — this is
	/// never downgraded to `None` or silently retried, since it is the store's only
	/// signal that the file has been corrupted or tampered with.
	///
	/// # Panics
	///
	/// Panics if the store is not unlocked.
	pub fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
		let state = self.unlocked.as_ref().expect("tinfoildb: store is locked");

		let hashed_key = tinfoilcrypto::hash_key(key);
		let row = self
			.conn
			.query_row(
				"SELECT encrypted_value, iv, hmac_signature FROM tinfoil_entries WHERE hashed_key = ?1",
				sql_params![&hashed_key[..]],
				|row| {
					let ciphertext: Vec<u8> = row.get(0)?;
					let iv: Vec<u8> = row.get(1)?;
					let tag: Vec<u8> = row.get(2)?;
					Ok((ciphertext, iv, tag))
				},
			)
			.optional()?;

		let Some((ciphertext, iv, tag)) = row else {
			return Ok(None);
		};

		let iv = tinfoilcrypto::Iv::from_slice(&iv).ok_or(CryptoError::BadLength)?;
		let tag = tinfoilcrypto::Tag::from_slice(&tag).ok_or(CryptoError::BadLength)?;

		let plaintext = match tinfoilcrypto::open(&state.keys, &iv, &ciphertext, &tag) {
			Ok(plaintext) => plaintext,
			Err(CryptoError::AuthenticationFailed) => return Err(StoreError::Tampered),
			Err(other) => return Err(StoreError::Crypto(other)),
		};

		let value = String::from_utf8(plaintext).map_err(|_| StoreError::Crypto(CryptoError::BadPadding))?;
		Ok(Some(value))
	}

	/// True iff an entry exists for `key`. Touches only the hashed key, never the
	/// master keys or ciphertext, so this is the only operation that works while the
	/// store is locked — it exists so front ends can confirm a deletion target without
	/// decrypting anything.
	///
	/// # Panics
	///
	/// Panics if the database is not yet initialized.
	pub fn has(&self, key: &str) -> Result<bool, StoreError> {
		assert!(self.is_initialized()?, "tinfoildb: database is not yet initialized");

		let hashed_key = tinfoilcrypto::hash_key(key);
		let exists: Option<i64> = self
			.conn
			.query_row("SELECT 1 FROM tinfoil_entries WHERE hashed_key = ?1", sql_params![&hashed_key[..]], |row| row.get(0))
			.optional()?;

		Ok(exists.is_some())
	}

	/// Deletes the entry for `key`, if any. Idempotent: deleting an absent key is not
	/// an error and performs no write.
	///
	/// Legal from the *Initialized* state onward, matching the prior-art
	/// implementation's behavior: unlike `get`/`put`, `delete` does not require the
	/// store to be unlocked, since it never needs to decrypt anything. This is a known
	/// confidentiality trade-off — an attacker who has the database file and already
	/// knows one of its keys (but not the master password) can erase that entry without
	/// ever unlocking the store — accepted here rather than tightened, to preserve
	/// compatibility with existing deployments.
	///
	/// # Panics
	///
	/// Panics if the database is not yet initialized.
	pub fn delete(&mut self, key: &str) -> Result<(), StoreError> {
		assert!(self.is_initialized()?, "tinfoildb: database is not yet initialized");

		let hashed_key = tinfoilcrypto::hash_key(key);
		self.conn.execute("DELETE FROM tinfoil_entries WHERE hashed_key = ?1", sql_params![&hashed_key[..]])?;

		Ok(())
	}

	/// Clears the in-memory master keys and closes the database handle.
	///
	/// Consuming `self` makes "subsequent operations other than `open` are invalid" a
	/// compile-time property rather than a runtime check: there is no `Store` value
	/// left to call anything on. The cached keys are zeroed regardless of whether
	/// `close` was ever called explicitly, since `AesKey`/`HmacKey` zeroize themselves
	/// on drop (see `tinfoilcrypto`'s `secret` newtypes) — this covers callers that drop
	/// a `Store` without calling `close` (an early return, a panic unwind).
	pub fn close(self) {
		drop(self);
	}
}
