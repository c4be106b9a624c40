//! Cryptography helper library for tinfoil.
//!
//! Three things live here: primitives (`digest`, `random`, `kdf`, `cipher`, `mac`) that
//! are pure functions over byte slices, the fixed-size key/tag newtypes they operate on,
//! and the `envelope` layer that composes them into the encrypt-then-MAC record format
//! used for both the opcode and every entry value. Nothing in this crate knows about
//! files, SQL, or the store's lifecycle; that's `tinfoildb`.

#[macro_use]
mod newtype_macros;

pub mod cipher;
pub mod digest;
mod envelope;
mod error;
pub mod kdf;
pub mod mac;
pub mod random;

pub use envelope::{open, seal, Envelope};
pub use error::CryptoError;
pub use kdf::ScryptParams;

new_type!(secret AesKey(32););
new_type!(secret HmacKey(64););
new_type!(public Iv(16););
new_type!(public Tag(64););
new_type!(public HashedKey(64););

/// The pair (K_E, K_M) derived from the master password via Scrypt and split into an
/// AES-256 key and an HMAC-SHA-512 key. Bundling them in a single struct rather than
/// passing two separate `Option`s is what enforces "either both master keys are present,
/// or neither is" at the type level.
pub struct MasterKeys {
	pub aes_key: AesKey,
	pub hmac_key: HmacKey,
}

/// Derives `(K_E, K_M)` from `password` and `salt` using Scrypt, splitting the derived
/// material as `K_E = master[..aes_key_size]`, `K_M = master[aes_key_size..]`.
pub fn derive_master_keys(
	password: &[u8],
	salt: &[u8],
	params: ScryptParams,
	aes_key_size: usize,
	hmac_key_size: usize,
) -> Result<MasterKeys, CryptoError> {
	let master = kdf::derive(password, salt, params, aes_key_size + hmac_key_size)?;
	let (aes_bytes, hmac_bytes) = master.split_at(aes_key_size);

	Ok(MasterKeys {
		aes_key: AesKey::from_slice(aes_bytes).ok_or(CryptoError::BadLength)?,
		hmac_key: HmacKey::from_slice(hmac_bytes).ok_or(CryptoError::BadLength)?,
	})
}

/// Hashes a user-supplied record key: `SHA-512(utf8(key))`. Keys are UTF-8 strings at
/// the public surface; this is the only place a key ever touches cryptographic code.
pub fn hash_key(key: &str) -> HashedKey {
	HashedKey(digest::sha512(key.as_bytes()))
}
