use crate::error::StoreError;
use rusqlite::{params, Connection, OptionalExtension};
use tinfoilcrypto::{Iv, ScryptParams, Tag};

/// Current on-disk schema version. Bumping this is a breaking change to the wire
/// format; `Store::unlock` refuses to proceed against any other value.
pub const SCHEMA_VERSION: i64 = 1;

/// Fixed sentinel encrypted and authenticated at `initialize` time and checked on every
/// `unlock`. Must never change: existing databases on disk were sealed against exactly
/// this byte string, and changing it would make them permanently unopenable.
pub const OPCODE_PLAINTEXT: &[u8; 31] = b"jX40TyIOkUMMGYLePilPb8BwxSwkYiJ";

pub const DEFAULT_SCRYPT_N: u64 = 1 << 19;
pub const DEFAULT_SCRYPT_R: u32 = 8;
pub const DEFAULT_SCRYPT_P: u32 = 1;
pub const DEFAULT_AES_KEY_SIZE: usize = 32;
pub const DEFAULT_HMAC_KEY_SIZE: usize = 64;

pub const SCRYPT_SALT_SIZE: usize = 16;

/// The single, creation-time-immutable `tinfoil_parameters` row.
pub struct Parameters {
	pub version: i64,
	pub scrypt_params: ScryptParams,
	pub scrypt_salt: Vec<u8>,
	pub aes_key_size: usize,
	pub hmac_key_size: usize,
	pub opcode_plaintext: Vec<u8>,
	pub opcode_iv: Iv,
	pub opcode_ciphertext: Vec<u8>,
	pub opcode_tag: Tag,
}

pub fn create_schema(conn: &Connection) -> Result<(), StoreError> {
	conn.execute_batch(
		"CREATE TABLE IF NOT EXISTS tinfoil_parameters(
			version            INT  NOT NULL,
			scrypt_n           INT  NOT NULL,
			scrypt_r           INT  NOT NULL,
			scrypt_p           INT  NOT NULL,
			scrypt_salt        BLOB NOT NULL,
			aes_key_size       INT  NOT NULL,
			hmac_key_size      INT  NOT NULL,
			opcode_plaintext   BLOB NOT NULL,
			opcode_iv          BLOB NOT NULL,
			opcode_encrypted   BLOB NOT NULL,
			opcode_hmac        BLOB NOT NULL
		);
		CREATE TABLE IF NOT EXISTS tinfoil_entries(
			hashed_key         BLOB UNIQUE NOT NULL,
			encrypted_value    BLOB NOT NULL,
			iv                 BLOB NOT NULL,
			hmac_signature     BLOB NOT NULL
		);",
	)?;

	Ok(())
}

pub fn is_initialized(conn: &Connection) -> Result<bool, StoreError> {
	let count: i64 = conn.query_row(
		"SELECT count(*) FROM sqlite_master WHERE type = 'table' AND (name = ?1 OR name = ?2)",
		params!["tinfoil_parameters", "tinfoil_entries"],
		|row| row.get(0),
	)?;

	Ok(count == 2)
}

#[allow(clippy::too_many_arguments)]
pub fn insert(
	conn: &Connection,
	version: i64,
	scrypt_params: ScryptParams,
	scrypt_salt: &[u8],
	aes_key_size: usize,
	hmac_key_size: usize,
	opcode_iv: &Iv,
	opcode_ciphertext: &[u8],
	opcode_tag: &Tag,
) -> Result<(), StoreError> {
	conn.execute(
		"INSERT INTO tinfoil_parameters
			(version, scrypt_n, scrypt_r, scrypt_p, scrypt_salt, aes_key_size, hmac_key_size,
			 opcode_plaintext, opcode_iv, opcode_encrypted, opcode_hmac)
		 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
		params![
			version,
			scrypt_params.n as i64,
			scrypt_params.r,
			scrypt_params.p,
			scrypt_salt,
			aes_key_size as i64,
			hmac_key_size as i64,
			&OPCODE_PLAINTEXT[..],
			&opcode_iv[..],
			opcode_ciphertext,
			&opcode_tag[..],
		],
	)?;

	Ok(())
}

/// Loads the lone `tinfoil_parameters` row. Returns `None` only if the table is empty,
/// which should never happen for a database that passed `is_initialized`; a caller
/// seeing this has a corrupted schema, not a missing-password condition.
pub fn load(conn: &Connection) -> Result<Option<Parameters>, StoreError> {
	conn.query_row(
		"SELECT version, scrypt_n, scrypt_r, scrypt_p, scrypt_salt, aes_key_size, hmac_key_size,
		        opcode_plaintext, opcode_iv, opcode_encrypted, opcode_hmac
		 FROM tinfoil_parameters",
		[],
		|row| {
			let scrypt_n: i64 = row.get(1)?;
			let scrypt_r: u32 = row.get(2)?;
			let scrypt_p: u32 = row.get(3)?;
			let aes_key_size: i64 = row.get(5)?;
			let hmac_key_size: i64 = row.get(6)?;
			let opcode_iv: Vec<u8> = row.get(8)?;
			let opcode_ciphertext: Vec<u8> = row.get(9)?;
			let opcode_tag: Vec<u8> = row.get(10)?;

			Ok((
				row.get::<_, i64>(0)?,
				scrypt_n as u64,
				scrypt_r,
				scrypt_p,
				row.get::<_, Vec<u8>>(4)?,
				aes_key_size as usize,
				hmac_key_size as usize,
				row.get::<_, Vec<u8>>(7)?,
				opcode_iv,
				opcode_ciphertext,
				opcode_tag,
			))
		},
	)
	.optional()?
	.map(
		|(version, scrypt_n, scrypt_r, scrypt_p, scrypt_salt, aes_key_size, hmac_key_size, opcode_plaintext, opcode_iv, opcode_ciphertext, opcode_tag)| {
			let scrypt_params = ScryptParams::new(scrypt_n, scrypt_r, scrypt_p).map_err(StoreError::from)?;
			let opcode_iv = Iv::from_slice(&opcode_iv).ok_or_else(bad_length)?;
			let opcode_tag = Tag::from_slice(&opcode_tag).ok_or_else(bad_length)?;

			Ok(Parameters {
				version,
				scrypt_params,
				scrypt_salt,
				aes_key_size,
				hmac_key_size,
				opcode_plaintext,
				opcode_iv,
				opcode_ciphertext,
				opcode_tag,
			})
		},
	)
	.transpose()
}

fn bad_length() -> StoreError {
	StoreError::Crypto(tinfoilcrypto::CryptoError::BadLength)
}
