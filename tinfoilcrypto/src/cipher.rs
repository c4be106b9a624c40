use crate::error::CryptoError;
use crate::random::random_array;
use aes::Aes256;
use cbc::cipher::block_padding::{Pkcs7, UnpadError};
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

const AES_KEY_SIZE: usize = 32;
const AES_BLOCK_SIZE: usize = 16;

type Encryptor = cbc::Encryptor<Aes256>;
type Decryptor = cbc::Decryptor<Aes256>;

/// Encrypts `plaintext` under `key` (must be 32 bytes, AES-256) with a freshly generated
/// random IV. Returns `(iv, ciphertext)`; the ciphertext is PKCS#7-padded to a multiple
/// of the AES block size (adding a full padding block if `plaintext.len()` is already a
/// multiple of 16, per the standard).
pub fn aes_cbc_encrypt(key: &[u8], plaintext: &[u8]) -> Result<([u8; 16], Vec<u8>), CryptoError> {
	if key.len() != AES_KEY_SIZE {
		return Err(CryptoError::BadLength);
	}

	let iv: [u8; AES_BLOCK_SIZE] = random_array();
	let encryptor = Encryptor::new_from_slices(key, &iv).map_err(|_| CryptoError::BadLength)?;
	let ciphertext = encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext);

	Ok((iv, ciphertext))
}

/// Decrypts `ciphertext` (must be a positive multiple of 16 bytes) under `key` and `iv`,
/// stripping PKCS#7 padding. Returns `CryptoError::BadPadding` if the padding is invalid;
/// callers must only call this after a successful MAC verification (see `envelope`).
pub fn aes_cbc_decrypt(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
	if key.len() != AES_KEY_SIZE {
		return Err(CryptoError::BadLength);
	}
	if iv.len() != AES_BLOCK_SIZE {
		return Err(CryptoError::BadLength);
	}
	if ciphertext.is_empty() || ciphertext.len() % AES_BLOCK_SIZE != 0 {
		return Err(CryptoError::BadLength);
	}

	let decryptor = Decryptor::new_from_slices(key, iv).map_err(|_| CryptoError::BadLength)?;
	decryptor
		.decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
		.map_err(|_: UnpadError| CryptoError::BadPadding)
}
