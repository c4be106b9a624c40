use crate::cipher::{aes_cbc_decrypt, aes_cbc_encrypt};
use crate::error::CryptoError;
use crate::mac::{hmac_sha512, hmac_verify};
use crate::{HmacKey, Iv, MasterKeys, Tag};

/// An authenticated-encryption record: `(iv, ciphertext, tag)`, used identically for
/// the opcode and for every entry's value.
pub struct Envelope {
	pub iv: Iv,
	pub ciphertext: Vec<u8>,
	pub tag: Tag,
}

/// Seal(P) = `(iv, C, T)` where `(iv, C) = aes_cbc_encrypt(K_E, P)` and
/// `T = hmac_sha512(K_M, iv || C)`.
pub fn seal(keys: &MasterKeys, plaintext: &[u8]) -> Result<Envelope, CryptoError> {
	let (iv, ciphertext) = aes_cbc_encrypt(keys.aes_key.as_ref(), plaintext)?;
	let tag = mac_over(&keys.hmac_key, &iv, &ciphertext);

	Ok(Envelope {
		iv: Iv(iv),
		ciphertext,
		tag: Tag(tag),
	})
}

/// Open(iv, C, T) -> P.
///
/// Order is fixed and load-bearing: the tag is verified in constant time *before* the
/// ciphertext is ever touched by the decryptor. A failed tag check returns
/// `CryptoError::AuthenticationFailed` and `aes_cbc_decrypt` is never called.
pub fn open(keys: &MasterKeys, iv: &Iv, ciphertext: &[u8], tag: &Tag) -> Result<Vec<u8>, CryptoError> {
	if !hmac_verify(keys.hmac_key.as_ref(), &mac_input(&iv.0, ciphertext), &tag[..]) {
		return Err(CryptoError::AuthenticationFailed);
	}

	aes_cbc_decrypt(keys.aes_key.as_ref(), &iv.0, ciphertext)
}

fn mac_over(hmac_key: &HmacKey, iv: &[u8], ciphertext: &[u8]) -> [u8; 64] {
	hmac_sha512(hmac_key.as_ref(), &mac_input(iv, ciphertext))
}

fn mac_input(iv: &[u8], ciphertext: &[u8]) -> Vec<u8> {
	let mut input = Vec::with_capacity(iv.len() + ciphertext.len());
	input.extend_from_slice(iv);
	input.extend_from_slice(ciphertext);
	input
}
