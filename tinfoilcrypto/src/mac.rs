use hmac::{Hmac, Mac};
use sha2::Sha512;
use subtle::ConstantTimeEq;

type HmacSha512 = Hmac<Sha512>;

/// Computes HMAC-SHA-512(key, data). `key` may be any length (HMAC accepts arbitrary
/// key sizes; the RFC 2104 key block handling takes care of short or long keys).
pub fn hmac_sha512(key: &[u8], data: &[u8]) -> [u8; 64] {
	let mut mac = HmacSha512::new_from_slice(key).expect("HMAC accepts keys of any length");
	mac.update(data);
	mac.finalize().into_bytes().into()
}

/// Verifies `tag == hmac_sha512(key, data)` in constant time with respect to `tag`.
/// Never panics; a malformed tag is simply treated as a verification failure.
pub fn hmac_verify(key: &[u8], data: &[u8], tag: &[u8]) -> bool {
	let expected = hmac_sha512(key, data);
	expected[..].ct_eq(tag).into()
}
