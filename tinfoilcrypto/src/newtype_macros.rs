/*
Newtype generator for fixed-length byte arrays, in the style of
github.com/dnaq/sodiumoxide's newtype macros (as adapted by the prior-art
fortresscrypto crate this module is modeled on).
*/

macro_rules! newtype_from_slice (($newtype:ident, $len:expr) => (
	/// Builds an instance from a byte slice.
	///
	/// Returns `None` if `bs.len() != $len`.
	pub fn from_slice(bs: &[u8]) -> Option<$newtype> {
		if bs.len() != $len {
			return None;
		}
		let mut n = $newtype([0; $len]);
		n.0.copy_from_slice(bs);
		Some(n)
	}

	pub fn len() -> usize {
		$len
	}
));

macro_rules! newtype_traits (($newtype:ident, $len:expr) => (
	impl ::subtle::ConstantTimeEq for $newtype {
		fn ct_eq(&self, other: &Self) -> ::subtle::Choice {
			self.0.ct_eq(&other.0)
		}
	}

	impl ::std::cmp::PartialEq for $newtype {
		fn eq(&self, other: &Self) -> bool {
			use ::subtle::ConstantTimeEq;
			self.ct_eq(other).into()
		}
	}

	impl ::std::cmp::Eq for $newtype {}

	impl ::std::ops::Index<::std::ops::RangeFull> for $newtype {
		type Output = [u8];
		fn index(&self, _index: ::std::ops::RangeFull) -> &[u8] {
			&self.0[..]
		}
	}

	impl AsRef<[u8]> for $newtype {
		#[inline]
		fn as_ref(&self) -> &[u8] {
			&self.0[..]
		}
	}
));

/// Generates a newtype wrapping a `[u8; $bytes]`.
///
/// `secret` newtypes zero their backing buffer on drop and never print their contents.
/// `public` newtypes are `Copy`, `Clone`, and debug-print as lowercase hex.
macro_rules! new_type {
	( $(#[$meta:meta])* secret $name:ident($bytes:expr); ) => (
		$(#[$meta])*
		#[must_use]
		pub struct $name([u8; $bytes]);

		impl $name {
			newtype_from_slice!($name, $bytes);
		}

		newtype_traits!($name, $bytes);

		impl ::zeroize::Zeroize for $name {
			fn zeroize(&mut self) {
				self.0.zeroize();
			}
		}

		impl Drop for $name {
			fn drop(&mut self) {
				::zeroize::Zeroize::zeroize(self);
			}
		}

		impl ::std::fmt::Debug for $name {
			fn fmt(&self, formatter: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
				write!(formatter, "{}(..)", stringify!($name))
			}
		}
	);
	( $(#[$meta:meta])* public $name:ident($bytes:expr); ) => (
		$(#[$meta])*
		#[derive(Copy, Clone)]
		#[must_use]
		pub struct $name(pub [u8; $bytes]);

		impl $name {
			newtype_from_slice!($name, $bytes);
		}

		newtype_traits!($name, $bytes);

		impl ::std::fmt::Debug for $name {
			fn fmt(&self, formatter: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
				write!(formatter, "{}({})", stringify!($name), ::data_encoding::HEXLOWER_PERMISSIVE.encode(&self.0[..]))
			}
		}
	);
}
