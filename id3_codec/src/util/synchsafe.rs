//! Synchsafe integers and unsynchronised content
//!
//! ID3v2 stores its tag size (and, since ID3v2.4, its frame sizes) using only the lower 7 bits
//! of every byte. This way, a size can never contain the `0xFF 0xE0..` pattern that marks an MPEG
//! frame sync.
//!
//! Tag content itself can be protected the same way with *unsynchronisation*: a `0x00` is
//! inserted after every `0xFF`, and has to be removed again before the content can be read.

use crate::error::Result;
use crate::util::alloc::VecFallibleCapacity;

/// Encode a tag or frame size as a 4 byte synchsafe integer
///
/// The value is split into four 7-bit groups, most significant group first.
///
/// # Errors
///
/// `size` doesn't fit in 28 bits
///
/// # Examples
///
/// ```rust
/// use id3_codec::encode_size;
///
/// # fn main() -> id3_codec::error::Result<()> {
/// assert_eq!(encode_size(257)?, [0x00, 0x00, 0x02, 0x01]);
/// assert!(encode_size(1 << 28).is_err());
/// # Ok(()) }
/// ```
pub fn encode_size(size: u32) -> Result<[u8; 4]> {
	Ok(size.synch()?.to_be_bytes())
}

/// Decode a 4 byte synchsafe integer
///
/// # Examples
///
/// ```rust
/// use id3_codec::decode_size;
///
/// assert_eq!(decode_size([0x00, 0x00, 0x02, 0x01]), 257);
/// ```
pub fn decode_size(bytes: [u8; 4]) -> u32 {
	(u32::from(bytes[0]) << 21)
		+ (u32::from(bytes[1]) << 14)
		+ (u32::from(bytes[2]) << 7)
		+ u32::from(bytes[3])
}

/// Whether the bytes form a valid synchsafe integer (every most significant bit unset)
pub(crate) fn is_synchsafe(bytes: &[u8]) -> bool {
	bytes.iter().all(|b| b & 0x80 == 0)
}

/// Remove the unsynchronisation scheme from `content`
///
/// Every `0xFF 0x00` pair is replaced with a single `0xFF`. Any other byte following `0xFF` is
/// left untouched.
pub(crate) fn resynchronise(content: &[u8]) -> Result<Vec<u8>> {
	let mut out = Vec::try_with_capacity_stable(content.len())?;

	let mut encountered_ff = false;
	for byte in content.iter().copied() {
		if encountered_ff {
			encountered_ff = false;

			// Only skip the next byte if this is valid unsynchronization
			if byte == 0 {
				continue;
			}
		}

		out.push(byte);
		encountered_ff = byte == 0xFF;
	}

	Ok(out)
}

/// An integer that can be converted to and from synchsafe variants
pub trait SynchsafeInteger: Sized {
	/// Create a synchsafe integer
	///
	/// # Errors
	///
	/// `self` doesn't fit in <`INTEGER_TYPE::BITS - size_of::<INTEGER_TYPE>()`> bits
	///
	/// # Examples
	///
	/// ```rust
	/// use id3_codec::util::synchsafe::SynchsafeInteger;
	///
	/// # fn main() -> id3_codec::error::Result<()> {
	/// // Maximum value we can represent in a synchsafe u32
	/// let unsynch_number = 0xFFF_FFFF_u32;
	/// let synch_number = unsynch_number.synch()?;
	///
	/// // Each byte should have 7 set bits and an MSB of 0
	/// assert_eq!(synch_number, 0b01111111_01111111_01111111_01111111_u32);
	/// # Ok(()) }
	/// ```
	fn synch(self) -> Result<Self>;

	/// Unsynchronise a synchsafe integer
	///
	/// # Examples
	///
	/// ```rust
	/// use id3_codec::util::synchsafe::SynchsafeInteger;
	///
	/// # fn main() -> id3_codec::error::Result<()> {
	/// let unsynch_number = 0xFFF_FFFF_u32;
	/// let synch_number = unsynch_number.synch()?;
	///
	/// assert_eq!(synch_number.unsynch(), unsynch_number);
	/// # Ok(()) }
	/// ```
	fn unsynch(self) -> Self;
}

macro_rules! impl_synchsafe {
	(
		$ty:ty,
		synch($n:ident) $body:block;
		unsynch($u:ident) $unsynch_body:block
	) => {
		#[allow(unused_parens)]
		impl SynchsafeInteger for $ty {
			fn synch(self) -> Result<Self> {
				const MAXIMUM_INTEGER: $ty = {
					let num_bytes = core::mem::size_of::<$ty>();
					// 7 bits are available per byte, shave off 1 bit per byte
					<$ty>::MAX >> num_bytes
				};

				if self > MAXIMUM_INTEGER {
					crate::macros::err!(TooMuchData);
				}

				let $n = self;
				Ok($body)
			}

			fn unsynch(self) -> Self {
				let $u = self;
				$unsynch_body
			}
		}
	};
}

impl_synchsafe! {
	u16,
	synch(n) {
		(n & 0x7F) |
		((n & (0x7F << 7)) << 1)
	};
	unsynch(u) {
		((u & 0x7F00) >> 1) | (u & 0x7F)
	}
}

impl_synchsafe! {
	u32,
	synch(n) {
		(n & 0x7F) |
		((n & (0x7F << 7)) << 1) |
		((n & (0x7F << 14)) << 2) |
		((n & (0x7F << 21)) << 3)
	};
	unsynch(u) {
		((u & 0x7F00_0000) >> 3) | ((u & 0x7F_0000) >> 2) | ((u & 0x7F00) >> 1) | (u & 0x7F)
	}
}
