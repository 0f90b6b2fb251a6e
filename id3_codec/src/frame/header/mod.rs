pub(crate) mod parse;

use crate::error::Result;
use crate::frame::FrameFlags;
use crate::macros::id3v2_err;

/// A frame header, with its identifier already upgraded to ID3v2.3/4 where possible
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FrameHeader {
	pub id: String,
	/// The size of the frame body (**DOES NOT INCLUDE THE HEADER**)
	pub size: u32,
	pub flags: FrameFlags,
}

/// Frame identifiers may only contain `'A'..='Z'` and `'0'..='9'`, and be 3 or 4 characters long
pub(crate) fn verify_id(id: &[u8]) -> Result<()> {
	let valid_chars = id
		.iter()
		.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());

	if !valid_chars || !(3..=4).contains(&id.len()) {
		id3v2_err!(@BAIL BadFrameId(id.to_vec()));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::verify_id;

	#[test_log::test]
	fn frame_id_characters() {
		assert!(verify_id(b"TIT2").is_ok());
		assert!(verify_id(b"TT2").is_ok());
		assert!(verify_id(b"TiT2").is_err());
		assert!(verify_id(b"TIT2 ").is_err());
		assert!(verify_id(b"T\0\0\0").is_err());
		assert!(verify_id(b"").is_err());
	}
}
