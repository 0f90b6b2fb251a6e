pub(crate) mod frame;

use crate::config::WriteOptions;
use crate::error::Result;
use crate::frame::Frame;
use crate::macros::err;
use crate::tag::{Tag, TagMap};
use crate::util::synchsafe::SynchsafeInteger;

use std::io::{Cursor, Seek, SeekFrom, Write};

use byteorder::{BigEndian, WriteBytesExt};

/// Encode a map of aliases or identifiers as an ID3v2.3 tag
///
/// The header always has version `3.0` and no flags set. The tag size covers the frames and any
/// padding requested with [`WriteOptions::preferred_padding`].
///
/// Text frames are written as UTF-16 with a byte order mark, and frames with empty text are
/// left out entirely. See [`Tag::from_map`] for how keys are resolved.
///
/// # Errors
///
/// * See [`Tag::from_map`]
/// * A frame is invalid (ex. a comment with a bad language, a chapter with no element ID)
/// * Text can't be represented in Latin-1, and [`WriteOptions::lossy_text_encoding`] is disabled
/// * The tag is larger than a synchsafe integer can represent
///
/// # Examples
///
/// ```rust
/// use id3_codec::config::WriteOptions;
/// use id3_codec::{TagMap, encode_tag};
///
/// # fn main() -> id3_codec::error::Result<()> {
/// let empty = encode_tag(&TagMap::new(), WriteOptions::default())?;
/// assert_eq!(empty, [0x49, 0x44, 0x33, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
/// # Ok(()) }
/// ```
pub fn encode_tag(values: &TagMap, write_options: WriteOptions) -> Result<Vec<u8>> {
	Tag::from_map(values)?.as_bytes(write_options)
}

pub(crate) fn write_tag(frames: &[Frame], write_options: WriteOptions) -> Result<Vec<u8>> {
	let mut id3v2 = create_tag_header()?;
	let header_len = id3v2.get_ref().len();

	id3v2.write_all(&frame::write_frames(
		frames,
		write_options.lossy_text_encoding,
	)?)?;

	let padding_len = write_options.preferred_padding.unwrap_or(0) as usize;
	let len = id3v2.get_ref().len() - header_len + padding_len;

	let Ok(len) = u32::try_from(len) else {
		err!(TooMuchData);
	};

	log::debug!("Writing ID3v2.3 tag, size: {len}, padding: {padding_len}");

	// Go back to the start and write the final size
	id3v2.seek(SeekFrom::Start(6))?;
	id3v2.write_u32::<BigEndian>(len.synch()?)?;

	let mut id3v2 = id3v2.into_inner();
	id3v2.resize(id3v2.len() + padding_len, 0);

	Ok(id3v2)
}

fn create_tag_header() -> Result<Cursor<Vec<u8>>> {
	let mut header = Cursor::new(Vec::new());

	header.write_all(b"ID3")?;

	// Version 3, rev 0
	header.write_all(&[3, 0])?;

	// No flags
	header.write_u8(0)?;
	header.write_u32::<BigEndian>(0)?;

	Ok(header)
}
