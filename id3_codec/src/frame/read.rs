use super::content::{FrameContext, parse_content};
use super::header::FrameHeader;
use super::{Frame, FrameReader};
use crate::error::Result;
use crate::header::Id3v2Version;
use crate::macros::id3v2_err;
use crate::util::synchsafe::{SynchsafeInteger, resynchronise};

use std::borrow::Cow;

/// Decode a single frame body, undoing everything its flags describe
///
/// Returns `None` if the frame has no codec.
///
/// `tag_unsynchronised` is the tag header's unsynchronisation flag. It only matters for ID3v2.4,
/// earlier versions restore the entire tag at once.
pub(crate) fn read_frame(
	header: FrameHeader,
	body: &[u8],
	ctx: &FrameContext<'_>,
	tag_unsynchronised: bool,
) -> Result<Option<Frame>> {
	let FrameHeader { id, mut flags, .. } = header;
	let mut reader = FrameReader::new(body);

	// The additional data is stored in the same order as the flags
	match ctx.version {
		Id3v2Version::V4 => {
			if let Some(group) = flags.grouping_identity.as_mut() {
				log::trace!("Reading group identifier");
				*group = reader.consume_u8()?;
			}

			if let Some(method) = flags.encryption.as_mut() {
				log::trace!("Reading encryption method symbol");
				*method = reader.consume_u8()?;
			}

			// Writers don't always follow the standard here, so while a data length indicator is
			// *written* the flag **isn't always set**
			if flags.data_length_indicator.is_some() || flags.compression {
				log::trace!("Reading data length indicator");
				let len = (reader.consume_number(4)? as u32).unsynch();
				flags.data_length_indicator = Some(len);
			}
		},
		Id3v2Version::V3 => {
			if flags.compression {
				log::trace!("Reading decompressed size");
				flags.data_length_indicator = Some(reader.consume_number(4)? as u32);
			}

			if let Some(method) = flags.encryption.as_mut() {
				log::trace!("Reading encryption method symbol");
				*method = reader.consume_u8()?;
			}

			if let Some(group) = flags.grouping_identity.as_mut() {
				log::trace!("Reading group identifier");
				*group = reader.consume_u8()?;
			}
		},
		Id3v2Version::V2 => {},
	}

	// Nothing further we can do with encrypted frames
	if flags.encryption.is_some() {
		id3v2_err!(@BAIL EncryptedFrame(id));
	}

	// Frames must have at least 1 byte, *after* all of the additional data flags can provide
	if reader.is_empty() {
		id3v2_err!(@BAIL BadFrameLength);
	}

	let mut content = Cow::Borrowed(reader.consume_buffer(None)?);

	// It seems like the flags are applied in the order:
	//
	// unsynchronization -> compression
	if ctx.version == Id3v2Version::V4 && (flags.unsynchronisation || tag_unsynchronised) {
		content = Cow::Owned(resynchronise(&content)?);
	}

	if flags.compression {
		content = Cow::Owned(decompress(&content, flags.data_length_indicator)?);
	}

	match parse_content(&id, &content, ctx)? {
		Some(value) => Ok(Some(Frame { id, flags, value })),
		None => {
			log::warn!("No codec for frame `{id}`, skipping");
			Ok(None)
		},
	}
}

#[cfg(feature = "id3v2_compression_support")]
fn decompress(content: &[u8], decompressed_size: Option<u32>) -> Result<Vec<u8>> {
	use crate::config::global_options;
	use crate::macros::err;
	use crate::util::alloc::VecFallibleCapacity;

	use std::io::Read;

	let allocation_limit = global_options().allocation_limit;
	let capacity = decompressed_size
		.map_or(content.len(), |size| size as usize)
		.min(allocation_limit);

	let mut decompressed = Vec::try_with_capacity_stable(capacity)?;

	// Never trust the size, the stream itself decides how large the frame is
	let decoder = flate2::read::ZlibDecoder::new(content);
	decoder
		.take(allocation_limit as u64 + 1)
		.read_to_end(&mut decompressed)
		.map_err(|e| id3v2_err!(Decompression(e)))?;

	if decompressed.len() > allocation_limit {
		err!(TooMuchData);
	}

	Ok(decompressed)
}

#[cfg(not(feature = "id3v2_compression_support"))]
#[allow(clippy::unnecessary_wraps)]
fn decompress(_: &[u8], _: Option<u32>) -> Result<Vec<u8>> {
	Err(id3v2_err!(CompressedFrameEncountered))
}
