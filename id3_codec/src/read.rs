use crate::config::ParseOptions;
use crate::error::Result;
use crate::frame::Frame;
use crate::frame::content::FrameContext;
use crate::frame::header::FrameHeader;
use crate::frame::header::parse::{ParsedHeader, parse_header, parse_v2_header};
use crate::frame::read::read_frame;
use crate::header::{HEADER_SIZE, Id3v2Header, Id3v2Version, find_header};
use crate::macros::{id3v2_err, parse_mode_choice};
use crate::tag::{Tag, TagViews};
use crate::util::synchsafe::resynchronise;

/// Walk a frame area, decoding every frame until the padding or the end of the area
///
/// This is used for both the top level frames of a tag, and the frames embedded in `CHAP`/`CTOC`
/// frames. The include/exclude filters only apply to the top level.
pub(crate) fn read_frames(
	content: &[u8],
	ctx: &FrameContext<'_>,
	tag_unsynchronised: bool,
) -> Result<Vec<Frame>> {
	let parsing_mode = ctx.options.parsing_mode;
	let header_size = match ctx.version {
		Id3v2Version::V2 => 6,
		_ => 10,
	};

	let mut frames = Vec::new();
	let mut offset = 0;
	while offset < content.len() {
		let remaining = &content[offset..];
		let parsed = match ctx.version {
			Id3v2Version::V2 => parse_v2_header(remaining),
			Id3v2Version::V3 => parse_header(remaining, false),
			Id3v2Version::V4 => parse_header(remaining, true),
		};

		let ParsedHeader::Header { id, size, flags } = parsed else {
			log::trace!("Reached the end of the frames at offset {offset}");
			break;
		};

		let body_start = offset + header_size;
		let body_end = body_start + size as usize;
		let Some(body) = content.get(body_start..body_end) else {
			parse_mode_choice!(
				parsing_mode,
				STRICT: id3v2_err!(@BAIL BadFrameLength),
				DEFAULT: {
					log::warn!("Frame of size {size} is larger than the remaining tag, stopping");
					break;
				}
			);
		};

		offset = body_end;

		let id = match id {
			Ok(id) => id,
			Err(e) => {
				parse_mode_choice!(
					parsing_mode,
					STRICT: return Err(e),
					DEFAULT: {
						log::warn!("Skipping frame with an invalid identifier: {e}");
						continue;
					}
				);
			},
		};

		log::trace!("Reading frame `{id}` of size {size}");

		if size == 0 {
			parse_mode_choice!(
				parsing_mode,
				STRICT: id3v2_err!(@BAIL EmptyFrame(id)),
				DEFAULT: {
					log::debug!("Skipping empty frame `{id}`");
					continue;
				}
			);
		}

		if ctx.depth == 0 && !ctx.options.keeps(&id) {
			log::trace!("Frame `{id}` is filtered out");
			continue;
		}

		let header = FrameHeader { id, size, flags };
		let frame_id = header.id.clone();
		match read_frame(header, body, ctx, tag_unsynchronised) {
			Ok(Some(frame)) => frames.push(frame),
			Ok(None) => {},
			Err(e) => parse_mode_choice!(
				parsing_mode,
				STRICT: return Err(e),
				DEFAULT: log::warn!("Failed to read frame `{frame_id}`, skipping: {e}"),
			),
		}
	}

	Ok(frames)
}

/// Locate and decode the ID3v2 tag in `buffer`
///
/// The `"ID3"` magic is searched for within the first [`ParseOptions::max_junk_bytes`] bytes.
/// If there is no tag, an empty [`Tag`] is returned.
///
/// # Errors
///
/// Only with [`ParsingMode::Strict`](crate::config::ParsingMode::Strict). Otherwise, malformed
/// frames are skipped, and a malformed tag is treated as missing.
///
/// * The tag header is invalid
/// * A frame is malformed, see [`ParsingMode::Strict`](crate::config::ParsingMode::Strict)
///
/// # Examples
///
/// ```rust
/// use id3_codec::config::ParseOptions;
/// use id3_codec::{FrameValue, decode_tag};
///
/// # fn main() -> id3_codec::error::Result<()> {
/// let buffer = [
/// 	b'I', b'D', b'3', 3, 0, 0, 0, 0, 0, 14, // Tag header
/// 	b'T', b'I', b'T', b'2', 0, 0, 0, 4, 0, 0, // Frame header
/// 	0, b'a', b'b', b'c', // Frame body
/// ];
///
/// let tag = decode_tag(&buffer, &ParseOptions::new())?;
/// assert_eq!(tag.frames()[0].value, FrameValue::Text(String::from("abc")));
///
/// // Not a tag
/// let tag = decode_tag(&[0x12, 0x04, 0x05], &ParseOptions::new())?;
/// assert!(tag.frames().is_empty());
/// # Ok(()) }
/// ```
pub fn decode_tag(buffer: &[u8], options: &ParseOptions) -> Result<Tag> {
	let Some(offset) = find_header(buffer, options.max_junk_bytes, true) else {
		log::debug!("No ID3v2 tag found");
		return Ok(Tag::default());
	};

	let header = match Id3v2Header::parse(&buffer[offset..]) {
		Ok(header) => header,
		Err(e) => parse_mode_choice!(
			options.parsing_mode,
			STRICT: return Err(e),
			DEFAULT: {
				log::warn!("Ignoring tag with an invalid header: {e}");
				return Ok(Tag::default());
			}
		),
	};

	log::debug!(
		"Parsing ID3v2 tag, size: {}, version: {:?}",
		header.size,
		header.version
	);

	if header.flags.compression {
		log::warn!("Encountered a compressed ID3v2.2 tag, which can't be read");
		return Ok(Tag::new(header.version));
	}

	let tag_start = offset + HEADER_SIZE;
	let frames_start = tag_start + header.extended_size as usize;
	let frames_end = (tag_start + header.size as usize).min(buffer.len());
	let frame_area = buffer.get(frames_start..frames_end).unwrap_or_default();

	let ctx = FrameContext::new(header.version, options, 0);

	// ID3v2.4 unsynchronises each frame on its own, so the flag is only passed along
	let frames = if header.flags.unsynchronisation && header.version != Id3v2Version::V4 {
		let content = match resynchronise(frame_area) {
			Ok(content) => content,
			Err(e) => parse_mode_choice!(
				options.parsing_mode,
				STRICT: return Err(e),
				DEFAULT: {
					log::warn!("Unable to resynchronise the tag, ignoring it: {e}");
					return Ok(Tag::new(header.version));
				}
			),
		};

		read_frames(&content, &ctx, false)?
	} else {
		read_frames(frame_area, &ctx, header.flags.unsynchronisation)?
	};

	Ok(Tag::from_frames(header.version, frames))
}

/// Decode the tag in `buffer` into its alias and identifier keyed views
///
/// Which views are produced is controlled by [`ParseOptions::only_raw`] and
/// [`ParseOptions::no_raw`]. See [`Tag::friendly`] and [`Tag::raw`].
///
/// # Errors
///
/// See [`decode_tag`]
///
/// # Examples
///
/// ```rust
/// use id3_codec::config::ParseOptions;
/// use id3_codec::read_tags;
///
/// # fn main() -> id3_codec::error::Result<()> {
/// let views = read_tags(&[], &ParseOptions::new().only_raw(true))?;
/// assert!(views.friendly.is_none());
/// assert!(views.raw.unwrap().is_empty());
/// # Ok(()) }
/// ```
pub fn read_tags(buffer: &[u8], options: &ParseOptions) -> Result<TagViews> {
	let tag = decode_tag(buffer, options)?;

	Ok(TagViews {
		friendly: (!options.only_raw).then(|| tag.friendly()),
		raw: (!options.no_raw).then(|| tag.raw()),
	})
}

/// Remove the ID3v2 tag from `buffer`
///
/// Everything before and after the tag is kept as-is. If there is no tag, a copy of `buffer` is
/// returned. A tag that claims to be larger than the buffer removes everything after its header.
///
/// # Errors
///
/// * The size field of the tag header is not a synchsafe integer ([`Id3v2ErrorKind::BadTagSize`](crate::error::Id3v2ErrorKind::BadTagSize))
///
/// # Examples
///
/// ```rust
/// use id3_codec::config::ParseOptions;
/// use id3_codec::strip_tag;
///
/// # fn main() -> id3_codec::error::Result<()> {
/// let mut buffer = vec![b'I', b'D', b'3', 3, 0, 0, 0, 0, 0, 2, 0, 0];
/// buffer.extend_from_slice(b"audio");
///
/// assert_eq!(strip_tag(&buffer, &ParseOptions::new())?, b"audio");
/// # Ok(()) }
/// ```
pub fn strip_tag(buffer: &[u8], options: &ParseOptions) -> Result<Vec<u8>> {
	// The size is checked here instead, so a bad one can be reported
	let Some(offset) = find_header(buffer, options.max_junk_bytes, false) else {
		log::debug!("No ID3v2 tag found, nothing to strip");
		return Ok(buffer.to_vec());
	};

	let header = Id3v2Header::parse_fixed(&buffer[offset..])?;
	let end = (offset + header.full_tag_size()).min(buffer.len());
	log::debug!("Stripping ID3v2 tag at {offset}..{end}");

	let mut stripped = Vec::with_capacity(buffer.len() - (end - offset));
	stripped.extend_from_slice(&buffer[..offset]);
	stripped.extend_from_slice(&buffer[end..]);

	Ok(stripped)
}
