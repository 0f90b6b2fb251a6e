use super::{FrameKind, FrameReader, FrameValue};
use crate::config::ParseOptions;
use crate::error::Result;
use crate::header::Id3v2Version;
use crate::items::{
	AttachedPictureFrame, ChapterFrame, CommercialFrame, EventTimingCodesFrame, ExtendedTextFrame,
	ExtendedUrlFrame, LanguageFrame, PopularimeterFrame, PrivateFrame, SynchronizedTextFrame,
	TableOfContentsFrame, UniqueFileIdentifierFrame,
};
use crate::macros::{id3v2_err, parse_mode_choice};
use crate::tag::Tag;
use crate::util::text::TextEncoding;

/// Everything a frame body codec needs to know about where the frame was found
#[derive(Copy, Clone, Debug)]
pub(crate) struct FrameContext<'a> {
	/// The version of the tag, frame identifiers are already upgraded past this point
	pub(crate) version: Id3v2Version,
	pub(crate) options: &'a ParseOptions,
	/// How many `CHAP`/`CTOC` frames the frame is nested in
	pub(crate) depth: u8,
}

impl<'a> FrameContext<'a> {
	pub(crate) fn new(version: Id3v2Version, options: &'a ParseOptions, depth: u8) -> Self {
		Self {
			version,
			options,
			depth,
		}
	}
}

/// Decode a frame body
///
/// Returns `None` if there is no codec for the identifier.
#[rustfmt::skip]
pub(crate) fn parse_content(
	id: &str,
	content: &[u8],
	ctx: &FrameContext<'_>,
) -> Result<Option<FrameValue>> {
	log::trace!("Parsing frame content for ID: {}", id);

	let Some(kind) = FrameKind::for_id(id) else {
		return Ok(None);
	};

	Ok(Some(match kind {
		FrameKind::Text => FrameValue::Text(parse_text(content)?),
		FrameKind::Url => FrameValue::Url(FrameReader::new(content).consume_text(None, Some(TextEncoding::Latin1))?),
		FrameKind::Comment => FrameValue::Comment(LanguageFrame::parse(content, ctx)?),
		FrameKind::UnsynchronisedLyrics => FrameValue::UnsynchronisedLyrics(LanguageFrame::parse(content, ctx)?),
		FrameKind::UserDefinedText => FrameValue::UserDefinedText(ExtendedTextFrame::parse(content, ctx)?),
		FrameKind::UserDefinedUrl => FrameValue::UserDefinedUrl(ExtendedUrlFrame::parse(content, ctx)?),
		// The ID was previously upgraded, but the content remains unchanged, so version is necessary
		FrameKind::Picture => FrameValue::Picture(AttachedPictureFrame::parse(content, ctx)?),
		FrameKind::Popularimeter => FrameValue::Popularimeter(PopularimeterFrame::parse(content, ctx)?),
		FrameKind::Private => FrameValue::Private(PrivateFrame::parse(content, ctx)?),
		FrameKind::UniqueFileIdentifier => FrameValue::UniqueFileIdentifier(UniqueFileIdentifierFrame::parse(content, ctx)?),
		FrameKind::Chapter => FrameValue::Chapter(ChapterFrame::parse(content, ctx)?),
		FrameKind::TableOfContents => FrameValue::TableOfContents(TableOfContentsFrame::parse(content, ctx)?),
		FrameKind::EventTimingCodes => FrameValue::EventTimingCodes(EventTimingCodesFrame::parse(content, ctx)?),
		FrameKind::SynchronisedLyrics => FrameValue::SynchronisedLyrics(SynchronizedTextFrame::parse(content, ctx)?),
		FrameKind::Commercial => FrameValue::Commercial(CommercialFrame::parse(content, ctx)?),
	}))
}

fn parse_text(content: &[u8]) -> Result<String> {
	let mut reader = FrameReader::with_encoding(content)?;
	reader.consume_text(None, None)
}

/// Read the frames embedded at the end of a `CHAP` or `CTOC` frame
pub(crate) fn parse_nested_tag(content: &[u8], ctx: &FrameContext<'_>) -> Result<Tag> {
	if content.is_empty() {
		return Ok(Tag::new(ctx.version));
	}

	let depth = ctx.depth.saturating_add(1);
	if depth > ctx.options.max_nesting_depth {
		parse_mode_choice!(
			ctx.options.parsing_mode,
			STRICT: id3v2_err!(@BAIL NestingTooDeep),
			DEFAULT: {
				log::warn!("Chapter frames are nested too deeply, dropping the embedded frames");
				return Ok(Tag::new(ctx.version));
			}
		);
	}

	let nested_ctx = FrameContext::new(ctx.version, ctx.options, depth);

	// Embedded frames are never unsynchronised on their own, the outer frame was already restored
	let frames = crate::read::read_frames(content, &nested_ctx, false)?;
	Ok(Tag::from_frames(ctx.version, frames))
}
