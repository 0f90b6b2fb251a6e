use crate::error::Result;
use crate::frame::content::{FrameContext, parse_nested_tag};
use crate::frame::{FrameBuilder, FrameReader};
use crate::macros::id3v2_err;
use crate::tag::Tag;
use crate::util::text::TextEncoding;
use crate::write::frame::{WriteContext, write_frames};

const NO_OFFSET: u32 = u32::MAX;

/// An `ID3v2` chapter frame (`CHAP`)
///
/// A chapter covers a span of the audio, and can carry its own frames (a title, a picture, etc.)
/// in an embedded [`Tag`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChapterFrame {
	/// An identifier for the chapter, unique within the tag
	pub element_id: String,
	/// The start of the chapter in milliseconds
	pub start_time: u32,
	/// The end of the chapter in milliseconds
	pub end_time: u32,
	/// The byte offset of the first audio frame of the chapter
	pub start_offset: Option<u32>,
	/// The byte offset of the first audio frame following the chapter
	pub end_offset: Option<u32>,
	/// Frames describing the chapter
	pub tag: Tag,
}

impl ChapterFrame {
	/// Create a new [`ChapterFrame`] with no offsets or embedded frames
	pub fn new(element_id: impl Into<String>, start_time: u32, end_time: u32) -> Self {
		Self {
			element_id: element_id.into(),
			start_time,
			end_time,
			start_offset: None,
			end_offset: None,
			tag: Tag::default(),
		}
	}

	pub(crate) fn parse(body: &[u8], ctx: &FrameContext<'_>) -> Result<Self> {
		let mut reader = FrameReader::new(body);

		let element_id = reader.consume_terminated_text(Some(TextEncoding::Latin1))?;
		if element_id.is_empty() {
			id3v2_err!(@BAIL MissingElementId);
		}

		let start_time = reader.consume_number(4)? as u32;
		let end_time = reader.consume_number(4)? as u32;
		let start_offset = offset(reader.consume_number(4)? as u32);
		let end_offset = offset(reader.consume_number(4)? as u32);

		let tag = parse_nested_tag(reader.consume_buffer(None)?, ctx)?;

		Ok(Self {
			element_id,
			start_time,
			end_time,
			start_offset,
			end_offset,
			tag,
		})
	}

	pub(crate) fn create(&self, id: &str, ctx: &mut WriteContext) -> Result<FrameBuilder> {
		if self.element_id.is_empty() {
			id3v2_err!(@BAIL MissingElementId);
		}

		let mut builder = FrameBuilder::new(id, None).lossy(ctx.lossy);
		builder
			.append_terminated_text(&self.element_id, None)?
			.append_number(u64::from(self.start_time), 4)
			.append_number(u64::from(self.end_time), 4)
			.append_number(u64::from(self.start_offset.unwrap_or(NO_OFFSET)), 4)
			.append_number(u64::from(self.end_offset.unwrap_or(NO_OFFSET)), 4)
			.append_buffer(&write_frames(self.tag.frames(), ctx.lossy)?);

		Ok(builder)
	}
}

fn offset(value: u32) -> Option<u32> {
	(value != NO_OFFSET).then_some(value)
}

#[cfg(test)]
mod tests {
	use super::ChapterFrame;
	use crate::config::{ParseOptions, ParsingMode};
	use crate::error::Id3v2ErrorKind;
	use crate::frame::content::FrameContext;
	use crate::frame::{Frame, FrameValue};
	use crate::header::Id3v2Version;
	use crate::write::frame::WriteContext;

	fn chapter() -> ChapterFrame {
		let mut chapter = ChapterFrame::new("chp0", 0, 5000);
		chapter.end_offset = Some(1024);
		chapter
			.tag
			.push(Frame::new("TIT2", FrameValue::Text(String::from("Intro"))).unwrap());
		chapter
	}

	fn write(chapter: &ChapterFrame) -> Vec<u8> {
		chapter
			.create("CHAP", &mut WriteContext::new(false))
			.unwrap()
			.into_buffer()
	}

	#[test_log::test]
	fn layout() {
		let body = write(&ChapterFrame::new("c", 1, 2));
		assert_eq!(
			body,
			[
				b'c', 0, // Element ID
				0, 0, 0, 1, // Start time
				0, 0, 0, 2, // End time
				0xFF, 0xFF, 0xFF, 0xFF, // No start offset
				0xFF, 0xFF, 0xFF, 0xFF, // No end offset
			]
		);
	}

	#[test_log::test]
	fn nested_round_trip() {
		let chapter = chapter();
		let body = write(&chapter);

		let options = ParseOptions::new();
		let ctx = FrameContext::new(Id3v2Version::V3, &options, 0);
		let parsed = ChapterFrame::parse(&body, &ctx).unwrap();

		assert_eq!(parsed, chapter);
		assert_eq!(parsed.start_offset, None);
		assert_eq!(parsed.end_offset, Some(1024));
	}

	#[test_log::test]
	fn nesting_limit() {
		let body = write(&chapter());

		let options = ParseOptions::new().max_nesting_depth(0);
		let ctx = FrameContext::new(Id3v2Version::V3, &options, 0);
		let parsed = ChapterFrame::parse(&body, &ctx).unwrap();
		assert!(parsed.tag.frames().is_empty());

		let options = options.parsing_mode(ParsingMode::Strict);
		let ctx = FrameContext::new(Id3v2Version::V3, &options, 0);
		let err = ChapterFrame::parse(&body, &ctx).unwrap_err();
		assert!(matches!(err.id3v2_kind(), Some(Id3v2ErrorKind::NestingTooDeep)));
	}

	#[test_log::test]
	fn missing_element_id() {
		let err = ChapterFrame::new("", 0, 0)
			.create("CHAP", &mut WriteContext::new(false))
			.unwrap_err();
		assert!(matches!(err.id3v2_kind(), Some(Id3v2ErrorKind::MissingElementId)));

		let options = ParseOptions::new();
		let ctx = FrameContext::new(Id3v2Version::V3, &options, 0);
		assert!(ChapterFrame::parse(&[0; 17], &ctx).is_err());
	}
}
