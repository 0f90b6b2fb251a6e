use crate::error::Result;
use crate::frame::content::{FrameContext, parse_nested_tag};
use crate::frame::{FrameBuilder, FrameReader};
use crate::macros::{err, id3v2_err};
use crate::tag::Tag;
use crate::util::text::TextEncoding;
use crate::write::frame::{WriteContext, write_frames};

const FLAG_ORDERED: u8 = 0x01;
const FLAG_TOP_LEVEL: u8 = 0x02;

/// An `ID3v2` table of contents frame (`CTOC`)
///
/// This lists the element IDs of [`ChapterFrame`](crate::items::ChapterFrame)s (or other tables of
/// contents) that make up a section of the audio.
///
/// The top-level flag isn't stored. When writing, it is set on the first table of contents in
/// each tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableOfContentsFrame {
	/// An identifier for the table of contents, unique within the tag
	pub element_id: String,
	/// Whether the child elements are in order
	pub ordered: bool,
	/// The element IDs of the children
	pub child_element_ids: Vec<String>,
	/// Frames describing the table of contents
	pub tag: Tag,
}

impl TableOfContentsFrame {
	/// Create a new [`TableOfContentsFrame`] with no embedded frames
	pub fn new(element_id: impl Into<String>, ordered: bool, child_element_ids: Vec<String>) -> Self {
		Self {
			element_id: element_id.into(),
			ordered,
			child_element_ids,
			tag: Tag::default(),
		}
	}

	pub(crate) fn parse(body: &[u8], ctx: &FrameContext<'_>) -> Result<Self> {
		let mut reader = FrameReader::new(body);

		let element_id = reader.consume_terminated_text(Some(TextEncoding::Latin1))?;
		if element_id.is_empty() {
			id3v2_err!(@BAIL MissingElementId);
		}

		let flags = reader.consume_u8()?;
		let entry_count = reader.consume_u8()?;

		let mut child_element_ids = Vec::with_capacity(usize::from(entry_count));
		for _ in 0..entry_count {
			child_element_ids.push(reader.consume_terminated_text(Some(TextEncoding::Latin1))?);
		}

		let tag = parse_nested_tag(reader.consume_buffer(None)?, ctx)?;

		Ok(Self {
			element_id,
			ordered: flags & FLAG_ORDERED == FLAG_ORDERED,
			child_element_ids,
			tag,
		})
	}

	pub(crate) fn create(&self, id: &str, ctx: &mut WriteContext) -> Result<FrameBuilder> {
		if self.element_id.is_empty() {
			id3v2_err!(@BAIL MissingElementId);
		}

		let Ok(entry_count) = u8::try_from(self.child_element_ids.len()) else {
			err!(TooMuchData);
		};

		let mut flags = 0;
		if self.ordered {
			flags |= FLAG_ORDERED;
		}

		if !ctx.wrote_top_level_toc {
			flags |= FLAG_TOP_LEVEL;
			ctx.wrote_top_level_toc = true;
		}

		let mut builder = FrameBuilder::new(id, None).lossy(ctx.lossy);
		builder
			.append_terminated_text(&self.element_id, None)?
			.append_number(u64::from(flags), 1)
			.append_number(u64::from(entry_count), 1)
			.append_array(&self.child_element_ids, |builder, child| {
				builder.append_terminated_text(child, None)?;
				Ok(())
			})?
			.append_buffer(&write_frames(self.tag.frames(), ctx.lossy)?);

		Ok(builder)
	}
}

#[cfg(test)]
mod tests {
	use super::TableOfContentsFrame;
	use crate::config::ParseOptions;
	use crate::frame::content::FrameContext;
	use crate::frame::{Frame, FrameValue};
	use crate::header::Id3v2Version;
	use crate::write::frame::WriteContext;

	#[test_log::test]
	fn top_level_flag_on_first_only() {
		let toc = TableOfContentsFrame::new("toc", true, vec![String::from("chp0")]);

		let mut ctx = WriteContext::new(false);
		let first = toc.create("CTOC", &mut ctx).unwrap().into_buffer();
		let second = toc.create("CTOC", &mut ctx).unwrap().into_buffer();

		assert_eq!(first, b"toc\x00\x03\x01chp0\x00");
		assert_eq!(second, b"toc\x00\x01\x01chp0\x00");
	}

	#[test_log::test]
	fn round_trip() {
		let mut toc = TableOfContentsFrame::new(
			"toc",
			false,
			vec![String::from("chp0"), String::from("chp1")],
		);
		toc.tag
			.push(Frame::new("TIT2", FrameValue::Text(String::from("Chapters"))).unwrap());

		let body = toc
			.create("CTOC", &mut WriteContext::new(false))
			.unwrap()
			.into_buffer();

		let options = ParseOptions::new();
		let ctx = FrameContext::new(Id3v2Version::V3, &options, 0);
		assert_eq!(TableOfContentsFrame::parse(&body, &ctx).unwrap(), toc);
	}

	#[test_log::test]
	fn truncated_children() {
		let options = ParseOptions::new();
		let ctx = FrameContext::new(Id3v2Version::V3, &options, 0);

		// Two children declared, one present
		assert!(TableOfContentsFrame::parse(b"toc\x00\x00\x02chp0\x00", &ctx).is_err());
	}
}
