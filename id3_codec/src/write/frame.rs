use crate::error::Result;
use crate::frame::{Frame, FrameBuilder, FrameValue};
use crate::util::text::TextEncoding;

/// State shared by every frame written into the same tag
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct WriteContext {
	/// Replace characters that can't be represented in Latin-1, rather than failing
	pub(crate) lossy: bool,
	/// Only the first `CTOC` frame of a tag is marked as the top level table of contents
	pub(crate) wrote_top_level_toc: bool,
}

impl WriteContext {
	pub(crate) fn new(lossy: bool) -> Self {
		Self {
			lossy,
			wrote_top_level_toc: false,
		}
	}
}

/// Encode each frame with an ID3v2.3 frame header
///
/// Every call starts a new tag, so frames embedded in `CHAP`/`CTOC` frames get their own context.
pub(crate) fn write_frames(frames: &[Frame], lossy: bool) -> Result<Vec<u8>> {
	let mut ctx = WriteContext::new(lossy);
	let mut content = Vec::new();

	for frame in frames {
		let Some(builder) = create_frame(frame, &mut ctx)? else {
			log::debug!("Skipping empty frame `{}`", frame.id());
			continue;
		};

		log::trace!("Writing frame `{}`", frame.id());
		content.extend(builder.into_buffer_with_partial_header()?);
	}

	Ok(content)
}

fn create_frame(frame: &Frame, ctx: &mut WriteContext) -> Result<Option<FrameBuilder>> {
	let id = frame.id();

	let builder = match &frame.value {
		FrameValue::Text(text) => {
			if text.is_empty() {
				return Ok(None);
			}

			let mut builder = FrameBuilder::new(id, Some(TextEncoding::UTF16)).lossy(ctx.lossy);
			builder.append_text(text, None)?;
			builder
		},
		FrameValue::Url(url) => {
			if url.is_empty() {
				return Ok(None);
			}

			let mut builder = FrameBuilder::new(id, None).lossy(ctx.lossy);
			builder.append_text(url, None)?;
			builder
		},
		FrameValue::Comment(value) | FrameValue::UnsynchronisedLyrics(value) => {
			value.create(id, ctx)?
		},
		FrameValue::UserDefinedText(value) => value.create(id, ctx)?,
		FrameValue::UserDefinedUrl(value) => value.create(id, ctx)?,
		FrameValue::Picture(value) => value.create(id, ctx)?,
		FrameValue::Popularimeter(value) => value.create(id, ctx)?,
		FrameValue::Private(value) => value.create(id, ctx)?,
		FrameValue::UniqueFileIdentifier(value) => value.create(id, ctx)?,
		FrameValue::Chapter(value) => value.create(id, ctx)?,
		FrameValue::TableOfContents(value) => value.create(id, ctx)?,
		FrameValue::EventTimingCodes(value) => value.create(id, ctx)?,
		FrameValue::SynchronisedLyrics(value) => value.create(id, ctx)?,
		FrameValue::Commercial(value) => value.create(id, ctx)?,
	};

	Ok(Some(builder))
}

#[cfg(test)]
mod tests {
	use super::write_frames;
	use crate::frame::{Frame, FrameValue};
	use crate::items::TableOfContentsFrame;

	#[test_log::test]
	fn text_frame_layout() {
		let frames = [Frame::new("TIT2", FrameValue::Text(String::from("abc"))).unwrap()];

		assert_eq!(
			write_frames(&frames, false).unwrap(),
			[
				b'T', b'I', b'T', b'2', 0x00, 0x00, 0x00, 0x09, 0x00, 0x00, 0x01, 0xFF, 0xFE, b'a',
				0x00, b'b', 0x00, b'c', 0x00
			]
		);
	}

	#[test_log::test]
	fn url_frames_are_latin1() {
		let frames = [Frame::new("WOAR", FrameValue::Url(String::from("https://a.b"))).unwrap()];
		assert_eq!(
			write_frames(&frames, false).unwrap(),
			b"WOAR\x00\x00\x00\x0B\x00\x00https://a.b"
		);

		let frames = [Frame::new("WOAR", FrameValue::Url(String::from("\u{263A}"))).unwrap()];
		assert!(write_frames(&frames, false).is_err());
		assert_eq!(
			write_frames(&frames, true).unwrap(),
			b"WOAR\x00\x00\x00\x01\x00\x00?"
		);
	}

	#[test_log::test]
	fn only_the_first_toc_is_top_level() {
		let toc = |id: &str| {
			Frame::new(
				"CTOC",
				FrameValue::TableOfContents(TableOfContentsFrame::new(
					id,
					false,
					vec![String::from("chp0")],
				)),
			)
			.unwrap()
		};

		let content = write_frames(&[toc("a"), toc("b")], false).unwrap();

		// Frame header, element ID + terminator, flags
		assert_eq!(content[12], 0x02);
		let second = 10 + 2 + 1 + 1 + 5;
		assert_eq!(content[second + 12], 0x00);
	}
}
