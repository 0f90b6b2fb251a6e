use crate::error::Result;
use crate::frame::content::FrameContext;
use crate::frame::{FrameBuilder, FrameReader};
use crate::util::text::TextEncoding;
use crate::write::frame::WriteContext;

/// An extended `ID3v2` URL frame (`WXXX`)
///
/// Only the description uses the frame's text encoding, the URL itself is always Latin-1 and runs
/// to the end of the frame.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExtendedUrlFrame {
	/// Unique content description
	pub description: String,
	/// The URL
	pub content: String,
}

impl ExtendedUrlFrame {
	/// Create a new [`ExtendedUrlFrame`]
	pub fn new(description: impl Into<String>, content: impl Into<String>) -> Self {
		Self {
			description: description.into(),
			content: content.into(),
		}
	}

	pub(crate) fn parse(body: &[u8], _ctx: &FrameContext<'_>) -> Result<Self> {
		let mut reader = FrameReader::with_encoding(body)?;

		let description = reader.consume_terminated_text(None)?;
		let content = reader.consume_text(None, Some(TextEncoding::Latin1))?;

		Ok(Self {
			description,
			content,
		})
	}

	pub(crate) fn create(&self, id: &str, ctx: &mut WriteContext) -> Result<FrameBuilder> {
		let mut builder = FrameBuilder::new(id, Some(TextEncoding::UTF16)).lossy(ctx.lossy);
		builder
			.append_terminated_text(&self.description, None)?
			.append_text(&self.content, Some(TextEncoding::Latin1))?;

		Ok(builder)
	}
}

#[cfg(test)]
mod tests {
	use super::ExtendedUrlFrame;
	use crate::config::ParseOptions;
	use crate::frame::content::FrameContext;
	use crate::header::Id3v2Version;
	use crate::write::frame::WriteContext;

	#[test_log::test]
	fn url_is_latin1() {
		let wxxx = ExtendedUrlFrame::new("home", "https://example.com");
		let body = wxxx
			.create("WXXX", &mut WriteContext::new(false))
			.unwrap()
			.into_buffer();

		assert!(body.ends_with(b"\x00\x00https://example.com"));

		let options = ParseOptions::new();
		let ctx = FrameContext::new(Id3v2Version::V3, &options, 0);
		assert_eq!(ExtendedUrlFrame::parse(&body, &ctx).unwrap(), wxxx);
	}

	#[test_log::test]
	fn url_outside_latin1() {
		let wxxx = ExtendedUrlFrame::new("", "https://example.com/\u{263A}");
		assert!(wxxx.create("WXXX", &mut WriteContext::new(false)).is_err());
		assert!(wxxx.create("WXXX", &mut WriteContext::new(true)).is_ok());
	}
}
