use crate::error::Result;
use crate::frame::content::FrameContext;
use crate::frame::{FrameBuilder, FrameReader};
use crate::util::text::TextEncoding;
use crate::write::frame::WriteContext;

/// An extended `ID3v2` text frame (`TXXX`)
///
/// A tag can hold any number of these, told apart by their descriptions. When merging tags, a
/// new frame replaces an existing one with the same description.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExtendedTextFrame {
	/// Unique content description
	pub description: String,
	/// The actual frame content
	pub content: String,
}

impl ExtendedTextFrame {
	/// Create a new [`ExtendedTextFrame`]
	pub fn new(description: impl Into<String>, content: impl Into<String>) -> Self {
		Self {
			description: description.into(),
			content: content.into(),
		}
	}

	pub(crate) fn parse(body: &[u8], _ctx: &FrameContext<'_>) -> Result<Self> {
		let mut reader = FrameReader::with_encoding(body)?;

		let description = reader.consume_terminated_text(None)?;
		let content = reader.consume_text(None, None)?;

		Ok(Self {
			description,
			content,
		})
	}

	pub(crate) fn create(&self, id: &str, ctx: &mut WriteContext) -> Result<FrameBuilder> {
		let mut builder = FrameBuilder::new(id, Some(TextEncoding::UTF16)).lossy(ctx.lossy);
		builder
			.append_terminated_text(&self.description, None)?
			.append_text(&self.content, None)?;

		Ok(builder)
	}
}
