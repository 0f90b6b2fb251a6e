use crate::error::Result;
use crate::frame::content::FrameContext;
use crate::frame::{FrameBuilder, FrameReader};
use crate::util::text::TextEncoding;
use crate::write::frame::WriteContext;

/// A text frame that has a language, used for both `COMM` and `USLT`
///
/// Similar to `TXXX` and `WXXX` frames, comments and lyrics are told apart by their short text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LanguageFrame {
	/// ISO-639-2 language code (3 bytes)
	pub language: [u8; 3],
	/// Unique content description
	pub short_text: String,
	/// The actual frame content
	pub text: String,
}

impl LanguageFrame {
	/// Create a new [`LanguageFrame`]
	pub fn new(language: [u8; 3], short_text: impl Into<String>, text: impl Into<String>) -> Self {
		Self {
			language,
			short_text: short_text.into(),
			text: text.into(),
		}
	}

	pub(crate) fn parse(body: &[u8], _ctx: &FrameContext<'_>) -> Result<Self> {
		let mut reader = FrameReader::with_encoding(body)?;

		let mut language = [0; 3];
		language.copy_from_slice(reader.consume_buffer(Some(3))?);

		let short_text = reader.consume_terminated_text(None)?;
		let text = reader.consume_text(None, None)?;

		Ok(Self {
			language,
			short_text,
			text,
		})
	}

	pub(crate) fn create(&self, id: &str, ctx: &mut WriteContext) -> Result<FrameBuilder> {
		let mut builder = FrameBuilder::new(id, Some(TextEncoding::UTF16)).lossy(ctx.lossy);
		builder.append_buffer(&self.language);
		builder.append_terminated_text(&self.short_text, None)?;
		builder.append_text(&self.text, None)?;

		Ok(builder)
	}
}
