use crate::config::ParsingMode;
use crate::error::Result;
use crate::frame::content::FrameContext;
use crate::frame::{FrameBuilder, FrameReader};
use crate::macros::{byte_enum, id3v2_err};
use crate::util::text::TextEncoding;
use crate::write::frame::WriteContext;

byte_enum! {
	/// The unit used for [`SynchronizedTextFrame`] and [`EventTimingCodesFrame`](crate::items::EventTimingCodesFrame) timestamps
	pub enum TimestampFormat {
		/// The unit is MPEG frames
		MPEG = 1,
		/// The unit is milliseconds
		MS = 2,
	}
}

impl TimestampFormat {
	pub(crate) fn parse(byte: u8, ctx: &FrameContext<'_>) -> Result<Self> {
		let format = Self::from_u8(byte);
		if let Self::Undefined(_) = format {
			if ctx.options.parsing_mode == ParsingMode::Strict {
				id3v2_err!(@BAIL BadTimestampFormat);
			}

			log::warn!("Encountered an unknown timestamp format: {byte}");
		}

		Ok(format)
	}
}

byte_enum! {
	/// The type of text stored in a [`SynchronizedTextFrame`]
	pub enum SyncTextContentType {
		/// Other
		Other = 0,
		/// Lyrics
		Lyrics = 1,
		/// Text transcription
		TextTranscription = 2,
		/// Movement/part name (e.g. "Adagio")
		PartName = 3,
		/// Events (e.g. "Don Quijote enters the stage")
		Events = 4,
		/// Chord (e.g. "Bb F Fsus")
		Chord = 5,
		/// Trivia/'pop up' information
		Trivia = 6,
		/// URLs to webpages
		WebpageURL = 7,
		/// URLs to images
		ImageURL = 8,
	}
}

/// A single line of a [`SynchronizedTextFrame`]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SyncedText {
	/// The text
	pub text: String,
	/// When the text occurs, according to the frame's [`TimestampFormat`]
	pub timestamp: u32,
}

/// Represents an ID3v2 synchronized text frame (`SYLT`)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SynchronizedTextFrame {
	/// ISO-639-2 language code (3 bytes)
	pub language: [u8; 3],
	/// The format of the timestamps
	pub timestamp_format: TimestampFormat,
	/// The type of content stored
	pub content_type: SyncTextContentType,
	/// Unique content description
	pub short_text: String,
	/// Collection of timestamps and text, in the order they appear
	pub synchronised_text: Vec<SyncedText>,
}

impl SynchronizedTextFrame {
	pub(crate) fn parse(body: &[u8], ctx: &FrameContext<'_>) -> Result<Self> {
		let mut reader = FrameReader::with_encoding(body)?;

		let mut language = [0; 3];
		language.copy_from_slice(reader.consume_buffer(Some(3))?);

		let timestamp_format = TimestampFormat::parse(reader.consume_u8()?, ctx)?;
		let content_type = SyncTextContentType::from_u8(reader.consume_u8()?);
		let short_text = reader.consume_terminated_text(None)?;

		let mut synchronised_text = Vec::new();
		while !reader.is_empty() {
			let Ok(text) = reader.consume_terminated_text(None) else {
				id3v2_err!(@BAIL BadSyncText);
			};

			let Ok(timestamp) = reader.consume_number(4) else {
				id3v2_err!(@BAIL BadSyncText);
			};

			synchronised_text.push(SyncedText {
				text,
				timestamp: timestamp as u32,
			});
		}

		Ok(Self {
			language,
			timestamp_format,
			content_type,
			short_text,
			synchronised_text,
		})
	}

	pub(crate) fn create(&self, id: &str, ctx: &mut WriteContext) -> Result<FrameBuilder> {
		let mut builder = FrameBuilder::new(id, Some(TextEncoding::UTF16)).lossy(ctx.lossy);
		builder
			.append_buffer(&self.language)
			.append_number(u64::from(self.timestamp_format.as_u8()), 1)
			.append_number(u64::from(self.content_type.as_u8()), 1)
			.append_terminated_text(&self.short_text, None)?
			.append_array(&self.synchronised_text, |builder, line| {
				builder
					.append_terminated_text(&line.text, None)?
					.append_number(u64::from(line.timestamp), 4);
				Ok(())
			})?;

		Ok(builder)
	}
}
