use crate::error::Result;
use crate::frame::content::FrameContext;
use crate::frame::{FrameBuilder, FrameReader};
use crate::util::text::TextEncoding;
use crate::write::frame::WriteContext;

use byteorder::{BigEndian, ByteOrder};

/// The contents of a popularimeter ("POPM") frame
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PopularimeterFrame {
	/// An email address of the user performing the rating
	pub email: String,
	/// A rating of 1-255, where 1 is the worst and 255 is the best.
	/// A rating of 0 is unknown.
	pub rating: u8,
	/// A play counter for the user. It is to be incremented each time the file is played.
	pub counter: u64,
}

impl PopularimeterFrame {
	/// Create a new [`PopularimeterFrame`]
	pub fn new(email: impl Into<String>, rating: u8, counter: u64) -> Self {
		Self {
			email: email.into(),
			rating,
			counter,
		}
	}

	pub(crate) fn parse(body: &[u8], _ctx: &FrameContext<'_>) -> Result<Self> {
		let mut reader = FrameReader::new(body);

		let email = reader.consume_terminated_text(Some(TextEncoding::Latin1))?;
		let rating = reader.consume_u8()?;

		// The counter may be omitted entirely
		let counter_content = reader.consume_buffer(None)?;
		let counter = match counter_content.len() {
			0 => 0,
			len @ 1..=8 => BigEndian::read_uint(counter_content, len),
			_ => u64::MAX,
		};

		Ok(Self {
			email,
			rating,
			counter,
		})
	}

	pub(crate) fn create(&self, id: &str, ctx: &mut WriteContext) -> Result<FrameBuilder> {
		let mut builder = FrameBuilder::new(id, None).lossy(ctx.lossy);
		builder
			.append_terminated_text(&self.email, Some(TextEncoding::Latin1))?
			.append_number(u64::from(self.rating), 1);

		// When the counter reaches all one's, one byte is inserted in front of the counter
		// thus making the counter eight bits bigger in the same away as the play counter ("PCNT")
		//
		// $xx xx xx xx (xx ...)
		if u32::try_from(self.counter).is_ok() {
			builder.append_number(self.counter, 4);
		} else {
			let leading_zeros = (self.counter.leading_zeros() / 8) as usize;
			builder.append_number(self.counter, 8 - leading_zeros);
		}

		Ok(builder)
	}
}

#[cfg(test)]
mod tests {
	use super::PopularimeterFrame;
	use crate::config::ParseOptions;
	use crate::frame::content::FrameContext;
	use crate::header::Id3v2Version;
	use crate::write::frame::WriteContext;

	fn write(popm: &PopularimeterFrame) -> Vec<u8> {
		popm.create("POPM", &mut WriteContext::new(false))
			.unwrap()
			.into_buffer()
	}

	fn parse(body: &[u8]) -> PopularimeterFrame {
		let options = ParseOptions::new();
		PopularimeterFrame::parse(body, &FrameContext::new(Id3v2Version::V3, &options, 0)).unwrap()
	}

	#[test_log::test]
	fn counter_sizes() {
		let popm_u32_boundary = PopularimeterFrame::new("foo@bar.com", 255, u64::from(u32::MAX));
		let bytes = write(&popm_u32_boundary);
		assert_eq!(&bytes[12..], &[255, 0xFF, 0xFF, 0xFF, 0xFF]);
		assert_eq!(parse(&bytes), popm_u32_boundary);

		let popm_u40 = PopularimeterFrame::new("baz@qux.com", 196, u64::from(u32::MAX) + 1);
		let bytes = write(&popm_u40);
		assert_eq!(&bytes[12..], &[196, 0x01, 0x00, 0x00, 0x00, 0x00]);
		assert_eq!(parse(&bytes), popm_u40);
	}

	#[test_log::test]
	fn missing_counter() {
		let popm = parse(b"a@b.c\x00\x80");
		assert_eq!(popm.email, "a@b.c");
		assert_eq!(popm.rating, 128);
		assert_eq!(popm.counter, 0);
	}

	#[test_log::test]
	fn missing_rating() {
		let options = ParseOptions::new();
		let ctx = FrameContext::new(Id3v2Version::V3, &options, 0);

		assert!(PopularimeterFrame::parse(b"a@b.c\x00", &ctx).is_err());
	}
}
