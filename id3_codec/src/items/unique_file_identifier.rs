use crate::error::Result;
use crate::frame::content::FrameContext;
use crate::frame::{FrameBuilder, FrameReader};
use crate::util::text::TextEncoding;
use crate::write::frame::WriteContext;

/// An `ID3v2` unique file identifier frame (`UFID`)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UniqueFileIdentifierFrame {
	/// The non-empty owner of the identifier
	pub owner: String,
	/// The binary payload with up to 64 bytes of data
	pub identifier: Vec<u8>,
}

impl UniqueFileIdentifierFrame {
	/// Create a new [`UniqueFileIdentifierFrame`]
	pub fn new(owner: impl Into<String>, identifier: impl Into<Vec<u8>>) -> Self {
		Self {
			owner: owner.into(),
			identifier: identifier.into(),
		}
	}

	pub(crate) fn parse(body: &[u8], _ctx: &FrameContext<'_>) -> Result<Self> {
		let mut reader = FrameReader::new(body);

		let owner = reader.consume_terminated_text(Some(TextEncoding::Latin1))?;
		let identifier = reader.consume_buffer(None)?.to_vec();

		if identifier.len() > 64 {
			log::warn!("UFID identifier is longer than 64 bytes ({})", identifier.len());
		}

		Ok(Self { owner, identifier })
	}

	pub(crate) fn create(&self, id: &str, ctx: &mut WriteContext) -> Result<FrameBuilder> {
		let mut builder = FrameBuilder::new(id, None).lossy(ctx.lossy);
		builder
			.append_terminated_text(&self.owner, None)?
			.append_buffer(&self.identifier);

		Ok(builder)
	}
}

#[cfg(test)]
mod tests {
	use super::UniqueFileIdentifierFrame;
	use crate::config::ParseOptions;
	use crate::frame::content::FrameContext;
	use crate::header::Id3v2Version;
	use crate::write::frame::WriteContext;

	#[test_log::test]
	fn musicbrainz_recording_id() {
		let body = b"http://musicbrainz.org\x00a5b3c1f4-0e2d-4f5e-9a1c-7d8e9f0a1b2c";

		let options = ParseOptions::new();
		let ctx = FrameContext::new(Id3v2Version::V3, &options, 0);
		let ufid = UniqueFileIdentifierFrame::parse(body, &ctx).unwrap();

		assert_eq!(ufid.owner, "http://musicbrainz.org");
		assert_eq!(ufid.identifier, b"a5b3c1f4-0e2d-4f5e-9a1c-7d8e9f0a1b2c");

		let written = ufid
			.create("UFID", &mut WriteContext::new(false))
			.unwrap()
			.into_buffer();
		assert_eq!(written, body);
	}
}
