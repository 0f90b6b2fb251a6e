use crate::error::Result;
use crate::frame::content::FrameContext;
use crate::frame::{FrameBuilder, FrameReader};
use crate::util::text::TextEncoding;
use crate::write::frame::WriteContext;

/// An `ID3v2` private frame (`PRIV`)
///
/// This frame is used to contain information from a software producer that its program uses and
/// does not fit into the other frames.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PrivateFrame {
	/// A URL containing an email address, or a link to a location where an email can be found,
	/// that belongs to the organisation responsible for the frame
	pub owner: String,
	/// Binary data
	pub private_data: Vec<u8>,
}

impl PrivateFrame {
	/// Create a new [`PrivateFrame`]
	pub fn new(owner: impl Into<String>, private_data: impl Into<Vec<u8>>) -> Self {
		Self {
			owner: owner.into(),
			private_data: private_data.into(),
		}
	}

	pub(crate) fn parse(body: &[u8], _ctx: &FrameContext<'_>) -> Result<Self> {
		let mut reader = FrameReader::new(body);

		let owner = reader.consume_terminated_text(Some(TextEncoding::Latin1))?;
		let private_data = reader.consume_buffer(None)?.to_vec();

		Ok(Self {
			owner,
			private_data,
		})
	}

	pub(crate) fn create(&self, id: &str, ctx: &mut WriteContext) -> Result<FrameBuilder> {
		let mut builder = FrameBuilder::new(id, None).lossy(ctx.lossy);
		builder
			.append_terminated_text(&self.owner, None)?
			.append_buffer(&self.private_data);

		Ok(builder)
	}
}
