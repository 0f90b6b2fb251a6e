use crate::error::Result;
use crate::frame::content::FrameContext;
use crate::frame::{FrameBuilder, FrameReader};
use crate::header::Id3v2Version;
use crate::macros::byte_enum;
use crate::util::text::{TextEncoding, latin1_decode};
use crate::write::frame::WriteContext;

byte_enum! {
	/// The picture type, according to ID3v2 APIC
	pub enum PictureType {
		/// Other
		Other = 0,
		/// 32x32 pixels 'file icon' (PNG only)
		Icon = 1,
		/// Other file icon
		OtherIcon = 2,
		/// Cover (front)
		CoverFront = 3,
		/// Cover (back)
		CoverBack = 4,
		/// Leaflet page
		Leaflet = 5,
		/// Media (e.g. label side of CD)
		Media = 6,
		/// Lead artist/lead performer/soloist
		LeadArtist = 7,
		/// Artist/performer
		Artist = 8,
		/// Conductor
		Conductor = 9,
		/// Band/Orchestra
		Band = 10,
		/// Composer
		Composer = 11,
		/// Lyricist/text writer
		Lyricist = 12,
		/// Recording Location
		RecordingLocation = 13,
		/// During recording
		DuringRecording = 14,
		/// During performance
		DuringPerformance = 15,
		/// Movie/video screen capture
		ScreenCapture = 16,
		/// A bright coloured fish
		BrightFish = 17,
		/// Illustration
		Illustration = 18,
		/// Band/artist logotype
		BandLogo = 19,
		/// Publisher/Studio logotype
		PublisherLogo = 20,
	}
}

impl PictureType {
	/// A human readable name for the picture type
	///
	/// # Examples
	///
	/// ```rust
	/// use id3_codec::items::PictureType;
	///
	/// assert_eq!(PictureType::CoverFront.name(), "front cover");
	/// assert_eq!(PictureType::from_u8(0x42).name(), "undefined");
	/// ```
	pub fn name(&self) -> &'static str {
		match self {
			Self::Other => "other",
			Self::Icon => "file icon",
			Self::OtherIcon => "other file icon",
			Self::CoverFront => "front cover",
			Self::CoverBack => "back cover",
			Self::Leaflet => "leaflet page",
			Self::Media => "media",
			Self::LeadArtist => "lead artist",
			Self::Artist => "artist",
			Self::Conductor => "conductor",
			Self::Band => "band",
			Self::Composer => "composer",
			Self::Lyricist => "lyricist",
			Self::RecordingLocation => "recording location",
			Self::DuringRecording => "during recording",
			Self::DuringPerformance => "during performance",
			Self::ScreenCapture => "video screen capture",
			Self::BrightFish => "a bright coloured fish",
			Self::Illustration => "illustration",
			Self::BandLogo => "band logotype",
			Self::PublisherLogo => "publisher logotype",
			Self::Undefined(_) => "undefined",
		}
	}
}

impl Default for PictureType {
	fn default() -> Self {
		Self::CoverFront
	}
}

/// An `ID3v2` attached picture frame (`APIC`)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttachedPictureFrame {
	/// The MIME type of the image
	///
	/// If this is `None` when writing, it is detected from the image data.
	pub mime_type: Option<String>,
	/// What the picture shows
	pub picture_type: PictureType,
	/// A description of the picture
	pub description: String,
	/// The image data
	pub data: Vec<u8>,
}

impl AttachedPictureFrame {
	/// Create a new [`AttachedPictureFrame`] with an unknown MIME type
	///
	/// # Examples
	///
	/// ```rust
	/// use id3_codec::items::{AttachedPictureFrame, PictureType};
	///
	/// let picture = AttachedPictureFrame::new(PictureType::CoverFront, vec![0xFF, 0xD8, 0xFF]);
	/// assert!(picture.mime_type.is_none());
	/// ```
	pub fn new(picture_type: PictureType, data: Vec<u8>) -> Self {
		Self {
			mime_type: None,
			picture_type,
			description: String::new(),
			data,
		}
	}

	pub(crate) fn parse(body: &[u8], ctx: &FrameContext<'_>) -> Result<Self> {
		let mut reader = FrameReader::with_encoding(body)?;

		let mime_type = if ctx.version == Id3v2Version::V2 {
			let format = reader.consume_buffer(Some(3))?;
			Some(match format {
				b"JPG" => String::from("image/jpeg"),
				b"PNG" => String::from("image/png"),
				_ => format!("image/{}", latin1_decode(format).to_ascii_lowercase()),
			})
		} else {
			let mime_type = reader.consume_terminated_text(Some(TextEncoding::Latin1))?;
			(!mime_type.is_empty()).then_some(mime_type)
		};

		let picture_type = PictureType::from_u8(reader.consume_u8()?);
		let description = reader.consume_terminated_text(None)?;
		let data = reader.consume_buffer(None)?.to_vec();

		Ok(Self {
			mime_type,
			picture_type,
			description,
			data,
		})
	}

	pub(crate) fn create(&self, id: &str, ctx: &mut WriteContext) -> Result<FrameBuilder> {
		// Some players can't display a picture with an empty UTF-16 description
		let encoding = if self.description.is_empty() {
			TextEncoding::Latin1
		} else {
			TextEncoding::UTF16
		};

		let mime_type = match &self.mime_type {
			Some(mime_type) => mime_type.as_str(),
			None => sniff_mime_type(&self.data),
		};

		let mut builder = FrameBuilder::new(id, Some(encoding)).lossy(ctx.lossy);
		builder
			.append_terminated_text(mime_type, Some(TextEncoding::Latin1))?
			.append_number(u64::from(self.picture_type.as_u8()), 1)
			.append_terminated_text(&self.description, None)?
			.append_buffer(&self.data);

		Ok(builder)
	}
}

fn sniff_mime_type(data: &[u8]) -> &'static str {
	if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
		"image/jpeg"
	} else {
		"image/png"
	}
}
