//! ID3v2 frames
//!
//! A [`Frame`] is a single unit of metadata within a tag, such as the title or a picture. Its
//! value is stored as a [`FrameValue`], with one variant per kind of frame.

pub(crate) mod content;
mod cursor;
pub(crate) mod header;
pub(crate) mod read;

pub use cursor::{FrameBuilder, FrameReader};

use crate::items::{
	AttachedPictureFrame, ChapterFrame, CommercialFrame, EventTimingCodesFrame, ExtendedTextFrame,
	ExtendedUrlFrame, LanguageFrame, PopularimeterFrame, PrivateFrame, SynchronizedTextFrame,
	TableOfContentsFrame, UniqueFileIdentifierFrame,
};

/// The kind of value a frame identifier holds
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum FrameKind {
	Text,
	Url,
	Comment,
	UnsynchronisedLyrics,
	UserDefinedText,
	UserDefinedUrl,
	Picture,
	Popularimeter,
	Private,
	UniqueFileIdentifier,
	Chapter,
	TableOfContents,
	EventTimingCodes,
	SynchronisedLyrics,
	Commercial,
}

impl FrameKind {
	/// The codec for a frame identifier
	///
	/// Unrecognized `T***` and `W***` identifiers are treated as plain text and URL frames.
	pub(crate) fn for_id(id: &str) -> Option<Self> {
		if id.len() != 4 {
			return None;
		}

		let kind = match id {
			"COMM" => Self::Comment,
			"USLT" => Self::UnsynchronisedLyrics,
			"TXXX" => Self::UserDefinedText,
			"WXXX" => Self::UserDefinedUrl,
			"APIC" => Self::Picture,
			"POPM" => Self::Popularimeter,
			"PRIV" => Self::Private,
			"UFID" => Self::UniqueFileIdentifier,
			"CHAP" => Self::Chapter,
			"CTOC" => Self::TableOfContents,
			"ETCO" => Self::EventTimingCodes,
			"SYLT" => Self::SynchronisedLyrics,
			"COMR" => Self::Commercial,
			_ if id.starts_with('T') => Self::Text,
			_ if id.starts_with('W') => Self::Url,
			_ => return None,
		};

		Some(kind)
	}
}

/// The value of a frame
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameValue {
	/// Any text information frame (`T***`)
	///
	/// ID3v2.4 allows multiple values separated by a null byte, which are kept as-is.
	Text(String),
	/// Any URL link frame (`W***`), always Latin-1
	Url(String),
	/// `COMM`
	Comment(LanguageFrame),
	/// `USLT`
	UnsynchronisedLyrics(LanguageFrame),
	/// `TXXX`
	UserDefinedText(ExtendedTextFrame),
	/// `WXXX`
	UserDefinedUrl(ExtendedUrlFrame),
	/// `APIC`
	Picture(AttachedPictureFrame),
	/// `POPM`
	Popularimeter(PopularimeterFrame),
	/// `PRIV`
	Private(PrivateFrame),
	/// `UFID`
	UniqueFileIdentifier(UniqueFileIdentifierFrame),
	/// `CHAP`
	Chapter(ChapterFrame),
	/// `CTOC`
	TableOfContents(TableOfContentsFrame),
	/// `ETCO`
	EventTimingCodes(EventTimingCodesFrame),
	/// `SYLT`
	SynchronisedLyrics(SynchronizedTextFrame),
	/// `COMR`
	Commercial(CommercialFrame),
}

impl FrameValue {
	pub(crate) fn kind(&self) -> FrameKind {
		match self {
			FrameValue::Text(_) => FrameKind::Text,
			FrameValue::Url(_) => FrameKind::Url,
			FrameValue::Comment(_) => FrameKind::Comment,
			FrameValue::UnsynchronisedLyrics(_) => FrameKind::UnsynchronisedLyrics,
			FrameValue::UserDefinedText(_) => FrameKind::UserDefinedText,
			FrameValue::UserDefinedUrl(_) => FrameKind::UserDefinedUrl,
			FrameValue::Picture(_) => FrameKind::Picture,
			FrameValue::Popularimeter(_) => FrameKind::Popularimeter,
			FrameValue::Private(_) => FrameKind::Private,
			FrameValue::UniqueFileIdentifier(_) => FrameKind::UniqueFileIdentifier,
			FrameValue::Chapter(_) => FrameKind::Chapter,
			FrameValue::TableOfContents(_) => FrameKind::TableOfContents,
			FrameValue::EventTimingCodes(_) => FrameKind::EventTimingCodes,
			FrameValue::SynchronisedLyrics(_) => FrameKind::SynchronisedLyrics,
			FrameValue::Commercial(_) => FrameKind::Commercial,
		}
	}

	/// A short name for the kind of value, used in errors
	pub fn name(&self) -> &'static str {
		match self {
			FrameValue::Text(_) => "Text",
			FrameValue::Url(_) => "Url",
			FrameValue::Comment(_) => "Comment",
			FrameValue::UnsynchronisedLyrics(_) => "UnsynchronisedLyrics",
			FrameValue::UserDefinedText(_) => "UserDefinedText",
			FrameValue::UserDefinedUrl(_) => "UserDefinedUrl",
			FrameValue::Picture(_) => "Picture",
			FrameValue::Popularimeter(_) => "Popularimeter",
			FrameValue::Private(_) => "Private",
			FrameValue::UniqueFileIdentifier(_) => "UniqueFileIdentifier",
			FrameValue::Chapter(_) => "Chapter",
			FrameValue::TableOfContents(_) => "TableOfContents",
			FrameValue::EventTimingCodes(_) => "EventTimingCodes",
			FrameValue::SynchronisedLyrics(_) => "SynchronisedLyrics",
			FrameValue::Commercial(_) => "Commercial",
		}
	}

	/// The `description` of a value, if it has one
	///
	/// This is what repeated `TXXX` and `WXXX` frames are told apart by.
	pub fn description(&self) -> Option<&str> {
		match self {
			FrameValue::UserDefinedText(frame) => Some(&frame.description),
			FrameValue::UserDefinedUrl(frame) => Some(&frame.description),
			FrameValue::Comment(frame) | FrameValue::UnsynchronisedLyrics(frame) => {
				Some(&frame.short_text)
			},
			FrameValue::Picture(frame) => Some(&frame.description),
			FrameValue::SynchronisedLyrics(frame) => Some(&frame.short_text),
			FrameValue::Commercial(frame) => Some(&frame.description),
			_ => None,
		}
	}
}

/// Various flags describing the usage of a frame
///
/// These are only ever read. Frames are always written with no flags set.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameFlags {
	/// Preserve frame on tag edit
	pub tag_alter_preservation: bool,
	/// Preserve frame on file edit
	pub file_alter_preservation: bool,
	/// Item cannot be written to
	pub read_only: bool,
	/// The group identifier the frame belongs to
	///
	/// All frames with the same group identifier byte belong to the same group.
	pub grouping_identity: Option<u8>,
	/// Frame is zlib compressed
	pub compression: bool,
	/// Frame encryption method symbol
	///
	/// Since the encryption method is unknown, encrypted frames are never decoded.
	pub encryption: Option<u8>,
	/// Frame is unsynchronised (ID3v2.4 only)
	///
	/// In short, this makes all "0xFF X (X >= 0xE0)" combinations into "0xFF 0x00 X" to avoid confusion
	/// with the MPEG frame header, which is often identified by its "frame sync" (11 set bits).
	pub unsynchronisation: bool,
	/// Frame has a data length indicator
	///
	/// The data length indicator is the size of the frame if the flags were all zeroed out.
	pub data_length_indicator: Option<u32>,
}

impl FrameFlags {
	/// Parse the flags from an ID3v2.4 frame
	///
	/// NOTE: If any of the following flags are set, they will be set to `Some(0)`:
	/// * `grouping_identity`
	/// * `encryption`
	/// * `data_length_indicator`
	pub fn parse_id3v24(flags: u16) -> Self {
		FrameFlags {
			tag_alter_preservation: flags & 0x4000 == 0x4000,
			file_alter_preservation: flags & 0x2000 == 0x2000,
			read_only: flags & 0x1000 == 0x1000,
			grouping_identity: (flags & 0x0040 == 0x0040).then_some(0),
			compression: flags & 0x0008 == 0x0008,
			encryption: (flags & 0x0004 == 0x0004).then_some(0),
			unsynchronisation: flags & 0x0002 == 0x0002,
			data_length_indicator: (flags & 0x0001 == 0x0001).then_some(0),
		}
	}

	/// Parse the flags from an ID3v2.3 frame
	///
	/// NOTE: If any of the following flags are set, they will be set to `Some(0)`:
	/// * `grouping_identity`
	/// * `encryption`
	pub fn parse_id3v23(flags: u16) -> Self {
		FrameFlags {
			tag_alter_preservation: flags & 0x8000 == 0x8000,
			file_alter_preservation: flags & 0x4000 == 0x4000,
			read_only: flags & 0x2000 == 0x2000,
			grouping_identity: (flags & 0x0020 == 0x0020).then_some(0),
			compression: flags & 0x0080 == 0x0080,
			encryption: (flags & 0x0040 == 0x0040).then_some(0),
			unsynchronisation: false,
			data_length_indicator: None,
		}
	}
}

/// A single decoded frame
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
	pub(crate) id: String,
	/// The flags the frame was read with
	pub flags: FrameFlags,
	/// The decoded value
	pub value: FrameValue,
}

impl Frame {
	/// Create a new frame with no flags
	///
	/// # Errors
	///
	/// * `id` is not a valid ID3v2.3/4 identifier (4 characters of `'A'..='Z'` or `'0'..='9'`)
	///
	/// # Examples
	///
	/// ```rust
	/// use id3_codec::{Frame, FrameValue};
	///
	/// let frame = Frame::new("TIT2", FrameValue::Text(String::from("Foo"))).unwrap();
	/// assert_eq!(frame.id(), "TIT2");
	///
	/// assert!(Frame::new("tit2", FrameValue::Text(String::from("Foo"))).is_err());
	/// ```
	pub fn new(id: &str, value: FrameValue) -> crate::error::Result<Self> {
		header::verify_id(id.as_bytes())?;
		if id.len() != 4 {
			return Err(crate::macros::id3v2_err!(BadFrameId(id.as_bytes().to_vec())));
		}

		Ok(Self {
			id: id.to_owned(),
			flags: FrameFlags::default(),
			value,
		})
	}

	/// The frame identifier
	pub fn id(&self) -> &str {
		&self.id
	}
}

#[cfg(test)]
mod tests {
	use super::{FrameFlags, FrameKind};

	#[test_log::test]
	fn kind_for_id() {
		assert_eq!(FrameKind::for_id("TIT2"), Some(FrameKind::Text));
		assert_eq!(FrameKind::for_id("TXXX"), Some(FrameKind::UserDefinedText));
		assert_eq!(FrameKind::for_id("WOAR"), Some(FrameKind::Url));
		assert_eq!(FrameKind::for_id("WXXX"), Some(FrameKind::UserDefinedUrl));
		assert_eq!(FrameKind::for_id("CHAP"), Some(FrameKind::Chapter));
		assert_eq!(FrameKind::for_id("GEOB"), None);

		// Outdated identifiers have no codec
		assert_eq!(FrameKind::for_id("TT2"), None);
	}

	#[test_log::test]
	fn flag_layouts() {
		let v4 = FrameFlags::parse_id3v24(0x4000 | 0x0008 | 0x0001);
		assert!(v4.tag_alter_preservation);
		assert!(v4.compression);
		assert_eq!(v4.data_length_indicator, Some(0));
		assert!(!v4.read_only);

		let v3 = FrameFlags::parse_id3v23(0x8000 | 0x0080 | 0x0020);
		assert!(v3.tag_alter_preservation);
		assert!(v3.compression);
		assert_eq!(v3.grouping_identity, Some(0));
		assert_eq!(v3.data_length_indicator, None);

		// The same bits mean different things
		let v3 = FrameFlags::parse_id3v23(0x0040);
		assert_eq!(v3.encryption, Some(0));
		let v4 = FrameFlags::parse_id3v24(0x0040);
		assert_eq!(v4.grouping_identity, Some(0));
	}
}
