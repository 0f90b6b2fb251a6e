use super::{FrameHeader, verify_id};
use crate::error::Result;
use crate::frame::FrameFlags;
use crate::identifiers::upgrade_v2;
use crate::util::synchsafe::decode_size;
use crate::util::text::latin1_decode;

use byteorder::{BigEndian, ByteOrder};

/// The result of reading a frame header
pub(crate) enum ParsedHeader {
	/// A header was read, but its identifier may still be invalid
	Header {
		id: Result<String>,
		size: u32,
		flags: FrameFlags,
	},
	/// Not enough data for a header, or the start of the padding
	Eof,
}

impl ParsedHeader {
	pub(crate) fn into_header(self) -> Option<Result<FrameHeader>> {
		match self {
			ParsedHeader::Header { id, size, flags } => {
				Some(id.map(|id| FrameHeader { id, size, flags }))
			},
			ParsedHeader::Eof => None,
		}
	}
}

/// Parse a 6 byte ID3v2.2 frame header
///
/// The identifier is upgraded to its ID3v2.3/4 equivalent. If there is no equivalent, the
/// 3 character identifier is kept.
pub(crate) fn parse_v2_header(bytes: &[u8]) -> ParsedHeader {
	let Some(header) = bytes.get(..6) else {
		return ParsedHeader::Eof;
	};

	// Assume we just started reading padding
	if header[0] == 0 {
		return ParsedHeader::Eof;
	}

	let size = BigEndian::read_u24(&header[3..]);

	ParsedHeader::Header {
		id: upgraded_id(&header[..3]),
		size,
		// V2 doesn't store flags
		flags: FrameFlags::default(),
	}
}

/// Parse a 10 byte ID3v2.3/ID3v2.4 frame header
///
/// ID3v2.4 (`synchsafe`) stores the size as a synchsafe integer, ID3v2.3 does not.
pub(crate) fn parse_header(bytes: &[u8], synchsafe: bool) -> ParsedHeader {
	let Some(header) = bytes.get(..10) else {
		return ParsedHeader::Eof;
	};

	// Assume we just started reading padding
	if header[0] == 0 {
		return ParsedHeader::Eof;
	}

	let size_bytes = [header[4], header[5], header[6], header[7]];
	let size = if synchsafe {
		decode_size(size_bytes)
	} else {
		u32::from_be_bytes(size_bytes)
	};

	let flags = BigEndian::read_u16(&header[8..]);
	let flags = if synchsafe {
		FrameFlags::parse_id3v24(flags)
	} else {
		FrameFlags::parse_id3v23(flags)
	};

	// For some reason, some apps make v3 tags with v2 frame IDs.
	// The actual frame header is v3 though
	let id = if header[3] == 0 && !synchsafe {
		log::warn!("Found a v2 frame ID in a v3 tag, attempting to upgrade");
		upgraded_id(&header[..3])
	} else {
		verify_id(&header[..4]).map(|()| latin1_decode(&header[..4]))
	};

	ParsedHeader::Header { id, size, flags }
}

fn upgraded_id(id_bytes: &[u8]) -> Result<String> {
	verify_id(id_bytes)?;

	let id = latin1_decode(id_bytes);
	match upgrade_v2(&id) {
		Some(upgraded) => Ok(upgraded.to_owned()),
		None => {
			log::warn!("No ID3v2.3/4 equivalent for frame `{id}`");
			Ok(id)
		},
	}
}

#[cfg(test)]
mod tests {
	use super::{ParsedHeader, parse_header, parse_v2_header};

	#[test_log::test]
	fn v2_header_is_upgraded() {
		let header = parse_v2_header(&[b'T', b'T', b'2', 0x00, 0x01, 0x02])
			.into_header()
			.unwrap()
			.unwrap();

		assert_eq!(header.id, "TIT2");
		assert_eq!(header.size, 0x0102);
	}

	#[test_log::test]
	fn v3_and_v4_sizes() {
		let bytes = [b'T', b'I', b'T', b'2', 0x00, 0x00, 0x01, 0x7F, 0x00, 0x00];

		let v3 = parse_header(&bytes, false).into_header().unwrap().unwrap();
		assert_eq!(v3.size, 0x017F);

		let v4 = parse_header(&bytes, true).into_header().unwrap().unwrap();
		assert_eq!(v4.size, 0xFF);
	}

	#[test_log::test]
	fn v2_id_in_v3_header() {
		let bytes = [b'C', b'O', b'M', 0x00, 0x00, 0x00, 0x00, 0x05, 0x00, 0x00];

		let header = parse_header(&bytes, false).into_header().unwrap().unwrap();
		assert_eq!(header.id, "COMM");
		assert_eq!(header.size, 5);
	}

	#[test_log::test]
	fn padding_and_short_input() {
		assert!(matches!(parse_header(&[0; 10], false), ParsedHeader::Eof));
		assert!(matches!(parse_header(b"TIT2", false), ParsedHeader::Eof));
		assert!(matches!(parse_v2_header(b"TT2"), ParsedHeader::Eof));
	}

	#[test_log::test]
	fn invalid_id_keeps_size() {
		let bytes = [b't', b'i', b't', b'2', 0x00, 0x00, 0x00, 0x03, 0x00, 0x00];

		let ParsedHeader::Header { id, size, .. } = parse_header(&bytes, false) else {
			panic!("Expected a header");
		};

		assert!(id.is_err());
		assert_eq!(size, 3);
	}
}
