//! The ID3v2 tag header

use crate::error::Result;
use crate::macros::{err, id3v2_err};
use crate::util::synchsafe::{decode_size, is_synchsafe};

use byteorder::{BigEndian, ByteOrder};

pub(crate) const HEADER_SIZE: usize = 10;
pub(crate) const FOOTER_SIZE: usize = 10;

/// The ID3v2 version
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum Id3v2Version {
	/// ID3v2.2
	V2,
	/// ID3v2.3
	V3,
	/// ID3v2.4
	V4,
}

impl Id3v2Version {
	fn from_major(major: u8) -> Option<Self> {
		match major {
			2 => Some(Self::V2),
			3 => Some(Self::V3),
			4 => Some(Self::V4),
			_ => None,
		}
	}
}

/// Flags that apply to the entire tag
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Id3v2TagFlags {
	/// Whether or not all frames are unsynchronised. See [`FrameFlags::unsynchronisation`](crate::FrameFlags::unsynchronisation)
	pub unsynchronisation: bool,
	/// Whether the tag has an extended header (ID3v2.3/4)
	///
	/// Only the size of the extended header is used, its contents are skipped.
	pub extended_header: bool,
	/// ID3v2.2 only, the tag is compressed with an undefined scheme and can't be read
	pub compression: bool,
	/// Indicates if the tag is in an experimental stage
	pub experimental: bool,
	/// Indicates that the tag includes a footer (ID3v2.4)
	pub footer: bool,
}

impl Id3v2TagFlags {
	fn parse(flags: u8, version: Id3v2Version) -> Self {
		let is_v2 = version == Id3v2Version::V2;

		Self {
			unsynchronisation: flags & 0x80 == 0x80,
			extended_header: !is_v2 && flags & 0x40 == 0x40,
			compression: is_v2 && flags & 0x40 == 0x40,
			experimental: !is_v2 && flags & 0x20 == 0x20,
			footer: version == Id3v2Version::V4 && flags & 0x10 == 0x10,
		}
	}
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Id3v2Header {
	pub version: Id3v2Version,
	pub flags: Id3v2TagFlags,
	/// The size of the tag contents, including any extended header (**DOES NOT INCLUDE THE HEADER/FOOTER**)
	pub size: u32,
	/// The size of the extended header, skipped before the first frame
	pub extended_size: u32,
}

impl Id3v2Header {
	/// Parse a header from the start of `bytes`
	///
	/// `bytes` must start with the `"ID3"` magic, and should hold the rest of the tag so the
	/// extended header can be measured.
	pub(crate) fn parse(bytes: &[u8]) -> Result<Self> {
		let mut header = Self::parse_fixed(bytes)?;
		if header.flags.extended_header {
			header.extended_size = Self::extended_size(bytes, &header)?;
			log::debug!("Skipping {} byte extended header", header.extended_size);
		}

		Ok(header)
	}

	/// Parse only the fixed 10 bytes, leaving any extended header unchecked
	pub(crate) fn parse_fixed(bytes: &[u8]) -> Result<Self> {
		log::debug!("Parsing ID3v2 header");

		let Some(header) = bytes.get(..HEADER_SIZE) else {
			err!(SizeMismatch);
		};

		if &header[..3] != b"ID3" {
			err!(FakeTag);
		}

		// Version is stored as [major, minor], but here we don't care about minor revisions unless there's an error.
		let Some(version) = Id3v2Version::from_major(header[3]) else {
			id3v2_err!(@BAIL BadId3v2Version(header[3], header[4]));
		};

		if !is_synchsafe(&header[6..10]) {
			id3v2_err!(@BAIL BadTagSize);
		}

		let flags = Id3v2TagFlags::parse(header[5], version);
		let size = decode_size([header[6], header[7], header[8], header[9]]);

		Ok(Self {
			version,
			flags,
			size,
			extended_size: 0,
		})
	}

	fn extended_size(bytes: &[u8], header: &Self) -> Result<u32> {
		let Some(size_bytes) = bytes.get(HEADER_SIZE..HEADER_SIZE + 4) else {
			id3v2_err!(@BAIL BadExtendedHeaderSize);
		};

		let extended_size = match header.version {
			// The size excludes itself
			Id3v2Version::V3 => BigEndian::read_u32(size_bytes).saturating_add(4),
			// The size includes itself, and can't be smaller than the fixed fields
			_ => {
				let extended = decode_size([
					size_bytes[0],
					size_bytes[1],
					size_bytes[2],
					size_bytes[3],
				]);

				if extended < 6 {
					id3v2_err!(@BAIL BadExtendedHeaderSize);
				}

				extended
			},
		};

		if extended_size > header.size {
			id3v2_err!(@BAIL BadExtendedHeaderSize);
		}

		Ok(extended_size)
	}

	/// The total size of the tag, including the header and footer
	pub(crate) fn full_tag_size(&self) -> usize {
		let footer = if self.flags.footer { FOOTER_SIZE } else { 0 };
		HEADER_SIZE + self.size as usize + footer
	}
}

/// Find the offset of the first plausible tag header within the first `max_junk_bytes` bytes
///
/// A plausible header has the `"ID3"` magic, a major version of 2, 3, or 4, and no undefined
/// flags set. If `check_size` is set, the size field must also be a valid synchsafe integer.
pub(crate) fn find_header(buffer: &[u8], max_junk_bytes: usize, check_size: bool) -> Option<usize> {
	let last_offset = max_junk_bytes.min(buffer.len().saturating_sub(HEADER_SIZE));

	for offset in 0..=last_offset {
		let Some(candidate) = buffer.get(offset..offset + HEADER_SIZE) else {
			break;
		};

		if &candidate[..3] != b"ID3" {
			continue;
		}

		let valid_version = Id3v2Version::from_major(candidate[3]).is_some();
		let valid_flags = candidate[5] & 0x0F == 0;
		let valid_size = !check_size || is_synchsafe(&candidate[6..10]);

		if valid_version && valid_flags && valid_size {
			log::debug!("Found an ID3v2 header at offset {offset}");
			return Some(offset);
		}

		log::debug!("Skipping invalid ID3v2 header at offset {offset}");
	}

	None
}

#[cfg(test)]
mod tests {
	use super::{Id3v2Header, Id3v2Version, find_header};
	use crate::error::Id3v2ErrorKind;

	#[test_log::test]
	fn parse_plain_header() {
		let header = Id3v2Header::parse(&[b'I', b'D', b'3', 4, 0, 0x90, 0, 0, 0x02, 0x01]).unwrap();

		assert_eq!(header.version, Id3v2Version::V4);
		assert!(header.flags.unsynchronisation);
		assert!(header.flags.footer);
		assert_eq!(header.size, 257);
		assert_eq!(header.full_tag_size(), 277);
	}

	#[test_log::test]
	fn extended_header_sizes() {
		// ID3v2.3, size excludes itself
		let mut v3 = vec![b'I', b'D', b'3', 3, 0, 0x40, 0, 0, 0, 20];
		v3.extend([0, 0, 0, 6]);
		assert_eq!(Id3v2Header::parse(&v3).unwrap().extended_size, 10);

		// ID3v2.4, size includes itself
		let mut v4 = vec![b'I', b'D', b'3', 4, 0, 0x40, 0, 0, 0, 20];
		v4.extend([0, 0, 0, 6]);
		assert_eq!(Id3v2Header::parse(&v4).unwrap().extended_size, 6);

		// Larger than the tag
		let mut bad = vec![b'I', b'D', b'3', 4, 0, 0x40, 0, 0, 0, 5];
		bad.extend([0, 0, 0, 6]);
		let err = Id3v2Header::parse(&bad).unwrap_err();
		assert!(matches!(
			err.id3v2_kind(),
			Some(Id3v2ErrorKind::BadExtendedHeaderSize)
		));
	}

	#[test_log::test]
	fn v2_compression_flag() {
		let header = Id3v2Header::parse(&[b'I', b'D', b'3', 2, 0, 0x40, 0, 0, 0, 0]).unwrap();
		assert!(header.flags.compression);
		assert!(!header.flags.extended_header);
	}

	#[test_log::test]
	fn find_skips_junk_and_invalid_headers() {
		let mut buffer = vec![0xAA; 3];
		// Invalid version
		buffer.extend(b"ID3\x05\x00\x00\x00\x00\x00\x00");
		buffer.extend(b"ID3\x03\x00\x00\x00\x00\x00\x00");

		assert_eq!(find_header(&buffer, 20, true), Some(13));
		assert_eq!(find_header(&buffer, 12, true), None);
	}

	#[test_log::test]
	fn find_size_check() {
		let buffer = b"ID3\x03\x00\x00\x80\x00\x00\x00";

		assert_eq!(find_header(buffer, 20, true), None);
		assert_eq!(find_header(buffer, 20, false), Some(0));
	}

	#[test_log::test]
	fn find_in_short_buffer() {
		assert_eq!(find_header(b"ID3", 20, true), None);
		assert_eq!(find_header(&[], 20, true), None);
	}
}
