//! Text encodings used within ID3v2 frames

use crate::error::{ErrorKind, Id3Error, Result};
use crate::macros::id3v2_err;

/// Errors that can occur while encoding text
#[derive(Copy, Clone, Debug)]
pub struct TextEncodingError {
	encoding: TextEncoding,
	valid_up_to: usize,
}

impl TextEncodingError {
	/// The target text encoding
	pub fn encoding(&self) -> TextEncoding {
		self.encoding
	}

	/// The byte index in the provided string up to which the encoding was valid
	pub fn valid_up_to(&self) -> usize {
		self.valid_up_to
	}
}

impl core::fmt::Display for TextEncodingError {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(
			f,
			"invalid {} sequence from index {}",
			self.encoding.name(),
			self.valid_up_to
		)
	}
}

impl core::error::Error for TextEncodingError {}

/// The text encoding for use in ID3v2 frames
///
/// Frames that carry text start with a single byte selecting one of these.
#[derive(Debug, Clone, Eq, PartialEq, Copy, Hash)]
#[repr(u8)]
pub enum TextEncoding {
	/// ISO-8859-1
	Latin1 = 0,
	/// UTF-16 with a byte order mark
	UTF16 = 1,
	/// UTF-16 big endian
	UTF16BE = 2,
	/// UTF-8
	UTF8 = 3,
}

impl TextEncoding {
	/// Get a `TextEncoding` from a u8, must be 0-3 inclusive
	pub fn from_u8(byte: u8) -> Option<Self> {
		match byte {
			0 => Some(Self::Latin1),
			1 => Some(Self::UTF16),
			2 => Some(Self::UTF16BE),
			3 => Some(Self::UTF8),
			_ => None,
		}
	}

	pub(crate) fn try_from_u8(byte: u8) -> Result<Self> {
		match Self::from_u8(byte) {
			Some(encoding) => Ok(encoding),
			None => Err(id3v2_err!(BadTextEncoding(byte))),
		}
	}

	fn name(self) -> &'static str {
		match self {
			TextEncoding::Latin1 => "Latin-1",
			TextEncoding::UTF16 => "UTF-16",
			TextEncoding::UTF8 => "UTF-8",
			TextEncoding::UTF16BE => "UTF-16 BE",
		}
	}

	/// The size of a single code unit, which is also the size of the null terminator
	pub fn char_size(self) -> usize {
		match self {
			TextEncoding::Latin1 | TextEncoding::UTF8 => 1,
			TextEncoding::UTF16 | TextEncoding::UTF16BE => 2,
		}
	}

	/// Encode `text`
	///
	/// [`TextEncoding::UTF16`] is always written little endian, with a byte order mark.
	///
	/// # Errors
	///
	/// * `text` contains characters outside of Latin-1, the encoding is [`TextEncoding::Latin1`],
	///   and `lossy` is `false`
	///
	/// # Examples
	///
	/// ```rust
	/// use id3_codec::TextEncoding;
	///
	/// let encoded = TextEncoding::UTF16.encode("ab", true, false).unwrap();
	/// assert_eq!(encoded, [0xFF, 0xFE, b'a', 0, b'b', 0, 0, 0]);
	///
	/// assert!(TextEncoding::Latin1.encode("\u{263A}", false, false).is_err());
	/// assert_eq!(TextEncoding::Latin1.encode("\u{263A}", false, true).unwrap(), b"?");
	/// ```
	pub fn encode(
		self,
		text: &str,
		terminated: bool,
		lossy: bool,
	) -> std::result::Result<Vec<u8>, TextEncodingError> {
		match self {
			TextEncoding::Latin1 => {
				let mut out =
					latin1_encode(text, lossy).collect::<std::result::Result<Vec<u8>, _>>()?;
				if terminated {
					out.push(0)
				}

				Ok(out)
			},
			TextEncoding::UTF16 => Ok(utf16_encode(text, u16::to_le_bytes, true, terminated)),
			TextEncoding::UTF16BE => Ok(utf16_encode(text, u16::to_be_bytes, false, terminated)),
			TextEncoding::UTF8 => {
				let mut out = text.as_bytes().to_vec();

				if terminated {
					out.push(0);
				}

				Ok(out)
			},
		}
	}

	/// Decode `bytes`, stripping any trailing null characters
	///
	/// [`TextEncoding::UTF16`] strings without a byte order mark are assumed to be little endian.
	///
	/// # Errors
	///
	/// * `bytes` is not valid for the encoding
	///
	/// # Examples
	///
	/// ```rust
	/// use id3_codec::TextEncoding;
	///
	/// let decoded = TextEncoding::UTF16.decode(&[0xFE, 0xFF, 0, b'a', 0, 0]).unwrap();
	/// assert_eq!(decoded, "a");
	/// ```
	pub fn decode(self, bytes: &[u8]) -> Result<String> {
		decode_text(bytes, self, Utf16Endianness::Little).map(|(text, _)| text)
	}

	/// Split `buffer` at the first null terminator for this encoding
	///
	/// This returns the bytes before and after the terminator, or `None` if the buffer has no
	/// terminator at all. An empty leading field is not the same as a missing terminator.
	///
	/// For the UTF-16 encodings, the terminator is searched for on 2-byte boundaries first. Some
	/// writers produce strings with an odd number of bytes, so if no aligned terminator exists, a
	/// misaligned one is accepted.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3_codec::TextEncoding;
	///
	/// let (before, after) = TextEncoding::Latin1.find_terminator(b"abc\0def").unwrap();
	/// assert_eq!(before, b"abc");
	/// assert_eq!(after, b"def");
	///
	/// assert!(TextEncoding::Latin1.find_terminator(b"abc").is_none());
	/// ```
	pub fn find_terminator(self, buffer: &[u8]) -> Option<(&[u8], &[u8])> {
		match self.char_size() {
			1 => {
				let pos = buffer.iter().position(|b| *b == 0)?;
				Some((&buffer[..pos], &buffer[pos + 1..]))
			},
			_ => {
				let pos = (0..buffer.len().saturating_sub(1))
					.step_by(2)
					.find(|pos| buffer[*pos] == 0 && buffer[*pos + 1] == 0)
					.or_else(|| {
						(1..buffer.len().saturating_sub(1))
							.step_by(2)
							.find(|pos| buffer[*pos] == 0 && buffer[*pos + 1] == 0)
					})?;

				Some((&buffer[..pos], &buffer[pos + 2..]))
			},
		}
	}
}

/// The byte order of a UTF-16 string
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Utf16Endianness {
	Little,
	Big,
}

impl Utf16Endianness {
	fn decoder(self) -> fn([u8; 2]) -> u16 {
		match self {
			Utf16Endianness::Little => u16::from_le_bytes,
			Utf16Endianness::Big => u16::from_be_bytes,
		}
	}
}

/// Decode `bytes`, returning the text and the endianness of any byte order mark found
///
/// Within a single frame, only the first UTF-16 string is guaranteed to have a byte order mark.
/// `default_endianness` is used for strings without one.
pub(crate) fn decode_text(
	bytes: &[u8],
	encoding: TextEncoding,
	default_endianness: Utf16Endianness,
) -> Result<(String, Option<Utf16Endianness>)> {
	if bytes.is_empty() {
		return Ok((String::new(), None));
	}

	let mut bom = None;
	let text = match encoding {
		TextEncoding::Latin1 => latin1_decode(bytes),
		TextEncoding::UTF16 => {
			let (endianness, content) = match bytes {
				[0xFF, 0xFE, rest @ ..] => (Utf16Endianness::Little, rest),
				[0xFE, 0xFF, rest @ ..] => (Utf16Endianness::Big, rest),
				_ => (default_endianness, bytes),
			};

			if content.len() != bytes.len() {
				bom = Some(endianness);
			}

			utf16_decode_bytes(content, endianness.decoder())?
		},
		TextEncoding::UTF16BE => utf16_decode_bytes(bytes, u16::from_be_bytes)?,
		TextEncoding::UTF8 => utf8_decode(bytes.to_vec())?,
	};

	Ok((text, bom))
}

pub(crate) fn latin1_decode(bytes: &[u8]) -> String {
	let mut text = bytes.iter().map(|c| *c as char).collect::<String>();
	trim_end_nulls(&mut text);
	text
}

pub(crate) fn latin1_encode(
	s: &str,
	lossy: bool,
) -> impl Iterator<Item = std::result::Result<u8, TextEncodingError>> {
	s.chars().enumerate().map(move |(index, c)| {
		if (c as u32) <= 255 {
			Ok(c as u8)
		} else if lossy {
			Ok(b'?')
		} else {
			Err(TextEncodingError {
				encoding: TextEncoding::Latin1,
				valid_up_to: index, // All characters up to this point are single-byte
			})
		}
	})
}

fn utf8_decode(bytes: Vec<u8>) -> Result<String> {
	String::from_utf8(bytes)
		.map(|mut text| {
			trim_end_nulls(&mut text);
			text
		})
		.map_err(Into::into)
}

fn utf16_decode_bytes(bytes: &[u8], endianness: fn([u8; 2]) -> u16) -> Result<String> {
	if bytes.is_empty() {
		return Ok(String::new());
	}

	if bytes.len() % 2 != 0 {
		log::warn!("UTF-16 string has an odd length, ignoring the final byte");
	}

	let mut decoder = endianness;
	let mut string_start = true;
	let mut unverified = Vec::with_capacity(bytes.len() / 2);
	for chunk in bytes.chunks_exact(2) {
		let pair = [chunk[0], chunk[1]];

		// Multiple null separated strings may each carry their own BOM
		if string_start {
			string_start = false;
			match pair {
				[0xFF, 0xFE] => {
					decoder = u16::from_le_bytes;
					continue;
				},
				[0xFE, 0xFF] => {
					decoder = u16::from_be_bytes;
					continue;
				},
				_ => {},
			}
		}

		let unit = decoder(pair);
		string_start = unit == 0;
		unverified.push(unit);
	}

	String::from_utf16(&unverified)
		.map(|mut text| {
			trim_end_nulls(&mut text);
			text
		})
		.map_err(|_| Id3Error::new(ErrorKind::TextDecode("Given an invalid UTF-16 string")))
}

pub(crate) fn trim_end_nulls(text: &mut String) {
	if text.ends_with('\0') {
		let new_len = text.trim_end_matches('\0').len();
		text.truncate(new_len);
	}
}

fn utf16_encode(
	text: &str,
	endianness: fn(u16) -> [u8; 2],
	bom: bool,
	terminated: bool,
) -> Vec<u8> {
	let mut encoded = Vec::<u8>::new();

	if bom {
		encoded.extend_from_slice(&endianness(0xFEFF_u16));
	}

	for ch in text.encode_utf16() {
		encoded.extend_from_slice(&endianness(ch));
	}

	if terminated {
		encoded.extend_from_slice(&[0, 0]);
	}

	encoded
}
