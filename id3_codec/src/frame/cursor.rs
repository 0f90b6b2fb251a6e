//! Cursors over frame bodies
//!
//! [`FrameReader`] consumes a frame body field by field, and [`FrameBuilder`] produces one.

use crate::error::Result;
use crate::macros::{err, id3v2_err};
use crate::util::text::{TextEncoding, Utf16Endianness, decode_text};

use byteorder::{BigEndian, ByteOrder};

/// A cursor over a frame body
///
/// # Examples
///
/// ```rust
/// use id3_codec::TextEncoding;
/// use id3_codec::frame::FrameReader;
///
/// # fn main() -> id3_codec::error::Result<()> {
/// // Latin-1, a terminated "abc", and a 2 byte number
/// let body = [0x00, b'a', b'b', b'c', 0x00, 0x01, 0x02];
///
/// let mut reader = FrameReader::with_encoding(&body)?;
/// assert_eq!(reader.encoding(), TextEncoding::Latin1);
/// assert_eq!(reader.consume_terminated_text(None)?, "abc");
/// assert_eq!(reader.consume_number(2)?, 0x0102);
/// assert!(reader.is_empty());
/// # Ok(()) }
/// ```
#[derive(Debug, Clone)]
pub struct FrameReader<'a> {
	buffer: &'a [u8],
	encoding: TextEncoding,
	// Only the first UTF-16 string of a frame is guaranteed to have a BOM
	utf16_endianness: Utf16Endianness,
}

impl<'a> FrameReader<'a> {
	/// Create a reader over `buffer`, using [`TextEncoding::Latin1`] as the frame encoding
	pub fn new(buffer: &'a [u8]) -> Self {
		Self {
			buffer,
			encoding: TextEncoding::Latin1,
			utf16_endianness: Utf16Endianness::Little,
		}
	}

	/// Create a reader over `buffer`, consuming the leading encoding byte
	///
	/// # Errors
	///
	/// * `buffer` is empty
	/// * The encoding byte is not in `0..=3`
	pub fn with_encoding(buffer: &'a [u8]) -> Result<Self> {
		let Some((&encoding, rest)) = buffer.split_first() else {
			id3v2_err!(@BAIL BadFrameLength);
		};

		let mut reader = Self::new(rest);
		reader.encoding = TextEncoding::try_from_u8(encoding)?;
		Ok(reader)
	}

	/// The encoding of the frame
	pub fn encoding(&self) -> TextEncoding {
		self.encoding
	}

	/// Whether every byte has been consumed
	pub fn is_empty(&self) -> bool {
		self.buffer.is_empty()
	}

	/// The number of bytes left
	pub fn len(&self) -> usize {
		self.buffer.len()
	}

	/// Consume `size` bytes, or everything that remains if `size` is `None`
	///
	/// # Errors
	///
	/// * `size` is larger than the number of remaining bytes
	pub fn consume_buffer(&mut self, size: Option<usize>) -> Result<&'a [u8]> {
		let size = size.unwrap_or(self.buffer.len());
		if size > self.buffer.len() {
			id3v2_err!(@BAIL BadFrameLength);
		}

		let (consumed, rest) = self.buffer.split_at(size);
		self.buffer = rest;
		Ok(consumed)
	}

	/// Consume a single byte
	///
	/// # Errors
	///
	/// * The reader is empty
	pub fn consume_u8(&mut self) -> Result<u8> {
		Ok(self.consume_buffer(Some(1))?[0])
	}

	/// Consume a big endian unsigned integer of `size` bytes
	///
	/// # Errors
	///
	/// * `size` is larger than the number of remaining bytes
	/// * `size` is not within `1..=8`
	pub fn consume_number(&mut self, size: usize) -> Result<u64> {
		if size == 0 || size > 8 {
			err!(SizeMismatch);
		}

		let bytes = self.consume_buffer(Some(size))?;
		Ok(BigEndian::read_uint(bytes, size))
	}

	/// Consume and decode `size` bytes of text, or everything that remains if `size` is `None`
	///
	/// The frame encoding is used if `encoding` is `None`.
	///
	/// # Errors
	///
	/// * `size` is larger than the number of remaining bytes
	/// * The text is invalid for the encoding
	pub fn consume_text(
		&mut self,
		size: Option<usize>,
		encoding: Option<TextEncoding>,
	) -> Result<String> {
		let bytes = self.consume_buffer(size)?;
		self.decode(bytes, encoding)
	}

	/// Consume and decode text up to, and including, its null terminator
	///
	/// The frame encoding is used if `encoding` is `None`.
	///
	/// # Errors
	///
	/// * No terminator exists in the remaining bytes
	/// * The text is invalid for the encoding
	pub fn consume_terminated_text(&mut self, encoding: Option<TextEncoding>) -> Result<String> {
		let encoding = encoding.unwrap_or(self.encoding);

		let Some((text, rest)) = encoding.find_terminator(self.buffer) else {
			err!(TextDecode("Expected a null terminator"));
		};

		self.buffer = rest;
		self.decode(text, Some(encoding))
	}

	fn decode(&mut self, bytes: &[u8], encoding: Option<TextEncoding>) -> Result<String> {
		let encoding = encoding.unwrap_or(self.encoding);

		let (text, bom) = decode_text(bytes, encoding, self.utf16_endianness)?;
		if let Some(bom) = bom {
			self.utf16_endianness = bom;
		}

		Ok(text)
	}
}

/// A builder for frame bodies
///
/// # Examples
///
/// ```rust
/// use id3_codec::TextEncoding;
/// use id3_codec::frame::FrameBuilder;
///
/// # fn main() -> id3_codec::error::Result<()> {
/// let mut builder = FrameBuilder::new("TXXX", Some(TextEncoding::Latin1));
/// builder.append_terminated_text("key", None)?;
/// builder.append_text("value", None)?;
///
/// assert_eq!(builder.buffer(), b"\0key\0value");
/// # Ok(()) }
/// ```
#[derive(Debug, Clone)]
pub struct FrameBuilder {
	id: String,
	encoding: TextEncoding,
	buffer: Vec<u8>,
	lossy: bool,
}

impl FrameBuilder {
	/// Create a builder for the frame `id`
	///
	/// If `encoding` is given, the encoding byte is written immediately and it becomes the frame
	/// encoding. Otherwise, the frame encoding is [`TextEncoding::Latin1`].
	pub fn new(id: &str, encoding: Option<TextEncoding>) -> Self {
		let mut buffer = Vec::new();
		if let Some(encoding) = encoding {
			buffer.push(encoding as u8);
		}

		Self {
			id: id.to_owned(),
			encoding: encoding.unwrap_or(TextEncoding::Latin1),
			buffer,
			lossy: false,
		}
	}

	/// Whether Latin-1 text replaces unrepresentable characters with `?` rather than failing
	pub fn lossy(mut self, lossy: bool) -> Self {
		self.lossy = lossy;
		self
	}

	/// The identifier of the frame being built
	pub fn id(&self) -> &str {
		&self.id
	}

	/// Append raw bytes
	pub fn append_buffer(&mut self, bytes: &[u8]) -> &mut Self {
		self.buffer.extend_from_slice(bytes);
		self
	}

	/// Append `value` as a big endian integer of `size` bytes
	///
	/// The value is zero padded on the left. If it doesn't fit, only the low `size` bytes are
	/// kept, so `u32::MAX` stays `0xFFFFFFFF` in a 4 byte field.
	pub fn append_number(&mut self, value: u64, size: usize) -> &mut Self {
		let bytes = value.to_be_bytes();
		if size > bytes.len() {
			self.buffer.resize(self.buffer.len() + (size - bytes.len()), 0);
			self.buffer.extend_from_slice(&bytes);
		} else {
			self.buffer.extend_from_slice(&bytes[bytes.len() - size..]);
		}

		self
	}

	/// Append text, using the frame encoding if `encoding` is `None`
	///
	/// # Errors
	///
	/// * The text can't be represented in the encoding, see [`TextEncoding::encode`]
	pub fn append_text(&mut self, text: &str, encoding: Option<TextEncoding>) -> Result<&mut Self> {
		self.push_text(text, encoding, false)
	}

	/// Append null terminated text, using the frame encoding if `encoding` is `None`
	///
	/// # Errors
	///
	/// * The text can't be represented in the encoding, see [`TextEncoding::encode`]
	pub fn append_terminated_text(
		&mut self,
		text: &str,
		encoding: Option<TextEncoding>,
	) -> Result<&mut Self> {
		self.push_text(text, encoding, true)
	}

	fn push_text(
		&mut self,
		text: &str,
		encoding: Option<TextEncoding>,
		terminated: bool,
	) -> Result<&mut Self> {
		let encoding = encoding.unwrap_or(self.encoding);
		let encoded = encoding.encode(text, terminated, self.lossy)?;
		self.buffer.extend(encoded);
		Ok(self)
	}

	/// Append each item of `items` with `append_item`
	///
	/// # Errors
	///
	/// * `append_item` fails
	pub fn append_array<T, F>(&mut self, items: &[T], mut append_item: F) -> Result<&mut Self>
	where
		F: FnMut(&mut Self, &T) -> Result<()>,
	{
		for item in items {
			append_item(self, item)?;
		}

		Ok(self)
	}

	/// The body built so far
	pub fn buffer(&self) -> &[u8] {
		&self.buffer
	}

	/// Finish the frame, returning only the body
	pub fn into_buffer(self) -> Vec<u8> {
		self.buffer
	}

	/// Finish the frame, prefixed with an ID3v2.3 frame header
	///
	/// The header holds the identifier and the plain big endian body size, with no flags set.
	///
	/// # Errors
	///
	/// * The body is larger than `u32::MAX`
	/// * The identifier is not 4 bytes of Latin-1
	pub fn into_buffer_with_partial_header(self) -> Result<Vec<u8>> {
		let Ok(size) = u32::try_from(self.buffer.len()) else {
			err!(TooMuchData);
		};

		let id = TextEncoding::Latin1.encode(&self.id, false, false)?;
		if id.len() != 4 {
			id3v2_err!(@BAIL BadFrameId(id));
		}

		let mut out = Vec::with_capacity(10 + self.buffer.len());
		out.extend_from_slice(&id);
		out.extend_from_slice(&size.to_be_bytes());
		out.extend_from_slice(&[0, 0]);
		out.extend(self.buffer);

		Ok(out)
	}
}
