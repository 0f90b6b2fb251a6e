/// Options to control how tags are written
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct WriteOptions {
	pub(crate) preferred_padding: Option<u32>,
	pub(crate) lossy_text_encoding: bool,
}

impl WriteOptions {
	/// Creates a new `WriteOptions`, alias for `Default` implementation
	///
	/// See also: [`WriteOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3_codec::config::WriteOptions;
	///
	/// let write_options = WriteOptions::new();
	/// ```
	pub const fn new() -> Self {
		Self {
			preferred_padding: None,
			lossy_text_encoding: false,
		}
	}

	/// Set the preferred padding size in bytes
	///
	/// The padding is appended after the last frame and is included in the tag size.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3_codec::config::WriteOptions;
	///
	/// // Leave some room for future edits
	/// let options = WriteOptions::new().preferred_padding(1024);
	///
	/// // ...Or I don't want padding under any circumstances!
	/// let options = WriteOptions::new().preferred_padding(0);
	/// ```
	pub fn preferred_padding(mut self, preferred_padding: u32) -> Self {
		match preferred_padding {
			0 => self.preferred_padding = None,
			_ => self.preferred_padding = Some(preferred_padding),
		}
		self
	}

	/// Whether to replace characters that can't be represented in Latin-1
	///
	/// Latin-1 is used for identifiers, URLs, and picture descriptions that are left empty. When
	/// this is enabled, unrepresentable characters are written as `?`. Otherwise, writing fails.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3_codec::config::WriteOptions;
	///
	/// let options = WriteOptions::new().lossy_text_encoding(true);
	/// ```
	pub fn lossy_text_encoding(mut self, lossy_text_encoding: bool) -> Self {
		self.lossy_text_encoding = lossy_text_encoding;
		self
	}
}

impl Default for WriteOptions {
	/// The default implementation for `WriteOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// WriteOptions {
	/// 	preferred_padding: None,
	/// 	lossy_text_encoding: false,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}
