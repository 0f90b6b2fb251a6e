/// The parsing strictness mode
///
/// # Examples
///
/// ```rust
/// use id3_codec::config::{ParseOptions, ParsingMode};
///
/// // We only want to read standard-compliant inputs
/// let parsing_options = ParseOptions::new().parsing_mode(ParsingMode::Strict);
/// ```
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Default)]
#[non_exhaustive]
pub enum ParsingMode {
	/// Will eagerly error on invalid input
	///
	/// ## Examples of behavior
	///
	/// * Unable to decode a frame body - The error is returned and the entire tag is discarded
	/// * A frame declares a size larger than the tag - The error is returned
	Strict,
	/// Default mode, skips malformed input where it can
	///
	/// ## Examples of behavior
	///
	/// * Unable to decode a frame body - The frame is dropped and the parser moves on
	/// * A frame declares a size larger than the tag - Reading stops, keeping every frame read so far
	#[default]
	BestAttempt,
}

/// Options to control how tags are parsed
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ParseOptions {
	pub(crate) parsing_mode: ParsingMode,
	pub(crate) max_junk_bytes: usize,
	pub(crate) max_nesting_depth: u8,
	pub(crate) include: Option<Vec<String>>,
	pub(crate) exclude: Vec<String>,
	pub(crate) only_raw: bool,
	pub(crate) no_raw: bool,
}

impl Default for ParseOptions {
	/// The default implementation for `ParseOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// ParseOptions {
	/// 	parsing_mode: ParsingMode::BestAttempt,
	/// 	max_junk_bytes: 20,
	/// 	max_nesting_depth: 8,
	/// 	include: None,
	/// 	exclude: Vec::new(),
	/// 	only_raw: false,
	/// 	no_raw: false,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl ParseOptions {
	/// Default parsing mode
	pub const DEFAULT_PARSING_MODE: ParsingMode = ParsingMode::BestAttempt;

	/// Default number of bytes searched for the start of a tag
	pub const DEFAULT_MAX_JUNK_BYTES: usize = 20;

	/// Default limit of nested chapter frames
	pub const DEFAULT_MAX_NESTING_DEPTH: u8 = 8;

	/// Creates a new `ParseOptions`, alias for `Default` implementation
	///
	/// See also: [`ParseOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3_codec::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			parsing_mode: Self::DEFAULT_PARSING_MODE,
			max_junk_bytes: Self::DEFAULT_MAX_JUNK_BYTES,
			max_nesting_depth: Self::DEFAULT_MAX_NESTING_DEPTH,
			include: None,
			exclude: Vec::new(),
			only_raw: false,
			no_raw: false,
		}
	}

	/// The parsing mode to use, see [`ParsingMode`] for details
	pub fn parsing_mode(mut self, parsing_mode: ParsingMode) -> Self {
		self.parsing_mode = parsing_mode;
		self
	}

	/// The maximum number of leading bytes to search for the `"ID3"` magic
	///
	/// # Examples
	///
	/// ```rust
	/// use id3_codec::config::ParseOptions;
	///
	/// // I have tags behind a large amount of junk
	/// let parsing_options = ParseOptions::new().max_junk_bytes(1024);
	/// ```
	pub fn max_junk_bytes(mut self, max_junk_bytes: usize) -> Self {
		self.max_junk_bytes = max_junk_bytes;
		self
	}

	/// The maximum depth of chapter (`CHAP`/`CTOC`) frames embedded in one another
	///
	/// Frames nested deeper than this are dropped, or an error in [`ParsingMode::Strict`].
	pub fn max_nesting_depth(mut self, max_nesting_depth: u8) -> Self {
		self.max_nesting_depth = max_nesting_depth;
		self
	}

	/// Only keep frames with these identifiers
	///
	/// # Examples
	///
	/// ```rust
	/// use id3_codec::config::ParseOptions;
	///
	/// // Only the title and artist please
	/// let parsing_options = ParseOptions::new().include(["TIT2", "TPE1"]);
	/// ```
	pub fn include<I, S>(mut self, ids: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.include = Some(ids.into_iter().map(Into::into).collect());
		self
	}

	/// Drop frames with these identifiers
	///
	/// This is applied after [`ParseOptions::include`].
	pub fn exclude<I, S>(mut self, ids: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.exclude = ids.into_iter().map(Into::into).collect();
		self
	}

	/// Only produce the raw (identifier-keyed) view in [`read_tags`](crate::read_tags)
	pub fn only_raw(mut self, only_raw: bool) -> Self {
		self.only_raw = only_raw;
		self
	}

	/// Don't produce the raw (identifier-keyed) view in [`read_tags`](crate::read_tags)
	pub fn no_raw(mut self, no_raw: bool) -> Self {
		self.no_raw = no_raw;
		self
	}

	pub(crate) fn keeps(&self, id: &str) -> bool {
		if let Some(include) = &self.include {
			if !include.iter().any(|included| included == id) {
				return false;
			}
		}

		!self.exclude.iter().any(|excluded| excluded == id)
	}
}

#[cfg(test)]
mod tests {
	use super::ParseOptions;

	#[test_log::test]
	fn include_then_exclude() {
		let options = ParseOptions::new()
			.include(["TIT2", "TPE1"])
			.exclude(["TPE1"]);

		assert!(options.keeps("TIT2"));
		assert!(!options.keeps("TPE1"));
		assert!(!options.keeps("TALB"));

		let options = ParseOptions::new().exclude(["PRIV"]);
		assert!(options.keeps("TALB"));
		assert!(!options.keeps("PRIV"));
	}
}
