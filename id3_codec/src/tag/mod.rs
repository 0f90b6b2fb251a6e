//! The decoded tag and its views
//!
//! A [`Tag`] keeps its frames in the order they were read. For convenience, it can be turned into
//! two maps:
//!
//! * [`Tag::raw`], keyed by frame identifier (ex. `"TIT2"`)
//! * [`Tag::friendly`], keyed by alias (ex. `"title"`)
//!
//! The same map shape is what [`encode_tag`](crate::encode_tag) accepts, and what
//! [`merge_tags`](crate::merge_tags) works on.

pub(crate) mod merge;

use crate::config::WriteOptions;
use crate::error::Result;
use crate::frame::{Frame, FrameKind, FrameValue};
use crate::header::Id3v2Version;
use crate::identifiers::{IdentifierTable, frame_options, id_to_alias, resolve_write_id};
use crate::macros::id3v2_err;

use indexmap::IndexMap;
use indexmap::map::Entry;

/// A map of frame identifiers or aliases to their values
pub type TagMap = IndexMap<String, TagValue>;

/// The value(s) stored under a single key of a [`TagMap`]
///
/// Frames that may appear more than once (see [`frame_options`]) are always read as
/// [`TagValue::Multiple`], everything else as [`TagValue::Single`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TagValue {
	/// A single frame
	Single(FrameValue),
	/// Any number of frames with the same identifier
	Multiple(Vec<FrameValue>),
}

impl TagValue {
	/// All of the values, in order
	///
	/// # Examples
	///
	/// ```rust
	/// use id3_codec::{FrameValue, TagValue};
	///
	/// let value = TagValue::Single(FrameValue::Text(String::from("Foo")));
	/// assert_eq!(value.values().len(), 1);
	/// ```
	pub fn values(&self) -> &[FrameValue] {
		match self {
			TagValue::Single(value) => std::slice::from_ref(value),
			TagValue::Multiple(values) => values,
		}
	}
}

/// Both views of a tag, as produced by [`read_tags`](crate::read_tags)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagViews {
	/// The alias keyed view, see [`Tag::friendly`]
	pub friendly: Option<TagMap>,
	/// The identifier keyed view, see [`Tag::raw`]
	pub raw: Option<TagMap>,
}

/// An ID3v2 tag
///
/// Tags read from ID3v2.2 have their identifiers upgraded where possible. Tags are always
/// written as ID3v2.3.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag {
	version: Id3v2Version,
	frames: Vec<Frame>,
}

impl Default for Tag {
	fn default() -> Self {
		Self::new(Id3v2Version::V3)
	}
}

impl Tag {
	/// Create an empty tag
	pub fn new(version: Id3v2Version) -> Self {
		Self {
			version,
			frames: Vec::new(),
		}
	}

	pub(crate) fn from_frames(version: Id3v2Version, frames: Vec<Frame>) -> Self {
		Self { version, frames }
	}

	/// The version the tag was read as
	pub fn version(&self) -> Id3v2Version {
		self.version
	}

	/// The frames, in the order they were read or added
	pub fn frames(&self) -> &[Frame] {
		&self.frames
	}

	/// Append a frame
	///
	/// No checks are made for duplicates, see [`Tag::raw`] for how they are resolved.
	pub fn push(&mut self, frame: Frame) {
		self.frames.push(frame);
	}

	/// Whether the tag has no frames
	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}

	/// The frames keyed by identifier
	///
	/// Frames that may appear multiple times are collected in order. For any other frame, the
	/// last occurrence wins.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3_codec::{Frame, FrameValue, Tag, TagValue};
	///
	/// # fn main() -> id3_codec::error::Result<()> {
	/// let mut tag = Tag::default();
	/// tag.push(Frame::new("TIT2", FrameValue::Text(String::from("First")))?);
	/// tag.push(Frame::new("TIT2", FrameValue::Text(String::from("Second")))?);
	///
	/// let raw = tag.raw();
	/// assert_eq!(
	/// 	raw.get("TIT2"),
	/// 	Some(&TagValue::Single(FrameValue::Text(String::from("Second"))))
	/// );
	/// # Ok(()) }
	/// ```
	pub fn raw(&self) -> TagMap {
		let mut map = TagMap::new();

		for frame in &self.frames {
			let id = frame.id();
			if !frame_options(id).multiple {
				if map
					.insert(id.to_owned(), TagValue::Single(frame.value.clone()))
					.is_some()
				{
					log::warn!("Replaced frame `{id}` by a frame with the same ID");
				}

				continue;
			}

			match map.entry(id.to_owned()) {
				Entry::Occupied(mut entry) => match entry.get_mut() {
					TagValue::Multiple(values) => values.push(frame.value.clone()),
					single => *single = TagValue::Multiple(vec![frame.value.clone()]),
				},
				Entry::Vacant(entry) => {
					entry.insert(TagValue::Multiple(vec![frame.value.clone()]));
				},
			}
		}

		map
	}

	/// The frames keyed by alias
	///
	/// This is [`Tag::raw`], with every identifier replaced by its alias. Frames with no known
	/// alias are left out.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3_codec::{Frame, FrameValue, Tag};
	///
	/// # fn main() -> id3_codec::error::Result<()> {
	/// let mut tag = Tag::default();
	/// tag.push(Frame::new("TPE1", FrameValue::Text(String::from("Artist")))?);
	/// tag.push(Frame::new("TZZZ", FrameValue::Text(String::from("Unknown")))?);
	///
	/// let friendly = tag.friendly();
	/// assert!(friendly.contains_key("artist"));
	/// assert_eq!(friendly.len(), 1);
	/// # Ok(()) }
	/// ```
	pub fn friendly(&self) -> TagMap {
		self.raw()
			.into_iter()
			.filter_map(|(id, value)| {
				let alias = id_to_alias(IdentifierTable::V34, &id);
				if alias.is_none() {
					log::trace!("No alias for frame `{id}`");
				}

				alias.map(|alias| (alias.to_owned(), value))
			})
			.collect()
	}

	/// Build a tag from a map of aliases or identifiers
	///
	/// Keys are resolved as aliases first (ID3v2.3, then ID3v2.4), and are otherwise taken as
	/// identifiers. Keys that aren't 4 characters long after resolving, and identifiers that
	/// can't be written, are skipped.
	///
	/// Repeated URL frames (`WCOM`, `WOAR`) with the same value are only written once.
	///
	/// # Errors
	///
	/// * A [`TagValue::Multiple`] is given for a frame that may only appear once
	/// * A value doesn't match its identifier (ex. a URL for `TIT2`)
	/// * A resolved identifier has invalid characters
	///
	/// # Examples
	///
	/// ```rust
	/// use id3_codec::{FrameValue, Tag, TagMap, TagValue};
	///
	/// # fn main() -> id3_codec::error::Result<()> {
	/// let mut map = TagMap::new();
	/// map.insert(
	/// 	String::from("title"),
	/// 	TagValue::Single(FrameValue::Text(String::from("Foo"))),
	/// );
	///
	/// let tag = Tag::from_map(&map)?;
	/// assert_eq!(tag.frames()[0].id(), "TIT2");
	///
	/// // The title may only appear once
	/// map.insert(
	/// 	String::from("title"),
	/// 	TagValue::Multiple(vec![FrameValue::Text(String::from("Foo"))]),
	/// );
	/// assert!(Tag::from_map(&map).is_err());
	/// # Ok(()) }
	/// ```
	pub fn from_map(map: &TagMap) -> Result<Self> {
		let mut tag = Self::default();

		for (key, value) in map {
			let Some(id) = resolve_write_id(key) else {
				log::warn!("Unknown key `{key}`, skipping");
				continue;
			};

			let Some(kind) = FrameKind::for_id(id) else {
				log::warn!("Frame `{id}` can't be written, skipping");
				continue;
			};

			let options = frame_options(id);
			if !options.multiple && matches!(value, TagValue::Multiple(_)) {
				id3v2_err!(@BAIL UnexpectedMultipleValues(id.to_owned()));
			}

			let mut written: Vec<&FrameValue> = Vec::new();
			for frame_value in value.values() {
				if frame_value.kind() != kind {
					id3v2_err!(@BAIL BadFrame(id.to_owned(), frame_value.name()));
				}

				if kind == FrameKind::Url && written.contains(&frame_value) {
					log::debug!("Skipping duplicate `{id}` frame");
					continue;
				}

				written.push(frame_value);
				tag.push(Frame::new(id, frame_value.clone())?);
			}
		}

		Ok(tag)
	}

	/// Encode the tag as ID3v2.3
	///
	/// # Errors
	///
	/// * A frame can't be encoded, see [`encode_tag`](crate::encode_tag)
	/// * The tag is larger than a synchsafe integer can represent
	pub fn as_bytes(&self, options: WriteOptions) -> Result<Vec<u8>> {
		crate::write::write_tag(&self.frames, options)
	}
}
