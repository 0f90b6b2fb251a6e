//! A byte-exact codec for ID3v2 tags
//!
//! This crate turns the ID3v2 metadata block found at the start of (most) MP3 files into
//! structured values, and turns structured values back into a tag. It never touches the
//! filesystem, everything operates on in-memory buffers.
//!
//! # Supported versions
//!
//! * **Reading**: ID3v2.2, ID3v2.3 and ID3v2.4. ID3v2.2 identifiers are upgraded to their
//!   ID3v2.3/4 counterparts while reading.
//! * **Writing**: always ID3v2.3, with no tag-level flags.
//!
//! # Examples
//!
//! ## Creating a tag
//!
//! ```rust
//! use id3_codec::config::WriteOptions;
//! use id3_codec::{FrameValue, TagMap, TagValue, encode_tag};
//!
//! # fn main() -> id3_codec::error::Result<()> {
//! let mut values = TagMap::new();
//! values.insert(
//! 	String::from("title"),
//! 	TagValue::Single(FrameValue::Text(String::from("abc"))),
//! );
//!
//! let tag = encode_tag(&values, WriteOptions::default())?;
//! assert_eq!(&tag[..3], b"ID3");
//! # Ok(()) }
//! ```
//!
//! ## Reading a tag
//!
//! ```rust
//! use id3_codec::config::{ParseOptions, WriteOptions};
//! use id3_codec::{FrameValue, TagMap, TagValue, decode_tag, encode_tag};
//!
//! # fn main() -> id3_codec::error::Result<()> {
//! # let mut values = TagMap::new();
//! # values.insert(String::from("TIT2"), TagValue::Single(FrameValue::Text(String::from("abc"))));
//! # let buffer = encode_tag(&values, WriteOptions::default())?;
//! let tag = decode_tag(&buffer, &ParseOptions::default())?;
//!
//! let friendly = tag.friendly();
//! assert_eq!(
//! 	friendly.get("title"),
//! 	Some(&TagValue::Single(FrameValue::Text(String::from("abc"))))
//! );
//! # Ok(()) }
//! ```
//!
//! ## Updating a tag
//!
//! New values are merged into an existing tag's raw view with [`merge_tags`]. Frames that may
//! appear more than once are either appended, or matched against existing frames by a key
//! (see [`FrameOptions`](identifiers::FrameOptions)).

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub(crate) mod macros;

pub mod config;
pub mod error;
pub mod frame;
pub mod header;
pub mod identifiers;
pub mod items;
mod read;
pub mod tag;
pub mod util;
mod write;

pub use frame::{Frame, FrameFlags, FrameValue};
pub use header::Id3v2Version;
pub use read::{decode_tag, read_tags, strip_tag};
pub use tag::merge::merge_tags;
pub use tag::{Tag, TagMap, TagValue, TagViews};
pub use util::synchsafe::{decode_size, encode_size};
pub use util::text::TextEncoding;
pub use write::encode_tag;
