use crate::util::{tag, v3_frame};

use id3_codec::config::{ParseOptions, WriteOptions};
use id3_codec::items::{
	ChapterFrame, ExtendedTextFrame, LanguageFrame, PrivateFrame, SyncTextContentType, SyncedText,
	SynchronizedTextFrame, TimestampFormat,
};
use id3_codec::{FrameValue, TagMap, TagValue, decode_tag, encode_tag, merge_tags, read_tags};

fn txxx(description: &str, content: &str) -> FrameValue {
	FrameValue::UserDefinedText(ExtendedTextFrame::new(description, content))
}

// Read, merge, write, and read again, as an update of a file would
fn update_bytes(buffer: &[u8], new: &TagMap) -> TagMap {
	let raw = read_tags(buffer, &ParseOptions::new().only_raw(true))
		.unwrap()
		.raw
		.unwrap();

	let merged = merge_tags(new, &raw).unwrap();
	let bytes = encode_tag(&merged, WriteOptions::default()).unwrap();
	decode_tag(&bytes, &ParseOptions::new()).unwrap().raw()
}

fn update(existing: &TagMap, new: &TagMap) -> TagMap {
	let bytes = encode_tag(existing, WriteOptions::default()).unwrap();
	update_bytes(&bytes, new)
}

fn new_title() -> TagMap {
	let mut new = TagMap::new();
	new.insert(
		String::from("title"),
		TagValue::Single(FrameValue::Text(String::from("New"))),
	);
	new
}

#[test_log::test]
fn user_defined_text_is_overwritten() {
	let mut existing = TagMap::new();
	existing.insert(
		String::from("userDefinedText"),
		TagValue::Multiple(vec![txxx("a", "1")]),
	);

	let mut new = TagMap::new();
	new.insert(
		String::from("userDefinedText"),
		TagValue::Multiple(vec![txxx("a", "2")]),
	);

	let raw = update(&existing, &new);
	assert_eq!(raw["TXXX"], TagValue::Multiple(vec![txxx("a", "2")]));
}

#[test_log::test]
fn private_frames_accumulate() {
	let private = |owner: &str| FrameValue::Private(PrivateFrame::new(owner, vec![0xAB]));

	let mut existing = TagMap::new();
	existing.insert(
		String::from("PRIV"),
		TagValue::Multiple(vec![private("a"), private("b")]),
	);

	let mut new = TagMap::new();
	new.insert(String::from("private"), TagValue::Single(private("a")));

	let raw = update(&existing, &new);
	assert_eq!(
		raw["PRIV"],
		TagValue::Multiple(vec![private("a"), private("b"), private("a")])
	);
}

#[test_log::test]
fn single_frames_are_replaced() {
	let mut existing = TagMap::new();
	existing.insert(
		String::from("title"),
		TagValue::Single(FrameValue::Text(String::from("Old"))),
	);
	existing.insert(
		String::from("album"),
		TagValue::Single(FrameValue::Text(String::from("Album"))),
	);

	let mut new = TagMap::new();
	new.insert(
		String::from("TIT2"),
		TagValue::Single(FrameValue::Text(String::from("New"))),
	);
	new.insert(
		String::from("chapter"),
		TagValue::Single(FrameValue::Chapter(ChapterFrame::new("chp0", 0, 10))),
	);

	let raw = update(&existing, &new);
	assert_eq!(
		raw["TIT2"],
		TagValue::Single(FrameValue::Text(String::from("New")))
	);
	assert_eq!(
		raw["TALB"],
		TagValue::Single(FrameValue::Text(String::from("Album")))
	);
	assert_eq!(
		raw["CHAP"],
		TagValue::Multiple(vec![FrameValue::Chapter(ChapterFrame::new("chp0", 0, 10))])
	);
}

#[test_log::test]
fn comment_without_language() {
	let mut frames = v3_frame(b"COMM", 0, b"\x00\x00\x00\x00\x00hi");
	frames.extend(v3_frame(b"TIT2", 0, b"\x00Old"));

	let raw = update_bytes(&tag(3, 0, &frames), &new_title());
	assert_eq!(
		raw["COMM"],
		TagValue::Single(FrameValue::Comment(LanguageFrame::new([0; 3], "", "hi")))
	);
	assert_eq!(
		raw["TIT2"],
		TagValue::Single(FrameValue::Text(String::from("New")))
	);
}

#[test_log::test]
fn lyrics_with_unknown_language() {
	let frames = v3_frame(b"USLT", 0, b"\x00XXX\x00la la la");

	let raw = update_bytes(&tag(3, 0, &frames), &new_title());
	assert_eq!(
		raw["USLT"],
		TagValue::Single(FrameValue::UnsynchronisedLyrics(LanguageFrame::new(
			*b"XXX", "", "la la la"
		)))
	);
}

#[test_log::test]
fn synchronised_lyrics_with_unknown_fields() {
	// Unknown timestamp format and content type, no language or description
	let body = b"\x00\x00\x00\x00\x07\x20\x00la\x00\x00\x00\x00\x64";
	let frames = v3_frame(b"SYLT", 0, body);

	let raw = update_bytes(&tag(3, 0, &frames), &new_title());
	assert_eq!(
		raw["SYLT"],
		TagValue::Multiple(vec![FrameValue::SynchronisedLyrics(SynchronizedTextFrame {
			language: [0; 3],
			timestamp_format: TimestampFormat::Undefined(7),
			content_type: SyncTextContentType::Undefined(0x20),
			short_text: String::new(),
			synchronised_text: vec![SyncedText {
				text: String::from("la"),
				timestamp: 100,
			}],
		})])
	);
}
