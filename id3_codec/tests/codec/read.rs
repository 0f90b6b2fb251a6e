use crate::util::{tag, v3_frame, v4_frame};

use id3_codec::config::{ParseOptions, ParsingMode};
use id3_codec::items::ChapterFrame;
use id3_codec::{FrameValue, Id3v2Version, TagValue, decode_tag, read_tags, strip_tag};

fn text(value: &str) -> FrameValue {
	FrameValue::Text(String::from(value))
}

fn title_tag() -> Vec<u8> {
	let mut frames = v3_frame(b"TIT2", 0, b"\x00Title");
	frames.extend(v3_frame(b"TPE1", 0, b"\x00Artist"));
	tag(3, 0, &frames)
}

#[test_log::test]
fn no_tag() {
	let buffer = [0x12, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D];

	let tag = decode_tag(&buffer, &ParseOptions::new()).unwrap();
	assert!(tag.is_empty());

	let views = read_tags(&buffer, &ParseOptions::new()).unwrap();
	assert!(views.raw.unwrap().is_empty());
	assert!(views.friendly.unwrap().is_empty());

	assert_eq!(strip_tag(&buffer, &ParseOptions::new()).unwrap(), buffer);
}

#[test_log::test]
fn leading_junk() {
	let mut buffer = vec![0xAA; 5];
	buffer.extend(title_tag());

	let tag = decode_tag(&buffer, &ParseOptions::new()).unwrap();
	assert_eq!(tag.raw()["TIT2"], TagValue::Single(text("Title")));

	// Past the search window
	let mut buffer = vec![0xAA; 21];
	buffer.extend(title_tag());
	assert!(decode_tag(&buffer, &ParseOptions::new()).unwrap().is_empty());

	let options = ParseOptions::new().max_junk_bytes(21);
	assert!(!decode_tag(&buffer, &options).unwrap().is_empty());
}

#[test_log::test]
fn views() {
	let buffer = title_tag();

	let views = read_tags(&buffer, &ParseOptions::new()).unwrap();
	let friendly = views.friendly.unwrap();
	let raw = views.raw.unwrap();
	assert_eq!(friendly["title"], TagValue::Single(text("Title")));
	assert_eq!(friendly["artist"], TagValue::Single(text("Artist")));
	assert_eq!(raw["TIT2"], TagValue::Single(text("Title")));

	let views = read_tags(&buffer, &ParseOptions::new().only_raw(true)).unwrap();
	assert!(views.friendly.is_none());
	assert!(views.raw.is_some());

	let views = read_tags(&buffer, &ParseOptions::new().no_raw(true)).unwrap();
	assert!(views.friendly.is_some());
	assert!(views.raw.is_none());

	let views = read_tags(&buffer, &ParseOptions::new().exclude(["TIT2"])).unwrap();
	assert!(!views.raw.unwrap().contains_key("TIT2"));
}

#[test_log::test]
fn corrupt_frame_size() {
	let mut frames = v3_frame(b"TIT2", 0, b"\x00Title");
	let mut artist = v3_frame(b"TPE1", 0, b"\x00Artist");
	artist[6] = 0x10;
	frames.extend(artist);
	frames.extend(v3_frame(b"TALB", 0, b"\x00Album"));

	let buffer = tag(3, 0, &frames);

	// Only the frames before the broken one can be trusted
	let tag = decode_tag(&buffer, &ParseOptions::new()).unwrap();
	assert_eq!(tag.frames().len(), 1);
	assert_eq!(tag.frames()[0].value, text("Title"));

	let strict = ParseOptions::new().parsing_mode(ParsingMode::Strict);
	assert!(decode_tag(&buffer, &strict).is_err());
}

#[test_log::test]
fn truncated_buffer() {
	let buffer = title_tag();

	for len in 0..buffer.len() {
		let tag = decode_tag(&buffer[..len], &ParseOptions::new()).unwrap();
		assert!(tag.frames().len() <= 1);
	}
}

#[test_log::test]
fn extended_header() {
	// Size (excluding itself), flags, padding size
	let mut content = vec![0, 0, 0, 6, 0, 0, 0, 0, 0, 0];
	content.extend(v3_frame(b"TIT2", 0, b"\x00Title"));

	let decoded = decode_tag(&tag(3, 0x40, &content), &ParseOptions::new()).unwrap();
	assert_eq!(decoded.raw()["TIT2"], TagValue::Single(text("Title")));

	// Size (including itself), flag byte count, flags
	let mut content = vec![0, 0, 0, 6, 1, 0];
	content.extend(v4_frame(b"TIT2", 0, b"\x03Title"));

	let decoded = decode_tag(&tag(4, 0x40, &content), &ParseOptions::new()).unwrap();
	assert_eq!(decoded.version(), Id3v2Version::V4);
	assert_eq!(decoded.raw()["TIT2"], TagValue::Single(text("Title")));
}

#[test_log::test]
fn id3v22() {
	let mut content = vec![b'T', b'T', b'2', 0, 0, 4, 0, b'a', b'b', b'c'];
	content.extend([b'C', b'O', b'M', 0, 0, 8, 0, b'e', b'n', b'g', 0, b'h', b'i', b'!']);

	let decoded = decode_tag(&tag(2, 0, &content), &ParseOptions::new()).unwrap();
	assert_eq!(decoded.version(), Id3v2Version::V2);

	let friendly = decoded.friendly();
	assert_eq!(friendly["title"], TagValue::Single(text("abc")));

	let TagValue::Single(FrameValue::Comment(comment)) = &friendly["comment"] else {
		panic!("Expected a comment");
	};
	assert_eq!(comment.text, "hi!");

	// Compressed ID3v2.2 tags can't be read
	assert!(decode_tag(&tag(2, 0x40, &content), &ParseOptions::new())
		.unwrap()
		.is_empty());
}

#[test_log::test]
fn tag_unsynchronisation() {
	// "\xFF\xE0" in Latin-1, unsynchronised
	let frames = v3_frame(b"TIT2", 0, b"\x00\xFF\x00\xE0");
	// The frame size is the size *after* resynchronisation
	let mut frames = frames;
	frames[7] = 3;

	let tag = decode_tag(&tag(3, 0x80, &frames), &ParseOptions::new()).unwrap();
	assert_eq!(tag.frames()[0].value, text("\u{FF}\u{E0}"));
}

#[test_log::test]
fn frame_unsynchronisation() {
	// Unsynchronisation + data length indicator
	let frame = v4_frame(b"TIT2", 0x0003, b"\x00\x00\x00\x03\x00\xFF\x00\xE0");

	let tag = decode_tag(&tag(4, 0, &frame), &ParseOptions::new()).unwrap();
	let frame = &tag.frames()[0];
	assert!(frame.flags.unsynchronisation);
	assert_eq!(frame.flags.data_length_indicator, Some(3));
	assert_eq!(frame.value, text("\u{FF}\u{E0}"));
}

#[cfg(feature = "id3v2_compression_support")]
#[test_log::test]
fn compressed_frame() {
	use id3_codec::config::{GlobalOptions, apply_global_options};

	use std::io::Write;

	let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::best());
	encoder.write_all(b"\x00").unwrap();
	encoder.write_all(&[b'a'; 1000]).unwrap();
	let compressed = encoder.finish().unwrap();

	// Data length indicator + zlib stream
	let mut body = id3_codec::encode_size(1001).unwrap().to_vec();
	body.extend(compressed);

	let buffer = tag(4, 0, &v4_frame(b"TIT2", 0x0009, &body));

	let tag = decode_tag(&buffer, &ParseOptions::new()).unwrap();
	assert_eq!(tag.frames()[0].value, text(&"a".repeat(1000)));

	// Decompressed frames can't exceed the allocation limit
	apply_global_options(GlobalOptions::new().allocation_limit(100));

	let relaxed = decode_tag(&buffer, &ParseOptions::new());
	let strict = decode_tag(
		&buffer,
		&ParseOptions::new().parsing_mode(ParsingMode::Strict),
	);

	apply_global_options(GlobalOptions::default());

	assert!(relaxed.unwrap().is_empty());
	assert!(strict.is_err());
}

#[test_log::test]
fn encrypted_frames_are_dropped() {
	let mut frames = v3_frame(b"TIT2", 0x0040, b"\x01\x00Secret");
	frames.extend(v3_frame(b"TPE1", 0, b"\x00Artist"));

	let tag = decode_tag(&tag(3, 0, &frames), &ParseOptions::new()).unwrap();
	assert_eq!(tag.frames().len(), 1);
	assert_eq!(tag.frames()[0].id(), "TPE1");
}

#[test_log::test]
fn nested_chapter() {
	let nested = v3_frame(b"TIT2", 0, b"\x00x");

	let mut body = b"chp0\x00".to_vec();
	body.extend([0, 0, 0, 0, 0, 0, 0x03, 0xE8]);
	body.extend([0xFF; 8]);
	body.extend(nested);

	let tag = decode_tag(&tag(3, 0, &v3_frame(b"CHAP", 0, &body)), &ParseOptions::new()).unwrap();

	let TagValue::Multiple(chapters) = &tag.raw()["CHAP"] else {
		panic!("Expected multiple chapters");
	};

	let FrameValue::Chapter(chapter) = &chapters[0] else {
		panic!("Expected a chapter");
	};

	let mut expected = ChapterFrame::new("chp0", 0, 1000);
	expected.tag = chapter.tag.clone();
	assert_eq!(chapter, &expected);
	assert_eq!(chapter.tag.raw()["TIT2"], TagValue::Single(text("x")));
}

#[test_log::test]
fn strict_mode() {
	let mut frames = v3_frame(b"TIT2", 0, b"\x00Title");
	// Invalid text encoding
	frames.extend(v3_frame(b"TPE1", 0, b"\x07Artist"));
	let buffer = tag(3, 0, &frames);

	assert_eq!(
		decode_tag(&buffer, &ParseOptions::new())
			.unwrap()
			.frames()
			.len(),
		1
	);

	let strict = ParseOptions::new().parsing_mode(ParsingMode::Strict);
	assert!(decode_tag(&buffer, &strict).is_err());
}

#[test_log::test]
fn strip() {
	let mut buffer = title_tag();
	buffer.extend(b"audio");

	assert_eq!(strip_tag(&buffer, &ParseOptions::new()).unwrap(), b"audio");

	// Bad size field
	buffer[6] = 0x80;
	assert!(strip_tag(&buffer, &ParseOptions::new()).is_err());
}
