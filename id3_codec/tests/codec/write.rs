use id3_codec::config::{ParseOptions, WriteOptions};
use id3_codec::error::Id3v2ErrorKind;
use id3_codec::items::{
	AttachedPictureFrame, CommercialFrame, Event, EventTimingCodesFrame, EventType, ExtendedTextFrame,
	LanguageFrame, PictureType, PopularimeterFrame, PrivateFrame, ReceivedAs, SyncTextContentType,
	SyncedText, SynchronizedTextFrame, TableOfContentsFrame, TimestampFormat,
	UniqueFileIdentifierFrame, ValidityDate,
};
use id3_codec::{FrameValue, TagMap, TagValue, decode_tag, encode_tag};

use indexmap::IndexMap;

fn single(key: &str, value: FrameValue) -> TagMap {
	let mut map = TagMap::new();
	map.insert(String::from(key), TagValue::Single(value));
	map
}

fn round_trip(values: &TagMap) -> TagMap {
	let bytes = encode_tag(values, WriteOptions::default()).unwrap();
	decode_tag(&bytes, &ParseOptions::new()).unwrap().raw()
}

#[test_log::test]
fn title() {
	let tag = encode_tag(
		&single("title", FrameValue::Text(String::from("abc"))),
		WriteOptions::default(),
	)
	.unwrap();

	assert_eq!(
		tag,
		[
			0x49, 0x44, 0x33, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x13, // Tag header
			0x54, 0x49, 0x54, 0x32, 0x00, 0x00, 0x00, 0x09, 0x00, 0x00, // Frame header
			0x01, 0xFF, 0xFE, 0x61, 0x00, 0x62, 0x00, 0x63, 0x00, // UTF-16 "abc"
		]
	);
}

#[test_log::test]
fn empty() {
	let tag = encode_tag(&TagMap::new(), WriteOptions::default()).unwrap();
	assert_eq!(tag, [0x49, 0x44, 0x33, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
}

#[test_log::test]
fn cardinality() {
	let mut values = TagMap::new();
	values.insert(
		String::from("TIT2"),
		TagValue::Multiple(vec![FrameValue::Text(String::from("a"))]),
	);

	let err = encode_tag(&values, WriteOptions::default()).unwrap_err();
	assert!(matches!(
		err.id3v2_kind(),
		Some(Id3v2ErrorKind::UnexpectedMultipleValues(_))
	));

	// A bare value is fine for repeatable frames
	let txxx = FrameValue::UserDefinedText(ExtendedTextFrame::new("key", "value"));
	let raw = round_trip(&single("TXXX", txxx.clone()));
	assert_eq!(raw["TXXX"], TagValue::Multiple(vec![txxx]));
}

#[test_log::test]
fn lossy_latin1() {
	let values = single("WOAR", FrameValue::Url(String::from("https://example.com/\u{263A}")));

	assert!(encode_tag(&values, WriteOptions::default()).is_err());

	let bytes = encode_tag(&values, WriteOptions::new().lossy_text_encoding(true)).unwrap();
	let raw = decode_tag(&bytes, &ParseOptions::new()).unwrap().raw();
	assert_eq!(
		raw["WOAR"],
		TagValue::Multiple(vec![FrameValue::Url(String::from(
			"https://example.com/?"
		))])
	);
}

#[test_log::test]
fn padding() {
	let values = single("title", FrameValue::Text(String::from("abc")));
	let tag = encode_tag(&values, WriteOptions::new().preferred_padding(64)).unwrap();

	assert_eq!(tag.len(), 10 + 19 + 64);
	assert_eq!(&tag[6..10], [0x00, 0x00, 0x00, 0x53]);

	let raw = decode_tag(&tag, &ParseOptions::new()).unwrap().raw();
	assert_eq!(raw.len(), 1);
}

#[test_log::test]
fn every_frame_kind() {
	let mut prices = IndexMap::new();
	prices.insert(String::from("USD"), String::from("1.00"));

	let values: Vec<(&str, FrameValue)> = vec![
		("album", FrameValue::Text(String::from("Album"))),
		("artistUrl", FrameValue::Url(String::from("https://example.com"))),
		(
			"comment",
			FrameValue::Comment(LanguageFrame::new(*b"eng", "s", "t")),
		),
		(
			"unsynchronisedLyrics",
			FrameValue::UnsynchronisedLyrics(LanguageFrame::new(*b"eng", "", "la la la")),
		),
		(
			"image",
			FrameValue::Picture(AttachedPictureFrame {
				mime_type: Some(String::from("image/png")),
				picture_type: PictureType::CoverBack,
				description: String::from("Back"),
				data: vec![0x89, b'P', b'N', b'G'],
			}),
		),
		(
			"popularimeter",
			FrameValue::Popularimeter(PopularimeterFrame::new("a@b.c", 255, 10)),
		),
		("private", FrameValue::Private(PrivateFrame::new("owner", [1_u8, 2, 3]))),
		(
			"uniqueFileIdentifier",
			FrameValue::UniqueFileIdentifier(UniqueFileIdentifierFrame::new(
				"http://musicbrainz.org",
				*b"abc",
			)),
		),
		(
			"tableOfContents",
			FrameValue::TableOfContents(TableOfContentsFrame::new(
				"toc",
				true,
				vec![String::from("chp0")],
			)),
		),
		(
			"eventTimingCodes",
			FrameValue::EventTimingCodes(EventTimingCodesFrame::new(
				TimestampFormat::MS,
				vec![Event {
					event_type: EventType::IntroStart,
					timestamp: 1000,
				}],
			)),
		),
		(
			"synchronisedLyrics",
			FrameValue::SynchronisedLyrics(SynchronizedTextFrame {
				language: *b"eng",
				timestamp_format: TimestampFormat::MS,
				content_type: SyncTextContentType::Lyrics,
				short_text: String::from("lyrics"),
				synchronised_text: vec![SyncedText {
					text: String::from("la"),
					timestamp: 100,
				}],
			}),
		),
		(
			"commercialFrame",
			FrameValue::Commercial(CommercialFrame {
				prices,
				valid_until: ValidityDate {
					year: 2030,
					month: 12,
					day: 31,
				},
				contact_url: String::from("https://example.com"),
				received_as: ReceivedAs::FileOverInternet,
				name_of_seller: String::from("Seller"),
				description: String::from("Album"),
				seller_logo: None,
			}),
		),
	];

	let map: TagMap = values
		.iter()
		.map(|(key, value)| (String::from(*key), TagValue::Single(value.clone())))
		.collect();

	let bytes = encode_tag(&map, WriteOptions::default()).unwrap();
	let friendly = decode_tag(&bytes, &ParseOptions::new()).unwrap().friendly();

	assert_eq!(friendly.len(), values.len());
	for (key, value) in values {
		assert_eq!(
			friendly[key].values(),
			[value],
			"`{key}` did not survive a round trip"
		);
	}
}
