//! Frame identifier tables
//!
//! Every version of ID3v2 has its own set of frame identifiers. This module maps them to and from
//! human readable aliases (ex. `"title"` <=> `"TIT2"`), upgrades ID3v2.2 identifiers, and
//! describes how many times each frame may appear in a tag.
//!
//! Unknown aliases and identifiers are never an error, lookups simply return `None`.

use crate::frame::header::verify_id;
use crate::header::Id3v2Version;

use std::collections::HashMap;
use std::sync::OnceLock;

/// The table to use for alias lookups
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IdentifierTable {
	/// ID3v2.2 (3 character identifiers)
	V2,
	/// ID3v2.3
	V3,
	/// ID3v2.4
	V4,
	/// ID3v2.3, falling back to ID3v2.4
	///
	/// This is what tags are written with, as the two are largely compatible.
	V34,
}

impl From<Id3v2Version> for IdentifierTable {
	fn from(version: Id3v2Version) -> Self {
		match version {
			Id3v2Version::V2 => Self::V2,
			Id3v2Version::V3 => Self::V3,
			Id3v2Version::V4 => Self::V4,
		}
	}
}

/// The field used to match repeated frames while merging
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CompareKey {
	/// Frames with equal [`FrameValue::description`](crate::FrameValue::description)s replace one another
	Description,
}

/// How a frame may appear in a tag
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FrameOptions {
	/// Whether the frame may appear more than once
	pub multiple: bool,
	/// How repeated frames are matched while merging, see [`merge_tags`](crate::merge_tags)
	pub update_compare_key: Option<CompareKey>,
}

/// Get the frame identifier for an alias
///
/// # Examples
///
/// ```rust
/// use id3_codec::identifiers::{IdentifierTable, alias_to_id};
///
/// assert_eq!(alias_to_id(IdentifierTable::V3, "title"), Some("TIT2"));
/// assert_eq!(alias_to_id(IdentifierTable::V2, "title"), Some("TT2"));
///
/// // "recordingTime" only exists in ID3v2.4
/// assert_eq!(alias_to_id(IdentifierTable::V3, "recordingTime"), None);
/// assert_eq!(alias_to_id(IdentifierTable::V34, "recordingTime"), Some("TDRC"));
/// ```
pub fn alias_to_id(table: IdentifierTable, alias: &str) -> Option<&'static str> {
	match table {
		IdentifierTable::V2 => v2_table().by_alias.get(alias).copied(),
		IdentifierTable::V3 => v3_table().by_alias.get(alias).copied(),
		IdentifierTable::V4 => v4_table().by_alias.get(alias).copied(),
		IdentifierTable::V34 => alias_to_id(IdentifierTable::V3, alias)
			.or_else(|| alias_to_id(IdentifierTable::V4, alias)),
	}
}

/// Get the alias for a frame identifier
///
/// # Examples
///
/// ```rust
/// use id3_codec::identifiers::{IdentifierTable, id_to_alias};
///
/// assert_eq!(id_to_alias(IdentifierTable::V34, "TPE1"), Some("artist"));
/// assert_eq!(id_to_alias(IdentifierTable::V34, "TDRC"), Some("recordingTime"));
/// assert_eq!(id_to_alias(IdentifierTable::V34, "XXXX"), None);
/// ```
pub fn id_to_alias(table: IdentifierTable, id: &str) -> Option<&'static str> {
	match table {
		IdentifierTable::V2 => v2_table().by_id.get(id).copied(),
		IdentifierTable::V3 => v3_table().by_id.get(id).copied(),
		IdentifierTable::V4 => v4_table().by_id.get(id).copied(),
		IdentifierTable::V34 => {
			id_to_alias(IdentifierTable::V3, id).or_else(|| id_to_alias(IdentifierTable::V4, id))
		},
	}
}

/// Upgrade an ID3v2.2 identifier to its ID3v2.3/4 equivalent
///
/// Where ID3v2.3 has an equivalent, it is preferred over the ID3v2.4 one.
///
/// # Examples
///
/// ```rust
/// use id3_codec::identifiers::upgrade_v2;
///
/// assert_eq!(upgrade_v2("TT2"), Some("TIT2"));
/// assert_eq!(upgrade_v2("PIC"), Some("APIC"));
/// assert_eq!(upgrade_v2("TYE"), Some("TYER"));
/// ```
pub fn upgrade_v2(id: &str) -> Option<&'static str> {
	v2_upgrades().get(id).copied()
}

/// Get the [`FrameOptions`] for a frame identifier
///
/// # Examples
///
/// ```rust
/// use id3_codec::identifiers::{CompareKey, frame_options};
///
/// let txxx = frame_options("TXXX");
/// assert!(txxx.multiple);
/// assert_eq!(txxx.update_compare_key, Some(CompareKey::Description));
///
/// assert!(frame_options("PRIV").multiple);
/// assert!(!frame_options("TIT2").multiple);
/// ```
pub fn frame_options(id: &str) -> FrameOptions {
	match id {
		"TXXX" | "WXXX" => FrameOptions {
			multiple: true,
			update_compare_key: Some(CompareKey::Description),
		},
		"WCOM" | "WOAR" | "PRIV" | "UFID" | "CHAP" | "CTOC" | "SYLT" | "COMR" => FrameOptions {
			multiple: true,
			update_compare_key: None,
		},
		_ => FrameOptions::default(),
	}
}

/// Resolve a key given on write to a frame identifier
///
/// Aliases are looked up in the ID3v2.3 table first, then ID3v2.4. Anything else must already be
/// a 4 character identifier.
pub(crate) fn resolve_write_id(key: &str) -> Option<&str> {
	if let Some(id) = alias_to_id(IdentifierTable::V34, key) {
		return Some(id);
	}

	(key.len() == 4 && verify_id(key.as_bytes()).is_ok()).then_some(key)
}

struct FrameTable {
	by_alias: HashMap<&'static str, &'static str>,
	by_id: HashMap<&'static str, &'static str>,
}

impl FrameTable {
	fn new(pairs: &[(&'static str, &'static str)]) -> Self {
		let mut by_alias = HashMap::with_capacity(pairs.len());
		let mut by_id = HashMap::with_capacity(pairs.len());

		for (alias, id) in pairs {
			by_alias.insert(*alias, *id);
			by_id.entry(*id).or_insert(*alias);
		}

		Self { by_alias, by_id }
	}
}

macro_rules! gen_tables {
	(
		$(table $version:ident => [$($alias:literal => $id:literal),+ $(,)?];)+
		UPGRADES => [$($v2_id:literal => $upgraded:literal),+ $(,)?]
	) => {
		paste::paste! {
			$(
				fn [<$version:lower _table>]() -> &'static FrameTable {
					static INSTANCE: OnceLock<FrameTable> = OnceLock::new();
					INSTANCE.get_or_init(|| FrameTable::new(&[$(($alias, $id)),+]))
				}
			)+
		}

		fn v2_upgrades() -> &'static HashMap<&'static str, &'static str> {
			static INSTANCE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
			INSTANCE.get_or_init(|| {
				let mut map = HashMap::new();
				$(
					map.insert($v2_id, $upgraded);
				)+
				map
			})
		}
	};
}

gen_tables! {
	table V2 => [
		"album" => "TAL",
		"bpm" => "TBP",
		"composer" => "TCM",
		"genre" => "TCO",
		"copyright" => "TCR",
		"date" => "TDA",
		"playlistDelay" => "TDY",
		"encodedBy" => "TEN",
		"textWriter" => "TXT",
		"fileType" => "TFT",
		"time" => "TIM",
		"contentGroup" => "TT1",
		"title" => "TT2",
		"subtitle" => "TT3",
		"initialKey" => "TKE",
		"language" => "TLA",
		"length" => "TLE",
		"mediaType" => "TMT",
		"originalTitle" => "TOT",
		"originalFilename" => "TOF",
		"originalTextwriter" => "TOL",
		"originalArtist" => "TOA",
		"originalYear" => "TOR",
		"artist" => "TP1",
		"performerInfo" => "TP2",
		"conductor" => "TP3",
		"remixArtist" => "TP4",
		"partOfSet" => "TPA",
		"publisher" => "TPB",
		"trackNumber" => "TRK",
		"recordingDates" => "TRD",
		"size" => "TSI",
		"ISRC" => "TRC",
		"encodingTechnology" => "TSS",
		"year" => "TYE",
		"comment" => "COM",
		"image" => "PIC",
		"unsynchronisedLyrics" => "ULT",
		"synchronisedLyrics" => "SLT",
		"userDefinedText" => "TXX",
		"popularimeter" => "POP",
		"userDefinedUrl" => "WXX",
		"commercialUrl" => "WCM",
		"copyrightUrl" => "WCP",
		"fileUrl" => "WAF",
		"artistUrl" => "WAR",
		"audioSourceUrl" => "WAS",
		"publisherUrl" => "WPB",
		"uniqueFileIdentifier" => "UFI",
		"eventTimingCodes" => "ETC",
	];
	table V3 => [
		"album" => "TALB",
		"bpm" => "TBPM",
		"composer" => "TCOM",
		"genre" => "TCON",
		"copyright" => "TCOP",
		"date" => "TDAT",
		"playlistDelay" => "TDLY",
		"encodedBy" => "TENC",
		"textWriter" => "TEXT",
		"fileType" => "TFLT",
		"time" => "TIME",
		"contentGroup" => "TIT1",
		"title" => "TIT2",
		"subtitle" => "TIT3",
		"initialKey" => "TKEY",
		"language" => "TLAN",
		"length" => "TLEN",
		"mediaType" => "TMED",
		"originalTitle" => "TOAL",
		"originalFilename" => "TOFN",
		"originalTextwriter" => "TOLY",
		"originalArtist" => "TOPE",
		"originalYear" => "TORY",
		"fileOwner" => "TOWN",
		"artist" => "TPE1",
		"performerInfo" => "TPE2",
		"conductor" => "TPE3",
		"remixArtist" => "TPE4",
		"partOfSet" => "TPOS",
		"publisher" => "TPUB",
		"trackNumber" => "TRCK",
		"recordingDates" => "TRDA",
		"internetRadioName" => "TRSN",
		"internetRadioOwner" => "TRSO",
		"size" => "TSIZ",
		"ISRC" => "TSRC",
		"encodingTechnology" => "TSSE",
		"year" => "TYER",
		"comment" => "COMM",
		"image" => "APIC",
		"unsynchronisedLyrics" => "USLT",
		"synchronisedLyrics" => "SYLT",
		"userDefinedText" => "TXXX",
		"popularimeter" => "POPM",
		"private" => "PRIV",
		"chapter" => "CHAP",
		"tableOfContents" => "CTOC",
		"userDefinedUrl" => "WXXX",
		"commercialUrl" => "WCOM",
		"copyrightUrl" => "WCOP",
		"fileUrl" => "WOAF",
		"artistUrl" => "WOAR",
		"audioSourceUrl" => "WOAS",
		"radioStationUrl" => "WORS",
		"paymentUrl" => "WPAY",
		"publisherUrl" => "WPUB",
		"uniqueFileIdentifier" => "UFID",
		"eventTimingCodes" => "ETCO",
		"commercialFrame" => "COMR",
	];
	table V4 => [
		"album" => "TALB",
		"bpm" => "TBPM",
		"composer" => "TCOM",
		"genre" => "TCON",
		"copyright" => "TCOP",
		"encodingTime" => "TDEN",
		"playlistDelay" => "TDLY",
		"originalReleaseTime" => "TDOR",
		"recordingTime" => "TDRC",
		"releaseTime" => "TDRL",
		"taggingTime" => "TDTG",
		"encodedBy" => "TENC",
		"textWriter" => "TEXT",
		"fileType" => "TFLT",
		"involvedPeopleList" => "TIPL",
		"contentGroup" => "TIT1",
		"title" => "TIT2",
		"subtitle" => "TIT3",
		"initialKey" => "TKEY",
		"language" => "TLAN",
		"length" => "TLEN",
		"musicianCreditsList" => "TMCL",
		"mediaType" => "TMED",
		"mood" => "TMOO",
		"originalTitle" => "TOAL",
		"originalFilename" => "TOFN",
		"originalTextwriter" => "TOLY",
		"originalArtist" => "TOPE",
		"fileOwner" => "TOWN",
		"artist" => "TPE1",
		"performerInfo" => "TPE2",
		"conductor" => "TPE3",
		"remixArtist" => "TPE4",
		"partOfSet" => "TPOS",
		"producedNotice" => "TPRO",
		"publisher" => "TPUB",
		"trackNumber" => "TRCK",
		"internetRadioName" => "TRSN",
		"internetRadioOwner" => "TRSO",
		"albumSortOrder" => "TSOA",
		"performerSortOrder" => "TSOP",
		"titleSortOrder" => "TSOT",
		"ISRC" => "TSRC",
		"encodingTechnology" => "TSSE",
		"setSubtitle" => "TSST",
		"comment" => "COMM",
		"image" => "APIC",
		"unsynchronisedLyrics" => "USLT",
		"synchronisedLyrics" => "SYLT",
		"userDefinedText" => "TXXX",
		"popularimeter" => "POPM",
		"private" => "PRIV",
		"chapter" => "CHAP",
		"tableOfContents" => "CTOC",
		"userDefinedUrl" => "WXXX",
		"commercialUrl" => "WCOM",
		"copyrightUrl" => "WCOP",
		"fileUrl" => "WOAF",
		"artistUrl" => "WOAR",
		"audioSourceUrl" => "WOAS",
		"radioStationUrl" => "WORS",
		"paymentUrl" => "WPAY",
		"publisherUrl" => "WPUB",
		"uniqueFileIdentifier" => "UFID",
		"eventTimingCodes" => "ETCO",
		"commercialFrame" => "COMR",
	];
	UPGRADES => [
		// Standard frames
		"BUF" => "RBUF",
		"CNT" => "PCNT",
		"COM" => "COMM",
		"CRA" => "AENC",
		"ETC" => "ETCO",
		"GEO" => "GEOB",
		"IPL" => "IPLS",
		"MCI" => "MCDI",
		"MLL" => "MLLT",
		"PIC" => "APIC",
		"POP" => "POPM",
		"REV" => "RVRB",
		"SLT" => "SYLT",
		"STC" => "SYTC",
		"TAL" => "TALB",
		"TBP" => "TBPM",
		"TCM" => "TCOM",
		"TCO" => "TCON",
		"TCR" => "TCOP",
		"TDA" => "TDAT",
		"TDY" => "TDLY",
		"TEN" => "TENC",
		"TFT" => "TFLT",
		"TIM" => "TIME",
		"TKE" => "TKEY",
		"TLA" => "TLAN",
		"TLE" => "TLEN",
		"TMT" => "TMED",
		"TOA" => "TOPE",
		"TOF" => "TOFN",
		"TOL" => "TOLY",
		"TOR" => "TORY",
		"TOT" => "TOAL",
		"TP1" => "TPE1",
		"TP2" => "TPE2",
		"TP3" => "TPE3",
		"TP4" => "TPE4",
		"TPA" => "TPOS",
		"TPB" => "TPUB",
		"TRC" => "TSRC",
		"TRD" => "TRDA",
		"TRK" => "TRCK",
		"TSI" => "TSIZ",
		"TSS" => "TSSE",
		"TT1" => "TIT1",
		"TT2" => "TIT2",
		"TT3" => "TIT3",
		"TXT" => "TEXT",
		"TXX" => "TXXX",
		"TYE" => "TYER",
		"UFI" => "UFID",
		"ULT" => "USLT",
		"WAF" => "WOAF",
		"WAR" => "WOAR",
		"WAS" => "WOAS",
		"WCM" => "WCOM",
		"WCP" => "WCOP",
		"WPB" => "WPUB",
		"WXX" => "WXXX",

		// iTunes non-standard frames
		"TCP" => "TCMP",
		"TS2" => "TSO2",
		"TSA" => "TSOA",
		"TSC" => "TSOC",
		"TSP" => "TSOP",
		"TST" => "TSOT",
		"PCS" => "PCST",
		"TCT" => "TCAT",
		"TDS" => "TDES",
		"TID" => "TGID",
		"WFD" => "WFED",
		"MVI" => "MVIN",
		"MVN" => "MVNM",
		"GP1" => "GRP1",
	]
}
