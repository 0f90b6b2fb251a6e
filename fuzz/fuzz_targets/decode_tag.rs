#![no_main]

use id3_codec::config::{ParseOptions, ParsingMode};
use id3_codec::{decode_tag, strip_tag};

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: Vec<u8>| {
	let _ = decode_tag(&data, &ParseOptions::new());
	let _ = decode_tag(&data, &ParseOptions::new().parsing_mode(ParsingMode::Strict));
	let _ = strip_tag(&data, &ParseOptions::new());
});
