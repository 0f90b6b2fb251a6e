#![no_main]

use id3_codec::config::{ParseOptions, WriteOptions};
use id3_codec::{decode_tag, encode_tag};

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: Vec<u8>| {
	let Ok(tag) = decode_tag(&data, &ParseOptions::new()) else {
		return;
	};

	// Anything that was read must be writable again
	if let Ok(bytes) = encode_tag(&tag.raw(), WriteOptions::new().lossy_text_encoding(true)) {
		let _ = decode_tag(&bytes, &ParseOptions::new());
	}
});
