use id3_codec::encode_size;

/// Build a tag around an already encoded frame area
pub(crate) fn tag(version: u8, flags: u8, content: &[u8]) -> Vec<u8> {
	let mut tag = vec![b'I', b'D', b'3', version, 0, flags];
	tag.extend(encode_size(content.len() as u32).unwrap());
	tag.extend_from_slice(content);
	tag
}

/// An ID3v2.3 frame, with a plain size
pub(crate) fn v3_frame(id: &[u8; 4], flags: u16, body: &[u8]) -> Vec<u8> {
	let mut frame = id.to_vec();
	frame.extend((body.len() as u32).to_be_bytes());
	frame.extend(flags.to_be_bytes());
	frame.extend_from_slice(body);
	frame
}

/// An ID3v2.4 frame, with a synchsafe size
pub(crate) fn v4_frame(id: &[u8; 4], flags: u16, body: &[u8]) -> Vec<u8> {
	let mut frame = id.to_vec();
	frame.extend(encode_size(body.len() as u32).unwrap());
	frame.extend(flags.to_be_bytes());
	frame.extend_from_slice(body);
	frame
}
