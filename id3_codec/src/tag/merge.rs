use super::{TagMap, TagValue};
use crate::error::Result;
use crate::identifiers::{CompareKey, frame_options, resolve_write_id};
use crate::macros::id3v2_err;

/// Merge new values into the raw view of an existing tag
///
/// Keys of `new` may be aliases or identifiers, the result is keyed by identifier like `existing`.
/// Keys that are neither are skipped.
///
/// For every key of `new`:
///
/// * If the frame may only appear once, or `existing` has no [`TagValue::Multiple`] for it, the new
///   value replaces the existing one
/// * If the frame has a [`CompareKey`], each new value replaces the existing value with the same key,
///   or is appended if there is none
/// * Otherwise, the new values are appended
///
/// # Errors
///
/// * A [`TagValue::Multiple`] is given for a frame that may only appear once
///
/// # Examples
///
/// ```rust
/// use id3_codec::items::ExtendedTextFrame;
/// use id3_codec::{FrameValue, TagMap, TagValue, merge_tags};
///
/// # fn main() -> id3_codec::error::Result<()> {
/// let txxx = |description: &str, content: &str| {
/// 	FrameValue::UserDefinedText(ExtendedTextFrame {
/// 		description: String::from(description),
/// 		content: String::from(content),
/// 	})
/// };
///
/// let mut existing = TagMap::new();
/// existing.insert(String::from("TXXX"), TagValue::Multiple(vec![txxx("a", "1")]));
///
/// let mut new = TagMap::new();
/// new.insert(String::from("userDefinedText"), TagValue::Single(txxx("a", "2")));
///
/// let merged = merge_tags(&new, &existing)?;
/// assert_eq!(merged["TXXX"], TagValue::Multiple(vec![txxx("a", "2")]));
/// # Ok(()) }
/// ```
pub fn merge_tags(new: &TagMap, existing: &TagMap) -> Result<TagMap> {
	let mut merged = existing.clone();

	for (key, value) in new {
		let Some(id) = resolve_write_id(key) else {
			log::warn!("Unknown key `{key}`, skipping");
			continue;
		};

		let options = frame_options(id);

		if !options.multiple && matches!(value, TagValue::Multiple(_)) {
			id3v2_err!(@BAIL UnexpectedMultipleValues(id.to_owned()));
		}

		let current = match merged.get_mut(id) {
			Some(TagValue::Multiple(current)) if options.multiple => current,
			_ => {
				log::trace!("Replacing `{id}`");
				merged.insert(id.to_owned(), value.clone());
				continue;
			},
		};

		for new_value in value.values() {
			let position = match options.update_compare_key {
				Some(CompareKey::Description) => current
					.iter()
					.position(|existing| existing.description() == new_value.description()),
				None => None,
			};

			match position {
				Some(position) => {
					log::trace!("Updating `{id}` at index {position}");
					current[position] = new_value.clone();
				},
				None => current.push(new_value.clone()),
			}
		}
	}

	Ok(merged)
}
