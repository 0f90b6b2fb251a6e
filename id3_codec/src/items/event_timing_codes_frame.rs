use crate::error::Result;
use crate::frame::content::FrameContext;
use crate::frame::{FrameBuilder, FrameReader};
use crate::items::TimestampFormat;
use crate::macros::{byte_enum, id3v2_err};
use crate::write::frame::WriteContext;

byte_enum! {
	/// The type of events that can occur in an [`EventTimingCodesFrame`]
	///
	/// This is used in [`Event`]. The `NotPredefinedSynch*` events are for user events.
	#[allow(missing_docs)]
	pub enum EventType {
		Padding = 0x00,
		EndOfInitialSilence = 0x01,
		IntroStart = 0x02,
		MainPartStart = 0x03,
		OutroStart = 0x04,
		OutroEnd = 0x05,
		VerseStart = 0x06,
		RefrainStart = 0x07,
		InterludeStart = 0x08,
		ThemeStart = 0x09,
		VariationStart = 0x0A,
		KeyChange = 0x0B,
		TimeChange = 0x0C,
		MomentaryUnwantedNoise = 0x0D,
		SustainedNoise = 0x0E,
		SustainedNoiseEnd = 0x0F,
		IntroEnd = 0x10,
		MainPartEnd = 0x11,
		VerseEnd = 0x12,
		RefrainEnd = 0x13,
		ThemeEnd = 0x14,
		Profanity = 0x15,
		ProfanityEnd = 0x16,
		NotPredefinedSynch0 = 0xE0,
		NotPredefinedSynch1 = 0xE1,
		NotPredefinedSynch2 = 0xE2,
		NotPredefinedSynch3 = 0xE3,
		NotPredefinedSynch4 = 0xE4,
		NotPredefinedSynch5 = 0xE5,
		NotPredefinedSynch6 = 0xE6,
		NotPredefinedSynch7 = 0xE7,
		NotPredefinedSynch8 = 0xE8,
		NotPredefinedSynch9 = 0xE9,
		NotPredefinedSynchA = 0xEA,
		NotPredefinedSynchB = 0xEB,
		NotPredefinedSynchC = 0xEC,
		NotPredefinedSynchD = 0xED,
		NotPredefinedSynchE = 0xEE,
		NotPredefinedSynchF = 0xEF,
		AudioEnd = 0xFD,
		AudioFileEnds = 0xFE,
	}
}

/// An event for an [`EventTimingCodesFrame`]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Event {
	/// The event type
	pub event_type: EventType,
	/// The timestamp according to the [`TimestampFormat`]
	pub timestamp: u32,
}

/// An `ID3v2` event timing codes frame (`ETCO`)
///
/// This frame defines a list of different types of events and the timestamps at which they occur.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct EventTimingCodesFrame {
	/// The format of the timestamps
	pub timestamp_format: TimestampFormat,
	/// The events, in the order they appear in the frame
	pub events: Vec<Event>,
}

impl EventTimingCodesFrame {
	/// Create a new [`EventTimingCodesFrame`]
	pub fn new(timestamp_format: TimestampFormat, events: Vec<Event>) -> Self {
		Self {
			timestamp_format,
			events,
		}
	}

	pub(crate) fn parse(body: &[u8], ctx: &FrameContext<'_>) -> Result<Self> {
		let mut reader = FrameReader::new(body);

		let timestamp_format = TimestampFormat::parse(reader.consume_u8()?, ctx)?;

		if reader.len() % 5 != 0 {
			id3v2_err!(@BAIL BadFrameLength);
		}

		let mut events = Vec::with_capacity(reader.len() / 5);
		while !reader.is_empty() {
			let event_type = EventType::from_u8(reader.consume_u8()?);
			let timestamp = reader.consume_number(4)? as u32;

			events.push(Event {
				event_type,
				timestamp,
			});
		}

		Ok(Self {
			timestamp_format,
			events,
		})
	}

	pub(crate) fn create(&self, id: &str, ctx: &mut WriteContext) -> Result<FrameBuilder> {
		let mut builder = FrameBuilder::new(id, None).lossy(ctx.lossy);
		builder
			.append_number(u64::from(self.timestamp_format.as_u8()), 1)
			.append_array(&self.events, |builder, event| {
				builder
					.append_number(u64::from(event.event_type.as_u8()), 1)
					.append_number(u64::from(event.timestamp), 4);
				Ok(())
			})?;

		Ok(builder)
	}
}
