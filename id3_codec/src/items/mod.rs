//! Frame body codecs
//!
//! Every frame kind that isn't plain text (`T***`) or a plain URL (`W***`) has its own value type
//! here, see [`FrameValue`](crate::FrameValue) for the identifiers they belong to.

mod attached_picture_frame;
mod chapter_frame;
mod commercial_frame;
mod event_timing_codes_frame;
mod extended_text_frame;
mod extended_url_frame;
mod language_frame;
mod popularimeter;
mod private_frame;
mod sync_text;
mod table_of_contents_frame;
mod unique_file_identifier;

pub use attached_picture_frame::{AttachedPictureFrame, PictureType};
pub use chapter_frame::ChapterFrame;
pub use commercial_frame::{CommercialFrame, ReceivedAs, SellerLogo, ValidityDate};
pub use event_timing_codes_frame::{Event, EventTimingCodesFrame, EventType};
pub use extended_text_frame::ExtendedTextFrame;
pub use extended_url_frame::ExtendedUrlFrame;
pub use language_frame::LanguageFrame;
pub use popularimeter::PopularimeterFrame;
pub use private_frame::PrivateFrame;
pub use sync_text::{SyncTextContentType, SyncedText, SynchronizedTextFrame, TimestampFormat};
pub use table_of_contents_frame::TableOfContentsFrame;
pub use unique_file_identifier::UniqueFileIdentifierFrame;
