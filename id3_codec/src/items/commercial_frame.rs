use crate::error::Result;
use crate::frame::content::FrameContext;
use crate::frame::{FrameBuilder, FrameReader};
use crate::macros::{byte_enum, id3v2_err};
use crate::util::text::TextEncoding;
use crate::write::frame::WriteContext;

use indexmap::IndexMap;

byte_enum! {
	/// How the commercial item of a [`CommercialFrame`] is delivered
	pub enum ReceivedAs {
		/// Other
		Other = 0,
		/// Standard CD album with other songs
		StandardCdAlbum = 1,
		/// Compressed audio on CD
		CompressedAudioOnCd = 2,
		/// File over the Internet
		FileOverInternet = 3,
		/// Stream over the Internet
		StreamOverInternet = 4,
		/// As note sheets
		AsNoteSheets = 5,
		/// As note sheets in a book with other sheets
		AsNoteSheetsInBook = 6,
		/// Music on other media
		MusicOnOtherMedia = 7,
		/// Non-musical merchandise
		NonMusicalMerchandise = 8,
	}
}

/// The date until which the prices of a [`CommercialFrame`] are valid
///
/// Stored as `YYYYMMDD`. A date that isn't made up of digits is read as all zeroes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ValidityDate {
	/// Year, up to 9999
	pub year: u16,
	/// Month, up to 99
	pub month: u8,
	/// Day, up to 99
	pub day: u8,
}

impl ValidityDate {
	fn parse(bytes: &[u8]) -> Self {
		if bytes.len() != 8 || !bytes.iter().all(u8::is_ascii_digit) {
			log::warn!("COMR frame has an invalid validity date, defaulting to zero");
			return Self::default();
		}

		let number = |range: std::ops::Range<usize>| {
			bytes[range]
				.iter()
				.fold(0_u16, |acc, digit| acc * 10 + u16::from(digit - b'0'))
		};

		Self {
			year: number(0..4),
			month: number(4..6) as u8,
			day: number(6..8) as u8,
		}
	}

	fn to_digits(self) -> Result<String> {
		if self.year > 9999 || self.month > 99 || self.day > 99 {
			id3v2_err!(@BAIL InvalidDate);
		}

		Ok(format!("{:04}{:02}{:02}", self.year, self.month, self.day))
	}
}

/// The logo of the seller in a [`CommercialFrame`]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SellerLogo {
	/// The MIME type of the logo, `image/png` or `image/jpeg`
	pub mime_type: String,
	/// The image data
	pub picture: Vec<u8>,
}

/// An `ID3v2` commercial frame (`COMR`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommercialFrame {
	/// Prices, keyed by their ISO-4217 currency code (ex. `"USD" => "10.00"`)
	pub prices: IndexMap<String, String>,
	/// The date until which the prices are valid
	pub valid_until: ValidityDate,
	/// A URL to contact the seller
	pub contact_url: String,
	/// How the item is delivered
	pub received_as: ReceivedAs,
	/// The name of the seller
	pub name_of_seller: String,
	/// A description of the product
	pub description: String,
	/// The seller's logo
	pub seller_logo: Option<SellerLogo>,
}

impl CommercialFrame {
	pub(crate) fn parse(body: &[u8], _ctx: &FrameContext<'_>) -> Result<Self> {
		let mut reader = FrameReader::with_encoding(body)?;

		let price_string = reader.consume_terminated_text(Some(TextEncoding::Latin1))?;
		let prices = price_string
			.split('/')
			.filter(|price| !price.is_empty())
			.filter_map(|price| {
				// A currency code is always 3 characters
				let Some((split, _)) = price.char_indices().nth(3) else {
					log::warn!("COMR frame has a price with no amount: \"{price}\", skipping");
					return None;
				};

				let (currency, amount) = price.split_at(split);
				Some((currency.to_owned(), amount.to_owned()))
			})
			.collect();

		let valid_until = ValidityDate::parse(reader.consume_buffer(Some(8))?);
		let contact_url = reader.consume_terminated_text(Some(TextEncoding::Latin1))?;
		let received_as = ReceivedAs::from_u8(reader.consume_u8()?);
		let name_of_seller = reader.consume_terminated_text(None)?;

		// The terminator may be missing when there is no logo
		let description = match reader.consume_terminated_text(None) {
			Ok(description) => description,
			Err(_) => reader.consume_text(None, None)?,
		};

		let mut seller_logo = None;
		if !reader.is_empty() {
			let mime_type = reader.consume_terminated_text(Some(TextEncoding::Latin1))?;
			let picture = reader.consume_buffer(None)?.to_vec();
			seller_logo = Some(SellerLogo { mime_type, picture });
		}

		Ok(Self {
			prices,
			valid_until,
			contact_url,
			received_as,
			name_of_seller,
			description,
			seller_logo,
		})
	}

	pub(crate) fn create(&self, id: &str, ctx: &mut WriteContext) -> Result<FrameBuilder> {
		let mut prices = Vec::with_capacity(self.prices.len());
		for (currency, amount) in &self.prices {
			if currency.chars().count() != 3 {
				id3v2_err!(@BAIL InvalidCurrencyCode(currency.clone()));
			}

			prices.push(format!("{currency}{amount}"));
		}

		let mut builder = FrameBuilder::new(id, Some(TextEncoding::UTF16)).lossy(ctx.lossy);
		builder
			.append_terminated_text(&prices.join("/"), Some(TextEncoding::Latin1))?
			.append_text(&self.valid_until.to_digits()?, Some(TextEncoding::Latin1))?
			.append_terminated_text(&self.contact_url, Some(TextEncoding::Latin1))?
			.append_number(u64::from(self.received_as.as_u8()), 1)
			.append_terminated_text(&self.name_of_seller, None)?
			.append_terminated_text(&self.description, None)?;

		if let Some(logo) = &self.seller_logo {
			builder
				.append_terminated_text(&logo.mime_type, Some(TextEncoding::Latin1))?
				.append_buffer(&logo.picture);
		}

		Ok(builder)
	}
}
