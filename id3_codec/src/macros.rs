// Shorthand for return Err(Id3Error::new(ErrorKind::Foo))
//
// Usage:
// - err!(Variant)          -> return Err(Id3Error::new(ErrorKind::Variant))
// - err!(Variant(Message)) -> return Err(Id3Error::new(ErrorKind::Variant(Message)))
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::Id3Error::new(
			crate::error::ErrorKind::$variant,
		))
	};
	($variant:ident($reason:literal)) => {
		return Err(crate::error::Id3Error::new(
			crate::error::ErrorKind::$variant($reason),
		))
	};
}

// Shorthand for Id3Error::from(Id3v2ErrorKind::Foo)
//
// Usage:
//
// - id3v2_err!(Variant)
// - id3v2_err!(Variant(args..))
//
// or bail:
//
// - id3v2_err!(@BAIL Variant)
// - id3v2_err!(@BAIL Variant(args..))
macro_rules! id3v2_err {
	(@BAIL $($rest:tt)+) => {
		return Err(id3v2_err!($($rest)+))
	};
	($variant:ident $(($($arg:expr),+ $(,)?))?) => {
		Into::<crate::error::Id3Error>::into(crate::error::Id3v2ErrorKind::$variant $(($($arg),+))?)
	};
}

// A macro for handling the different `ParsingMode`s
//
// NOTE: `STRICT` is optional, if it is missing it will fall through to `DEFAULT`.
//
// Usage:
//
// - parse_mode_choice!(
// 		ident_of_parsing_mode,
// 		STRICT: some_expr,
// 		DEFAULT: some_expr,
// 	 )
macro_rules! parse_mode_choice {
	(
		$parse_mode:expr,
		$(STRICT: $strict_handler:expr,)?
		DEFAULT: $default:expr $(,)?
	) => {
		match $parse_mode {
			$(crate::config::ParsingMode::Strict => { $strict_handler },)?
			#[allow(unreachable_patterns)]
			_ => { $default }
		}
	};
}

// Defines a byte-sized enum that keeps unknown values around
//
// Every enum gets an `Undefined(u8)` variant, along with `from_u8` and `as_u8`.
//
// Usage:
//
// byte_enum! {
// 	/// Docs
// 	pub enum Name {
// 		/// Docs
// 		Variant = 0x00,
// 	}
// }
macro_rules! byte_enum {
	(
		$(#[$meta:meta])*
		$vis:vis enum $name:ident {
			$(
				$(#[$variant_meta:meta])*
				$variant:ident = $value:literal
			),+ $(,)?
		}
	) => {
		$(#[$meta])*
		#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
		$vis enum $name {
			$(
				$(#[$variant_meta])*
				$variant,
			)+
			/// A value with no known meaning
			Undefined(u8),
		}

		impl $name {
			/// Get the variant from a `u8`
			///
			/// Unknown values are kept as `Undefined`.
			pub fn from_u8(byte: u8) -> Self {
				match byte {
					$($value => Self::$variant,)+
					_ => Self::Undefined(byte),
				}
			}

			/// Get the `u8` representation of the variant
			pub fn as_u8(&self) -> u8 {
				match self {
					$(Self::$variant => $value,)+
					Self::Undefined(byte) => *byte,
				}
			}
		}
	};
}

pub(crate) use {byte_enum, err, id3v2_err, parse_mode_choice};
