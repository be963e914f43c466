//! Coercion of raw argument text into typed values.
//!
//! Integers accept an optional sign followed by an optional radix prefix
//! (`0x` hexadecimal, `0o` octal, `0b` binary); everything else is decimal.
//! Booleans accept exactly `true` and `false`. Floats use Rust's
//! locale-independent parser and reject results that overflow to infinity.

use std::fmt;
use std::num::IntErrorKind;

use thiserror::Error;

pub mod slot;

pub use slot::Slot;

/// Scalar type an option slot or positional argument is declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Bool,
    U8,
    U16,
    U32,
    U64,
    Usize,
    I8,
    I16,
    I32,
    I64,
    Isize,
    F32,
    F64,
    String,
}

impl ValueType {
    /// Returns the Rust name of the type, used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::String => "string",
        }
    }

    /// Returns true for the integer and float types.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        !matches!(self, Self::Bool | Self::String)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reasons raw text could not be turned into a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoerceError {
    #[error("expected {0}")]
    Malformed(ValueType),

    #[error("value out of range for {0}")]
    OutOfRange(ValueType),

    /// Accumulating the delta would leave the slot's range.
    #[error("accumulated value overflows {0}")]
    Overflow(ValueType),
}

/// Types that can be parsed from argument text.
pub trait Coerce: Sized {
    /// The declared type reported in errors.
    const TYPE: ValueType;

    /// Parses `raw` into a value of this type.
    ///
    /// # Errors
    ///
    /// Returns [`CoerceError`] if the text is malformed or out of range.
    fn coerce(raw: &str) -> Result<Self, CoerceError>;
}

/// Detects the radix from a two-character prefix and strips it.
///
/// Returns the radix and the remaining digits.
#[must_use]
pub fn split_radix(digits: &str) -> (u32, &str) {
    if let Some(rest) = digits.strip_prefix("0x") {
        (16, rest)
    } else if let Some(rest) = digits.strip_prefix("0o") {
        (8, rest)
    } else if let Some(rest) = digits.strip_prefix("0b") {
        (2, rest)
    } else {
        (10, digits)
    }
}

/// Parses an integer of any supported width into an `i128`.
///
/// The caller narrows the result to the target width.
fn parse_wide(raw: &str, ty: ValueType) -> Result<i128, CoerceError> {
    let (negative, unsigned) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let (radix, digits) = split_radix(unsigned);

    // from_str_radix accepts its own sign, which would allow "-+5".
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return Err(CoerceError::Malformed(ty));
    }

    let magnitude = i128::from_str_radix(digits, radix).map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => CoerceError::OutOfRange(ty),
        _ => CoerceError::Malformed(ty),
    })?;

    Ok(if negative { -magnitude } else { magnitude })
}

macro_rules! impl_coerce_int {
    ($($int:ty => $variant:ident),* $(,)?) => {
        $(
            impl Coerce for $int {
                const TYPE: ValueType = ValueType::$variant;

                fn coerce(raw: &str) -> Result<Self, CoerceError> {
                    let wide = parse_wide(raw, Self::TYPE)?;
                    Self::try_from(wide).map_err(|_| CoerceError::OutOfRange(Self::TYPE))
                }
            }
        )*
    };
}

impl_coerce_int! {
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
}

macro_rules! impl_coerce_float {
    ($($float:ty => $variant:ident),* $(,)?) => {
        $(
            impl Coerce for $float {
                const TYPE: ValueType = ValueType::$variant;

                fn coerce(raw: &str) -> Result<Self, CoerceError> {
                    let value: $float = raw.parse().map_err(|_| CoerceError::Malformed(Self::TYPE))?;
                    if value.is_infinite() {
                        return Err(CoerceError::OutOfRange(Self::TYPE));
                    }
                    Ok(value)
                }
            }
        )*
    };
}

impl_coerce_float! {
    f32 => F32,
    f64 => F64,
}

impl Coerce for bool {
    const TYPE: ValueType = ValueType::Bool;

    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        match raw {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(CoerceError::Malformed(Self::TYPE)),
        }
    }
}

impl Coerce for String {
    const TYPE: ValueType = ValueType::String;

    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        Ok(raw.to_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn split_radix_detects_prefixes() {
        assert_eq!(split_radix("0x2A"), (16, "2A"));
        assert_eq!(split_radix("0o52"), (8, "52"));
        assert_eq!(split_radix("0b101010"), (2, "101010"));
        assert_eq!(split_radix("42"), (10, "42"));
        assert_eq!(split_radix("0"), (10, "0"));
    }

    #[test]
    fn prefixed_forms_all_coerce_to_42() {
        for raw in ["42", "0x2A", "0x2a", "0o52", "0b101010"] {
            assert_eq!(u8::coerce(raw).unwrap(), 42, "{raw}");
            assert_eq!(i64::coerce(raw).unwrap(), 42, "{raw}");
            assert_eq!(usize::coerce(raw).unwrap(), 42, "{raw}");
        }
    }

    #[test]
    fn signed_values_accept_sign_before_prefix() {
        assert_eq!(i32::coerce("-42").unwrap(), -42);
        assert_eq!(i32::coerce("-0x2A").unwrap(), -42);
        assert_eq!(i32::coerce("+0b11").unwrap(), 3);
    }

    #[test]
    fn exact_maximum_succeeds_and_one_past_fails() {
        assert_eq!(u8::coerce("255").unwrap(), u8::MAX);
        assert_eq!(u8::coerce("256"), Err(CoerceError::OutOfRange(ValueType::U8)));
        assert_eq!(u16::coerce("65535").unwrap(), u16::MAX);
        assert_eq!(u16::coerce("65536"), Err(CoerceError::OutOfRange(ValueType::U16)));
        assert_eq!(i8::coerce("127").unwrap(), i8::MAX);
        assert_eq!(i8::coerce("128"), Err(CoerceError::OutOfRange(ValueType::I8)));
        assert_eq!(i8::coerce("-128").unwrap(), i8::MIN);
        assert_eq!(i8::coerce("-129"), Err(CoerceError::OutOfRange(ValueType::I8)));
        assert_eq!(u64::coerce("18446744073709551615").unwrap(), u64::MAX);
        assert_eq!(
            u64::coerce("18446744073709551616"),
            Err(CoerceError::OutOfRange(ValueType::U64))
        );
        assert_eq!(u8::coerce("0xFF").unwrap(), u8::MAX);
        assert_eq!(u8::coerce("0x100"), Err(CoerceError::OutOfRange(ValueType::U8)));
    }

    #[test]
    fn huge_literals_are_out_of_range_not_malformed() {
        let raw = "9".repeat(60);
        assert_eq!(i64::coerce(&raw), Err(CoerceError::OutOfRange(ValueType::I64)));
    }

    #[test]
    fn negative_values_do_not_fit_unsigned_types() {
        assert_eq!(u32::coerce("-1"), Err(CoerceError::OutOfRange(ValueType::U32)));
        assert_eq!(u32::coerce("-0").unwrap(), 0);
    }

    #[test]
    fn malformed_integers_are_rejected() {
        for raw in ["", "-", "0x", "12abc", "abc", "1.5", " 1", "-+5", "0b102", "0o9"] {
            assert_eq!(
                i32::coerce(raw),
                Err(CoerceError::Malformed(ValueType::I32)),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn decimal_round_trip_for_every_integer_type() {
        fn round_trip<T>(values: &[T])
        where
            T: Coerce + ToString + PartialEq + std::fmt::Debug,
        {
            for value in values {
                assert_eq!(&T::coerce(&value.to_string()).unwrap(), value);
            }
        }

        round_trip(&[u8::MIN, 1, 42, u8::MAX]);
        round_trip(&[u16::MIN, 300, u16::MAX]);
        round_trip(&[u32::MIN, 70_000, u32::MAX]);
        round_trip(&[u64::MIN, 5_000_000_000, u64::MAX]);
        round_trip(&[usize::MIN, 12, usize::MAX]);
        round_trip(&[i8::MIN, -1, 0, i8::MAX]);
        round_trip(&[i16::MIN, -300, i16::MAX]);
        round_trip(&[i32::MIN, -70_000, i32::MAX]);
        round_trip(&[i64::MIN, -5_000_000_000, i64::MAX]);
        round_trip(&[isize::MIN, -12, isize::MAX]);
    }

    #[test]
    fn decimal_round_trip_for_floats() {
        for value in [0.0_f32, -1.5, 3.25, f32::MAX, f32::MIN_POSITIVE] {
            assert_eq!(f32::coerce(&value.to_string()).unwrap(), value);
        }
        for value in [0.0_f64, -1.5, 0.1, f64::MAX, f64::MIN_POSITIVE] {
            assert_eq!(f64::coerce(&value.to_string()).unwrap(), value);
        }
    }

    #[test]
    fn float_overflow_is_out_of_range() {
        assert_eq!(f32::coerce("1e39"), Err(CoerceError::OutOfRange(ValueType::F32)));
        assert_eq!(f64::coerce("1e309"), Err(CoerceError::OutOfRange(ValueType::F64)));
        assert_eq!(f64::coerce("-inf"), Err(CoerceError::OutOfRange(ValueType::F64)));
        assert_eq!(f32::coerce("1e38").unwrap(), 1e38);
    }

    #[test]
    fn floats_ignore_locale_separators() {
        assert_eq!(f64::coerce("2.5").unwrap(), 2.5);
        assert_eq!(f64::coerce("2,5"), Err(CoerceError::Malformed(ValueType::F64)));
    }

    #[test]
    fn bool_accepts_exact_literals_only() {
        assert!(bool::coerce("true").unwrap());
        assert!(!bool::coerce("false").unwrap());
        for raw in ["True", "FALSE", "1", "yes", ""] {
            assert_eq!(bool::coerce(raw), Err(CoerceError::Malformed(ValueType::Bool)));
        }
    }

    #[test]
    fn strings_pass_through() {
        assert_eq!(String::coerce("foo bar").unwrap(), "foo bar");
        assert_eq!(String::coerce("").unwrap(), "");
    }

    #[test]
    fn type_names_are_rust_names() {
        assert_eq!(ValueType::Usize.to_string(), "usize");
        assert_eq!(ValueType::String.to_string(), "string");
        assert!(ValueType::F32.is_numeric());
        assert!(!ValueType::Bool.is_numeric());
    }

    #[test]
    fn error_messages_name_the_type() {
        assert_eq!(CoerceError::Malformed(ValueType::U8).to_string(), "expected u8");
        assert_eq!(
            CoerceError::OutOfRange(ValueType::I16).to_string(),
            "value out of range for i16"
        );
    }
}
