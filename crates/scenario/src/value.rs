//! Text encoding of integers and byte sequences.
//!
//! Every value decoded from a document keeps the exact text it was written as,
//! so that writing it back never changes its spelling. Values built in code get
//! their text from the canonical encoders in this module.
//!
//! # Integer literals
//!
//! An optional `-` followed by either `0x` and one or more hex digits, or by one
//! or more decimal digits. The empty string is zero.
//!
//! # Byte sequence literals
//!
//! * `""` is the empty sequence.
//! * `0x…` is hex; an odd number of digits is padded with a leading `0`.
//! * `''…` and `str:…` are the UTF-8 bytes of the rest of the string.
//! * Decimal digits are the minimal big-endian encoding of the number, zero
//!   being the empty sequence.
//! * `file:…` refers to a file and is only accepted for contract code, where
//!   the decoder resolves it through a [`FileResolver`](crate::FileResolver).
use crate::error::ValueError;
use core::fmt;
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{ToPrimitive, Zero};

/// Prefix of a file reference in a byte sequence literal.
pub const FILE_PREFIX: &str = "file:";

/// Arbitrary-precision signed integer together with its source text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct JsonBigInt {
    /// Parsed value.
    pub value: BigInt,
    /// Text as written in the document.
    pub original: String,
}

impl JsonBigInt {
    /// Wraps `value`, using its canonical text as the original.
    pub fn new(value: BigInt) -> Self {
        let original = int_to_string(&value);
        Self { value, original }
    }

    /// Parses an integer literal and keeps `text` verbatim.
    pub fn parse(text: &str) -> Result<Self, ValueError> {
        Ok(Self {
            value: parse_big_int(text)?,
            original: text.to_string(),
        })
    }
}

impl Default for JsonBigInt {
    fn default() -> Self {
        Self::new(BigInt::zero())
    }
}

impl From<i64> for JsonBigInt {
    fn from(value: i64) -> Self {
        Self::new(BigInt::from(value))
    }
}

impl From<u64> for JsonBigInt {
    fn from(value: u64) -> Self {
        Self::new(BigInt::from(value))
    }
}

impl fmt::Display for JsonBigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

/// Unsigned 64-bit integer together with its source text.
///
/// Used for gas, nonces and timestamps.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct JsonU64 {
    /// Parsed value.
    pub value: u64,
    /// Text as written in the document.
    pub original: String,
}

impl JsonU64 {
    /// Wraps `value`, using decimal text as the original.
    pub fn new(value: u64) -> Self {
        Self {
            value,
            original: value.to_string(),
        }
    }

    /// Parses an integer literal that must fit in a `u64`.
    pub fn parse(text: &str) -> Result<Self, ValueError> {
        let value = parse_big_int(text)?;
        if value.sign() == Sign::Minus {
            return Err(ValueError::Negative(text.to_string()));
        }
        let value = value
            .to_u64()
            .ok_or_else(|| ValueError::U64Overflow(text.to_string()))?;
        Ok(Self {
            value,
            original: text.to_string(),
        })
    }
}

impl Default for JsonU64 {
    fn default() -> Self {
        Self::new(0)
    }
}

impl From<u64> for JsonU64 {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for JsonU64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

/// Byte sequence together with its source text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct JsonBytes {
    /// Parsed bytes.
    pub value: Vec<u8>,
    /// Text as written in the document.
    pub original: String,
}

impl JsonBytes {
    /// Wraps `value`, using its canonical text as the original.
    pub fn new(value: Vec<u8>) -> Self {
        let original = bytes_to_string(&value);
        Self { value, original }
    }

    /// Creates a value from bytes and the text they were read from.
    ///
    /// Used for values whose bytes do not come from the text itself, such as
    /// `file:` references.
    pub fn with_original(value: Vec<u8>, original: impl Into<String>) -> Self {
        Self {
            value,
            original: original.into(),
        }
    }

    /// Parses a byte sequence literal and keeps `text` verbatim.
    pub fn parse(text: &str) -> Result<Self, ValueError> {
        Ok(Self {
            value: parse_bytes(text)?,
            original: text.to_string(),
        })
    }

    /// Returns `true` if there are no bytes.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Returns the parsed bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.value
    }
}

impl From<Vec<u8>> for JsonBytes {
    fn from(value: Vec<u8>) -> Self {
        Self::new(value)
    }
}

impl From<&[u8]> for JsonBytes {
    fn from(value: &[u8]) -> Self {
        Self::new(value.to_vec())
    }
}

impl fmt::Display for JsonBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

/// Canonical text of an integer.
///
/// Zero is `0x00`. Anything else is `0x` followed by an even number of lowercase
/// hex digits, with a leading `-` for negative numbers.
pub fn int_to_string(value: &BigInt) -> String {
    if value.is_zero() {
        return "0x00".to_string();
    }
    let mut digits = value.magnitude().to_str_radix(16);
    if digits.len() % 2 != 0 {
        digits.insert(0, '0');
    }
    let sign = if value.sign() == Sign::Minus { "-" } else { "" };
    format!("{sign}0x{digits}")
}

/// Canonical text of a byte sequence: `0x`-prefixed hex, or `""` when empty.
pub fn bytes_to_string(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        String::new()
    } else {
        format!("0x{}", hex::encode(bytes))
    }
}

fn strip_hex_prefix(text: &str) -> Option<&str> {
    text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))
}

/// Parses an integer literal.
pub fn parse_big_int(text: &str) -> Result<BigInt, ValueError> {
    let invalid = || ValueError::InvalidInteger(text.to_string());
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (Sign::Minus, rest),
        None => (Sign::Plus, text),
    };
    if unsigned.is_empty() {
        return if sign == Sign::Minus {
            Err(invalid())
        } else {
            Ok(BigInt::zero())
        };
    }

    let (digits, radix) = match strip_hex_prefix(unsigned) {
        Some(hex) => (hex, 16),
        None => (unsigned, 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid());
    }
    let magnitude = BigUint::parse_bytes(digits.as_bytes(), radix).ok_or_else(invalid)?;
    Ok(BigInt::from_biguint(sign, magnitude))
}

/// Parses a byte sequence literal. `file:` references are rejected here.
pub fn parse_bytes(text: &str) -> Result<Vec<u8>, ValueError> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    if let Some(s) = text.strip_prefix("''").or_else(|| text.strip_prefix("str:")) {
        return Ok(s.as_bytes().to_vec());
    }
    if text.starts_with(FILE_PREFIX) {
        return Err(ValueError::FileNotAllowed(text.to_string()));
    }
    if let Some(hex) = strip_hex_prefix(text) {
        let padded;
        let hex = if hex.len() % 2 != 0 {
            padded = format!("0{hex}");
            padded.as_str()
        } else {
            hex
        };
        return hex::decode(hex).map_err(|e| ValueError::InvalidHex {
            text: text.to_string(),
            reason: e.to_string(),
        });
    }
    if text.starts_with('-') {
        return Err(ValueError::Negative(text.to_string()));
    }
    if text.chars().all(|c| c.is_ascii_digit()) {
        let number = BigUint::parse_bytes(text.as_bytes(), 10)
            .ok_or_else(|| ValueError::InvalidBytes(text.to_string()))?;
        if number.is_zero() {
            return Ok(Vec::new());
        }
        return Ok(number.to_bytes_be());
    }
    Err(ValueError::InvalidBytes(text.to_string()))
}
