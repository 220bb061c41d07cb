//! The token decoder: one item per call, headers and payloads only.
//!
//! Layout rules, which must match the external byte-level standard exactly:
//! - The high 3 bits of a header byte select the major type: 0 unsigned
//!   integer, 1 negative integer, 2 byte string, 3 text string, 4 array,
//!   5 map, 6 semantic tag (always rejected), 7 primitive.
//! - The low 5 bits select how the item's argument is obtained: 0–23 are
//!   the argument itself, 24/25/26/27 read the next 1/2/4/8 bytes
//!   big-endian, 28–30 are reserved, 31 denotes indefinite length.
//! - Major type 7 interprets the low 5 bits directly: 20 false, 21 true,
//!   22 null, 25/26/27 half/single/double precision floats, everything
//!   else unassigned or unsupported.
//!
//! Containers are not recursed into: array and map tokens report the
//! announced count and leave the cursor immediately after the header.

use num_bigint::{BigInt, BigUint};

use crate::{
    error::{DecodeError, UnsupportedConstruct},
    source::{ByteSource, SliceSource},
    token::{ByteBuf, Token},
};

// Major types, the high 3 bits of every header byte.
const MAJOR_UNSIGNED: u8 = 0;
const MAJOR_NEGATIVE: u8 = 1;
const MAJOR_BYTES: u8 = 2;
const MAJOR_TEXT: u8 = 3;
const MAJOR_ARRAY: u8 = 4;
const MAJOR_MAP: u8 = 5;
const MAJOR_TAG: u8 = 6;

/// How the low 5 bits of a header byte announce the item's argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArgumentMode {
    /// Values 0–23: the argument is the value itself.
    Direct(u8),
    /// Values 24–27: the argument follows in 1, 2, 4, or 8 big-endian bytes.
    Extended(usize),
    /// Values 28–30: reserved, always malformed.
    Reserved,
    /// Value 31: indefinite length, never produced by the subset.
    Indefinite,
}

impl ArgumentMode {
    fn from_header(header: u8) -> Self {
        match header & 0x1f {
            value @ 0..=23 => ArgumentMode::Direct(value),
            24 => ArgumentMode::Extended(1),
            25 => ArgumentMode::Extended(2),
            26 => ArgumentMode::Extended(4),
            27 => ArgumentMode::Extended(8),
            28..=30 => ArgumentMode::Reserved,
            _ => ArgumentMode::Indefinite,
        }
    }
}

/// Decodes one typed [`Token`] per call from a [`ByteSource`].
///
/// A decoder owns its source for the duration of a decode pass; create one
/// per pass rather than sharing an instance across callers. A failed call
/// is terminal: the cursor position after an error is unspecified.
pub struct Decoder<S> {
    source: S,
}

impl<'a> Decoder<SliceSource<'a>> {
    /// Decode directly from an in-memory buffer.
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        Self::new(SliceSource::new(bytes))
    }
}

impl<S: ByteSource> Decoder<S> {
    /// Wrap a source. The decoder takes exclusive ownership of the cursor.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Consume the next item — header plus any self-contained payload —
    /// and report it as a [`Token`].
    pub fn next_token(&mut self) -> Result<Token, DecodeError> {
        let header = self.source.read_one()?;
        match header >> 5 {
            MAJOR_UNSIGNED => Ok(Token::Unsigned(self.argument(header)?)),
            MAJOR_NEGATIVE => {
                let argument = self.argument(header)?;
                Ok(Token::Negative(BigInt::from(-1) - BigInt::from(argument)))
            }
            MAJOR_BYTES => {
                let length = self.length(header)?;
                let payload = self.source.read_exact(length)?;
                Ok(Token::Bytes(ByteBuf::from_vec(payload)))
            }
            MAJOR_TEXT => {
                let length = self.length(header)?;
                let payload = self.source.read_exact(length)?;
                let text = String::from_utf8(payload)
                    .map_err(|failure| DecodeError::InvalidText(failure.utf8_error()))?;
                Ok(Token::Text(text))
            }
            MAJOR_ARRAY => Ok(Token::Array(self.argument(header)?)),
            MAJOR_MAP => Ok(Token::Map(self.argument(header)?)),
            MAJOR_TAG => Err(DecodeError::UnsupportedFeature {
                construct: UnsupportedConstruct::SemanticTag,
            }),
            _ => self.primitive(header),
        }
    }

    /// Read the argument announced by `header`, at arbitrary precision.
    fn argument(&mut self, header: u8) -> Result<BigUint, DecodeError> {
        match ArgumentMode::from_header(header) {
            ArgumentMode::Direct(value) => Ok(BigUint::from(value)),
            ArgumentMode::Extended(count) => {
                let raw = self.source.read_exact(count)?;
                Ok(BigUint::from_bytes_be(&raw))
            }
            ArgumentMode::Reserved => Err(DecodeError::MalformedHeader { header }),
            ArgumentMode::Indefinite => Err(DecodeError::UnsupportedFeature {
                construct: UnsupportedConstruct::IndefiniteLength,
            }),
        }
    }

    /// Read a length argument and narrow it to an addressable size.
    ///
    /// Arguments never exceed eight bytes, so the value fits `u64`; on
    /// targets where `usize` is narrower the count saturates and the
    /// source's own bounds check reports the exact shortfall.
    fn length(&mut self, header: u8) -> Result<usize, DecodeError> {
        let argument = self.argument(header)?;
        Ok(u64::try_from(&argument)
            .map(|wide| usize::try_from(wide).unwrap_or(usize::MAX))
            .unwrap_or(usize::MAX))
    }

    fn primitive(&mut self, header: u8) -> Result<Token, DecodeError> {
        match header & 0x1f {
            20 => Ok(Token::False),
            21 => Ok(Token::True),
            22 => Ok(Token::Null),
            24 => Err(DecodeError::UnsupportedFeature {
                construct: UnsupportedConstruct::SimpleValue,
            }),
            25 => {
                let mut bits: u16 = 0;
                for byte in self.source.read_exact(2)? {
                    bits = (bits << 8) | u16::from(byte);
                }
                Ok(Token::HalfFloat(half_to_single(bits)))
            }
            26 => {
                let mut bits: u32 = 0;
                for byte in self.source.read_exact(4)? {
                    bits = (bits << 8) | u32::from(byte);
                }
                Ok(Token::SingleFloat(f32::from_bits(bits)))
            }
            27 => {
                let mut bits: u64 = 0;
                for byte in self.source.read_exact(8)? {
                    bits = (bits << 8) | u64::from(byte);
                }
                Ok(Token::DoubleFloat(f64::from_bits(bits)))
            }
            31 => Err(DecodeError::UnsupportedFeature {
                construct: UnsupportedConstruct::BreakCode,
            }),
            // 0–19, 23, and 28–30 are unassigned.
            _ => Err(DecodeError::MalformedHeader { header }),
        }
    }
}

/// Widen an IEEE-754 half-precision bit pattern to `f32`.
///
/// The pattern splits into 1 sign bit, 5 exponent bits, and 10 mantissa
/// bits. Exponent 0 selects the subnormal/zero formula, exponent 31 selects
/// NaN or infinity by mantissa, anything else the normalized formula. Every
/// half-precision value is exactly representable in single precision, so
/// the widening is lossless.
fn half_to_single(bits: u16) -> f32 {
    let sign = if bits & 0x8000 != 0 { -1.0f32 } else { 1.0 };
    let exponent = (bits & 0x7c00) >> 10;
    let mantissa = bits & 0x03ff;
    let fraction = f32::from(mantissa) / 1024.0;

    if exponent == 0 {
        sign * fraction * 2f32.powi(-14)
    } else if exponent == 0x1f {
        if mantissa != 0 {
            f32::NAN
        } else {
            sign * f32::INFINITY
        }
    } else {
        sign * (1.0 + fraction) * 2f32.powi(i32::from(exponent) - 15)
    }
}
