use num_bigint::{BigInt, BigUint};
use smallvec::SmallVec;
use strum::{EnumDiscriminants, EnumIs, EnumIter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Inline-first storage for decoded byte strings.
///
/// The only byte strings the Tarn encoding produces are 34-byte integrity
/// digest items, so the inline capacity covers them without spilling to the
/// heap.
pub type ByteBuf = SmallVec<[u8; 34]>;

/// One decoded item: a header plus its self-contained payload.
///
/// Array and map tokens carry only the announced element (or pair) count;
/// the caller issues that many further decode calls to consume the
/// container body. Integer values are kept at arbitrary precision at this
/// boundary; narrowing happens downstream where a proven range exists.
#[derive(Debug, Clone, PartialEq, EnumIs, EnumDiscriminants)]
#[strum_discriminants(name(TokenKind), derive(Hash, EnumIter))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Token {
    /// Non-negative integer (major type 0).
    Unsigned(BigUint),
    /// Negative integer, already mapped to −1 − argument (major type 1).
    Negative(BigInt),
    /// Definite-length byte string (major type 2).
    Bytes(ByteBuf),
    /// Definite-length UTF-8 text string (major type 3).
    Text(String),
    /// Array header carrying the element count (major type 4).
    Array(BigUint),
    /// Map header carrying the key-value pair count (major type 5).
    Map(BigUint),
    /// Boolean false (major type 7, value 20).
    False,
    /// Boolean true (major type 7, value 21).
    True,
    /// Null (major type 7, value 22).
    Null,
    /// Half-precision float, widened to `f32` (major type 7, value 25).
    HalfFloat(f32),
    /// Single-precision float (major type 7, value 26).
    SingleFloat(f32),
    /// Double-precision float (major type 7, value 27).
    DoubleFloat(f64),
}

impl Token {
    /// Payload-free classification of this token.
    pub fn kind(&self) -> TokenKind {
        TokenKind::from(self)
    }
}
