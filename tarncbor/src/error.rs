use strum::EnumIs;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Constructs that are valid in the general binary format but intentionally
/// unsupported: the Tarn encoding never produces them, so meeting one means
/// the input did not come from a conforming encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnsupportedConstruct {
    /// A semantic tag item (major type 6).
    SemanticTag,
    /// An indefinite-length string, array, or map header.
    IndefiniteLength,
    /// The one-byte simple-value extension (major type 7, additional info 24).
    SimpleValue,
    /// The break stop code (major type 7, additional info 31).
    BreakCode,
}

impl std::fmt::Display for UnsupportedConstruct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            UnsupportedConstruct::SemanticTag => "a semantic tag",
            UnsupportedConstruct::IndefiniteLength => "an indefinite length",
            UnsupportedConstruct::SimpleValue => "a simple value",
            UnsupportedConstruct::BreakCode => "the break stop code",
        };
        write!(f, "{name}")
    }
}

/// Why a decode call failed.
///
/// Every variant is terminal for the current decode: there is no partial
/// result and no resynchronization attempt.
#[derive(Debug, Clone, PartialEq, Eq, EnumIs, Error)]
pub enum DecodeError {
    /// The header byte pairs a major type with a reserved or unassigned
    /// additional-info value.
    #[error("malformed header byte {header:#04x}: reserved or unassigned additional info")]
    MalformedHeader { header: u8 },

    /// The input uses a construct the Tarn binary subset never emits.
    #[error("unsupported input: {construct} is never produced by the Tarn binary encoding")]
    UnsupportedFeature { construct: UnsupportedConstruct },

    /// A declared length overruns the remaining input.
    #[error("truncated input: {requested} byte(s) requested with {remaining} remaining")]
    TruncatedInput { requested: u64, remaining: u64 },

    /// A text string payload is not valid UTF-8.
    #[error("text string payload is not valid UTF-8")]
    InvalidText(#[source] std::str::Utf8Error),
}
