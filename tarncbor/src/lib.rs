//! Tarncbor: the CBOR subset that carries Tarn's binary expression encoding.
//!
//! This crate implements exactly the slice of RFC 8949 that the Tarn binary
//! format produces: arbitrary-precision integers, definite-length byte and
//! text strings, definite-length arrays and maps, booleans, null, and three
//! IEEE-754 float widths. Everything else the general format allows
//! (semantic tags, indefinite lengths, the simple-value extension, the
//! break code) is rejected with a typed error rather than tolerated.
//!
//! The decoder is deliberately flat: [`Decoder::next_token`] consumes one
//! item header plus any self-contained payload and reports a [`Token`].
//! Array and map tokens carry only the announced count; walking container
//! bodies is the caller's job. This keeps expression-level conventions out
//! of the byte layer entirely — see the `tarnexpr` crate for the tree
//! builder that sits on top.
//!
//! Examples
//! ```
//! use tarncbor::{Decoder, Token};
//!
//! // 0x83 opens a three-element array; only the count is reported.
//! let mut decoder = Decoder::from_bytes(&[0x83, 0x01, 0x18, 0x2a, 0xf5]);
//! assert!(matches!(decoder.next_token(), Ok(Token::Array(n)) if n == 3u8.into()));
//! assert!(matches!(decoder.next_token(), Ok(Token::Unsigned(n)) if n == 1u8.into()));
//! assert!(matches!(decoder.next_token(), Ok(Token::Unsigned(n)) if n == 42u8.into()));
//! assert_eq!(decoder.next_token(), Ok(Token::True));
//! ```

/// The token decoder and its header-and-payload layout rules.
pub mod decode;
/// Failure taxonomy shared by the source and the decoder.
pub mod error;
/// Sequential cursors over immutable byte buffers.
pub mod source;
/// The typed primitive tokens reported by the decoder.
pub mod token;

pub use decode::Decoder;
pub use error::{DecodeError, UnsupportedConstruct};
pub use source::{ByteSource, SliceSource};
pub use token::{ByteBuf, Token, TokenKind};
