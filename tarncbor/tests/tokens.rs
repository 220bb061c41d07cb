use num_bigint::{BigInt, BigUint};
use tarncbor::{ByteSource, DecodeError, Decoder, SliceSource, Token, UnsupportedConstruct};

#[test]
fn a_token_stream_decodes_in_order() {
    // [3, "abc", h'1220', true, null, -5, 1.5]
    let bytes = [
        0x87, 0x03, 0x63, 0x61, 0x62, 0x63, 0x42, 0x12, 0x20, 0xf5, 0xf6, 0x24, 0xf9, 0x3e, 0x00,
    ];
    let mut decoder = Decoder::from_bytes(&bytes);
    assert_eq!(decoder.next_token(), Ok(Token::Array(BigUint::from(7u8))));
    assert_eq!(decoder.next_token(), Ok(Token::Unsigned(BigUint::from(3u8))));
    assert_eq!(decoder.next_token(), Ok(Token::Text("abc".to_owned())));
    assert!(matches!(decoder.next_token(), Ok(Token::Bytes(raw)) if raw.as_slice() == [0x12, 0x20]));
    assert_eq!(decoder.next_token(), Ok(Token::True));
    assert_eq!(decoder.next_token(), Ok(Token::Null));
    assert_eq!(decoder.next_token(), Ok(Token::Negative(BigInt::from(-5))));
    assert_eq!(decoder.next_token(), Ok(Token::HalfFloat(1.5)));
    // The stream is exhausted afterwards.
    assert!(decoder.next_token().unwrap_err().is_truncated_input());
}

#[test]
fn arguments_wider_than_a_word_survive() {
    // A nine-byte unsigned integer cannot be expressed; the widest argument
    // is eight bytes, and it must round-trip through BigUint unharmed.
    let mut bytes = vec![0x1b];
    bytes.extend_from_slice(&u64::MAX.to_be_bytes());
    let expected = BigUint::from(u64::MAX);
    assert_eq!(
        Decoder::from_bytes(&bytes).next_token(),
        Ok(Token::Unsigned(expected))
    );
}

#[test]
fn truncation_inside_an_extended_argument() {
    // Header promises a four-byte argument, input holds two.
    assert_eq!(
        Decoder::from_bytes(&[0x1a, 0x00, 0x01]).next_token(),
        Err(DecodeError::TruncatedInput {
            requested: 4,
            remaining: 2
        })
    );
}

#[test]
fn truncation_inside_a_float_payload() {
    assert!(
        Decoder::from_bytes(&[0xfb, 0x3f, 0xf0])
            .next_token()
            .unwrap_err()
            .is_truncated_input()
    );
}

#[test]
fn tags_fail_before_their_payload_is_touched() {
    // 0xc2 is a bignum tag; a tolerant decoder would skip it and read the
    // byte string. This one must refuse outright.
    assert_eq!(
        Decoder::from_bytes(&[0xc2, 0x41, 0x01]).next_token(),
        Err(DecodeError::UnsupportedFeature {
            construct: UnsupportedConstruct::SemanticTag
        })
    );
}

#[test]
fn a_custom_source_drives_the_decoder() {
    // The decoder is generic over its source; exercise it through the trait
    // seam a non-buffer implementation would use.
    struct Wrapped<'a>(SliceSource<'a>);

    impl ByteSource for Wrapped<'_> {
        fn read_one(&mut self) -> Result<u8, DecodeError> {
            self.0.read_one()
        }

        fn peek_one(&self) -> Result<u8, DecodeError> {
            self.0.peek_one()
        }

        fn read_exact(&mut self, count: usize) -> Result<Vec<u8>, DecodeError> {
            self.0.read_exact(count)
        }
    }

    let bytes = [0x19, 0x03, 0xe8];
    let mut decoder = Decoder::new(Wrapped(SliceSource::new(&bytes)));
    assert_eq!(
        decoder.next_token(),
        Ok(Token::Unsigned(BigUint::from(1000u32)))
    );
}
