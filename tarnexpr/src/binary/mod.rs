//! Reassembling expression trees from the binary token stream.
//!
//! The token layer reports CBOR shape only; this module carries the
//! expression-level conventions listed in [`tags`]. For every array token
//! the builder inspects the leading element, then issues exactly the
//! number of further decode calls that constructor's shape requires,
//! recursively. Children are fully decoded before their parent is
//! constructed, so a returned tree is complete or the decode failed as a
//! whole.

use std::path::PathBuf;

use log::{debug, trace};
use num_bigint::{BigInt, BigUint};
use strum::EnumIs;
use thiserror::Error;

use tarncbor::{ByteSource, DecodeError, Decoder, Token, TokenKind};

use crate::{
    expr::{DuplicateField, Expr, FieldMap, TextLit, TextShapeError},
    import::{Digest, ImportMode, RemoteUrl, Scheme},
    operator::Operator,
};

pub mod tags;

/// Why the builder rejected a token stream.
#[derive(Debug, Clone, PartialEq, Eq, EnumIs, Error)]
pub enum BuildError {
    /// Token-level failure from the underlying decoder.
    #[error(transparent)]
    Token(#[from] DecodeError),

    /// A constructor array with no leading element.
    #[error("constructor array cannot be empty")]
    EmptyConstructor,

    /// An array opens with a constructor tag this grammar does not define.
    #[error("unknown constructor tag {tag}")]
    UnknownTag { tag: u64 },

    /// A token kind that cannot appear where it did.
    #[error("unexpected {found:?} token while decoding {context}")]
    UnexpectedToken {
        context: &'static str,
        found: TokenKind,
    },

    /// An array whose length the constructor's shape does not admit.
    #[error("a {construct} cannot be encoded by an array of {length} element(s)")]
    WrongArity {
        construct: &'static str,
        length: usize,
    },

    /// A count or index that does not fit the word it must narrow to.
    #[error("value {value} is out of range for {context}")]
    OutOfRange {
        context: &'static str,
        value: BigUint,
    },

    /// An operator code outside the assigned range.
    #[error("unknown operator code {code}")]
    UnknownOperator { code: u64 },

    /// An import mode outside the assigned range.
    #[error("unknown import mode {code}")]
    UnknownImportMode { code: u64 },

    /// An import scheme outside the assigned range.
    #[error("unknown import scheme {code}")]
    UnknownScheme { code: u64 },

    /// A digest item without the multihash prefix or the fixed length.
    #[error("malformed integrity digest item of {length} byte(s)")]
    MalformedDigest { length: usize },

    /// A record, record type, or union repeats a field name.
    #[error(transparent)]
    DuplicateField(#[from] DuplicateField),

    /// Text-literal fragments and interpolations that do not alternate.
    #[error(transparent)]
    TextShape(#[from] TextShapeError),
}

/// Decode a complete expression from its binary encoding.
pub fn decode(bytes: &[u8]) -> Result<Expr, BuildError> {
    debug!("decoding {} byte(s) of binary expression", bytes.len());
    let mut decoder = Decoder::from_bytes(bytes);
    decode_from(&mut decoder)
}

/// Decode the next complete expression from an already-open decoder.
pub fn decode_from<S: ByteSource>(decoder: &mut Decoder<S>) -> Result<Expr, BuildError> {
    let token = decoder.next_token()?;
    build(decoder, token)
}

/// Build the expression that starts with `token`, pulling children from
/// the decoder as the constructor's shape demands.
fn build<S: ByteSource>(decoder: &mut Decoder<S>, token: Token) -> Result<Expr, BuildError> {
    match token {
        Token::Unsigned(index) => Ok(Expr::Var {
            name: "_".to_owned(),
            index: narrow_u64(index, "variable index")?,
        }),
        Token::Text(name) => Ok(Expr::Builtin(name)),
        Token::True => Ok(Expr::Builtin("True".to_owned())),
        Token::False => Ok(Expr::Builtin("False".to_owned())),
        Token::HalfFloat(value) => Ok(Expr::DoubleLit(f64::from(value))),
        Token::SingleFloat(value) => Ok(Expr::DoubleLit(f64::from(value))),
        Token::DoubleFloat(value) => Ok(Expr::DoubleLit(value)),
        Token::Array(count) => {
            let length = narrow_usize(count, "array length")?;
            constructor(decoder, length)
        }
        other => Err(BuildError::UnexpectedToken {
            context: "expression",
            found: other.kind(),
        }),
    }
}

fn constructor<S: ByteSource>(
    decoder: &mut Decoder<S>,
    length: usize,
) -> Result<Expr, BuildError> {
    if length == 0 {
        return Err(BuildError::EmptyConstructor);
    }
    match decoder.next_token()? {
        // [name, index]: a named bound-variable reference.
        Token::Text(name) => {
            if length != 2 {
                return Err(BuildError::WrongArity {
                    construct: "named variable",
                    length,
                });
            }
            let index = expect_unsigned(decoder, "variable index")?;
            Ok(Expr::Var {
                name,
                index: narrow_u64(index, "variable index")?,
            })
        }
        Token::Unsigned(tag) => {
            let tag = narrow_u64(tag, "constructor tag")?;
            let rest = length - 1;
            trace!("constructor tag {tag} with {rest} element(s)");
            match tag {
                tags::APPLICATION => application(decoder, rest),
                tags::LAMBDA => binder(decoder, rest, Binder::Lambda),
                tags::PI => binder(decoder, rest, Binder::Pi),
                tags::OPERATOR => operator_application(decoder, rest),
                tags::LIST => list(decoder, rest),
                tags::MERGE => merge(decoder, rest),
                tags::RECORD_TYPE => Ok(Expr::RecordType(record_fields(decoder, rest)?)),
                tags::RECORD => Ok(Expr::Record(record_fields(decoder, rest)?)),
                tags::FIELD_ACCESS => field_access(decoder, rest),
                tags::PROJECTION => projection(decoder, rest),
                tags::UNION_TYPE => union_type(decoder, rest),
                tags::IF => conditional(decoder, rest),
                tags::NATURAL => natural(decoder, rest),
                tags::INTEGER => integer(decoder, rest),
                tags::TEXT => text(decoder, rest),
                tags::ASSERT => assertion(decoder, rest),
                tags::IMPORT => import(decoder, rest),
                tags::LET => let_bindings(decoder, rest),
                tags::ANNOTATION => annotation(decoder, rest),
                tags::TO_MAP => to_map(decoder, rest),
                other => Err(BuildError::UnknownTag { tag: other }),
            }
        }
        other => Err(BuildError::UnexpectedToken {
            context: "constructor tag",
            found: other.kind(),
        }),
    }
}

fn application<S: ByteSource>(decoder: &mut Decoder<S>, rest: usize) -> Result<Expr, BuildError> {
    if rest < 2 {
        return Err(BuildError::WrongArity {
            construct: "application",
            length: rest + 1,
        });
    }
    let mut applied = decode_from(decoder)?;
    for _ in 1..rest {
        let argument = decode_from(decoder)?;
        applied = Expr::application(applied, argument);
    }
    Ok(applied)
}

enum Binder {
    Lambda,
    Pi,
}

fn binder<S: ByteSource>(
    decoder: &mut Decoder<S>,
    rest: usize,
    kind: Binder,
) -> Result<Expr, BuildError> {
    // The nameless binder `_` omits its parameter name on the wire.
    let param = match rest {
        2 => "_".to_owned(),
        3 => expect_text(decoder, "binder parameter name")?,
        _ => {
            return Err(BuildError::WrongArity {
                construct: "binder",
                length: rest + 1,
            });
        }
    };
    let input = Box::new(decode_from(decoder)?);
    let body = Box::new(decode_from(decoder)?);
    Ok(match kind {
        Binder::Lambda => Expr::Lambda { param, input, body },
        Binder::Pi => Expr::Pi { param, input, body },
    })
}

fn operator_application<S: ByteSource>(
    decoder: &mut Decoder<S>,
    rest: usize,
) -> Result<Expr, BuildError> {
    if rest != 3 {
        return Err(BuildError::WrongArity {
            construct: "operator application",
            length: rest + 1,
        });
    }
    let code = narrow_u64(
        expect_unsigned(decoder, "operator code")?,
        "operator code",
    )?;
    let operator = u8::try_from(code)
        .ok()
        .and_then(Operator::from_repr)
        .ok_or(BuildError::UnknownOperator { code })?;
    let lhs = Box::new(decode_from(decoder)?);
    let rhs = Box::new(decode_from(decoder)?);
    Ok(Expr::OperatorApplication { operator, lhs, rhs })
}

fn list<S: ByteSource>(decoder: &mut Decoder<S>, rest: usize) -> Result<Expr, BuildError> {
    if rest == 0 {
        return Err(BuildError::WrongArity {
            construct: "list",
            length: rest + 1,
        });
    }
    match decoder.next_token()? {
        // A null type slot announces elements; the element type is left to
        // be inferred from the first of them.
        Token::Null => {
            if rest < 2 {
                return Err(BuildError::WrongArity {
                    construct: "non-empty list",
                    length: rest + 1,
                });
            }
            let mut elements = Vec::with_capacity(rest - 1);
            for _ in 1..rest {
                elements.push(decode_from(decoder)?);
            }
            Ok(Expr::NonEmptyList(elements))
        }
        // An empty list has nothing to infer from, so it carries its
        // element type instead.
        token => {
            if rest != 1 {
                return Err(BuildError::WrongArity {
                    construct: "empty list",
                    length: rest + 1,
                });
            }
            Ok(Expr::EmptyList {
                element: Box::new(build(decoder, token)?),
            })
        }
    }
}

fn merge<S: ByteSource>(decoder: &mut Decoder<S>, rest: usize) -> Result<Expr, BuildError> {
    if rest != 2 && rest != 3 {
        return Err(BuildError::WrongArity {
            construct: "merge",
            length: rest + 1,
        });
    }
    let handlers = Box::new(decode_from(decoder)?);
    let union = Box::new(decode_from(decoder)?);
    let annotation = if rest == 3 {
        Some(Box::new(decode_from(decoder)?))
    } else {
        None
    };
    Ok(Expr::Merge {
        handlers,
        union,
        annotation,
    })
}

fn record_fields<S: ByteSource>(
    decoder: &mut Decoder<S>,
    rest: usize,
) -> Result<FieldMap<Expr>, BuildError> {
    if rest != 1 {
        return Err(BuildError::WrongArity {
            construct: "record",
            length: rest + 1,
        });
    }
    let pairs = expect_map(decoder, "record fields")?;
    let mut fields = FieldMap::new();
    for _ in 0..pairs {
        let name = expect_text(decoder, "field name")?;
        let value = decode_from(decoder)?;
        fields.insert(name, value)?;
    }
    Ok(fields)
}

fn union_type<S: ByteSource>(decoder: &mut Decoder<S>, rest: usize) -> Result<Expr, BuildError> {
    if rest != 1 {
        return Err(BuildError::WrongArity {
            construct: "union type",
            length: rest + 1,
        });
    }
    let pairs = expect_map(decoder, "union alternatives")?;
    let mut alternatives = FieldMap::new();
    for _ in 0..pairs {
        let name = expect_text(decoder, "alternative name")?;
        let value = optional(decoder)?;
        alternatives.insert(name, value)?;
    }
    Ok(Expr::UnionType(alternatives))
}

fn field_access<S: ByteSource>(decoder: &mut Decoder<S>, rest: usize) -> Result<Expr, BuildError> {
    if rest != 2 {
        return Err(BuildError::WrongArity {
            construct: "field access",
            length: rest + 1,
        });
    }
    let base = Box::new(decode_from(decoder)?);
    let field = expect_text(decoder, "field name")?;
    Ok(Expr::FieldAccess { base, field })
}

fn projection<S: ByteSource>(decoder: &mut Decoder<S>, rest: usize) -> Result<Expr, BuildError> {
    if rest == 0 {
        return Err(BuildError::WrongArity {
            construct: "projection",
            length: rest + 1,
        });
    }
    let base = Box::new(decode_from(decoder)?);
    let selectors = rest - 1;
    if selectors == 0 {
        return Ok(Expr::Projection {
            base,
            fields: Vec::new(),
        });
    }
    match decoder.next_token()? {
        // A one-element array in selector position holds the expected type.
        Token::Array(inner) if selectors == 1 => {
            let inner = narrow_usize(inner, "type selector length")?;
            if inner != 1 {
                return Err(BuildError::WrongArity {
                    construct: "projection type selector",
                    length: inner,
                });
            }
            let selector = Box::new(decode_from(decoder)?);
            Ok(Expr::ProjectionByType { base, selector })
        }
        Token::Text(first) => {
            let mut fields = Vec::with_capacity(selectors);
            fields.push(first);
            for _ in 1..selectors {
                fields.push(expect_text(decoder, "projected field name")?);
            }
            Ok(Expr::Projection { base, fields })
        }
        other => Err(BuildError::UnexpectedToken {
            context: "projection selector",
            found: other.kind(),
        }),
    }
}

fn conditional<S: ByteSource>(decoder: &mut Decoder<S>, rest: usize) -> Result<Expr, BuildError> {
    if rest != 3 {
        return Err(BuildError::WrongArity {
            construct: "conditional",
            length: rest + 1,
        });
    }
    Ok(Expr::If {
        predicate: Box::new(decode_from(decoder)?),
        then_branch: Box::new(decode_from(decoder)?),
        else_branch: Box::new(decode_from(decoder)?),
    })
}

fn natural<S: ByteSource>(decoder: &mut Decoder<S>, rest: usize) -> Result<Expr, BuildError> {
    if rest != 1 {
        return Err(BuildError::WrongArity {
            construct: "natural literal",
            length: rest + 1,
        });
    }
    Ok(Expr::NaturalLit(expect_unsigned(
        decoder,
        "natural literal",
    )?))
}

fn integer<S: ByteSource>(decoder: &mut Decoder<S>, rest: usize) -> Result<Expr, BuildError> {
    if rest != 1 {
        return Err(BuildError::WrongArity {
            construct: "integer literal",
            length: rest + 1,
        });
    }
    match decoder.next_token()? {
        Token::Unsigned(value) => Ok(Expr::IntegerLit(BigInt::from(value))),
        Token::Negative(value) => Ok(Expr::IntegerLit(value)),
        other => Err(BuildError::UnexpectedToken {
            context: "integer literal",
            found: other.kind(),
        }),
    }
}

fn text<S: ByteSource>(decoder: &mut Decoder<S>, rest: usize) -> Result<Expr, BuildError> {
    // Fragments and interpolations alternate, fragment first and last, so
    // the element count is always odd.
    if rest == 0 || rest % 2 == 0 {
        return Err(BuildError::WrongArity {
            construct: "text literal",
            length: rest + 1,
        });
    }
    let mut fragments = Vec::with_capacity(rest / 2 + 1);
    let mut interpolations = Vec::with_capacity(rest / 2);
    fragments.push(expect_text(decoder, "text fragment")?);
    for _ in 0..rest / 2 {
        interpolations.push(decode_from(decoder)?);
        fragments.push(expect_text(decoder, "text fragment")?);
    }
    Ok(Expr::TextLit(TextLit::new(fragments, interpolations)?))
}

fn assertion<S: ByteSource>(decoder: &mut Decoder<S>, rest: usize) -> Result<Expr, BuildError> {
    if rest != 1 {
        return Err(BuildError::WrongArity {
            construct: "assertion",
            length: rest + 1,
        });
    }
    Ok(Expr::Assert {
        annotation: Box::new(decode_from(decoder)?),
    })
}

fn import<S: ByteSource>(decoder: &mut Decoder<S>, rest: usize) -> Result<Expr, BuildError> {
    if rest < 3 {
        return Err(BuildError::WrongArity {
            construct: "import",
            length: rest + 1,
        });
    }
    let digest = match decoder.next_token()? {
        Token::Null => None,
        Token::Bytes(raw) => Some(parse_digest(&raw)?),
        other => {
            return Err(BuildError::UnexpectedToken {
                context: "import digest",
                found: other.kind(),
            });
        }
    };
    let mode_code = narrow_u64(expect_unsigned(decoder, "import mode")?, "import mode")?;
    let mode = u8::try_from(mode_code)
        .ok()
        .and_then(ImportMode::from_repr)
        .ok_or(BuildError::UnknownImportMode { code: mode_code })?;
    let scheme_code = narrow_u64(
        expect_unsigned(decoder, "import scheme")?,
        "import scheme",
    )?;

    match scheme_code {
        tags::SCHEME_HTTP | tags::SCHEME_HTTPS => {
            // using, authority, path components, query.
            if rest < 6 {
                return Err(BuildError::WrongArity {
                    construct: "remote import",
                    length: rest + 1,
                });
            }
            let scheme = if scheme_code == tags::SCHEME_HTTP {
                Scheme::Http
            } else {
                Scheme::Https
            };
            let using = optional(decoder)?.map(Box::new);
            let authority = expect_text(decoder, "remote authority")?;
            let mut path = Vec::with_capacity(rest - 6);
            for _ in 0..rest - 6 {
                path.push(expect_text(decoder, "remote path component")?);
            }
            let query = match decoder.next_token()? {
                Token::Null => None,
                Token::Text(query) => Some(query),
                other => {
                    return Err(BuildError::UnexpectedToken {
                        context: "remote query",
                        found: other.kind(),
                    });
                }
            };
            Ok(Expr::RemoteImport {
                url: RemoteUrl {
                    scheme,
                    authority,
                    path,
                    query,
                },
                using,
                mode,
                digest,
            })
        }
        tags::SCHEME_ABSOLUTE | tags::SCHEME_HERE | tags::SCHEME_PARENT | tags::SCHEME_HOME => {
            let components = rest - 3;
            if components == 0 {
                return Err(BuildError::WrongArity {
                    construct: "local import",
                    length: rest + 1,
                });
            }
            let mut path = PathBuf::from(match scheme_code {
                tags::SCHEME_ABSOLUTE => "/",
                tags::SCHEME_HERE => ".",
                tags::SCHEME_PARENT => "..",
                _ => "~",
            });
            for _ in 0..components {
                path.push(expect_text(decoder, "path component")?);
            }
            Ok(Expr::LocalImport { path, mode, digest })
        }
        tags::SCHEME_ENV => {
            if rest != 4 {
                return Err(BuildError::WrongArity {
                    construct: "environment import",
                    length: rest + 1,
                });
            }
            let name = expect_text(decoder, "environment variable name")?;
            Ok(Expr::EnvImport { name, mode, digest })
        }
        tags::SCHEME_MISSING => {
            if rest != 3 {
                return Err(BuildError::WrongArity {
                    construct: "missing import",
                    length: rest + 1,
                });
            }
            Ok(Expr::MissingImport { mode, digest })
        }
        code => Err(BuildError::UnknownScheme { code }),
    }
}

fn let_bindings<S: ByteSource>(decoder: &mut Decoder<S>, rest: usize) -> Result<Expr, BuildError> {
    // One or more (name, annotation, value) triples ahead of the body.
    if rest < 4 || (rest - 1) % 3 != 0 {
        return Err(BuildError::WrongArity {
            construct: "let binding",
            length: rest + 1,
        });
    }
    let count = (rest - 1) / 3;
    let mut bindings = Vec::with_capacity(count);
    for _ in 0..count {
        let name = expect_text(decoder, "let binding name")?;
        let annotation = optional(decoder)?;
        let value = decode_from(decoder)?;
        bindings.push((name, annotation, value));
    }
    let mut expr = decode_from(decoder)?;
    for (name, annotation, value) in bindings.into_iter().rev() {
        expr = Expr::Let {
            name,
            annotation: annotation.map(Box::new),
            value: Box::new(value),
            body: Box::new(expr),
        };
    }
    Ok(expr)
}

fn annotation<S: ByteSource>(decoder: &mut Decoder<S>, rest: usize) -> Result<Expr, BuildError> {
    if rest != 2 {
        return Err(BuildError::WrongArity {
            construct: "type annotation",
            length: rest + 1,
        });
    }
    Ok(Expr::Annotated {
        base: Box::new(decode_from(decoder)?),
        annotation: Box::new(decode_from(decoder)?),
    })
}

fn to_map<S: ByteSource>(decoder: &mut Decoder<S>, rest: usize) -> Result<Expr, BuildError> {
    if rest != 1 && rest != 2 {
        return Err(BuildError::WrongArity {
            construct: "toMap",
            length: rest + 1,
        });
    }
    let base = Box::new(decode_from(decoder)?);
    let annotation = if rest == 2 {
        Some(Box::new(decode_from(decoder)?))
    } else {
        None
    };
    Ok(Expr::ToMap { base, annotation })
}

fn parse_digest(raw: &[u8]) -> Result<Digest, BuildError> {
    let hash = raw
        .strip_prefix(&tags::DIGEST_PREFIX[..])
        .ok_or(BuildError::MalformedDigest { length: raw.len() })?;
    Digest::try_from(hash).map_err(|_| BuildError::MalformedDigest { length: raw.len() })
}

fn optional<S: ByteSource>(decoder: &mut Decoder<S>) -> Result<Option<Expr>, BuildError> {
    match decoder.next_token()? {
        Token::Null => Ok(None),
        token => Ok(Some(build(decoder, token)?)),
    }
}

fn expect_text<S: ByteSource>(
    decoder: &mut Decoder<S>,
    context: &'static str,
) -> Result<String, BuildError> {
    match decoder.next_token()? {
        Token::Text(text) => Ok(text),
        other => Err(BuildError::UnexpectedToken {
            context,
            found: other.kind(),
        }),
    }
}

fn expect_unsigned<S: ByteSource>(
    decoder: &mut Decoder<S>,
    context: &'static str,
) -> Result<BigUint, BuildError> {
    match decoder.next_token()? {
        Token::Unsigned(value) => Ok(value),
        other => Err(BuildError::UnexpectedToken {
            context,
            found: other.kind(),
        }),
    }
}

fn expect_map<S: ByteSource>(
    decoder: &mut Decoder<S>,
    context: &'static str,
) -> Result<usize, BuildError> {
    match decoder.next_token()? {
        Token::Map(pairs) => narrow_usize(pairs, context),
        other => Err(BuildError::UnexpectedToken {
            context,
            found: other.kind(),
        }),
    }
}

fn narrow_u64(value: BigUint, context: &'static str) -> Result<u64, BuildError> {
    u64::try_from(&value).map_err(|_| BuildError::OutOfRange { context, value })
}

fn narrow_usize(value: BigUint, context: &'static str) -> Result<usize, BuildError> {
    usize::try_from(&value).map_err(|_| BuildError::OutOfRange { context, value })
}
