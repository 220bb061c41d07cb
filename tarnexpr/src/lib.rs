//! Tarnexpr: the expression grammar of the Tarn configuration language and
//! the builder that reconstructs it from the binary encoding.
//!
//! The grammar is a closed set of node kinds ([`Expr`]): literals, binders
//! with scope-relative variable references, records and unions as ordered
//! field maps, and import nodes carrying optional content-integrity
//! digests. Consumers act on trees through the [`expr::dispatch::Visitor`]
//! contract, which has exactly one operation per node kind so the compiler
//! catches missing cases; the position-wrapper operation alone has a
//! default that forwards to the wrapped node.
//!
//! Decoding is layered: the `tarncbor` crate reports flat tokens, and
//! [`binary::decode`] reassembles them into a tree following the
//! tag-per-constructor convention carried inside arrays. Nodes are built
//! bottom-up and are immutable afterwards.
//!
//! Examples
//! ```
//! use tarnexpr::{Expr, binary};
//!
//! // [15, 5] is the natural literal 5.
//! let expr = binary::decode(&[0x82, 0x0f, 0x05]).unwrap();
//! assert_eq!(expr, Expr::NaturalLit(5u8.into()));
//!
//! // A plain text string is a built-in name.
//! let expr = binary::decode(&[0x67, b'N', b'a', b't', b'u', b'r', b'a', b'l']).unwrap();
//! assert_eq!(expr, Expr::Builtin("Natural".to_owned()));
//! ```

/// Tree reconstruction from the binary token stream.
pub mod binary;
/// Expression nodes, field maps, text literals, and the visitor contract.
pub mod expr;
/// Import modes, integrity digests, and remote locators.
pub mod import;
/// Binary operator tags, numbered as the wire format numbers them.
pub mod operator;
/// Source positions attached to note wrappers by the text parser.
pub mod span;

pub use expr::{DuplicateField, Expr, ExprKind, FieldMap, TextLit, TextShapeError};
pub use expr::dispatch::{Constant, Visitor};
pub use import::{Digest, DigestError, ImportMode, RemoteUrl, Scheme};
pub use operator::Operator;
pub use span::{Position, Span};
