//! The closed expression grammar.
//!
//! Every node kind the language knows is a variant of [`Expr`]; the set is
//! closed, and adding a kind means adding a [`dispatch::Visitor`] operation
//! as well. Nodes are plain owned trees: no sharing, no in-place mutation.
//! Reuse of a binding is expressed through binding-distance references,
//! never through aliasing, so transformations always produce new nodes.

use std::path::PathBuf;

use num_bigint::{BigInt, BigUint};
use strum::{EnumDiscriminants, EnumIs, EnumIter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    import::{Digest, ImportMode, RemoteUrl},
    operator::Operator,
    span::Span,
};

pub mod dispatch;
mod fields;
mod text;

pub use fields::{DuplicateField, FieldMap};
pub use text::{TextLit, TextShapeError};

/// One expression node.
///
/// The tree is tagged by kind and immutable once built. The generated
/// [`ExprKind`] discriminant is handy for fast classification without
/// touching payloads.
#[derive(Debug, Clone, PartialEq, EnumIs, EnumDiscriminants)]
#[strum_discriminants(name(ExprKind), derive(Hash, EnumIter))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    // Source positions
    /// A wrapper attaching a source region to another node. Dispatch sees
    /// through it by default.
    Note { base: Box<Expr>, span: Span },

    // Literals
    /// A non-negative arbitrary-precision number.
    NaturalLit(BigUint),
    /// A signed arbitrary-precision number.
    IntegerLit(BigInt),
    /// A double-precision float.
    DoubleLit(f64),
    /// A text literal with interpolated sub-expressions.
    TextLit(TextLit),

    // Names and binders
    /// A built-in name, including the truth literals.
    Builtin(String),
    /// A bound-variable reference. `index` is the binding distance: how
    /// many intervening same-named binders sit between use and definition.
    Var { name: String, index: u64 },
    /// An anonymous function.
    Lambda {
        param: String,
        input: Box<Expr>,
        body: Box<Expr>,
    },
    /// A dependent function type, same shape as a lambda.
    Pi {
        param: String,
        input: Box<Expr>,
        body: Box<Expr>,
    },
    /// A let binding with an optional type annotation.
    Let {
        name: String,
        annotation: Option<Box<Expr>>,
        value: Box<Expr>,
        body: Box<Expr>,
    },

    // Collections
    /// A list with at least one element. The element type is inferred from
    /// the first element by convention and is not carried.
    NonEmptyList(Vec<Expr>),
    /// A list with no elements, which must carry its element type since
    /// there is nothing to infer it from.
    EmptyList { element: Box<Expr> },
    /// A record value.
    Record(FieldMap<Expr>),
    /// A record type.
    RecordType(FieldMap<Expr>),
    /// A union type. Alternatives without a payload carry no expression.
    UnionType(FieldMap<Option<Expr>>),

    // Selection
    /// Access of a single field.
    FieldAccess { base: Box<Expr>, field: String },
    /// Projection of an ordered set of fields, possibly empty.
    Projection {
        base: Box<Expr>,
        fields: Vec<String>,
    },
    /// Projection by an expected record type.
    ProjectionByType {
        base: Box<Expr>,
        selector: Box<Expr>,
    },

    // Combination
    /// Function application, one argument at a time.
    Application { func: Box<Expr>, arg: Box<Expr> },
    /// Application of a binary operator.
    OperatorApplication {
        operator: Operator,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// A conditional.
    If {
        predicate: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    /// A type annotation.
    Annotated {
        base: Box<Expr>,
        annotation: Box<Expr>,
    },
    /// An assertion over an equivalence type.
    Assert { annotation: Box<Expr> },
    /// Application of a handler record to a union value.
    Merge {
        handlers: Box<Expr>,
        union: Box<Expr>,
        annotation: Option<Box<Expr>>,
    },
    /// Conversion of a record to a list of key/value pairs.
    ToMap {
        base: Box<Expr>,
        annotation: Option<Box<Expr>>,
    },

    // Imports
    /// The unresolvable import.
    MissingImport {
        mode: ImportMode,
        digest: Option<Digest>,
    },
    /// An environment-variable import.
    EnvImport {
        name: String,
        mode: ImportMode,
        digest: Option<Digest>,
    },
    /// A filesystem import.
    LocalImport {
        path: PathBuf,
        mode: ImportMode,
        digest: Option<Digest>,
    },
    /// A remote import, optionally with a `using` header expression.
    RemoteImport {
        url: RemoteUrl,
        using: Option<Box<Expr>>,
        mode: ImportMode,
        digest: Option<Digest>,
    },
}

impl Expr {
    /// Payload-free classification of this node.
    pub fn kind(&self) -> ExprKind {
        ExprKind::from(self)
    }

    /// Single-pass dispatch: apply exactly one visitor operation for this
    /// node kind.
    pub fn accept<V: dispatch::Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Expr::Note { base, span } => visitor.on_note(base, span),
            Expr::NaturalLit(value) => visitor.on_natural(value),
            Expr::IntegerLit(value) => visitor.on_integer(value),
            Expr::DoubleLit(value) => visitor.on_double(*value),
            Expr::TextLit(literal) => visitor.on_text(literal),
            Expr::Builtin(name) => visitor.on_builtin(name),
            Expr::Var { name, index } => visitor.on_var(name, *index),
            Expr::Lambda { param, input, body } => visitor.on_lambda(param, input, body),
            Expr::Pi { param, input, body } => visitor.on_pi(param, input, body),
            Expr::Let {
                name,
                annotation,
                value,
                body,
            } => visitor.on_let(name, annotation.as_deref(), value, body),
            Expr::NonEmptyList(elements) => visitor.on_non_empty_list(elements),
            Expr::EmptyList { element } => visitor.on_empty_list(element),
            Expr::Record(fields) => visitor.on_record(fields),
            Expr::RecordType(fields) => visitor.on_record_type(fields),
            Expr::UnionType(alternatives) => visitor.on_union_type(alternatives),
            Expr::FieldAccess { base, field } => visitor.on_field_access(base, field),
            Expr::Projection { base, fields } => visitor.on_projection(base, fields),
            Expr::ProjectionByType { base, selector } => {
                visitor.on_projection_by_type(base, selector)
            }
            Expr::Application { func, arg } => visitor.on_application(func, arg),
            Expr::OperatorApplication { operator, lhs, rhs } => {
                visitor.on_operator_application(*operator, lhs, rhs)
            }
            Expr::If {
                predicate,
                then_branch,
                else_branch,
            } => visitor.on_if(predicate, then_branch, else_branch),
            Expr::Annotated { base, annotation } => visitor.on_annotated(base, annotation),
            Expr::Assert { annotation } => visitor.on_assert(annotation),
            Expr::Merge {
                handlers,
                union,
                annotation,
            } => visitor.on_merge(handlers, union, annotation.as_deref()),
            Expr::ToMap { base, annotation } => visitor.on_to_map(base, annotation.as_deref()),
            Expr::MissingImport { mode, digest } => {
                visitor.on_missing_import(*mode, digest.as_ref())
            }
            Expr::EnvImport { name, mode, digest } => {
                visitor.on_env_import(name, *mode, digest.as_ref())
            }
            Expr::LocalImport { path, mode, digest } => {
                visitor.on_local_import(path, *mode, digest.as_ref())
            }
            Expr::RemoteImport {
                url,
                using,
                mode,
                digest,
            } => visitor.on_remote_import(url, using.as_deref(), *mode, digest.as_ref()),
        }
    }

    /// Shorthand for a built-in name node.
    pub fn builtin(name: impl Into<String>) -> Self {
        Expr::Builtin(name.into())
    }

    /// Shorthand for a bound-variable reference.
    pub fn var(name: impl Into<String>, index: u64) -> Self {
        Expr::Var {
            name: name.into(),
            index,
        }
    }

    /// Shorthand for a single application node.
    pub fn application(func: Expr, arg: Expr) -> Self {
        Expr::Application {
            func: Box::new(func),
            arg: Box::new(arg),
        }
    }
}
