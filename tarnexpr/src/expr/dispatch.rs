//! The single-pass dispatch contract over expression trees.
//!
//! Every node kind has exactly one operation here, and all of them except
//! the position wrapper are mandatory: a consumer that adds a node kind to
//! the grammar is forced by the compiler to handle it everywhere. Each of
//! the independent consumers — type-checker, normalizer, equivalence
//! comparator, printer, encoder — is a [`Visitor`] implementation.

use std::path::Path;

use num_bigint::{BigInt, BigUint};

use crate::{
    expr::{Expr, FieldMap, TextLit},
    import::{Digest, ImportMode, RemoteUrl},
    operator::Operator,
    span::Span,
};

/// A function from an expression node to a value, one operation per kind.
///
/// Drive it with [`Expr::accept`], which calls exactly one operation for
/// the node it is given and recurses nowhere on its own: visiting children
/// is each operation's decision.
pub trait Visitor {
    type Output;

    /// The position wrapper. The default forwards to the wrapped node, so
    /// a consumer indifferent to source positions can ignore this kind
    /// entirely.
    fn on_note(&mut self, base: &Expr, _span: &Span) -> Self::Output {
        base.accept(self)
    }

    fn on_natural(&mut self, value: &BigUint) -> Self::Output;

    fn on_integer(&mut self, value: &BigInt) -> Self::Output;

    fn on_double(&mut self, value: f64) -> Self::Output;

    fn on_text(&mut self, literal: &TextLit) -> Self::Output;

    fn on_builtin(&mut self, name: &str) -> Self::Output;

    fn on_var(&mut self, name: &str, index: u64) -> Self::Output;

    fn on_lambda(&mut self, param: &str, input: &Expr, body: &Expr) -> Self::Output;

    fn on_pi(&mut self, param: &str, input: &Expr, body: &Expr) -> Self::Output;

    fn on_let(
        &mut self,
        name: &str,
        annotation: Option<&Expr>,
        value: &Expr,
        body: &Expr,
    ) -> Self::Output;

    fn on_non_empty_list(&mut self, elements: &[Expr]) -> Self::Output;

    fn on_empty_list(&mut self, element: &Expr) -> Self::Output;

    fn on_record(&mut self, fields: &FieldMap<Expr>) -> Self::Output;

    fn on_record_type(&mut self, fields: &FieldMap<Expr>) -> Self::Output;

    fn on_union_type(&mut self, alternatives: &FieldMap<Option<Expr>>) -> Self::Output;

    fn on_field_access(&mut self, base: &Expr, field: &str) -> Self::Output;

    fn on_projection(&mut self, base: &Expr, fields: &[String]) -> Self::Output;

    fn on_projection_by_type(&mut self, base: &Expr, selector: &Expr) -> Self::Output;

    fn on_application(&mut self, func: &Expr, arg: &Expr) -> Self::Output;

    fn on_operator_application(
        &mut self,
        operator: Operator,
        lhs: &Expr,
        rhs: &Expr,
    ) -> Self::Output;

    fn on_if(&mut self, predicate: &Expr, then_branch: &Expr, else_branch: &Expr) -> Self::Output;

    fn on_annotated(&mut self, base: &Expr, annotation: &Expr) -> Self::Output;

    fn on_assert(&mut self, annotation: &Expr) -> Self::Output;

    fn on_merge(
        &mut self,
        handlers: &Expr,
        union: &Expr,
        annotation: Option<&Expr>,
    ) -> Self::Output;

    fn on_to_map(&mut self, base: &Expr, annotation: Option<&Expr>) -> Self::Output;

    fn on_missing_import(&mut self, mode: ImportMode, digest: Option<&Digest>) -> Self::Output;

    fn on_env_import(
        &mut self,
        name: &str,
        mode: ImportMode,
        digest: Option<&Digest>,
    ) -> Self::Output;

    fn on_local_import(
        &mut self,
        path: &Path,
        mode: ImportMode,
        digest: Option<&Digest>,
    ) -> Self::Output;

    fn on_remote_import(
        &mut self,
        url: &RemoteUrl,
        using: Option<&Expr>,
        mode: ImportMode,
        digest: Option<&Digest>,
    ) -> Self::Output;
}

/// A visitor that produces the same value for every node kind.
///
/// Useful as a base for predicates that care about a handful of kinds.
/// Note layers are seen through by the inherited default, so the value is
/// produced for the underlying node as well.
pub struct Constant<A> {
    value: A,
}

impl<A> Constant<A> {
    pub fn new(value: A) -> Self {
        Self { value }
    }
}

impl<A: Clone> Visitor for Constant<A> {
    type Output = A;

    fn on_natural(&mut self, _value: &BigUint) -> A {
        self.value.clone()
    }

    fn on_integer(&mut self, _value: &BigInt) -> A {
        self.value.clone()
    }

    fn on_double(&mut self, _value: f64) -> A {
        self.value.clone()
    }

    fn on_text(&mut self, _literal: &TextLit) -> A {
        self.value.clone()
    }

    fn on_builtin(&mut self, _name: &str) -> A {
        self.value.clone()
    }

    fn on_var(&mut self, _name: &str, _index: u64) -> A {
        self.value.clone()
    }

    fn on_lambda(&mut self, _param: &str, _input: &Expr, _body: &Expr) -> A {
        self.value.clone()
    }

    fn on_pi(&mut self, _param: &str, _input: &Expr, _body: &Expr) -> A {
        self.value.clone()
    }

    fn on_let(
        &mut self,
        _name: &str,
        _annotation: Option<&Expr>,
        _value: &Expr,
        _body: &Expr,
    ) -> A {
        self.value.clone()
    }

    fn on_non_empty_list(&mut self, _elements: &[Expr]) -> A {
        self.value.clone()
    }

    fn on_empty_list(&mut self, _element: &Expr) -> A {
        self.value.clone()
    }

    fn on_record(&mut self, _fields: &FieldMap<Expr>) -> A {
        self.value.clone()
    }

    fn on_record_type(&mut self, _fields: &FieldMap<Expr>) -> A {
        self.value.clone()
    }

    fn on_union_type(&mut self, _alternatives: &FieldMap<Option<Expr>>) -> A {
        self.value.clone()
    }

    fn on_field_access(&mut self, _base: &Expr, _field: &str) -> A {
        self.value.clone()
    }

    fn on_projection(&mut self, _base: &Expr, _fields: &[String]) -> A {
        self.value.clone()
    }

    fn on_projection_by_type(&mut self, _base: &Expr, _selector: &Expr) -> A {
        self.value.clone()
    }

    fn on_application(&mut self, _func: &Expr, _arg: &Expr) -> A {
        self.value.clone()
    }

    fn on_operator_application(&mut self, _operator: Operator, _lhs: &Expr, _rhs: &Expr) -> A {
        self.value.clone()
    }

    fn on_if(&mut self, _predicate: &Expr, _then_branch: &Expr, _else_branch: &Expr) -> A {
        self.value.clone()
    }

    fn on_annotated(&mut self, _base: &Expr, _annotation: &Expr) -> A {
        self.value.clone()
    }

    fn on_assert(&mut self, _annotation: &Expr) -> A {
        self.value.clone()
    }

    fn on_merge(&mut self, _handlers: &Expr, _union: &Expr, _annotation: Option<&Expr>) -> A {
        self.value.clone()
    }

    fn on_to_map(&mut self, _base: &Expr, _annotation: Option<&Expr>) -> A {
        self.value.clone()
    }

    fn on_missing_import(&mut self, _mode: ImportMode, _digest: Option<&Digest>) -> A {
        self.value.clone()
    }

    fn on_env_import(&mut self, _name: &str, _mode: ImportMode, _digest: Option<&Digest>) -> A {
        self.value.clone()
    }

    fn on_local_import(&mut self, _path: &Path, _mode: ImportMode, _digest: Option<&Digest>) -> A {
        self.value.clone()
    }

    fn on_remote_import(
        &mut self,
        _url: &RemoteUrl,
        _using: Option<&Expr>,
        _mode: ImportMode,
        _digest: Option<&Digest>,
    ) -> A {
        self.value.clone()
    }
}
