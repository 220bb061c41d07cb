use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::expr::Expr;

/// Fragment and interpolation counts that do not alternate correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("text literal needs {interpolations} + 1 fragments, got {fragments}")]
pub struct TextShapeError {
    pub fragments: usize,
    pub interpolations: usize,
}

/// A text literal: literal fragments alternating with interpolated
/// sub-expressions, starting and ending with a fragment.
///
/// The fields are private so the alternation invariant — fragments =
/// interpolations + 1 — holds for every constructed value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextLit {
    fragments: Vec<String>,
    interpolations: Vec<Expr>,
}

impl TextLit {
    pub fn new(
        fragments: Vec<String>,
        interpolations: Vec<Expr>,
    ) -> Result<Self, TextShapeError> {
        if fragments.len() != interpolations.len() + 1 {
            return Err(TextShapeError {
                fragments: fragments.len(),
                interpolations: interpolations.len(),
            });
        }
        Ok(Self {
            fragments,
            interpolations,
        })
    }

    /// A literal with a single fragment and no interpolations.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            fragments: vec![text.into()],
            interpolations: Vec::new(),
        }
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn interpolations(&self) -> &[Expr] {
        &self.interpolations
    }

    /// The whole literal as plain text, if nothing is interpolated.
    pub fn as_plain(&self) -> Option<&str> {
        if self.interpolations.is_empty() {
            Some(self.fragments[0].as_str())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternation_is_enforced() {
        assert!(TextLit::new(vec!["a".into(), "b".into()], vec![]).is_err());
        let lit = TextLit::new(
            vec!["a".into(), "b".into()],
            vec![Expr::Builtin("Natural/show".to_owned())],
        )
        .unwrap();
        assert_eq!(lit.fragments().len(), 2);
        assert_eq!(lit.as_plain(), None);
    }

    #[test]
    fn plain_text_round_trips() {
        let lit = TextLit::from_text("hello");
        assert_eq!(lit.as_plain(), Some("hello"));
        assert!(lit.interpolations().is_empty());
    }
}
