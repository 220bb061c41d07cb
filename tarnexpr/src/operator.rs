use strum::{EnumIter, FromRepr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Binary operators, with discriminants equal to their wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, FromRepr)]
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Operator {
    /// `||`
    Or = 0,
    /// `&&`
    And = 1,
    /// `==`
    Equal = 2,
    /// `!=`
    NotEqual = 3,
    /// `+`
    Plus = 4,
    /// `*`
    Times = 5,
    /// `++`
    TextAppend = 6,
    /// `#`
    ListAppend = 7,
    /// `/\`, recursive record merge
    Combine = 8,
    /// `//`, right-biased record override
    Prefer = 9,
    /// `//\\`, record type merge
    CombineTypes = 10,
    /// `?`, import fallback
    ImportAlt = 11,
    /// `===`, equivalence
    Equivalent = 12,
    /// `::`, record completion
    Complete = 13,
}

impl Operator {
    /// The code this operator carries on the wire.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Concrete syntax used when printing.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Or => "||",
            Operator::And => "&&",
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::Plus => "+",
            Operator::Times => "*",
            Operator::TextAppend => "++",
            Operator::ListAppend => "#",
            Operator::Combine => "/\\",
            Operator::Prefer => "//",
            Operator::CombineTypes => "//\\\\",
            Operator::ImportAlt => "?",
            Operator::Equivalent => "===",
            Operator::Complete => "::",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}
