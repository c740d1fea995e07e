//! Comparison operators, combine modes, and fuzzy matching.
//!
//! The declaration surface of a filter shape names these as plain tokens
//! (`"gt"`, `"or"`, `"starts_with"`); registration parses the tokens once into
//! the typed enums stored on each [`crate::descriptor::FieldDescriptor`].
//! Evaluation is a fixed match over the enum — no lookup tables at run time.
//!
//! ```rust
//! use sift_query::ops::{CompareOp, FuzzyMode, FuzzyPattern};
//! use sift_query::value::Value;
//!
//! assert_eq!(CompareOp::parse_token("gte"), Some(CompareOp::Gte));
//! assert!(CompareOp::Gt.eval(&Value::Int(30), &Value::Int(21)));
//!
//! let pat = FuzzyPattern::new("bo", FuzzyMode::Contains);
//! assert_eq!(pat.pattern(), "%bo%");
//! assert!(pat.matches("Bob"));
//! ```

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Comparison operator applied between a record field and a criterion value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareOp {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
}

impl CompareOp {
    /// Parse a declaration token. Returns `None` for an unrecognized token;
    /// registration turns that into a configuration error naming the field.
    pub fn parse_token(token: &str) -> Option<Self> {
        match token {
            "eq" => Some(Self::Eq),
            "ne" => Some(Self::Ne),
            "gt" => Some(Self::Gt),
            "gte" => Some(Self::Gte),
            "lt" => Some(Self::Lt),
            "lte" => Some(Self::Lte),
            _ => None,
        }
    }

    /// The declaration token for this operator.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
        }
    }

    /// Evaluate `lhs <op> rhs` under loose value semantics.
    ///
    /// Ordering operators are false whenever the pair has no ordering (null,
    /// JSON, cross-kind). `Ne` against a null record value is true: the record
    /// demonstrably does not hold the criterion value.
    pub fn eval(self, lhs: &Value, rhs: &Value) -> bool {
        match self {
            Self::Eq => lhs.loose_eq(rhs),
            Self::Ne => !lhs.loose_eq(rhs),
            Self::Gt => matches!(lhs.loose_cmp(rhs), Some(Ordering::Greater)),
            Self::Gte => matches!(
                lhs.loose_cmp(rhs),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Self::Lt => matches!(lhs.loose_cmp(rhs), Some(Ordering::Less)),
            Self::Lte => matches!(lhs.loose_cmp(rhs), Some(Ordering::Less | Ordering::Equal)),
        }
    }
}

impl Default for CompareOp {
    fn default() -> Self {
        Self::Eq
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// How a field's sub-predicate folds into the accumulated predicate.
///
/// The mode is a property of the *current* field: a field marked `Or` combines
/// its own sub-predicate with everything folded so far via disjunction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Combine {
    /// Logical conjunction with the accumulator.
    And,
    /// Logical disjunction with the accumulator.
    Or,
}

impl Combine {
    /// Parse a declaration token (`"and"` or `"or"`).
    pub fn parse_token(token: &str) -> Option<Self> {
        match token {
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            _ => None,
        }
    }
}

impl Default for Combine {
    fn default() -> Self {
        Self::And
    }
}

/// Wildcard placement for fuzzy text matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuzzyMode {
    /// `%term%` — substring match.
    Contains,
    /// `term%` — prefix match.
    StartsWith,
    /// `%term` — suffix match.
    EndsWith,
}

impl FuzzyMode {
    /// Parse a declaration token (`"contains"`, `"starts_with"`, `"ends_with"`).
    pub fn parse_token(token: &str) -> Option<Self> {
        match token {
            "contains" => Some(Self::Contains),
            "starts_with" => Some(Self::StartsWith),
            "ends_with" => Some(Self::EndsWith),
            _ => None,
        }
    }
}

impl Default for FuzzyMode {
    fn default() -> Self {
        Self::Contains
    }
}

/// A fuzzy search term expanded with its wildcard placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyPattern {
    term: String,
    mode: FuzzyMode,
}

impl FuzzyPattern {
    /// Wrap a (non-blank) term with its effective mode.
    pub fn new(term: impl Into<String>, mode: FuzzyMode) -> Self {
        Self {
            term: term.into(),
            mode,
        }
    }

    /// The raw search term.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// The effective mode.
    pub fn mode(&self) -> FuzzyMode {
        self.mode
    }

    /// Render the LIKE pattern: `%term%`, `term%`, or `%term`.
    pub fn pattern(&self) -> String {
        match self.mode {
            FuzzyMode::Contains => format!("%{}%", self.term),
            FuzzyMode::StartsWith => format!("{}%", self.term),
            FuzzyMode::EndsWith => format!("%{}", self.term),
        }
    }

    /// In-memory equivalent of the LIKE test.
    ///
    /// Case-insensitive (lowercase fold), matching the collation most SQL
    /// backends apply to `LIKE`.
    pub fn matches(&self, text: &str) -> bool {
        let text = text.to_lowercase();
        let term = self.term.to_lowercase();
        match self.mode {
            FuzzyMode::Contains => text.contains(&term),
            FuzzyMode::StartsWith => text.starts_with(&term),
            FuzzyMode::EndsWith => text.ends_with(&term),
        }
    }
}

impl fmt::Display for FuzzyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern())
    }
}
