//! Error types for shape registration and filter compilation.
//!
//! Every fallible operation in this crate returns [`FilterResult`]. Errors fall
//! into three kinds, exposed through [`FilterError::kind`]:
//!
//! - **Configuration** — the shape declaration itself is invalid (unrecognized
//!   operator token, duplicate field, malformed path). Raised at registration
//!   time and aborts registration for that shape.
//! - **PathResolution** — a descriptor's exposed path does not resolve against
//!   the target record's schema. Raised at compile time; no partial predicate
//!   is returned.
//! - **OrderResolution** — the requested order-by name matches no declared
//!   filter field. Raised at compile time.
//!
//! Looking up the descriptors of a shape that was never registered is a
//! *programming* error, not a recoverable condition: it panics (see
//! [`crate::registry::descriptors`]).
//!
//! ```rust
//! use sift_query::error::{ErrorKind, FilterError};
//!
//! let err = FilterError::OrderResolution {
//!     name: "nme".to_string(),
//!     shape: "PersonFilter",
//! };
//! assert_eq!(err.kind(), ErrorKind::OrderResolution);
//! assert!(err.to_string().contains("nme"));
//! ```

use thiserror::Error;

/// Result type for registration and compilation.
pub type FilterResult<T> = Result<T, FilterError>;

/// Broad error classification for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid shape declaration, surfaced at registration time.
    Configuration,
    /// A descriptor path does not resolve against the target record.
    PathResolution,
    /// The requested order-by name matches no filter field.
    OrderResolution,
}

/// Errors produced while registering a filter shape or compiling a filter
/// instance into a predicate.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// The declared comparison operator token is not one of
    /// `eq | ne | gt | gte | lt | lte`.
    #[error("unrecognized comparison operator `{token}` on `{shape}.{field}`")]
    UnknownCompareOp {
        /// Shape being registered.
        shape: &'static str,
        /// Source field carrying the bad token.
        field: &'static str,
        /// The offending token.
        token: String,
    },

    /// The declared combine mode token is not `and | or`.
    #[error("unrecognized combine mode `{token}` on `{shape}.{field}`")]
    UnknownCombineMode {
        /// Shape being registered.
        shape: &'static str,
        /// Source field carrying the bad token.
        field: &'static str,
        /// The offending token.
        token: String,
    },

    /// The declared fuzzy mode token is not
    /// `contains | starts_with | ends_with`.
    #[error("unrecognized fuzzy mode `{token}` declared by shape `{shape}`")]
    UnknownFuzzyMode {
        /// Shape being registered.
        shape: &'static str,
        /// The offending token.
        token: String,
    },

    /// Two filter fields share the same source name (case-insensitive).
    #[error("duplicate filter field `{field}` on shape `{shape}`")]
    DuplicateField {
        /// Shape being registered.
        shape: &'static str,
        /// The duplicated source name.
        field: &'static str,
    },

    /// A declared exposed path is empty or contains an empty segment.
    #[error("malformed path `{path}` on `{shape}.{field}`")]
    MalformedPath {
        /// Shape being registered.
        shape: &'static str,
        /// Source field carrying the bad path.
        field: &'static str,
        /// The declared path.
        path: String,
    },

    /// A descriptor's dotted path did not resolve against the target record
    /// schema.
    #[error("path `{path}` does not resolve on record `{target}` (segment `{segment}`)")]
    PathResolution {
        /// The full dotted path being resolved.
        path: String,
        /// Name of the target record schema.
        target: &'static str,
        /// The segment that failed to resolve.
        segment: String,
    },

    /// The requested order-by name matched no filter field.
    #[error("cannot resolve order-by field `{name}` on filter shape `{shape}`")]
    OrderResolution {
        /// The requested (unmatched) identifier.
        name: String,
        /// Shape the name was resolved against.
        shape: &'static str,
    },
}

impl FilterError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownCompareOp { .. }
            | Self::UnknownCombineMode { .. }
            | Self::UnknownFuzzyMode { .. }
            | Self::DuplicateField { .. }
            | Self::MalformedPath { .. } => ErrorKind::Configuration,
            Self::PathResolution { .. } => ErrorKind::PathResolution,
            Self::OrderResolution { .. } => ErrorKind::OrderResolution,
        }
    }
}
