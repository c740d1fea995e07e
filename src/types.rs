//! Order-by and paging carriers threaded through a compiled filter.
//!
//! These ride alongside the predicate: the compiler resolves *which* field to
//! order by and carries the requested page window; actually ordering and
//! windowing the result set is the execution engine's job (the in-memory
//! executor in [`crate::query`] is the reference implementation).
//!
//! ```rust
//! use sift_query::types::{OrderBy, Page, SortOrder};
//!
//! let order = OrderBy::new("address.city", SortOrder::Desc);
//! assert_eq!(order.field.as_str(), "address.city");
//!
//! // Pages are 1-indexed.
//! let page = Page::new(3, 25);
//! assert_eq!(page.offset(), 50);
//! assert_eq!(page.limit(), 25);
//! ```

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;

/// Sort direction for the resolved order-by field.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortOrder {
    /// The lowercase token for this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved order-by request: the exposed field path plus direction.
///
/// `field` is the descriptor's exposed (possibly dotted) path, not the
/// caller-supplied source name — resolution happens during compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    /// The exposed field path to order by.
    pub field: SmolStr,
    /// Sort direction.
    pub order: SortOrder,
}

impl OrderBy {
    /// Create an order-by carrier.
    pub fn new(field: impl Into<SmolStr>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.order)
    }
}

/// A 1-indexed page window.
///
/// No bounds are enforced here; clamping page number or size is a caller
/// concern. A page number of zero behaves like page one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Page number, starting at 1.
    pub number: u64,
    /// Records per page.
    pub size: u64,
}

impl Page {
    /// Create a page window.
    pub fn new(number: u64, size: u64) -> Self {
        Self { number, size }
    }

    /// Number of records to skip before this page. Saturates instead of
    /// overflowing for out-of-range page numbers.
    pub fn offset(&self) -> u64 {
        self.number.saturating_sub(1).saturating_mul(self.size)
    }

    /// Maximum number of records on this page.
    pub fn limit(&self) -> u64 {
        self.size
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            number: 1,
            size: 10,
        }
    }
}
