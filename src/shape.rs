//! Filter shapes: the trait a declarative filter struct implements, plus the
//! universal side-channel parameters every shape carries.
//!
//! A shape is a plain struct whose fields each hold one *optional* criterion.
//! Its structure is declared once through [`FilterShape::spec`]; its values
//! are read per compilation through [`FilterShape::value`]. Order-by, paging,
//! and the fuzzy search term ride in [`FilterParams`] and are never treated as
//! filter criteria.
//!
//! The registration contract: every constructor of a shape instance calls
//! [`crate::registry::ensure`] for its own type. The [`crate::filter_shape!`]
//! macro generates `new()` doing exactly that; hand-written shapes must do the
//! same, because compilation looks descriptors up without re-registering.

use crate::descriptor::ShapeSpec;
use crate::types::{Page, SortOrder};
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Universal side channels carried by every filter instance.
///
/// Blank or whitespace-only strings are treated as unset, so these can be
/// bound straight from query-string input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterParams {
    /// Requested order-by *source* field name (matched case-insensitively).
    pub order_by: Option<String>,
    /// Requested sort direction.
    pub direction: SortOrder,
    /// Fuzzy search term applied to every text-like field without a value.
    pub fuzzy_term: Option<String>,
    /// Requested page window.
    pub page: Page,
}

impl FilterParams {
    /// The requested order-by name, if non-blank.
    pub fn order_field(&self) -> Option<&str> {
        self.order_by
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// The fuzzy search term, if non-blank.
    pub fn fuzzy(&self) -> Option<&str> {
        self.fuzzy_term
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// A declarative filter shape.
///
/// Implemented by the [`crate::filter_shape!`] macro for plain structs; a
/// hand-written impl needs to keep `spec()` and `value()` consistent (every
/// declared source name must be answerable by `value`).
pub trait FilterShape: 'static {
    /// Static declaration of this shape's filterable fields.
    fn spec() -> ShapeSpec
    where
        Self: Sized;

    /// The order/page/fuzzy side channels of this instance.
    fn params(&self) -> &FilterParams;

    /// The current value of the criterion declared under `source`, or `None`
    /// when the criterion is absent.
    fn value(&self, source: &str) -> Option<Value>;
}
