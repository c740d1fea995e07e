//! The predicate compiler: walks a shape's cached descriptors against a live
//! filter instance and folds per-field sub-predicates into one.
//!
//! The walk is a single pass in declaration order. A field contributes a
//! sub-predicate when it holds a present value, or — for text-like fields with
//! no value — when a fuzzy term was supplied. Sub-predicates fold
//! left-associatively; the combine mode belongs to the *current* field, so a
//! field marked `or` disjoins itself with everything folded so far. No
//! reordering or optimization is performed.
//!
//! Tied to the same pass: the requested order-by source name resolves to its
//! descriptor's exposed path (case-insensitively), and the page window is
//! carried through untouched. The resolved name is returned on
//! [`CompiledFilter`] rather than written back into the filter instance.
//!
//! ```rust
//! use sift_query::compile::compile;
//! use sift_query::{filter_shape, record};
//!
//! record! {
//!     struct Person {
//!         name: String,
//!         age: i64,
//!     }
//! }
//!
//! filter_shape! {
//!     struct PersonFilter {
//!         name: String,
//!         age: i64 [op = "gt"],
//!     }
//! }
//!
//! let mut filter = PersonFilter::new().unwrap();
//! filter.age = Some(30);
//!
//! let compiled = compile::<_, Person>(&filter).unwrap();
//! let bob = Person { name: "Bob".into(), age: 42 };
//! let kid = Person { name: "Tim".into(), age: 9 };
//! assert!(compiled.predicate.test(&bob));
//! assert!(!compiled.predicate.test(&kid));
//! ```

use crate::error::{FilterError, FilterResult};
use crate::ops::{Combine, FuzzyPattern};
use crate::predicate::Predicate;
use crate::record::{Record, resolve_path};
use crate::registry;
use crate::shape::FilterShape;
use crate::types::{OrderBy, Page};
use crate::value::{Value, ValueKind};

/// Everything a compilation produces: the folded predicate plus the resolved
/// order and page carriers.
#[derive(Debug, Clone)]
pub struct CompiledFilter<T> {
    /// The folded boolean predicate; `always` when no criterion was present.
    pub predicate: Predicate<T>,
    /// The resolved order-by request, if one was made.
    pub order_by: Option<OrderBy>,
    /// The requested page window.
    pub page: Page,
}

/// Compile a filter instance against a target record type.
///
/// Assumes the shape was registered at instance construction; looking up an
/// unregistered shape panics (see [`registry::descriptors`]). Fails with a
/// path-resolution error when a descriptor path does not exist on `T`, or an
/// order-resolution error when the requested order-by name matches no field —
/// in both cases no partial result is returned.
pub fn compile<S: FilterShape, T: Record + 'static>(filter: &S) -> FilterResult<CompiledFilter<T>> {
    let set = registry::descriptors::<S>();
    let params = filter.params();
    let fuzzy_term = params.fuzzy();

    let mut predicate: Option<Predicate<T>> = None;

    for descriptor in set.iter() {
        let value = filter.value(descriptor.source());

        let sub = match value {
            Some(value) => {
                let resolved = resolve_path(T::schema(), descriptor.path())?;
                let op = descriptor.compare();
                let segments = resolved.into_segments();
                Predicate::new(move |record: &T| op.eval(&record.get(&segments), &value))
            }
            None => {
                let Some(term) = fuzzy_term else { continue };
                if descriptor.kind() != ValueKind::String {
                    continue;
                }
                let mode = descriptor.fuzzy().unwrap_or_else(|| set.fuzzy_mode());
                let pattern = FuzzyPattern::new(term, mode);
                let resolved = resolve_path(T::schema(), descriptor.path())?;
                let segments = resolved.into_segments();
                Predicate::new(move |record: &T| match record.get(&segments) {
                    Value::String(text) => pattern.matches(&text),
                    _ => false,
                })
            }
        };

        predicate = Some(match predicate {
            None => sub,
            Some(acc) => match descriptor.combine() {
                Combine::And => acc.and(sub),
                Combine::Or => acc.or(sub),
            },
        });
    }

    let order_by = match params.order_field() {
        Some(name) => match set.by_source(name) {
            Some(descriptor) => Some(OrderBy::new(descriptor.path().clone(), params.direction)),
            None => {
                return Err(FilterError::OrderResolution {
                    name: name.to_string(),
                    shape: set.shape(),
                });
            }
        },
        None => None,
    };

    tracing::trace!(
        shape = set.shape(),
        bound = predicate.is_some(),
        order = order_by.as_ref().map(|o| o.field.as_str()),
        "compiled filter"
    );

    Ok(CompiledFilter {
        predicate: predicate.unwrap_or_else(Predicate::always),
        order_by,
        page: params.page,
    })
}
