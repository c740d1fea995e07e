//! Applying a compiled filter to a data source.
//!
//! [`Queryable`] is the seam an executor implements: given a predicate it
//! returns a restricted source. [`ApplyFilter`] is the caller-facing verb,
//! blanket-implemented for every shape, producing a [`FilteredQuery`] that
//! carries the restricted source together with the unapplied order and page
//! carriers. Applying order and page is the executor's business; the in-memory
//! `Vec` executor in this module is the reference for how they compose.

use std::cmp::Ordering;

use crate::compile::compile;
use crate::error::FilterResult;
use crate::predicate::Predicate;
use crate::record::{Record, resolve_path};
use crate::shape::FilterShape;
use crate::types::{OrderBy, Page, SortOrder};

/// A data source that can be narrowed by a predicate.
pub trait Queryable<T: Record> {
    /// Returns the source restricted to rows the predicate accepts.
    fn restrict(self, predicate: &Predicate<T>) -> Self;
}

/// A restricted source plus the ordering and paging left for the executor.
#[derive(Debug, Clone)]
pub struct FilteredQuery<Q> {
    /// The source after predicate restriction.
    pub query: Q,
    /// Resolved order-by, expressed as the descriptor's exposed path.
    pub order_by: Option<OrderBy>,
    /// The requested page window.
    pub page: Page,
}

/// Compile-and-apply in one call, for any registered shape.
///
/// ```rust
/// use sift_query::query::ApplyFilter;
/// use sift_query::{filter_shape, record};
///
/// record! {
///     struct City {
///         name: String,
///         population: i64,
///     }
/// }
///
/// filter_shape! {
///     struct CityFilter {
///         population: i64 [op = "gte"],
///     }
/// }
///
/// let cities = vec![
///     City { name: "Springfield".into(), population: 30_000 },
///     City { name: "Shelbyville".into(), population: 120_000 },
/// ];
///
/// let mut filter = CityFilter::new().unwrap();
/// filter.population = Some(100_000);
///
/// let found = filter.apply_filter(cities).unwrap().execute().unwrap();
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].name, "Shelbyville");
/// ```
pub trait ApplyFilter: FilterShape + Sized {
    fn apply_filter<T, Q>(&self, source: Q) -> FilterResult<FilteredQuery<Q>>
    where
        T: Record + 'static,
        Q: Queryable<T>,
    {
        let compiled = compile::<Self, T>(self)?;
        Ok(FilteredQuery {
            query: source.restrict(&compiled.predicate),
            order_by: compiled.order_by,
            page: compiled.page,
        })
    }
}

impl<S: FilterShape> ApplyFilter for S {}

impl<T: Record + 'static> Queryable<T> for Vec<T> {
    fn restrict(self, predicate: &Predicate<T>) -> Self {
        if predicate.is_always() {
            return self;
        }
        self.into_iter().filter(|row| predicate.test(row)).collect()
    }
}

impl<T: Record + 'static> FilteredQuery<Vec<T>> {
    /// Runs the remaining order and page steps in memory.
    ///
    /// Sorting is stable and uses the loose value ordering; incomparable
    /// pairs keep their relative order. The order path is validated against
    /// the record schema before sorting.
    pub fn execute(self) -> FilterResult<Vec<T>> {
        let FilteredQuery {
            mut query,
            order_by,
            page,
        } = self;

        if let Some(order) = order_by {
            let resolved = resolve_path(T::schema(), &order.field)?;
            let segments = resolved.into_segments();
            query.sort_by(|a, b| {
                let ord = a
                    .get(&segments)
                    .loose_cmp(&b.get(&segments))
                    .unwrap_or(Ordering::Equal);
                match order.order {
                    SortOrder::Asc => ord,
                    SortOrder::Desc => ord.reverse(),
                }
            });
        }

        Ok(query
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect())
    }
}
