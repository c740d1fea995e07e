//! # sift-query
//!
//! Declarative filter shapes compiled into executable predicates.
//!
//! A filter shape is a plain struct whose optional fields are search
//! criteria. Declaring the shape once registers immutable per-field metadata
//! (operator, combine mode, exposed path, fuzzy mode); compiling an instance
//! folds the present criteria into a single [`Predicate`], resolves the
//! requested ordering, and carries the page window through. This crate
//! provides:
//!
//! - The [`record!`] and [`filter_shape!`] macros for declaring target
//!   records and filter shapes
//! - A process-wide shape registry with parse-once token validation
//! - Predicate compilation with `and`/`or` folding in declaration order
//! - SQL-`LIKE`-style fuzzy matching across text fields
//! - Case-insensitive order-by resolution and one-based paging
//! - An in-memory executor over `Vec<T>` as the reference semantics
//!
//! ## Declaring and applying a filter
//!
//! ```rust
//! use sift_query::query::ApplyFilter;
//! use sift_query::{filter_shape, record};
//!
//! record! {
//!     struct Employee {
//!         name: String,
//!         age: i64,
//!     }
//! }
//!
//! filter_shape! {
//!     struct EmployeeFilter {
//!         name: String,
//!         age: i64 [op = "gte"],
//!     }
//! }
//!
//! let staff = vec![
//!     Employee { name: "Ann".into(), age: 34 },
//!     Employee { name: "Bob".into(), age: 19 },
//! ];
//!
//! let mut filter = EmployeeFilter::new().unwrap();
//! filter.age = Some(21);
//!
//! let found = filter.apply_filter(staff).unwrap().execute().unwrap();
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].name, "Ann");
//! ```
//!
//! ## Fuzzy matching
//!
//! A fuzzy term targets every text field that has no explicit criterion,
//! using `%`-wildcard placement per field:
//!
//! ```rust
//! use sift_query::ops::{FuzzyMode, FuzzyPattern};
//!
//! let like = FuzzyPattern::new("bo", FuzzyMode::Contains);
//! assert_eq!(like.pattern(), "%bo%");
//! assert!(like.matches("Bob"));
//!
//! let prefix = FuzzyPattern::new("bo", FuzzyMode::StartsWith);
//! assert_eq!(prefix.pattern(), "bo%");
//! assert!(!prefix.matches("Abbot"));
//! ```
//!
//! ## Values
//!
//! Criteria and record fields meet as loosely-typed [`Value`]s:
//!
//! ```rust
//! use sift_query::value::Value;
//!
//! let val: Value = 42.into();
//! assert!(matches!(val, Value::Int(42)));
//!
//! // Int and Float compare by coercion.
//! assert!(Value::Int(3).loose_eq(&Value::Float(3.0)));
//!
//! // Null never equals anything, itself included.
//! assert!(!Value::Null.loose_eq(&Value::Null));
//! ```
//!
//! ## Error Handling
//!
//! Declaration and compilation errors carry a coarse kind:
//!
//! ```rust
//! use sift_query::error::{ErrorKind, FilterError};
//!
//! let err = FilterError::OrderResolution {
//!     name: "naem".into(),
//!     shape: "EmployeeFilter",
//! };
//! assert_eq!(err.kind(), ErrorKind::OrderResolution);
//! ```

pub mod compile;
pub mod descriptor;
pub mod error;
pub mod logging;
#[macro_use]
pub mod macros;
pub mod ops;
pub mod predicate;
pub mod query;
pub mod record;
pub mod registry;
pub mod shape;
pub mod types;
pub mod value;

pub use compile::{CompiledFilter, compile};
pub use descriptor::{DescriptorSet, FieldDescriptor, FieldSpec, ShapeSpec};
pub use error::{ErrorKind, FilterError, FilterResult};
pub use ops::{Combine, CompareOp, FuzzyMode, FuzzyPattern};
pub use predicate::Predicate;
pub use query::{ApplyFilter, FilteredQuery, Queryable};
pub use record::{FieldKind, Record, ResolvedPath, Schema, SchemaField, resolve_path};
pub use shape::{FilterParams, FilterShape};
pub use types::{OrderBy, Page, SortOrder};
pub use value::{Value, ValueKind};

// `smol_str` is named by macro expansions through `$crate`; `smallvec`
// appears in public signatures (`ResolvedPath::into_segments`).
pub use smallvec;
pub use smol_str;
