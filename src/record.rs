//! Target record structure: static schemas and dotted-path access.
//!
//! A predicate compiles against a concrete record type. The record exposes its
//! structure twice over:
//!
//! - statically, through [`Record::schema`], so a dotted descriptor path like
//!   `"address.city"` can be validated *before* any predicate closure is
//!   built (a bad segment is a [`FilterError::PathResolution`], never a silent
//!   mismatch at match time);
//! - dynamically, through [`Record::get`], which reads the value at a
//!   previously resolved path.
//!
//! The [`crate::record!`] macro generates both for plain structs; hand-written
//! impls follow the same shape:
//!
//! ```rust
//! use sift_query::record::{FieldKind, Record, Schema, SchemaField, resolve_path};
//! use sift_query::smol_str::SmolStr;
//! use sift_query::value::{Value, ValueKind};
//!
//! struct City {
//!     name: String,
//! }
//!
//! impl Record for City {
//!     fn schema() -> &'static Schema {
//!         static FIELDS: &[SchemaField] = &[SchemaField {
//!             name: "name",
//!             kind: FieldKind::Scalar(ValueKind::String),
//!         }];
//!         static SCHEMA: Schema = Schema { name: "City", fields: FIELDS };
//!         &SCHEMA
//!     }
//!
//!     fn get(&self, path: &[SmolStr]) -> Value {
//!         match path.split_first() {
//!             Some((seg, rest)) if seg == "name" && rest.is_empty() => {
//!                 Value::from(self.name.clone())
//!             }
//!             _ => Value::Null,
//!         }
//!     }
//! }
//!
//! let resolved = resolve_path(City::schema(), "name").unwrap();
//! assert_eq!(resolved.kind(), ValueKind::String);
//! assert!(resolve_path(City::schema(), "population").is_err());
//! ```

use crate::error::{FilterError, FilterResult};
use crate::value::{Value, ValueKind};
use smallvec::SmallVec;
use smol_str::SmolStr;

/// Structural description of one record field.
#[derive(Debug, Clone, Copy)]
pub struct SchemaField {
    /// Field name, one path segment.
    pub name: &'static str,
    /// Scalar kind or nested schema.
    pub kind: FieldKind,
}

/// A field is either a scalar leaf or a nested record.
///
/// Nested schemas are reached through a function pointer so schema statics can
/// reference each other without initialization order concerns.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Leaf field of the given kind.
    Scalar(ValueKind),
    /// Nested record; the pointer yields the inner schema.
    Nested(fn() -> &'static Schema),
}

/// Static structural schema of a record type.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    /// Record type name, used in resolution errors.
    pub name: &'static str,
    /// Declared fields in declaration order.
    pub fields: &'static [SchemaField],
}

impl Schema {
    /// Find a field by exact name.
    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A dotted path validated against a schema: its segments plus the terminal
/// scalar kind.
#[derive(Debug, Clone)]
pub struct ResolvedPath {
    segments: SmallVec<[SmolStr; 2]>,
    kind: ValueKind,
}

impl ResolvedPath {
    /// The path segments, outermost first.
    pub fn segments(&self) -> &[SmolStr] {
        &self.segments
    }

    /// The scalar kind the path terminates on.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Consume into the owned segment list.
    pub fn into_segments(self) -> SmallVec<[SmolStr; 2]> {
        self.segments
    }
}

/// Walk a dotted path through a schema.
///
/// Every intermediate segment must name a nested field and the final segment a
/// scalar; anything else fails with [`FilterError::PathResolution`] naming the
/// path, the target schema, and the segment that broke resolution.
pub fn resolve_path(schema: &'static Schema, path: &str) -> FilterResult<ResolvedPath> {
    let target = schema.name;
    let mut current = schema;
    let mut segments: SmallVec<[SmolStr; 2]> = SmallVec::new();
    let mut parts = path.split('.').filter(|s| !s.is_empty()).peekable();

    if parts.peek().is_none() {
        return Err(FilterError::PathResolution {
            path: path.to_string(),
            target,
            segment: String::new(),
        });
    }

    while let Some(segment) = parts.next() {
        let field = current
            .field(segment)
            .ok_or_else(|| FilterError::PathResolution {
                path: path.to_string(),
                target,
                segment: segment.to_string(),
            })?;
        segments.push(SmolStr::new(segment));

        match field.kind {
            FieldKind::Scalar(kind) => {
                if parts.peek().is_some() {
                    // Scalar in the middle of the path.
                    return Err(FilterError::PathResolution {
                        path: path.to_string(),
                        target,
                        segment: segment.to_string(),
                    });
                }
                return Ok(ResolvedPath { segments, kind });
            }
            FieldKind::Nested(inner) => {
                if parts.peek().is_none() {
                    // Path stops on a nested record, which is not comparable.
                    return Err(FilterError::PathResolution {
                        path: path.to_string(),
                        target,
                        segment: segment.to_string(),
                    });
                }
                current = inner();
            }
        }
    }

    unreachable!("loop returns on the final segment")
}

/// A record type predicates can be compiled against.
pub trait Record {
    /// The static structural schema of this type.
    fn schema() -> &'static Schema
    where
        Self: Sized;

    /// Read the value at a resolved path.
    ///
    /// Callers pass only paths validated by [`resolve_path`]; an unknown
    /// segment yields `Value::Null` rather than panicking.
    fn get(&self, path: &[SmolStr]) -> Value;
}
