//! Shape declarations and the compiled per-field metadata derived from them.
//!
//! A filter shape declares its fields as plain data ([`FieldSpec`] /
//! [`ShapeSpec`]): source name, optional exposed path, and the operator,
//! combine, and fuzzy settings as string tokens. Registration parses those
//! tokens exactly once into immutable [`FieldDescriptor`]s collected in a
//! [`DescriptorSet`]; every later compilation walks the set without touching
//! the declaration again.
//!
//! ```rust
//! use sift_query::descriptor::{DescriptorSet, FieldSpec, ShapeSpec};
//! use sift_query::ops::{Combine, CompareOp};
//! use sift_query::value::ValueKind;
//!
//! const FIELDS: &[FieldSpec] = &[
//!     FieldSpec::new("name", ValueKind::String),
//!     FieldSpec::new("age", ValueKind::Int).compare("gt"),
//!     FieldSpec::new("city", ValueKind::String).path("address.city").or(),
//! ];
//!
//! let set = DescriptorSet::compile(&ShapeSpec {
//!     name: "PersonFilter",
//!     fields: FIELDS,
//!     fuzzy: None,
//! })
//! .unwrap();
//!
//! let age = set.by_source("AGE").unwrap(); // case-insensitive
//! assert_eq!(age.compare(), CompareOp::Gt);
//! let city = set.by_source("city").unwrap();
//! assert_eq!(city.path(), "address.city");
//! assert_eq!(city.combine(), Combine::Or);
//! ```

use crate::error::{FilterError, FilterResult};
use crate::ops::{Combine, CompareOp, FuzzyMode};
use crate::value::ValueKind;
use indexmap::IndexMap;
use smol_str::SmolStr;

/// Declaration of one filter field: plain, const-buildable data.
///
/// Unset options fall back to the defaults the compiler documents: path =
/// source name, compare = `eq`, combine = `and`, no fuzzy override.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Source field name on the filter struct.
    pub source: &'static str,
    /// Exposed (possibly dotted) path override.
    pub path: Option<&'static str>,
    /// Comparison operator token.
    pub compare: Option<&'static str>,
    /// Combine mode token.
    pub combine: Option<&'static str>,
    /// Declared field kind.
    pub kind: ValueKind,
    /// Field-level fuzzy mode token override.
    pub fuzzy: Option<&'static str>,
}

impl FieldSpec {
    /// Declare a field with all options at their defaults.
    pub const fn new(source: &'static str, kind: ValueKind) -> Self {
        Self {
            source,
            path: None,
            compare: None,
            combine: None,
            kind,
            fuzzy: None,
        }
    }

    /// Override the exposed path (dot-separated for nested access).
    pub const fn path(mut self, path: &'static str) -> Self {
        self.path = Some(path);
        self
    }

    /// Set the comparison operator token (`eq | ne | gt | gte | lt | lte`).
    pub const fn compare(mut self, token: &'static str) -> Self {
        self.compare = Some(token);
        self
    }

    /// Set the combine mode token (`and | or`).
    pub const fn combine(mut self, token: &'static str) -> Self {
        self.combine = Some(token);
        self
    }

    /// Shorthand for `.combine("or")`.
    pub const fn or(self) -> Self {
        self.combine("or")
    }

    /// Set a field-level fuzzy mode override token.
    pub const fn fuzzy(mut self, token: &'static str) -> Self {
        self.fuzzy = Some(token);
        self
    }
}

/// The full declaration of a shape: name, fields, optional shape-level fuzzy
/// mode token.
#[derive(Debug, Clone, Copy)]
pub struct ShapeSpec {
    /// Shape type name, used in error messages and cache diagnostics.
    pub name: &'static str,
    /// Field declarations in declaration order.
    pub fields: &'static [FieldSpec],
    /// Shape-level fuzzy mode token (default `contains`).
    pub fuzzy: Option<&'static str>,
}

/// Compiled, immutable metadata for one filter field.
///
/// One instance per field per shape, owned by the registry and shared by every
/// filter instance of that shape.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    source: &'static str,
    path: SmolStr,
    compare: CompareOp,
    combine: Combine,
    kind: ValueKind,
    fuzzy: Option<FuzzyMode>,
}

impl FieldDescriptor {
    /// Source field name on the filter struct.
    pub fn source(&self) -> &'static str {
        self.source
    }

    /// Exposed dotted path on the target record.
    pub fn path(&self) -> &SmolStr {
        &self.path
    }

    /// Comparison operator.
    pub fn compare(&self) -> CompareOp {
        self.compare
    }

    /// Combine mode relative to the previously folded predicate.
    pub fn combine(&self) -> Combine {
        self.combine
    }

    /// Declared field kind.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Field-level fuzzy mode override, if any.
    pub fn fuzzy(&self) -> Option<FuzzyMode> {
        self.fuzzy
    }
}

/// The ordered descriptor sequence for one shape, plus its shape-level fuzzy
/// mode.
///
/// Keys are lowercased source names, so iteration preserves declaration order
/// while [`DescriptorSet::by_source`] is case-insensitive. Deterministic:
/// recompiling the same declaration always yields the same set.
#[derive(Debug, Clone)]
pub struct DescriptorSet {
    shape: &'static str,
    fields: IndexMap<SmolStr, FieldDescriptor>,
    fuzzy: FuzzyMode,
}

impl DescriptorSet {
    /// Parse and validate a shape declaration.
    ///
    /// Fails with a configuration error on an unrecognized operator, combine,
    /// or fuzzy token, a duplicate source name, or a malformed path.
    pub fn compile(spec: &ShapeSpec) -> FilterResult<Self> {
        let shape = spec.name;

        let fuzzy = match spec.fuzzy {
            Some(token) => {
                FuzzyMode::parse_token(token).ok_or_else(|| FilterError::UnknownFuzzyMode {
                    shape,
                    token: token.to_string(),
                })?
            }
            None => FuzzyMode::default(),
        };

        let mut fields = IndexMap::with_capacity(spec.fields.len());
        for field in spec.fields {
            let compare = match field.compare {
                Some(token) => {
                    CompareOp::parse_token(token).ok_or_else(|| FilterError::UnknownCompareOp {
                        shape,
                        field: field.source,
                        token: token.to_string(),
                    })?
                }
                None => CompareOp::default(),
            };
            let combine = match field.combine {
                Some(token) => {
                    Combine::parse_token(token).ok_or_else(|| FilterError::UnknownCombineMode {
                        shape,
                        field: field.source,
                        token: token.to_string(),
                    })?
                }
                None => Combine::default(),
            };
            let fuzzy_override = match field.fuzzy {
                Some(token) => Some(FuzzyMode::parse_token(token).ok_or_else(|| {
                    FilterError::UnknownFuzzyMode {
                        shape,
                        token: token.to_string(),
                    }
                })?),
                None => None,
            };

            let path = field.path.unwrap_or(field.source);
            if path.is_empty() || path.split('.').any(str::is_empty) {
                return Err(FilterError::MalformedPath {
                    shape,
                    field: field.source,
                    path: path.to_string(),
                });
            }

            let key = SmolStr::new(field.source.to_lowercase());
            let descriptor = FieldDescriptor {
                source: field.source,
                path: SmolStr::new(path),
                compare,
                combine,
                kind: field.kind,
                fuzzy: fuzzy_override,
            };
            if fields.insert(key, descriptor).is_some() {
                return Err(FilterError::DuplicateField {
                    shape,
                    field: field.source,
                });
            }
        }

        Ok(Self {
            shape,
            fields,
            fuzzy,
        })
    }

    /// Shape name this set was compiled from.
    pub fn shape(&self) -> &'static str {
        self.shape
    }

    /// Shape-level fuzzy mode (default `Contains`).
    pub fn fuzzy_mode(&self) -> FuzzyMode {
        self.fuzzy
    }

    /// Descriptors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.values()
    }

    /// Number of filterable fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the shape declares no filterable fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Case-insensitive lookup by source field name.
    pub fn by_source(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name.to_lowercase().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const FIELDS: &[FieldSpec] = &[
        FieldSpec::new("name", ValueKind::String),
        FieldSpec::new("age", ValueKind::Int).compare("gt").or(),
        FieldSpec::new("city", ValueKind::String)
            .path("address.city")
            .fuzzy("starts_with"),
    ];

    fn spec() -> ShapeSpec {
        ShapeSpec {
            name: "TestFilter",
            fields: FIELDS,
            fuzzy: None,
        }
    }

    #[test]
    fn test_compile_defaults() {
        let set = DescriptorSet::compile(&spec()).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.fuzzy_mode(), FuzzyMode::Contains);

        let name = set.by_source("name").unwrap();
        assert_eq!(name.compare(), CompareOp::Eq);
        assert_eq!(name.combine(), Combine::And);
        assert_eq!(name.path(), "name");
        assert_eq!(name.fuzzy(), None);
    }

    #[test]
    fn test_compile_overrides() {
        let set = DescriptorSet::compile(&spec()).unwrap();

        let age = set.by_source("age").unwrap();
        assert_eq!(age.compare(), CompareOp::Gt);
        assert_eq!(age.combine(), Combine::Or);

        let city = set.by_source("city").unwrap();
        assert_eq!(city.path(), "address.city");
        assert_eq!(city.fuzzy(), Some(FuzzyMode::StartsWith));
    }

    #[test]
    fn test_declaration_order_preserved() {
        let set = DescriptorSet::compile(&spec()).unwrap();
        let sources: Vec<_> = set.iter().map(FieldDescriptor::source).collect();
        assert_eq!(sources, ["name", "age", "city"]);
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let set = DescriptorSet::compile(&spec()).unwrap();
        assert!(set.by_source("NAME").is_some());
        assert!(set.by_source("Age").is_some());
        assert!(set.by_source("missing").is_none());
    }

    #[test]
    fn test_unknown_compare_token() {
        const BAD: &[FieldSpec] = &[FieldSpec::new("age", ValueKind::Int).compare("gtt")];
        let err = DescriptorSet::compile(&ShapeSpec {
            name: "Bad",
            fields: BAD,
            fuzzy: None,
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("gtt"));
    }

    #[test]
    fn test_unknown_shape_fuzzy_token() {
        let err = DescriptorSet::compile(&ShapeSpec {
            name: "Bad",
            fields: &[],
            fuzzy: Some("anywhere"),
        })
        .unwrap_err();
        assert!(matches!(err, FilterError::UnknownFuzzyMode { .. }));
    }

    #[test]
    fn test_duplicate_source_case_insensitive() {
        const DUP: &[FieldSpec] = &[
            FieldSpec::new("name", ValueKind::String),
            FieldSpec::new("Name", ValueKind::String),
        ];
        let err = DescriptorSet::compile(&ShapeSpec {
            name: "Bad",
            fields: DUP,
            fuzzy: None,
        })
        .unwrap_err();
        assert!(matches!(err, FilterError::DuplicateField { .. }));
    }

    #[test]
    fn test_malformed_path() {
        const BAD: &[FieldSpec] = &[FieldSpec::new("city", ValueKind::String).path("address..city")];
        let err = DescriptorSet::compile(&ShapeSpec {
            name: "Bad",
            fields: BAD,
            fuzzy: None,
        })
        .unwrap_err();
        assert!(matches!(err, FilterError::MalformedPath { .. }));
    }

    #[test]
    fn test_deterministic_recompile() {
        let a = DescriptorSet::compile(&spec()).unwrap();
        let b = DescriptorSet::compile(&spec()).unwrap();
        assert_eq!(a.len(), b.len());
        for (da, db) in a.iter().zip(b.iter()) {
            assert_eq!(da.source(), db.source());
            assert_eq!(da.path(), db.path());
            assert_eq!(da.compare(), db.compare());
            assert_eq!(da.combine(), db.combine());
        }
    }
}
