//! Declarative macros for the two boilerplate-heavy surfaces: target records
//! ([`record!`]) and filter shapes ([`filter_shape!`]).
//!
//! Both expand to plain structs plus the trait impls the rest of the crate
//! works against; nothing they generate is out of reach of a hand-written
//! impl.

/// Define a plain record struct together with its [`Record`] impl.
///
/// Field types are `String`, `bool`, `i64`, `f64`, or `nested OtherRecord`
/// where `OtherRecord` was itself defined with this macro (or implements
/// [`Record`] by hand).
///
/// ```rust
/// use sift_query::record::{Record, resolve_path};
/// use sift_query::record;
/// use sift_query::value::ValueKind;
///
/// record! {
///     struct Address {
///         city: String,
///     }
/// }
///
/// record! {
///     struct Person {
///         name: String,
///         age: i64,
///         address: nested Address,
///     }
/// }
///
/// let resolved = resolve_path(Person::schema(), "address.city").unwrap();
/// assert_eq!(resolved.kind(), ValueKind::String);
/// ```
///
/// [`Record`]: crate::record::Record
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        struct $name:ident {
            $( $field:ident : $($fty:ident)+ ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            $( pub $field: $crate::__sift_field_ty!($($fty)+), )+
        }

        impl $crate::record::Record for $name {
            fn schema() -> &'static $crate::record::Schema {
                static FIELDS: &[$crate::record::SchemaField] = &[
                    $(
                        $crate::record::SchemaField {
                            name: stringify!($field),
                            kind: $crate::__sift_field_kind!($($fty)+),
                        },
                    )+
                ];
                static SCHEMA: $crate::record::Schema = $crate::record::Schema {
                    name: stringify!($name),
                    fields: FIELDS,
                };
                &SCHEMA
            }

            fn get(&self, path: &[$crate::smol_str::SmolStr]) -> $crate::value::Value {
                match path.split_first() {
                    ::core::option::Option::Some((head, rest)) => match head.as_str() {
                        $(
                            stringify!($field) => {
                                $crate::__sift_record_get!(self.$field, rest, $($fty)+)
                            }
                        )+
                        _ => $crate::value::Value::Null,
                    },
                    ::core::option::Option::None => $crate::value::Value::Null,
                }
            }
        }
    };
}

/// Define a filter shape struct together with its [`FilterShape`] impl.
///
/// Every declared field becomes a `pub Option<..>` criterion slot, and a
/// `params` field carries the order, fuzzy, and page inputs. The generated
/// `new()` constructor registers the shape and is the only intended way to
/// obtain an instance.
///
/// Field types are `String`, `bool`, `i64`, or `f64`. Per-field options go
/// in brackets: `path = "a.b"`, `op = "gt"`, `combine = "or"` (or the `or`
/// shorthand), `fuzzy = "starts_with"`. A leading `fuzzy = "..";` line sets
/// the shape-level fuzzy mode.
///
/// ```rust
/// use sift_query::filter_shape;
/// use sift_query::shape::FilterShape;
///
/// filter_shape! {
///     fuzzy = "starts_with";
///     struct PersonFilter {
///         name: String,
///         age: i64 [op = "gte", or],
///         city: String [path = "address.city"],
///     }
/// }
///
/// let mut filter = PersonFilter::new().unwrap();
/// filter.age = Some(21);
/// assert!(filter.value("name").is_none());
/// assert!(filter.value("age").is_some());
/// ```
///
/// [`FilterShape`]: crate::shape::FilterShape
#[macro_export]
macro_rules! filter_shape {
    (
        $(#[$meta:meta])*
        $( fuzzy = $default:literal ; )?
        struct $name:ident {
            $( $field:ident : $fty:ident $( [ $($opt:tt)* ] )? ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            $( pub $field: ::core::option::Option<$crate::__sift_field_ty!($fty)>, )+
            pub params: $crate::shape::FilterParams,
        }

        impl $name {
            /// Registers the shape and returns an empty instance.
            pub fn new() -> $crate::error::FilterResult<Self> {
                $crate::registry::ensure::<Self>()?;
                ::core::result::Result::Ok(Self::default())
            }
        }

        impl $crate::shape::FilterShape for $name {
            fn spec() -> $crate::descriptor::ShapeSpec {
                static FIELDS: &[$crate::descriptor::FieldSpec] = &[
                    $(
                        $crate::__sift_spec_opts!(
                            $crate::descriptor::FieldSpec::new(
                                stringify!($field),
                                $crate::__sift_value_kind!($fty),
                            )
                            $(, $($opt)*)?
                        ),
                    )+
                ];
                $crate::descriptor::ShapeSpec {
                    name: stringify!($name),
                    fields: FIELDS,
                    fuzzy: $crate::__sift_opt_str!($($default)?),
                }
            }

            fn params(&self) -> &$crate::shape::FilterParams {
                &self.params
            }

            fn value(&self, source: &str) -> ::core::option::Option<$crate::value::Value> {
                match source {
                    $(
                        stringify!($field) => {
                            ::core::clone::Clone::clone(&self.$field)
                                .map($crate::value::Value::from)
                        }
                    )+
                    _ => ::core::option::Option::None,
                }
            }
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! __sift_field_ty {
    (String) => { ::std::string::String };
    (bool) => { bool };
    (i64) => { i64 };
    (f64) => { f64 };
    (nested $t:ident) => { $t };
}

#[macro_export]
#[doc(hidden)]
macro_rules! __sift_field_kind {
    (String) => {
        $crate::record::FieldKind::Scalar($crate::value::ValueKind::String)
    };
    (bool) => {
        $crate::record::FieldKind::Scalar($crate::value::ValueKind::Bool)
    };
    (i64) => {
        $crate::record::FieldKind::Scalar($crate::value::ValueKind::Int)
    };
    (f64) => {
        $crate::record::FieldKind::Scalar($crate::value::ValueKind::Float)
    };
    (nested $t:ident) => {
        $crate::record::FieldKind::Nested(<$t as $crate::record::Record>::schema)
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! __sift_value_kind {
    (String) => { $crate::value::ValueKind::String };
    (bool) => { $crate::value::ValueKind::Bool };
    (i64) => { $crate::value::ValueKind::Int };
    (f64) => { $crate::value::ValueKind::Float };
}

#[macro_export]
#[doc(hidden)]
macro_rules! __sift_record_get {
    ($slot:expr, $rest:expr, nested $t:ident) => {
        $crate::record::Record::get(&$slot, $rest)
    };
    ($slot:expr, $rest:expr, $scalar:ident) => {
        if $rest.is_empty() {
            $crate::value::Value::from(::core::clone::Clone::clone(&$slot))
        } else {
            $crate::value::Value::Null
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! __sift_spec_opts {
    ($spec:expr $(,)?) => { $spec };
    ($spec:expr, path = $p:literal $($rest:tt)*) => {
        $crate::__sift_spec_opts!($spec.path($p) $($rest)*)
    };
    ($spec:expr, op = $p:literal $($rest:tt)*) => {
        $crate::__sift_spec_opts!($spec.compare($p) $($rest)*)
    };
    ($spec:expr, combine = $p:literal $($rest:tt)*) => {
        $crate::__sift_spec_opts!($spec.combine($p) $($rest)*)
    };
    ($spec:expr, or $($rest:tt)*) => {
        $crate::__sift_spec_opts!($spec.or() $($rest)*)
    };
    ($spec:expr, fuzzy = $p:literal $($rest:tt)*) => {
        $crate::__sift_spec_opts!($spec.fuzzy($p) $($rest)*)
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! __sift_opt_str {
    () => { ::core::option::Option::None };
    ($l:literal) => { ::core::option::Option::Some($l) };
}

#[cfg(test)]
mod tests {
    use crate::descriptor::DescriptorSet;
    use crate::ops::{Combine, CompareOp, FuzzyMode};
    use crate::record::{Record, resolve_path};
    use crate::shape::FilterShape;
    use crate::value::{Value, ValueKind};
    use crate::{filter_shape, record};

    record! {
        struct Tag {
            label: String,
        }
    }

    record! {
        struct Item {
            name: String,
            price: f64,
            in_stock: bool,
            tag: nested Tag,
        }
    }

    filter_shape! {
        fuzzy = "ends_with";
        struct ItemFilter {
            name: String,
            price: f64 [op = "lte", or],
            label: String [path = "tag.label", fuzzy = "starts_with"],
        }
    }

    #[test]
    fn test_record_schema_shape() {
        let schema = Item::schema();
        assert_eq!(schema.name, "Item");
        assert_eq!(schema.fields.len(), 4);
        assert!(resolve_path(schema, "tag.label").is_ok());
        assert_eq!(resolve_path(schema, "price").unwrap().kind(), ValueKind::Float);
    }

    #[test]
    fn test_record_get() {
        let item = Item {
            name: "Lamp".into(),
            price: 19.5,
            in_stock: true,
            tag: Tag { label: "home".into() },
        };
        let path = resolve_path(Item::schema(), "tag.label").unwrap();
        assert_eq!(item.get(path.segments()), Value::String("home".into()));
        let path = resolve_path(Item::schema(), "in_stock").unwrap();
        assert_eq!(item.get(path.segments()), Value::Bool(true));
    }

    #[test]
    fn test_shape_spec_tokens_compile() {
        let set = DescriptorSet::compile(&ItemFilter::spec()).unwrap();
        assert_eq!(set.shape(), "ItemFilter");
        assert_eq!(set.fuzzy_mode(), FuzzyMode::EndsWith);

        let price = set.by_source("price").unwrap();
        assert_eq!(price.compare(), CompareOp::Lte);
        assert_eq!(price.combine(), Combine::Or);

        let label = set.by_source("label").unwrap();
        assert_eq!(label.path(), "tag.label");
        assert_eq!(label.fuzzy(), Some(FuzzyMode::StartsWith));
    }

    #[test]
    fn test_shape_value_access() {
        let mut filter = ItemFilter::new().unwrap();
        assert_eq!(filter.value("price"), None);
        filter.price = Some(9.99);
        assert_eq!(filter.value("price"), Some(Value::Float(9.99)));
        assert_eq!(filter.value("ghost"), None);
    }
}
