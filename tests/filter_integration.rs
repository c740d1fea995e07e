//! Integration tests for the full filter flow.
//!
//! These tests exercise the public surface end to end:
//! - Shape declaration and registration
//! - Predicate compilation and combine folding
//! - Fuzzy matching across text fields
//! - Order-by resolution, paging, and in-memory execution
//! - Declaration-time configuration errors

use pretty_assertions::assert_eq;

use sift_query::error::{ErrorKind, FilterError};
use sift_query::query::ApplyFilter;
use sift_query::registry;
use sift_query::types::{Page, SortOrder};
use sift_query::{compile, filter_shape, record};

record! {
    struct Address {
        city: String,
        zip: i64,
    }
}

record! {
    struct Employee {
        name: String,
        age: i64,
        salary: f64,
        remote: bool,
        address: nested Address,
    }
}

filter_shape! {
    struct EmployeeFilter {
        name: String,
        age: i64 [op = "gte"],
        city: String [path = "address.city"],
    }
}

filter_shape! {
    struct SeniorOrRemoteFilter {
        age: i64 [op = "gte"],
        remote: bool [or],
    }
}

fn staff() -> Vec<Employee> {
    let rows = [
        ("Ann", 34, 88_000.0, false, "Springfield", 49007),
        ("Bob", 19, 41_000.0, true, "Shelbyville", 62704),
        ("Boris", 52, 97_500.0, false, "Springfield", 49008),
        ("Carla", 45, 102_000.0, true, "Capital City", 31000),
    ];
    rows.into_iter()
        .map(|(name, age, salary, remote, city, zip)| Employee {
            name: name.into(),
            age,
            salary,
            remote,
            address: Address {
                city: city.into(),
                zip,
            },
        })
        .collect()
}

#[test]
fn test_single_criterion_flow() {
    let mut filter = EmployeeFilter::new().unwrap();
    filter.age = Some(40);

    let found = filter.apply_filter(staff()).unwrap().execute().unwrap();
    let names: Vec<&str> = found.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Boris", "Carla"]);
}

#[test]
fn test_absent_fields_do_not_constrain() {
    let mut filter = EmployeeFilter::new().unwrap();
    filter.name = Some("Ann".into());

    let found = filter.apply_filter(staff()).unwrap().execute().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].age, 34);
}

#[test]
fn test_and_fold_across_fields() {
    let mut filter = EmployeeFilter::new().unwrap();
    filter.age = Some(30);
    filter.city = Some("Springfield".into());

    let found = filter.apply_filter(staff()).unwrap().execute().unwrap();
    let names: Vec<&str> = found.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Ann", "Boris"]);
}

#[test]
fn test_or_fold_across_fields() {
    let mut filter = SeniorOrRemoteFilter::new().unwrap();
    filter.age = Some(50);
    filter.remote = Some(true);

    let found = filter.apply_filter(staff()).unwrap().execute().unwrap();
    let names: Vec<&str> = found.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Bob", "Boris", "Carla"]);
}

#[test]
fn test_fuzzy_term_hits_unbound_text_fields() {
    let mut filter = EmployeeFilter::new().unwrap();
    filter.params.fuzzy_term = Some("bo".into());

    // Matches name (Bob, Boris) but also any city containing "bo"; the two
    // text sub-predicates fold with the fields' combine modes (both and).
    let found = filter.apply_filter(staff()).unwrap().execute().unwrap();
    assert!(found.is_empty());
}

#[test]
fn test_fuzzy_term_skips_bound_text_fields() {
    let mut filter = EmployeeFilter::new().unwrap();
    filter.city = Some("Springfield".into());
    filter.params.fuzzy_term = Some("bo".into());

    // City is bound, so only name takes the fuzzy term.
    let found = filter.apply_filter(staff()).unwrap().execute().unwrap();
    let names: Vec<&str> = found.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Boris"]);
}

#[test]
fn test_fuzzy_term_inert_without_text_fields() {
    let mut filter = SeniorOrRemoteFilter::new().unwrap();
    filter.params.fuzzy_term = Some("ANN".into());

    // The shape has no text fields, so the term is inert.
    let found = filter.apply_filter(staff()).unwrap().execute().unwrap();
    assert_eq!(found.len(), 4);
}

#[test]
fn test_order_by_nested_path() {
    let mut filter = EmployeeFilter::new().unwrap();
    filter.params.order_by = Some("City".into());

    let found = filter.apply_filter(staff()).unwrap().execute().unwrap();
    let cities: Vec<&str> = found.iter().map(|e| e.address.city.as_str()).collect();
    assert_eq!(
        cities,
        ["Capital City", "Shelbyville", "Springfield", "Springfield"]
    );
}

#[test]
fn test_order_by_descending_is_stable() {
    let mut filter = EmployeeFilter::new().unwrap();
    filter.params.order_by = Some("city".into());
    filter.params.direction = SortOrder::Desc;

    let found = filter.apply_filter(staff()).unwrap().execute().unwrap();
    // Ann and Boris tie on city and keep their input order.
    let names: Vec<&str> = found.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Ann", "Boris", "Bob", "Carla"]);
}

#[test]
fn test_unknown_order_by_is_an_error() {
    let mut filter = EmployeeFilter::new().unwrap();
    filter.params.order_by = Some("salary".into());

    let err = filter.apply_filter(staff()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OrderResolution);
    assert!(err.to_string().contains("salary"));
}

#[test]
fn test_paging_after_ordering() {
    let mut filter = EmployeeFilter::new().unwrap();
    filter.params.order_by = Some("age".into());
    filter.params.page = Page::new(2, 2);

    let found = filter.apply_filter(staff()).unwrap().execute().unwrap();
    let ages: Vec<i64> = found.iter().map(|e| e.age).collect();
    assert_eq!(ages, [45, 52]);
}

#[test]
fn test_default_page_window() {
    let filter = EmployeeFilter::new().unwrap();
    let compiled = compile::<_, Employee>(&filter).unwrap();
    assert_eq!(compiled.page, Page::new(1, 10));
}

#[test]
fn test_compilation_does_not_mutate_the_filter() {
    let mut filter = EmployeeFilter::new().unwrap();
    filter.params.order_by = Some("CITY".into());
    let before = filter.clone();

    let compiled = compile::<_, Employee>(&filter).unwrap();
    assert_eq!(filter, before);
    assert_eq!(
        compiled.order_by.unwrap().field.as_str(),
        "address.city"
    );
}

#[test]
fn test_bad_operator_token_fails_registration() {
    filter_shape! {
        struct BrokenFilter {
            age: i64 [op = "between"],
        }
    }

    let err = BrokenFilter::new().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(matches!(err, FilterError::UnknownCompareOp { .. }));
    assert!(!registry::is_registered::<BrokenFilter>());
}

#[test]
fn test_registration_is_idempotent() {
    let _ = EmployeeFilter::new().unwrap();
    let _ = EmployeeFilter::new().unwrap();
    assert!(registry::is_registered::<EmployeeFilter>());
}

#[test]
fn test_reusing_one_instance_for_many_compilations() {
    let mut filter = EmployeeFilter::new().unwrap();
    filter.age = Some(40);

    let first = compile::<_, Employee>(&filter).unwrap();
    let second = compile::<_, Employee>(&filter).unwrap();

    let probe = &staff()[2];
    assert_eq!(first.predicate.test(probe), second.predicate.test(probe));
}
