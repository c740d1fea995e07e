//! Composable boolean predicates over a record type.
//!
//! A [`Predicate`] is a reference-counted closure from `&T` to `bool` with
//! explicit AND/OR combinators. The compiler folds per-field sub-predicates
//! into one; an empty fold is [`Predicate::always`], which matches everything.
//!
//! ```rust
//! use sift_query::predicate::Predicate;
//!
//! let adult = Predicate::new(|age: &i64| *age >= 18);
//! let senior = Predicate::new(|age: &i64| *age >= 65);
//!
//! let either = adult.clone().or(senior);
//! assert!(either.test(&70));
//! assert!(either.test(&20));
//! assert!(!either.test(&10));
//!
//! assert!(Predicate::<i64>::always().test(&0));
//! ```

use std::fmt;
use std::sync::Arc;

/// A boolean predicate over `&T`, cheap to clone.
pub struct Predicate<T: ?Sized> {
    inner: Inner<T>,
}

enum Inner<T: ?Sized> {
    /// Matches every record.
    True,
    Test(Arc<dyn Fn(&T) -> bool + Send + Sync>),
}

impl<T: 'static> Predicate<T> {
    /// The predicate that matches everything.
    pub fn always() -> Self {
        Self { inner: Inner::True }
    }

    /// Wrap a closure.
    pub fn new<F>(test: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            inner: Inner::Test(Arc::new(test)),
        }
    }

    /// Whether this is the match-everything predicate.
    pub fn is_always(&self) -> bool {
        matches!(self.inner, Inner::True)
    }

    /// Evaluate against a record.
    pub fn test(&self, record: &T) -> bool {
        match &self.inner {
            Inner::True => true,
            Inner::Test(f) => f(record),
        }
    }

    /// Logical conjunction. Short-circuits; `always` is the identity.
    pub fn and(self, other: Self) -> Self {
        match (&self.inner, &other.inner) {
            (Inner::True, _) => other,
            (_, Inner::True) => self,
            _ => Self::new(move |record| self.test(record) && other.test(record)),
        }
    }

    /// Logical disjunction. Short-circuits; `always` absorbs.
    pub fn or(self, other: Self) -> Self {
        match (&self.inner, &other.inner) {
            (Inner::True, _) | (_, Inner::True) => Self::always(),
            _ => Self::new(move |record| self.test(record) || other.test(record)),
        }
    }

    /// Logical negation.
    pub fn not(self) -> Self {
        match &self.inner {
            Inner::True => Self::new(|_| false),
            _ => Self::new(move |record| !self.test(record)),
        }
    }
}

impl<T: ?Sized> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self {
            inner: match &self.inner {
                Inner::True => Inner::True,
                Inner::Test(f) => Inner::Test(Arc::clone(f)),
            },
        }
    }
}

impl<T: ?Sized> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Inner::True => f.write_str("Predicate::always"),
            Inner::Test(_) => f.write_str("Predicate::test"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_always() {
        let p = Predicate::<i64>::always();
        assert!(p.is_always());
        assert!(p.test(&-1));
    }

    #[test]
    fn test_and_or() {
        let gt10 = Predicate::new(|n: &i64| *n > 10);
        let lt20 = Predicate::new(|n: &i64| *n < 20);

        let between = gt10.clone().and(lt20.clone());
        assert!(between.test(&15));
        assert!(!between.test(&25));

        let outside = gt10.not().or(lt20.not());
        assert!(outside.test(&5));
        assert!(outside.test(&25));
        assert!(!outside.test(&15));
    }

    #[test]
    fn test_always_identity_and_absorption() {
        let gt10 = Predicate::new(|n: &i64| *n > 10);

        let anded = Predicate::always().and(gt10.clone());
        assert!(!anded.is_always());
        assert!(!anded.test(&5));

        let ored = gt10.or(Predicate::always());
        assert!(ored.is_always());
    }

    #[test]
    fn test_clone_shares_closure() {
        let p = Predicate::new(|n: &i64| *n == 7);
        let q = p.clone();
        assert!(p.test(&7));
        assert!(q.test(&7));
    }
}
