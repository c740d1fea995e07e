//! Process-wide descriptor cache, keyed by shape type identity.
//!
//! A shape's declaration is parsed exactly once per process; every filter
//! instance of that shape shares the cached [`DescriptorSet`]. Registration is
//! idempotent and safe to race: extraction is deterministic and runs outside
//! the lock, concurrent first users compute identical sets, and the first
//! completed insert wins. A reader can never observe a partially built set
//! because the `Arc` is fully constructed before insertion.
//!
//! The cache lives for the process lifetime and is never evicted; the shape
//! set of an application is closed and small.
//!
//! ```rust
//! use sift_query::{filter_shape, registry};
//!
//! filter_shape! {
//!     struct DemoFilter {
//!         name: String,
//!     }
//! }
//!
//! registry::ensure::<DemoFilter>().unwrap();
//! registry::ensure::<DemoFilter>().unwrap(); // no-op
//! assert!(registry::is_registered::<DemoFilter>());
//! assert_eq!(registry::descriptors::<DemoFilter>().len(), 1);
//! ```

use crate::descriptor::DescriptorSet;
use crate::error::FilterResult;
use crate::shape::FilterShape;
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

static REGISTRY: LazyLock<RwLock<HashMap<TypeId, Arc<DescriptorSet>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Idempotently register a shape's descriptor set.
///
/// The first call parses and validates the declaration (configuration errors
/// surface here); later calls are cheap read-lock no-ops. Shape constructors
/// call this, which is what lets [`descriptors`] assume presence.
pub fn ensure<S: FilterShape>() -> FilterResult<()> {
    let key = TypeId::of::<S>();
    if REGISTRY.read().contains_key(&key) {
        return Ok(());
    }

    // Extraction is deterministic, so racing computations are identical;
    // keep it outside the write lock.
    let set = Arc::new(DescriptorSet::compile(&S::spec())?);
    let mut map = REGISTRY.write();
    if !map.contains_key(&key) {
        tracing::debug!(
            shape = set.shape(),
            fields = set.len(),
            "registered filter shape"
        );
        map.insert(key, set);
    }
    Ok(())
}

/// Look up a shape's cached descriptor set.
///
/// # Panics
///
/// Panics if the shape was never registered. That means a filter instance was
/// constructed without going through a registering constructor — a defect in
/// the calling code, not a recoverable condition.
pub fn descriptors<S: FilterShape>() -> Arc<DescriptorSet> {
    REGISTRY
        .read()
        .get(&TypeId::of::<S>())
        .cloned()
        .unwrap_or_else(|| {
            panic!(
                "descriptor set for shape `{}` was never registered; \
                 construct filter instances through a constructor that calls \
                 `registry::ensure`",
                S::spec().name
            )
        })
}

/// Whether a shape has been registered.
pub fn is_registered<S: FilterShape>() -> bool {
    REGISTRY.read().contains_key(&TypeId::of::<S>())
}

/// Number of shapes currently cached. Diagnostic only.
pub fn registered_count() -> usize {
    REGISTRY.read().len()
}
