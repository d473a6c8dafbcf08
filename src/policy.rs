//! Classification policy
//!
//! The recognized-immutable set, the recognized-mutable denylist and the
//! trusted (opt-out) predicate are configuration data, not compiled-in
//! constants: a [`ClassifierPolicy`] is built once and handed to the
//! validator at construction, so the classification logic never changes
//! when the type universe does.
//!
//! `baseline()` seeds the recognized-immutable set with the standard value
//! types: text, time values, identifiers and filesystem paths. Numeric and
//! boolean scalars need no entry — their shape already classifies them.

use rustc_hash::FxHashSet;
use std::any::TypeId;

/// Externally configurable type sets consumed by the classifier.
#[derive(Debug, Clone)]
pub struct ClassifierPolicy {
    recognized_immutable: FxHashSet<TypeId>,
    recognized_mutable: FxHashSet<TypeId>,
    trusted: FxHashSet<TypeId>,
}

impl ClassifierPolicy {
    /// Policy with no entries at all. Useful for tests and for callers
    /// that want full control over the recognized sets.
    pub fn empty() -> Self {
        ClassifierPolicy {
            recognized_immutable: FxHashSet::default(),
            recognized_mutable: FxHashSet::default(),
            trusted: FxHashSet::default(),
        }
    }

    /// Policy seeded with the standard recognized-immutable value types.
    pub fn baseline() -> Self {
        Self::empty()
            .allow::<String>()
            .allow::<&'static str>()
            .allow::<std::path::PathBuf>()
            .allow::<std::time::Duration>()
            .allow::<std::time::SystemTime>()
            .allow::<std::time::Instant>()
            .allow::<uuid::Uuid>()
            .allow::<chrono::NaiveDate>()
            .allow::<chrono::NaiveTime>()
            .allow::<chrono::NaiveDateTime>()
            .allow::<chrono::DateTime<chrono::Utc>>()
            .allow::<chrono::DateTime<chrono::FixedOffset>>()
            .allow::<chrono::Duration>()
    }

    /// Add `T` to the recognized-immutable set.
    ///
    /// Fields of `T` pass without recursion and without a value read.
    #[must_use]
    pub fn allow<T: 'static>(mut self) -> Self {
        self.recognized_immutable.insert(TypeId::of::<T>());
        self
    }

    /// Add `T` to the recognized-mutable denylist.
    ///
    /// Fields of `T` always fail, regardless of value.
    #[must_use]
    pub fn deny<T: 'static>(mut self) -> Self {
        self.recognized_mutable.insert(TypeId::of::<T>());
        self
    }

    /// Mark `T` as trusted (assumed immutable, skipped entirely).
    ///
    /// This is a deliberate trust boundary: the validator spends no effort
    /// on `T` and the caller accepts responsibility for it.
    #[must_use]
    pub fn trust<T: 'static>(mut self) -> Self {
        self.trusted.insert(TypeId::of::<T>());
        self
    }

    /// Whether `id` is in the recognized-immutable set.
    pub fn is_recognized_immutable(&self, id: TypeId) -> bool {
        self.recognized_immutable.contains(&id)
    }

    /// Whether `id` is on the recognized-mutable denylist.
    pub fn is_recognized_mutable(&self, id: TypeId) -> bool {
        self.recognized_mutable.contains(&id)
    }

    /// Whether `id` is trusted by configuration.
    pub fn is_trusted(&self, id: TypeId) -> bool {
        self.trusted.contains(&id)
    }
}

impl Default for ClassifierPolicy {
    fn default() -> Self {
        Self::baseline()
    }
}
