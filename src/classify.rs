//! Type classification
//!
//! [`TypeClassifier`] decides the immutability class of a declared type:
//! a pure function of the type's descriptor and the configured
//! [`ClassifierPolicy`], memoized process-wide by `TypeId`.
//!
//! Classification order (first match wins):
//!
//! 1. opt-out — handled as a skip by the validator; exposed here as
//!    [`TypeClassifier::is_exempt`]
//! 2. recognized-immutable allowlist
//! 3. recognized-mutable denylist
//! 4. array / fixed-buffer shape
//! 5. swappable-cell shape
//! 6. collection capability
//! 7. map capability
//! 8. primitive scalar
//! 9. otherwise opaque (recurse into fields)
//!
//! The allowlist and denylist run before the shape checks, so policy can
//! override what a shape would decide (e.g. denylist one specific
//! collection type, or allowlist a cell type whose uses are audited).
//!
//! The memo table supports concurrent reads and idempotent concurrent
//! writes: many threads classifying the same type for the first time all
//! compute the same class.

use crate::policy::ClassifierPolicy;
use crate::types::{TypeInfo, TypeShape};
use dashmap::DashMap;
use serde::Serialize;
use std::any::TypeId;

/// Immutability class of a declared type. Exactly one case applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TypeClass {
    /// A primitive scalar; passes with no recursion.
    Primitive,
    /// A type on the recognized-immutable allowlist; passes with no
    /// recursion and no value read.
    RecognizedImmutableValue,
    /// A type on the recognized-mutable denylist; always fails.
    RecognizedMutableValue,
    /// An array / fixed-size buffer; always fails, the type alone is
    /// disqualifying.
    ArrayLike,
    /// A sequence capability; the instance must carry the immutability
    /// guarantee, and every element is checked.
    GuardedCollection,
    /// A map capability; same rule as collections, over keys and values.
    GuardedMap,
    /// A single-slot swappable reference cell.
    MutableCell,
    /// A user-defined type; validated by recursing into its fields.
    Opaque,
}

/// Policy-driven, memoizing type classifier.
#[derive(Debug)]
pub struct TypeClassifier {
    policy: ClassifierPolicy,
    memo: DashMap<TypeId, TypeClass>,
}

impl TypeClassifier {
    /// Classifier over the given policy with an empty memo.
    pub fn new(policy: ClassifierPolicy) -> Self {
        TypeClassifier {
            policy,
            memo: DashMap::new(),
        }
    }

    /// The policy this classifier applies.
    pub fn policy(&self) -> &ClassifierPolicy {
        &self.policy
    }

    /// Whether a declared type is exempt from inspection, either by its
    /// declaration-site marker or by policy.
    pub fn is_exempt(&self, info: &TypeInfo) -> bool {
        info.trusted || self.policy.is_trusted(info.id)
    }

    /// Immutability class of the described type.
    pub fn classify(&self, info: &TypeInfo) -> TypeClass {
        if let Some(class) = self.memo.get(&info.id) {
            return *class;
        }
        let class = self.classify_uncached(info);
        tracing::trace!(type_name = info.name, ?class, "classified type");
        self.memo.insert(info.id, class);
        class
    }

    fn classify_uncached(&self, info: &TypeInfo) -> TypeClass {
        if self.policy.is_recognized_immutable(info.id) {
            return TypeClass::RecognizedImmutableValue;
        }
        if self.policy.is_recognized_mutable(info.id) {
            return TypeClass::RecognizedMutableValue;
        }
        match info.shape {
            TypeShape::Array => TypeClass::ArrayLike,
            TypeShape::Cell => TypeClass::MutableCell,
            TypeShape::Collection => TypeClass::GuardedCollection,
            TypeShape::Map => TypeClass::GuardedMap,
            TypeShape::Primitive => TypeClass::Primitive,
            TypeShape::Other => TypeClass::Opaque,
        }
    }
}
