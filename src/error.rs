//! Failure taxonomy for immutability validation
//!
//! This module defines the outcome types of the deep walk. We use
//! `thiserror` for automatic `Display` and `Error` trait implementations,
//! and `serde::Serialize` so violations can be reported as structured
//! diagnostics.
//!
//! A violation always carries the full path of hops from the validated
//! root to the offending field, so a failure three objects deep reads as
//! `Outer.items[1] -> Wrapper.inner: ...`.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result of one call to `validate`: `Ok(())` is a pass, the error is the
/// first (and only) violation encountered.
pub type ValidationOutcome = std::result::Result<(), ImmutabilityViolation>;

/// One hop in a failure path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PathSegment {
    /// A named field of an enclosing type.
    Field {
        /// Name of the type declaring the field.
        type_name: &'static str,
        /// Name of the field.
        field: &'static str,
    },
    /// An element of a guarded collection, by position.
    Element(usize),
    /// A key of a guarded map, by entry position.
    Key(usize),
    /// A value of a guarded map, by entry position.
    MapValue(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field { type_name, field } => write!(f, "{type_name}.{field}"),
            PathSegment::Element(i) => write!(f, "[{i}]"),
            PathSegment::Key(i) => write!(f, "[key {i}]"),
            PathSegment::MapValue(i) => write!(f, "[value {i}]"),
        }
    }
}

/// Ordered sequence of hops from the validated root to the offending field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// Empty path (a violation local to the element being inspected).
    pub fn empty() -> Self {
        FieldPath(Vec::new())
    }

    /// Single-hop path naming a field of `type_name`.
    pub fn field(type_name: &'static str, field: &'static str) -> Self {
        FieldPath(vec![PathSegment::Field { type_name, field }])
    }

    /// The hops, root first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Whether the path has no hops.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of hops.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// A new path with `prefix` hops prepended before this path's hops.
    #[must_use]
    pub fn prefixed(&self, prefix: Vec<PathSegment>) -> Self {
        let mut segments = prefix;
        segments.extend(self.0.iter().cloned());
        FieldPath(segments)
    }
}

impl From<Vec<PathSegment>> for FieldPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        FieldPath(segments)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 && matches!(segment, PathSegment::Field { .. }) {
                write!(f, " -> ")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Why a field (or element) failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum FailureReason {
    /// The field's storage slot is reassignable after construction.
    #[error("field binding is reassignable after construction")]
    NotFinalBinding,

    /// The field's declared type is an array / fixed-size buffer.
    #[error("field is declared as an array type")]
    ArrayField,

    /// The field's declared type is on the recognized-mutable denylist.
    #[error("declared type is on the recognized-mutable denylist")]
    RecognizedMutableType,

    /// A collection instance lacks the immutability guarantee.
    #[error("collection instance lacks an immutability guarantee")]
    MutableCollection,

    /// A map instance lacks the immutability guarantee.
    #[error("map instance lacks an immutability guarantee")]
    MutableMap,

    /// The field holds an occupied swappable reference cell.
    #[error("value is held in a swappable reference cell")]
    MutableCell,

    /// The field's value could not be read despite best effort.
    #[error("field could not be read: {0}")]
    InaccessibleField(String),

    /// Recursive validation of a nested value failed; wraps the child
    /// failure, the enclosing violation's path is the concatenation.
    #[error("nested validation failed: {0}")]
    NestedValidationFailure(#[source] Box<ImmutabilityViolation>),
}

/// A structural immutability violation: the first failure found by the
/// depth-first walk, with the full path from the validated root.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{reason} (at {path})")]
pub struct ImmutabilityViolation {
    /// Hops from the root to the offending field.
    pub path: FieldPath,
    /// What went wrong there. Also the error source, so nested failures
    /// stay observable through `source()`.
    #[source]
    pub reason: FailureReason,
}

impl ImmutabilityViolation {
    /// Violation at an explicit path.
    pub fn new(path: FieldPath, reason: FailureReason) -> Self {
        ImmutabilityViolation { path, reason }
    }

    /// Violation naming a single field of `type_name`.
    pub fn at(type_name: &'static str, field: &'static str, reason: FailureReason) -> Self {
        ImmutabilityViolation {
            path: FieldPath::field(type_name, field),
            reason,
        }
    }

    /// Violation local to the element currently being inspected; the
    /// caller is expected to [`nest`](Self::nest) it under the container.
    pub fn local(reason: FailureReason) -> Self {
        ImmutabilityViolation {
            path: FieldPath::empty(),
            reason,
        }
    }

    /// Wrap this violation as a child of an enclosing walk step.
    ///
    /// The returned violation's path is `prefix` followed by this
    /// violation's path; its reason wraps the original so the chain of
    /// nesting stays observable through `source()`.
    #[must_use]
    pub fn nest(self, prefix: Vec<PathSegment>) -> Self {
        ImmutabilityViolation {
            path: self.path.prefixed(prefix),
            reason: FailureReason::NestedValidationFailure(Box::new(self)),
        }
    }

    /// The leaf reason, unwrapping any nesting.
    pub fn root_cause(&self) -> &FailureReason {
        match &self.reason {
            FailureReason::NestedValidationFailure(child) => child.root_cause(),
            other => other,
        }
    }
}

/// Failure to obtain a field's current value from a [`crate::traits::StructuralView`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldAccessError {
    /// The view has no accessor registered for the requested field.
    #[error("no accessor registered for field '{field}'")]
    UnknownField {
        /// The requested field name.
        field: String,
    },

    /// The field exists but its value cannot be produced.
    #[error("field '{field}' cannot be read: {detail}")]
    Unreadable {
        /// The requested field name.
        field: String,
        /// Why the read failed.
        detail: String,
    },
}
