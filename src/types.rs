//! Structural descriptors for declared types and fields
//!
//! This module defines:
//! - TypeShape: the structural facts a descriptor declares about a type
//! - TypeInfo: a compile-time descriptor of a declared type
//! - FieldDescriptor: one field of an inspectable type
//!
//! Descriptors replace runtime reflection: every inspectable type carries
//! (or generates, via the `structural!` macro) a table of `FieldDescriptor`
//! entries, and every field's declared type is described by a `TypeInfo`.
//! Classification is a pure function of `TypeInfo`, so two fields declaring
//! the same type always classify identically.

use std::any::TypeId;

/// Structural shape of a declared type.
///
/// The shape captures what a type *is* mechanically — a scalar, a fixed
/// buffer, a swappable cell, a container — independent of any policy
/// decision about whether it is immutable. Policy (allowlist/denylist)
/// is layered on top by [`crate::classify::TypeClassifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeShape {
    /// A primitive scalar (numeric, boolean, character).
    Primitive,
    /// An array / fixed-size buffer, mutable in place by construction.
    Array,
    /// A single-slot cell whose held reference can be swapped.
    Cell,
    /// A type with the sequence/collection capability.
    Collection,
    /// A type with the map capability.
    Map,
    /// Anything else: leaf value types and user-defined objects.
    Other,
}

/// Marker for declared types that are deliberately not described.
///
/// Opt-out fields are never read and never classified, so their declared
/// type does not need a real descriptor; `TypeInfo::untracked` uses this
/// marker's `TypeId` as a placeholder.
enum Untracked {}

/// Compile-time descriptor of a declared type.
///
/// `TypeInfo` is `Copy` and cheap: it carries the `TypeId` (classification
/// and memoization key), the type's display name, its [`TypeShape`], and
/// whether the type itself is marked trusted (assumed immutable, skipped
/// entirely by the validator).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeInfo {
    /// Identity of the described type; memo key for classification.
    pub id: TypeId,
    /// Display name of the type (as produced by `std::any::type_name`).
    pub name: &'static str,
    /// Structural shape of the type.
    pub shape: TypeShape,
    /// Whether the type is marked assumed-immutable at its declaration.
    pub trusted: bool,
}

impl TypeInfo {
    /// Build the descriptor for `T` with the given shape.
    pub fn of<T: 'static>(shape: TypeShape) -> Self {
        TypeInfo {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            shape,
            trusted: false,
        }
    }

    /// Build a placeholder descriptor for a type that is never inspected.
    ///
    /// Used for the declared type of opt-out fields, which may not implement
    /// [`crate::traits::Reflect`] at all.
    pub fn untracked(name: &'static str) -> Self {
        TypeInfo {
            id: TypeId::of::<Untracked>(),
            name,
            shape: TypeShape::Other,
            trusted: false,
        }
    }

    /// Mark the described type as trusted (assumed immutable).
    ///
    /// Trusted types are removed from inspection entirely; the caller
    /// accepts responsibility for their immutability.
    #[must_use]
    pub fn trusted(mut self) -> Self {
        self.trusted = true;
        self
    }
}

/// Descriptor of one non-static field of an inspectable type.
///
/// The descriptor carries everything the validator needs before it decides
/// whether to read the field's value: the declared type, whether the
/// storage slot itself can be reassigned after construction, and whether
/// the field opts out of inspection.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// Field name, as declared.
    pub name: &'static str,
    /// Descriptor of the field's declared type.
    pub declared: TypeInfo,
    /// Whether the field's storage slot can be reassigned after
    /// construction. This alone is disqualifying, regardless of the
    /// referenced value's type.
    pub binding_mutable: bool,
    /// Whether the field is marked assumed-immutable (trust boundary,
    /// never read).
    pub opt_out: bool,
}
