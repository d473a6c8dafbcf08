//! Core traits for structural inspection
//!
//! This module defines the two seams the validator consumes:
//!
//! - [`Reflect`]: per-type descriptor plus projection of a value into a
//!   [`ValueView`]. Implemented for scalars, text, time values, identifiers,
//!   containers, cells and smart pointers in `reflect.rs`, and for user
//!   types by the `structural!` macro.
//! - [`StructuralView`]: field enumeration and field reads for user-defined
//!   (opaque) types. Object-safe, so the validator can walk heterogeneous
//!   graphs behind `&dyn StructuralView`.
//!
//! Implementations are generated at compile time (macro or hand-written
//! registration), replacing the runtime reflection a managed runtime would
//! use. Because the generated impl lives with the type, field reads are not
//! subject to visibility restrictions.

use crate::error::FieldAccessError;
use crate::types::{FieldDescriptor, TypeInfo};
use crate::value::ValueView;

/// Compile-time structural descriptor and value projection for a type.
pub trait Reflect: 'static {
    /// Descriptor of this type as a declared field type.
    fn type_info() -> TypeInfo
    where
        Self: Sized;

    /// Project this value into the reflected view the validator walks.
    fn reflect(&self) -> ValueView<'_>;

    /// Whether this value represents "no value" (the `None` arm of an
    /// optional wrapper). Cells use this to report whether their held
    /// reference is absent.
    fn is_absent(&self) -> bool {
        false
    }
}

/// Field enumeration and field reads for an inspectable type.
///
/// The validator consumes this trait exclusively; it never looks at the
/// concrete type. Implementations must enumerate every non-static field
/// and must be able to read any enumerated, non-opt-out field.
pub trait StructuralView {
    /// Runtime type descriptor of this value.
    fn type_info(&self) -> TypeInfo;

    /// Descriptors of all non-static fields, in declaration order.
    fn fields(&self) -> Vec<FieldDescriptor>;

    /// Read the current value of a named field.
    ///
    /// # Errors
    ///
    /// Returns an error if no accessor exists for `field` (unknown name,
    /// or an opt-out field for which no accessor was generated).
    fn read(&self, field: &str) -> Result<ValueView<'_>, FieldAccessError>;
}
