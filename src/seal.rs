//! Construction-time sealing
//!
//! [`Sealed`] ties validation to the single correct call site: the moment
//! a fully initialized value is about to be published. A `Sealed<T>` can
//! only be obtained by passing validation, and it hands out shared access
//! only, so the checked structure cannot be rebound afterwards through the
//! wrapper.

use crate::error::ImmutabilityViolation;
use crate::traits::{Reflect, StructuralView};
use crate::validation::DeepImmutabilityValidator;
use crate::value::ValueView;
use std::ops::Deref;

/// A value whose entire reachable data graph passed deep immutability
/// validation at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed<T> {
    inner: T,
}

impl<T: StructuralView> Sealed<T> {
    /// Validate `value` with the process-wide default validator and seal
    /// it on success.
    ///
    /// # Errors
    ///
    /// Returns the violation and drops `value` if validation fails.
    pub fn new(value: T) -> Result<Self, ImmutabilityViolation> {
        crate::validation::validate(&value)?;
        Ok(Sealed { inner: value })
    }

    /// Validate `value` with an explicit validator and seal it on success.
    ///
    /// # Errors
    ///
    /// Returns the violation and drops `value` if validation fails.
    pub fn with_validator(
        value: T,
        validator: &DeepImmutabilityValidator,
    ) -> Result<Self, ImmutabilityViolation> {
        validator.validate(&value)?;
        Ok(Sealed { inner: value })
    }
}

impl<T> Sealed<T> {
    /// Shared access to the sealed value.
    pub fn get(&self) -> &T {
        &self.inner
    }

    /// Give up the seal and take the value back.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T> Deref for Sealed<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T> AsRef<T> for Sealed<T> {
    fn as_ref(&self) -> &T {
        &self.inner
    }
}

// A sealed value participates in enclosing structures exactly as its
// interior does.
impl<T: Reflect> Reflect for Sealed<T> {
    fn type_info() -> crate::types::TypeInfo {
        T::type_info()
    }

    fn reflect(&self) -> ValueView<'_> {
        self.inner.reflect()
    }

    fn is_absent(&self) -> bool {
        self.inner.is_absent()
    }
}
