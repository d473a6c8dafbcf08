//! Deep immutability validation
//!
//! [`DeepImmutabilityValidator`] orchestrates the recursive walk: it
//! enumerates a value's fields through [`StructuralView`], classifies each
//! declared type through [`TypeClassifier`], and recurses where
//! classification demands it.
//!
//! Key rules:
//! - The first failure aborts the whole traversal and is the call's final
//!   result; there is no partial or aggregate reporting.
//! - Binding mutability is checked before classification and independently
//!   of the field's type.
//! - Type-level failures (denylist, arrays) never read the value; null is
//!   not distinguished.
//! - Every element of a guarded container is checked. A failure on the
//!   second element is reported even when the first element passed.
//! - A per-call visited set of object identities bounds recursion: a
//!   revisited node is already in progress and passes immediately.
//!
//! Validation is synchronous and pure: no suspension points, no I/O, no
//! locks held across recursive calls. Concurrent calls share only the
//! classifier's memo table.

use crate::classify::{TypeClass, TypeClassifier};
use crate::error::{FailureReason, ImmutabilityViolation, PathSegment, ValidationOutcome};
use crate::policy::ClassifierPolicy;
use crate::traits::StructuralView;
use crate::types::FieldDescriptor;
use crate::value::ValueView;
use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;
use std::any::TypeId;

/// Validates that a value's entire reachable data graph is structurally
/// immutable.
#[derive(Debug)]
pub struct DeepImmutabilityValidator {
    classifier: TypeClassifier,
}

static DEFAULT_VALIDATOR: Lazy<DeepImmutabilityValidator> =
    Lazy::new(DeepImmutabilityValidator::new);

/// Validate `value` with the process-wide default validator (baseline
/// policy, shared classification memo).
///
/// # Errors
///
/// Returns the first [`ImmutabilityViolation`] the walk encounters.
pub fn validate(value: &dyn StructuralView) -> ValidationOutcome {
    DEFAULT_VALIDATOR.validate(value)
}

impl DeepImmutabilityValidator {
    /// Validator over the baseline policy.
    pub fn new() -> Self {
        Self::with_policy(ClassifierPolicy::baseline())
    }

    /// Validator over an explicit policy.
    pub fn with_policy(policy: ClassifierPolicy) -> Self {
        DeepImmutabilityValidator {
            classifier: TypeClassifier::new(policy),
        }
    }

    /// The classifier (and policy) this validator applies.
    pub fn classifier(&self) -> &TypeClassifier {
        &self.classifier
    }

    /// Validate the entire reachable data graph of `value`.
    ///
    /// Call this exactly once, after all fields of the value are fully
    /// initialized and before the value is published; treat a failure as
    /// fatal to construction (see [`crate::seal::Sealed`]).
    ///
    /// # Errors
    ///
    /// Returns the first [`ImmutabilityViolation`] the walk encounters.
    pub fn validate(&self, value: &dyn StructuralView) -> ValidationOutcome {
        let mut visited = FxHashSet::default();
        let result = self.validate_object(value, &mut visited);
        if let Err(violation) = &result {
            tracing::debug!(%violation, "immutability validation failed");
        }
        result
    }

    fn validate_object(
        &self,
        object: &dyn StructuralView,
        visited: &mut FxHashSet<(usize, TypeId)>,
    ) -> ValidationOutcome {
        let info = object.type_info();
        // Identity is address plus type: a nested field at offset 0 shares
        // its parent's address but never its type, while a true cycle
        // revisits both.
        let address = object as *const dyn StructuralView as *const () as usize;
        if !visited.insert((address, info.id)) {
            // Already in progress on this walk; assume consistent.
            tracing::trace!(type_name = info.name, "revisited node, skipping");
            return Ok(());
        }
        let owner = info.name;
        for field in object.fields() {
            self.validate_field(object, owner, &field, visited)?;
        }
        Ok(())
    }

    fn validate_field(
        &self,
        object: &dyn StructuralView,
        owner: &'static str,
        field: &FieldDescriptor,
        visited: &mut FxHashSet<(usize, TypeId)>,
    ) -> ValidationOutcome {
        if field.opt_out || self.classifier.is_exempt(&field.declared) {
            tracing::trace!(owner, field = field.name, "skipping trusted field");
            return Ok(());
        }

        // Binding mutability disqualifies on its own, before any type
        // consideration.
        if field.binding_mutable {
            return Err(fail(owner, field, FailureReason::NotFinalBinding));
        }

        match self.classifier.classify(&field.declared) {
            TypeClass::Primitive | TypeClass::RecognizedImmutableValue => Ok(()),

            TypeClass::RecognizedMutableValue => {
                Err(fail(owner, field, FailureReason::RecognizedMutableType))
            }

            TypeClass::ArrayLike => Err(fail(owner, field, FailureReason::ArrayField)),

            TypeClass::MutableCell => match self.read_field(object, owner, field)? {
                ValueView::Absent => Ok(()),
                // An unoccupied cell references nothing mutable yet.
                ValueView::Cell {
                    occupied: false, ..
                } => Ok(()),
                _ => Err(fail(owner, field, FailureReason::MutableCell)),
            },

            TypeClass::GuardedCollection => match self.read_field(object, owner, field)? {
                ValueView::Absent => Ok(()),
                ValueView::Sequence {
                    guaranteed: false, ..
                } => Err(fail(owner, field, FailureReason::MutableCollection)),
                ValueView::Sequence { items, .. } => {
                    for (index, item) in items.iter().enumerate() {
                        self.validate_value(item, visited).map_err(|violation| {
                            violation.nest(vec![field_hop(owner, field), PathSegment::Element(index)])
                        })?;
                    }
                    Ok(())
                }
                other => Err(unexpected_view(owner, field, &other)),
            },

            TypeClass::GuardedMap => match self.read_field(object, owner, field)? {
                ValueView::Absent => Ok(()),
                ValueView::Mapping {
                    guaranteed: false, ..
                } => Err(fail(owner, field, FailureReason::MutableMap)),
                ValueView::Mapping { entries, .. } => {
                    for (index, (key, value)) in entries.iter().enumerate() {
                        self.validate_value(key, visited).map_err(|violation| {
                            violation.nest(vec![field_hop(owner, field), PathSegment::Key(index)])
                        })?;
                        self.validate_value(value, visited).map_err(|violation| {
                            violation
                                .nest(vec![field_hop(owner, field), PathSegment::MapValue(index)])
                        })?;
                    }
                    Ok(())
                }
                other => Err(unexpected_view(owner, field, &other)),
            },

            TypeClass::Opaque => match self.read_field(object, owner, field)? {
                ValueView::Absent => Ok(()),
                view => self
                    .validate_value(&view, visited)
                    .map_err(|violation| violation.nest(vec![field_hop(owner, field)])),
            },
        }
    }

    /// Validate a reflected value by its runtime type: container elements,
    /// map keys/values and opaque field values all funnel through here.
    fn validate_value(
        &self,
        view: &ValueView<'_>,
        visited: &mut FxHashSet<(usize, TypeId)>,
    ) -> ValidationOutcome {
        // The opt-out skip applies at element position exactly as it does
        // at field position.
        if let Some(info) = view.runtime_info() {
            if self.classifier.is_exempt(&info) {
                tracing::trace!(type_name = info.name, "skipping trusted value");
                return Ok(());
            }
        }
        match view {
            ValueView::Absent => Ok(()),

            ValueView::Leaf(info) => match self.classifier.classify(info) {
                TypeClass::Primitive | TypeClass::RecognizedImmutableValue => Ok(()),
                TypeClass::RecognizedMutableValue => {
                    Err(ImmutabilityViolation::local(FailureReason::RecognizedMutableType))
                }
                TypeClass::ArrayLike => {
                    Err(ImmutabilityViolation::local(FailureReason::ArrayField))
                }
                TypeClass::MutableCell => {
                    Err(ImmutabilityViolation::local(FailureReason::MutableCell))
                }
                // A leaf has no structural view to recurse into; its
                // immutability cannot be confirmed, so fail closed.
                TypeClass::GuardedCollection | TypeClass::GuardedMap | TypeClass::Opaque => {
                    Err(ImmutabilityViolation::local(FailureReason::InaccessibleField(
                        format!("type '{}' has no structural view", info.name),
                    )))
                }
            },

            ValueView::Cell { info, occupied } => match self.classifier.classify(info) {
                TypeClass::RecognizedImmutableValue => Ok(()),
                // The denylist is a type-level verdict; it runs before the
                // occupancy check, matching the field-level order.
                TypeClass::RecognizedMutableValue => {
                    Err(ImmutabilityViolation::local(FailureReason::RecognizedMutableType))
                }
                _ if !occupied => Ok(()),
                _ => Err(ImmutabilityViolation::local(FailureReason::MutableCell)),
            },

            ValueView::Sequence {
                info,
                guaranteed,
                items,
            } => match self.classifier.classify(info) {
                TypeClass::RecognizedImmutableValue => Ok(()),
                TypeClass::RecognizedMutableValue => {
                    Err(ImmutabilityViolation::local(FailureReason::RecognizedMutableType))
                }
                _ => {
                    if !guaranteed {
                        return Err(ImmutabilityViolation::local(
                            FailureReason::MutableCollection,
                        ));
                    }
                    for (index, item) in items.iter().enumerate() {
                        self.validate_value(item, visited).map_err(|violation| {
                            violation.nest(vec![PathSegment::Element(index)])
                        })?;
                    }
                    Ok(())
                }
            },

            ValueView::Mapping {
                info,
                guaranteed,
                entries,
            } => match self.classifier.classify(info) {
                TypeClass::RecognizedImmutableValue => Ok(()),
                TypeClass::RecognizedMutableValue => {
                    Err(ImmutabilityViolation::local(FailureReason::RecognizedMutableType))
                }
                _ => {
                    if !guaranteed {
                        return Err(ImmutabilityViolation::local(FailureReason::MutableMap));
                    }
                    for (index, (key, value)) in entries.iter().enumerate() {
                        self.validate_value(key, visited).map_err(|violation| {
                            violation.nest(vec![PathSegment::Key(index)])
                        })?;
                        self.validate_value(value, visited).map_err(|violation| {
                            violation.nest(vec![PathSegment::MapValue(index)])
                        })?;
                    }
                    Ok(())
                }
            },

            ValueView::Object(object) => match self.classifier.classify(&object.type_info()) {
                TypeClass::RecognizedImmutableValue | TypeClass::Primitive => Ok(()),
                TypeClass::RecognizedMutableValue => {
                    Err(ImmutabilityViolation::local(FailureReason::RecognizedMutableType))
                }
                _ => self.validate_object(*object, visited),
            },
        }
    }

    fn read_field<'a>(
        &self,
        object: &'a dyn StructuralView,
        owner: &'static str,
        field: &FieldDescriptor,
    ) -> Result<ValueView<'a>, ImmutabilityViolation> {
        object.read(field.name).map_err(|err| {
            fail(
                owner,
                field,
                FailureReason::InaccessibleField(err.to_string()),
            )
        })
    }
}

impl Default for DeepImmutabilityValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn field_hop(owner: &'static str, field: &FieldDescriptor) -> PathSegment {
    PathSegment::Field {
        type_name: owner,
        field: field.name,
    }
}

fn fail(
    owner: &'static str,
    field: &FieldDescriptor,
    reason: FailureReason,
) -> ImmutabilityViolation {
    ImmutabilityViolation::at(owner, field.name, reason)
}

fn unexpected_view(
    owner: &'static str,
    field: &FieldDescriptor,
    view: &ValueView<'_>,
) -> ImmutabilityViolation {
    fail(
        owner,
        field,
        FailureReason::InaccessibleField(format!(
            "declared type and reflected value disagree: {view:?}"
        )),
    )
}
