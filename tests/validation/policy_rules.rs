//! Classifier policy behavior
//!
//! The allowlist, denylist and trusted set are explicit configuration:
//! two validators with different policies disagree about the same value
//! without interfering with each other.

use permafrost::{
    structural, ClassifierPolicy, DeepImmutabilityValidator, FailureReason, FrozenSeq, Reflect,
    TypeInfo, TypeShape, ValueView,
};

/// A leaf with no structural view: without a policy verdict the validator
/// cannot confirm anything about it.
#[derive(Debug)]
struct RawHandle(#[allow(dead_code)] u64);

impl Reflect for RawHandle {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<RawHandle>(TypeShape::Other)
    }

    fn reflect(&self) -> ValueView<'_> {
        ValueView::Leaf(<Self as Reflect>::type_info())
    }
}

structural! {
    struct Device {
        handle: RawHandle,
    }
}

fn device() -> Device {
    Device {
        handle: RawHandle(0xdead),
    }
}

#[test]
fn uninspectable_leaf_fails_closed_by_default() {
    let err = DeepImmutabilityValidator::new()
        .validate(&device())
        .unwrap_err();
    assert!(matches!(
        err.root_cause(),
        FailureReason::InaccessibleField(_)
    ));
}

#[test]
fn denylisted_type_fails_as_recognized_mutable() {
    let validator = DeepImmutabilityValidator::with_policy(
        ClassifierPolicy::baseline().deny::<RawHandle>(),
    );
    let err = validator.validate(&device()).unwrap_err();
    assert_eq!(err.root_cause(), &FailureReason::RecognizedMutableType);
}

#[test]
fn allowlisted_type_passes_without_inspection() {
    let validator = DeepImmutabilityValidator::with_policy(
        ClassifierPolicy::baseline().allow::<RawHandle>(),
    );
    assert!(validator.validate(&device()).is_ok());
}

#[test]
fn allowlist_wins_over_denylist() {
    let validator = DeepImmutabilityValidator::with_policy(
        ClassifierPolicy::baseline()
            .allow::<RawHandle>()
            .deny::<RawHandle>(),
    );
    assert!(validator.validate(&device()).is_ok());
}

#[test]
fn trusted_type_is_skipped_at_the_field() {
    let validator = DeepImmutabilityValidator::with_policy(
        ClassifierPolicy::baseline().trust::<RawHandle>(),
    );
    assert!(validator.validate(&device()).is_ok());
}

#[test]
fn trusted_type_is_skipped_at_element_position() {
    // The opt-out skip applies to container elements exactly as it does
    // to fields; without the trust entry the same value fails closed.
    structural! {
        struct Rack {
            handles: FrozenSeq<RawHandle>,
        }
    }

    let rack = Rack {
        handles: FrozenSeq::new(vec![RawHandle(1), RawHandle(2)]),
    };

    let trusting = DeepImmutabilityValidator::with_policy(
        ClassifierPolicy::baseline().trust::<RawHandle>(),
    );
    assert!(trusting.validate(&rack).is_ok());

    let err = DeepImmutabilityValidator::new().validate(&rack).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        FailureReason::InaccessibleField(_)
    ));
    assert!(err.path.to_string().contains("Rack.handles[0]"));
}

#[test]
fn denylisted_cell_type_fails_at_element_position_even_when_unoccupied() {
    use std::cell::RefCell;

    structural! {
        struct Slots {
            cells: FrozenSeq<RefCell<Option<i64>>>,
        }
    }

    let slots = Slots {
        cells: FrozenSeq::new(vec![RefCell::new(None)]),
    };

    // Unoccupied cells pass under the baseline policy.
    assert!(DeepImmutabilityValidator::new().validate(&slots).is_ok());

    // The denylist is a type-level verdict; occupancy never gets a say.
    let denying = DeepImmutabilityValidator::with_policy(
        ClassifierPolicy::baseline().deny::<RefCell<Option<i64>>>(),
    );
    let err = denying.validate(&slots).unwrap_err();
    assert_eq!(err.root_cause(), &FailureReason::RecognizedMutableType);
    assert!(err.path.to_string().contains("Slots.cells[0]"));
}

#[test]
fn trusted_field_of_unregistered_type_is_never_read() {
    // Pointer is not Reflect at all; @trusted keeps it out of the walk.
    struct ForeignPtr(#[allow(dead_code)] *const u8);

    structural! {
        struct Engine {
            name: String,
            @trusted inner: ForeignPtr,
        }
    }

    let engine = Engine {
        name: "v8".to_string(),
        inner: ForeignPtr(std::ptr::null()),
    };
    assert!(DeepImmutabilityValidator::new().validate(&engine).is_ok());
}

#[test]
fn trusted_whole_type_is_opaque_to_the_walk() {
    structural! {
        @trusted struct Blessed {
            buffer: Vec<u8>,
        }
    }

    structural! {
        struct Holder {
            value: Blessed,
        }
    }

    let holder = Holder {
        value: Blessed { buffer: vec![1] },
    };
    assert!(DeepImmutabilityValidator::new().validate(&holder).is_ok());
}

#[test]
fn policies_do_not_leak_between_validators() {
    let strict = DeepImmutabilityValidator::new();
    let lenient = DeepImmutabilityValidator::with_policy(
        ClassifierPolicy::baseline().allow::<RawHandle>(),
    );

    assert!(lenient.validate(&device()).is_ok());
    assert!(strict.validate(&device()).is_err());
}
