//! Core pass/fail scenarios
//!
//! One test per failure reason, plus the clean aggregate that exercises
//! the whole recognized-immutable baseline at once.

use crate::common::init_tracing;
use chrono::{DateTime, Utc};
use permafrost::{structural, validate, FailureReason, FrozenMap, FrozenSeq};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

structural! {
    #[derive(Debug)]
    struct Address {
        street: String,
        zip: String,
    }
}

structural! {
    #[derive(Debug)]
    struct Account {
        id: Uuid,
        created_at: DateTime<Utc>,
        display_name: String,
        home: Address,
        billing: Box<Address>,
        shared_profile: Arc<Address>,
        aliases: FrozenSeq<String>,
        limits: FrozenMap<String, i64>,
        note: Option<String>,
        motto: &'static str,
    }
}

fn address() -> Address {
    Address {
        street: "1 Main St".to_string(),
        zip: "02134".to_string(),
    }
}

fn clean_account() -> Account {
    Account {
        id: Uuid::new_v4(),
        created_at: Utc::now(),
        display_name: "Ada".to_string(),
        home: address(),
        billing: Box::new(address()),
        shared_profile: Arc::new(address()),
        aliases: FrozenSeq::new(vec!["ada".to_string(), "al".to_string()]),
        limits: FrozenMap::new([("daily".to_string(), 100i64)].into_iter().collect()),
        note: None,
        motto: "festina lente",
    }
}

#[test]
fn clean_nested_aggregate_passes() {
    init_tracing();
    assert!(validate(&clean_account()).is_ok());
}

#[test]
fn growable_vec_field_fails_as_mutable_collection() {
    structural! {
        struct VecHolder {
            items: Vec<i64>,
        }
    }

    let err = validate(&VecHolder { items: vec![1, 2] }).unwrap_err();
    assert_eq!(err.root_cause(), &FailureReason::MutableCollection);
    assert!(err.path.to_string().contains("VecHolder.items"));
}

#[test]
fn empty_growable_collection_still_fails() {
    // The instance is checked for its guarantee, not its contents.
    structural! {
        struct VecHolder {
            items: Vec<i64>,
        }
    }

    let err = validate(&VecHolder { items: Vec::new() }).unwrap_err();
    assert_eq!(err.root_cause(), &FailureReason::MutableCollection);
}

#[test]
fn hash_map_field_fails_as_mutable_map() {
    structural! {
        struct MapHolder {
            lookup: HashMap<String, i64>,
        }
    }

    let mut lookup = HashMap::new();
    lookup.insert("k".to_string(), 1);
    let err = validate(&MapHolder { lookup }).unwrap_err();
    assert_eq!(err.root_cause(), &FailureReason::MutableMap);
}

#[test]
fn rebindable_binding_fails_before_type_checks() {
    // Even a guaranteed-immutable type fails when its binding can be
    // reassigned.
    structural! {
        struct Rebind {
            @rebindable snapshot: FrozenSeq<i64>,
        }
    }

    let err = validate(&Rebind {
        snapshot: FrozenSeq::new(vec![1]),
    })
    .unwrap_err();
    assert_eq!(err.root_cause(), &FailureReason::NotFinalBinding);
    assert!(err.path.to_string().contains("Rebind.snapshot"));
}

#[test]
fn array_field_fails_by_declared_type() {
    structural! {
        struct Digest {
            bytes: [u8; 16],
        }
    }

    let err = validate(&Digest { bytes: [0; 16] }).unwrap_err();
    assert_eq!(err.root_cause(), &FailureReason::ArrayField);
}

#[test]
fn nested_object_failure_reports_full_path() {
    structural! {
        struct Inner {
            buffer: Vec<u8>,
        }
    }
    structural! {
        struct Outer {
            label: String,
            child: Inner,
        }
    }

    let err = validate(&Outer {
        label: "x".to_string(),
        child: Inner { buffer: vec![0] },
    })
    .unwrap_err();

    let path = err.path.to_string();
    assert!(path.contains("Outer.child"), "path was: {path}");
    assert!(path.contains("Inner.buffer"), "path was: {path}");
    assert_eq!(err.root_cause(), &FailureReason::MutableCollection);
    assert!(matches!(
        err.reason,
        FailureReason::NestedValidationFailure(_)
    ));
}

#[test]
fn single_field_nesting_is_validated() {
    // A sole field sits at offset 0, so parent and child share an
    // address; the child is a distinct node, not a revisit.
    structural! {
        struct Payload {
            buffer: Vec<u8>,
        }
    }
    structural! {
        struct Envelope {
            payload: Payload,
        }
    }

    let err = validate(&Envelope {
        payload: Payload { buffer: vec![1] },
    })
    .unwrap_err();
    assert_eq!(err.root_cause(), &FailureReason::MutableCollection);
    let path = err.path.to_string();
    assert!(path.contains("Envelope.payload"), "path was: {path}");
    assert!(path.contains("Payload.buffer"), "path was: {path}");
}

#[test]
fn deep_single_field_chain_is_walked_to_the_leaf() {
    structural! {
        struct Level2 {
            cell: std::cell::RefCell<u64>,
        }
    }
    structural! {
        struct Level1 {
            next: Level2,
        }
    }
    structural! {
        struct Level0 {
            next: Level1,
        }
    }

    let err = validate(&Level0 {
        next: Level1 {
            next: Level2 {
                cell: std::cell::RefCell::new(9),
            },
        },
    })
    .unwrap_err();
    assert_eq!(err.root_cause(), &FailureReason::MutableCell);
    assert!(err.path.to_string().contains("Level2.cell"));
}

#[test]
fn absence_passes_where_presence_fails() {
    // The same declared type: Absent passes, a present mutable value
    // fails. Type-level verdicts would reject both.
    structural! {
        struct MaybeItems {
            items: Option<Vec<i64>>,
        }
    }

    assert!(validate(&MaybeItems { items: None }).is_ok());
    let err = validate(&MaybeItems {
        items: Some(vec![1]),
    })
    .unwrap_err();
    assert_eq!(err.root_cause(), &FailureReason::MutableCollection);
}

#[test]
fn transparent_pointer_to_mutable_interior_fails() {
    // Arc shares without guarding; the pointee is what counts.
    structural! {
        struct SharedBuf {
            data: Arc<Vec<u8>>,
        }
    }

    let err = validate(&SharedBuf {
        data: Arc::new(vec![1]),
    })
    .unwrap_err();
    assert_eq!(err.root_cause(), &FailureReason::MutableCollection);
}

#[test]
fn first_failure_wins_in_declaration_order() {
    structural! {
        struct TwoBad {
            first: Vec<i64>,
            second: HashMap<String, i64>,
        }
    }

    let err = validate(&TwoBad {
        first: vec![1],
        second: HashMap::new(),
    })
    .unwrap_err();
    assert_eq!(err.root_cause(), &FailureReason::MutableCollection);
    assert!(err.path.to_string().contains("first"));
}

#[test]
fn violation_serializes_as_structured_diagnostic() {
    structural! {
        struct VecHolder {
            items: Vec<i64>,
        }
    }

    let err = validate(&VecHolder { items: vec![1] }).unwrap_err();
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["reason"], "MutableCollection");
    assert_eq!(json["path"][0]["Field"]["field"], "items");
}
