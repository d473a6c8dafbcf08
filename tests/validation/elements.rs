//! Element-level checks in guarded containers
//!
//! Guarded containers pass only when the instance carries the guarantee
//! AND every element (and map key and value) passes. Failures point at the
//! element by position.

use permafrost::{structural, validate, ClassifierPolicy, DeepImmutabilityValidator, FailureReason, FrozenMap, FrozenSeq};

structural! {
    #[derive(Debug, Clone)]
    struct Wrapper {
        inner: Option<Vec<i64>>,
    }
}

structural! {
    #[derive(Debug)]
    struct Batch {
        items: FrozenSeq<Wrapper>,
    }
}

#[test]
fn second_element_failure_is_reported() {
    // Every element is checked; a pass on element 0 must not mask a
    // failure on element 1.
    let batch = Batch {
        items: FrozenSeq::new(vec![
            Wrapper { inner: None },
            Wrapper {
                inner: Some(vec![7]),
            },
        ]),
    };

    let err = validate(&batch).unwrap_err();
    let path = err.path.to_string();
    assert!(path.contains("Batch.items[1]"), "path was: {path}");
    assert!(path.contains("Wrapper.inner"), "path was: {path}");
    assert_eq!(err.root_cause(), &FailureReason::MutableCollection);
}

#[test]
fn all_clean_elements_pass() {
    let batch = Batch {
        items: FrozenSeq::new(vec![Wrapper { inner: None }, Wrapper { inner: None }]),
    };
    assert!(validate(&batch).is_ok());
}

#[test]
fn empty_guarded_containers_pass() {
    structural! {
        struct Empty {
            seq: FrozenSeq<i64>,
            map: FrozenMap<String, i64>,
        }
    }

    let value = Empty {
        seq: FrozenSeq::new(Vec::new()),
        map: FrozenMap::new(Default::default()),
    };
    assert!(validate(&value).is_ok());
}

#[test]
fn nested_guarded_sequences_pass() {
    structural! {
        struct Matrix {
            rows: FrozenSeq<FrozenSeq<i64>>,
        }
    }

    let value = Matrix {
        rows: FrozenSeq::new(vec![
            FrozenSeq::new(vec![1, 2]),
            FrozenSeq::new(vec![3, 4]),
        ]),
    };
    assert!(validate(&value).is_ok());
}

#[test]
fn map_values_are_checked_by_entry_position() {
    structural! {
        struct Registry {
            entries: FrozenMap<String, Wrapper>,
        }
    }

    let value = Registry {
        entries: FrozenMap::new(
            [
                ("alpha".to_string(), Wrapper { inner: None }),
                (
                    "beta".to_string(),
                    Wrapper {
                        inner: Some(vec![1]),
                    },
                ),
            ]
            .into_iter()
            .collect(),
        ),
    };

    let err = validate(&value).unwrap_err();
    // BTreeMap iteration order puts "beta" at entry 1.
    let path = err.path.to_string();
    assert!(path.contains("Registry.entries[value 1]"), "path was: {path}");
}

#[test]
fn map_keys_are_checked_too() {
    structural! {
        struct Index {
            by_name: FrozenMap<String, i64>,
        }
    }

    // Denylisting the key type makes the key itself the violation. The
    // empty policy is the base because the baseline already allowlists
    // String, and the allowlist is consulted first.
    let validator = DeepImmutabilityValidator::with_policy(
        ClassifierPolicy::empty().deny::<String>(),
    );
    let value = Index {
        by_name: FrozenMap::new([("k".to_string(), 1i64)].into_iter().collect()),
    };

    let err = validator.validate(&value).unwrap_err();
    let path = err.path.to_string();
    assert!(path.contains("Index.by_name[key 0]"), "path was: {path}");
    assert_eq!(err.root_cause(), &FailureReason::RecognizedMutableType);
}
