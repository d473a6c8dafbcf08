//! Deep structural immutability validation
//!
//! Permafrost verifies, at construction time, that a value's entire
//! reachable data graph is structurally immutable:
//! - Every field binding is fixed after construction
//! - No reachable array or fixed-size mutable buffer
//! - Every reachable collection and map carries an instance-level
//!   immutability guarantee, and every element passes the same check
//! - No reachable occupied swappable reference cell
//! - No type on the recognized-mutable denylist
//!
//! The walk is depth-first and fail-fast: the first violation aborts the
//! traversal and is returned with the full field path from the validated
//! root (`Outer.items[1] -> Wrapper.inner`). A value the walk cannot
//! inspect fails closed rather than passing silently.
//!
//! Types opt in through the [`structural!`] macro (or hand-written
//! [`Reflect`] / [`StructuralView`] impls), and the natural entry point is
//! [`Sealed::new`], which validates exactly once and hands back a wrapper
//! with shared access only.
//!
//! ```
//! use permafrost::{structural, FrozenSeq, Sealed};
//!
//! structural! {
//!     pub struct Reading {
//!         pub sensor: String,
//!         pub samples: FrozenSeq<i64>,
//!     }
//! }
//!
//! let frozen = Sealed::new(Reading {
//!     sensor: "probe-1".to_string(),
//!     samples: FrozenSeq::new(vec![12, 14, 13]),
//! })
//! .expect("reading is deeply immutable");
//! assert_eq!(frozen.samples.len(), 3);
//!
//! // A plain Vec field carries no guarantee and is rejected.
//! structural! {
//!     pub struct Draft {
//!         pub samples: Vec<i64>,
//!     }
//! }
//! assert!(Sealed::new(Draft { samples: vec![1] }).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Module declarations
pub mod classify;
pub mod containers;
pub mod error;
mod macros;
pub mod policy;
pub mod reflect;
pub mod seal;
pub mod traits;
pub mod types;
pub mod validation;
pub mod value;

// Re-export commonly used types and traits
pub use classify::{TypeClass, TypeClassifier};
pub use containers::{FrozenMap, FrozenSeq};
pub use error::{
    FailureReason, FieldAccessError, FieldPath, ImmutabilityViolation, PathSegment,
    ValidationOutcome,
};
pub use policy::ClassifierPolicy;
pub use seal::Sealed;
pub use traits::{Reflect, StructuralView};
pub use types::{FieldDescriptor, TypeInfo, TypeShape};
pub use validation::{validate, DeepImmutabilityValidator};
pub use value::ValueView;
