//! `Reflect` implementations for std and ecosystem types
//!
//! This module wires the built-in type universe into the descriptor model:
//!
//! - numeric/boolean/character scalars reflect as primitive leaves,
//! - text, time values, identifiers and paths reflect as plain leaves
//!   (classified through the recognized-immutable allowlist),
//! - `Option` projects absence and is otherwise transparent,
//! - `Box`/`Arc`/`Rc` are transparent smart pointers,
//! - growable containers reflect as unguaranteed sequences/mappings,
//!   [`FrozenSeq`]/[`FrozenMap`] as guaranteed ones,
//! - fixed-size arrays reflect as array leaves (disqualifying by type),
//! - `Cell`/`RefCell`, lock types and atomics reflect as swappable cells.
//!
//! Cells report only whether their held reference is absent. Reads use the
//! non-blocking accessors (`try_borrow`, `try_lock`); a contended or
//! poisoned cell is reported occupied, never silently passed.

use crate::containers::{FrozenMap, FrozenSeq};
use crate::traits::Reflect;
use crate::types::{TypeInfo, TypeShape};
use crate::value::ValueView;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::Hash;
use std::rc::Rc;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Primitive scalars
// ---------------------------------------------------------------------------

macro_rules! impl_reflect_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn type_info() -> TypeInfo {
                    TypeInfo::of::<$ty>(TypeShape::Primitive)
                }

                fn reflect(&self) -> ValueView<'_> {
                    ValueView::Leaf(<$ty as Reflect>::type_info())
                }
            }
        )*
    };
}

impl_reflect_primitive!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, (),
);

// ---------------------------------------------------------------------------
// Recognized-immutable leaf values (allowlisted by policy, not by shape)
// ---------------------------------------------------------------------------

macro_rules! impl_reflect_leaf {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn type_info() -> TypeInfo {
                    TypeInfo::of::<$ty>(TypeShape::Other)
                }

                fn reflect(&self) -> ValueView<'_> {
                    ValueView::Leaf(<$ty as Reflect>::type_info())
                }
            }
        )*
    };
}

impl_reflect_leaf!(
    String,
    &'static str,
    std::path::PathBuf,
    std::time::Duration,
    std::time::SystemTime,
    std::time::Instant,
    uuid::Uuid,
    chrono::NaiveDate,
    chrono::NaiveTime,
    chrono::NaiveDateTime,
    chrono::DateTime<chrono::Utc>,
    chrono::DateTime<chrono::FixedOffset>,
    chrono::Duration,
);

// ---------------------------------------------------------------------------
// Optional wrapper and transparent smart pointers
// ---------------------------------------------------------------------------

impl<T: Reflect> Reflect for Option<T> {
    // An optional field declares the inner type; absence is a property of
    // the value, not of the type.
    fn type_info() -> TypeInfo {
        T::type_info()
    }

    fn reflect(&self) -> ValueView<'_> {
        match self {
            None => ValueView::Absent,
            Some(value) => value.reflect(),
        }
    }

    fn is_absent(&self) -> bool {
        self.is_none()
    }
}

macro_rules! impl_reflect_transparent {
    ($($ptr:ident),* $(,)?) => {
        $(
            impl<T: Reflect> Reflect for $ptr<T> {
                fn type_info() -> TypeInfo {
                    T::type_info()
                }

                fn reflect(&self) -> ValueView<'_> {
                    (**self).reflect()
                }

                fn is_absent(&self) -> bool {
                    (**self).is_absent()
                }
            }
        )*
    };
}

impl_reflect_transparent!(Box, Arc, Rc);

// ---------------------------------------------------------------------------
// Arrays / fixed-size buffers
// ---------------------------------------------------------------------------

impl<T: 'static, const N: usize> Reflect for [T; N] {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<[T; N]>(TypeShape::Array)
    }

    // Arrays are disqualifying by type; no element views are needed.
    fn reflect(&self) -> ValueView<'_> {
        ValueView::Leaf(<Self as Reflect>::type_info())
    }
}

// ---------------------------------------------------------------------------
// Growable containers (no guarantee)
// ---------------------------------------------------------------------------

macro_rules! impl_reflect_sequence {
    ($($ty:ty => [$($bound:tt)*]),* $(,)?) => {
        $(
            impl<T: Reflect $($bound)*> Reflect for $ty {
                fn type_info() -> TypeInfo {
                    TypeInfo::of::<$ty>(TypeShape::Collection)
                }

                fn reflect(&self) -> ValueView<'_> {
                    ValueView::Sequence {
                        info: <Self as Reflect>::type_info(),
                        guaranteed: false,
                        items: self.iter().map(Reflect::reflect).collect(),
                    }
                }
            }
        )*
    };
}

impl_reflect_sequence!(
    Vec<T> => [],
    VecDeque<T> => [],
    HashSet<T> => [+ Eq + Hash],
    BTreeSet<T> => [+ Ord],
);

impl<K: Reflect + Eq + Hash, V: Reflect> Reflect for HashMap<K, V> {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<HashMap<K, V>>(TypeShape::Map)
    }

    fn reflect(&self) -> ValueView<'_> {
        ValueView::Mapping {
            info: <Self as Reflect>::type_info(),
            guaranteed: false,
            entries: self.iter().map(|(k, v)| (k.reflect(), v.reflect())).collect(),
        }
    }
}

impl<K: Reflect + Ord, V: Reflect> Reflect for BTreeMap<K, V> {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<BTreeMap<K, V>>(TypeShape::Map)
    }

    fn reflect(&self) -> ValueView<'_> {
        ValueView::Mapping {
            info: <Self as Reflect>::type_info(),
            guaranteed: false,
            entries: self.iter().map(|(k, v)| (k.reflect(), v.reflect())).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Guarded wrappers (instance guarantee from the construction path)
// ---------------------------------------------------------------------------

impl<T: Reflect> Reflect for FrozenSeq<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<FrozenSeq<T>>(TypeShape::Collection)
    }

    fn reflect(&self) -> ValueView<'_> {
        ValueView::Sequence {
            info: <Self as Reflect>::type_info(),
            guaranteed: true,
            items: self.iter().map(Reflect::reflect).collect(),
        }
    }
}

impl<K: Reflect + Ord, V: Reflect> Reflect for FrozenMap<K, V> {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<FrozenMap<K, V>>(TypeShape::Map)
    }

    fn reflect(&self) -> ValueView<'_> {
        ValueView::Mapping {
            info: <Self as Reflect>::type_info(),
            guaranteed: true,
            entries: self.iter().map(|(k, v)| (k.reflect(), v.reflect())).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Swappable reference cells
// ---------------------------------------------------------------------------

impl<T: Reflect> Reflect for std::cell::Cell<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<std::cell::Cell<T>>(TypeShape::Cell)
    }

    // A Cell's contents cannot be observed by reference; treat it as
    // always occupied.
    fn reflect(&self) -> ValueView<'_> {
        ValueView::Cell {
            info: <Self as Reflect>::type_info(),
            occupied: true,
        }
    }
}

impl<T: Reflect> Reflect for std::cell::RefCell<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<std::cell::RefCell<T>>(TypeShape::Cell)
    }

    fn reflect(&self) -> ValueView<'_> {
        let occupied = self
            .try_borrow()
            .map(|value| !value.is_absent())
            .unwrap_or(true);
        ValueView::Cell {
            info: <Self as Reflect>::type_info(),
            occupied,
        }
    }
}

impl<T: Reflect> Reflect for std::sync::Mutex<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<std::sync::Mutex<T>>(TypeShape::Cell)
    }

    fn reflect(&self) -> ValueView<'_> {
        let occupied = match self.try_lock() {
            Ok(guard) => !guard.is_absent(),
            Err(_) => true,
        };
        ValueView::Cell {
            info: <Self as Reflect>::type_info(),
            occupied,
        }
    }
}

impl<T: Reflect> Reflect for std::sync::RwLock<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<std::sync::RwLock<T>>(TypeShape::Cell)
    }

    fn reflect(&self) -> ValueView<'_> {
        let occupied = match self.try_read() {
            Ok(guard) => !guard.is_absent(),
            Err(_) => true,
        };
        ValueView::Cell {
            info: <Self as Reflect>::type_info(),
            occupied,
        }
    }
}

impl<T: Reflect> Reflect for parking_lot::Mutex<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<parking_lot::Mutex<T>>(TypeShape::Cell)
    }

    fn reflect(&self) -> ValueView<'_> {
        let occupied = self
            .try_lock()
            .map(|guard| !guard.is_absent())
            .unwrap_or(true);
        ValueView::Cell {
            info: <Self as Reflect>::type_info(),
            occupied,
        }
    }
}

impl<T: Reflect> Reflect for parking_lot::RwLock<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<parking_lot::RwLock<T>>(TypeShape::Cell)
    }

    fn reflect(&self) -> ValueView<'_> {
        let occupied = self
            .try_read()
            .map(|guard| !guard.is_absent())
            .unwrap_or(true);
        ValueView::Cell {
            info: <Self as Reflect>::type_info(),
            occupied,
        }
    }
}

macro_rules! impl_reflect_atomic {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn type_info() -> TypeInfo {
                    TypeInfo::of::<$ty>(TypeShape::Cell)
                }

                fn reflect(&self) -> ValueView<'_> {
                    ValueView::Cell {
                        info: <$ty as Reflect>::type_info(),
                        occupied: true,
                    }
                }
            }
        )*
    };
}

impl_reflect_atomic!(
    std::sync::atomic::AtomicBool,
    std::sync::atomic::AtomicI8,
    std::sync::atomic::AtomicI16,
    std::sync::atomic::AtomicI32,
    std::sync::atomic::AtomicI64,
    std::sync::atomic::AtomicIsize,
    std::sync::atomic::AtomicU8,
    std::sync::atomic::AtomicU16,
    std::sync::atomic::AtomicU32,
    std::sync::atomic::AtomicU64,
    std::sync::atomic::AtomicUsize,
);
