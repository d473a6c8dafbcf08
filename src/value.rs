//! Reflected value views
//!
//! [`ValueView`] is the runtime shape of a field's value, produced on
//! demand by [`crate::traits::Reflect`] impls when the validator decides a
//! field actually needs reading. The view mirrors exactly the distinctions
//! the walk branches on:
//!
//! - absence (an optional wrapper holding nothing),
//! - leaf values that carry only their runtime type,
//! - sequence/mapping instances with their per-instance immutability
//!   guarantee (two values of the same declared capability can differ),
//! - cells, reduced to "is the held reference absent or occupied",
//! - opaque objects to recurse into.

use crate::traits::StructuralView;
use crate::types::TypeInfo;
use std::fmt;

/// Reflected view of a runtime value.
pub enum ValueView<'a> {
    /// No value present (the `None` arm of an optional field).
    Absent,
    /// A value with no inspectable structure; carries its runtime type for
    /// classification.
    Leaf(TypeInfo),
    /// A sequence instance.
    Sequence {
        /// Runtime type of the sequence wrapper.
        info: TypeInfo,
        /// Whether this instance was produced through a construction path
        /// that guarantees a non-mutating view.
        guaranteed: bool,
        /// Views of every element, in iteration order.
        items: Vec<ValueView<'a>>,
    },
    /// A map instance.
    Mapping {
        /// Runtime type of the map wrapper.
        info: TypeInfo,
        /// Whether this instance carries the immutability guarantee.
        guaranteed: bool,
        /// Views of every entry, in iteration order.
        entries: Vec<(ValueView<'a>, ValueView<'a>)>,
    },
    /// A swappable reference cell.
    Cell {
        /// Runtime type of the cell.
        info: TypeInfo,
        /// Whether the cell currently holds a value. An unoccupied cell
        /// references nothing mutable yet and passes validation.
        occupied: bool,
    },
    /// A user-defined object; validated by recursing into its own fields.
    Object(&'a dyn StructuralView),
}

impl<'a> ValueView<'a> {
    /// Runtime type descriptor of the viewed value, if one is present.
    pub fn runtime_info(&self) -> Option<TypeInfo> {
        match self {
            ValueView::Absent => None,
            ValueView::Leaf(info) => Some(*info),
            ValueView::Sequence { info, .. } => Some(*info),
            ValueView::Mapping { info, .. } => Some(*info),
            ValueView::Cell { info, .. } => Some(*info),
            ValueView::Object(view) => Some(view.type_info()),
        }
    }

    /// Whether the view represents "no value".
    pub fn is_absent(&self) -> bool {
        matches!(self, ValueView::Absent)
    }
}

impl fmt::Debug for ValueView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueView::Absent => f.write_str("Absent"),
            ValueView::Leaf(info) => f.debug_tuple("Leaf").field(&info.name).finish(),
            ValueView::Sequence {
                info,
                guaranteed,
                items,
            } => f
                .debug_struct("Sequence")
                .field("type", &info.name)
                .field("guaranteed", guaranteed)
                .field("len", &items.len())
                .finish(),
            ValueView::Mapping {
                info,
                guaranteed,
                entries,
            } => f
                .debug_struct("Mapping")
                .field("type", &info.name)
                .field("guaranteed", guaranteed)
                .field("len", &entries.len())
                .finish(),
            ValueView::Cell { info, occupied } => f
                .debug_struct("Cell")
                .field("type", &info.name)
                .field("occupied", occupied)
                .finish(),
            ValueView::Object(view) => f
                .debug_tuple("Object")
                .field(&view.type_info().name)
                .finish(),
        }
    }
}
