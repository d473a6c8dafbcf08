//! Declarative registration of structural types
//!
//! [`structural!`](crate::structural) declares a struct and derives its
//! [`Reflect`](crate::Reflect) and [`StructuralView`](crate::StructuralView)
//! implementations in one place, so the field descriptors the validator
//! walks can never drift from the struct definition.
//!
//! Per-field markers:
//! - `@rebindable` records that the binding is reassignable after
//!   construction; validation of such a field always fails.
//! - `@trusted` opts the field out of validation entirely. The field's
//!   type needs no [`Reflect`](crate::Reflect) implementation and is never
//!   read.
//!
//! A `@trusted` marker before the struct keyword marks the whole type
//! assumed-immutable: it participates as a field type or element but its
//! own interior is never inspected.

/// Declare a struct together with its structural registration.
///
/// ```
/// use permafrost::{structural, FrozenSeq};
///
/// structural! {
///     /// An immutable audit record.
///     pub struct AuditRecord {
///         pub actor: String,
///         pub tags: FrozenSeq<String>,
///     }
/// }
///
/// let record = AuditRecord {
///     actor: "root".to_string(),
///     tags: FrozenSeq::new(vec!["login".to_string()]),
/// };
/// assert!(permafrost::validate(&record).is_ok());
/// ```
#[macro_export]
macro_rules! structural {
    (
        $(#[$meta:meta])*
        @trusted $vis:vis struct $name:ident {
            $( $(#[$fmeta:meta])* $fvis:vis $fname:ident : $fty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $(#[$fmeta])* $fvis $fname : $fty, )*
        }

        impl $crate::Reflect for $name {
            fn type_info() -> $crate::TypeInfo {
                $crate::TypeInfo::of::<$name>($crate::TypeShape::Other).trusted()
            }

            fn reflect(&self) -> $crate::ValueView<'_> {
                $crate::ValueView::Object(self)
            }
        }

        impl $crate::StructuralView for $name {
            fn type_info(&self) -> $crate::TypeInfo {
                <$name as $crate::Reflect>::type_info()
            }

            // The whole type is assumed immutable; nothing is exposed for
            // inspection.
            fn fields(&self) -> ::std::vec::Vec<$crate::FieldDescriptor> {
                ::std::vec::Vec::new()
            }

            fn read(
                &self,
                field: &str,
            ) -> ::core::result::Result<$crate::ValueView<'_>, $crate::FieldAccessError> {
                ::core::result::Result::Err($crate::FieldAccessError::UnknownField {
                    field: ::std::string::String::from(field),
                })
            }
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$fmeta:meta])* $(@ $flag:ident)? $fvis:vis $fname:ident : $fty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $(#[$fmeta])* $fvis $fname : $fty, )*
        }

        impl $crate::Reflect for $name {
            fn type_info() -> $crate::TypeInfo {
                $crate::TypeInfo::of::<$name>($crate::TypeShape::Other)
            }

            fn reflect(&self) -> $crate::ValueView<'_> {
                $crate::ValueView::Object(self)
            }
        }

        impl $crate::StructuralView for $name {
            fn type_info(&self) -> $crate::TypeInfo {
                <$name as $crate::Reflect>::type_info()
            }

            fn fields(&self) -> ::std::vec::Vec<$crate::FieldDescriptor> {
                ::std::vec![
                    $(
                        $crate::FieldDescriptor {
                            name: ::core::stringify!($fname),
                            declared: $crate::__structural_declared!($($flag)?, $fty),
                            binding_mutable: $crate::__structural_rebindable!($($flag)?),
                            opt_out: $crate::__structural_opt_out!($($flag)?),
                        }
                    ),*
                ]
            }

            fn read(
                &self,
                field: &str,
            ) -> ::core::result::Result<$crate::ValueView<'_>, $crate::FieldAccessError> {
                match field {
                    $(
                        ::core::stringify!($fname) => {
                            $crate::__structural_read_arm!($($flag)?, $fname, &self.$fname)
                        }
                    )*
                    other => ::core::result::Result::Err($crate::FieldAccessError::UnknownField {
                        field: ::std::string::String::from(other),
                    }),
                }
            }
        }
    };
}

/// Declared-type descriptor for a field, honoring a `@trusted` marker.
#[doc(hidden)]
#[macro_export]
macro_rules! __structural_declared {
    (trusted, $fty:ty) => {
        $crate::TypeInfo::untracked(::core::stringify!($fty)).trusted()
    };
    ($($flag:ident)?, $fty:ty) => {
        <$fty as $crate::Reflect>::type_info()
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __structural_rebindable {
    (rebindable) => {
        true
    };
    ($($flag:ident)?) => {
        false
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __structural_opt_out {
    (trusted) => {
        true
    };
    ($($flag:ident)?) => {
        false
    };
}

/// Read arm for a field. Trusted fields have no accessor at all, so an
/// out-of-order read surfaces as `Unreadable` rather than a stale view.
#[doc(hidden)]
#[macro_export]
macro_rules! __structural_read_arm {
    (trusted, $fname:ident, $value:expr) => {
        ::core::result::Result::Err($crate::FieldAccessError::Unreadable {
            field: ::std::string::String::from(::core::stringify!($fname)),
            detail: ::std::string::String::from("trusted field has no accessor"),
        })
    };
    ($($flag:ident)?, $fname:ident, $value:expr) => {
        ::core::result::Result::Ok($crate::Reflect::reflect($value))
    };
}
