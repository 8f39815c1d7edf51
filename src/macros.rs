//! # Record Macros
//!
//! ## positional!
//!
//! Declares a struct together with its [`Record`](crate::Record) field table.
//! Fields take an optional `#[position = N]` annotation; unannotated fields
//! use their 1-based declaration index.
//!
//! ```rust
//! use slotframe::positional;
//!
//! positional! {
//!     #[derive(Debug, Default, Clone, PartialEq)]
//!     pub struct Address {
//!         #[position = 1]
//!         pub street: String,
//!         #[position = 2]
//!         pub city: String,
//!     }
//! }
//!
//! positional! {
//!     #[derive(Debug, Default, Clone, PartialEq)]
//!     pub struct Person {
//!         pub name: String,
//!         pub address: Address,
//!         pub age: i64,
//!     }
//! }
//!
//! let person = Person {
//!     name: "Ada".into(),
//!     address: Address { street: "1 Main".into(), city: "Springfield".into() },
//!     age: 36,
//! };
//! let bytes = slotframe::encode_record(&person)?;
//! assert_eq!(bytes, b"37\r\n[\"Ada\",[\"1 Main\",\"Springfield\"],36]\r\n");
//! # Ok::<(), slotframe::Error>(())
//! ```
//!
//! ## record_field!
//!
//! Makes a record type usable as a nested field of another record. The
//! `positional!` macro already invokes it; hand-written [`Record`]
//! implementations call it themselves.
//!
//! [`Record`]: crate::Record

/// Implements [`Field`](crate::Field) for record types so they nest.
#[macro_export]
macro_rules! record_field {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Field for $ty {
                fn to_value(&self, depth: usize) -> $crate::Result<$crate::Value> {
                    $crate::encoder::record_to_value(self, depth + 1)
                }

                fn assign(
                    &mut self,
                    field: &'static str,
                    value: &$crate::Value,
                    depth: usize,
                ) -> $crate::Result<bool> {
                    $crate::decoder::assign_record(self, field, value, depth + 1)
                }
            }
        )+
    };
}

/// Declares a struct and derives its positional field table.
#[macro_export]
macro_rules! positional {
    (@annotation $pos:literal) => {
        ::core::option::Option::Some(::core::stringify!($pos))
    };
    (@annotation) => {
        ::core::option::Option::None
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[position = $pos:literal])?
                $fvis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $fvis $field: $ty, )*
        }

        impl $crate::Record for $name {
            fn fields(&self) -> ::std::vec::Vec<$crate::FieldRef<'_>> {
                ::std::vec![
                    $(
                        $crate::FieldRef {
                            name: ::core::stringify!($field),
                            annotation: $crate::positional!(@annotation $($pos)?),
                            value: &self.$field,
                        },
                    )*
                ]
            }

            fn fields_mut(&mut self) -> ::std::vec::Vec<$crate::FieldMut<'_>> {
                ::std::vec![
                    $(
                        $crate::FieldMut {
                            name: ::core::stringify!($field),
                            annotation: $crate::positional!(@annotation $($pos)?),
                            target: &mut self.$field,
                        },
                    )*
                ]
            }
        }

        $crate::record_field!($name);
    };
}
