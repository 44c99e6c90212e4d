//! Reflection for the `anycbor` marshaller.
//!
//! The marshaller walks values without knowing their static types, so every
//! serializable type describes itself through a closed set of shapes:
//!
//! | shape | [`TypeInfo`] | [`ReflectRef`] | Rust types |
//! |---|---|---|---|
//! | any | `Any` | `Any` | [`AnyValue`] |
//! | scalar | `Scalar` | `Scalar` | integers, floats, `bool`, `char`, `String`, decimals, date-times, time deltas, uuids, ip addresses |
//! | nullable | `Nullable` | `Nullable` | `Option<T>` |
//! | array | `Array` | `Array` | `Box<[T]>` |
//! | list | `List` | `List` | `Vec<T>` |
//! | map | `Map` | `Map` | `HashMap<K, V>`, `BTreeMap<K, V>` |
//! | object | `Struct` | `Struct` | `#[derive(Reflect)]` structs |
//! | opaque | `Opaque` | `Opaque` | `#[reflect(opaque)]` types |
//!
//! Types that may be created by name at runtime are kept in a
//! [`TypeRegistry`](registry::TypeRegistry).
//!
//! # Examples
//!
//! ```
//! use ac_reflect::{Reflect, info::Typed, ops::ReflectRef};
//!
//! #[derive(Reflect, Default)]
//! struct Player {
//!     #[reflect(rename = "Name")]
//!     name: String,
//!     level: i32,
//! }
//!
//! let info = Player::type_info().as_struct().unwrap();
//! assert_eq!(info.field_at(0).unwrap().name(), "Name");
//!
//! let player = Player { name: "Ann".into(), level: 3 };
//! let ReflectRef::Struct(s) = player.reflect_ref() else { unreachable!() };
//! assert_eq!(s.field("level").unwrap().downcast_ref::<i32>(), Some(&3));
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

// Allow `::ac_reflect` paths emitted by the derive inside this crate.
extern crate self as ac_reflect;

// -----------------------------------------------------------------------------
// Modules

mod any_value;
mod impls;
mod reflection;

pub mod info;
pub mod ops;
pub mod registry;

#[doc(hidden)]
pub mod __macro_exports;

// -----------------------------------------------------------------------------
// Exports

pub use ac_reflect_derive::Reflect;
pub use any_value::AnyValue;
pub use impls::concat;
pub use reflection::Reflect;

/// Foreign scalar types, re-exported so users name the same versions.
pub mod scalar_types {
    pub use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta};
    pub use rust_decimal::Decimal;
    pub use uuid::Uuid;
}
