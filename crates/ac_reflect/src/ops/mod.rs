//! Shape specific access to reflected values.
//!
//! [`Reflect::reflect_ref`] and [`Reflect::reflect_mut`] return one of the
//! following traits, matching the [`TypeInfo`] of the value:
//!
//! - [`Scalar`]: integers, floats, text and the other leaf values.
//! - [`Nullable`]: `Option<T>`.
//! - [`Array`]: fixed length sequences, `Box<[T]>`.
//! - [`List`]: growable sequences, `Vec<T>`.
//! - [`Map`]: key/value maps.
//! - [`Struct`]: structs with named fields.
//!
//! The mutable methods are shaped for in-place decoding: containers grow
//! default elements which are then filled by the caller.
//!
//! [`Reflect::reflect_ref`]: crate::Reflect::reflect_ref
//! [`Reflect::reflect_mut`]: crate::Reflect::reflect_mut
//! [`TypeInfo`]: crate::info::TypeInfo

// -----------------------------------------------------------------------------
// Modules

mod kind;
mod map;
mod nullable;
mod scalar;
mod sequence;
mod structs;

// -----------------------------------------------------------------------------
// Exports

pub use kind::{ReflectMut, ReflectRef};
pub use map::Map;
pub use nullable::Nullable;
pub use scalar::{Scalar, ScalarRef, ScalarValue};
pub use sequence::{Array, List};
pub use structs::Struct;
