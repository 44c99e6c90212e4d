//! CBOR marshalling of reflected values.
//!
//! [`Encoder`] walks a value through [`ac_reflect`] and writes it as CBOR,
//! [`Decoder`] restores it. Values behind an [`AnyValue`] keep their
//! concrete type on the wire: they are wrapped in a one-entry map under a
//! type tag, see [`tags`].
//!
//! # Examples
//!
//! ```
//! use ac_cbor::{from_slice, to_vec};
//! use ac_reflect::{AnyValue, Reflect};
//!
//! #[derive(Reflect, Default)]
//! #[reflect(type_path = "demo::Shape")]
//! struct Shape {
//!     #[reflect(rename = "Name")]
//!     name: String,
//!     payload: Vec<Option<AnyValue>>,
//! }
//!
//! let shape = Shape {
//!     name: "box".into(),
//!     payload: vec![Some(AnyValue::new(1_i32)), None, Some(AnyValue::new(2.5_f64))],
//! };
//!
//! let bytes = to_vec(&shape).unwrap();
//! let decoded: Shape = from_slice(&bytes).unwrap();
//!
//! assert_eq!(decoded.name, "box");
//! assert_eq!(decoded.payload[0].as_ref().unwrap().downcast_ref::<i32>(), Some(&1));
//! assert!(decoded.payload[1].is_none());
//! assert!(decoded.payload[2].as_ref().unwrap().is::<f64>());
//! ```
//!
//! [`AnyValue`]: ac_reflect::AnyValue
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod bytes;
mod de;
mod error;
mod reader;
mod ser;
mod writer;

#[cfg(feature = "debug")]
mod info_stack;

pub mod tags;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// Exports

pub use bytes::CborBytes;
pub use de::{Decoder, from_slice, from_slice_with};
pub use error::{Error, ReadError, Result, WriteError};
pub use reader::{CborReader, CborState};
pub use ser::{Encoder, to_vec};
pub use writer::CborWriter;
