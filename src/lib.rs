#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use ac_cbor as cbor;
pub use ac_reflect as reflect;
pub use ac_utils as utils;

pub use ac_cbor::{CborBytes, Decoder, Encoder, Error, Result, from_slice, from_slice_with, to_vec};
pub use ac_reflect::{AnyValue, Reflect};
