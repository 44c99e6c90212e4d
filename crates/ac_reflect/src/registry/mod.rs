//! Runtime registry of reflected types.
//!
//! - [`TypeTrait`]: a capability attached to a registered type.
//! - [`FromType`]: creates a [`TypeTrait`] for a concrete type.
//! - [`TypeTraitDefault`]: constructs a boxed default instance.
//! - [`TypeMeta`]: the [`TypeInfo`] and the trait table of one type.
//! - [`GetTypeMeta`]: produces the [`TypeMeta`] of a type.
//! - [`TypeRegistry`]: type metas by [`TypeId`] and by type path.
//!
//! The decoder uses the registry to create the value behind a fallback
//! type key, and to tell an unknown crate from an unknown type.
//!
//! ## auto_register
//!
//! With the `auto_register` feature, types marked
//! `#[reflect(auto_register)]` are collected with the [`inventory`] crate
//! and added by [`TypeRegistry::auto_register`]. [`TypeRegistry::global`]
//! calls it once.
//!
//! [`TypeInfo`]: crate::info::TypeInfo
//! [`TypeId`]: core::any::TypeId
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod default;
mod from_type;
mod type_meta;
mod type_registry;
mod type_trait;

// -----------------------------------------------------------------------------
// Exports

pub use default::TypeTraitDefault;
pub use from_type::FromType;
pub use type_meta::{GetTypeMeta, TypeMeta};
pub use type_registry::TypeRegistry;
pub use type_trait::TypeTrait;
