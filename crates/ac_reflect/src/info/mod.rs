//! Static type information.
//!
//! - [`TypePath`]: stable names of a type.
//! - [`Typed`]: access to the `'static` [`TypeInfo`] of a type.
//! - [`TypeInfo`]: the shape of a type, one variant per reflect kind.
//! - cells: static storage used to implement [`Typed`] and [`TypePath`].

// -----------------------------------------------------------------------------
// Auxiliary macro

macro_rules! impl_type_fn {
    ($field:ident) => {
        /// Returns the underlying [`Type`](crate::info::Type).
        #[inline]
        pub const fn ty(&self) -> &crate::info::Type {
            &self.$field
        }

        #[inline]
        pub fn type_id(&self) -> ::core::any::TypeId {
            self.$field.id()
        }

        #[inline]
        pub fn type_path(&self) -> &'static str {
            self.$field.path()
        }

        #[inline]
        pub fn type_name(&self) -> &'static str {
            self.$field.name()
        }

        /// Returns `true` if the described type is `T`.
        #[inline]
        pub fn type_is<T: ::core::any::Any>(&self) -> bool {
            self.$field.is::<T>()
        }
    };
}

pub(crate) use impl_type_fn;

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod container_info;
mod scalar_info;
mod simple_info;
mod struct_info;
mod type_info;
mod type_path;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, GenericTypePathCell, NonGenericTypeInfoCell};
pub use container_info::{ArrayInfo, ListInfo, MapInfo, NullableInfo};
pub use scalar_info::{ScalarInfo, ScalarKind};
pub use simple_info::{AnyInfo, OpaqueInfo};
pub use struct_info::{NamedField, StructInfo};
pub use type_info::{ReflectKind, Type, TypeInfo};
pub use type_path::{DynamicTypePath, TypePath};
pub use typed::{DynamicTyped, Typed};
