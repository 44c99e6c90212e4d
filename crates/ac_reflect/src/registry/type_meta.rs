use alloc::boxed::Box;
use core::any::TypeId;
use core::fmt;
use core::ops::Deref;

use ac_utils::TypeIdMap;

use crate::Reflect;
use crate::info::{Type, TypeInfo, Typed};
use crate::registry::{FromType, TypeRegistry, TypeTrait, TypeTraitDefault};

// -----------------------------------------------------------------------------
// TypeMeta

/// The registry entry of one type: its [`TypeInfo`] and a [`TypeTrait`] table.
///
/// Usually produced by [`GetTypeMeta`], which `#[derive(Reflect)]` implements.
///
/// # Example
///
/// ```
/// # use ac_reflect::registry::{TypeMeta, TypeTraitDefault};
/// let meta = TypeMeta::with_default::<Vec<u8>>();
///
/// assert!(meta.has_trait::<TypeTraitDefault>());
/// assert_eq!(meta.type_path(), "alloc::vec::Vec<u8>");
///
/// let value = meta.construct().unwrap();
/// assert!(value.is::<Vec<u8>>());
/// ```
pub struct TypeMeta {
    ty: &'static Type,
    type_info: &'static TypeInfo,
    trait_table: TypeIdMap<Box<dyn TypeTrait>>,
}

impl TypeMeta {
    /// Creates a [`TypeMeta`] without type traits.
    #[inline]
    pub fn of<T: Typed>() -> Self {
        let type_info = T::type_info();
        Self {
            ty: type_info.ty(),
            type_info,
            trait_table: TypeIdMap::new(),
        }
    }

    /// Creates a [`TypeMeta`] holding a [`TypeTraitDefault`].
    pub fn with_default<T: Typed + Reflect + Default>() -> Self {
        let mut meta = Self::of::<T>();
        meta.insert_trait::<TypeTraitDefault>(FromType::<T>::from_type());
        meta
    }

    #[inline(always)]
    pub const fn type_info(&self) -> &'static TypeInfo {
        self.type_info
    }

    #[inline(always)]
    pub const fn ty(&self) -> &'static Type {
        self.ty
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.ty.id()
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    /// Inserts a [`TypeTrait`], replacing one of the same type.
    pub fn insert_trait<T: TypeTrait>(&mut self, type_trait: T) {
        self.trait_table.insert(TypeId::of::<T>(), Box::new(type_trait));
    }

    #[inline]
    pub fn get_trait<T: TypeTrait>(&self) -> Option<&T> {
        self.trait_table
            .get(&TypeId::of::<T>())
            .map(Deref::deref)
            .and_then(<dyn TypeTrait>::downcast_ref)
    }

    #[inline]
    pub fn has_trait<T: TypeTrait>(&self) -> bool {
        self.trait_table.contains(&TypeId::of::<T>())
    }

    #[inline]
    pub fn trait_len(&self) -> usize {
        self.trait_table.len()
    }

    /// Creates a default instance through [`TypeTraitDefault`].
    ///
    /// Returns `None` if the type was registered without one.
    #[inline]
    pub fn construct(&self) -> Option<Box<dyn Reflect>> {
        self.get_trait::<TypeTraitDefault>().map(TypeTraitDefault::default)
    }
}

impl Clone for TypeMeta {
    fn clone(&self) -> Self {
        let mut copy = Self {
            ty: self.ty,
            type_info: self.type_info,
            trait_table: TypeIdMap::new(),
        };
        for (id, type_trait) in self.trait_table.iter() {
            copy.trait_table.insert(id, (**type_trait).clone_type_trait());
        }
        copy
    }
}

impl fmt::Debug for TypeMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeMeta")
            .field("type_path", &self.type_path())
            .field("kind", &self.type_info.kind())
            .field("trait_len", &self.trait_len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// GetTypeMeta

/// Produces the [`TypeMeta`] of a type for the [`TypeRegistry`].
///
/// Implemented by `#[derive(Reflect)]`, which also registers the field
/// types as dependencies.
///
/// ```
/// use ac_reflect::{Reflect, registry::{GetTypeMeta, TypeRegistry}};
///
/// #[derive(Reflect, Default)]
/// struct Tagged {
///     labels: Vec<String>,
/// }
///
/// let mut registry = TypeRegistry::empty();
/// registry.register::<Tagged>();
///
/// assert!(registry.contains(core::any::TypeId::of::<Vec<String>>()));
/// assert!(Tagged::get_type_meta().construct().is_some());
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `GetTypeMeta` so cannot be registered",
    note = "consider annotating `{Self}` with `#[derive(Reflect)]`"
)]
pub trait GetTypeMeta: Typed {
    fn get_type_meta() -> TypeMeta;

    /// Registers the types this type is made of.
    fn register_dependencies(_registry: &mut TypeRegistry) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug)]
    struct Label(&'static str);

    #[test]
    fn clone_keeps_traits() {
        let mut meta = TypeMeta::with_default::<u32>();
        meta.insert_trait(Label("count"));

        let copy = meta.clone();
        drop(meta);

        assert_eq!(copy.trait_len(), 2);
        assert_eq!(copy.get_trait::<Label>(), Some(&Label("count")));
        assert!(copy.construct().unwrap().is::<u32>());
    }
}
