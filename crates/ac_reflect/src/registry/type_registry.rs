use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::TypeId;
use core::net::IpAddr;
use std::sync::OnceLock;

use ac_utils::TypeIdMap;
use ac_utils::hash::{FixedHashState, HashMap, HashSet};
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::impls::register_builtin_maps;
use crate::info::TypeInfo;
use crate::{AnyValue, Reflect};
use crate::registry::{GetTypeMeta, TypeMeta, TypeTrait};

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of reflected types.
///
/// Types are found by [`TypeId`] or by [type path]. The registry also
/// remembers the crate of every registered type, so a failed lookup can
/// tell an unknown crate from an unknown type.
///
/// # Example
///
/// ```
/// use ac_reflect::{Reflect, registry::TypeRegistry};
///
/// #[derive(Reflect, Default)]
/// struct Empty;
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Empty>();
///
/// let meta = registry.get_with_type_path(<Empty as ac_reflect::info::TypePath>::type_path()).unwrap();
/// assert!(meta.construct().unwrap().is::<Empty>());
///
/// assert!(registry.contains_crate("uuid"));
/// assert!(!registry.contains_crate("missing"));
/// ```
///
/// [type path]: crate::info::TypePath::type_path
pub struct TypeRegistry {
    type_meta_table: TypeIdMap<TypeMeta>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    crate_names: HashSet<&'static str>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! register_with_shapes {
    ($registry:ident; $($ty:ty),* $(,)?) => {
        $(
            $registry.register::<$ty>();
            $registry.register_shapes::<$ty>();
        )*
    };
}

impl TypeRegistry {
    /// Creates an empty [`TypeRegistry`].
    #[inline]
    pub const fn empty() -> Self {
        Self {
            type_meta_table: TypeIdMap::new(),
            type_path_to_id: HashMap::with_hasher(FixedHashState),
            crate_names: HashSet::with_hasher(FixedHashState),
        }
    }

    /// Creates a registry holding the built-in types.
    ///
    /// - every scalar type `T`, with `Option<T>`, `Box<[T]>` and `Vec<T>`
    ///   (`IpAddr` only as a scalar);
    /// - [`AnyValue`] in the same four shapes, plus sequences of
    ///   `Option<AnyValue>`;
    /// - `HashMap` and `BTreeMap` of scalar keys with `AnyValue` values,
    ///   of `String` keys with scalar values and of `AnyValue` keys.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        register_with_shapes!(registry;
            i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, bool, char, String,
            Decimal, NaiveDateTime, TimeDelta, Uuid, DateTime<FixedOffset>, AnyValue,
        );
        registry.register::<IpAddr>();
        registry.register::<Box<[Option<AnyValue>]>>();
        registry.register::<Vec<Option<AnyValue>>>();
        register_builtin_maps(&mut registry);
        registry
    }

    /// Returns the process wide registry.
    ///
    /// Built once from [`TypeRegistry::new`] plus [`TypeRegistry::auto_register`],
    /// it cannot be modified afterwards.
    pub fn global() -> &'static TypeRegistry {
        static GLOBAL: OnceLock<TypeRegistry> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            let mut registry = Self::new();
            registry.auto_register();
            registry
        })
    }

    // The type must not exist yet.
    fn add_new_type_indices(
        type_meta: &TypeMeta,
        type_path_to_id: &mut HashMap<&'static str, TypeId>,
        crate_names: &mut HashSet<&'static str>,
    ) {
        let ty = type_meta.ty();
        type_path_to_id.insert(ty.path(), ty.id());
        if let Some(crate_name) = ty.crate_name() {
            crate_names.insert(crate_name);
        }
    }

    fn register_internal(
        &mut self,
        type_id: TypeId,
        get_type_meta: impl FnOnce() -> TypeMeta,
    ) -> bool {
        self.type_meta_table.try_insert(type_id, || {
            let meta = get_type_meta();
            Self::add_new_type_indices(&meta, &mut self.type_path_to_id, &mut self.crate_names);
            meta
        })
    }

    /// Registers `T` and its dependencies, unless `T` is already registered.
    ///
    /// # Example
    ///
    /// ```
    /// # use core::any::TypeId;
    /// # use ac_reflect::registry::TypeRegistry;
    /// let mut registry = TypeRegistry::empty();
    /// registry.register::<Option<Vec<u16>>>();
    ///
    /// assert!(registry.contains(TypeId::of::<Vec<u16>>()));
    /// assert!(registry.contains(TypeId::of::<u16>()));
    /// assert_eq!(registry.len(), 3);
    /// ```
    pub fn register<T: GetTypeMeta>(&mut self) {
        if self.register_internal(TypeId::of::<T>(), T::get_type_meta) {
            T::register_dependencies(self);
        }
    }

    /// Registers `Option<T>`, `Box<[T]>` and `Vec<T>`, the shapes a `T`
    /// may take behind an [`AnyValue`].
    ///
    /// `#[derive(Reflect)]` registers them along with the type.
    ///
    /// # Example
    ///
    /// ```
    /// # use core::any::TypeId;
    /// # use ac_reflect::registry::TypeRegistry;
    /// let mut registry = TypeRegistry::empty();
    /// registry.register_shapes::<u16>();
    ///
    /// assert!(registry.contains(TypeId::of::<Box<[u16]>>()));
    /// assert_eq!(registry.len(), 4);
    /// ```
    pub fn register_shapes<T: GetTypeMeta + Reflect + Default>(&mut self) {
        self.register::<Option<T>>();
        self.register::<Box<[T]>>();
        self.register::<Vec<T>>();
    }

    /// Registers all types submitted by `#[reflect(auto_register)]`.
    ///
    /// Returns the number of submissions visited. Always `0` without the
    /// `auto_register` feature.
    pub fn auto_register(&mut self) -> usize {
        #[cfg(feature = "auto_register")]
        {
            let before = self.len();
            let visited = crate::__macro_exports::auto_register::register_types(self);
            log::debug!(
                "auto registered {} types from {visited} submissions",
                self.len() - before,
            );
            visited
        }
        #[cfg(not(feature = "auto_register"))]
        {
            0
        }
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.type_meta_table.contains(&type_id)
    }

    /// Returns `true` if a registered type comes from the crate `name`.
    #[inline]
    pub fn contains_crate(&self, name: &str) -> bool {
        self.crate_names.contains(name)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeMeta> {
        self.type_meta_table.get(&type_id)
    }

    /// Returns the [`TypeMeta`] of the type with the given [type path].
    ///
    /// [type path]: crate::info::TypePath::type_path
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&TypeMeta> {
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    pub fn get_type_trait<T: TypeTrait>(&self, type_id: TypeId) -> Option<&T> {
        match self.get(type_id) {
            Some(type_meta) => type_meta.get_trait::<T>(),
            None => None,
        }
    }

    pub fn get_type_info(&self, type_id: TypeId) -> Option<&'static TypeInfo> {
        self.get(type_id).map(TypeMeta::type_info)
    }

    /// Iterates the registered [`TypeMeta`]s in arbitrary order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeMeta> {
        self.type_meta_table.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.type_meta_table.len()
    }
}

impl core::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.type_path_to_id.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TypeTraitDefault;

    #[test]
    fn builtin_types() {
        let registry = TypeRegistry::new();

        for ty in [
            TypeId::of::<i16>(),
            TypeId::of::<Option<Decimal>>(),
            TypeId::of::<Box<[Uuid]>>(),
            TypeId::of::<Vec<Option<AnyValue>>>(),
            TypeId::of::<IpAddr>(),
        ] {
            assert!(registry.contains(ty));
        }

        assert!(registry.contains_crate("chrono"));
        assert!(registry.contains_crate("core"));
        assert!(registry.contains_crate("ac_reflect"));
        assert!(registry.contains_crate("std"));
    }

    #[test]
    fn lookup_by_path() {
        let registry = TypeRegistry::new();
        let meta = registry
            .get_with_type_path("core::option::Option<chrono::TimeDelta>")
            .unwrap();

        assert!(meta.type_info().as_nullable().is_some());
        assert!(
            registry
                .get_type_trait::<TypeTraitDefault>(meta.type_id())
                .is_some()
        );
        assert!(registry.get_with_type_path("chrono::Missing").is_none());
    }

    #[test]
    fn global_is_shared() {
        assert!(core::ptr::eq(TypeRegistry::global(), TypeRegistry::global()));
        assert!(TypeRegistry::global().contains(TypeId::of::<AnyValue>()));
    }
}
