use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::hash::Hash;
use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::impls::concat;
use crate::info::{GenericTypeInfoCell, GenericTypePathCell, MapInfo};
use crate::info::{TypeInfo, TypePath, Typed};
use crate::ops::Map;
use crate::registry::{GetTypeMeta, TypeMeta, TypeRegistry};
use crate::{AnyValue, Reflect};

macro_rules! impl_reflect_for_map {
    ($map:ident, $module:literal, [$($key_bound:path),+]) => {
        impl<K: TypePath, V: TypePath> TypePath for $map<K, V> {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    concat(&[
                        $module,
                        "::",
                        stringify!($map),
                        "<",
                        K::type_path(),
                        ", ",
                        V::type_path(),
                        ">",
                    ])
                })
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    concat(&[stringify!($map), "<", K::type_name(), ", ", V::type_name(), ">"])
                })
            }

            #[inline]
            fn type_ident() -> &'static str {
                stringify!($map)
            }

            #[inline]
            fn module_path() -> Option<&'static str> {
                Some($module)
            }
        }

        impl<K, V> Typed for $map<K, V>
        where
            K: Reflect + Typed + Default $(+ $key_bound)+,
            V: Reflect + Typed + Default,
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| TypeInfo::Map(MapInfo::new::<Self, K, V>()))
            }
        }

        impl<K, V> Reflect for $map<K, V>
        where
            K: Reflect + Typed + Default $(+ $key_bound)+,
            V: Reflect + Typed + Default,
        {
            crate::reflection::impl_reflect_cast_fn!(Map);

            #[inline]
            fn reset(&mut self) {
                $map::clear(self);
            }
        }

        impl<K, V> Map for $map<K, V>
        where
            K: Reflect + Typed + Default $(+ $key_bound)+,
            V: Reflect + Typed + Default,
        {
            #[inline]
            fn len(&self) -> usize {
                $map::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_> {
                Box::new(
                    $map::iter(self)
                        .map(|(key, value)| (key as &dyn Reflect, value as &dyn Reflect)),
                )
            }

            #[inline]
            fn clear(&mut self) {
                $map::clear(self);
            }

            #[inline]
            fn new_key(&self) -> Box<dyn Reflect> {
                Box::new(K::default())
            }

            #[inline]
            fn new_value(&self) -> Box<dyn Reflect> {
                Box::new(V::default())
            }

            fn insert_boxed(
                &mut self,
                key: Box<dyn Reflect>,
                value: Box<dyn Reflect>,
            ) -> Result<(), Box<dyn Reflect>> {
                let key = key.take::<K>()?;
                let value = value.take::<V>()?;
                $map::insert(self, key, value);
                Ok(())
            }
        }

        impl<K, V> GetTypeMeta for $map<K, V>
        where
            K: GetTypeMeta + Reflect + Default $(+ $key_bound)+,
            V: GetTypeMeta + Reflect + Default,
        {
            fn get_type_meta() -> TypeMeta {
                TypeMeta::with_default::<Self>()
            }

            fn register_dependencies(registry: &mut TypeRegistry) {
                registry.register::<K>();
                registry.register::<V>();
            }
        }
    };
}

impl_reflect_for_map!(HashMap, "std::collections", [Eq, Hash]);
impl_reflect_for_map!(BTreeMap, "alloc::collections", [Ord]);

macro_rules! register_maps {
    ($registry:ident; keys: [$($key:ty),*]; values: [$($value:ty),*]) => {
        $(
            $registry.register::<HashMap<$key, AnyValue>>();
            $registry.register::<HashMap<$key, Option<AnyValue>>>();
            $registry.register::<BTreeMap<$key, AnyValue>>();
            $registry.register::<BTreeMap<$key, Option<AnyValue>>>();
        )*
        $(
            $registry.register::<HashMap<String, $value>>();
            $registry.register::<BTreeMap<String, $value>>();
        )*
    };
}

/// Registers the maps a registry knows without being told.
///
/// - every hashable scalar key with `AnyValue` or `Option<AnyValue>` values;
/// - `String` keys with every scalar value;
/// - `AnyValue` keys with `AnyValue` or `Option<AnyValue>` values (`HashMap` only).
pub(crate) fn register_builtin_maps(registry: &mut TypeRegistry) {
    register_maps!(registry;
        keys: [
            i8, i16, i32, i64, u8, u16, u32, u64, bool, char, String,
            Decimal, NaiveDateTime, TimeDelta, Uuid, DateTime<FixedOffset>
        ];
        values: [
            i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, bool, char, String,
            Decimal, NaiveDateTime, TimeDelta, Uuid, DateTime<FixedOffset>
        ]
    );
    registry.register::<HashMap<AnyValue, AnyValue>>();
    registry.register::<HashMap<AnyValue, Option<AnyValue>>>();
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use core::any::TypeId;

    #[test]
    fn map_paths() {
        assert_eq!(
            <HashMap<String, i32> as TypePath>::type_path(),
            "std::collections::HashMap<alloc::string::String, i32>",
        );
        assert_eq!(<BTreeMap<u8, bool> as TypePath>::type_name(), "BTreeMap<u8, bool>");
    }

    #[test]
    fn insert_boxed_checks_types() {
        let mut map: BTreeMap<u8, bool> = BTreeMap::new();
        let ops = map.reflect_mut().as_map().unwrap();

        ops.insert_boxed(Box::new(2_u8), Box::new(true)).unwrap();
        ops.insert_boxed(Box::new(1_u8), Box::new(false)).unwrap();
        assert!(ops.insert_boxed(Box::new(1_i8), Box::new(false)).is_err());

        let keys: Vec<u8> = ops
            .iter()
            .map(|(key, _)| *key.downcast_ref::<u8>().unwrap())
            .collect();
        assert_eq!(keys, [1, 2]);
    }

    #[test]
    fn builtin_maps() {
        let mut registry = TypeRegistry::empty();
        register_builtin_maps(&mut registry);

        assert!(registry.contains(TypeId::of::<HashMap<i32, AnyValue>>()));
        assert!(registry.contains(TypeId::of::<BTreeMap<Uuid, Option<AnyValue>>>()));
        assert!(registry.contains(TypeId::of::<HashMap<String, f64>>()));
        assert!(registry.contains(TypeId::of::<HashMap<AnyValue, Option<AnyValue>>>()));
        assert!(registry.contains_crate("std"));

        let meta = registry
            .get_with_type_path("std::collections::HashMap<i64, ac_reflect::AnyValue>")
            .unwrap();
        assert!(meta.construct().unwrap().is::<HashMap<i64, AnyValue>>());
    }
}
