use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::Reflect;
use crate::impls::concat;
use crate::info::{ArrayInfo, GenericTypeInfoCell, GenericTypePathCell, ListInfo};
use crate::info::{TypeInfo, TypePath, Typed};
use crate::ops::{Array, List};
use crate::registry::{GetTypeMeta, TypeMeta, TypeRegistry};

// Trait methods share names with the slice methods, so the slice methods
// are called with full paths.

// -----------------------------------------------------------------------------
// Box<[T]>

impl<T: TypePath> TypePath for Box<[T]> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["alloc::boxed::Box<[", T::type_path(), "]>"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Box<[", T::type_name(), "]>"]))
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Box"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("alloc::boxed")
    }
}

impl<T: Reflect + Typed + Default> Typed for Box<[T]> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Array(ArrayInfo::new::<Self, T>()))
    }
}

impl<T: Reflect + Typed + Default> Reflect for Box<[T]> {
    crate::reflection::impl_reflect_cast_fn!(Array);

    #[inline]
    fn reset(&mut self) {
        *self = Box::default();
    }
}

impl<T: Reflect + Typed + Default> Array for Box<[T]> {
    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(|item| item as &dyn Reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        <[T]>::get_mut(self, index).map(|item| item as &mut dyn Reflect)
    }

    fn resize_default(&mut self, len: usize) {
        *self = (0..len).map(|_| T::default()).collect();
    }
}

impl<T: GetTypeMeta + Reflect + Default> GetTypeMeta for Box<[T]> {
    fn get_type_meta() -> TypeMeta {
        TypeMeta::with_default::<Self>()
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

// -----------------------------------------------------------------------------
// Vec<T>

impl<T: TypePath> TypePath for Vec<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["alloc::vec::Vec<", T::type_path(), ">"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Vec<", T::type_name(), ">"]))
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Vec"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("alloc::vec")
    }
}

impl<T: Reflect + Typed + Default> Typed for Vec<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::List(ListInfo::new::<Self, T>()))
    }
}

impl<T: Reflect + Typed + Default> Reflect for Vec<T> {
    crate::reflection::impl_reflect_cast_fn!(List);

    #[inline]
    fn reset(&mut self) {
        Vec::clear(self);
    }
}

impl<T: Reflect + Typed + Default> List for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(|item| item as &dyn Reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        <[T]>::get_mut(self, index).map(|item| item as &mut dyn Reflect)
    }

    fn push_default(&mut self) -> &mut dyn Reflect {
        let index = Vec::len(self);
        Vec::push(self, T::default());
        &mut self[index]
    }

    #[inline]
    fn clear(&mut self) {
        Vec::clear(self);
    }
}

impl<T: GetTypeMeta + Reflect + Default> GetTypeMeta for Vec<T> {
    fn get_type_meta() -> TypeMeta {
        TypeMeta::with_default::<Self>()
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn array_resize() {
        let mut array: Box<[i64]> = Box::new([9, 9]);
        let ops = array.reflect_mut().as_array().unwrap();

        ops.resize_default(3);
        *ops.get_mut(2).unwrap().downcast_mut::<i64>().unwrap() = 1;

        assert_eq!(&*array, &[0, 0, 1]);
    }

    #[test]
    fn list_reset() {
        let mut list = vec![1_u32, 2];
        list.reset();
        assert!(list.is_empty());
        assert_eq!(<Vec<u32> as TypePath>::type_path(), "alloc::vec::Vec<u32>");
    }
}
