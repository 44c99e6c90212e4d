//! Static storage of type information.
//!
//! A `static` declared inside a generic function is shared by every
//! instantiation, so generic types key their storage by [`TypeId`].

use alloc::boxed::Box;
use alloc::string::String;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use ac_utils::TypeIdMap;

use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// NonGenericTypeInfoCell

/// Storage of the [`TypeInfo`] of a non-generic type.
///
/// ```ignore
/// impl Typed for Foo {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Struct(StructInfo::new::<Self>(&[
///             NamedField::new::<u32>("a"),
///         ])))
///     }
/// }
/// ```
pub struct NonGenericTypeInfoCell(OnceLock<TypeInfo>);

impl NonGenericTypeInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> TypeInfo) -> &TypeInfo {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericTypeCell

mod sealed {
    use alloc::string::String;

    pub trait TypedProperty: Send + Sync + 'static {}

    impl TypedProperty for String {}
    impl TypedProperty for crate::info::TypeInfo {}
}

/// Storage of per-instantiation data of a generic type.
///
/// Values are leaked on first insertion, so returned references are
/// `'static` whenever the cell is.
pub struct GenericTypeCell<T: sealed::TypedProperty>(RwLock<TypeIdMap<&'static T>>);

/// Storage of the [`TypeInfo`] of a generic type.
pub type GenericTypeInfoCell = GenericTypeCell<TypeInfo>;

/// Storage of the type path of a generic type.
///
/// ```ignore
/// impl<T: TypePath> TypePath for Option<T> {
///     fn type_path() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| concat(&["core::option::Option<", T::type_path(), ">"]))
///     }
///     // ...
/// }
/// ```
pub type GenericTypePathCell = GenericTypeCell<String>;

impl<T: sealed::TypedProperty> GenericTypeCell<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the value stored for `G`, creating it with `f` first if absent.
    ///
    /// `f` runs without holding the lock, so it may access other cells.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> T) -> &T {
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(&self, type_id: TypeId, f: impl FnOnce() -> T) -> &T {
        match self.get_by_type_id(type_id) {
            Some(value) => value,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    fn get_by_type_id(&self, type_id: TypeId) -> Option<&T> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    fn insert_by_type_id(&self, type_id: TypeId, value: T) -> &T {
        let mut map = self.0.write().unwrap_or_else(PoisonError::into_inner);
        let leaked: &'static T = *map.get_or_insert(type_id, || Box::leak(Box::new(value)));
        leaked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_cell_per_type() {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();

        let a: &'static String = CELL.get_or_insert::<u8>(|| String::from("u8"));
        let b = CELL.get_or_insert::<u16>(|| String::from("u16"));
        let c = CELL.get_or_insert::<u8>(|| String::from("unused"));

        assert_eq!(a, "u8");
        assert_eq!(b, "u16");
        assert!(core::ptr::eq(a, c));
    }
}
