use core::any::TypeId;

use crate::info::{Type, TypeInfo, TypePath, Typed};

// `TypeInfo` of items is created on first access, function pointers delay it.

// -----------------------------------------------------------------------------
// NullableInfo

/// Type info of `Option<T>`.
#[derive(Clone, Debug)]
pub struct NullableInfo {
    ty: Type,
    inner_id: TypeId,
    inner_info: fn() -> &'static TypeInfo,
}

impl NullableInfo {
    crate::info::impl_type_fn!(ty);

    #[inline]
    pub fn new<TNullable: TypePath, TInner: Typed>() -> Self {
        Self {
            ty: Type::of::<TNullable>(),
            inner_id: TypeId::of::<TInner>(),
            inner_info: TInner::type_info,
        }
    }

    #[inline]
    pub const fn inner_id(&self) -> TypeId {
        self.inner_id
    }

    #[inline]
    pub fn inner_info(&self) -> &'static TypeInfo {
        (self.inner_info)()
    }
}

// -----------------------------------------------------------------------------
// ArrayInfo

/// Type info of a fixed length sequence (`Box<[T]>`).
///
/// # Examples
///
/// ```
/// use ac_reflect::info::Typed;
///
/// let info = <Box<[u8]> as Typed>::type_info().as_array().unwrap();
/// assert!(info.item_info().type_is::<u8>());
/// assert_eq!(info.type_path(), "alloc::boxed::Box<[u8]>");
/// ```
#[derive(Clone, Debug)]
pub struct ArrayInfo {
    ty: Type,
    item_info: fn() -> &'static TypeInfo,
}

impl ArrayInfo {
    crate::info::impl_type_fn!(ty);

    #[inline]
    pub fn new<TArray: TypePath, TItem: Typed>() -> Self {
        Self {
            ty: Type::of::<TArray>(),
            item_info: TItem::type_info,
        }
    }

    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }
}

// -----------------------------------------------------------------------------
// ListInfo

/// Type info of a growable sequence (`Vec<T>`).
#[derive(Clone, Debug)]
pub struct ListInfo {
    ty: Type,
    item_info: fn() -> &'static TypeInfo,
}

impl ListInfo {
    crate::info::impl_type_fn!(ty);

    #[inline]
    pub fn new<TList: TypePath, TItem: Typed>() -> Self {
        Self {
            ty: Type::of::<TList>(),
            item_info: TItem::type_info,
        }
    }

    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }
}

// -----------------------------------------------------------------------------
// MapInfo

/// Type info of a key/value map.
#[derive(Clone, Debug)]
pub struct MapInfo {
    ty: Type,
    key_info: fn() -> &'static TypeInfo,
    value_info: fn() -> &'static TypeInfo,
}

impl MapInfo {
    crate::info::impl_type_fn!(ty);

    #[inline]
    pub fn new<TMap: TypePath, TKey: Typed, TValue: Typed>() -> Self {
        Self {
            ty: Type::of::<TMap>(),
            key_info: TKey::type_info,
            value_info: TValue::type_info,
        }
    }

    #[inline]
    pub fn key_info(&self) -> &'static TypeInfo {
        (self.key_info)()
    }

    #[inline]
    pub fn value_info(&self) -> &'static TypeInfo {
        (self.value_info)()
    }
}
