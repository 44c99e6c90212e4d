use core::any::{Any, TypeId};
use core::fmt;

use crate::info::{AnyInfo, ArrayInfo, ListInfo, MapInfo, NullableInfo};
use crate::info::{OpaqueInfo, ScalarInfo, StructInfo, TypePath};

// -----------------------------------------------------------------------------
// Type

/// The identity and names of a type.
///
/// Names are stored as function pointers because the paths of generic
/// types are only built on first access.
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    path: fn() -> &'static str,
    name: fn() -> &'static str,
    module_path: fn() -> Option<&'static str>,
    crate_name: fn() -> Option<&'static str>,
}

impl Type {
    /// Creates the [`Type`] of `T`.
    #[inline]
    pub fn of<T: TypePath + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: T::type_path,
            name: T::type_name,
            module_path: T::module_path,
            crate_name: T::crate_name,
        }
    }

    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// See [`TypePath::type_path`].
    #[inline]
    pub fn path(&self) -> &'static str {
        (self.path)()
    }

    /// See [`TypePath::type_name`].
    #[inline]
    pub fn name(&self) -> &'static str {
        (self.name)()
    }

    /// See [`TypePath::module_path`].
    #[inline]
    pub fn module_path(&self) -> Option<&'static str> {
        (self.module_path)()
    }

    /// See [`TypePath::crate_name`].
    #[inline]
    pub fn crate_name(&self) -> Option<&'static str> {
        (self.crate_name)()
    }

    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

// -----------------------------------------------------------------------------
// ReflectKind

/// The shape of a reflected type, without any payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    Any,
    Scalar,
    Nullable,
    Array,
    List,
    Map,
    Struct,
    Opaque,
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReflectKind::Any => "any",
            ReflectKind::Scalar => "scalar",
            ReflectKind::Nullable => "nullable",
            ReflectKind::Array => "array",
            ReflectKind::List => "list",
            ReflectKind::Map => "map",
            ReflectKind::Struct => "struct",
            ReflectKind::Opaque => "opaque",
        })
    }
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time information of a reflected type.
///
/// Obtained from [`Typed::type_info`](crate::info::Typed::type_info), always `'static`.
///
/// # Examples
///
/// ```
/// use ac_reflect::info::{ReflectKind, ScalarKind, Typed};
///
/// let info = <Option<u16> as Typed>::type_info();
/// assert_eq!(info.kind(), ReflectKind::Nullable);
///
/// let inner = info.as_nullable().unwrap().inner_info();
/// assert_eq!(inner.as_scalar().unwrap().kind(), ScalarKind::U16);
/// ```
#[derive(Debug)]
pub enum TypeInfo {
    Any(AnyInfo),
    Scalar(ScalarInfo),
    Nullable(NullableInfo),
    Array(ArrayInfo),
    List(ListInfo),
    Map(MapInfo),
    Struct(StructInfo),
    Opaque(OpaqueInfo),
}

macro_rules! impl_as_fn {
    ($name:ident, $variant:ident, $info:ty) => {
        #[inline]
        pub const fn $name(&self) -> Option<&$info> {
            match self {
                TypeInfo::$variant(info) => Some(info),
                _ => None,
            }
        }
    };
}

impl TypeInfo {
    /// Returns the underlying [`Type`].
    pub const fn ty(&self) -> &Type {
        match self {
            TypeInfo::Any(info) => info.ty(),
            TypeInfo::Scalar(info) => info.ty(),
            TypeInfo::Nullable(info) => info.ty(),
            TypeInfo::Array(info) => info.ty(),
            TypeInfo::List(info) => info.ty(),
            TypeInfo::Map(info) => info.ty(),
            TypeInfo::Struct(info) => info.ty(),
            TypeInfo::Opaque(info) => info.ty(),
        }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.ty().id()
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.ty().name()
    }

    #[inline]
    pub fn crate_name(&self) -> Option<&'static str> {
        self.ty().crate_name()
    }

    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty().is::<T>()
    }

    pub const fn kind(&self) -> ReflectKind {
        match self {
            TypeInfo::Any(_) => ReflectKind::Any,
            TypeInfo::Scalar(_) => ReflectKind::Scalar,
            TypeInfo::Nullable(_) => ReflectKind::Nullable,
            TypeInfo::Array(_) => ReflectKind::Array,
            TypeInfo::List(_) => ReflectKind::List,
            TypeInfo::Map(_) => ReflectKind::Map,
            TypeInfo::Struct(_) => ReflectKind::Struct,
            TypeInfo::Opaque(_) => ReflectKind::Opaque,
        }
    }

    impl_as_fn!(as_scalar, Scalar, ScalarInfo);
    impl_as_fn!(as_nullable, Nullable, NullableInfo);
    impl_as_fn!(as_array, Array, ArrayInfo);
    impl_as_fn!(as_list, List, ListInfo);
    impl_as_fn!(as_map, Map, MapInfo);
    impl_as_fn!(as_struct, Struct, StructInfo);
}
