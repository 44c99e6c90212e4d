use crate::AnyValue;
use crate::Reflect;
use crate::info::ReflectKind;
use crate::ops::{Array, List, Map, Nullable, Scalar, Struct};

macro_rules! impl_kind_fn {
    ($name:ident, $variant:ident, $target:ty) => {
        #[inline]
        pub fn $name(self) -> Option<$target> {
            match self {
                Self::$variant(value) => Some(value),
                _ => None,
            }
        }
    };
}

// -----------------------------------------------------------------------------
// ReflectRef

/// An immutable view of a reflected value, by shape.
///
/// # Examples
///
/// ```
/// use ac_reflect::{Reflect, ops::ReflectRef};
///
/// let value = Some(5_u32);
/// let ReflectRef::Nullable(nullable) = value.reflect_ref() else { unreachable!() };
/// assert_eq!(nullable.get().unwrap().downcast_ref::<u32>(), Some(&5));
/// ```
pub enum ReflectRef<'a> {
    Any(&'a AnyValue),
    Scalar(&'a dyn Scalar),
    Nullable(&'a dyn Nullable),
    Array(&'a dyn Array),
    List(&'a dyn List),
    Map(&'a dyn Map),
    Struct(&'a dyn Struct),
    Opaque(&'a dyn Reflect),
}

impl<'a> ReflectRef<'a> {
    pub fn kind(&self) -> ReflectKind {
        match self {
            Self::Any(_) => ReflectKind::Any,
            Self::Scalar(_) => ReflectKind::Scalar,
            Self::Nullable(_) => ReflectKind::Nullable,
            Self::Array(_) => ReflectKind::Array,
            Self::List(_) => ReflectKind::List,
            Self::Map(_) => ReflectKind::Map,
            Self::Struct(_) => ReflectKind::Struct,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }

    impl_kind_fn!(as_any, Any, &'a AnyValue);
    impl_kind_fn!(as_scalar, Scalar, &'a dyn Scalar);
    impl_kind_fn!(as_nullable, Nullable, &'a dyn Nullable);
    impl_kind_fn!(as_array, Array, &'a dyn Array);
    impl_kind_fn!(as_list, List, &'a dyn List);
    impl_kind_fn!(as_map, Map, &'a dyn Map);
    impl_kind_fn!(as_struct, Struct, &'a dyn Struct);
}

// -----------------------------------------------------------------------------
// ReflectMut

/// A mutable view of a reflected value, by shape.
pub enum ReflectMut<'a> {
    Any(&'a mut AnyValue),
    Scalar(&'a mut dyn Scalar),
    Nullable(&'a mut dyn Nullable),
    Array(&'a mut dyn Array),
    List(&'a mut dyn List),
    Map(&'a mut dyn Map),
    Struct(&'a mut dyn Struct),
    Opaque(&'a mut dyn Reflect),
}

impl<'a> ReflectMut<'a> {
    pub fn kind(&self) -> ReflectKind {
        match self {
            Self::Any(_) => ReflectKind::Any,
            Self::Scalar(_) => ReflectKind::Scalar,
            Self::Nullable(_) => ReflectKind::Nullable,
            Self::Array(_) => ReflectKind::Array,
            Self::List(_) => ReflectKind::List,
            Self::Map(_) => ReflectKind::Map,
            Self::Struct(_) => ReflectKind::Struct,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }

    impl_kind_fn!(as_any, Any, &'a mut AnyValue);
    impl_kind_fn!(as_scalar, Scalar, &'a mut dyn Scalar);
    impl_kind_fn!(as_nullable, Nullable, &'a mut dyn Nullable);
    impl_kind_fn!(as_array, Array, &'a mut dyn Array);
    impl_kind_fn!(as_list, List, &'a mut dyn List);
    impl_kind_fn!(as_map, Map, &'a mut dyn Map);
    impl_kind_fn!(as_struct, Struct, &'a mut dyn Struct);
}
