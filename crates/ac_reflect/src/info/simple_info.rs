use crate::info::{Type, TypePath};

/// Type info of [`AnyValue`](crate::AnyValue), the erased "any" type.
#[derive(Clone, Debug)]
pub struct AnyInfo {
    ty: Type,
}

impl AnyInfo {
    crate::info::impl_type_fn!(ty);

    #[inline]
    pub fn new<T: TypePath>() -> Self {
        Self { ty: Type::of::<T>() }
    }
}

/// Type info of a type that exposes no reflectable content.
///
/// The marshaller refuses to encode opaque types.
#[derive(Clone, Debug)]
pub struct OpaqueInfo {
    ty: Type,
}

impl OpaqueInfo {
    crate::info::impl_type_fn!(ty);

    #[inline]
    pub fn new<T: TypePath>() -> Self {
        Self { ty: Type::of::<T>() }
    }
}
