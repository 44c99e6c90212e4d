use crate::info::{TypeInfo, TypePath};

// -----------------------------------------------------------------------------
// Typed

/// Provides the `'static` [`TypeInfo`] of a type.
///
/// Implementations store the info in a
/// [`NonGenericTypeInfoCell`](crate::info::NonGenericTypeInfoCell) or, for
/// generic types, a [`GenericTypeInfoCell`](crate::info::GenericTypeInfoCell).
pub trait Typed: TypePath {
    fn type_info() -> &'static TypeInfo;
}

// -----------------------------------------------------------------------------
// DynamicTyped

/// Object safe access to [`Typed`].
pub trait DynamicTyped {
    fn reflect_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        Self::type_info()
    }
}
