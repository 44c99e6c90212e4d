use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::info::{DynamicTypePath, DynamicTyped, ReflectKind};
use crate::ops::{ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// The object safe view of a value that the marshaller can walk.
///
/// `Reflect` extends [`DynamicTypePath`] and [`DynamicTyped`], so a
/// `&dyn Reflect` always knows its own type path and [`TypeInfo`].
///
/// Use [`reflect_ref`] and [`reflect_mut`] to reach the shape specific
/// traits ([`Struct`], [`List`], ...), and `downcast_ref` / `downcast_mut`
/// on `dyn Reflect` to get the concrete type back.
///
/// Implement it with [`#[derive(Reflect)]`](crate::Reflect) rather than by hand.
///
/// # Type Identification
///
/// [`Any::type_id`] on a `Box<dyn Reflect>` returns the id of the box.
/// Use [`Reflect::ty_id`] instead:
///
/// ```
/// use ac_reflect::Reflect;
/// use core::any::{Any, TypeId};
///
/// let x: Box<dyn Reflect> = 32_i32.into_boxed_reflect();
///
/// assert!(x.type_id() != TypeId::of::<i32>());
/// assert!(x.ty_id() == TypeId::of::<i32>());
/// ```
///
/// [`TypeInfo`]: crate::info::TypeInfo
/// [`reflect_ref`]: Reflect::reflect_ref
/// [`reflect_mut`]: Reflect::reflect_mut
/// [`Struct`]: crate::ops::Struct
/// [`List`]: crate::ops::List
pub trait Reflect: DynamicTypePath + DynamicTyped + Send + Sync + Any {
    #[inline(always)]
    fn as_reflect(&self) -> &dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    #[inline(always)]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    #[inline(always)]
    fn into_reflect(self: Box<Self>) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        self
    }

    #[inline(always)]
    fn into_boxed_reflect(self) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// Returns the [`TypeId`] of the underlying type.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Replaces `self` with `value` if both have the same type.
    ///
    /// # Examples
    ///
    /// ```
    /// use ac_reflect::Reflect;
    ///
    /// let mut text = String::new();
    /// text.set("abc".to_string().into_boxed_reflect()).unwrap();
    /// assert_eq!(text, "abc");
    ///
    /// assert!(text.set(1_u8.into_boxed_reflect()).is_err());
    /// ```
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Resets `self` to the default instance of its type.
    fn reset(&mut self);

    fn reflect_kind(&self) -> ReflectKind;

    fn reflect_ref(&self) -> ReflectRef<'_>;

    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Debug formatter driven by the reflected shape.
    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reflect_ref() {
            ReflectRef::Any(value) => fmt::Debug::fmt(value, f),
            ReflectRef::Scalar(value) => fmt::Debug::fmt(&value.get(), f),
            ReflectRef::Nullable(value) => match value.get() {
                Some(inner) => f.debug_tuple("Some").field(&inner).finish(),
                None => f.write_str("None"),
            },
            ReflectRef::Array(value) => f
                .debug_list()
                .entries((0..value.len()).filter_map(|index| value.get(index)))
                .finish(),
            ReflectRef::List(value) => f
                .debug_list()
                .entries((0..value.len()).filter_map(|index| value.get(index)))
                .finish(),
            ReflectRef::Map(value) => f.debug_map().entries(value.iter()).finish(),
            ReflectRef::Struct(value) => {
                let mut builder = f.debug_struct(self.reflect_type_name());
                for index in 0..value.field_len() {
                    if let (Some(name), Some(field)) = (value.name_at(index), value.field_at(index)) {
                        builder.field(name, &field);
                    }
                }
                builder.finish()
            }
            ReflectRef::Opaque(_) => write!(f, "Opaque({})", self.reflect_type_path()),
        }
    }
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use ac_reflect::Reflect;
    ///
    /// let x: Box<dyn Reflect> = 10_i64.into_boxed_reflect();
    /// assert_eq!(x.downcast_ref::<i64>(), Some(&10));
    /// assert_eq!(x.downcast_ref::<i32>(), None);
    /// ```
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Downcasts the value to type `T` by mutable reference.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Downcasts the value to type `T`, consuming the trait object.
    ///
    /// If the underlying value is not of type `T`, returns `Err(self)`.
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if !self.is::<T>() {
            return Err(self);
        }
        match <Box<dyn Any>>::downcast::<T>(self) {
            Ok(value) => Ok(value),
            Err(_) => unreachable!("type is already checked"),
        }
    }

    /// Downcasts the value to type `T`, unboxing and consuming the trait object.
    ///
    /// # Examples
    ///
    /// ```
    /// use ac_reflect::Reflect;
    ///
    /// let x: Box<dyn Reflect> = 'x'.into_boxed_reflect();
    /// assert_eq!(x.take::<char>().unwrap(), 'x');
    /// ```
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|value| *value)
    }
}

impl fmt::Debug for dyn Reflect {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reflect_debug(f)
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

/// Implements `set`, `reflect_kind`, `reflect_ref` and `reflect_mut`.
macro_rules! impl_reflect_cast_fn {
    ($kind:ident) => {
        fn set(
            &mut self,
            value: ::alloc::boxed::Box<dyn $crate::Reflect>,
        ) -> Result<(), ::alloc::boxed::Box<dyn $crate::Reflect>> {
            *self = value.take::<Self>()?;
            Ok(())
        }

        #[inline]
        fn reflect_kind(&self) -> $crate::info::ReflectKind {
            $crate::info::ReflectKind::$kind
        }

        #[inline]
        fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
            $crate::ops::ReflectRef::$kind(self)
        }

        #[inline]
        fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
            $crate::ops::ReflectMut::$kind(self)
        }
    };
}

pub(crate) use impl_reflect_cast_fn;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn downcast_and_take() {
        let boxed: Box<dyn Reflect> = vec![1_u16, 2].into_boxed_reflect();
        assert!(boxed.is::<Vec<u16>>());
        assert_eq!(boxed.reflect_kind(), ReflectKind::List);

        let boxed = boxed.downcast::<Vec<u8>>().unwrap_err();
        assert_eq!(boxed.take::<Vec<u16>>().unwrap(), [1, 2]);
    }

    #[test]
    fn debug_through_shape() {
        let value: Option<Vec<i32>> = Some(vec![1, 2]);
        assert_eq!(format!("{:?}", value.as_reflect()), "Some([I32(1), I32(2)])");

        let none: Option<bool> = None;
        assert_eq!(format!("{:?}", none.as_reflect()), "None");
    }
}
