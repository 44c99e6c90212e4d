use alloc::boxed::Box;
use core::any::Any;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem;

use crate::Reflect;
use crate::impls::impl_auto_register;
use crate::info::{AnyInfo, NonGenericTypeInfoCell, TypeInfo, TypePath, Typed};
use crate::ops::{ReflectRef, ScalarRef};
use crate::registry::{GetTypeMeta, TypeMeta};

// -----------------------------------------------------------------------------
// AnyValue

/// A value of any reflected type.
///
/// `AnyValue` plays the role of a field declared with the root object type:
/// it either holds a concrete value or is the bare object instance, which
/// carries no data at all. The default is the bare object.
///
/// The marshaller wraps the held value with its type tag, so the concrete
/// type survives a round trip. A nullable "any" is `Option<AnyValue>`.
///
/// # Equality
///
/// `AnyValue` is [`Eq`] and [`Hash`] so it can key a `HashMap`. Scalars
/// compare by kind and value, floats by their bits. A held `Some(v)`
/// compares as `v`, every held `None` is the same null. Other values
/// compare by identity.
///
/// # Examples
///
/// ```
/// use ac_reflect::AnyValue;
///
/// let object = AnyValue::default();
/// assert!(object.is_object());
///
/// let value = AnyValue::new(10_i32);
/// assert_eq!(value.downcast_ref::<i32>(), Some(&10));
///
/// // Nesting flattens.
/// let nested = AnyValue::new(AnyValue::new("a".to_string()));
/// assert!(nested.is::<String>());
/// ```
#[derive(Default)]
pub struct AnyValue {
    value: Option<Box<dyn Reflect>>,
}

impl AnyValue {
    /// The bare object instance.
    #[inline]
    pub const fn object() -> Self {
        Self { value: None }
    }

    /// Wraps `value`. An `AnyValue` argument is moved in as is.
    pub fn new<T: Reflect>(value: T) -> Self {
        Self::from_boxed(Box::new(value))
    }

    /// Wraps a boxed value. An `AnyValue` argument is moved in as is.
    pub fn from_boxed(value: Box<dyn Reflect>) -> Self {
        match value.take::<AnyValue>() {
            Ok(any) => any,
            Err(value) => Self { value: Some(value) },
        }
    }

    /// A held null: what a null lands as in an `AnyValue` slot.
    #[inline]
    pub fn null() -> Self {
        Self::new(None::<AnyValue>)
    }

    /// Returns `true` if the held value is a `None` of any type.
    pub fn is_null(&self) -> bool {
        matches!(key_of(self.get()), Key::Null)
    }

    /// Returns `true` for the bare object instance.
    #[inline]
    pub const fn is_object(&self) -> bool {
        self.value.is_none()
    }

    #[inline]
    pub fn get(&self) -> Option<&dyn Reflect> {
        self.value.as_deref()
    }

    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.value.as_deref_mut()
    }

    /// Replaces the held value, see [`from_boxed`](AnyValue::from_boxed).
    #[inline]
    pub fn set_boxed(&mut self, value: Box<dyn Reflect>) {
        *self = Self::from_boxed(value);
    }

    /// Takes the held value, leaving the bare object.
    #[inline]
    pub fn take(&mut self) -> Option<Box<dyn Reflect>> {
        self.value.take()
    }

    /// Returns `true` if the held value is of type `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.get().is_some_and(|value| value.is::<T>())
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.get()?.downcast_ref()
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.get_mut()?.downcast_mut()
    }
}

impl fmt::Debug for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => f.debug_tuple("AnyValue").field(&value).finish(),
            None => f.write_str("Object"),
        }
    }
}

// -----------------------------------------------------------------------------
// Equality

/// What an `AnyValue` compares and hashes as.
enum Key<'a> {
    Object,
    Null,
    Scalar(ScalarRef<'a>),
    Identity(*const ()),
}

fn key_of(value: Option<&dyn Reflect>) -> Key<'_> {
    let Some(value) = value else {
        return Key::Object;
    };
    match value.reflect_ref() {
        ReflectRef::Nullable(nullable) => match nullable.get() {
            Some(inner) => key_of(Some(inner)),
            None => Key::Null,
        },
        ReflectRef::Any(any) => key_of(any.get()),
        ReflectRef::Scalar(scalar) => Key::Scalar(scalar.get()),
        _ => Key::Identity(core::ptr::from_ref(value).cast()),
    }
}

fn scalar_eq(a: ScalarRef<'_>, b: ScalarRef<'_>) -> bool {
    match (a, b) {
        (ScalarRef::F32(a), ScalarRef::F32(b)) => a.to_bits() == b.to_bits(),
        (ScalarRef::F64(a), ScalarRef::F64(b)) => a.to_bits() == b.to_bits(),
        (a, b) => a == b,
    }
}

fn hash_scalar<H: Hasher>(scalar: ScalarRef<'_>, state: &mut H) {
    mem::discriminant(&scalar).hash(state);
    match scalar {
        ScalarRef::I16(v) => v.hash(state),
        ScalarRef::I32(v) => v.hash(state),
        ScalarRef::I64(v) => v.hash(state),
        ScalarRef::U16(v) => v.hash(state),
        ScalarRef::U32(v) => v.hash(state),
        ScalarRef::U64(v) => v.hash(state),
        ScalarRef::F32(v) => v.to_bits().hash(state),
        ScalarRef::F64(v) => v.to_bits().hash(state),
        ScalarRef::Bool(v) => v.hash(state),
        ScalarRef::U8(v) => v.hash(state),
        ScalarRef::Char(v) => v.hash(state),
        ScalarRef::I8(v) => v.hash(state),
        ScalarRef::Decimal(v) => v.hash(state),
        ScalarRef::DateTime(v) => v.hash(state),
        ScalarRef::TimeDelta(v) => v.hash(state),
        ScalarRef::Uuid(v) => v.hash(state),
        ScalarRef::DateTimeOffset(v) => v.hash(state),
        ScalarRef::IpAddr(v) => v.hash(state),
        ScalarRef::String(v) => v.hash(state),
    }
}

impl PartialEq for AnyValue {
    fn eq(&self, other: &Self) -> bool {
        match (key_of(self.get()), key_of(other.get())) {
            (Key::Object, Key::Object) | (Key::Null, Key::Null) => true,
            (Key::Scalar(a), Key::Scalar(b)) => scalar_eq(a, b),
            (Key::Identity(a), Key::Identity(b)) => core::ptr::eq(a, b),
            _ => false,
        }
    }
}

impl Eq for AnyValue {}

impl Hash for AnyValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let key = key_of(self.get());
        mem::discriminant(&key).hash(state);
        match key {
            Key::Object | Key::Null => {}
            Key::Scalar(scalar) => hash_scalar(scalar, state),
            Key::Identity(ptr) => ptr.hash(state),
        }
    }
}

// -----------------------------------------------------------------------------
// Reflection

impl TypePath for AnyValue {
    #[inline]
    fn type_path() -> &'static str {
        "ac_reflect::AnyValue"
    }

    #[inline]
    fn type_name() -> &'static str {
        "AnyValue"
    }

    #[inline]
    fn type_ident() -> &'static str {
        "AnyValue"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("ac_reflect")
    }
}

impl Typed for AnyValue {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Any(AnyInfo::new::<Self>()))
    }
}

impl Reflect for AnyValue {
    crate::reflection::impl_reflect_cast_fn!(Any);

    #[inline]
    fn reset(&mut self) {
        self.value = None;
    }
}

impl GetTypeMeta for AnyValue {
    fn get_type_meta() -> TypeMeta {
        TypeMeta::with_default::<Self>()
    }
}

impl_auto_register!(AnyValue);

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::String;

    #[test]
    fn set_and_take() {
        let mut any = AnyValue::object();
        any.set_boxed(Box::new(2.5_f64));
        assert!(any.is::<f64>());
        assert_eq!(format!("{any:?}"), "AnyValue(F64(2.5))");

        let taken = any.take().unwrap();
        assert!(any.is_object());
        assert_eq!(taken.take::<f64>().unwrap(), 2.5);
    }

    #[test]
    fn held_null() {
        let null = AnyValue::null();
        assert!(null.is_null());
        assert!(!null.is_object());
        assert!(AnyValue::new(None::<i32>).is_null());
        assert!(!AnyValue::new(Some(1_i32)).is_null());
        assert_eq!(null, AnyValue::new(None::<String>));
    }

    #[test]
    fn keys() {
        use std::collections::HashMap;

        assert_eq!(AnyValue::new(1_i32), AnyValue::new(Some(1_i32)));
        assert_ne!(AnyValue::new(1_i32), AnyValue::new(1_i64));
        assert_ne!(AnyValue::new(1_i32), AnyValue::object());
        assert_eq!(AnyValue::new(f64::NAN), AnyValue::new(f64::NAN));
        assert_ne!(AnyValue::new(0.0_f32), AnyValue::new(-0.0_f32));

        let list = AnyValue::new(alloc::vec![1_u8]);
        assert!(PartialEq::eq(&list, &list));
        assert_ne!(list, AnyValue::new(alloc::vec![1_u8]));

        let mut map = HashMap::new();
        map.insert(AnyValue::new(String::from("2")), 2);
        map.insert(AnyValue::new(1_i32), 1);
        assert_eq!(map.get(&AnyValue::new(String::from("2"))), Some(&2));
        assert_eq!(map.get(&AnyValue::new(1_i32)), Some(&1));
        assert_eq!(map.get(&AnyValue::new(1_u32)), None);
    }

    #[test]
    fn reset_to_object() {
        let mut any = AnyValue::new(String::from("x"));
        any.reset();
        assert!(any.is_object());
        assert_eq!(format!("{any:?}"), "Object");
    }
}
