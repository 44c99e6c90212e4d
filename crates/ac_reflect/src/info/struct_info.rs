use alloc::boxed::Box;
use core::any::{Any, TypeId};

use ac_utils::hash::{FixedHashState, HashMap};

use crate::info::{Type, TypeInfo, TypePath, Typed};

// -----------------------------------------------------------------------------
// NamedField

/// Information of a named struct field.
///
/// The name is the key used on the wire, `#[reflect(rename = "...")]`
/// changes it. Fields marked `#[reflect(read_only)]` are readable but not
/// writable: the marshaller neither writes nor restores them.
///
/// # Examples
///
/// ```
/// use ac_reflect::{Reflect, info::Typed};
///
/// #[derive(Reflect, Default)]
/// struct Foo {
///     #[reflect(rename = "A")]
///     a: f32,
///     #[reflect(read_only)]
///     b: u8,
/// }
///
/// let info = Foo::type_info().as_struct().unwrap();
/// let a = info.field("A").unwrap();
///
/// assert!(a.type_is::<f32>());
/// assert!(a.is_writable());
/// assert!(!info.field_at(1).unwrap().is_writable());
/// ```
#[derive(Clone, Debug)]
pub struct NamedField {
    name: &'static str,
    ty_id: TypeId,
    // `TypeInfo` is created on first access, the function pointer delays it.
    type_info: fn() -> &'static TypeInfo,
    writable: bool,
}

impl NamedField {
    /// Creates a writable field named `name` of type `T`.
    #[inline]
    pub fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            ty_id: TypeId::of::<T>(),
            type_info: T::type_info,
            writable: true,
        }
    }

    /// Marks the field as read only.
    #[inline]
    pub const fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty_id == TypeId::of::<T>()
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    #[inline]
    pub const fn is_writable(&self) -> bool {
        self.writable
    }
}

// -----------------------------------------------------------------------------
// StructInfo

/// Type info of a struct with named fields, in declaration order.
#[derive(Clone, Debug)]
pub struct StructInfo {
    ty: Type,
    fields: Box<[NamedField]>,
    field_indices: HashMap<&'static str, usize>,
    writable_len: usize,
}

impl StructInfo {
    crate::info::impl_type_fn!(ty);

    /// Creates a new [`StructInfo`].
    ///
    /// Field names must be unique.
    pub fn new<T: TypePath>(fields: &[NamedField]) -> Self {
        let mut field_indices = HashMap::with_capacity_and_hasher(fields.len(), FixedHashState);
        for (index, field) in fields.iter().enumerate() {
            field_indices.insert(field.name(), index);
        }

        Self {
            ty: Type::of::<T>(),
            fields: fields.into(),
            field_indices,
            writable_len: fields.iter().filter(|field| field.is_writable()).count(),
        }
    }

    #[inline]
    pub fn field(&self, name: &str) -> Option<&NamedField> {
        self.index_of(name).map(|index| &self.fields[index])
    }

    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&NamedField> {
        self.fields.get(index)
    }

    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.field_indices.get(name).copied()
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, NamedField> {
        self.fields.iter()
    }

    /// Returns the number of reflected fields, writable or not.
    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    /// Returns the number of writable fields.
    #[inline]
    pub const fn writable_len(&self) -> usize {
        self.writable_len
    }
}
