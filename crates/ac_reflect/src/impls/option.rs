use crate::Reflect;
use crate::impls::concat;
use crate::info::{GenericTypeInfoCell, GenericTypePathCell, NullableInfo, TypeInfo, TypePath, Typed};
use crate::ops::Nullable;
use crate::registry::{GetTypeMeta, TypeMeta, TypeRegistry};

impl<T: TypePath> TypePath for Option<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["core::option::Option<", T::type_path(), ">"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Option<", T::type_name(), ">"]))
    }

    #[inline]
    fn type_ident() -> &'static str {
        "Option"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("core::option")
    }
}

impl<T: Reflect + Typed + Default> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Nullable(NullableInfo::new::<Self, T>()))
    }
}

impl<T: Reflect + Typed + Default> Reflect for Option<T> {
    crate::reflection::impl_reflect_cast_fn!(Nullable);

    #[inline]
    fn reset(&mut self) {
        *self = None;
    }
}

impl<T: Reflect + Typed + Default> Nullable for Option<T> {
    #[inline]
    fn get(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|value| value as &dyn Reflect)
    }

    #[inline]
    fn get_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(|value| value as &mut dyn Reflect)
    }

    #[inline]
    fn set_none(&mut self) {
        *self = None;
    }

    #[inline]
    fn insert_default(&mut self) -> &mut dyn Reflect {
        self.insert(T::default())
    }
}

impl<T: GetTypeMeta + Reflect + Default> GetTypeMeta for Option<T> {
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
    use alloc::string::String;

    #[test]
    fn nullable_ops() {
        let mut value: Option<String> = Some(String::from("a"));
        let nullable = value.reflect_mut().as_nullable().unwrap();

        assert!(!nullable.is_none());
        nullable.set_none();
        assert!(nullable.is_none());
        nullable.insert_default();

        assert_eq!(value.as_deref(), Some(""));
    }

    #[test]
    fn nested_type_path() {
        assert_eq!(
            <Option<Option<u8>> as TypePath>::type_path(),
            "core::option::Option<core::option::Option<u8>>",
        );
        assert_eq!(<Option<u8> as TypePath>::type_name(), "Option<u8>");
    }
}
