use crate::Reflect;
use crate::info::{NamedField, StructInfo};

/// A struct with named fields.
///
/// Implemented by `#[derive(Reflect)]`. Only [`field_at`](Struct::field_at)
/// and [`field_at_mut`](Struct::field_at_mut) are generated, the other
/// methods go through the [`StructInfo`] of the type.
///
/// # Examples
///
/// ```
/// use ac_reflect::{Reflect, ops::Struct};
///
/// #[derive(Reflect, Default)]
/// struct Point {
///     #[reflect(rename = "X")]
///     x: i32,
///     y: i32,
/// }
///
/// let mut point = Point { x: 1, y: 2 };
/// let ops = point.reflect_mut().as_struct().unwrap();
///
/// assert_eq!(ops.field_len(), 2);
/// assert_eq!(ops.name_at(0), Some("X"));
/// *ops.field_mut("y").unwrap().downcast_mut::<i32>().unwrap() = 5;
///
/// assert_eq!(point.y, 5);
/// ```
pub trait Struct: Reflect {
    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    #[inline]
    fn struct_info(&self) -> Option<&'static StructInfo> {
        self.reflect_type_info().as_struct()
    }

    fn field(&self, name: &str) -> Option<&dyn Reflect> {
        let index = self.struct_info()?.index_of(name)?;
        self.field_at(index)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect> {
        let index = self.struct_info()?.index_of(name)?;
        self.field_at_mut(index)
    }

    /// Returns the wire name of the field at `index`.
    fn name_at(&self, index: usize) -> Option<&'static str> {
        self.struct_info()?.field_at(index).map(NamedField::name)
    }

    fn field_len(&self) -> usize {
        self.struct_info().map_or(0, StructInfo::field_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::{TypePath, Typed};
    use crate::registry::{GetTypeMeta, TypeRegistry};
    use alloc::format;
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::any::TypeId;

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Account {
        #[reflect(rename = "Id")]
        id: u64,
        #[reflect(read_only)]
        balance: i64,
        #[reflect(skip)]
        cache: Vec<u8>,
        tags: Vec<String>,
    }

    #[derive(Reflect, Default)]
    #[reflect(type_path = "fixed::Marker")]
    struct Marker;

    #[test]
    fn derived_fields() {
        let info = Account::type_info().as_struct().unwrap();
        assert_eq!(info.field_len(), 3);
        assert_eq!(info.writable_len(), 2);
        assert_eq!(info.index_of("Id"), Some(0));
        assert_eq!(info.index_of("cache"), None);
        assert!(!info.field("balance").unwrap().is_writable());
        assert!(info.field_at(2).unwrap().type_is::<Vec<String>>());

        let account = Account { id: 7, balance: -1, cache: Vec::new(), tags: Vec::new() };
        assert_eq!(account.field_at(1).unwrap().downcast_ref::<i64>(), Some(&-1));
        assert!(account.field_at(3).is_none());
        assert_eq!(
            format!("{:?}", account.as_reflect()),
            "Account { Id: U64(7), balance: I64(-1), tags: [] }"
        );
    }

    #[test]
    fn set_and_reset() {
        let mut account = Account { id: 1, ..Default::default() };
        account.set(Account { id: 2, ..Default::default() }.into_boxed_reflect()).unwrap();
        assert_eq!(account.id, 2);
        assert!(account.set(Marker.into_boxed_reflect()).is_err());

        account.cache.push(1);
        account.reset();
        assert_eq!(account, Account::default());
        assert!(account.cache.is_empty());
    }

    #[test]
    fn custom_path_and_unit() {
        assert_eq!(Marker::type_path(), "fixed::Marker");
        assert_eq!(Marker::type_name(), "Marker");
        assert_eq!(Marker::crate_name(), Some("fixed"));
        assert_eq!(Marker::type_info().as_struct().unwrap().field_len(), 0);

        assert!(Account::type_path().ends_with("::Account"));
        assert_eq!(Account::module_path(), Some(module_path!()));
    }

    #[test]
    fn registers_field_types() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Account>();

        assert!(registry.contains(TypeId::of::<Account>()));
        assert!(registry.contains(TypeId::of::<Vec<String>>()));
        assert!(registry.contains(TypeId::of::<i64>()));
        assert!(!registry.contains(TypeId::of::<Vec<u8>>()));

        assert!(registry.contains(TypeId::of::<Option<Account>>()));
        assert!(registry.contains(TypeId::of::<Box<[Account]>>()));
        assert!(registry.contains(TypeId::of::<Vec<Account>>()));
        assert!(Account::get_type_meta().construct().unwrap().is::<Account>());
    }
}
