use crate::info::Typed;

/// Creates a [`TypeTrait`](crate::registry::TypeTrait) for the type `T`.
///
/// # Example
///
/// ```
/// # use ac_reflect::registry::{TypeMeta, TypeTraitDefault, FromType};
/// let mut meta = TypeMeta::of::<String>();
///
/// meta.insert_trait::<TypeTraitDefault>(FromType::<String>::from_type());
/// ```
pub trait FromType<T: Typed> {
    fn from_type() -> Self;
}
