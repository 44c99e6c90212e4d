use crate::Reflect;

/// A value that is either null or holds an inner value, `Option<T>`.
///
/// # Examples
///
/// ```
/// use ac_reflect::{Reflect, ops::Nullable};
///
/// let mut value: Option<String> = None;
/// let nullable = value.reflect_mut().as_nullable().unwrap();
///
/// nullable.insert_default().set("x".to_string().into_boxed_reflect()).unwrap();
/// assert_eq!(value.as_deref(), Some("x"));
/// ```
pub trait Nullable: Reflect {
    fn get(&self) -> Option<&dyn Reflect>;

    fn get_mut(&mut self) -> Option<&mut dyn Reflect>;

    fn set_none(&mut self);

    /// Replaces the content with a default inner value and returns it.
    fn insert_default(&mut self) -> &mut dyn Reflect;

    #[inline]
    fn is_none(&self) -> bool {
        self.get().is_none()
    }
}
