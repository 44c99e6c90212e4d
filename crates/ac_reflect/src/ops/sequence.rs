use crate::Reflect;

// -----------------------------------------------------------------------------
// Array

/// A fixed length sequence, `Box<[T]>`.
///
/// The length only changes through [`resize_default`](Array::resize_default),
/// which replaces the whole content.
pub trait Array: Reflect {
    fn len(&self) -> usize;

    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Replaces the content with `len` default items.
    fn resize_default(&mut self, len: usize);

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// -----------------------------------------------------------------------------
// List

/// A growable sequence, `Vec<T>`.
///
/// # Examples
///
/// ```
/// use ac_reflect::{Reflect, ops::List};
///
/// let mut list = vec![1_i8];
/// let ops = list.reflect_mut().as_list().unwrap();
///
/// ops.clear();
/// *ops.push_default().downcast_mut::<i8>().unwrap() = 4;
/// ops.push_default();
///
/// assert_eq!(list, [4, 0]);
/// ```
pub trait List: Reflect {
    fn len(&self) -> usize;

    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Appends a default item and returns it.
    fn push_default(&mut self) -> &mut dyn Reflect;

    fn clear(&mut self);

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
