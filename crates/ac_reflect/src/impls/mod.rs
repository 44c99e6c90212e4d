//! Reflection of foreign types.
//!
//! - scalars: `i8`-`i64`, `u8`-`u64`, `f32`, `f64`, `bool`, `char`,
//!   `String`, `Decimal`, `NaiveDateTime`, `TimeDelta`, `Uuid`,
//!   `DateTime<FixedOffset>`, `IpAddr`
//! - `Option<T>`
//! - `Box<[T]>`, `Vec<T>`
//! - `std::collections::HashMap<K, V>`, `BTreeMap<K, V>`

// -----------------------------------------------------------------------------
// Modules

mod map;
mod option;
mod scalar;
mod sequence;

pub(crate) use map::register_builtin_maps;

// -----------------------------------------------------------------------------
// Auxiliary macro

/// Submits `register::<T>` to the `inventory` of the crate.
macro_rules! impl_auto_register {
    ($ty:ty) => {
        #[cfg(feature = "auto_register")]
        $crate::__macro_exports::auto_register::inventory::submit! {
            $crate::__macro_exports::auto_register::AutoRegisterFunc(
                $crate::__macro_exports::auto_register::register_type::<$ty>,
            )
        }
    };
}

pub(crate) use impl_auto_register;

// -----------------------------------------------------------------------------
// Exports

/// Concatenates string slices with a single allocation.
///
/// Used to build the type paths of generic types.
///
/// # Example
///
/// ```
/// let s = ac_reflect::concat(&["alloc::vec::Vec<", "i32", ">"]);
///
/// assert_eq!(s, "alloc::vec::Vec<i32>");
/// assert_eq!(s.capacity(), 20);
/// ```
#[inline(never)]
pub fn concat(arr: &[&str]) -> ::alloc::string::String {
    let len = arr.iter().map(|item| item.len()).sum();
    let mut res = ::alloc::string::String::with_capacity(len);
    for &item in arr {
        res.push_str(item);
    }
    res
}
