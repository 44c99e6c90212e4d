// -----------------------------------------------------------------------------
// TypePath

/// Stable, human readable names of a type.
///
/// Unlike [`core::any::type_name`], the returned strings are fixed by the
/// implementation and safe to put on the wire. The fallback key of the
/// marshaller is built from [`type_path`](TypePath::type_path) and
/// [`crate_name`](TypePath::crate_name).
///
/// Implemented by `#[derive(Reflect)]`.
///
/// # Examples
///
/// ```
/// use ac_reflect::{Reflect, info::TypePath};
///
/// mod shapes {
///     #[derive(ac_reflect::Reflect, Default)]
///     pub struct Circle {
///         pub radius: f64,
///     }
/// }
///
/// assert!(shapes::Circle::type_path().ends_with("shapes::Circle"));
/// assert_eq!(shapes::Circle::type_name(), "Circle");
/// assert_eq!(<Option<i32>>::type_path(), "core::option::Option<i32>");
/// assert_eq!(<Option<i32>>::crate_name(), Some("core"));
/// assert_eq!(i32::crate_name(), None);
/// ```
pub trait TypePath: 'static {
    /// The full path, e.g. `alloc::vec::Vec<i32>`.
    fn type_path() -> &'static str;

    /// The short name with generics, e.g. `Vec<i32>`.
    fn type_name() -> &'static str;

    /// The name without generics, e.g. `Vec`.
    fn type_ident() -> &'static str;

    /// The module the type is defined in, `None` for primitives.
    fn module_path() -> Option<&'static str> {
        None
    }

    /// The first segment of [`module_path`](TypePath::module_path).
    fn crate_name() -> Option<&'static str> {
        Self::module_path().and_then(|path| path.split("::").next())
    }
}

// -----------------------------------------------------------------------------
// DynamicTypePath

/// Object safe access to [`TypePath`].
pub trait DynamicTypePath {
    fn reflect_type_path(&self) -> &'static str;

    fn reflect_type_name(&self) -> &'static str;
}

impl<T: TypePath> DynamicTypePath for T {
    #[inline]
    fn reflect_type_path(&self) -> &'static str {
        Self::type_path()
    }

    #[inline]
    fn reflect_type_name(&self) -> &'static str {
        Self::type_name()
    }
}
