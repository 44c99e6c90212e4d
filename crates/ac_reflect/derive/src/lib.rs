//! `#[derive(Reflect)]` for the `ac_reflect` crate.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Reflection Derivation
///
/// `#[derive(Reflect)]` implements the following traits:
///
/// - `TypePath`
/// - `Typed`
/// - `Reflect`
/// - `Struct` (unless the type is opaque)
/// - `GetTypeMeta`
///
/// Supported inputs are structs with named fields, empty structs
/// (`struct A {}`) and unit structs (`struct A;`). Generic types, tuple
/// structs, enums and unions are rejected.
///
/// The type must implement [`Default`]: the registry constructs values
/// through it and `Reflect::reset` assigns it.
///
/// ## Type Attributes
///
/// ### Custom Type Path
///
/// The default path is `module_path!()` followed by the type name. The
/// path is part of the wire format of values stored behind an `AnyValue`,
/// so a type that moves between modules can pin it:
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// #[reflect(type_path = "shapes::Circle")]
/// struct Circle { /* ... */ }
/// ```
///
/// ### Opaque Types
///
/// `#[reflect(opaque)]` hides the fields. Opaque types can be stored and
/// registered, but the marshaller refuses to encode them.
///
/// ### Auto Registration
///
/// `#[reflect(auto_register)]` submits the type to the global registry.
/// It is a no-op when the `auto_register` feature is disabled.
///
/// ## Field Attributes
///
/// - `#[reflect(rename = "Name")]`: the wire name of the field.
/// - `#[reflect(read_only)]`: readable through reflection, but neither
///   encoded nor decoded.
/// - `#[reflect(skip)]`: not reflected at all.
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// #[reflect(auto_register)]
/// struct Account {
///     #[reflect(rename = "Id")]
///     id: u64,
///     #[reflect(read_only)]
///     balance: i64,
///     #[reflect(skip)]
///     cache: Vec<u8>,
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::match_reflect_impls(ast)
}
