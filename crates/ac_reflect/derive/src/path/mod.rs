//! Paths of `ac_reflect` items used by the generated code.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the access path to the `ac_reflect` crate.
///
/// 1. For crates that depend on `ac_reflect`, `::ac_reflect` is returned.
/// 2. For crates that depend on `anycbor`, `::anycbor::reflect` is returned.
/// 3. Otherwise `::ac_reflect` is returned, which may be incorrect.
///
/// This reads the caller's manifest, so it is resolved once per derive
/// and passed around.
pub(crate) fn ac_reflect() -> syn::Path {
    ac_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("ac_reflect"))
}

// -----------------------------------------------------------------------------
// Modules

mod info;
mod ops;
mod registry;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use info::*;
pub(crate) use ops::*;
pub(crate) use registry::*;

#[inline(always)]
pub(crate) fn reflect_(ac_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #ac_reflect_path::Reflect
    }
}

#[inline(always)]
pub(crate) fn box_(ac_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #ac_reflect_path::__macro_exports::Box
    }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(ac_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #ac_reflect_path::__macro_exports::auto_register
    }
}
