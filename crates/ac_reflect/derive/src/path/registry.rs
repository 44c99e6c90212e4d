use proc_macro2::TokenStream;
use quote::quote;

#[inline]
pub(crate) fn type_meta_(ac_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #ac_reflect_path::registry::TypeMeta
    }
}

#[inline]
pub(crate) fn get_type_meta_(ac_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #ac_reflect_path::registry::GetTypeMeta
    }
}

#[inline]
pub(crate) fn type_registry_(ac_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #ac_reflect_path::registry::TypeRegistry
    }
}
