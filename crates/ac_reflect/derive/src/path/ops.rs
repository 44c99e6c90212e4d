use proc_macro2::TokenStream;
use quote::quote;

#[inline]
pub(crate) fn reflect_ref_(ac_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #ac_reflect_path::ops::ReflectRef
    }
}

#[inline]
pub(crate) fn reflect_mut_(ac_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #ac_reflect_path::ops::ReflectMut
    }
}

#[inline]
pub(crate) fn struct_(ac_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #ac_reflect_path::ops::Struct
    }
}
