use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectMeta;

/// Generate implementation code for `Typed` trait.
///
/// `info_tokens` is the `TypeInfo` expression, evaluated once.
pub(crate) fn impl_trait_typed(meta: &ReflectMeta, info_tokens: TokenStream) -> TokenStream {
    let ac_reflect_path = meta.ac_reflect_path();
    let typed_ = crate::path::typed_(ac_reflect_path);
    let type_info_ = crate::path::type_info_(ac_reflect_path);
    let cell_ = crate::path::non_generic_type_info_cell_(ac_reflect_path);
    let ident = meta.type_ident();

    quote! {
        impl #typed_ for #ident {
            fn type_info() -> &'static #type_info_ {
                static CELL: #cell_ = #cell_::new();
                CELL.get_or_init(|| #info_tokens)
            }
        }
    }
}
