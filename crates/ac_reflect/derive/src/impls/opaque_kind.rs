use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::Ident;

use super::{get_auto_register_impl, impl_trait_get_type_meta};
use super::{impl_trait_reflect, impl_trait_type_path, impl_trait_typed};

use crate::derive_data::ReflectMeta;

/// Implement reflect for `#[reflect(opaque)]` types.
///
/// Opaque types expose nothing but their names, so they can be
/// registered and stored in an `AnyValue`, not marshalled.
pub(crate) fn impl_opaque(meta: &ReflectMeta) -> TokenStream {
    let ac_reflect_path = meta.ac_reflect_path();
    let type_info_ = crate::path::type_info_(ac_reflect_path);
    let opaque_info_ = crate::path::opaque_info_(ac_reflect_path);

    let type_path_trait_tokens = impl_trait_type_path(meta);
    let typed_trait_tokens =
        impl_trait_typed(meta, quote!(#type_info_::Opaque(#opaque_info_::new::<Self>())));
    let reflect_trait_tokens = impl_trait_reflect(meta, Ident::new("Opaque", Span::call_site()));
    let get_type_meta_tokens = impl_trait_get_type_meta(meta, &[]);
    let auto_register_tokens = get_auto_register_impl(meta);

    quote! {
        #type_path_trait_tokens

        #typed_trait_tokens

        #reflect_trait_tokens

        #get_type_meta_tokens

        #auto_register_tokens
    }
}
