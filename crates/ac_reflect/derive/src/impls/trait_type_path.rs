use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectMeta;

/// Generate implementation code for `TypePath` trait.
///
/// Without `type_path`, the path is `module_path!()` followed by the ident.
pub(crate) fn impl_trait_type_path(meta: &ReflectMeta) -> TokenStream {
    let type_path_ = crate::path::type_path_(meta.ac_reflect_path());
    let ident = meta.type_ident();
    let ident_str = ident.to_string();
    let type_name = meta.type_name_tokens();

    let (path_tokens, module_tokens) = match meta.custom_path() {
        Some(custom) => {
            let path = &custom.path;
            let module = &custom.module;
            (quote!(#path), quote!(#module))
        }
        None => (
            quote!(::core::concat!(::core::module_path!(), "::", #ident_str)),
            quote!(::core::module_path!()),
        ),
    };

    quote! {
        impl #type_path_ for #ident {
            #[inline]
            fn type_path() -> &'static str {
                #path_tokens
            }

            #[inline]
            fn type_name() -> &'static str {
                #type_name
            }

            #[inline]
            fn type_ident() -> &'static str {
                #type_name
            }

            #[inline]
            fn module_path() -> ::core::option::Option<&'static str> {
                ::core::option::Option::Some(#module_tokens)
            }
        }
    }
}
