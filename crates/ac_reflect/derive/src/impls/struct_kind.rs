use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::Ident;

use super::{get_auto_register_impl, impl_trait_get_type_meta};
use super::{impl_trait_reflect, impl_trait_type_path, impl_trait_typed};

use crate::derive_data::ReflectStruct;

/// Implement full reflect for struct type.
pub(crate) fn impl_struct(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();
    let type_info_ = crate::path::type_info_(meta.ac_reflect_path());
    let struct_info_tokens = info.to_info_tokens();

    let type_path_trait_tokens = impl_trait_type_path(meta);
    let typed_trait_tokens = impl_trait_typed(meta, quote!(#type_info_::Struct(#struct_info_tokens)));
    let reflect_trait_tokens = impl_trait_reflect(meta, Ident::new("Struct", Span::call_site()));
    let struct_trait_tokens = impl_trait_struct(info);
    let get_type_meta_tokens = impl_trait_get_type_meta(meta, &info.field_types());
    let auto_register_tokens = get_auto_register_impl(meta);

    quote! {
        #type_path_trait_tokens

        #typed_trait_tokens

        #reflect_trait_tokens

        #struct_trait_tokens

        #get_type_meta_tokens

        #auto_register_tokens
    }
}

fn impl_trait_struct(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();
    let ac_reflect_path = meta.ac_reflect_path();
    let struct_ = crate::path::struct_(ac_reflect_path);
    let reflect_ = crate::path::reflect_(ac_reflect_path);
    let ident = meta.type_ident();

    let indices: Vec<usize> = info.fields().iter().map(|field| field.reflect_index).collect();
    let members: Vec<_> = info.fields().iter().map(|field| &field.member).collect();

    quote! {
        impl #struct_ for #ident {
            fn field_at(&self, index: usize) -> ::core::option::Option<&dyn #reflect_> {
                match index {
                    #(#indices => ::core::option::Option::Some(#reflect_::as_reflect(&self.#members)),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at_mut(&mut self, index: usize) -> ::core::option::Option<&mut dyn #reflect_> {
                match index {
                    #(#indices => ::core::option::Option::Some(#reflect_::as_reflect_mut(&mut self.#members)),)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    }
}
