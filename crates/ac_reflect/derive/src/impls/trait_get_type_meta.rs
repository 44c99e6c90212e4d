use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{Ident, Type};

use crate::derive_data::ReflectMeta;

/// Generate implementation code for `GetTypeMeta` trait.
///
/// Every type in `dependencies` is registered along with the type, and so
/// are the `Option`, `Box<[_]>` and `Vec` shapes of the type itself.
pub(crate) fn impl_trait_get_type_meta(meta: &ReflectMeta, dependencies: &[&Type]) -> TokenStream {
    let ac_reflect_path = meta.ac_reflect_path();
    let get_type_meta_ = crate::path::get_type_meta_(ac_reflect_path);
    let type_meta_ = crate::path::type_meta_(ac_reflect_path);
    let type_registry_ = crate::path::type_registry_(ac_reflect_path);
    let ident = meta.type_ident();
    let registry_ = Ident::new("__registry", Span::call_site());

    quote! {
        impl #get_type_meta_ for #ident {
            fn get_type_meta() -> #type_meta_ {
                #type_meta_::with_default::<Self>()
            }

            fn register_dependencies(#registry_: &mut #type_registry_) {
                #(#type_registry_::register::<#dependencies>(#registry_);)*
                #type_registry_::register_shapes::<Self>(#registry_);
            }
        }
    }
}
