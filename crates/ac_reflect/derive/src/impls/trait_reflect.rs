use proc_macro2::{Ident, TokenStream};
use quote::quote;

use crate::derive_data::ReflectMeta;

/// Generate implementation code for `Reflect` trait.
///
/// `kind` is the variant of `ReflectKind`, `ReflectRef` and `ReflectMut`.
pub(crate) fn impl_trait_reflect(meta: &ReflectMeta, kind: Ident) -> TokenStream {
    let ac_reflect_path = meta.ac_reflect_path();
    let reflect_ = crate::path::reflect_(ac_reflect_path);
    let box_ = crate::path::box_(ac_reflect_path);
    let reflect_kind_ = crate::path::reflect_kind_(ac_reflect_path);
    let reflect_ref_ = crate::path::reflect_ref_(ac_reflect_path);
    let reflect_mut_ = crate::path::reflect_mut_(ac_reflect_path);
    let ident = meta.type_ident();

    quote! {
        impl #reflect_ for #ident {
            fn set(
                &mut self,
                value: #box_<dyn #reflect_>,
            ) -> ::core::result::Result<(), #box_<dyn #reflect_>> {
                *self = <dyn #reflect_>::take::<Self>(value)?;
                ::core::result::Result::Ok(())
            }

            #[inline]
            fn reset(&mut self) {
                *self = <Self as ::core::default::Default>::default();
            }

            #[inline]
            fn reflect_kind(&self) -> #reflect_kind_ {
                #reflect_kind_::#kind
            }

            #[inline]
            fn reflect_ref(&self) -> #reflect_ref_<'_> {
                #reflect_ref_::#kind(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> #reflect_mut_<'_> {
                #reflect_mut_::#kind(self)
            }
        }
    }
}
