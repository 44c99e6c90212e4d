use proc_macro2::TokenStream;
use quote::quote;
use syn::{Ident, LitStr};

use crate::derive_data::TypeAttributes;

/// A user supplied `type_path`, split at the last `::`.
pub(crate) struct CustomPath {
    pub path: LitStr,
    pub module: String,
    pub name: String,
}

impl CustomPath {
    fn new(path: LitStr) -> Option<Self> {
        let value = path.value();
        let (module, name) = value.rsplit_once("::")?;
        Some(Self {
            module: module.to_owned(),
            name: name.to_owned(),
            path,
        })
    }
}

/// Information shared by every generated impl of a type.
pub(crate) struct ReflectMeta<'a> {
    type_ident: &'a Ident,
    attrs: TypeAttributes,
    custom_path: Option<CustomPath>,
    ac_reflect_path: syn::Path,
}

impl<'a> ReflectMeta<'a> {
    pub(crate) fn new(type_ident: &'a Ident, mut attrs: TypeAttributes) -> Self {
        let custom_path = attrs.type_path.take().and_then(CustomPath::new);
        Self {
            type_ident,
            attrs,
            custom_path,
            ac_reflect_path: crate::path::ac_reflect(),
        }
    }

    #[inline]
    pub(crate) fn type_ident(&self) -> &Ident {
        self.type_ident
    }

    #[inline]
    pub(crate) fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub(crate) fn custom_path(&self) -> Option<&CustomPath> {
        self.custom_path.as_ref()
    }

    #[inline]
    pub(crate) fn ac_reflect_path(&self) -> &syn::Path {
        &self.ac_reflect_path
    }

    /// The short name of the type as a string literal expression.
    pub(crate) fn type_name_tokens(&self) -> TokenStream {
        match &self.custom_path {
            Some(custom) => {
                let name = &custom.name;
                quote!(#name)
            }
            None => {
                let name = self.type_ident.to_string();
                quote!(#name)
            }
        }
    }
}
