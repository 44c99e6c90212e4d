use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{Field, Member, Type};

use crate::derive_data::{FieldAttributes, ReflectMeta};

/// A reflected field of a struct.
pub(crate) struct StructField<'a> {
    pub data: &'a Field,
    pub attrs: FieldAttributes,
    /// Position among the reflected fields.
    pub reflect_index: usize,
    /// The key used on the wire.
    pub wire_name: String,
    pub member: Member,
}

impl StructField<'_> {
    #[inline]
    pub(crate) fn ty(&self) -> &Type {
        &self.data.ty
    }

    pub(crate) fn wire_name_span(&self) -> Span {
        match &self.attrs.rename {
            Some(lit) => lit.span(),
            None => match &self.member {
                Member::Named(ident) => ident.span(),
                Member::Unnamed(index) => index.span,
            },
        }
    }
}

/// A struct with named fields, or without fields.
pub(crate) struct ReflectStruct<'a> {
    meta: ReflectMeta<'a>,
    fields: Vec<StructField<'a>>,
}

impl<'a> ReflectStruct<'a> {
    pub(crate) fn new(meta: ReflectMeta<'a>, fields: Vec<StructField<'a>>) -> Self {
        Self { meta, fields }
    }

    #[inline]
    pub(crate) fn meta(&self) -> &ReflectMeta<'a> {
        &self.meta
    }

    /// Fields that are reflected, in declaration order.
    #[inline]
    pub(crate) fn fields(&self) -> &[StructField<'a>] {
        &self.fields
    }

    /// Distinct field types, in first occurrence order.
    pub(crate) fn field_types(&self) -> Vec<&Type> {
        let mut types: Vec<&Type> = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            if !types.contains(&field.ty()) {
                types.push(field.ty());
            }
        }
        types
    }

    /// The `StructInfo` expression of the type.
    pub(crate) fn to_info_tokens(&self) -> TokenStream {
        let ac_reflect_path = self.meta.ac_reflect_path();
        let struct_info_ = crate::path::struct_info_(ac_reflect_path);
        let named_field_ = crate::path::named_field_(ac_reflect_path);

        let fields = self.fields.iter().map(|field| {
            let ty = field.ty();
            let name = &field.wire_name;
            if field.attrs.read_only {
                quote!(#named_field_::new::<#ty>(#name).read_only())
            } else {
                quote!(#named_field_::new::<#ty>(#name))
            }
        });

        quote! {
            #struct_info_::new::<Self>(&[#(#fields),*])
        }
    }
}
