use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Member};

use crate::derive_data::{FieldAttributes, ReflectMeta, ReflectStruct, StructField};
use crate::derive_data::TypeAttributes;

/// The parsed input of `#[derive(Reflect)]`.
pub(crate) enum ReflectDerive<'a> {
    /// Named fields, `{}` or a unit struct.
    Struct(ReflectStruct<'a>),
    /// `#[reflect(opaque)]`.
    Opaque(ReflectMeta<'a>),
}

impl<'a> ReflectDerive<'a> {
    pub(crate) fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;

        if !input.generics.params.is_empty() {
            return Err(syn::Error::new(
                input.generics.span(),
                "`Reflect` cannot be derived for generic types",
            ));
        }

        let is_opaque = attrs.opaque.is_some();
        let meta = ReflectMeta::new(&input.ident, attrs);

        if is_opaque {
            return Ok(Self::Opaque(meta));
        }

        match &input.data {
            Data::Struct(data) => {
                let fields = match &data.fields {
                    Fields::Named(named) => Self::collect_fields(named.named.iter())?,
                    Fields::Unit => Vec::new(),
                    Fields::Unnamed(unnamed) => {
                        return Err(syn::Error::new(
                            unnamed.span(),
                            "`Reflect` requires named fields, or `#[reflect(opaque)]`",
                        ));
                    }
                };
                Ok(Self::Struct(ReflectStruct::new(meta, fields)))
            }
            Data::Enum(data) => Err(syn::Error::new(
                data.enum_token.span(),
                "`Reflect` cannot be derived for enums, use `#[reflect(opaque)]`",
            )),
            Data::Union(data) => Err(syn::Error::new(
                data.union_token.span(),
                "`Reflect` cannot be derived for unions, use `#[reflect(opaque)]`",
            )),
        }
    }

    fn collect_fields(fields: impl Iterator<Item = &'a syn::Field>) -> syn::Result<Vec<StructField<'a>>> {
        let mut output: Vec<StructField<'a>> = Vec::new();

        for (index, field) in fields.enumerate() {
            let attrs = FieldAttributes::parse_attrs(&field.attrs)?;
            if attrs.skip {
                continue;
            }

            let member = match &field.ident {
                Some(ident) => Member::Named(ident.clone()),
                None => Member::Unnamed(index.into()),
            };
            let wire_name = match &attrs.rename {
                Some(lit) => lit.value(),
                None => field
                    .ident
                    .as_ref()
                    .map(|ident| ident.to_string().trim_start_matches("r#").to_owned())
                    .unwrap_or_else(|| index.to_string()),
            };

            let field = StructField {
                data: field,
                attrs,
                reflect_index: output.len(),
                wire_name,
                member,
            };

            if output.iter().any(|other| other.wire_name == field.wire_name) {
                return Err(syn::Error::new(
                    field.wire_name_span(),
                    format!("duplicate reflected field name `{}`", field.wire_name),
                ));
            }
            output.push(field);
        }

        Ok(output)
    }
}
