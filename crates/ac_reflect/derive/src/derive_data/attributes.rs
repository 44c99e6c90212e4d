//! `#[reflect(...)]` attributes.
//!
//! Type level:
//!
//! - `type_path = "a::b::Name"`: replaces the default path
//!   `module_path!()::Name`, which is what the fallback wire key is built from.
//! - `auto_register`: submits the type to the automatic registration.
//! - `opaque`: reflects the type without exposing its content.
//!
//! Field level:
//!
//! - `rename = "Name"`: the key used on the wire.
//! - `read_only`: the field is reflected but never written or restored.
//! - `skip`: the field is not reflected at all.

use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr};

use crate::REFLECT_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// TypeAttributes

#[derive(Default)]
pub(crate) struct TypeAttributes {
    pub type_path: Option<LitStr>,
    pub auto_register: Option<Span>,
    pub opaque: Option<Span>,
}

impl TypeAttributes {
    pub(crate) fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("type_path") {
                    let lit: LitStr = meta.value()?.parse()?;
                    if lit.value().rsplit_once("::").is_none() {
                        return Err(syn::Error::new(
                            lit.span(),
                            "`type_path` must contain a module, e.g. `my_crate::Name`",
                        ));
                    }
                    check_unset(this.type_path.is_some(), &meta)?;
                    this.type_path = Some(lit);
                } else if meta.path.is_ident("auto_register") {
                    check_unset(this.auto_register.is_some(), &meta)?;
                    this.auto_register = Some(meta.path.span());
                } else if meta.path.is_ident("opaque") {
                    check_unset(this.opaque.is_some(), &meta)?;
                    this.opaque = Some(meta.path.span());
                } else {
                    return Err(meta.error(
                        "unknown attribute, expected `type_path`, `auto_register` or `opaque`",
                    ));
                }
                Ok(())
            })?;
        }

        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub rename: Option<LitStr>,
    pub read_only: bool,
    pub skip: bool,
}

impl FieldAttributes {
    pub(crate) fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    check_unset(this.rename.is_some(), &meta)?;
                    this.rename = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("read_only") {
                    check_unset(this.read_only, &meta)?;
                    this.read_only = true;
                } else if meta.path.is_ident("skip") {
                    check_unset(this.skip, &meta)?;
                    this.skip = true;
                } else {
                    return Err(meta.error(
                        "unknown attribute, expected `rename`, `read_only` or `skip`",
                    ));
                }
                Ok(())
            })?;
        }

        if this.skip && (this.rename.is_some() || this.read_only) {
            return Err(syn::Error::new(
                Span::call_site(),
                "`skip` cannot be combined with other field attributes",
            ));
        }

        Ok(this)
    }
}

fn check_unset(already_set: bool, meta: &syn::meta::ParseNestedMeta) -> syn::Result<()> {
    if already_set {
        Err(meta.error("duplicate attribute"))
    } else {
        Ok(())
    }
}
