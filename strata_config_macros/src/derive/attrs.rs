//! Parsing of `#[merge(...)]` attributes.

use syn::{Attribute, Field, LitStr, Visibility};

/// Options accepted on the deriving type.
#[derive(Default)]
pub(crate) struct TypeAttrs {
    pub(crate) crate_path: Option<syn::Path>,
}

/// Extract `crate = "..."` from `#[merge(...)]` type attributes.
pub(crate) fn parse_type_attrs(attrs: &[Attribute]) -> syn::Result<TypeAttrs> {
    let mut out = TypeAttrs::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("merge")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("crate") {
                let lit: LitStr = meta.value()?.parse()?;
                let path: syn::Path =
                    syn::parse_str(&lit.value()).map_err(|e| syn::Error::new(lit.span(), e))?;
                out.crate_path = Some(path);
                return Ok(());
            }
            Err(meta.error("unsupported merge option on type; expected `crate`"))
        })?;
    }
    Ok(out)
}

/// Returns `true` when `#[merge(skip)]` is present on the field.
fn has_skip(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut skip = false;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("merge")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                return Ok(());
            }
            Err(meta.error("unsupported merge option on field; expected `skip`"))
        })?;
    }
    Ok(skip)
}

/// Whether a field takes part in merging and zero detection.
///
/// Private fields are invisible to the merge, as are fields explicitly
/// skipped.
pub(crate) fn is_visible(field: &Field) -> syn::Result<bool> {
    let skipped = has_skip(&field.attrs)?;
    Ok(!skipped && !matches!(field.vis, Visibility::Inherited))
}
