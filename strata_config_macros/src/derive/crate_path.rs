//! Crate path resolution for dependency aliasing support.
//!
//! Converts the optional `#[merge(crate = "...")]` attribute value into a
//! `TokenStream` that replaces hardcoded `strata_config::` paths in generated
//! code.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolve the crate path from the parsed type attribute.
///
/// Without an override the path is the absolute `::strata_config`. The
/// leading `::` names the extern crate from any module, even one where a
/// local item called `strata_config` is in scope. Inside `strata_config`
/// itself the same path resolves through its `extern crate self as
/// strata_config` declaration. An override is emitted as written, so it may
/// be relative (`crate::reexport::runtime`).
///
/// # Examples
///
/// ```rust,ignore
/// let default = resolve(None);
/// assert_eq!(default.to_string(), ":: strata_config");
///
/// let path: syn::Path = syn::parse_str("my_alias").unwrap();
/// let aliased = resolve(Some(&path));
/// assert_eq!(aliased.to_string(), "my_alias");
/// ```
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::strata_config }, |path| quote! { #path })
}
