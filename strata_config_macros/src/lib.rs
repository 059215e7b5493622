//! Procedural macros for `strata_config`.
//!
//! The [`MergeLeft`](macro@MergeLeft) derive generates a per-type merge
//! function at build time. Structs merge field by field with left
//! precedence, recursing into nested structs through their own `MergeLeft`
//! implementations; enums merge as a whole.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `strata_config::MergeLeft`.
///
/// Visible fields (any `pub` visibility) take the left operand's value unless
/// it is zero. Private fields, and fields marked `#[merge(skip)]`, always keep
/// the left operand's value and do not take part in the zero test. Enums must
/// also implement `Default` and `PartialEq`; they are zero when equal to their
/// default.
///
/// A struct is zero when all of its visible fields are zero. If the type
/// also implements `Default`, that default must be zero: derive it, or
/// write it so every visible field is zero, before resolving it from
/// several layers.
///
/// Use `#[merge(crate = "path")]` on the type when `strata_config` is
/// imported under another name.
#[proc_macro_derive(MergeLeft, attributes(merge))]
pub fn derive_merge_left(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::merge_left::derive(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
