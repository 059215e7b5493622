//! Generates `MergeLeft` implementations.
//!
//! Structs get a field walk: each visible field is merged with the
//! corresponding field of the right operand, while invisible fields are moved
//! from the left operand untouched. Enums compare against their default.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DataStruct, DeriveInput, Generics, Member, parse_quote};

use super::attrs::{is_visible, parse_type_attrs};
use super::crate_path;

/// One struct field as seen by the generator.
pub(crate) struct FieldPlan {
    pub(crate) member: Member,
    pub(crate) visible: bool,
}

/// Build the `MergeLeft` implementation for the input type.
pub(crate) fn derive(input: DeriveInput) -> syn::Result<TokenStream> {
    let attrs = parse_type_attrs(&input.attrs)?;
    let krate = crate_path::resolve(attrs.crate_path.as_ref());
    let ident = input.ident;

    match input.data {
        Data::Struct(data) => {
            let plan = plan_fields(&data)?;
            let generics = with_merge_bounds(input.generics, &krate);
            Ok(struct_impl(&ident, &generics, &plan, &krate))
        }
        Data::Enum(_) => Ok(enum_impl(&ident, &input.generics, &krate)),
        Data::Union(data) => Err(syn::Error::new_spanned(
            data.union_token,
            "MergeLeft cannot be derived for unions",
        )),
    }
}

/// Classify each field of the struct in declaration order.
pub(crate) fn plan_fields(data: &DataStruct) -> syn::Result<Vec<FieldPlan>> {
    data.fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let member = field
                .ident
                .clone()
                .map_or_else(|| Member::Unnamed(index.into()), Member::Named);
            Ok(FieldPlan {
                member,
                visible: is_visible(field)?,
            })
        })
        .collect()
}

/// Add a `MergeLeft` bound to every type parameter.
fn with_merge_bounds(mut generics: Generics, krate: &TokenStream) -> Generics {
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(#krate::MergeLeft));
    }
    generics
}

pub(crate) fn struct_impl(
    ident: &syn::Ident,
    generics: &Generics,
    plan: &[FieldPlan],
    krate: &TokenStream,
) -> TokenStream {
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let zero_checks = plan.iter().filter(|f| f.visible).map(|f| {
        let member = &f.member;
        quote! { && #krate::MergeLeft::is_zero(&self.#member) }
    });

    let left_bindings = plan.iter().enumerate().map(|(i, f)| {
        let member = &f.member;
        let binding = format_ident!("__left_{}", i);
        quote! { #member: #binding }
    });

    let right_bindings = plan.iter().enumerate().filter(|(_, f)| f.visible).map(|(i, f)| {
        let member = &f.member;
        let binding = format_ident!("__right_{}", i);
        quote! { #member: #binding }
    });

    let merged_fields = plan.iter().enumerate().map(|(i, f)| {
        let member = &f.member;
        let left = format_ident!("__left_{}", i);
        if f.visible {
            let right = format_ident!("__right_{}", i);
            quote! { #member: #krate::MergeLeft::merge_left(#left, #right) }
        } else {
            quote! { #member: #left }
        }
    });

    quote! {
        #[automatically_derived]
        impl #impl_generics #krate::MergeLeft for #ident #ty_generics #where_clause {
            fn is_zero(&self) -> bool {
                true #(#zero_checks)*
            }

            fn merge_left(self, right: Self) -> Self {
                let Self { #(#left_bindings,)* } = self;
                let Self { #(#right_bindings,)* .. } = right;
                Self { #(#merged_fields,)* }
            }
        }
    }
}

pub(crate) fn enum_impl(ident: &syn::Ident, generics: &Generics, krate: &TokenStream) -> TokenStream {
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    quote! {
        #[automatically_derived]
        impl #impl_generics #krate::MergeLeft for #ident #ty_generics #where_clause {
            fn is_zero(&self) -> bool {
                *self == <Self as ::core::default::Default>::default()
            }
        }
    }
}
