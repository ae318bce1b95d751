use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Field, Fields};

/// Implements `climpro_di::Build` for a struct by building each of its fields
/// from the provider. Fields marked with `#[state]` are initialized using
/// their `Default` implementation instead.
///
/// Built values are cached in the provider, so every dependent service
/// receives a clone of the same instance.
#[proc_macro_derive(Build, attributes(state))]
pub fn derive_build(input: TokenStream) -> TokenStream {
    let mut input = parse_macro_input!(input as DeriveInput);

    let Data::Struct(data) = &input.data else {
        return syn::Error::new_spanned(&input.ident, "Build can only be derived for structs")
            .to_compile_error()
            .into();
    };

    let init = |field: &Field| {
        if is_state(field) {
            quote! { ::core::default::Default::default() }
        } else {
            quote! { ::climpro_di::Build::build(provider) }
        }
    };

    let construct = match &data.fields {
        Fields::Named(fields) => {
            let names = fields.named.iter().map(|field| &field.ident);
            let inits = fields.named.iter().map(init);
            quote! { Self { #(#names: #inits),* } }
        }
        Fields::Unnamed(fields) => {
            let inits = fields.unnamed.iter().map(init);
            quote! { Self(#(#inits),*) }
        }
        Fields::Unit => quote! { Self },
    };

    let dependencies = data
        .fields
        .iter()
        .filter(|field| !is_state(field))
        .map(|field| field.ty.clone())
        .collect::<Vec<_>>();

    let ident = input.ident.clone();
    let (_, ty_generics, _) = input.generics.split_for_impl();
    let ty_generics = quote! { #ty_generics };

    let where_clause = input.generics.make_where_clause();
    where_clause
        .predicates
        .push(parse_quote! { Self: ::core::clone::Clone + 'static });
    for ty in dependencies {
        where_clause
            .predicates
            .push(parse_quote! { #ty: ::climpro_di::Build<__Provider> });
    }

    let mut impl_generics = input.generics.clone();
    impl_generics
        .params
        .push(parse_quote! { __Provider: ::climpro_di::Provider });
    let (impl_generics, _, where_clause) = impl_generics.split_for_impl();

    quote! {
        impl #impl_generics ::climpro_di::Build<__Provider> for #ident #ty_generics
        #where_clause
        {
            fn build(provider: &mut __Provider) -> Self {
                if let ::core::option::Option::Some(cached) =
                    ::climpro_di::Provider::cache(provider).get::<Self>()
                {
                    return ::core::clone::Clone::clone(cached);
                }

                let built = #construct;
                ::climpro_di::Provider::cache(provider)
                    .insert(::core::clone::Clone::clone(&built));
                built
            }
        }
    }
    .into()
}

fn is_state(field: &Field) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident("state"))
}
