use convert_case::{Case, Casing};
use kindling_reflect::{constructor, signature_parameter_names};
use proc_macro2::{Ident, TokenStream};
use quote::quote;
use std::ops::Deref;
use syn::spanned::Spanned;
use syn::{Error, GenericArgument, ItemImpl, PathArguments, Result, ReturnType, Type};

fn type_ident(item_impl: &ItemImpl) -> Result<&Ident> {
    if let Type::Path(path) = item_impl.self_ty.deref() {
        if let Some(segment) = path.path.segments.last() {
            return Ok(&segment.ident);
        }
    }

    Err(Error::new(
        item_impl.self_ty.span(),
        "Components can only be declared on named types!",
    ))
}

fn is_result(output: &ReturnType) -> bool {
    match output {
        ReturnType::Type(_, ty) => match ty.deref() {
            Type::Path(path) => path.path.segments.last().map_or(false, |segment| {
                segment.ident == "Result"
                    && matches!(
                        &segment.arguments,
                        PathArguments::AngleBracketed(arguments)
                            if matches!(arguments.args.first(), Some(GenericArgument::Type(_)))
                    )
            }),
            _ => false,
        },
        ReturnType::Default => false,
    }
}

pub fn expand_component(item_impl: &ItemImpl) -> Result<TokenStream> {
    if item_impl.trait_.is_some() {
        return Err(Error::new(
            item_impl.span(),
            "Components must be declared on inherent impl blocks!",
        ));
    }

    let self_ty = &item_impl.self_ty;
    let name = type_ident(item_impl)?.to_string().to_case(Case::Snake);
    let (impl_generics, _, where_clause) = item_impl.generics.split_for_impl();

    let (parameters, creation) = match constructor(item_impl) {
        Some(constructor) => {
            let parameters = signature_parameter_names(&constructor.sig)
                .map_err(|error| Error::new(constructor.sig.span(), error))?;
            let arguments = (0..parameters.len()).map(|index| quote!(arguments.get(#index)?));
            let call = quote!(Self::new(#(#arguments),*));

            let creation = if is_result(&constructor.sig.output) {
                quote! {
                    #call.map_err(|error| kindling_di::ContainerError::construction(
                        <Self as kindling_di::component::Component>::name(),
                        error,
                    ))
                }
            } else {
                quote!(Ok(#call))
            };

            (parameters, creation)
        }
        None => (vec![], quote!(Ok(Default::default()))),
    };

    let arguments_ident = if parameters.is_empty() {
        quote!(_arguments)
    } else {
        quote!(arguments)
    };

    Ok(quote! {
        #item_impl

        #[automatically_derived]
        impl #impl_generics kindling_di::component::Component for #self_ty #where_clause {
            fn parameters() -> &'static [&'static str] {
                &[#(#parameters),*]
            }

            fn create(#arguments_ident: &kindling_di::injected::Arguments) -> Result<Self, kindling_di::ContainerError> {
                #creation
            }

            fn name() -> std::borrow::Cow<'static, str> {
                std::borrow::Cow::Borrowed(#name)
            }
        }
    })
}
