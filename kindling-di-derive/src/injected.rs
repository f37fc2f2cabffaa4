use kindling_reflect::parameter_names;
use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use syn::spanned::Spanned;
use syn::{Error, ExprClosure, Pat, Result};

pub fn expand_injected(closure: &ExprClosure) -> Result<TokenStream> {
    if let Some(input) = closure
        .inputs
        .iter()
        .find(|input| !matches!(input, Pat::Type(_)))
    {
        return Err(Error::new(
            input.span(),
            "Injected closure parameters must have explicit types!",
        ));
    }

    let source = closure.to_token_stream().to_string();
    let names = parameter_names(&source).map_err(|error| Error::new(closure.span(), error))?;
    let signature = format!("|{}|", names.join(", "));
    let arguments = (0..names.len()).map(|index| quote!(arguments.get(#index)?));
    let arguments_ident = if names.is_empty() {
        quote!(_arguments)
    } else {
        quote!(arguments)
    };

    Ok(quote! {
        {
            let callable = #closure;
            let parameters: &[&str] = &[#(#names),*];
            kindling_di::injected::Injected::new(
                #signature,
                parameters.iter().copied(),
                move |#arguments_ident: &kindling_di::injected::Arguments| {
                    Ok(callable(#(#arguments),*))
                },
            )
        }
    })
}
