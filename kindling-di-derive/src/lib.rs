use crate::component::expand_component;
use crate::injected::expand_injected;
use proc_macro::TokenStream;
use syn::{parse_macro_input, Error, ExprClosure, ItemImpl};

mod component;
mod injected;

/// Implements `Component` for the type of an `impl` block. Dependency tags are the parameter names
/// of the `new` constructor.
#[proc_macro_attribute]
pub fn component(_attr: TokenStream, input: TokenStream) -> TokenStream {
    let item_impl = parse_macro_input!(input as ItemImpl);
    expand_component(&item_impl)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

/// Turns a closure with typed parameters into an `Injected` callable, depending on tags named
/// after the parameters.
#[proc_macro]
pub fn injected(input: TokenStream) -> TokenStream {
    let closure = parse_macro_input!(input as ExprClosure);
    expand_injected(&closure)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}
