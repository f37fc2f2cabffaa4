//! Reflection of callable parameter names, which double as dependency tags.
//!
//! Dependency injection in `kindling` is name-based: a constructor declared as
//! `fn new(database: InstancePtr<Database>, config: InstancePtr<ConfigStore>)` depends on the tags
//! `database` and `config`. This crate extracts such names from the source text of a callable:
//!
//! * a free `fn` item - its own parameters,
//! * an `impl` block - the parameters of the associated `new` function, wherever it's declared
//! among other members,
//! * a closure - its parameters (closures are not valid items on their own, so they are parsed
//! inside a synthetic assignment shell),
//! * a `const` or `static` item initialized with a closure.
//!
//! Only bound identifiers are returned; type annotations and `self` receivers are discarded.
//!
//! ```
//! use kindling_reflect::parameter_names;
//!
//! assert_eq!(
//!     parameter_names("|database: Database, config| 0").unwrap(),
//!     ["database", "config"]
//! );
//! ```

mod error;

pub use error::ReflectError;

use itertools::Itertools;
use syn::ext::IdentExt;
use syn::{Expr, ExprClosure, File, FnArg, ImplItem, ImplItemFn, Item, ItemImpl, Pat, Signature};

/// Name of the associated function treated as the constructor of an `impl` block.
pub const CONSTRUCTOR: &str = "new";

const SHELL_PREFIX: &str = "static __CALLABLE: _ = ";
const SHELL_SUFFIX: &str = ";";

/// Returns parameter names of the callable described by `source`, in declaration order.
///
/// An `impl` block without a constructor yields an empty list, since such type takes no injected
/// parameters. Text which parses, but does not describe a callable, results in
/// [ReflectError::MalformedCallable].
pub fn parameter_names(source: &str) -> Result<Vec<String>, ReflectError> {
    if source.trim().is_empty() {
        return Err(ReflectError::MalformedCallable(
            "empty callable source".to_string(),
        ));
    }

    let file = match syn::parse_str::<File>(source) {
        Ok(file) => file,
        Err(_) => syn::parse_str::<File>(&format!("{SHELL_PREFIX}{source}{SHELL_SUFFIX}"))
            .map_err(|error| ReflectError::Parse {
                callable: source.to_string(),
                message: error.to_string(),
            })?,
    };

    let item = file.items.first().ok_or_else(|| {
        ReflectError::MalformedCallable(format!("no callable found in: {source}"))
    })?;

    item_parameter_names(item).map(Option::unwrap_or_default)
}

/// Returns parameter names of a parsed item, or `None` if the item is callable, but has no
/// parameter-bearing node (an `impl` block without a constructor).
pub fn item_parameter_names(item: &Item) -> Result<Option<Vec<String>>, ReflectError> {
    match item {
        Item::Fn(item_fn) => signature_parameter_names(&item_fn.sig).map(Some),
        Item::Impl(item_impl) => constructor(item_impl)
            .map(|constructor| signature_parameter_names(&constructor.sig))
            .transpose(),
        Item::Const(item_const) => expr_parameter_names(&item_const.expr).map(Some),
        Item::Static(item_static) => expr_parameter_names(&item_static.expr).map(Some),
        _ => Err(ReflectError::MalformedCallable(
            "expected a function, closure or impl block".to_string(),
        )),
    }
}

/// Finds the constructor among all members of an `impl` block.
pub fn constructor(item_impl: &ItemImpl) -> Option<&ImplItemFn> {
    item_impl.items.iter().find_map(|item| match item {
        ImplItem::Fn(item_fn) if item_fn.sig.ident == CONSTRUCTOR => Some(item_fn),
        _ => None,
    })
}

/// Returns the parameter names of a function signature, skipping `self` receivers.
pub fn signature_parameter_names(signature: &Signature) -> Result<Vec<String>, ReflectError> {
    signature
        .inputs
        .iter()
        .filter_map(|input| match input {
            FnArg::Typed(pat_type) => Some(&*pat_type.pat),
            FnArg::Receiver(_) => None,
        })
        .enumerate()
        .map(|(index, pat)| {
            binding_name(pat).ok_or_else(|| unbound_parameter(index, &signature.ident.to_string()))
        })
        .try_collect()
}

/// Returns the parameter names of a closure.
pub fn closure_parameter_names(closure: &ExprClosure) -> Result<Vec<String>, ReflectError> {
    closure
        .inputs
        .iter()
        .enumerate()
        .map(|(index, pat)| binding_name(pat).ok_or_else(|| unbound_parameter(index, "closure")))
        .try_collect()
}

fn expr_parameter_names(expr: &Expr) -> Result<Vec<String>, ReflectError> {
    match expr {
        Expr::Closure(closure) => closure_parameter_names(closure),
        Expr::Paren(paren) => expr_parameter_names(&paren.expr),
        Expr::Group(group) => expr_parameter_names(&group.expr),
        _ => Err(ReflectError::MalformedCallable(
            "expression is not a closure".to_string(),
        )),
    }
}

fn binding_name(pat: &Pat) -> Option<String> {
    match pat {
        Pat::Ident(pat_ident) if pat_ident.subpat.is_none() => {
            Some(pat_ident.ident.unraw().to_string())
        }
        Pat::Type(pat_type) => binding_name(&pat_type.pat),
        Pat::Reference(reference) => binding_name(&reference.pat),
        Pat::Paren(paren) => binding_name(&paren.pat),
        _ => None,
    }
}

fn unbound_parameter(index: usize, callable: &str) -> ReflectError {
    ReflectError::MalformedCallable(format!(
        "parameter {index} of {callable} does not bind a single identifier"
    ))
}
