mod args;
use args::TaskArgs;

use proc_macro::TokenStream;
use proc_macro2::{Ident, Span};
use quote::{format_ident, quote};
use syn::{
    Error, FnArg, GenericArgument, GenericParam, ItemFn, Pat, PatIdent, PathArguments,
    ReturnType, Type, parse_macro_input, parse_quote,
};

/// Turns an `async fn` into a function returning a suspended `stepwise::Task`.
///
/// Calling the function does not run its body. `-> Result<T, E>` produces a
/// `Task<T, E>`; any other return type `R` produces a `Task<R>`.
///
/// Arguments are moved into the task, so they must be `'static`.
#[proc_macro_attribute]
pub fn task(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as TaskArgs);
    let input = parse_macro_input!(item as ItemFn);

    match expand(args, input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(args: TaskArgs, input: ItemFn) -> syn::Result<proc_macro2::TokenStream> {
    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = input;

    if sig.asyncness.is_none() {
        return Err(Error::new_spanned(
            sig.fn_token,
            "#[stepwise::task] must be used on an async function",
        ));
    }

    // The body keeps the original signature inside a nested async fn, so
    // `?` and return type inference behave exactly as written.
    let body_ident = Ident::new("__stepwise_body", Span::call_site());
    let mut body_sig = sig.clone();
    body_sig.ident = body_ident.clone();

    let mut outer_sig = sig;
    outer_sig.asyncness = None;

    let mut call_args = Vec::new();
    for (i, input) in outer_sig.inputs.iter_mut().enumerate() {
        match input {
            FnArg::Receiver(receiver) => {
                return Err(Error::new_spanned(
                    receiver,
                    "#[stepwise::task] cannot be used on methods taking `self`",
                ));
            }
            FnArg::Typed(typed) => {
                let ident = format_ident!("__stepwise_arg{}", i);
                typed.pat = Box::new(Pat::Ident(PatIdent {
                    attrs: Vec::new(),
                    by_ref: None,
                    mutability: None,
                    ident: ident.clone(),
                    subpat: None,
                }));
                call_args.push(ident);
            }
        }
    }

    let fallible = match &outer_sig.output {
        ReturnType::Default => {
            outer_sig.output = parse_quote!(-> ::stepwise::Task<()>);
            false
        }
        ReturnType::Type(_, ty) => match result_parts(ty) {
            Some((ok, err)) => {
                outer_sig.output = parse_quote!(-> ::stepwise::Task<#ok, #err>);
                true
            }
            None => {
                let ty = ty.clone();
                outer_sig.output = parse_quote!(-> ::stepwise::Task<#ty>);
                false
            }
        },
    };

    let builder = match args.name {
        Some(name) => quote!(::stepwise::TaskBuilder::new().name(#name)),
        None => quote!(::stepwise::TaskBuilder::new()),
    };

    let build = if fallible {
        quote!(build)
    } else {
        quote!(build_infallible)
    };

    // Lifetimes are left to inference: they may be late-bound.
    let params: Vec<&Ident> = body_sig
        .generics
        .params
        .iter()
        .filter_map(|param| match param {
            GenericParam::Type(ty) => Some(&ty.ident),
            GenericParam::Const(konst) => Some(&konst.ident),
            GenericParam::Lifetime(_) => None,
        })
        .collect();
    let turbofish = if params.is_empty() {
        quote!()
    } else {
        quote!(::<#(#params),*>)
    };

    Ok(quote! {
        #(#attrs)*
        #vis #outer_sig {
            #body_sig #block

            #builder.#build(#body_ident #turbofish(#(#call_args),*))
        }
    })
}

/// Splits `Result<T, E>` into `(T, E)`.
///
/// Single-argument aliases such as `io::Result<T>` are not recognised and
/// produce an infallible task whose value is the `Result`.
fn result_parts(ty: &Type) -> Option<(&Type, &Type)> {
    let Type::Path(path) = ty else {
        return None;
    };

    let segment = path.path.segments.last()?;
    if segment.ident != "Result" {
        return None;
    }

    let PathArguments::AngleBracketed(generics) = &segment.arguments else {
        return None;
    };

    let mut types = generics.args.iter().filter_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    });

    match (types.next(), types.next(), types.next()) {
        (Some(ok), Some(err), None) => Some((ok, err)),
        _ => None,
    }
}
