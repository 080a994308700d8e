use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Error, Expr, ExprLit, Lit, LitStr, MetaNameValue, Token};

/// Arguments accepted by `#[task(...)]`.
#[derive(Default)]
pub(crate) struct TaskArgs {
    /// Diagnostic name given to every task the function produces.
    pub(crate) name: Option<LitStr>,
}

impl Parse for TaskArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = TaskArgs::default();
        let pairs = Punctuated::<MetaNameValue, Token![,]>::parse_terminated(input)?;

        for pair in pairs {
            if !pair.path.is_ident("name") {
                return Err(Error::new_spanned(
                    &pair.path,
                    "unknown #[stepwise::task] argument, expected `name`",
                ));
            }

            match pair.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(lit), ..
                }) => {
                    if args.name.is_some() {
                        return Err(Error::new_spanned(lit, "`name` given more than once"));
                    }
                    args.name = Some(lit);
                }
                other => {
                    return Err(Error::new_spanned(other, "`name` must be a string literal"));
                }
            }
        }

        Ok(args)
    }
}
