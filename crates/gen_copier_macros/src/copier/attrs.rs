use syn::{Token, spanned::Spanned as _};

pub struct CopierAttrs {
    pub method_name: Option<String>,
}

impl CopierAttrs {
    pub fn parse(attrs: &[syn::Attribute]) -> syn::Result<Self> {
        let mut method_name: Option<String> = None;

        for attr in attrs {
            if !attr.path().is_ident("copier") {
                return Err(syn::Error::new(
                    attr.span(),
                    "Expected #![copier(...)], no other inner attributes are supported",
                ));
            }

            let nested = attr.parse_args_with(
                syn::punctuated::Punctuated::<syn::Meta, Token![,]>::parse_terminated,
            )?;

            for meta in nested {
                match meta {
                    syn::Meta::NameValue(mnv) if mnv.path.is_ident("method") => {
                        if let syn::Expr::Lit(syn::ExprLit {
                            lit: syn::Lit::Str(s),
                            ..
                        }) = &mnv.value
                        {
                            let name = s.value();
                            if syn::parse_str::<syn::Ident>(&name).is_err() {
                                return Err(syn::Error::new(
                                    s.span(),
                                    format!("{} is not a valid method name", name),
                                ));
                            }
                            method_name = Some(name);
                        } else {
                            return Err(syn::Error::new(
                                mnv.value.span(),
                                "Expected a string literal",
                            ));
                        }
                    }
                    other => {
                        return Err(syn::Error::new(
                            other.span(),
                            "Unexpected option, expected method = \"...\"",
                        ));
                    }
                }
            }
        }

        Ok(CopierAttrs { method_name })
    }
}
