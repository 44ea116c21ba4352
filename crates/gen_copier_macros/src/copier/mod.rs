mod attrs;

use gen_copier::{Copier, CopierError, CopierOptions, extract_struct, field::TAG_ATTRIBUTE};
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{
    Attribute, Error, ItemStruct, Result,
    parse::{Parse, ParseStream},
    spanned::Spanned as _,
};

use self::attrs::CopierAttrs;

pub(crate) struct CopierInput {
    attrs: Vec<Attribute>,
    source: ItemStruct,
    target: ItemStruct,
}

impl Parse for CopierInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let attrs = input.call(Attribute::parse_inner)?;
        let source: ItemStruct = input.parse()?;
        let target: ItemStruct = input.parse()?;

        if !input.is_empty() {
            return Err(input.error("copier! expects exactly two structs"));
        }

        Ok(CopierInput {
            attrs,
            source,
            target,
        })
    }
}

impl CopierInput {
    pub(crate) fn generate(self) -> Result<TokenStream> {
        let attrs = CopierAttrs::parse(&self.attrs)?;

        for item in [&self.source, &self.target] {
            if !item.generics.params.is_empty() {
                return Err(Error::new(
                    item.generics.span(),
                    "copier! does not support generic structs",
                ));
            }
        }

        let source = extract_struct(&self.source);
        let target = extract_struct(&self.target);

        let mut options = CopierOptions::new();
        if let Some(method_name) = attrs.method_name {
            options = options.with_method_name(method_name);
        }

        let text = Copier::new(options)
            .generate(&source.name, &source.fields, &target.name, &target.fields)
            .map_err(|e| self.copier_error(e))?;
        let copier_impl: syn::ItemImpl = syn::parse_str(&text)?;

        let source_item = strip_tags(self.source);
        let target_item = strip_tags(self.target);

        Ok(quote! {
            #source_item

            #target_item

            #copier_impl
        })
    }

    fn copier_error(&self, error: CopierError) -> Error {
        let source_field = match &error {
            CopierError::TargetFieldNotFound { source_field, .. } => source_field,
            CopierError::TypeMismatch { source_field, .. } => source_field,
        };

        let span = self
            .source
            .fields
            .iter()
            .find(|field| field.ident.as_ref().is_some_and(|i| i == source_field))
            .map(|field| field.span())
            .unwrap_or_else(Span::call_site);

        Error::new(span, error)
    }
}

fn strip_tags(mut item: ItemStruct) -> ItemStruct {
    for field in item.fields.iter_mut() {
        field.attrs.retain(|attr| !attr.path().is_ident(TAG_ATTRIBUTE));
    }

    item
}
