//! Field extraction from struct declarations.
//!
//! Every field of a struct is turned into a [`FieldDescriptor`] that contains its name, a
//! syntactic rendering of its type, and the raw metadata attached to it with `#[tag = "..."]`.
//! Nothing is resolved: two types are considered equal if and only if they are spelled the same
//! way, which means `String` and `std::string::String` don't match while two unrelated types
//! that are both called `Id` in different modules do.

use std::fmt;

use log::{debug, warn};
use quote::ToTokens as _;

/// Name of the field attribute that carries metadata.
pub const TAG_ATTRIBUTE: &str = "tag";

/// Syntactic type signature of a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSignature {
    /// A supported type shape, rendered as text.
    Named(String),
    /// Any other type shape. Its textual form is empty and it never matches another signature,
    /// not even another unsupported one.
    Unsupported,
}

impl TypeSignature {
    /// Returns the textual form of this signature, an empty string if it's unsupported.
    pub fn as_str(&self) -> &str {
        match self {
            TypeSignature::Named(s) => s.as_str(),
            TypeSignature::Unsupported => "",
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, TypeSignature::Named(_))
    }

    /// Returns `true` if a value with this signature can be copied into a field with the
    /// `other` signature.
    pub fn is_compatible_with(&self, other: &TypeSignature) -> bool {
        match (self, other) {
            (TypeSignature::Named(a), TypeSignature::Named(b)) => a == b,
            _ => false,
        }
    }

    /// Derives the signature of `ty`.
    ///
    /// Supported shapes are a bare identifier (`u32`), a path with one qualifying segment
    /// (`chrono::NaiveDate`), and a `Vec` of a bare identifier (`Vec<Tag>`). Invisible groups and
    /// parentheses are looked through, everything else is unsupported.
    pub fn of(ty: &syn::Type) -> Self {
        match ty {
            syn::Type::Group(group) => TypeSignature::of(&group.elem),
            syn::Type::Paren(paren) => TypeSignature::of(&paren.elem),
            syn::Type::Path(path) if path.qself.is_none() && path.path.leading_colon.is_none() => {
                path_signature(&path.path)
            }
            _ => TypeSignature::Unsupported,
        }
    }
}

impl fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn path_signature(path: &syn::Path) -> TypeSignature {
    let segments = path.segments.iter().collect::<Vec<_>>();

    match segments.as_slice() {
        [seq] if seq.ident == "Vec" => match vec_element(&seq.arguments) {
            Some(elem) => TypeSignature::Named(format!("Vec<{}>", elem)),
            None => TypeSignature::Unsupported,
        },
        [ty] if ty.arguments.is_none() => TypeSignature::Named(ty.ident.to_string()),
        [module, ty] if module.arguments.is_none() && ty.arguments.is_none() => {
            TypeSignature::Named(format!("{}::{}", module.ident, ty.ident))
        }
        _ => TypeSignature::Unsupported,
    }
}

fn vec_element(args: &syn::PathArguments) -> Option<&syn::Ident> {
    let syn::PathArguments::AngleBracketed(args) = args else {
        return None;
    };

    if args.args.len() != 1 {
        return None;
    }

    match args.args.first()? {
        syn::GenericArgument::Type(elem) => bare_ident(elem),
        _ => None,
    }
}

fn bare_ident(ty: &syn::Type) -> Option<&syn::Ident> {
    match ty {
        syn::Type::Group(group) => bare_ident(&group.elem),
        syn::Type::Paren(paren) => bare_ident(&paren.elem),
        syn::Type::Path(path) if path.qself.is_none() => path.path.get_ident(),
        _ => None,
    }
}

/// A single field of a struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// The name of the field, empty if the field is anonymous.
    pub name: String,
    pub type_signature: TypeSignature,
    /// Raw metadata, the unquoted contents of the field's `tag` attributes.
    pub metadata: String,
}

impl FieldDescriptor {
    pub fn new(
        name: impl Into<String>,
        type_signature: TypeSignature,
        metadata: impl Into<String>,
    ) -> Self {
        FieldDescriptor {
            name: name.into(),
            type_signature,
            metadata: metadata.into(),
        }
    }

    /// Anonymous fields can't be the source or target of a copy.
    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }

    /// Builds the descriptor of a single field.
    pub fn from_field(field: &syn::Field) -> Self {
        let name = field
            .ident
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();

        let type_signature = TypeSignature::of(&field.ty);
        if !type_signature.is_supported() {
            debug!(
                "field {} has an unsupported type shape: {}",
                if name.is_empty() { "<anonymous>" } else { name.as_str() },
                field.ty.to_token_stream()
            );
        }

        FieldDescriptor {
            metadata: field_metadata(field),
            name,
            type_signature,
        }
    }
}

/// The name and fields of a struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDecl {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
}

impl StructDecl {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        StructDecl {
            name: name.into(),
            fields,
        }
    }
}

/// Extracts the descriptors of all fields in declaration order. Tuple-struct fields are
/// anonymous, a unit struct has no fields.
pub fn extract_fields(fields: &syn::Fields) -> Vec<FieldDescriptor> {
    fields.iter().map(FieldDescriptor::from_field).collect()
}

/// Extracts the name and fields of `item`.
pub fn extract_struct(item: &syn::ItemStruct) -> StructDecl {
    StructDecl {
        name: item.ident.to_string(),
        fields: extract_fields(&item.fields),
    }
}

fn field_metadata(field: &syn::Field) -> String {
    let mut parts = Vec::new();

    for attr in &field.attrs {
        if !attr.path().is_ident(TAG_ATTRIBUTE) {
            continue;
        }

        match &attr.meta {
            syn::Meta::NameValue(mnv) => match &mnv.value {
                syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(s),
                    ..
                }) => parts.push(s.value()),
                other => warn!(
                    "ignoring tag attribute with a non-string value: {}",
                    other.to_token_stream()
                ),
            },
            other => warn!(
                "ignoring malformed tag attribute: {}",
                other.to_token_stream()
            ),
        }
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;

    fn signature(ty: syn::Type) -> TypeSignature {
        TypeSignature::of(&ty)
    }

    #[test]
    fn bare_identifier() {
        assert_eq!(signature(parse_quote!(u32)).as_str(), "u32");
        assert_eq!(signature(parse_quote!(String)).as_str(), "String");
    }

    #[test]
    fn qualified_identifier() {
        assert_eq!(
            signature(parse_quote!(chrono::NaiveDate)).as_str(),
            "chrono::NaiveDate"
        );
    }

    #[test]
    fn vec_of_identifier() {
        assert_eq!(signature(parse_quote!(Vec<Tag>)).as_str(), "Vec<Tag>");
        assert_eq!(signature(parse_quote!(Vec<(u8)>)).as_str(), "Vec<u8>");
    }

    #[test]
    fn unsupported_shapes() {
        let shapes: Vec<syn::Type> = vec![
            parse_quote!(&'static str),
            parse_quote!(*const u8),
            parse_quote!(HashMap<String, u32>),
            parse_quote!(Option<u32>),
            parse_quote!(Vec<Vec<u8>>),
            parse_quote!(Vec<model::Tag>),
            parse_quote!((u8, u8)),
            parse_quote!([u8; 4]),
            parse_quote!(Box<dyn Fn()>),
            parse_quote!(std::string::String),
            parse_quote!(::std::string::String),
            parse_quote!(<T as Trait>::Assoc),
        ];

        for shape in shapes {
            let sig = TypeSignature::of(&shape);
            assert_eq!(sig, TypeSignature::Unsupported);
            assert_eq!(sig.as_str(), "");
        }
    }

    #[test]
    fn unsupported_never_matches() {
        let named = TypeSignature::Named("u32".into());
        assert!(named.is_compatible_with(&named.clone()));
        assert!(!named.is_compatible_with(&TypeSignature::Unsupported));
        assert!(!TypeSignature::Unsupported.is_compatible_with(&named));
        assert!(!TypeSignature::Unsupported.is_compatible_with(&TypeSignature::Unsupported));
    }

    #[test]
    fn textual_comparison_only() {
        let short = signature(parse_quote!(String));
        let long = signature(parse_quote!(string::String));
        assert!(!short.is_compatible_with(&long));
    }

    #[test]
    fn extracts_named_fields_in_order() {
        let item: syn::ItemStruct = parse_quote! {
            struct Person {
                #[tag = r#"gen-copier:"identifier""#]
                id: u32,
                name: String,
                tags: Vec<Tag>,
            }
        };

        let decl = extract_struct(&item);
        assert_eq!(decl.name, "Person");
        assert_eq!(
            decl.fields,
            vec![
                FieldDescriptor::new(
                    "id",
                    TypeSignature::Named("u32".into()),
                    r#"gen-copier:"identifier""#
                ),
                FieldDescriptor::new("name", TypeSignature::Named("String".into()), ""),
                FieldDescriptor::new("tags", TypeSignature::Named("Vec<Tag>".into()), ""),
            ]
        );
    }

    #[test]
    fn tuple_fields_are_anonymous() {
        let item: syn::ItemStruct = parse_quote! {
            struct Wrapper(#[tag = r#"gen-copier:"inner""#] u32, String);
        };

        let decl = extract_struct(&item);
        assert_eq!(decl.fields.len(), 2);
        assert!(decl.fields.iter().all(FieldDescriptor::is_anonymous));
        assert_eq!(decl.fields[0].metadata, r#"gen-copier:"inner""#);
    }

    #[test]
    fn unit_struct_has_no_fields() {
        let item: syn::ItemStruct = parse_quote! { struct Marker; };
        assert!(extract_struct(&item).fields.is_empty());
    }

    #[test]
    fn joins_multiple_tags_and_ignores_other_attributes() {
        let item: syn::ItemStruct = parse_quote! {
            struct Row {
                #[tag = r#"json:"id""#]
                #[serde(rename = "ident")]
                #[tag = r#"gen-copier:"key""#]
                #[tag(oops)]
                #[tag = 5]
                id: u64,
            }
        };

        let decl = extract_struct(&item);
        assert_eq!(decl.fields[0].metadata, r#"json:"id" gen-copier:"key""#);
    }
}
