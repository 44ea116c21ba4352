//! Macros offered by gen-copier.
//!
//! `#[derive(Tagged)]` registers `tag` as an inert field attribute so structs with
//! `#[tag = "..."]` metadata compile, the derive itself generates nothing. `copier!` takes a
//! source and a target struct, emits both, and appends the generated copy method.

mod copier;

use proc_macro::TokenStream;
use syn::parse_macro_input;

use self::copier::CopierInput;

#[proc_macro_derive(Tagged, attributes(tag))]
pub fn tagged_derive(_input: TokenStream) -> TokenStream {
    TokenStream::new()
}

/// Declares two structs and generates a method that copies the first into the second.
///
/// ```ignore
/// copier! {
///     #![copier(method = "to_dto")]
///
///     pub struct Person {
///         #[tag = r#"gen-copier:"identifier""#]
///         pub id: u32,
///         pub name: String,
///     }
///
///     pub struct PersonDto {
///         pub identifier: u32,
///         pub name: String,
///     }
/// }
/// ```
///
/// The optional `copier` inner attribute accepts `method = "..."`. `tag` attributes are removed
/// from the emitted structs.
#[proc_macro]
pub fn copier(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as CopierInput);

    match input.generate() {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
