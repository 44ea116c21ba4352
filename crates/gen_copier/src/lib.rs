//! gen-copier generates methods that copy the fields of one struct into another.
//!
//! Given a source and a target struct, gen-copier decides which field of the source is copied
//! into which field of the target and renders the Rust source of a method that performs the
//! copy:
//!
//! ```ignore
//! struct Person {
//!     #[tag = r#"gen-copier:"identifier""#]
//!     id: u32,
//!     name: String,
//! }
//!
//! struct PersonDto {
//!     identifier: u32,
//!     name: String,
//! }
//! ```
//!
//! generating the copier from `Person` to `PersonDto` results in:
//!
//! ```ignore
//! impl Person {
//!     #[allow(clippy::clone_on_copy)]
//!     pub fn copy_to(&self, target: &mut PersonDto) {
//!         let source = self;
//!         target.identifier = source.id.clone();
//!         target.name = source.name.clone();
//!     }
//! }
//! ```
//!
//! # Matching fields
//!
//! The mapping is resolved in two passes over the fields of the source struct.
//!
//! The first pass looks at fields with a `gen-copier:"<target field>"` directive in their
//! `#[tag = "..."]` metadata. The named target field must exist and must have the same type
//! signature, otherwise generation fails with a [`CopierError`]. Directives are an explicit
//! contract, a directive that can't be honored is a mistake on the caller's end.
//!
//! The second pass matches the remaining fields by name. A same-named target field with the
//! same type signature is copied, a same-named field with a different signature is silently
//! skipped. Target fields that are already written by a directive are never written again.
//!
//! # Type signatures
//!
//! Types are compared syntactically, see [`TypeSignature`]. Only bare identifiers, paths with a
//! single qualifying segment, and `Vec`s of bare identifiers are supported. Fields of any other
//! type are never copied.
//!
//! # Output
//!
//! The assignments are emitted in lexicographic order of the source field name, generating the
//! same copier twice results in the same text. Progress is reported with the `log` crate, it
//! never affects the result.
//!
//! Tagged structs can be compiled by deriving `Tagged` from gen-copier-macros, which registers
//! `tag` as an inert field attribute. The same crate provides the `copier!` macro, which
//! generates the copier at compile time.

use itertools::Itertools as _;
use log::info;

pub mod directive;
pub mod emit;
pub mod error;
pub mod field;
pub mod mapping;
pub mod options;
pub mod source_file;

pub use crate::{
    error::{CopierError, GenCopierError, GenCopierResult, SourceError},
    field::{FieldDescriptor, StructDecl, TypeSignature, extract_fields, extract_struct},
    mapping::{MappingOrigin, MappingTable, TargetIndex},
    options::CopierOptions,
    source_file::{generate_file, generate_from_source, write_copier},
};

/// Generates copiers with a fixed set of options.
///
/// A `Copier` holds no state besides its options, every call to [`Copier::generate`] builds and
/// discards its own target index and mapping table.
#[derive(Debug, Clone, Default)]
pub struct Copier {
    options: CopierOptions,
}

impl Copier {
    pub fn new(options: CopierOptions) -> Self {
        Copier { options }
    }

    pub fn options(&self) -> &CopierOptions {
        &self.options
    }

    /// Generates the copier from `source_name` to `target_name`.
    ///
    /// No text is returned if a directive can't be honored.
    pub fn generate(
        &self,
        source_name: &str,
        source_fields: &[FieldDescriptor],
        target_name: &str,
        target_fields: &[FieldDescriptor],
    ) -> Result<String, CopierError> {
        info!(
            "generating copier between source {} and target {}",
            source_name, target_name
        );

        let targets = TargetIndex::new(target_fields);
        let table = mapping::resolve_mapping(source_fields, &targets, target_name)?;

        info!(
            "final field mappings: {{{}}}",
            table
                .iter()
                .map(|(source, entry)| format!("{} -> {}", source, entry.target))
                .join(", ")
        );

        let receiver = self.options.receiver_type(source_name);
        let text = emit::render_copier(receiver, target_name, &self.options.method_name, &table);

        info!("copier method generated successfully");
        Ok(text)
    }
}

/// Generates the copier from `source_name` to `target_name` with the default options.
pub fn generate_copier(
    source_name: &str,
    source_fields: &[FieldDescriptor],
    target_name: &str,
    target_fields: &[FieldDescriptor],
) -> Result<String, CopierError> {
    Copier::default().generate(source_name, source_fields, target_name, target_fields)
}
