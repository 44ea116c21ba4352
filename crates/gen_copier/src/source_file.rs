//! Locating struct declarations in Rust source files.
//!
//! Types are looked up by path: `Person` is a struct at the top level of the file,
//! `models::Person` is a struct in the inline module `models`. Modules declared in other files
//! (`mod models;`) can't be followed.

use std::{fs, path::Path};

use log::info;

use crate::{
    Copier,
    error::{GenCopierResult, SourceError},
    field::{StructDecl, extract_struct},
    options::CopierOptions,
};

/// Finds the struct at `path` in `file`.
///
/// `origin` is only used in error messages.
pub fn locate_struct<'f>(
    file: &'f syn::File,
    path: &str,
    origin: &str,
) -> Result<&'f syn::ItemStruct, SourceError> {
    let not_found = || SourceError::TypeNotFound {
        name: path.to_string(),
        origin: origin.to_string(),
    };

    let mut segments = path.split("::").collect::<Vec<_>>();
    let name = segments.pop().filter(|s| !s.is_empty()).ok_or_else(not_found)?;

    let mut items = file.items.as_slice();
    for module in segments {
        items = items
            .iter()
            .find_map(|item| match item {
                syn::Item::Mod(m) if m.ident == module => m.content.as_ref(),
                _ => None,
            })
            .map(|(_, items)| items.as_slice())
            .ok_or_else(not_found)?;
    }

    for item in items {
        match item {
            syn::Item::Struct(s) if s.ident == name => return Ok(s),
            syn::Item::Enum(e) if e.ident == name => {
                return Err(SourceError::NotAStruct {
                    name: path.to_string(),
                });
            }
            syn::Item::Union(u) if u.ident == name => {
                return Err(SourceError::NotAStruct {
                    name: path.to_string(),
                });
            }
            syn::Item::Type(t) if t.ident == name => {
                return Err(SourceError::NotAStruct {
                    name: path.to_string(),
                });
            }
            _ => (),
        }
    }

    Err(not_found())
}

/// Parses `src` and extracts the struct at `path`.
pub fn parse_struct(src: &str, path: &str, origin: &str) -> Result<StructDecl, SourceError> {
    let file = parse_file(src, origin)?;
    locate_struct(&file, path, origin).map(extract_struct)
}

fn parse_file(src: &str, origin: &str) -> Result<syn::File, SourceError> {
    syn::parse_file(src).map_err(|error| SourceError::Parse {
        origin: origin.to_string(),
        error,
    })
}

/// Generates the copier from the struct at `source` to the struct at `target`, both of which
/// are declared in `src`.
pub fn generate_from_source(
    src: &str,
    origin: &str,
    source: &str,
    target: &str,
    options: &CopierOptions,
) -> GenCopierResult<String> {
    let file = parse_file(src, origin)?;
    let source_decl = extract_struct(locate_struct(&file, source, origin)?);
    let target_decl = extract_struct(locate_struct(&file, target, origin)?);

    let text = Copier::new(options.clone()).generate(
        source,
        &source_decl.fields,
        target,
        &target_decl.fields,
    )?;

    Ok(text)
}

/// Reads `path` and generates the copier from the struct at `source` to the struct at `target`.
pub fn generate_file<P: AsRef<Path>>(
    path: P,
    source: &str,
    target: &str,
    options: &CopierOptions,
) -> GenCopierResult<String> {
    let path = path.as_ref();
    let src = fs::read_to_string(path).map_err(|e| SourceError::io(path, e))?;
    generate_from_source(&src, &path.display().to_string(), source, target, options)
}

/// Generates the copier from the structs declared in `input` and writes it to `output`.
///
/// Nothing is written if generation fails.
pub fn write_copier<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    source: &str,
    target: &str,
    options: &CopierOptions,
) -> GenCopierResult<()> {
    let text = generate_file(input, source, target, options)?;
    let output = output.as_ref();
    fs::write(output, text).map_err(|e| SourceError::io(output, e))?;
    info!("wrote copier to {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CopierError, GenCopierError};

    const SRC: &str = r##"
        pub struct Person {
            #[tag = r#"gen-copier:"identifier""#]
            pub id: u32,
            pub name: String,
        }

        pub enum Kind { A, B }

        pub mod dto {
            pub struct Person {
                pub identifier: u32,
                pub name: String,
            }

            pub mod nested {
                pub struct Deep;
            }
        }
    "##;

    #[test]
    fn finds_top_level_and_nested_structs() {
        let file = syn::parse_file(SRC).unwrap();
        assert_eq!(locate_struct(&file, "Person", "src").unwrap().ident, "Person");
        assert_eq!(locate_struct(&file, "dto::Person", "src").unwrap().ident, "Person");
        assert_eq!(locate_struct(&file, "dto::nested::Deep", "src").unwrap().ident, "Deep");
    }

    #[test]
    fn reports_missing_types() {
        let file = syn::parse_file(SRC).unwrap();
        for path in ["Missing", "dto::Missing", "other::Person", ""] {
            assert!(matches!(
                locate_struct(&file, path, "src"),
                Err(SourceError::TypeNotFound { .. })
            ));
        }
    }

    #[test]
    fn rejects_non_structs() {
        let file = syn::parse_file(SRC).unwrap();
        assert!(matches!(
            locate_struct(&file, "Kind", "src"),
            Err(SourceError::NotAStruct { .. })
        ));
    }

    #[test]
    fn reports_parse_errors() {
        let err = parse_struct("struct {", "Broken", "broken.rs").unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
        assert!(err.to_string().starts_with("cannot parse broken.rs"));
    }

    #[test]
    fn generates_from_source() {
        let options = CopierOptions::default();
        let text = generate_from_source(SRC, "src", "Person", "dto::Person", &options).unwrap();
        assert!(text.starts_with("impl Person {\n"));
        assert!(text.contains("pub fn copy_to(&self, target: &mut dto::Person)"));
        assert!(text.contains("target.identifier = source.id"));
        assert!(text.contains("target.name = source.name"));
    }

    #[test]
    fn copier_errors_are_wrapped() {
        let src = r##"
            struct A { #[tag = r#"gen-copier:"years""#] age: u32 }
            struct B { age: u32 }
        "##;

        let err =
            generate_from_source(src, "src", "A", "B", &CopierOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            GenCopierError::CopierError(CopierError::TargetFieldNotFound { .. })
        ));
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.rs");
        let err = generate_file(&path, "A", "B", &CopierOptions::default()).unwrap_err();
        assert!(matches!(err, GenCopierError::SourceError(SourceError::Io { .. })));
    }

    #[test]
    fn writes_nothing_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("model.rs");
        let output = dir.path().join("model_copier.rs");
        fs::write(&input, "struct A { x: u8 }").unwrap();

        let res = write_copier(&input, &output, "A", "Missing", &CopierOptions::default());
        assert!(res.is_err());
        assert!(!output.exists());

        fs::write(&input, "struct A { x: u8 } struct B { x: u8 }").unwrap();
        write_copier(&input, &output, "A", "B", &CopierOptions::default()).unwrap();
        let text = fs::read_to_string(&output).unwrap();
        assert!(text.contains("target.x = source.x"));
    }
}
