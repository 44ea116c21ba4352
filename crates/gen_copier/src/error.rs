//! Everything related to errors.

use std::{io, path::PathBuf, sync::Arc};

use thiserror::Error;

/// Alias that is used for the `Result`s returned by the file-level entry points.
pub type GenCopierResult<T> = Result<T, GenCopierError>;

/// Errors that abort the generation of a copier.
///
/// Both variants are raised while resolving `gen-copier` directives. Nothing else the resolver
/// encounters is an error: unsupported type shapes, fields without a directive, and same-named
/// fields with different types are simply left out of the generated method.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CopierError {
    #[error(
        "target field {target_field} not found in type {target_type} (requested by source field {source_field})"
    )]
    TargetFieldNotFound {
        source_field: String,
        target_field: String,
        target_type: String,
    },
    #[error(
        "type mismatch: source field {source_field} ({source_type}) and target field {target_field} ({target_type}) have different types"
    )]
    TypeMismatch {
        source_field: String,
        source_type: String,
        target_field: String,
        target_type: String,
    },
}

/// Errors raised while locating struct declarations in a source file.
#[derive(Debug, Error, Clone)]
pub enum SourceError {
    #[error("cannot read {}: {error}", path.display())]
    Io {
        path: PathBuf,
        error: Arc<io::Error>,
    },
    #[error("cannot parse {origin}: {error}")]
    Parse { origin: String, error: syn::Error },
    #[error("no item named {name} in {origin}")]
    TypeNotFound { name: String, origin: String },
    #[error("{name} is not a struct")]
    NotAStruct { name: String },
}

impl SourceError {
    pub(crate) fn io(path: impl Into<PathBuf>, error: io::Error) -> Self {
        SourceError::Io {
            path: path.into(),
            error: Arc::new(error),
        }
    }
}

/// All different errors.
#[derive(Debug, Error, Clone)]
pub enum GenCopierError {
    #[error("Copier error: {0}")]
    CopierError(CopierError),
    #[error("Source error: {0}")]
    SourceError(SourceError),
}

macro_rules! impl_from {
    ($type:ident) => {
        impl From<$type> for GenCopierError {
            #[inline]
            fn from(e: $type) -> Self {
                GenCopierError::$type(e)
            }
        }
    };
}

impl_from!(CopierError);
impl_from!(SourceError);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_field_not_found_names_everything() {
        let err = CopierError::TargetFieldNotFound {
            source_field: "age".into(),
            target_field: "years".into(),
            target_type: "Person".into(),
        };

        let msg = err.to_string();
        assert!(msg.contains("age"));
        assert!(msg.contains("years"));
        assert!(msg.contains("Person"));
    }

    #[test]
    fn type_mismatch_names_both_signatures() {
        let err = CopierError::TypeMismatch {
            source_field: "id".into(),
            source_type: "u32".into(),
            target_field: "identifier".into(),
            target_type: "String".into(),
        };

        assert_eq!(
            err.to_string(),
            "type mismatch: source field id (u32) and target field identifier (String) have different types"
        );
    }

    #[test]
    fn wraps_into_gen_copier_error() {
        let err: GenCopierError = SourceError::NotAStruct {
            name: "Color".into(),
        }
        .into();

        assert!(matches!(err, GenCopierError::SourceError(_)));
        assert_eq!(err.to_string(), "Source error: Color is not a struct");
    }
}
