//! Error types for table generation
//!
//! Every error here is fatal: generation stops at the first one and no
//! output is produced.

use miette::{Diagnostic, SourceSpan};
use progmodel_decls::Span;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum TableGenError {
    #[error("Builtin `{builtin}` mixes generic types with different numbers of {dimension}")]
    #[diagnostic(
        code(progmodel::tablegen::incompatible_generic_types),
        help("The number of {dimension} should be equal or 1 for all generic types in a declaration")
    )]
    IncompatibleGenericTypes {
        builtin: String,
        dimension: &'static str,
        /// The generic type that introduced the conflicting length
        generic: String,
        expected: usize,
        found: usize,
        #[label("`{generic}` has {found} {dimension}, an earlier generic type has {expected}")]
        span: SourceSpan,
    },

    #[error("Image type `{type_name}` has no access qualifier")]
    #[diagnostic(
        code(progmodel::tablegen::image_without_access_qualifier),
        help("Add read_only, write_only or read_write to the image declaration")
    )]
    ImageWithoutAccessQualifier {
        type_name: String,
        #[label("image without access qualifier")]
        span: SourceSpan,
    },

    #[error("Type `{type_name}` is declared as {first} and as {second}")]
    #[diagnostic(
        code(progmodel::tablegen::conflicting_type_kinds),
        help("Records sharing a type name must be of the same kind; give this one its own name")
    )]
    ConflictingTypeKinds {
        type_name: String,
        first: &'static str,
        second: &'static str,
        #[label("declared as {second} here")]
        span: SourceSpan,
    },

    #[error("{kind} `{identifier}` would be generated for both `{first}` and `{second}`")]
    #[diagnostic(
        code(progmodel::tablegen::identifier_collision),
        help("Rename one of them so the generated identifiers differ")
    )]
    IdentifierCollision {
        kind: &'static str,
        identifier: String,
        first: String,
        second: String,
    },

    #[error("{table} exceeds its index limit: {value} > {limit}")]
    #[diagnostic(
        code(progmodel::tablegen::capacity_exceeded),
        help("The element type of {table} needs to be widened")
    )]
    CapacityExceeded {
        table: &'static str,
        value: usize,
        limit: usize,
    },

    #[error("Failed to render generated source")]
    #[diagnostic(code(progmodel::tablegen::emit))]
    Emit(#[from] std::fmt::Error),
}

impl TableGenError {
    pub fn image_without_access(type_name: &str, span: Span) -> Self {
        TableGenError::ImageWithoutAccessQualifier {
            type_name: type_name.to_string(),
            span: span.into(),
        }
    }

    pub fn conflicting_kinds(
        type_name: &str,
        first: &'static str,
        second: &'static str,
        span: Span,
    ) -> Self {
        TableGenError::ConflictingTypeKinds {
            type_name: type_name.to_string(),
            first,
            second,
            span: span.into(),
        }
    }

    pub fn capacity(table: &'static str, value: usize, limit: usize) -> Self {
        TableGenError::CapacityExceeded {
            table,
            value,
            limit,
        }
    }
}

/// Result type for table generation
pub type TableGenResult<T> = Result<T, TableGenError>;

/// Narrow an index to `u16`, failing with a capacity error for `table`
pub(crate) fn to_u16(table: &'static str, value: usize) -> TableGenResult<u16> {
    u16::try_from(value).map_err(|_| TableGenError::capacity(table, value, u16::MAX as usize))
}

/// Narrow a count to `u32`, failing with a capacity error for `table`
pub(crate) fn to_u32(table: &'static str, value: usize) -> TableGenResult<u32> {
    u32::try_from(value).map_err(|_| TableGenError::capacity(table, value, u32::MAX as usize))
}
