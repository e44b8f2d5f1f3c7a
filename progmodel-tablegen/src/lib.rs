//! Builtin table generator
//!
//! Compacts a set of resolved builtin records into flat lookup tables and
//! generates the code that expands table rows back into host types.
//!
//! ## Pipeline
//!
//! - **Type catalog**: one dense identifier per type name, generic types last
//! - **Signature interner**: content-addressed signature arena
//! - **Overload collector**: overloads per builtin name, in input order
//! - **Signature-group merger**: names with the same overloads share rows
//! - **Emitter**: Rust source with the tables, the name matcher and
//!   `expand_type`
//!
//! [`BuiltinTables`] is the executable form of the generated module: the
//! same tables, [`BuiltinTables::is_builtin`] and [`expand_type`].

pub mod catalog;
pub mod collector;
pub mod config;
pub mod emit;
pub mod error;
pub mod interner;
pub mod merger;
pub mod reconstruct;
pub mod tables;

pub use catalog::{TypeCatalog, TypeIdEntry, TypeIdKind};
pub use config::GeneratorConfig;
pub use error::{TableGenError, TableGenResult};
pub use interner::{SignatureInterner, SignatureRef};
pub use merger::SignatureGroup;
pub use reconstruct::{expand_signature, expand_type, ConcreteType, ReferenceContext, TypeContext};
pub use tables::{BuiltinRow, BuiltinTables, GroupEntry, TypeRow};

use progmodel_decls::RecordSet;

#[cfg(test)]
mod tests;

/// Build and validate the tables for a record set
pub fn build_tables(records: &RecordSet) -> TableGenResult<BuiltinTables> {
    BuiltinTables::build(records)
}

/// Generate the Rust source for a record set.
///
/// Nothing is rendered unless every table builds and validates.
pub fn generate(records: &RecordSet, config: &GeneratorConfig) -> TableGenResult<String> {
    let tables = build_tables(records)?;
    emit::render(&tables, config)
}
