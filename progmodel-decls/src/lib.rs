// Builtin Declarations Library
// Pest-based reader for programming-model builtin declaration files

pub mod ast;
pub mod error;
pub mod parser;
pub mod records;
pub mod resolve;

pub use ast::*;
pub use error::*;
pub use parser::DeclParser;
pub use records::*;
pub use resolve::{Resolver, NO_EXTENSION};

// Re-export parser rule for manual testing
pub use parser::Rule;

#[cfg(test)]
mod tests;

/// Parse declaration text into its syntax tree
pub fn parse_declarations(input: &str, source_file: Option<String>) -> ParseResult<DeclarationFile> {
    DeclParser::parse_file_with_source(input, source_file)
}

/// Parse and resolve declaration text into builtin records
pub fn parse_records(input: &str, source_file: Option<String>) -> Result<RecordSet, DeclError> {
    let file = parse_declarations(input, source_file)?;
    Ok(Resolver::resolve(&file)?)
}

// Version and metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
