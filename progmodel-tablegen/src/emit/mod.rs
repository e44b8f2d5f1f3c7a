//! Rust source emitter
//!
//! Renders [`BuiltinTables`] as a self-contained Rust module meant to be
//! `include!`d by the host compiler.

mod declarations;
mod matcher;
mod reconstructor;
mod tables;

use crate::config::{camel_case, sanitize_identifier, GeneratorConfig};
use crate::error::{TableGenError, TableGenResult};
use crate::tables::BuiltinTables;
use indexmap::IndexMap;
use std::fmt::{self, Write};

/// Render the whole generated module
pub fn render(tables: &BuiltinTables, config: &GeneratorConfig) -> TableGenResult<String> {
    let mut out = String::new();

    emit_banner(&mut out, tables, config)?;
    writeln!(out, "pub mod {} {{", config.module_name())?;
    writeln!(
        out,
        "    #![allow(dead_code, non_camel_case_types, non_upper_case_globals, unreachable_patterns, clippy::all)]"
    )?;
    declarations::emit(&mut out, tables)?;
    tables::emit(&mut out, tables, config)?;
    matcher::emit(&mut out, tables)?;
    reconstructor::emit(&mut out, tables)?;
    writeln!(out, "}} // mod {}", config.module_name())?;

    log::debug!("rendered {} bytes for family {}", out.len(), config.family);
    Ok(out)
}

fn emit_banner(out: &mut String, tables: &BuiltinTables, config: &GeneratorConfig) -> fmt::Result {
    writeln!(out, "// {} builtin handling", config.family)?;
    writeln!(out, "//")?;
    match &tables.source_file {
        Some(source) => writeln!(
            out,
            "// Automatically generated by {} from {}.",
            env!("CARGO_PKG_NAME"),
            source
        )?,
        None => writeln!(out, "// Automatically generated by {}.", env!("CARGO_PKG_NAME"))?,
    }
    writeln!(out, "// Do not edit.")?;
    writeln!(out)
}

pub(crate) fn type_id_variant(name: &str) -> String {
    format!("TID_{}", sanitize_identifier(name))
}

pub(crate) fn concrete_variant(name: &str) -> String {
    sanitize_identifier(name)
}

pub(crate) fn address_space_variant(space: Option<&str>) -> String {
    match space {
        Some(space) => sanitize_identifier(&camel_case(space)),
        None => "Default".to_string(),
    }
}

pub(crate) fn int_list_constant(name: &str) -> String {
    format!("LIST_{}", sanitize_identifier(name))
}

/// Fail if two source names would render as the same Rust identifier
pub(crate) fn check_identifiers(tables: &BuiltinTables) -> TableGenResult<()> {
    unique(
        "TypeId variant",
        tables
            .type_ids
            .iter()
            .map(|entry| (type_id_variant(&entry.name), entry.name.as_str())),
    )?;
    unique(
        "AddressSpace variant",
        std::iter::once((address_space_variant(None), "the default address space")).chain(
            tables
                .address_spaces
                .iter()
                .map(|space| (address_space_variant(Some(space)), space.as_str())),
        ),
    )?;
    unique(
        "ConcreteType variant",
        tables
            .concrete_types
            .iter()
            .map(|name| (concrete_variant(name), name.as_str())),
    )?;
    unique(
        "Int list constant",
        tables
            .int_lists
            .iter()
            .map(|list| (int_list_constant(&list.name), list.name.as_str())),
    )
}

fn unique<'a>(
    kind: &'static str,
    names: impl Iterator<Item = (String, &'a str)>,
) -> TableGenResult<()> {
    let mut seen: IndexMap<String, &str> = IndexMap::new();
    for (identifier, source) in names {
        if let Some(first) = seen.get(&identifier) {
            return Err(TableGenError::IdentifierCollision {
                kind,
                identifier,
                first: first.to_string(),
                second: source.to_string(),
            });
        }
        seen.insert(identifier, source);
    }
    Ok(())
}
