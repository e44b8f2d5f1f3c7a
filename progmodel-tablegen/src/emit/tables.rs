// The four flat tables

use super::{address_space_variant, type_id_variant};
use crate::config::GeneratorConfig;
use crate::tables::BuiltinTables;
use std::fmt::{self, Write};

pub(super) fn emit(out: &mut String, tables: &BuiltinTables, config: &GeneratorConfig) -> fmt::Result {
    let comments = config.emit_comments;
    emit_extension_table(out, tables, comments)?;
    emit_type_table(out, tables, comments)?;
    emit_signature_table(out, tables, comments)?;
    emit_builtin_table(out, tables, comments)
}

fn emit_extension_table(out: &mut String, tables: &BuiltinTables, comments: bool) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "    /// Extension strings required by overloads.")?;
    writeln!(out, "    pub static EXTENSION_TABLE: &[&str] = &[")?;
    for (index, extension) in tables.extensions.iter().enumerate() {
        if comments {
            writeln!(out, "        // {}: {}", index, extension.name)?;
        }
        writeln!(out, "        {:?},", extension.external_name)?;
    }
    writeln!(out, "    ];")
}

fn emit_type_table(out: &mut String, tables: &BuiltinTables, comments: bool) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "    pub static TYPE_TABLE: &[ProgModelType] = &[")?;
    for (index, row) in tables.types.iter().enumerate() {
        if comments {
            writeln!(out, "        // {}: {}", index, row.def_name)?;
        }
        writeln!(
            out,
            "        ProgModelType {{ id: TypeId::{}, vector_width: {}, is_pointer: {}, is_const: {}, is_volatile: {}, access_qualifier: AccessQual::{}, address_space: AddressSpace::{} }},",
            type_id_variant(&tables.type_id(row).name),
            row.vector_width,
            row.is_pointer,
            row.is_const,
            row.is_volatile,
            row.access.variant_name(),
            address_space_variant(row.address_space.as_deref()),
        )?;
    }
    writeln!(out, "    ];")
}

fn emit_signature_table(out: &mut String, tables: &BuiltinTables, comments: bool) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "    /// Type table indices; consecutive entries form a signature.")?;
    writeln!(out, "    pub static SIGNATURE_TABLE: &[u16] = &[")?;

    let ends = tables
        .signature_starts
        .iter()
        .skip(1)
        .map(|start| *start as usize)
        .chain(std::iter::once(tables.signatures.len()));

    for (start, end) in tables.signature_starts.iter().map(|s| *s as usize).zip(ends) {
        if comments {
            writeln!(out, "        // {}", start)?;
        }
        let entries: Vec<String> = tables.signatures[start..end].iter().map(u16::to_string).collect();
        writeln!(out, "        {},", entries.join(", "))?;
    }
    writeln!(out, "    ];")
}

fn emit_builtin_table(out: &mut String, tables: &BuiltinTables, comments: bool) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "    pub static BUILTIN_TABLE: &[BuiltinDecl] = &[")?;
    for group in &tables.groups {
        if comments {
            writeln!(out, "        // {}: {}", group.first, group.names.join(", "))?;
        }
        let start = group.first as usize - 1;
        for row in &tables.builtins[start..start + group.count as usize] {
            writeln!(
                out,
                "        BuiltinDecl {{ sig_table_index: {}, num_types: {}, is_pure: {}, is_const: {}, is_convergent: {}, is_variadic: {}, extension: {}, min_version: {}, max_version: {} }},",
                row.signature.offset,
                row.signature.len,
                row.is_pure,
                row.is_const,
                row.is_convergent,
                row.is_variadic,
                row.extension,
                row.min_version,
                row.max_version,
            )?;
        }
    }
    writeln!(out, "    ];")
}
