// Type and row declarations of the generated module

use super::{address_space_variant, concrete_variant, type_id_variant};
use crate::tables::BuiltinTables;
use std::fmt::{self, Write};

pub(super) fn emit(out: &mut String, tables: &BuiltinTables) -> fmt::Result {
    emit_type_ids(out, tables)?;
    emit_access_qualifiers(out)?;
    emit_address_spaces(out, tables)?;
    emit_concrete_types(out, tables)?;
    out.push_str(ROW_DECLARATIONS);
    Ok(())
}

fn emit_type_ids(out: &mut String, tables: &BuiltinTables) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "    /// Scalar type names (float, int, ...) followed by generic type sets.")?;
    writeln!(out, "    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]")?;
    if !tables.type_ids.is_empty() {
        writeln!(out, "    #[repr(u16)]")?;
    }
    writeln!(out, "    pub enum TypeId {{")?;
    for entry in &tables.type_ids {
        writeln!(out, "        {},", type_id_variant(&entry.name))?;
    }
    writeln!(out, "    }}")
}

fn emit_access_qualifiers(out: &mut String) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "    /// Image access qualifier.")?;
    writeln!(out, "    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]")?;
    writeln!(out, "    pub enum AccessQual {{")?;
    for access in progmodel_decls::AccessQualifier::ALL {
        writeln!(out, "        {},", access.variant_name())?;
    }
    writeln!(out, "    }}")
}

fn emit_address_spaces(out: &mut String, tables: &BuiltinTables) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "    /// Address space of a pointer type.")?;
    writeln!(out, "    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]")?;
    writeln!(out, "    pub enum AddressSpace {{")?;
    writeln!(out, "        {},", address_space_variant(None))?;
    for space in &tables.address_spaces {
        writeln!(out, "        {},", address_space_variant(Some(space)))?;
    }
    writeln!(out, "    }}")
}

fn emit_concrete_types(out: &mut String, tables: &BuiltinTables) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "    /// Host types the type table expands into.")?;
    writeln!(out, "    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]")?;
    writeln!(out, "    pub enum ConcreteType {{")?;
    for name in &tables.concrete_types {
        writeln!(out, "        {},", concrete_variant(name))?;
    }
    writeln!(out, "    }}")
}

const ROW_DECLARATIONS: &str = r#"
    /// A return type or argument type.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ProgModelType {
        /// A type (e.g. float, int, ...).
        pub id: TypeId,
        /// Vector size (if applicable; 0 for scalars and generic types).
        pub vector_width: u32,
        pub is_pointer: bool,
        pub is_const: bool,
        pub is_volatile: bool,
        pub access_qualifier: AccessQual,
        /// Address space of the pointer (if applicable).
        pub address_space: AddressSpace,
    }

    /// One overload of a builtin function.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BuiltinDecl {
        /// Index of the signature in `SIGNATURE_TABLE`.
        pub sig_table_index: u16,
        /// Entries `sig_table_index..sig_table_index + num_types` of
        /// `SIGNATURE_TABLE` form the signature, return type first.
        pub num_types: u16,
        pub is_pure: bool,
        pub is_const: bool,
        pub is_convergent: bool,
        pub is_variadic: bool,
        /// Index in `EXTENSION_TABLE` of the extensions this overload needs.
        pub extension: u16,
        /// First version in which this overload was introduced.
        pub min_version: u16,
        /// First version in which this overload was removed, 0 if never.
        pub max_version: u16,
    }

    /// The host's type model.
    pub trait TypeContext {
        type Type: Clone;

        fn concrete(&mut self, ty: ConcreteType) -> Self::Type;
        fn vector(&mut self, element: Self::Type, width: u32) -> Self::Type;
        fn volatile(&mut self, ty: Self::Type) -> Self::Type;
        fn constant(&mut self, ty: Self::Type) -> Self::Type;
        fn address_space(&mut self, ty: Self::Type, space: AddressSpace) -> Self::Type;
        fn pointer(&mut self, pointee: Self::Type) -> Self::Type;
    }
"#;
