//! Resolved builtin records.
//!
//! This is the read-only input of the table generator: every `type` and
//! `generic` declaration becomes one [`TypeRecord`] whose identity is its
//! position in [`RecordSet::types`]. Two records with identical fields are
//! still two records.

use crate::ast::{AccessQualifier, Span};

/// Identity of a type record (its declaration index)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeRecordId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GenericId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntListId(pub usize);

/// Index into the extension table; 0 is always the implicit `none` entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExtensionId(pub usize);

impl ExtensionId {
    pub const NONE: ExtensionId = ExtensionId(0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Scalar,
    Image,
    Generic(GenericId),
}

/// One type descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRecord {
    /// Name of the declaration (`Float4`)
    pub def_name: String,
    /// Type identifier shared by all records of one base type (`float`)
    pub name: String,
    /// Host type the identifier maps to; `None` for generic types
    pub concrete_name: Option<String>,
    pub is_abstract: bool,
    /// 0 for scalars and generic types
    pub vector_width: u32,
    pub is_pointer: bool,
    pub is_const: bool,
    pub is_volatile: bool,
    pub access: AccessQualifier,
    /// `None` means the default address space
    pub address_space: Option<String>,
    pub kind: TypeKind,
    pub span: Span,
}

impl TypeRecord {
    pub fn is_generic(&self) -> bool {
        matches!(self.kind, TypeKind::Generic(_))
    }

    pub fn is_image(&self) -> bool {
        self.kind == TypeKind::Image
    }

    pub fn generic(&self) -> Option<GenericId> {
        match self.kind {
            TypeKind::Generic(id) => Some(id),
            _ => None,
        }
    }
}

/// Cartesian product of a type list and a vector-width list
#[derive(Debug, Clone, PartialEq)]
pub struct GenericType {
    pub name: String,
    /// The type record declared together with this generic type
    pub record: TypeRecordId,
    pub types: Vec<TypeRecordId>,
    pub vector_sizes: IntListId,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntList {
    pub name: String,
    pub values: Vec<u32>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionRecord {
    pub name: String,
    /// Space-separated list of extension strings, empty for none
    pub external_name: String,
}

/// One overload of a builtin function
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltinRecord {
    pub name: String,
    /// Return type followed by parameter types
    pub signature: Vec<TypeRecordId>,
    pub extension: ExtensionId,
    pub min_version: u16,
    /// 0 means the overload was never removed
    pub max_version: u16,
    pub is_pure: bool,
    pub is_const: bool,
    pub is_convergent: bool,
    pub is_variadic: bool,
    pub span: Span,
}

/// Every record of one declaration file, in declaration order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordSet {
    pub types: Vec<TypeRecord>,
    pub generics: Vec<GenericType>,
    pub int_lists: Vec<IntList>,
    pub extensions: Vec<ExtensionRecord>,
    pub builtins: Vec<BuiltinRecord>,
    pub source_file: Option<String>,
}

impl RecordSet {
    pub fn type_record(&self, id: TypeRecordId) -> &TypeRecord {
        &self.types[id.0]
    }

    pub fn generic(&self, id: GenericId) -> &GenericType {
        &self.generics[id.0]
    }

    pub fn int_list(&self, id: IntListId) -> &IntList {
        &self.int_lists[id.0]
    }

    pub fn extension(&self, id: ExtensionId) -> &ExtensionRecord {
        &self.extensions[id.0]
    }

    /// The generic type a record stands for, if any
    pub fn generic_of(&self, id: TypeRecordId) -> Option<&GenericType> {
        self.type_record(id).generic().map(|g| self.generic(g))
    }

    pub fn type_ids(&self) -> impl Iterator<Item = (TypeRecordId, &TypeRecord)> {
        self.types
            .iter()
            .enumerate()
            .map(|(index, record)| (TypeRecordId(index), record))
    }
}
