//! The compacted builtin tables
//!
//! [`BuiltinTables::build`] runs the whole pipeline and validates
//! everything, including the identifiers the emitter will generate;
//! rendering afterwards cannot fail on input.

use crate::catalog::{TypeCatalog, TypeIdEntry, TypeIdKind};
use crate::collector::collect_overloads;
use crate::emit;
use crate::error::{to_u16, to_u32, TableGenError, TableGenResult};
use crate::interner::{SignatureInterner, SignatureRef};
use crate::merger::merge_groups;
use indexmap::{IndexMap, IndexSet};
use progmodel_decls::{AccessQualifier, ExtensionRecord, IntList, RecordSet, Span};

/// One row of the type table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRow {
    /// Index into [`BuiltinTables::type_ids`]
    pub type_id: u16,
    /// Declaration the row was built from, for comments
    pub def_name: String,
    pub vector_width: u32,
    pub is_pointer: bool,
    pub is_const: bool,
    pub is_volatile: bool,
    pub access: AccessQualifier,
    /// `None` is the default address space
    pub address_space: Option<String>,
    /// Source of the declaration, for diagnostics
    pub span: Span,
}

/// One row of the builtin table, i.e. one overload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinRow {
    pub signature: SignatureRef,
    pub is_pure: bool,
    pub is_const: bool,
    pub is_convergent: bool,
    pub is_variadic: bool,
    pub extension: u16,
    pub min_version: u16,
    pub max_version: u16,
}

/// A signature group as laid out in the builtin table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupEntry {
    pub names: Vec<String>,
    /// 1-based index of the group's first row
    pub first: u32,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuiltinTables {
    pub type_ids: Vec<TypeIdEntry>,
    /// Identifiers below this index are not generic
    pub non_generic_count: usize,
    pub extensions: Vec<ExtensionRecord>,
    pub types: Vec<TypeRow>,
    pub signatures: Vec<u16>,
    /// Start of each interned signature, for comments
    pub signature_starts: Vec<u16>,
    pub builtins: Vec<BuiltinRow>,
    pub groups: Vec<GroupEntry>,
    pub int_lists: Vec<IntList>,
    /// Address spaces in first-seen order
    pub address_spaces: Vec<String>,
    /// Concrete types step 1 can produce, in first-seen order
    pub concrete_types: Vec<String>,
    pub source_file: Option<String>,
    matcher: IndexMap<String, (u32, u32)>,
}

impl BuiltinTables {
    pub fn build(records: &RecordSet) -> TableGenResult<Self> {
        let catalog = TypeCatalog::build(records)?;
        to_u16("TypeId", catalog.len().saturating_sub(1))?;

        let types = type_rows(records, &catalog)?;

        let mut interner = SignatureInterner::new();
        let overloads = collect_overloads(records, &mut interner)?;
        let groups = merge_groups(records, &overloads);

        let signatures = interner
            .arena()
            .iter()
            .map(|id| to_u16("SignatureTable entry", id.0))
            .collect::<TableGenResult<Vec<_>>>()?;
        let signature_starts = interner.signatures().map(|(_, r)| r.offset).collect();

        let mut builtins = Vec::new();
        let mut entries = Vec::with_capacity(groups.len());
        let mut matcher = IndexMap::new();
        let mut first: u32 = 1;

        for group in &groups {
            let count = to_u32("BuiltinTable", group.overloads.len())?;
            for overload in &group.overloads {
                let record = &records.builtins[overload.builtin];
                builtins.push(BuiltinRow {
                    signature: overload.signature,
                    is_pure: record.is_pure,
                    is_const: record.is_const,
                    is_convergent: record.is_convergent,
                    is_variadic: record.is_variadic,
                    extension: to_u16("FunctionExtensionTable", record.extension.0)?,
                    min_version: record.min_version,
                    max_version: record.max_version,
                });
            }
            for name in &group.names {
                matcher.insert(name.clone(), (first, count));
            }
            entries.push(GroupEntry {
                names: group.names.clone(),
                first,
                count,
            });
            first = first
                .checked_add(count)
                .ok_or_else(|| TableGenError::capacity("BuiltinTable", builtins.len(), u32::MAX as usize))?;
        }

        let address_spaces = records
            .types
            .iter()
            .filter_map(|t| t.address_space.clone())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect();

        let non_generic_count = catalog.non_generic_count();
        let type_ids = catalog.into_entries();
        let concrete_types = concrete_types(&type_ids);

        log::debug!(
            "built tables: {} extensions, {} types, {} signature entries, {} builtin rows in {} groups",
            records.extensions.len(),
            types.len(),
            signatures.len(),
            builtins.len(),
            entries.len()
        );

        let tables = BuiltinTables {
            type_ids,
            non_generic_count,
            extensions: records.extensions.clone(),
            types,
            signatures,
            signature_starts,
            builtins,
            groups: entries,
            int_lists: records.int_lists.clone(),
            address_spaces,
            concrete_types,
            source_file: records.source_file.clone(),
            matcher,
        };
        emit::check_identifiers(&tables)?;
        Ok(tables)
    }

    /// `(first row, row count)` for a builtin name, `(0, 0)` if unknown.
    /// The first row is 1-based.
    pub fn is_builtin(&self, name: &str) -> (u32, u32) {
        self.matcher.get(name).copied().unwrap_or((0, 0))
    }

    /// The overload rows of a builtin name; empty if unknown
    pub fn overloads(&self, name: &str) -> &[BuiltinRow] {
        match self.is_builtin(name) {
            (0, _) => &[],
            (first, count) => {
                let start = first as usize - 1;
                &self.builtins[start..start + count as usize]
            }
        }
    }

    /// Type table indices of one overload, return type first
    pub fn signature(&self, row: &BuiltinRow) -> &[u16] {
        let start = row.signature.offset as usize;
        &self.signatures[start..start + row.signature.len as usize]
    }

    pub fn type_row(&self, index: u16) -> Option<&TypeRow> {
        self.types.get(index as usize)
    }

    pub fn type_id(&self, row: &TypeRow) -> &TypeIdEntry {
        &self.type_ids[row.type_id as usize]
    }

    /// Builtin names with their matcher result, in emission order
    pub fn matcher(&self) -> impl Iterator<Item = (&str, (u32, u32))> {
        self.matcher.iter().map(|(name, range)| (name.as_str(), *range))
    }
}

/// One row per type record, in declaration order
fn type_rows(records: &RecordSet, catalog: &TypeCatalog) -> TableGenResult<Vec<TypeRow>> {
    records
        .type_ids()
        .map(|(id, record)| {
            // Every record name was catalogued from this same record set
            let index = catalog.index_of_record(records, id).unwrap_or_default();
            let image = catalog.entry(index).is_some_and(TypeIdEntry::is_image);
            if image && record.access == AccessQualifier::None {
                return Err(TableGenError::image_without_access(&record.def_name, record.span));
            }

            Ok(TypeRow {
                type_id: to_u16("TypeId", index)?,
                def_name: record.def_name.clone(),
                vector_width: record.vector_width,
                is_pointer: record.is_pointer,
                is_const: record.is_const,
                is_volatile: record.is_volatile,
                access: record.access,
                address_space: record.address_space.clone(),
                span: record.span,
            })
        })
        .collect()
}

fn concrete_types(type_ids: &[TypeIdEntry]) -> Vec<String> {
    let mut seen = IndexSet::new();
    for entry in type_ids {
        match &entry.kind {
            TypeIdKind::Scalar { concrete } => {
                seen.extend(concrete.iter().cloned());
            }
            TypeIdKind::Image { variants } => {
                seen.extend(variants.iter().map(|(_, name)| name.clone()));
            }
            TypeIdKind::Generic { types, .. } => {
                seen.extend(types.iter().cloned());
            }
        }
    }
    seen.into_iter().collect()
}
