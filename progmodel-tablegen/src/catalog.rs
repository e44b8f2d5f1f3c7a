//! Type catalog
//!
//! Assigns every distinct type identifier a dense index. Non-generic
//! identifiers come first, so "index >= non_generic_count" is the generic
//! test used by the reconstructor.

use crate::error::{TableGenError, TableGenResult};
use indexmap::IndexMap;
use progmodel_decls::{
    AccessQualifier, GenericId, IntListId, RecordSet, TypeKind, TypeRecord, TypeRecordId,
};

/// What step 1 of type reconstruction produces for one identifier
#[derive(Debug, Clone, PartialEq)]
pub enum TypeIdKind {
    /// One concrete type; `None` for abstract types, which expand to nothing
    Scalar { concrete: Option<String> },
    /// One concrete type per access qualifier, first declaration wins
    Image {
        variants: Vec<(AccessQualifier, String)>,
    },
    /// Cartesian product of `vector_sizes` and `types`
    Generic {
        generic: GenericId,
        types: Vec<String>,
        vector_sizes: IntListId,
    },
}

/// One entry of the `TypeId` enumeration
#[derive(Debug, Clone, PartialEq)]
pub struct TypeIdEntry {
    pub name: String,
    pub kind: TypeIdKind,
}

impl TypeIdEntry {
    pub fn is_generic(&self) -> bool {
        matches!(self.kind, TypeIdKind::Generic { .. })
    }

    pub fn is_image(&self) -> bool {
        matches!(self.kind, TypeIdKind::Image { .. })
    }
}

impl TypeIdKind {
    fn describe(&self) -> &'static str {
        match self {
            TypeIdKind::Scalar { .. } => "a scalar type",
            TypeIdKind::Image { .. } => "an image type",
            TypeIdKind::Generic { .. } => "a generic type",
        }
    }
}

fn describe_record(record: &TypeRecord) -> &'static str {
    match record.kind {
        TypeKind::Scalar => "a scalar type",
        TypeKind::Image => "an image type",
        TypeKind::Generic(_) => "a generic type",
    }
}

#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    entries: IndexMap<String, TypeIdEntry>,
    non_generic_count: usize,
}

impl TypeCatalog {
    /// Every record sharing a type name must be of the same kind.
    pub fn build(records: &RecordSet) -> TableGenResult<Self> {
        let mut catalog = TypeCatalog::default();

        for (_, record) in records.type_ids().filter(|(_, r)| !r.is_generic()) {
            match catalog.entries.get_mut(&record.name) {
                Some(entry) => match (&mut entry.kind, record.kind) {
                    (TypeIdKind::Image { variants }, TypeKind::Image) => {
                        if !variants.iter().any(|(access, _)| *access == record.access) {
                            variants.push((record.access, concrete_name(record)));
                        }
                    }
                    (TypeIdKind::Scalar { .. }, TypeKind::Scalar) => {}
                    (existing, _) => {
                        return Err(TableGenError::conflicting_kinds(
                            &record.name,
                            existing.describe(),
                            describe_record(record),
                            record.span,
                        ));
                    }
                },
                None => {
                    let kind = match record.kind {
                        TypeKind::Image => TypeIdKind::Image {
                            variants: vec![(record.access, concrete_name(record))],
                        },
                        _ => TypeIdKind::Scalar {
                            concrete: (!record.is_abstract)
                                .then(|| concrete_name(record)),
                        },
                    };
                    catalog.entries.insert(
                        record.name.clone(),
                        TypeIdEntry {
                            name: record.name.clone(),
                            kind,
                        },
                    );
                }
            }
        }
        catalog.non_generic_count = catalog.entries.len();

        for (index, generic) in records.generics.iter().enumerate() {
            if let Some(existing) = catalog.entries.get(&generic.name) {
                return Err(TableGenError::conflicting_kinds(
                    &generic.name,
                    existing.kind.describe(),
                    "a generic type",
                    generic.span,
                ));
            }
            let types = generic
                .types
                .iter()
                .map(|id| concrete_name(records.type_record(*id)))
                .collect();
            catalog.entries.insert(
                generic.name.clone(),
                TypeIdEntry {
                    name: generic.name.clone(),
                    kind: TypeIdKind::Generic {
                        generic: GenericId(index),
                        types,
                        vector_sizes: generic.vector_sizes,
                    },
                },
            );
        }

        log::debug!(
            "catalogued {} type identifiers ({} non-generic)",
            catalog.entries.len(),
            catalog.non_generic_count
        );
        Ok(catalog)
    }

    /// Dense index of a type identifier
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.entries.get_index_of(name)
    }

    /// Dense index of the identifier a type record belongs to
    pub fn index_of_record(&self, records: &RecordSet, id: TypeRecordId) -> Option<usize> {
        self.index_of(&records.type_record(id).name)
    }

    pub fn entry(&self, index: usize) -> Option<&TypeIdEntry> {
        self.entries.get_index(index).map(|(_, entry)| entry)
    }

    pub fn non_generic_count(&self) -> usize {
        self.non_generic_count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<TypeIdEntry> {
        self.entries.into_values().collect()
    }
}

/// Generic records have no concrete type; they never reach here through a type list
fn concrete_name(record: &TypeRecord) -> String {
    record
        .concrete_name
        .clone()
        .unwrap_or_else(|| record.name.clone())
}
