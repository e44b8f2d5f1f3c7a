//! Overload collector
//!
//! Files every builtin record under its name together with its interned
//! signature, in input order.

use crate::error::{TableGenError, TableGenResult};
use crate::interner::{SignatureInterner, SignatureRef};
use indexmap::IndexMap;
use progmodel_decls::{BuiltinRecord, RecordSet, TypeRecordId};

/// One builtin record and where its signature lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overload {
    /// Index into `RecordSet::builtins`
    pub builtin: usize,
    pub signature: SignatureRef,
}

/// Overloads per builtin name, names in first-seen order
pub type OverloadMap = IndexMap<String, Vec<Overload>>;

pub fn collect_overloads(
    records: &RecordSet,
    interner: &mut SignatureInterner,
) -> TableGenResult<OverloadMap> {
    let mut overloads = OverloadMap::new();

    for (index, builtin) in records.builtins.iter().enumerate() {
        let signature = interner.intern(&builtin.signature, |signature| {
            verify_signature(records, builtin, signature)
        })?;

        overloads
            .entry(builtin.name.clone())
            .or_default()
            .push(Overload {
                builtin: index,
                signature,
            });
    }

    log::debug!(
        "collected {} builtin names with {} distinct signatures ({} arena entries)",
        overloads.len(),
        interner.len(),
        interner.arena().len()
    );
    Ok(overloads)
}

/// Check that the generic types of one signature can be expanded together.
///
/// All generic types must have the same number of vector sizes, and the same
/// number of types, except that a length of 1 matches anything.
pub fn verify_signature(
    records: &RecordSet,
    builtin: &BuiltinRecord,
    signature: &[TypeRecordId],
) -> TableGenResult<()> {
    let mut vector_sizes = LengthCheck::new("vector sizes");
    let mut types = LengthCheck::new("types");

    for id in signature {
        let Some(generic) = records.generic_of(*id) else {
            continue;
        };
        let sizes = records.int_list(generic.vector_sizes).values.len();
        vector_sizes.observe(sizes, builtin, &generic.name)?;
        types.observe(generic.types.len(), builtin, &generic.name)?;
    }
    Ok(())
}

struct LengthCheck {
    dimension: &'static str,
    current: usize,
}

impl LengthCheck {
    fn new(dimension: &'static str) -> Self {
        Self {
            dimension,
            current: 1,
        }
    }

    fn observe(&mut self, length: usize, builtin: &BuiltinRecord, generic: &str) -> TableGenResult<()> {
        if length == self.current || length == 1 {
            return Ok(());
        }
        if self.current > 1 {
            return Err(TableGenError::IncompatibleGenericTypes {
                builtin: builtin.name.clone(),
                dimension: self.dimension,
                generic: generic.to_string(),
                expected: self.current,
                found: length,
                span: builtin.span.into(),
            });
        }
        self.current = length;
        Ok(())
    }
}
