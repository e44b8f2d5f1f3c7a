//! Signature interner
//!
//! Signatures are content-addressed by the sequence of type record ids they
//! reference. Each distinct sequence occupies one region of a flat arena.

use crate::error::{to_u16, TableGenResult};
use indexmap::IndexMap;
use progmodel_decls::TypeRecordId;

/// Location of an interned signature in the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignatureRef {
    pub offset: u16,
    pub len: u16,
}

#[derive(Debug, Default)]
pub struct SignatureInterner {
    index: IndexMap<Vec<TypeRecordId>, SignatureRef>,
    arena: Vec<TypeRecordId>,
}

impl SignatureInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `signature` without interning it
    pub fn get(&self, signature: &[TypeRecordId]) -> Option<SignatureRef> {
        self.index.get(signature).copied()
    }

    /// Intern `signature`, returning the region it occupies.
    ///
    /// `verify` runs only when the signature has not been seen before; its
    /// error aborts interning and leaves the arena untouched.
    pub fn intern<F>(&mut self, signature: &[TypeRecordId], verify: F) -> TableGenResult<SignatureRef>
    where
        F: FnOnce(&[TypeRecordId]) -> TableGenResult<()>,
    {
        if let Some(existing) = self.get(signature) {
            log::trace!("reusing signature {:?} at {}", signature, existing.offset);
            return Ok(existing);
        }

        verify(signature)?;

        let region = SignatureRef {
            offset: to_u16("SignatureTable offset", self.arena.len())?,
            len: to_u16("SignatureTable length", signature.len())?,
        };
        log::trace!("interned signature {:?} at {}", signature, region.offset);

        self.arena.extend_from_slice(signature);
        self.index.insert(signature.to_vec(), region);
        Ok(region)
    }

    /// The flattened arena, in interning order
    pub fn arena(&self) -> &[TypeRecordId] {
        &self.arena
    }

    /// Interned signatures with their regions, in interning order
    pub fn signatures(&self) -> impl Iterator<Item = (&[TypeRecordId], SignatureRef)> {
        self.index
            .iter()
            .map(|(signature, region)| (signature.as_slice(), *region))
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
