//! Signature-group merger
//!
//! Builtin names whose overload sets use the same signatures share one run
//! of rows in the builtin table.

use crate::collector::{Overload, OverloadMap};
use progmodel_decls::{BuiltinRecord, RecordSet};

/// Names sharing one physical run of builtin table rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureGroup {
    /// Names in discovery order; the first one created the group
    pub names: Vec<String>,
    /// Sorted signature offsets, the comparison key
    pub offsets: Vec<u16>,
    /// Rows of the creating name, in its input order
    pub overloads: Vec<Overload>,
}

/// Partition builtin names into signature groups, in first-seen order.
///
/// A name joins the first existing group with the same sorted offset list
/// whose overloads are attribute-compatible with its own; otherwise it
/// starts a new group.
pub fn merge_groups(records: &RecordSet, overloads: &OverloadMap) -> Vec<SignatureGroup> {
    let mut groups: Vec<SignatureGroup> = Vec::new();

    for (name, list) in overloads {
        let mut offsets: Vec<u16> = list.iter().map(|o| o.signature.offset).collect();
        offsets.sort_unstable();

        let existing = groups.iter_mut().find(|group| {
            group.offsets.len() == offsets.len()
                && group.offsets == offsets
                && attributes_compatible(records, &group.overloads, list)
        });

        match existing {
            Some(group) => {
                log::trace!("`{}` shares rows with `{}`", name, group.names[0]);
                group.names.push(name.clone());
            }
            None => {
                log::trace!("`{}` starts signature group {}", name, groups.len());
                groups.push(SignatureGroup {
                    names: vec![name.clone()],
                    offsets,
                    overloads: list.clone(),
                });
            }
        }
    }

    log::debug!(
        "merged {} builtin names into {} signature groups",
        overloads.len(),
        groups.len()
    );
    groups
}

/// Walk both overload lists by position and accept as soon as any single
/// position carries equal attributes.
///
/// Positions are compared by index, not by matching signature, and one
/// matching position is enough. Tightening this changes which names share
/// rows and therefore the generated tables.
pub fn attributes_compatible(records: &RecordSet, incumbent: &[Overload], candidate: &[Overload]) -> bool {
    incumbent.iter().zip(candidate).any(|(a, b)| {
        same_attributes(&records.builtins[a.builtin], &records.builtins[b.builtin])
    })
}

fn same_attributes(a: &BuiltinRecord, b: &BuiltinRecord) -> bool {
    a.is_pure == b.is_pure
        && a.is_const == b.is_const
        && a.is_convergent == b.is_convergent
        && a.is_variadic == b.is_variadic
        && a.min_version == b.min_version
        && a.max_version == b.max_version
        && a.extension == b.extension
}
