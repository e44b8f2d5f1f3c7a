// Name matcher

use crate::tables::BuiltinTables;
use std::fmt::{self, Write};

pub(super) fn emit(out: &mut String, tables: &BuiltinTables) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "    /// Find out whether a name matches a builtin function.")?;
    writeln!(out, "    ///")?;
    writeln!(out, "    /// Returns `(0, 0)` if no name matches, otherwise `(index, len)` where")?;
    writeln!(out, "    /// `index` is the 1-based first row in `BUILTIN_TABLE`.")?;
    writeln!(out, "    pub fn is_builtin(name: &str) -> (u32, u32) {{")?;
    writeln!(out, "        match name {{")?;
    for group in &tables.groups {
        let patterns: Vec<String> = group.names.iter().map(|name| format!("{:?}", name)).collect();
        writeln!(
            out,
            "            {} => ({}, {}),",
            patterns.join(" | "),
            group.first,
            group.count
        )?;
    }
    writeln!(out, "            _ => (0, 0),")?;
    writeln!(out, "        }}")?;
    writeln!(out, "    }}")
}
