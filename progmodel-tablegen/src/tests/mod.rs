//! Scenario tests for table generation

mod test_emitted_source;

use crate::{build_tables, expand_type, BuiltinTables, ConcreteType, ReferenceContext};
use progmodel_decls::RecordSet;

/// Scalar types shared by most scenarios
pub(crate) const SCALARS: &str = r#"
    type Float  = scalar "float" FloatTy;
    type Double = scalar "double" DoubleTy;
    type Half   = scalar "half" HalfTy;
    type Int    = scalar "int" IntTy;
"#;

pub(crate) fn records(source: &str) -> RecordSet {
    progmodel_decls::parse_records(source, None).expect("Failed to read declarations")
}

pub(crate) fn tables(source: &str) -> BuiltinTables {
    build_tables(&records(source)).expect("Failed to build tables")
}

/// Expand the type table row built from declaration `def_name`
pub(crate) fn expand(tables: &BuiltinTables, def_name: &str) -> Vec<ConcreteType> {
    let row = tables
        .types
        .iter()
        .find(|row| row.def_name == def_name)
        .unwrap_or_else(|| panic!("no type row for {}", def_name));
    let mut out = Vec::new();
    expand_type(tables, &mut ReferenceContext, row, &mut out).expect("Failed to expand type");
    out
}
