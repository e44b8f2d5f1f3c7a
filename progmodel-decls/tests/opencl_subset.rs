use progmodel_decls::{parse_declarations, parse_records, ExtensionId, ItemKind, TypeKind};

const SOURCE: &str = include_str!("fixtures/opencl_subset.decl");

#[test]
fn test_fixture_parses() {
    let file = parse_declarations(SOURCE, Some("opencl_subset.decl".to_string()))
        .expect("Failed to parse");

    let builtins = file
        .items
        .iter()
        .filter(|item| matches!(item.kind, ItemKind::Builtin(_)))
        .count();
    assert_eq!(builtins, 12);
    assert_eq!(file.source_file.as_deref(), Some("opencl_subset.decl"));
}

#[test]
fn test_fixture_resolves() {
    let records = parse_records(SOURCE, None).expect("Failed to resolve");

    assert_eq!(records.types.len(), 25);
    assert_eq!(records.generics.len(), 4);
    assert_eq!(records.int_lists.len(), 3);

    let extensions: Vec<&str> = records.extensions.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        extensions,
        vec!["none", "FuncExtKhrGlobalInt32BaseAtomics", "FuncExtFp64"]
    );

    // Multi-name declarations expand to one record per name
    let names: Vec<&str> = records.builtins.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "acos",
            "acos",
            "sin",
            "cos",
            "tan",
            "fract",
            "abs",
            "get_work_dim",
            "get_global_size",
            "get_local_size",
            "atom_add",
            "read_imagef",
            "write_imagef",
            "printf",
            "barrier",
        ]
    );
}

#[test]
fn test_fixture_record_details() {
    let records = parse_records(SOURCE, None).expect("Failed to resolve");

    let pointer = records
        .types
        .iter()
        .find(|t| t.def_name == "GlobalFGenTypeNPtr")
        .expect("pointer to generic type");
    assert!(pointer.is_pointer);
    assert!(matches!(pointer.kind, TypeKind::Generic(_)));
    assert_eq!(pointer.name, "FGenTypeN");

    let printf = records.builtins.iter().find(|b| b.name == "printf").unwrap();
    assert!(printf.is_variadic);
    assert!(printf.is_convergent);
    assert_eq!(printf.min_version, 120);
    assert_eq!(printf.max_version, 0);
    assert_eq!(printf.extension, ExtensionId::NONE);

    let atom_add = records.builtins.iter().find(|b| b.name == "atom_add").unwrap();
    assert_eq!(atom_add.extension, ExtensionId(1));
    assert_eq!((atom_add.min_version, atom_add.max_version), (100, 110));
}
