use crate::ast::AccessQualifier;
use crate::error::{DeclError, ResolveError};
use crate::records::*;
use crate::{parse_records, NO_EXTENSION};
use pretty_assertions::assert_eq;

const BASE_TYPES: &str = r#"
    type Int   = scalar "int" IntTy;
    type UInt  = scalar "uint" UnsignedIntTy;
    type Float = scalar "float" FloatTy;
    type Half  = scalar "half" HalfTy;
"#;

fn resolve(body: &str) -> RecordSet {
    let input = format!("{}{}", BASE_TYPES, body);
    parse_records(&input, None).unwrap()
}

fn resolve_error(body: &str) -> ResolveError {
    let input = format!("{}{}", BASE_TYPES, body);
    match parse_records(&input, None) {
        Err(DeclError::Resolve(error)) => error,
        other => panic!("Expected resolution error, got {:?}", other),
    }
}

fn record<'a>(records: &'a RecordSet, def_name: &str) -> &'a TypeRecord {
    records
        .types
        .iter()
        .find(|record| record.def_name == def_name)
        .unwrap_or_else(|| panic!("no record named {}", def_name))
}

#[test]
fn test_record_identity_is_declaration_order() {
    let records = resolve("type Int4 = vector Int 4;");
    let names: Vec<&str> = records.types.iter().map(|r| r.def_name.as_str()).collect();
    assert_eq!(names, vec!["Int", "UInt", "Float", "Half", "Int4"]);
}

#[test]
fn test_derived_types_copy_the_base_record() {
    let records = resolve(
        r#"
        type VInt = volatile Int;
        type GlobalVIntPtr = pointer VInt opencl_global;
        type CGlobalVIntPtr = const GlobalVIntPtr;
        "#,
    );

    let derived = record(&records, "CGlobalVIntPtr");
    assert_eq!(derived.name, "int");
    assert_eq!(derived.concrete_name.as_deref(), Some("IntTy"));
    assert!(derived.is_volatile);
    assert!(derived.is_pointer);
    assert!(derived.is_const);
    assert_eq!(derived.address_space.as_deref(), Some("opencl_global"));
    assert_eq!(derived.vector_width, 0);

    // Deriving does not touch the base
    let base = record(&records, "VInt");
    assert!(!base.is_pointer);
    assert!(!base.is_const);
}

#[test]
fn test_image_access_is_recorded() {
    let records = resolve(r#"type Img = image "image2d_t" OCLImage2dROTy read_only;"#);
    let image = record(&records, "Img");
    assert!(image.is_image());
    assert_eq!(image.access, AccessQualifier::ReadOnly);
}

#[test]
fn test_generic_types() {
    let records = resolve(
        r#"
        intlist VecAndScalar = [1, 2, 4];
        typelist TLFloat = [Float, Half];
        generic FGenTypeN = TLFloat * VecAndScalar;
        generic IGen = [Int, UInt] * VecAndScalar;
        "#,
    );

    assert_eq!(records.generics.len(), 2);
    let fgen = &records.generics[0];
    assert_eq!(fgen.name, "FGenTypeN");
    assert_eq!(fgen.types, vec![TypeRecordId(2), TypeRecordId(3)]);
    assert_eq!(records.int_list(fgen.vector_sizes).values, vec![1, 2, 4]);

    let generic_record = records.type_record(fgen.record);
    assert!(generic_record.is_generic());
    assert_eq!(generic_record.name, "FGenTypeN");
    assert_eq!(generic_record.concrete_name, None);
    assert_eq!(records.generic_of(fgen.record), Some(fgen));

    assert_eq!(records.generics[1].types, vec![TypeRecordId(0), TypeRecordId(1)]);
}

#[test]
fn test_builtin_defaults() {
    let records = resolve("builtin abs(Int) -> UInt;");
    assert_eq!(records.extensions.len(), 1);
    assert_eq!(records.extensions[0].name, NO_EXTENSION);
    assert_eq!(records.extensions[0].external_name, "");

    let builtin = &records.builtins[0];
    assert_eq!(builtin.signature, vec![TypeRecordId(1), TypeRecordId(0)]);
    assert_eq!(builtin.extension, ExtensionId::NONE);
    assert_eq!(builtin.min_version, 0);
    assert_eq!(builtin.max_version, 0);
    assert!(!builtin.is_pure && !builtin.is_const && !builtin.is_convergent && !builtin.is_variadic);
}

#[test]
fn test_builtin_attributes_resolve() {
    let records = resolve(
        r#"
        version CL12 = 120;
        version CL20 = 200;
        extension Fp16 = "cl_khr_fp16";
        builtin half_sqrt, half_rsqrt(Half) -> Half [pure, convergent, ext = Fp16, min = CL12, max = CL20];
        "#,
    );

    assert_eq!(records.builtins.len(), 2);
    for (builtin, name) in records.builtins.iter().zip(["half_sqrt", "half_rsqrt"]) {
        assert_eq!(builtin.name, name);
        assert_eq!(records.extension(builtin.extension).external_name, "cl_khr_fp16");
        assert_eq!(builtin.min_version, 120);
        assert_eq!(builtin.max_version, 200);
        assert!(builtin.is_pure);
        assert!(builtin.is_convergent);
        assert!(!builtin.is_const);
    }
}

#[test]
fn test_duplicate_extension_keeps_first() {
    let records = resolve(
        r#"
        extension Fp64 = "cl_khr_fp64";
        extension Fp64 = "cl_khr_other";
        builtin f(Float) -> Float [ext = Fp64];
        "#,
    );
    assert_eq!(records.extensions.len(), 2);
    assert_eq!(records.extensions[1].external_name, "cl_khr_fp64");
    assert_eq!(records.builtins[0].extension, ExtensionId(1));
}

#[test]
fn test_duplicate_definition() {
    let error = resolve_error("type Int = scalar \"long\" LongTy;");
    assert!(matches!(error, ResolveError::DuplicateDefinition { ref name, .. } if name == "Int"));
}

#[test]
fn test_reference_before_definition() {
    let error = resolve_error("type Ptr = pointer Later opencl_global; type Later = const Int;");
    assert!(matches!(error, ResolveError::UndefinedReference { ref name, .. } if name == "Later"));
}

#[test]
fn test_wrong_kind_reference() {
    let error = resolve_error("version CL20 = 200; builtin f(CL20) -> Int;");
    assert!(matches!(
        error,
        ResolveError::WrongKind { ref name, expected: "type", found: "version", .. } if name == "CL20"
    ));
}

#[test]
fn test_empty_lists_are_rejected() {
    assert!(matches!(
        resolve_error("intlist Empty = [];"),
        ResolveError::EmptyList { ref name, .. } if name == "Empty"
    ));
    assert!(matches!(
        resolve_error("intlist W = [1]; generic G = [] * W;"),
        ResolveError::EmptyList { ref name, .. } if name == "G"
    ));
}

#[test]
fn test_zero_width_is_rejected() {
    assert!(matches!(
        resolve_error("type Int0 = vector Int 0;"),
        ResolveError::InvalidWidth { width: 0, .. }
    ));
    assert!(matches!(
        resolve_error("intlist W = [1, 0, 2];"),
        ResolveError::InvalidWidth { width: 0, .. }
    ));
}

#[test]
fn test_generic_members_must_be_concrete() {
    let error = resolve_error(
        r#"
        intlist W = [1, 2];
        generic G = [Int] * W;
        typelist Nested = [G, Float];
        "#,
    );
    assert!(matches!(
        error,
        ResolveError::GenericMember { ref name, ref base, .. } if name == "Nested" && base == "G"
    ));
}
