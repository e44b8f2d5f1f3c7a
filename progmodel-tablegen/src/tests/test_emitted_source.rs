//! Snippets of the generated Rust module

use super::{records, SCALARS};
use crate::{generate, GeneratorConfig};

const SOURCE: &str = r#"
    extension Fp64 = "cl_khr_fp64";
    type SizeT = scalar "size_t" SizeTy abstract;
    type Float4 = vector Float 4;
    type VFloat4 = volatile Float4;
    type CVFloat4 = const VFloat4;
    type GlobalCVFloat4Ptr = pointer CVFloat4 opencl_global;
    type Image2dRO = image "image2d_t" OCLImage2dROTy read_only;
    type Image2dWO = image "image2d_t" OCLImage2dWOTy write_only;
    intlist VecAndScalar = [1, 2, 4];
    intlist Unused = [8];
    generic FGen = [Float, Double] * VecAndScalar;
    builtin sin, cos(FGen) -> FGen [const];
    builtin acos(Float) -> Float;
    builtin acos(Double) -> Double [ext = Fp64];
    builtin read_imagef(Image2dRO, Int) -> Float4 [pure];
    builtin vstore(CVFloat4, GlobalCVFloat4Ptr) -> Float;
"#;

fn render(config: &GeneratorConfig) -> String {
    let source = format!("{}{}", SCALARS, SOURCE);
    generate(&records(&source), config).expect("Failed to generate")
}

fn opencl() -> String {
    render(&GeneratorConfig::new("OpenCL"))
}

fn assert_contains(output: &str, snippet: &str) {
    assert!(
        output.contains(snippet),
        "generated source does not contain:\n{}\n\n--- generated ---\n{}",
        snippet,
        output
    );
}

#[test]
fn test_banner_and_module() {
    let output = opencl();
    assert!(output.starts_with("// OpenCL builtin handling\n"));
    assert_contains(&output, "// Do not edit.");
    assert_contains(&output, "pub mod open_cl_builtins {");
    assert!(output.trim_end().ends_with("} // mod open_cl_builtins"));
}

#[test]
fn test_type_id_enum_lists_generics_last() {
    let output = opencl();
    assert_contains(
        &output,
        "    pub enum TypeId {
        TID_float,
        TID_double,
        TID_half,
        TID_int,
        TID_size_t,
        TID_image2d_t,
        TID_FGen,
    }",
    );
}

#[test]
fn test_address_spaces_and_concrete_types() {
    let output = opencl();
    assert_contains(
        &output,
        "    pub enum AddressSpace {
        Default,
        OpenclGlobal,
    }",
    );
    assert_contains(
        &output,
        "    pub enum ConcreteType {
        FloatTy,
        DoubleTy,
        HalfTy,
        IntTy,
        OCLImage2dROTy,
        OCLImage2dWOTy,
    }",
    );
}

#[test]
fn test_tables() {
    let output = opencl();
    assert_contains(
        &output,
        "    pub static EXTENSION_TABLE: &[&str] = &[
        // 0: none
        \"\",
        // 1: Fp64
        \"cl_khr_fp64\",
    ];",
    );
    assert_contains(
        &output,
        "        // 8: GlobalCVFloat4Ptr
        ProgModelType { id: TypeId::TID_float, vector_width: 4, is_pointer: true, is_const: true, is_volatile: true, access_qualifier: AccessQual::None, address_space: AddressSpace::OpenclGlobal },",
    );
    assert_contains(
        &output,
        "        // 11: FGen
        ProgModelType { id: TypeId::TID_FGen, vector_width: 0, is_pointer: false, is_const: false, is_volatile: false, access_qualifier: AccessQual::None, address_space: AddressSpace::Default },",
    );
    assert_contains(
        &output,
        "    pub static SIGNATURE_TABLE: &[u16] = &[
        // 0
        11, 11,
        // 2
        0, 0,
        // 4
        1, 1,
        // 6
        5, 9, 3,
        // 9
        0, 7, 8,
    ];",
    );
}

#[test]
fn test_builtin_table_groups() {
    let output = opencl();
    assert_contains(
        &output,
        "        // 1: sin, cos
        BuiltinDecl { sig_table_index: 0, num_types: 2, is_pure: false, is_const: true, is_convergent: false, is_variadic: false, extension: 0, min_version: 0, max_version: 0 },
        // 2: acos
        BuiltinDecl { sig_table_index: 2, num_types: 2, is_pure: false, is_const: false, is_convergent: false, is_variadic: false, extension: 0, min_version: 0, max_version: 0 },
        BuiltinDecl { sig_table_index: 4, num_types: 2, is_pure: false, is_const: false, is_convergent: false, is_variadic: false, extension: 1, min_version: 0, max_version: 0 },
        // 4: read_imagef",
    );
}

#[test]
fn test_matcher() {
    let output = opencl();
    assert_contains(
        &output,
        "        match name {
            \"sin\" | \"cos\" => (1, 1),
            \"acos\" => (2, 2),
            \"read_imagef\" => (4, 1),
            \"vstore\" => (5, 1),
            _ => (0, 0),
        }",
    );
}

#[test]
fn test_expand_type_arms() {
    let output = opencl();
    assert_contains(&output, "        const LIST_VecAndScalar: &[u32] = &[1, 2, 4];");
    assert_contains(&output, "        const LIST_Unused: &[u32] = &[8];");
    assert_contains(
        &output,
        "            TypeId::TID_image2d_t => match ty.access_qualifier {
                AccessQual::None => unreachable!(\"image without access qualifier\"),
                AccessQual::ReadOnly => out.push(ctx.concrete(ConcreteType::OCLImage2dROTy)),
                AccessQual::WriteOnly => out.push(ctx.concrete(ConcreteType::OCLImage2dWOTy)),
                _ => unreachable!(\"image2d_t has no variant for this access qualifier\"),
            },",
    );
    assert_contains(
        &output,
        "            TypeId::TID_FGen => {
                for _ in LIST_VecAndScalar {
                    out.push(ctx.concrete(ConcreteType::FloatTy));
                    out.push(ctx.concrete(ConcreteType::DoubleTy));
                }
                gen_type_num_types = 2;
                gen_vector_sizes = LIST_VecAndScalar;
            }",
    );
    assert_contains(
        &output,
        "            TypeId::TID_float => out.push(ctx.concrete(ConcreteType::FloatTy)),",
    );
    assert!(!output.contains("TypeId::TID_size_t =>"));
    assert_contains(&output, "        if ty.id as u16 >= 6 {");
}

#[test]
fn test_step_two_order() {
    let output = opencl();
    let positions: Vec<usize> = [
        "ctx.vector(entry.clone(), width)",
        "ctx.vector(entry.clone(), ty.vector_width)",
        "ctx.volatile(entry.clone())",
        "ctx.constant(entry.clone())",
        "ctx.address_space(entry.clone(), ty.address_space)",
        "ctx.pointer(qualified)",
    ]
    .iter()
    .map(|snippet| output.find(snippet).unwrap_or_else(|| panic!("missing {}", snippet)))
    .collect();

    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
}

#[test]
fn test_without_generics() {
    let source = format!("{}{}", SCALARS, "builtin abs(Int) -> Int;");
    let output = generate(&records(&source), &GeneratorConfig::default()).unwrap();
    assert!(!output.contains("gen_type_num_types"));
    assert_contains(&output, "        if ty.vector_width > 1 {");
    assert_contains(&output, "pub mod prog_model_builtins {");
}

#[test]
fn test_comments_can_be_disabled() {
    let output = render(&GeneratorConfig::new("OpenCL").with_comments(false));
    assert!(!output.contains("// 1: sin, cos"));
    assert!(!output.contains("// 0: none"));
    assert_contains(&output, "    pub static EXTENSION_TABLE: &[&str] = &[\n        \"\",");
}
