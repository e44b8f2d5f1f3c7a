use crate::ast::*;
use crate::parser::DeclParser;
use pretty_assertions::assert_eq;

fn single_item(input: &str) -> ItemKind {
    let file = DeclParser::parse_file(input).unwrap();
    assert_eq!(file.items.len(), 1);
    file.items.into_iter().next().unwrap().kind
}

#[test]
fn test_scalar_type() {
    match single_item("type Float = scalar \"float\" FloatTy;") {
        ItemKind::Type(definition) => {
            assert_eq!(definition.name.name, "Float");
            match definition.expression {
                TypeExpression::Scalar {
                    type_name,
                    concrete,
                    is_abstract,
                } => {
                    assert_eq!(type_name, "float");
                    assert_eq!(concrete.name, "FloatTy");
                    assert!(!is_abstract);
                }
                other => panic!("Expected scalar type, got {:?}", other),
            }
        }
        other => panic!("Expected type definition, got {:?}", other),
    }
}

#[test]
fn test_abstract_scalar_type() {
    match single_item("type SizeT = scalar \"size_t\" SizeTy abstract;") {
        ItemKind::Type(TypeDefinition {
            expression: TypeExpression::Scalar { is_abstract, .. },
            ..
        }) => assert!(is_abstract),
        other => panic!("Expected abstract scalar, got {:?}", other),
    }
}

#[test]
fn test_image_type_access_qualifiers() {
    let cases = [
        ("read_only", AccessQualifier::ReadOnly),
        ("write_only", AccessQualifier::WriteOnly),
        ("read_write", AccessQualifier::ReadWrite),
        ("", AccessQualifier::None),
    ];

    for (written, expected) in cases {
        let input = format!("type Img = image \"image2d_t\" OCLImage2dTy {};", written);
        match single_item(&input) {
            ItemKind::Type(TypeDefinition {
                expression: TypeExpression::Image { access, type_name, .. },
                ..
            }) => {
                assert_eq!(type_name, "image2d_t");
                assert_eq!(access, expected, "access for `{}`", written);
            }
            other => panic!("Expected image type, got {:?}", other),
        }
    }
}

#[test]
fn test_derived_types() {
    let input = r#"
        type Float4 = vector Float 4;
        type GPtr = pointer Float opencl_global;
        type CPtr = const GPtr;
        type VPtr = volatile GPtr;
    "#;
    let file = DeclParser::parse_file(input).unwrap();
    let expressions: Vec<TypeExpression> = file
        .items
        .into_iter()
        .map(|item| match item.kind {
            ItemKind::Type(definition) => definition.expression,
            other => panic!("Expected type definition, got {:?}", other),
        })
        .collect();

    match &expressions[0] {
        TypeExpression::Vector { base, width } => {
            assert_eq!(base.name, "Float");
            assert_eq!(*width, 4);
        }
        other => panic!("Expected vector, got {:?}", other),
    }
    match &expressions[1] {
        TypeExpression::Pointer {
            base,
            address_space,
        } => {
            assert_eq!(base.name, "Float");
            assert_eq!(address_space.name, "opencl_global");
        }
        other => panic!("Expected pointer, got {:?}", other),
    }
    assert!(matches!(&expressions[2], TypeExpression::Const { base } if base.name == "GPtr"));
    assert!(matches!(&expressions[3], TypeExpression::Volatile { base } if base.name == "GPtr"));
}

#[test]
fn test_lists_and_generic_types() {
    let input = r#"
        intlist VecAndScalar = [1, 2, 3, 4, 8, 16,];
        typelist TLFloat = [Float, Double, Half];
        generic FGenTypeN = TLFloat * VecAndScalar;
        generic IGen = [Int, UInt] * VecAndScalar;
    "#;
    let file = DeclParser::parse_file(input).unwrap();
    assert_eq!(file.items.len(), 4);

    match &file.items[0].kind {
        ItemKind::IntList(list) => assert_eq!(list.values, vec![1, 2, 3, 4, 8, 16]),
        other => panic!("Expected int list, got {:?}", other),
    }
    match &file.items[1].kind {
        ItemKind::TypeList(list) => {
            let names: Vec<&str> = list.members.iter().map(|m| m.name.as_str()).collect();
            assert_eq!(names, vec!["Float", "Double", "Half"]);
        }
        other => panic!("Expected type list, got {:?}", other),
    }
    match &file.items[2].kind {
        ItemKind::Generic(generic) => {
            assert!(matches!(&generic.types, TypeListReference::Named(name) if name.name == "TLFloat"));
            assert_eq!(generic.vector_sizes.name, "VecAndScalar");
        }
        other => panic!("Expected generic type, got {:?}", other),
    }
    match &file.items[3].kind {
        ItemKind::Generic(generic) => match &generic.types {
            TypeListReference::Inline { members, .. } => assert_eq!(members.len(), 2),
            other => panic!("Expected inline type list, got {:?}", other),
        },
        other => panic!("Expected generic type, got {:?}", other),
    }
}

#[test]
fn test_keyword_prefixed_identifiers_are_identifiers() {
    // `constant` and `types` start with keywords but are plain names
    let input = "type constant = scalar \"int\" IntTy; type types = const constant;";
    let file = DeclParser::parse_file(input).unwrap();
    assert_eq!(file.items.len(), 2);
    match &file.items[1].kind {
        ItemKind::Type(definition) => {
            assert_eq!(definition.name.name, "types");
            assert!(matches!(&definition.expression, TypeExpression::Const { base } if base.name == "constant"));
        }
        other => panic!("Expected type definition, got {:?}", other),
    }
}

#[test]
fn test_spans_point_at_source() {
    let input = "type Float = scalar \"float\" FloatTy;";
    let file = DeclParser::parse_file(input).unwrap();
    let item = &file.items[0];
    assert_eq!(item.span, Span::new(0, input.len()));
    match &item.kind {
        ItemKind::Type(definition) => {
            assert_eq!(&input[definition.name.span.start..definition.name.span.end], "Float");
        }
        other => panic!("Expected type definition, got {:?}", other),
    }
}
