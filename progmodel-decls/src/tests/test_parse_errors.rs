use crate::error::ParseError;
use crate::parser::DeclParser;

#[test]
fn test_missing_semicolon() {
    let result = DeclParser::parse_file("builtin acos(Float) -> Float");
    assert!(matches!(result, Err(ParseError::PestError { .. })));
}

#[test]
fn test_missing_return_type() {
    let result = DeclParser::parse_file("builtin acos(Float);");
    assert!(matches!(result, Err(ParseError::PestError { .. })));
}

#[test]
fn test_keyword_as_name_is_rejected() {
    let result = DeclParser::parse_file("type vector = scalar \"float\" FloatTy;");
    assert!(matches!(result, Err(ParseError::PestError { .. })));
}

#[test]
fn test_version_out_of_range() {
    let input = "version Huge = 70000;";
    match DeclParser::parse_file(input) {
        Err(ParseError::InvalidInteger { found, span, .. }) => {
            assert_eq!(found, "70000");
            assert_eq!(span.offset(), input.find("70000").unwrap());
        }
        other => panic!("Expected invalid integer, got {:?}", other),
    }
}

#[test]
fn test_error_message_names_expectation() {
    match DeclParser::parse_file("intlist Widths = [1, two];") {
        Err(ParseError::PestError { message, .. }) => {
            assert!(message.contains("decimal number"), "message was: {}", message);
        }
        other => panic!("Expected pest error, got {:?}", other),
    }
}
