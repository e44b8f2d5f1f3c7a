// Builtin declaration error handling
// Parse and resolution errors with miette integration

use crate::ast::Span;
use crate::parser::Rule;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Syntax errors raised while reading a declaration file
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    #[error("Parse error: {message}")]
    #[diagnostic(
        code(progmodel::parse::pest_error),
        help("Check the syntax near the highlighted location")
    )]
    PestError {
        #[source_code]
        src: String,
        #[label("error occurred here")]
        span: SourceSpan,
        message: String,
    },

    #[error("Invalid integer literal `{found}`")]
    #[diagnostic(
        code(progmodel::parse::invalid_integer),
        help("Integer literals must be decimal and fit in {limit}")
    )]
    InvalidInteger {
        #[source_code]
        src: String,
        #[label("invalid integer")]
        span: SourceSpan,
        found: String,
        limit: &'static str,
    },

    #[error("Unexpected grammar rule")]
    #[diagnostic(
        code(progmodel::parse::unexpected_rule),
        help("Expected rule: {expected}")
    )]
    UnexpectedRule {
        expected: String,
        found: Option<Rule>,
        #[label("unexpected here")]
        span: SourceSpan,
    },
}

impl ParseError {
    /// Create a parse error from a Pest parsing error
    pub fn from_pest_error(error: pest::error::Error<Rule>, src: String) -> Self {
        let span = match error.location {
            pest::error::InputLocation::Pos(pos) => SourceSpan::new(pos.into(), 1),
            pest::error::InputLocation::Span((start, end)) => {
                SourceSpan::new(start.into(), end - start)
            }
        };

        let message = match &error.variant {
            pest::error::ErrorVariant::ParsingError { positives, .. } if !positives.is_empty() => {
                let expected: Vec<String> = positives
                    .iter()
                    .map(rule_to_user_friendly_description)
                    .collect();
                format!("expected {}", expected.join(" or "))
            }
            pest::error::ErrorVariant::ParsingError { .. } => "unexpected input".to_string(),
            pest::error::ErrorVariant::CustomError { message } => message.clone(),
        };

        ParseError::PestError { src, span, message }
    }

    /// Create an invalid integer error
    pub fn invalid_integer(src: &str, span: Span, found: &str, limit: &'static str) -> Self {
        ParseError::InvalidInteger {
            src: src.to_string(),
            span: span.into(),
            found: found.to_string(),
            limit,
        }
    }

    /// Create an unexpected rule error
    pub fn unexpected_rule(expected: Rule, found: Option<Rule>, span: Span) -> Self {
        ParseError::UnexpectedRule {
            expected: rule_to_user_friendly_description(&expected),
            found,
            span: span.into(),
        }
    }
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Name resolution errors, raised after the file parsed successfully
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("`{name}` is defined more than once")]
    #[diagnostic(
        code(progmodel::resolve::duplicate_definition),
        help("Every version, type, list and generic type needs a unique name")
    )]
    DuplicateDefinition {
        name: String,
        #[label("redefined here")]
        span: SourceSpan,
        #[label("first defined here")]
        previous: SourceSpan,
    },

    #[error("Undefined {expected} `{name}`")]
    #[diagnostic(
        code(progmodel::resolve::undefined_reference),
        help("Definitions must appear before their first use")
    )]
    UndefinedReference {
        name: String,
        expected: &'static str,
        #[label("not defined")]
        span: SourceSpan,
    },

    #[error("`{name}` is a {found}, expected a {expected}")]
    #[diagnostic(code(progmodel::resolve::wrong_kind))]
    WrongKind {
        name: String,
        expected: &'static str,
        found: &'static str,
        #[label("expected a {expected}")]
        span: SourceSpan,
    },

    #[error("`{name}` has an empty list")]
    #[diagnostic(
        code(progmodel::resolve::empty_list),
        help("Generic types need at least one type and one vector size")
    )]
    EmptyList {
        name: String,
        #[label("empty list")]
        span: SourceSpan,
    },

    #[error("Invalid vector width {width}")]
    #[diagnostic(
        code(progmodel::resolve::invalid_width),
        help("Vector widths start at 1; use 1 for the scalar member of a generic type")
    )]
    InvalidWidth {
        width: u32,
        #[label("invalid width")]
        span: SourceSpan,
    },

    #[error("`{name}` cannot be derived from generic type `{base}`")]
    #[diagnostic(
        code(progmodel::resolve::generic_member),
        help("Type lists of generic types may only name non-generic types")
    )]
    GenericMember {
        name: String,
        base: String,
        #[label("generic type used here")]
        span: SourceSpan,
    },
}

impl ResolveError {
    pub fn duplicate_definition(name: &str, span: Span, previous: Span) -> Self {
        ResolveError::DuplicateDefinition {
            name: name.to_string(),
            span: span.into(),
            previous: previous.into(),
        }
    }

    pub fn undefined(name: &str, expected: &'static str, span: Span) -> Self {
        ResolveError::UndefinedReference {
            name: name.to_string(),
            expected,
            span: span.into(),
        }
    }

    pub fn wrong_kind(name: &str, expected: &'static str, found: &'static str, span: Span) -> Self {
        ResolveError::WrongKind {
            name: name.to_string(),
            expected,
            found,
            span: span.into(),
        }
    }
}

/// Any failure turning declaration text into records
#[derive(Error, Diagnostic, Debug)]
pub enum DeclError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Resolve(#[from] ResolveError),
}

/// Convert a parser rule to a user-friendly description
fn rule_to_user_friendly_description(rule: &Rule) -> String {
    match rule {
        Rule::identifier => "an identifier (like Float or acos)".to_string(),
        Rule::integer => "a decimal number".to_string(),
        Rule::string => "a string (like \"cl_khr_fp64\")".to_string(),

        Rule::version_definition => "a version definition (version CL20 = 200;)".to_string(),
        Rule::extension_definition => {
            "an extension definition (extension Fp64 = \"cl_khr_fp64\";)".to_string()
        }
        Rule::type_definition => "a type definition (type Float = scalar \"float\" FloatTy;)".to_string(),
        Rule::int_list_definition => "an int list (intlist Vec = [1, 2, 4];)".to_string(),
        Rule::type_list_definition => "a type list (typelist TL = [Float, Half];)".to_string(),
        Rule::generic_definition => "a generic type (generic G = TL * Vec;)".to_string(),
        Rule::builtin_declaration => "a builtin (builtin acos(Float) -> Float;)".to_string(),

        Rule::scalar_type => "a scalar type".to_string(),
        Rule::image_type => "an image type".to_string(),
        Rule::vector_type => "a vector type".to_string(),
        Rule::pointer_type => "a pointer type".to_string(),
        Rule::const_type => "a const type".to_string(),
        Rule::volatile_type => "a volatile type".to_string(),
        Rule::access_qualifier => "an access qualifier (read_only, write_only, read_write)".to_string(),

        Rule::int_list => "a list of integers ([1, 2, 4])".to_string(),
        Rule::type_list => "a list of types ([Float, Half])".to_string(),
        Rule::type_list_reference => "a type list or its name".to_string(),

        Rule::builtin_names => "builtin names".to_string(),
        Rule::parameter_list => "a parameter list".to_string(),
        Rule::variadic_marker => "`...`".to_string(),
        Rule::attribute_list => "an attribute list ([pure, const])".to_string(),
        Rule::attribute_extension => "ext = <extension>".to_string(),
        Rule::attribute_min_version => "min = <version>".to_string(),
        Rule::attribute_max_version => "max = <version>".to_string(),
        Rule::attribute_pure => "`pure`".to_string(),
        Rule::attribute_const => "`const`".to_string(),
        Rule::attribute_convergent => "`convergent`".to_string(),

        Rule::EOI => "end of input".to_string(),

        _ => format!("a {:?}", rule).replace('_', " "),
    }
}
