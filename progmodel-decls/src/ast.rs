// Builtin declaration AST
// Syntax tree nodes with source spans, before name resolution

use miette::SourceSpan;
use std::fmt;

/// Source position information for AST nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smallest span covering both `self` and `other`
    pub fn merge(&self, other: &Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::new(span.start.into(), span.len())
    }
}

/// A name as written in the declaration source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A complete declaration file
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationFile {
    pub items: Vec<Item>,
    pub source_file: Option<String>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub kind: ItemKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    Version(VersionDefinition),
    Extension(ExtensionDefinition),
    Type(TypeDefinition),
    IntList(IntListDefinition),
    TypeList(TypeListDefinition),
    Generic(GenericDefinition),
    Builtin(BuiltinDeclaration),
}

/// `version CL20 = 200;`
#[derive(Debug, Clone, PartialEq)]
pub struct VersionDefinition {
    pub name: Identifier,
    pub id: u16,
}

/// `extension FuncExtFp64 = "cl_khr_fp64";`
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionDefinition {
    pub name: Identifier,
    pub external_name: String,
}

/// `type Float4 = vector Float 4;`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDefinition {
    pub name: Identifier,
    pub expression: TypeExpression,
}

/// Image access qualifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AccessQualifier {
    #[default]
    None,
    ReadOnly,
    WriteOnly,
    ReadWrite,
}

impl AccessQualifier {
    pub const ALL: [AccessQualifier; 4] = [
        AccessQualifier::None,
        AccessQualifier::ReadOnly,
        AccessQualifier::WriteOnly,
        AccessQualifier::ReadWrite,
    ];

    /// Variant name used in generated tables
    pub fn variant_name(&self) -> &'static str {
        match self {
            AccessQualifier::None => "None",
            AccessQualifier::ReadOnly => "ReadOnly",
            AccessQualifier::WriteOnly => "WriteOnly",
            AccessQualifier::ReadWrite => "ReadWrite",
        }
    }
}

impl fmt::Display for AccessQualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessQualifier::None => write!(f, "none"),
            AccessQualifier::ReadOnly => write!(f, "read_only"),
            AccessQualifier::WriteOnly => write!(f, "write_only"),
            AccessQualifier::ReadWrite => write!(f, "read_write"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpression {
    /// `scalar "float" FloatTy [abstract]`
    Scalar {
        type_name: String,
        concrete: Identifier,
        is_abstract: bool,
    },
    /// `image "image2d_t" OCLImage2dROTy [read_only]`
    Image {
        type_name: String,
        concrete: Identifier,
        access: AccessQualifier,
    },
    /// `vector Float 4`
    Vector { base: Identifier, width: u32 },
    /// `pointer Float opencl_global`
    Pointer {
        base: Identifier,
        address_space: Identifier,
    },
    /// `const GlobalFloatPtr`
    Const { base: Identifier },
    /// `volatile GlobalFloatPtr`
    Volatile { base: Identifier },
}

/// `intlist VecAndScalar = [1, 2, 3, 4, 8, 16];`
#[derive(Debug, Clone, PartialEq)]
pub struct IntListDefinition {
    pub name: Identifier,
    pub values: Vec<u32>,
    pub list_span: Span,
}

/// `typelist TLFloat = [Float, Double, Half];`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeListDefinition {
    pub name: Identifier,
    pub members: Vec<Identifier>,
    pub list_span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeListReference {
    Named(Identifier),
    Inline { members: Vec<Identifier>, span: Span },
}

/// `generic FGenTypeN = TLFloat * VecAndScalar;`
#[derive(Debug, Clone, PartialEq)]
pub struct GenericDefinition {
    pub name: Identifier,
    pub types: TypeListReference,
    pub vector_sizes: Identifier,
}

/// `builtin sin, cos(FGenTypeN) -> FGenTypeN [const];`
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltinDeclaration {
    pub names: Vec<Identifier>,
    pub parameters: Vec<Identifier>,
    pub return_type: Identifier,
    pub is_variadic: bool,
    pub attributes: Vec<BuiltinAttribute>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BuiltinAttribute {
    Extension(Identifier),
    MinVersion(Identifier),
    MaxVersion(Identifier),
    Pure(Span),
    Const(Span),
    Convergent(Span),
}
