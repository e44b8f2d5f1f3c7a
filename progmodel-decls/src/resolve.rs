//! Name resolution from the declaration AST to [`RecordSet`].
//!
//! Resolution is a single pass in declaration order: a name must be
//! defined before it is referenced. All definitions share one namespace;
//! builtin names live in their own.

use crate::ast::*;
use crate::error::ResolveError;
use crate::records::*;
use indexmap::IndexMap;

/// Name of the implicit extension referenced by builtins without `ext`
pub const NO_EXTENSION: &str = "none";

#[derive(Debug, Clone, Copy)]
enum Symbol {
    Version(u16),
    Extension(ExtensionId),
    Type(TypeRecordId),
    IntList(IntListId),
    TypeList(usize),
}

impl Symbol {
    fn kind_name(&self) -> &'static str {
        match self {
            Symbol::Version(_) => "version",
            Symbol::Extension(_) => "extension",
            Symbol::Type(_) => "type",
            Symbol::IntList(_) => "int list",
            Symbol::TypeList(_) => "type list",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Definition {
    symbol: Symbol,
    span: Span,
}

pub struct Resolver {
    symbols: IndexMap<String, Definition>,
    type_lists: Vec<Vec<TypeRecordId>>,
    records: RecordSet,
}

impl Resolver {
    pub fn new(source_file: Option<String>) -> Self {
        let mut symbols = IndexMap::new();
        symbols.insert(
            NO_EXTENSION.to_string(),
            Definition {
                symbol: Symbol::Extension(ExtensionId::NONE),
                span: Span::default(),
            },
        );

        Self {
            symbols,
            type_lists: Vec::new(),
            records: RecordSet {
                extensions: vec![ExtensionRecord {
                    name: NO_EXTENSION.to_string(),
                    external_name: String::new(),
                }],
                source_file,
                ..RecordSet::default()
            },
        }
    }

    /// Resolve a whole file into records
    pub fn resolve(file: &DeclarationFile) -> Result<RecordSet, ResolveError> {
        let mut resolver = Resolver::new(file.source_file.clone());
        for item in &file.items {
            resolver.resolve_item(item)?;
        }

        let records = resolver.records;
        log::debug!(
            "resolved {} type records, {} generic types, {} extensions, {} builtin records",
            records.types.len(),
            records.generics.len(),
            records.extensions.len(),
            records.builtins.len()
        );
        Ok(records)
    }

    fn resolve_item(&mut self, item: &Item) -> Result<(), ResolveError> {
        match &item.kind {
            ItemKind::Version(version) => {
                self.define(&version.name, Symbol::Version(version.id))
            }
            ItemKind::Extension(extension) => self.resolve_extension(extension),
            ItemKind::Type(definition) => self.resolve_type(definition, item.span),
            ItemKind::IntList(list) => self.resolve_int_list(list),
            ItemKind::TypeList(list) => {
                let members = self.resolve_type_list_members(&list.name.name, &list.members, list.list_span)?;
                self.type_lists.push(members);
                self.define(&list.name, Symbol::TypeList(self.type_lists.len() - 1))
            }
            ItemKind::Generic(generic) => self.resolve_generic(generic, item.span),
            ItemKind::Builtin(builtin) => self.resolve_builtin(builtin, item.span),
        }
    }

    fn define(&mut self, name: &Identifier, symbol: Symbol) -> Result<(), ResolveError> {
        if let Some(previous) = self.symbols.get(&name.name) {
            return Err(ResolveError::duplicate_definition(
                &name.name,
                name.span,
                previous.span,
            ));
        }
        self.symbols.insert(
            name.name.clone(),
            Definition {
                symbol,
                span: name.span,
            },
        );
        Ok(())
    }

    fn lookup(&self, name: &Identifier, expected: &'static str) -> Result<Symbol, ResolveError> {
        self.symbols
            .get(&name.name)
            .map(|definition| definition.symbol)
            .ok_or_else(|| ResolveError::undefined(&name.name, expected, name.span))
    }

    fn lookup_type(&self, name: &Identifier) -> Result<TypeRecordId, ResolveError> {
        match self.lookup(name, "type")? {
            Symbol::Type(id) => Ok(id),
            other => Err(ResolveError::wrong_kind(&name.name, "type", other.kind_name(), name.span)),
        }
    }

    fn lookup_version(&self, name: &Identifier) -> Result<u16, ResolveError> {
        match self.lookup(name, "version")? {
            Symbol::Version(id) => Ok(id),
            other => Err(ResolveError::wrong_kind(
                &name.name,
                "version",
                other.kind_name(),
                name.span,
            )),
        }
    }

    fn lookup_extension(&self, name: &Identifier) -> Result<ExtensionId, ResolveError> {
        match self.lookup(name, "extension")? {
            Symbol::Extension(id) => Ok(id),
            other => Err(ResolveError::wrong_kind(
                &name.name,
                "extension",
                other.kind_name(),
                name.span,
            )),
        }
    }

    fn lookup_int_list(&self, name: &Identifier) -> Result<IntListId, ResolveError> {
        match self.lookup(name, "int list")? {
            Symbol::IntList(id) => Ok(id),
            other => Err(ResolveError::wrong_kind(
                &name.name,
                "int list",
                other.kind_name(),
                name.span,
            )),
        }
    }

    fn resolve_extension(&mut self, extension: &ExtensionDefinition) -> Result<(), ResolveError> {
        // Extensions are deduplicated by name; the first definition wins.
        if let Some(previous) = self.symbols.get(&extension.name.name) {
            if let Symbol::Extension(id) = previous.symbol {
                let existing = &self.records.extensions[id.0];
                if existing.external_name != extension.external_name {
                    log::warn!(
                        "extension `{}` redefined as \"{}\", keeping \"{}\"",
                        extension.name.name,
                        extension.external_name,
                        existing.external_name
                    );
                }
                return Ok(());
            }
        }

        let id = ExtensionId(self.records.extensions.len());
        self.define(&extension.name, Symbol::Extension(id))?;
        self.records.extensions.push(ExtensionRecord {
            name: extension.name.name.clone(),
            external_name: extension.external_name.clone(),
        });
        Ok(())
    }

    fn resolve_type(&mut self, definition: &TypeDefinition, span: Span) -> Result<(), ResolveError> {
        let def_name = definition.name.name.clone();

        let record = match &definition.expression {
            TypeExpression::Scalar {
                type_name,
                concrete,
                is_abstract,
            } => TypeRecord {
                def_name,
                name: type_name.clone(),
                concrete_name: Some(concrete.name.clone()),
                is_abstract: *is_abstract,
                vector_width: 0,
                is_pointer: false,
                is_const: false,
                is_volatile: false,
                access: AccessQualifier::None,
                address_space: None,
                kind: TypeKind::Scalar,
                span,
            },
            TypeExpression::Image {
                type_name,
                concrete,
                access,
            } => TypeRecord {
                def_name,
                name: type_name.clone(),
                concrete_name: Some(concrete.name.clone()),
                is_abstract: false,
                vector_width: 0,
                is_pointer: false,
                is_const: false,
                is_volatile: false,
                access: *access,
                address_space: None,
                kind: TypeKind::Image,
                span,
            },
            TypeExpression::Vector { base, width } => {
                if *width == 0 {
                    return Err(ResolveError::InvalidWidth {
                        width: *width,
                        span: span.into(),
                    });
                }
                let mut record = self.derive_from(base, def_name, span)?;
                record.vector_width = *width;
                record
            }
            TypeExpression::Pointer {
                base,
                address_space,
            } => {
                let mut record = self.derive_from(base, def_name, span)?;
                record.is_pointer = true;
                record.address_space = Some(address_space.name.clone());
                record
            }
            TypeExpression::Const { base } => {
                let mut record = self.derive_from(base, def_name, span)?;
                record.is_const = true;
                record
            }
            TypeExpression::Volatile { base } => {
                let mut record = self.derive_from(base, def_name, span)?;
                record.is_volatile = true;
                record
            }
        };

        let id = TypeRecordId(self.records.types.len());
        self.define(&definition.name, Symbol::Type(id))?;
        self.records.types.push(record);
        Ok(())
    }

    /// Copy every field of `base` into a new record named `def_name`
    fn derive_from(
        &self,
        base: &Identifier,
        def_name: String,
        span: Span,
    ) -> Result<TypeRecord, ResolveError> {
        let base_id = self.lookup_type(base)?;
        let mut record = self.records.type_record(base_id).clone();
        record.def_name = def_name;
        record.span = span;
        Ok(record)
    }

    fn resolve_int_list(&mut self, list: &IntListDefinition) -> Result<(), ResolveError> {
        if list.values.is_empty() {
            return Err(ResolveError::EmptyList {
                name: list.name.name.clone(),
                span: list.list_span.into(),
            });
        }
        if let Some(width) = list.values.iter().find(|width| **width == 0) {
            return Err(ResolveError::InvalidWidth {
                width: *width,
                span: list.list_span.into(),
            });
        }

        let id = IntListId(self.records.int_lists.len());
        self.define(&list.name, Symbol::IntList(id))?;
        self.records.int_lists.push(IntList {
            name: list.name.name.clone(),
            values: list.values.clone(),
            span: list.name.span.merge(&list.list_span),
        });
        Ok(())
    }

    fn resolve_type_list_members(
        &self,
        owner: &str,
        members: &[Identifier],
        list_span: Span,
    ) -> Result<Vec<TypeRecordId>, ResolveError> {
        if members.is_empty() {
            return Err(ResolveError::EmptyList {
                name: owner.to_string(),
                span: list_span.into(),
            });
        }

        members
            .iter()
            .map(|member| {
                let id = self.lookup_type(member)?;
                if self.records.type_record(id).is_generic() {
                    return Err(ResolveError::GenericMember {
                        name: owner.to_string(),
                        base: member.name.clone(),
                        span: member.span.into(),
                    });
                }
                Ok(id)
            })
            .collect()
    }

    fn resolve_generic(&mut self, generic: &GenericDefinition, span: Span) -> Result<(), ResolveError> {
        let types = match &generic.types {
            TypeListReference::Inline { members, span } => {
                self.resolve_type_list_members(&generic.name.name, members, *span)?
            }
            TypeListReference::Named(list_name) => match self.lookup(list_name, "type list")? {
                Symbol::TypeList(index) => self.type_lists[index].clone(),
                other => {
                    return Err(ResolveError::wrong_kind(
                        &list_name.name,
                        "type list",
                        other.kind_name(),
                        list_name.span,
                    ))
                }
            },
        };
        let vector_sizes = self.lookup_int_list(&generic.vector_sizes)?;

        let generic_id = GenericId(self.records.generics.len());
        let record_id = TypeRecordId(self.records.types.len());
        self.define(&generic.name, Symbol::Type(record_id))?;

        self.records.types.push(TypeRecord {
            def_name: generic.name.name.clone(),
            name: generic.name.name.clone(),
            concrete_name: None,
            is_abstract: true,
            vector_width: 0,
            is_pointer: false,
            is_const: false,
            is_volatile: false,
            access: AccessQualifier::None,
            address_space: None,
            kind: TypeKind::Generic(generic_id),
            span,
        });
        self.records.generics.push(GenericType {
            name: generic.name.name.clone(),
            record: record_id,
            types,
            vector_sizes,
            span,
        });
        Ok(())
    }

    fn resolve_builtin(&mut self, builtin: &BuiltinDeclaration, span: Span) -> Result<(), ResolveError> {
        let mut signature = Vec::with_capacity(builtin.parameters.len() + 1);
        signature.push(self.lookup_type(&builtin.return_type)?);
        for parameter in &builtin.parameters {
            signature.push(self.lookup_type(parameter)?);
        }

        let mut extension = ExtensionId::NONE;
        let mut min_version = 0;
        let mut max_version = 0;
        let mut is_pure = false;
        let mut is_const = false;
        let mut is_convergent = false;

        for attribute in &builtin.attributes {
            match attribute {
                BuiltinAttribute::Extension(name) => extension = self.lookup_extension(name)?,
                BuiltinAttribute::MinVersion(name) => min_version = self.lookup_version(name)?,
                BuiltinAttribute::MaxVersion(name) => max_version = self.lookup_version(name)?,
                BuiltinAttribute::Pure(_) => is_pure = true,
                BuiltinAttribute::Const(_) => is_const = true,
                BuiltinAttribute::Convergent(_) => is_convergent = true,
            }
        }

        for name in &builtin.names {
            self.records.builtins.push(BuiltinRecord {
                name: name.name.clone(),
                signature: signature.clone(),
                extension,
                min_version,
                max_version,
                is_pure,
                is_const,
                is_convergent,
                is_variadic: builtin.is_variadic,
                span,
            });
        }
        Ok(())
    }
}
