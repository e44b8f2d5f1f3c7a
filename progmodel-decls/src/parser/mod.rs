// Builtin declaration parser
// Pest-based parser producing the declaration AST

mod builtins;
mod types;

use crate::ast::*;
use crate::error::*;
use pest::iterators::{Pair, Pairs};
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct DeclParser;

impl DeclParser {
    /// Parse a complete declaration file
    pub fn parse_file(input: &str) -> ParseResult<DeclarationFile> {
        Self::parse_file_with_source(input, None)
    }

    /// Parse a complete declaration file, remembering where it came from
    pub fn parse_file_with_source(
        input: &str,
        source_file: Option<String>,
    ) -> ParseResult<DeclarationFile> {
        let mut pairs = <Self as Parser<Rule>>::parse(Rule::file, input)
            .map_err(|error| ParseError::from_pest_error(error, input.to_string()))?;

        let file_pair = Self::next_pair(&mut pairs, Rule::file, Span::new(0, input.len()))?;
        let span = Self::span_from_pair(&file_pair);

        let mut items = Vec::new();
        for pair in file_pair.into_inner() {
            if pair.as_rule() == Rule::EOI {
                continue;
            }
            items.push(Self::parse_item(pair, input)?);
        }

        Ok(DeclarationFile {
            items,
            source_file,
            span,
        })
    }

    fn parse_item(pair: Pair<Rule>, src: &str) -> ParseResult<Item> {
        let span = Self::span_from_pair(&pair);

        let kind = match pair.as_rule() {
            Rule::version_definition => ItemKind::Version(Self::parse_version(pair, src)?),
            Rule::extension_definition => ItemKind::Extension(Self::parse_extension(pair)?),
            Rule::type_definition => ItemKind::Type(Self::parse_type_definition(pair, src)?),
            Rule::int_list_definition => ItemKind::IntList(Self::parse_int_list_definition(pair, src)?),
            Rule::type_list_definition => ItemKind::TypeList(Self::parse_type_list_definition(pair)?),
            Rule::generic_definition => ItemKind::Generic(Self::parse_generic_definition(pair)?),
            Rule::builtin_declaration => ItemKind::Builtin(Self::parse_builtin(pair)?),
            other => {
                return Err(ParseError::unexpected_rule(
                    Rule::builtin_declaration,
                    Some(other),
                    span,
                ))
            }
        };

        Ok(Item { kind, span })
    }

    /// `version CL20 = 200;`
    fn parse_version(pair: Pair<Rule>, src: &str) -> ParseResult<VersionDefinition> {
        let span = Self::span_from_pair(&pair);
        let mut inner = pair.into_inner();

        let name = Self::parse_identifier(Self::next_pair(&mut inner, Rule::identifier, span)?);
        let id_pair = Self::next_pair(&mut inner, Rule::integer, span)?;
        let id = Self::parse_integer::<u16>(&id_pair, src, "u16")?;

        Ok(VersionDefinition { name, id })
    }

    /// `extension FuncExtFp64 = "cl_khr_fp64";`
    fn parse_extension(pair: Pair<Rule>) -> ParseResult<ExtensionDefinition> {
        let span = Self::span_from_pair(&pair);
        let mut inner = pair.into_inner();

        let name = Self::parse_identifier(Self::next_pair(&mut inner, Rule::identifier, span)?);
        let string_pair = Self::next_pair(&mut inner, Rule::string, span)?;
        let external_name = Self::parse_string(string_pair);

        Ok(ExtensionDefinition {
            name,
            external_name,
        })
    }

    /// Convert a Pest span to an AST span
    pub(crate) fn span_from_pair(pair: &Pair<Rule>) -> Span {
        let pest_span = pair.as_span();
        Span::new(pest_span.start(), pest_span.end())
    }

    pub(crate) fn parse_identifier(pair: Pair<Rule>) -> Identifier {
        Identifier {
            name: pair.as_str().to_string(),
            span: Self::span_from_pair(&pair),
        }
    }

    /// Content of a string literal without its quotes
    pub(crate) fn parse_string(pair: Pair<Rule>) -> String {
        pair.into_inner()
            .find(|inner| inner.as_rule() == Rule::string_text)
            .map(|inner| inner.as_str().to_string())
            .unwrap_or_default()
    }

    pub(crate) fn parse_integer<T: std::str::FromStr>(
        pair: &Pair<Rule>,
        src: &str,
        limit: &'static str,
    ) -> ParseResult<T> {
        let text = pair.as_str();
        text.parse::<T>().map_err(|_| {
            ParseError::invalid_integer(src, Self::span_from_pair(pair), text, limit)
        })
    }

    /// Take the next pair, skipping keywords, and check it is `expected`
    pub(crate) fn next_pair<'i>(
        pairs: &mut Pairs<'i, Rule>,
        expected: Rule,
        parent: Span,
    ) -> ParseResult<Pair<'i, Rule>> {
        for pair in pairs.by_ref() {
            if Self::is_keyword(pair.as_rule()) {
                continue;
            }
            if pair.as_rule() == expected {
                return Ok(pair);
            }
            let span = Self::span_from_pair(&pair);
            return Err(ParseError::unexpected_rule(expected, Some(pair.as_rule()), span));
        }
        Err(ParseError::unexpected_rule(
            expected,
            None,
            Span::new(parent.end, parent.end),
        ))
    }

    fn is_keyword(rule: Rule) -> bool {
        matches!(
            rule,
            Rule::keyword_version
                | Rule::keyword_extension
                | Rule::keyword_type
                | Rule::keyword_intlist
                | Rule::keyword_typelist
                | Rule::keyword_generic
                | Rule::keyword_builtin
                | Rule::keyword_scalar
                | Rule::keyword_image
                | Rule::keyword_vector
                | Rule::keyword_pointer
                | Rule::keyword_const
                | Rule::keyword_volatile
                | Rule::attr_ext
                | Rule::attr_min
                | Rule::attr_max
        )
    }
}
