// Type record parsing
// Handles type definitions, int lists, type lists and generic types

use super::{DeclParser, Rule};
use crate::ast::*;
use crate::error::*;
use pest::iterators::Pair;

impl DeclParser {
    /// Parse `type <name> = <type expression>;`
    pub(super) fn parse_type_definition(
        pair: Pair<Rule>,
        src: &str,
    ) -> ParseResult<TypeDefinition> {
        let span = Self::span_from_pair(&pair);
        let mut inner = pair.into_inner();

        let name = Self::parse_identifier(Self::next_pair(&mut inner, Rule::identifier, span)?);

        let expression_pair = inner
            .find(|p| !matches!(p.as_rule(), Rule::keyword_type))
            .ok_or_else(|| {
                ParseError::unexpected_rule(Rule::scalar_type, None, Span::new(span.end, span.end))
            })?;
        let expression = Self::parse_type_expression(expression_pair, src)?;

        Ok(TypeDefinition { name, expression })
    }

    fn parse_type_expression(pair: Pair<Rule>, src: &str) -> ParseResult<TypeExpression> {
        let span = Self::span_from_pair(&pair);
        let rule = pair.as_rule();
        let mut inner = pair.into_inner();

        match rule {
            Rule::scalar_type => {
                let type_name = Self::parse_string(Self::next_pair(&mut inner, Rule::string, span)?);
                let concrete =
                    Self::parse_identifier(Self::next_pair(&mut inner, Rule::identifier, span)?);
                let is_abstract = inner.any(|p| p.as_rule() == Rule::keyword_abstract);

                Ok(TypeExpression::Scalar {
                    type_name,
                    concrete,
                    is_abstract,
                })
            }
            Rule::image_type => {
                let type_name = Self::parse_string(Self::next_pair(&mut inner, Rule::string, span)?);
                let concrete =
                    Self::parse_identifier(Self::next_pair(&mut inner, Rule::identifier, span)?);
                let access = match inner.find(|p| p.as_rule() == Rule::access_qualifier) {
                    Some(access_pair) => Self::parse_access_qualifier(access_pair),
                    None => AccessQualifier::None,
                };

                Ok(TypeExpression::Image {
                    type_name,
                    concrete,
                    access,
                })
            }
            Rule::vector_type => {
                let base = Self::parse_identifier(Self::next_pair(&mut inner, Rule::identifier, span)?);
                let width_pair = Self::next_pair(&mut inner, Rule::integer, span)?;
                let width = Self::parse_integer::<u32>(&width_pair, src, "u32")?;

                Ok(TypeExpression::Vector { base, width })
            }
            Rule::pointer_type => {
                let base = Self::parse_identifier(Self::next_pair(&mut inner, Rule::identifier, span)?);
                let address_space =
                    Self::parse_identifier(Self::next_pair(&mut inner, Rule::identifier, span)?);

                Ok(TypeExpression::Pointer {
                    base,
                    address_space,
                })
            }
            Rule::const_type => {
                let base = Self::parse_identifier(Self::next_pair(&mut inner, Rule::identifier, span)?);
                Ok(TypeExpression::Const { base })
            }
            Rule::volatile_type => {
                let base = Self::parse_identifier(Self::next_pair(&mut inner, Rule::identifier, span)?);
                Ok(TypeExpression::Volatile { base })
            }
            other => Err(ParseError::unexpected_rule(Rule::scalar_type, Some(other), span)),
        }
    }

    fn parse_access_qualifier(pair: Pair<Rule>) -> AccessQualifier {
        match pair.into_inner().next().map(|p| p.as_rule()) {
            Some(Rule::access_read_only) => AccessQualifier::ReadOnly,
            Some(Rule::access_write_only) => AccessQualifier::WriteOnly,
            Some(Rule::access_read_write) => AccessQualifier::ReadWrite,
            _ => AccessQualifier::None,
        }
    }

    /// Parse `intlist <name> = [1, 2, 4];`
    pub(super) fn parse_int_list_definition(
        pair: Pair<Rule>,
        src: &str,
    ) -> ParseResult<IntListDefinition> {
        let span = Self::span_from_pair(&pair);
        let mut inner = pair.into_inner();

        let name = Self::parse_identifier(Self::next_pair(&mut inner, Rule::identifier, span)?);
        let list_pair = Self::next_pair(&mut inner, Rule::int_list, span)?;
        let list_span = Self::span_from_pair(&list_pair);

        let mut values = Vec::new();
        for value_pair in list_pair.into_inner() {
            values.push(Self::parse_integer::<u32>(&value_pair, src, "u32")?);
        }

        Ok(IntListDefinition {
            name,
            values,
            list_span,
        })
    }

    /// Parse `typelist <name> = [Float, Half];`
    pub(super) fn parse_type_list_definition(
        pair: Pair<Rule>,
    ) -> ParseResult<TypeListDefinition> {
        let span = Self::span_from_pair(&pair);
        let mut inner = pair.into_inner();

        let name = Self::parse_identifier(Self::next_pair(&mut inner, Rule::identifier, span)?);
        let list_pair = Self::next_pair(&mut inner, Rule::type_list, span)?;
        let list_span = Self::span_from_pair(&list_pair);
        let members = list_pair.into_inner().map(Self::parse_identifier).collect();

        Ok(TypeListDefinition {
            name,
            members,
            list_span,
        })
    }

    /// Parse `generic <name> = <type list> * <int list>;`
    pub(super) fn parse_generic_definition(pair: Pair<Rule>) -> ParseResult<GenericDefinition> {
        let span = Self::span_from_pair(&pair);
        let mut inner = pair.into_inner();

        let name = Self::parse_identifier(Self::next_pair(&mut inner, Rule::identifier, span)?);

        let reference_pair = Self::next_pair(&mut inner, Rule::type_list_reference, span)?;
        let reference_span = Self::span_from_pair(&reference_pair);
        let reference_inner = reference_pair.into_inner().next().ok_or_else(|| {
            ParseError::unexpected_rule(Rule::type_list_reference, None, reference_span)
        })?;
        let types = match reference_inner.as_rule() {
            Rule::type_list => TypeListReference::Inline {
                span: Self::span_from_pair(&reference_inner),
                members: reference_inner
                    .into_inner()
                    .map(Self::parse_identifier)
                    .collect(),
            },
            _ => TypeListReference::Named(Self::parse_identifier(reference_inner)),
        };

        let vector_sizes =
            Self::parse_identifier(Self::next_pair(&mut inner, Rule::identifier, span)?);

        Ok(GenericDefinition {
            name,
            types,
            vector_sizes,
        })
    }
}
