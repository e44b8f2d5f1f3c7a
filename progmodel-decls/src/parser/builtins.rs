// Builtin overload parsing
// Handles names, parameter lists, variadic markers and attribute lists

use super::{DeclParser, Rule};
use crate::ast::*;
use crate::error::*;
use pest::iterators::Pair;

impl DeclParser {
    /// Parse `builtin <names>(<params>) -> <return> [<attributes>];`
    pub(super) fn parse_builtin(pair: Pair<Rule>) -> ParseResult<BuiltinDeclaration> {
        let span = Self::span_from_pair(&pair);

        let mut names = Vec::new();
        let mut parameters = Vec::new();
        let mut is_variadic = false;
        let mut return_type = None;
        let mut attributes = Vec::new();

        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::keyword_builtin => {}
                Rule::builtin_names => {
                    names = inner.into_inner().map(Self::parse_identifier).collect();
                }
                Rule::parameter_list => {
                    for parameter in inner.into_inner() {
                        match parameter.as_rule() {
                            Rule::variadic_marker => is_variadic = true,
                            _ => parameters.push(Self::parse_identifier(parameter)),
                        }
                    }
                }
                Rule::identifier => {
                    return_type = Some(Self::parse_identifier(inner));
                }
                Rule::attribute_list => {
                    for attribute in inner.into_inner() {
                        attributes.push(Self::parse_attribute(attribute)?);
                    }
                }
                other => {
                    return Err(ParseError::unexpected_rule(
                        Rule::attribute_list,
                        Some(other),
                        Self::span_from_pair(&inner),
                    ))
                }
            }
        }

        let return_type = return_type.ok_or_else(|| {
            ParseError::unexpected_rule(Rule::identifier, None, Span::new(span.end, span.end))
        })?;

        Ok(BuiltinDeclaration {
            names,
            parameters,
            return_type,
            is_variadic,
            attributes,
        })
    }

    fn parse_attribute(pair: Pair<Rule>) -> ParseResult<BuiltinAttribute> {
        let span = Self::span_from_pair(&pair);

        match pair.as_rule() {
            Rule::attribute_pure => Ok(BuiltinAttribute::Pure(span)),
            Rule::attribute_const => Ok(BuiltinAttribute::Const(span)),
            Rule::attribute_convergent => Ok(BuiltinAttribute::Convergent(span)),
            Rule::attribute_extension => {
                let mut inner = pair.into_inner();
                let name = Self::next_pair(&mut inner, Rule::identifier, span)?;
                Ok(BuiltinAttribute::Extension(Self::parse_identifier(name)))
            }
            Rule::attribute_min_version => {
                let mut inner = pair.into_inner();
                let name = Self::next_pair(&mut inner, Rule::identifier, span)?;
                Ok(BuiltinAttribute::MinVersion(Self::parse_identifier(name)))
            }
            Rule::attribute_max_version => {
                let mut inner = pair.into_inner();
                let name = Self::next_pair(&mut inner, Rule::identifier, span)?;
                Ok(BuiltinAttribute::MaxVersion(Self::parse_identifier(name)))
            }
            other => Err(ParseError::unexpected_rule(
                Rule::attribute_list,
                Some(other),
                span,
            )),
        }
    }
}
