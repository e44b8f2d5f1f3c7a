//! Unit tests for the declaration parser and resolver

mod test_parse_errors;
mod test_resolution;
mod test_type_definitions;
