//! Generator configuration

/// Options controlling the rendered output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Programming model family, e.g. `OpenCL` or `SPIRV`
    pub family: String,
    /// Emit index and group comments in the tables
    pub emit_comments: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            family: "ProgModel".to_string(),
            emit_comments: true,
        }
    }
}

impl GeneratorConfig {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            ..Self::default()
        }
    }

    pub fn with_comments(mut self, emit_comments: bool) -> Self {
        self.emit_comments = emit_comments;
        self
    }

    /// Name of the generated module, e.g. `prog_model_builtins`
    pub fn module_name(&self) -> String {
        format!("{}_builtins", snake_case(&self.family))
    }
}

/// `OpenCL` -> `open_cl`, `ProgModel` -> `prog_model`, `SPIRV` -> `spirv`
pub(crate) fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut result = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !result.ends_with('_') && !result.is_empty() {
                result.push('_');
            }
            continue;
        }
        if c.is_ascii_uppercase() && i > 0 {
            let previous = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            // Break on a lower-to-upper step, and before the last capital of
            // an acronym followed by lowercase ("CLBuiltin" -> "cl_builtin").
            if (previous.is_ascii_lowercase() || previous.is_ascii_digit())
                || (previous.is_ascii_uppercase() && next_is_lower)
            {
                if !result.ends_with('_') {
                    result.push('_');
                }
            }
        }
        result.push(c.to_ascii_lowercase());
    }

    result.trim_end_matches('_').to_string()
}

/// `opencl_global` -> `OpenclGlobal`
pub(crate) fn camel_case(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Replace characters that cannot appear in a Rust identifier.
///
/// Keywords and a lone `_` get a trailing underscore.
pub(crate) fn sanitize_identifier(name: &str) -> String {
    let mut result: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if result.chars().next().is_none_or(|c| c.is_ascii_digit()) {
        result.insert(0, '_');
    }
    if result == "_" || RUST_KEYWORDS.contains(&result.as_str()) {
        result.push('_');
    }
    result
}
