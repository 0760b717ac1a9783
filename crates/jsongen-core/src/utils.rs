/// Rust keywords that cannot be used as plain identifiers.
const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "try",
    "type", "unsafe", "use", "where", "while", "yield", "abstract", "become", "box", "do", "final",
    "macro", "override", "priv", "typeof", "unsized", "virtual",
];

/// Keywords that cannot be raw identifiers either.
const NOT_RAW: &[&str] = &["crate", "self", "Self", "super"];

pub fn is_keyword(s: &str) -> bool {
    KEYWORDS.contains(&s)
}

/// Spell a field name as a Rust identifier, escaping keywords as raw
/// identifiers (`type` becomes `r#type`).
///
/// Tuple indices pass through unchanged.
///
/// # Examples
/// ```
/// use jsongen_core::utils::rust_ident;
/// assert_eq!(rust_ident("name"), "name");
/// assert_eq!(rust_ident("type"), "r#type");
/// assert_eq!(rust_ident("0"), "0");
/// ```
pub fn rust_ident(s: &str) -> String {
    if is_keyword(s) && !NOT_RAW.contains(&s) {
        format!("r#{s}")
    } else {
        s.to_string()
    }
}

/// Whether a name written in a directive can be a Rust path.
pub fn is_path(s: &str) -> bool {
    !s.is_empty()
        && s.split("::").all(|seg| {
            let mut chars = seg.chars();
            chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

/// Convert a PascalCase type name to snake_case; path separators become `_`.
///
/// # Examples
/// ```
/// use jsongen_core::utils::to_snake_case;
/// assert_eq!(to_snake_case("HttpRequest"), "http_request");
/// assert_eq!(to_snake_case("geo::Point"), "geo_point");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for c in s.chars() {
        if c.is_ascii_uppercase() {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else if c.is_ascii_alphanumeric() {
            result.push(c);
        } else if !result.is_empty() && !result.ends_with('_') {
            result.push('_');
        }
    }
    result
}
