//! Identifier derivation for generated code
//!
//! Everything here is pure and deterministic so that regenerating a unit
//! produces byte-identical output.

use cow_utils::CowUtils;

/// Go keywords, never usable as identifiers
pub const GO_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Go predeclared identifiers that generated bindings must not shadow
pub const GO_PREDECLARED: &[&str] = &[
    "any",
    "append",
    "bool",
    "byte",
    "cap",
    "clear",
    "close",
    "comparable",
    "complex",
    "copy",
    "delete",
    "error",
    "false",
    "imag",
    "int",
    "iota",
    "len",
    "make",
    "max",
    "min",
    "new",
    "nil",
    "panic",
    "print",
    "println",
    "real",
    "recover",
    "rune",
    "string",
    "true",
    "uint",
];

/// Locals declared by generated handler bodies and signatures
pub const GENERATED_LOCALS: &[&str] = &[
    "h",
    "ctx",
    "err",
    "data",
    "ok",
    "identifier",
    "innerErr",
    "repoErr",
];

/// Standard-library package qualifiers generated code refers to
pub const GENERATED_STDLIB_QUALIFIERS: &[&str] = &["context", "json", "reflect"];

pub fn is_reserved(ident: &str) -> bool {
    GO_KEYWORDS.contains(&ident) || GO_PREDECLARED.contains(&ident)
}

/// Lexically a Go identifier: ASCII letter or `_`, then letters, digits or `_`
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Whether generated code already uses `name` for a local or a package
pub fn is_generated_name(name: &str) -> bool {
    GENERATED_LOCALS.contains(&name) || GENERATED_STDLIB_QUALIFIERS.contains(&name)
}

/// Lower-cased upper-case letters of `name`, in order
///
/// `IncreaseBalance` becomes `ib`. A name without upper-case letters yields
/// an empty string.
pub fn short_form(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_uppercase)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// A local binding for a value of type `name` that avoids `taken` and Go
/// reserved words
///
/// Starts from [`short_form`]; collisions get a numeric suffix starting at 2.
pub fn binding_for(name: &str, taken: &[&str]) -> String {
    let mut base = short_form(name);
    if base.is_empty() {
        base = name
            .chars()
            .find(char::is_ascii_alphabetic)
            .map_or_else(|| "v".to_owned(), |c| c.to_ascii_lowercase().to_string());
    }

    let is_free = |candidate: &str| !is_reserved(candidate) && !taken.contains(&candidate);
    if is_free(&base) {
        return base;
    }
    let mut suffix = 2_usize;
    loop {
        let candidate = format!("{base}{suffix}");
        if is_free(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

/// Split a camel-case name into words, keeping acronyms together
///
/// `ArchiveHTTPAccount` splits into `Archive`, `HTTP`, `Account`.
fn split_words(name: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = name.char_indices().collect();
    let mut words = Vec::new();
    let mut start: Option<usize> = None;

    for (pos, &(idx, c)) in chars.iter().enumerate() {
        if c == '_' || c == '-' {
            if let Some(s) = start.take() {
                words.push(&name[s..idx]);
            }
            continue;
        }
        let Some(s) = start else {
            start = Some(idx);
            continue;
        };
        if c.is_ascii_uppercase() {
            let prev = chars[pos - 1].1;
            let next_is_lower = chars
                .get(pos + 1)
                .is_some_and(|&(_, n)| n.is_ascii_lowercase());
            let boundary = prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower);
            if boundary {
                words.push(&name[s..idx]);
                start = Some(idx);
            }
        }
    }
    if let Some(s) = start {
        words.push(&name[s..]);
    }
    words
}

/// File stem for a command: `IncreaseBalance` becomes `increase_balance`
pub fn snake_case(name: &str) -> String {
    split_words(name)
        .iter()
        .map(|word| word.cow_to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Topic derived from the last camel-case word: `ArchiveAccount` becomes `Account`
pub fn default_topic(name: &str) -> String {
    split_words(name)
        .last()
        .map_or_else(String::new, |word| (*word).to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_form() {
        assert_eq!(short_form("IncreaseBalance"), "ib");
        assert_eq!(short_form("MakeNewAccount"), "mna");
        assert_eq!(short_form("ArchiveAccount"), "aa");
        assert_eq!(short_form("Account"), "a");
    }

    #[test]
    fn test_short_form_tolerates_empty() {
        assert_eq!(short_form(""), "");
        assert_eq!(short_form("lowercase"), "");
    }

    #[test]
    fn test_short_form_is_idempotent() {
        let first = short_form("IncreaseBalanceFromSvc");
        let second = short_form("IncreaseBalanceFromSvc");
        assert_eq!(first, second);
        assert_eq!(first, "ibfs");
    }

    #[test]
    fn test_binding_avoids_keywords_and_taken() {
        // `IncreaseFunds` would shorten to the `if` keyword
        assert_eq!(binding_for("IncreaseFunds", &[]), "if2");
        assert_eq!(binding_for("Account", &["a"]), "a2");
        assert_eq!(binding_for("Account", &["a", "a2"]), "a3");
        assert_eq!(binding_for("Holder", &["h", "ctx"]), "h2");
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("Account"));
        assert!(is_identifier("_x9"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("9svc"));
        assert!(!is_identifier("New Error"));
        assert!(!is_identifier("com/acme/errors"));
    }

    #[test]
    fn test_generated_names() {
        for name in ["ctx", "err", "h", "context", "json", "reflect"] {
            assert!(is_generated_name(name), "{name}");
        }
        assert!(!is_generated_name("svc"));
    }

    #[test]
    fn test_binding_falls_back_when_short_form_is_empty() {
        assert_eq!(binding_for("account", &[]), "a");
        assert_eq!(binding_for("", &[]), "v");
        assert_eq!(binding_for("_", &[]), "v");
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(snake_case("IncreaseBalance"), "increase_balance");
        assert_eq!(snake_case("MakeNewAccountWithOutId"), "make_new_account_with_out_id");
        assert_eq!(snake_case("ArchiveHTTPAccount"), "archive_http_account");
        assert_eq!(snake_case("Block2Account"), "block2_account");
    }

    #[test]
    fn test_default_topic() {
        assert_eq!(default_topic("ArchiveAccount"), "Account");
        assert_eq!(default_topic("IncreaseBalance"), "Balance");
        assert_eq!(default_topic("ArchiveHTTP"), "HTTP");
        assert_eq!(default_topic("Archive"), "Archive");
        assert_eq!(default_topic(""), "");
    }
}
