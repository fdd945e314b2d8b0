//! Identifier derivation for generated items.
//!
//! Wire names are camelCase (`listVirtualMachines`) or all lowercase
//! (`serviceofferingid`). Generated code needs PascalCase type names,
//! snake_case methods and modules, and field identifiers that are legal
//! Rust even when the wire name is a keyword.

/// Splits a camelCase or PascalCase string into words.
///
/// Handles the patterns found in command names:
/// - "listVirtualMachines" -> ["list", "Virtual", "Machines"]
/// - "getVMPassword" -> ["get", "VM", "Password"]
/// - "listVPCs" -> ["list", "VPCs"]
/// - "createSSHKeyPair" -> ["create", "SSH", "Key", "Pair"]
/// - "listIpv6FirewallRules" -> ["list", "Ipv6", "Firewall", "Rules"]
pub fn split_camel_case(s: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut word_start = 0;
    let chars: Vec<char> = s.chars().collect();

    for i in 1..chars.len() {
        let current = chars[i];
        let prev = chars[i - 1];

        // A lone trailing "s" after an acronym pluralizes it: "VPCs", "VMsFor".
        let plural_acronym = chars.get(i + 1) == Some(&'s')
            && chars.get(i + 2).is_none_or(|c| c.is_uppercase());

        let is_new_word = current.is_uppercase()
            && (prev.is_lowercase()
                || prev.is_ascii_digit()
                || (i + 1 < chars.len()
                    && chars[i + 1].is_lowercase()
                    && prev.is_uppercase()
                    && !plural_acronym));

        if is_new_word {
            if i > word_start {
                words.push(&s[word_start..i]);
            }
            word_start = i;
        }
    }

    if word_start < s.len() {
        words.push(&s[word_start..]);
    }

    words
}

/// Uppercases the first character, leaving the rest untouched.
///
/// Used for type names derived from command names, so acronyms survive:
/// `getVMPassword` becomes `GetVMPassword`.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Capitalizes a wire name into a type name, dropping characters a type
/// name cannot hold.
pub fn type_name(s: &str) -> String {
    let mut out: String = capitalize(s)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, 'T');
    }
    out
}

/// Converts a camelCase, PascalCase or acronym-laden name to snake_case.
pub fn to_snake_case(s: &str) -> String {
    split_camel_case(s)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Converts any name to PascalCase with acronyms folded: "APIDiscovery"
/// becomes "ApiDiscovery", "SSH" becomes "Ssh".
pub fn to_pascal_case(s: &str) -> String {
    to_snake_case(s)
        .split('_')
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect()
}

/// Derives the singular of a plural entity name.
///
/// `ies` becomes `y`, `sses` becomes `ss`, otherwise one trailing `s` is
/// dropped. Names without a trailing `s` are returned unchanged.
pub fn singular(s: &str) -> String {
    if let Some(stem) = s.strip_suffix("ies") {
        format!("{stem}y")
    } else if let Some(stem) = s.strip_suffix("sses") {
        format!("{stem}ss")
    } else if let Some(stem) = s.strip_suffix('s') {
        stem.to_string()
    } else {
        s.to_string()
    }
}

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final", "macro",
    "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Returns `true` if `s` is reserved in Rust 2024.
pub fn is_keyword(s: &str) -> bool {
    KEYWORDS.contains(&s)
}

/// Converts a wire name into a snake_case word that is a legal identifier
/// fragment: invalid characters become `_`, a leading digit gets a `_`
/// prefix. Keywords are not handled here; see [`field_ident`].
pub fn ident_fragment(wire: &str) -> String {
    let snake = to_snake_case(wire);
    let mut out: String = snake
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Converts a wire name into a struct field or argument identifier.
///
/// Keywords get a trailing underscore (`type` -> `type_`).
pub fn field_ident(wire: &str) -> String {
    let fragment = ident_fragment(wire);
    if is_keyword(&fragment) {
        format!("{fragment}_")
    } else {
        fragment
    }
}
