//! Word segmentation and case conversion for Go identifiers.
//!
//! Words are found by Unicode character class: lowercase, uppercase, digit,
//! space, or anything else. An uppercase run that is directly followed by a
//! lowercase run donates its last letter to it, so `PDFLoader` splits into
//! `PDF` and `Loader`. Digit runs stick to the word before them.

/// Go naming tables.
///
/// Bundles the fixed tables the identifier rules consult. The tables are
/// `'static` data, so a convention is built once as a `const` and handed to
/// whichever component needs it.
#[derive(Debug, Clone, Copy)]
pub struct GoNaming {
    /// Words that render all-caps in camel case (e.g. "ID", "URL").
    pub initialisms: &'static [&'static str],
    /// Language keywords.
    pub keywords: &'static [&'static str],
    /// Predeclared type names.
    pub builtin_types: &'static [&'static str],
    /// Predeclared functions.
    pub builtin_funcs: &'static [&'static str],
}

impl GoNaming {
    /// Check if a word is a known initialism (compared upper-cased).
    pub fn is_initialism(&self, word: &str) -> bool {
        let upper = word.to_uppercase();
        self.initialisms.contains(&upper.as_str())
    }

    /// Check if a name is a language keyword.
    pub fn is_keyword(&self, name: &str) -> bool {
        self.keywords.contains(&name)
    }

    /// Check if a name is a predeclared type.
    pub fn is_builtin_type(&self, name: &str) -> bool {
        self.builtin_types.contains(&name)
    }

    /// Check if a name is a predeclared function.
    pub fn is_builtin_func(&self, name: &str) -> bool {
        self.builtin_funcs.contains(&name)
    }

    /// Check if a name cannot be used as an identifier.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.is_keyword(name) || self.is_builtin_type(name) || self.is_builtin_func(name)
    }

    /// `i_am_an_id` -> `I_AM_AN_ID`
    pub fn upper_snake_case(&self, s: &str) -> String {
        join_snake(split_to_words(s), str::to_uppercase)
    }

    /// `IAmAnID` -> `i_am_an_id`
    pub fn lower_snake_case(&self, s: &str) -> String {
        join_snake(split_to_words(s), str::to_lowercase)
    }

    /// `i_am_an_id` -> `IAmAnID`
    pub fn upper_camel_case(&self, s: &str) -> String {
        split_to_words(s)
            .iter()
            .map(|word| self.camel_word(word))
            .collect()
    }

    /// `i_am_an_id` -> `iAmAnID`
    pub fn lower_camel_case(&self, s: &str) -> String {
        split_to_words(s)
            .iter()
            .enumerate()
            .map(|(idx, word)| {
                if idx == 0 {
                    word.to_lowercase()
                } else {
                    self.camel_word(word)
                }
            })
            .collect()
    }

    fn camel_word(&self, word: &str) -> String {
        let upper = word.to_uppercase();
        if self.initialisms.contains(&upper.as_str()) {
            return upper;
        }
        upper_first(&word.to_lowercase())
    }
}

/// Go naming conventions.
pub const GO_NAMING: GoNaming = GoNaming {
    // https://github.com/golang/lint/blob/master/lint.go
    initialisms: &[
        "ACL", "API", "ASCII", "CPU", "CSS", "DNS", "EOF", "GUID", "HTML", "HTTP", "HTTPS", "ID",
        "IP", "JSON", "LHS", "QPS", "RAM", "RHS", "RPC", "SLA", "SMTP", "SQL", "SSH", "TCP", "TLS",
        "TTL", "UDP", "UI", "UID", "UUID", "URI", "URL", "UTF8", "VM", "XML", "XMPP", "XSRF",
        "XSS",
    ],
    keywords: &[
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
    ],
    builtin_types: &[
        "bool",
        "int",
        "int8",
        "int16",
        "int32",
        "int64",
        "uint",
        "uint8",
        "uint16",
        "uint32",
        "uint64",
        "uintptr",
        "float32",
        "float64",
        "complex64",
        "complex128",
        "string",
        "byte",
        "rune",
        "error",
    ],
    builtin_funcs: &[
        "append", "complex", "cap", "close", "copy", "delete", "imag", "len", "make", "new",
        "panic", "print", "println", "real", "recover",
    ],
};

/// Convert to `UPPER_SNAKE_CASE` with the default Go tables.
pub fn upper_snake_case(s: &str) -> String {
    GO_NAMING.upper_snake_case(s)
}

/// Convert to `lower_snake_case` with the default Go tables.
pub fn lower_snake_case(s: &str) -> String {
    GO_NAMING.lower_snake_case(s)
}

/// Convert to `UpperCamelCase` with the default Go tables.
pub fn upper_camel_case(s: &str) -> String {
    GO_NAMING.upper_camel_case(s)
}

/// Convert to `lowerCamelCase` with the default Go tables.
pub fn lower_camel_case(s: &str) -> String {
    GO_NAMING.lower_camel_case(s)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Space,
    Lower,
    Upper,
    Digit,
    Other,
}

impl CharClass {
    fn of(c: char) -> Self {
        if c.is_whitespace() {
            Self::Space
        } else if c.is_lowercase() {
            Self::Lower
        } else if c.is_uppercase() && is_letter(c) {
            Self::Upper
        } else if is_decimal_digit(c) {
            Self::Digit
        } else {
            Self::Other
        }
    }
}

/// First code point of each ten-digit decimal block outside ASCII.
const DECIMAL_DIGIT_ZEROS: &[u32] = &[
    0x0660, 0x06f0, 0x07c0, 0x0966, 0x09e6, 0x0a66, 0x0ae6, 0x0b66, 0x0be6, 0x0c66, 0x0ce6,
    0x0d66, 0x0de6, 0x0e50, 0x0ed0, 0x0f20, 0x1040, 0x1090, 0x17e0, 0x1810, 0x1946, 0x19d0,
    0x1a80, 0x1a90, 0x1b50, 0x1bb0, 0x1c40, 0x1c50, 0xa620, 0xa8d0, 0xa900, 0xa9d0, 0xa9f0,
    0xaa50, 0xabf0, 0xff10, 0x104a0, 0x10d30, 0x11066, 0x110f0, 0x11136, 0x111d0, 0x112f0,
    0x11450, 0x114d0, 0x11650, 0x116c0, 0x11730, 0x118e0, 0x11950, 0x11c50, 0x11d50, 0x11da0,
    0x11f50, 0x16a60, 0x16ac0, 0x16b50, 0x1e140, 0x1e2f0, 0x1e4f0, 0x1e950, 0x1fbf0,
];

/// Whether `c` is a decimal digit in any script.
///
/// Superscripts, fractions and letter-like numerals such as `²` or `Ⅷ` are
/// numeric but not decimal digits.
pub fn is_decimal_digit(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_digit();
    }
    let cp = u32::from(c);
    if (0x1d7ce..=0x1d7ff).contains(&cp) {
        return true;
    }
    DECIMAL_DIGIT_ZEROS
        .iter()
        .any(|&zero| (zero..zero + 10).contains(&cp))
}

/// Whether `c` is a letter. Letter numerals such as `Ⅷ` do not count.
pub fn is_letter(c: char) -> bool {
    c.is_alphabetic() && !c.is_numeric()
}

/// Split an identifier-ish string into words.
///
/// ```
/// use gosnip_core::split_to_words;
///
/// assert_eq!(split_to_words("PDFLoader"), ["PDF", "Loader"]);
/// assert_eq!(split_to_words("GL11Version"), ["GL11", "Version"]);
/// assert_eq!(split_to_words("snake_case"), ["snake", "case"]);
/// ```
pub fn split_to_words(s: &str) -> Vec<String> {
    let mut runs: Vec<Vec<char>> = Vec::new();
    let mut last_class = None;

    for c in s.chars() {
        let class = CharClass::of(c);
        match runs.last_mut() {
            Some(run) if last_class == Some(class) => run.push(c),
            _ => runs.push(vec![c]),
        }
        last_class = Some(class);
    }

    // "PDFL", "oader" -> "PDF", "Loader"
    for i in 0..runs.len().saturating_sub(1) {
        let class_of = |run: &[char]| run.first().map(|&c| CharClass::of(c));
        let upper_then_lower = class_of(&runs[i]) == Some(CharClass::Upper)
            && class_of(&runs[i + 1]) == Some(CharClass::Lower);
        if !upper_then_lower {
            continue;
        }
        if let Some(moved) = runs[i].pop() {
            runs[i + 1].insert(0, moved);
        }
    }

    let mut words: Vec<String> = Vec::new();
    for (i, run) in runs.iter().enumerate() {
        let Some(first) = run.first() else {
            continue;
        };
        let text: String = run.iter().collect();
        if is_decimal_digit(*first) {
            match words.last_mut() {
                Some(prev) if i > 0 => prev.push_str(&text),
                _ => words.push(text),
            }
        } else if is_letter(*first) {
            words.push(text);
        }
    }
    words
}

/// Split raw bytes into words.
///
/// Input that is not valid UTF-8 comes back untouched as a single word.
pub fn split_bytes_to_words(bytes: &[u8]) -> Vec<Vec<u8>> {
    match std::str::from_utf8(bytes) {
        Ok(s) => split_to_words(s).into_iter().map(String::into_bytes).collect(),
        Err(_) => vec![bytes.to_vec()],
    }
}

fn join_snake(words: Vec<String>, convert: fn(&str) -> String) -> String {
    let mut result = String::new();
    for (idx, word) in words.iter().enumerate() {
        let word = convert(word);
        let single_digit = word.len() == 1 && word.as_bytes()[0].is_ascii_digit();
        if idx > 0 && !single_digit {
            result.push('_');
        }
        result.push_str(&word);
    }
    result
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}
