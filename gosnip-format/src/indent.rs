//! Indentation style for formatted output.

use serde::Deserialize;

/// One level of indentation.
///
/// Deserializes from `"tab"` or a number of spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "RawIndent")]
pub enum Indent {
    /// Tab character, as gofmt does.
    #[default]
    Tab,
    /// Spaces with the specified width.
    Spaces(u8),
}

impl Indent {
    /// Append `level` indentation units to `out`.
    pub fn write(&self, out: &mut String, level: usize) {
        for _ in 0..level {
            match self {
                Self::Tab => out.push('\t'),
                Self::Spaces(width) => {
                    out.extend(std::iter::repeat_n(' ', usize::from(*width)));
                }
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawIndent {
    Name(String),
    Width(u8),
}

impl TryFrom<RawIndent> for Indent {
    type Error = String;

    fn try_from(raw: RawIndent) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawIndent::Name(name) if name.eq_ignore_ascii_case("tab") => Ok(Indent::Tab),
            RawIndent::Name(name) => Err(format!(
                "unknown indent `{name}`, expected \"tab\" or a number of spaces"
            )),
            RawIndent::Width(0) => Err("indent width must be positive".to_string()),
            RawIndent::Width(width) => Ok(Indent::Spaces(width)),
        }
    }
}
