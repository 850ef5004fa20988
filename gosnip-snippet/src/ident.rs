//! Validated Go identifiers.

use std::fmt;

use gosnip_core::{Error, GO_NAMING, Result, is_decimal_digit, is_letter};

use crate::{CanAddr, InterfaceMethod, Method, Snippet};

/// A validated Go identifier, optionally qualified as `pkg.Name`.
///
/// Construction fails when the name (or, for a two-part dotted name, either
/// part) is empty, reserved, or contains anything other than letters, digits
/// and underscores. Only the first two parts of a longer dotted name are
/// checked, and only the first when there are more than two.
///
/// ```
/// use gosnip_snippet::{Ident, Snippet};
///
/// assert_eq!(Ident::new("fmt.Println").unwrap().render(), "fmt.Println");
/// assert!(Ident::new("type").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident(String);

impl Ident {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let parts: Vec<&str> = name.split('.').collect();

        check_segment(parts[0])?;
        if parts.len() == 2 {
            check_segment(parts[1])?;
        }

        Ok(Self(name))
    }

    /// Validate every name in `names`.
    pub fn many<I, S>(names: I) -> Result<Vec<Self>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().map(Self::new).collect()
    }

    /// Wrap a predeclared function name, which is reserved and would
    /// otherwise fail validation.
    pub(crate) fn builtin_func(name: &str) -> Option<Self> {
        GO_NAMING
            .is_builtin_func(name)
            .then(|| Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn upper_camel_case(&self) -> Result<Self> {
        Self::new(GO_NAMING.upper_camel_case(&self.0))
    }

    pub fn lower_camel_case(&self) -> Result<Self> {
        Self::new(GO_NAMING.lower_camel_case(&self.0))
    }

    pub fn upper_snake_case(&self) -> Result<Self> {
        Self::new(GO_NAMING.upper_snake_case(&self.0))
    }

    pub fn lower_snake_case(&self) -> Result<Self> {
        Self::new(GO_NAMING.lower_snake_case(&self.0))
    }
}

/// Check whether `s` can be used as a single identifier segment.
pub fn is_valid_ident(s: &str) -> bool {
    segment_error(s).is_none()
}

fn check_segment(s: &str) -> Result<()> {
    match segment_error(s) {
        Some(reason) => Err(Error::invalid_identifier(s, reason)),
        None => Ok(()),
    }
}

fn segment_error(s: &str) -> Option<String> {
    if s.is_empty() {
        return Some("identifier is empty".to_string());
    }
    if GO_NAMING.is_reserved(s) {
        return Some(format!("`{s}` is a reserved word"));
    }
    s.chars()
        .find(|&c| !(is_letter(c) || is_decimal_digit(c) || c == '_'))
        .map(|c| format!("`{c}` is not allowed in identifiers"))
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Ident {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Snippet for Ident {
    fn write_to(&self, out: &mut String) {
        out.push_str(&self.0);
    }
}

impl CanAddr for Ident {}

impl InterfaceMethod for Ident {
    fn into_method(self) -> Method {
        Method::Embedded(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_ident_renders_back() {
        for name in ["Test", "_", "a1", "Böse", "fmt.Println", "i_am_an_id"] {
            assert_eq!(Ident::new(name).unwrap().render(), name);
        }
    }

    #[test]
    fn test_invalid_idents() {
        for name in ["$adsf", "1-21asd", "", "type", "time.%Time", "string", "len", "a."] {
            let err = Ident::new(name).unwrap_err();
            assert!(
                matches!(*err, Error::InvalidIdentifier { .. }),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_numeric_symbols_are_rejected() {
        for name in ["x²", "xⅧ", "half½", "pkg.x²"] {
            let err = Ident::new(name).unwrap_err();
            assert!(matches!(*err, Error::InvalidIdentifier { .. }), "{name}");
        }
        assert_eq!(Ident::new("x٣").unwrap().render(), "x٣");
    }

    #[test]
    fn test_reserved_tables_are_rejected() {
        for name in GO_NAMING.keywords.iter().chain(GO_NAMING.builtin_types) {
            assert!(Ident::new(*name).is_err(), "{name}");
        }
    }

    #[test]
    fn test_only_two_dotted_segments_checked() {
        assert!(Ident::new("a.b.type").is_ok());
        assert!(Ident::new("type.b.c").is_err());
        assert!(Ident::new("a.type").is_err());
    }

    #[test]
    fn test_case_conversions() {
        let id = Ident::new("i_am_an_id").unwrap();

        assert_eq!(id.lower_snake_case().unwrap().as_str(), "i_am_an_id");
        assert_eq!(id.upper_snake_case().unwrap().as_str(), "I_AM_AN_ID");
        assert_eq!(id.lower_camel_case().unwrap().as_str(), "iAmAnID");
        assert_eq!(id.upper_camel_case().unwrap().as_str(), "IAmAnID");
    }

    #[test]
    fn test_builtin_func_bypass() {
        assert!(Ident::builtin_func("make").is_some());
        assert!(Ident::builtin_func("fmt").is_none());
    }
}
