//! `const`, `var` and `type` declarations and fields.

use std::collections::BTreeMap;

use gosnip_core::Result;

use crate::{CanAddr, Comments, DeclSpec, Ident, Node, Snippet, Type, quote_string};

/// Keyword of a general declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclToken {
    Const,
    Var,
    Type,
}

impl DeclToken {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclToken::Const => "const",
            DeclToken::Var => "var",
            DeclToken::Type => "type",
        }
    }
}

/// A general declaration. Several specs are grouped in parentheses:
///
/// ```
/// use gosnip_snippet::{Assign, BuiltIn, BuiltinType, Field, GenDecl, Ident, Snippet};
///
/// let decl = GenDecl::consts()
///     .spec(Assign::assign(Field::var(BuiltinType::Int, ["a"]).unwrap()).value(BuiltIn::Iota))
///     .spec(Assign::assign(Ident::new("b").unwrap()));
/// assert_eq!(decl.render(), "const (\na int = iota\nb\n)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GenDecl {
    token: DeclToken,
    specs: Vec<Node>,
}

impl GenDecl {
    pub fn new(token: DeclToken) -> Self {
        Self {
            token,
            specs: Vec::new(),
        }
    }

    pub fn consts() -> Self {
        Self::new(DeclToken::Const)
    }

    pub fn vars() -> Self {
        Self::new(DeclToken::Var)
    }

    pub fn types() -> Self {
        Self::new(DeclToken::Type)
    }

    pub fn spec(mut self, spec: impl DeclSpec) -> Self {
        self.specs.push(spec.into());
        self
    }
}

impl Snippet for GenDecl {
    fn write_to(&self, out: &mut String) {
        out.push_str(self.token.as_str());
        out.push(' ');

        let grouped = self.specs.len() > 1;
        if grouped {
            out.push_str("(\n");
        }
        for (i, spec) in self.specs.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            spec.write_to(out);
        }
        if grouped {
            out.push_str("\n)");
        }
    }
}

/// A name list with a type: a struct field, a parameter, a `var` or `type`
/// spec.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    comments: Comments,
    names: Vec<Ident>,
    ty: Type,
    tag: Option<String>,
    alias: bool,
}

impl Field {
    /// An unnamed field: an embedded struct field or a bare result type.
    pub fn new(ty: impl Into<Type>) -> Self {
        Self {
            comments: Comments::default(),
            names: Vec::new(),
            ty: ty.into(),
            tag: None,
            alias: false,
        }
    }

    /// A field with one or more names sharing a type.
    pub fn var<I, S>(ty: impl Into<Type>, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut field = Self::new(ty);
        field.names = Ident::many(names)?;
        Ok(field)
    }

    pub fn name(mut self, name: Ident) -> Self {
        self.names.push(name);
        self
    }

    /// Render `names = type`, as in a type alias declaration.
    pub fn as_alias(mut self) -> Self {
        self.alias = true;
        self
    }

    pub fn comments<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.comments = Comments::new(lines);
        self
    }

    /// Set the raw struct tag, without backquotes.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        self.tag = (!tag.is_empty()).then_some(tag);
        self
    }

    /// Build the struct tag from `key -> values`. Keys are sorted, empty
    /// values are dropped, and the rest are joined with commas.
    pub fn tags<I, K, V, S>(self, tags: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sorted: BTreeMap<String, Vec<String>> = tags
            .into_iter()
            .map(|(key, values)| {
                let values = values
                    .into_iter()
                    .filter(|v| !v.as_ref().is_empty())
                    .map(|v| v.as_ref().to_string())
                    .collect();
                (key.into(), values)
            })
            .collect();

        let tag = sorted
            .iter()
            .map(|(key, values)| format!("{key}:{}", quote_string(&values.join(","))))
            .collect::<Vec<_>>()
            .join(" ");
        self.tag(tag)
    }

    pub fn without_tag(mut self) -> Self {
        self.tag = None;
        self
    }

    pub fn names(&self) -> &[Ident] {
        &self.names
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn tag_str(&self) -> Option<&str> {
        self.tag.as_deref()
    }
}

impl Snippet for Field {
    fn write_to(&self, out: &mut String) {
        self.comments.write_to(out);

        for (i, name) in self.names.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            name.write_to(out);
        }

        if !self.names.is_empty() {
            out.push_str(if self.alias { " = " } else { " " });
        }

        self.ty.write_to(out);

        if let Some(tag) = &self.tag {
            out.push_str(" `");
            out.push_str(tag);
            out.push('`');
        }
    }
}

impl CanAddr for Field {}

impl DeclSpec for Field {}
