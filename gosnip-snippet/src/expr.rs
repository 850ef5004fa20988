//! Expression nodes.

use gosnip_core::Result;

use crate::{CanAddr, Ident, Node, Snippet, Type, snippet::write_joined};

/// `key: value`
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValue {
    key: Box<Node>,
    value: Box<Node>,
}

impl KeyValue {
    pub fn new(key: impl Into<Node>, value: impl Into<Node>) -> Self {
        Self {
            key: Box::new(key.into()),
            value: Box::new(value.into()),
        }
    }

    pub fn key(&self) -> &Node {
        &self.key
    }

    pub fn value(&self) -> &Node {
        &self.value
    }
}

impl Snippet for KeyValue {
    fn write_to(&self, out: &mut String) {
        self.key.write_to(out);
        out.push_str(": ");
        self.value.write_to(out);
    }
}

/// A selector chain, `x.a.b()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    x: Box<Node>,
    selectors: Vec<Node>,
}

impl Selector {
    pub fn new(x: impl Into<Node>) -> Self {
        Self {
            x: Box::new(x.into()),
            selectors: Vec::new(),
        }
    }

    pub fn sel(mut self, selector: impl Into<Node>) -> Self {
        self.selectors.push(selector.into());
        self
    }
}

impl Snippet for Selector {
    fn write_to(&self, out: &mut String) {
        self.x.write_to(out);
        for selector in &self.selectors {
            out.push('.');
            selector.write_to(out);
        }
    }
}

impl CanAddr for Selector {}

/// Pointer indirection, `*x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Star(Box<Node>);

impl Star {
    pub fn new(x: impl Into<Node>) -> Self {
        Self(Box::new(x.into()))
    }
}

impl Snippet for Star {
    fn write_to(&self, out: &mut String) {
        out.push('*');
        self.0.write_to(out);
    }
}

impl CanAddr for Star {}

/// Address-of, `&x`. The operand must be addressable.
#[derive(Debug, Clone, PartialEq)]
pub struct Unary(Box<Node>);

impl Unary {
    pub fn new(x: impl CanAddr) -> Self {
        Self(Box::new(x.into()))
    }
}

impl Snippet for Unary {
    fn write_to(&self, out: &mut String) {
        out.push('&');
        self.0.write_to(out);
    }
}

/// `(x)`
#[derive(Debug, Clone, PartialEq)]
pub struct Paren(Box<Node>);

impl Paren {
    pub fn new(x: impl Into<Node>) -> Self {
        Self(Box::new(x.into()))
    }
}

impl Snippet for Paren {
    fn write_to(&self, out: &mut String) {
        out.push('(');
        self.0.write_to(out);
        out.push(')');
    }
}

impl CanAddr for Paren {}

/// Keyword placed before a call statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallModifier {
    Defer,
    Go,
}

impl CallModifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallModifier::Defer => "defer",
            CallModifier::Go => "go",
        }
    }
}

/// A call expression, `[defer |go ]f(a, b[...])`.
///
/// Builders take `self` by value, so a configured call can be cloned and
/// reused as a template:
///
/// ```
/// use gosnip_snippet::{Call, Ident, Snippet};
///
/// let base = Call::new("fn").unwrap().arg(Ident::new("a").unwrap());
/// assert_eq!(base.clone().as_defer().render(), "defer fn(a)");
/// assert_eq!(base.as_go().render(), "go fn(a)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    func: Box<Node>,
    args: Vec<Node>,
    ellipsis: bool,
    modifier: Option<CallModifier>,
}

impl Call {
    /// Call a function by name. Predeclared functions such as `make` and
    /// `len` are accepted as is; any other name must be a valid identifier.
    pub fn new(name: &str) -> Result<Self> {
        let func = match Ident::builtin_func(name) {
            Some(builtin) => builtin,
            None => Ident::new(name)?,
        };
        Ok(Self::with(func))
    }

    /// Call an arbitrary expression, such as a function literal.
    pub fn with(func: impl Into<Node>) -> Self {
        Self {
            func: Box::new(func.into()),
            args: Vec::new(),
            ellipsis: false,
            modifier: None,
        }
    }

    /// A type conversion, `T(x)`.
    pub fn convert(ty: impl Into<Type>, x: impl Into<Node>) -> Self {
        Self::with(ty.into()).arg(x)
    }

    pub fn arg(mut self, arg: impl Into<Node>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, N>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn as_defer(mut self) -> Self {
        self.modifier = Some(CallModifier::Defer);
        self
    }

    pub fn as_go(mut self) -> Self {
        self.modifier = Some(CallModifier::Go);
        self
    }

    /// Spread the last argument, `f(a, rest...)`.
    pub fn with_ellipsis(mut self) -> Self {
        self.ellipsis = true;
        self
    }
}

impl Snippet for Call {
    fn write_to(&self, out: &mut String) {
        if let Some(modifier) = self.modifier {
            out.push_str(modifier.as_str());
            out.push(' ');
        }
        self.func.write_to(out);
        out.push('(');
        write_joined(out, &self.args, ", ");
        if self.ellipsis {
            out.push_str("...");
        }
        out.push(')');
    }
}

/// `x.(T)`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAssert {
    x: Box<Node>,
    ty: Type,
}

impl TypeAssert {
    pub fn new(ty: impl Into<Type>, x: impl Into<Node>) -> Self {
        Self {
            x: Box::new(x.into()),
            ty: ty.into(),
        }
    }
}

impl Snippet for TypeAssert {
    fn write_to(&self, out: &mut String) {
        self.x.write_to(out);
        out.push_str(".(");
        self.ty.write_to(out);
        out.push(')');
    }
}
