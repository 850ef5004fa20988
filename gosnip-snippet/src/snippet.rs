//! The `Snippet` trait and the closed `Node` enum.
//!
//! Every Go construct the crate can emit is a concrete struct implementing
//! [`Snippet`]. [`Node`] wraps all of them so heterogeneous children (call
//! arguments, statement lists, declaration specs) can be stored together.

use crate::{
    Assign, Body, BuiltIn, Call, Clause, Comments, CompositeLit, Expr, Field, For, GenDecl,
    Ident, If, KeyValue, Lit, Paren, Range, Return, Select, Selector, Star, Switch, Type,
    TypeAssert, Unary,
};

/// Trait for values that render themselves to Go source text.
///
/// Rendering is pure: the output depends only on the node and its children.
pub trait Snippet {
    /// Append this node's source text to `out`.
    fn write_to(&self, out: &mut String);

    /// Render this node to a new string.
    fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }
}

/// Blanket implementation for references.
impl<T: Snippet + ?Sized> Snippet for &T {
    fn write_to(&self, out: &mut String) {
        (*self).write_to(out)
    }
}

/// Blanket implementation for Box.
impl<T: Snippet + ?Sized> Snippet for Box<T> {
    fn write_to(&self, out: &mut String) {
        self.as_ref().write_to(out)
    }
}

/// Marker for nodes that may be the operand of `&` or the target of an
/// assignment.
pub trait CanAddr: Into<Node> {}

/// Marker for nodes that may appear as a spec of a `const`, `var` or `type`
/// declaration.
pub trait DeclSpec: Into<Node> {}

/// Any Go syntax node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Ident(Ident),
    Lit(Lit),
    BuiltIn(BuiltIn),
    Comments(Comments),
    Expr(Expr),
    CompositeLit(CompositeLit),
    KeyValue(KeyValue),
    Selector(Selector),
    Star(Star),
    Unary(Unary),
    Paren(Paren),
    Call(Call),
    TypeAssert(TypeAssert),
    Body(Body),
    Select(Select),
    Switch(Switch),
    Clause(Clause),
    Range(Range),
    For(For),
    If(If),
    Assign(Assign),
    Return(Return),
    Decl(GenDecl),
    Field(Field),
    Type(Type),
}

impl Snippet for Node {
    fn write_to(&self, out: &mut String) {
        match self {
            Node::Ident(n) => n.write_to(out),
            Node::Lit(n) => n.write_to(out),
            Node::BuiltIn(n) => n.write_to(out),
            Node::Comments(n) => n.write_to(out),
            Node::Expr(n) => n.write_to(out),
            Node::CompositeLit(n) => n.write_to(out),
            Node::KeyValue(n) => n.write_to(out),
            Node::Selector(n) => n.write_to(out),
            Node::Star(n) => n.write_to(out),
            Node::Unary(n) => n.write_to(out),
            Node::Paren(n) => n.write_to(out),
            Node::Call(n) => n.write_to(out),
            Node::TypeAssert(n) => n.write_to(out),
            Node::Body(n) => n.write_to(out),
            Node::Select(n) => n.write_to(out),
            Node::Switch(n) => n.write_to(out),
            Node::Clause(n) => n.write_to(out),
            Node::Range(n) => n.write_to(out),
            Node::For(n) => n.write_to(out),
            Node::If(n) => n.write_to(out),
            Node::Assign(n) => n.write_to(out),
            Node::Return(n) => n.write_to(out),
            Node::Decl(n) => n.write_to(out),
            Node::Field(n) => n.write_to(out),
            Node::Type(n) => n.write_to(out),
        }
    }
}

macro_rules! impl_into_node {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Node {
                fn from(value: $ty) -> Self {
                    Node::$variant(value)
                }
            }
        )*
    };
}

impl_into_node! {
    Ident => Ident,
    Lit => Lit,
    BuiltIn => BuiltIn,
    Comments => Comments,
    Expr => Expr,
    CompositeLit => CompositeLit,
    KeyValue => KeyValue,
    Selector => Selector,
    Star => Star,
    Unary => Unary,
    Paren => Paren,
    Call => Call,
    TypeAssert => TypeAssert,
    Body => Body,
    Select => Select,
    Switch => Switch,
    Clause => Clause,
    Range => Range,
    For => For,
    If => If,
    Assign => Assign,
    Return => Return,
    GenDecl => Decl,
    Field => Field,
    Type => Type,
}

/// Write `items` separated by `sep`.
pub(crate) fn write_joined<T: Snippet>(out: &mut String, items: &[T], sep: &str) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        item.write_to(out);
    }
}
