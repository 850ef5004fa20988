//! Typed building blocks for Go source code.
//!
//! Every node implements [`Snippet`] and renders to unformatted Go text.
//! Constructors validate identifiers up front, so an assembled tree always
//! renders. Host values are lowered to Go literals through [`Reflect`] and
//! the [`Serializer`].
//!
//! # Module Organization
//!
//! - [`Ident`], [`Lit`], [`Expr`] - names, literals and raw expressions
//! - [`Call`], [`Selector`], [`Star`], [`Unary`] - expressions
//! - [`Type`], [`StructType`], [`InterfaceType`], [`FuncType`] - type expressions
//! - [`GenDecl`], [`Field`] - declarations
//! - [`If`], [`For`], [`Range`], [`Switch`], [`Select`], [`Assign`], [`Return`] - statements
//! - [`Value`], [`TypeDesc`], [`Reflect`] - host values to serialize

mod basic;
mod decl;
mod expr;
mod ident;
mod serialize;
mod snippet;
mod stmt;
mod types;
mod value;

pub use basic::{Body, BuiltIn, Comments, CompositeLit, Expr, Lit, quote_rune, quote_string};
pub use decl::{DeclToken, Field, GenDecl};
pub use expr::{Call, CallModifier, KeyValue, Paren, Selector, Star, TypeAssert, Unary};
pub use ident::{Ident, is_valid_ident};
pub use serialize::{
    ImportAliaser, Serializer, SnakeCaseAliaser, format_float32, format_float64, type_of, val,
};
pub use snippet::{CanAddr, DeclSpec, Node, Snippet};
pub use stmt::{
    Assign, AssignToken, Clause, For, If, Range, Return, Select, Switch,
};
pub use types::{
    BuiltinType, FuncType, InterfaceMethod, InterfaceType, Method, StructType, Type,
};
pub use value::{
    FieldDesc, FieldValue, IntKind, Reflect, StructValue, TypeDesc, UintKind, Value,
};
