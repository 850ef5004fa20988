//! Go type expressions.

use gosnip_core::Result;

use crate::{Body, Field, Ident, Node, Snippet, snippet::write_joined};

/// Predeclared Go types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
    Byte,
    Rune,
    Error,
}

impl BuiltinType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuiltinType::Bool => "bool",
            BuiltinType::Int => "int",
            BuiltinType::Int8 => "int8",
            BuiltinType::Int16 => "int16",
            BuiltinType::Int32 => "int32",
            BuiltinType::Int64 => "int64",
            BuiltinType::Uint => "uint",
            BuiltinType::Uint8 => "uint8",
            BuiltinType::Uint16 => "uint16",
            BuiltinType::Uint32 => "uint32",
            BuiltinType::Uint64 => "uint64",
            BuiltinType::Uintptr => "uintptr",
            BuiltinType::Float32 => "float32",
            BuiltinType::Float64 => "float64",
            BuiltinType::Complex64 => "complex64",
            BuiltinType::Complex128 => "complex128",
            BuiltinType::String => "string",
            BuiltinType::Byte => "byte",
            BuiltinType::Rune => "rune",
            BuiltinType::Error => "error",
        }
    }
}

impl Snippet for BuiltinType {
    fn write_to(&self, out: &mut String) {
        out.push_str(self.as_str());
    }
}

/// A Go type.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Builtin(BuiltinType),
    Named(Ident),
    Pointer(Box<Type>),
    Chan(Box<Type>),
    Slice(Box<Type>),
    Array(Box<Type>, usize),
    Map(Box<Type>, Box<Type>),
    Struct(StructType),
    Interface(InterfaceType),
    Func(Box<FuncType>),
    Ellipsis(Box<Type>),
}

impl Type {
    /// A named type, optionally package-qualified (`time.Time`).
    pub fn named(name: &str) -> Result<Self> {
        Ok(Type::Named(Ident::new(name)?))
    }

    pub fn pointer(elem: impl Into<Type>) -> Self {
        Type::Pointer(Box::new(elem.into()))
    }

    pub fn chan(elem: impl Into<Type>) -> Self {
        Type::Chan(Box::new(elem.into()))
    }

    pub fn slice(elem: impl Into<Type>) -> Self {
        Type::Slice(Box::new(elem.into()))
    }

    pub fn array(elem: impl Into<Type>, len: usize) -> Self {
        Type::Array(Box::new(elem.into()), len)
    }

    pub fn map(key: impl Into<Type>, value: impl Into<Type>) -> Self {
        Type::Map(Box::new(key.into()), Box::new(value.into()))
    }

    /// A variadic parameter type, `...T`.
    pub fn ellipsis(elem: impl Into<Type>) -> Self {
        Type::Ellipsis(Box::new(elem.into()))
    }

    /// The empty interface, `interface {}`.
    pub fn interface() -> Self {
        Type::Interface(InterfaceType::new())
    }

    pub fn is_empty_interface(&self) -> bool {
        matches!(self, Type::Interface(iface) if iface.methods.is_empty())
    }
}

impl Snippet for Type {
    fn write_to(&self, out: &mut String) {
        match self {
            Type::Builtin(builtin) => builtin.write_to(out),
            Type::Named(name) => name.write_to(out),
            Type::Pointer(elem) => {
                out.push('*');
                elem.write_to(out);
            }
            Type::Chan(elem) => {
                out.push_str("chan ");
                elem.write_to(out);
            }
            Type::Slice(elem) => {
                out.push_str("[]");
                elem.write_to(out);
            }
            Type::Array(elem, len) => {
                out.push('[');
                out.push_str(&len.to_string());
                out.push(']');
                elem.write_to(out);
            }
            Type::Map(key, value) => {
                out.push_str("map[");
                key.write_to(out);
                out.push(']');
                value.write_to(out);
            }
            Type::Struct(st) => st.write_to(out),
            Type::Interface(iface) => iface.write_to(out),
            Type::Func(func) => func.write_to(out),
            Type::Ellipsis(elem) => {
                out.push_str("...");
                elem.write_to(out);
            }
        }
    }
}

impl From<BuiltinType> for Type {
    fn from(value: BuiltinType) -> Self {
        Type::Builtin(value)
    }
}

impl From<Ident> for Type {
    fn from(value: Ident) -> Self {
        Type::Named(value)
    }
}

impl From<StructType> for Type {
    fn from(value: StructType) -> Self {
        Type::Struct(value)
    }
}

impl From<InterfaceType> for Type {
    fn from(value: InterfaceType) -> Self {
        Type::Interface(value)
    }
}

impl From<FuncType> for Type {
    fn from(value: FuncType) -> Self {
        Type::Func(Box::new(value))
    }
}

impl From<BuiltinType> for Node {
    fn from(value: BuiltinType) -> Self {
        Node::Type(value.into())
    }
}

impl From<StructType> for Node {
    fn from(value: StructType) -> Self {
        Node::Type(value.into())
    }
}

impl From<InterfaceType> for Node {
    fn from(value: InterfaceType) -> Self {
        Node::Type(value.into())
    }
}

impl From<FuncType> for Node {
    fn from(value: FuncType) -> Self {
        Node::Type(value.into())
    }
}

/// `struct {` with one field per line, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructType {
    fields: Vec<Field>,
}

impl StructType {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields(fields: impl IntoIterator<Item = Field>) -> Self {
        Self {
            fields: fields.into_iter().collect(),
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

impl Snippet for StructType {
    fn write_to(&self, out: &mut String) {
        out.push_str("struct {");
        for field in &self.fields {
            out.push('\n');
            field.write_to(out);
        }
        out.push_str("\n}");
    }
}

/// An entry of an interface type.
#[derive(Debug, Clone, PartialEq)]
pub enum Method {
    /// A method signature, rendered without the `func` keyword.
    Func(FuncType),
    /// An embedded interface.
    Embedded(Ident),
}

/// Marker for what may appear inside an interface type: method signatures
/// and embedded named types.
pub trait InterfaceMethod {
    fn into_method(self) -> Method;
}

/// `interface {` with one method per line, or `interface {}` when empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterfaceType {
    methods: Vec<Method>,
}

impl InterfaceType {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: impl InterfaceMethod) -> Self {
        self.methods.push(method.into_method());
        self
    }
}

impl Snippet for InterfaceType {
    fn write_to(&self, out: &mut String) {
        out.push_str("interface {");
        if !self.methods.is_empty() {
            out.push('\n');
        }
        for method in &self.methods {
            match method {
                Method::Func(func) => func.write_signature(out, false),
                Method::Embedded(name) => name.write_to(out),
            }
            out.push('\n');
        }
        out.push('}');
    }
}

/// A function signature, optionally named, with a receiver and a body.
///
/// Renders as `func [(recv) ][Name](params)[ (results)][ body]`. Parameters
/// and results never carry struct tags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FuncType {
    name: Option<Ident>,
    recv: Option<Field>,
    params: Vec<Field>,
    results: Vec<Field>,
    body: Option<Body>,
}

impl FuncType {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(mut self, name: Ident) -> Self {
        self.name = Some(name);
        self
    }

    /// Make this a method with the given receiver.
    pub fn method_of(mut self, recv: Field) -> Self {
        self.recv = Some(recv);
        self
    }

    pub fn param(mut self, param: Field) -> Self {
        self.params.push(param);
        self
    }

    pub fn params(mut self, params: impl IntoIterator<Item = Field>) -> Self {
        self.params.extend(params);
        self
    }

    pub fn result(mut self, result: Field) -> Self {
        self.results.push(result);
        self
    }

    pub fn results(mut self, results: impl IntoIterator<Item = Field>) -> Self {
        self.results.extend(results);
        self
    }

    pub fn body<I, N>(mut self, stmts: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.body = Some(Body::new(stmts));
        self
    }

    fn write_signature(&self, out: &mut String, with_func_token: bool) {
        if with_func_token {
            out.push_str("func ");
        }

        if let Some(recv) = &self.recv {
            out.push('(');
            recv.write_to(out);
            out.push_str(") ");
        }

        if let Some(name) = &self.name {
            name.write_to(out);
        }

        out.push('(');
        write_untagged(out, &self.params);
        out.push(')');

        if !self.results.is_empty() {
            out.push_str(" (");
            write_untagged(out, &self.results);
            out.push(')');
        }

        if let Some(body) = &self.body {
            out.push(' ');
            body.write_to(out);
        }
    }
}

fn write_untagged(out: &mut String, fields: &[Field]) {
    let untagged: Vec<Field> = fields.iter().cloned().map(Field::without_tag).collect();
    write_joined(out, &untagged, ", ");
}

impl Snippet for FuncType {
    fn write_to(&self, out: &mut String) {
        self.write_signature(out, true);
    }
}

impl InterfaceMethod for FuncType {
    fn into_method(self) -> Method {
        Method::Func(self)
    }
}
