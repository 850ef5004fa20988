//! Runtime values and their Go type descriptions.
//!
//! Rust has no runtime reflection, so values that should become Go literals
//! describe themselves through [`Reflect`]: a [`TypeDesc`] for the Go type and
//! a [`Value`] tree for the contents. Implementations are provided for the
//! primitive types, strings, options, boxes, vectors, arrays and the standard
//! map types; user structs implement it with [`StructValue`].

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;

use crate::BuiltinType;

/// Width of a signed integer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntKind {
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
}

impl IntKind {
    pub fn builtin(&self) -> BuiltinType {
        match self {
            IntKind::Int => BuiltinType::Int,
            IntKind::Int8 => BuiltinType::Int8,
            IntKind::Int16 => BuiltinType::Int16,
            IntKind::Int32 => BuiltinType::Int32,
            IntKind::Int64 => BuiltinType::Int64,
        }
    }
}

/// Width of an unsigned integer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UintKind {
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
}

impl UintKind {
    pub fn builtin(&self) -> BuiltinType {
        match self {
            UintKind::Uint => BuiltinType::Uint,
            UintKind::Uint8 => BuiltinType::Uint8,
            UintKind::Uint16 => BuiltinType::Uint16,
            UintKind::Uint32 => BuiltinType::Uint32,
            UintKind::Uint64 => BuiltinType::Uint64,
            UintKind::Uintptr => BuiltinType::Uintptr,
        }
    }
}

/// Description of a Go type, the input to type rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDesc {
    Builtin(BuiltinType),
    /// A defined type. With a package path it renders as `<alias>.<Name>`.
    Named {
        package: Option<String>,
        name: String,
    },
    Pointer(Box<TypeDesc>),
    Chan(Box<TypeDesc>),
    Slice(Box<TypeDesc>),
    Array(Box<TypeDesc>, usize),
    Map(Box<TypeDesc>, Box<TypeDesc>),
    Struct(Vec<FieldDesc>),
    /// The empty interface.
    Interface,
    Func,
}

impl TypeDesc {
    /// The description of `T`.
    pub fn of<T: Reflect>() -> Self {
        T::type_desc()
    }

    /// A named type defined in the package being generated.
    pub fn local(name: impl Into<String>) -> Self {
        TypeDesc::Named {
            package: None,
            name: name.into(),
        }
    }

    /// A named type defined in another package.
    pub fn named(package: impl Into<String>, name: impl Into<String>) -> Self {
        TypeDesc::Named {
            package: Some(package.into()),
            name: name.into(),
        }
    }

    pub fn pointer(elem: TypeDesc) -> Self {
        TypeDesc::Pointer(Box::new(elem))
    }

    pub fn slice(elem: TypeDesc) -> Self {
        TypeDesc::Slice(Box::new(elem))
    }

    pub fn map(key: TypeDesc, value: TypeDesc) -> Self {
        TypeDesc::Map(Box::new(key), Box::new(value))
    }
}

impl From<BuiltinType> for TypeDesc {
    fn from(value: BuiltinType) -> Self {
        TypeDesc::Builtin(value)
    }
}

/// A struct field in a [`TypeDesc::Struct`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDesc {
    pub name: String,
    pub ty: TypeDesc,
    pub tag: Option<String>,
    /// Embedded fields render as the bare type.
    pub embedded: bool,
}

impl FieldDesc {
    pub fn new(name: impl Into<String>, ty: TypeDesc) -> Self {
        Self {
            name: name.into(),
            ty,
            tag: None,
            embedded: false,
        }
    }

    pub fn embedded(ty: TypeDesc) -> Self {
        let name = match &ty {
            TypeDesc::Named { name, .. } => name.clone(),
            TypeDesc::Pointer(elem) => match elem.as_ref() {
                TypeDesc::Named { name, .. } => name.clone(),
                _ => String::new(),
            },
            _ => String::new(),
        };
        Self {
            name,
            ty,
            tag: None,
            embedded: true,
        }
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// A runtime value, grouped by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(IntKind, i64),
    Uint(UintKind, u64),
    Float32(f32),
    Float64(f64),
    String(String),
    /// A non-nil pointer.
    Pointer(Box<Value>),
    Struct {
        ty: TypeDesc,
        fields: Vec<FieldValue>,
    },
    Map {
        ty: TypeDesc,
        entries: Vec<(Value, Value)>,
    },
    /// A slice or an array, depending on `ty`.
    Seq {
        ty: TypeDesc,
        items: Vec<Value>,
    },
    /// A channel or function value. These have no literal form.
    Opaque {
        ty: TypeDesc,
    },
}

/// One field of a [`Value::Struct`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
    pub name: String,
    pub value: Value,
    /// Result of the value's own zero check, if it has one. Takes precedence
    /// over the structural test.
    pub zero: Option<bool>,
}

impl FieldValue {
    pub fn is_zero(&self) -> bool {
        self.zero.unwrap_or_else(|| self.value.is_zero())
    }
}

impl Value {
    /// Start describing a struct value of type `ty`.
    pub fn struct_of(ty: TypeDesc) -> StructValue {
        StructValue::new(ty)
    }

    /// Whether this is the zero value of its type.
    ///
    /// Structs and non-nil pointers are never zero here; a struct field can
    /// still be reported as zero through its own predicate.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Nil => true,
            Value::Bool(v) => !v,
            Value::Int(_, v) => *v == 0,
            Value::Uint(_, v) => *v == 0,
            Value::Float32(v) => *v == 0.0,
            Value::Float64(v) => *v == 0.0,
            Value::String(v) => v.is_empty(),
            Value::Map { entries, .. } => entries.is_empty(),
            Value::Seq { items, .. } => items.is_empty(),
            Value::Pointer(_) | Value::Struct { .. } | Value::Opaque { .. } => false,
        }
    }

    /// Human readable kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(..) | Value::Uint(..) => "integer",
            Value::Float32(_) | Value::Float64(_) => "float",
            Value::String(_) => "string",
            Value::Pointer(_) => "pointer",
            Value::Struct { .. } => "struct",
            Value::Map { .. } => "map",
            Value::Seq { .. } => "sequence",
            Value::Opaque { ty } => match ty {
                TypeDesc::Chan(_) => "chan",
                TypeDesc::Func => "func",
                _ => "opaque",
            },
        }
    }
}

/// Builder for [`Value::Struct`].
///
/// ```
/// use gosnip_snippet::{TypeDesc, Value};
///
/// let value = Value::struct_of(TypeDesc::local("User"))
///     .field("Name", &"gopher")
///     .field("Age", &0_i64)
///     .build();
/// assert!(matches!(value, Value::Struct { ref fields, .. } if fields.len() == 2));
/// ```
#[derive(Debug, Clone)]
pub struct StructValue {
    ty: TypeDesc,
    fields: Vec<FieldValue>,
}

impl StructValue {
    pub fn new(ty: TypeDesc) -> Self {
        Self {
            ty,
            fields: Vec::new(),
        }
    }

    pub fn field<T: Reflect + ?Sized>(mut self, name: impl Into<String>, value: &T) -> Self {
        self.fields.push(FieldValue {
            name: name.into(),
            value: value.reflect(),
            zero: value.is_zero(),
        });
        self
    }

    /// Add a field from an already reflected value.
    pub fn value(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.push(FieldValue {
            name: name.into(),
            value,
            zero: None,
        });
        self
    }

    pub fn build(self) -> Value {
        Value::Struct {
            ty: self.ty,
            fields: self.fields,
        }
    }
}

/// Introspection for values that can become Go literals.
pub trait Reflect {
    /// The Go type of `Self`.
    fn type_desc() -> TypeDesc
    where
        Self: Sized;

    fn reflect(&self) -> Value;

    /// A custom zero check, consulted before the structural one.
    fn is_zero(&self) -> Option<bool> {
        None
    }
}

macro_rules! reflect_int {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn type_desc() -> TypeDesc {
                    TypeDesc::Builtin(IntKind::$kind.builtin())
                }

                fn reflect(&self) -> Value {
                    Value::Int(IntKind::$kind, *self as i64)
                }
            }
        )*
    };
}

macro_rules! reflect_uint {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn type_desc() -> TypeDesc {
                    TypeDesc::Builtin(UintKind::$kind.builtin())
                }

                fn reflect(&self) -> Value {
                    Value::Uint(UintKind::$kind, *self as u64)
                }
            }
        )*
    };
}

reflect_int! {
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    isize => Int,
}

reflect_uint! {
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    usize => Uint,
}

impl Reflect for bool {
    fn type_desc() -> TypeDesc {
        TypeDesc::Builtin(BuiltinType::Bool)
    }

    fn reflect(&self) -> Value {
        Value::Bool(*self)
    }
}

/// A `char` is a Go rune, which is an `int32`.
impl Reflect for char {
    fn type_desc() -> TypeDesc {
        TypeDesc::Builtin(BuiltinType::Int32)
    }

    fn reflect(&self) -> Value {
        Value::Int(IntKind::Int32, *self as i64)
    }
}

impl Reflect for f32 {
    fn type_desc() -> TypeDesc {
        TypeDesc::Builtin(BuiltinType::Float32)
    }

    fn reflect(&self) -> Value {
        Value::Float32(*self)
    }
}

impl Reflect for f64 {
    fn type_desc() -> TypeDesc {
        TypeDesc::Builtin(BuiltinType::Float64)
    }

    fn reflect(&self) -> Value {
        Value::Float64(*self)
    }
}

impl Reflect for String {
    fn type_desc() -> TypeDesc {
        TypeDesc::Builtin(BuiltinType::String)
    }

    fn reflect(&self) -> Value {
        Value::String(self.clone())
    }
}

impl Reflect for &str {
    fn type_desc() -> TypeDesc {
        TypeDesc::Builtin(BuiltinType::String)
    }

    fn reflect(&self) -> Value {
        Value::String((*self).to_string())
    }
}

/// `Option<T>` is a nil-able pointer to `T`.
impl<T: Reflect> Reflect for Option<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::Pointer(Box::new(T::type_desc()))
    }

    fn reflect(&self) -> Value {
        match self {
            Some(inner) => Value::Pointer(Box::new(inner.reflect())),
            None => Value::Nil,
        }
    }
}

impl<T: Reflect> Reflect for Box<T> {
    fn type_desc() -> TypeDesc {
        T::type_desc()
    }

    fn reflect(&self) -> Value {
        self.as_ref().reflect()
    }

    fn is_zero(&self) -> Option<bool> {
        self.as_ref().is_zero()
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::Slice(Box::new(T::type_desc()))
    }

    fn reflect(&self) -> Value {
        Value::Seq {
            ty: Self::type_desc(),
            items: self.iter().map(Reflect::reflect).collect(),
        }
    }
}

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    fn type_desc() -> TypeDesc {
        TypeDesc::Array(Box::new(T::type_desc()), N)
    }

    fn reflect(&self) -> Value {
        Value::Seq {
            ty: Self::type_desc(),
            items: self.iter().map(Reflect::reflect).collect(),
        }
    }
}

fn reflect_map<'a, K, V>(entries: impl Iterator<Item = (&'a K, &'a V)>) -> Value
where
    K: Reflect + 'a,
    V: Reflect + 'a,
{
    Value::Map {
        ty: TypeDesc::map(K::type_desc(), V::type_desc()),
        entries: entries.map(|(k, v)| (k.reflect(), v.reflect())).collect(),
    }
}

impl<K: Reflect, V: Reflect> Reflect for BTreeMap<K, V> {
    fn type_desc() -> TypeDesc {
        TypeDesc::map(K::type_desc(), V::type_desc())
    }

    fn reflect(&self) -> Value {
        reflect_map(self.iter())
    }
}

impl<K: Reflect, V: Reflect, S> Reflect for HashMap<K, V, S> {
    fn type_desc() -> TypeDesc {
        TypeDesc::map(K::type_desc(), V::type_desc())
    }

    fn reflect(&self) -> Value {
        reflect_map(self.iter())
    }
}

impl<K: Reflect, V: Reflect, S> Reflect for IndexMap<K, V, S> {
    fn type_desc() -> TypeDesc {
        TypeDesc::map(K::type_desc(), V::type_desc())
    }

    fn reflect(&self) -> Value {
        reflect_map(self.iter())
    }
}

/// A [`Value`] stands for an `interface {}` holding it.
impl Reflect for Value {
    fn type_desc() -> TypeDesc {
        TypeDesc::Interface
    }

    fn reflect(&self) -> Value {
        self.clone()
    }
}

/// JSON values map onto `map[string]interface {}`, `[]interface {}`,
/// `int64`, `uint64`, `float64`, `string`, `bool` and `nil`.
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(v) => Value::Bool(v),
            serde_json::Value::Number(n) => {
                if let Some(v) = n.as_i64() {
                    Value::Int(IntKind::Int64, v)
                } else if let Some(v) = n.as_u64() {
                    Value::Uint(UintKind::Uint64, v)
                } else {
                    Value::Float64(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(v) => Value::String(v),
            serde_json::Value::Array(items) => Value::Seq {
                ty: TypeDesc::slice(TypeDesc::Interface),
                items: items.into_iter().map(Value::from).collect(),
            },
            serde_json::Value::Object(map) => Value::Map {
                ty: TypeDesc::map(BuiltinType::String.into(), TypeDesc::Interface),
                entries: map
                    .into_iter()
                    .map(|(k, v)| (Value::String(k), Value::from(v)))
                    .collect(),
            },
        }
    }
}

impl Reflect for serde_json::Value {
    fn type_desc() -> TypeDesc {
        TypeDesc::Interface
    }

    fn reflect(&self) -> Value {
        Value::from(self.clone())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(IntKind::Int64, value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float64(value)
    }
}
