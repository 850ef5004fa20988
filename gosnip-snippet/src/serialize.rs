//! Turn [`Value`]s into Go literal syntax.

use gosnip_core::{Error, Result, lower_snake_case};

use crate::{
    BuiltIn, CompositeLit, Expr, Field, FuncType, Ident, KeyValue, Lit, Node, Paren, Reflect,
    Snippet, StructType, Type, TypeDesc, Unary, Value, quote_rune,
    value::{FieldDesc, IntKind},
};

/// Maps an import path to the local name used to refer to it.
pub trait ImportAliaser {
    fn alias(&mut self, import_path: &str) -> String;
}

/// Alias every path by its lower snake case form, without recording it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnakeCaseAliaser;

impl ImportAliaser for SnakeCaseAliaser {
    fn alias(&mut self, import_path: &str) -> String {
        lower_snake_case(import_path)
    }
}

/// Serializes values and type descriptions, resolving package-qualified
/// types through an [`ImportAliaser`].
///
/// ```
/// use gosnip_snippet::{Serializer, SnakeCaseAliaser, Snippet};
///
/// let mut aliaser = SnakeCaseAliaser;
/// let mut ser = Serializer::new(&mut aliaser);
/// let node = ser.val(&vec!["1", "2"]).unwrap();
/// assert_eq!(node.render(), "[]string{\n\"1\",\n\"2\",\n}");
/// ```
pub struct Serializer<'a> {
    aliaser: &'a mut dyn ImportAliaser,
}

impl<'a> Serializer<'a> {
    pub fn new(aliaser: &'a mut dyn ImportAliaser) -> Self {
        Self { aliaser }
    }

    /// Serialize anything that can describe itself.
    pub fn val<T: Reflect + ?Sized>(&mut self, value: &T) -> Result<Node> {
        self.serialize(&value.reflect())
    }

    /// Fill an expression template with serialized values. See
    /// [`Expr::template`] for the placeholder syntax.
    pub fn expr(&mut self, template: &str, args: &[&dyn Reflect]) -> Result<Expr> {
        let args = args
            .iter()
            .map(|arg| self.val(*arg))
            .collect::<Result<Vec<_>>>()?;
        Expr::template(template, args)
    }

    pub fn serialize(&mut self, value: &Value) -> Result<Node> {
        let node: Node = match value {
            Value::Nil => BuiltIn::Nil.into(),
            Value::Bool(v) => Lit::bool(*v).into(),
            Value::Int(IntKind::Int32, v) => int32_lit(*v).into(),
            Value::Int(_, v) => Lit::int(*v).into(),
            Value::Uint(_, v) => Lit::uint(*v).into(),
            Value::Float32(v) => Lit::new(format_float32(*v)).into(),
            Value::Float64(v) => Lit::new(format_float64(*v)).into(),
            Value::String(v) => Lit::string(v).into(),
            Value::Pointer(inner) => {
                let inner = self.serialize(inner)?;
                Unary::new(Paren::new(inner)).into()
            }
            Value::Struct { ty, fields } => {
                let mut lit = CompositeLit::new(self.type_of(ty)?);
                for field in fields.iter().filter(|f| !f.is_zero()) {
                    let value = self.serialize(&field.value)?;
                    lit = lit.elt(KeyValue::new(Ident::new(field.name.as_str())?, value));
                }
                lit.into()
            }
            Value::Map { ty, entries } => {
                let mut pairs = Vec::with_capacity(entries.len());
                for (key, value) in entries {
                    let key = self.serialize(key)?;
                    let value = self.serialize(value)?;
                    pairs.push((key.render(), KeyValue::new(key, value)));
                }
                pairs.sort_by(|a, b| a.0.cmp(&b.0));
                CompositeLit::new(self.type_of(ty)?)
                    .elts(pairs.into_iter().map(|(_, kv)| kv))
                    .into()
            }
            Value::Seq { ty, items } => {
                let items = items
                    .iter()
                    .map(|item| self.serialize(item))
                    .collect::<Result<Vec<_>>>()?;
                CompositeLit::new(self.type_of(ty)?).elts(items).into()
            }
            Value::Opaque { .. } => return Err(Error::unsupported_value(value.kind())),
        };
        Ok(node)
    }

    /// Build the type expression for `desc`.
    pub fn type_of(&mut self, desc: &TypeDesc) -> Result<Type> {
        let ty: Type = match desc {
            TypeDesc::Builtin(builtin) => (*builtin).into(),
            TypeDesc::Named {
                package: Some(package),
                name,
            } => {
                let alias = self.aliaser.alias(package);
                tracing::trace!(
                    package = package.as_str(),
                    alias = alias.as_str(),
                    "qualified type"
                );
                Type::named(&format!("{alias}.{name}"))?
            }
            TypeDesc::Named {
                package: None,
                name,
            } => Type::named(name)?,
            TypeDesc::Pointer(elem) => Type::pointer(self.type_of(elem)?),
            TypeDesc::Chan(elem) => Type::chan(self.type_of(elem)?),
            TypeDesc::Slice(elem) => Type::slice(self.type_of(elem)?),
            TypeDesc::Array(elem, len) => Type::array(self.type_of(elem)?, *len),
            TypeDesc::Map(key, value) => Type::map(self.type_of(key)?, self.type_of(value)?),
            TypeDesc::Struct(fields) => {
                let fields = fields
                    .iter()
                    .map(|field| self.struct_field(field))
                    .collect::<Result<Vec<_>>>()?;
                StructType::from_fields(fields).into()
            }
            TypeDesc::Interface => Type::interface(),
            TypeDesc::Func => FuncType::new().into(),
        };
        Ok(ty)
    }

    fn struct_field(&mut self, field: &FieldDesc) -> Result<Field> {
        let ty = self.type_of(&field.ty)?;
        let out = if field.embedded {
            Field::new(ty)
        } else {
            Field::var(ty, [field.name.as_str()])?
        };
        Ok(match &field.tag {
            Some(tag) => out.tag(tag.as_str()),
            None => out,
        })
    }
}

/// Serialize with [`SnakeCaseAliaser`].
pub fn val<T: Reflect + ?Sized>(value: &T) -> Result<Node> {
    Serializer::new(&mut SnakeCaseAliaser).val(value)
}

/// Build a type with [`SnakeCaseAliaser`].
pub fn type_of(desc: &TypeDesc) -> Result<Type> {
    Serializer::new(&mut SnakeCaseAliaser).type_of(desc)
}

/// An `int32` is written as a rune literal when it quotes to exactly one
/// character, and as a decimal number otherwise.
fn int32_lit(v: i64) -> Lit {
    let quoted = u32::try_from(v)
        .ok()
        .and_then(char::from_u32)
        .map(quote_rune)
        .filter(|quoted| quoted.chars().count() == 3);
    match quoted {
        Some(quoted) => Lit::new(quoted),
        None => Lit::int(v),
    }
}

/// Shortest decimal text that reads back as the same `f64`.
pub fn format_float64(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "+Inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        v.to_string()
    }
}

/// Shortest decimal text that reads back as the same `f32`.
pub fn format_float32(v: f32) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f32::INFINITY {
        "+Inf".to_string()
    } else if v == f32::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        v.to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::{BuiltinType, value::UintKind};

    fn render<T: Reflect + ?Sized>(value: &T) -> String {
        val(value).unwrap().render()
    }

    struct Named {
        name: String,
        nested: Option<Box<Named>>,
    }

    impl Reflect for Named {
        fn type_desc() -> TypeDesc {
            TypeDesc::named("github.com/go-courier/codegen", "Nested")
        }

        fn reflect(&self) -> Value {
            Value::struct_of(Self::type_desc())
                .field("Name", &self.name)
                .field("Nested", &self.nested)
                .build()
        }
    }

    #[test]
    fn test_scalars() {
        assert_eq!(render(&"string"), r#""string""#);
        assert_eq!(render(&1_i64), "1");
        assert_eq!(render(&1.2_f64), "1.2");
        assert_eq!(render(&1.2_f32), "1.2");
        assert_eq!(render(&1.0_f64), "1");
        assert_eq!(render(&'b'), "'b'");
        assert_eq!(render(&'1'), "'1'");
        assert_eq!(render(&1_i32), "1");
        assert_eq!(render(&'\n'), "10");
        assert_eq!(render(&'世'), "'世'");
        assert_eq!(render(&'\u{a0}'), "160");
        assert_eq!(render(&'\u{3000}'), "12288");
        assert_eq!(render(&true), "true");
        assert_eq!(render(&255_u8), "255");
        assert_eq!(render(&Value::Nil), "nil");
    }

    #[test]
    fn test_special_floats() {
        assert_eq!(render(&f64::NAN), "NaN");
        assert_eq!(render(&f64::INFINITY), "+Inf");
        assert_eq!(render(&f32::NEG_INFINITY), "-Inf");
        assert_eq!(render(&0.000_000_1_f64), "0.0000001");
    }

    #[test]
    fn test_unsupported_values() {
        let chan = Value::Opaque {
            ty: TypeDesc::Chan(Box::new(BuiltinType::String.into())),
        };
        let err = val(&chan).unwrap_err();
        assert!(matches!(*err, Error::UnsupportedValue { ref kind } if kind == "chan"));
        assert_eq!(err.to_string(), "chan is an unsupported type");

        let func = Value::Opaque { ty: TypeDesc::Func };
        assert!(val(&vec![func]).is_err());
    }

    #[test]
    fn test_slices_and_arrays() {
        assert_eq!(render(&vec!["1", "2"]), "[]string{\n\"1\",\n\"2\",\n}");
        assert_eq!(
            render(&vec![Value::from("1"), Value::Nil]),
            "[]interface {}{\n\"1\",\nnil,\n}"
        );
        assert_eq!(
            render(&[Value::from("1"), Value::Nil]),
            "[2]interface {}{\n\"1\",\nnil,\n}"
        );
    }

    #[test]
    fn test_map_entries_sorted_by_key_text() {
        let mut first = HashMap::new();
        first.insert("2".to_string(), 2_i64);
        first.insert("1".to_string(), 1_i64);

        let mut second = indexmap::IndexMap::new();
        second.insert("1".to_string(), 1_i64);
        second.insert("2".to_string(), 2_i64);

        let expected = "map[string]int64{\n\"1\": 1,\n\"2\": 2,\n}";
        assert_eq!(render(&first), expected);
        assert_eq!(render(&second), expected);
    }

    #[test]
    fn test_anonymous_struct_omits_zero_fields() {
        let ty = TypeDesc::Struct(vec![
            FieldDesc::new("Name", BuiltinType::String.into()).tag(r#"json:"name""#),
            FieldDesc::new("Empty", BuiltinType::String.into()),
        ]);
        let value = Value::struct_of(ty)
            .field("Name", &"123")
            .field("Empty", &"")
            .build();

        assert_eq!(
            render(&value),
            "struct {\nName string `json:\"name\"`\nEmpty string\n}{\nName: \"123\",\n}"
        );
    }

    #[test]
    fn test_named_struct_with_pointer() {
        let value = Named {
            name: "string".to_string(),
            nested: Some(Box::new(Named {
                name: "string".to_string(),
                nested: None,
            })),
        };

        assert_eq!(
            render(&value),
            "github_com_go_courier_codegen.Nested{\nName: \"string\",\nNested: &(github_com_go_courier_codegen.Nested{\nName: \"string\",\n}),\n}"
        );
    }

    #[test]
    fn test_aliaser_is_consulted() {
        struct Recording(Vec<String>);

        impl ImportAliaser for Recording {
            fn alias(&mut self, import_path: &str) -> String {
                self.0.push(import_path.to_string());
                "b".to_string()
            }
        }

        let mut aliaser = Recording(Vec::new());
        let ty = Serializer::new(&mut aliaser)
            .type_of(&TypeDesc::pointer(TypeDesc::named("bytes", "Buffer")))
            .unwrap();

        assert_eq!(ty.render(), "*b.Buffer");
        assert_eq!(aliaser.0, vec!["bytes".to_string()]);
    }

    #[test]
    fn test_type_of() {
        let tagged = TypeDesc::Chan(Box::new(TypeDesc::Struct(vec![
            FieldDesc::embedded(TypeDesc::named("bytes", "Buffer")),
            FieldDesc::new("Name", BuiltinType::String.into()).tag(r#"json:"name""#),
        ])));
        assert_eq!(
            type_of(&tagged).unwrap().render(),
            "chan struct {\nbytes.Buffer\nName string `json:\"name\"`\n}"
        );

        assert_eq!(
            type_of(&TypeDesc::pointer(TypeDesc::named("bytes", "Buffer")))
                .unwrap()
                .render(),
            "*bytes.Buffer"
        );
        assert_eq!(type_of(&TypeDesc::of::<Vec<String>>()).unwrap().render(), "[]string");
        assert_eq!(type_of(&TypeDesc::of::<[String; 0]>()).unwrap().render(), "[0]string");
        assert_eq!(
            type_of(&TypeDesc::of::<HashMap<String, String>>())
                .unwrap()
                .render(),
            "map[string]string"
        );
        assert_eq!(type_of(&TypeDesc::Func).unwrap().render(), "func ()");
    }

    #[test]
    fn test_expr_with_values() {
        let mut aliaser = SnakeCaseAliaser;
        let mut ser = Serializer::new(&mut aliaser);

        assert_eq!(ser.expr("? + ?", &[&1_i64, &1_i64]).unwrap().render(), "1 + 1");
        assert_eq!(
            ser.expr("? + ?", &[&"1", &"1"]).unwrap().render(),
            r#""1" + "1""#
        );
    }

    #[test]
    fn test_json_value_serializes() {
        let json = serde_json::json!({"b": 2, "a": [true, null]});
        assert_eq!(
            render(&json),
            "map[string]interface {}{\n\"a\": []interface {}{\ntrue,\nnil,\n},\n\"b\": 2,\n}"
        );
        assert_eq!(
            render(&Value::Uint(UintKind::Uintptr, 7)),
            "7"
        );
    }
}
