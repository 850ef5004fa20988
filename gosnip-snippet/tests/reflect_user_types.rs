//! Serializing caller-defined types through `Reflect`.

use std::collections::BTreeMap;

use gosnip_core::Error;
use gosnip_snippet::{
    FieldDesc, ImportAliaser, Reflect, Serializer, Snippet, TypeDesc, Value, type_of, val,
};

struct Server {
    name: String,
    port: u16,
    labels: BTreeMap<String, String>,
    parent: Option<Box<Server>>,
}

impl Reflect for Server {
    fn type_desc() -> TypeDesc {
        TypeDesc::local("Server")
    }

    fn reflect(&self) -> Value {
        Value::struct_of(Self::type_desc())
            .field("Name", &self.name)
            .field("Port", &self.port)
            .field("Labels", &self.labels)
            .field("Parent", &self.parent)
            .build()
    }
}

fn server(name: &str, port: u16) -> Server {
    Server {
        name: name.to_string(),
        port,
        labels: BTreeMap::new(),
        parent: None,
    }
}

#[test]
fn zero_fields_are_omitted() {
    let node = val(&server("api", 0)).unwrap();
    insta::assert_snapshot!(node.render(), @r#"
    Server{
    Name: "api",
    }
    "#);
}

#[test]
fn nested_values() {
    let mut child = server("worker", 8080);
    child.labels.insert("tier".to_string(), "backend".to_string());
    child.parent = Some(Box::new(server("api", 80)));

    insta::assert_snapshot!(val(&child).unwrap().render(), @r#"
    Server{
    Name: "worker",
    Port: 8080,
    Labels: map[string]string{
    "tier": "backend",
    },
    Parent: &(Server{
    Name: "api",
    Port: 80,
    }),
    }
    "#);
}

#[test]
fn slices_keep_order() {
    let servers = vec![server("b", 1), server("a", 2)];
    let rendered = val(&servers).unwrap().render();
    assert!(rendered.starts_with("[]Server{\n"));
    assert!(rendered.find("\"b\"").unwrap() < rendered.find("\"a\"").unwrap());
}

#[test]
fn functions_have_no_literal() {
    let err = val(&Value::Opaque {
        ty: TypeDesc::Func,
    })
    .unwrap_err();
    assert!(matches!(*err, Error::UnsupportedValue { .. }));
}

struct Recording(Vec<String>);

impl ImportAliaser for Recording {
    fn alias(&mut self, import_path: &str) -> String {
        self.0.push(import_path.to_string());
        import_path.rsplit('/').next().unwrap_or(import_path).to_string()
    }
}

#[test]
fn foreign_types_go_through_the_aliaser() {
    let desc = TypeDesc::Struct(vec![
        FieldDesc::new("Timeout", TypeDesc::named("time", "Duration")),
        FieldDesc::new("Body", TypeDesc::pointer(TypeDesc::named("encoding/json", "RawMessage"))),
    ]);

    let mut aliaser = Recording(Vec::new());
    let ty = Serializer::new(&mut aliaser).type_of(&desc).unwrap();

    assert_eq!(aliaser.0, vec!["time", "encoding/json"]);
    assert_eq!(
        ty.render(),
        "struct {\nTimeout time.Duration\nBody *json.RawMessage\n}"
    );
    assert!(type_of(&TypeDesc::named("time", "Duration")).is_ok());
}
