//! End-to-end renders of whole Go files.

use eyre::Result;
use gosnip::{
    Assign, BuiltinType, Call, Config, Error, Expr, Field, File, For, FuncType, Gofmt, Ident,
    Node, Range, SortImports, StdPackages, Type, generated_file_name,
};
use tempfile::TempDir;

fn id(name: &str) -> Result<Ident> {
    Ok(Ident::new(name)?)
}

#[test]
fn hello_world() -> Result<()> {
    let mut file = File::new("main", "examples/hello/hello_test.go");
    let println = file.use_("fmt", "Println");
    let hello = file.val(&"Hello, 世界")?;

    file.write_block([FuncType::new()
        .named(id("main")?)
        .body([Call::new(&println)?.arg(hello)])]);

    insta::assert_snapshot!(file.render()?, @r#"
    package main

    import (
    	fmt "fmt"
    )

    func main() {
    	fmt.Println("Hello, 世界")
    }
    "#);
    Ok(())
}

#[test]
fn range_and_close() -> Result<()> {
    let mut file = File::new("main", "examples/range-and-close/range-and-close.go");

    let send = file.expr("c <- x", &[])?;
    let swap = file.expr("x, y = y, x+y", &[])?;
    let body: [Node; 3] = [
        Expr::raw("x, y := 0, 1").into(),
        For::new()
            .with_init(Expr::raw("i := 0"))
            .with_cond(Expr::raw("i < n"))
            .with_post(Expr::raw("i++"))
            .body([send, swap])
            .into(),
        Call::new("close")?.arg(id("c")?).into(),
    ];
    let fibonacci = FuncType::new()
        .named(id("fibonacci")?)
        .param(Field::var(BuiltinType::Int, ["n"])?)
        .param(Field::var(Type::chan(BuiltinType::Int), ["c"])?)
        .body(body);

    let println = file.use_("fmt", "Println");
    let cap = file.val(&10isize)?;
    let body: [Node; 3] = [
        Assign::define(id("c")?)
            .by([Call::new("make")?
                .arg(Type::chan(BuiltinType::Int))
                .arg(cap)])
            .into(),
        Call::new("fibonacci")?
            .arg(Call::new("cap")?.arg(id("c")?))
            .arg(id("c")?)
            .as_go()
            .into(),
        Range::new(id("c")?)
            .key(id("i")?)
            .body([Call::new(&println)?.arg(id("i")?)])
            .into(),
    ];
    let main = FuncType::new().named(id("main")?).body(body);

    file.write_block([fibonacci, main]);

    insta::assert_snapshot!(file.render()?, @r#"
    package main

    import (
    	fmt "fmt"
    )

    func fibonacci(n int, c chan int) {
    	x, y := 0, 1
    	for i := 0; i < n; i++ {
    		c <- x
    		x, y = y, x+y
    	}
    	close(c)
    }

    func main() {
    	c := make(chan int, 10)
    	go fibonacci(cap(c), c)
    	for i := range c {
    		fmt.Println(i)
    	}
    }
    "#);
    Ok(())
}

#[test]
fn one_import_per_package() -> Result<()> {
    let mut file = File::new("main", "/work/app/main.go");
    let first = file.use_("fmt", "Sprint");
    let second = file.use_("fmt", "Println");
    let inner = Call::new(&first)?.arg(file.val(&1isize)?);
    file.write_block([FuncType::new()
        .named(id("main")?)
        .body([Call::new(&second)?.arg(inner)])]);

    let out = file.render()?;
    assert_eq!(out.matches("\"fmt\"").count(), 1);
    assert!(out.contains("\tfmt.Println(fmt.Sprint(1))\n"));
    Ok(())
}

#[test]
fn vendored_imports_use_canonical_path() -> Result<()> {
    let mut file = File::new("main", "/work/app/main.go");
    let z = file.use_("github.com/me/app/vendor/github.com/x/y", "Z");
    assert_eq!(z, "github_com_x_y.Z");

    let raw = file.render_raw();
    assert!(raw.contains("github_com_x_y \"github.com/x/y\"\n"));
    assert!(!raw.contains("vendor"));
    Ok(())
}

#[test]
fn sort_imports_after_formatting() -> Result<()> {
    let sort = SortImports::new().with_std_packages(StdPackages::from_paths(["fmt"]));
    let mut file = File::new("main", "/work/app/main.go").with_process(sort);

    let z = file.use_("github.com/x/y", "Z");
    let println = file.use_("fmt", "Println");
    file.write_block([FuncType::new()
        .named(id("main")?)
        .body([Call::new(&println)?.arg(Expr::raw(z))])]);

    insta::assert_snapshot!(file.render()?, @r#"
    package main

    import (
    	"fmt"

    	github_com_x_y "github.com/x/y"
    )

    func main() {
    	fmt.Println(github_com_x_y.Z)
    }
    "#);
    Ok(())
}

#[test]
fn config_sorter_groups_without_goroot() -> Result<()> {
    let tmp = TempDir::new()?;
    let gopath = tmp.path().join("gopath");
    for (dir, package) in [("github.com/x/y", "y"), ("github.com/me/app", "app")] {
        let dir = gopath.join("src").join(dir);
        std::fs::create_dir_all(&dir)?;
        std::fs::write(dir.join("doc.go"), format!("package {package}\n"))?;
    }

    let config = Config {
        gopath: vec![gopath.clone()],
        sort_imports: true,
        ..Config::default()
    };
    let filename = gopath.join("src/github.com/me/app/cmd/server/main.go");
    let mut file = File::from_config("main", filename.display().to_string(), &config)?;

    let version = file.use_("github.com/me/app", "Version");
    let z = file.use_("github.com/x/y", "Z");
    let println = file.use_("fmt", "Println");
    file.write_block([FuncType::new().named(id("main")?).body([Call::new(&println)?
        .arg(Expr::raw(z))
        .arg(Expr::raw(version))])]);

    insta::assert_snapshot!(file.render()?, @r#"
    package main

    import (
    	"fmt"

    	github_com_x_y "github.com/x/y"

    	github_com_me_app "github.com/me/app"
    )

    func main() {
    	fmt.Println(github_com_x_y.Z, github_com_me_app.Version)
    }
    "#);
    Ok(())
}

#[test]
fn config_selects_indent() -> Result<()> {
    let config = Config::from_toml_str("indent = 4\n", "gosnip.toml")?;
    let mut file = File::from_config("main", "main.go", &config)?;
    file.write_block([FuncType::new()
        .named(id("main")?)
        .body([Expr::raw("println()")])]);

    assert_eq!(
        file.render()?,
        "package main\n\nfunc main() {\n    println()\n}\n"
    );
    Ok(())
}

#[test]
fn write_generated_file() -> Result<()> {
    let tmp = TempDir::new()?;
    let source = tmp.path().join("pkg/model.go");
    let filename = generated_file_name(&source.display().to_string());
    assert!(filename.ends_with("model__generated.go"));

    let mut file = File::new("model", filename.clone());
    file.write_block([Expr::raw("type ID string")]);

    let written = file.write_file()?;
    let on_disk = std::fs::read_to_string(&filename)?;
    assert_eq!(on_disk, "package model\n\ntype ID string\n");
    assert_eq!(written, on_disk.len());
    Ok(())
}

#[test]
fn missing_gofmt_is_an_io_error() -> Result<()> {
    let file = File::new("main", "main.go").with_formatter(Gofmt::with_program(
        "/nonexistent/bin/gofmt",
    ));
    let err = file.render().unwrap_err();
    assert!(matches!(*err, Error::Io { .. }));
    Ok(())
}

#[test]
fn invalid_identifiers_are_rejected() {
    for name in ["func", "int", "x²", "a-b"] {
        let err = Ident::new(name).unwrap_err();
        assert!(matches!(*err, Error::InvalidIdentifier { .. }), "{name}");
    }
}
