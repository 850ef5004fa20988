//! Generate Go source files from typed snippets.
//!
//! A [`File`] collects snippets and the imports they need, then renders a
//! formatted Go file. Snippets come from [`gosnip_snippet`], formatting and
//! import grouping from [`gosnip_format`].
//!
//! ```
//! use gosnip::{File, Snippet};
//!
//! let mut file = File::new("config", "config.go");
//! let second = file.use_("time", "Second");
//! let timeout = file.expr(&format!("? * {second}"), &[&30isize]).unwrap();
//! assert_eq!(timeout.render(), "30 * time.Second");
//! assert!(file.render_raw().contains("time \"time\""));
//! ```

mod file;
mod registry;

pub use file::File;
pub use registry::{ImportRegistry, strip_vendor};

pub use gosnip_core::{
    Error, OutputFile, Result, generated_file_name, is_go_file, is_go_test_file,
    lower_camel_case, lower_snake_case, upper_camel_case, upper_snake_case, write_file,
};
pub use gosnip_format::{
    Config, Formatter, FsResolver, Gofmt, Indent, IndentFormatter, PackageResolver, Process,
    Provenance, ResolvedPackage, SortImports, StdPackages, format_source,
};
pub use gosnip_snippet::{
    Assign, AssignToken, Body, BuiltIn, BuiltinType, Call, CallModifier, CanAddr, Clause,
    Comments, CompositeLit, DeclSpec, DeclToken, Expr, Field, FieldDesc, FieldValue, For,
    FuncType, GenDecl, Ident, If, ImportAliaser, IntKind, InterfaceMethod, InterfaceType,
    KeyValue, Lit, Method, Node, Paren, Range, Reflect, Return, Select, Selector, Serializer,
    Snippet, Star, StructType, StructValue, Switch, Type, TypeAssert, TypeDesc, UintKind, Unary,
    Value, is_valid_ident, quote_rune, quote_string, type_of, val,
};
