//! Go compilation unit assembly.

use gosnip_core::{OutputFile, Result, lower_snake_case};
use gosnip_format::{
    Config, Formatter, IndentFormatter, PackageResolver, Process, format_source, source_dir,
};
use gosnip_snippet::{Expr, Node, Reflect, Serializer, Snippet, Type, TypeDesc, quote_string};
use tracing::debug;

use crate::ImportRegistry;

/// A Go source file under construction.
///
/// Blocks are appended with [`File::write_block`]; every package-qualified
/// reference made through the file registers its import. [`File::render`]
/// assembles the package clause, the import block and the blocks, then runs
/// the formatter and any post-processes.
///
/// ```
/// use gosnip::{Call, File, FuncType, Ident};
///
/// let mut file = File::new("main", "hello.go");
/// let println = file.use_("fmt", "Println");
/// let hello = file.val(&"Hello").unwrap();
/// file.write_block([FuncType::new()
///     .named(Ident::new("main").unwrap())
///     .body([Call::new(&println).unwrap().arg(hello)])]);
///
/// assert_eq!(
///     file.render().unwrap(),
///     "package main\n\nimport (\n\tfmt \"fmt\"\n)\n\nfunc main() {\n\tfmt.Println(\"Hello\")\n}\n"
/// );
/// ```
pub struct File {
    package: String,
    filename: String,
    imports: ImportRegistry,
    blocks: String,
    formatter: Box<dyn Formatter>,
    processes: Vec<Box<dyn Process>>,
}

impl File {
    /// A file declaring package `package` (normalized to lower snake case),
    /// to be written at `filename`.
    pub fn new(package: &str, filename: impl Into<String>) -> Self {
        let filename = filename.into();
        Self {
            package: lower_snake_case(package),
            imports: ImportRegistry::new(source_dir(&filename)),
            filename,
            blocks: String::new(),
            formatter: Box::new(IndentFormatter::default()),
            processes: Vec::new(),
        }
    }

    /// A file wired to the collaborators described by `config`.
    pub fn from_config(
        package: &str,
        filename: impl Into<String>,
        config: &Config,
    ) -> Result<Self> {
        let mut file = Self::new(package, filename)
            .with_formatter(config.formatter())
            .with_resolver(config.resolver());
        if let Some(sort) = config.import_sorter()? {
            file = file.with_process(sort);
        }
        Ok(file)
    }

    pub fn with_formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Canonicalize import paths through `resolver`.
    pub fn with_resolver(mut self, resolver: impl PackageResolver + 'static) -> Self {
        self.imports.set_resolver(Box::new(resolver));
        self
    }

    /// Run `process` on the formatted output. Processes run in the order
    /// they were added.
    pub fn with_process(mut self, process: impl Process + 'static) -> Self {
        self.processes.push(Box::new(process));
        self
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn imports(&self) -> &ImportRegistry {
        &self.imports
    }

    /// Append each snippet followed by a blank line.
    pub fn write_block<I>(&mut self, snippets: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Snippet,
    {
        for snippet in snippets {
            snippet.write_to(&mut self.blocks);
            self.blocks.push_str("\n\n");
        }
        self
    }

    /// A package-qualified reference, `<alias>.<name>`, registering the
    /// import.
    pub fn use_(&mut self, import_path: &str, name: &str) -> String {
        self.imports.use_(import_path, name)
    }

    /// Fill an expression template, serializing `args` against this file's
    /// imports.
    pub fn expr(&mut self, template: &str, args: &[&dyn Reflect]) -> Result<Expr> {
        Serializer::new(&mut self.imports).expr(template, args)
    }

    pub fn val<T: Reflect + ?Sized>(&mut self, value: &T) -> Result<Node> {
        Serializer::new(&mut self.imports).val(value)
    }

    pub fn type_of(&mut self, desc: &TypeDesc) -> Result<Type> {
        Serializer::new(&mut self.imports).type_of(desc)
    }

    /// The Go type of `T`.
    pub fn type_for<T: Reflect>(&mut self) -> Result<Type> {
        self.type_of(&T::type_desc())
    }

    /// The assembled source before formatting.
    pub fn render_raw(&self) -> String {
        let mut out = format!("package {}\n", self.package);

        if !self.imports.is_empty() {
            out.push_str("import (\n");
            for (path, alias) in self.imports.iter() {
                out.push_str(alias);
                out.push(' ');
                out.push_str(&quote_string(path));
                out.push('\n');
            }
            out.push_str(")\n");
        }

        out.push_str(&self.blocks);
        out
    }

    /// The formatted source.
    pub fn render(&self) -> Result<String> {
        let raw = self.render_raw();
        let processes: Vec<&dyn Process> = self.processes.iter().map(|p| &**p).collect();
        debug!(
            filename = self.filename.as_str(),
            imports = self.imports.len(),
            processes = processes.len(),
            "rendering file"
        );
        format_source(&*self.formatter, &self.filename, &raw, &processes)
    }

    /// The formatted source paired with its destination.
    pub fn output(&self) -> Result<OutputFile> {
        Ok(OutputFile::new(&self.filename, self.render()?))
    }

    /// Render and write to `filename`. Returns the number of bytes written.
    pub fn write_file(&self) -> Result<usize> {
        self.output()?.write()
    }
}
