//! Import grouping rewrite.

use gosnip_core::{Result, SourceContext};
use tracing::debug;

use crate::{
    Classifier, Dependency, Formatter, ImportDecl, PackageResolver, Process, StdPackages,
    parse_imports, source_dir,
};

/// Regroups the leading import declarations by provenance.
///
/// Every declaration is rewritten as a parenthesized group with standard
/// library imports first, then vendored, local and unresolved ones, each
/// bucket separated by a blank line. Specs keep their relative order within
/// a bucket, along with their comments.
///
/// ```
/// use gosnip_format::{IndentFormatter, SortImports, StdPackages, format_source};
///
/// let src = "package main\n\nimport (\n\"github.com/x/y\"\n\"fmt\"\n)\n";
/// let sort = SortImports::new().with_std_packages(StdPackages::from_paths(["fmt"]));
/// let out = format_source(&IndentFormatter::default(), "/work/main.go", src, &[&sort]).unwrap();
/// assert_eq!(out, "package main\n\nimport (\n\t\"fmt\"\n\n\t\"github.com/x/y\"\n)\n");
/// ```
#[derive(Default)]
pub struct SortImports {
    resolver: Option<Box<dyn PackageResolver>>,
    std: StdPackages,
}

impl SortImports {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolver(mut self, resolver: impl PackageResolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// The table used to spot standard library paths when no resolver is
    /// set.
    pub fn with_std_packages(mut self, std: StdPackages) -> Self {
        self.std = std;
        self
    }

    /// A classifier for a file named `filename`.
    pub fn classifier(&self, filename: &str) -> Classifier<'_> {
        let classifier = Classifier::new(source_dir(filename), &self.std);
        match &self.resolver {
            Some(resolver) => classifier.with_resolver(&**resolver),
            None => classifier,
        }
    }

    /// Rewrite the import declarations of `src` without re-formatting.
    pub fn rewrite(&self, filename: &str, src: &str) -> Result<String> {
        let ctx = SourceContext::new(src, filename);
        let decls = parse_imports(&ctx)?;
        let classifier = self.classifier(filename);

        let mut out = src.to_string();
        for decl in decls.into_iter().rev() {
            if decl.specs.is_empty() {
                continue;
            }
            let span = decl.span.clone();
            let group = render_group(&classifier, decl);
            debug!(
                filename,
                start = span.start,
                end = span.end,
                "splicing import group"
            );
            out.replace_range(span, &group);
        }
        Ok(out)
    }
}

impl Process for SortImports {
    fn apply(&self, filename: &str, src: &str, formatter: &dyn Formatter) -> Result<String> {
        let rewritten = self.rewrite(filename, src)?;
        formatter.format(filename, &rewritten)
    }
}

fn render_group(classifier: &Classifier<'_>, decl: ImportDecl) -> String {
    let groups = classifier.group(decl.specs);

    let mut out = String::from("import (\n");
    let buckets = groups.iter().filter(|bucket| !bucket.is_empty());
    for (i, bucket) in buckets.enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for dep in bucket {
            write_dependency(&mut out, dep);
        }
    }
    for line in &decl.trailing {
        out.push_str(line);
        out.push('\n');
    }
    out.push(')');
    out
}

fn write_dependency(out: &mut String, dep: &Dependency) {
    dep.spec.write_to(out, dep.keeps_name());
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::{FsResolver, IndentFormatter, format_source};

    fn sort_fallback(src: &str) -> String {
        let sort = SortImports::new()
            .with_std_packages(StdPackages::from_paths(["testing", "unicode", "unicode/utf8"]));
        format_source(
            &IndentFormatter::default(),
            "/work/formatx/format2_test.go",
            src,
            &[&sort],
        )
        .unwrap()
    }

    #[test]
    fn test_groups_by_provenance() {
        let src = r#"package formatx

import (
	"github.com/go-courier/codegen"

	"unicode"

	"unicode/utf8"

	// spew
	s "github.com/davecgh/go-spew/spew"
	"testing" // testing
)

func Test(t *testing.T) {
	s.Dump(codegen.String)
	s.Dump(unicode.Armenian)
	s.Dump(utf8.DecodeLastRune)
}
"#;

        insta::assert_snapshot!(sort_fallback(src), @r#"
        package formatx

        import (
        	"unicode"
        	"unicode/utf8"
        	"testing" // testing

        	"github.com/go-courier/codegen"
        	// spew
        	s "github.com/davecgh/go-spew/spew"
        )

        func Test(t *testing.T) {
        	s.Dump(codegen.String)
        	s.Dump(unicode.Armenian)
        	s.Dump(utf8.DecodeLastRune)
        }
        "#);
    }

    #[test]
    fn test_single_declarations_each_rewritten() {
        let src = "package main\n\nimport \"github.com/x/y\" // y\nimport _ \"unicode\"\n\nvar _ = y.Z\n";
        assert_eq!(
            sort_fallback(src),
            "package main\n\nimport (\n\t\"github.com/x/y\" // y\n)\nimport (\n\t_ \"unicode\"\n)\n\nvar _ = y.Z\n"
        );
    }

    #[test]
    fn test_no_imports_untouched() {
        let src = "package main\n\nfunc main() {}\n";
        assert_eq!(sort_fallback(src), src);
    }

    #[test]
    fn test_rewrite_errors_carry_listing() {
        let err = SortImports::new()
            .rewrite("main.go", "package main\nimport (\n\"fmt\"\n")
            .unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("go codes parse failed:"));
        assert!(message.contains("\t3\t\"fmt\""));
    }

    #[test]
    fn test_groups_with_resolver() {
        let tmp = TempDir::new().unwrap();
        let goroot = tmp.path().join("goroot");
        let gopath = tmp.path().join("gopath");
        let app = gopath.join("src/github.com/me/app");

        for (dir, name) in [
            (goroot.join("src/fmt"), "fmt"),
            (gopath.join("src/github.com/x/yaml.v2"), "yaml"),
            (app.join("api"), "api"),
        ] {
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("doc.go"), format!("package {name}\n")).unwrap();
        }

        let sort = SortImports::new().with_resolver(FsResolver::new(Some(goroot), vec![gopath]));
        let filename = app.join("main.go").display().to_string();
        let src = "package main\n\nimport (\nmissing \"github.com/nowhere\"\napi \"github.com/me/app/api\"\nyaml \"github.com/x/yaml.v2\"\nf \"fmt\"\n)\n";

        let out = format_source(&IndentFormatter::default(), &filename, src, &[&sort]).unwrap();
        assert_eq!(
            out,
            "package main\n\nimport (\n\tf \"fmt\"\n\n\t\"github.com/x/yaml.v2\"\n\n\t\"github.com/me/app/api\"\n\n\tmissing \"github.com/nowhere\"\n)\n"
        );
    }
}
