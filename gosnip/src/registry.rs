//! Import path to alias bookkeeping for one Go file.

use std::{
    collections::HashMap,
    fmt,
    path::{Path, PathBuf},
};

use gosnip_core::lower_snake_case;
use gosnip_format::PackageResolver;
use gosnip_snippet::ImportAliaser;
use indexmap::IndexMap;
use tracing::{debug, warn};

/// Collects the imports a file needs and the alias each one is used under.
///
/// Aliases are the lower snake case form of the canonical import path, so
/// `github.com/pkg/errors` becomes `github_com_pkg_errors`. Paths are kept in
/// the order they were first used.
///
/// ```
/// use gosnip::ImportRegistry;
///
/// let mut imports = ImportRegistry::new("/work");
/// assert_eq!(imports.use_("net/http", "Client"), "net_http.Client");
/// assert_eq!(imports.alias_for("net/http"), "net_http");
/// assert_eq!(imports.len(), 1);
/// ```
pub struct ImportRegistry {
    /// Canonical path -> alias.
    imports: IndexMap<String, String>,
    /// Requested path -> canonical path.
    requested: HashMap<String, String>,
    resolver: Option<Box<dyn PackageResolver>>,
    src_dir: PathBuf,
}

impl ImportRegistry {
    /// A registry for a file in `src_dir`, with no resolver.
    pub fn new(src_dir: impl Into<PathBuf>) -> Self {
        Self {
            imports: IndexMap::new(),
            requested: HashMap::new(),
            resolver: None,
            src_dir: src_dir.into(),
        }
    }

    /// Canonicalize paths through `resolver` before aliasing them.
    pub fn with_resolver(mut self, resolver: impl PackageResolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    pub(crate) fn set_resolver(&mut self, resolver: Box<dyn PackageResolver>) {
        self.resolver = Some(resolver);
    }

    pub fn src_dir(&self) -> &Path {
        &self.src_dir
    }

    /// The alias `import_path` is referred to by, registering it on first
    /// use.
    pub fn alias_for(&mut self, import_path: &str) -> String {
        if let Some(alias) = self
            .requested
            .get(import_path)
            .and_then(|canonical| self.imports.get(canonical))
        {
            return alias.clone();
        }

        let canonical = self.canonical(import_path);
        let alias = self
            .imports
            .entry(canonical.clone())
            .or_insert_with(|| {
                let alias = lower_snake_case(&canonical);
                debug!(
                    import_path = canonical.as_str(),
                    alias = alias.as_str(),
                    "registered import"
                );
                alias
            })
            .clone();
        self.requested.insert(import_path.to_string(), canonical);
        alias
    }

    /// A package-qualified reference, `<alias>.<name>`.
    pub fn use_(&mut self, import_path: &str, name: &str) -> String {
        format!("{}.{name}", self.alias_for(import_path))
    }

    /// Whether the canonical form of `import_path` has been registered.
    pub fn contains(&self, import_path: &str) -> bool {
        self.requested.contains_key(import_path) || self.imports.contains_key(import_path)
    }

    /// `(path, alias)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.imports
            .iter()
            .map(|(path, alias)| (path.as_str(), alias.as_str()))
    }

    pub fn len(&self) -> usize {
        self.imports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    fn canonical(&self, import_path: &str) -> String {
        let Some(resolver) = &self.resolver else {
            return strip_vendor(import_path).to_string();
        };
        match resolver.resolve(import_path, &self.src_dir) {
            Some(pkg) => strip_vendor(&pkg.import_path).to_string(),
            None => {
                warn!(
                    import_path,
                    src_dir = %self.src_dir.display(),
                    "cannot resolve import, using it as written"
                );
                strip_vendor(import_path).to_string()
            }
        }
    }
}

impl ImportAliaser for ImportRegistry {
    fn alias(&mut self, import_path: &str) -> String {
        self.alias_for(import_path)
    }
}

impl fmt::Debug for ImportRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportRegistry")
            .field("imports", &self.imports)
            .field("src_dir", &self.src_dir)
            .field("resolver", &self.resolver.is_some())
            .finish()
    }
}

/// Drop everything up to and including the last `vendor/` directory.
///
/// ```
/// use gosnip::strip_vendor;
///
/// assert_eq!(strip_vendor("github.com/me/app/vendor/github.com/x/y"), "github.com/x/y");
/// assert_eq!(strip_vendor("vendor/golang.org/x/net"), "golang.org/x/net");
/// assert_eq!(strip_vendor("fmt"), "fmt");
/// ```
pub fn strip_vendor(import_path: &str) -> &str {
    match import_path.rfind("/vendor/") {
        Some(i) => &import_path[i + "/vendor/".len()..],
        None => import_path.strip_prefix("vendor/").unwrap_or(import_path),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use gosnip_format::{FsResolver, ResolvedPackage};
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_alias_is_snake_case_of_path() {
        let mut imports = ImportRegistry::new("/work");
        assert_eq!(imports.alias_for("fmt"), "fmt");
        assert_eq!(imports.alias_for("net/http"), "net_http");
        assert_eq!(
            imports.alias_for("github.com/go-courier/codegen"),
            "github_com_go_courier_codegen"
        );
    }

    #[test]
    fn test_one_alias_per_path() {
        let mut imports = ImportRegistry::new("/work");
        let first = imports.use_("encoding/json", "Marshal");
        let second = imports.use_("encoding/json", "Unmarshal");

        assert_eq!(first, "encoding_json.Marshal");
        assert_eq!(second, "encoding_json.Unmarshal");
        assert_eq!(imports.len(), 1);
    }

    #[test]
    fn test_insertion_order() {
        let mut imports = ImportRegistry::new("/work");
        for path in ["strings", "bytes", "fmt", "bytes"] {
            imports.alias_for(path);
        }
        let paths: Vec<_> = imports.iter().map(|(path, _)| path).collect();
        assert_eq!(paths, vec!["strings", "bytes", "fmt"]);
    }

    #[test]
    fn test_vendor_prefix_stripped() {
        let mut imports = ImportRegistry::new("/work");
        let alias = imports.alias_for("github.com/me/app/vendor/github.com/x/y");

        assert_eq!(alias, "github_com_x_y");
        assert!(imports.contains("github.com/x/y"));
        assert!(imports.contains("github.com/me/app/vendor/github.com/x/y"));
    }

    struct Fixed;

    impl PackageResolver for Fixed {
        fn resolve(&self, import_path: &str, _src_dir: &Path) -> Option<ResolvedPackage> {
            (import_path == "github.com/x/y").then(|| ResolvedPackage {
                import_path: "github.com/me/app/vendor/github.com/x/y".to_string(),
                name: "y".to_string(),
                dir: PathBuf::from("/gopath/src/github.com/me/app/vendor/github.com/x/y"),
                is_goroot: false,
            })
        }
    }

    #[test]
    fn test_resolved_path_is_canonical() {
        let mut imports = ImportRegistry::new("/work").with_resolver(Fixed);
        assert_eq!(imports.alias_for("github.com/x/y"), "github_com_x_y");
        assert_eq!(imports.iter().next(), Some(("github.com/x/y", "github_com_x_y")));
    }

    #[test]
    fn test_unresolved_path_falls_back() {
        let mut imports = ImportRegistry::new("/work").with_resolver(Fixed);
        assert_eq!(imports.alias_for("github.com/nowhere"), "github_com_nowhere");
        assert_eq!(imports.len(), 1);
    }

    #[test]
    fn test_fs_resolver_vendor_directory() {
        let tmp = TempDir::new().unwrap();
        let gopath = tmp.path().join("gopath");
        let app = gopath.join("src/github.com/me/app");
        let vendored = app.join("vendor/github.com/x/y");
        fs::create_dir_all(&vendored).unwrap();
        fs::write(vendored.join("y.go"), "package y\n").unwrap();

        let mut imports =
            ImportRegistry::new(&app).with_resolver(FsResolver::new(None, vec![gopath]));
        assert_eq!(imports.use_("github.com/x/y", "Z"), "github_com_x_y.Z");
        assert_eq!(imports.iter().next().map(|(path, _)| path), Some("github.com/x/y"));
    }

    #[test]
    fn test_serializer_registers_imports() {
        use gosnip_snippet::{Serializer, Snippet, TypeDesc};

        let mut imports = ImportRegistry::new("/work");
        let ty = Serializer::new(&mut imports)
            .type_of(&TypeDesc::named("time", "Duration"))
            .unwrap();

        assert_eq!(ty.render(), "time.Duration");
        assert!(imports.contains("time"));
    }
}
