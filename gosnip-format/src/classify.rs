//! Provenance of imported packages.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{ImportSpec, PackageResolver, StdPackages};

/// Where an imported package comes from. Variants are in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Provenance {
    /// Found under the Go root.
    Standard,
    /// Found elsewhere: GOPATH, vendor directories, third-party code.
    Vendored,
    /// An ancestor or descendant of the importing file's directory.
    Local,
    /// Resolution failed.
    Unresolved,
}

impl Provenance {
    pub const ALL: [Provenance; 4] = [
        Provenance::Standard,
        Provenance::Vendored,
        Provenance::Local,
        Provenance::Unresolved,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// A classified import spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub spec: ImportSpec,
    pub provenance: Provenance,
    /// Name from the package clause, when the package was resolved.
    pub package_name: Option<String>,
}

impl Dependency {
    /// Whether the explicit name must be written out.
    ///
    /// Blank and dot imports keep their names, and so do unresolved ones.
    /// Otherwise the name is dropped when it matches the package name, or
    /// the last path element when the package was not looked up.
    pub fn keeps_name(&self) -> bool {
        let Some(name) = self.spec.name.as_deref() else {
            return false;
        };
        if name == "_" || name == "." || self.provenance == Provenance::Unresolved {
            return true;
        }
        match &self.package_name {
            Some(package) => name != package,
            None => name != default_name(&self.spec.path),
        }
    }
}

/// The last element of an import path.
pub fn default_name(import_path: &str) -> &str {
    import_path.rsplit('/').next().unwrap_or(import_path)
}

/// Assigns a [`Provenance`] to each import spec of one file.
pub struct Classifier<'a> {
    dir: PathBuf,
    resolver: Option<&'a dyn PackageResolver>,
    std: &'a StdPackages,
}

impl<'a> Classifier<'a> {
    /// A classifier for a file in `dir`.
    pub fn new(dir: impl Into<PathBuf>, std: &'a StdPackages) -> Self {
        Self {
            dir: dir.into(),
            resolver: None,
            std,
        }
    }

    pub fn with_resolver(mut self, resolver: &'a dyn PackageResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn classify(&self, spec: ImportSpec) -> Dependency {
        let (provenance, package_name) = match self.resolver {
            Some(resolver) => match resolver.resolve(&spec.path, &self.dir) {
                Some(pkg) => {
                    let provenance = if pkg.is_goroot {
                        Provenance::Standard
                    } else if self.dir.starts_with(&pkg.dir) || pkg.dir.starts_with(&self.dir) {
                        Provenance::Local
                    } else {
                        Provenance::Vendored
                    };
                    (provenance, Some(pkg.name))
                }
                None => (Provenance::Unresolved, None),
            },
            None => (self.guess(&spec.path), None),
        };

        debug!(
            import_path = spec.path.as_str(),
            provenance = ?provenance,
            "classified import"
        );

        Dependency {
            spec,
            provenance,
            package_name,
        }
    }

    /// Best-effort classification without a resolver.
    fn guess(&self, import_path: &str) -> Provenance {
        if self.std.is_std(import_path) {
            return Provenance::Standard;
        }

        let dir = self.dir.to_string_lossy().to_lowercase();
        let path = import_path.trim_start_matches("./").to_lowercase();
        if !path.is_empty() && (dir.contains(&path) || path.contains(&dir)) {
            Provenance::Local
        } else {
            Provenance::Vendored
        }
    }

    /// Classify `specs` into buckets indexed by [`Provenance::index`],
    /// keeping the input order within each bucket.
    pub fn group(&self, specs: impl IntoIterator<Item = ImportSpec>) -> [Vec<Dependency>; 4] {
        let mut groups: [Vec<Dependency>; 4] = Default::default();
        for spec in specs {
            let dep = self.classify(spec);
            groups[dep.provenance.index()].push(dep);
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResolvedPackage;

    fn spec(name: Option<&str>, path: &str) -> ImportSpec {
        ImportSpec {
            doc: Vec::new(),
            name: name.map(str::to_string),
            path: path.to_string(),
            literal: format!("{path:?}"),
            comment: None,
        }
    }

    struct Fixed;

    impl PackageResolver for Fixed {
        fn resolve(&self, import_path: &str, _src_dir: &Path) -> Option<ResolvedPackage> {
            let (dir, name, is_goroot) = match import_path {
                "fmt" => ("/goroot/src/fmt", "fmt", true),
                "github.com/me/app/api" => ("/work/app/api", "api", false),
                "github.com/x/yaml.v2" => ("/gopath/src/github.com/x/yaml.v2", "yaml", false),
                _ => return None,
            };
            Some(ResolvedPackage {
                import_path: import_path.to_string(),
                name: name.to_string(),
                dir: PathBuf::from(dir),
                is_goroot,
            })
        }
    }

    #[test]
    fn test_classify_with_resolver() {
        let std = StdPackages::default();
        let c = Classifier::new("/work/app", &std).with_resolver(&Fixed);

        assert_eq!(c.classify(spec(None, "fmt")).provenance, Provenance::Standard);
        assert_eq!(
            c.classify(spec(None, "github.com/me/app/api")).provenance,
            Provenance::Local
        );
        assert_eq!(
            c.classify(spec(None, "github.com/x/yaml.v2")).provenance,
            Provenance::Vendored
        );
        assert_eq!(
            c.classify(spec(None, "github.com/missing")).provenance,
            Provenance::Unresolved
        );
    }

    #[test]
    fn test_keeps_name() {
        let std = StdPackages::default();
        let c = Classifier::new("/work/app", &std).with_resolver(&Fixed);

        assert!(!c.classify(spec(Some("fmt"), "fmt")).keeps_name());
        assert!(c.classify(spec(Some("f"), "fmt")).keeps_name());
        assert!(!c.classify(spec(Some("yaml"), "github.com/x/yaml.v2")).keeps_name());
        assert!(c.classify(spec(Some("_"), "fmt")).keeps_name());
        assert!(c.classify(spec(Some("m"), "github.com/missing")).keeps_name());
        assert!(!c.classify(spec(None, "fmt")).keeps_name());
    }

    #[test]
    fn test_guess_without_resolver() {
        let std = StdPackages::from_paths(["testing", "unicode", "unicode/utf8"]);
        let c = Classifier::new("/home/dev/src/github.com/Me/App/cmd", &std);

        assert_eq!(c.classify(spec(None, "unicode/utf8")).provenance, Provenance::Standard);
        assert_eq!(
            c.classify(spec(None, "github.com/me/app")).provenance,
            Provenance::Local
        );
        assert_eq!(
            c.classify(spec(None, "github.com/davecgh/go-spew/spew")).provenance,
            Provenance::Vendored
        );

        let renamed = c.classify(spec(Some("spew"), "github.com/davecgh/go-spew/spew"));
        assert!(!renamed.keeps_name());
    }

    #[test]
    fn test_group_is_stable() {
        let std = StdPackages::from_paths(["testing", "unicode"]);
        let c = Classifier::new("/work", &std);
        let groups = c.group([
            spec(None, "github.com/b"),
            spec(None, "unicode"),
            spec(None, "github.com/a"),
            spec(None, "testing"),
        ]);

        let paths = |i: usize| -> Vec<&str> {
            groups[i].iter().map(|d| d.spec.path.as_str()).collect()
        };
        assert_eq!(paths(0), vec!["unicode", "testing"]);
        assert_eq!(paths(1), vec!["github.com/b", "github.com/a"]);
        assert!(groups[2].is_empty());
        assert!(groups[3].is_empty());
    }
}
