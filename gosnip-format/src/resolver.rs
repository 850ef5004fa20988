//! Go package resolution.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use gosnip_core::{Error, Result, SourceContext, is_go_file, is_go_test_file};
use tracing::debug;
use walkdir::WalkDir;

use crate::scanner::{TokenKind, scan, significant};

/// A package found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPackage {
    /// Canonical import path. For vendored packages this still contains the
    /// `/vendor/` segment.
    pub import_path: String,
    /// Name from the package clause.
    pub name: String,
    /// Directory holding the package sources.
    pub dir: PathBuf,
    /// Whether the package lives under the Go root.
    pub is_goroot: bool,
}

/// Finds the package behind an import path.
pub trait PackageResolver {
    /// Resolve `import_path` as imported from a file in `src_dir`.
    fn resolve(&self, import_path: &str, src_dir: &Path) -> Option<ResolvedPackage>;
}

impl<T: PackageResolver + ?Sized> PackageResolver for &T {
    fn resolve(&self, import_path: &str, src_dir: &Path) -> Option<ResolvedPackage> {
        (**self).resolve(import_path, src_dir)
    }
}

impl<T: PackageResolver + ?Sized> PackageResolver for Box<T> {
    fn resolve(&self, import_path: &str, src_dir: &Path) -> Option<ResolvedPackage> {
        (**self).resolve(import_path, src_dir)
    }
}

/// Resolves packages the way a GOPATH build does.
///
/// Lookup order: `<dir>/vendor/<path>` for `src_dir` and each of its
/// ancestors, then `$GOROOT/src/<path>`, then `<gopath>/src/<path>` for each
/// GOPATH entry. A directory is a package when it holds at least one
/// non-test `.go` file.
#[derive(Debug, Clone, Default)]
pub struct FsResolver {
    goroot: Option<PathBuf>,
    gopath: Vec<PathBuf>,
}

impl FsResolver {
    pub fn new(goroot: Option<PathBuf>, gopath: Vec<PathBuf>) -> Self {
        Self { goroot, gopath }
    }

    pub fn goroot(&self) -> Option<&Path> {
        self.goroot.as_deref()
    }

    pub fn gopath(&self) -> &[PathBuf] {
        &self.gopath
    }

    fn vendored(&self, import_path: &str, src_dir: &Path) -> Option<ResolvedPackage> {
        for ancestor in src_dir.ancestors() {
            let dir = ancestor.join("vendor").join(import_path);
            let Some(name) = package_name(&dir) else {
                continue;
            };

            let prefix = self
                .gopath
                .iter()
                .find_map(|root| ancestor.strip_prefix(root.join("src")).ok())
                .map(slash_path)
                .filter(|prefix| !prefix.is_empty());
            let import_path = match prefix {
                Some(prefix) => format!("{prefix}/vendor/{import_path}"),
                None => format!("vendor/{import_path}"),
            };

            return Some(ResolvedPackage {
                import_path,
                name,
                dir,
                is_goroot: false,
            });
        }
        None
    }

    fn in_root(&self, root: &Path, import_path: &str, is_goroot: bool) -> Option<ResolvedPackage> {
        let dir = root.join("src").join(import_path);
        let name = package_name(&dir)?;
        Some(ResolvedPackage {
            import_path: import_path.to_string(),
            name,
            dir,
            is_goroot,
        })
    }
}

impl PackageResolver for FsResolver {
    fn resolve(&self, import_path: &str, src_dir: &Path) -> Option<ResolvedPackage> {
        if import_path.is_empty() {
            return None;
        }

        let resolved = if import_path.starts_with("./") || import_path.starts_with("../") {
            let dir = src_dir.join(import_path);
            package_name(&dir).map(|name| ResolvedPackage {
                import_path: import_path.to_string(),
                name,
                dir,
                is_goroot: false,
            })
        } else {
            self.vendored(import_path, src_dir)
                .or_else(|| {
                    let goroot = self.goroot.as_deref()?;
                    self.in_root(goroot, import_path, true)
                })
                .or_else(|| {
                    self.gopath
                        .iter()
                        .find_map(|root| self.in_root(root, import_path, false))
                })
        };

        match &resolved {
            Some(pkg) => debug!(
                import_path,
                name = pkg.name.as_str(),
                dir = %pkg.dir.display(),
                "resolved package"
            ),
            None => debug!(import_path, "package not found"),
        }
        resolved
    }
}

fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Read the package clause of the first non-test `.go` file in `dir`.
pub fn package_name(dir: &Path) -> Option<String> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_package_source(path))
        .collect();
    files.sort();

    files.iter().find_map(|file| {
        let src = fs::read_to_string(file).ok()?;
        package_clause(&src)
    })
}

fn is_package_source(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    is_go_file(&name) && !is_go_test_file(&name) && !name.starts_with(['.', '_'])
}

/// The name declared by `package <name>` in `src`.
pub fn package_clause(src: &str) -> Option<String> {
    let ctx = SourceContext::new(src, "");
    let tokens = scan(&ctx).ok()?;
    let mut iter = significant(&tokens);

    let keyword = iter.next()?;
    if !keyword.is_word(src, "package") {
        return None;
    }
    let name = iter.next()?;
    (name.kind == TokenKind::Ident).then(|| name.text(src).to_string())
}

/// The set of standard library import paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StdPackages {
    paths: BTreeSet<String>,
}

impl StdPackages {
    /// Walk `$GOROOT/src` and collect every package directory.
    ///
    /// `cmd`, `testdata` and `vendor` trees are skipped.
    pub fn scan(goroot: impl AsRef<Path>) -> Result<Self> {
        let src = goroot.as_ref().join("src");
        let mut paths = BTreeSet::new();

        let walker = WalkDir::new(&src)
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| {
                let name = entry.file_name().to_string_lossy();
                let skipped = matches!(&*name, "testdata" | "vendor")
                    || name.starts_with(['.', '_'])
                    || (entry.depth() == 1 && name == "cmd");
                !(entry.file_type().is_dir() && skipped)
            });

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(&src).to_path_buf();
                match e.into_io_error() {
                    Some(source) => Error::io(path, source),
                    None => Error::config(path, "filesystem loop"),
                }
            })?;

            if !entry.file_type().is_file() || !is_package_source(entry.path()) {
                continue;
            }
            let Some(dir) = entry.path().parent() else {
                continue;
            };
            if let Ok(rel) = dir.strip_prefix(&src) {
                paths.insert(slash_path(rel));
            }
        }

        debug!(goroot = %goroot.as_ref().display(), packages = paths.len(), "scanned std packages");
        Ok(Self { paths })
    }

    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, import_path: &str) -> bool {
        self.paths.contains(import_path)
    }

    /// Whether `import_path` or one of its parent paths is a standard
    /// package. An empty table falls back to the "no dot in the first
    /// element" convention.
    pub fn is_std(&self, import_path: &str) -> bool {
        if self.paths.is_empty() {
            let first = import_path.split('/').next().unwrap_or("");
            return !first.is_empty() && !first.contains('.') && !import_path.starts_with('.');
        }

        let mut prefix = import_path;
        loop {
            if self.paths.contains(prefix) {
                return true;
            }
            match prefix.rfind('/') {
                Some(at) => prefix = &prefix[..at],
                None => return false,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }
}

/// Absolute directory of `filename`, relative to the working directory when
/// the name is relative.
pub fn source_dir(filename: &str) -> PathBuf {
    let dir = Path::new(filename)
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    if dir.is_absolute() {
        return dir;
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(dir),
        Err(_) => dir,
    }
}
