//! Formatting configuration, read from TOML and the Go environment.

use std::{
    env,
    path::{Path, PathBuf},
};

use gosnip_core::{Error, Result};
use serde::Deserialize;
use tracing::debug;

use crate::{FsResolver, Indent, IndentFormatter, SortImports, StdPackages};

/// Settings for the formatting collaborators.
///
/// ```toml
/// goroot = "/usr/local/go"
/// gopath = ["/home/me/go"]
/// indent = "tab"
/// sort_imports = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Go installation root. Enables standard library detection.
    pub goroot: Option<PathBuf>,
    /// GOPATH entries searched for non-standard packages.
    pub gopath: Vec<PathBuf>,
    pub indent: Indent,
    /// Regroup imports by provenance after formatting.
    pub sort_imports: bool,
}

impl Config {
    /// Parse a TOML document. `filename` is used in error messages.
    pub fn from_toml_str(content: &str, filename: impl AsRef<Path>) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(filename.as_ref(), e.message()))
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = Self::from_toml_str(&content, path)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Settings from `GOROOT` and `GOPATH`. GOPATH defaults to `$HOME/go`.
    pub fn from_env() -> Self {
        Self::default().with_env_defaults()
    }

    /// Fill unset locations from the environment.
    pub fn with_env_defaults(mut self) -> Self {
        if self.goroot.is_none() {
            self.goroot = env::var_os("GOROOT")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from);
        }
        if self.gopath.is_empty() {
            self.gopath = match env::var_os("GOPATH").filter(|v| !v.is_empty()) {
                Some(value) => env::split_paths(&value).collect(),
                None => env::var_os("HOME")
                    .map(|home| vec![PathBuf::from(home).join("go")])
                    .unwrap_or_default(),
            };
        }
        self
    }

    pub fn formatter(&self) -> IndentFormatter {
        IndentFormatter::new(self.indent)
    }

    pub fn resolver(&self) -> FsResolver {
        FsResolver::new(self.goroot.clone(), self.gopath.clone())
    }

    /// Scan the standard library under `goroot`, or an empty table when no
    /// root is configured.
    pub fn std_packages(&self) -> Result<StdPackages> {
        match &self.goroot {
            Some(goroot) => StdPackages::scan(goroot),
            None => Ok(StdPackages::default()),
        }
    }

    /// The import grouping process, if enabled.
    pub fn import_sorter(&self) -> Result<Option<SortImports>> {
        if !self.sort_imports {
            return Ok(None);
        }
        let sort = SortImports::new().with_std_packages(self.std_packages()?);
        if self.goroot.is_none() {
            debug!("no goroot, classifying imports without package lookup");
            return Ok(Some(sort));
        }
        Ok(Some(sort.with_resolver(self.resolver())))
    }
}
