//! Formatting and import grouping for generated Go source.
//!
//! - [`Formatter`] turns raw source into formatted source. [`IndentFormatter`]
//!   does this in Rust, [`Gofmt`] shells out to `gofmt`.
//! - [`Process`] rewrites formatted source. [`SortImports`] regroups import
//!   declarations by [`Provenance`].
//! - [`PackageResolver`] finds packages on disk. [`FsResolver`] follows the
//!   GOPATH layout and [`StdPackages`] lists the standard library.
//! - [`Config`] builds all of the above from TOML and the environment.

mod classify;
mod config;
mod formatter;
mod imports;
mod indent;
mod resolver;
pub mod scanner;
mod sort;

pub use classify::{Classifier, Dependency, Provenance, default_name};
pub use config::Config;
pub use formatter::{Formatter, Gofmt, IndentFormatter, Process, format_source};
pub use imports::{ImportDecl, ImportSpec, parse_imports};
pub use indent::Indent;
pub use resolver::{
    FsResolver, PackageResolver, ResolvedPackage, StdPackages, package_clause, package_name,
    source_dir,
};
pub use sort::SortImports;
