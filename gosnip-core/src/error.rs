use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for gosnip operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for parse and format failures.
///
/// Holds the offending source and its filename so every external-tool error
/// carries the full text, both as a miette source and as a numbered listing.
///
/// # Example
///
/// ```
/// use gosnip_core::SourceContext;
///
/// let ctx = SourceContext::new("package main\nfunc {", "main.go");
/// let err = ctx.parse_error("unexpected {", Some(18));
/// assert!(err.to_string().contains("\t2\tfunc {"));
/// ```
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// The source with a tab-separated, 1-based line number before each line.
    pub fn listing(&self) -> String {
        numbered_listing(&self.src)
    }

    /// Create a parse error, optionally pointing at a byte offset.
    pub fn parse_error(&self, message: impl Into<String>, offset: Option<usize>) -> Box<Error> {
        Box::new(Error::Parse {
            src: self.named_source(),
            span: offset.map(|at| SourceSpan::from((at.min(self.src.len()), 0))),
            message: message.into(),
            filename: self.filename.clone(),
            listing: self.listing(),
        })
    }

    /// Create a format error.
    pub fn format_error(&self, message: impl Into<String>) -> Box<Error> {
        Box::new(Error::Format {
            src: self.named_source(),
            message: message.into(),
            filename: self.filename.clone(),
            listing: self.listing(),
        })
    }
}

/// Render `src` with `\t<line>\t` prefixes, one entry per line.
pub fn numbered_listing(src: &str) -> String {
    let mut out = String::new();
    for (i, line) in src.split('\n').enumerate() {
        out.push('\t');
        out.push_str(&(i + 1).to_string());
        out.push('\t');
        out.push_str(line);
        out.push('\n');
    }
    out
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("`{name}` is not a valid identifier")]
    #[diagnostic(
        code(gosnip::invalid_identifier),
        help("{reason}. Use only letters, digits, and underscores, and avoid Go keywords and predeclared names.")
    )]
    InvalidIdentifier { name: String, reason: String },

    #[error("{kind} is an unsupported type")]
    #[diagnostic(
        code(gosnip::unsupported_value),
        help("channels and functions have no literal form")
    )]
    UnsupportedValue { kind: String },

    #[error("expression `{template}` has no argument for placeholder {placeholder}")]
    #[diagnostic(code(gosnip::placeholder))]
    Placeholder {
        template: String,
        placeholder: String,
    },

    #[error("go codes parse failed: {message} in {filename}\n{listing}")]
    #[diagnostic(code(gosnip::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
        filename: String,
        listing: String,
    },

    #[error("go codes format failed: {message} in {filename}\n{listing}")]
    #[diagnostic(code(gosnip::format_error))]
    Format {
        #[source_code]
        src: NamedSource<String>,
        message: String,
        filename: String,
        listing: String,
    },

    #[error("failed to access '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{path}': {message}")]
    #[diagnostic(code(gosnip::config))]
    Config { path: PathBuf, message: String },
}

impl Error {
    /// Create an invalid identifier error
    pub fn invalid_identifier(name: impl Into<String>, reason: impl Into<String>) -> Box<Self> {
        Box::new(Error::InvalidIdentifier {
            name: name.into(),
            reason: reason.into(),
        })
    }

    /// Create an unsupported value error
    pub fn unsupported_value(kind: impl Into<String>) -> Box<Self> {
        Box::new(Error::UnsupportedValue { kind: kind.into() })
    }

    /// Create an I/O error for the given path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }

    /// Create a config error
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Box<Self> {
        Box::new(Error::Config {
            path: path.into(),
            message: message.into(),
        })
    }

    /// Whether this error came from parsing or formatting generated source.
    pub fn is_source_error(&self) -> bool {
        matches!(self, Error::Parse { .. } | Error::Format { .. })
    }
}
