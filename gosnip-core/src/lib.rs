//! Core utilities and types for gosnip.
//!
//! This crate provides the Go naming engine, reserved-word tables, generated
//! file naming, file output, and the error type shared across the gosnip
//! crates.

mod error;
mod file;
mod naming;
mod paths;

// Errors
pub use error::{Error, Result, SourceContext, numbered_listing};
// File operations
pub use file::{OutputFile, write_file};
// Naming
pub use naming::{
    GO_NAMING, GoNaming, is_decimal_digit, is_letter, lower_camel_case, lower_snake_case,
    split_bytes_to_words, split_to_words, upper_camel_case, upper_snake_case,
};
pub use paths::{
    GENERATED_MARKER, GO_EXTENSION, GO_TEST_SUFFIX, generated_file_name, is_go_file,
    is_go_test_file,
};
