//! Filename conventions for generated Go files.

/// Marker inserted before the extension of generated files.
pub const GENERATED_MARKER: &str = "__generated";

/// Extension of Go source files.
pub const GO_EXTENSION: &str = ".go";

/// Suffix of Go test files.
pub const GO_TEST_SUFFIX: &str = "_test.go";

/// Check if a filename has the `.go` extension.
pub fn is_go_file(filename: &str) -> bool {
    extension(base_name(filename)) == GO_EXTENSION
}

/// Check if a filename is a Go test file.
pub fn is_go_test_file(filename: &str) -> bool {
    base_name(filename).ends_with(GO_TEST_SUFFIX)
}

/// Derive the name of the generated sibling of a hand-written file.
///
/// ```
/// use gosnip_core::generated_file_name;
///
/// assert_eq!(generated_file_name("./main.go"), "./main__generated.go");
/// assert_eq!(generated_file_name("./main_test.go"), "./main__generated_test.go");
/// ```
pub fn generated_file_name(filename: &str) -> String {
    let dir = dir_name(filename);
    let base = base_name(filename);

    let base = if is_go_file(filename) && is_go_test_file(filename) {
        let stem = &base[..base.len() - GO_TEST_SUFFIX.len()];
        format!("{stem}{GENERATED_MARKER}{GO_TEST_SUFFIX}")
    } else {
        let ext = extension(base);
        let stem = &base[..base.len() - ext.len()];
        format!("{stem}{GENERATED_MARKER}{ext}")
    };

    if dir.ends_with('/') {
        format!("{dir}{base}")
    } else {
        format!("{dir}/{base}")
    }
}

fn base_name(filename: &str) -> &str {
    match filename.rfind('/') {
        Some(idx) => &filename[idx + 1..],
        None => filename,
    }
}

fn dir_name(filename: &str) -> &str {
    match filename.rfind('/') {
        Some(0) => "/",
        Some(idx) => &filename[..idx],
        None => ".",
    }
}

fn extension(base: &str) -> &str {
    match base.rfind('.') {
        Some(idx) => &base[idx..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_file_name() {
        assert_eq!(generated_file_name("./main.go"), "./main__generated.go");
        assert_eq!(generated_file_name("./main_test.go"), "./main__generated_test.go");
        assert_eq!(generated_file_name("main.go"), "./main__generated.go");
        assert_eq!(
            generated_file_name("pkg/enums/status.go"),
            "pkg/enums/status__generated.go"
        );
        assert_eq!(generated_file_name("/main.go"), "/main__generated.go");
        assert_eq!(generated_file_name("./Makefile"), "./Makefile__generated");
    }

    #[test]
    fn test_go_file_detection() {
        assert!(is_go_file("a/b/c.go"));
        assert!(!is_go_file("a/b/c.go.txt"));
        assert!(is_go_test_file("a/b/c_test.go"));
        assert!(!is_go_test_file("a/b_test/c.go"));
    }
}
