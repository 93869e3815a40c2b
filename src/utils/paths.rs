use std::path::{Component, Path, PathBuf};

/// Resolve a caller-supplied path against the session root, lexically.
///
/// Absolute inputs pass through untouched; relative inputs are joined onto
/// `base` and normalized. No filesystem access happens here, so unresolved
/// paths to files that do not exist yet resolve the same as existing ones.
pub fn resolve_lexical(base: &Path, input: &str) -> PathBuf {
    let path = Path::new(input);

    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        // Remove leading "./" if present
        let input = input.strip_prefix("./").unwrap_or(input);
        base.join(input)
    };

    normalize(&joined)
}

/// Collapse `.` and `..` components. `base` is always absolute, so a `..`
/// that reaches the root is simply dropped.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
