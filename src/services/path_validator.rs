// Path Validation
// Keeps client-supplied file names inside the downloads directory

use std::path::{Path, PathBuf};

/// Sanitize a filename to prevent directory traversal.
/// Removes any path separators and '..' sequences.
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .replace(['/', '\\'], "_")
        .replace("..", "_")
        .trim()
        .to_string()
}

/// Join a client-supplied name onto `dir`, falling back to `default_name` when
/// nothing usable is left, and forcing the given extension.
pub fn safe_join(dir: &Path, requested: Option<&str>, default_name: &str, extension: &str) -> PathBuf {
    let mut name = requested.map(sanitize_filename).unwrap_or_default();
    if name.is_empty() || name.starts_with('.') {
        name = default_name.to_string();
    }

    let mut path = dir.join(name);
    if path.extension().and_then(|ext| ext.to_str()) != Some(extension) {
        let with_ext = format!(
            "{}.{extension}",
            path.file_name().and_then(|n| n.to_str()).unwrap_or(default_name)
        );
        path.set_file_name(with_ext);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "____etc_passwd");
        assert_eq!(sanitize_filename(" badge.svg "), "badge.svg");
        assert_eq!(sanitize_filename("a\\b"), "a_b");
    }

    #[test]
    fn test_safe_join_stays_in_dir() {
        let dir = Path::new("/data/downloads");
        assert_eq!(safe_join(dir, None, "badge.svg", "svg"), dir.join("badge.svg"));
        assert_eq!(safe_join(dir, Some("../x"), "badge.svg", "svg"), dir.join("__x.svg"));
        assert_eq!(safe_join(dir, Some("stars"), "badge.svg", "svg"), dir.join("stars.svg"));
        assert_eq!(safe_join(dir, Some(".hidden"), "badge.svg", "svg"), dir.join("badge.svg"));
        assert_eq!(safe_join(dir, Some("  "), "badge.svg", "svg"), dir.join("badge.svg"));
    }
}
