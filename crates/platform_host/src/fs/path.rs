//! Virtual-path helpers shared by the runtime and gateway adapters.

/// Normalizes a browsing path.
///
/// Trims whitespace, converts backslashes to `/`, resolves `.`/`..`, ensures a leading slash and
/// returns `/` for empty or fully-collapsed paths.
pub fn normalize_virtual_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return "/".to_string();
    }

    let mut out = String::new();
    for segment in trimmed.replace('\\', "/").split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if let Some(idx) = out.rfind('/') {
                    out.truncate(idx);
                }
            }
            _ => {
                out.push('/');
                out.push_str(segment);
            }
        }
    }

    if out.is_empty() {
        "/".to_string()
    } else {
        out
    }
}

/// Returns the parent of a normalized path; `/` is its own parent.
pub fn parent_path(path: &str) -> String {
    match path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => path[..idx].to_string(),
    }
}

/// Joins a child name onto a directory path.
pub fn join_path(dir: &str, name: &str) -> String {
    if dir == "/" {
        format!("/{name}")
    } else {
        format!("{}/{name}", dir.trim_end_matches('/'))
    }
}

/// Returns the final segment of a path, or `""` at the root.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or_default()
}

/// Splits a normalized path into its non-empty segments.
pub fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_virtual_path_matches_expected_cases() {
        let cases = [
            ("", "/"),
            ("  ", "/"),
            ("media/movies", "/media/movies"),
            ("/media//movies/", "/media/movies"),
            ("./media/../docs", "/docs"),
            ("\\media\\movies", "/media/movies"),
            ("/../..", "/"),
        ];

        for (input, expected) in cases {
            assert_eq!(normalize_virtual_path(input), expected, "input={input:?}");
        }
    }

    #[test]
    fn parent_and_join_walk_the_tree() {
        assert_eq!(parent_path("/media/movies"), "/media");
        assert_eq!(parent_path("/media"), "/");
        assert_eq!(parent_path("/"), "/");
        assert_eq!(join_path("/", "docs"), "/docs");
        assert_eq!(join_path("/docs", "a.txt"), "/docs/a.txt");
    }

    #[test]
    fn file_name_and_segments() {
        assert_eq!(file_name("/docs/a.txt"), "a.txt");
        assert_eq!(file_name("/"), "");
        assert_eq!(path_segments("/docs/2024/a.txt"), vec!["docs", "2024", "a.txt"]);
        assert!(path_segments("/").is_empty());
    }
}
