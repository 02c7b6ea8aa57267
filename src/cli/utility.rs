//! Shared helpers for CLI commands

/// Filter remote data paths against a requested path.
///
/// A pattern ending in `/` selects everything under that prefix; anything
/// else is matched as a `*`/`?` wildcard pattern against the whole path.
pub fn filter_data(data_paths: Vec<String>, remote_path: &str) -> Vec<String> {
    if remote_path.ends_with('/') {
        data_paths
            .into_iter()
            .filter(|path| path.starts_with(remote_path))
            .collect()
    } else {
        data_paths
            .into_iter()
            .filter(|path| wildcard_match(remote_path, path))
            .collect()
    }
}

/// Glob-style match: `*` spans any run of characters, `?` exactly one.
///
/// Iterative two-pointer scan with backtracking to the last `*`; no
/// character classes, separators are not special.
pub fn wildcard_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let (mut p, mut t) = (0, 0);
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && (pattern[p] == '?' || pattern[p] == text[t]) {
            p += 1;
            t += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            star = Some((p, t));
            p += 1;
        } else if let Some((star_p, star_t)) = star {
            // Last '*' absorbs one more character
            p = star_p + 1;
            t = star_t + 1;
            star = Some((star_p, star_t + 1));
        } else {
            return false;
        }
    }
    while p < pattern.len() && pattern[p] == '*' {
        p += 1;
    }
    p == pattern.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_match() {
        assert!(wildcard_match("*.jpg", "img000001.jpg"));
        assert!(wildcard_match("img00000?.jpg", "img000001.jpg"));
        assert!(wildcard_match("folder/*", "folder/a/b.jpg"));
        assert!(wildcard_match("a*b*c", "a-x-b-y-c"));
        assert!(!wildcard_match("*.png", "img000001.jpg"));
        assert!(!wildcard_match("img?.jpg", "img01.jpg"));
        assert!(wildcard_match("exact.txt", "exact.txt"));
        assert!(!wildcard_match("exact.txt", "exact.txt.bak"));
    }

    #[test]
    fn test_filter_data_prefix() {
        let paths = vec![
            "train/a.jpg".to_string(),
            "train/b.jpg".to_string(),
            "val/a.jpg".to_string(),
        ];
        assert_eq!(
            filter_data(paths, "train/"),
            vec!["train/a.jpg".to_string(), "train/b.jpg".to_string()]
        );
    }

    #[test]
    fn test_filter_data_glob() {
        let paths = vec![
            "train/a.jpg".to_string(),
            "train/b.png".to_string(),
            "val/c.jpg".to_string(),
        ];
        assert_eq!(
            filter_data(paths, "*.jpg"),
            vec!["train/a.jpg".to_string(), "val/c.jpg".to_string()]
        );
    }

    #[test]
    fn test_filter_data_exact() {
        let paths = vec!["train/a.jpg".to_string(), "train/ab.jpg".to_string()];
        assert_eq!(
            filter_data(paths, "train/a.jpg"),
            vec!["train/a.jpg".to_string()]
        );
    }
}
