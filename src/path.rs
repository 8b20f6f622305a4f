//! Path normalization.
//!
//! Route templates and request paths are normalized identically before any
//! comparison, so `/users` and `/users/` always refer to the same route.

/// Normalize a path for matching.
///
/// - surrounding whitespace is trimmed
/// - an empty path becomes `/`
/// - a missing leading slash is prepended
/// - a trailing slash is stripped, except for the root path `/`
///
/// ```rust
/// use pathrouter::path::normalize;
///
/// assert_eq!(normalize("/users/"), "/users");
/// assert_eq!(normalize("users"), "/users");
/// assert_eq!(normalize("  /  "), "/");
/// assert_eq!(normalize(""), "/");
/// ```
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();

    let mut path = String::with_capacity(trimmed.len() + 1);
    if !trimmed.starts_with('/') {
        path.push('/');
    }
    path.push_str(trimmed);

    while path.len() > 1 && path.ends_with('/') {
        path.pop();
    }

    path
}

/// Split a normalized path into its segments.
///
/// The root path `/` has zero segments.
pub(crate) fn segments(normalized: &str) -> Vec<&str> {
    if normalized == "/" {
        return Vec::new();
    }

    let rest = normalized.get(1..).unwrap_or("");
    rest.split('/').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_table() {
        let cases = vec![
            // already normalized
            ("/", "/"),
            ("/abc", "/abc"),
            ("/a/b/c", "/a/b/c"),
            // trailing slash
            ("/abc/", "/abc"),
            ("/a/b/c/", "/a/b/c"),
            // root is preserved, never collapsed to ""
            ("/", "/"),
            ("", "/"),
            ("   ", "/"),
            // missing leading slash
            ("abc", "/abc"),
            ("a/b/c", "/a/b/c"),
            ("abc/", "/abc"),
            // whitespace
            ("  /users  ", "/users"),
            ("\t/users/\n", "/users"),
        ];

        for (raw, want) in cases {
            assert_eq!(normalize(raw), want, "normalize({:?})", raw);
        }
    }

    #[test]
    fn root_has_no_segments() {
        assert!(segments("/").is_empty());
    }

    #[test]
    fn segments_split_on_slash() {
        assert_eq!(segments("/users/42/posts"), vec!["users", "42", "posts"]);
    }

    #[test]
    fn doubled_slash_yields_empty_segment() {
        // inner empty segments are kept; they can never match a literal or
        // a variable, so `/users//5` does not match `/users/{id}`
        assert_eq!(segments("/users//5"), vec!["users", "", "5"]);
    }
}
