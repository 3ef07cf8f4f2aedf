use crate::domain::DomainError;

/// Normalise a workspace path: `/` separators, no leading `./` or `/`, no
/// empty or `.` segments.
///
/// Invariant: the result never escapes the workspace root.
///
/// # Errors
///
/// `InvalidPath` for absolute paths, `..` segments and the empty path.
pub fn normalize_path(path: &str) -> Result<String, DomainError> {
    let invalid = |reason: &str| DomainError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    let unified = path.replace('\\', "/");
    if unified.starts_with('/') || unified.get(1..2) == Some(":") {
        return Err(invalid("absolute paths are not allowed"));
    }

    let mut segments = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => return Err(invalid("'..' would leave the workspace")),
            s => segments.push(s),
        }
    }

    if segments.is_empty() {
        return Err(invalid("path is empty"));
    }
    Ok(segments.join("/"))
}

/// Join two workspace-relative paths.
pub fn join_path(base: &str, relative: &str) -> String {
    let base = base.trim_end_matches('/');
    let relative = relative.trim_start_matches("./").trim_start_matches('/');
    match (base.is_empty() || base == ".", relative.is_empty()) {
        (true, _) => relative.to_string(),
        (false, true) => base.to_string(),
        (false, false) => format!("{base}/{relative}"),
    }
}

/// Parent directory, `""` for top-level entries.
pub fn parent_path(path: &str) -> &str {
    path.rfind('/').map_or("", |i| &path[..i])
}

/// Last path segment.
pub fn file_name(path: &str) -> &str {
    path.rfind('/').map_or(path, |i| &path[i + 1..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_separators_and_dots() {
        assert_eq!(normalize_path("./apps//shop/./src/").unwrap(), "apps/shop/src");
        assert_eq!(normalize_path("apps\\shop\\index.html").unwrap(), "apps/shop/index.html");
    }

    #[test]
    fn rejects_escaping_paths() {
        assert!(normalize_path("/etc/passwd").is_err());
        assert!(normalize_path("C:/x").is_err());
        assert!(normalize_path("apps/../../x").is_err());
        assert!(normalize_path("./").is_err());
    }

    #[test]
    fn join_and_split() {
        assert_eq!(join_path("maui", "src/index.ts"), "maui/src/index.ts");
        assert_eq!(join_path(".", "package.json"), "package.json");
        assert_eq!(join_path("maui/", ""), "maui");
        assert_eq!(parent_path("maui/src/index.ts"), "maui/src");
        assert_eq!(parent_path("package.json"), "");
        assert_eq!(file_name("maui/project.json"), "project.json");
    }
}
