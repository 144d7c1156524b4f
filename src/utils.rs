//! Path helpers shared by the detection rules.
//!
//! All path math here is lexical: `.` and `..` are resolved by component
//! without touching the filesystem, so the rules stay pure and identical
//! inputs always produce identical results.

use owo_colors::OwoColorize;
use std::path::{Component, Path, PathBuf};

fn stderr_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Colored `error:` prefix for CLI diagnostics.
pub fn error_prefix() -> String {
    if stderr_colors() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

/// Colored `note:` prefix for CLI diagnostics.
pub fn note_prefix() -> String {
    if stderr_colors() {
        "note:".cyan().to_string()
    } else {
        "note:".to_string()
    }
}

/// Lowercased, forward-slash form used for case-insensitive matching of
/// repository-relative paths.
pub fn normalize_for_match(path: &str) -> String {
    let mut p = path.replace('\\', "/").to_lowercase();
    while let Some(rest) = p.strip_prefix("./") {
        p = rest.to_string();
    }
    p.trim_start_matches('/').to_string()
}

/// Final path component, e.g. `docs/a.md` -> `a.md`.
pub fn filename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Stem of the final component, e.g. `docs/a.md` -> `a`.
pub fn stem(path: &str) -> &str {
    let name = filename(path);
    match name.rsplit_once('.') {
        Some((s, _)) if !s.is_empty() => s,
        _ => name,
    }
}

/// Extension of the final component, without the dot; empty when absent.
pub fn extension(path: &str) -> &str {
    let name = filename(path);
    match name.rsplit_once('.') {
        Some((s, ext)) if !s.is_empty() => ext,
        _ => "",
    }
}

/// Lexically resolve `rel` against an implicit containment root.
///
/// Returns the in-root components, or `None` when a `..` steps above the
/// root (an escape). Absolute components also count as escapes here;
/// callers screen those out up front.
pub fn resolve_within(rel: &Path) -> Option<Vec<String>> {
    let mut out: Vec<String> = Vec::new();
    for comp in rel.components() {
        match comp {
            Component::CurDir => {}
            Component::Normal(c) => out.push(c.to_string_lossy().to_string()),
            Component::ParentDir => {
                if out.pop().is_none() {
                    return None;
                }
            }
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(out)
}

/// Whether `path` stays under `root` after lexical resolution of both.
/// Containment is by whole components, not string prefix.
pub fn is_contained(path: &str, root: &str) -> bool {
    let (Some(p), Some(r)) = (
        resolve_within(Path::new(&path.replace('\\', "/"))),
        resolve_within(Path::new(&root.replace('\\', "/"))),
    ) else {
        return false;
    };
    p.len() >= r.len() && p[..r.len()] == r[..]
}

/// Directory part of a repository-relative file path (may be empty).
pub fn parent_dir(path: &str) -> PathBuf {
    Path::new(path)
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_for_match() {
        assert_eq!(normalize_for_match("Docs\\A.MD"), "docs/a.md");
        assert_eq!(normalize_for_match("./docs/a.md"), "docs/a.md");
        assert_eq!(normalize_for_match("/docs/a.md"), "docs/a.md");
    }

    #[test]
    fn test_stem_and_filename() {
        assert_eq!(filename("docs/guide.md"), "guide.md");
        assert_eq!(stem("docs/guide.md"), "guide");
        assert_eq!(stem("Makefile"), "Makefile");
        assert_eq!(stem(".gitignore"), ".gitignore");
        assert_eq!(extension("docs/guide.md"), "md");
        assert_eq!(extension("Makefile"), "");
        assert_eq!(extension(".gitignore"), "");
    }

    #[test]
    fn test_resolve_within_pops_and_escapes() {
        assert_eq!(
            resolve_within(Path::new("a/b/../c.md")),
            Some(vec!["a".into(), "c.md".into()])
        );
        assert_eq!(resolve_within(Path::new("../../etc/passwd")), None);
        assert_eq!(resolve_within(Path::new("a/../../x")), None);
    }

    #[test]
    fn test_is_contained_by_components() {
        assert!(is_contained("work/sub/file.md", "work"));
        assert!(is_contained("work", "work"));
        // Component containment, not string prefix.
        assert!(!is_contained("workspace/file.md", "work"));
        assert!(!is_contained("other/file.md", "work"));
    }
}
