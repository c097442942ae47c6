//! Path normalization for file identity
//!
//! All operations are lexical: nothing here touches the filesystem, so a
//! file that no longer exists still maps to the same key.

use std::path::{Component, Path, PathBuf};

/// Resolve `path` against `cwd` when it is relative, then normalize it.
pub fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&cwd.join(path))
    }
}

/// Remove `.` segments and fold `..` into the preceding segment.
///
/// A `..` that would climb above the root of an absolute path is dropped;
/// leading `..` segments of a relative path are kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    parts.iter().map(|c| c.as_os_str()).collect()
}

/// Path of `target` as seen from the directory `base`.
///
/// Both inputs should already be absolute and normalized. The result may
/// start with `..` when `target` lies outside `base`; an empty path means
/// the two are equal.
pub fn relative_to(base: &Path, target: &Path) -> PathBuf {
    let base: Vec<Component> = base.components().collect();
    let target: Vec<Component> = target.components().collect();

    let common = base
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for _ in common..base.len() {
        out.push("..");
    }
    for component in &target[common..] {
        out.push(component.as_os_str());
    }
    out
}

/// Render a relative path as a store key: `/`-separated, `.` for the root.
pub fn to_key(relative: &Path) -> String {
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize(Path::new("/../x")), PathBuf::from("/x"));
        assert_eq!(normalize(Path::new("../x/./y")), PathBuf::from("../x/y"));
        assert_eq!(normalize(Path::new("a/b/../../..")), PathBuf::from(".."));
    }

    #[test]
    fn test_absolutize() {
        let cwd = Path::new("/home/me/project");
        assert_eq!(absolutize(Path::new("src/../README.md"), cwd), PathBuf::from("/home/me/project/README.md"));
        assert_eq!(absolutize(Path::new("/etc/hosts"), cwd), PathBuf::from("/etc/hosts"));
    }

    #[test]
    fn test_relative_to() {
        let base = Path::new("/home/me/project");
        assert_eq!(relative_to(base, Path::new("/home/me/project/docs/a.md")), PathBuf::from("docs/a.md"));
        assert_eq!(relative_to(base, Path::new("/home/me/other/b.md")), PathBuf::from("../other/b.md"));
        assert_eq!(relative_to(base, base), PathBuf::new());
    }

    #[test]
    fn test_to_key() {
        assert_eq!(to_key(Path::new("docs/a.md")), "docs/a.md");
        assert_eq!(to_key(Path::new("../x")), "../x");
        assert_eq!(to_key(Path::new("")), ".");
    }
}
