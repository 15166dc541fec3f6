//! Template identifier resolution.
//! Maps a file reference to a concrete path under the configured source
//! root, applying the canonical suffix. Pure path arithmetic; the
//! filesystem is never consulted here, so a malformed reference simply
//! yields a path that fails later at the filesystem boundary.

use std::path::{Path, PathBuf};

/// Resolves a template reference to a concrete source path.
///
/// Appends `suffix` unless the reference already ends with it, then
/// joins the result onto `source_root` unless it is already absolute.
pub fn resolve_source_path(file: &str, source_root: &Path, suffix: &str) -> PathBuf {
    let mut resolved = file.to_string();
    if !resolved.ends_with(suffix) {
        resolved.push_str(suffix);
    }

    let resolved = PathBuf::from(resolved);
    if resolved.is_absolute() {
        resolved
    } else {
        source_root.join(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_suffix_and_joins_root() {
        let path = resolve_source_path("page", Path::new("/srv/templates"), ".ftl");
        assert_eq!(path, PathBuf::from("/srv/templates/page.ftl"));
    }

    #[test]
    fn test_keeps_existing_suffix() {
        let path = resolve_source_path("page.ftl", Path::new("/srv/templates"), ".ftl");
        assert_eq!(path, PathBuf::from("/srv/templates/page.ftl"));
    }

    #[test]
    fn test_absolute_reference_ignores_root() {
        let path = resolve_source_path("/var/page", Path::new("/srv/templates"), ".ftl");
        assert_eq!(path, PathBuf::from("/var/page.ftl"));
    }
}
