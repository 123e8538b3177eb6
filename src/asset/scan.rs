//! Source tree scanning (pure, no side effects).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Relative paths found under a source root.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SourceTree {
    /// Regular files, relative to the root.
    pub files: Vec<PathBuf>,
    /// Directories, relative to the root, each listed before its descendants.
    pub dirs: Vec<PathBuf>,
}

/// Scan `root` recursively and return every file and directory below it.
///
/// Traversal is depth-first with an explicit stack of pending directory
/// listings, so deep trees don't grow the call stack. Order matches a
/// recursive walk: a directory is recorded, then everything inside it,
/// then its next sibling. Siblings are visited in file name order.
///
/// Entry types come from `DirEntry::file_type`, which does not follow
/// symlinks: a link to a directory is reported as a file.
///
/// Fails if any directory can't be read.
pub fn scan_source_tree(root: &Path) -> Result<SourceTree> {
    let mut tree = SourceTree::default();
    let mut stack = vec![read_sorted(root, PathBuf::new())?];

    while let Some(frame) = stack.last_mut() {
        let Some((rel, is_dir)) = frame.next() else {
            stack.pop();
            continue;
        };

        if is_dir {
            tree.dirs.push(rel.clone());
            let listing = read_sorted(&root.join(&rel), rel)?;
            stack.push(listing);
        } else {
            tree.files.push(rel);
        }
    }

    Ok(tree)
}

/// Read one directory, returning its entries as `(relative path, is_dir)`.
fn read_sorted(dir: &Path, prefix: PathBuf) -> Result<std::vec::IntoIter<(PathBuf, bool)>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to read directory `{}`", dir.display()))?;

    let mut listing = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read entry in `{}`", dir.display()))?;
        let file_type = entry
            .file_type()
            .with_context(|| format!("failed to stat `{}`", entry.path().display()))?;
        listing.push((prefix.join(entry.file_name()), file_type.is_dir()));
    }
    listing.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(listing.into_iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, rel).unwrap();
    }

    #[test]
    fn test_scan_empty() {
        let dir = TempDir::new().unwrap();
        let tree = scan_source_tree(dir.path()).unwrap();
        assert!(tree.files.is_empty());
        assert!(tree.dirs.is_empty());
    }

    #[test]
    fn test_scan_flat() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b.css");
        touch(dir.path(), "a.html");

        let tree = scan_source_tree(dir.path()).unwrap();
        assert_eq!(
            tree.files,
            vec![PathBuf::from("a.html"), PathBuf::from("b.css")]
        );
        assert!(tree.dirs.is_empty());
    }

    #[test]
    fn test_scan_preorder() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a/x.js");
        touch(dir.path(), "a/b/y.js");
        touch(dir.path(), "c.html");
        fs::create_dir_all(dir.path().join("d/empty")).unwrap();

        let tree = scan_source_tree(dir.path()).unwrap();

        assert_eq!(
            tree.dirs,
            vec![
                PathBuf::from("a"),
                PathBuf::from("a/b"),
                PathBuf::from("d"),
                PathBuf::from("d/empty"),
            ]
        );
        // Files below a directory come before that directory's later siblings
        assert_eq!(
            tree.files,
            vec![
                PathBuf::from("a/b/y.js"),
                PathBuf::from("a/x.js"),
                PathBuf::from("c.html"),
            ]
        );
    }

    #[test]
    fn test_scan_deep() {
        let dir = TempDir::new().unwrap();
        let deep: PathBuf = (0..64).map(|i| format!("d{i}")).collect();
        fs::create_dir_all(dir.path().join(&deep)).unwrap();
        fs::write(dir.path().join(&deep).join("leaf.txt"), "leaf").unwrap();

        let tree = scan_source_tree(dir.path()).unwrap();
        assert_eq!(tree.dirs.len(), 64);
        assert_eq!(tree.files, vec![deep.join("leaf.txt")]);
    }

    #[test]
    fn test_scan_missing_root() {
        let dir = TempDir::new().unwrap();
        let err = scan_source_tree(&dir.path().join("missing")).unwrap_err();
        assert!(err.to_string().contains("failed to read directory"));
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_symlink_to_dir_is_file() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "real/a.txt");
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("link")).unwrap();

        let tree = scan_source_tree(dir.path()).unwrap();
        assert_eq!(tree.dirs, vec![PathBuf::from("real")]);
        assert!(tree.files.contains(&PathBuf::from("link")));
    }
}
