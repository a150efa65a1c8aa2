//! Filesystem helpers shared by the registry and the scaffolder

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

/// Recursively copy `src` into `dest`, skipping any directory whose name
/// appears in `exclude` (the whole subtree under it is left behind).
///
/// `dest` and missing intermediate directories are created as needed.
/// Exclusion is applied while walking, so an excluded subtree is never
/// partially copied.
pub fn copy_tree(src: &Path, dest: &Path, exclude: &[&str]) -> io::Result<()> {
    let walker = WalkDir::new(src).into_iter().filter_entry(|entry| {
        entry.depth() == 0 || !(entry.file_type().is_dir() && is_excluded(entry.path(), exclude))
    });

    for entry in walker {
        let entry = entry.map_err(io::Error::other)?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .expect("walkdir yields paths under its root");
        let target = dest.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }

    Ok(())
}

fn is_excluded(path: &Path, exclude: &[&str]) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| exclude.contains(&name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn copies_nested_files() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src");
        let dest = temp.path().join("dest");
        fs::create_dir_all(src.join("a/b")).unwrap();
        fs::write(src.join("top.txt"), "top").unwrap();
        fs::write(src.join("a/b/deep.txt"), "deep").unwrap();

        copy_tree(&src, &dest, &[]).unwrap();

        assert_eq!(fs::read_to_string(dest.join("top.txt")).unwrap(), "top");
        assert_eq!(fs::read_to_string(dest.join("a/b/deep.txt")).unwrap(), "deep");
    }

    #[test]
    fn excluded_directories_are_never_entered() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src");
        let dest = temp.path().join("dest");
        fs::create_dir_all(src.join("node_modules/pkg")).unwrap();
        fs::create_dir_all(src.join("lib")).unwrap();
        fs::write(src.join("node_modules/pkg/index.js"), "x").unwrap();
        fs::write(src.join("lib/ok.js"), "ok").unwrap();

        copy_tree(&src, &dest, &["node_modules"]).unwrap();

        assert!(!dest.join("node_modules").exists());
        assert!(dest.join("lib/ok.js").exists());
    }

    #[test]
    fn excluded_name_only_applies_to_directories() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("src");
        let dest = temp.path().join("dest");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("target"), "a plain file named target").unwrap();

        copy_tree(&src, &dest, &["target"]).unwrap();

        assert!(dest.join("target").is_file());
    }

    #[test]
    fn root_itself_is_not_subject_to_exclusion() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("node_modules");
        let dest = temp.path().join("dest");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("keep.txt"), "keep").unwrap();

        copy_tree(&src, &dest, &["node_modules"]).unwrap();

        assert!(dest.join("keep.txt").exists());
    }
}
