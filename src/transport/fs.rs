use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::constants::source::JSON_EXTENSIONS;

/// Filesystem transport that lists JSON document files under a root.
pub struct FileStream {
    root: PathBuf,
    follow_links: bool,
}

impl FileStream {
    /// Create a stream rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_links: false,
        }
    }

    /// Configure symlink traversal.
    pub fn with_follow_symlinks(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    /// Return every JSON document file under the root, sorted by path.
    ///
    /// A root that is itself a file is returned as-is regardless of extension.
    pub fn json_files(&self) -> io::Result<Vec<PathBuf>> {
        if self.root.is_file() {
            return Ok(vec![self.root.clone()]);
        }
        let mut walker = WalkDir::new(&self.root);
        if self.follow_links {
            walker = walker.follow_links(true);
        }
        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(io::Error::from)?;
            if entry.file_type().is_file() && is_json_file(entry.path()) {
                files.push(entry.path().to_path_buf());
            }
        }
        files.sort();
        Ok(files)
    }
}

/// True if the path has a `.jsonl` or `.json` extension (case-insensitive).
pub fn is_json_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            JSON_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn is_json_file_matches_known_extensions() {
        assert!(is_json_file(Path::new("a/videos.jsonl")));
        assert!(is_json_file(Path::new("a/videos.JSON")));
        assert!(!is_json_file(Path::new("a/videos.csv")));
        assert!(!is_json_file(Path::new("a/videos")));
    }

    #[test]
    fn json_files_are_sorted_and_filtered() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.jsonl"), "").unwrap();
        fs::write(dir.path().join("a.json"), "[]").unwrap();
        fs::write(dir.path().join("nested/c.jsonl"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "skip").unwrap();

        let files = FileStream::new(dir.path()).json_files().unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|path| {
                path.strip_prefix(dir.path())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        assert_eq!(names, vec!["a.json", "b.jsonl", "nested/c.jsonl"]);
    }

    #[test]
    fn file_root_is_returned_directly() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("export.ndjson");
        fs::write(&path, "").unwrap();
        let files = FileStream::new(&path).json_files().unwrap();
        assert_eq!(files, vec![path]);
    }

    #[test]
    fn missing_root_is_an_io_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");
        assert!(FileStream::new(missing).json_files().is_err());
    }
}
