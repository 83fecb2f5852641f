//! Locating font files by name.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{FontError, Result};

/// Environment variable holding extra font directories, separated like
/// `PATH`.
pub const FONT_PATH_VAR: &str = "TESSERA_FONT_PATH";

/// Ordered list of directories searched for font files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPaths {
    pub dirs: Vec<PathBuf>,
}

impl SearchPaths {
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    /// Directories listed in `TESSERA_FONT_PATH`; empty if it is unset.
    pub fn from_env() -> Self {
        match env::var_os(FONT_PATH_VAR) {
            Some(value) => Self::new(env::split_paths(&value)),
            None => Self::default(),
        }
    }

    /// The usual font directories of the host system.
    pub fn system() -> Self {
        let mut dirs = Vec::new();
        if cfg!(target_os = "windows") {
            if let Some(windir) = env::var_os("WINDIR") {
                dirs.push(PathBuf::from(windir).join("Fonts"));
            }
        } else if cfg!(target_os = "macos") {
            dirs.push(PathBuf::from("/System/Library/Fonts"));
            dirs.push(PathBuf::from("/Library/Fonts"));
            if let Some(home) = env::var_os("HOME") {
                dirs.push(PathBuf::from(home).join("Library/Fonts"));
            }
        } else {
            dirs.push(PathBuf::from("/usr/share/fonts"));
            dirs.push(PathBuf::from("/usr/local/share/fonts"));
            if let Some(home) = env::var_os("HOME") {
                let home = PathBuf::from(home);
                dirs.push(home.join(".fonts"));
                dirs.push(home.join(".local/share/fonts"));
            }
        }
        Self { dirs }
    }

    pub fn push(&mut self, dir: impl Into<PathBuf>) {
        self.dirs.push(dir.into());
    }

    /// Appends the directories of `other` after this list's own.
    pub fn extend(&mut self, other: SearchPaths) {
        self.dirs.extend(other.dirs);
    }

    /// Resolves `name` to a font file.
    ///
    /// A name that already points at a file is returned as-is. Otherwise a
    /// missing extension defaults to `.ttf` and the directories are scanned
    /// recursively in order; the first match wins.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        if name.trim().is_empty() {
            return Err(FontError::EmptyName);
        }
        let path = Path::new(name);
        if path.is_file() {
            return Ok(path.to_path_buf());
        }

        let mut file_name = PathBuf::from(name);
        if file_name.extension().is_none() {
            file_name.set_extension("ttf");
        }
        if file_name.is_file() {
            return Ok(file_name);
        }

        for dir in &self.dirs {
            if let Some(found) = find_in(dir, &file_name) {
                log::debug!("resolved font '{name}' to {}", found.display());
                return Ok(found);
            }
        }
        Err(FontError::FontNotFound(file_name))
    }
}

/// Depth-first search for `name` (possibly with subdirectories) below `dir`.
/// Unreadable directories are skipped.
fn find_in(dir: &Path, name: &Path) -> Option<PathBuf> {
    let candidate = dir.join(name);
    if candidate.is_file() {
        return Some(candidate);
    }

    let mut subdirs: Vec<PathBuf> = std::fs::read_dir(dir)
        .ok()?
        .flatten()
        .map(|entry| entry.path())
        .filter(|p| p.is_dir())
        .collect();
    // read_dir order is platform dependent
    subdirs.sort();
    subdirs.iter().find_map(|sub| find_in(sub, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    struct TempDir(PathBuf);

    impl TempDir {
        fn new(tag: &str) -> Self {
            let dir = env::temp_dir().join(format!("tessera-search-{tag}-{}", std::process::id()));
            let _ = fs::remove_dir_all(&dir);
            fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        fn touch(&self, rel: &str) -> PathBuf {
            let path = self.0.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, b"font").unwrap();
            path
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn empty_name_is_rejected() {
        let paths = SearchPaths::default();
        assert!(matches!(paths.resolve(""), Err(FontError::EmptyName)));
        assert!(matches!(paths.resolve("  "), Err(FontError::EmptyName)));
    }

    #[test]
    fn exact_path_is_used_verbatim() {
        let tmp = TempDir::new("exact");
        let file = tmp.touch("Custom.otf");
        let found = SearchPaths::default().resolve(file.to_str().unwrap()).unwrap();
        assert_eq!(found, file);
    }

    #[test]
    fn scans_directories_recursively_in_order() {
        let first = TempDir::new("first");
        let second = TempDir::new("second");
        let nested = first.touch("truetype/dejavu/Sans.ttf");
        second.touch("Sans.ttf");

        let paths = SearchPaths::new([&first.0, &second.0]);
        assert_eq!(paths.resolve("Sans").unwrap(), nested);

        let paths = SearchPaths::new([&second.0, &first.0]);
        assert_eq!(paths.resolve("Sans.ttf").unwrap(), second.0.join("Sans.ttf"));
    }

    #[test]
    fn missing_font_reports_the_file_name() {
        let tmp = TempDir::new("missing");
        let paths = SearchPaths::new([&tmp.0]);
        match paths.resolve("Nope") {
            Err(FontError::FontNotFound(name)) => assert_eq!(name, PathBuf::from("Nope.ttf")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn missing_directories_are_skipped() {
        let tmp = TempDir::new("skip");
        let file = tmp.touch("Mono.ttf");
        let paths = SearchPaths::new([tmp.0.join("does-not-exist"), tmp.0.clone()]);
        assert_eq!(paths.resolve("Mono").unwrap(), file);
    }

    #[test]
    fn system_dirs_are_plain_values() {
        let mut paths = SearchPaths::system();
        let before = paths.dirs.len();
        paths.push("/opt/fonts");
        assert_eq!(paths.dirs.len(), before + 1);
    }
}
