use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

/// Directory searched when the shell starts.
pub const DEFAULT_SEARCH_DIR: &str = "/bin";

/// Ordered directories used to resolve external command names.
///
/// Entries are stored verbatim: no deduplication, no normalization. The only
/// mutation is a full [`replace`](PathList::replace).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathList {
    dirs: Vec<String>,
}

impl Default for PathList {
    fn default() -> Self {
        Self::new()
    }
}

impl PathList {
    pub fn new() -> Self {
        Self {
            dirs: vec![DEFAULT_SEARCH_DIR.to_string()],
        }
    }

    pub fn replace<I, S>(&mut self, dirs: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dirs = dirs.into_iter().map(Into::into).collect();
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.dirs.iter().map(String::as_str)
    }

    /// Returns `<dir>/<name>` for the first directory holding an executable
    /// file called `name`.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        self.dirs
            .iter()
            .map(|dir| PathBuf::from(format!("{}/{}", dir, name)))
            .inspect(|candidate| tracing::trace!(candidate = %candidate.display(), "probing"))
            .find(|candidate| is_executable(candidate))
    }
}

/// A regular file (after following symlinks) the current user may execute.
pub fn is_executable(path: &Path) -> bool {
    let is_file = path.metadata().map(|m| m.is_file()).unwrap_or(false);
    if !is_file {
        return false;
    }
    match CString::new(path.as_os_str().as_bytes()) {
        // SAFETY: `c_path` is a valid NUL-terminated string for the call.
        Ok(c_path) => unsafe { libc::access(c_path.as_ptr(), libc::X_OK) == 0 },
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("wish_path_list_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_program(dir: &Path, name: &str, mode: u32) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
        path
    }

    #[test]
    fn test_default_entry() {
        let paths = PathList::new();
        assert_eq!(paths.iter().collect::<Vec<_>>(), [DEFAULT_SEARCH_DIR]);
        assert!(!paths.is_empty());
    }

    #[test]
    fn test_replace_discards_previous_entries() {
        let mut paths = PathList::new();
        paths.replace(["/a", "/b", "/a"]);
        assert_eq!(paths.iter().collect::<Vec<_>>(), ["/a", "/b", "/a"]);

        paths.replace(Vec::<String>::new());
        assert!(paths.is_empty());
        assert_eq!(paths.len(), 0);
    }

    #[test]
    fn test_resolve_first_match_wins() {
        let first = scratch_dir("first");
        let second = scratch_dir("second");
        let empty = scratch_dir("empty");
        write_program(&first, "tool", 0o755);
        write_program(&second, "tool", 0o755);

        let mut paths = PathList::new();
        paths.replace([
            empty.to_str().unwrap(),
            first.to_str().unwrap(),
            second.to_str().unwrap(),
        ]);
        assert_eq!(
            paths.resolve("tool"),
            Some(PathBuf::from(format!("{}/tool", first.display())))
        );

        paths.replace([second.to_str().unwrap(), first.to_str().unwrap()]);
        assert_eq!(
            paths.resolve("tool"),
            Some(PathBuf::from(format!("{}/tool", second.display())))
        );
    }

    #[test]
    fn test_resolve_skips_non_executables_and_dirs() {
        let dir = scratch_dir("skips");
        write_program(&dir, "plain", 0o644);
        fs::create_dir_all(dir.join("subdir")).unwrap();

        let mut paths = PathList::new();
        paths.replace([dir.to_str().unwrap()]);
        assert_eq!(paths.resolve("plain"), None);
        assert_eq!(paths.resolve("subdir"), None);
        assert_eq!(paths.resolve("missing"), None);
    }

    #[test]
    fn test_resolve_never_touches_old_entries() {
        let dir = scratch_dir("old");
        write_program(&dir, "only_here", 0o755);

        let mut paths = PathList::new();
        paths.replace([dir.to_str().unwrap()]);
        assert!(paths.resolve("only_here").is_some());

        paths.replace(["/nonexistent/wish/dir"]);
        assert_eq!(paths.resolve("only_here"), None);
    }
}
