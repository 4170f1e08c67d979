use crate::error::ShellError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const RC_FILE: &str = ".wishrc";
const HISTORY_FILE: &str = ".wish_history";

/// Per-user files read by an interactive shell.
#[derive(Debug, Clone, Default)]
pub struct Config {
    rc_path: Option<PathBuf>,
    history_path: Option<PathBuf>,
}

impl Config {
    /// Locates the files under the home directory. Without a home
    /// directory there is no rc file and no persistent history.
    pub fn new() -> Self {
        match dirs::home_dir() {
            Some(home) => Self::with_home(&home),
            None => Self::default(),
        }
    }

    pub fn with_home(home: &Path) -> Self {
        Config {
            rc_path: Some(home.join(RC_FILE)),
            history_path: Some(home.join(HISTORY_FILE)),
        }
    }

    pub fn history_path(&self) -> Option<&Path> {
        self.history_path.as_deref()
    }

    /// Lines of the rc file, skipping blanks and `#` comments. A missing
    /// file yields no lines.
    pub fn rc_lines(&self) -> Result<Vec<String>, ShellError> {
        let Some(path) = &self.rc_path else {
            return Ok(Vec::new());
        };
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_owned)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_home(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("wish_config_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_paths_under_home() {
        let config = Config::with_home(Path::new("/home/testuser"));
        assert_eq!(
            config.history_path(),
            Some(Path::new("/home/testuser/.wish_history"))
        );
    }

    #[test]
    fn test_missing_rc_file() {
        let config = Config::with_home(&scratch_home("missing"));
        assert!(config.rc_lines().unwrap().is_empty());
    }

    #[test]
    fn test_rc_lines_skip_comments() {
        let home = scratch_home("rc");
        fs::write(
            home.join(RC_FILE),
            "# search path\npath /bin /usr/bin\n\n   \n  cd /tmp  \n",
        )
        .unwrap();

        let config = Config::with_home(&home);
        assert_eq!(config.rc_lines().unwrap(), ["path /bin /usr/bin", "cd /tmp"]);
    }

    #[test]
    fn test_no_home() {
        let config = Config::default();
        assert!(config.history_path().is_none());
        assert!(config.rc_lines().unwrap().is_empty());
    }
}
