use std::{
    fs,
    path::{Path, PathBuf},
};

use rustyline::completion::Pair;

/// Completes file and directory names relative to the working directory.
#[derive(Clone, Default)]
pub struct PathCompleter;

impl PathCompleter {
    pub fn new() -> Self {
        Self
    }

    pub fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        let (dir_to_search, file_prefix) = self.split_input(incomplete);
        let Ok(entries) = fs::read_dir(&dir_to_search) else {
            return Vec::new();
        };

        let mut matches: Vec<Pair> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                if !name.starts_with(&file_prefix) {
                    return None;
                }
                Some(self.completion_pair(incomplete, &file_prefix, &name, &entry.path()))
            })
            .collect();

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }

    /// Splits the word into the directory to list and the name prefix.
    fn split_input(&self, incomplete: &str) -> (PathBuf, String) {
        if incomplete.is_empty() {
            return (PathBuf::from("."), String::new());
        }
        if incomplete.ends_with('/') {
            return (PathBuf::from(incomplete), String::new());
        }

        let path = Path::new(incomplete);
        let prefix = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        (dir, prefix)
    }

    fn completion_pair(&self, incomplete: &str, prefix: &str, name: &str, path: &Path) -> Pair {
        // Keep whatever directory part the user already typed.
        let typed_dir = incomplete.strip_suffix(prefix).unwrap_or(incomplete);
        let completed = format!("{}{}", typed_dir, name);

        if path.is_dir() {
            Pair {
                display: format!("{}/", name),
                replacement: format!("{}/", completed),
            }
        } else {
            Pair {
                display: name.to_string(),
                replacement: format!("{} ", completed),
            }
        }
    }
}
