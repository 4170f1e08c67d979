use std::collections::BTreeSet;
use std::fs;

use rustyline::completion::Pair;

use crate::core::path_list::{is_executable, PathList};

/// Completes command names: builtins plus executables on the search path.
#[derive(Clone, Default)]
pub struct CommandCompleter {
    builtins: BTreeSet<String>,
    commands: BTreeSet<String>,
}

impl CommandCompleter {
    pub fn new<'a>(builtins: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            builtins: builtins.into_iter().map(str::to_owned).collect(),
            commands: BTreeSet::new(),
        }
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.builtins.contains(name)
    }

    /// Rescans the directories of `paths`. Unreadable directories are skipped.
    pub fn refresh_commands(&mut self, paths: &PathList) {
        self.commands.clear();
        for dir in paths.iter() {
            let Ok(entries) = fs::read_dir(dir) else {
                continue;
            };
            for entry in entries.filter_map(Result::ok) {
                if !is_executable(&entry.path()) {
                    continue;
                }
                if let Some(name) = entry.file_name().to_str() {
                    self.commands.insert(name.to_string());
                }
            }
        }
    }

    pub fn complete_command(&self, prefix: &str) -> Vec<Pair> {
        self.builtins
            .iter()
            .chain(self.commands.iter())
            .filter(|name| name.starts_with(prefix))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|name| Pair {
                display: name.clone(),
                replacement: format!("{} ", name),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn test_builtins_complete() {
        let completer = CommandCompleter::new(["cd", "exit", "path"]);
        let names: Vec<String> = completer
            .complete_command("p")
            .into_iter()
            .map(|p| p.display)
            .collect();
        assert_eq!(names, ["path"]);
        assert!(completer.is_builtin("exit"));
    }

    #[test]
    fn test_path_commands_follow_path_list() {
        let dir = std::env::temp_dir().join(format!("wish_cmd_completer_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let program = dir.join("patharrow");
        fs::write(&program, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&program, fs::Permissions::from_mode(0o755)).unwrap();
        fs::write(dir.join("pathdata"), "not a program").unwrap();

        let mut completer = CommandCompleter::new(["cd", "exit", "path"]);
        let mut paths = PathList::new();
        paths.replace([dir.to_str().unwrap()]);
        completer.refresh_commands(&paths);

        let names: Vec<String> = completer
            .complete_command("path")
            .into_iter()
            .map(|p| p.display)
            .collect();
        assert_eq!(names, ["path", "patharrow"]);

        paths.replace(Vec::<String>::new());
        completer.refresh_commands(&paths);
        assert_eq!(completer.complete_command("patha").len(), 0);
    }
}
