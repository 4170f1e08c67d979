use std::collections::BTreeMap;

use thiserror::Error;

mod cd;
mod exit;
mod path;

pub use cd::CdCommand;
pub use exit::ExitCommand;
pub use path::PathCommand;

use crate::core::parser::ParsedCommand;
use crate::core::state::Session;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{command}: invalid arguments: {reason}")]
    InvalidArguments {
        command: &'static str,
        reason: String,
    },
    #[error("{0}: builtins cannot be redirected")]
    RedirectNotAllowed(String),
    #[error("cd: cannot change directory to {path}: {source}")]
    ChangeDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// What the caller should do after a builtin ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub trait Command {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<Flow, CommandError>;
}

#[derive(Clone)]
enum CommandType {
    Cd(CdCommand),
    Exit(ExitCommand),
    Path(PathCommand),
}

impl Command for CommandType {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<Flow, CommandError> {
        match self {
            CommandType::Cd(cmd) => cmd.execute(args, session),
            CommandType::Exit(cmd) => cmd.execute(args, session),
            CommandType::Path(cmd) => cmd.execute(args, session),
        }
    }
}

/// Registry of the commands the shell runs itself.
#[derive(Clone)]
pub struct Builtins {
    commands: BTreeMap<&'static str, CommandType>,
}

impl Default for Builtins {
    fn default() -> Self {
        Self::new()
    }
}

impl Builtins {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("cd", CommandType::Cd(CdCommand::new()));
        commands.insert("exit", CommandType::Exit(ExitCommand::new()));
        commands.insert("path", CommandType::Path(PathCommand::new()));
        Self { commands }
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }

    /// Runs `command` if it names a builtin, returning `None` otherwise.
    ///
    /// A redirected builtin is refused before it can have any effect.
    pub fn dispatch(
        &self,
        command: &ParsedCommand,
        session: &mut Session,
    ) -> Option<Result<Flow, CommandError>> {
        let builtin = self.commands.get(command.name())?;
        if command.has_redirect() {
            return Some(Err(CommandError::RedirectNotAllowed(
                command.name().to_string(),
            )));
        }
        Some(builtin.execute(command.args(), session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::parse_segment;
    use crate::test_support::cwd_lock;
    use std::env;

    fn command(line: &str) -> ParsedCommand {
        parse_segment(line).unwrap().unwrap()
    }

    #[test]
    fn test_builtin_command_detection() {
        let builtins = Builtins::new();

        assert!(builtins.is_builtin("cd"));
        assert!(builtins.is_builtin("exit"));
        assert!(builtins.is_builtin("path"));
        assert!(!builtins.is_builtin("ls"));
        assert!(!builtins.is_builtin(""));
        assert_eq!(builtins.names().collect::<Vec<_>>(), ["cd", "exit", "path"]);
    }

    #[test]
    fn test_dispatch_external_returns_none() {
        let builtins = Builtins::new();
        let mut session = Session::new();
        assert!(builtins.dispatch(&command("ls -l"), &mut session).is_none());
    }

    #[test]
    fn test_dispatch_exit() {
        let builtins = Builtins::new();
        let mut session = Session::new();
        assert!(matches!(
            builtins.dispatch(&command("exit"), &mut session),
            Some(Ok(Flow::Exit))
        ));
        assert!(matches!(
            builtins.dispatch(&command("exit now"), &mut session),
            Some(Err(CommandError::InvalidArguments { .. }))
        ));
    }

    #[test]
    fn test_redirected_builtin_has_no_effect() {
        let _guard = cwd_lock();
        let builtins = Builtins::new();
        let mut session = Session::new();
        let before = env::current_dir().unwrap();
        let target = env::temp_dir().join(format!("wish_redirected_cd_{}", std::process::id()));

        let line = format!("cd / > {}", target.display());
        assert!(matches!(
            builtins.dispatch(&command(&line), &mut session),
            Some(Err(CommandError::RedirectNotAllowed(name))) if name == "cd"
        ));
        assert_eq!(env::current_dir().unwrap(), before);
        assert!(!target.exists());

        assert!(matches!(
            builtins.dispatch(&command("path /x >out"), &mut session),
            Some(Err(CommandError::RedirectNotAllowed(_)))
        ));
        assert_eq!(session.paths().iter().collect::<Vec<_>>(), ["/bin"]);

        assert!(matches!(
            builtins.dispatch(&command("exit>out"), &mut session),
            Some(Err(CommandError::RedirectNotAllowed(_)))
        ));
    }

    #[test]
    fn test_command_error_display() {
        let errors = vec![
            CommandError::InvalidArguments {
                command: "cd",
                reason: "bad args".to_string(),
            },
            CommandError::RedirectNotAllowed("path".to_string()),
            CommandError::ChangeDirectory {
                path: "/nope".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "io error"),
            },
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }
}
