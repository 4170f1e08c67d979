use super::{Command, CommandError, Flow};
use crate::core::state::Session;

#[derive(Clone, Default)]
pub struct ExitCommand;

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ExitCommand {
    /// Asks the caller to end the shell. Takes no arguments.
    fn execute(&self, args: &[String], _session: &mut Session) -> Result<Flow, CommandError> {
        if !args.is_empty() {
            return Err(CommandError::InvalidArguments {
                command: "exit",
                reason: format!("expected no arguments, got {}", args.len()),
            });
        }
        Ok(Flow::Exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_command() {
        let cmd = ExitCommand::new();
        let mut session = Session::new();
        assert_eq!(cmd.execute(&[], &mut session).unwrap(), Flow::Exit);
    }

    #[test]
    fn test_exit_with_arguments_does_not_exit() {
        let cmd = ExitCommand::new();
        let mut session = Session::new();
        let result = cmd.execute(&["0".to_string()], &mut session);
        assert!(matches!(
            result,
            Err(CommandError::InvalidArguments { command: "exit", .. })
        ));
    }
}
