use super::{Command, CommandError, Flow};
use crate::core::state::Session;
use std::env;

#[derive(Clone, Default)]
pub struct CdCommand;

impl CdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for CdCommand {
    fn execute(&self, args: &[String], _session: &mut Session) -> Result<Flow, CommandError> {
        let [target] = args else {
            return Err(CommandError::InvalidArguments {
                command: "cd",
                reason: format!("expected exactly one directory, got {}", args.len()),
            });
        };

        env::set_current_dir(target).map_err(|source| CommandError::ChangeDirectory {
            path: target.clone(),
            source,
        })?;
        tracing::debug!(dir = %target, "changed directory");
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::cwd_lock;
    use std::env;

    #[test]
    fn test_cd_temp() {
        let _guard = cwd_lock();
        let original = env::current_dir().unwrap();
        let temp_dir = env::temp_dir().canonicalize().unwrap();

        let cmd = CdCommand::new();
        let mut session = Session::new();
        let flow = cmd
            .execute(&[temp_dir.to_str().unwrap().to_string()], &mut session)
            .unwrap();
        assert_eq!(flow, Flow::Continue);
        assert_eq!(env::current_dir().unwrap().canonicalize().unwrap(), temp_dir);

        env::set_current_dir(original).unwrap();
    }

    #[test]
    fn test_cd_arity() {
        let _guard = cwd_lock();
        let before = env::current_dir().unwrap();
        let cmd = CdCommand::new();
        let mut session = Session::new();

        assert!(matches!(
            cmd.execute(&[], &mut session),
            Err(CommandError::InvalidArguments { command: "cd", .. })
        ));
        assert!(matches!(
            cmd.execute(&["/tmp".to_string(), "/".to_string()], &mut session),
            Err(CommandError::InvalidArguments { command: "cd", .. })
        ));
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn test_cd_invalid() {
        let _guard = cwd_lock();
        let before = env::current_dir().unwrap();
        let cmd = CdCommand::new();
        let mut session = Session::new();

        let result = cmd.execute(&["/nonexistent/path".to_string()], &mut session);
        assert!(matches!(result, Err(CommandError::ChangeDirectory { .. })));
        assert_eq!(env::current_dir().unwrap(), before);
    }
}
