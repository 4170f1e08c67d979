use super::{Command, CommandError, Flow};
use crate::core::state::Session;

/// Overwrites the search path with its arguments, which may be none.
#[derive(Clone, Default)]
pub struct PathCommand;

impl PathCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for PathCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<Flow, CommandError> {
        session.paths_mut().replace(args.iter().cloned());
        tracing::debug!(dirs = ?args, "search path replaced");
        Ok(Flow::Continue)
    }
}
