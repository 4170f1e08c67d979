use crate::core::commands::{Builtins, Flow};
use crate::core::parser::{parse_segment, segments};
use crate::core::state::Session;
use crate::error::{report, ShellError};
use crate::process::{ChildHandle, JoinSet, Launcher};

enum Dispatched {
    Nothing,
    Child(ChildHandle),
    Exit,
}

/// Runs input lines: builtins in place, externals in parallel.
#[derive(Clone, Default)]
pub struct JobController {
    builtins: Builtins,
    launcher: Launcher,
}

impl JobController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtins(&self) -> &Builtins {
        &self.builtins
    }

    /// Processes one line to completion.
    ///
    /// Segments are handled left to right. Errors are reported and only
    /// discard the segment they come from. Every child launched from the
    /// line is joined before this returns, except when `exit` runs: then
    /// the line is abandoned at once and [`Flow::Exit`] is returned.
    pub fn process_line(&self, session: &mut Session, line: &str) -> Flow {
        let mut children = JoinSet::new();

        for (index, segment) in segments(line).enumerate() {
            match self.dispatch(session, segment) {
                Ok(Dispatched::Nothing) => {}
                Ok(Dispatched::Child(handle)) => children.push(handle),
                Ok(Dispatched::Exit) => {
                    tracing::debug!(pending = children.len(), "exit requested");
                    return Flow::Exit;
                }
                Err(e) => {
                    tracing::debug!(segment = index, "segment failed");
                    report(&e);
                }
            }
        }

        tracing::trace!(children = children.len(), "joining line");
        children.join_all();
        Flow::Continue
    }

    fn dispatch(&self, session: &mut Session, segment: &str) -> Result<Dispatched, ShellError> {
        let Some(command) = parse_segment(segment)? else {
            return Ok(Dispatched::Nothing);
        };

        if let Some(result) = self.builtins.dispatch(&command, session) {
            return Ok(match result? {
                Flow::Continue => Dispatched::Nothing,
                Flow::Exit => Dispatched::Exit,
            });
        }

        let handle = self.launcher.launch(&command, session.paths())?;
        Ok(Dispatched::Child(handle))
    }
}
