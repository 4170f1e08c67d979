mod job;

pub use job::JobController;

use std::path::Path;

use crate::{
    config::Config,
    core::{commands::Flow, state::Session},
    error::ShellError,
    flags::Flags,
    highlight::SyntaxHighlighter,
    input::{Batch, Input, Interactive, ShellCompleter},
};

pub struct Shell {
    session: Session,
    jobs: JobController,
    input: Input,
    config: Config,
    flags: Flags,
}

impl Shell {
    /// Batch mode when a file was given on the command line, interactive
    /// otherwise.
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let config = Config::new();
        let jobs = JobController::new();
        let session = Session::new();

        let input = match flags.batch_file() {
            Some(path) => Input::Batch(Batch::open(path)?),
            None => {
                let helper = ShellCompleter::new(jobs.builtins().names(), SyntaxHighlighter::new());
                let interactive = Interactive::new(helper, config.history_path().map(Path::to_path_buf))?;

                // Children get SIGINT from the terminal; the shell stays up.
                ctrlc::set_handler(|| tracing::debug!("interrupt"))?;
                Input::Interactive(Box::new(interactive))
            }
        };

        Ok(Self::with_input(input, session, jobs, config, flags))
    }

    pub fn with_input(
        input: Input,
        session: Session,
        jobs: JobController,
        config: Config,
        flags: Flags,
    ) -> Self {
        let mut shell = Shell {
            session,
            jobs,
            input,
            config,
            flags,
        };
        shell.input.refresh(shell.session.paths());
        shell
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Reads and runs lines until end of input or `exit`.
    pub fn run(&mut self) -> Result<(), ShellError> {
        let flow = match self.run_rc()? {
            Flow::Continue => self.run_lines(),
            Flow::Exit => Ok(()),
        };
        self.input.finish();
        flow
    }

    fn run_rc(&mut self) -> Result<Flow, ShellError> {
        if !self.input.is_interactive() || self.flags.is_set("norc") {
            return Ok(Flow::Continue);
        }
        for line in self.config.rc_lines()? {
            if self.execute_line(&line) == Flow::Exit {
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    fn run_lines(&mut self) -> Result<(), ShellError> {
        while let Some(line) = self.input.next_line()? {
            if line.trim().is_empty() {
                continue;
            }
            if self.execute_line(&line) == Flow::Exit {
                break;
            }
        }
        Ok(())
    }

    fn execute_line(&mut self, line: &str) -> Flow {
        tracing::debug!(line, "processing");
        let flow = self.jobs.process_line(&mut self.session, line);
        self.input.refresh(self.session.paths());
        flow
    }
}
