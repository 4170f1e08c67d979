use std::io::{self, Write};

use thiserror::Error;

use crate::core::commands::CommandError;
use crate::core::parser::ParseError;
use crate::process::ProcessError;

/// The only diagnostic the shell ever prints.
pub const ERROR_MESSAGE: &str = "An error has occurred\n";

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("syntax error: {0}")]
    Syntax(#[from] ParseError),
    #[error("builtin error: {0}")]
    Command(#[from] CommandError),
    #[error("process error: {0}")]
    Process(#[from] ProcessError),
    #[error("readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("cannot open batch file {path}: {source}")]
    BatchFile {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("flag error: {0}")]
    FlagError(String),
    #[error("Ctrl-C handler error: {0}")]
    CtrlC(#[from] ctrlc::Error),
}

/// Reports a recoverable failure.
///
/// The user sees the fixed [`ERROR_MESSAGE`] on stderr; the details go to
/// the debug log.
pub fn report(err: &ShellError) {
    tracing::debug!(error = %err, "reporting error");
    let mut stderr = io::stderr().lock();
    // Nothing sensible is left to do if stderr itself is gone.
    let _ = stderr.write_all(ERROR_MESSAGE.as_bytes());
    let _ = stderr.flush();
}
