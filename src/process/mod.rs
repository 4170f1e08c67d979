use thiserror::Error;

pub mod handle;
pub mod launcher;

pub use handle::{ChildHandle, JoinSet};
pub use launcher::Launcher;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("search path is empty, cannot run {0}")]
    EmptyPath(String),
    #[error("command not found: {0}")]
    NotFound(String),
    #[error("argument contains a NUL byte: {0:?}")]
    InvalidArgument(String),
    #[error("failed to fork for {command}: {source}")]
    Fork {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to wait for pid {pid}: {source}")]
    Wait {
        pid: libc::pid_t,
        #[source]
        source: std::io::Error,
    },
}
