use std::io;

use super::ProcessError;

/// A running child process that has not been waited for yet.
///
/// Not `Clone`: [`join`](ChildHandle::join) takes the handle by value, so a
/// child can be reaped at most once.
#[derive(Debug)]
#[must_use = "a launched child must be joined"]
pub struct ChildHandle {
    pid: libc::pid_t,
    command: String,
}

impl ChildHandle {
    pub(crate) fn new(pid: libc::pid_t, command: impl Into<String>) -> Self {
        Self {
            pid,
            command: command.into(),
        }
    }

    pub fn pid(&self) -> libc::pid_t {
        self.pid
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Blocks until the child terminates. Its exit status is discarded.
    pub fn join(self) -> Result<(), ProcessError> {
        let mut status: libc::c_int = 0;
        loop {
            // SAFETY: `status` is a valid out pointer and `pid` names our own child.
            let ret = unsafe { libc::waitpid(self.pid, &mut status, 0) };
            if ret == self.pid {
                tracing::trace!(pid = self.pid, command = %self.command, status, "child reaped");
                return Ok(());
            }
            let err = io::Error::last_os_error();
            if err.kind() != io::ErrorKind::Interrupted {
                return Err(ProcessError::Wait {
                    pid: self.pid,
                    source: err,
                });
            }
        }
    }
}

/// The children launched from one input line, in launch order.
#[derive(Debug, Default)]
#[must_use = "launched children must be joined"]
pub struct JoinSet {
    handles: Vec<ChildHandle>,
}

impl JoinSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, handle: ChildHandle) {
        self.handles.push(handle);
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Waits for every child, one after another.
    ///
    /// A failed wait is logged and does not stop the remaining joins.
    pub fn join_all(self) {
        for handle in self.handles {
            let pid = handle.pid();
            if let Err(e) = handle.join() {
                tracing::warn!(pid, error = %e, "join failed");
            }
        }
    }
}
