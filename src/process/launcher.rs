use std::ffi::CString;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use super::{ChildHandle, ProcessError};
use crate::core::parser::ParsedCommand;
use crate::core::path_list::PathList;
use crate::error::ERROR_MESSAGE;

/// NUL-terminated pointer array for `execv`. Owns the strings it points to.
struct CStringVec {
    _strings: Vec<CString>,
    ptrs: Vec<*const libc::c_char>,
}

impl CStringVec {
    fn from_args(args: &[String]) -> Result<Self, ProcessError> {
        let strings = args
            .iter()
            .map(|arg| c_string(arg.as_bytes(), arg))
            .collect::<Result<Vec<_>, _>>()?;
        let mut ptrs: Vec<*const libc::c_char> = strings.iter().map(|s| s.as_ptr()).collect();
        ptrs.push(std::ptr::null());
        Ok(Self {
            _strings: strings,
            ptrs,
        })
    }

    fn as_ptr(&self) -> *const *const libc::c_char {
        self.ptrs.as_ptr()
    }
}

fn c_string(bytes: &[u8], shown: &str) -> Result<CString, ProcessError> {
    CString::new(bytes).map_err(|_| ProcessError::InvalidArgument(shown.to_string()))
}

/// Everything the child needs, converted before forking so the child does
/// no allocation.
struct ProgramImage {
    program: CString,
    argv: CStringVec,
    redirect: Option<CString>,
}

impl ProgramImage {
    fn new(program: &Path, command: &ParsedCommand) -> Result<Self, ProcessError> {
        let program_bytes = program.as_os_str().as_bytes();
        Ok(Self {
            program: c_string(program_bytes, &program.to_string_lossy())?,
            argv: CStringVec::from_args(command.argv())?,
            redirect: command
                .redirect()
                .map(|target| c_string(target.as_bytes(), target))
                .transpose()?,
        })
    }

    /// Wires the redirection and replaces the process image.
    ///
    /// Runs between `fork` and `execv`, so only async-signal-safe calls are
    /// allowed. Any failure ends the child with status 1.
    unsafe fn exec(&self) -> ! {
        if let Some(target) = &self.redirect {
            let fd = libc::open(
                target.as_ptr(),
                libc::O_WRONLY | libc::O_CREAT | libc::O_TRUNC,
                0o666 as libc::c_uint,
            );
            if fd < 0 {
                child_abort();
            }
            if libc::dup2(fd, libc::STDOUT_FILENO) < 0 || libc::dup2(fd, libc::STDERR_FILENO) < 0 {
                child_abort();
            }
            if fd > libc::STDERR_FILENO {
                libc::close(fd);
            }
        }

        libc::execv(self.program.as_ptr(), self.argv.as_ptr());
        child_abort()
    }
}

unsafe fn child_abort() -> ! {
    libc::write(
        libc::STDERR_FILENO,
        ERROR_MESSAGE.as_ptr().cast(),
        ERROR_MESSAGE.len(),
    );
    libc::_exit(1)
}

/// Starts external commands found through the search path.
#[derive(Clone, Default)]
pub struct Launcher;

impl Launcher {
    pub fn new() -> Self {
        Self
    }

    /// Forks a child running `command` and returns without waiting for it.
    ///
    /// The binary is located through `paths`, but the child still sees the
    /// unresolved command name as `argv[0]`. Redirection is set up inside the
    /// child; if that fails the child exits on its own and the caller only
    /// sees a normal handle.
    pub fn launch(
        &self,
        command: &ParsedCommand,
        paths: &PathList,
    ) -> Result<ChildHandle, ProcessError> {
        let name = command.name();
        if paths.is_empty() {
            return Err(ProcessError::EmptyPath(name.to_string()));
        }
        let program = paths
            .resolve(name)
            .ok_or_else(|| ProcessError::NotFound(name.to_string()))?;
        let image = ProgramImage::new(&program, command)?;

        // SAFETY: the child branch only calls async-signal-safe functions on
        // data prepared above and never returns.
        match unsafe { libc::fork() } {
            -1 => Err(ProcessError::Fork {
                command: name.to_string(),
                source: io::Error::last_os_error(),
            }),
            0 => unsafe { image.exec() },
            pid => {
                tracing::debug!(pid, program = %program.display(), redirect = ?command.redirect(), "launched");
                Ok(ChildHandle::new(pid, name))
            }
        }
    }
}
