//! `wish`: a small shell with three builtins (`exit`, `cd`, `path`),
//! external commands resolved through its own search path, `>` to send a
//! command's stdout and stderr to a file, and `&` to run the commands of a
//! line in parallel.

pub mod config;
pub mod core;
pub mod error;
pub mod flags;
pub mod highlight;
pub mod input;
pub mod logging;
pub mod process;
pub mod shell;

#[cfg(test)]
mod test_support;
