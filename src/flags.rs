use crate::error::ShellError;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct Flags {
    flags: BTreeMap<&'static str, Flag>,
    batch_file: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Flag {
    pub short: &'static str,
    pub long: &'static str,
    pub description: &'static str,
    pub set: bool,
}

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}

impl Flags {
    pub fn new() -> Self {
        let mut flags = BTreeMap::new();

        for (name, short, long, description) in [
            ("help", "-h", "--help", "Print this help message"),
            ("version", "-v", "--version", "Show version information"),
            ("debug", "-d", "--debug", "Log debug output to stderr"),
            ("norc", "-n", "--norc", "Do not read ~/.wishrc"),
        ] {
            flags.insert(
                name,
                Flag {
                    short,
                    long,
                    description,
                    set: false,
                },
            );
        }

        Flags {
            flags,
            batch_file: None,
        }
    }

    /// Parses `wish [FLAGS] [batch-file]`. At most one file may be given.
    pub fn parse(&mut self, args: &[String]) -> Result<(), ShellError> {
        for arg in args {
            if arg.len() > 1 && arg.starts_with('-') {
                let flag = self
                    .flags
                    .values_mut()
                    .find(|flag| arg == flag.short || arg == flag.long)
                    .ok_or_else(|| ShellError::FlagError(format!("unknown flag {}", arg)))?;
                flag.set = true;
            } else if self.batch_file.is_some() {
                return Err(ShellError::FlagError(
                    "at most one batch file may be given".to_string(),
                ));
            } else {
                self.batch_file = Some(arg.clone());
            }
        }
        Ok(())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.flags.get(name).is_some_and(|f| f.set)
    }

    pub fn batch_file(&self) -> Option<&str> {
        self.batch_file.as_deref()
    }

    pub fn print_help(&self) {
        println!("Usage: wish [OPTIONS] [batch-file]");
        println!("\nOptions:");
        for flag in self.flags.values() {
            println!("  {}, {:<15} {}", flag.short, flag.long, flag.description);
        }
    }
}
