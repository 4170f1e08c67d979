mod completer;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use rustyline::config::Configurer;
use rustyline::error::ReadlineError;
use rustyline::history::FileHistory;
use rustyline::Editor;

pub use completer::ShellCompleter;

use crate::core::path_list::PathList;
use crate::error::ShellError;

pub const PROMPT: &str = "wish> ";

/// Where input lines come from.
pub enum Input {
    Interactive(Box<Interactive>),
    Batch(Batch),
}

impl Input {
    pub fn is_interactive(&self) -> bool {
        matches!(self, Input::Interactive(_))
    }

    /// Next line without its trailing newline, or `None` at end of input.
    pub fn next_line(&mut self) -> Result<Option<String>, ShellError> {
        match self {
            Input::Interactive(interactive) => interactive.next_line(),
            Input::Batch(batch) => batch.next_line(),
        }
    }

    /// Lets completion see the current search path.
    pub fn refresh(&mut self, paths: &PathList) {
        if let Input::Interactive(interactive) = self {
            if let Some(helper) = interactive.editor.helper_mut() {
                helper.refresh_commands(paths);
            }
        }
    }

    /// Persists interactive history. Failures are logged only.
    pub fn finish(&mut self) {
        if let Input::Interactive(interactive) = self {
            interactive.save_history();
        }
    }
}

pub struct Interactive {
    editor: Editor<ShellCompleter, FileHistory>,
    history_file: Option<PathBuf>,
}

impl Interactive {
    pub fn new(helper: ShellCompleter, history_file: Option<PathBuf>) -> Result<Self, ShellError> {
        let mut editor = Editor::<ShellCompleter, FileHistory>::new()?;
        editor.set_helper(Some(helper));
        editor.set_auto_add_history(true);

        if let Some(path) = &history_file {
            if let Err(e) = editor.load_history(path) {
                tracing::debug!(path = %path.display(), error = %e, "no history loaded");
            }
        }

        Ok(Self {
            editor,
            history_file,
        })
    }

    fn next_line(&mut self) -> Result<Option<String>, ShellError> {
        match self.editor.readline(PROMPT) {
            Ok(line) => Ok(Some(line)),
            // Ctrl-C drops the line being typed.
            Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save_history(&mut self) {
        if let Some(path) = &self.history_file {
            if let Err(e) = self.editor.save_history(path) {
                tracing::warn!(path = %path.display(), error = %e, "failed to save history");
            }
        }
    }
}

/// Lines read from a script file, no prompt.
pub struct Batch {
    reader: Box<dyn BufRead>,
    buf: Vec<u8>,
}

impl Batch {
    pub fn open(path: &str) -> Result<Self, ShellError> {
        let file = File::open(path).map_err(|source| ShellError::BatchFile {
            path: path.to_string(),
            source,
        })?;
        Ok(Self::from_reader(BufReader::new(file)))
    }

    pub fn from_reader(reader: impl BufRead + 'static) -> Self {
        Self {
            reader: Box::new(reader),
            buf: Vec::new(),
        }
    }

    fn next_line(&mut self) -> Result<Option<String>, ShellError> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&self.buf);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }
}
