use std::borrow::Cow;

use super::{command::CommandCompleter, path::PathCompleter};
use crate::core::parser::{PARALLEL_SEPARATOR, REDIRECT_OPERATOR};
use crate::core::path_list::PathList;
use crate::highlight::SyntaxHighlighter;

use rustyline::{
    completion::{Completer, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

fn is_word_boundary(c: char) -> bool {
    c.is_ascii_whitespace() || c == PARALLEL_SEPARATOR || c == REDIRECT_OPERATOR
}

/// rustyline helper for the interactive prompt.
#[derive(Clone)]
pub struct ShellCompleter {
    command_completer: CommandCompleter,
    path_completer: PathCompleter,
    highlighter: SyntaxHighlighter,
}

impl ShellCompleter {
    pub fn new<'a>(builtins: impl IntoIterator<Item = &'a str>, highlighter: SyntaxHighlighter) -> Self {
        ShellCompleter {
            command_completer: CommandCompleter::new(builtins),
            path_completer: PathCompleter::new(),
            highlighter,
        }
    }

    pub fn refresh_commands(&mut self, paths: &PathList) {
        self.command_completer.refresh_commands(paths);
    }

    /// Start of the word under the cursor and whether it names a command.
    fn word_at(line: &str, pos: usize) -> (usize, bool) {
        let before = &line[..pos];
        let start = before
            .rfind(is_word_boundary)
            .map_or(0, |i| i + before[i..].chars().next().map_or(1, char::len_utf8));
        let segment_start = before[..start]
            .rfind(PARALLEL_SEPARATOR)
            .map_or(0, |i| i + 1);
        let at_command = before[segment_start..start].trim().is_empty();
        (start, at_command)
    }
}

impl Helper for ShellCompleter {}

impl Highlighter for ShellCompleter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(
            self.highlighter
                .highlight_line(line, |word| self.command_completer.is_builtin(word)),
        )
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(&'s self, prompt: &'p str, _default: bool) -> Cow<'b, str> {
        Cow::Owned(self.highlighter.highlight_prompt(prompt))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;
}

impl Validator for ShellCompleter {}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, at_command) = Self::word_at(line, pos);
        let word = &line[start..pos];
        let matches = if at_command {
            self.command_completer.complete_command(word)
        } else {
            self.path_completer.complete_path(word)
        };
        Ok((start, matches))
    }
}
