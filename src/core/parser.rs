use thiserror::Error;

/// Separates commands that run concurrently within one line.
pub const PARALLEL_SEPARATOR: char = '&';
/// Sends both stdout and stderr of a command to a file.
pub const REDIRECT_OPERATOR: char = '>';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("more than one '>' in command ({0} found)")]
    MultipleRedirections(usize),
    #[error("'>' without a target file")]
    MissingTarget,
    #[error("'>' expects exactly one target file, got {0}")]
    ExtraTargets(usize),
}

/// A single command ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    argv: Vec<String>,
    redirect: Option<String>,
}

impl ParsedCommand {
    /// `argv` must hold at least the command name.
    pub(crate) fn new(argv: Vec<String>, redirect: Option<String>) -> Self {
        debug_assert!(!argv.is_empty());
        Self { argv, redirect }
    }

    pub fn name(&self) -> &str {
        &self.argv[0]
    }

    /// Arguments after the command name.
    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    pub fn redirect(&self) -> Option<&str> {
        self.redirect.as_deref()
    }

    pub fn has_redirect(&self) -> bool {
        self.redirect.is_some()
    }
}

/// Splits a raw line on the parallel separator.
///
/// Empty pieces (leading, trailing or doubled separators) are kept so the
/// caller sees every position; [`parse_segment`] turns them into no-ops.
pub fn segments(line: &str) -> impl Iterator<Item = &str> {
    line.split(PARALLEL_SEPARATOR)
}

fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_ascii_whitespace()
}

/// Parses one segment of a line.
///
/// Returns `Ok(None)` when the segment holds no command at all. The text on
/// the left of the redirection operator is the command and its arguments;
/// the text on its right must be exactly one file name. Whitespace around
/// the operator is optional.
pub fn parse_segment(segment: &str) -> Result<Option<ParsedCommand>, ParseError> {
    let operators = segment.matches(REDIRECT_OPERATOR).count();
    if operators > 1 {
        return Err(ParseError::MultipleRedirections(operators));
    }

    let (command_part, target_part) = match segment.split_once(REDIRECT_OPERATOR) {
        Some((left, right)) => (left, Some(right)),
        None => (segment, None),
    };

    let argv: Vec<String> = tokens(command_part).map(str::to_owned).collect();
    if argv.is_empty() {
        return Ok(None);
    }

    let redirect = match target_part {
        Some(text) => {
            let mut targets = tokens(text);
            match (targets.next(), targets.count()) {
                (None, _) => return Err(ParseError::MissingTarget),
                (Some(file), 0) => Some(file.to_owned()),
                (Some(_), rest) => return Err(ParseError::ExtraTargets(rest + 1)),
            }
        }
        None => None,
    };

    Ok(Some(ParsedCommand::new(argv, redirect)))
}
