use inksac::prelude::*;

use crate::core::parser::{PARALLEL_SEPARATOR, REDIRECT_OPERATOR};

#[derive(Clone, Copy)]
enum Role {
    Command,
    Argument,
    Target,
}

/// Colours the prompt and the line being edited.
#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    pub fn plain() -> Self {
        Self {
            color_support: ColorSupport::NoColor,
        }
    }

    fn enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    pub fn highlight_prompt(&self, prompt: &str) -> String {
        if !self.enabled() {
            return prompt.to_string();
        }
        let style = Style::builder().foreground(Color::Green).bold().build();
        prompt.to_string().style(style).to_string()
    }

    /// Highlights command names, operators and redirection targets.
    ///
    /// Whitespace is copied through untouched so the cursor stays aligned.
    /// A second `>` in one segment is painted as an error.
    pub fn highlight_line(&self, line: &str, is_builtin: impl Fn(&str) -> bool) -> String {
        if !self.enabled() {
            return line.to_string();
        }

        let builtin_style = Style::builder().foreground(Color::Cyan).bold().build();
        let command_style = Style::builder().foreground(Color::Cyan).build();
        let operator_style = Style::builder().foreground(Color::Yellow).bold().build();
        let target_style = Style::builder().foreground(Color::Magenta).build();
        let error_style = Style::builder().foreground(Color::Red).bold().build();

        let mut out = String::with_capacity(line.len() * 2);
        let mut word = String::new();
        let mut role = Role::Command;
        let mut redirects_in_segment = 0;

        for c in line.chars().chain(std::iter::once(' ')) {
            let is_operator = c == PARALLEL_SEPARATOR || c == REDIRECT_OPERATOR;
            if !c.is_ascii_whitespace() && !is_operator {
                word.push(c);
                continue;
            }

            if !word.is_empty() {
                let style = match role {
                    Role::Command if is_builtin(word.as_str()) => Some(builtin_style.clone()),
                    Role::Command => Some(command_style.clone()),
                    Role::Target => Some(target_style.clone()),
                    Role::Argument => None,
                };
                match style {
                    Some(style) => out.push_str(&word.clone().style(style).to_string()),
                    None => out.push_str(&word),
                }
                word.clear();
                role = Role::Argument;
            }

            if c == PARALLEL_SEPARATOR {
                out.push_str(&c.to_string().style(operator_style.clone()).to_string());
                role = Role::Command;
                redirects_in_segment = 0;
            } else if c == REDIRECT_OPERATOR {
                redirects_in_segment += 1;
                let style = if redirects_in_segment > 1 {
                    error_style.clone()
                } else {
                    operator_style.clone()
                };
                out.push_str(&c.to_string().style(style).to_string());
                role = Role::Target;
            } else {
                out.push(c);
            }
        }
        // Drop the sentinel space.
        out.pop();

        out
    }
}
