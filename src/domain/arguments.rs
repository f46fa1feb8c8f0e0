//! Argument vector and command-line rendering
//!
//! Grammar of a rendered line: tokens separated by single spaces, each one
//! of `--flag` or `--flag "value"`. Inside quoted values
//! only `"` is escaped (as `\"`); backslashes and shell metacharacters are
//! passed through untouched because the child is never run through a shell.

use std::fmt;

use crate::domain::ValidationError;

/// One command-line token as constructed by an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    /// `--flag`
    Flag(String),
    /// `--flag "value"`
    Quoted { flag: String, value: String },
}

impl Argument {
    pub fn flag(flag: impl Into<String>) -> Self {
        Self::Flag(flag.into())
    }

    pub fn quoted(flag: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Quoted {
            flag: flag.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Flag(flag) => f.write_str(flag),
            Argument::Quoted { flag, value } => write!(f, "{flag} \"{}\"", escape_quotes(value)),
        }
    }
}

/// Ordered tokens for one invocation of the external program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentVector {
    args: Vec<Argument>,
}

impl ArgumentVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, arg: Argument) {
        self.args.push(arg);
    }

    pub fn args(&self) -> &[Argument] {
        &self.args
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Render the single command line handed to the execution primitive.
    pub fn command_line(&self) -> String {
        self.args
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Literal argv strings, values unescaped and unquoted.
    pub fn to_args(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.args.len() * 2);
        for arg in &self.args {
            match arg {
                Argument::Flag(flag) => out.push(flag.clone()),
                Argument::Quoted { flag, value } => {
                    out.push(flag.clone());
                    out.push(value.clone());
                }
            }
        }
        out
    }
}

impl fmt::Display for ArgumentVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

impl FromIterator<Argument> for ArgumentVector {
    fn from_iter<I: IntoIterator<Item = Argument>>(iter: I) -> Self {
        Self {
            args: iter.into_iter().collect(),
        }
    }
}

/// Escape embedded double quotes, nothing else.
pub fn escape_quotes(value: &str) -> String {
    value.replace('"', "\\\"")
}

/// Render already-split tokens for logs and error context.
///
/// Empty tokens and tokens containing whitespace or quotes are quoted and
/// escaped, so the result splits back into the same tokens.
pub fn join_tokens(tokens: &[String]) -> String {
    tokens
        .iter()
        .map(|t| {
            if t.is_empty() || t.contains(|c: char| c.is_whitespace() || c == '"') {
                format!("\"{}\"", escape_quotes(t))
            } else {
                t.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a rendered command line back into argv tokens.
///
/// Whitespace separates tokens outside quotes. A `"` opens or closes a
/// quoted section; inside one, `\"` yields a literal quote. All other
/// backslashes are literal. `--x ""` yields an empty token.
pub fn split_command_line(line: &str) -> Result<Vec<String>, ValidationError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' => {
                in_quotes = !in_quotes;
                in_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_quotes {
        return Err(ValidationError::UnterminatedQuote(line.to_string()));
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}
