//! Line based rule file format.
//!
//! ```text
//! # comment
//! rule: cats
//! tag: cat, kitten
//! keyword: whiskers, paws
//! re: ^neko
//! for: (feline:1.1) <lora:cats:0.6>
//! ```
//!
//! * `rule:` starts a new entry, the rest of the line is its name
//! * `tag:` adds every text token of the line as exact trigger
//! * `re:` adds case insensitive pattern
//! * `keyword:` adds comma separated words as one alternation pattern
//! * `for:` sets replacement prompt, last one wins
//!
//! Lines before the first `rule:`, blank lines, comments and unknown lines are ignored.

use std::{error::Error, fmt};

use regex_automata::meta::BuildError;

use crate::{entry::Entry, extra_network::ParseError, prompt::Prompt, token::TokenKind};

/// Parses rule file text into entries in file order
#[allow(clippy::result_large_err)]
pub fn parse(text: &str) -> Result<Vec<Entry>, RuleError> {
    let mut entries: Vec<Entry> = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(name) = line.strip_prefix("rule:") {
            entries.push(Entry::new(name.trim_start()));
            continue;
        }

        let Some(entry) = entries.last_mut() else {
            continue;
        };

        if let Some(rest) = line.strip_prefix("for:") {
            let out = Prompt::new(rest.trim_start())
                .map_err(|err| RuleError::new(i + 1, line, &entry.name, err.into()))?;
            entry.out = Some(out);
        } else if let Some(rest) = line.strip_prefix("tag:") {
            let tags = Prompt::new(rest.trim_start())
                .map_err(|err| RuleError::new(i + 1, line, &entry.name, err.into()))?;

            for token in tags.tokens() {
                if token.kind() == TokenKind::Text {
                    entry.add_tag(&token.rendered());
                }
            }
        } else if let Some(rest) = line.strip_prefix("re:") {
            entry
                .add_pattern(rest.trim())
                .map_err(|err| RuleError::new(i + 1, line, &entry.name, err.into()))?;
        } else if let Some(rest) = line.strip_prefix("keyword:") {
            let keywords: Vec<&str> = rest
                .split(',')
                .map(str::trim)
                .filter(|keyword| !keyword.is_empty())
                .collect();

            if keywords.is_empty() {
                log::debug!("{}: empty keyword line {}", entry.name, i + 1);
                continue;
            }

            entry
                .add_pattern(&keywords.join("|"))
                .map_err(|err| RuleError::new(i + 1, line, &entry.name, err.into()))?;
        }
    }

    Ok(entries)
}

#[derive(Debug)]
pub enum RuleErrorKind {
    BadRegex(BuildError),
    BadPrompt(ParseError),
}

impl From<BuildError> for RuleErrorKind {
    fn from(err: BuildError) -> Self {
        Self::BadRegex(err)
    }
}

impl From<ParseError> for RuleErrorKind {
    fn from(err: ParseError) -> Self {
        Self::BadPrompt(err)
    }
}

/// Rule text line that could not be parsed
#[derive(Debug)]
pub struct RuleError {
    /// 1 based line number
    pub line: usize,
    /// Trimmed line
    pub content: String,
    /// Name of the rule the line belongs to
    pub rule: String,
    pub kind: RuleErrorKind,
}

impl RuleError {
    fn new(line: usize, content: &str, rule: &str, kind: RuleErrorKind) -> Self {
        Self {
            line,
            content: content.to_owned(),
            rule: rule.to_owned(),
            kind,
        }
    }
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule {:?} line {} ({}): ", self.rule, self.line, self.content)?;

        match &self.kind {
            RuleErrorKind::BadRegex(err) => {
                let mut msg = err.to_string();
                if let Some(syntax_msg) = err.syntax_error() {
                    msg = format!("msg: {syntax_msg}");
                }

                write!(f, "bad pattern: {msg}")
            }
            RuleErrorKind::BadPrompt(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RuleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            RuleErrorKind::BadRegex(err) => Some(err),
            RuleErrorKind::BadPrompt(err) => Some(err),
        }
    }
}
