use std::{collections::HashSet, fmt};

use regex_automata::{
    meta::{BuildError, Regex},
    util::syntax,
};

use crate::{prompt::Prompt, token::TokenKind};

/// Single substitution rule.
///
/// Fires on the first text token that either equals one of `tags` (case insensitive) or contains
/// a match of one of the patterns. A tag match swaps the token for the `out` body, a pattern
/// match leaves the token alone. Both merge extra networks of `out` into the prompt.
///
/// Entry without `out` acts as if it was empty: tag match deletes the token and pattern match
/// does nothing
#[derive(Clone)]
pub struct Entry {
    pub name: String,
    pub out: Option<Prompt>,
    tags: HashSet<String>,
    patterns: Vec<String>,
    regexes: Vec<Regex>,
}

// skips pages of debug output of compiled regexes
#[allow(clippy::missing_fields_in_debug)]
impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("name", &self.name)
            .field("out", &self.out)
            .field("tags", &self.tags)
            .field("patterns", &self.patterns)
            .finish()
    }
}

/// Which trigger made an entry fire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Text token at index equals one of the tags and was replaced
    Tag(usize),
    /// Text token at index matched a pattern, body left as is
    Pattern(usize),
}

impl Entry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            out: None,
            tags: HashSet::new(),
            patterns: Vec::new(),
            regexes: Vec::new(),
        }
    }

    /// Adds exact trigger. Stored lowercased
    pub fn add_tag(&mut self, tag: &str) {
        self.tags.insert(tag.to_lowercase());
    }

    /// Compiles case insensitive substring trigger
    #[allow(clippy::result_large_err)]
    pub fn add_pattern(&mut self, pattern: &str) -> Result<(), BuildError> {
        let regex = Regex::builder()
            .syntax(syntax::Config::new().case_insensitive(true))
            .build(pattern)?;

        self.patterns.push(pattern.to_owned());
        self.regexes.push(regex);

        Ok(())
    }

    pub fn tags(&self) -> &HashSet<String> {
        &self.tags
    }

    /// Pattern sources in the order they were added
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Applies entry to the first matching token of the prompt. Returns what fired, if anything
    pub fn process(&self, prompt: &mut Prompt) -> Option<Trigger> {
        let empty = Prompt::default();
        let out = self.out.as_ref().unwrap_or(&empty);

        let trigger = prompt
            .tokens()
            .iter()
            .enumerate()
            .filter(|(_, token)| token.kind() == TokenKind::Text)
            .find_map(|(i, token)| {
                let text = token.rendered();

                if self.tags.contains(&text.to_lowercase()) {
                    return Some(Trigger::Tag(i));
                }

                if self.regexes.iter().any(|regex| regex.is_match(&*text)) {
                    return Some(Trigger::Pattern(i));
                }

                log::trace!("{}: no match for {:?}", self.name, text);
                None
            })?;

        match trigger {
            Trigger::Tag(i) => prompt.splice(i, out),
            Trigger::Pattern(_) => prompt.merge_extra_networks(out),
        }

        log::debug!("{}: fired on {:?}", self.name, trigger);

        Some(trigger)
    }
}
