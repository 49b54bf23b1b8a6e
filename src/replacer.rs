use std::borrow::Cow;

use crate::{
    entry::Entry,
    extra_network::ParseError,
    grammar::{self, RuleError},
    prompt::Prompt,
};

/// Applies entries to prompts in order they were added
#[derive(Debug, Clone, Default)]
pub struct Replacer {
    entries: Vec<Entry>,
}

impl Replacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses rule text and appends its entries after existing ones.
    ///
    /// Nothing is added if any line fails
    #[allow(clippy::result_large_err)]
    pub fn add_rule(&mut self, text: &str) -> Result<(), RuleError> {
        let entries = grammar::parse(text)?;

        log::debug!("adding {} entries", entries.len());

        self.entries.extend(entries);

        Ok(())
    }

    pub fn add_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs every entry against the prompt, each one seeing changes of previous ones.
    ///
    /// Without entries the text is returned as is, spacing included. Fails if prompt has a
    /// malformed extra network weight
    pub fn replace<'a>(&self, text: &'a str) -> Result<Cow<'a, str>, ParseError> {
        if self.entries.is_empty() {
            return Ok(Cow::Borrowed(text));
        }

        let mut prompt = Prompt::new(text)?;

        for entry in &self.entries {
            entry.process(&mut prompt);
        }

        Ok(Cow::Owned(prompt.to_string()))
    }
}

impl TryFrom<&str> for Replacer {
    type Error = RuleError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        let mut replacer = Self::new();
        replacer.add_rule(text)?;

        Ok(replacer)
    }
}
