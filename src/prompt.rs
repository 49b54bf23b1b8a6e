use std::{fmt, str::FromStr};

use crate::{
    extra_network::{ExtraNetwork, ParseError},
    lexer::tokenize,
    token::{write_tokens, Token, TokenKind},
};

/// Tokenized prompt with extra networks pulled out of the body.
///
/// Serializing puts all extra networks in front of the body regardless of where they were
/// written, in the order they were first seen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Prompt {
    orig_tokens: Vec<Token>,
    pub(crate) tokens: Vec<Token>,
    // insertion ordered, keys are unique
    extra_networks: Vec<ExtraNetwork>,
}

impl Prompt {
    /// Fails only if an annotation has a malformed weight. Unterminated `<...` is kept as body
    /// tokens
    pub fn new(s: &str) -> Result<Self, ParseError> {
        let orig_tokens = tokenize(s);
        let mut prompt = Self {
            tokens: Vec::with_capacity(orig_tokens.len()),
            ..Default::default()
        };

        let mut captured: Vec<Token> = Vec::new();

        for token in &orig_tokens {
            if !captured.is_empty() {
                captured.push(token.clone());

                if token.kind() == TokenKind::CloseAngle {
                    prompt.add_extra_network(ExtraNetwork::from_tokens(&captured)?);
                    captured.clear();
                }
            } else if token.kind() == TokenKind::OpenAngle {
                captured.push(token.clone());
            } else {
                prompt.tokens.push(token.clone());
            }
        }

        prompt.tokens.append(&mut captured);
        prompt.orig_tokens = orig_tokens;

        Ok(prompt)
    }

    /// Lexer output before extraction
    pub fn orig_tokens(&self) -> &[Token] {
        &self.orig_tokens
    }

    /// Body tokens without extra networks
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn extra_networks(&self) -> &[ExtraNetwork] {
        &self.extra_networks
    }

    /// Looks up extra network by `type:name` key
    pub fn extra_network(&self, key: &str) -> Option<&ExtraNetwork> {
        self.extra_networks.iter().find(|en| en.key() == key)
    }

    /// Registers extra network. If one with the same key exists, it keeps its place and takes the
    /// higher of two weights
    pub fn add_extra_network(&mut self, extra_network: ExtraNetwork) {
        let key = extra_network.key();

        match self.extra_networks.iter_mut().find(|en| en.key() == key) {
            Some(existing) => existing.weight = existing.weight.max(extra_network.weight),
            None => self.extra_networks.push(extra_network),
        }
    }

    /// Replaces body token at `index` with `replacement` tokens and merges its extra networks
    pub(crate) fn splice(&mut self, index: usize, replacement: &Prompt) {
        self.tokens
            .splice(index..=index, replacement.tokens.iter().cloned());
        self.merge_extra_networks(replacement);
    }

    pub(crate) fn merge_extra_networks(&mut self, other: &Prompt) {
        for extra_network in &other.extra_networks {
            self.add_extra_network(extra_network.clone());
        }
    }
}

impl FromStr for Prompt {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();

        for extra_network in &self.extra_networks {
            out.push_str(&extra_network.to_string());
        }
        write_tokens(&mut out, &self.tokens);

        f.write_str(&out)
    }
}
