use std::{error::Error, fmt};

use crate::token::{Token, TokenKind};

/// Inline `<type:name:weight>` annotation
#[derive(Debug, Clone, PartialEq)]
pub struct ExtraNetwork {
    pub net_type: String,
    pub net_name: String,
    pub weight: f64,
}

impl ExtraNetwork {
    pub fn new(net_type: impl Into<String>, net_name: impl Into<String>, weight: f64) -> Self {
        Self {
            net_type: net_type.into(),
            net_name: net_name.into(),
            weight,
        }
    }

    /// Builds annotation from captured tokens, angle brackets included.
    ///
    /// Colons split the contents into parts:
    ///
    /// * `<name>` has empty type and weight 1
    /// * `<type:name>` has weight 1
    /// * `<type:name:with:colons:weight>` keeps inner colons in the name, last part must be a float
    pub fn from_tokens(tokens: &[Token]) -> Result<Self, ParseError> {
        let mut parts = vec![String::new()];

        for token in tokens {
            match token.kind() {
                TokenKind::Colon => parts.push(String::new()),
                TokenKind::OpenAngle | TokenKind::CloseAngle => {}
                _ => {
                    if let Some(part) = parts.last_mut() {
                        part.push_str(&token.rendered());
                    }
                }
            }
        }

        let mut parts = parts.into_iter();

        Ok(match parts.len() {
            1 => Self::new("", parts.next().unwrap_or_default(), 1.0),
            2 => {
                let net_type = parts.next().unwrap_or_default();
                Self::new(net_type, parts.next().unwrap_or_default(), 1.0)
            }
            _ => {
                let net_type = parts.next().unwrap_or_default();
                let mut rest: Vec<String> = parts.collect();
                let weight = rest.pop().unwrap_or_default();

                Self::new(net_type, rest.join(":"), parse_weight(&weight)?)
            }
        })
    }

    /// Registry key. Two annotations with the same key are the same network
    pub fn key(&self) -> String {
        format!("{}:{}", self.net_type, self.net_name)
    }
}

fn parse_weight(s: &str) -> Result<f64, ParseError> {
    s.trim().parse().map_err(|_| ParseError {
        weight: s.to_owned(),
    })
}

impl fmt::Display for ExtraNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}:{}:{:.3}>", self.net_type, self.net_name, self.weight)
    }
}

/// Weight segment of an annotation is not a number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub weight: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "extra network weight is not a number: {:?}", self.weight)
    }
}

impl Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::{ExtraNetwork, ParseError};
    use crate::lexer::tokenize;

    fn parse(s: &str) -> Result<ExtraNetwork, ParseError> {
        ExtraNetwork::from_tokens(&tokenize(s))
    }

    #[test]
    fn name_only() {
        assert_eq!(parse("<foo>").unwrap(), ExtraNetwork::new("", "foo", 1.0));
    }

    #[test]
    fn type_and_name() {
        assert_eq!(
            parse("<lora:foo>").unwrap(),
            ExtraNetwork::new("lora", "foo", 1.0)
        );
    }

    #[test]
    fn weighted() {
        assert_eq!(
            parse("<lora:foo:0.5>").unwrap(),
            ExtraNetwork::new("lora", "foo", 0.5)
        );
        assert_eq!(
            parse("<lora: foo : -1>").unwrap(),
            ExtraNetwork::new("lora", "foo", -1.0)
        );
    }

    #[test]
    fn colons_kept_in_name() {
        assert_eq!(
            parse("<hypernet:a:b:c:2>").unwrap(),
            ExtraNetwork::new("hypernet", "a:b:c", 2.0)
        );
    }

    #[test]
    fn punctuation_rendered_into_parts() {
        assert_eq!(
            parse(r"<lora:foo(v2)\:x:1>").unwrap(),
            ExtraNetwork::new("lora", "foo(v2):x", 1.0)
        );
    }

    #[test]
    fn inner_whitespace_kept() {
        let extra_network = parse("<lora:my  model:1>").unwrap();

        assert_eq!(extra_network, ExtraNetwork::new("lora", "my  model", 1.0));
        assert_eq!(extra_network.to_string(), "<lora:my  model:1.000>");
    }

    #[test]
    fn bad_weight() {
        assert_eq!(
            parse("<lora:foo:abc>"),
            Err(ParseError {
                weight: "abc".to_owned()
            })
        );
        assert!(parse("<lora:foo:>").is_err());
    }

    #[test]
    fn display_three_decimals() {
        assert_eq!(
            ExtraNetwork::new("lora", "foo", 0.8).to_string(),
            "<lora:foo:0.800>"
        );
        assert_eq!(ExtraNetwork::new("", "foo", 1.0).to_string(), "<:foo:1.000>");
    }

    #[test]
    fn key() {
        assert_eq!(ExtraNetwork::new("lora", "foo", 0.1).key(), "lora:foo");
    }
}
