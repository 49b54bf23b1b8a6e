use crate::token::{Token, TokenKind};

fn is_punctuation(b: u8) -> bool {
    TokenKind::from_char(char::from(b)).is_some()
}

/// Splits prompt into tokens. Never fails.
///
/// Punctuation becomes single character tokens. Anything in between is one text token with
/// surrounding whitespace trimmed; whitespace-only runs are dropped. Backslash escapes the next
/// character, so `a\,b` stays a single text token
pub fn tokenize(s: &str) -> Vec<Token> {
    // all punctuation and backslash are ascii so byte positions stop on char boundaries
    let bytes = s.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if let Some(kind) = TokenKind::from_char(char::from(bytes[i])) {
            let space_before = s[..i].chars().next_back().is_some_and(char::is_whitespace);
            tokens.push(Token::new(kind, &s[i..i + 1]).with_space_before(space_before));
            i += 1;
            continue;
        }

        let start = i;
        while i < bytes.len() {
            match bytes[i] {
                b'\\' => i = bytes.len().min(i + 2),
                b if is_punctuation(b) => break,
                _ => i += 1,
            }
        }

        if let Some(token) = Token::new_text(&s[start..i]) {
            tokens.push(token);
        }
    }

    tokens
}
