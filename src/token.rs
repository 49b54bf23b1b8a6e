use std::{
    borrow::Cow,
    fmt,
    hash::{Hash, Hasher},
};

/// Kind of a lexed prompt unit. Everything except [`TokenKind::Text`] is a single punctuation
/// character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Text,
    Colon,
    Pipe,
    Comma,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenAngle,
    CloseAngle,
}

impl TokenKind {
    /// Returns punctuation kind for given character
    pub fn from_char(c: char) -> Option<Self> {
        Some(match c {
            ':' => Self::Colon,
            '|' => Self::Pipe,
            ',' => Self::Comma,
            '(' => Self::OpenParen,
            ')' => Self::CloseParen,
            '[' => Self::OpenBracket,
            ']' => Self::CloseBracket,
            '{' => Self::OpenCurly,
            '}' => Self::CloseCurly,
            '<' => Self::OpenAngle,
            '>' => Self::CloseAngle,
            _ => return None,
        })
    }

    pub fn is_opening(self) -> bool {
        matches!(
            self,
            Self::OpenParen | Self::OpenBracket | Self::OpenCurly | Self::OpenAngle
        )
    }

    pub fn is_closing(self) -> bool {
        matches!(
            self,
            Self::CloseParen | Self::CloseBracket | Self::CloseCurly | Self::CloseAngle
        )
    }

    /// Whether a single space always goes between `prev` and `self` when joining tokens back
    /// into text.
    ///
    /// Only text or an opening bracket following a comma or a closing bracket is spaced, which
    /// keeps `a:b:c` and `a|b` tight
    pub fn spaced_after(self, prev: Self) -> bool {
        (self == Self::Text || self.is_opening()) && (prev == Self::Comma || prev.is_closing())
    }
}

/// Lexed prompt unit.
///
/// `text` is stored as written, backslash escapes included. Equality compares kind and the
/// stored form, so `a\,b` and `a,b` text tokens differ even though both render as `a,b`
#[derive(Debug, Clone)]
pub struct Token {
    kind: TokenKind,
    text: String,
    // whitespace preceded this token in source. keeps `a (b)` apart while `a(b)` stays tight
    space_before: bool,
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.text == other.text
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.text.hash(state);
    }
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            space_before: false,
        }
    }

    /// Marks token as preceded by whitespace in source
    #[must_use]
    pub fn with_space_before(mut self, space_before: bool) -> Self {
        self.space_before = space_before;
        self
    }

    pub fn space_before(&self) -> bool {
        self.space_before
    }

    /// Trims surrounding whitespace. Returns `None` if nothing is left
    pub fn new_text(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        Some(Self::new(TokenKind::Text, s))
    }

    /// Punctuation token for `c`, `None` if `c` is not punctuation
    pub fn new_char(c: char) -> Option<Self> {
        TokenKind::from_char(c).map(|kind| Self::new(kind, c.to_string()))
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Stored text with escapes
    pub fn raw(&self) -> &str {
        &self.text
    }

    /// Text with one backslash removed from each escape pair
    pub fn rendered(&self) -> Cow<'_, str> {
        render(&self.text)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered())
    }
}

/// Replaces every `\X` pair with `X`. A lone trailing backslash is kept
pub fn render(s: &str) -> Cow<'_, str> {
    if !s.contains('\\') {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(escaped) => out.push(escaped),
                None => out.push(c),
            }
        } else {
            out.push(c);
        }
    }

    Cow::Owned(out)
}

/// Collapses every unescaped whitespace run into a single space. Escape pairs are kept as is
pub fn collapse_whitespace(s: &str) -> Cow<'_, str> {
    let needs_work = s.contains("  ") || s.contains(|c: char| c.is_whitespace() && c != ' ');
    if !needs_work {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    let mut in_whitespace = false;

    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push(' ');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;

        out.push(c);
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        }
    }

    Cow::Owned(out)
}

/// Joins tokens back into text, normalizing spacing. Escapes are written as they were lexed so
/// the result parses into the same tokens.
///
/// On top of [`TokenKind::spaced_after`], two adjacent text tokens are always spaced (they only
/// meet after something between them was taken out) and an opening bracket after text is spaced
/// when it was in source
pub fn reconstruct(tokens: &[Token]) -> String {
    let mut out = String::new();
    write_tokens(&mut out, tokens);
    out
}

pub(crate) fn write_tokens(out: &mut String, tokens: &[Token]) {
    let mut prev: Option<TokenKind> = None;

    for token in tokens {
        let spaced = prev.is_some_and(|prev| {
            token.kind.spaced_after(prev)
                || (prev == TokenKind::Text
                    && (token.kind == TokenKind::Text
                        || (token.kind.is_opening() && token.space_before)))
        });
        if spaced {
            out.push(' ');
        }
        out.push_str(&collapse_whitespace(token.raw()));
        prev = Some(token.kind);
    }
}
