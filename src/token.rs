use std::fmt;

/// Source location of a token's first byte.
///
/// `row` and `col` are 0-based; `col` counts bytes from the start of
/// the current line. Rendering adds one to both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub file_path: String,
    pub row: usize,
    pub col: usize,
}

impl Location {
    #[must_use]
    pub fn new(file_path: impl Into<String>, row: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            row,
            col,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file_path, self.row + 1, self.col + 1)
    }
}

/// Payload-free token classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Identity,
    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,
    Semicolon,
    Number,
    String,
    /// Reserved. The scanner never produces it.
    Return,
}

impl TokenType {
    /// Name used in the token listing.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Identity => "IDENTITY",
            Self::OpenParen => "OPEN_PAREN",
            Self::CloseParen => "CLOSE_PAREN",
            Self::OpenCurly => "OPEN_CURLY",
            Self::CloseCurly => "CLOSE_CURLY",
            Self::Semicolon => "SEMICOLON",
            Self::Number => "NUMBER",
            Self::String => "STRING",
            Self::Return => "RETURN",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Token kinds produced by the lexer, with their payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Bare word: a letter followed by letters or digits.
    Identity(String),
    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,
    Semicolon,
    /// Unsigned base-10 integer literal.
    Number(i64),
    /// Double-quoted string with the quotes stripped.
    String(String),
    Return,
}

impl TokenKind {
    #[must_use]
    pub const fn token_type(&self) -> TokenType {
        match self {
            Self::Identity(_) => TokenType::Identity,
            Self::OpenParen => TokenType::OpenParen,
            Self::CloseParen => TokenType::CloseParen,
            Self::OpenCurly => TokenType::OpenCurly,
            Self::CloseCurly => TokenType::CloseCurly,
            Self::Semicolon => TokenType::Semicolon,
            Self::Number(_) => TokenType::Number,
            Self::String(_) => TokenType::String,
            Self::Return => TokenType::Return,
        }
    }

    /// Kind for a single-byte punctuation token, if `byte` is one.
    #[must_use]
    pub const fn punctuation(byte: u8) -> Option<Self> {
        match byte {
            b'(' => Some(Self::OpenParen),
            b')' => Some(Self::CloseParen),
            b'{' => Some(Self::OpenCurly),
            b'}' => Some(Self::CloseCurly),
            b';' => Some(Self::Semicolon),
            _ => None,
        }
    }
}

/// A single token with its kind and source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: Location,
}

impl Token {
    #[must_use]
    pub const fn new(kind: TokenKind, location: Location) -> Self {
        Self { kind, location }
    }

    #[must_use]
    pub const fn token_type(&self) -> TokenType {
        self.kind.token_type()
    }

    /// Text payload of `IDENTITY` and `STRING` tokens.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Identity(text) | TokenKind::String(text) => Some(text),
            _ => None,
        }
    }

    /// Numeric payload of `NUMBER` tokens.
    #[must_use]
    pub const fn number(&self) -> Option<i64> {
        match self.kind {
            TokenKind::Number(n) => Some(n),
            _ => None,
        }
    }
}

/// Renders the listing line `<file>:<row>:<col> (<TYPE>[, <payload>])`.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}", self.location, self.token_type())?;
        match &self.kind {
            TokenKind::Identity(text) => write!(f, ", {text}")?,
            TokenKind::String(text) => write!(f, ", \"{text}\"")?,
            TokenKind::Number(n) => write!(f, ", {n}")?,
            TokenKind::OpenParen
            | TokenKind::CloseParen
            | TokenKind::OpenCurly
            | TokenKind::CloseCurly
            | TokenKind::Semicolon
            | TokenKind::Return => {}
        }
        f.write_str(")")
    }
}
