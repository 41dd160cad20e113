use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::{debug, trace, warn};

use crate::token::{Location, Token, TokenKind};

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// The source file could not be opened.
    ResourceUnavailable(io::ErrorKind),
    /// Byte that cannot start any token.
    NotImplemented(u8),
    /// End of input before the closing `"`.
    UnterminatedString,
    /// Reading the open source failed.
    Read(io::ErrorKind),
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResourceUnavailable(kind) => {
                write!(f, "source file unavailable: {kind}")
            }
            Self::NotImplemented(byte) => {
                write!(
                    f,
                    "not implemented: no token starts with '{}'",
                    byte.escape_ascii()
                )
            }
            Self::UnterminatedString => {
                write!(f, "unterminated string")
            }
            Self::Read(kind) => {
                write!(f, "read failed: {kind}")
            }
        }
    }
}

/// Error produced during lexing. Every error ends the session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at {location}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub location: Location,
}

/// Tokenize an in-memory source into a sequence of tokens.
///
/// `file_path` only labels token locations.
///
/// # Errors
///
/// Returns `LexError` on the first unclassifiable character or
/// unterminated string.
pub fn tokenize(file_path: &str, input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::from_reader(file_path, input.as_bytes()).collect()
}

/// Open `path` and tokenize the whole file.
///
/// # Errors
///
/// Returns `LexError` if the file cannot be opened or read, or on
/// the first lexical error.
pub fn tokenize_file(path: impl AsRef<Path>) -> Result<Vec<Token>, LexError> {
    Lexer::open(path).collect()
}

/// Streaming scanner over a single source.
///
/// The source is opened eagerly. Check [`Lexer::is_live`] before
/// scanning: a lexer whose file failed to open reports
/// [`LexErrorKind::ResourceUnavailable`] on its first scan.
///
/// The underlying reader is dropped as soon as the session ends, by
/// exhaustion or by error, and in any case when the lexer is dropped.
pub struct Lexer<R = BufReader<File>> {
    file_path: String,
    state: State<R>,
}

enum State<R> {
    Live(Source<R>),
    Unavailable(io::ErrorKind),
    Closed,
}

impl Lexer {
    /// Open the file at `path` for scanning.
    ///
    /// Never fails; an open failure leaves the lexer not live.
    #[must_use]
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let file_path = path.display().to_string();

        match open_source(path) {
            Ok(file) => {
                debug!(path = %file_path, "opened source");
                Self::from_reader(file_path, BufReader::new(file))
            }
            Err(err) => {
                warn!(path = %file_path, error = %err, "cannot open source");
                Self {
                    file_path,
                    state: State::Unavailable(err.kind()),
                }
            }
        }
    }
}

fn open_source(path: &Path) -> io::Result<File> {
    let file = File::open(path)?;
    if file.metadata()?.is_dir() {
        return Err(io::Error::from(io::ErrorKind::IsADirectory));
    }
    Ok(file)
}

impl<R: BufRead> Lexer<R> {
    /// Scan an already-open reader. `file_path` labels locations.
    #[must_use]
    pub fn from_reader(file_path: impl Into<String>, reader: R) -> Self {
        let file_path = file_path.into();
        Self {
            state: State::Live(Source::new(file_path.clone(), reader)),
            file_path,
        }
    }

    /// Whether the source is open and scanning may proceed.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self.state, State::Live(_))
    }

    /// Path label carried by every token location, also after the
    /// session has ended.
    #[must_use]
    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    /// Produce the next token, or `None` once input is exhausted.
    ///
    /// # Errors
    ///
    /// Returns `LexError` when the source is unavailable or unreadable,
    /// on a character that starts no token, and on an unterminated
    /// string. The session is closed afterwards and later calls return
    /// `Ok(None)`.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        let result = match &mut self.state {
            State::Live(source) => source.next_token(),
            State::Unavailable(kind) => Err(LexError {
                kind: LexErrorKind::ResourceUnavailable(*kind),
                location: Location::new(self.file_path.as_str(), 0, 0),
            }),
            State::Closed => return Ok(None),
        };

        match &result {
            Ok(Some(token)) => trace!(%token, "scanned token"),
            Ok(None) => {
                debug!(path = %self.file_path, "source exhausted");
                self.state = State::Closed;
            }
            Err(err) => {
                debug!(error = %err, "scanning aborted");
                self.state = State::Closed;
            }
        }
        result
    }
}

impl<R: BufRead> Iterator for Lexer<R> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

impl<R: BufRead> std::iter::FusedIterator for Lexer<R> {}

/// `isspace` in the C locale.
const fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\x0B' | b'\x0C' | b'\r')
}

/// Byte cursor with row/column bookkeeping.
struct Source<R> {
    file_path: String,
    reader: R,
    offset: usize,
    line_start: usize,
    row: usize,
}

impl<R: BufRead> Source<R> {
    const fn new(file_path: String, reader: R) -> Self {
        Self {
            file_path,
            reader,
            offset: 0,
            line_start: 0,
            row: 0,
        }
    }

    fn location(&self) -> Location {
        Location::new(self.file_path.as_str(), self.row, self.offset - self.line_start)
    }

    fn read_error(&self, err: &io::Error) -> LexError {
        LexError {
            kind: LexErrorKind::Read(err.kind()),
            location: self.location(),
        }
    }

    fn peek(&mut self) -> Result<Option<u8>, LexError> {
        loop {
            let filled = self.reader.fill_buf().map(|buf| buf.first().copied());
            match filled {
                Ok(byte) => return Ok(byte),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(self.read_error(&err)),
            }
        }
    }

    fn advance(&mut self) -> Result<Option<u8>, LexError> {
        let byte = self.peek()?;
        if let Some(b) = byte {
            self.reader.consume(1);
            self.offset += 1;
            if b == b'\n' {
                self.row += 1;
                self.line_start = self.offset;
            }
        }
        Ok(byte)
    }

    fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_trivia()?;

        let Some(byte) = self.peek()? else {
            return Ok(None);
        };
        let location = self.location();

        let kind = if byte.is_ascii_alphabetic() {
            TokenKind::Identity(self.read_run(u8::is_ascii_alphanumeric)?)
        } else if let Some(kind) = TokenKind::punctuation(byte) {
            self.advance()?;
            kind
        } else if byte.is_ascii_digit() {
            let digits = self.read_run(u8::is_ascii_digit)?;
            TokenKind::Number(parse_number(&digits, &location))
        } else if byte == b'"' {
            TokenKind::String(self.read_string(&location)?)
        } else {
            return Err(LexError {
                kind: LexErrorKind::NotImplemented(byte),
                location,
            });
        };

        Ok(Some(Token::new(kind, location)))
    }

    /// Skip whitespace and `#` line comments, in any interleaving.
    fn skip_trivia(&mut self) -> Result<(), LexError> {
        loop {
            while self.peek()?.is_some_and(is_space) {
                self.advance()?;
            }
            if self.peek()? != Some(b'#') {
                return Ok(());
            }
            // the comment's newline is consumed with it
            while let Some(b) = self.advance()? {
                if b == b'\n' {
                    break;
                }
            }
        }
    }

    /// Consume the maximal run of bytes accepted by `accept`.
    /// End of input closes the run.
    fn read_run(&mut self, accept: fn(&u8) -> bool) -> Result<String, LexError> {
        let mut run = Vec::new();
        while let Some(b) = self.peek()?.filter(accept) {
            run.push(b);
            self.advance()?;
        }
        Ok(String::from_utf8_lossy(&run).into_owned())
    }

    fn read_string(&mut self, start: &Location) -> Result<String, LexError> {
        self.advance()?; // opening quote

        let mut value = Vec::new();
        loop {
            match self.advance()? {
                None => {
                    return Err(LexError {
                        kind: LexErrorKind::UnterminatedString,
                        location: start.clone(),
                    });
                }
                Some(b'"') => break,
                Some(b) => value.push(b),
            }
        }
        Ok(String::from_utf8_lossy(&value).into_owned())
    }
}

/// Best-effort base-10 parse: a run too large for `i64` yields 0.
fn parse_number(digits: &str, location: &Location) -> i64 {
    digits.parse().unwrap_or_else(|err| {
        warn!(%location, digits, error = %err, "number literal out of range, using 0");
        0
    })
}
