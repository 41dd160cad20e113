//! Streaming lexical scanner for VCL definition files.
//!
//! Converts a source file into classified tokens, each carrying the
//! file, 0-based row, and 0-based byte column of its first character.
//! Whitespace and `#` line comments are skipped.
//!
//! # Quick start
//!
//! ```
//! use vcl_lexer::{TokenKind, tokenize};
//!
//! let tokens = tokenize("demo.vcl", "proc main() { print \"hi\"; }").unwrap();
//! assert_eq!(tokens[0].kind, TokenKind::Identity("proc".to_string()));
//! assert_eq!(tokens[0].to_string(), "demo.vcl:1:1 (IDENTITY, proc)");
//! assert_eq!(tokens[6].to_string(), "demo.vcl:1:21 (STRING, \"hi\")");
//! ```
//!
//! ## Streaming from a file
//!
//! ```no_run
//! use vcl_lexer::Lexer;
//!
//! let mut lexer = Lexer::open("main.vcl");
//! if lexer.is_live() {
//!     while let Some(token) = lexer.next_token()? {
//!         println!("{token}");
//!     }
//! }
//! # Ok::<(), vcl_lexer::LexError>(())
//! ```

#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

pub mod lexer;
pub mod token;

pub use lexer::{LexError, LexErrorKind, Lexer, tokenize, tokenize_file};
pub use token::{Location, Token, TokenKind, TokenType};
