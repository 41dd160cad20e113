#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;
use vcl_lexer::{Token, TokenKind, tokenize};

pub const FILE: &str = "test.vcl";

pub fn lex(input: &str) -> Vec<Token> {
    tokenize(FILE, input).unwrap_or_else(|e| panic!("tokenize failed: {e}\n--- input ---\n{input}"))
}

pub fn kinds(input: &str) -> Vec<TokenKind> {
    lex(input).into_iter().map(|t| t.kind).collect()
}

pub fn ident(text: &str) -> TokenKind {
    TokenKind::Identity(text.to_string())
}

pub fn string(text: &str) -> TokenKind {
    TokenKind::String(text.to_string())
}

/// Write `contents` to a temporary `.vcl` file kept alive by the handle.
pub fn source_file(contents: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".vcl")
        .tempfile()
        .expect("create temp file");
    file.write_all(contents).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}
