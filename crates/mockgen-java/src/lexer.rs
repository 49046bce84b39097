// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Tokenizer for Java source code.
//!
//! Produces the token stream the declaration parser works on. Whitespace and
//! comments are dropped; every token keeps its byte span so edits can be
//! anchored back into the original text.
//!
//! Punctuation is emitted one character per token. The parser never needs
//! multi-character operators, and single `>` tokens keep nested generics
//! (`List<List<String>>`) trivial to close.

use crate::parser::SyntaxError;

/// Token category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier or keyword.
    Ident,
    /// Numeric literal.
    Number,
    /// String literal or text block.
    Str,
    /// Character literal.
    Char,
    /// Single punctuation character.
    Punct,
}

/// A token with its byte span in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Category.
    pub kind: TokenKind,
    /// Source text of the token.
    pub text: &'a str,
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Token<'_> {
    /// Is this the punctuation character `c`?
    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct && self.text.starts_with(c)
    }

    /// Is this the identifier or keyword `word`?
    pub fn is_ident(&self, word: &str) -> bool {
        self.kind == TokenKind::Ident && self.text == word
    }
}

/// Tokenize Java source.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, SyntaxError> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0usize;

    while pos < bytes.len() {
        let b = bytes[pos];

        if b.is_ascii_whitespace() {
            pos += 1;
            continue;
        }

        if b == b'/' && bytes.get(pos + 1) == Some(&b'/') {
            pos = source[pos..]
                .find('\n')
                .map(|i| pos + i + 1)
                .unwrap_or(bytes.len());
            continue;
        }

        if b == b'/' && bytes.get(pos + 1) == Some(&b'*') {
            let close = source[pos + 2..]
                .find("*/")
                .ok_or_else(|| SyntaxError::new("unterminated block comment", pos))?;
            pos = pos + 2 + close + 2;
            continue;
        }

        let start = pos;
        let kind = if source[pos..].starts_with("\"\"\"") {
            let close = source[pos + 3..]
                .find("\"\"\"")
                .ok_or_else(|| SyntaxError::new("unterminated text block", start))?;
            pos = pos + 3 + close + 3;
            TokenKind::Str
        } else if b == b'"' || b == b'\'' {
            pos = quoted_end(bytes, pos)
                .ok_or_else(|| SyntaxError::new("unterminated literal", start))?;
            if b == b'"' {
                TokenKind::Str
            } else {
                TokenKind::Char
            }
        } else if b.is_ascii_digit()
            || (b == b'.' && bytes.get(pos + 1).is_some_and(u8::is_ascii_digit))
        {
            pos = number_end(bytes, pos);
            TokenKind::Number
        } else if let Some(ch) = source[pos..].chars().next().filter(|c| is_ident_start(*c)) {
            pos += ch.len_utf8();
            while let Some(ch) = source[pos..].chars().next().filter(|c| is_ident_part(*c)) {
                pos += ch.len_utf8();
            }
            TokenKind::Ident
        } else {
            let ch = source[pos..].chars().next().unwrap_or(' ');
            pos += ch.len_utf8();
            TokenKind::Punct
        };

        tokens.push(Token {
            kind,
            text: &source[start..pos],
            start,
            end: pos,
        });
    }

    Ok(tokens)
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// End offset of a string or char literal starting at `pos`.
fn quoted_end(bytes: &[u8], pos: usize) -> Option<usize> {
    let quote = bytes[pos];
    let mut i = pos + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return None,
            c if c == quote => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

/// End offset of a numeric literal: digits, letters (hex, suffixes,
/// exponents), underscores, dots and exponent signs.
fn number_end(bytes: &[u8], pos: usize) -> usize {
    let mut i = pos;
    while i < bytes.len() {
        let c = bytes[i];
        if c.is_ascii_alphanumeric() || c == b'_' || c == b'.' {
            i += 1;
        } else if (c == b'+' || c == b'-')
            && matches!(bytes[i - 1], b'e' | b'E' | b'p' | b'P')
            && !is_hex_literal(bytes, pos, i)
        {
            i += 1;
        } else {
            break;
        }
    }
    i
}

/// `0x1e-2` is `0x1e` minus 2; only `p` exponents apply to hex literals.
fn is_hex_literal(bytes: &[u8], start: usize, sign_pos: usize) -> bool {
    let literal = &bytes[start..sign_pos];
    literal.len() > 2
        && literal[0] == b'0'
        && matches!(literal[1], b'x' | b'X')
        && matches!(bytes[sign_pos - 1], b'e' | b'E')
}

// ============================================================================
// Cursor
// ============================================================================

/// Forward-only cursor over a token slice.
#[derive(Debug)]
pub struct Cursor<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    source_len: usize,
}

impl<'t, 'a> Cursor<'t, 'a> {
    /// Cursor at the first token. `source_len` anchors end-of-input errors.
    pub fn new(tokens: &'t [Token<'a>], source_len: usize) -> Self {
        Cursor {
            tokens,
            pos: 0,
            source_len,
        }
    }

    /// Current token.
    pub fn peek(&self) -> Option<&'t Token<'a>> {
        self.tokens.get(self.pos)
    }

    /// Token `n` positions ahead of the current one.
    pub fn peek_at(&self, n: usize) -> Option<&'t Token<'a>> {
        self.tokens.get(self.pos + n)
    }

    /// Consume and return the current token.
    pub fn bump(&mut self) -> Option<&'t Token<'a>> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// All tokens consumed?
    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Byte offset of the current token, or the source length at the end.
    pub fn offset(&self) -> usize {
        self.peek().map(|t| t.start).unwrap_or(self.source_len)
    }

    /// End offset of the most recently consumed token.
    pub fn prev_end(&self) -> usize {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.end)
            .unwrap_or(0)
    }

    /// Is the current token the punctuation `c`?
    pub fn is_punct(&self, c: char) -> bool {
        self.peek().is_some_and(|t| t.is_punct(c))
    }

    /// Is the current token the identifier/keyword `word`?
    pub fn is_ident(&self, word: &str) -> bool {
        self.peek().is_some_and(|t| t.is_ident(word))
    }

    /// Is the current token any identifier?
    pub fn is_any_ident(&self) -> bool {
        self.peek().is_some_and(|t| t.kind == TokenKind::Ident)
    }

    /// Consume the punctuation `c` if present.
    pub fn eat_punct(&mut self, c: char) -> bool {
        if self.is_punct(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume the keyword `word` if present.
    pub fn eat_ident(&mut self, word: &str) -> bool {
        if self.is_ident(word) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume the punctuation `c` or fail.
    pub fn expect_punct(&mut self, c: char) -> Result<&'t Token<'a>, SyntaxError> {
        if self.is_punct(c) {
            Ok(&self.tokens[self.bump_index()])
        } else {
            Err(self.error(format!("expected '{}'", c)))
        }
    }

    /// Consume an identifier or fail.
    pub fn expect_ident(&mut self) -> Result<&'a str, SyntaxError> {
        if self.is_any_ident() {
            Ok(self.tokens[self.bump_index()].text)
        } else {
            Err(self.error("expected identifier"))
        }
    }

    /// Skip a balanced group starting at the current `open` token, e.g. a
    /// method body or an annotation argument list. Only `open`/`close` are
    /// counted.
    pub fn skip_balanced(&mut self, open: char, close: char) -> Result<(), SyntaxError> {
        let start = self.offset();
        self.expect_punct(open)?;
        let mut depth = 1usize;
        while let Some(token) = self.bump() {
            if token.is_punct(open) {
                depth += 1;
            } else if token.is_punct(close) {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
        }
        Err(SyntaxError::new(format!("unclosed '{}'", open), start))
    }

    /// Error at the current position.
    pub fn error(&self, message: impl Into<String>) -> SyntaxError {
        let message = message.into();
        match self.peek() {
            Some(token) => SyntaxError::new(format!("{}, found '{}'", message, token.text), token.start),
            None => SyntaxError::new(format!("{}, found end of input", message), self.source_len),
        }
    }

    fn bump_index(&mut self) -> usize {
        self.pos += 1;
        self.pos - 1
    }
}
