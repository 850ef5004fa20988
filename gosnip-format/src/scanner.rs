//! Go source tokenizer.
//!
//! The scanner keeps comments and newlines as tokens so callers can
//! reason about line layout and attached comments. It does not apply
//! semicolon insertion.

use std::ops::Range;

use gosnip_core::{Result, SourceContext};
use logos::{Lexer, Logos};

/// Token kinds recognized by the scanner.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\f]+")]
pub enum TokenKind {
    #[token("\n")]
    Newline,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    #[regex(r"[_\p{L}][_\p{L}\p{Nd}]*")]
    Ident,

    #[regex(r"[0-9][0-9a-zA-Z_.]*")]
    #[regex(r"\.[0-9][0-9a-zA-Z_]*")]
    Number,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,

    #[token("`", raw_string)]
    RawString,

    #[regex(r"'([^'\\\n]|\\.)+'")]
    Rune,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBrack,
    #[token("]")]
    RBrack,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,

    #[regex(r"[-+%&|^<>=!~]+")]
    #[token("*")]
    #[token("*=")]
    #[token("/")]
    #[token("/=")]
    #[token(":=")]
    #[token("...")]
    Operator,
}

fn block_comment(lex: &mut Lexer<'_, TokenKind>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => {
            lex.bump(lex.remainder().len());
            false
        }
    }
}

fn raw_string(lex: &mut Lexer<'_, TokenKind>) -> bool {
    match lex.remainder().find('`') {
        Some(end) => {
            lex.bump(end + 1);
            true
        }
        None => {
            lex.bump(lex.remainder().len());
            false
        }
    }
}

impl TokenKind {
    pub fn is_comment(&self) -> bool {
        matches!(self, TokenKind::LineComment | TokenKind::BlockComment)
    }

    pub fn is_opener(&self) -> bool {
        matches!(
            self,
            TokenKind::LParen | TokenKind::LBrack | TokenKind::LBrace
        )
    }

    pub fn is_closer(&self) -> bool {
        matches!(
            self,
            TokenKind::RParen | TokenKind::RBrack | TokenKind::RBrace
        )
    }

    /// The closing delimiter for an opener.
    pub fn closer(&self) -> Option<TokenKind> {
        match self {
            TokenKind::LParen => Some(TokenKind::RParen),
            TokenKind::LBrack => Some(TokenKind::RBrack),
            TokenKind::LBrace => Some(TokenKind::RBrace),
            _ => None,
        }
    }

    /// Delimiter text used in diagnostics.
    pub fn delimiter(&self) -> &'static str {
        match self {
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrack => "[",
            TokenKind::RBrack => "]",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            _ => "",
        }
    }
}

/// A token with its byte span in the scanned source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

impl Token {
    pub fn text<'s>(&self, src: &'s str) -> &'s str {
        &src[self.span.clone()]
    }

    /// Whether this is the identifier (or keyword) `word`.
    pub fn is_word(&self, src: &str, word: &str) -> bool {
        self.kind == TokenKind::Ident && self.text(src) == word
    }

    /// Whether the token text spans more than one line.
    pub fn is_multiline(&self, src: &str) -> bool {
        self.text(src).contains('\n')
    }
}

/// Tokenize the source held by `ctx`.
///
/// Fails with a parse error pointing at the first offending byte.
pub fn scan(ctx: &SourceContext) -> Result<Vec<Token>> {
    let src = ctx.src();
    let mut tokens = Vec::new();

    for (result, span) in TokenKind::lexer(src).spanned() {
        match result {
            Ok(kind) => tokens.push(Token { kind, span }),
            Err(()) => {
                let message = match src[span.clone()].chars().next() {
                    Some('/') => "comment not terminated".to_string(),
                    Some('`') => "raw string literal not terminated".to_string(),
                    Some('"') => "string literal not terminated".to_string(),
                    Some('\'') => "rune literal not terminated".to_string(),
                    Some(c) => format!("illegal character {c:?}"),
                    None => "unexpected end of input".to_string(),
                };
                return Err(ctx.parse_error(message, Some(span.start)));
            }
        }
    }

    Ok(tokens)
}

/// Tokens with newlines and comments removed.
pub fn significant(tokens: &[Token]) -> impl Iterator<Item = &Token> {
    tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Newline && !t.kind.is_comment())
}
