//! # Lexer for hint reference expressions

use crate::error::{ReferenceError, Result};
use logos::Logos;
use std::fmt;
use std::ops::Range;

/// Tokens of the reference language
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t]+")] // Horizontal whitespace is insignificant
pub enum Token {
    /// Unsigned decimal literal, kept as text until evaluation
    #[regex(r"[0-9]+", |lex| lex.slice().to_string())]
    Number(String),

    /// Identifier (registers, `cast`, type path segments)
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    /// Other single-character punctuation; lexes but never parses
    #[regex(r#"[!@#$%^&={}|:;"'<>?/\\]"#, |lex| lex.slice().chars().next())]
    Punct(char),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(digits) => write!(f, "{digits}"),
            Self::Ident(name) => write!(f, "{name}"),
            Self::LBracket => write!(f, "["),
            Self::RBracket => write!(f, "]"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Comma => write!(f, ","),
            Self::Dot => write!(f, "."),
            Self::Punct(c) => write!(f, "{c}"),
        }
    }
}

/// Token with its byte span in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub span: Range<usize>,
}

/// Split reference text into tokens
pub fn tokenize(source: &str) -> Result<Vec<Spanned>> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next() {
        let span = lexer.span();
        match token {
            Ok(token) => tokens.push(Spanned { token, span }),
            Err(()) => {
                return Err(ReferenceError::Syntax {
                    position: span.start,
                    message: format!("unexpected character {:?}", lexer.slice()),
                })
            }
        }
    }
    Ok(tokens)
}
