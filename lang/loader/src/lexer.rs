use std::fmt;
use std::ops::Range;

use logos::Logos;

#[derive(Default, Debug, Clone, PartialEq)]
pub enum LexicalError {
    #[default]
    InvalidToken,
}

impl fmt::Display for LexicalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Tokens of Go type expressions as they appear in a manifest.
#[derive(Logos, Clone, Debug, PartialEq)]
#[logos(skip r"[ \t\r\n]+", error = LexicalError)]
pub enum Token {
    // Keywords
    //
    //
    #[token("map")]
    Map,
    #[token("func")]
    Func,

    // Parens and Brackets
    //
    //
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    // Symbols
    //
    //
    #[token("*")]
    Star,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,

    // Identifiers
    //
    // Go identifiers consist of letters, digits and underscores and must not start with a digit.
    #[regex(r"[\p{L}_][\p{L}\p{Nd}_]*", |lex| lex.slice().to_string())]
    Ident(String),

    // Literals
    //
    //
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<u64>().ok())]
    IntLit(u64),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Map => write!(f, "map"),
            Token::Func => write!(f, "func"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Star => write!(f, "*"),
            Token::Comma => write!(f, ","),
            Token::Dot => write!(f, "."),
            Token::Ident(id) => write!(f, "{id}"),
            Token::IntLit(n) => write!(f, "{n}"),
        }
    }
}

pub type Spanned<Tok> = (Tok, Range<usize>);

/// Split the input into tokens, or return the span of the first invalid token.
pub fn tokenize(input: &str) -> Result<Vec<Spanned<Token>>, Range<usize>> {
    Token::lexer(input)
        .spanned()
        .map(|(token, span)| match token {
            Ok(token) => Ok((token, span)),
            Err(LexicalError::InvalidToken) => Err(span),
        })
        .collect()
}
