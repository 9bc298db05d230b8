//! Parser for the Go type expressions used in manifests, e.g. `map[string]*bytes.Buffer`
//! or `func(int) (bool, error)`.

use std::ops::Range;

use crate::lexer::{Spanned, Token, tokenize};

/// An unresolved type expression.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    Name { qualifier: Option<String>, name: String, span: Range<usize> },
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    Array(u64, Box<TypeExpr>),
    Map(Box<TypeExpr>, Box<TypeExpr>),
    Func(FuncExpr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncExpr {
    pub params: Vec<VarExpr>,
    pub results: Vec<VarExpr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarExpr {
    pub name: Option<String>,
    pub typ: TypeExpr,
}

impl TypeExpr {
    /// The type name of an embedded field `T`, `*T` or `pkg.T`.
    pub fn embedded_name(&self) -> Option<&str> {
        match self {
            TypeExpr::Name { name, .. } => Some(name),
            TypeExpr::Pointer(elem) => match elem.as_ref() {
                TypeExpr::Name { name, .. } => Some(name),
                _ => None,
            },
            _ => None,
        }
    }
}

/// A syntax error together with the offending span of the input.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    pub span: Range<usize>,
    pub expected: String,
}

pub fn parse_type(input: &str) -> Result<TypeExpr, SyntaxError> {
    let tokens = tokenize(input)
        .map_err(|span| SyntaxError { span, expected: "a valid token".to_owned() })?;
    let mut parser = Parser { tokens, pos: 0, len: input.len() };
    let typ = parser.typ()?;
    match parser.peek() {
        None => Ok(typ),
        Some(_) => Err(parser.error("end of type")),
    }
}

struct Parser {
    tokens: Vec<Spanned<Token>>,
    pos: usize,
    len: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(token, _)| token)
    }

    fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n).map(|(token, _)| token)
    }

    fn span(&self) -> Range<usize> {
        match self.tokens.get(self.pos) {
            Some((_, span)) => span.clone(),
            None => self.len..self.len,
        }
    }

    fn error(&self, expected: &str) -> SyntaxError {
        SyntaxError { span: self.span(), expected: expected.to_owned() }
    }

    fn expect(&mut self, expected: Token) -> Result<(), SyntaxError> {
        match self.peek() {
            Some(token) if *token == expected => {
                self.pos += 1;
                Ok(())
            }
            _ => Err(self.error(&format!("`{expected}`"))),
        }
    }

    fn ident(&mut self) -> Result<(String, Range<usize>), SyntaxError> {
        if let Some((Token::Ident(id), span)) = self.tokens.get(self.pos).cloned() {
            self.pos += 1;
            return Ok((id, span));
        }
        Err(self.error("an identifier"))
    }

    fn typ(&mut self) -> Result<TypeExpr, SyntaxError> {
        match self.peek() {
            Some(Token::Star) => {
                self.pos += 1;
                Ok(TypeExpr::Pointer(Box::new(self.typ()?)))
            }
            Some(Token::LBracket) => {
                self.pos += 1;
                match self.peek() {
                    Some(Token::RBracket) => {
                        self.pos += 1;
                        Ok(TypeExpr::Slice(Box::new(self.typ()?)))
                    }
                    Some(&Token::IntLit(len)) => {
                        self.pos += 1;
                        self.expect(Token::RBracket)?;
                        Ok(TypeExpr::Array(len, Box::new(self.typ()?)))
                    }
                    _ => Err(self.error("`]` or an array length")),
                }
            }
            Some(Token::Map) => {
                self.pos += 1;
                self.expect(Token::LBracket)?;
                let key = self.typ()?;
                self.expect(Token::RBracket)?;
                Ok(TypeExpr::Map(Box::new(key), Box::new(self.typ()?)))
            }
            Some(Token::Func) => {
                self.pos += 1;
                Ok(TypeExpr::Func(self.func()?))
            }
            Some(Token::LParen) => {
                self.pos += 1;
                let typ = self.typ()?;
                self.expect(Token::RParen)?;
                Ok(typ)
            }
            Some(Token::Ident(_)) => self.type_name(),
            _ => Err(self.error("a type")),
        }
    }

    fn type_name(&mut self) -> Result<TypeExpr, SyntaxError> {
        let (first, span) = self.ident()?;
        if self.peek() == Some(&Token::Dot) {
            self.pos += 1;
            let (name, last) = self.ident()?;
            return Ok(TypeExpr::Name { qualifier: Some(first), name, span: span.start..last.end });
        }
        Ok(TypeExpr::Name { qualifier: None, name: first, span })
    }

    fn func(&mut self) -> Result<FuncExpr, SyntaxError> {
        let params = self.var_list()?;
        let results = match self.peek() {
            Some(Token::LParen) => self.var_list()?,
            Some(Token::RParen | Token::RBracket | Token::Comma) | None => vec![],
            Some(_) => vec![VarExpr { name: None, typ: self.typ()? }],
        };
        Ok(FuncExpr { params, results })
    }

    /// A parenthesized list of parameters, each either `name T` or just `T`.
    fn var_list(&mut self) -> Result<Vec<VarExpr>, SyntaxError> {
        self.expect(Token::LParen)?;
        let mut vars = Vec::new();
        while self.peek() != Some(&Token::RParen) {
            vars.push(self.var()?);
            match self.peek() {
                Some(Token::Comma) => self.pos += 1,
                Some(Token::RParen) => {}
                _ => return Err(self.error("`,` or `)`")),
            }
        }
        self.expect(Token::RParen)?;
        Ok(vars)
    }

    fn var(&mut self) -> Result<VarExpr, SyntaxError> {
        let named = matches!(self.peek(), Some(Token::Ident(_)))
            && matches!(
                self.peek_nth(1),
                Some(
                    Token::Ident(_)
                        | Token::Star
                        | Token::LBracket
                        | Token::Map
                        | Token::Func
                        | Token::LParen
                )
            );
        if named {
            let (name, _) = self.ident()?;
            return Ok(VarExpr { name: Some(name), typ: self.typ()? });
        }
        Ok(VarExpr { name: None, typ: self.typ()? })
    }
}
