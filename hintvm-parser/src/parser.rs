//! Recursive-descent parser for hint references
//!
//! Alternatives are tried in order and a failed alternative rewinds to where
//! it started, so the grammar in [`crate::ast`] is implemented as written.
//! On failure the error points at the furthest token any alternative reached.

use crate::ast::{
    AddExp, AddOperator, ArithExp, CastExp, CellRefExp, DDerefExp, DerefExp, Expression,
    IdentifierExp, OffsetExp, ProdExp, RegisterOffset, TermExp, TypeName,
};
use crate::error::{ReferenceError, Result};
use crate::lexer::{tokenize, Spanned, Token};
use hintvm_core::Register;
use num_bigint::BigUint;

/// Maximum number of `*` markers after a type name
const MAX_POINTER_DEPTH: u8 = 2;

/// Parse reference text into its syntax tree
pub fn parse(source: &str) -> Result<IdentifierExp> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(&tokens, source.len());

    match parser.identifier() {
        Ok(exp) if parser.at_end() => Ok(exp),
        Ok(_) => {
            let _ = parser.fail::<()>("end of input");
            Err(parser.error())
        }
        Err(Mismatch) => Err(parser.error()),
    }
}

/// Marker for a failed alternative; details live in `Parser::furthest`
#[derive(Debug, Clone, Copy)]
struct Mismatch;

type PResult<T> = std::result::Result<T, Mismatch>;

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    source_len: usize,
    /// Furthest token index reached by a failed alternative, with what it expected
    furthest: (usize, Vec<&'static str>),
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Spanned], source_len: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            source_len,
            furthest: (0, Vec::new()),
        }
    }

    // ========================================================================
    // Cursor helpers
    // ========================================================================

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos).map(|spanned| &spanned.token)
    }

    fn fail<T>(&mut self, expected: &'static str) -> PResult<T> {
        let (index, expectations) = &mut self.furthest;
        if self.pos > *index {
            *index = self.pos;
            expectations.clear();
        }
        if self.pos == *index && !expectations.contains(&expected) {
            expectations.push(expected);
        }
        Err(Mismatch)
    }

    fn error(&self) -> ReferenceError {
        let (index, expectations) = &self.furthest;
        let (position, found) = match self.tokens.get(*index) {
            Some(spanned) => (spanned.span.start, format!("'{}'", spanned.token)),
            None => (self.source_len, "end of input".to_string()),
        };
        let expected = match expectations.as_slice() {
            [] => "a hint reference".to_string(),
            [single] => (*single).to_string(),
            many => format!("one of {}", many.join(", ")),
        };
        ReferenceError::Syntax {
            position,
            message: format!("expected {expected}, found {found}"),
        }
    }

    fn expect(&mut self, token: &Token, expected: &'static str) -> PResult<()> {
        if self.peek() == Some(token) {
            self.pos += 1;
            Ok(())
        } else {
            self.fail(expected)
        }
    }

    fn keyword(&mut self, word: &'static str) -> PResult<()> {
        match self.peek() {
            Some(Token::Ident(name)) if name == word => {
                self.pos += 1;
                Ok(())
            }
            _ => self.fail(word),
        }
    }

    /// Run `rule`, rewinding on failure
    fn attempt<T>(&mut self, rule: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        let start = self.pos;
        let result = rule(self);
        if result.is_err() {
            self.pos = start;
        }
        result
    }

    // ========================================================================
    // Productions
    // ========================================================================

    fn identifier(&mut self) -> PResult<IdentifierExp> {
        if let Ok(cast) = self.attempt(Self::deref_cast) {
            return Ok(IdentifierExp::DerefCast(cast));
        }
        self.cast().map(IdentifierExp::Cast)
    }

    fn deref_cast(&mut self) -> PResult<CastExp> {
        self.expect(&Token::LBracket, "'['")?;
        let cast = self.cast()?;
        self.expect(&Token::RBracket, "']'")?;
        Ok(cast)
    }

    fn cast(&mut self) -> PResult<CastExp> {
        self.keyword("cast")?;
        self.expect(&Token::LParen, "'('")?;
        let value = self.arith()?;
        self.expect(&Token::Comma, "','")?;
        let cast_type = self.type_name()?;
        self.expect(&Token::RParen, "')'")?;
        Ok(CastExp { value, cast_type })
    }

    fn type_name(&mut self) -> PResult<TypeName> {
        let mut path = vec![self.ident("type name")?];
        while let Ok(segment) = self.attempt(|p| {
            p.expect(&Token::Dot, "'.'")?;
            p.ident("type name")
        }) {
            path.push(segment);
        }

        let mut pointer_depth = 0;
        while pointer_depth < MAX_POINTER_DEPTH && self.expect(&Token::Star, "'*'").is_ok() {
            pointer_depth += 1;
        }
        Ok(TypeName { path, pointer_depth })
    }

    fn ident(&mut self, expected: &'static str) -> PResult<String> {
        match self.peek() {
            Some(Token::Ident(name)) => {
                self.pos += 1;
                Ok(name.clone())
            }
            _ => self.fail(expected),
        }
    }

    fn arith(&mut self) -> PResult<ArithExp> {
        let term = self.term()?;
        let mut additions = Vec::new();
        while let Ok(addition) = self.attempt(Self::add_exp) {
            additions.push(addition);
        }
        Ok(ArithExp { term, additions })
    }

    fn add_exp(&mut self) -> PResult<AddExp> {
        let operator = self.add_operator()?;
        let term = self.term()?;
        Ok(AddExp { operator, term })
    }

    fn add_operator(&mut self) -> PResult<AddOperator> {
        match self.peek() {
            Some(Token::Plus) => {
                self.pos += 1;
                Ok(AddOperator::Plus)
            }
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(AddOperator::Minus)
            }
            _ => self.fail("'+' or '-'"),
        }
    }

    fn term(&mut self) -> PResult<TermExp> {
        if let Ok(prod) = self.attempt(Self::prod) {
            return Ok(TermExp::Prod(prod));
        }
        self.expression().map(TermExp::Exp)
    }

    fn prod(&mut self) -> PResult<ProdExp> {
        let lhs = self.expression()?;
        self.expect(&Token::Star, "'*'")?;
        let rhs = self.expression()?;
        Ok(ProdExp { lhs, rhs })
    }

    fn expression(&mut self) -> PResult<Expression> {
        if let Ok(dderef) = self.attempt(Self::dderef) {
            return Ok(Expression::DDeref(dderef));
        }
        if let Ok(deref) = self.attempt(Self::deref) {
            return Ok(Expression::Deref(deref));
        }
        if let Ok(cell) = self.attempt(Self::cell_ref_exp) {
            return Ok(Expression::CellRef(cell));
        }
        self.offset().map(Expression::Int)
    }

    /// `(reg ± N)` or bare `reg`
    fn cell_ref_exp(&mut self) -> PResult<CellRefExp> {
        let parenthesized = self.attempt(|p| {
            p.expect(&Token::LParen, "'('")?;
            let register_offset = p.register_offset()?;
            p.expect(&Token::RParen, "')'")?;
            Ok(register_offset)
        });
        if let Ok(register_offset) = parenthesized {
            return Ok(CellRefExp::RegisterOffset(register_offset));
        }
        self.register().map(CellRefExp::Register)
    }

    /// `reg ± N` or bare `reg`, as written inside brackets
    fn cell_ref(&mut self) -> PResult<CellRefExp> {
        if let Ok(register_offset) = self.attempt(Self::register_offset) {
            return Ok(CellRefExp::RegisterOffset(register_offset));
        }
        self.register().map(CellRefExp::Register)
    }

    fn register(&mut self) -> PResult<Register> {
        match self.peek() {
            Some(Token::Ident(name)) => match Register::from_name(name) {
                Some(register) => {
                    self.pos += 1;
                    Ok(register)
                }
                None => self.fail("'ap' or 'fp'"),
            },
            _ => self.fail("'ap' or 'fp'"),
        }
    }

    fn register_offset(&mut self) -> PResult<RegisterOffset> {
        let register = self.register()?;
        let operator = self.add_operator()?;
        let offset = self.offset()?;
        Ok(RegisterOffset {
            register,
            operator,
            offset,
        })
    }

    fn offset(&mut self) -> PResult<OffsetExp> {
        if let Ok(value) = self.attempt(Self::number) {
            return Ok(OffsetExp::Number(value));
        }
        self.attempt(|p| {
            p.expect(&Token::LParen, "'('")?;
            p.expect(&Token::Minus, "'-'")?;
            let value = p.number()?;
            p.expect(&Token::RParen, "')'")?;
            Ok(OffsetExp::NegNumber(value))
        })
    }

    fn number(&mut self) -> PResult<BigUint> {
        let digits = match self.peek() {
            Some(Token::Number(digits)) => digits,
            _ => return self.fail("number"),
        };
        match BigUint::parse_bytes(digits.as_bytes(), 10) {
            Some(value) => {
                self.pos += 1;
                Ok(value)
            }
            None => self.fail("number"),
        }
    }

    fn deref(&mut self) -> PResult<DerefExp> {
        self.expect(&Token::LBracket, "'['")?;
        let cell = self.cell_ref()?;
        self.expect(&Token::RBracket, "']'")?;
        Ok(DerefExp { cell })
    }

    fn dderef(&mut self) -> PResult<DDerefExp> {
        let with_offset = self.attempt(|p| {
            p.expect(&Token::LBracket, "'['")?;
            let deref = p.deref()?;
            let operator = p.add_operator()?;
            let offset = p.offset()?;
            p.expect(&Token::RBracket, "']'")?;
            Ok(DDerefExp::DerefOffset {
                deref,
                operator,
                offset,
            })
        });
        if with_offset.is_ok() {
            return with_offset;
        }

        self.expect(&Token::LBracket, "'['")?;
        let deref = self.deref()?;
        self.expect(&Token::RBracket, "']'")?;
        Ok(DDerefExp::Deref(deref))
    }
}
