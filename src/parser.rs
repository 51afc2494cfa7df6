use crate::{
    ast,
    error::Diagnostic,
    token::{Token, TokenKind},
};

/// What one parse pass produced. The grammar has no error recovery: the
/// first syntax error stops production matching, but the expressions parsed
/// before it are kept so the caller can still execute the valid prefix.
#[derive(Debug)]
pub struct Parsed {
    pub exprs: Vec<ast::Expr>,
    pub error: Option<Diagnostic>,
}

#[derive(Debug, Clone)]
struct Parser<'a> {
    source: &'a [char],
    tokens: &'a [Token],
    current: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a [char], tokens: &'a [Token]) -> Self {
        Parser {
            source,
            tokens,
            current: 0,
        }
    }

    fn peek(&self) -> &Token {
        // the token stream always ends with Eof
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.current += 1;
        }
        token
    }

    fn lexeme(&self, token: &Token) -> String {
        self.source[token.span.clone()].iter().collect()
    }

    fn error_at(&self, token: &Token) -> Diagnostic {
        if token.kind == TokenKind::Eof {
            Diagnostic::SyntaxAtEof
        } else {
            Diagnostic::Syntax {
                token: self.lexeme(token),
                line: token.line,
            }
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, Diagnostic> {
        let token = self.peek().clone();
        if token.kind == kind {
            self.current += 1;
            Ok(token)
        } else {
            Err(self.error_at(&token))
        }
    }

    fn parse_expr(&mut self) -> Result<ast::Expr, Diagnostic> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Ident => self.parse_variable(),
            TokenKind::Fun => self.parse_fun(),
            TokenKind::Vi => self.parse_if(),
            TokenKind::War => self.parse_while(),
            _ => Err(self.error_at(&token)),
        }
    }

    /// `Ident ';' Type ['=' (Number|Str)]`. With an initializer this is an
    /// assignment (type-checked at execution); without one it is a plain
    /// declaration.
    fn parse_variable(&mut self) -> Result<ast::Expr, Diagnostic> {
        let ident = self.expect(TokenKind::Ident)?;
        self.expect(TokenKind::Semicolon)?;
        let ty = self.expect(TokenKind::Type)?;

        if self.peek().kind == TokenKind::Equal {
            self.advance();
            let value = self.peek().clone();
            if !matches!(value.kind, TokenKind::Number | TokenKind::Str) {
                return Err(self.error_at(&value));
            }
            self.advance();

            Ok(ast::Expr {
                span: ident.span.start..value.span.end,
                kind: ast::VarAssign { ident, ty, value }.into(),
            })
        } else {
            Ok(ast::Expr {
                span: ident.span.start..ty.span.end,
                kind: ast::VarDecl { ident, ty }.into(),
            })
        }
    }

    /// `'Fun' ('Malph' | FunName) '[' ']' '(' imp ')'`
    fn parse_fun(&mut self) -> Result<ast::Expr, Diagnostic> {
        let fun = self.expect(TokenKind::Fun)?;

        let name = match self.peek().kind {
            TokenKind::Malph => {
                self.advance();
                None
            }
            TokenKind::FunName => Some(self.advance()),
            _ => return Err(self.error_at(&self.peek().clone())),
        };

        self.expect(TokenKind::LeftBracket)?;
        self.expect(TokenKind::RightBracket)?;
        self.expect(TokenKind::LeftParen)?;
        let body = self.parse_imp()?;
        let close = self.expect(TokenKind::RightParen)?;

        Ok(ast::Expr {
            span: fun.span.start..close.span.end,
            kind: ast::FunDef { name, body }.into(),
        })
    }

    /// `'imp' [Ident] ';'`
    fn parse_imp(&mut self) -> Result<ast::ImpStmt, Diagnostic> {
        self.expect(TokenKind::Imp)?;

        let ident = if self.peek().kind == TokenKind::Ident {
            Some(self.advance())
        } else {
            None
        };

        self.expect(TokenKind::Semicolon)?;
        Ok(ast::ImpStmt { ident })
    }

    fn parse_operand(&mut self) -> Result<Token, Diagnostic> {
        let token = self.peek().clone();
        if token.kind.is_operand() {
            self.advance();
            Ok(token)
        } else {
            Err(self.error_at(&token))
        }
    }

    /// `operand ('>'|'<'|'==') operand`
    fn parse_condition(&mut self) -> Result<ast::Condition, Diagnostic> {
        let left = self.parse_operand()?;

        let op = self.peek().clone();
        if !op.kind.is_comparison_op() {
            return Err(self.error_at(&op));
        }
        self.advance();

        let right = self.parse_operand()?;
        Ok(ast::Condition { left, op, right })
    }

    /// `'Vi' '{' condition '}' '(' imp ')'`
    fn parse_if(&mut self) -> Result<ast::Expr, Diagnostic> {
        let vi = self.expect(TokenKind::Vi)?;
        self.expect(TokenKind::LeftBrace)?;
        let condition = self.parse_condition()?;
        self.expect(TokenKind::RightBrace)?;
        self.expect(TokenKind::LeftParen)?;
        let body = self.parse_imp()?;
        let close = self.expect(TokenKind::RightParen)?;

        Ok(ast::Expr {
            span: vi.span.start..close.span.end,
            kind: ast::IfStmt { condition, body }.into(),
        })
    }

    /// `'War' '{' condition '}' '(' imp '++' Ident ';' ')'`
    fn parse_while(&mut self) -> Result<ast::Expr, Diagnostic> {
        let war = self.expect(TokenKind::War)?;
        self.expect(TokenKind::LeftBrace)?;
        let condition = self.parse_condition()?;
        self.expect(TokenKind::RightBrace)?;
        self.expect(TokenKind::LeftParen)?;
        let body = self.parse_imp()?;
        self.expect(TokenKind::PlusPlus)?;
        let counter = self.expect(TokenKind::Ident)?;
        self.expect(TokenKind::Semicolon)?;
        let close = self.expect(TokenKind::RightParen)?;

        Ok(ast::Expr {
            span: war.span.start..close.span.end,
            kind: ast::WhileStmt {
                condition,
                body,
                counter,
            }
            .into(),
        })
    }
}

pub fn parse(source: &[char], tokens: &[Token]) -> Parsed {
    let mut exprs = Vec::new();
    let mut parser = Parser::new(source, tokens);

    // the grammar requires at least one expression; empty input is a syntax
    // error at end of file
    if parser.peek().kind == TokenKind::Eof {
        return Parsed {
            exprs,
            error: Some(Diagnostic::SyntaxAtEof),
        };
    }

    while parser.peek().kind != TokenKind::Eof {
        match parser.parse_expr() {
            Ok(expr) => exprs.push(expr),
            Err(error) => {
                return Parsed {
                    exprs,
                    error: Some(error),
                }
            }
        }
    }

    Parsed { exprs, error: None }
}
