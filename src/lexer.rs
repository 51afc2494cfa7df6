use crate::{
    error::Diagnostic,
    token::{Token, TokenKind},
};

/// Capitalized reserved words, tried before the generic function-name rule.
/// The order and the prefix semantics mirror the language's lexical rule
/// priority: a reserved word wins even as a strict prefix of a longer
/// identifier-shaped lexeme.
const CAPITALIZED_KEYWORDS: [&str; 4] = ["Fun", "Vi", "Malph", "War"];

/// Lowercase reserved words, tried before the generic identifier rule.
const LOWERCASE_KEYWORDS: [&str; 3] = ["imp", "int", "string"];

#[derive(Debug, Clone)]
pub struct Lexer {
    pub source: Vec<char>,

    start: usize,
    current: usize,
    line: usize,
    warnings: Vec<Diagnostic>,
}

impl Lexer {
    pub fn from_str(source: &str) -> Self {
        Lexer {
            source: source.chars().collect(),
            start: 0,
            current: 0,
            line: 1,
            warnings: Vec::new(),
        }
    }

    /// Lexical warnings collected so far; skipped characters never fail a
    /// scan.
    pub fn take_warnings(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.warnings)
    }

    fn at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) {
        self.current += 1;
    }

    fn peek_next(&self) -> Option<char> {
        self.source.get(self.current).copied()
    }

    fn create_token(&self, kind: TokenKind) -> Token {
        Token {
            kind,
            span: self.start..self.current,
            line: self.line,
        }
    }

    fn warn_unknown(&mut self, ch: char) {
        tracing::warn!(line = self.line, character = %ch, "skipping unknown character");
        self.warnings.push(Diagnostic::UnknownCharacter {
            ch,
            line: self.line,
        });
    }

    /// Does `literal` appear verbatim at the scan position?
    fn matches_at(&self, literal: &str) -> bool {
        let end = self.current + literal.len();
        end <= self.source.len() && self.source[self.current..end].iter().copied().eq(literal.chars())
    }

    /// A double-quoted span with no escape support. The token's span excludes
    /// the quotes. An unterminated quote is reported as an unknown character
    /// and scanning resumes right after it, so the rest of the input still
    /// lexes.
    fn lex_string(&mut self) -> Option<Token> {
        let open = self.current;
        let mut idx = open + 1;
        while idx < self.source.len() && self.source[idx] != '"' {
            idx += 1;
        }

        if idx >= self.source.len() {
            self.warn_unknown('"');
            self.current = open + 1;
            return None;
        }

        let token = Token {
            kind: TokenKind::Str,
            span: open + 1..idx,
            line: self.line,
        };
        for ch in &self.source[open + 1..idx] {
            if *ch == '\n' {
                self.line += 1;
            }
        }
        self.current = idx + 1;
        Some(token)
    }

    fn lex_number(&mut self) -> Token {
        while !self.at_end() && self.source[self.current].is_ascii_digit() {
            self.advance();
        }
        self.create_token(TokenKind::Number)
    }

    fn lex_capitalized(&mut self) -> Token {
        for keyword in CAPITALIZED_KEYWORDS {
            if self.matches_at(keyword) {
                if let Some(kind) = TokenKind::from_capitalized_keyword(keyword) {
                    self.current += keyword.len();
                    return self.create_token(kind);
                }
            }
        }

        // [A-Z][a-zA-Z_0-9]*
        self.advance();
        while !self.at_end() && is_fun_name_continue(self.source[self.current]) {
            self.advance();
        }
        self.create_token(TokenKind::FunName)
    }

    fn lex_lowercase(&mut self) -> Token {
        for keyword in LOWERCASE_KEYWORDS {
            if self.matches_at(keyword) {
                if let Some(kind) = TokenKind::from_lowercase_keyword(keyword) {
                    self.current += keyword.len();
                    return self.create_token(kind);
                }
            }
        }

        // [a-z_][a-z_0-9]*
        self.advance();
        while !self.at_end() && is_ident_continue(self.source[self.current]) {
            self.advance();
        }
        self.create_token(TokenKind::Ident)
    }

    pub fn lex(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while !self.at_end() {
            self.start = self.current;
            let c = self.source[self.current];

            match c {
                '\n' => {
                    self.line += 1;
                    self.advance();
                }
                ';' => {
                    self.advance();
                    tokens.push(self.create_token(TokenKind::Semicolon));
                }
                '[' => {
                    self.advance();
                    tokens.push(self.create_token(TokenKind::LeftBracket));
                }
                ']' => {
                    self.advance();
                    tokens.push(self.create_token(TokenKind::RightBracket));
                }
                '(' => {
                    self.advance();
                    tokens.push(self.create_token(TokenKind::LeftParen));
                }
                ')' => {
                    self.advance();
                    tokens.push(self.create_token(TokenKind::RightParen));
                }
                '{' => {
                    self.advance();
                    tokens.push(self.create_token(TokenKind::LeftBrace));
                }
                '}' => {
                    self.advance();
                    tokens.push(self.create_token(TokenKind::RightBrace));
                }
                '>' => {
                    self.advance();
                    tokens.push(self.create_token(TokenKind::Greater));
                }
                '<' => {
                    self.advance();
                    tokens.push(self.create_token(TokenKind::Lesser));
                }
                '=' => {
                    self.advance();
                    if self.peek_next() == Some('=') {
                        self.advance();
                        tokens.push(self.create_token(TokenKind::EqualEqual));
                    } else {
                        tokens.push(self.create_token(TokenKind::Equal));
                    }
                }
                '+' => {
                    // only `++` is a token; a lone plus is an unknown character
                    if self.matches_at("++") {
                        self.advance();
                        self.advance();
                        tokens.push(self.create_token(TokenKind::PlusPlus));
                    } else {
                        self.warn_unknown('+');
                        self.advance();
                    }
                }
                '"' => {
                    if let Some(token) = self.lex_string() {
                        tokens.push(token);
                    }
                }
                c if c.is_whitespace() => {
                    self.advance();
                }
                c if c.is_ascii_digit() => tokens.push(self.lex_number()),
                c if c.is_ascii_uppercase() => tokens.push(self.lex_capitalized()),
                c if c.is_ascii_lowercase() || c == '_' => tokens.push(self.lex_lowercase()),
                c => {
                    self.warn_unknown(c);
                    self.advance();
                }
            }
        }

        tokens.push(Token {
            kind: TokenKind::Eof,
            span: self.source.len()..self.source.len(),
            line: self.line,
        });

        tokens
    }
}

fn is_fun_name_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
}
