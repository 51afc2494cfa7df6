use crate::common::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    Str,
    Ident,
    FunName,
    Eof,

    // keywords
    Fun,
    Malph,
    Vi,
    War,
    Imp,
    Type,

    // symbols
    Semicolon,
    Equal,
    EqualEqual,
    PlusPlus,
    LeftBracket,
    RightBracket,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Greater,
    Lesser,
}

impl TokenKind {
    /// Capitalized reserved words. These must win over the generic
    /// function-name rule, and they match as prefixes: `Viktor` lexes as
    /// `Vi` followed by the identifier `ktor`.
    pub fn from_capitalized_keyword(name: &str) -> Option<TokenKind> {
        match name {
            "Fun" => Some(TokenKind::Fun),
            "Vi" => Some(TokenKind::Vi),
            "Malph" => Some(TokenKind::Malph),
            "War" => Some(TokenKind::War),
            _ => None,
        }
    }

    /// Lowercase reserved words, checked before the generic identifier rule.
    /// `int` and `string` share a single `Type` kind; the lexeme tells them
    /// apart.
    pub fn from_lowercase_keyword(name: &str) -> Option<TokenKind> {
        match name {
            "imp" => Some(TokenKind::Imp),
            "int" | "string" => Some(TokenKind::Type),
            _ => None,
        }
    }

    pub fn is_comparison_op(&self) -> bool {
        matches!(*self, Self::Greater | Self::Lesser | Self::EqualEqual)
    }

    pub fn is_operand(&self) -> bool {
        matches!(*self, Self::Ident | Self::Number)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub line: usize,
}
