use derive_more::{From, TryInto};

use crate::{common::Span, token};

#[derive(Debug, Clone)]
pub struct VarDecl {
    pub ident: token::Token,
    pub ty: token::Token,
}

#[derive(Debug, Clone)]
pub struct VarAssign {
    pub ident: token::Token,
    pub ty: token::Token,
    pub value: token::Token,
}

/// The single print-instruction of the language. It only ever appears inside
/// a function, `Vi` or `War` body, never at the top level.
#[derive(Debug, Clone)]
pub struct ImpStmt {
    pub ident: Option<token::Token>,
}

/// `Fun Malph[](..)` or `Fun Name[](..)`. `name` is `None` for the `Malph`
/// main form. There is no call mechanism; the body runs once on recognition.
#[derive(Debug, Clone)]
pub struct FunDef {
    pub name: Option<token::Token>,
    pub body: ImpStmt,
}

/// A single two-operand comparison. Operands are identifier or number
/// tokens, resolved at evaluation time.
#[derive(Debug, Clone)]
pub struct Condition {
    pub left: token::Token,
    pub op: token::Token,
    pub right: token::Token,
}

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: Condition,
    pub body: ImpStmt,
}

#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub condition: Condition,
    pub body: ImpStmt,
    pub counter: token::Token,
}

#[derive(Debug, Clone, From, TryInto)]
pub enum ExprKind {
    VarDecl(VarDecl),
    VarAssign(VarAssign),
    FunDef(FunDef),
    If(IfStmt),
    While(WhileStmt),
}

#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct File {
    pub source: Vec<char>,
    pub exprs: Vec<Expr>,
}

impl File {
    pub fn lexeme(&self, span: &Span) -> String {
        self.source[span.clone()].iter().collect()
    }
}
