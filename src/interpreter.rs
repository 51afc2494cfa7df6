use std::sync::atomic::{AtomicBool, Ordering};

use crate::{
    ast,
    common::Value,
    error::Diagnostic,
    symbol::{SymbolTable, Ty},
    token::{Token, TokenKind},
};

/// A condition operand after lookup: a concrete value, or the hole left by a
/// declared-but-unassigned variable.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Resolved {
    Int(i64),
    Str(String),
    Unset,
}

impl Resolved {
    fn describe(&self) -> String {
        match self {
            Resolved::Int(n) => n.to_string(),
            Resolved::Str(s) => s.clone(),
            Resolved::Unset => "None".to_string(),
        }
    }
}

/// Walks a parsed program against the symbol table. Declarations and
/// assignments mutate the table, function definitions and guarded bodies
/// append to the output log, and every execution failure lands in the
/// diagnostics list instead of aborting sibling expressions.
pub struct Interpreter<'a> {
    file: &'a ast::File,
    symbols: &'a mut SymbolTable,
    outputs: &'a mut Vec<String>,
    diagnostics: &'a mut Vec<Diagnostic>,
    cancel: &'a AtomicBool,
}

impl<'a> Interpreter<'a> {
    pub fn new(
        file: &'a ast::File,
        symbols: &'a mut SymbolTable,
        outputs: &'a mut Vec<String>,
        diagnostics: &'a mut Vec<Diagnostic>,
        cancel: &'a AtomicBool,
    ) -> Self {
        Interpreter {
            file,
            symbols,
            outputs,
            diagnostics,
            cancel,
        }
    }

    pub fn execute(&mut self) {
        for expr in &self.file.exprs {
            self.exec_expr(expr);
        }
    }

    fn exec_expr(&mut self, expr: &ast::Expr) {
        match &expr.kind {
            ast::ExprKind::VarDecl(decl) => {
                let name = self.file.lexeme(&decl.ident.span);
                let ty = self.declared_ty(&decl.ty);
                self.symbols.declare(&name, ty, None);
            }
            ast::ExprKind::VarAssign(assign) => {
                let name = self.file.lexeme(&assign.ident.span);
                let ty = self.declared_ty(&assign.ty);
                let value = self.literal_value(&assign.value);
                if let Err(diagnostic) = self.symbols.assign(&name, ty, value) {
                    self.diagnostics.push(diagnostic);
                }
            }
            ast::ExprKind::FunDef(fun) => self.exec_imp(&fun.body),
            ast::ExprKind::If(stmt) => match self.eval_condition(&stmt.condition) {
                Ok(true) => self.exec_imp(&stmt.body),
                Ok(false) => {}
                Err(diagnostic) => self.diagnostics.push(diagnostic),
            },
            ast::ExprKind::While(stmt) => self.exec_while(stmt),
        }
    }

    fn declared_ty(&self, token: &Token) -> Ty {
        if self.file.lexeme(&token.span) == "int" {
            Ty::Int
        } else {
            Ty::Str
        }
    }

    fn literal_value(&self, token: &Token) -> Value {
        let text = self.file.lexeme(&token.span);
        if token.kind == TokenKind::Number {
            // digit runs beyond i64 saturate
            Value::Int(text.parse().unwrap_or(i64::MAX))
        } else {
            Value::Str(text)
        }
    }

    fn exec_imp(&mut self, imp: &ast::ImpStmt) {
        let record = match &imp.ident {
            Some(ident) => {
                let name = self.file.lexeme(&ident.span);
                match self.symbols.lookup(&name) {
                    Some(entry) => {
                        let value = entry
                            .value
                            .as_ref()
                            .map_or_else(|| "None".to_string(), ToString::to_string);
                        format!("{name} ({}): {value}", entry.ty)
                    }
                    None => format!("{name}: Variable no declarada."),
                }
            }
            None => "imp sin variable especificada.".to_string(),
        };
        self.outputs.push(record);
    }

    /// An identifier present in the table resolves to its stored value; an
    /// absent one falls back to parsing the name itself as an integer and
    /// finally to the name as an opaque string.
    fn resolve_operand(&self, token: &Token) -> Resolved {
        let text = self.file.lexeme(&token.span);

        if token.kind == TokenKind::Number {
            return Resolved::Int(text.parse().unwrap_or(i64::MAX));
        }

        match self.symbols.lookup(&text) {
            Some(entry) => match &entry.value {
                Some(Value::Int(n)) => Resolved::Int(*n),
                Some(Value::Str(s)) => Resolved::Str(s.clone()),
                None => Resolved::Unset,
            },
            None => match text.parse::<i64>() {
                Ok(n) => Resolved::Int(n),
                Err(_) => Resolved::Str(text),
            },
        }
    }

    /// Equality across kinds is simply false (two unassigned operands are
    /// equal). Ordering across kinds, or against an unassigned value, is a
    /// reported comparison error, never a silent false.
    fn eval_condition(&self, condition: &ast::Condition) -> Result<bool, Diagnostic> {
        let left = self.resolve_operand(&condition.left);
        let right = self.resolve_operand(&condition.right);

        match condition.op.kind {
            TokenKind::EqualEqual => Ok(match (&left, &right) {
                (Resolved::Int(a), Resolved::Int(b)) => a == b,
                (Resolved::Str(a), Resolved::Str(b)) => a == b,
                (Resolved::Unset, Resolved::Unset) => true,
                _ => false,
            }),
            TokenKind::Greater | TokenKind::Lesser => {
                let ordering = match (&left, &right) {
                    (Resolved::Int(a), Resolved::Int(b)) => a.cmp(b),
                    (Resolved::Str(a), Resolved::Str(b)) => a.cmp(b),
                    _ => {
                        return Err(Diagnostic::Comparison {
                            left: left.describe(),
                            right: right.describe(),
                            line: condition.op.line,
                        })
                    }
                };
                Ok(if condition.op.kind == TokenKind::Greater {
                    ordering == std::cmp::Ordering::Greater
                } else {
                    ordering == std::cmp::Ordering::Less
                })
            }
            _ => Ok(false),
        }
    }

    /// Print, increment, re-evaluate, for as long as the condition holds.
    /// The engine itself is unbounded; a cooperative cancellation flag
    /// checked each iteration is the only way out of a condition that never
    /// turns false.
    fn exec_while(&mut self, stmt: &ast::WhileStmt) {
        let counter = self.file.lexeme(&stmt.counter.span);

        loop {
            match self.eval_condition(&stmt.condition) {
                Ok(true) => {}
                Ok(false) => break,
                Err(diagnostic) => {
                    self.diagnostics.push(diagnostic);
                    break;
                }
            }

            if self.cancel.load(Ordering::Relaxed) {
                self.diagnostics.push(Diagnostic::Cancelled);
                break;
            }

            self.exec_imp(&stmt.body);

            if let Err(diagnostic) = self.symbols.increment(&counter) {
                self.diagnostics.push(diagnostic);
                break;
            }
        }
    }
}
