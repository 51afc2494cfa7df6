use std::collections::HashMap;
use std::fmt;

use crate::{common::Value, error::Diagnostic};

/// The two declarable types of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ty {
    Int,
    Str,
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Int => write!(f, "int"),
            Ty::Str => write!(f, "string"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub ty: Ty,
    pub value: Option<Value>,
}

/// One flat, process-unscoped name table. Re-declaration overwrites.
///
/// `declare` never type-checks its initializer while `assign` coerces for
/// `int` declarations. The asymmetry is deliberate: it is how the language
/// has always behaved, and the tests pin it down.
#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: HashMap<String, Entry>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, name: &str, ty: Ty, init: Option<Value>) {
        self.entries.insert(name.to_string(), Entry { ty, value: init });
    }

    /// Stores `value` under `name`, coercing to an integer when the declared
    /// type is `int`. On a failed coercion nothing is written.
    pub fn assign(&mut self, name: &str, ty: Ty, value: Value) -> Result<(), Diagnostic> {
        let value = match ty {
            Ty::Int => match value {
                Value::Int(_) => value,
                Value::Str(ref s) => match s.trim().parse::<i64>() {
                    Ok(n) => Value::Int(n),
                    Err(_) => {
                        return Err(Diagnostic::Coercion {
                            name: name.to_string(),
                        })
                    }
                },
            },
            Ty::Str => value,
        };

        self.entries.insert(
            name.to_string(),
            Entry {
                ty,
                value: Some(value),
            },
        );
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    /// Adds one to an integer-valued entry; the `War` loop counter update.
    pub fn increment(&mut self, name: &str) -> Result<(), Diagnostic> {
        match self.entries.get_mut(name) {
            None => Err(Diagnostic::IncrementUndeclared {
                name: name.to_string(),
            }),
            Some(entry) => match &mut entry.value {
                Some(Value::Int(n)) => {
                    *n += 1;
                    Ok(())
                }
                _ => Err(Diagnostic::IncrementNotInt {
                    name: name.to_string(),
                }),
            },
        }
    }

    pub fn snapshot(&self) -> HashMap<String, Entry> {
        self.entries.clone()
    }
}
