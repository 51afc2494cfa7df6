use thiserror::Error;

/// Everything a run can report, lexical warnings included.
///
/// The rendered messages are the user-visible diagnostic strings, so they
/// keep the original Spanish wording of the language's reference tooling.
/// Warnings (`UnknownCharacter`) travel on a side channel and never fail a
/// run; the rest are collected into the run's diagnostics list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("Carácter desconocido '{ch}', línea {line}")]
    UnknownCharacter { ch: char, line: usize },

    #[error("Error de sintaxis en '{token}', línea {line}")]
    Syntax { token: String, line: usize },

    #[error("Error de sintaxis al final del archivo")]
    SyntaxAtEof,

    #[error("Error: se esperaba un valor entero para la variable '{name}'.")]
    Coercion { name: String },

    #[error("Error: la variable '{name}' no está definida.")]
    IncrementUndeclared { name: String },

    #[error("Error: la variable '{name}' no es un entero o no está definida.")]
    IncrementNotInt { name: String },

    #[error("Error: no se pueden comparar '{left}' y '{right}', línea {line}.")]
    Comparison {
        left: String,
        right: String,
        line: usize,
    },

    #[error("Error: ejecución cancelada.")]
    Cancelled,
}
