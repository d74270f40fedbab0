pub mod interpreter;
pub mod language;
pub mod lexer;
pub mod numeric;
pub mod parser;
pub mod primitives;

use thiserror::Error;

// Re-export commonly used items for convenience
pub use interpreter::{Environment, EvalError, Session, apply, eval};
pub use language::{Expression, PrimitiveFn, Procedure, Value};
pub use lexer::{Token, tokenize};
pub use numeric::Number;
pub use parser::{ParseError, parse};
pub use primitives::register_primitives;

/// Either kind of interpreter failure, for callers driving the whole
/// parse-then-evaluate pipeline at once.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
}
