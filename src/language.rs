use std::fmt;
use std::rc::Rc;

use crate::interpreter::{Environment, EvalError};
use crate::numeric::Number;

// ============================================================================
// Parse Tree
// ============================================================================

/// One node of the parse tree. An atom is an opaque text run that the
/// evaluator later classifies as an integer literal or a name; a compound is
/// an ordered, possibly empty sequence of sub-expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Atom(String),
    Compound(Vec<Expression>),
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expression::Atom(text) => write!(f, "{text}"),
            Expression::Compound(elements) => {
                write!(f, "(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, ")")
            }
        }
    }
}

// ============================================================================
// Runtime Values
// ============================================================================

/// Native procedure type - Rust functions callable from the guest language
pub type PrimitiveFn = fn(&[Value]) -> Result<Value, EvalError>;

/// A user procedure: parameter names, a single body expression, and the
/// environment captured at creation. The environment reference is shared, so
/// a procedure that escapes its creating call keeps that frame alive.
#[derive(Clone)]
pub struct Procedure {
    pub params: Vec<String>,
    pub body: Expression,
    pub env: Rc<Environment>,
}

// Manual implementation since Environment does not implement Debug
impl fmt::Debug for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Procedure")
            .field("params", &self.params)
            .field("body", &self.body)
            .field("env", &"<environment>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Integer(Number),
    Boolean(bool),
    Primitive(PrimitiveFn),
    Lambda(Rc<Procedure>),

    /// The result of a `define` form; carries no information
    Unspecified,
}

impl Value {
    /// Only the boolean false value is falsy; every other value, including
    /// integer zero, is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Boolean(false))
    }
}

// Manual PartialEq implementation because function pointers need special
// handling and lambdas compare by identity
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Primitive(a), Value::Primitive(b)) => {
                std::ptr::eq(*a as *const (), *b as *const ())
            }
            (Value::Lambda(a), Value::Lambda(b)) => Rc::ptr_eq(a, b),
            (Value::Unspecified, Value::Unspecified) => true,
            _ => false,
        }
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Boolean(true) => write!(f, "true"),
            Value::Boolean(false) => write!(f, "false"),
            Value::Primitive(_) => write!(f, "<primitive>"),
            Value::Lambda(_) => write!(f, "<lambda>"),
            Value::Unspecified => write!(f, "<unspecified>"),
        }
    }
}
