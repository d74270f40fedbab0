use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::language::{Expression, Procedure, Value};
use crate::numeric::Number;
use crate::parser::parse;
use crate::primitives::register_primitives;

// ============================================================================
// Evaluation Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("undefined variable: {0}")]
    UndefinedVariable(String),

    #[error("malformed {form} form: expected {expected} expressions, got {got}")]
    MalformedForm {
        form: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("{form}: expected a name, got {found}")]
    ExpectedName {
        form: &'static str,
        found: Expression,
    },

    #[error("lambda: expected a parameter list, got {found}")]
    ExpectedParameterList { found: Expression },

    #[error("lambda: duplicate parameter name: {0}")]
    DuplicateParameter(String),

    #[error("procedure expects {expected} operands, got {got}")]
    ArityMismatch { expected: usize, got: usize },

    #[error("cannot apply non-procedure value: {0}")]
    NotAProcedure(Value),

    #[error("cannot apply empty expression")]
    EmptyApplication,

    #[error("{primitive} expects {expected} operands, got {got}")]
    PrimitiveArity {
        primitive: &'static str,
        expected: &'static str,
        got: usize,
    },

    #[error("{primitive} expects integer operands, got {value}")]
    IntegerExpected {
        primitive: &'static str,
        value: Value,
    },
}

// ============================================================================
// Environment
// ============================================================================

/// One frame of name bindings plus an optional parent. The global frame is
/// the unique frame without a parent; every other frame is created by a
/// procedure application. Frames are shared through `Rc` (a procedure keeps
/// its defining frame alive), so bindings sit behind a `RefCell`.
pub struct Environment {
    bindings: RefCell<FxHashMap<String, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Create a root frame with no parent.
    pub fn root() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(FxHashMap::default()),
            parent: None,
        })
    }

    /// Create an empty frame chained to `parent`.
    pub fn nested(parent: &Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(FxHashMap::default()),
            parent: Some(Rc::clone(parent)),
        })
    }

    /// Insert or overwrite `name` in this frame only. Same-named bindings in
    /// ancestor frames are shadowed, never mutated.
    pub fn define(&self, name: String, value: Value) {
        self.bindings.borrow_mut().insert(name, value);
    }

    /// Resolve `name` against this frame first, then its ancestors.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref().and_then(|parent| parent.lookup(name))
    }
}

// ============================================================================
// Session
// ============================================================================

/// Owns the global environment for one interpreter session. The global frame
/// is created once, bootstrapped with `true`, `false`, and the primitive
/// procedures, and only ever grows; it is never rolled back on errors.
pub struct Session {
    global: Rc<Environment>,
}

impl Session {
    pub fn new() -> Self {
        let global = Environment::root();
        register_primitives(&global);
        Session { global }
    }

    /// The session's global frame.
    pub fn global(&self) -> &Rc<Environment> {
        &self.global
    }

    /// Evaluate one expression against the global frame.
    pub fn eval(&self, expression: &Expression) -> Result<Value, EvalError> {
        eval(expression, &self.global)
    }

    /// Parse `input` and evaluate each top-level expression in order,
    /// stopping at the first error. Definitions completed before the error
    /// remain in effect.
    pub fn run(&self, input: &str) -> Result<Vec<Value>, crate::Error> {
        let mut results = Vec::new();
        for expression in parse(input)? {
            results.push(self.eval(&expression)?);
        }
        Ok(results)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // Self-recursive definitions tie the global frame to itself through
        // their captured environments; clearing the root bindings breaks
        // those cycles so the frame graph can be reclaimed.
        self.global.bindings.borrow_mut().clear();
    }
}

// ============================================================================
// Evaluator
// ============================================================================

/// Evaluate `expression` in `env`.
///
/// Dispatch order: an atom is an integer literal when it is a pure digit run
/// and a name reference otherwise; a compound headed by `if`, `define`, or
/// `lambda` is a special form; every other compound is an application.
pub fn eval(expression: &Expression, env: &Rc<Environment>) -> Result<Value, EvalError> {
    match expression {
        Expression::Atom(text) => match Number::from_literal(text) {
            Some(number) => Ok(Value::Integer(number)),
            None => env
                .lookup(text)
                .ok_or_else(|| EvalError::UndefinedVariable(text.clone())),
        },
        Expression::Compound(elements) => match elements.first() {
            Some(Expression::Atom(head)) if head == "if" => eval_if(elements, env),
            Some(Expression::Atom(head)) if head == "define" => eval_define(elements, env),
            Some(Expression::Atom(head)) if head == "lambda" => eval_lambda(elements, env),
            _ => eval_application(elements, env),
        },
    }
}

/// `(if predicate consequent alternate)`. Only the boolean false value
/// selects the alternate; every other predicate value, including 0, selects
/// the consequent. Exactly one branch is evaluated.
fn eval_if(elements: &[Expression], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if elements.len() != 4 {
        return Err(EvalError::MalformedForm {
            form: "if",
            expected: 3,
            got: elements.len() - 1,
        });
    }

    if eval(&elements[1], env)?.is_truthy() {
        eval(&elements[2], env)
    } else {
        eval(&elements[3], env)
    }
}

/// `(define name value)`. Evaluates the value expression in the current
/// frame, then binds it there. The form itself produces no useful value.
fn eval_define(elements: &[Expression], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if elements.len() != 3 {
        return Err(EvalError::MalformedForm {
            form: "define",
            expected: 2,
            got: elements.len() - 1,
        });
    }

    let name = match &elements[1] {
        Expression::Atom(name) => name.clone(),
        other => {
            return Err(EvalError::ExpectedName {
                form: "define",
                found: other.clone(),
            });
        }
    };

    let value = eval(&elements[2], env)?;
    env.define(name, value);
    Ok(Value::Unspecified)
}

/// `(lambda (params...) body)`. Captures the current frame by shared
/// reference. Duplicate parameter names are rejected here, at creation.
fn eval_lambda(elements: &[Expression], env: &Rc<Environment>) -> Result<Value, EvalError> {
    if elements.len() != 3 {
        return Err(EvalError::MalformedForm {
            form: "lambda",
            expected: 2,
            got: elements.len() - 1,
        });
    }

    let Expression::Compound(param_exprs) = &elements[1] else {
        return Err(EvalError::ExpectedParameterList {
            found: elements[1].clone(),
        });
    };

    let mut params = Vec::with_capacity(param_exprs.len());
    for param in param_exprs {
        match param {
            Expression::Atom(name) => {
                if params.contains(name) {
                    return Err(EvalError::DuplicateParameter(name.clone()));
                }
                params.push(name.clone());
            }
            other => {
                return Err(EvalError::ExpectedName {
                    form: "lambda",
                    found: other.clone(),
                });
            }
        }
    }

    Ok(Value::Lambda(Rc::new(Procedure {
        params,
        body: elements[2].clone(),
        env: Rc::clone(env),
    })))
}

/// Evaluate every element, operator position included, left to right, then
/// apply the first value to the rest.
fn eval_application(elements: &[Expression], env: &Rc<Environment>) -> Result<Value, EvalError> {
    let mut values = Vec::with_capacity(elements.len());
    for element in elements {
        values.push(eval(element, env)?);
    }

    let mut values = values.into_iter();
    match values.next() {
        Some(procedure) => apply(&procedure, values.collect()),
        None => Err(EvalError::EmptyApplication),
    }
}

// ============================================================================
// Applier
// ============================================================================

/// Apply a procedure value to already-evaluated operands.
///
/// Primitives validate their own arity and operand types. User procedures
/// require an exact operand count; their parameters are bound in a fresh
/// frame chained to the captured environment, and the body is evaluated
/// there.
pub fn apply(procedure: &Value, operands: Vec<Value>) -> Result<Value, EvalError> {
    match procedure {
        Value::Primitive(primitive) => primitive(&operands),
        Value::Lambda(lambda) => {
            if operands.len() != lambda.params.len() {
                return Err(EvalError::ArityMismatch {
                    expected: lambda.params.len(),
                    got: operands.len(),
                });
            }

            let frame = Environment::nested(&lambda.env);
            for (param, operand) in lambda.params.iter().zip(operands) {
                frame.define(param.clone(), operand);
            }
            eval(&lambda.body, &frame)
        }
        other => Err(EvalError::NotAProcedure(other.clone())),
    }
}
