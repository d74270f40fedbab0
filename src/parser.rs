use thiserror::Error;

use crate::language::Expression;
use crate::lexer::{Token, tokenize};

// ============================================================================
// Parse Errors
// ============================================================================

/// Errors raised while structuring tokens into expressions. Both variants
/// carry the offending original input for diagnostics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("unterminated compound expression: {text}")]
    UnterminatedCompound { text: String },

    #[error("unexpected close parenthesis: {text}")]
    UnexpectedClose { text: String },
}

// ============================================================================
// Parser
// ============================================================================

/// Parse raw text into the ordered sequence of top-level expressions it
/// contains (a single line of input may hold several).
///
/// Grammar: `expression := atom | '(' expression* ')'`
pub fn parse(input: &str) -> Result<Vec<Expression>, ParseError> {
    let tokens = tokenize(input);
    let mut expressions = Vec::new();
    let mut position = 0;

    while position < tokens.len() {
        let (expression, consumed) = parse_expression(&tokens[position..], input)?;
        expressions.push(expression);
        position += consumed;
    }

    Ok(expressions)
}

/// Parse one expression from the front of `tokens`, returning it together
/// with the number of tokens consumed. Callers guarantee `tokens` is
/// non-empty.
fn parse_expression(tokens: &[Token], input: &str) -> Result<(Expression, usize), ParseError> {
    match &tokens[0] {
        Token::Atom(text) => Ok((Expression::Atom(text.clone()), 1)),
        Token::Open => {
            let mut elements = Vec::new();
            let mut position = 1;

            while position < tokens.len() {
                if matches!(tokens[position], Token::Close) {
                    return Ok((Expression::Compound(elements), position + 1));
                }

                let (element, consumed) = parse_expression(&tokens[position..], input)?;
                elements.push(element);
                position += consumed;
            }

            Err(ParseError::UnterminatedCompound {
                text: input.to_string(),
            })
        }
        Token::Close => Err(ParseError::UnexpectedClose {
            text: input.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(text: &str) -> Expression {
        Expression::Atom(text.to_string())
    }

    #[test]
    fn test_single_atom() {
        assert_eq!(parse("x"), Ok(vec![atom("x")]));
    }

    #[test]
    fn test_flat_compound() {
        assert_eq!(
            parse("(+ 1 2)"),
            Ok(vec![Expression::Compound(vec![
                atom("+"),
                atom("1"),
                atom("2"),
            ])])
        );
    }

    #[test]
    fn test_nested_compound() {
        assert_eq!(
            parse("(a (b c) d)"),
            Ok(vec![Expression::Compound(vec![
                atom("a"),
                Expression::Compound(vec![atom("b"), atom("c")]),
                atom("d"),
            ])])
        );
    }

    #[test]
    fn test_empty_compound() {
        assert_eq!(parse("()"), Ok(vec![Expression::Compound(Vec::new())]));
    }

    #[test]
    fn test_several_top_level_expressions() {
        let parsed = parse("(define x 5) (+ x 3) y").unwrap();
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[2], atom("y"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse(""), Ok(Vec::new()));
    }

    #[test]
    fn test_unterminated_compound() {
        assert_eq!(
            parse("(+ 1 ("),
            Err(ParseError::UnterminatedCompound {
                text: "(+ 1 (".to_string(),
            })
        );
        assert!(parse("(define x (lambda (a) a)").is_err());
    }

    #[test]
    fn test_unexpected_close() {
        assert_eq!(
            parse(")"),
            Err(ParseError::UnexpectedClose {
                text: ")".to_string(),
            })
        );
        // A stray close after a well-formed expression still fails the line
        assert!(parse("(a))").is_err());
    }

    #[test]
    fn test_expression_display_round_trip() {
        let parsed = parse("(if (> 3 2) 1 0)").unwrap();
        assert_eq!(parsed[0].to_string(), "(if (> 3 2) 1 0)");
    }
}
