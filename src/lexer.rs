// ============================================================================
// Tokens
// ============================================================================

/// The lexical classes of the language: the two parenthesis markers and
/// atoms. Tokens are ephemeral; the parser consumes them front to back.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Open,
    Close,
    Atom(String),
}

// ============================================================================
// Tokenizer
// ============================================================================

/// Split raw text into tokens. Whitespace delimits tokens and is never a
/// token itself; parentheses are always single-character tokens, splitting
/// any in-progress atom; every other run of characters is one atom. Any text
/// tokenizes, so there is no failure mode.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&ch) = chars.peek() {
        match ch {
            '(' => {
                tokens.push(Token::Open);
                chars.next();
            }
            ')' => {
                tokens.push(Token::Close);
                chars.next();
            }
            ch if ch.is_whitespace() => {
                chars.next();
            }
            _ => {
                let mut atom = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch == '(' || ch == ')' || ch.is_whitespace() {
                        break;
                    }
                    atom.push(ch);
                    chars.next();
                }
                tokens.push(Token::Atom(atom));
            }
        }
    }

    tokens
}
