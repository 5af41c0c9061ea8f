//! # Expression Module
//!
//! Evaluates the free-form bill amount field ("500+300", "(1200-150)/2").
//!
//! ## Grammar
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  expression := term (("+" | "-") term)*                                 │
//! │  term       := factor (("*" | "/") factor)*                             │
//! │  factor     := ("+" | "-") factor | "(" expression ")" | number         │
//! │  number     := digits ["." digits] | "." digits | digits "."            │
//! │                                                                         │
//! │  Whitespace is skipped between tokens. Nothing else is accepted:        │
//! │  no names, no calls, no exponent notation, no decimal comma.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Policy
//! The amount field is a calculator, not a validating form. Anything that
//! does not evaluate to a finite number becomes `0`, which the bill pipeline
//! shows as "no results". [`try_evaluate`] keeps the reason for callers that
//! want to log it.
//!
//! ## Usage
//! ```rust
//! use mozo_core::expression::{evaluate, try_evaluate};
//!
//! assert_eq!(evaluate("500+300"), 800.0);
//! assert_eq!(evaluate("1000-200"), 800.0);
//! assert_eq!(evaluate("2+2*3"), 8.0);
//! assert_eq!(evaluate("alert(1)"), 0.0);
//! assert!(try_evaluate("10/0").is_err());
//! ```

use crate::error::ExpressionError;
use crate::MAX_EXPRESSION_LENGTH;

// =============================================================================
// Public API
// =============================================================================

/// Evaluates an amount expression, degrading every failure to `0`.
pub fn evaluate(expr: &str) -> f64 {
    try_evaluate(expr).unwrap_or(0.0)
}

/// Evaluates an amount expression, reporting why it failed.
///
/// ## Rules
/// - Empty or whitespace-only input is [`ExpressionError::Empty`]
/// - More than [`MAX_EXPRESSION_LENGTH`] characters (after trimming) is
///   rejected before tokenizing
/// - NaN or infinite results are [`ExpressionError::NotFinite`]
/// - Error positions count from the start of `expr`, leading whitespace
///   included
pub fn try_evaluate(expr: &str) -> Result<f64, ExpressionError> {
    let offset = expr.chars().take_while(|c| c.is_whitespace()).count();
    let expr = expr.trim();

    if expr.is_empty() {
        return Err(ExpressionError::Empty);
    }

    let len = expr.chars().count();
    if len > MAX_EXPRESSION_LENGTH {
        return Err(ExpressionError::TooLong {
            len,
            max: MAX_EXPRESSION_LENGTH,
        });
    }

    let tokens = tokenize(expr, offset)?;
    let mut parser = Parser::new(tokens);
    let value = parser.expression()?;

    if let Some(extra) = parser.peek() {
        return Err(extra.unexpected());
    }

    if !value.is_finite() {
        return Err(ExpressionError::NotFinite);
    }

    Ok(value)
}

/// Checks whether the raw amount text contains an arithmetic operator.
///
/// The UI echoes the evaluated amount under the input only when this is
/// true, so a plain "990" is not repeated back as "= $ 990,00".
pub fn has_operator(expr: &str) -> bool {
    expr.chars().any(|c| matches!(c, '+' | '-' | '*' | '/'))
}

// =============================================================================
// Tokenizer
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

#[derive(Debug, Clone, Copy)]
struct Spanned {
    token: Token,
    position: usize,
}

impl Spanned {
    fn unexpected(&self) -> ExpressionError {
        let token = match self.token {
            Token::Number(n) => n.to_string(),
            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Star => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
        };
        ExpressionError::UnexpectedToken {
            token,
            position: self.position,
        }
    }
}

/// `offset` is added to every position so they index the untrimmed input.
fn tokenize(input: &str, offset: usize) -> Result<Vec<Spanned>, ExpressionError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];

        if ch.is_whitespace() {
            i += 1;
            continue;
        }

        if ch.is_ascii_digit() || ch == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let literal: String = chars[start..i].iter().collect();
            // Only digits and dots reach here, so `parse` cannot see "inf"
            let value = literal
                .parse::<f64>()
                .map_err(|_| ExpressionError::MalformedNumber {
                    literal: literal.clone(),
                    position: start + offset,
                })?;
            tokens.push(Spanned {
                token: Token::Number(value),
                position: start + offset,
            });
            continue;
        }

        let token = match ch {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            other => {
                return Err(ExpressionError::UnexpectedChar {
                    ch: other,
                    position: i + offset,
                })
            }
        };
        tokens.push(Spanned {
            token,
            position: i + offset,
        });
        i += 1;
    }

    Ok(tokens)
}

// =============================================================================
// Recursive-Descent Parser
// =============================================================================

/// Evaluates while parsing; there is no AST to keep around.
///
/// Recursion depth is bounded by the input length cap.
struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Spanned>) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<Spanned> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Spanned> {
        let next = self.peek();
        if next.is_some() {
            self.pos += 1;
        }
        next
    }

    /// `term (("+" | "-") term)*`
    fn expression(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.term()?;

        while let Some(next) = self.peek() {
            match next.token {
                Token::Plus => {
                    self.advance();
                    value += self.term()?;
                }
                Token::Minus => {
                    self.advance();
                    value -= self.term()?;
                }
                _ => break,
            }
        }

        Ok(value)
    }

    /// `factor (("*" | "/") factor)*`
    fn term(&mut self) -> Result<f64, ExpressionError> {
        let mut value = self.factor()?;

        while let Some(next) = self.peek() {
            match next.token {
                Token::Star => {
                    self.advance();
                    value *= self.factor()?;
                }
                Token::Slash => {
                    self.advance();
                    value /= self.factor()?;
                }
                _ => break,
            }
        }

        Ok(value)
    }

    /// `("+" | "-") factor | "(" expression ")" | number`
    fn factor(&mut self) -> Result<f64, ExpressionError> {
        let Some(next) = self.advance() else {
            return Err(ExpressionError::UnexpectedEnd);
        };

        match next.token {
            Token::Number(value) => Ok(value),
            Token::Plus => self.factor(),
            Token::Minus => Ok(-self.factor()?),
            Token::LParen => {
                let value = self.expression()?;
                match self.advance() {
                    Some(Spanned {
                        token: Token::RParen,
                        ..
                    }) => Ok(value),
                    Some(other) => Err(other.unexpected()),
                    None => Err(ExpressionError::UnclosedParen {
                        position: next.position,
                    }),
                }
            }
            Token::Star | Token::Slash | Token::RParen => Err(next.unexpected()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sums_and_differences() {
        assert_eq!(evaluate("500+300"), 800.0);
        assert_eq!(evaluate("1000-200"), 800.0);
        assert_eq!(evaluate("990"), 990.0);
        assert_eq!(evaluate(" 120.50 + 79.50 "), 200.0);
    }

    #[test]
    fn test_operator_precedence() {
        assert_eq!(evaluate("2+3*4"), 14.0);
        assert_eq!(evaluate("(2+3)*4"), 20.0);
        assert_eq!(evaluate("100-20-30"), 50.0);
        assert_eq!(evaluate("1200/4/3"), 100.0);
        assert_eq!(evaluate("(1200-150)/2"), 525.0);
    }

    #[test]
    fn test_unary_signs() {
        assert_eq!(evaluate("-5+10"), 5.0);
        assert_eq!(evaluate("+5"), 5.0);
        assert_eq!(evaluate("10*-2"), -20.0);
        assert_eq!(evaluate("-(3+2)"), -5.0);
    }

    #[test]
    fn test_decimal_literals() {
        assert_eq!(evaluate(".5+.5"), 1.0);
        assert_eq!(evaluate("5.+1"), 6.0);
        assert_eq!(
            try_evaluate("1.2.3"),
            Err(ExpressionError::MalformedNumber {
                literal: "1.2.3".to_string(),
                position: 0
            })
        );
        assert_eq!(evaluate("."), 0.0);
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert_eq!(evaluate(""), 0.0);
        assert_eq!(evaluate("   "), 0.0);
        assert_eq!(evaluate(&" ".repeat(500)), 0.0);
        assert_eq!(try_evaluate("\t\n"), Err(ExpressionError::Empty));
    }

    #[test]
    fn test_length_cap() {
        let at_cap = format!("1{}", "+0".repeat(99)); // 199 chars
        assert_eq!(evaluate(&at_cap), 1.0);

        let over_cap = format!("1{}", "+1".repeat(100)); // 201 chars
        assert_eq!(evaluate(&over_cap), 0.0);
        assert!(matches!(
            try_evaluate(&over_cap),
            Err(ExpressionError::TooLong { len: 201, max: 200 })
        ));

        // Padding does not count against the cap
        let padded = format!("{}500+300{}", " ".repeat(150), " ".repeat(150));
        assert_eq!(evaluate(&padded), 800.0);
    }

    #[test]
    fn test_disallowed_tokens() {
        assert_eq!(evaluate("abc"), 0.0);
        assert_eq!(evaluate("12abc"), 0.0);
        assert_eq!(evaluate("1;2"), 0.0);
        assert_eq!(evaluate("Math.max(1,2)"), 0.0);
        assert_eq!(evaluate("alert(1)"), 0.0);
        assert_eq!(evaluate("2**3"), 0.0);
        assert_eq!(evaluate("1e3"), 0.0);
        assert_eq!(evaluate("1,5"), 0.0);
        assert_eq!(
            try_evaluate("5 x 2"),
            Err(ExpressionError::UnexpectedChar {
                ch: 'x',
                position: 2
            })
        );
    }

    #[test]
    fn test_structural_errors() {
        assert_eq!(try_evaluate("5+"), Err(ExpressionError::UnexpectedEnd));
        assert_eq!(
            try_evaluate("(5+3"),
            Err(ExpressionError::UnclosedParen { position: 0 })
        );
        assert_eq!(
            try_evaluate("5+3)"),
            Err(ExpressionError::UnexpectedToken {
                token: ")".to_string(),
                position: 3
            })
        );
        assert_eq!(
            try_evaluate("5 3"),
            Err(ExpressionError::UnexpectedToken {
                token: "3".to_string(),
                position: 2
            })
        );
        assert_eq!(
            try_evaluate("*5"),
            Err(ExpressionError::UnexpectedToken {
                token: "*".to_string(),
                position: 0
            })
        );
        assert_eq!(evaluate("()"), 0.0);
    }

    #[test]
    fn test_non_finite_results() {
        assert_eq!(try_evaluate("10/0"), Err(ExpressionError::NotFinite));
        assert_eq!(try_evaluate("0/0"), Err(ExpressionError::NotFinite));
        assert_eq!(evaluate("1/0-1/0"), 0.0);
    }

    #[test]
    fn test_positions_include_leading_whitespace() {
        assert_eq!(
            try_evaluate("   5 x"),
            Err(ExpressionError::UnexpectedChar {
                ch: 'x',
                position: 5
            })
        );
        assert_eq!(
            try_evaluate("  (5+3"),
            Err(ExpressionError::UnclosedParen { position: 2 })
        );
        assert_eq!(
            try_evaluate("\t5+3)"),
            Err(ExpressionError::UnexpectedToken {
                token: ")".to_string(),
                position: 4
            })
        );
    }

    #[test]
    fn test_has_operator() {
        assert!(has_operator("500+300"));
        assert!(has_operator("1000-200"));
        assert!(has_operator("10*3"));
        assert!(!has_operator("990"));
        assert!(!has_operator(""));
    }
}
