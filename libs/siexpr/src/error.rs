use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input does not conform to the literal or expression grammar.
    #[error("invalid syntax at character {pos}: {message}")]
    Syntax { pos: usize, message: &'static str },

    /// A token outside the expression vocabulary reached a later stage,
    /// or a postfix sequence was structurally malformed.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// An unmatched parenthesis reached the infix-to-postfix converter.
    #[error("unbalanced parenthesis in expression")]
    UnbalancedParen,

    /// Division by zero in a structurally valid expression.
    #[error("division by zero")]
    DivisionByZero,

    /// A ppm tolerance was applied to something it cannot annotate.
    #[error("invalid ppm expression: {0}")]
    PpmRejected(&'static str),
}

impl Error {
    /// Arithmetic errors indicate a structurally valid but semantically
    /// invalid expression.
    pub fn is_arithmetic(&self) -> bool {
        matches!(self, Error::DivisionByZero)
    }

    /// Fatal errors are never collapsed into "no result" by permissive
    /// parsing: arithmetic errors, and stray tokens that escaped the
    /// grammar into a later stage.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::DivisionByZero | Error::InvalidToken(_))
    }
}
