use thiserror::Error;

/// Why an expression could not be compiled. Positions are byte offsets into the
/// input with all whitespace removed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty expression")]
    EmptyExpression,

    #[error("unexpected token at position {0}")]
    UnexpectedToken(usize),

    #[error("missing closing parenthesis")]
    MissingClosingParen,

    #[error("expected number at position {0}")]
    ExpectedNumber(usize),

    #[error("invalid number {0}")]
    InvalidNumber(String),

    #[error("unexpected unary plus at position {0}")]
    UnexpectedUnaryPlus(usize),

    #[error("parentheses nested deeper than {0} levels")]
    NestingTooDeep(usize),
}
