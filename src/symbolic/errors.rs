//! Error types of the derivative engine, the point evaluator and the
//! configuration loader.

/// Errors returned by the expression differentiator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DiffError {
    #[error("expression is empty")]
    EmptyExpression,
    /// The differentiation variable must be one ASCII letter.
    #[error("invalid variable '{0}': expected a single letter")]
    InvalidVariable(String),
    #[error("invalid derivative order {0}: order starts at 1")]
    InvalidOrder(usize),
    #[error("derivative order {order} exceeds the configured maximum {max}")]
    OrderTooHigh { order: usize, max: usize },
    /// Only raised in strict mode; permissive mode passes the text through.
    #[error("cannot parse expression: {0}")]
    Parse(String),
    /// Only raised in strict mode: no rule matches this term.
    #[error("no differentiation rule for term '{0}'")]
    UnsupportedShape(String),
}

/// Errors of the point evaluator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    #[error("cannot parse expression: {0}")]
    Parse(String),
    #[error("cannot evaluate '{0}'")]
    Unsupported(String),
    #[error("variable '{0}' has no value")]
    UnboundVariable(String),
    /// Division by zero, log of a negative number and the like.
    #[error("result is not a finite number: {0}")]
    NonFinite(f64),
}

/// Errors of the engine configuration loader.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid value for '{field}': {reason}")]
    InvalidField { field: String, reason: String },
}
