// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
//! Step-traced symbolic derivatives of single-variable expressions, a safe
//! point evaluator and a TeX display formatter.
//!
//! ```
//! use RustedDeriv::{compute_derivative, evaluate_at_point, format_step_for_display};
//! let result = compute_derivative("x^3 + 2*x^2 + x + 1", "x", 1).unwrap();
//! assert_eq!(result.derivative(), "3*x^2 + 4*x + 1");
//! assert_eq!(evaluate_at_point(result.derivative(), "x", 1.0), Some(8.0));
//! let shown: Vec<String> = result.steps().iter().map(|s| format_step_for_display(s)).collect();
//! assert_eq!(shown.len(), result.steps().len());
//! ```
pub mod Utils;
pub mod symbolic;

pub use Utils::logger::init_logger;
pub use Utils::task_parser::EngineConfig;
pub use symbolic::errors::{ConfigError, DiffError, EvalError};
pub use symbolic::symbolic_display::{format_math_display, format_step_for_display};
pub use symbolic::symbolic_engine::Expr;
pub use symbolic::symbolic_engine_derivatives::{
    DifferentiationResult, Differentiator, Rule, compute_derivative,
};
pub use symbolic::symbolic_lambdify::{evaluate_at_point, try_evaluate_at_point};
