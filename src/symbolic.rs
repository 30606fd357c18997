#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// a module turns a String expression into a symbolic expression
///
///# Example
/// ```
/// use RustedDeriv::symbolic::symbolic_engine::Expr;
/// let parsed_expression = Expr::parse_expression("x^2 + 3*sin(x)").unwrap();
/// println!(" parsed_expression {}", parsed_expression);
/// // text the parser does not understand is kept as it is
/// let raw = Expr::parse_permissive("x ++ 1");
/// assert_eq!(raw, Expr::Unknown("x ++ 1".to_string()));
///  ```
/// ________________________________________________________________________________________________________________________________
pub mod parse_expr;
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// expression tree, operator overloading, substitution and printing back to
/// the ASCII notation
///# Example#
/// ```
/// use RustedDeriv::symbolic::symbolic_engine::Expr;
/// let x = Expr::Var("x".to_string());
/// let f = Expr::Const(3.0) * x.clone().pow(Expr::Const(2.0)) + x;
/// assert_eq!(f.to_string(), "3*x^2 + x");
/// assert_eq!(f.set_variable("x", 2.0).eval_expression(&[], &[]), Ok(14.0));
/// ```
pub mod symbolic_engine;
///____________________________________________________________________________________________________________________________
/// # Derivatives
/// step-traced differentiation: derivative, human-readable steps, applied rules
///# Example#
/// ```
/// use RustedDeriv::symbolic::symbolic_engine_derivatives::{compute_derivative, Rule};
/// let result = compute_derivative("x*sin(x)", "x", 1).unwrap();
/// assert_eq!(result.derivative(), "sin(x) + x*cos(x)");
/// assert!(result.rules().contains(&Rule::ProductRule));
/// for step in result.steps() {
///     println!("{}", step);
/// }
/// ```
pub mod symbolic_engine_derivatives;
///____________________________________________________________________________________________________________________________
/// basic cleanup of expressions: constant folding, 0/1 identities, sign folding
pub mod symbolic_simplify;
///____________________________________________________________________________________________________________________________
/// safe numeric evaluation of expressions at a point
///# Example#
/// ```
/// use RustedDeriv::symbolic::symbolic_lambdify::evaluate_at_point;
/// let value = evaluate_at_point("sin(x) + x*cos(x)", "x", 0.0);
/// assert_eq!(value, Some(0.0));
/// ```
pub mod symbolic_lambdify;
///____________________________________________________________________________________________________________________________
/// TeX formatting of expressions and of derivative steps
pub mod symbolic_display;
/// error types
pub mod errors;
/// bracket search and numeric helpers
pub mod utils;
