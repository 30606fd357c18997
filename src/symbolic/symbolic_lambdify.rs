//! # Point Evaluation Module
//!
//! Safe numeric evaluation of expressions. The expression string is parsed with
//! the same restricted grammar the differentiator uses and the tree is walked
//! directly; nothing is ever compiled or executed as code.
//!
//! ## Key Functions
//! - `evaluate_at_point()` - `Option<f64>`, logs a warning on failure
//! - `try_evaluate_at_point()` - the same with the reason for failure
//! - `Expr::eval_expression()` - tree walk with explicit variable bindings
//! - `Expr::lambdify1D()` - closure for repeated evaluation in one variable
//!
//! `e` and `pi` are the mathematical constants unless one of them is the
//! variable being bound. `ln` is the natural logarithm, `log` is base 10 and
//! `sec(x)` is `1/cos(x)`.

use crate::symbolic::errors::EvalError;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::utils::linspace;
use log::warn;
use std::f64::consts::{E, PI};

impl Expr {
    /// Evaluates the expression with `vars[i]` bound to `values[i]`.
    ///
    /// Non-finite intermediate results are returned as they are; the caller
    /// decides whether `inf` or `NaN` is acceptable.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let f = Expr::parse_expression("x^2 + y").unwrap();
    /// assert_eq!(f.eval_expression(&["x", "y"], &[2.0, 1.0]), Ok(5.0));
    /// ```
    pub fn eval_expression(&self, vars: &[&str], values: &[f64]) -> Result<f64, EvalError> {
        let eval = |e: &Expr| e.eval_expression(vars, values);
        let res = match self {
            Expr::Var(name) => match vars.iter().position(|v| *v == name.as_str()) {
                Some(index) => values
                    .get(index)
                    .copied()
                    .ok_or_else(|| EvalError::UnboundVariable(name.clone()))?,
                None => match name.as_str() {
                    "e" => E,
                    "pi" => PI,
                    _ => return Err(EvalError::UnboundVariable(name.clone())),
                },
            },
            Expr::Const(val) => *val,
            Expr::Add(lhs, rhs) => eval(lhs)? + eval(rhs)?,
            Expr::Sub(lhs, rhs) => eval(lhs)? - eval(rhs)?,
            Expr::Mul(lhs, rhs) => eval(lhs)? * eval(rhs)?,
            Expr::Div(lhs, rhs) => eval(lhs)? / eval(rhs)?,
            Expr::Pow(base, exp) => eval(base)?.powf(eval(exp)?),
            Expr::Exp(expr) => eval(expr)?.exp(),
            Expr::Ln(expr) => eval(expr)?.ln(),
            Expr::Log10(expr) => eval(expr)?.log10(),
            Expr::Sqrt(expr) => eval(expr)?.sqrt(),
            Expr::sin(expr) => eval(expr)?.sin(),
            Expr::cos(expr) => eval(expr)?.cos(),
            Expr::tg(expr) => eval(expr)?.tan(),
            Expr::sec(expr) => 1.0 / eval(expr)?.cos(),
            Expr::Unknown(raw) => return Err(EvalError::Unsupported(raw.clone())),
        };
        Ok(res)
    }

    /// Turns a one-variable expression into a closure. Points where the
    /// expression cannot be evaluated give NaN.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let f = Expr::parse_expression("x^2").unwrap().lambdify1D("x");
    /// assert_eq!(f(3.0), 9.0);
    /// ```
    pub fn lambdify1D(&self, var: &str) -> Box<dyn Fn(f64) -> f64 + Send + Sync> {
        let expr = self.clone();
        let var = var.to_string();
        Box::new(move |x| {
            expr.eval_expression(&[var.as_str()], &[x])
                .unwrap_or(f64::NAN)
        })
    }

    /// # Returns
    /// Vector of function evaluations f(x[i])
    pub fn calc_vector_lambdified1D(&self, var: &str, x: &[f64]) -> Vec<f64> {
        let f = self.lambdify1D(var);
        x.iter().map(|xi| f(*xi)).collect()
    }

    /// Evaluates 1D function over a linearly spaced domain.
    pub fn lambdify1D_from_linspace(&self, var: &str, start: f64, end: f64, num_values: usize) -> Vec<f64> {
        let x = linspace(start, end, num_values);
        self.calc_vector_lambdified1D(var, &x)
    }
}

/// Evaluates `expression` with `variable` set to `value`, reporting why
/// evaluation failed.
pub fn try_evaluate_at_point(expression: &str, variable: &str, value: f64) -> Result<f64, EvalError> {
    let expr = Expr::parse_expression(expression).map_err(EvalError::Parse)?;
    let bound = expr.set_variable(variable, value);
    let res = bound.eval_expression(&[], &[])?;
    if res.is_finite() {
        Ok(res)
    } else {
        Err(EvalError::NonFinite(res))
    }
}

/// Evaluates `expression` with `variable` set to `value`.
///
/// Returns `None` when the expression does not parse, contains something that
/// cannot be evaluated, or the result is not finite (division by zero, `ln` of
/// a negative number).
///
/// # Examples
/// ```
/// use RustedDeriv::evaluate_at_point;
/// assert_eq!(evaluate_at_point("3*x^2 + 4*x + 1", "x", 2.0), Some(21.0));
/// assert_eq!(evaluate_at_point("1/x", "x", 0.0), None);
/// ```
pub fn evaluate_at_point(expression: &str, variable: &str, value: f64) -> Option<f64> {
    match try_evaluate_at_point(expression, variable, value) {
        Ok(res) => Some(res),
        Err(e) => {
            warn!("cannot evaluate {} at {} = {}: {}", expression, variable, value, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_eval_polynomial() {
        assert_eq!(evaluate_at_point("3*x^2 + 4*x + 1", "x", 0.0), Some(1.0));
        assert_eq!(evaluate_at_point("3*x^2 + 4*x + 1", "x", -2.0), Some(5.0));
        assert_relative_eq!(
            evaluate_at_point("3*x^2 + 4*x + 1", "x", 0.5).unwrap(),
            3.75,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_eval_functions() {
        assert_relative_eq!(evaluate_at_point("sin(x)", "x", PI / 2.0).unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(evaluate_at_point("sec(x)", "x", 0.0).unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(evaluate_at_point("log(x)", "x", 100.0).unwrap(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(evaluate_at_point("ln(x)", "x", E).unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(evaluate_at_point("sqrt(x)", "x", 9.0).unwrap(), 3.0, epsilon = 1e-12);
        assert_relative_eq!(evaluate_at_point("sec^2(x)", "x", 0.0).unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(evaluate_at_point("tan(x)", "x", PI / 4.0).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_eval_constants() {
        assert_relative_eq!(evaluate_at_point("e^x", "x", 1.0).unwrap(), E, epsilon = 1e-12);
        assert_relative_eq!(evaluate_at_point("exp(x)", "x", 1.0).unwrap(), E, epsilon = 1e-12);
        assert_relative_eq!(evaluate_at_point("pi*x", "x", 2.0).unwrap(), 2.0 * PI, epsilon = 1e-12);
        // the variable wins over the constant
        assert_eq!(evaluate_at_point("e^2", "e", 3.0), Some(9.0));
    }

    #[test]
    fn test_variable_s_does_not_touch_sin() {
        assert_relative_eq!(
            evaluate_at_point("sin(s) + s", "s", 0.0).unwrap(),
            0.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_eval_failures() {
        assert_eq!(evaluate_at_point("1/x", "x", 0.0), None);
        assert_eq!(evaluate_at_point("ln(x)", "x", -1.0), None);
        assert_eq!(evaluate_at_point("x +", "x", 1.0), None);
        assert_eq!(evaluate_at_point("foo(x)", "x", 1.0), None);
        assert_eq!(evaluate_at_point("y + 1", "x", 1.0), None);
        assert_eq!(
            try_evaluate_at_point("y + 1", "x", 1.0),
            Err(EvalError::UnboundVariable("y".to_string()))
        );
        assert!(matches!(
            try_evaluate_at_point("foo(x)", "x", 1.0),
            Err(EvalError::Unsupported(_))
        ));
        assert!(matches!(
            try_evaluate_at_point("1/x", "x", 0.0),
            Err(EvalError::NonFinite(_))
        ));
        assert!(matches!(
            try_evaluate_at_point("", "x", 0.0),
            Err(EvalError::Parse(_))
        ));
    }

    #[test]
    fn test_lambdify1D() {
        let f = Expr::parse_expression("x^2 - 1").unwrap();
        let values = f.lambdify1D_from_linspace("x", 0.0, 2.0, 3);
        assert_eq!(values, vec![-1.0, 0.0, 3.0]);
        let g = Expr::parse_expression("1/x").unwrap().lambdify1D("x");
        assert!(g(0.0).is_infinite());
        let h = Expr::parse_expression("foo(x)").unwrap().lambdify1D("x");
        assert!(h(1.0).is_nan());
    }
}
