//! # Symbolic Engine Derivatives Module
//!
//! Rule-based differentiation that explains itself. Unlike a plain `diff()` the
//! engine here records a human-readable trace of every step and the name of
//! every rule it applied, so a calculator front end can show the work.
//!
//! ## Purpose
//!
//! - **Step-traced Differentiation**: `d/dx[3*x^2] = 6*x` style trace lines
//! - **Higher Orders**: the derivative is fed back in `order` times
//! - **Numerical Validation**: compare the last pass against a central difference
//!
//! ## Rules
//!
//! | term shape             | result            | rule                  |
//! |------------------------|-------------------|-----------------------|
//! | no variable            | `0`               | Constant Rule         |
//! | `x`                    | `1`               | Power Rule            |
//! | `c*x`                  | `c`               | Linear Rule           |
//! | `c*x^n`, `c/x^n`, `sqrt(x)` | `c*n*x^(n-1)` | Power Rule          |
//! | `c*sin(x)`             | `c*cos(x)`        | Sine Rule             |
//! | `c*cos(x)`             | `-c*sin(x)`       | Cosine Rule           |
//! | `c*tan(x)`             | `c*sec^2(x)`      | Tangent Rule          |
//! | `c*ln(x)`              | `c/x`             | Natural Logarithm Rule|
//! | `c*e^x`, `c*exp(x)`    | itself            | Exponential Rule      |
//! | `f*g`                  | `f'*g + f*g'`     | Product Rule          |
//! | sum of terms           | sum of derivatives| Sum Rule              |
//!
//! There is no chain rule: `sin(2*x)`, `e^(2*x)`, `log(x)` and other shapes
//! outside the table come back unchanged (or as `DiffError::UnsupportedShape`
//! in strict mode).
//!
//! ## Key Types
//! - `Differentiator` - engine configured by `EngineConfig`
//! - `DifferentiationResult` - derivative, trace and rule list of one call
//! - `Rule` - closed set of rule names
//! - `compute_derivative()` - one-shot call with the default configuration

use crate::Utils::logger::init_logger;
use crate::Utils::task_parser::EngineConfig;
use crate::symbolic::errors::DiffError;
use crate::symbolic::symbolic_engine::{Expr, format_number};
use crate::symbolic::utils::{linspace, norm, numerical_derivative};
use itertools::Itertools;
use log::{debug, info, warn};
use std::sync::Once;
use strum_macros::{Display, EnumIter};

static LOGGER_SETUP: Once = Once::new();

/// Installs the process-wide logger the first time an engine asks for one.
/// Returns true only for the call that ran the setup.
fn setup_logging(loglevel: &str) -> bool {
    let mut ran = false;
    LOGGER_SETUP.call_once(|| {
        init_logger(Some(loglevel), None);
        ran = true;
    });
    ran
}

/// Names of the differentiation rules the engine can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Rule {
    #[strum(to_string = "Constant Rule")]
    ConstantRule,
    #[strum(to_string = "Power Rule")]
    PowerRule,
    #[strum(to_string = "Linear Rule")]
    LinearRule,
    #[strum(to_string = "Sum Rule")]
    SumRule,
    #[strum(to_string = "Product Rule")]
    ProductRule,
    #[strum(to_string = "Sine Rule")]
    SineRule,
    #[strum(to_string = "Cosine Rule")]
    CosineRule,
    #[strum(to_string = "Tangent Rule")]
    TangentRule,
    #[strum(to_string = "Natural Logarithm Rule")]
    NaturalLogarithmRule,
    #[strum(to_string = "Exponential Rule")]
    ExponentialRule,
}

/// Outcome of one differentiation call.
#[derive(Debug, Clone, PartialEq)]
pub struct DifferentiationResult {
    derivative: String,
    steps: Vec<String>,
    rules: Vec<Rule>,
    derivative_expr: Expr,
    last_input: Expr,
    variable: String,
    order: usize,
}

impl DifferentiationResult {
    /// The derivative in ASCII notation, e.g. `3*x^2 + 4*x + 1`.
    pub fn derivative(&self) -> &str {
        &self.derivative
    }

    /// Trace lines in the order they were produced.
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// Applied rules in application order, duplicates included.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn derivative_expr(&self) -> &Expr {
        &self.derivative_expr
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Distinct rule names joined with ", ", first use first.
    pub fn rules_summary(&self) -> String {
        self.rules.iter().unique().join(", ")
    }

    /// Validates the last differentiation pass against a central difference.
    ///
    /// The input of the last pass (the original expression for order 1) is
    /// differentiated numerically on a `linspace` grid and compared with the
    /// symbolic derivative evaluated on the same grid.
    ///
    /// # Returns
    /// Tuple of (actual_norm, is_within_tolerance). Points where either side
    /// cannot be evaluated make the norm NaN and the check fail.
    pub fn compare_num1D(&self, start: f64, end: f64, num_values: usize, max_norm: f64) -> (f64, bool) {
        let var = self.variable.as_str();
        let analytical_derivative = self
            .derivative_expr
            .lambdify1D_from_linspace(var, start, end, num_values);
        let analytical_function = self.last_input.lambdify1D(var);
        let step = (1.0 / 1e4) * (end - start) / (num_values as f64 - 1.0);
        let domain = linspace(start, end, num_values);
        let numerical = numerical_derivative(&analytical_function, &domain, step);
        let norma_val = norm(&analytical_derivative, &numerical);
        (norma_val, max_norm > norma_val)
    }
}

/// Accumulates trace lines and rule names of one call.
#[derive(Default)]
struct StepTrace {
    steps: Vec<String>,
    rules: Vec<Rule>,
}

impl StepTrace {
    fn step(&mut self, line: impl Into<String>) {
        let line = line.into();
        debug!("{}", line);
        self.steps.push(line);
    }

    /// rule name plus the `d/dx[term] = result` line
    fn apply(&mut self, rule: Rule, term: &Expr, var: &str, result: &Expr) {
        self.rules.push(rule);
        self.step(format!("d/d{}[{}] = {}", var, term, result));
    }
}

fn ordinal(k: usize) -> String {
    const WORDS: [&str; 10] = [
        "First", "Second", "Third", "Fourth", "Fifth", "Sixth", "Seventh", "Eighth", "Ninth",
        "Tenth",
    ];
    if (1..=WORDS.len()).contains(&k) {
        return WORDS[k - 1].to_string();
    }
    let suffix = match (k % 10, k % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", k, suffix)
}

/// `f(x)`, `f'(x)`, `f''(x)`, `f'''(x)`, then `f^(4)(x)`, ...
fn derivative_label(k: usize, var: &str) -> String {
    match k {
        0..=3 => format!("f{}({})", "'".repeat(k), var),
        _ => format!("f^({})({})", k, var),
    }
}

fn scale(coeff: f64, expr: Expr) -> Expr {
    if coeff == 1.0 {
        expr
    } else if coeff == -1.0 {
        expr.negate()
    } else {
        Expr::Mul(Expr::Const(coeff).boxed(), expr.boxed())
    }
}

/// `coeff * var^exp` in the shape the trace prints: `x`, `-x`, `6*x`, `x^2`, `-x^-2`
fn power_term(coeff: f64, var: &str, exp: f64) -> Expr {
    if coeff == 0.0 {
        return Expr::Const(0.0);
    }
    if exp == 0.0 {
        return Expr::Const(coeff);
    }
    let v = Expr::Var(var.to_string());
    let base = if exp == 1.0 { v } else { v.pow(Expr::Const(exp)) };
    scale(coeff, base)
}

fn is_valid_variable(variable: &str) -> bool {
    let mut chars = variable.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_alphabetic())
}

/// Step-traced derivative engine.
///
/// # Examples
/// ```
/// use RustedDeriv::{Differentiator, EngineConfig};
/// let engine = Differentiator::new(EngineConfig::default());
/// let result = engine.differentiate("x^3 + 2*x^2 + x + 1", "x", 1).unwrap();
/// assert_eq!(result.derivative(), "3*x^2 + 4*x + 1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Differentiator {
    config: EngineConfig,
}

impl Differentiator {
    /// Creates an engine. A `loglevel` in the config installs the logger once
    /// per process.
    pub fn new(config: EngineConfig) -> Self {
        if let Some(level) = config.loglevel.as_deref() {
            setup_logging(level);
        }
        Differentiator { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn validate(&self, variable: &str, order: usize) -> Result<(), DiffError> {
        if !is_valid_variable(variable) {
            return Err(DiffError::InvalidVariable(variable.to_string()));
        }
        if order == 0 {
            return Err(DiffError::InvalidOrder(order));
        }
        if order > self.config.max_order {
            return Err(DiffError::OrderTooHigh {
                order,
                max: self.config.max_order,
            });
        }
        Ok(())
    }

    fn parse(&self, expression: &str) -> Result<Expr, DiffError> {
        match Expr::parse_expression(expression) {
            Ok(expr) => Ok(expr),
            Err(msg) if self.config.strict => Err(DiffError::Parse(msg)),
            Err(msg) => {
                warn!("{}; expression kept as written", msg);
                Ok(Expr::Unknown(expression.trim().to_string()))
            }
        }
    }

    /// Differentiates `expression` `order` times with respect to `variable`.
    ///
    /// # Arguments
    /// * `expression` - ASCII notation, e.g. `3*x^2 + 2*x - sin(x)`
    /// * `variable` - a single letter
    /// * `order` - 1 up to `EngineConfig::max_order`
    ///
    /// # Returns
    /// Derivative, step trace and rule list. In permissive mode text the
    /// parser does not understand passes through unchanged instead of failing.
    pub fn differentiate(
        &self,
        expression: &str,
        variable: &str,
        order: usize,
    ) -> Result<DifferentiationResult, DiffError> {
        if expression.trim().is_empty() {
            return Err(DiffError::EmptyExpression);
        }
        self.validate(variable, order)?;
        let expr = self.parse(expression)?;
        self.differentiate_expr(&expr, variable, order)
    }

    /// Same as [`Differentiator::differentiate`] for an already parsed expression.
    pub fn differentiate_expr(
        &self,
        expr: &Expr,
        variable: &str,
        order: usize,
    ) -> Result<DifferentiationResult, DiffError> {
        self.validate(variable, order)?;
        info!("differentiating {} with respect to {}, order {}", expr, variable, order);
        let mut trace = StepTrace::default();
        trace.step(format!("Original: {}", expr));
        let mut current = expr.clone();
        let mut last_input = expr.clone();
        for k in 1..=order {
            trace.step(format!("**STEP {}: {} derivative**", k, ordinal(k)));
            trace.step(format!("{} = {}", derivative_label(k - 1, variable), current));
            let next = self.single_pass(&current, variable, &mut trace)?;
            trace.step(format!("{} = {}", derivative_label(k, variable), next));
            last_input = std::mem::replace(&mut current, next);
        }
        trace.step(format!("Result: {}", current));
        info!("result: {}", current);
        Ok(DifferentiationResult {
            derivative: current.to_string(),
            steps: trace.steps,
            rules: trace.rules,
            derivative_expr: current,
            last_input,
            variable: variable.to_string(),
            order,
        })
    }

    /// One derivative of the whole expression: the Sum Rule over its terms,
    /// or the per-term procedure when there is only one.
    fn single_pass(&self, expr: &Expr, var: &str, trace: &mut StepTrace) -> Result<Expr, DiffError> {
        let terms = expr.split_terms();
        if terms.len() < 2 {
            return self.diff_term(expr, var, trace);
        }
        trace.rules.push(Rule::SumRule);
        trace.step(format!(
            "Applying Sum Rule: d/d{v}[f + g] = f' + g', differentiating each of the {} terms",
            terms.len(),
            v = var
        ));
        let mut derivatives = Vec::with_capacity(terms.len());
        for (i, term) in terms.iter().enumerate() {
            trace.step(format!("Term {}: {}", i + 1, term));
            derivatives.push(self.diff_term(term, var, trace)?);
        }
        Ok(Expr::join_terms(derivatives))
    }

    fn diff_term(&self, term: &Expr, var: &str, trace: &mut StepTrace) -> Result<Expr, DiffError> {
        if !term.contains_variable(var) {
            let result = Expr::Const(0.0);
            trace.apply(Rule::ConstantRule, term, var, &result);
            return Ok(result);
        }
        if let Some((coeff, n)) = term.as_power_term(var) {
            return Ok(self.power_rule(term, coeff, n, var, trace));
        }
        let (coeff, factor) = term.split_coefficient();
        let matched = match &factor {
            Expr::sin(arg) if arg.is_var(var) => {
                Some((Rule::SineRule, scale(coeff, Expr::cos(arg.clone()))))
            }
            Expr::cos(arg) if arg.is_var(var) => {
                Some((Rule::CosineRule, scale(-coeff, Expr::sin(arg.clone()))))
            }
            Expr::tg(arg) if arg.is_var(var) => Some((
                Rule::TangentRule,
                scale(coeff, Expr::sec(arg.clone()).pow(Expr::Const(2.0))),
            )),
            Expr::Ln(arg) if arg.is_var(var) => Some((
                Rule::NaturalLogarithmRule,
                Expr::Div(Expr::Const(coeff).boxed(), arg.clone()),
            )),
            Expr::Exp(arg) if arg.is_var(var) => {
                Some((Rule::ExponentialRule, scale(coeff, factor.clone())))
            }
            Expr::Pow(base, exp) if var != "e" && base.is_var("e") && exp.is_var(var) => {
                Some((Rule::ExponentialRule, scale(coeff, factor.clone())))
            }
            _ => None,
        };
        if let Some((rule, result)) = matched {
            trace.apply(rule, term, var, &result);
            return Ok(result);
        }
        match &factor {
            // bracketed sum with a coefficient, 2*(x^2 + x)
            Expr::Add(..) | Expr::Sub(..) => {
                let inner = self.single_pass(&factor, var, trace)?;
                let result = scale(coeff, inner).simplify_basic();
                trace.step(format!("d/d{}[{}] = {}", var, term, result));
                Ok(result)
            }
            Expr::Mul(f, g) => self.product_rule(term, coeff, f, g, var, trace),
            _ => self.no_rule(term, trace),
        }
    }

    fn power_rule(&self, term: &Expr, coeff: f64, n: f64, var: &str, trace: &mut StepTrace) -> Expr {
        if n == 1.0 {
            let result = Expr::Const(coeff);
            let rule = if term.is_var(var) {
                Rule::PowerRule
            } else {
                Rule::LinearRule
            };
            trace.apply(rule, term, var, &result);
            return result;
        }
        let new_coeff = coeff * n;
        let new_exp = n - 1.0;
        trace.step(format!("Power Rule: d/d{v}[c*{v}^n] = c*n*{v}^(n-1)", v = var));
        trace.step(format!(
            "Coefficient: {} × {} = {}",
            format_number(coeff),
            format_number(n),
            format_number(new_coeff)
        ));
        trace.step(format!(
            "Exponent: {} - 1 = {}",
            format_number(n),
            format_number(new_exp)
        ));
        let result = power_term(new_coeff, var, new_exp);
        trace.step(format!("→ {}", result));
        trace.apply(Rule::PowerRule, term, var, &result);
        result
    }

    fn product_rule(
        &self,
        term: &Expr,
        coeff: f64,
        f: &Expr,
        g: &Expr,
        var: &str,
        trace: &mut StepTrace,
    ) -> Result<Expr, DiffError> {
        trace.rules.push(Rule::ProductRule);
        trace.step(format!("Product Rule: d/d{}[f*g] = f'*g + f*g'", var));
        trace.step(format!("f = {}, g = {}", f, g));
        let df = self.diff_term(f, var, trace)?;
        let dg = self.diff_term(g, var, trace)?;
        trace.step(format!("f' = {}, g' = {}", df, dg));
        let result = scale(coeff, df * g.clone() + f.clone() * dg).simplify_basic();
        trace.step(format!("d/d{}[{}] = f'*g + f*g' = {}", var, term, result));
        Ok(result)
    }

    fn no_rule(&self, term: &Expr, trace: &mut StepTrace) -> Result<Expr, DiffError> {
        if self.config.strict {
            return Err(DiffError::UnsupportedShape(term.to_string()));
        }
        debug!("no rule for {}", term);
        trace.step(format!("No rule matched for {}; left unchanged", term));
        Ok(term.clone())
    }
}

/// Differentiates with the default configuration.
///
/// # Examples
/// ```
/// use RustedDeriv::compute_derivative;
/// let result = compute_derivative("x^3", "x", 3).unwrap();
/// assert_eq!(result.derivative(), "6");
/// ```
pub fn compute_derivative(
    expression: &str,
    variable: &str,
    order: usize,
) -> Result<DifferentiationResult, DiffError> {
    Differentiator::default().differentiate(expression, variable, order)
}

impl Expr {
    /// Computes the nth derivative of a single-variable expression without
    /// keeping the trace. `n = 0` returns the expression itself.
    pub fn n_th_derivative1D(&self, var_name: &str, n: usize) -> Result<Expr, DiffError> {
        if n == 0 {
            return Ok(self.clone());
        }
        let config = EngineConfig {
            max_order: n,
            ..EngineConfig::default()
        };
        Differentiator::new(config)
            .differentiate_expr(self, var_name, n)
            .map(|result| result.derivative_expr)
    }
}
