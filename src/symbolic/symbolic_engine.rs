//! # Symbolic Engine Module
//!
//! Core expression tree of the derivative engine. Every other module works on
//! the [`Expr`] defined here: the parser builds it, the differentiator pattern
//! matches over it, the point evaluator walks it and the `Display`
//! implementation renders it back to the ASCII notation users type in
//! (`3*x^2 + 4*x + 1`, `sin(x)`, `sec^2(x)`, `e^x`).
//!
//! ## Main Structures and Methods
//!
//! ### `Expr` Enum
//! - **Variables**: `Var(String)`. `Var("e")` and `Var("pi")` double as the
//!   mathematical constants when they are not the differentiation variable
//! - **Constants**: `Const(f64)`
//! - **Operations**: `Add`, `Sub`, `Mul`, `Div`, `Pow`
//! - **Functions**: `Exp`, `Ln`, `Log10`, `Sqrt`, `sin`, `cos`, `tg`, `sec`
//! - **Fallback**: `Unknown(String)` keeps text no rule understands, verbatim
//!
//! ### Key Methods
//! - `contains_variable(var)` - does the subtree depend on `var`
//! - `set_variable(var, value)` - structural substitution of a value
//! - `negate()` - `-e` with constant coefficients folded
//! - `split_terms()` - sign-aware list of additive terms
//! - `split_coefficient()` - numeric coefficient and the remaining factor
//!
//! ## Interesting Code Features
//!
//! 1. **Spelling-preserving exponentials**: `e^x` parses to `Pow(Var("e"), x)` and
//!    `exp(x)` to `Exp(x)`, so the derivative of either prints the way it was typed
//! 2. **Precedence-aware printing**: parentheses appear only where the ASCII
//!    notation needs them, and `a + -b` prints as `a - b`
//! 3. **Operator Overloading**: std::ops traits build trees with `x * y + z`

#![allow(non_camel_case_types)]

use std::fmt;

/// Expression tree of the restricted algebraic notation.
///
/// # Examples
/// ```rust, ignore
/// use symbolic_engine::Expr;
/// let x = Expr::Var("x".to_string());
/// let expr = Expr::Add(Box::new(x), Box::new(Expr::Const(2.0)));
/// assert_eq!(expr.to_string(), "x + 2");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Symbolic variable with a name (e.g., "x", "t")
    Var(String),
    /// Numerical constant value
    Const(f64),
    /// Addition operation: left + right
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction operation: left - right
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication operation: left * right
    Mul(Box<Expr>, Box<Expr>),
    /// Division operation: left / right
    Div(Box<Expr>, Box<Expr>),
    /// Power operation: base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
    /// Exponential function written as exp(x)
    Exp(Box<Expr>),
    /// Natural logarithm: ln(x)
    Ln(Box<Expr>),
    /// Decimal logarithm: log(x)
    Log10(Box<Expr>),
    /// Square root: sqrt(x)
    Sqrt(Box<Expr>),
    /// Sine function: sin(x)
    sin(Box<Expr>),
    /// Cosine function: cos(x)
    cos(Box<Expr>),
    /// Tangent function, printed as tan(x)
    tg(Box<Expr>),
    /// Secant function: sec(x) = 1/cos(x)
    sec(Box<Expr>),
    /// Raw text with no recognised shape; passed through unchanged
    Unknown(String),
}

/// Renders a number the way the calculator shows it: `3` rather than `3.0`,
/// and never `-0`.
pub fn format_number(val: f64) -> String {
    if val == 0.0 {
        "0".to_string()
    } else {
        format!("{}", val)
    }
}

/// true when `word` occurs in `text` with no identifier character glued to
/// either side of it.
pub(crate) fn contains_word(text: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    let is_ident = |c: char| c.is_ascii_alphanumeric() || c == '_';
    text.match_indices(word).any(|(pos, _)| {
        let before = text[..pos].chars().next_back();
        let after = text[pos + word.len()..].chars().next();
        !before.is_some_and(is_ident) && !after.is_some_and(is_ident)
    })
}

impl Expr {
    fn is_sum(&self) -> bool {
        matches!(self, Expr::Add(..) | Expr::Sub(..))
    }

    fn is_atom(&self) -> bool {
        match self {
            Expr::Var(_) | Expr::Unknown(_) => true,
            Expr::Const(val) => *val >= 0.0,
            Expr::Exp(_)
            | Expr::Ln(_)
            | Expr::Log10(_)
            | Expr::Sqrt(_)
            | Expr::sin(_)
            | Expr::cos(_)
            | Expr::tg(_)
            | Expr::sec(_) => true,
            _ => false,
        }
    }

    /// factor of a product; sums need brackets
    fn factor_str(&self) -> String {
        if self.is_sum() {
            format!("({})", self)
        } else {
            self.to_string()
        }
    }
}

/// Display implementation producing the ASCII notation accepted by the parser.
///
/// Round trip: `Expr::parse_expression(&e.to_string())` rebuilds an
/// expression that evaluates identically.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(val) => write!(f, "{}", format_number(*val)),
            Expr::Add(..) | Expr::Sub(..) => {
                // walk the left spine of the sum instead of recursing per term
                let mut tail = Vec::new();
                let mut head = self;
                loop {
                    let (lhs, rhs, minus) = match head {
                        Expr::Add(lhs, rhs) => (lhs, rhs, false),
                        Expr::Sub(lhs, rhs) => (lhs, rhs, true),
                        _ => break,
                    };
                    tail.push((minus, rhs.as_ref()));
                    head = lhs.as_ref();
                }
                write!(f, "{}", head)?;
                for (minus, rhs) in tail.into_iter().rev() {
                    if minus && rhs.is_sum() {
                        write!(f, " - ({})", rhs)?;
                        continue;
                    }
                    let rhs_str = rhs.to_string();
                    match (minus, rhs_str.strip_prefix('-')) {
                        (false, Some(rest)) => write!(f, " - {}", rest)?,
                        (false, None) => write!(f, " + {}", rhs_str)?,
                        (true, Some(rest)) => write!(f, " + {}", rest)?,
                        (true, None) => write!(f, " - {}", rhs_str)?,
                    }
                }
                Ok(())
            }
            Expr::Mul(lhs, rhs) => match lhs.as_ref() {
                Expr::Const(c) if *c == 1.0 => write!(f, "{}", rhs),
                Expr::Const(c) if *c == -1.0 => write!(f, "-{}", rhs.factor_str()),
                _ => {
                    let rhs_str = rhs.factor_str();
                    if rhs_str.starts_with('-') {
                        write!(f, "{}*({})", lhs.factor_str(), rhs_str)
                    } else {
                        write!(f, "{}*{}", lhs.factor_str(), rhs_str)
                    }
                }
            },
            Expr::Div(num, den) => {
                let den_str = den.to_string();
                let wrap_den = den.is_sum()
                    || matches!(den.as_ref(), Expr::Mul(..) | Expr::Div(..))
                    || den_str.starts_with('-');
                if wrap_den {
                    write!(f, "{}/({})", num.factor_str(), den_str)
                } else {
                    write!(f, "{}/{}", num.factor_str(), den_str)
                }
            }
            Expr::Pow(base, exp) => {
                if let (Expr::sec(arg), Expr::Const(n)) = (base.as_ref(), exp.as_ref()) {
                    return write!(f, "sec^{}({})", format_number(*n), arg);
                }
                let base_str = if base.is_atom() {
                    base.to_string()
                } else {
                    format!("({})", base)
                };
                let exp_str = match exp.as_ref() {
                    Expr::Var(_) | Expr::Const(_) => exp.to_string(),
                    _ => format!("({})", exp),
                };
                write!(f, "{}^{}", base_str, exp_str)
            }
            Expr::Exp(expr) => write!(f, "exp({})", expr),
            Expr::Ln(expr) => write!(f, "ln({})", expr),
            Expr::Log10(expr) => write!(f, "log({})", expr),
            Expr::Sqrt(expr) => write!(f, "sqrt({})", expr),
            Expr::sin(expr) => write!(f, "sin({})", expr),
            Expr::cos(expr) => write!(f, "cos({})", expr),
            Expr::tg(expr) => write!(f, "tan({})", expr),
            Expr::sec(expr) => write!(f, "sec({})", expr),
            Expr::Unknown(raw) => write!(f, "{}", raw),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(self))
    }
}

impl Expr {
    /// BASIC FEATURES

    /// Convenience method to wrap expression in Box for recursive structures.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Creates power expression self^rhs.
    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Pow(self.boxed(), rhs.boxed())
    }

    /// Checks if expression is exactly zero (constant 0.0).
    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Const(val) if *val == 0.0)
    }

    /// Checks if expression is exactly one (constant 1.0).
    pub fn is_one(&self) -> bool {
        matches!(self, Expr::Const(val) if *val == 1.0)
    }

    /// true for `Var(var)` and nothing else
    pub fn is_var(&self, var: &str) -> bool {
        matches!(self, Expr::Var(name) if name == var)
    }

    /// check if the expression depends on a variable. Raw `Unknown` text is
    /// searched for the variable name as a whole word.
    pub fn contains_variable(&self, var_name: &str) -> bool {
        match self {
            Expr::Var(name) => name == var_name,
            Expr::Const(_) => false,
            Expr::Add(left, right)
            | Expr::Sub(left, right)
            | Expr::Mul(left, right)
            | Expr::Div(left, right)
            | Expr::Pow(left, right) => {
                left.contains_variable(var_name) || right.contains_variable(var_name)
            }
            Expr::Exp(expr)
            | Expr::Ln(expr)
            | Expr::Log10(expr)
            | Expr::Sqrt(expr)
            | Expr::sin(expr)
            | Expr::cos(expr)
            | Expr::tg(expr)
            | Expr::sec(expr) => expr.contains_variable(var_name),
            Expr::Unknown(raw) => contains_word(raw, var_name),
        }
    }

    /// Substitutes a variable with a constant value throughout the expression.
    ///
    /// Works on the tree, not on the text, so a variable `s` leaves `sin`
    /// and `sec` alone.
    pub fn set_variable(&self, var: &str, value: f64) -> Expr {
        let sub = |e: &Expr| Box::new(e.set_variable(var, value));
        match self {
            Expr::Var(name) if name == var => Expr::Const(value),
            Expr::Add(lhs, rhs) => Expr::Add(sub(lhs), sub(rhs)),
            Expr::Sub(lhs, rhs) => Expr::Sub(sub(lhs), sub(rhs)),
            Expr::Mul(lhs, rhs) => Expr::Mul(sub(lhs), sub(rhs)),
            Expr::Div(lhs, rhs) => Expr::Div(sub(lhs), sub(rhs)),
            Expr::Pow(base, exp) => Expr::Pow(sub(base), sub(exp)),
            Expr::Exp(expr) => Expr::Exp(sub(expr)),
            Expr::Ln(expr) => Expr::Ln(sub(expr)),
            Expr::Log10(expr) => Expr::Log10(sub(expr)),
            Expr::Sqrt(expr) => Expr::Sqrt(sub(expr)),
            Expr::sin(expr) => Expr::sin(sub(expr)),
            Expr::cos(expr) => Expr::cos(sub(expr)),
            Expr::tg(expr) => Expr::tg(sub(expr)),
            Expr::sec(expr) => Expr::sec(sub(expr)),
            _ => self.clone(),
        }
    }

    /// `-self`, folding the sign into a leading numeric coefficient when
    /// there is one: `-(3*x)` is `-3*x`, `-(-x)` is `x`.
    pub fn negate(&self) -> Expr {
        match self {
            Expr::Const(val) => Expr::Const(-val),
            Expr::Mul(lhs, rhs) => match lhs.as_ref() {
                Expr::Const(c) if *c == -1.0 => *rhs.clone(),
                Expr::Const(c) => Expr::Mul(Box::new(Expr::Const(-c)), rhs.clone()),
                _ => -self.clone(),
            },
            Expr::Div(num, den) if matches!(num.as_ref(), Expr::Const(_)) => {
                Expr::Div(Box::new(num.negate()), den.clone())
            }
            _ => -self.clone(),
        }
    }

    /// true when the printed form starts with a minus sign
    pub fn is_negative_leading(&self) -> bool {
        match self {
            Expr::Const(val) => *val < 0.0,
            Expr::Mul(lhs, _) | Expr::Div(lhs, _) => lhs.is_negative_leading(),
            _ => false,
        }
    }

    /// Sign-aware list of the additive terms of the expression.
    ///
    /// `a - b + c` gives `[a, -b, c]`; a bracketed sum inside a product stays
    /// one term.
    pub fn split_terms(&self) -> Vec<Expr> {
        let mut terms = Vec::new();
        let mut pending = vec![(self, false)];
        while let Some((expr, negative)) = pending.pop() {
            match expr {
                Expr::Add(lhs, rhs) => {
                    pending.push((rhs.as_ref(), negative));
                    pending.push((lhs.as_ref(), negative));
                }
                Expr::Sub(lhs, rhs) => {
                    pending.push((rhs.as_ref(), !negative));
                    pending.push((lhs.as_ref(), negative));
                }
                _ if negative => terms.push(expr.negate()),
                _ => terms.push(expr.clone()),
            }
        }
        terms
    }

    /// Joins derivative terms back into one sum. Zero terms are dropped and a
    /// negative term is attached with `-`; an empty sum is `0`.
    pub fn join_terms(terms: Vec<Expr>) -> Expr {
        let mut iter = terms.into_iter().filter(|t| !t.is_zero());
        let Some(first) = iter.next() else {
            return Expr::Const(0.0);
        };
        iter.fold(first, |acc, term| {
            if term.is_negative_leading() {
                Expr::Sub(acc.boxed(), term.negate().boxed())
            } else {
                Expr::Add(acc.boxed(), term.boxed())
            }
        })
    }

    /// Splits a product into its numeric coefficient and the rest:
    /// `3*x^2` gives `(3, x^2)`, `x/2` gives `(0.5, x)`, `2*x*sin(x)` gives
    /// `(2, x*sin(x))`. Expressions without a coefficient return `(1, self)`.
    pub fn split_coefficient(&self) -> (f64, Expr) {
        match self {
            Expr::Mul(lhs, rhs) => match (lhs.as_ref(), rhs.as_ref()) {
                (Expr::Const(c), other) | (other, Expr::Const(c)) => {
                    let (inner, rest) = other.split_coefficient();
                    (c * inner, rest)
                }
                (l, r) => {
                    let (cl, rl) = l.split_coefficient();
                    let (cr, rr) = r.split_coefficient();
                    if cl == 1.0 && cr == 1.0 {
                        (1.0, self.clone())
                    } else {
                        (cl * cr, rl * rr)
                    }
                }
            },
            Expr::Div(num, den) => match den.as_ref() {
                Expr::Const(d) if *d != 0.0 => {
                    let (c, rest) = num.split_coefficient();
                    (c / d, rest)
                }
                _ => (1.0, self.clone()),
            },
            _ => (1.0, self.clone()),
        }
    }

    /// Reads the expression as `c * var^n` and returns `(c, n)`.
    ///
    /// Accepted shapes: `var`, `c*var`, `c*var^n` (n any constant expression),
    /// `c/var^n` (n negated), `sqrt(var)` (n = 0.5). Anything else gives `None`.
    pub fn as_power_term(&self, var: &str) -> Option<(f64, f64)> {
        let (coeff, rest) = self.split_coefficient();
        match &rest {
            Expr::Var(name) if name == var => Some((coeff, 1.0)),
            // constant exponents written as expressions: x^(1/2), x^2^2
            Expr::Pow(base, exp) if base.is_var(var) => match exp.simplify_basic() {
                Expr::Const(n) => Some((coeff, n)),
                _ => None,
            },
            Expr::Sqrt(inner) if inner.is_var(var) => Some((coeff, 0.5)),
            Expr::Div(num, den) => match num.as_ref() {
                Expr::Const(k) => {
                    let (d, n) = den.as_power_term(var)?;
                    if d == 0.0 {
                        None
                    } else {
                        Some((coeff * k / d, -n))
                    }
                }
                _ => None,
            },
            _ => None,
        }
    }
}
