//! # Basic Expression Cleanup
//!
//! The derivative engine deliberately does no real algebra. What it does need
//! is the cleanup that keeps rule output readable:
//!
//! 1. **Constant Folding**: `2 * 3` → `6`, `3 * (2 * x)` → `6 * x`
//! 2. **Identities**: `x + 0`, `x * 1`, `x * 0`, `x / 1`, `x ^ 1`, `x ^ 0`
//! 3. **Sign Folding**: `a + (-3) * x` → `a - 3 * x`, `a - (-x)` → `a + x`,
//!    `-(-x)` → `x`
//!
//! Like terms are not collected: `x + x` stays `x + x`.

use crate::symbolic::symbolic_engine::Expr;

impl Expr {
    //___________________________________SIMPLIFICATION____________________________________

    /// Bottom-up constant folding and `0`/`1` identities.
    ///
    /// # Returns
    /// Expression with the same value and no trivially removable nodes
    pub fn simplify_basic(&self) -> Expr {
        match self {
            Expr::Add(lhs, rhs) => {
                let lhs = lhs.simplify_basic();
                let rhs = rhs.simplify_basic();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a + b),
                    _ if lhs.is_zero() => rhs,
                    _ if rhs.is_zero() => lhs,
                    _ if rhs.is_negative_leading() => Expr::Sub(lhs.boxed(), rhs.negate().boxed()),
                    _ => Expr::Add(lhs.boxed(), rhs.boxed()),
                }
            }
            Expr::Sub(lhs, rhs) => {
                let lhs = lhs.simplify_basic();
                let rhs = rhs.simplify_basic();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a - b),
                    _ if rhs.is_zero() => lhs,
                    _ if lhs.is_zero() => rhs.negate(),
                    _ if rhs.is_negative_leading() => Expr::Add(lhs.boxed(), rhs.negate().boxed()),
                    _ => Expr::Sub(lhs.boxed(), rhs.boxed()),
                }
            }
            Expr::Mul(lhs, rhs) => {
                let lhs = lhs.simplify_basic();
                let rhs = rhs.simplify_basic();
                if lhs.is_zero() || rhs.is_zero() {
                    return Expr::Const(0.0);
                }
                if lhs.is_one() {
                    return rhs;
                }
                if rhs.is_one() {
                    return lhs;
                }
                match (lhs, rhs) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a * b),
                    // c1 * (c2 * e) = (c1 * c2) * e, a * (c * b) = c * (a * b)
                    (a, Expr::Mul(inner_lhs, inner_rhs)) if matches!(*inner_lhs, Expr::Const(_)) => {
                        match (a, *inner_lhs) {
                            (Expr::Const(c1), Expr::Const(c2)) => {
                                Expr::Mul(Expr::Const(c1 * c2).boxed(), inner_rhs).simplify_basic()
                            }
                            (a, c) => Expr::Mul(c.boxed(), Expr::Mul(a.boxed(), inner_rhs).boxed())
                                .simplify_basic(),
                        }
                    }
                    // (c * a) * b = c * (a * b)
                    (Expr::Mul(inner_lhs, inner_rhs), b)
                        if matches!(*inner_lhs, Expr::Const(_)) && !matches!(b, Expr::Const(_)) =>
                    {
                        Expr::Mul(inner_lhs, Expr::Mul(inner_rhs, b.boxed()).boxed()).simplify_basic()
                    }
                    // coefficient goes in front
                    (a, Expr::Const(c)) => Expr::Mul(Expr::Const(c).boxed(), a.boxed()).simplify_basic(),
                    (a, b) => Expr::Mul(a.boxed(), b.boxed()),
                }
            }
            Expr::Div(lhs, rhs) => {
                let lhs = lhs.simplify_basic();
                let rhs = rhs.simplify_basic();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) if *b != 0.0 => Expr::Const(a / b),
                    _ if lhs.is_zero() && !rhs.is_zero() => Expr::Const(0.0),
                    _ if rhs.is_one() => lhs,
                    _ => Expr::Div(lhs.boxed(), rhs.boxed()),
                }
            }
            Expr::Pow(base, exp) => {
                let base = base.simplify_basic();
                let exp = exp.simplify_basic();
                match (&base, &exp) {
                    _ if exp.is_zero() => Expr::Const(1.0),
                    _ if exp.is_one() => base,
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a.powf(*b)),
                    _ => base.pow(exp),
                }
            }
            Expr::Exp(expr) => Expr::Exp(expr.simplify_basic().boxed()),
            Expr::Ln(expr) => Expr::Ln(expr.simplify_basic().boxed()),
            Expr::Log10(expr) => Expr::Log10(expr.simplify_basic().boxed()),
            Expr::Sqrt(expr) => Expr::Sqrt(expr.simplify_basic().boxed()),
            Expr::sin(expr) => Expr::sin(expr.simplify_basic().boxed()),
            Expr::cos(expr) => Expr::cos(expr.simplify_basic().boxed()),
            Expr::tg(expr) => Expr::tg(expr.simplify_basic().boxed()),
            Expr::sec(expr) => Expr::sec(expr.simplify_basic().boxed()),
            Expr::Var(_) | Expr::Const(_) | Expr::Unknown(_) => self.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Expr {
        Expr::parse_expression(input).unwrap()
    }

    #[test]
    fn test_identities() {
        assert_eq!(parse("x + 0").simplify_basic().to_string(), "x");
        assert_eq!(parse("0 + x").simplify_basic().to_string(), "x");
        assert_eq!(parse("1*sin(x)").simplify_basic().to_string(), "sin(x)");
        assert_eq!(parse("x*0 + 2").simplify_basic().to_string(), "2");
        assert_eq!(parse("x^1").simplify_basic().to_string(), "x");
        assert_eq!(parse("x^0").simplify_basic().to_string(), "1");
        assert_eq!(parse("x/1").simplify_basic().to_string(), "x");
    }

    #[test]
    fn test_constant_folding() {
        assert_eq!(parse("2*3").simplify_basic(), Expr::Const(6.0));
        assert_eq!(parse("3*(2*x)").simplify_basic().to_string(), "6*x");
        assert_eq!(parse("x*4").simplify_basic().to_string(), "4*x");
        assert_eq!(parse("2^3").simplify_basic(), Expr::Const(8.0));
    }

    #[test]
    fn test_sign_folding() {
        assert_eq!(parse("x + -3*x^2").simplify_basic().to_string(), "x - 3*x^2");
        assert_eq!(parse("x - -sin(x)").simplify_basic().to_string(), "x + sin(x)");
        assert_eq!(parse("0 - x").simplify_basic().to_string(), "-x");
        assert_eq!(parse("-(-x)").simplify_basic().to_string(), "x");
    }

    #[test]
    fn test_like_terms_not_collected() {
        assert_eq!(parse("x + x").simplify_basic().to_string(), "x + x");
    }

    #[test]
    fn test_division_by_zero_kept() {
        assert_eq!(parse("1/0").simplify_basic().to_string(), "1/0");
    }
}
