use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::utils::{
    check_expression_size, find_operators_outside_brackets, find_pair_to_this_bracket,
    find_power_operator_outside_brackets, has_balanced_brackets, is_wrapped_in_brackets,
    split_leading_number,
};
/// a module turns a String expression into a symbolic expression
///# Example
/// ```
/// use RustedDeriv::symbolic::symbolic_engine::Expr;
/// let parsed = Expr::parse_expression("3*x^2 + 2*x - sin(x)").unwrap();
/// assert_eq!(parsed.to_string(), "3*x^2 + 2*x - sin(x)");
/// ```
//                  search recursion diagram
//                "3*x^2 + 2*x - sin(x)"            |
//                |_________________________________|
//                |   every binary + or -           |
//                |_________________________________|
//                | 3*x^2 + 2*x   |    sin(x)       |
//                |      |        |      |          |
//                |_____\|/_______|_____\|/_________|
//                |   split by +  |  function call  |
//                |_______________|_________________|
//                | 3*x^2 | 2*x   |      x          |
//                |__\|/__|_\|/___|_______Ok________|
//                |  split by *, then ^, then leaf  |
//                |_________________________________|
//
// Sums and products are split at all their top level operators in one scan
// and folded left to right, so a long sum does not nest the recursion.
// Precedence from loosest to tightest: binary + -, binary * /, unary sign,
// numeric coefficient glued to a factor (`3x`), ^ (right associative),
// function call, leaf.
const FUNCTION_NAMES: [&str; 9] = ["sin", "cos", "tan", "tg", "sec", "ln", "log", "sqrt", "exp"];

fn make_function(name: &str, arg: Expr) -> Option<Expr> {
    let arg = Box::new(arg);
    let func = match name {
        "sin" => Expr::sin(arg),
        "cos" => Expr::cos(arg),
        "tan" | "tg" => Expr::tg(arg),
        "sec" => Expr::sec(arg),
        "ln" => Expr::Ln(arg),
        "log" => Expr::Log10(arg),
        "sqrt" => Expr::Sqrt(arg),
        "exp" => Expr::Exp(arg),
        _ => return None,
    };
    Some(func)
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_number(s: &str) -> Result<f64, String> {
    // f64::from_str also accepts "inf" and "NaN", which are not literals here
    if !s.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return Err(format!("not a number: {}", s));
    }
    s.parse::<f64>().map_err(|e| format!("bad number {}: {}", s, e))
}

/// `name(arg)` where the bracket opened after `name` closes at the end.
/// Unknown function names keep their text as `Expr::Unknown`.
fn parse_function_call(input: &str) -> Option<Result<Expr, String>> {
    let open = input.find('(')?;
    let name = input[..open].trim();
    if !is_identifier(name) || find_pair_to_this_bracket(input, open) != Some(input.len() - 1) {
        return None;
    }
    let inner = &input[open + 1..input.len() - 1];
    if !FUNCTION_NAMES.contains(&name) {
        return Some(Ok(Expr::Unknown(input.to_string())));
    }
    Some(parse_node(inner).and_then(|arg| {
        make_function(name, arg).ok_or_else(|| format!("unknown function {}", name))
    }))
}

/// `sec^2(x)` style: a function name raised to a numeric power before its
/// argument list.
fn parse_function_power(base: &str, exponent: &str) -> Option<Result<Expr, String>> {
    if !FUNCTION_NAMES.contains(&base) {
        return None;
    }
    let (number, rest) = split_leading_number(exponent)?;
    let rest = rest.trim();
    if !is_wrapped_in_brackets(rest) {
        return None;
    }
    Some((|| {
        let power = parse_number(number)?;
        let arg = parse_node(&rest[1..rest.len() - 1])?;
        let func = make_function(base, arg).ok_or_else(|| format!("unknown function {}", base))?;
        Ok(func.pow(Expr::Const(power)))
    })())
}

/// Parses the restricted algebraic notation. Text longer than
/// `MAX_EXPRESSION_LEN` or nested deeper than `MAX_BRACKET_DEPTH` is rejected
/// before any recursion starts.
pub fn parse_expression_func(input: &str) -> Result<Expr, String> {
    let input = input.trim();
    check_expression_size(input)?;
    parse_node(input)
}

/// `first op term op term ...` folded left to right
fn fold_operators(
    input: &str,
    ops: &[(usize, char)],
    combine: fn(char, Expr, Expr) -> Expr,
) -> Result<Expr, String> {
    let mut acc = parse_node(&input[..ops[0].0])?;
    for (k, &(pos, op)) in ops.iter().enumerate() {
        let end = ops.get(k + 1).map_or(input.len(), |next| next.0);
        let rhs = parse_node(&input[pos + 1..end])?;
        acc = combine(op, acc, rhs);
    }
    Ok(acc)
}

fn parse_node(input: &str) -> Result<Expr, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("empty expression".to_string());
    }
    if !has_balanced_brackets(input) {
        return Err(format!("unbalanced brackets in {}", input));
    }
    if is_wrapped_in_brackets(input) {
        return parse_node(&input[1..input.len() - 1]);
    }
    // binary + and -
    let ops = find_operators_outside_brackets(input, &['+', '-']);
    if !ops.is_empty() {
        return fold_operators(input, &ops, |op, lhs, rhs| match op {
            '+' => Expr::Add(lhs.boxed(), rhs.boxed()),
            _ => Expr::Sub(lhs.boxed(), rhs.boxed()),
        });
    }
    // binary * and /
    let ops = find_operators_outside_brackets(input, &['*', '/']);
    if !ops.is_empty() {
        return fold_operators(input, &ops, |op, lhs, rhs| match op {
            '*' => Expr::Mul(lhs.boxed(), rhs.boxed()),
            _ => Expr::Div(lhs.boxed(), rhs.boxed()),
        });
    }
    // unary sign
    if let Some(rest) = input.strip_prefix('-') {
        return Ok(parse_node(rest)?.negate());
    }
    if let Some(rest) = input.strip_prefix('+') {
        return parse_node(rest);
    }
    // numeric coefficient glued to a factor: 3x, 2x^2, 4sin(x), 2(x+1)
    if let Some((number, rest)) = split_leading_number(input) {
        if rest.starts_with(|c: char| c.is_ascii_alphabetic() || c == '(') {
            let coeff = parse_number(number)?;
            let factor = parse_node(rest)?;
            return Ok(Expr::Mul(Expr::Const(coeff).boxed(), factor.boxed()));
        }
    }
    // power, right associative
    if let Some((pos, len)) = find_power_operator_outside_brackets(input) {
        let base = input[..pos].trim();
        let exponent = input[pos + len..].trim();
        if let Some(parsed) = parse_function_power(base, exponent) {
            return parsed;
        }
        let base = parse_node(base)?;
        let exponent = parse_node(exponent)?;
        return Ok(base.pow(exponent));
    }
    if let Some(parsed) = parse_function_call(input) {
        return parsed;
    }
    if input.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return parse_number(input).map(Expr::Const);
    }
    if is_identifier(input) {
        return Ok(Expr::Var(input.to_string()));
    }
    Err(format!("cannot parse {}", input))
}

impl Expr {
    /// Parses the restricted algebraic notation into an expression tree.
    pub fn parse_expression(input: &str) -> Result<Expr, String> {
        parse_expression_func(input)
    }

    /// Like [`Expr::parse_expression`], but text that does not parse becomes
    /// `Expr::Unknown` holding the trimmed input.
    pub fn parse_permissive(input: &str) -> Expr {
        parse_expression_func(input).unwrap_or_else(|_| Expr::Unknown(input.trim().to_string()))
    }
}
