// the collection of utility functions mainly for bracket parsing and numeric checks

/// true if every bracket in `s` is closed in the right order
pub fn has_balanced_brackets(s: &str) -> bool {
    let mut stack = Vec::new();
    for c in s.chars() {
        match c {
            '(' | '[' => stack.push(c),
            ')' => {
                if stack.pop() != Some('(') {
                    return false;
                }
            }
            ']' => {
                if stack.pop() != Some('[') {
                    return false;
                }
            }
            _ => {}
        }
    }
    stack.is_empty()
}

/// Byte position of the bracket closing the one opened at `bracket_start`.
pub fn find_pair_to_this_bracket(input: &str, bracket_start: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in input.char_indices().skip_while(|(i, _)| *i < bracket_start) {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// `(…)` where the first bracket closes at the very last character
pub fn is_wrapped_in_brackets(input: &str) -> bool {
    input.starts_with('(')
        && input.ends_with(')')
        && find_pair_to_this_bracket(input, 0) == Some(input.len() - 1)
}

/// Longest expression text the parser accepts, in bytes.
pub const MAX_EXPRESSION_LEN: usize = 256;
/// Deepest bracket nesting the parser accepts.
pub const MAX_BRACKET_DEPTH: usize = 32;

/// Deepest nesting of round or square brackets in `s`.
pub fn bracket_depth(s: &str) -> usize {
    let mut depth = 0usize;
    let mut max_depth = 0usize;
    for c in s.chars() {
        match c {
            '(' | '[' => {
                depth += 1;
                max_depth = max_depth.max(depth);
            }
            ')' | ']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max_depth
}

/// Rejects text longer than [`MAX_EXPRESSION_LEN`] or nested deeper than
/// [`MAX_BRACKET_DEPTH`]. Together they bound the depth of every tree walk.
pub fn check_expression_size(s: &str) -> Result<(), String> {
    if s.len() > MAX_EXPRESSION_LEN {
        return Err(format!(
            "expression is {} characters long, the limit is {}",
            s.len(),
            MAX_EXPRESSION_LEN
        ));
    }
    let depth = bracket_depth(s);
    if depth > MAX_BRACKET_DEPTH {
        return Err(format!(
            "brackets nested {} levels deep, the limit is {}",
            depth, MAX_BRACKET_DEPTH
        ));
    }
    Ok(())
}

/// Every binary occurrence of one of `ops` outside brackets, left to right.
///
/// A sign is unary (and skipped) when nothing but another operator or an
/// opening bracket stands before it: the `-` in `2*-3` or `x^-1`. A `*` that
/// belongs to the `**` power alias is skipped as well.
pub fn find_operators_outside_brackets(input: &str, ops: &[char]) -> Vec<(usize, char)> {
    let chars: Vec<(usize, char)> = input.char_indices().collect();
    let mut depth = 0i32;
    let mut prev: Option<char> = None;
    let mut found = Vec::new();
    for (k, &(pos, c)) in chars.iter().enumerate() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ if depth == 0 && ops.contains(&c) => {
                let is_binary = prev.is_some_and(|p| !"+-*/^(".contains(p));
                let in_double_star = c == '*'
                    && (chars.get(k + 1).is_some_and(|(_, ch)| *ch == '*')
                        || (k > 0 && chars[k - 1].1 == '*'));
                if is_binary && !in_double_star {
                    found.push((pos, c));
                }
            }
            _ => {}
        }
        if !c.is_whitespace() {
            prev = Some(c);
        }
    }
    found
}

/// Leftmost power operator outside brackets: `^` or the `**` alias.
/// Returns the byte position and the operator length.
pub fn find_power_operator_outside_brackets(input: &str) -> Option<(usize, usize)> {
    let mut depth = 0i32;
    let mut iter = input.char_indices().peekable();
    while let Some((pos, c)) = iter.next() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            '^' if depth == 0 => return Some((pos, 1)),
            '*' if depth == 0 && iter.peek().is_some_and(|(_, next)| *next == '*') => {
                return Some((pos, 2));
            }
            _ => {}
        }
    }
    None
}

/// Splits a leading numeric literal off `input`: `"2x^2"` gives `("2", "x^2")`.
pub fn split_leading_number(input: &str) -> Option<(&str, &str)> {
    let end = input
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map(|(i, _)| i)
        .unwrap_or(input.len());
    if end == 0 || !input[..end].chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    Some((&input[..end], &input[end..]))
}

pub fn linspace(start: f64, end: f64, num_values: usize) -> Vec<f64> {
    if num_values < 2 {
        return vec![start; num_values];
    }
    let step = (end - start) / (num_values as f64 - 1.0);
    (0..num_values).map(|i| start + i as f64 * step).collect()
}

/// central finite difference of `f` at every point of `x_values`
pub fn numerical_derivative<F>(f: F, x_values: &[f64], h: f64) -> Vec<f64>
where
    F: Fn(f64) -> f64,
{
    x_values
        .iter()
        .map(|&x| (f(x + h) - f(x - h)) / (2.0 * h))
        .collect()
}

// compute norm of two vectors
pub fn norm(x: &[f64], y: &[f64]) -> f64 {
    if x.is_empty() {
        return 0.0;
    }
    let len = x.len().min(y.len());
    (1.0 / len as f64)
        * x.iter()
            .zip(y.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_has_balanced_brackets() {
        assert!(has_balanced_brackets("sin(x*(2+x))"));
        assert!(has_balanced_brackets("x + 1"));
        assert!(!has_balanced_brackets("sin(x"));
        assert!(!has_balanced_brackets("x)+("));
    }

    #[test]
    fn test_find_pair_to_this_bracket() {
        let input = "(x+(y*2))+1";
        assert_eq!(find_pair_to_this_bracket(input, 0), Some(8));
        assert_eq!(find_pair_to_this_bracket(input, 3), Some(7));
        assert_eq!(find_pair_to_this_bracket("(x", 0), None);
    }

    #[test]
    fn test_is_wrapped_in_brackets() {
        assert!(is_wrapped_in_brackets("(x+1)"));
        assert!(!is_wrapped_in_brackets("(x+1)*(x-1)"));
        assert!(!is_wrapped_in_brackets("x+1"));
    }

    #[test]
    fn test_operators_skip_unary_and_brackets() {
        let rightmost = |input: &str, ops: &[char]| find_operators_outside_brackets(input, ops).last().copied();
        assert_eq!(rightmost("x - (a + b) + c", &['+', '-']), Some((12, '+')));
        assert_eq!(rightmost("-x", &['+', '-']), None);
        assert_eq!(rightmost("x^-1", &['+', '-']), None);
        assert_eq!(rightmost("2*-3", &['*', '/']), Some((1, '*')));
        assert_eq!(rightmost("x**2", &['*', '/']), None);
    }

    #[test]
    fn test_operators_collected_in_one_scan() {
        assert_eq!(
            find_operators_outside_brackets("a - b + (c - d) - -e", &['+', '-']),
            vec![(2, '-'), (6, '+'), (16, '-')]
        );
        assert_eq!(
            find_operators_outside_brackets("2*x/y**2", &['*', '/']),
            vec![(1, '*'), (3, '/')]
        );
        assert!(find_operators_outside_brackets("-x", &['+', '-']).is_empty());
    }

    #[test]
    fn test_expression_size_limits() {
        assert_eq!(bracket_depth("sin((x))"), 3);
        assert_eq!(bracket_depth("x + 1"), 0);
        assert!(check_expression_size("3*x^2 + (x - 1)").is_ok());
        let long = vec!["x"; MAX_EXPRESSION_LEN].join("+");
        assert!(check_expression_size(&long).is_err());
        let nested = format!("{}x{}", "(".repeat(MAX_BRACKET_DEPTH + 1), ")".repeat(MAX_BRACKET_DEPTH + 1));
        assert!(check_expression_size(&nested).is_err());
        let allowed = format!("{}x{}", "(".repeat(MAX_BRACKET_DEPTH), ")".repeat(MAX_BRACKET_DEPTH));
        assert!(check_expression_size(&allowed).is_ok());
    }

    #[test]
    fn test_power_operator() {
        assert_eq!(find_power_operator_outside_brackets("x^2"), Some((1, 1)));
        assert_eq!(find_power_operator_outside_brackets("x**2"), Some((1, 2)));
        assert_eq!(find_power_operator_outside_brackets("2^3^2"), Some((1, 1)));
        assert_eq!(find_power_operator_outside_brackets("sin(x^2)"), None);
    }

    #[test]
    fn test_split_leading_number() {
        assert_eq!(split_leading_number("2x^2"), Some(("2", "x^2")));
        assert_eq!(split_leading_number("3.5sin(x)"), Some(("3.5", "sin(x)")));
        assert_eq!(split_leading_number("x2"), None);
        assert_eq!(split_leading_number("."), None);
    }

    #[test]
    fn test_numerical_derivative_and_norm() {
        let x = linspace(0.0, 1.0, 11);
        assert_eq!(x.len(), 11);
        assert_relative_eq!(x[10], 1.0, epsilon = 1e-12);
        let d = numerical_derivative(|t| t * t, &x, 1e-5);
        let exact: Vec<f64> = x.iter().map(|t| 2.0 * t).collect();
        assert!(norm(&d, &exact) < 1e-8);
    }
}
