//! Display formatting of expressions and derivative steps.
//!
//! Works on strings only, so it also formats text that never went through the
//! parser. The output targets a TeX-style math renderer: math goes inside
//! `\( … \)` and labels are wrapped in `<strong>` tags.

use regex::Regex;
use std::sync::LazyLock;

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static pattern is a valid regex")
}

/// Ordered substitutions from ASCII notation to TeX.
static MATH_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (re(r"\*\*"), "^"),
        (re(r"\bsec\^(\d+(?:\.\d+)?)\("), r"\sec^{${1}}("),
        (re(r"\bsqrt\(([^()]*)\)"), r"\sqrt{${1}}"),
        (re(r"\b(sin|cos|tan|sec|ln|log|exp)\("), r"\${1}("),
        (re(r"\^\(([^()]*)\)"), "^{${1}}"),
        (re(r"\^(-?[0-9.]+|[A-Za-z])"), "^{${1}}"),
        (
            re(r"([A-Za-z0-9.]+(?:\^\{[^{}]*\})?)/([A-Za-z0-9.]+(?:\^\{[^{}]*\})?)"),
            r"\frac{${1}}{${2}}",
        ),
        (re(r"\s*\*\s*"), r" \cdot "),
        (re(r"\s*×\s*"), r" \times "),
        (re(r"\+\s*-\s*"), "- "),
        (re(r"\s+"), " "),
    ]
});

static DIFF_LINE: LazyLock<Regex> = LazyLock::new(|| re(r"^d/d([A-Za-z])\[(.+)\]\s*=\s*(.+)$"));
static DERIVATIVE_LINE: LazyLock<Regex> =
    LazyLock::new(|| re(r"^(f(?:'{1,3}|\^\(\d+\))?\([A-Za-z]\))\s*=\s*(.+)$"));
static ARROW_LINE: LazyLock<Regex> = LazyLock::new(|| re(r"^→\s*(.+)$"));
static LABEL_LINE: LazyLock<Regex> =
    LazyLock::new(|| re(r"^(Result|Original|Coefficient|Exponent|Term \d+):\s*(.+)$"));
static PAIR_LINE: LazyLock<Regex> = LazyLock::new(|| re(r"^(f'?)\s*=\s*(.+?),\s*(g'?)\s*=\s*(.+)$"));
static ORDER_SUPERSCRIPT: LazyLock<Regex> = LazyLock::new(|| re(r"\^\((\d+)\)"));

/// Converts ASCII math (`3*x^2 + sec^2(x)`) into TeX (`3 \cdot x^{2} + \sec^{2}(x)`).
///
/// # Examples
/// ```
/// use RustedDeriv::format_math_display;
/// assert_eq!(format_math_display("3*x^2 + 4*x + 1"), r"3 \cdot x^{2} + 4 \cdot x + 1");
/// assert_eq!(format_math_display("1/x"), r"\frac{1}{x}");
/// ```
pub fn format_math_display(expression: &str) -> String {
    let formatted = MATH_RULES
        .iter()
        .fold(expression.to_string(), |acc, (pattern, replacement)| {
            pattern.replace_all(&acc, *replacement).into_owned()
        });
    formatted.trim().to_string()
}

fn inline_math(expression: &str) -> String {
    format!(r"\( {} \)", format_math_display(expression))
}

/// Formats one line of a derivative trace for display.
///
/// Headers become bold, recognised math lines are typeset, everything else is
/// returned as it is.
pub fn format_step_for_display(step: &str) -> String {
    let line = step.trim();
    if line.is_empty() {
        return String::new();
    }
    if line.starts_with("**") || line.contains("STEP") {
        return format!("<strong>{}</strong>", line.replace("**", "").trim());
    }
    if let Some(caps) = LABEL_LINE.captures(line) {
        return format!("<strong>{}:</strong> {}", &caps[1], inline_math(&caps[2]));
    }
    if let Some(caps) = DERIVATIVE_LINE.captures(line) {
        let lhs = ORDER_SUPERSCRIPT.replace(&caps[1], "^{(${1})}");
        return format!(r"\( {} = {} \)", lhs, format_math_display(&caps[2]));
    }
    if let Some(caps) = DIFF_LINE.captures(line) {
        return format!(
            r"\( \frac{{d}}{{d{}}}\left[ {} \right] = {} \)",
            &caps[1],
            format_math_display(&caps[2]),
            format_math_display(&caps[3])
        );
    }
    if let Some(caps) = ARROW_LINE.captures(line) {
        return format!("→ {}", inline_math(&caps[1]));
    }
    if let Some(caps) = PAIR_LINE.captures(line) {
        return format!(
            r"\( {} = {} \), \( {} = {} \)",
            &caps[1],
            format_math_display(&caps[2]),
            &caps[3],
            format_math_display(&caps[4])
        );
    }
    line.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_math_display() {
        assert_eq!(format_math_display("x**3"), "x^{3}");
        assert_eq!(format_math_display("sec^2(x)"), r"\sec^{2}(x)");
        assert_eq!(format_math_display("-sin(x)"), r"-\sin(x)");
        assert_eq!(format_math_display("tan(x) + ln(x)"), r"\tan(x) + \ln(x)");
        assert_eq!(format_math_display("sqrt(x)"), r"\sqrt{x}");
        assert_eq!(format_math_display("x^-2"), "x^{-2}");
        assert_eq!(format_math_display("e^(2*x)"), r"e^{2 \cdot x}");
        assert_eq!(format_math_display("3/x^2"), r"\frac{3}{x^{2}}");
        assert_eq!(format_math_display("3 × 2 = 6"), r"3 \times 2 = 6");
        assert_eq!(format_math_display("x + -1"), "x - 1");
        assert_eq!(format_math_display("  x   +  1 "), "x + 1");
    }

    #[test]
    fn test_headers() {
        assert_eq!(
            format_step_for_display("**STEP 1: First derivative**"),
            "<strong>STEP 1: First derivative</strong>"
        );
    }

    #[test]
    fn test_derivative_lines() {
        assert_eq!(
            format_step_for_display("f'(x) = 3*x^2"),
            r"\( f'(x) = 3 \cdot x^{2} \)"
        );
        assert_eq!(
            format_step_for_display("f^(4)(x) = 0"),
            r"\( f^{(4)}(x) = 0 \)"
        );
        assert_eq!(
            format_step_for_display("d/dx[sin(x)] = cos(x)"),
            r"\( \frac{d}{dx}\left[ \sin(x) \right] = \cos(x) \)"
        );
    }

    #[test]
    fn test_labels_and_pairs() {
        assert_eq!(
            format_step_for_display("Result: 6*x"),
            r"<strong>Result:</strong> \( 6 \cdot x \)"
        );
        assert_eq!(
            format_step_for_display("Term 2: x^2"),
            r"<strong>Term 2:</strong> \( x^{2} \)"
        );
        assert_eq!(format_step_for_display("→ 6*x"), r"→ \( 6 \cdot x \)");
        assert_eq!(
            format_step_for_display("f = x, g = sin(x)"),
            r"\( f = x \), \( g = \sin(x) \)"
        );
        assert_eq!(
            format_step_for_display("f' = 1, g' = cos(x)"),
            r"\( f' = 1 \), \( g' = \cos(x) \)"
        );
    }

    #[test]
    fn test_prose_passes_through() {
        let line = "No rule matched for sin(cos(x^2)); left unchanged";
        assert_eq!(format_step_for_display(line), line);
        assert_eq!(format_step_for_display("   "), "");
    }
}
