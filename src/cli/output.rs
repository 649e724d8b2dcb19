//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Expression with a caret line under the byte offset the scanner stopped at.
pub fn caret_diagnostic(expression: &str, offset: usize) -> String {
    let column = expression
        .get(..offset)
        .map(|prefix| prefix.chars().count())
        .unwrap_or_else(|| expression.chars().count());
    format!("  {}\n  {}^", expression, " ".repeat(column))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_ascii_expression_when_diagnosing_then_caret_under_offset() {
        assert_eq!(caret_diagnostic("a ) b", 2), "  a ) b\n    ^");
    }

    #[test]
    fn given_multibyte_prefix_when_diagnosing_then_caret_counts_chars() {
        // 'é' is two bytes but one column
        assert_eq!(caret_diagnostic("é )", 3), "  é )\n    ^");
    }
}
