//! Grammar configuration: delimiter pairs, operator token spellings, and the
//! end-of-input policy for open delimiters.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::error::{DomainError, DomainResult};

/// Characters that never participate in operand text runs, even when a
/// caller-supplied grammar does not use them as delimiters.
pub const RESERVED_CHARS: [char; 3] = ['(', ')', '"'];

/// The relationship from a node to the next node in its sibling chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conjunction {
    And,
    Or,
    Not,
}

impl Conjunction {
    /// Fixed display name used by the serializer, independent of the token
    /// spelling that produced the conjunction.
    pub fn canonical(&self) -> &'static str {
        match self {
            Conjunction::And => "AND",
            Conjunction::Or => "OR",
            Conjunction::Not => "NOT",
        }
    }
}

impl fmt::Display for Conjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical())
    }
}

/// What to do with delimiters still open when the input ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingDelimiters {
    /// Treat open delimiters as implicitly closed.
    #[default]
    AutoClose,
    /// Fail with [`DomainError::UnterminatedDelimiter`].
    Error,
}

/// Caller-supplied scanning configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    /// Opening delimiter mapped to its required closing character.
    pub delimiters: BTreeMap<char, char>,
    pub and_token: String,
    pub or_token: String,
    pub not_token: String,
    pub trailing: TrailingDelimiters,
}

impl Default for Grammar {
    fn default() -> Self {
        Self {
            delimiters: [('(', ')'), ('"', '"')].into_iter().collect(),
            and_token: "&".to_string(),
            or_token: "|".to_string(),
            not_token: "-".to_string(),
            trailing: TrailingDelimiters::default(),
        }
    }
}

impl Grammar {
    /// Replace the operator token spellings.
    pub fn with_operators(mut self, and: &str, or: &str, not: &str) -> Self {
        self.and_token = and.to_string();
        self.or_token = or.to_string();
        self.not_token = not.to_string();
        self
    }

    /// Replace the delimiter pairs.
    pub fn with_delimiters(mut self, pairs: impl IntoIterator<Item = (char, char)>) -> Self {
        self.delimiters = pairs.into_iter().collect();
        self
    }

    /// Fail on delimiters left open at end of input.
    pub fn strict(mut self) -> Self {
        self.trailing = TrailingDelimiters::Error;
        self
    }

    /// Closing character required for `open`, if `open` is a configured
    /// opening delimiter.
    pub fn closing(&self, open: char) -> Option<char> {
        self.delimiters.get(&open).copied()
    }

    pub fn is_opening(&self, ch: char) -> bool {
        self.delimiters.contains_key(&ch)
    }

    /// Delimiter-like characters never join operand text runs: the configured
    /// opening and closing characters plus [`RESERVED_CHARS`].
    pub fn is_delimiter_like(&self, ch: char) -> bool {
        RESERVED_CHARS.contains(&ch)
            || self.delimiters.contains_key(&ch)
            || self.delimiters.values().any(|&close| close == ch)
    }

    pub fn is_text_char(&self, ch: char) -> bool {
        !ch.is_whitespace() && !self.is_delimiter_like(ch)
    }

    /// Operator tokens in priority order: NOT, then AND, then OR.
    pub fn operator_table(&self) -> [(&str, Conjunction); 3] {
        [
            (self.not_token.as_str(), Conjunction::Not),
            (self.and_token.as_str(), Conjunction::And),
            (self.or_token.as_str(), Conjunction::Or),
        ]
    }

    /// Check the grammar before scanning: operator tokens must be non-empty
    /// and free of whitespace, and at least one delimiter pair must exist.
    pub fn validate(&self) -> DomainResult<()> {
        let roles = [
            ("AND", &self.and_token),
            ("OR", &self.or_token),
            ("NOT", &self.not_token),
        ];
        for (role, token) in roles {
            if token.is_empty() {
                return Err(DomainError::InvalidGrammar(format!(
                    "{role} operator token is empty"
                )));
            }
            if token.chars().any(char::is_whitespace) {
                return Err(DomainError::InvalidGrammar(format!(
                    "{role} operator token '{token}' contains whitespace"
                )));
            }
        }
        if self.delimiters.is_empty() {
            return Err(DomainError::InvalidGrammar(
                "delimiter set is empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_grammar_when_inspected_then_expected_defaults() {
        let grammar = Grammar::default();

        assert_eq!(grammar.closing('('), Some(')'));
        assert_eq!(grammar.closing('"'), Some('"'));
        assert_eq!(grammar.and_token, "&");
        assert_eq!(grammar.or_token, "|");
        assert_eq!(grammar.not_token, "-");
        assert_eq!(grammar.trailing, TrailingDelimiters::AutoClose);
    }

    #[test]
    fn given_operator_table_when_listed_then_not_and_or_order() {
        let grammar = Grammar::default();

        let kinds: Vec<Conjunction> = grammar
            .operator_table()
            .iter()
            .map(|&(_, kind)| kind)
            .collect();

        assert_eq!(kinds, [Conjunction::Not, Conjunction::And, Conjunction::Or]);
    }

    #[test]
    fn given_custom_delimiters_when_checking_chars_then_reserved_stay_excluded() {
        let grammar = Grammar::default().with_delimiters([('<', '>')]);

        assert!(grammar.is_delimiter_like('<'));
        assert!(grammar.is_delimiter_like('>'));
        // Reserved even though no longer configured
        assert!(grammar.is_delimiter_like('('));
        assert!(grammar.is_delimiter_like('"'));
        assert!(grammar.is_text_char('&'));
        assert!(!grammar.is_text_char(' '));
    }

    #[test]
    fn given_empty_operator_token_when_validating_then_error() {
        let grammar = Grammar::default().with_operators("", "|", "-");

        let err = grammar.validate().unwrap_err();

        assert!(matches!(err, DomainError::InvalidGrammar(_)));
    }

    #[test]
    fn given_whitespace_in_token_when_validating_then_error() {
        let grammar = Grammar::default().with_operators("a b", "|", "-");

        assert!(grammar.validate().is_err());
    }

    #[test]
    fn given_empty_delimiter_set_when_validating_then_error() {
        let grammar = Grammar {
            delimiters: BTreeMap::new(),
            ..Grammar::default()
        };

        assert!(grammar.validate().is_err());
    }

    #[test]
    fn given_conjunction_when_displayed_then_canonical_name() {
        assert_eq!(Conjunction::And.to_string(), "AND");
        assert_eq!(Conjunction::Or.to_string(), "OR");
        assert_eq!(Conjunction::Not.to_string(), "NOT");
    }
}
