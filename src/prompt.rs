//! Interactive input handling.
//! The [`Prompter`] trait is the seam between answer resolution and the terminal,
//! so tests can script answers instead of reading a TTY.

use dialoguer::{FuzzySelect, Input, Select};
use regex::Regex;
use std::io;
use std::sync::OnceLock;

/// Option lists longer than this get a fuzzy finder instead of a plain list.
const FUZZY_SELECT_THRESHOLD: usize = 10;

/// Accepted spellings of a boolean answer.
const BOOL_PATTERN: &str = r"(?i)^(true|false|yes|no|y|n)$";
const TRUTHY_PATTERN: &str = r"(?i)^(true|yes|y)$";

fn bool_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(BOOL_PATTERN).expect("valid boolean pattern"))
}

fn truthy_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TRUTHY_PATTERN).expect("valid truthy pattern"))
}

/// Returns `true` if `input` is one of the accepted boolean spellings.
pub fn is_valid_bool(input: &str) -> bool {
    bool_regex().is_match(input.trim())
}

/// Normalises an accepted boolean answer to `TRUE` or `FALSE`.
pub fn normalize_bool(input: &str) -> &'static str {
    if truthy_regex().is_match(input.trim()) {
        "TRUE"
    } else {
        "FALSE"
    }
}

/// Returns `true` if `input` parses as a floating point number.
pub fn is_valid_number(input: &str) -> bool {
    input.trim().parse::<f64>().is_ok()
}

/// Source of interactive answers.
///
/// Validation failures are handled by the implementation (re-prompting);
/// an `Err` means the input channel itself is broken.
pub trait Prompter {
    /// Free-form text seeded with `default`.
    fn text(&self, label: &str, default: &str) -> io::Result<String>;

    /// Text that must parse as a floating point number.
    fn number(&self, label: &str, default: &str) -> io::Result<String>;

    /// Free-form yes/no answer; returns the raw accepted input.
    fn yes_no(&self, label: &str, default: &str) -> io::Result<String>;

    /// Single choice among `items`; returns the chosen index.
    fn select(&self, label: &str, items: &[String], default: usize) -> io::Result<usize>;
}

/// Terminal prompter backed by dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

fn into_io(err: dialoguer::Error) -> io::Error {
    io::Error::other(err.to_string())
}

impl Prompter for DialoguerPrompter {
    fn text(&self, label: &str, default: &str) -> io::Result<String> {
        Input::<String>::new()
            .with_prompt(label)
            .default(default.to_string())
            .allow_empty(true)
            .interact_text()
            .map_err(into_io)
    }

    fn number(&self, label: &str, default: &str) -> io::Result<String> {
        Input::<String>::new()
            .with_prompt(label)
            .default(default.to_string())
            .validate_with(|input: &String| -> Result<(), &str> {
                if is_valid_number(input) {
                    Ok(())
                } else {
                    Err("invalid number")
                }
            })
            .interact_text()
            .map_err(into_io)
    }

    fn yes_no(&self, label: &str, default: &str) -> io::Result<String> {
        Input::<String>::new()
            .with_prompt(label)
            .default(default.to_string())
            .validate_with(|input: &String| -> Result<(), &str> {
                if is_valid_bool(input) {
                    Ok(())
                } else {
                    Err("invalid value for bool")
                }
            })
            .interact_text()
            .map_err(into_io)
    }

    fn select(&self, label: &str, items: &[String], default: usize) -> io::Result<usize> {
        if items.len() > FUZZY_SELECT_THRESHOLD {
            FuzzySelect::new()
                .with_prompt(label)
                .default(default)
                .items(items)
                .interact()
                .map_err(into_io)
        } else {
            Select::new()
                .with_prompt(label)
                .default(default)
                .items(items)
                .interact()
                .map_err(into_io)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_validation() {
        for input in ["true", "FALSE", "Yes", "no", "y", "N", " y "] {
            assert!(is_valid_bool(input), "{input} should be accepted");
        }
        for input in ["", "maybe", "yess", "1", "t"] {
            assert!(!is_valid_bool(input), "{input} should be rejected");
        }
    }

    #[test]
    fn test_normalize_bool() {
        assert_eq!(normalize_bool("Y"), "TRUE");
        assert_eq!(normalize_bool("yes"), "TRUE");
        assert_eq!(normalize_bool("True"), "TRUE");
        assert_eq!(normalize_bool("n"), "FALSE");
        assert_eq!(normalize_bool("false"), "FALSE");
    }

    #[test]
    fn test_number_validation() {
        assert!(is_valid_number("42"));
        assert!(is_valid_number("-3.5"));
        assert!(is_valid_number("1e3"));
        assert!(!is_valid_number("forty"));
        assert!(!is_valid_number(""));
    }
}
