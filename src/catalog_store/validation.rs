//! Input validation for catalog fields.
//!
//! Pure predicates over candidate strings; they never touch storage.
//! Name and title input is canonicalized (uppercased) before validation,
//! email is checked as typed. The console prints the error's `Display`
//! text as the per-rule diagnostic and re-prompts.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

/// Literal substrings refused in free-text fields. Defense in depth only:
/// every query in the store is parameterized regardless.
pub const INJECTION_FRAGMENTS: &[&str] = &[";", "'", "--", "/*", "*/", "xp_"];

lazy_static! {
    // A leading run of characters that are neither word characters nor
    // whitespace, or a leading underscore. Only the start of the string is
    // checked; special characters later in the string are accepted.
    static ref LEADING_SPECIAL: Regex = Regex::new(r"^([^\s\w]|_)+").unwrap();
}

pub type ValidationResult = Result<(), ValidationError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("String cannot start with special characters.")]
    LeadingSpecialCharacters,

    #[error("Input string cannot be entirely numeric.")]
    PurelyNumeric,

    #[error("Input string cannot be whitespace.")]
    WhitespaceOnly,

    #[error("Input string must be at least {min} characters long.")]
    TooShort { min: usize },

    #[error("Invalid characters in {field}.")]
    InjectionFragment { field: &'static str },
}

/// The single canonicalization step applied when a name or title enters
/// the system. Lookups and writes in the store go through this too, so
/// case folding is never re-applied ad hoc at call sites.
pub fn canonical(s: &str) -> String {
    s.to_uppercase()
}

/// Artist name: must not start with a special character or underscore,
/// must not be purely numeric or all whitespace, minimum two characters.
/// Rules are checked in that order and the first failure is returned.
pub fn validate_artist_name(name: &str) -> ValidationResult {
    if LEADING_SPECIAL.is_match(name) {
        return Err(ValidationError::LeadingSpecialCharacters);
    }
    if is_purely_numeric(name) {
        return Err(ValidationError::PurelyNumeric);
    }
    if is_all_whitespace(name) {
        return Err(ValidationError::WhitespaceOnly);
    }
    if name.chars().count() < 2 {
        return Err(ValidationError::TooShort { min: 2 });
    }
    Ok(())
}

/// Email: no injection fragments anywhere, not purely numeric, not all
/// whitespace, minimum seven characters. Punctuation is otherwise allowed.
pub fn validate_email(email: &str) -> ValidationResult {
    if contains_injection_fragment(email) {
        return Err(ValidationError::InjectionFragment {
            field: "e-mail address",
        });
    }
    if is_purely_numeric(email) {
        return Err(ValidationError::PurelyNumeric);
    }
    if is_all_whitespace(email) {
        return Err(ValidationError::WhitespaceOnly);
    }
    if email.chars().count() < 7 {
        return Err(ValidationError::TooShort { min: 7 });
    }
    Ok(())
}

/// Artwork title: no injection fragments, not all whitespace. No length
/// floor and no leading-character restriction, titles may carry
/// punctuation anywhere.
pub fn validate_title(title: &str) -> ValidationResult {
    if contains_injection_fragment(title) {
        return Err(ValidationError::InjectionFragment {
            field: "artwork's title",
        });
    }
    if is_all_whitespace(title) {
        return Err(ValidationError::WhitespaceOnly);
    }
    Ok(())
}

fn contains_injection_fragment(s: &str) -> bool {
    INJECTION_FRAGMENTS.iter().any(|fragment| s.contains(fragment))
}

fn is_purely_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_numeric)
}

fn is_all_whitespace(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_whitespace)
}
