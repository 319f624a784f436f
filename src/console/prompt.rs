//! Line input and retry-until-valid prompt loops.
//!
//! Input acquisition is behind the `LineReader` trait so the workflows
//! can be driven by a scripted source in tests. Each prompt loop pairs a
//! pure validator with re-prompting; an empty line or Ctrl-C/Ctrl-D
//! cancels the loop and the enclosing flow.

use crate::catalog_store::validation::{
    canonical, validate_artist_name, validate_email, validate_title,
};
use crate::catalog_store::ArtworkStatus;
use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::collections::VecDeque;
use std::str::FromStr;

pub trait LineReader {
    /// Read one line. `None` means the user cancelled the prompt.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

pub struct RustylineReader {
    editor: DefaultEditor,
}

impl RustylineReader {
    pub fn new() -> Result<Self> {
        Ok(RustylineReader {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineReader for RustylineReader {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let _ = self.editor.add_history_entry(&line);
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Feeds a fixed sequence of lines in place of the interactive editor.
/// Returns `None` once the script runs out, which cancels whatever
/// prompt is active. Used by tests.
pub struct ScriptedReader {
    lines: VecDeque<String>,
}

impl ScriptedReader {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedReader {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl LineReader for ScriptedReader {
    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>> {
        Ok(self.lines.pop_front())
    }
}

/// Reads a raw line, mapping reader cancellation and empty input to `None`.
fn read_or_cancel(reader: &mut dyn LineReader, prompt: &str) -> Result<Option<String>> {
    match reader.read_line(prompt)? {
        Some(line) if line.is_empty() => Ok(None),
        Some(line) => Ok(Some(line)),
        None => Ok(None),
    }
}

/// Loop until the canonicalized name passes validation.
pub fn prompt_artist_name(reader: &mut dyn LineReader) -> Result<Option<String>> {
    loop {
        let line = match read_or_cancel(reader, "Enter the artist's name: ")? {
            Some(line) => line,
            None => return Ok(None),
        };
        let name = canonical(&line);
        match validate_artist_name(&name) {
            Ok(()) => return Ok(Some(name)),
            Err(err) => println!("{err}"),
        }
    }
}

/// Loop until the email passes validation. Email is kept as typed, no
/// canonicalization.
pub fn prompt_email(reader: &mut dyn LineReader) -> Result<Option<String>> {
    loop {
        let email = match read_or_cancel(reader, "Enter the artist's e-mail: ")? {
            Some(line) => line,
            None => return Ok(None),
        };
        match validate_email(&email) {
            Ok(()) => return Ok(Some(email)),
            Err(err) => println!("{err}"),
        }
    }
}

/// Loop until the canonicalized title passes validation. Catalog-wide
/// uniqueness is a separate concern handled by the add-artwork flow.
pub fn prompt_title(reader: &mut dyn LineReader) -> Result<Option<String>> {
    loop {
        let line = match read_or_cancel(reader, "Enter the title of the artwork: ")? {
            Some(line) => line,
            None => return Ok(None),
        };
        let title = canonical(&line);
        match validate_title(&title) {
            Ok(()) => return Ok(Some(title)),
            Err(err) => println!("{err}"),
        }
    }
}

/// Loop until the input parses as a non-negative whole number of
/// currency units.
pub fn prompt_price(reader: &mut dyn LineReader) -> Result<Option<i64>> {
    loop {
        let line = match read_or_cancel(reader, "Enter the whole dollar price of the artwork: $")? {
            Some(line) => line,
            None => return Ok(None),
        };
        match line.trim().parse::<i64>() {
            Ok(price) if price >= 0 => return Ok(Some(price)),
            Ok(_) => println!("The price cannot be negative."),
            Err(_) => println!("Please enter a whole number."),
        }
    }
}

/// Loop until the input canonicalizes to one of the two statuses.
pub fn prompt_status(reader: &mut dyn LineReader) -> Result<Option<ArtworkStatus>> {
    loop {
        let line = match read_or_cancel(reader, "Is the artwork AVAILABLE or SOLD?: ")? {
            Some(line) => line,
            None => return Ok(None),
        };
        match ArtworkStatus::from_str(&canonical(&line)) {
            Ok(status) => return Ok(Some(status)),
            Err(_) => println!("Incorrect entry. Please enter 'AVAILABLE' or 'SOLD'."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteChoice {
    Delete,
    Cancel,
}

/// Loop until the user types DELETE or CANCEL (any casing).
pub fn prompt_delete_choice(
    reader: &mut dyn LineReader,
    title: &str,
) -> Result<Option<DeleteChoice>> {
    let prompt = format!(
        "Type DELETE to delete this artwork ({title}), or CANCEL to keep it: "
    );
    loop {
        let line = match read_or_cancel(reader, &prompt)? {
            Some(line) => line,
            None => return Ok(None),
        };
        match canonical(&line).as_str() {
            "DELETE" => return Ok(Some(DeleteChoice::Delete)),
            "CANCEL" => return Ok(Some(DeleteChoice::Cancel)),
            _ => println!("Incorrect entry. Please enter 'DELETE' or 'CANCEL'."),
        }
    }
}

/// Loop until the user answers Y or N (any casing). `true` means yes.
pub fn prompt_confirm_change(reader: &mut dyn LineReader) -> Result<Option<bool>> {
    loop {
        let line = match read_or_cancel(reader, "Would you like to change the status? (Y/N): ")? {
            Some(line) => line,
            None => return Ok(None),
        };
        match canonical(&line).as_str() {
            "Y" => return Ok(Some(true)),
            "N" => return Ok(Some(false)),
            _ => println!("Invalid entry. Please enter 'Y' or 'N'."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_prompt_retries_until_valid_and_canonicalizes() {
        let mut reader = ScriptedReader::new(["@bad", "42", "Jane Doe"]);
        let name = prompt_artist_name(&mut reader).unwrap();
        assert_eq!(name.as_deref(), Some("JANE DOE"));
    }

    #[test]
    fn name_prompt_cancels_on_empty_line() {
        let mut reader = ScriptedReader::new([""]);
        assert_eq!(prompt_artist_name(&mut reader).unwrap(), None);
    }

    #[test]
    fn name_prompt_cancels_when_input_runs_out() {
        let mut reader = ScriptedReader::new(Vec::<String>::new());
        assert_eq!(prompt_artist_name(&mut reader).unwrap(), None);
    }

    #[test]
    fn email_prompt_keeps_input_as_typed() {
        let mut reader = ScriptedReader::new(["short", "Jane@Math.org"]);
        let email = prompt_email(&mut reader).unwrap();
        assert_eq!(email.as_deref(), Some("Jane@Math.org"));
    }

    #[test]
    fn price_prompt_rejects_garbage_and_negatives() {
        let mut reader = ScriptedReader::new(["abc", "-5", "12.50", "500"]);
        let price = prompt_price(&mut reader).unwrap();
        assert_eq!(price, Some(500));
    }

    #[test]
    fn status_prompt_accepts_any_casing() {
        let mut reader = ScriptedReader::new(["maybe", "sold"]);
        let status = prompt_status(&mut reader).unwrap();
        assert_eq!(status, Some(ArtworkStatus::Sold));
    }

    #[test]
    fn delete_choice_requires_one_of_the_two_words() {
        let mut reader = ScriptedReader::new(["yes", "delete"]);
        let choice = prompt_delete_choice(&mut reader, "ENGINE SKETCH").unwrap();
        assert_eq!(choice, Some(DeleteChoice::Delete));

        let mut reader = ScriptedReader::new(["cancel"]);
        let choice = prompt_delete_choice(&mut reader, "ENGINE SKETCH").unwrap();
        assert_eq!(choice, Some(DeleteChoice::Cancel));
    }

    #[test]
    fn confirm_change_maps_y_and_n() {
        let mut reader = ScriptedReader::new(["what", "y"]);
        assert_eq!(prompt_confirm_change(&mut reader).unwrap(), Some(true));

        let mut reader = ScriptedReader::new(["N"]);
        assert_eq!(prompt_confirm_change(&mut reader).unwrap(), Some(false));
    }
}
