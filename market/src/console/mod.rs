//! Line-oriented interactive shell.
//!
//! `Console` owns the input and output streams and provides the prompt
//! helpers every dialogue uses. Each helper prints its prompt on its own
//! line, reads one line, and re-prompts with a corrective message until the
//! input parses. A closed input stream is [`MarketError::EndOfInput`].

mod dialogues;
mod menu;
pub mod table;

pub use menu::{MenuOutcome, Shell};

use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::error::{MarketError, MarketResult};

/// Message shown to the user for a rejected input.
pub(crate) fn corrective_message(err: &MarketError) -> String {
    match err {
        MarketError::Validation(msg)
        | MarketError::InvalidState(msg)
        | MarketError::NotFound(msg) => msg.clone(),
        other => other.to_string(),
    }
}

/// Prompting front end over any reader/writer pair.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the output stream (scripted sessions inspect it).
    pub fn into_output(self) -> W {
        self.output
    }

    pub fn line(&mut self, text: impl std::fmt::Display) -> MarketResult<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    pub fn blank(&mut self) -> MarketResult<()> {
        writeln!(self.output)?;
        Ok(())
    }

    /// Print text without a newline and flush, for inline prompts such as `? `.
    pub fn inline(&mut self, text: &str) -> MarketResult<()> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        Ok(())
    }

    /// Print a boxed heading.
    pub fn banner(&mut self, title: &str) -> MarketResult<()> {
        let rule = format!("+{}+", "-".repeat(title.chars().count() + 2));
        self.line(&rule)?;
        self.line(format!("| {title} |"))?;
        self.line(&rule)
    }

    /// Read one line without its terminator.
    pub fn read_line(&mut self) -> MarketResult<String> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(MarketError::EndOfInput);
        }
        let trimmed_len = buf.trim_end_matches(['\r', '\n']).len();
        buf.truncate(trimmed_len);
        Ok(buf)
    }

    /// Prompt and read one line.
    pub fn ask(&mut self, prompt: &str) -> MarketResult<String> {
        self.line(prompt)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Prompt until `parse` accepts the input, printing its error message otherwise.
    pub fn read_with<T>(
        &mut self,
        prompt: &str,
        mut parse: impl FnMut(&str) -> MarketResult<T>,
    ) -> MarketResult<T> {
        loop {
            let raw = self.ask(prompt)?;
            match parse(&raw) {
                Ok(value) => return Ok(value),
                Err(e) => self.line(corrective_message(&e))?,
            }
        }
    }

    /// Prompt until the input parses as `T`, printing `hint` otherwise.
    pub fn read<T: FromStr>(&mut self, prompt: &str, hint: &str) -> MarketResult<T> {
        loop {
            let raw = self.ask(prompt)?;
            match raw.parse() {
                Ok(value) => return Ok(value),
                Err(_) => self.line(hint)?,
            }
        }
    }

    /// Prompt until a non-blank line is entered. Returns it trimmed.
    pub fn read_non_blank(&mut self, prompt: &str, error: &str) -> MarketResult<String> {
        loop {
            let raw = self.ask(prompt)?;
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed.to_string());
            }
            self.line(error)?;
        }
    }

    /// Prompt until one of `choices` is entered (trimmed, any case). Returns
    /// the matching choice as written in `choices`.
    pub fn read_choice<'c>(
        &mut self,
        prompt: &str,
        choices: &[&'c str],
        error: &str,
    ) -> MarketResult<&'c str> {
        loop {
            let raw = self.ask(prompt)?;
            let raw = raw.trim();
            if let Some(choice) = choices.iter().copied().find(|c| c.eq_ignore_ascii_case(raw)) {
                return Ok(choice);
            }
            self.line(error)?;
        }
    }

    pub fn read_yes_no(&mut self, prompt: &str) -> MarketResult<bool> {
        let answer = self.read_choice(prompt, &["yes", "no"], "Please enter \"yes\" or \"no\"")?;
        Ok(answer == "yes")
    }

    /// Prompt for a row number in `1..=count`. Returns the zero-based index.
    pub fn read_selection(&mut self, prompt: &str, count: usize) -> MarketResult<usize> {
        loop {
            let raw = self.ask(prompt)?;
            match raw.trim().parse::<usize>() {
                Ok(n) if (1..=count).contains(&n) => return Ok(n - 1),
                _ => {
                    self.line(format!("Please input a value between 1 to {count}"))?;
                    self.blank()?;
                }
            }
        }
    }
}
