//! Line-oriented prompting with validation loops.
//!
//! Every `ask_*` helper re-prompts until it gets a valid answer. End of input is
//! reported as [`Error::InputClosed`] so the menus can unwind and end the session.

use crate::errors::{Error, Result};
use colored::Colorize;
use std::fmt::Display;
use std::io::{BufRead, Write};

/// Reads answers from `R` and writes prompts and messages to `W`.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    /// Wraps an input and an output stream.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// The output stream, for table rendering.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Gives back the underlying streams.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Writes one line of plain text.
    pub fn line(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Writes a section title.
    pub fn title(&mut self, text: &str) -> Result<()> {
        let banner = format!("=== {} ===", text.to_uppercase());
        writeln!(self.output, "\n{}", banner.cyan().bold())?;
        Ok(())
    }

    /// Writes an error message.
    pub fn error(&mut self, text: impl Display) -> Result<()> {
        let message = format!("❌ Error: {text}");
        writeln!(self.output, "{}", message.red())?;
        Ok(())
    }

    /// Writes a success message.
    pub fn success(&mut self, text: impl Display) -> Result<()> {
        let message = format!("✅ {text}");
        writeln!(self.output, "{}", message.green())?;
        Ok(())
    }

    /// Shows `label` and returns the trimmed answer.
    pub fn read_line(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}", format!("{label}: ").magenta())?;
        self.output.flush()?;

        let mut buffer = String::new();
        if self.input.read_line(&mut buffer)? == 0 {
            return Err(Error::InputClosed);
        }
        Ok(buffer.trim().to_string())
    }

    /// Asks until a non-empty answer is given.
    pub fn ask_string(&mut self, label: &str) -> Result<String> {
        loop {
            let answer = self.read_line(label)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            self.error("The field cannot be empty.")?;
        }
    }

    /// Asks once; a blank answer is `None`.
    pub fn ask_optional(&mut self, label: &str) -> Result<Option<String>> {
        let answer = self.read_line(label)?;
        Ok((!answer.is_empty()).then_some(answer))
    }

    /// Asks until a non-negative whole number is given.
    pub fn ask_int(&mut self, label: &str) -> Result<i64> {
        loop {
            if let Some(value) = self.ask_int_or_keep(label)? {
                return Ok(value);
            }
            self.error("A whole number is required.")?;
        }
    }

    /// Asks for a non-negative whole number; a blank answer is `None`.
    pub fn ask_int_or_keep(&mut self, label: &str) -> Result<Option<i64>> {
        loop {
            let answer = self.read_line(label)?;
            if answer.is_empty() {
                return Ok(None);
            }
            match answer.parse::<i64>() {
                Ok(value) if value >= 0 => return Ok(Some(value)),
                Ok(_) => self.error("The number must be zero or positive.")?,
                Err(_) => self.error("Enter a whole number.")?,
            }
        }
    }

    /// Asks until a non-negative finite number is given.
    pub fn ask_float(&mut self, label: &str) -> Result<f64> {
        loop {
            if let Some(value) = self.ask_float_or_keep(label)? {
                return Ok(value);
            }
            self.error("A number is required.")?;
        }
    }

    /// Asks for a non-negative finite number; a blank answer is `None`.
    pub fn ask_float_or_keep(&mut self, label: &str) -> Result<Option<f64>> {
        loop {
            let answer = self.read_line(label)?;
            if answer.is_empty() {
                return Ok(None);
            }
            match answer.parse::<f64>() {
                Ok(value) if value.is_finite() && value >= 0.0 => return Ok(Some(value)),
                Ok(_) => self.error("The number must be zero or positive.")?,
                Err(_) => self.error("Enter a valid number (e.g. 10.50).")?,
            }
        }
    }

    /// Asks a yes/no question; anything but `y`/`yes` is a no.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.read_line(&format!("{question} (y/n)"))?;
        Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
    }
}
