//! Line-based prompts over any reader/writer pair.
//!
//! Every prompt treats an empty answer, the token `0`, or end of input as
//! a cancel and returns `None`. Answers that fail to parse are reported
//! and asked again.

use std::fmt::Display;
use std::io::{BufRead, Write};

use chrono::{NaiveDate, NaiveTime};

use crate::error::TrackerResult;
use crate::parsing::{parse_loose_date, parse_loose_time};

/// Reads answers from `input` and writes prompts and messages to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Creates a prompter over the given streams.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes one line of output.
    pub fn say(&mut self, line: impl Display) -> TrackerResult<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    /// Prints `label` and reads one trimmed line; `None` at end of input.
    pub fn ask(&mut self, label: &str) -> TrackerResult<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Like [`Prompter::ask`] but maps the cancel answers to `None`.
    pub fn ask_field(&mut self, label: &str) -> TrackerResult<Option<String>> {
        Ok(self.ask(label)?.filter(|answer| !is_cancel(answer)))
    }

    /// Asks for a `D.M.YYYY` date until one parses.
    pub fn ask_date(&mut self, label: &str) -> TrackerResult<Option<NaiveDate>> {
        let question = format!("{} (e.g., 1.1.2025, 0=Cancel): ", label);
        loop {
            let Some(answer) = self.ask_field(&question)? else {
                return Ok(None);
            };
            match parse_loose_date(&answer) {
                Ok(date) => return Ok(Some(date)),
                Err(_) => self.say("✗ Invalid date. Please use D.M.YYYY or DD.MM.YYYY.")?,
            }
        }
    }

    /// Asks for an `HH:MM` or `HHMM` time until one parses.
    pub fn ask_time(&mut self, label: &str) -> TrackerResult<Option<NaiveTime>> {
        let question = format!("{} (HH:MM or HHMM, 0=Cancel): ", label);
        loop {
            let Some(answer) = self.ask_field(&question)? else {
                return Ok(None);
            };
            match parse_loose_time(&answer) {
                Ok(time) => return Ok(Some(time)),
                Err(_) => self.say("✗ Invalid time. Allowed: HH:MM or HHMM.")?,
            }
        }
    }

    /// Asks for a number in `1..=max`; `0`, `q`, `quit` and empty cancel.
    pub fn ask_index(&mut self, max: usize) -> TrackerResult<Option<usize>> {
        self.say("[0] Cancel")?;
        loop {
            let Some(answer) = self.ask("Enter number: ")? else {
                return Ok(None);
            };
            let answer = answer.to_lowercase();
            if matches!(answer.as_str(), "" | "0" | "q" | "quit") {
                return Ok(None);
            }
            match answer.parse::<usize>() {
                Ok(index) if (1..=max).contains(&index) => return Ok(Some(index)),
                _ => self.say("Invalid choice. Please enter a valid number.")?,
            }
        }
    }

    /// Releases the underlying streams.
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

fn is_cancel(answer: &str) -> bool {
    answer.is_empty() || answer == "0"
}
