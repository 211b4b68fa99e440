use anyhow::Context;
use std::fmt::Display;
use std::io::{BufRead, Write};

use crate::student;

/// Returned by every prompt once the input stream is exhausted.
#[derive(Debug, thiserror::Error)]
#[error("input stream closed")]
pub struct InputClosed;

pub fn is_input_closed(e: &anyhow::Error) -> bool {
    e.is::<InputClosed>()
}

/// Line-oriented terminal: prompts go to `output`, answers come from `input`.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, line: impl Display) -> anyhow::Result<()> {
        writeln!(self.output, "{line}").context("failed to write to terminal")?;
        Ok(())
    }

    /// Prints `prompt` and returns the trimmed answer, which may be empty.
    pub fn ask(&mut self, prompt: &str) -> anyhow::Result<String> {
        write!(self.output, "{prompt}").context("failed to write to terminal")?;
        self.output.flush().context("failed to flush terminal")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read from terminal")?;
        if read == 0 {
            return Err(InputClosed.into());
        }
        Ok(line.trim().to_string())
    }

    pub fn ask_non_empty(&mut self, prompt: &str) -> anyhow::Result<String> {
        loop {
            let answer = self.ask(prompt)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            self.say("Input must not be empty. Please try again.")?;
        }
    }

    pub fn ask_yes_no(&mut self, prompt: &str) -> anyhow::Result<bool> {
        let full = format!("{prompt} (y/n): ");
        loop {
            match self.ask(&full)?.to_ascii_lowercase().as_str() {
                "y" => return Ok(true),
                "n" => return Ok(false),
                _ => self.say("Please answer y or n.")?,
            }
        }
    }

    /// Re-prompts until the answer is a finite number within `0..=100`.
    pub fn ask_score(&mut self, prompt: &str) -> anyhow::Result<f64> {
        loop {
            let answer = self.ask(prompt)?;
            match student::parse_score(&answer) {
                Ok(score) => return Ok(score),
                Err(_) => self.say("Score must be a number between 0 and 100.")?,
            }
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
