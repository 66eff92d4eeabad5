//! Line-oriented prompting over any reader/writer pair

use std::io::{BufRead, Write};

use crate::error::{SplitError, SplitResult};

/// Reads answers from `input` and writes prompts to `output`
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write one line of text
    pub fn say(&mut self, text: &str) -> SplitResult<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Ask a question and return the trimmed answer
    ///
    /// Running out of input is an error so a wizard can never spin forever.
    pub fn ask(&mut self, prompt: &str) -> SplitResult<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SplitError::Io("Input ended before setup finished".into()));
        }
        Ok(line.trim().to_string())
    }

    /// Ask a question, falling back to `default` on an empty answer
    pub fn ask_or(&mut self, prompt: &str, default: &str) -> SplitResult<String> {
        let answer = self.ask(&format!("{} [{}]: ", prompt, default))?;
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer)
        }
    }

    /// Ask a yes/no question
    pub fn confirm(&mut self, prompt: &str, default: bool) -> SplitResult<bool> {
        let hint = if default { "yes" } else { "no" };
        let answer = self.ask_or(&format!("{} (yes/no)", prompt), hint)?;
        Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
    }

    pub fn output(&self) -> &W {
        &self.output
    }
}
