//! Line-oriented terminal I/O
//!
//! Wraps any `BufRead` + `Write` pair so the prompt loops can be driven by
//! stdin/stdout in the binary and by in-memory buffers in tests.

use std::io::{BufRead, IsTerminal, Write};

use crate::error::{AmountKind, Error, Result};

/// ANSI sequence: clear screen, cursor to top-left
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `prompt` without a newline and read one trimmed line.
    ///
    /// Returns `Error::InputClosed` on end of input.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::InputClosed);
        }

        Ok(line.trim().to_string())
    }

    /// Print one line.
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Keep asking until the answer parses as a positive amount.
    ///
    /// Each rejection prints the validation message and asks again.
    pub fn ask_amount(&mut self, prompt: &str, kind: AmountKind) -> Result<f64> {
        loop {
            let answer = self.ask(prompt)?;
            match crate::error::parse_amount(&answer, kind) {
                Ok(amount) => return Ok(amount),
                Err(e) => {
                    tracing::debug!(input = %answer, "Rejected amount");
                    self.say(&e.to_string())?;
                }
            }
        }
    }

    pub fn flush(&mut self) -> Result<()> {
        self.output.flush()?;
        Ok(())
    }

    /// Consume the terminal, returning the output sink.
    pub fn into_output(self) -> W {
        self.output
    }
}

/// Clear the screen if stdout is an interactive terminal.
pub fn clear_screen() -> Result<()> {
    let mut stdout = std::io::stdout();
    if stdout.is_terminal() {
        write!(stdout, "{}", CLEAR_SCREEN)?;
        stdout.flush()?;
    }
    Ok(())
}
