//! Line-oriented prompting over any reader/writer pair.

use std::io::{self, BufRead, ErrorKind, Write};

/// Reads answers from `input` and writes prompts and messages to `output`.
///
/// End of input surfaces as an [`ErrorKind::UnexpectedEof`] error so callers
/// can unwind an interactive flow with `?`.
pub struct Prompt<R, W> {
  input:  R,
  output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
  pub fn new(input: R, output: W) -> Self { Self { input, output } }

  pub fn out(&mut self) -> &mut W { &mut self.output }

  #[cfg(test)]
  pub fn output(&self) -> &W { &self.output }

  /// Print `prompt` and read one trimmed line.
  pub fn line(&mut self, prompt: &str) -> io::Result<String> {
    write!(self.output, "{prompt}")?;
    self.output.flush()?;

    let mut buf = String::new();
    if self.input.read_line(&mut buf)? == 0 {
      return Err(io::Error::new(ErrorKind::UnexpectedEof, "end of input"));
    }
    Ok(buf.trim().to_owned())
  }

  /// Read an integer, re-prompting until one is entered.
  pub fn int(&mut self, prompt: &str) -> io::Result<i64> {
    loop {
      match self.line(prompt)?.parse() {
        Ok(n) => return Ok(n),
        Err(_) => writeln!(self.output, "Invalid input. Please enter a valid number.")?,
      }
    }
  }

  /// Read a 1-based menu choice in `1..=max`, re-prompting with `invalid`
  /// otherwise. Returns the 0-based index.
  pub fn choice(&mut self, prompt: &str, max: usize, invalid: &str) -> io::Result<usize> {
    loop {
      let n = self.int(prompt)?;
      match usize::try_from(n) {
        Ok(n) if (1..=max).contains(&n) => return Ok(n - 1),
        _ => writeln!(self.output, "{invalid}")?,
      }
    }
  }

  /// Yes/no question; anything starting with `y` or `Y` is yes.
  pub fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
    Ok(self.line(prompt)?.starts_with(['y', 'Y']))
  }
}

/// Whether `err` is the end-of-input signal raised by [`Prompt`].
pub fn is_end_of_input(err: &anyhow::Error) -> bool {
  err
    .downcast_ref::<io::Error>()
    .is_some_and(|e| e.kind() == ErrorKind::UnexpectedEof)
}
