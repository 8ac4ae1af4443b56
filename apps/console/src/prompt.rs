//! # Operator Prompt
//!
//! Line-oriented input and output for the menu loop.
//!
//! Commands never touch stdin/stdout directly. They go through [`Prompt`],
//! so tests can drive a whole session from a byte buffer and read back
//! everything that was printed.

use std::io::{self, BufRead, Write};

use crate::error::{ConsoleError, ConsoleResult};

/// Reads answers from and prints lines to the operator.
pub trait Prompt {
    /// Reads one line. Returns `Ok(None)` at end of input.
    ///
    /// The trailing newline is removed; other whitespace is left for the
    /// caller. A line that is not UTF-8 is consumed and reported as
    /// [`ConsoleError::invalid_text`], which is not fatal.
    fn read_line(&mut self) -> ConsoleResult<Option<String>>;

    /// Prints one line.
    fn say(&mut self, line: &str) -> io::Result<()>;

    /// Prints `question` and reads the answer.
    fn ask(&mut self, question: &str) -> ConsoleResult<Option<String>> {
        self.say(question)?;
        self.read_line()
    }

    /// Like [`Prompt::ask`], but end of input becomes
    /// [`ConsoleError::end_of_input`] and the answer is trimmed.
    fn ask_trimmed(&mut self, question: &str) -> ConsoleResult<String> {
        match self.ask(question)? {
            Some(answer) => Ok(answer.trim().to_string()),
            None => Err(ConsoleError::end_of_input()),
        }
    }

    /// Asks for a replacement value. An empty answer means "unchanged".
    fn ask_optional(&mut self, question: &str) -> ConsoleResult<Option<String>> {
        let answer = self.ask_trimmed(question)?;
        Ok(if answer.is_empty() { None } else { Some(answer) })
    }
}

/// [`Prompt`] over any buffered reader and writer.
///
/// ## Usage
/// ```rust,ignore
/// let stdin = io::stdin();
/// let mut prompt = LinePrompt::new(stdin.lock(), io::stdout());
/// ```
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        LinePrompt { input, output }
    }

    /// Gives back the writer, e.g. to inspect a captured buffer.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn read_line(&mut self) -> ConsoleResult<Option<String>> {
        self.output.flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }

        while matches!(buf.last(), Some(b'\n' | b'\r')) {
            buf.pop();
        }
        String::from_utf8(buf)
            .map(Some)
            .map_err(|_| ConsoleError::invalid_text())
    }

    fn say(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.output, "{}", line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt(input: &str) -> LinePrompt<Cursor<Vec<u8>>, Vec<u8>> {
        LinePrompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_ask_strips_line_ending_only() {
        let mut p = prompt("  Dune \r\nnext\n");

        assert_eq!(p.ask("Title:").unwrap(), Some("  Dune ".to_string()));
        assert_eq!(p.ask("Again:").unwrap(), Some("next".to_string()));
        assert_eq!(p.ask("More:").unwrap(), None);

        let out = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(out, "Title:\nAgain:\nMore:\n");
    }

    #[test]
    fn test_ask_optional_treats_blank_as_unchanged() {
        let mut p = prompt("\n   \n-\n");

        assert_eq!(p.ask_optional("a").unwrap(), None);
        assert_eq!(p.ask_optional("b").unwrap(), None);
        assert_eq!(p.ask_optional("c").unwrap(), Some("-".to_string()));
    }

    #[test]
    fn test_invalid_utf8_line_is_not_fatal() {
        let mut p = LinePrompt::new(Cursor::new(b"\xff\xfe\nDune\n".to_vec()), Vec::new());

        let err = p.read_line().unwrap_err();
        assert_eq!(err.message, crate::error::INVALID_TEXT_MESSAGE);
        assert!(!err.is_fatal());

        // The bad line is consumed; reading carries on with the next one.
        assert_eq!(p.read_line().unwrap(), Some("Dune".to_string()));
        assert_eq!(p.read_line().unwrap(), None);
    }

    #[test]
    fn test_ask_trimmed_reports_end_of_input() {
        let mut p = prompt("");
        let err = p.ask_trimmed("id").unwrap_err();
        assert!(err.is_fatal());
    }
}
