//! Line-oriented terminal I/O shared by the interactive menus.
//!
//! Generic over `BufRead`/`Write` so the menus can be driven by scripted input.

use colored::Colorize;
use eyre::Result;
use std::io::{BufRead, Write};

/// Raised when the input stream ends while a prompt is waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputClosed;

impl std::fmt::Display for InputClosed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "input closed")
    }
}

impl std::error::Error for InputClosed {}

/// True if `err` means the user closed the input.
pub fn is_input_closed(err: &eyre::Report) -> bool {
    err.downcast_ref::<InputClosed>().is_some()
}

/// Parse a menu answer in `1..=max`.
pub fn parse_choice(input: &str, max: usize) -> Option<usize> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|choice| (1..=max).contains(choice))
}

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Write one line.
    pub fn line(&mut self, text: impl std::fmt::Display) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    pub fn heading(&mut self, title: &str) -> Result<()> {
        self.line(format!("\n=== {} ===", title).bold())
    }

    pub fn success(&mut self, message: &str) -> Result<()> {
        self.line(message.green())
    }

    pub fn error(&mut self, message: impl std::fmt::Display) -> Result<()> {
        self.line(format!("Error: {}", message).red())
    }

    pub fn warning(&mut self, message: impl std::fmt::Display) -> Result<()> {
        self.line(format!("Warning: {}", message).yellow())
    }

    pub fn info(&mut self, message: &str) -> Result<()> {
        self.line(message.blue())
    }

    /// Print `label` and read one line without its line ending.
    pub fn prompt(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Err(InputClosed.into());
        }
        Ok(answer.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Prompt until the trimmed answer is non-empty.
    pub fn prompt_required(&mut self, label: &str, field: &str) -> Result<String> {
        loop {
            let answer = self.prompt(label)?;
            let trimmed = answer.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed.to_string());
            }
            self.error(format!("{} cannot be empty", field))?;
        }
    }

    /// Ask for a menu option in `1..=max`, re-prompting on bad input.
    pub fn menu_choice(&mut self, max: usize) -> Result<usize> {
        loop {
            let answer = self.prompt(&format!("Enter your choice (1-{}): ", max))?;
            match parse_choice(&answer, max) {
                Some(choice) => return Ok(choice),
                None => self.error(format!("Invalid choice. Please enter a number between 1 and {}.", max))?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        colored::control::set_override(false);
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("1", 7), Some(1));
        assert_eq!(parse_choice(" 7 \n", 7), Some(7));
        assert_eq!(parse_choice("0", 7), None);
        assert_eq!(parse_choice("8", 7), None);
        assert_eq!(parse_choice("-1", 7), None);
        assert_eq!(parse_choice("two", 7), None);
        assert_eq!(parse_choice("", 7), None);
    }

    #[test]
    fn test_prompt_strips_line_ending() {
        let mut c = console("hello world\r\n");
        assert_eq!(c.prompt("> ").unwrap(), "hello world");
    }

    #[test]
    fn test_prompt_eof_is_input_closed() {
        let mut c = console("");
        let err = c.prompt("> ").unwrap_err();
        assert!(is_input_closed(&err));
    }

    #[test]
    fn test_prompt_required_reprompts() {
        let mut c = console("\n   \nTitle\n");
        assert_eq!(c.prompt_required("Title: ", "Title").unwrap(), "Title");
        let out = output(c);
        assert_eq!(out.matches("Title cannot be empty").count(), 2);
    }

    #[test]
    fn test_menu_choice_reprompts() {
        let mut c = console("abc\n9\n3\n");
        assert_eq!(c.menu_choice(7).unwrap(), 3);
        let out = output(c);
        assert_eq!(out.matches("Invalid choice").count(), 2);
    }
}
