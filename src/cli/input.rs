//! Whitespace-delimited token input for the interactive menu.

use std::collections::VecDeque;
use std::io::{self, BufRead};

/// Hands out one whitespace-separated token at a time, reading lines lazily.
///
/// Several tokens on one line are consumed by successive prompts.
pub struct TokenReader<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// Next token, or None at end of input.
    pub fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn given_mixed_lines_when_reading_then_yields_tokens_in_order() {
        let mut reader = TokenReader::new(Cursor::new("1 A\n\n  B  \nC"));
        let mut tokens = Vec::new();
        while let Some(token) = reader.next_token().unwrap() {
            tokens.push(token);
        }
        assert_eq!(tokens, vec!["1", "A", "B", "C"]);
    }

    #[test]
    fn given_empty_input_then_none() {
        let mut reader = TokenReader::new(Cursor::new(""));
        assert_eq!(reader.next_token().unwrap(), None);
    }
}
