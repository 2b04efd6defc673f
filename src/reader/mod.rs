//! Support for reading skicl scripts from character streams.
//!
//! Scripts are never read in full before evaluation:
//! the evaluator pulls tokens from a [`Tokenizer`] one at a time,
//! and the tokenizer pulls characters from whatever is underneath it.
//! For in-memory text that is just `str::chars`;
//! for files and standard input it is [`Chars`], which decodes UTF-8
//! from a `BufRead` as the characters are needed.
//!
//! That laziness is what lets the REPL evaluate a line as soon as it is typed,
//! while a `{...}` literal can still run across several lines.

use std::io::{BufRead, ErrorKind};

mod token;

pub use token::Tokenizer;

/// Substituted for bytes that are not valid UTF-8.
const REPLACEMENT: char = char::REPLACEMENT_CHARACTER;

/// Lazily-decoded characters of a byte stream.
///
/// An I/O error partway through is logged and treated as end of input;
/// the interpreter has no way to resume a half-read script.
pub struct Chars<R> {
    input: R,
    failed: bool,
}

impl<R: BufRead> Chars<R> {
    pub fn new(input: R) -> Self {
        Chars {
            input,
            failed: false,
        }
    }

    fn peek_byte(&mut self) -> Option<u8> {
        if self.failed {
            return None;
        }
        loop {
            match self.input.fill_buf() {
                Ok(buf) => return buf.first().copied(),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::warn!("input stream failed, treating as end of input: {e}");
                    self.failed = true;
                    return None;
                }
            }
        }
    }

    fn next_byte(&mut self) -> Option<u8> {
        let b = self.peek_byte()?;
        self.input.consume(1);
        Some(b)
    }
}

/// Length of the UTF-8 sequence introduced by this byte, or 0 if it can't start one.
fn sequence_length(first: u8) -> usize {
    match first {
        0x00..=0x7f => 1,
        0xc2..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf4 => 4,
        _ => 0,
    }
}

impl<R: BufRead> Iterator for Chars<R> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let first = self.next_byte()?;
        let len = sequence_length(first);
        if len == 0 {
            return Some(REPLACEMENT);
        }

        let mut bytes = [first, 0, 0, 0];
        for slot in bytes.iter_mut().take(len).skip(1) {
            // Only consume continuation bytes; anything else starts the next character.
            match self.peek_byte() {
                Some(b) if b & 0xc0 == 0x80 => {
                    *slot = b;
                    self.input.consume(1);
                }
                _ => return Some(REPLACEMENT),
            }
        }

        Some(
            std::str::from_utf8(&bytes[..len])
                .ok()
                .and_then(|s| s.chars().next())
                .unwrap_or(REPLACEMENT),
        )
    }
}
