//! Module for extracting skicl tokens from a character stream.
//!
//! Tokens are plain strings. Nothing about a token's kind is recorded here;
//! the evaluator looks at the first character when it consumes one
//! (`$` substitutes, `[` and `]` delimit blocks, everything else is literal).

use std::iter::Peekable;

/// Pulls tokens, one at a time, out of a character stream.
///
/// Characters that end a token without belonging to it (`[`, `]`, newline, `{`)
/// are left in the stream for the next call; that is our only lookahead.
pub struct Tokenizer<I>
where
    I: Iterator<Item = char>,
{
    input: Peekable<I>,

    // Whether we've handed out part of a line, but not its newline.
    mid_line: bool,
}

impl<I> Tokenizer<I>
where
    I: Iterator<Item = char>,
{
    pub fn new(input: I) -> Self {
        Tokenizer {
            input: input.peekable(),
            mid_line: false,
        }
    }

    /// True once no characters remain.
    ///
    /// On an interactive stream this blocks until there is more input (or none ever will be).
    pub fn is_exhausted(&mut self) -> bool {
        self.input.peek().is_none()
    }

    /// Discard the rest of the current line, if a line is underway.
    ///
    /// Used after an error, so the next evaluation starts at a line boundary
    /// rather than in the middle of the line that failed.
    pub fn skip_line(&mut self) {
        if !self.mid_line {
            return;
        }
        for ch in self.input.by_ref() {
            if ch == '\n' {
                break;
            }
        }
        self.mid_line = false;
    }

    /// Read a `{...}` literal. The opening brace has already been consumed.
    fn get_literal(&mut self) -> String {
        let mut literal = String::new();
        for ch in self.input.by_ref() {
            if ch == '}' {
                return literal;
            }
            literal.push(ch);
        }
        // Ran out before the closing brace: keep what we have.
        literal
    }

    fn get_token(&mut self) -> Option<String> {
        let mut accum = String::new();
        while let Some(&ch) = self.input.peek() {
            match ch {
                '[' | ']' | '\n' => {
                    if accum.is_empty() {
                        self.input.next();
                        accum.push(ch);
                    }
                    return Some(accum);
                }
                '#' => {
                    // Comment runs to the end of the line; the newline is still a token.
                    while self.input.next_if(|&ch| ch != '\n').is_some() {}
                }
                ' ' | '\t' | '\r' => {
                    self.input.next();
                    if !accum.is_empty() {
                        return Some(accum);
                    }
                }
                '{' => {
                    if !accum.is_empty() {
                        return Some(accum);
                    }
                    self.input.next();
                    return Some(self.get_literal());
                }
                '\0' => {
                    self.input.next();
                }
                _ => {
                    self.input.next();
                    accum.push(ch);
                }
            }
        }

        if accum.is_empty() {
            None
        } else {
            Some(accum)
        }
    }
}

impl<I> Iterator for Tokenizer<I>
where
    I: Iterator<Item = char>,
{
    /// A token. May be empty (`{}`); `None` only at end of input.
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.get_token();
        self.mid_line = matches!(&token, Some(t) if t != "\n");
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<String> {
        Tokenizer::new(input.chars()).collect()
    }

    fn check(input: &str, want: &[&str]) {
        let output = tokenize(input);
        assert_eq!(
            output.len(),
            want.len(),
            "wrong token count for {input:?}: {output:?}"
        );
        for ((i, got), want) in output.iter().enumerate().zip(want.iter()) {
            assert_eq!(got, want, "unexpected token in case {}", i);
        }
    }

    #[test]
    fn tokenize_words() {
        check("puts hello\tworld\r", &["puts", "hello", "world"]);
        check("  + 1.5   -2  ", &["+", "1.5", "-2"]);
        check("$x $long_name", &["$x", "$long_name"]);
    }

    #[test]
    fn tokenize_newlines() {
        check("a\nb\n\nc", &["a", "\n", "b", "\n", "\n", "c"]);
        check("\n", &["\n"]);
    }

    #[test]
    fn tokenize_brackets() {
        check(
            "puts [+ 1 [* 2 3]]",
            &["puts", "[", "+", "1", "[", "*", "2", "3", "]", "]"],
        );
        check("a[b]c", &["a", "[", "b", "]", "c"]);
        check("]]", &["]", "]"]);
    }

    #[test]
    fn tokenize_comments() {
        check("puts 1 # ignored [+ 1 1]\nputs 2", &["puts", "1", "\n", "puts", "2"]);
        check("abc#def\n", &["abc", "\n"]);
        check("# just a comment", &[]);
    }

    #[test]
    fn tokenize_literals() {
        check("proc add {a b} {+ $a $b}", &["proc", "add", "a b", "+ $a $b"]);
        check("{[not] # a block}", &["[not] # a block"]);
        check("{line one\nline two}", &["line one\nline two"]);
        check("x{y}", &["x", "y"]);
    }

    #[test]
    fn empty_literal_is_empty_token() {
        check("a {} b", &["a", "", "b"]);
    }

    #[test]
    fn unterminated_literal() {
        check("puts {never closed", &["puts", "never closed"]);
        check("{", &[""]);
    }

    #[test]
    fn nul_is_dropped() {
        check("a\0b", &["ab"]);
    }

    #[test]
    fn skip_line_mid_line() {
        let mut tokens = Tokenizer::new("a b c\nd".chars());
        assert_eq!(tokens.next().as_deref(), Some("a"));
        tokens.skip_line();
        assert_eq!(tokens.next().as_deref(), Some("d"));
    }

    #[test]
    fn skip_line_at_line_start() {
        let mut tokens = Tokenizer::new("a\nb\nc".chars());
        assert_eq!(tokens.next().as_deref(), Some("a"));
        assert_eq!(tokens.next().as_deref(), Some("\n"));
        // Already at a line boundary: nothing to discard.
        tokens.skip_line();
        assert_eq!(tokens.next().as_deref(), Some("b"));
    }

    #[test]
    fn exhaustion() {
        let mut tokens = Tokenizer::new("x ".chars());
        assert!(!tokens.is_exhausted());
        assert_eq!(tokens.next().as_deref(), Some("x"));
        assert!(tokens.is_exhausted());
        assert_eq!(tokens.next(), None);
    }
}
