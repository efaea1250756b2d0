use super::error::Error;
use std::{
    ops::{Deref, Range},
    str::CharIndices,
};

#[derive(Copy, Clone, Default, Debug)]
pub struct Location {
    pub line: usize,
    pub char_offset: usize,
    pub byte_offset: usize,
}

impl Location {
    pub fn range(&self, len: usize) -> Range<usize> {
        self.char_offset..(self.char_offset + len)
    }
}

/// A slice of the source that remembers where it started.
#[derive(Debug, Copy, Clone)]
pub struct LocatedStr<'a> {
    s: &'a str,
    begin: Location,
}

impl<'a> Deref for LocatedStr<'a> {
    type Target = str;

    fn deref(&self) -> &'a Self::Target {
        self.s
    }
}

impl<'a> LocatedStr<'a> {
    pub fn as_str(&self) -> &'a str {
        self.s
    }

    pub fn range(&self) -> Range<usize> {
        self.begin.char_offset..(self.begin.char_offset + self.s.chars().count())
    }

    pub fn location(&self) -> &Location {
        &self.begin
    }

    /// Creates an error on the line of the string with an error label using
    /// the span of the string.
    pub fn as_error(&self, message: impl ToString, label: impl ToString) -> Error {
        Error::new_with_line(message, self.begin.line).with_label(self.range(), label)
    }
}

impl std::fmt::Display for LocatedStr<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.s)
    }
}

#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    source: &'a str,
    it: CharIndices<'a>,
    peeked: Option<(Option<char>, Location)>,
    /// Location of the next character.
    location: Location,
}

impl<'a> Scanner<'a> {
    pub fn new(s: &'a str) -> Self {
        Self {
            source: s,
            it: s.char_indices(),
            peeked: None,
            location: Location::default(),
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn as_str(&self) -> &'a str {
        &self.source[self.location.byte_offset..]
    }

    pub fn starts_with(&self, s: &str) -> bool {
        self.as_str().starts_with(s)
    }

    pub fn peek(&mut self) -> Option<char> {
        if let Some((peeked, _)) = self.peeked {
            return peeked;
        }
        let current_location = self.location;
        let next = self.advance();
        self.peeked = Some((next, self.location));
        self.location = current_location;
        next
    }

    pub fn next_if(&mut self, predicate: impl FnOnce(char) -> bool) -> Option<char> {
        match self.peek() {
            Some(next) if predicate(next) => self.next(),
            _ => None,
        }
    }

    pub fn is_empty(&mut self) -> bool {
        self.peek().is_none()
    }

    pub fn expect(
        &mut self,
        what: impl ToString,
        predicate: impl FnOnce(char) -> bool,
    ) -> Result<char, Error> {
        let loc = self.location;
        match self.next() {
            Some(next) if predicate(next) => Ok(next),
            otherwise => Err(char_mismatch_error(what, otherwise, &loc)),
        }
    }

    pub fn expect_eq(&mut self, expected: char) -> Result<char, Error> {
        self.expect(display_char(expected), |c| c == expected)
    }

    /// Consumes characters while `predicate` matches them.
    pub fn some(&mut self, mut predicate: impl FnMut(char) -> bool) -> LocatedStr<'a> {
        let start = self.location;
        while self.next_if(&mut predicate).is_some() {}
        LocatedStr {
            s: &self.source[start.byte_offset..self.location.byte_offset],
            begin: start,
        }
    }

    pub fn digits(&mut self) -> LocatedStr<'a> {
        self.some(|c| c.is_ascii_digit())
    }

    pub fn skip_space(&mut self, newline: bool) {
        let p = is_space(newline);
        while self.next_if(p).is_some() {}
    }

    pub fn rest_of_line(&mut self) -> LocatedStr<'a> {
        self.some(|c| c != '\n')
    }

    /// Consumes everything up to (but not including) `until`. Fails if a newline
    /// or the end of input is reached first.
    pub fn all_until(&mut self, until: char) -> Result<LocatedStr<'a>, Error> {
        let matched = self.some(|c| c != until && c != '\n');
        match self.peek() {
            Some(m) if m == until => Ok(matched),
            otherwise => {
                let what = otherwise.map_or_else(|| "end of input".to_string(), display_char);
                Err(
                    Error::new_with_line("unexpected character", self.location.line).with_label(
                        self.location.range(1),
                        format!("expected {} before {}", display_char(until), what),
                    ),
                )
            }
        }
    }

    /// Moves to the next character, without looking at the peeked one.
    fn advance(&mut self) -> Option<char> {
        let (byte_offset, next) = self.it.next()?;
        debug_assert_eq!(byte_offset, self.location.byte_offset);
        if next == '\n' {
            self.location.line += 1;
        }
        self.location.char_offset += 1;
        self.location.byte_offset = byte_offset + next.len_utf8();
        Some(next)
    }
}

impl Iterator for Scanner<'_> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((peeked, location)) = self.peeked.take() {
            self.location = location;
            peeked
        } else {
            self.advance()
        }
    }
}

pub fn display_char(c: char) -> String {
    if c == '\n' {
        "newline".to_string()
    } else {
        format!("`{}`", c)
    }
}

fn char_mismatch_error(expected: impl ToString, actual: Option<char>, loc: &Location) -> Error {
    let expected = expected.to_string();
    let label = format!("expected {expected}");
    let message = match actual {
        Some(actual) => {
            let actual = display_char(actual);
            format!("expected {expected}, found {actual}")
        }
        None => "unexpected end of input".to_string(),
    };
    Error::new_with_line(message, loc.line).with_label(loc.range(1), label)
}

/// Returns a predicate matching whitespace.
pub fn is_space(newline: bool) -> fn(char) -> bool {
    if newline {
        |c: char| c == ' ' || c == '\t' || c == '\r' || c == '\n'
    } else {
        |c: char| c == ' ' || c == '\t' || c == '\r'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn some_tracks_locations() {
        let mut scanner = Scanner::new("abc 123\nxyz");
        let word = scanner.some(|c| c.is_alphabetic());
        assert_eq!(word.as_str(), "abc");
        assert_eq!(word.range(), 0..3);
        scanner.skip_space(false);
        let digits = scanner.digits();
        assert_eq!(digits.as_str(), "123");
        assert_eq!(digits.location().char_offset, 4);
        scanner.skip_space(true);
        let last = scanner.rest_of_line();
        assert_eq!(last.as_str(), "xyz");
        assert_eq!(last.location().line, 1);
        assert!(scanner.is_empty());
    }

    #[test]
    fn peek_does_not_consume() {
        let mut scanner = Scanner::new("ab");
        assert_eq!(scanner.peek(), Some('a'));
        assert_eq!(scanner.peek(), Some('a'));
        assert_eq!(scanner.location().char_offset, 0);
        assert_eq!(scanner.next(), Some('a'));
        assert_eq!(scanner.location().char_offset, 1);
        assert!(scanner.starts_with("b"));
    }

    #[test]
    fn multibyte_characters() {
        let mut scanner = Scanner::new("äö=1");
        let word = scanner.some(|c| c != '=');
        assert_eq!(word.as_str(), "äö");
        assert_eq!(word.range(), 0..2);
        assert_eq!(scanner.expect_eq('=').ok(), Some('='));
        assert_eq!(scanner.digits().as_str(), "1");
    }

    #[test]
    fn all_until_stops_at_newline() {
        let mut scanner = Scanner::new("abc'");
        assert_eq!(scanner.all_until('\'').map(|s| s.as_str()).ok(), Some("abc"));
        let mut scanner = Scanner::new("abc\n'");
        assert!(scanner.all_until('\'').is_err());
    }

    #[test]
    fn expect_reports_mismatch() {
        let mut scanner = Scanner::new("x");
        let error = scanner.expect_eq('=').unwrap_err();
        assert_eq!(error.message, "expected `=`, found `x`");
        assert_eq!(error.line, Some(0));
    }
}
