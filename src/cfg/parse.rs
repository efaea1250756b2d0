use super::{
    error::Error,
    scanner::{is_space, Scanner},
};
use std::{fs::read_to_string, io, path::Path};

pub enum SetError {
    InvalidKey(Error),
    InvalidValue(Error),
}

impl SetError {
    fn into_inner(self) -> Error {
        match self {
            Self::InvalidKey(e) | Self::InvalidValue(e) => e,
        }
    }
}

pub type SetResult = Result<(), SetError>;

/// Find the most similar item to `s` in `valid`.
/// If no item is sufficiently similar `None` is returned.
pub fn most_similar<'a, I>(s: &str, valid: I) -> Option<&'a str>
where
    I: Iterator<Item = &'a str>,
{
    let mut closest = "";
    let mut score = 0.0;
    for v in valid {
        let sim = strsim::jaro_winkler(v, s);
        if sim > score {
            closest = v;
            score = sim;
        }
    }
    if score >= 0.8 {
        Some(closest)
    } else {
        None
    }
}

pub trait Document {
    fn section(&mut self, name: &str) -> Result<&mut dyn Section, Error>;
}

pub trait Section {
    /// `section_name` is only used for error messages.
    fn set(&mut self, section_name: &str, field: &str, scanner: &mut Scanner) -> SetResult;
}

pub trait Value: Sized {
    fn parse(scanner: &mut Scanner) -> Result<Self, Error>;
}

fn is_section_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

fn is_field_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub struct Parser {
    path: String,
    source: String,
}

impl Parser {
    pub fn new(path: &Path) -> io::Result<Self> {
        Ok(Self::from_source(
            &path.display().to_string(),
            read_to_string(path)?,
        ))
    }

    /// `path` is only used to label error reports.
    pub fn from_source(path: &str, source: String) -> Self {
        Self {
            path: path.to_owned(),
            source,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    fn skip_non_content(scanner: &mut Scanner) {
        loop {
            match scanner.peek() {
                Some(space) if is_space(true)(space) => scanner.skip_space(true),
                Some('#') => {
                    scanner.rest_of_line();
                }
                _ => break,
            }
        }
    }

    /// Consumes trailing space and an optional comment, then requires the end
    /// of the line.
    fn finish_line(scanner: &mut Scanner) -> Result<(), Error> {
        scanner.skip_space(false);
        if scanner.peek() == Some('#') {
            scanner.rest_of_line();
        }
        if scanner.is_empty() {
            return Ok(());
        }
        scanner.expect_eq('\n').map(|_| ())
    }

    fn parse_section_header<'a>(
        scanner: &mut Scanner<'a>,
        doc: &mut dyn Document,
    ) -> Result<&'a str, Error> {
        scanner.next();
        scanner.skip_space(false);
        let name = scanner.some(is_section_char);
        scanner.skip_space(false);
        scanner.expect_eq(']')?;
        doc.section(name.as_str()).map_err(|mut e| {
            e.line = Some(name.location().line);
            match &mut e.label {
                Some((span, _)) => *span = name.range(),
                None => e.label = Some((name.range(), String::new())),
            }
            e
        })?;
        Self::finish_line(scanner)?;
        Ok(name.as_str())
    }

    fn parse_assignment(
        scanner: &mut Scanner,
        section: Option<&str>,
        doc: &mut dyn Document,
    ) -> Result<(), Error> {
        let key = scanner.some(is_field_char);
        if key.is_empty() {
            let loc = scanner.location();
            return Err(Error::new_with_line("missing field name", loc.line)
                .with_label(loc.range(1), "expected field name"));
        }
        scanner.skip_space(false);
        scanner.expect_eq('=').map_err(|e| {
            e.with_why(key.range(), "because the previous token was a field name")
        })?;
        scanner.skip_space(false);
        let section_name = section.ok_or_else(|| {
            key.as_error(
                "assignment outside section",
                "expected section before this assignment",
            )
        })?;
        let section = doc.section(section_name)?;
        let start = *scanner.location();
        let result = section.set(section_name, key.as_str(), scanner);
        let end = *scanner.location();
        if let Err(set_error) = result {
            let real_span = match &set_error {
                SetError::InvalidKey(_) => key.range(),
                SetError::InvalidValue(_) => {
                    start.char_offset..end.char_offset.max(start.char_offset + 1)
                }
            };
            let mut error = set_error.into_inner();
            if let Some((span, _)) = &mut error.label {
                if *span == (0..0) {
                    *span = real_span;
                }
            }
            error.line.get_or_insert(key.location().line);
            return Err(error);
        }
        Self::finish_line(scanner)
    }

    /// Parses the whole source into `doc`, stopping at the first error.
    pub fn parse(&self, doc: &mut impl Document) -> Result<(), Error> {
        let mut scanner = Scanner::new(&self.source);
        let mut section = None;
        loop {
            Self::skip_non_content(&mut scanner);
            if scanner.is_empty() {
                return Ok(());
            }
            if scanner.starts_with("[") {
                section = Some(Self::parse_section_header(&mut scanner, doc)?);
            } else {
                Self::parse_assignment(&mut scanner, section, doc)?;
            }
        }
    }
}
