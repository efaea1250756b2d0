use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use std::ops::{Deref, DerefMut, Range};

// Boxed so `Result<_, Error>` stays small in the scanner.
#[derive(Default)]
pub struct ErrorInner {
    pub(super) message: String,
    pub(super) line: Option<usize>,
    pub(super) label: Option<(Range<usize>, String)>,
    pub(super) why: Option<(Range<usize>, String)>,
    pub(super) help: Option<String>,
}

#[derive(Default)]
pub struct Error {
    inner: Box<ErrorInner>,
}

impl Deref for Error {
    type Target = ErrorInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for Error {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl Error {
    pub fn new(message: impl ToString) -> Self {
        Self {
            inner: Box::new(ErrorInner {
                message: message.to_string(),
                ..Default::default()
            }),
        }
    }

    pub fn new_with_line(message: impl ToString, line: usize) -> Self {
        let mut this = Self::new(message);
        this.line = Some(line);
        this
    }

    pub fn with_label(mut self, span: Range<usize>, message: impl ToString) -> Self {
        self.label = Some((span, message.to_string()));
        self
    }

    pub fn with_why(mut self, span: Range<usize>, message: impl ToString) -> Self {
        self.why = Some((span, message.to_string()));
        self
    }

    pub fn with_help(mut self, help: impl ToString) -> Self {
        self.help = Some(help.to_string());
        self
    }

    /// Renders the error as a source snippet. `color` selects ANSI output for
    /// terminals; the log file gets the plain version.
    pub fn render(&self, path: &str, source: &str, color: bool) -> String {
        let offset = self.label.as_ref().map_or(0, |(span, _)| span.start);
        let mut builder = Report::build(ReportKind::Error, path, offset)
            .with_config(Config::default().with_color(color))
            .with_message(&self.message);
        if let Some((span, msg)) = self.label.clone() {
            builder.add_label(
                Label::new((path, span))
                    .with_color(Color::Red)
                    .with_message(msg),
            );
        }
        if let Some((span, msg)) = self.why.clone() {
            builder.add_label(
                Label::new((path, span))
                    .with_color(Color::Blue)
                    .with_message(msg),
            );
        }
        if let Some(msg) = &self.help {
            builder.set_help(msg);
        }
        let mut buf = Vec::new();
        match builder
            .finish()
            .write((path, Source::from(source)), &mut buf)
        {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {}: {}", line + 1, self.message)?,
            None => write!(f, "{}", self.message)?,
        }
        if let Some((_, label)) = &self.label {
            if !label.is_empty() {
                write!(f, " ({label})")?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cfg::Error({})", self.message)
    }
}

/// Creates an error for value parsers. The span is filled in by the parser
/// with the location of the whole value.
pub fn value_error(message: impl ToString, label: impl ToString) -> Error {
    Error::new(message).with_label(0..0, label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_line_and_label() {
        let error = Error::new_with_line("bad value", 2).with_label(0..1, "expected number");
        assert_eq!(error.to_string(), "line 3: bad value (expected number)");
        assert_eq!(Error::new("oops").to_string(), "oops");
    }

    #[test]
    fn render_includes_help() {
        let error = Error::new_with_line("bad color", 0)
            .with_label(0..3, "expected color")
            .with_help("try `#RRGGBB`");
        let rendered = error.render("test.cfg", "red\n", false);
        assert!(rendered.contains("try `#RRGGBB`"));
    }

    #[test]
    fn render_without_color_has_no_escapes() {
        let source = "[bar]\nheight = x\n";
        let error = Error::new_with_line("invalid value", 1).with_label(15..16, "expected number");
        let rendered = error.render("test.cfg", source, false);
        assert!(rendered.contains("invalid value"));
        assert!(rendered.contains("expected number"));
        assert!(!rendered.contains('\x1b'));
    }
}
