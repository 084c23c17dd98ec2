use std::cmp::max;
use std::fmt;

use crate::types::span::Span;

/// An error that can occur during template compilation or rendering.
///
/// Compile errors carry the template source and the offending region. The
/// alternate formatter (`{:#}`) prints an excerpt of the source with the
/// region underlined, the default formatter prints a single line suitable
/// for substituting in place of a generated report.
#[derive(Clone)]
pub struct Error {
    kind: ErrorKind,
    msg: String,
    span: Option<(String, Span)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorKind {
    Syntax,
    Render,
    Serialize,
}

impl Error {
    /// Constructs a new syntax error.
    pub(crate) fn syntax(msg: impl Into<String>, source: &str, span: impl Into<Span>) -> Self {
        Self {
            kind: ErrorKind::Syntax,
            msg: msg.into(),
            span: Some((source.to_owned(), span.into())),
        }
    }

    /// Constructs a new error raised while rendering a compiled template.
    pub(crate) fn render(msg: impl Into<String>, source: &str, span: impl Into<Span>) -> Self {
        Self {
            kind: ErrorKind::Render,
            msg: msg.into(),
            span: Some((source.to_owned(), span.into())),
        }
    }

    /// Returns the error message without any source information.
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Returns the line and column (both one based) of the offending region,
    /// if this error points into a template.
    pub fn location(&self) -> Option<(usize, usize)> {
        self.span
            .as_ref()
            .map(|(source, span)| to_line_col(source, span.m))
            .map(|(line, col)| (line + 1, col + 1))
    }

    /// Returns `true` if the error was raised while compiling a template.
    pub fn is_syntax(&self) -> bool {
        self.kind == ErrorKind::Syntax
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self {
            kind: ErrorKind::Serialize,
            msg: err.to_string(),
            span: None,
        }
    }
}

impl std::error::Error for Error {}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.span {
            Some((source, span)) => fmt_pretty(&self.msg, source, *span, f),
            None => write!(f, "{}", self.msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.span {
            Some((source, span)) => {
                if f.alternate() {
                    fmt_pretty(&self.msg, source, *span, f)
                } else {
                    let (line, col) = to_line_col(source, span.m);
                    write!(f, "{} at line {}, column {}", self.msg, line + 1, col + 1)
                }
            }
            None => write!(f, "{}", self.msg),
        }
    }
}

fn fmt_pretty(msg: &str, source: &str, span: Span, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let lines: Vec<_> = source.split_terminator('\n').collect();
    let (line, col) = to_line_col(source, span.m);
    let code = lines
        .get(line)
        .or_else(|| lines.last())
        .copied()
        .unwrap_or_default();

    // Only underline up to the end of the first line of the region.
    let region = &source[span.m.min(source.len())..span.n.min(source.len())];
    let region = region.split('\n').next().unwrap_or_default();
    let width = max(1, width(region));

    let num = (line + 1).to_string();
    let pad = num.len();
    let pipe = "|";
    let underline = "^".repeat(width);

    write!(
        f,
        "\n \
        {0:pad$} {pipe}\n \
        {num:>} {pipe} {code}\n \
        {0:pad$} {pipe} {underline:>width$} {msg}\n",
        "",
        pad = pad,
        pipe = pipe,
        num = num,
        code = code,
        underline = underline,
        width = col + width,
        msg = msg
    )
}

/// Returns the zero based line and display column of the byte offset.
fn to_line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = &source[..offset];
    let line = before.matches('\n').count();
    let start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    (line, width(&before[start..]))
}

#[cfg(feature = "unicode")]
fn width(s: &str) -> usize {
    unicode_width::UnicodeWidthStr::width(s)
}

#[cfg(not(feature = "unicode"))]
fn width(s: &str) -> usize {
    s.chars().count()
}
