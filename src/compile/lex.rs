use crate::types::span::Span;
use crate::{Error, Result};

/// A lexer that tokenizes the template source into distinct chunks so that the
/// parser doesn't have to operate on raw text.
///
/// The lexer is implemented as a fallible iterator. The parser should
/// repeatedly call the [`.next()?`][Lexer::next] method to return the next
/// non-whitespace token until [`None`] is returned.
///
/// Raw template is never trimmed here, whitespace control is applied by the
/// parser once it knows which tags stand alone on their line.
pub struct Lexer<'source> {
    /// The original template source.
    pub source: &'source str,

    /// A cursor over the template source.
    cursor: usize,

    /// The current state of the lexer.
    state: State,

    /// A buffer to store the next token.
    next: Option<(Token, Span)>,
}

/// The state of the lexer.
///
/// The lexer requires state because the tokenization is different when
/// tokenizing raw template, text between tags e.g. `{{#if cond}}` and text
/// within a comment e.g. `{{!-- note --}}`.
enum State {
    /// Within raw template.
    Template,

    /// Between tags.
    Tag {
        /// The span of the begin tag.
        begin: Span,
        /// The end token we are expecting.
        end: Token,
        /// Whether the previous token was part of a path, e.g. `otherOpjs.`
        path: bool,
    },

    /// Between comment tags.
    Comment {
        /// The span of the begin tag.
        begin: Span,
        /// Whether this is a `{{!-- --}}` comment which may contain `}}`.
        long: bool,
    },
}

/// The unit yielded by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Raw template
    Raw,
    /// Begin tag, e.g. `{{` or `{{~`
    BeginTag,
    /// End tag, e.g. `}}` or `~}}`
    EndTag,
    /// Begin tag for an unescaped expression, e.g. `{{{`
    BeginRawTag,
    /// End tag for an unescaped expression, e.g. `}}}`
    EndRawTag,
    /// Begin comment tag, e.g. `{{!` or `{{!--`
    BeginComment,
    /// End comment tag, e.g. `}}` or `--}}`
    EndComment,
    /// `#`
    Hash,
    /// `/`
    Slash,
    /// `^`
    Caret,
    /// `&`
    Amp,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `|`
    Pipe,
    /// `.`
    Dot,
    /// `../`
    Parent,
    /// `@`
    At,
    /// Sequence of tabs, spaces and newlines
    Whitespace,
    /// A keyword like `else` or `this`
    Keyword,
    /// An attribute, variable or helper name
    Ident,
    /// An index into a list, e.g. the `0` in `additionalAccused.0`
    Index,
    /// A bracketed path segment, e.g. `[0]` or `[event date]`
    Segment,
    /// An integer or float literal, e.g. `5`, `-1` or `0.5`
    Number,
    /// A string literal, e.g. `"Positivo"` or `' y '`
    String,
}

/// The words that are lexed as [`Token::Keyword`].
pub const KEYWORDS: &[&str] = &["else", "this", "as", "true", "false", "null", "undefined"];

impl<'source> Lexer<'source> {
    /// Construct a new lexer.
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            cursor: 0,
            state: State::Template,
            next: None,
        }
    }

    /// Returns the next non-whitespace token and its span.
    pub fn next(&mut self) -> Result<Option<(Token, Span)>> {
        loop {
            match self.lex()? {
                Some((tk, sp)) if !tk.is_whitespace() => return Ok(Some((tk, sp))),
                None => return Ok(None),
                _ => continue,
            }
        }
    }

    /// Returns the next token and span.
    fn lex(&mut self) -> Result<Option<(Token, Span)>> {
        if let Some(next) = self.next.take() {
            return Ok(Some(next));
        }

        let i = self.cursor;

        if self.source[i..].is_empty() {
            if let State::Tag { begin, .. } | State::Comment { begin, .. } = self.state {
                return Err(self.err_unclosed(begin));
            }
            return Ok(None);
        }

        match self.state {
            State::Template => self.lex_template(i),
            State::Tag { begin, end, path } => self.lex_tag(begin, end, path, i),
            State::Comment { begin, long } => self.lex_comment(begin, long, i),
        }
    }

    fn lex_template(&mut self, i: usize) -> Result<Option<(Token, Span)>> {
        // We are within raw template, that means all we have to do is
        // find the next begin tag from `i`. The following diagram helps
        // describe the variable naming.
        //
        // xxxxxxx{{~#xxxxxx
        //    ^   ^   ^
        //    i   j   k

        let j = match self.source[i..].find("{{") {
            Some(d) => i + d,
            None => {
                let j = self.source.len();
                self.cursor = j;
                return Ok(Some((Token::Raw, Span::from(i..j))));
            }
        };

        let mut k = j + 2;
        if self.source[k..].starts_with('~') {
            k += 1;
        }
        let rest = &self.source[k..];
        let (tk, k) = if rest.starts_with("!--") {
            (Token::BeginComment, k + 3)
        } else if rest.starts_with('!') {
            (Token::BeginComment, k + 1)
        } else if rest.starts_with('{') {
            (Token::BeginRawTag, k + 1)
        } else {
            (Token::BeginTag, k)
        };

        let begin = Span::from(j..k);
        self.cursor = k;
        self.state = match tk {
            Token::BeginComment => State::Comment {
                begin,
                long: self.source[begin].ends_with("--"),
            },
            Token::BeginRawTag => State::Tag {
                begin,
                end: Token::EndRawTag,
                path: false,
            },
            _ => State::Tag {
                begin,
                end: Token::EndTag,
                path: false,
            },
        };

        if i == j {
            // The current cursor is exactly at the tag.
            Ok(Some((tk, begin)))
        } else {
            // We must first emit the raw token, so we store the begin tag
            // token in the `next` buffer.
            self.next = Some((tk, begin));
            Ok(Some((Token::Raw, Span::from(i..j))))
        }
    }

    fn lex_tag(
        &mut self,
        begin: Span,
        end: Token,
        path: bool,
        i: usize,
    ) -> Result<Option<(Token, Span)>> {
        // We are between two tags {{ ... }} that means we must parse template
        // syntax relevant tokens and also lookout for the corresponding end
        // tag `end`.

        let rest = &self.source[i..];
        let trim = usize::from(rest.starts_with("~}}"));
        if rest[trim..].starts_with("}}") {
            let j = i + trim;
            let (tk, k) = match end {
                Token::EndRawTag if rest[trim..].starts_with("}}}") => {
                    (Token::EndRawTag, j + 3)
                }
                Token::EndRawTag => {
                    return Err(self.err_unexpected_token(Token::EndTag, i..j + 2));
                }
                _ => (Token::EndTag, j + 2),
            };
            self.state = State::Template;
            self.cursor = k;
            return Ok(Some((tk, Span::from(i..k))));
        }

        if self.source[i..].starts_with("{{") {
            return Err(self.err_unclosed(begin));
        }

        // We iterate over chars because that is nicer than operating on raw
        // bytes. The map call here fixes the index to be relative to the
        // actual template source.
        let mut iter = self.source[i..].char_indices().map(|(d, c)| (i + d, c));

        let (_, c) = match iter.next() {
            Some(next) => next,
            None => return Err(self.err_unclosed(begin)),
        };

        let (tk, j) = match c {
            // Single character to token mappings.
            '#' => (Token::Hash, i + 1),
            '/' => (Token::Slash, i + 1),
            '^' => (Token::Caret, i + 1),
            '&' => (Token::Amp, i + 1),
            '(' => (Token::OpenParen, i + 1),
            ')' => (Token::CloseParen, i + 1),
            '|' => (Token::Pipe, i + 1),
            '@' => (Token::At, i + 1),
            '.' if self.source[i..].starts_with("../") => (Token::Parent, i + 3),
            '.' => (Token::Dot, i + 1),

            // Multi-character tokens with a distinct start character.
            '[' => self.lex_segment(iter, i)?,
            '"' | '\'' => self.lex_string(iter, i, c)?,
            '-' if matches!(iter.clone().next(), Some((_, d)) if d.is_ascii_digit()) => {
                self.lex_number(iter)
            }
            c if c.is_ascii_digit() => match path {
                true => self.lex_index(iter),
                false => self.lex_number(iter),
            },
            c if is_whitespace(c) => self.lex_whitespace(iter),
            c if is_ident_start(c) => self.lex_ident_or_keyword(iter, i, path),

            // Any other character...
            _ => {
                return Err(self.err_unexpected_character(i..(i + c.len_utf8())));
            }
        };

        // Identifiers, indexes and segments start or continue a path, which
        // changes how digits and keywords after a `.` are lexed.
        let path = matches!(
            tk,
            Token::Ident
                | Token::Keyword
                | Token::Index
                | Token::Segment
                | Token::Dot
                | Token::Parent
                | Token::At
        );
        self.state = State::Tag { begin, end, path };
        self.cursor = j;

        Ok(Some((tk, Span::from(i..j))))
    }

    fn lex_comment(&mut self, begin: Span, long: bool, i: usize) -> Result<Option<(Token, Span)>> {
        // We are between two comment tags {{! ... }}, that means all we have
        // to do is find the corresponding end tag. The following diagram
        // helps describe the variable naming.
        //
        // x{{!--cccccc--}}xxxxxx
        //       ^     ^   ^
        //       i     j   k

        let found = if long {
            let mut from = i;
            loop {
                match self.source[from..].find("--") {
                    Some(d) => {
                        let j = from + d;
                        let rest = &self.source[j + 2..];
                        if rest.starts_with("}}") {
                            break Some((j, j + 4));
                        } else if rest.starts_with("~}}") {
                            break Some((j, j + 5));
                        }
                        from = j + 1;
                    }
                    None => break None,
                }
            }
        } else {
            self.source[i..].find("}}").map(|d| {
                let j = i + d;
                match self.source[..j].ends_with('~') && j > i {
                    true => (j - 1, j + 2),
                    false => (j, j + 2),
                }
            })
        };

        let (j, k) = match found {
            Some(found) => found,
            None => return Err(self.err_unclosed(begin)),
        };

        let end = Span::from(j..k);
        self.cursor = k;
        self.state = State::Template;

        if i == j {
            Ok(Some((Token::EndComment, end)))
        } else {
            self.next = Some((Token::EndComment, end));
            Ok(Some((Token::Raw, Span::from(i..j))))
        }
    }

    fn lex_segment<I>(&mut self, iter: I, i: usize) -> Result<(Token, usize)>
    where
        I: Iterator<Item = (usize, char)> + Clone,
    {
        for (j, c) in iter {
            match c {
                ']' => return Ok((Token::Segment, j + 1)),
                '\r' | '\n' => return Err(self.err_undelimited_segment(i..j)),
                _ => {}
            }
        }
        Err(self.err_undelimited_segment(i..self.source.len()))
    }

    fn lex_string<I>(&mut self, mut iter: I, i: usize, quote: char) -> Result<(Token, usize)>
    where
        I: Iterator<Item = (usize, char)> + Clone,
    {
        let mut curr = quote;
        loop {
            match iter.next() {
                None => {
                    return Err(self.err_undelimited_string(i..self.source.len()));
                }
                Some((j, '\r' | '\n')) => {
                    return Err(self.err_undelimited_string(i..j));
                }
                Some((j, c)) if c == quote && curr != '\\' => {
                    return Ok((Token::String, j + 1));
                }
                Some((_, '\\')) if curr == '\\' => {
                    // An escaped backslash cannot escape the next character.
                    curr = ' ';
                }
                Some((_, c)) => {
                    curr = c;
                }
            }
        }
    }

    fn lex_number<I>(&mut self, iter: I) -> (Token, usize)
    where
        I: Iterator<Item = (usize, char)> + Clone,
    {
        (Token::Number, self.lex_while(iter, is_number))
    }

    fn lex_index<I>(&mut self, iter: I) -> (Token, usize)
    where
        I: Iterator<Item = (usize, char)> + Clone,
    {
        (Token::Index, self.lex_while(iter, is_index))
    }

    fn lex_whitespace<I>(&mut self, iter: I) -> (Token, usize)
    where
        I: Iterator<Item = (usize, char)> + Clone,
    {
        (Token::Whitespace, self.lex_while(iter, is_whitespace))
    }

    fn lex_ident_or_keyword<I>(&mut self, iter: I, i: usize, path: bool) -> (Token, usize)
    where
        I: Iterator<Item = (usize, char)> + Clone,
    {
        let j = self.lex_while(iter, is_ident);
        // Within a path keywords are plain keys, e.g. `opj.as`.
        let tk = match !path && KEYWORDS.contains(&&self.source[i..j]) {
            true => Token::Keyword,
            false => Token::Ident,
        };
        (tk, j)
    }

    fn lex_while<I, P>(&mut self, mut iter: I, pred: P) -> usize
    where
        I: Iterator<Item = (usize, char)> + Clone,
        P: Fn(char) -> bool,
    {
        loop {
            match iter.clone().next() {
                Some((_, c)) if pred(c) => {
                    iter.next();
                }
                Some((j, _)) => return j,
                None => return self.source.len(),
            }
        }
    }

    fn err_unclosed(&self, begin: Span) -> Error {
        let what = match self.source[begin].contains('!') {
            true => "comment",
            false => "tag",
        };
        Error::syntax(format!("unclosed {what}"), self.source, begin)
    }

    fn err_unexpected_token(&self, tk: Token, span: impl Into<Span>) -> Error {
        let tk = tk.human();
        Error::syntax(format!("unexpected {tk}"), self.source, span)
    }

    fn err_unexpected_character(&self, span: impl Into<Span>) -> Error {
        Error::syntax("unexpected character", self.source, span)
    }

    fn err_undelimited_string(&self, span: impl Into<Span>) -> Error {
        Error::syntax("undelimited string", self.source, span)
    }

    fn err_undelimited_segment(&self, span: impl Into<Span>) -> Error {
        Error::syntax("undelimited path segment", self.source, span)
    }
}

impl Token {
    pub fn human(&self) -> &'static str {
        match self {
            Self::Raw => "raw template",
            Self::BeginTag => "begin tag",
            Self::EndTag => "end tag",
            Self::BeginRawTag => "begin raw tag",
            Self::EndRawTag => "end raw tag",
            Self::BeginComment => "begin comment",
            Self::EndComment => "end comment",
            Self::Hash => "block opener",
            Self::Slash => "block closer",
            Self::Caret => "caret",
            Self::Amp => "ampersand",
            Self::OpenParen => "open parenthesis",
            Self::CloseParen => "close parenthesis",
            Self::Pipe => "pipe",
            Self::Dot => "member access operator",
            Self::Parent => "parent access operator",
            Self::At => "data variable prefix",
            Self::Whitespace => "whitespace",
            Self::Keyword => "keyword",
            Self::Ident => "identifier",
            Self::Index => "index",
            Self::Segment => "path segment",
            Self::Number => "number",
            Self::String => "string",
        }
    }

    fn is_whitespace(&self) -> bool {
        matches!(self, Self::Whitespace)
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, '\t' | ' ' | '\r' | '\n')
}

#[cfg(feature = "unicode")]
fn is_ident_start(c: char) -> bool {
    c == '_' || c == '$' || unicode_ident::is_xid_start(c)
}

#[cfg(feature = "unicode")]
fn is_ident(c: char) -> bool {
    c == '$' || c == '-' || unicode_ident::is_xid_continue(c)
}

#[cfg(not(feature = "unicode"))]
fn is_ident_start(c: char) -> bool {
    matches!(c, 'A'..='Z' | 'a'..='z' | '_' | '$')
}

#[cfg(not(feature = "unicode"))]
fn is_ident(c: char) -> bool {
    matches!(c, '0'..='9' | 'A'..='Z' | 'a'..='z' | '_' | '$' | '-')
}

fn is_index(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_number(c: char) -> bool {
    matches!(c, '0'..='9' | '.' | '-')
}
