use std::fmt::Display;

use crate::compile::lex::{Lexer, Token};
use crate::helpers::HelperKind;
use crate::types::ast;
use crate::types::span::Span;
use crate::{Engine, Error, Result, Value};

/// A parser that constructs an AST from a token stream.
///
/// The parser is implemented as a simple hand written parser with no recursion
/// across tags. It works in two passes, first every tag is parsed into a flat
/// list of pieces so that whitespace control can look at the neighbours of a
/// tag, then the pieces are nested into blocks.
pub struct Parser<'engine, 'source> {
    /// The engine holding the registered helpers.
    engine: &'engine Engine,

    /// A lexer that tokenizes the template source.
    tokens: Lexer<'source>,

    /// Remember a peeked value, even if it was `None`
    peeked: Option<Option<(Token, Span)>>,
}

/// A chunk of the template, either raw template or a single tag.
enum Piece {
    Raw(Span),
    Tag(Tag),
}

struct Tag {
    kind: TagKind,
    /// The span of the entire tag including the delimiters.
    span: Span,
    /// Whether the tag starts with `{{~`.
    trim_before: bool,
    /// Whether the tag ends with `~}}`.
    trim_after: bool,
}

enum TagKind {
    /// `{{! ... }}` or `{{!-- ... --}}`
    Comment,
    /// `{{expr}}`, `{{{expr}}}` or `{{&expr}}`
    Expr(ast::Expr),
    /// `{{#name args as |params|}}`
    Open(Open),
    /// `{{else}}`, `{{^}}` or a chained `{{else name args}}`
    Else(Option<Open>),
    /// `{{/name}}`
    Close(ast::Ident),
}

/// The parsed contents of a block opening tag.
struct Open {
    kind: ast::BlockKind,
    args: Vec<ast::Expr>,
    params: Vec<ast::Ident>,
    span: Span,
}

/// Stores the state of a block during nesting.
struct State {
    open: Open,
    /// The span of the tag that opened the block.
    span: Span,
    /// Whether this block was opened by a chained `{{else name ...}}`.
    is_else_chain: bool,
    /// Whether an `{{else}}` was seen for this block.
    has_else: bool,
}

impl<'engine, 'source> Parser<'engine, 'source> {
    /// Construct a new parser.
    pub fn new(engine: &'engine Engine, source: &'source str) -> Self {
        Self {
            engine,
            tokens: Lexer::new(source),
            peeked: None,
        }
    }

    /// Parses a template.
    pub fn parse_template(mut self) -> Result<ast::Template> {
        let mut pieces = self.parse_pieces()?;
        strip_whitespace(self.source(), &mut pieces);
        self.nest(pieces)
    }

    /// Parses every tag in the template into a flat list.
    fn parse_pieces(&mut self) -> Result<Vec<Piece>> {
        let mut pieces = Vec::new();

        while let Some(next) = self.next()? {
            let piece = match next {
                // Simply raw template, emit a single piece for it.
                (Token::Raw, span) => Piece::Raw(span),

                // The start of a comment, e.g. `{{! ... }}`
                (Token::BeginComment, begin) => {
                    if self.is_next(Token::Raw)? {
                        self.expect(Token::Raw)?;
                    }
                    let end = self.expect(Token::EndComment)?;
                    Piece::Tag(self.tag(TagKind::Comment, begin, end))
                }

                // The start of an unescaped expression, e.g. `{{{ name }}}`
                (Token::BeginRawTag, begin) => {
                    let expr = self.parse_inline_expr()?;
                    let end = self.expect(Token::EndRawTag)?;
                    Piece::Tag(self.tag(TagKind::Expr(expr), begin, end))
                }

                // The start of an expression or block tag, e.g. `{{ name }}`
                // or `{{#if cond}}`
                (Token::BeginTag, begin) => {
                    let kind = self.parse_tag_kind()?;
                    let end = self.expect(Token::EndTag)?;
                    Piece::Tag(self.tag(kind, begin, end))
                }

                (tk, span) => {
                    panic!("lexer bug: received token `{tk:?}` at {span:?}");
                }
            };
            pieces.push(piece);
        }

        Ok(pieces)
    }

    /// Nests the flat list of pieces into a tree of blocks.
    ///
    /// This function works using two stacks:
    /// - A stack of blocks e.g. `{{#if cond}} ... {{else}}`.
    /// - A stack of scopes which collect each parsed statement.
    fn nest(&self, pieces: Vec<Piece>) -> Result<ast::Template> {
        let source = self.source();
        let mut blocks: Vec<State> = vec![];
        let mut scopes = vec![ast::Scope::new()];

        for piece in pieces {
            let (kind, span) = match piece {
                Piece::Raw(span) if span.is_empty() => continue,
                Piece::Raw(span) => {
                    scopes.last_mut().unwrap().stmts.push(ast::Stmt::Raw(span));
                    continue;
                }
                Piece::Tag(Tag { kind, span, .. }) => (kind, span),
            };

            let stmt = match kind {
                TagKind::Comment => continue,

                TagKind::Expr(expr) => ast::Stmt::InlineExpr(ast::InlineExpr { expr, span }),

                // The start of a block. For example:
                //
                //   {{#each otherOpjs as |opj|}}
                //
                // We must push a block to the block stack and a scope to the
                // scope stack because a block starts a new scope.
                TagKind::Open(open) => {
                    blocks.push(State {
                        open,
                        span,
                        is_else_chain: false,
                        has_else: false,
                    });
                    scopes.push(ast::Scope::new());
                    continue;
                }

                // The `else` clause of a block. For example:
                //
                //   {{else}}
                //
                //   {{else isCorregimiento eventMunicipality}}
                //
                // We expect that the current block does not have an `else`
                // clause yet. A chained clause opens a new block within the
                // `else` scope that is closed along with the current one.
                TagKind::Else(chain) => {
                    match blocks.last_mut() {
                        Some(State {
                            has_else: has_else @ false,
                            ..
                        }) => {
                            *has_else = true;
                        }
                        _ => return Err(Error::syntax("unexpected `else`", source, span)),
                    }
                    scopes.push(ast::Scope::new());
                    if let Some(open) = chain {
                        blocks.push(State {
                            open,
                            span,
                            is_else_chain: true,
                            has_else: false,
                        });
                        scopes.push(ast::Scope::new());
                    }
                    continue;
                }

                // The end of a block. For example:
                //
                //   {{/if}}
                //
                // We have to make sure to pop back the scopes until we get to
                // the block that was opened with a `{{#...}}` tag. Any chained
                // `else` blocks along the way become the `else` branch of their
                // parent.
                TagKind::Close(name) => {
                    let close = &source[name.span];
                    loop {
                        let State {
                            open,
                            is_else_chain,
                            has_else,
                            ..
                        } = match blocks.pop() {
                            Some(state) => state,
                            None => {
                                return Err(Error::syntax(
                                    format!("unexpected closing tag `{close}`"),
                                    source,
                                    span,
                                ));
                            }
                        };
                        let else_branch = has_else.then(|| scopes.pop().unwrap());
                        let then_branch = scopes.pop().unwrap();

                        if !is_else_chain {
                            let expected = open.kind.name(source);
                            if expected != close {
                                return Err(Error::syntax(
                                    format!("expected closing tag for `{expected}`, found `{close}`"),
                                    source,
                                    name.span,
                                ));
                            }
                        }

                        let stmt = ast::Stmt::Block(ast::Block {
                            kind: open.kind,
                            args: open.args,
                            params: open.params,
                            then_branch,
                            else_branch,
                            span: open.span,
                        });

                        if !is_else_chain {
                            break stmt;
                        }
                        scopes.last_mut().unwrap().stmts.push(stmt);
                    }
                }
            };
            scopes.last_mut().unwrap().stmts.push(stmt);
        }

        if let Some(State { open, span, .. }) = blocks.first() {
            let name = open.kind.name(source);
            return Err(Error::syntax(
                format!("unclosed `{name}` block"),
                source,
                *span,
            ));
        }

        assert!(
            scopes.len() == 1,
            "parser bug: we should end with a single scope"
        );

        Ok(ast::Template {
            scope: scopes.remove(0),
        })
    }

    /// Parses the contents of a `{{ ... }}` tag.
    fn parse_tag_kind(&mut self) -> Result<TagKind> {
        match self.peek()? {
            Some((Token::Hash, _)) => {
                self.expect(Token::Hash)?;
                Ok(TagKind::Open(self.parse_open()?))
            }
            Some((Token::Slash, _)) => {
                self.expect(Token::Slash)?;
                let name = self.parse_ident()?;
                Ok(TagKind::Close(name))
            }
            Some((Token::Caret, span)) => {
                self.expect(Token::Caret)?;
                if !self.is_next(Token::EndTag)? {
                    return Err(Error::syntax(
                        "inverted sections are not supported, use `{{#unless ...}}`",
                        self.source(),
                        span,
                    ));
                }
                Ok(TagKind::Else(None))
            }
            Some((Token::Keyword, span)) if &self.source()[span] == "else" => {
                self.expect(Token::Keyword)?;
                if self.is_next(Token::EndTag)? {
                    Ok(TagKind::Else(None))
                } else {
                    Ok(TagKind::Else(Some(self.parse_open()?)))
                }
            }
            Some((Token::Amp, _)) => {
                self.expect(Token::Amp)?;
                Ok(TagKind::Expr(self.parse_inline_expr()?))
            }
            _ => Ok(TagKind::Expr(self.parse_inline_expr()?)),
        }
    }

    /// Parses a block opening. All of the following are valid.
    ///
    ///   if otherOpjs
    ///
    ///   each otherOpjs as |opj|
    ///
    ///   with (filterAdditionalAccusedWithPositiveResult xs) as |positive|
    ///
    ///   isCorregimiento eventMunicipality
    ///
    fn parse_open(&mut self) -> Result<Open> {
        let name = self.parse_ident()?;
        let raw = &self.source()[name.span];
        let kind = match raw {
            "if" => ast::BlockKind::If,
            "unless" => ast::BlockKind::Unless,
            "each" => ast::BlockKind::Each,
            "with" => ast::BlockKind::With,
            _ => match self.engine.helpers().kind(raw) {
                Some(HelperKind::Block) => ast::BlockKind::Helper(name),
                Some(HelperKind::Inline) => {
                    return Err(Error::syntax(
                        format!("`{raw}` is not a block helper"),
                        self.source(),
                        name.span,
                    ));
                }
                None => {
                    return Err(Error::syntax(
                        format!("unknown block helper `{raw}`"),
                        self.source(),
                        name.span,
                    ));
                }
            },
        };

        let mut args = Vec::new();
        while !self.is_next(Token::EndTag)? && !self.is_next_keyword("as")? {
            args.push(self.parse_arg()?);
        }
        let mut span = match args.last() {
            Some(arg) => name.span.combine(arg.span()),
            None => name.span,
        };

        let mut params = Vec::new();
        if self.is_next_keyword("as")? {
            self.expect(Token::Keyword)?;
            self.expect(Token::Pipe)?;
            while !self.is_next(Token::Pipe)? {
                params.push(self.parse_ident()?);
            }
            span = span.combine(self.expect(Token::Pipe)?);
        }

        let open = Open {
            kind,
            args,
            params,
            span,
        };
        self.validate_open(&open)?;
        Ok(open)
    }

    /// Checks the number of arguments and block parameters of the builtin
    /// blocks.
    fn validate_open(&self, open: &Open) -> Result<()> {
        let name = open.kind.name(self.source());
        let max_params = match open.kind {
            ast::BlockKind::Each => 2,
            ast::BlockKind::With => 1,
            _ => 0,
        };
        if !matches!(open.kind, ast::BlockKind::Helper(_)) && open.args.len() != 1 {
            return Err(Error::syntax(
                format!("`{name}` expects exactly one argument"),
                self.source(),
                open.span,
            ));
        }
        if open.params.len() > max_params {
            let msg = match max_params {
                0 => format!("`{name}` does not accept block parameters"),
                n => format!("`{name}` accepts at most {n} block parameter(s)"),
            };
            return Err(Error::syntax(msg, self.source(), open.span));
        }
        Ok(())
    }

    /// Parses the expression of an inline tag.
    ///
    /// This is either a single value or a helper call with arguments. For
    /// example:
    ///
    ///   eventDate
    ///
    ///   formatId accused.identificationNumber
    ///
    ///   join additionalAccused 'accusedName' ', ' ' y '
    ///
    fn parse_inline_expr(&mut self) -> Result<ast::Expr> {
        let head = self.parse_arg()?;
        let name = as_helper_name(&head);

        if self.is_end_of_expr()? {
            // A bare name calls the helper when one is registered with it.
            if let Some(name) = name {
                let raw = &self.source()[name.span];
                match self.engine.helpers().kind(raw) {
                    Some(HelperKind::Inline) => {
                        let call = ast::Call {
                            name,
                            args: Vec::new(),
                            span: name.span,
                        };
                        return Ok(ast::Expr::Call(call));
                    }
                    Some(HelperKind::Block) => {
                        return Err(self.err_block_helper_inline(raw, name.span));
                    }
                    None => {}
                }
            }
            return Ok(head);
        }

        match name {
            Some(name) => Ok(ast::Expr::Call(self.parse_call(name)?)),
            None => Err(Error::syntax(
                "expected helper name",
                self.source(),
                head.span(),
            )),
        }
    }

    /// Parses the arguments of a helper call.
    fn parse_call(&mut self, name: ast::Ident) -> Result<ast::Call> {
        let raw = &self.source()[name.span];
        match self.engine.helpers().kind(raw) {
            Some(HelperKind::Inline) => {}
            Some(HelperKind::Block) => {
                return Err(self.err_block_helper_inline(raw, name.span));
            }
            None => {
                return Err(Error::syntax(
                    format!("unknown helper `{raw}`"),
                    self.source(),
                    name.span,
                ));
            }
        }

        let mut args = Vec::new();
        while !self.is_end_of_expr()? {
            args.push(self.parse_arg()?);
        }
        let span = match args.last() {
            Some(arg) => name.span.combine(arg.span()),
            None => name.span,
        };
        Ok(ast::Call { name, args, span })
    }

    /// Parses a single argument.
    ///
    /// This is either a path like
    ///
    ///   otherOpjs.[0].opjNumber
    ///
    /// A literal like
    ///
    ///   "Positivo"
    ///
    /// Or a subexpression like
    ///
    ///   (arrayLength additionalAccused)
    ///
    fn parse_arg(&mut self) -> Result<ast::Expr> {
        let expr = match self.parse()? {
            (Token::OpenParen, begin) => {
                let name = self.parse_ident()?;
                let mut call = self.parse_call(name)?;
                let end = self.expect(Token::CloseParen)?;
                call.span = begin.combine(end);
                ast::Expr::Call(call)
            }

            (Token::String, span) => {
                let value = Value::String(self.parse_string(span)?);
                ast::Expr::Literal(ast::Literal { value, span })
            }

            (Token::Number, span) => ast::Expr::Literal(self.parse_literal_number(span)?),

            (Token::Keyword, span) => {
                let value = match &self.source()[span] {
                    "true" => Value::Bool(true),
                    "false" => Value::Bool(false),
                    "null" | "undefined" => Value::None,
                    "this" => return self.parse_path(ast::Root::This, span, Vec::new()),
                    kw => return Err(self.err_unexpected_keyword(kw, span)),
                };
                ast::Expr::Literal(ast::Literal { value, span })
            }

            (Token::Dot, span) => self.parse_path(ast::Root::This, span, Vec::new())?,

            (Token::Parent, span) => {
                let mut depth = 1;
                while self.is_next(Token::Parent)? {
                    self.expect(Token::Parent)?;
                    depth += 1;
                }
                let member = self.parse_member()?;
                let members = match &self.source()[member.span] {
                    "this" => Vec::new(),
                    _ => vec![member],
                };
                let span = span.combine(member.span);
                self.parse_path(ast::Root::Parent(depth), span, members)?
            }

            (Token::At, span) => {
                let name = self.parse_ident()?;
                let span = span.combine(name.span);
                match &self.source()[name.span] {
                    "root" => self.parse_path(ast::Root::Global, span, Vec::new())?,
                    _ => self.parse_path(ast::Root::Data(name), span, Vec::new())?,
                }
            }

            (Token::Ident, span) => {
                let member = ast::Member { key: span, span };
                self.parse_path(ast::Root::Local, span, vec![member])?
            }

            (Token::Segment, span) => {
                let member = ast::Member {
                    key: span.inner(),
                    span,
                };
                self.parse_path(ast::Root::Local, span, vec![member])?
            }

            (tk, span) => {
                return Err(self.err_unexpected_token("expression", tk, span));
            }
        };
        Ok(expr)
    }

    /// Parses the remaining members of a path.
    ///
    ///   .additionalAccused.0
    ///
    ///   .[1].opjDate
    ///
    fn parse_path(
        &mut self,
        root: ast::Root,
        span: Span,
        mut members: Vec<ast::Member>,
    ) -> Result<ast::Expr> {
        let mut span = span;
        while self.is_next(Token::Dot)? {
            let dot = self.expect(Token::Dot)?;
            let member = self.parse_member()?;
            span = span.combine(dot).combine(member.span);
            members.push(member);
        }
        Ok(ast::Expr::Path(ast::Path {
            root,
            members,
            span,
        }))
    }

    /// Parses a single path member which is an identifier, an index or a
    /// bracketed segment.
    fn parse_member(&mut self) -> Result<ast::Member> {
        match self.parse()? {
            (Token::Ident | Token::Index | Token::Keyword, span) => Ok(ast::Member { key: span, span }),
            (Token::Segment, span) => Ok(ast::Member {
                key: span.inner(),
                span,
            }),
            (tk, span) => Err(self.err_unexpected_token("identifier or index", tk, span)),
        }
    }

    /// Parses an integer or a float.
    fn parse_literal_number(&self, span: Span) -> Result<ast::Literal> {
        let raw = &self.source()[span];
        let value = if raw.contains('.') {
            raw.parse()
                .map(Value::Float)
                .map_err(|_| Error::syntax("invalid float literal", self.source(), span))?
        } else {
            raw.parse().map(Value::Integer).map_err(|_| {
                Error::syntax(
                    "invalid integer literal, expected a 64-bit integer",
                    self.source(),
                    span,
                )
            })?
        };
        Ok(ast::Literal { value, span })
    }

    /// Parses a single or double quoted string and handles escape characters.
    fn parse_string(&self, span: Span) -> Result<String> {
        let inner = span.inner();
        let raw = &self.source()[inner];
        if !raw.contains('\\') {
            return Ok(raw.to_owned());
        }

        let mut iter = raw.char_indices().map(|(i, c)| (inner.m + i, c));
        let mut string = String::with_capacity(raw.len());
        while let Some((i, c)) = iter.next() {
            match c {
                '\\' => {
                    let (j, esc) = match iter.next() {
                        Some(next) => next,
                        None => {
                            return Err(Error::syntax(
                                "unknown escape character",
                                self.source(),
                                i..i + 1,
                            ));
                        }
                    };
                    let c = match esc {
                        'n' => '\n',
                        'r' => '\r',
                        't' => '\t',
                        '\\' => '\\',
                        '"' => '"',
                        '\'' => '\'',
                        _ => {
                            return Err(Error::syntax(
                                "unknown escape character",
                                self.source(),
                                i..j + esc.len_utf8(),
                            ));
                        }
                    };
                    string.push(c);
                }
                c => string.push(c),
            }
        }
        Ok(string)
    }

    /// Parses an identifier.
    fn parse_ident(&mut self) -> Result<ast::Ident> {
        let span = self.expect(Token::Ident)?;
        Ok(ast::Ident { span })
    }

    /// Parses any token.
    fn parse(&mut self) -> Result<(Token, Span)> {
        match self.next()? {
            Some((tk, sp)) => Ok((tk, sp)),
            None => Err(self.err_unexpected_eof("token")),
        }
    }

    /// Parses the specified token and returns its span.
    fn expect(&mut self, exp: Token) -> Result<Span> {
        match self.next()? {
            Some((tk, span)) if tk == exp => Ok(span),
            Some((tk, span)) => Err(self.err_unexpected_token(exp.human(), tk, span)),
            None => Err(self.err_unexpected_eof(exp.human())),
        }
    }

    /// Returns `true` if the next token ends the current expression.
    fn is_end_of_expr(&mut self) -> Result<bool> {
        Ok(matches!(
            self.peek()?,
            None | Some((Token::EndTag | Token::EndRawTag | Token::CloseParen, _))
        ))
    }

    /// Returns `true` if the next token is the given keyword.
    fn is_next_keyword(&mut self, exp: &str) -> Result<bool> {
        Ok(self
            .peek()?
            .map(|(tk, sp)| tk == Token::Keyword && &self.source()[sp] == exp)
            .unwrap_or(false))
    }

    /// Returns `true` if the next token is equal to the provided one.
    fn is_next(&mut self, token: Token) -> Result<bool> {
        Ok(self.peek()?.map(|(tk, _)| tk == token).unwrap_or(false))
    }

    /// Returns a copy of the next token without affecting the result of the
    /// following `.next()` call.
    fn peek(&mut self) -> Result<Option<(Token, Span)>> {
        if let o @ None = &mut self.peeked {
            *o = Some(self.tokens.next()?);
        }
        Ok(self.peeked.flatten())
    }

    /// Returns the next token and span in the stream.
    fn next(&mut self) -> Result<Option<(Token, Span)>> {
        match self.peeked.take() {
            Some(v) => Ok(v),
            None => self.tokens.next(),
        }
    }

    fn tag(&self, kind: TagKind, begin: Span, end: Span) -> Tag {
        Tag {
            kind,
            span: begin.combine(end),
            trim_before: self.source()[begin].contains('~'),
            trim_after: self.source()[end].contains('~'),
        }
    }

    fn source(&self) -> &'source str {
        self.tokens.source
    }

    fn err_unexpected_eof(&self, exp: impl Display) -> Error {
        let n = self.source().len();
        Error::syntax(format!("expected {exp}, found EOF"), self.source(), n..n)
    }

    fn err_unexpected_token(&self, exp: impl Display, got: Token, span: Span) -> Error {
        let got = got.human();
        Error::syntax(format!("expected {exp}, found {got}"), self.source(), span)
    }

    fn err_unexpected_keyword(&self, kw: impl Display, span: Span) -> Error {
        Error::syntax(format!("unexpected keyword `{kw}`"), self.source(), span)
    }

    fn err_block_helper_inline(&self, name: &str, span: Span) -> Error {
        Error::syntax(
            format!("`{name}` is a block helper, use `{{{{#{name} ...}}}}`"),
            self.source(),
            span,
        )
    }
}

/// Returns the identifier if the expression is a plain name that could refer
/// to a helper.
fn as_helper_name(expr: &ast::Expr) -> Option<ast::Ident> {
    match expr {
        ast::Expr::Path(ast::Path {
            root: ast::Root::Local,
            members,
            ..
        }) => match members.as_slice() {
            [member] if member.key == member.span => Some(ast::Ident { span: member.span }),
            _ => None,
        },
        _ => None,
    }
}

impl TagKind {
    /// Whether the tag is removed together with its line when it is the only
    /// thing on it.
    fn can_stand_alone(&self) -> bool {
        !matches!(self, Self::Expr(_))
    }
}

/// Applies whitespace control to the raw template around tags.
///
/// First, tags that are alone on their line (block, `else` and comment tags)
/// remove that whole line. Then `{{~` and `~}}` remove all whitespace before
/// and after the tag. Standalone detection always looks at the original text.
fn strip_whitespace(source: &str, pieces: &mut [Piece]) {
    let standalone: Vec<bool> = (0..pieces.len())
        .map(|i| is_standalone(source, pieces, i))
        .collect();

    for (i, standalone) in standalone.into_iter().enumerate() {
        if !standalone {
            continue;
        }
        if i > 0 {
            if let Piece::Raw(span) = &mut pieces[i - 1] {
                *span = strip_to_line_start(source, *span);
            }
        }
        if let Some(Piece::Raw(span)) = pieces.get_mut(i + 1) {
            *span = strip_through_newline(source, *span);
        }
    }

    for i in 0..pieces.len() {
        let (trim_before, trim_after) = match &pieces[i] {
            Piece::Tag(tag) => (tag.trim_before, tag.trim_after),
            Piece::Raw(_) => continue,
        };
        if trim_before && i > 0 {
            if let Piece::Raw(span) = &mut pieces[i - 1] {
                let text = &source[*span];
                span.n = span.m + text.trim_end().len();
            }
        }
        if trim_after {
            if let Some(Piece::Raw(span)) = pieces.get_mut(i + 1) {
                let text = &source[*span];
                span.m += text.len() - text.trim_start().len();
            }
        }
    }
}

fn is_standalone(source: &str, pieces: &[Piece], i: usize) -> bool {
    match &pieces[i] {
        Piece::Tag(tag) if tag.kind.can_stand_alone() => {}
        _ => return false,
    }

    let before = match i.checked_sub(1) {
        None => true,
        Some(j) => match &pieces[j] {
            Piece::Raw(span) => {
                let text = &source[*span];
                match text.rfind('\n') {
                    Some(p) => is_blank(&text[p + 1..]),
                    None => j == 0 && is_blank(text),
                }
            }
            Piece::Tag(_) => false,
        },
    };

    let after = match pieces.get(i + 1) {
        None => true,
        Some(Piece::Raw(span)) => {
            let rest = source[*span].trim_start_matches([' ', '\t']);
            rest.starts_with('\n')
                || rest.starts_with("\r\n")
                || (rest.is_empty() && i + 2 == pieces.len())
        }
        Some(Piece::Tag(_)) => false,
    };

    before && after
}

/// Removes the blanks after the last newline.
fn strip_to_line_start(source: &str, span: Span) -> Span {
    let n = match source[span].rfind('\n') {
        Some(p) => span.m + p + 1,
        None => span.m,
    };
    Span { m: span.m, n }
}

/// Removes the blanks up to and including the first newline.
fn strip_through_newline(source: &str, span: Span) -> Span {
    let text = &source[span];
    let blanks = text.len() - text.trim_start_matches([' ', '\t']).len();
    let rest = &text[blanks..];
    let m = if rest.starts_with("\r\n") {
        span.m + blanks + 2
    } else if rest.starts_with('\n') {
        span.m + blanks + 1
    } else {
        span.m + blanks
    };
    Span { m, n: span.n }
}

fn is_blank(s: &str) -> bool {
    s.chars().all(|c| matches!(c, ' ' | '\t'))
}
