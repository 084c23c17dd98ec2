//! AST representing a template.

use crate::types::span::Span;
use crate::Value;

#[cfg_attr(internal_debug, derive(Debug))]
pub struct Template {
    pub scope: Scope,
}

#[cfg_attr(internal_debug, derive(Debug))]
pub struct Scope {
    pub stmts: Vec<Stmt>,
}

#[cfg_attr(internal_debug, derive(Debug))]
pub enum Stmt {
    Raw(Span),
    InlineExpr(InlineExpr),
    Block(Block),
}

#[cfg_attr(internal_debug, derive(Debug))]
pub struct InlineExpr {
    pub expr: Expr,
    pub span: Span,
}

/// A block like `{{#each otherOpjs as |opj|}} ... {{else}} ... {{/each}}`.
#[cfg_attr(internal_debug, derive(Debug))]
pub struct Block {
    pub kind: BlockKind,
    pub args: Vec<Expr>,
    pub params: Vec<Ident>,
    pub then_branch: Scope,
    pub else_branch: Option<Scope>,
    pub span: Span,
}

#[derive(Clone, Copy)]
#[cfg_attr(internal_debug, derive(Debug))]
pub enum BlockKind {
    If,
    Unless,
    Each,
    With,
    /// A registered block helper, e.g. `isCartagena`.
    Helper(Ident),
}

#[cfg_attr(internal_debug, derive(Debug))]
pub enum Expr {
    Path(Path),
    Literal(Literal),
    Call(Call),
}

/// A helper call, either the whole tag `{{formatId x}}` or a subexpression
/// `(formatId x)`.
#[cfg_attr(internal_debug, derive(Debug))]
pub struct Call {
    pub name: Ident,
    pub args: Vec<Expr>,
    pub span: Span,
}

#[cfg_attr(internal_debug, derive(Debug))]
pub struct Path {
    pub root: Root,
    pub members: Vec<Member>,
    pub span: Span,
}

/// Where the lookup of a path starts.
#[cfg_attr(internal_debug, derive(Debug))]
pub enum Root {
    /// `name.rest`, a block parameter or the current context.
    Local,
    /// `this`, `this.rest` or `.`
    This,
    /// `../rest`, the context the given number of levels up.
    Parent(usize),
    /// `@root.rest`
    Global,
    /// `@index`, `@first`, `@last` or `@key`.
    Data(Ident),
}

/// A single segment of a path.
#[derive(Clone, Copy)]
#[cfg_attr(internal_debug, derive(Debug))]
pub struct Member {
    /// The key without any surrounding brackets.
    pub key: Span,
    pub span: Span,
}

#[derive(Clone, Copy)]
#[cfg_attr(internal_debug, derive(Debug))]
pub struct Ident {
    pub span: Span,
}

#[cfg_attr(internal_debug, derive(Debug))]
pub struct Literal {
    pub value: Value,
    pub span: Span,
}

impl Scope {
    pub const fn new() -> Self {
        Self { stmts: Vec::new() }
    }
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Self::Path(path) => path.span,
            Self::Literal(lit) => lit.span,
            Self::Call(call) => call.span,
        }
    }
}

impl BlockKind {
    /// The name that must appear in the closing tag.
    pub fn name<'a>(&self, source: &'a str) -> &'a str {
        match self {
            Self::If => "if",
            Self::Unless => "unless",
            Self::Each => "each",
            Self::With => "with",
            Self::Helper(name) => &source[name.span],
        }
    }
}
