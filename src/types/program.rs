//! Defines a compiled [`Template`] which is a sequence of [`Instr`] that can be
//! executed by the renderer.

use crate::types::ast;
use crate::types::span::Span;
use crate::Value;

pub const FIXME: usize = !0;

pub struct Template<'source> {
    pub source: &'source str,
    pub instrs: Vec<Instr>,
}

#[cfg_attr(internal_debug, derive(Debug))]
pub enum Instr {
    /// Jump to an instruction
    Jump(usize),

    /// Jump to the instruction if the current expression is truthy
    JumpIfTrue(usize),

    /// Jump to the instruction if the current expression is falsy
    JumpIfFalse(usize),

    /// Emit raw template
    EmitRaw(Span),

    /// Emit the current expression
    Emit(Span),

    /// Lookup a path and push it as the current expression
    ExprStart(ast::Path),

    /// Push a literal as the current expression
    ExprStartLit(Value),

    /// Pop the given number of arguments, call the inline helper and push the
    /// result
    Call(ast::Ident, usize),

    /// Pop the given number of arguments, call the block helper and push
    /// whether the "then" branch should be rendered
    CallBlock(ast::Ident, usize),

    /// Start a loop over the current expression, or jump to the instruction if
    /// there is nothing to iterate over
    LoopStart(Vec<ast::Ident>, usize),

    /// Advance the loop, or jump to the instruction if it is exhausted
    LoopNext(usize),

    /// Rescope to the current expression, or jump to the instruction if it is
    /// empty
    WithStart(Vec<ast::Ident>, usize),

    /// Remove the scope added by `WithStart`
    WithEnd,
}

impl std::fmt::Debug for Template<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("<compiled>")
    }
}
