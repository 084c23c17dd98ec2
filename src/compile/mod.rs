//! Compile the template into a program that can be executed by the renderer.
//!
//! This process has three stages:
//! - The lexer chunks the template source into tokens.
//! - The parser constructs an AST from the token stream and applies
//!   whitespace control.
//! - The compiler takes the AST and constructs the program.

mod lex;
mod parse;

use crate::types::ast;
use crate::types::program::{Instr, Template, FIXME};
use crate::{Engine, Result};

/// Compile a template into a program.
pub fn template<'source>(engine: &Engine, source: &'source str) -> Result<Template<'source>> {
    let ast = parse::Parser::new(engine, source).parse_template()?;
    let template = Compiler::new().compile_template(source, ast);
    log::debug!("compiled template into {} instructions", template.instrs.len());
    Ok(template)
}

/// A compiler that constructs a program from an AST.
struct Compiler {
    instrs: Vec<Instr>,
}

impl Compiler {
    fn new() -> Self {
        Self { instrs: Vec::new() }
    }

    fn compile_template<'source>(
        mut self,
        source: &'source str,
        template: ast::Template,
    ) -> Template<'source> {
        self.compile_scope(template.scope);
        Template {
            source,
            instrs: self.instrs,
        }
    }

    fn compile_scope(&mut self, scope: ast::Scope) {
        for stmt in scope.stmts {
            self.compile_stmt(stmt);
        }
    }

    fn compile_stmt(&mut self, stmt: ast::Stmt) {
        match stmt {
            ast::Stmt::Raw(raw) => {
                self.push(Instr::EmitRaw(raw));
            }

            ast::Stmt::InlineExpr(ast::InlineExpr { expr, span }) => {
                self.compile_expr(expr);
                self.push(Instr::Emit(span));
            }

            ast::Stmt::Block(ast::Block {
                kind,
                args,
                params,
                then_branch,
                else_branch,
                ..
            }) => match kind {
                ast::BlockKind::If | ast::BlockKind::Unless | ast::BlockKind::Helper(_) => {
                    let argc = args.len();
                    self.compile_args(args);
                    let instr = match kind {
                        ast::BlockKind::Unless => Instr::JumpIfTrue(FIXME),
                        ast::BlockKind::Helper(name) => {
                            self.push(Instr::CallBlock(name, argc));
                            Instr::JumpIfFalse(FIXME)
                        }
                        _ => Instr::JumpIfFalse(FIXME),
                    };
                    let j = self.push(instr);
                    self.compile_scope(then_branch);
                    self.compile_else(j, else_branch);
                }

                ast::BlockKind::Each => {
                    self.compile_args(args);
                    let j = self.push(Instr::LoopStart(params, FIXME));
                    let k = self.push(Instr::LoopNext(FIXME));
                    self.compile_scope(then_branch);
                    self.push(Instr::Jump(k));
                    self.update_jump(k);
                    self.compile_else(j, else_branch);
                }

                ast::BlockKind::With => {
                    self.compile_args(args);
                    let j = self.push(Instr::WithStart(params, FIXME));
                    self.compile_scope(then_branch);
                    self.push(Instr::WithEnd);
                    self.compile_else(j, else_branch);
                }
            },
        }
    }

    /// Compiles the optional else branch of a block whose condition jumps to
    /// `j` when it does not hold.
    fn compile_else(&mut self, j: usize, else_branch: Option<ast::Scope>) {
        match else_branch {
            Some(else_branch) => {
                let j2 = self.push(Instr::Jump(FIXME));
                self.update_jump(j);
                self.compile_scope(else_branch);
                self.update_jump(j2);
            }
            None => {
                self.update_jump(j);
            }
        }
    }

    fn compile_args(&mut self, args: Vec<ast::Expr>) {
        for arg in args {
            self.compile_expr(arg);
        }
    }

    fn compile_expr(&mut self, expr: ast::Expr) {
        match expr {
            ast::Expr::Path(path) => {
                self.push(Instr::ExprStart(path));
            }

            ast::Expr::Literal(ast::Literal { value, .. }) => {
                self.push(Instr::ExprStartLit(value));
            }

            ast::Expr::Call(ast::Call { name, args, .. }) => {
                let argc = args.len();
                self.compile_args(args);
                self.push(Instr::Call(name, argc));
            }
        }
    }

    fn update_jump(&mut self, i: usize) {
        let n = self.instrs.len();
        let j = match &mut self.instrs[i] {
            Instr::Jump(j)
            | Instr::JumpIfTrue(j)
            | Instr::JumpIfFalse(j)
            | Instr::LoopStart(_, j)
            | Instr::LoopNext(j)
            | Instr::WithStart(_, j) => j,
            _ => panic!("not a jump instr"),
        };
        *j = n;
    }

    fn push(&mut self, instr: Instr) -> usize {
        let i = self.instrs.len();
        self.instrs.push(instr);
        i
    }
}
