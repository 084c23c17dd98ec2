use std::fmt::Write;

use crate::helpers::{Args, Helper};
use crate::render::iter::LoopState;
use crate::render::stack::{Stack, State};
use crate::types::program::{Instr, Template};
use crate::value::ValueCow;
use crate::{Engine, Error, Result, Value};

pub struct RendererImpl<'a> {
    pub engine: &'a Engine,
    pub template: &'a Template<'a>,
    pub stack: Stack<'a>,
}

impl<'a> RendererImpl<'a> {
    pub fn render(mut self, f: &mut String) -> Result<()> {
        let t = self.template;

        // The expressions that we are building. Helper arguments are pushed in
        // order and popped all at once by the call.
        let mut exprs: Vec<ValueCow<'a>> = Vec::new();

        let mut pc = 0;
        while let Some(instr) = t.instrs.get(pc) {
            match instr {
                Instr::Jump(j) => {
                    pc = *j;
                    continue;
                }

                Instr::JumpIfTrue(j) => {
                    if exprs.pop().unwrap().is_truthy() {
                        pc = *j;
                        continue;
                    }
                }

                Instr::JumpIfFalse(j) => {
                    if !exprs.pop().unwrap().is_truthy() {
                        pc = *j;
                        continue;
                    }
                }

                Instr::EmitRaw(span) => {
                    f.push_str(&t.source[*span]);
                }

                Instr::Emit(span) => {
                    let value = exprs.pop().unwrap();
                    write!(f, "{}", &*value)
                        .map_err(|_| Error::render("failed to format value", t.source, *span))?;
                }

                Instr::ExprStart(path) => {
                    let value = self.stack.lookup(t.source, path);
                    exprs.push(value);
                }

                Instr::ExprStartLit(value) => {
                    exprs.push(ValueCow::Owned(value.clone()));
                }

                Instr::Call(name, argc) => {
                    let name_raw = &t.source[name.span];
                    let args = exprs.split_off(exprs.len() - argc);
                    let result = match self.engine.helpers().get(name_raw) {
                        Some(Helper::Inline(helper)) => helper(&to_args(&args)),
                        _ => {
                            return Err(Error::render(
                                format!("unknown helper `{name_raw}`"),
                                t.source,
                                name.span,
                            ));
                        }
                    };
                    exprs.push(ValueCow::Owned(result));
                }

                Instr::CallBlock(name, argc) => {
                    let name_raw = &t.source[name.span];
                    let args = exprs.split_off(exprs.len() - argc);
                    let result = match self.engine.helpers().get(name_raw) {
                        Some(Helper::Block(helper)) => helper(&to_args(&args)),
                        _ => {
                            return Err(Error::render(
                                format!("unknown block helper `{name_raw}`"),
                                t.source,
                                name.span,
                            ));
                        }
                    };
                    exprs.push(ValueCow::Owned(Value::Bool(result)));
                }

                Instr::LoopStart(params, j) => {
                    let iterable = exprs.pop().unwrap();
                    match LoopState::new(iterable) {
                        Some(state) => self.stack.push(State::Loop { state, params }),
                        None => {
                            pc = *j;
                            continue;
                        }
                    }
                }

                Instr::LoopNext(j) => {
                    if self.stack.last_loop_state_mut().iterate().is_none() {
                        self.stack.pop_loop_state();
                        pc = *j;
                        continue;
                    }
                }

                Instr::WithStart(params, j) => {
                    let value = exprs.pop().unwrap();
                    if value.is_empty() {
                        pc = *j;
                        continue;
                    }
                    self.stack.push(State::With { value, params });
                }

                Instr::WithEnd => {
                    self.stack.pop_with();
                }
            }
            pc += 1;
        }

        assert!(pc == t.instrs.len());
        assert!(exprs.is_empty(), "render bug: expressions left on the stack");
        Ok(())
    }
}

fn to_args<'v>(values: &'v [ValueCow<'_>]) -> Args<'v> {
    Args::new(values.iter().map(|v| &**v).collect())
}
