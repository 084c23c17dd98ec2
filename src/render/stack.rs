use crate::render::iter::LoopState;
use crate::render::value::lookup_members;
use crate::types::ast;
use crate::value::ValueCow;
use crate::Value;

/// The contexts that are in scope while rendering.
///
/// The root context is always present, each `each` and `with` block pushes a
/// frame that changes the current context and may introduce block parameters.
pub struct Stack<'a> {
    root: ValueCow<'a>,
    frames: Vec<State<'a>>,
}

pub enum State<'a> {
    /// The current state of an `each` loop
    Loop {
        state: LoopState<'a>,
        params: &'a [ast::Ident],
    },

    /// The value of a `with` block
    With {
        value: ValueCow<'a>,
        params: &'a [ast::Ident],
    },
}

impl<'a> Stack<'a> {
    pub fn new(root: ValueCow<'a>) -> Self {
        Self {
            root,
            frames: Vec::new(),
        }
    }

    /// Resolves a path against the stack.
    ///
    /// Missing values resolve to `Value::None`.
    pub fn lookup(&self, source: &str, path: &ast::Path) -> ValueCow<'a> {
        match &path.root {
            ast::Root::Local => {
                if let Some((first, rest)) = path.members.split_first() {
                    if let Some(value) = self.lookup_param(source, &source[first.key], rest) {
                        return value;
                    }
                }
                self.lookup_context(source, 0, &path.members)
            }
            ast::Root::This => self.lookup_context(source, 0, &path.members),
            ast::Root::Parent(depth) => self.lookup_context(source, *depth, &path.members),
            ast::Root::Global => lookup_members(source, &self.root, &path.members),
            ast::Root::Data(name) => {
                let value = self
                    .frames
                    .iter()
                    .rev()
                    .find_map(|frame| match frame {
                        State::Loop { state, .. } => Some(state),
                        State::With { .. } => None,
                    })
                    .and_then(|state| state.data(&source[name.span]))
                    .unwrap_or_default();
                lookup_members(source, &ValueCow::Owned(value), &path.members)
            }
        }
    }

    /// Looks up a block parameter by name, innermost block first.
    fn lookup_param(
        &self,
        source: &str,
        name: &str,
        rest: &[ast::Member],
    ) -> Option<ValueCow<'a>> {
        let is = |param: Option<&ast::Ident>| param.is_some_and(|p| &source[p.span] == name);

        for frame in self.frames.iter().rev() {
            match frame {
                State::Loop { state, params } => {
                    if is(params.first()) {
                        let item = state.item()?;
                        return Some(lookup_members(source, item, rest));
                    }
                    if is(params.get(1)) {
                        let key = ValueCow::Owned(state.data("key").unwrap_or_default());
                        return Some(lookup_members(source, &key, rest));
                    }
                }
                State::With { value, params } => {
                    if is(params.first()) {
                        return Some(lookup_members(source, value, rest));
                    }
                }
            }
        }
        None
    }

    fn lookup_context(&self, source: &str, depth: usize, members: &[ast::Member]) -> ValueCow<'a> {
        match self.context(depth) {
            Some(value) => lookup_members(source, value, members),
            None => ValueCow::Owned(Value::None),
        }
    }

    /// Returns the context the given number of levels up from the current one.
    fn context(&self, depth: usize) -> Option<&ValueCow<'a>> {
        let mut depth = depth;
        for frame in self.frames.iter().rev() {
            if depth == 0 {
                return match frame {
                    State::Loop { state, .. } => state.item(),
                    State::With { value, .. } => Some(value),
                };
            }
            depth -= 1;
        }
        (depth == 0).then_some(&self.root)
    }

    pub fn push(&mut self, state: State<'a>) {
        self.frames.push(state);
    }

    pub fn last_loop_state_mut(&mut self) -> &mut LoopState<'a> {
        match self.frames.last_mut().unwrap() {
            State::Loop { state, .. } => state,
            _ => panic!("expected loop state"),
        }
    }

    pub fn pop_loop_state(&mut self) -> LoopState<'a> {
        match self.frames.pop().unwrap() {
            State::Loop { state, .. } => state,
            _ => panic!("expected loop state"),
        }
    }

    pub fn pop_with(&mut self) -> ValueCow<'a> {
        match self.frames.pop().unwrap() {
            State::With { value, .. } => value,
            _ => panic!("expected with value"),
        }
    }
}
