use std::slice;

use crate::value::{btree_map, list, ValueCow};
use crate::Value;

/// The state of an `each` loop.
pub struct LoopState<'a> {
    iter: Iter<'a>,
    /// The total number of items.
    len: usize,
    /// The index of the current item.
    index: usize,
    /// The current map key, if any, and item.
    current: Option<(Option<String>, ValueCow<'a>)>,
}

enum Iter<'a> {
    ListBorrowed(slice::Iter<'a, Value>),
    ListOwned(list::IntoIter<Value>),
    MapBorrowed(btree_map::Iter<'a, String, Value>),
    MapOwned(btree_map::IntoIter<String, Value>),
}

impl<'a> LoopState<'a> {
    /// Starts a loop over the value.
    ///
    /// Returns `None` if the value is not a list or a map, or if it has no
    /// items.
    pub fn new(iterable: ValueCow<'a>) -> Option<Self> {
        let (iter, len) = match iterable {
            ValueCow::Borrowed(Value::List(list)) => (Iter::ListBorrowed(list.iter()), list.len()),
            ValueCow::Borrowed(Value::Map(map)) => (Iter::MapBorrowed(map.iter()), map.len()),
            ValueCow::Owned(Value::List(list)) => {
                let len = list.len();
                (Iter::ListOwned(list.into_iter()), len)
            }
            ValueCow::Owned(Value::Map(map)) => {
                let len = map.len();
                (Iter::MapOwned(map.into_iter()), len)
            }
            _ => return None,
        };
        if len == 0 {
            return None;
        }
        Some(Self {
            iter,
            len,
            index: 0,
            current: None,
        })
    }

    /// Advances to the next item, returns `None` when the loop is exhausted.
    pub fn iterate(&mut self) -> Option<()> {
        let next = match &mut self.iter {
            Iter::ListBorrowed(iter) => (None, ValueCow::Borrowed(iter.next()?)),
            Iter::ListOwned(iter) => (None, ValueCow::Owned(iter.next()?)),
            Iter::MapBorrowed(iter) => {
                let (k, v) = iter.next()?;
                (Some(k.clone()), ValueCow::Borrowed(v))
            }
            Iter::MapOwned(iter) => {
                let (k, v) = iter.next()?;
                (Some(k), ValueCow::Owned(v))
            }
        };
        if self.current.is_some() {
            self.index += 1;
        }
        self.current = Some(next);
        Some(())
    }

    /// Returns the current item.
    pub fn item(&self) -> Option<&ValueCow<'a>> {
        self.current.as_ref().map(|(_, item)| item)
    }

    /// Returns the value of a data variable like `@index`.
    ///
    /// For lists `@key` is the same as `@index`.
    pub fn data(&self, name: &str) -> Option<Value> {
        let (key, _) = self.current.as_ref()?;
        let index = self.index as i64;
        match name {
            "index" => Some(Value::Integer(index)),
            "first" => Some(Value::Bool(self.index == 0)),
            "last" => Some(Value::Bool(self.index + 1 == self.len)),
            "key" => match key {
                Some(key) => Some(Value::String(key.clone())),
                None => Some(Value::Integer(index)),
            },
            _ => None,
        }
    }
}
