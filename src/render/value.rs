use crate::types::ast;
use crate::value::ValueCow;
use crate::Value;

/// Index the value with the given path members.
///
/// If the value is owned then only the edge value that we lookup is cloned.
pub fn lookup_members<'a>(
    source: &str,
    value: &ValueCow<'a>,
    members: &[ast::Member],
) -> ValueCow<'a> {
    match value {
        &ValueCow::Borrowed(v) => lookup_path(source, v, members),
        ValueCow::Owned(v) => ValueCow::Owned(lookup_path(source, v, members).into_owned()),
    }
}

fn lookup_path<'v>(source: &str, value: &'v Value, members: &[ast::Member]) -> ValueCow<'v> {
    let mut v = value;
    for (i, member) in members.iter().enumerate() {
        let key = &source[member.key];
        v = match lookup(v, key) {
            Some(next) => next,
            // `.length` is only available on the last member.
            None if key == "length" && i + 1 == members.len() => {
                return ValueCow::Owned(length(v));
            }
            None => return ValueCow::Owned(Value::None),
        };
    }
    ValueCow::Borrowed(v)
}

/// Index into the value with the given key.
fn lookup<'v>(value: &'v Value, key: &str) -> Option<&'v Value> {
    match value {
        Value::Map(map) => map.get(key),
        Value::List(list) => list.get(key.parse::<usize>().ok()?),
        _ => None,
    }
}

fn length(value: &Value) -> Value {
    match value {
        Value::List(list) => Value::from(list.len()),
        Value::String(s) => Value::from(s.chars().count()),
        _ => Value::None,
    }
}
