//! Helpers that work on lists of entries.

use std::borrow::Cow;

use crate::Value;

/// Returns the length of a list, or zero for anything else.
pub fn array_length(value: &Value) -> usize {
    value.as_list().map_or(0, <[Value]>::len)
}

/// Joins the items of a list into a sentence.
///
/// Map items are replaced by their `property` when one is given. With a
/// conjunction the last two items are joined by it instead of the separator,
/// which defaults to `", "`.
///
/// ```
/// use plantilla::{helpers, value, Value};
///
/// let list = value! { l: [{ name: "Ana" }, { name: "Luis" }, { name: "Eva" }] };
/// let list = list.get("l").unwrap();
/// let s = helpers::join(list, &Value::from("name"), &Value::None, &Value::from("y"));
/// assert_eq!(s, "Ana, Luis y Eva");
/// ```
pub fn join(list: &Value, property: &Value, separator: &Value, conjunction: &Value) -> String {
    let list = match list.as_list() {
        Some(list) if !list.is_empty() => list,
        _ => return String::new(),
    };

    let property = property.as_str().filter(|p| !p.is_empty());
    let items: Vec<String> = list
        .iter()
        .map(|item| match (item, property) {
            (Value::Map(map), Some(p)) => map.get(p).map(Value::to_string).unwrap_or_default(),
            (item, _) => item.to_string(),
        })
        .collect();

    let separator = match separator {
        Value::None => Cow::Borrowed(", "),
        sep => Cow::Owned(sep.to_string()),
    };
    let conjunction = conjunction.is_truthy().then(|| conjunction.to_string());

    match (items.as_slice(), conjunction) {
        ([only], _) => only.clone(),
        ([init @ .., last], Some(conj)) => format!("{} {conj} {last}", init.join(&*separator)),
        (items, _) => items.join(&*separator),
    }
}

/// Returns the entries of the list whose `queryResult` equals `result`.
///
/// Order is preserved, anything that is not a list yields an empty list.
pub fn filter_by_query_result(list: &Value, result: &Value) -> Vec<Value> {
    let list = match list.as_list() {
        Some(list) => list,
        None => return Vec::new(),
    };
    list.iter()
        .filter(|item| matches!(item, Value::Map(_)))
        .filter(|item| item.get("queryResult").unwrap_or(&Value::None) == result)
        .cloned()
        .collect()
}

/// Returns the entries of the list with a positive query result.
pub fn filter_positive(list: &Value) -> Vec<Value> {
    filter_by_query_result(list, &Value::from("Positivo"))
}
