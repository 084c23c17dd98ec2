//! Counting folios for attachments.

use crate::Value;

/// The number of entries that fit on a single folio by default.
pub const DEFAULT_ITEMS_PER_FOLIO: f64 = 5.0;

/// Returns the number of folios needed for the entries of a list.
///
/// There is always at least one folio. A missing, non-numeric or non-positive
/// `items_per_folio` falls back to [`DEFAULT_ITEMS_PER_FOLIO`].
///
/// ```
/// use plantilla::{helpers, Value};
///
/// let list = Value::from(vec![1; 11]);
/// assert_eq!(helpers::calculate_folios(&list, &Value::None), 3);
/// assert_eq!(helpers::calculate_folios(&list, &Value::from("4")), 3);
/// ```
pub fn calculate_folios(list: &Value, items_per_folio: &Value) -> i64 {
    let len = list.as_list().map_or(0, <[Value]>::len) as f64;
    let per = items_per_folio_or_default(items_per_folio);
    if len == 0.0 || len < per {
        return 1;
    }
    (len / per).ceil() as i64
}

fn items_per_folio_or_default(value: &Value) -> f64 {
    let n = match value {
        Value::Integer(n) => *n as f64,
        Value::Float(n) => *n,
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    };
    if n.is_finite() && n > 0.0 {
        n
    } else {
        DEFAULT_ITEMS_PER_FOLIO
    }
}
