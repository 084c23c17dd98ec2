use std::fmt;
use std::fmt::Write;

use crate::Value;

/// Renders a value the way it appears in the template output.
///
/// - `None` and maps render nothing.
/// - Floats render without a trailing `.0`, and special values as `NaN`,
///   `Infinity` and `-Infinity`.
/// - Lists render their items joined by `,`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None | Value::Map(_) => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(n) => format_float(f, *n),
            Value::String(s) => f.write_str(s),
            Value::List(list) => {
                for (i, item) in list.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

fn format_float(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 {
        f.write_char('0')
    } else {
        write!(f, "{n}")
    }
}
