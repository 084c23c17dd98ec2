//! Spanish (Colombia) text formatting for dates and identification numbers.

use crate::Value;

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Formats a `YYYY-MM-DD` or `DD/MM/YYYY` date as Spanish prose.
///
/// Empty values format as `N/A`. Anything that cannot be parsed as a date is
/// returned unchanged.
///
/// ```
/// use plantilla::{helpers, Value};
///
/// assert_eq!(helpers::format_date(&Value::from("2024-07-15")), "15 de julio de 2024");
/// assert_eq!(helpers::format_date(&Value::from("15/07/2024")), "15 de julio de 2024");
/// assert_eq!(helpers::format_date(&Value::from("ayer")), "ayer");
/// assert_eq!(helpers::format_date(&Value::None), "N/A");
/// ```
pub fn format_date(value: &Value) -> String {
    if !value.is_truthy() {
        return "N/A".to_owned();
    }
    let s = match value.as_str() {
        Some(s) => s,
        None => return value.to_string(),
    };
    match parse_date(s) {
        Some((day, month, year)) => format!("{day} de {} de {year}", MONTHS[month - 1]),
        None => {
            log::debug!("could not parse date {s:?}, leaving it unchanged");
            s.to_owned()
        }
    }
}

/// Parses a date into its day, month and year.
fn parse_date(s: &str) -> Option<(i64, usize, i64)> {
    let (day, month, year) = if s.contains('/') {
        let [d, m, y] = split3(s, '/')?;
        (d, m, y)
    } else if s.contains('-') {
        let [y, m, d] = split3(s, '-')?;
        (d, m, y)
    } else {
        return None;
    };

    let day = parse_int(day)?;
    let month = parse_int(month)?;
    let year = parse_int(year)?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    Some((day, month as usize, year))
}

fn split3(s: &str, sep: char) -> Option<[&str; 3]> {
    let mut parts = s.split(sep);
    let three = [parts.next()?, parts.next()?, parts.next()?];
    parts.next().is_none().then_some(three)
}

/// Parses the leading integer of a string.
///
/// Leading whitespace and a sign are allowed, anything after the digits is
/// ignored, so `"15T00:00"` parses as 15.
fn parse_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (neg, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let n: i64 = rest[..end].parse().ok()?;
    Some(if neg { -n } else { n })
}

/// Formats an identification number with `.` thousands separators.
///
/// Every non-digit character is removed first. Non-strings and empty strings
/// format as the empty string, strings without any digits are returned
/// unchanged.
///
/// ```
/// use plantilla::{helpers, Value};
///
/// assert_eq!(helpers::format_id(&Value::from("1234567890")), "1.234.567.890");
/// assert_eq!(helpers::format_id(&Value::from("CC 00123")), "123");
/// assert_eq!(helpers::format_id(&Value::from(1234)), "");
/// ```
pub fn format_id(value: &Value) -> String {
    let s = match value.as_str() {
        Some(s) if !s.is_empty() => s,
        _ => return String::new(),
    };
    let digits: String = s.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        log::debug!("identification {s:?} has no digits, leaving it unchanged");
        return s.to_owned();
    }
    let digits = match digits.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Removes every `.` and `,` from an identification number.
///
/// Non-strings and empty strings format as the empty string.
pub fn id_no_dots(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.chars().filter(|c| !matches!(c, '.' | ',')).collect(),
        None => String::new(),
    }
}

/// Uppercases a string, anything else formats as the empty string.
pub fn to_upper_case(value: &Value) -> String {
    value.as_str().map(str::to_uppercase).unwrap_or_default()
}
