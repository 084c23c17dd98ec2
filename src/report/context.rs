//! Shapes form data into the context that templates are rendered with.

use crate::helpers::format_date;
use crate::report::data::{ParagraphData, ReportData};
use crate::report::{ParagraphKind, ReportKind};
use crate::{to_value, Map, Result, Value};

/// Prepares the context for a report.
///
/// The event date is formatted as prose, the remaining fields depend on the
/// kind of report.
pub fn report(kind: ReportKind, data: &ReportData) -> Result<Value> {
    let mut ctx = into_map(to_value(&data.base)?);
    format_field(&mut ctx, "eventDate");

    match kind {
        ReportKind::PrimaryOrder => {
            let opjs = match to_value(&data.other_opjs)? {
                Value::List(list) => list
                    .into_iter()
                    .map(|opj| {
                        let mut opj = into_map(opj);
                        format_field(&mut opj, "opjDate");
                        Value::Map(opj)
                    })
                    .collect(),
                _ => Vec::new(),
            };
            ctx.insert("otherOpjs".into(), Value::List(opjs));
        }
        ReportKind::TrafficAuthority => {}
        ReportKind::Penitentiary => {
            let name = data.penitentiary_name.clone().unwrap_or_default();
            ctx.insert("penitentiaryName".into(), Value::from(name));
        }
    }

    Ok(Value::Map(ctx))
}

/// Prepares the context for a paragraph.
pub fn paragraph(kind: ParagraphKind, data: &ParagraphData) -> Result<Value> {
    let mut ctx = Map::new();
    ctx.insert(
        "additionalAccused".into(),
        to_value(&data.additional_accused)?,
    );
    if kind == ParagraphKind::Ani {
        let answer = data.official_answer_query.clone().unwrap_or_default();
        ctx.insert("officialAnswerQuery".into(), Value::from(answer));
    }
    Ok(Value::Map(ctx))
}

fn into_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Map(map) => map,
        _ => Map::new(),
    }
}

/// Replaces a date field with its prose form.
fn format_field(map: &mut Map<String, Value>, key: &str) {
    let formatted = format_date(map.get(key).unwrap_or(&Value::None));
    map.insert(key.to_owned(), Value::from(formatted));
}
