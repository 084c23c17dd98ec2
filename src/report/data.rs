//! Form data for reports and paragraphs.
//!
//! All fields are defaulted so that partially filled forms deserialize.

use serde::{Deserialize, Serialize};

/// The fields shared by every report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BaseReportData {
    /// The date of the event, `YYYY-MM-DD` or `DD/MM/YYYY`.
    pub event_date: String,
    pub event_municipality: String,
    pub event_address: String,
    pub event_modality: String,
    /// The rank of the official that signed the executive report.
    pub official_rank: String,
    /// The name of the official that signed the executive report.
    pub official_report: String,
}

/// An additional work order (OPJ) related to the case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OtherOrderEntry {
    pub id: String,
    pub opj_date: String,
    pub opj_number: String,
    pub officer_name: String,
}

/// The data of any report.
///
/// Fields that do not apply to a [`ReportKind`][super::ReportKind] are
/// ignored when preparing its context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportData {
    #[serde(flatten)]
    pub base: BaseReportData,
    pub other_opjs: Vec<OtherOrderEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub penitentiary_name: Option<String>,
}

/// The outcome of an identity query for an accused person.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryResult {
    Positivo,
    Negativo,
    #[default]
    #[serde(rename = "")]
    Unspecified,
}

/// An additional accused person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdditionalAccusedEntry {
    pub id: String,
    pub accused_name: String,
    pub identification_number: String,
    pub query_result: QueryResult,
}

/// The data of any paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParagraphData {
    pub additional_accused: Vec<AdditionalAccusedEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub official_answer_query: Option<String>,
}
