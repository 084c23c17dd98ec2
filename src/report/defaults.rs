//! The built-in templates.

use serde::{Deserialize, Serialize};

use crate::report::{ParagraphKind, ReportKind};

/// Identifies one of the editable templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TemplateKey {
    #[serde(rename = "sijinReportTemplate")]
    Sijin,
    #[serde(rename = "dattReportTemplate")]
    Datt,
    #[serde(rename = "inpecReportTemplate")]
    Inpec,
    #[serde(rename = "webServiceParagraphTemplate")]
    WebService,
    #[serde(rename = "aniParagraphTemplate")]
    Ani,
}

impl TemplateKey {
    pub const ALL: [TemplateKey; 5] = [
        Self::Sijin,
        Self::Datt,
        Self::Inpec,
        Self::WebService,
        Self::Ani,
    ];

    /// The name the template is persisted under.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sijin => "sijinReportTemplate",
            Self::Datt => "dattReportTemplate",
            Self::Inpec => "inpecReportTemplate",
            Self::WebService => "webServiceParagraphTemplate",
            Self::Ani => "aniParagraphTemplate",
        }
    }
}

impl From<ReportKind> for TemplateKey {
    fn from(kind: ReportKind) -> Self {
        match kind {
            ReportKind::PrimaryOrder => Self::Sijin,
            ReportKind::TrafficAuthority => Self::Datt,
            ReportKind::Penitentiary => Self::Inpec,
        }
    }
}

impl From<ParagraphKind> for TemplateKey {
    fn from(kind: ParagraphKind) -> Self {
        match kind {
            ParagraphKind::WebService => Self::WebService,
            ParagraphKind::Ani => Self::Ani,
        }
    }
}

/// Returns the built-in template for the given key.
pub fn default_template(key: TemplateKey) -> &'static str {
    match key {
        TemplateKey::Sijin => include_str!("../../templates/opj_sijin.hbs"),
        TemplateKey::Datt => include_str!("../../templates/datt.hbs"),
        TemplateKey::Inpec => include_str!("../../templates/inpec.hbs"),
        TemplateKey::WebService => include_str!("../../templates/web_service.hbs"),
        TemplateKey::Ani => include_str!("../../templates/ani.hbs"),
    }
}
