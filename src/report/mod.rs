//! Generates report and paragraph text from form data.
//!
//! ```
//! use plantilla::report::{default_template, Generator, ReportData, ReportKind, TemplateKey};
//!
//! let generator = Generator::new();
//! let mut data = ReportData::default();
//! data.base.event_date = "2024-03-02".into();
//! data.base.event_municipality = "Turbaco".into();
//!
//! let template = default_template(TemplateKey::Sijin);
//! let text = generator.render_report(ReportKind::PrimaryOrder, &data, template);
//! assert!(text.contains("2 de marzo de 2024"));
//! assert!(text.contains("En el Municipio de Turbaco."));
//! assert!(!text.contains("\n\n\n"));
//! ```

mod context;
mod data;
mod defaults;
mod store;

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub use crate::report::data::{
    AdditionalAccusedEntry, BaseReportData, OtherOrderEntry, ParagraphData, QueryResult,
    ReportData,
};
pub use crate::report::defaults::{default_template, TemplateKey};
pub use crate::report::store::TemplateStore;
use crate::{Engine, Helpers, Result};

/// The kind of report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportKind {
    /// A primary work order report (SIJIN), may list other work orders.
    #[serde(rename = "OPJ_SIJIN")]
    PrimaryOrder,
    /// A report for the traffic authority (DATT).
    #[serde(rename = "DATT")]
    TrafficAuthority,
    /// A report for the penitentiary institute (INPEC).
    #[serde(rename = "INPEC")]
    Penitentiary,
}

/// The kind of paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParagraphKind {
    /// The registry web service query.
    #[serde(rename = "WEB_SERVICE")]
    WebService,
    /// The identity archive (ANI) query.
    #[serde(rename = "ANI")]
    Ani,
}

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("BUG: invalid BLANK_LINES regex literal"));

/// Renders reports and paragraphs.
///
/// Reports are rendered with the [core][Helpers::core] helpers, paragraphs
/// with the [paragraph][Helpers::paragraphs] helpers.
#[derive(Debug)]
pub struct Generator {
    core: Engine,
    paragraphs: Engine,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    pub fn new() -> Self {
        Self {
            core: Engine::with_helpers(Helpers::core()),
            paragraphs: Engine::with_helpers(Helpers::paragraphs()),
        }
    }

    /// Renders a report.
    ///
    /// If the template fails to compile the whole text is replaced by a single
    /// line describing the error.
    pub fn render_report(&self, kind: ReportKind, data: &ReportData, template: &str) -> String {
        self.try_render_report(kind, data, template)
            .unwrap_or_else(|err| format!("Error al generar informe con Handlebars: {err}"))
    }

    /// Renders a report, returning any error.
    pub fn try_render_report(
        &self,
        kind: ReportKind,
        data: &ReportData,
        template: &str,
    ) -> Result<String> {
        let ctx = context::report(kind, data)?;
        let template = self.core.compile(template).inspect_err(|err| {
            log::warn!("failed to compile {kind:?} report template: {err}");
        })?;
        let text = template.render_from(&ctx)?;

        // Without other work orders their section leaves a gap behind.
        if kind == ReportKind::PrimaryOrder && data.other_opjs.is_empty() {
            if let Cow::Owned(collapsed) = BLANK_LINES.replace_all(&text, "\n\n") {
                return Ok(collapsed);
            }
        }
        Ok(text)
    }

    /// Renders a paragraph.
    ///
    /// If the template fails to compile the whole text is replaced by a single
    /// line describing the error.
    pub fn render_paragraph(
        &self,
        kind: ParagraphKind,
        data: &ParagraphData,
        template: &str,
    ) -> String {
        self.try_render_paragraph(kind, data, template)
            .unwrap_or_else(|err| format!("Error al generar párrafo con Handlebars: {err}"))
    }

    /// Renders a paragraph, returning any error.
    pub fn try_render_paragraph(
        &self,
        kind: ParagraphKind,
        data: &ParagraphData,
        template: &str,
    ) -> Result<String> {
        let ctx = context::paragraph(kind, data)?;
        let template = self.paragraphs.compile(template).inspect_err(|err| {
            log::warn!("failed to compile {kind:?} paragraph template: {err}");
        })?;
        template.render_from(&ctx)
    }
}
