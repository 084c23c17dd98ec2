//! A handlebars-compatible template engine for case reports.
//!
//! # Features
//!
//! ### Syntax
//!
//! - Expressions: `{{ eventMunicipality }}`, `{{{ raw }}}`, `{{& raw }}`
//! - Helper calls: `{{ formatId accused.identificationNumber }}`
//! - Subexpressions: `{{ calculateFolios (filterByQueryResult xs "Positivo") 1 }}`
//! - Conditionals: `{{#if otherOpjs}} ... {{else}} ... {{/if}}`, `{{#unless}}`
//! - Loops: `{{#each otherOpjs as |opj|}} {{@index}} {{opj.opjNumber}} {{/each}}`
//! - Scoping: `{{#with additionalAccused.[0] as |accused|}} ... {{/with}}`
//! - Block helpers: `{{#isCartagena eventMunicipality}} ... {{/isCartagena}}`
//! - Comments and whitespace control: `{{! note }}`, `{{~ trimmed ~}}`
//!
//! ### Engine
//!
//! - Render using any [`serde`] serializable values
//! - A library of helpers for Spanish (Colombia) reports, see [`helpers`]
//! - Report and paragraph generation with built-in default templates, see
//!   [`report`]
//! - Convenient macro for quick rendering:
//!   `plantilla::value!{ eventMunicipality: "Cartagena" }`
//!
//! # Getting started
//!
//! Your entry point is the [`Engine`] struct. The engine stores the helper
//! functions. Generally, you only need to construct one engine during the
//! lifetime of a program.
//!
//! ```
//! let engine = plantilla::Engine::new();
//! ```
//!
//! Next, [`.compile`][Engine::compile] is used to compile a template and
//! [`.render`][Template::render] renders it.
//!
//! ```
//! # let engine = plantilla::Engine::new();
//! let template = engine.compile("Hechos del {{formatDate eventDate}}")?;
//! let result = template.render(plantilla::value!{ eventDate: "2024-03-02" })?;
//! assert_eq!(result, "Hechos del 2 de marzo de 2024");
//! # Ok::<(), plantilla::Error>(())
//! ```
//!
//! # Examples
//!
//! ### Render using structured data
//!
//! Here is the same example as above except using derived data.
//!
//! ```
//! #[derive(serde::Serialize)]
//! #[serde(rename_all = "camelCase")]
//! struct Context { event_date: String }
//!
//! let ctx = Context { event_date: "15/07/2024".into() };
//!
//! let result = plantilla::Engine::new()
//!     .compile("Hechos del {{formatDate eventDate}}")?
//!     .render(&ctx)?;
//!
//! assert_eq!(result, "Hechos del 15 de julio de 2024");
//! # Ok::<(), plantilla::Error>(())
//! ```
//!
//! ### Add a custom helper
//!
//! ```
//! use plantilla::{Engine, Helpers, Value};
//!
//! let mut helpers = Helpers::core();
//! helpers.add_inline("shout", |args| {
//!     Value::from(format!("{}!", args.get(0)))
//! });
//!
//! let result = Engine::with_helpers(helpers)
//!     .compile("{{shout (toUpperCase name)}}")?
//!     .render(plantilla::value! { name: "hola" })?;
//!
//! assert_eq!(result, "HOLA!");
//! # Ok::<(), plantilla::Error>(())
//! ```
//!
//! ### Generate a report
//!
//! ```
//! use plantilla::report::{Generator, ReportData, ReportKind};
//!
//! let generator = Generator::new();
//! let mut data = ReportData::default();
//! data.base.event_date = "2024-03-02".into();
//!
//! let text = generator.render_report(ReportKind::TrafficAuthority, &data, "El {{eventDate}}.");
//! assert_eq!(text, "El 2 de marzo de 2024.");
//! ```

#[macro_use]
mod macros;

mod compile;
mod error;
pub mod helpers;
mod render;
pub mod report;
mod types;
mod value;

use std::fmt;

pub use crate::error::Error;
pub use crate::helpers::{Args, HelperKind, Helpers};
pub use crate::value::{to_value, List, Map, Value};

use crate::types::program;
use crate::value::ValueCow;

/// A type alias for results in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The compilation and rendering engine.
pub struct Engine {
    helpers: Helpers,
}

/// A compiled template.
pub struct Template<'engine, 'source> {
    engine: &'engine Engine,
    template: program::Template<'source>,
}

impl Default for Engine {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Construct a new engine with the [core][Helpers::core] helpers.
    #[inline]
    pub fn new() -> Self {
        Self::with_helpers(Helpers::core())
    }

    /// Construct a new engine with the given helpers.
    ///
    /// # Examples
    ///
    /// ```
    /// use plantilla::{Engine, Helpers};
    ///
    /// let engine = Engine::with_helpers(Helpers::paragraphs());
    /// ```
    #[inline]
    pub fn with_helpers(helpers: Helpers) -> Self {
        Self { helpers }
    }

    /// Returns the helpers available to templates compiled by this engine.
    #[inline]
    pub fn helpers(&self) -> &Helpers {
        &self.helpers
    }

    /// Compile a template.
    ///
    /// Syntax errors and references to unknown helpers are reported here,
    /// rendering a compiled template only fails if the context cannot be
    /// serialized.
    #[inline]
    pub fn compile<'source>(&self, source: &'source str) -> Result<Template<'_, 'source>> {
        let template = compile::template(self, source)?;
        Ok(Template {
            engine: self,
            template,
        })
    }

    /// Compile and render a template in one go.
    #[inline]
    pub fn render(&self, source: &str, ctx: &Value) -> Result<String> {
        self.compile(source)?.render_from(ctx)
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("helpers", &self.helpers)
            .finish()
    }
}

impl<'engine, 'source> Template<'engine, 'source> {
    /// Render the template to a string using the provided value.
    #[inline]
    pub fn render<S>(&self, ctx: S) -> Result<String>
    where
        S: serde::Serialize,
    {
        let value = to_value(ctx)?;
        self.render_from(&value)
    }

    /// Render the template to a string using the provided [`Value`].
    #[inline]
    pub fn render_from(&self, ctx: &Value) -> Result<String> {
        render::template(self.engine, &self.template, ValueCow::Borrowed(ctx))
    }

    /// Returns the original template source.
    #[inline]
    pub fn source(&self) -> &'source str {
        self.template.source
    }
}

impl fmt::Debug for Template<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("engine", &self.engine)
            .field("template", &self.template)
            .finish()
    }
}
