pub mod context;
#[cfg(test)]
mod tests;

/// Abstraction for a template engine.
pub trait Engine: Sized {
    /// A compiled template, borrowing the engine.
    type Template<'e>
    where
        Self: 'e;

    fn name() -> &'static str;
    fn new() -> Self;
    fn compile<'e>(&'e mut self, source: &'e str) -> Self::Template<'e>;
    fn render<S>(template: &Self::Template<'_>, ctx: &S) -> String
    where
        S: serde::Serialize;
}

////////////////////////////////////////////////////////////////////////////////
/// handlebars
////////////////////////////////////////////////////////////////////////////////

pub type Handlebars = handlebars::Handlebars<'static>;

impl Engine for Handlebars {
    type Template<'e> = &'e Handlebars;

    #[inline]
    fn name() -> &'static str {
        "handlebars"
    }

    #[inline]
    fn new() -> Self {
        let mut hbs = handlebars::Handlebars::new();
        // handlebars escapes HTML by default, plantilla never does.
        hbs.register_escape_fn(handlebars::no_escape);
        hbs
    }

    #[inline]
    fn compile<'e>(&'e mut self, source: &'e str) -> Self::Template<'e> {
        self.register_template_string("bench", source).unwrap();
        self
    }

    #[inline]
    fn render<S>(template: &Self::Template<'_>, ctx: &S) -> String
    where
        S: serde::Serialize,
    {
        template.render("bench", ctx).unwrap()
    }
}

////////////////////////////////////////////////////////////////////////////////
/// plantilla
////////////////////////////////////////////////////////////////////////////////

pub type Plantilla = plantilla::Engine;

impl Engine for Plantilla {
    type Template<'e> = plantilla::Template<'e, 'e>;

    #[inline]
    fn name() -> &'static str {
        "plantilla"
    }

    #[inline]
    fn new() -> Self {
        plantilla::Engine::new()
    }

    #[inline]
    fn compile<'e>(&'e mut self, source: &'e str) -> Self::Template<'e> {
        plantilla::Engine::compile(self, source).unwrap()
    }

    #[inline]
    fn render<S>(template: &Self::Template<'_>, ctx: &S) -> String
    where
        S: serde::Serialize,
    {
        template.render(ctx).unwrap()
    }
}
