//! Renders a compiled template against a context value.

mod core;
mod fmt;
mod iter;
mod stack;
mod value;

use crate::render::core::RendererImpl;
use crate::render::stack::Stack;
use crate::types::program::Template;
use crate::value::ValueCow;
use crate::{Engine, Result};

/// Render the template to a string using the given context as the root.
pub(crate) fn template<'a>(
    engine: &'a Engine,
    template: &'a Template<'a>,
    globals: ValueCow<'a>,
) -> Result<String> {
    let mut buf = String::with_capacity(template.source.len());
    RendererImpl {
        engine,
        template,
        stack: Stack::new(globals),
    }
    .render(&mut buf)?;
    Ok(buf)
}
