//! Helper functions that can be called from templates.
//!
//! There are two kinds of helper:
//! - *inline* helpers return a value and are used in placeholders
//!   `{{formatId identificationNumber}}` and subexpressions
//!   `(filterByQueryResult additionalAccused "Positivo")`.
//! - *block* helpers return whether to render the "then" branch of a block
//!   `{{#isCartagena eventMunicipality}} ... {{else}} ... {{/isCartagena}}`.
//!
//! Helpers never fail, bad input degrades to a fallback value.

mod collection;
mod compare;
mod folio;
mod geo;
mod locale;

use std::collections::BTreeMap;
use std::fmt;

pub use crate::helpers::collection::{array_length, filter_by_query_result, filter_positive, join};
pub use crate::helpers::compare::{eq, gt, gte, is_cartagena, is_corregimiento, lt, lte, subtract};
pub use crate::helpers::folio::{calculate_folios, DEFAULT_ITEMS_PER_FOLIO};
pub use crate::helpers::geo::CORREGIMIENTOS;
pub use crate::helpers::locale::{format_date, format_id, id_no_dots, to_upper_case};
use crate::Value;

/// The positional arguments passed to a helper.
///
/// A missing argument reads as [`Value::None`].
#[derive(Debug, Clone)]
pub struct Args<'a> {
    values: Vec<&'a Value>,
}

static NONE: Value = Value::None;

impl<'a> Args<'a> {
    pub fn new(values: Vec<&'a Value>) -> Self {
        Self { values }
    }

    /// Returns the argument at the given position.
    pub fn get(&self, i: usize) -> &'a Value {
        self.values.get(i).copied().unwrap_or(&NONE)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An inline helper function or closure.
type InlineFn = dyn Fn(&Args<'_>) -> Value + Send + Sync + 'static;

/// A block helper function or closure.
type BlockFn = dyn Fn(&Args<'_>) -> bool + Send + Sync + 'static;

pub(crate) enum Helper {
    Inline(Box<InlineFn>),
    Block(Box<BlockFn>),
}

/// Whether a helper is used inline or as a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelperKind {
    Inline,
    Block,
}

/// A table of named helpers.
#[derive(Default)]
pub struct Helpers {
    helpers: BTreeMap<String, Helper>,
}

impl Helpers {
    /// Construct an empty helper table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct the table of helpers available to report templates.
    pub fn core() -> Self {
        let inline: [(&[&str], fn(&Args<'_>) -> Value); 14] = [
            (&["formatDate", "formatDateProse"], |args| {
                format_date(args.get(0)).into()
            }),
            (&["formatId", "formatThousands"], |args| {
                format_id(args.get(0)).into()
            }),
            (&["idNoDots", "stripSeparators"], |args| {
                id_no_dots(args.get(0)).into()
            }),
            (&["toUpperCase", "toUpperCaseSafe"], |args| {
                to_upper_case(args.get(0)).into()
            }),
            (&["arrayLength", "length"], |args| {
                array_length(args.get(0)).into()
            }),
            (&["join", "joinWithConjunction"], |args| {
                join(args.get(0), args.get(1), args.get(2), args.get(3)).into()
            }),
            (&["filterByQueryResult"], |args| {
                filter_by_query_result(args.get(0), args.get(1)).into()
            }),
            (&["calculateFolios"], |args| {
                calculate_folios(args.get(0), args.get(1)).into()
            }),
            (&["eq", "equals"], |args| eq(args.get(0), args.get(1)).into()),
            (&["gt", "greaterThan"], |args| gt(args.get(0), args.get(1)).into()),
            (&["lt", "lessThan"], |args| lt(args.get(0), args.get(1)).into()),
            (&["gte", "greaterOrEqual"], |args| {
                gte(args.get(0), args.get(1)).into()
            }),
            (&["lte", "lessOrEqual"], |args| {
                lte(args.get(0), args.get(1)).into()
            }),
            (&["subtract"], |args| subtract(args.get(0), args.get(1))),
        ];

        let mut helpers = Self::new();
        for (names, f) in inline {
            for name in names {
                helpers.add_inline(*name, f);
            }
        }
        helpers.add_block("isCartagena", |args| is_cartagena(args.get(0)));
        helpers.add_block("isCorregimiento", |args| is_corregimiento(args.get(0)));
        helpers
    }

    /// Construct the table of helpers available to paragraph templates.
    ///
    /// This is the [core][Helpers::core] table together with
    /// `filterAdditionalAccusedWithPositiveResult`.
    pub fn paragraphs() -> Self {
        let mut helpers = Self::core();
        helpers.add_inline("filterAdditionalAccusedWithPositiveResult", |args| {
            filter_positive(args.get(0)).into()
        });
        helpers
    }

    /// Add an inline helper, replacing any helper with the same name.
    pub fn add_inline<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&Args<'_>) -> Value + Send + Sync + 'static,
    {
        self.helpers.insert(name.into(), Helper::Inline(Box::new(f)));
    }

    /// Add a block helper, replacing any helper with the same name.
    pub fn add_block<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&Args<'_>) -> bool + Send + Sync + 'static,
    {
        self.helpers.insert(name.into(), Helper::Block(Box::new(f)));
    }

    /// Returns the kind of the helper with the given name, if there is one.
    pub fn kind(&self, name: &str) -> Option<HelperKind> {
        self.helpers.get(name).map(|helper| match helper {
            Helper::Inline(_) => HelperKind::Inline,
            Helper::Block(_) => HelperKind::Block,
        })
    }

    /// Returns `true` if a helper with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.helpers.contains_key(name)
    }

    /// Returns the names of all helpers in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.helpers.keys().map(String::as_str)
    }

    pub(crate) fn get(&self, name: &str) -> Option<&Helper> {
        self.helpers.get(name)
    }
}

impl fmt::Debug for Helpers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
