use std::collections::BTreeMap;

use crate::report::defaults::{default_template, TemplateKey};
use crate::Result;

/// The templates saved by the operator, falling back to the built-in ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateStore {
    saved: BTreeMap<TemplateKey, String>,
}

impl TemplateStore {
    /// Construct an empty store, every template is the default one.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the saved template, or the default one if none was saved.
    pub fn get(&self, key: TemplateKey) -> &str {
        match self.saved.get(&key) {
            Some(template) => template,
            None => {
                log::trace!("no saved template for `{}`, using the default", key.as_str());
                default_template(key)
            }
        }
    }

    /// Returns `true` if a template was saved for the key.
    pub fn is_saved(&self, key: TemplateKey) -> bool {
        self.saved.contains_key(&key)
    }

    /// Saves a template, replacing any previously saved one.
    ///
    /// Saving an empty template is the same as resetting it.
    pub fn save(&mut self, key: TemplateKey, template: impl Into<String>) {
        let template = template.into();
        if template.is_empty() {
            self.reset(key);
        } else {
            self.saved.insert(key, template);
        }
    }

    /// Removes the saved template so that the default one is used.
    pub fn reset(&mut self, key: TemplateKey) {
        self.saved.remove(&key);
    }

    /// Loads saved templates from a JSON object keyed by template name.
    ///
    /// Unknown names and empty templates are ignored.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, String> = serde_json::from_str(json)?;
        let mut store = Self::new();
        for (name, template) in raw {
            match TemplateKey::ALL.into_iter().find(|key| key.as_str() == name) {
                Some(key) => store.save(key, template),
                None => log::debug!("ignoring unknown template `{name}`"),
            }
        }
        Ok(store)
    }

    /// Serializes the saved templates as a JSON object keyed by template name.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.saved)?)
    }
}
