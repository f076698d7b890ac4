//! # Screen Factory
//!
//! Builds screens from a name, for callers that only know what to open by
//! name. The router core never calls this; only `open_named` does.
//!
//! Lookup without a template tries the scoped name first, then the bare one:
//!
//! ```text
//! create_screen("Detail", None, scope "movies")
//!     → "movies.Detail"  → "Detail"
//! create_screen("Detail", Some("Main"), _)
//!     → ("Main", "Detail") only
//! ```

use std::collections::HashMap;
use std::fmt;

use log::debug;

use crate::core::screen::Screen;

const MAIN_SCOPE_FALLBACK: &str = "main";

/// A named lookup scope for screen constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BundleScope {
    name: String,
}

impl BundleScope {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Scope named after the running executable (`-` becomes `_`).
    pub fn main() -> Self {
        let name = std::env::current_exe()
            .ok()
            .and_then(|path| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
            .filter(|stem| !stem.is_empty())
            .map(|stem| stem.replace('-', "_"))
            .unwrap_or_else(|| MAIN_SCOPE_FALLBACK.to_string());
        Self { name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn qualify(&self, name: &str) -> String {
        format!("{}.{}", self.name, name)
    }
}

impl fmt::Display for BundleScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// What to build: a name, an optional template, and the scope to look in.
#[derive(Debug, Clone, Copy)]
pub struct ScreenRequest<'a> {
    pub name: &'a str,
    pub template: Option<&'a str>,
    pub scope: &'a BundleScope,
}

impl<'a> ScreenRequest<'a> {
    pub fn new(name: &'a str, scope: &'a BundleScope) -> Self {
        Self {
            name,
            template: None,
            scope,
        }
    }

    pub fn with_template(mut self, template: &'a str) -> Self {
        self.template = Some(template);
        self
    }
}

impl fmt::Display for ScreenRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.template {
            Some(template) => write!(f, "{} in template {template}", self.name),
            None => write!(f, "{} in scope {}", self.name, self.scope),
        }
    }
}

pub trait ScreenFactory: Send + Sync {
    /// A fresh screen for `name`, or `None` if nothing is registered.
    fn create_screen(&self, name: &str, template: Option<&str>, scope: &BundleScope) -> Option<Screen>;
}

type Constructor = Box<dyn Fn() -> Screen + Send + Sync>;

/// Constructor table keyed by (optionally scoped) name and by template.
#[derive(Default)]
pub struct ScreenRegistry {
    types: HashMap<String, Constructor>,
    templates: HashMap<(String, String), Constructor>,
}

impl ScreenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register under a bare name, visible from every scope.
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn() -> Screen + Send + Sync + 'static,
    {
        self.types.insert(name.into(), Box::new(constructor));
    }

    /// Register under `scope`, shadowing any bare registration of `name`.
    pub fn register_in<F>(&mut self, scope: &BundleScope, name: &str, constructor: F)
    where
        F: Fn() -> Screen + Send + Sync + 'static,
    {
        self.types.insert(scope.qualify(name), Box::new(constructor));
    }

    pub fn register_template<F>(&mut self, template: impl Into<String>, identifier: impl Into<String>, constructor: F)
    where
        F: Fn() -> Screen + Send + Sync + 'static,
    {
        self.templates
            .insert((template.into(), identifier.into()), Box::new(constructor));
    }

    pub fn len(&self) -> usize {
        self.types.len() + self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ScreenFactory for ScreenRegistry {
    fn create_screen(&self, name: &str, template: Option<&str>, scope: &BundleScope) -> Option<Screen> {
        let constructor = match template.filter(|template| !template.is_empty()) {
            Some(template) => self
                .templates
                .get(&(template.to_string(), name.to_string())),
            None => self
                .types
                .get(&scope.qualify(name))
                .or_else(|| self.types.get(name)),
        };
        if constructor.is_none() {
            debug!("no constructor for {name} (scope {scope}, template {template:?})");
        }
        constructor.map(|build| build())
    }
}
