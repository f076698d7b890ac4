//! # App Context
//!
//! Identity of the hosting app: store id, URL scheme, version, bundle id,
//! debug flag. Built once from `ResolvedConfig` and passed to whoever needs
//! it, rather than living in process-wide globals.

use crate::core::config::ResolvedConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppContext {
    pub id: String,
    pub scheme: String,
    pub version: String,
    pub bundle_id: Option<String>,
    pub debug: bool,
}

impl AppContext {
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            id: config.app_id.clone(),
            scheme: config.app_scheme.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            bundle_id: config.bundle_id.clone(),
            debug: cfg!(debug_assertions),
        }
    }

    /// Short label for title bars: `scheme v1.2.3 (debug)`.
    pub fn label(&self) -> String {
        let name = if self.scheme.is_empty() {
            env!("CARGO_PKG_NAME")
        } else {
            self.scheme.as_str()
        };
        if self.debug {
            format!("{name} v{} (debug)", self.version)
        } else {
            format!("{name} v{}", self.version)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{CliOverrides, WayfinderConfig, resolve_with_env};

    fn resolved() -> ResolvedConfig {
        resolve_with_env(&WayfinderConfig::default(), &CliOverrides::default(), |_| None)
    }

    #[test]
    fn test_from_config_carries_crate_version() {
        let context = AppContext::from_config(&resolved());
        assert_eq!(context.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(context.debug, cfg!(debug_assertions));
    }

    #[test]
    fn test_label_falls_back_to_crate_name() {
        let mut context = AppContext::from_config(&resolved());
        context.debug = false;
        assert_eq!(context.label(), format!("wayfinder v{}", context.version));

        context.scheme = "movies".to_string();
        context.debug = true;
        assert_eq!(context.label(), format!("movies v{} (debug)", context.version));
    }
}
