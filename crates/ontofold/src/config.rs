//! Configuration types for Ontofold abstraction runs.
//!
//! All types implement [`serde::Deserialize`] with every field defaulted, so
//! a configuration file only needs the values it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration.
//! - [`AbstractionConfig`] - Settings of the fold engine.
//!
//! # Example
//!
//! ```
//! # use ontofold::config::AppConfig;
//! # use ontofold::options::AbstractionRule;
//! let config = AppConfig::default();
//! assert_eq!(config.abstraction().attribute_height(), 20.0);
//! assert_eq!(config.abstraction().default_rule(), AbstractionRule::All);
//! ```

use serde::Deserialize;

use crate::options::AbstractionRule;

const DEFAULT_ATTRIBUTE_HEIGHT: f32 = 20.0;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Abstraction configuration section.
    #[serde(default)]
    abstraction: AbstractionConfig,
}

impl AppConfig {
    pub fn new(abstraction: AbstractionConfig) -> Self {
        Self { abstraction }
    }

    /// Returns the abstraction configuration.
    pub fn abstraction(&self) -> &AbstractionConfig {
        &self.abstraction
    }
}

/// Settings of the fold engine.
#[derive(Debug, Clone, Deserialize)]
pub struct AbstractionConfig {
    /// Height added to a whole's views for every component folded into it.
    #[serde(default = "default_attribute_height")]
    attribute_height: f32,

    /// Rule applied when a request names neither a rule nor an element.
    #[serde(default)]
    default_rule: AbstractionRule,
}

impl AbstractionConfig {
    /// Creates a new [`AbstractionConfig`].
    ///
    /// # Arguments
    ///
    /// * `attribute_height` - View height increment per folded component.
    /// * `default_rule` - Rule used when a request names none.
    pub fn new(attribute_height: f32, default_rule: AbstractionRule) -> Self {
        Self {
            attribute_height,
            default_rule,
        }
    }

    pub fn attribute_height(&self) -> f32 {
        self.attribute_height
    }

    pub fn default_rule(&self) -> AbstractionRule {
        self.default_rule
    }
}

impl Default for AbstractionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ATTRIBUTE_HEIGHT, AbstractionRule::default())
    }
}

fn default_attribute_height() -> f32 {
    DEFAULT_ATTRIBUTE_HEIGHT
}
