//! Puppeteer configuration.
//!
//! Bot definitions name their puppeteer in JSON:
//!
//! ```json
//! { "puppeteer": "conditional_cleaner", "threshold": 1 }
//! ```
//!
//! [`PuppeteerConfig::build`] turns a parsed config into an [`AnyPuppeteer`].

use serde::{Deserialize, Serialize};

use crate::any::AnyPuppeteer;
use crate::cleanup::{AlternateCleanFirst, AlternateEatFirst, ConditionalCleaner};
use crate::puppeteer::Puppeteer;
use crate::two_resource::GrimTwoResource;
use crate::PuppeteerError;

/// Which puppeteer to run, with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "puppeteer", rename_all = "snake_case")]
pub enum PuppeteerConfig {
    AlternateCleanFirst,
    AlternateEatFirst,
    ConditionalCleaner {
        /// Other cleaners needed to trigger cleaning.
        threshold: u32,
    },
    GrimTwoResource {
        /// Partner defections tolerated before retaliating.
        threshold: u32,
    },
}

impl PuppeteerConfig {
    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, PuppeteerError> {
        serde_json::from_str(json).map_err(|e| PuppeteerError::Config {
            message: e.to_string(),
        })
    }

    /// Serialize this config to JSON.
    pub fn to_json(&self) -> Result<String, PuppeteerError> {
        serde_json::to_string(self).map_err(|e| PuppeteerError::Config {
            message: e.to_string(),
        })
    }

    /// Construct the configured puppeteer.
    pub fn build(&self) -> AnyPuppeteer {
        let puppeteer: AnyPuppeteer = match *self {
            PuppeteerConfig::AlternateCleanFirst => AlternateCleanFirst.into(),
            PuppeteerConfig::AlternateEatFirst => AlternateEatFirst.into(),
            PuppeteerConfig::ConditionalCleaner { threshold } => {
                ConditionalCleaner::new(threshold).into()
            }
            PuppeteerConfig::GrimTwoResource { threshold } => {
                GrimTwoResource::new(threshold).into()
            }
        };
        tracing::debug!(puppeteer = puppeteer.name(), config = ?self, "Built puppeteer");
        puppeteer
    }
}

impl From<&AnyPuppeteer> for PuppeteerConfig {
    fn from(puppeteer: &AnyPuppeteer) -> Self {
        match puppeteer {
            AnyPuppeteer::AlternateCleanFirst(_) => PuppeteerConfig::AlternateCleanFirst,
            AnyPuppeteer::AlternateEatFirst(_) => PuppeteerConfig::AlternateEatFirst,
            AnyPuppeteer::ConditionalCleaner(p) => PuppeteerConfig::ConditionalCleaner {
                threshold: p.threshold(),
            },
            AnyPuppeteer::GrimTwoResource(p) => PuppeteerConfig::GrimTwoResource {
                threshold: p.threshold(),
            },
        }
    }
}
