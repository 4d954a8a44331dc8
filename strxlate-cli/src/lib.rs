//! CLI library for testing purposes

pub mod config;
pub mod extract;
pub mod ibm;
pub mod languages;
pub mod translate;
pub mod validation;

use clap::ValueEnum;
use serde::Deserialize;

pub use config::FileConfig;
pub use ibm::IbmWatsonTranslator;
pub use translate::{RunSummary, TranslateSettings, run_translate};

/// Translation backend selected on the command line or in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// IBM Watson Language Translator
    Ibm,
    /// Copy every string unchanged
    Identity,
    /// Wrap every string as `[lang:text]`
    Pseudo,
}
