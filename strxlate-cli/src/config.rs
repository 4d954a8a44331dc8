//! Optional TOML defaults for the `translate` command.
//!
//! ```toml
//! provider = "ibm"
//! api-key = "..."
//! api-url = "https://api.eu-de.language-translator.watson.cloud.ibm.com/instances/..."
//! input-language = "en"
//! output-languages = ["de", "fr"]
//! blacklist = ["Pocket Notes"]
//! make-resource-dirs = true
//! no-comments = true
//! ```
//!
//! Anything given on the command line wins over the file.

use serde::Deserialize;
use std::{fs, path::Path, path::PathBuf};

use crate::ProviderKind;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub provider: Option<ProviderKind>,
    pub api_key: Option<String>,
    pub api_url: Option<String>,
    pub input_language: Option<String>,
    pub output_languages: Vec<String>,
    pub output_directory: Option<PathBuf>,
    pub blacklist: Vec<String>,
    pub make_resource_dirs: bool,
    pub alias: bool,
    pub non_translatable: bool,
    pub no_arrays: bool,
    pub no_comments: bool,
    pub no_whitespace: bool,
    pub no_clobber: bool,
}

impl FileConfig {
    pub fn parse(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|e| format!("Invalid config file: {}", e))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| format!("Cannot read config file {}: {}", path.display(), e))?;
        Self::parse(&text)
    }
}
