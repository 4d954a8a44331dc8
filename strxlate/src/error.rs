//! All error types for the strxlate crate.
//!
//! Every variant is fatal for the current run: nothing is written for the
//! language being processed when one of these is returned.

use thiserror::Error;

/// Stage of the pipeline at which a translated string count was checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountStage {
    /// Result list returned by the translation provider.
    Provider,
    /// List expanded back to one value per fragment.
    Rehydrate,
}

impl std::fmt::Display for CountStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CountStage::Provider => write!(f, "server"),
            CountStage::Rehydrate => write!(f, "duplicates store"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("input file contains a string-array with no closing tag")]
    UnterminatedArray {
        /// Line on which the unterminated array was opened.
        opened_at: usize,
    },

    #[error("failed to extract strings from input file")]
    NothingToTranslate,

    #[error("failed to compile substring regex patterns in blacklist")]
    InvalidBlacklist {
        patterns: Vec<String>,
        #[source]
        source: regex::Error,
    },

    #[error("number of \"{language}\" translated strings is incorrect")]
    CountMismatch {
        language: String,
        stage: CountStage,
        expected: usize,
        received: Vec<String>,
    },

    #[error("cannot locate `{text}` on line {line}")]
    Unresolved { line: usize, text: String },

    #[error("translation provider error: {0}")]
    Provider(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Creates a new provider error.
    pub fn provider_error(message: impl Into<String>) -> Self {
        Error::Provider(message.into())
    }

    /// Creates a count mismatch error for `language`.
    pub fn count_mismatch(
        language: impl Into<String>,
        stage: CountStage,
        expected: usize,
        received: Vec<String>,
    ) -> Self {
        Error::CountMismatch {
            language: language.into(),
            stage,
            expected,
            received,
        }
    }

    /// Diagnostic detail shown in debug mode, in addition to the terse message.
    pub fn detail(&self) -> Option<String> {
        match self {
            Error::UnterminatedArray { opened_at } => {
                Some(format!("string-array opened on line {}", opened_at + 1))
            }
            Error::InvalidBlacklist { patterns, source } => Some(format!(
                "blacklist = /(?:{})/: {}",
                patterns.join("|"),
                source
            )),
            Error::CountMismatch {
                stage,
                expected,
                received,
                ..
            } => Some(format!(
                "Expected #{} but received #{} from {}. {:?}",
                expected,
                received.len(),
                stage,
                received
            )),
            Error::Unresolved { line, text } => {
                Some(format!("fragment {:?} not found on line {}", text, line + 1))
            }
            _ => None,
        }
    }
}
