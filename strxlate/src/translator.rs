//! Translation provider abstraction.
//!
//! The pipeline only ever hands a provider one ordered batch of distinct,
//! unescaped strings per target language and expects the same number back,
//! in the same order. Network-backed providers live in the CLI crate; the
//! providers here are deterministic and need no configuration.

use async_trait::async_trait;

use crate::error::Error;

/// A machine translation backend.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translates `texts` from `source` to `target`.
    ///
    /// Implementations must return exactly one string per input, in input
    /// order. The caller checks the count and fails the language otherwise.
    async fn translate_batch(
        &self,
        texts: &[String],
        source: &str,
        target: &str,
    ) -> Result<Vec<String>, Error>;

    /// Human-readable provider name, used in log output.
    fn provider_name(&self) -> &str;
}

/// Returns every text unchanged.
///
/// Useful for checking what a run would write without calling a service.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

#[async_trait]
impl Translator for IdentityTranslator {
    async fn translate_batch(
        &self,
        texts: &[String],
        _source: &str,
        _target: &str,
    ) -> Result<Vec<String>, Error> {
        Ok(texts.to_vec())
    }

    fn provider_name(&self) -> &str {
        "identity"
    }
}

/// Wraps every text as `[target:text]`, which makes untranslated leftovers
/// easy to spot in the output.
#[derive(Debug, Clone, Copy, Default)]
pub struct PseudoTranslator;

#[async_trait]
impl Translator for PseudoTranslator {
    async fn translate_batch(
        &self,
        texts: &[String],
        _source: &str,
        target: &str,
    ) -> Result<Vec<String>, Error> {
        Ok(texts
            .iter()
            .map(|text| format!("[{}:{}]", target, text))
            .collect())
    }

    fn provider_name(&self) -> &str {
        "pseudo"
    }
}
