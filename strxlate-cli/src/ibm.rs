//! IBM Watson Language Translator v3 provider.
//!
//! Credentials come from `--api-key`/`--api-url`, the `IBM_TRANSLATOR_API_KEY`
//! and `IBM_TRANSLATOR_API_URL` environment variables, or the config file.

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use strxlate::{Error, Translator};

const API_VERSION: &str = "2018-05-01";

#[derive(Serialize)]
struct TranslateRequest<'a> {
    text: &'a [String],
    source: &'a str,
    target: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    translations: Vec<TranslationItem>,
}

#[derive(Deserialize)]
struct TranslationItem {
    translation: String,
}

#[derive(Clone)]
pub struct IbmWatsonTranslator {
    api_key: String,
    api_url: String,
    client: reqwest::Client,
}

impl IbmWatsonTranslator {
    /// Request bodies are kept under the service's 50 KB limit.
    const MAX_REQUEST_CHARS: usize = 40_000;

    pub fn new(api_key: impl Into<String>, api_url: impl Into<String>) -> Result<Self, Error> {
        let api_key = api_key.into();
        let api_url = api_url.into();
        if api_key.trim().is_empty() {
            return Err(Error::provider_error("IBM Cloud account API key is required"));
        }
        if api_url.trim().is_empty() {
            return Err(Error::provider_error("IBM Cloud account API URL is required"));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|e| Error::provider_error(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            api_url,
            client,
        })
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/v3/translate?version={}",
            self.api_url.trim_end_matches('/'),
            API_VERSION
        )
    }

    /// Splits `texts` into consecutive batches of at most
    /// [`Self::MAX_REQUEST_CHARS`] characters. A single longer text gets a
    /// batch of its own.
    fn chunk_batch(texts: &[String], budget: usize) -> Vec<&[String]> {
        let mut chunks = Vec::new();
        let mut start = 0;
        let mut used = 0;
        for (index, text) in texts.iter().enumerate() {
            let size = text.chars().count();
            if index > start && used + size > budget {
                chunks.push(&texts[start..index]);
                start = index;
                used = 0;
            }
            used += size;
        }
        if start < texts.len() {
            chunks.push(&texts[start..]);
        }
        chunks
    }

    async fn translate_chunk(
        &self,
        texts: &[String],
        source: &str,
        target: &str,
    ) -> Result<Vec<String>, Error> {
        let body = TranslateRequest {
            text: texts,
            source,
            target,
        };

        let response = self
            .client
            .post(self.endpoint())
            .basic_auth("apikey", Some(&self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::provider_error(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::provider_error(format!(
                "API error ({}): {}",
                status, error_text
            )));
        }

        let parsed: TranslateResponse = response
            .json()
            .await
            .map_err(|e| Error::provider_error(format!("Failed to parse API response: {}", e)))?;

        Ok(parsed
            .translations
            .into_iter()
            .map(|item| item.translation)
            .collect())
    }
}

impl std::fmt::Debug for IbmWatsonTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IbmWatsonTranslator")
            .field("api_key", &"***")
            .field("api_url", &self.api_url)
            .finish()
    }
}

#[async_trait]
impl Translator for IbmWatsonTranslator {
    async fn translate_batch(
        &self,
        texts: &[String],
        source: &str,
        target: &str,
    ) -> Result<Vec<String>, Error> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let chunks = Self::chunk_batch(texts, Self::MAX_REQUEST_CHARS);
        let mut results = Vec::with_capacity(texts.len());
        for (index, chunk) in chunks.iter().enumerate() {
            debug!(
                "{} -> {}: request {}/{} with {} strings",
                source,
                target,
                index + 1,
                chunks.len(),
                chunk.len()
            );
            results.extend(self.translate_chunk(chunk, source, target).await?);
        }
        Ok(results)
    }

    fn provider_name(&self) -> &str {
        "IBM Watson Language Translator"
    }
}
