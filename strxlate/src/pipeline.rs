//! Scan once, render many.

use log::debug;

use crate::{
    dedup::DuplicateStore,
    document::Document,
    error::Error,
    fragment::FragmentStore,
    normalize::remove_escape_characters,
    options::{OutputFilters, ScanOptions},
    reinsert::{Reinserter, Rendered},
    scanner::Scanner,
    translator::Translator,
};

/// The scanned, validated and deduplicated form of one input document.
///
/// An `Extraction` is read-only once built and can render any number of
/// target languages.
#[derive(Debug, Clone)]
pub struct Extraction {
    document: Document,
    fragments: FragmentStore,
    duplicates: DuplicateStore,
}

impl Extraction {
    /// Scans `document`. Fails on structural errors or when nothing is
    /// translatable, before any provider is involved.
    pub fn scan(document: Document, options: ScanOptions) -> Result<Self, Error> {
        let fragments = Scanner::new(options)?.scan_document(&document)?;
        let duplicates = DuplicateStore::new(
            fragments
                .translatable_values()
                .map(remove_escape_characters),
        );
        debug!(
            "{} translatable strings, {} distinct",
            duplicates.len(),
            duplicates.distinct_len()
        );
        Ok(Extraction {
            document,
            fragments,
            duplicates,
        })
    }

    pub fn from_text(text: &str, options: ScanOptions) -> Result<Self, Error> {
        Self::scan(Document::parse(text), options)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn fragments(&self) -> &FragmentStore {
        &self.fragments
    }

    pub fn duplicates(&self) -> &DuplicateStore {
        &self.duplicates
    }

    /// The distinct unescaped strings to send to a provider, in first-seen order.
    pub fn requests(&self) -> Vec<String> {
        self.duplicates.dehydrate()
    }

    /// Renders the document from a provider's answer to [`Self::requests`].
    pub fn render(
        &self,
        language: &str,
        translated: Vec<String>,
        filters: OutputFilters,
    ) -> Result<Rendered, Error> {
        let expanded = self.duplicates.rehydrate(language, translated)?;
        Reinserter::new(&self.document, &self.fragments, filters).render(language, &expanded)
    }

    /// Asks `translator` for `target` and renders the result.
    pub async fn translate(
        &self,
        translator: &dyn Translator,
        source: &str,
        target: &str,
        filters: OutputFilters,
    ) -> Result<Rendered, Error> {
        let translated = translator
            .translate_batch(&self.requests(), source, target)
            .await?;
        self.render(target, translated, filters)
    }
}
