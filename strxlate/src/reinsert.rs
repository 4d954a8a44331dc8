//! Writes translated text back into the original document layout.

use std::ops::Range;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    document::Document,
    error::{CountStage, Error},
    fragment::{Fragment, FragmentStore},
    normalize::add_escape_characters,
    options::OutputFilters,
    scanner::TAG_END_TOKEN,
};

lazy_static! {
    static ref XML_COMMENT: Regex = Regex::new(r"<!--.*?-->").unwrap();
}

/// Output of [`Reinserter::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    /// Number of translatable fragments substituted.
    pub substitutions: usize,
    /// Number of non-exportable fragments removed.
    pub removals: usize,
}

struct Edit<'a> {
    span: Range<usize>,
    replacement: &'a str,
}

/// Replays a document, substituting translations at the recorded fragments.
#[derive(Debug, Clone, Copy)]
pub struct Reinserter<'a> {
    document: &'a Document,
    store: &'a FragmentStore,
    filters: OutputFilters,
}

impl<'a> Reinserter<'a> {
    pub fn new(document: &'a Document, store: &'a FragmentStore, filters: OutputFilters) -> Self {
        Reinserter {
            document,
            store,
            filters,
        }
    }

    /// Renders the document for `language`.
    ///
    /// `translations` holds one unescaped value per translatable fragment, in
    /// fragment order. Every span is resolved against the original line before
    /// any edit is applied, so substitutions never shift each other.
    pub fn render(&self, language: &str, translations: &[String]) -> Result<Rendered, Error> {
        if translations.len() != self.store.translatable.len() {
            return Err(Error::count_mismatch(
                language,
                CountStage::Rehydrate,
                self.store.translatable.len(),
                translations.to_vec(),
            ));
        }

        let escaped: Vec<String> = translations
            .iter()
            .map(|t| add_escape_characters(t))
            .collect();

        let mut next_translatable = 0;
        let mut next_removal = 0;
        let mut substitutions = 0;
        let mut removals = 0;
        let mut lines = Vec::with_capacity(self.document.len());

        for (line_index, line) in self.document.lines().iter().enumerate() {
            let translatable = self.store.translatable_on_line(next_translatable, line_index);
            let redacted = self.store.non_exportable_on_line(next_removal, line_index);
            let mut edits: Vec<Edit> = Vec::with_capacity(translatable.len() + redacted.len());

            for (fragment, replacement) in translatable
                .iter()
                .zip(&escaped[next_translatable..next_translatable + translatable.len()])
            {
                let span = locate(line, fragment, Some(TAG_END_TOKEN), &edits)
                    .ok_or_else(|| unresolved(fragment))?;
                edits.push(Edit { span, replacement });
            }
            for fragment in redacted {
                let span = locate(line, fragment, None, &edits).ok_or_else(|| unresolved(fragment))?;
                edits.push(Edit {
                    span,
                    replacement: "",
                });
            }

            next_translatable += translatable.len();
            next_removal += redacted.len();
            substitutions += translatable.len();
            removals += redacted.len();

            let mut output = apply(line, edits);
            let mut filtered = !redacted.is_empty();

            if self.filters.strip_comments && XML_COMMENT.is_match(&output) {
                output = XML_COMMENT.replace_all(&output, "").into_owned();
                filtered = true;
            }
            if self.filters.strip_whitespace {
                filtered = true;
            }

            if !filtered || !output.trim().is_empty() {
                lines.push(output);
            }
        }

        Ok(Rendered {
            text: lines.join("\n"),
            substitutions,
            removals,
        })
    }
}

/// Finds the first occurrence of the fragment text at or after its cursor
/// that does not overlap a span already claimed on the line.
fn locate(line: &str, fragment: &Fragment, token: Option<char>, claimed: &[Edit]) -> Option<Range<usize>> {
    let mut from = fragment.cursor().resolve(line, token);
    let text = fragment.text_value.as_str();
    if text.is_empty() {
        return Some(from..from);
    }

    while let Some(found) = line.get(from..)?.find(text) {
        let start = from + found;
        let span = start..start + text.len();
        if !claimed
            .iter()
            .any(|edit| edit.span.start < span.end && span.start < edit.span.end)
        {
            return Some(span);
        }
        from = start + line[start..].chars().next().map_or(1, char::len_utf8);
    }
    None
}

fn apply(line: &str, mut edits: Vec<Edit>) -> String {
    let mut output = line.to_string();
    edits.sort_by(|a, b| b.span.start.cmp(&a.span.start));
    for edit in edits {
        output.replace_range(edit.span, edit.replacement);
    }
    output
}

fn unresolved(fragment: &Fragment) -> Error {
    Error::Unresolved {
        line: fragment.line_index,
        text: fragment.text_value.clone(),
    }
}
