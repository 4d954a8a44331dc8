//! Line scanner for Android string resource files.
//!
//! The scanner works on raw lines rather than on an XML tree, so that every
//! fragment it records can be found again at the same byte position when the
//! translated document is written. The only state carried from one line to
//! the next is the [`ArrayContext`] of a `<string-array>` left open.

use lazy_static::lazy_static;
use log::debug;
use regex::{Captures, Regex};

use crate::{
    document::Document,
    error::Error,
    fragment::{Fragment, FragmentStore},
    normalize::Splitter,
    options::ScanOptions,
};

lazy_static! {
    static ref ENTITY: Regex = Regex::new(r#"(?i)<!ENTITY\s+\S+\s+"([^"]+)"\s*/?>"#).unwrap();
    static ref STRING: Regex = Regex::new(r"(?i)<string(\s[^>]*)?>(.*?)</string>").unwrap();
    static ref ARRAY_ONE_LINER: Regex =
        Regex::new(r"(?i)<string-array(\s[^>]*)?>(.*?)</string-array>").unwrap();
    static ref ARRAY_START: Regex = Regex::new(r"(?i)<string-array(\s[^>]*)?>(.*)$").unwrap();
    static ref ARRAY_END: Regex = Regex::new(r"(?i)^(.*?)</string-array>").unwrap();
    static ref ITEM: Regex = Regex::new(r"(?i)<item(\s[^>]*)?>(.*?)</item>").unwrap();
    static ref NOT_TRANSLATABLE: Regex = Regex::new(r#"(?i)\stranslatable="false""#).unwrap();
    static ref STRING_ALIAS: Regex = Regex::new(r"^@string/").unwrap();
}

/// Token stepped over to reach the content of an element.
pub const TAG_END_TOKEN: char = '>';

/// Where the scanner is relative to a multi-line `<string-array>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrayContext {
    /// Not inside an array.
    #[default]
    Idle,
    /// Inside an array while array translation is disabled.
    Suppressed,
    /// Inside an array marked `translatable="false"`.
    NonTranslatable,
    /// Inside an array whose items are translated.
    Translatable,
}

impl ArrayContext {
    /// Classifies an array from its open tag attributes.
    pub fn for_array(options: &ScanOptions, attributes: &str) -> Self {
        if options.disable_arrays {
            ArrayContext::Suppressed
        } else if NOT_TRANSLATABLE.is_match(attributes) {
            ArrayContext::NonTranslatable
        } else {
            ArrayContext::Translatable
        }
    }

    pub fn is_open(&self) -> bool {
        *self != ArrayContext::Idle
    }

    /// Whether markup seen in this context is removed from the output.
    fn redacts(&self, options: &ScanOptions) -> bool {
        match self {
            ArrayContext::Suppressed => true,
            ArrayContext::NonTranslatable => !options.export_non_translatable,
            ArrayContext::Translatable | ArrayContext::Idle => false,
        }
    }
}

/// Extracts fragments from a document according to [`ScanOptions`].
#[derive(Debug, Clone)]
pub struct Scanner {
    options: ScanOptions,
    splitter: Splitter,
}

impl Scanner {
    /// Creates a scanner; fails if the blacklist does not compile.
    pub fn new(options: ScanOptions) -> Result<Self, Error> {
        let splitter = Splitter::new(&options.blacklist)?;
        Ok(Scanner { options, splitter })
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Scans every line of `document`.
    ///
    /// Fails when an array is still open at the end of the document, or when
    /// nothing translatable was found.
    pub fn scan_document(&self, document: &Document) -> Result<FragmentStore, Error> {
        let mut store = FragmentStore::new();
        let mut state = ArrayContext::Idle;
        let mut opened_at = 0;

        for (line_index, line) in document.lines().iter().enumerate() {
            let next = self.scan_line(&mut store, state, line_index, line);
            if next.is_open() && (!state.is_open() || ARRAY_END.is_match(line)) {
                opened_at = line_index;
            }
            state = next;
        }

        if state.is_open() {
            return Err(Error::UnterminatedArray { opened_at });
        }
        if store.translatable.is_empty() {
            return Err(Error::NothingToTranslate);
        }

        debug!(
            "Scanned {} lines: {} translatable, {} non-exportable fragments",
            document.len(),
            store.translatable.len(),
            store.non_exportable.len()
        );
        Ok(store)
    }

    /// Scans one line in `state`, appending fragments to `store`, and returns
    /// the state for the next line.
    pub fn scan_line(
        &self,
        store: &mut FragmentStore,
        state: ArrayContext,
        line_index: usize,
        line: &str,
    ) -> ArrayContext {
        match state {
            ArrayContext::Idle => self.scan_idle(store, line_index, line, 0),
            open => self.scan_array_body(store, open, line_index, line, 0),
        }
    }

    /// Scans `line[start..]` outside of any array.
    fn scan_idle(
        &self,
        store: &mut FragmentStore,
        line_index: usize,
        line: &str,
        start: usize,
    ) -> ArrayContext {
        let segment = &line[start..];

        for caps in ENTITY.captures_iter(segment) {
            let Some(value) = caps.get(1) else { continue };
            self.push_value_chunks(store, line_index, value.as_str(), start + value.start());
        }

        for caps in STRING.captures_iter(segment) {
            let (whole, attributes, value, value_start) = element_parts(&caps);
            let offset = start + whole.start();

            if NOT_TRANSLATABLE.is_match(attributes) {
                if !self.options.export_non_translatable {
                    store.push_non_exportable(Fragment::new(line_index, whole.as_str(), offset, 0));
                }
                continue;
            }
            if STRING_ALIAS.is_match(value) {
                if !self.options.export_aliases {
                    store.push_non_exportable(Fragment::new(line_index, whole.as_str(), offset, 0));
                }
                continue;
            }
            self.push_value_chunks(store, line_index, value, start + value_start);
        }

        let mut tail = 0;
        for caps in ARRAY_ONE_LINER.captures_iter(segment) {
            let (whole, attributes, items, items_start) = element_parts(&caps);
            let offset = start + whole.start();
            tail = whole.end();

            match ArrayContext::for_array(&self.options, attributes) {
                ArrayContext::Translatable => {
                    self.extract_items(store, line_index, items, start + items_start);
                }
                context => {
                    if context.redacts(&self.options) {
                        store.push_non_exportable(Fragment::new(
                            line_index,
                            whole.as_str(),
                            offset,
                            0,
                        ));
                    }
                }
            }
        }

        let tail_start = start + tail;
        let Some(caps) = ARRAY_START.captures(&line[tail_start..]) else {
            return ArrayContext::Idle;
        };
        let (whole, attributes, items, items_start) = element_parts(&caps);
        let context = ArrayContext::for_array(&self.options, attributes);

        if context.redacts(&self.options) {
            store.push_non_exportable(Fragment::new(
                line_index,
                whole.as_str(),
                tail_start + whole.start(),
                0,
            ));
        }
        if context != ArrayContext::Translatable || items.trim().is_empty() {
            return context;
        }

        self.scan_array_body(store, context, line_index, line, tail_start + items_start)
    }

    /// Scans `line[start..]` as the body of an open array.
    fn scan_array_body(
        &self,
        store: &mut FragmentStore,
        state: ArrayContext,
        line_index: usize,
        line: &str,
        start: usize,
    ) -> ArrayContext {
        let segment = &line[start..];
        let end = ARRAY_END.captures(segment);
        let (content_len, items_len) = match &end {
            Some(caps) => (
                caps.get(0).map_or(segment.len(), |m| m.end()),
                caps.get(1).map_or(0, |m| m.end()),
            ),
            None => (segment.len(), segment.len()),
        };

        if state == ArrayContext::Translatable {
            self.extract_items(store, line_index, &segment[..items_len], start);
        } else if state.redacts(&self.options) {
            store.push_non_exportable(Fragment::new(
                line_index,
                &segment[..content_len],
                start,
                0,
            ));
        }

        if end.is_none() {
            return state;
        }

        let rest_start = start + content_len;
        if line[rest_start..].trim().is_empty() {
            ArrayContext::Idle
        } else {
            self.scan_idle(store, line_index, line, rest_start)
        }
    }

    /// Records the chunks of every `<item>` in `items`, which starts at byte
    /// `base` of the line. Items referencing an alias are left untouched.
    fn extract_items(&self, store: &mut FragmentStore, line_index: usize, items: &str, base: usize) {
        for caps in ITEM.captures_iter(items) {
            let (_, _, value, value_start) = element_parts(&caps);
            if STRING_ALIAS.is_match(value) {
                continue;
            }
            self.push_value_chunks(store, line_index, value, base + value_start);
        }
    }

    /// Records every chunk of `value`, which starts at byte `value_offset` of
    /// the line, at its exact position. Placeholders, entity references and
    /// escapes stripped by the splitter can contain the chunk text, so the
    /// chunk is never searched for from an earlier point.
    fn push_value_chunks(
        &self,
        store: &mut FragmentStore,
        line_index: usize,
        value: &str,
        value_offset: usize,
    ) {
        for (chunk_offset, chunk) in self.splitter.split_with_offsets(value) {
            store.push_translatable(Fragment::new(line_index, chunk, value_offset + chunk_offset, 0));
        }
    }
}

/// Splits element captures into (whole match, attributes, content, content
/// start relative to the haystack).
fn element_parts<'h>(caps: &Captures<'h>) -> (regex::Match<'h>, &'h str, &'h str, usize) {
    let whole = caps.get_match();
    let attributes = caps.get(1).map_or("", |m| m.as_str());
    let content = caps.get(2);
    let content_start = content.map_or(whole.end(), |m| m.start());
    (whole, attributes, content.map_or("", |m| m.as_str()), content_start)
}
