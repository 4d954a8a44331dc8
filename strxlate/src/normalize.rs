//! Value splitting and escape handling.
//!
//! A raw value taken from the resource file is split into the chunks that are
//! actually worth translating: markup, entity references, escaped control
//! characters and printf-style placeholders act as delimiters and are never
//! sent to the provider. The escape helpers convert between the on-disk form
//! (`Don\'t`) and the plain text the provider sees (`Don't`).

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Error;

/// Delimiters inside a value: escaped CRLF/LF, escaped TAB, entity references,
/// opening or closing tags, and formatting placeholders such as `%1$s` or `%.2f`.
pub const DEFAULT_DELIMITERS: &str =
    r"(?:\\r)?\\n|\\t|&\S+;|</?[^>]*?>|%(?:\d+\$)?[a-zA-Z]*?(?:\d+(?:\.\d+)?)?[a-zA-Z]+";

lazy_static! {
    static ref WRAPPED_IN_DOUBLE_QUOTES: Regex = Regex::new(r#"^"(.+)"$"#).unwrap();
    static ref HAS_ESCAPE: Regex = Regex::new(r#"\\(['"@?])"#).unwrap();
    static ref DEFAULT_SEPARATOR: Regex =
        Regex::new(&format!("(?:{})", DEFAULT_DELIMITERS)).unwrap();
}

/// Splits raw values into translatable chunks.
#[derive(Debug, Clone)]
pub struct Splitter {
    separator: Regex,
}

impl Splitter {
    /// Builds a splitter from the default delimiters plus the given blacklist.
    ///
    /// Blacklist entries are regex fragments joined into the same alternation;
    /// an entry that does not compile is a configuration error.
    pub fn new(blacklist: &[String]) -> Result<Self, Error> {
        let pattern = if blacklist.is_empty() {
            format!("(?:{})", DEFAULT_DELIMITERS)
        } else {
            format!("(?:{}|{})", DEFAULT_DELIMITERS, blacklist.join("|"))
        };
        let separator = Regex::new(&pattern).map_err(|source| Error::InvalidBlacklist {
            patterns: blacklist.to_vec(),
            source,
        })?;
        Ok(Self { separator })
    }

    /// Splits `raw` on the delimiters, trims each chunk of surrounding
    /// whitespace and ASCII punctuation, and drops empty chunks.
    pub fn split<'a>(&self, raw: &'a str) -> Vec<&'a str> {
        self.split_with_offsets(raw)
            .into_iter()
            .map(|(_, chunk)| chunk)
            .collect()
    }

    /// Like [`Splitter::split`], also returning each chunk's byte offset in `raw`.
    pub fn split_with_offsets<'a>(&self, raw: &'a str) -> Vec<(usize, &'a str)> {
        let mut chunks = Vec::new();
        let mut piece_start = 0;
        let bounds = self
            .separator
            .find_iter(raw)
            .map(|m| (m.start(), m.end()))
            .chain(std::iter::once((raw.len(), raw.len())));
        for (delimiter_start, delimiter_end) in bounds {
            let piece = &raw[piece_start..delimiter_start];
            let chunk = trim_chunk(piece);
            if !chunk.is_empty() {
                let leading = piece.len() - piece.trim_start_matches(is_trimmable).len();
                chunks.push((piece_start + leading, chunk));
            }
            piece_start = delimiter_end;
        }
        chunks
    }
}

impl Default for Splitter {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.clone(),
        }
    }
}

fn is_trimmable(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}' || c == '\u{A0}' || c.is_ascii_punctuation()
}

/// Trims whitespace and ASCII punctuation from both ends of a chunk.
pub fn trim_chunk(chunk: &str) -> &str {
    chunk.trim_matches(is_trimmable)
}

/// Converts an on-disk value into the plain text sent for translation.
pub fn remove_escape_characters(value: &str) -> String {
    let unquoted = WRAPPED_IN_DOUBLE_QUOTES.replace(value, "$1");
    HAS_ESCAPE.replace_all(&unquoted, "$1").into_owned()
}

/// Converts translated text back into a form that is safe inside the markup.
pub fn add_escape_characters(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 8);
    let mut previous = None;
    for c in value.chars() {
        match c {
            '\'' | '"' | '@' | '?' if previous != Some('\\') => {
                out.push('\\');
                out.push(c);
            }
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            _ => out.push(c),
        }
        previous = Some(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_placeholders() {
        let splitter = Splitter::default();
        assert_eq!(
            splitter.split("Hello %1$s, you have %d messages"),
            vec!["Hello", "you have", "messages"]
        );
    }

    #[test]
    fn test_split_on_escaped_newlines_and_tabs() {
        let splitter = Splitter::default();
        assert_eq!(
            splitter.split(r"First line\nSecond line\r\nThird\tFourth"),
            vec!["First line", "Second line", "Third", "Fourth"]
        );
    }

    #[test]
    fn test_split_on_tags_and_entities() {
        let splitter = Splitter::default();
        assert_eq!(
            splitter.split("<b>Bold</b> text&amp;more &app_name; rocks"),
            vec!["Bold", "text", "more", "rocks"]
        );
    }

    #[test]
    fn test_split_with_offsets() {
        let splitter = Splitter::default();
        let raw = "Go <b>now</b>, %s!";
        assert_eq!(splitter.split_with_offsets(raw), vec![(0, "Go"), (6, "now")]);
    }

    #[test]
    fn test_split_keeps_inner_punctuation() {
        let splitter = Splitter::default();
        assert_eq!(splitter.split("  Don\\'t stop, ok?  "), vec!["Don\\'t stop, ok"]);
    }

    #[test]
    fn test_split_drops_punctuation_only_chunks() {
        let splitter = Splitter::default();
        assert!(splitter.split("%s: %d").is_empty());
        assert!(splitter.split("...").is_empty());
    }

    #[test]
    fn test_blacklist_adds_delimiters() {
        let splitter = Splitter::new(&["Acme".to_string()]).unwrap();
        assert_eq!(splitter.split("Welcome to Acme Cloud"), vec!["Welcome to", "Cloud"]);
    }

    #[test]
    fn test_invalid_blacklist() {
        let result = Splitter::new(&["(unclosed".to_string()]);
        assert!(matches!(result, Err(Error::InvalidBlacklist { .. })));
    }

    #[test]
    fn test_trim_chunk() {
        assert_eq!(trim_chunk("\u{FEFF}\u{A0} -Hi!- "), "Hi");
        assert_eq!(trim_chunk("42"), "42");
    }

    #[test]
    fn test_remove_escape_characters() {
        assert_eq!(remove_escape_characters(r"Don\'t"), "Don't");
        assert_eq!(remove_escape_characters(r#"\"quoted\" \@home \?"#), r#""quoted" @home ?"#);
        assert_eq!(remove_escape_characters(r#""wrapped""#), "wrapped");
        assert_eq!(remove_escape_characters(r#""""#), r#""""#);
    }

    #[test]
    fn test_add_escape_characters() {
        assert_eq!(add_escape_characters("Don't"), r"Don\'t");
        assert_eq!(add_escape_characters(r"Don\'t"), r"Don\'t");
        assert_eq!(add_escape_characters("@home?"), r"\@home\?");
        assert_eq!(add_escape_characters("a < b & c"), "a &lt; b &amp; c");
    }

    #[test]
    fn test_escape_round_trip_is_idempotent_on_canonical_text() {
        let canonical = r#"Say \"hi\" to \@bob, won\'t you\?"#;
        assert_eq!(add_escape_characters(&remove_escape_characters(canonical)), canonical);
    }
}
