//! Offset-tagged fragments produced by the scanner and consumed by reinsertion.

use serde::Serialize;

/// One extracted span of a document line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragment {
    /// Zero-based index of the line the fragment belongs to.
    pub line_index: usize,
    /// Exact text matched on the line.
    pub text_value: String,
    /// Byte offset from the start of the original line.
    pub skip_offset: usize,
    /// Number of delimiter tokens to step over after `skip_offset`.
    pub skip_tokens: usize,
}

impl Fragment {
    pub fn new(
        line_index: usize,
        text_value: impl Into<String>,
        skip_offset: usize,
        skip_tokens: usize,
    ) -> Self {
        Fragment {
            line_index,
            text_value: text_value.into(),
            skip_offset,
            skip_tokens,
        }
    }

    /// The cursor from which this fragment's text is searched.
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.skip_offset, self.skip_tokens)
    }
}

/// A byte position on a line plus a number of delimiter tokens still to skip.
///
/// Resolving a cursor against a line yields the byte position after which the
/// fragment text must be looked for; this is what keeps two identical texts on
/// the same line apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub position: usize,
    pub pending_tokens: usize,
}

impl Cursor {
    pub fn new(position: usize, pending_tokens: usize) -> Self {
        Cursor {
            position,
            pending_tokens,
        }
    }

    /// Advances past `pending_tokens` occurrences of `token`, starting at
    /// `position`. A missing token leaves the position where it was.
    pub fn resolve(self, line: &str, token: Option<char>) -> usize {
        let mut position = self.position.min(line.len());
        let Some(token) = token else {
            return position;
        };
        for _ in 0..self.pending_tokens {
            match line.get(position..).and_then(|rest| rest.find(token)) {
                Some(found) => position += found + token.len_utf8(),
                None => break,
            }
        }
        position
    }
}

/// Ordered fragment collections for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FragmentStore {
    /// Text to translate, in scan order.
    pub translatable: Vec<Fragment>,
    /// Markup to remove from the output.
    pub non_exportable: Vec<Fragment>,
}

impl FragmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_translatable(&mut self, fragment: Fragment) {
        self.translatable.push(fragment);
    }

    pub(crate) fn push_non_exportable(&mut self, fragment: Fragment) {
        self.non_exportable.push(fragment);
    }

    /// Text values of the translatable fragments, in order.
    pub fn translatable_values(&self) -> impl Iterator<Item = &str> {
        self.translatable.iter().map(|f| f.text_value.as_str())
    }

    /// The translatable fragments of one line; `start` must point at the
    /// first fragment not yet consumed.
    pub fn translatable_on_line(&self, start: usize, line_index: usize) -> &[Fragment] {
        on_line(&self.translatable, start, line_index)
    }

    /// The non-exportable fragments of one line, see [`Self::translatable_on_line`].
    pub fn non_exportable_on_line(&self, start: usize, line_index: usize) -> &[Fragment] {
        on_line(&self.non_exportable, start, line_index)
    }

    /// True when both collections are ordered by line.
    pub fn is_line_ordered(&self) -> bool {
        let ordered = |fragments: &[Fragment]| {
            fragments
                .windows(2)
                .all(|pair| pair[0].line_index <= pair[1].line_index)
        };
        ordered(&self.translatable) && ordered(&self.non_exportable)
    }
}

fn on_line(fragments: &[Fragment], start: usize, line_index: usize) -> &[Fragment] {
    let rest = fragments.get(start..).unwrap_or_default();
    let count = rest
        .iter()
        .take_while(|f| f.line_index == line_index)
        .count();
    &rest[..count]
}
