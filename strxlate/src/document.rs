//! Line-oriented model of a resource file.

use std::{fs, path::Path};

use crate::error::Error;

/// An immutable, ordered sequence of lines split on `\r?\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Splits `text` into lines. A trailing newline yields a final empty line,
    /// so [`Document::join`] reproduces it.
    pub fn parse(text: &str) -> Self {
        let lines = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        Document { lines }
    }

    /// Reads and splits a UTF-8 file.
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let text = fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Joins the lines with a single `\n`.
    pub fn join(&self) -> String {
        self.lines.join("\n")
    }
}

impl std::str::FromStr for Document {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}
