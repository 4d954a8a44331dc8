//! Options controlling what the scanner extracts and how output lines are filtered.

/// Extraction behavior for [`crate::Scanner`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScanOptions {
    /// Keep `translatable="false"` strings and arrays in the output (untranslated).
    pub export_non_translatable: bool,
    /// Keep strings whose value is an `@string/` alias in the output.
    pub export_aliases: bool,
    /// Do not translate `<string-array>` elements; remove them from the output.
    pub disable_arrays: bool,
    /// Extra regex fragments treated as split delimiters inside values.
    pub blacklist: Vec<String>,
}

impl ScanOptions {
    /// Creates default scan options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables/disables exporting non-translatable strings.
    pub fn with_non_translatable(mut self, export: bool) -> Self {
        self.export_non_translatable = export;
        self
    }

    /// Enables/disables exporting alias references.
    pub fn with_aliases(mut self, export: bool) -> Self {
        self.export_aliases = export;
        self
    }

    /// Enables/disables string-array translation.
    pub fn with_arrays_disabled(mut self, disabled: bool) -> Self {
        self.disable_arrays = disabled;
        self
    }

    /// Sets the blacklist of extra delimiter patterns.
    pub fn with_blacklist(mut self, blacklist: Vec<String>) -> Self {
        self.blacklist = blacklist;
        self
    }
}

/// Line filters applied by [`crate::Reinserter`] after substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputFilters {
    /// Remove single-line `<!-- ... -->` comments.
    pub strip_comments: bool,
    /// Drop every line that is blank after substitution.
    pub strip_whitespace: bool,
}

impl OutputFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_comments_stripped(mut self, strip: bool) -> Self {
        self.strip_comments = strip;
        self
    }

    pub fn with_whitespace_stripped(mut self, strip: bool) -> Self {
        self.strip_whitespace = strip;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_options_builder() {
        let options = ScanOptions::new()
            .with_non_translatable(true)
            .with_arrays_disabled(true)
            .with_blacklist(vec!["Foo".to_string()]);
        assert!(options.export_non_translatable);
        assert!(!options.export_aliases);
        assert!(options.disable_arrays);
        assert_eq!(options.blacklist, vec!["Foo".to_string()]);
    }

    #[test]
    fn test_output_filters_default_is_noop() {
        let filters = OutputFilters::default();
        assert!(!filters.strip_comments);
        assert!(!filters.strip_whitespace);
        let filters = filters.with_comments_stripped(true);
        assert!(filters.strip_comments);
    }
}
