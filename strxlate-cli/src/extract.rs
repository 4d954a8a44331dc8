//! The `extract` command: show what would be sent for translation.

use clap::Args;
use strxlate::{Document, Extraction, ScanOptions};

use crate::validation::{validate_blacklist, validate_file_path};

#[derive(Args, Debug, Clone, Default)]
pub struct ExtractArgs {
    /// Path to the strings.xml file to scan
    #[arg(short = 'f', long = "input-file")]
    pub input_file: String,

    /// Regex fragments that are never sent for translation
    #[arg(short = 'b', long = "blacklist", num_args = 1..)]
    pub blacklist: Vec<String>,

    /// Treat `@string/` alias strings as exported
    #[arg(short = 'a', long = "alias")]
    pub alias: bool,

    /// Treat `translatable="false"` strings as exported
    #[arg(short = 'n', long = "non-translatable")]
    pub non_translatable: bool,

    /// Ignore string arrays
    #[arg(long = "no-arrays", alias = "na")]
    pub no_arrays: bool,

    /// Print every fragment with its position instead of the distinct strings
    #[arg(long)]
    pub fragments: bool,

    /// Write the JSON to this file instead of stdout
    #[arg(long)]
    pub output: Option<String>,
}

/// Scans the input and renders the requested view as pretty JSON.
pub fn run_extract(args: &ExtractArgs) -> Result<String, String> {
    validate_file_path(&args.input_file)?;
    validate_blacklist(&args.blacklist)?;

    let options = ScanOptions::new()
        .with_aliases(args.alias)
        .with_non_translatable(args.non_translatable)
        .with_arrays_disabled(args.no_arrays)
        .with_blacklist(args.blacklist.clone());
    let document = Document::read_from(&args.input_file).map_err(|e| e.to_string())?;
    let extraction = Extraction::scan(document, options).map_err(|e| e.to_string())?;

    let json = if args.fragments {
        serde_json::to_string_pretty(extraction.fragments())
    } else {
        serde_json::to_string_pretty(&extraction.requests())
    };
    json.map_err(|e| format!("Error serializing to JSON: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args_with(content: &str) -> (TempDir, ExtractArgs) {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("strings.xml");
        fs::write(&input, content).unwrap();
        let args = ExtractArgs {
            input_file: input.to_string_lossy().into_owned(),
            ..ExtractArgs::default()
        };
        (dir, args)
    }

    #[test]
    fn test_extract_distinct_strings() {
        let (_dir, args) = args_with(
            r#"<string name="a">OK</string><string name="b">OK</string><string name="c">Don\'t</string>"#,
        );
        let json = run_extract(&args).unwrap();
        let values: Vec<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(values, vec!["OK", "Don't"]);
    }

    #[test]
    fn test_extract_fragments() {
        let (_dir, mut args) = args_with(r#"<string name="a">OK</string>"#);
        args.fragments = true;
        let json = run_extract(&args).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["translatable"][0]["text_value"], "OK");
        assert_eq!(value["translatable"][0]["skip_offset"], 17);
        assert_eq!(value["translatable"][0]["skip_tokens"], 0);
        assert_eq!(value["non_exportable"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_extract_reports_structural_errors() {
        let (_dir, args) = args_with("<string-array name=\"a\">\n<item>A</item>\n");
        let err = run_extract(&args).unwrap_err();
        assert!(err.contains("string-array"));
    }
}
