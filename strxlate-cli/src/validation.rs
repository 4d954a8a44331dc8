use std::path::Path;
use unic_langid::LanguageIdentifier;

use crate::languages::is_supported;

/// Everything checked before a run starts.
pub struct ValidationContext {
    pub input_file: Option<String>,
    pub output_directory: Option<String>,
    pub language_codes: Vec<String>,
    pub blacklist: Vec<String>,
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationContext {
    pub fn new() -> Self {
        Self {
            input_file: None,
            output_directory: None,
            language_codes: Vec::new(),
            blacklist: Vec::new(),
        }
    }

    pub fn with_input_file(mut self, file: String) -> Self {
        self.input_file = Some(file);
        self
    }

    pub fn with_output_directory(mut self, directory: String) -> Self {
        self.output_directory = Some(directory);
        self
    }

    pub fn with_language_code(mut self, lang: String) -> Self {
        self.language_codes.push(lang);
        self
    }

    pub fn with_blacklist(mut self, blacklist: Vec<String>) -> Self {
        self.blacklist = blacklist;
        self
    }
}

/// Validate file path exists and is readable
pub fn validate_file_path(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        return Err(format!("File does not exist: {}", path));
    }

    if !path_obj.is_file() {
        return Err(format!("Path is not a file: {}", path));
    }

    Ok(())
}

/// Validate the output directory exists
pub fn validate_output_directory(path: &str) -> Result<(), String> {
    let path_obj = Path::new(path);

    if !path_obj.exists() {
        return Err(format!("Output directory does not exist: {}", path));
    }

    if !path_obj.is_dir() {
        return Err(format!("Output path is not a directory: {}", path));
    }

    Ok(())
}

/// Validate language code format using unic-langid, then check that it is
/// one of the codes the translation service knows.
pub fn validate_language_code(lang: &str) -> Result<(), String> {
    if lang.is_empty() {
        return Err("Language code cannot be empty".to_string());
    }

    if lang.parse::<LanguageIdentifier>().is_err() {
        return Err(format!(
            "Invalid language code format: {}. Expected valid BCP 47 language identifier",
            lang
        ));
    }

    if !is_supported(lang) {
        return Err(format!("Unsupported language code: {}", lang));
    }

    Ok(())
}

/// Validate that the blacklist compiles into the splitter pattern
pub fn validate_blacklist(blacklist: &[String]) -> Result<(), String> {
    strxlate::Splitter::new(blacklist)
        .map(|_| ())
        .map_err(|e| match e.detail() {
            Some(detail) => format!("{} ({})", e, detail),
            None => e.to_string(),
        })
}

/// Validate a complete validation context
pub fn validate_context(context: &ValidationContext) -> Result<(), String> {
    if let Some(ref input) = context.input_file {
        validate_file_path(input).map_err(|e| format!("Input file validation failed: {}", e))?;
    }

    if let Some(ref directory) = context.output_directory {
        validate_output_directory(directory)
            .map_err(|e| format!("Output validation failed: {}", e))?;
    }

    for lang in &context.language_codes {
        validate_language_code(lang)
            .map_err(|e| format!("Language code validation failed: {}", e))?;
    }

    validate_blacklist(&context.blacklist)
        .map_err(|e| format!("Blacklist validation failed: {}", e))?;

    Ok(())
}
