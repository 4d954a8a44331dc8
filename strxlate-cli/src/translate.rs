//! The `translate` command: one input file, one output file per language.

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use strxlate::{
    Document, Error, Extraction, IdentityTranslator, OutputFilters, PseudoTranslator,
    ScanOptions, Translator, output_path,
};

use crate::{
    ProviderKind,
    config::FileConfig,
    ibm::IbmWatsonTranslator,
    languages::resolve_output_languages,
    validation::{ValidationContext, validate_context},
};

#[derive(Args, Debug, Clone, Default)]
pub struct TranslateArgs {
    /// Path to the strings.xml file to translate
    #[arg(short = 'f', long = "input-file")]
    pub input_file: String,

    /// Language code of the input file
    #[arg(short = 'i', long = "input-language")]
    pub input_language: Option<String>,

    /// Language codes to translate into (default: every supported language)
    #[arg(short = 'o', long = "output-language", num_args = 1.., value_delimiter = ',')]
    pub output_languages: Vec<String>,

    /// Directory for the output files (default: next to the input file)
    #[arg(short = 'd', long = "output-directory")]
    pub output_directory: Option<PathBuf>,

    /// Write `values-{lang}/{file}` resource directories
    #[arg(short = 'm', long = "make-resource-dirs")]
    pub make_resource_dirs: bool,

    /// Regex fragments that are never sent for translation
    #[arg(short = 'b', long = "blacklist", num_args = 1..)]
    pub blacklist: Vec<String>,

    /// Keep `@string/` alias strings in the output
    #[arg(short = 'a', long = "alias")]
    pub alias: bool,

    /// Keep `translatable="false"` strings in the output
    #[arg(short = 'n', long = "non-translatable")]
    pub non_translatable: bool,

    /// Do not translate string arrays; remove them from the output
    #[arg(long = "no-arrays", alias = "na")]
    pub no_arrays: bool,

    /// Remove single-line XML comments from the output
    #[arg(long = "no-comments", alias = "nc")]
    pub no_comments: bool,

    /// Remove blank lines from the output
    #[arg(long = "no-whitespace", alias = "nw")]
    pub no_whitespace: bool,

    /// Skip languages whose output file already exists
    #[arg(long = "no-clobber")]
    pub no_clobber: bool,

    /// Translation provider
    #[arg(long, value_enum)]
    pub provider: Option<ProviderKind>,

    /// IBM Cloud API key
    #[arg(short = 'k', long = "api-key", env = "IBM_TRANSLATOR_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// IBM Cloud API URL
    #[arg(short = 'u', long = "api-url", env = "IBM_TRANSLATOR_API_URL")]
    pub api_url: Option<String>,

    /// TOML file with defaults for any of the options above
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// A fully resolved `translate` run.
#[derive(Clone, Debug)]
pub struct TranslateSettings {
    pub input_file: PathBuf,
    pub input_language: String,
    pub output_languages: Vec<String>,
    pub output_directory: PathBuf,
    pub resource_dirs: bool,
    pub scan: ScanOptions,
    pub filters: OutputFilters,
    pub no_clobber: bool,
    pub debug: bool,
    pub provider: ProviderKind,
    pub api_key: Option<String>,
    pub api_url: Option<String>,
}

impl TranslateArgs {
    /// Merges the arguments with `config` and validates the result.
    pub fn resolve(&self, config: &FileConfig, debug: bool) -> Result<TranslateSettings, String> {
        let input_language = self
            .input_language
            .clone()
            .or_else(|| config.input_language.clone())
            .ok_or_else(|| "Language code for input file is required".to_string())?;
        let requested = if self.output_languages.is_empty() {
            config.output_languages.clone()
        } else {
            self.output_languages.clone()
        };
        let blacklist = if self.blacklist.is_empty() {
            config.blacklist.clone()
        } else {
            self.blacklist.clone()
        };
        let output_directory = self
            .output_directory
            .clone()
            .or_else(|| config.output_directory.clone())
            .unwrap_or_else(|| default_output_directory(Path::new(&self.input_file)));

        let mut context = ValidationContext::new()
            .with_input_file(self.input_file.clone())
            .with_output_directory(output_directory.to_string_lossy().into_owned())
            .with_language_code(input_language.clone())
            .with_blacklist(blacklist.clone());
        for lang in &requested {
            context = context.with_language_code(lang.clone());
        }
        validate_context(&context)?;

        let output_languages = resolve_output_languages(&input_language, &requested)?;

        Ok(TranslateSettings {
            input_file: PathBuf::from(&self.input_file),
            input_language,
            output_languages,
            output_directory,
            resource_dirs: self.make_resource_dirs || config.make_resource_dirs,
            scan: ScanOptions::new()
                .with_aliases(self.alias || config.alias)
                .with_non_translatable(self.non_translatable || config.non_translatable)
                .with_arrays_disabled(self.no_arrays || config.no_arrays)
                .with_blacklist(blacklist),
            filters: OutputFilters::new()
                .with_comments_stripped(self.no_comments || config.no_comments)
                .with_whitespace_stripped(self.no_whitespace || config.no_whitespace),
            no_clobber: self.no_clobber || config.no_clobber,
            debug,
            provider: self.provider.or(config.provider).unwrap_or(ProviderKind::Ibm),
            api_key: self.api_key.clone().or_else(|| config.api_key.clone()),
            api_url: self.api_url.clone().or_else(|| config.api_url.clone()),
        })
    }
}

fn default_output_directory(input: &Path) -> PathBuf {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

impl TranslateSettings {
    /// True when the only output language is the input language: the input
    /// is scanned and dumped, but nothing is translated or written.
    pub fn is_dry_run(&self) -> bool {
        self.output_languages.len() == 1 && self.output_languages[0] == self.input_language
    }

    /// Builds the selected provider.
    pub fn translator(&self) -> Result<Box<dyn Translator>, String> {
        if self.is_dry_run() {
            return Ok(Box::new(IdentityTranslator));
        }
        match self.provider {
            ProviderKind::Identity => Ok(Box::new(IdentityTranslator)),
            ProviderKind::Pseudo => Ok(Box::new(PseudoTranslator)),
            ProviderKind::Ibm => {
                let api_key = self
                    .api_key
                    .as_deref()
                    .filter(|key| !key.is_empty())
                    .ok_or_else(|| "IBM Cloud account API key is required".to_string())?;
                let api_url = self
                    .api_url
                    .as_deref()
                    .filter(|url| !url.is_empty())
                    .ok_or_else(|| "IBM Cloud account API URL is required".to_string())?;
                IbmWatsonTranslator::new(api_key, api_url)
                    .map(|provider| Box::new(provider) as Box<dyn Translator>)
                    .map_err(|e| e.to_string())
            }
        }
    }
}

/// What a run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub strings: usize,
    pub distinct: usize,
}

/// Translates the input file into every output language, in order.
///
/// The input is scanned and validated before the provider is called. The
/// first failing language stops the run; files already written stay.
pub async fn run_translate(
    settings: &TranslateSettings,
    translator: &dyn Translator,
) -> Result<RunSummary, Error> {
    let document = Document::read_from(&settings.input_file)?;
    let extraction = Extraction::scan(document, settings.scan.clone())?;
    let requests = extraction.requests();

    let mut summary = RunSummary {
        strings: extraction.duplicates().len(),
        distinct: requests.len(),
        ..RunSummary::default()
    };
    info!(
        "Extracted {} strings ({} distinct) from {}",
        summary.strings,
        summary.distinct,
        settings.input_file.display()
    );

    if settings.debug {
        write_debug_dump(&settings.output_directory, &settings.input_language, &requests)?;
    }
    if settings.is_dry_run() {
        info!("Output language equals input language; nothing to translate");
        return Ok(summary);
    }

    for language in &settings.output_languages {
        let path = output_path(
            &settings.input_file,
            &settings.output_directory,
            language,
            settings.resource_dirs,
        );
        if settings.no_clobber && path.exists() {
            warn!("Skipping {}: {} already exists", language, path.display());
            summary.skipped.push(path);
            continue;
        }

        let bar = spinner(format!(
            "Translating {} strings into {} with {}...",
            requests.len(),
            language,
            translator.provider_name()
        ));
        let translated = match translator
            .translate_batch(&requests, &settings.input_language, language)
            .await
        {
            Ok(translated) => translated,
            Err(e) => {
                bar.abandon_with_message(format!("❌ {} failed", language));
                return Err(e);
            }
        };

        if settings.debug {
            write_debug_dump(&settings.output_directory, language, &translated)?;
        }

        let rendered = match extraction.render(language, translated, settings.filters) {
            Ok(rendered) => rendered,
            Err(e) => {
                bar.abandon_with_message(format!("❌ {} failed", language));
                return Err(e);
            }
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &rendered.text)?;
        bar.finish_and_clear();

        debug!(
            "{}: {} substitutions, {} removals",
            language, rendered.substitutions, rendered.removals
        );
        info!("Wrote {}", path.display());
        summary.written.push(path);
    }

    Ok(summary)
}

/// Writes `debug.{lang}.txt` with the pretty JSON array of `values`.
pub fn write_debug_dump(directory: &Path, language: &str, values: &[String]) -> Result<PathBuf, Error> {
    let path = directory.join(format!("debug.{}.txt", language));
    let json = serde_json::to_string_pretty(values)?;
    fs::write(&path, json)?;
    debug!("Wrote {}", path.display());
    Ok(path)
}

fn spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {wide_msg}") {
        bar.set_style(style);
    }
    bar.enable_steady_tick(Duration::from_millis(100));
    bar.set_message(message);
    bar
}
