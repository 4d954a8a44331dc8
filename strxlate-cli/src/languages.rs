//! Language codes accepted by the translation service.

use log::warn;

/// Every language code the CLI accepts, in the order default outputs are written.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "ar", "eu", "bn", "bs", "bg", "ca", "zh", "zh-TW", "hr", "cs", "da", "nl", "en", "et", "fi",
    "fr", "fr-CA", "de", "el", "gu", "he", "hi", "hu", "ga", "id", "it", "ja", "ko", "lv", "lt",
    "ms", "ml", "mt", "cnr", "ne", "nb", "pl", "pt", "ro", "ru", "sr", "si", "sk", "sl", "es",
    "sv", "ta", "te", "th", "tr", "uk", "ur", "vi", "cy",
];

/// Languages that can only be paired with the listed partners.
const RESTRICTED_PAIRS: &[(&str, &[&str])] = &[("eu", &["es"]), ("ca", &["es"])];

pub fn is_supported(lang: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&lang)
}

/// Whether the service can translate from `source` to `target`.
pub fn is_valid_pair(source: &str, target: &str) -> bool {
    let allowed = |from: &str, to: &str| {
        RESTRICTED_PAIRS
            .iter()
            .find(|(lang, _)| *lang == from)
            .is_none_or(|(_, partners)| partners.contains(&to))
    };
    allowed(source, target) && allowed(target, source)
}

/// Output languages for a run.
///
/// An empty request means every supported language except `source`. Targets
/// the service cannot reach from `source` are dropped with a warning.
pub fn resolve_output_languages(source: &str, requested: &[String]) -> Result<Vec<String>, String> {
    let candidates: Vec<String> = if requested.is_empty() {
        SUPPORTED_LANGUAGES
            .iter()
            .filter(|lang| **lang != source)
            .map(|lang| lang.to_string())
            .collect()
    } else {
        requested.to_vec()
    };

    let explicit = !requested.is_empty();
    let resolved: Vec<String> = candidates
        .into_iter()
        .filter(|target| {
            let valid = is_valid_pair(source, target);
            if !valid && explicit {
                warn!("Skipping {}: cannot translate from {} to {}", target, source, target);
            }
            valid
        })
        .collect();

    if resolved.is_empty() {
        return Err("Language code for output file is required".to_string());
    }
    Ok(resolved)
}
