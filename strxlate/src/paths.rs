//! Output file naming.

use std::path::{Path, PathBuf};

use unic_langid::LanguageIdentifier;

/// Android resource directory for `language`: `values-de`, `values-zh-rTW`.
///
/// Codes that parse as a language identifier are normalized (`zh-tw` becomes
/// `zh-rTW`); anything else has its first `-` rewritten to `-r` as given.
pub fn resource_dir_name(language: &str) -> String {
    match language.parse::<LanguageIdentifier>() {
        Ok(id) if id.script.is_none() && id.variants().next().is_none() => match id.region {
            Some(region) => format!("values-{}-r{}", id.language, region),
            None => format!("values-{}", id.language),
        },
        _ => format!("values-{}", language.replacen('-', "-r", 1)),
    }
}

/// Inserts `.{language}` before the extension of `file_name`, or appends
/// `.{language}.xml` when it has none.
pub fn localized_file_name(file_name: &str, language: &str) -> String {
    match file_name.rfind('.') {
        Some(dot) if dot + 1 < file_name.len() => {
            format!("{}.{}{}", &file_name[..dot], language, &file_name[dot..])
        }
        _ => format!("{}.{}.xml", file_name, language),
    }
}

/// Where the translation of `input` into `language` is written.
///
/// With `resource_dirs` the file keeps its name and goes into a
/// `values-{language}` subdirectory of `output_dir`; otherwise it is written
/// directly into `output_dir` under a localized name.
pub fn output_path(input: &Path, output_dir: &Path, language: &str, resource_dirs: bool) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "strings.xml".to_string());

    if resource_dirs {
        output_dir.join(resource_dir_name(language)).join(file_name)
    } else {
        output_dir.join(localized_file_name(&file_name, language))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_dir_name() {
        assert_eq!(resource_dir_name("de"), "values-de");
        assert_eq!(resource_dir_name("zh-TW"), "values-zh-rTW");
        assert_eq!(resource_dir_name("fr-ca"), "values-fr-rCA");
        assert_eq!(resource_dir_name("cnr"), "values-cnr");
    }

    #[test]
    fn test_resource_dir_name_fallback() {
        assert_eq!(resource_dir_name("not a code"), "values-not a code");
        assert_eq!(resource_dir_name("sr-Latn"), "values-sr-rLatn");
    }

    #[test]
    fn test_localized_file_name() {
        assert_eq!(localized_file_name("strings.xml", "de"), "strings.de.xml");
        assert_eq!(localized_file_name("a.b.xml", "fr-CA"), "a.b.fr-CA.xml");
        assert_eq!(localized_file_name("strings", "ja"), "strings.ja.xml");
        assert_eq!(localized_file_name("strings.", "ja"), "strings..ja.xml");
    }

    #[test]
    fn test_output_path() {
        let input = Path::new("/project/res/values/strings.xml");
        let out = Path::new("/tmp/out");
        assert_eq!(
            output_path(input, out, "de", false),
            PathBuf::from("/tmp/out/strings.de.xml")
        );
        assert_eq!(
            output_path(input, out, "zh-TW", true),
            PathBuf::from("/tmp/out/values-zh-rTW/strings.xml")
        );
    }
}
