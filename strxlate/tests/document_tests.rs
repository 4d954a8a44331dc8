use indoc::indoc;
use std::path::{Path, PathBuf};
use strxlate::{
    Document, Error, Extraction, IdentityTranslator, OutputFilters, PseudoTranslator, ScanOptions,
};

fn corpus_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("tests")
        .join("data")
        .join("lib")
}

fn fixture() -> Document {
    Document::read_from(corpus_root().join("strings.xml")).expect("fixture readable")
}

fn values(extraction: &Extraction) -> Vec<&str> {
    extraction.fragments().translatable_values().collect()
}

fn pseudo(extraction: &Extraction, language: &str) -> Vec<String> {
    extraction
        .requests()
        .iter()
        .map(|text| format!("[{}:{}]", language, text))
        .collect()
}

#[test]
fn extracts_every_kind_of_text_from_fixture() {
    let extraction = Extraction::scan(fixture(), ScanOptions::new()).unwrap();
    assert_eq!(
        values(&extraction),
        vec![
            "Pocket Notes",
            "Welcome to",
            "Hello",
            "you have",
            "new notes",
            "Save",
            "Save",
            "Don\\'t forget to",
            "save",
            "First line",
            "Second line",
            "Newest first",
            "Oldest first",
            "Red",
            "Blue",
        ]
    );
    assert_eq!(extraction.requests().len(), 14);
    assert!(extraction.requests().contains(&"Don't forget to".to_string()));
    assert_eq!(extraction.fragments().non_exportable.len(), 6);
    assert!(extraction.fragments().is_line_ordered());
}

#[test]
fn identity_translation_only_drops_excluded_markup() {
    let document = fixture();
    let extraction = Extraction::scan(document.clone(), ScanOptions::new()).unwrap();
    let rendered = extraction
        .render("en", extraction.requests(), OutputFilters::new())
        .unwrap();

    let expected: Vec<&str> = document
        .lines()
        .iter()
        .map(String::as_str)
        .filter(|line| {
            !line.contains("translatable=\"false\"")
                && !line.contains("name=\"alias\"")
                && !line.contains("<item>px</item>")
                && !line.contains("<item>dp</item>")
        })
        .collect();
    // The closing tag of the non-translatable array goes too; the first
    // `</string-array>` belongs to the translated array and stays.
    let mut closing_seen = 0;
    let expected: Vec<&str> = expected
        .into_iter()
        .filter(|line| {
            if line.trim() == "</string-array>" {
                closing_seen += 1;
                return closing_seen == 1;
            }
            true
        })
        .collect();

    assert_eq!(rendered.text, expected.join("\n"));
    assert_eq!(rendered.substitutions, 15);
    assert_eq!(rendered.removals, 6);
}

#[test]
fn pseudo_translation_keeps_markup_and_placeholders() {
    let extraction = Extraction::scan(fixture(), ScanOptions::new()).unwrap();
    let rendered = extraction
        .render("de", pseudo(&extraction, "de"), OutputFilters::new())
        .unwrap();

    for line in [
        r#"    <!ENTITY app_name "[de:Pocket Notes]">"#,
        r#"    <string name="title">[de:Welcome to] &app_name;</string>"#,
        r#"    <string name="greeting">[de:Hello] %1$s, [de:you have] %2$d [de:new notes]</string>"#,
        r#"    <string name="save_again">[de:Save]</string>"#,
        r#"    <string name="confirm">[de:Don\'t forget to] <b>[de:save]</b>!</string>"#,
        r#"    <string name="multiline">[de:First line]\n[de:Second line]</string>"#,
        r#"        <item>[de:Newest first]</item>"#,
        r#"        <item>@string/save</item>"#,
        r#"    <string-array name="colors"><item>[de:Red]</item><item>[de:Blue]</item></string-array>"#,
        "    <!-- Main screen -->",
    ] {
        assert!(
            rendered.text.lines().any(|l| l == line),
            "missing line {:?} in\n{}",
            line,
            rendered.text
        );
    }
    assert!(!rendered.text.contains("com.example.notes"));
}

#[tokio::test]
async fn translator_drives_the_whole_pipeline() {
    let extraction = Extraction::scan(fixture(), ScanOptions::new()).unwrap();
    let rendered = extraction
        .translate(&PseudoTranslator, "en", "fr", OutputFilters::new())
        .await
        .unwrap();
    assert!(rendered.text.contains("<item>[fr:Red]</item>"));

    let identity = extraction
        .translate(&IdentityTranslator, "en", "fr", OutputFilters::new())
        .await
        .unwrap();
    assert!(identity.text.contains("<item>Red</item>"));
}

#[test]
fn exported_non_translatable_markup_stays_verbatim() {
    let document = fixture();
    let options = ScanOptions::new().with_non_translatable(true).with_aliases(true);
    let extraction = Extraction::scan(document.clone(), options).unwrap();
    assert!(extraction.fragments().non_exportable.is_empty());

    let rendered = extraction
        .render("en", extraction.requests(), OutputFilters::new())
        .unwrap();
    assert_eq!(rendered.text, document.join());
}

#[test]
fn disabled_arrays_are_removed() {
    let extraction =
        Extraction::scan(fixture(), ScanOptions::new().with_arrays_disabled(true)).unwrap();
    assert!(!values(&extraction).contains(&"Red"));
    assert!(!values(&extraction).contains(&"Newest first"));

    let rendered = extraction
        .render("de", pseudo(&extraction, "de"), OutputFilters::new())
        .unwrap();
    assert!(!rendered.text.contains("string-array"));
    assert!(!rendered.text.contains("<item>"));
    assert!(rendered.text.contains("[de:Save]"));
}

#[test]
fn one_line_array_with_and_without_arrays() {
    let text = indoc! {r#"
        <resources>
            <string-array name="x"><item>Yes</item><item>No</item></string-array>
        </resources>
    "#};

    let extraction = Extraction::from_text(text, ScanOptions::new()).unwrap();
    assert_eq!(values(&extraction), vec!["Yes", "No"]);
    assert!(extraction.fragments().non_exportable.is_empty());

    let result = Extraction::from_text(text, ScanOptions::new().with_arrays_disabled(true));
    assert!(matches!(result, Err(Error::NothingToTranslate)));

    let with_string = format!("{}<string name=\"s\">S</string>\n", text);
    let extraction =
        Extraction::from_text(&with_string, ScanOptions::new().with_arrays_disabled(true)).unwrap();
    let removed = &extraction.fragments().non_exportable;
    assert_eq!(removed.len(), 1);
    assert_eq!(
        removed[0].text_value,
        r#"<string-array name="x"><item>Yes</item><item>No</item></string-array>"#
    );
}

#[test]
fn placeholders_never_reach_the_provider() {
    let text = r#"<string name="g">Hello %1$s, you have %d messages</string>"#;
    let extraction = Extraction::from_text(text, ScanOptions::new()).unwrap();
    assert_eq!(extraction.requests(), vec!["Hello", "you have", "messages"]);
    assert!(extraction.requests().iter().all(|r| !r.contains('%')));
}

#[test]
fn blacklisted_terms_stay_untranslated() {
    let text = r#"<string name="w">Welcome to Pocket Notes online</string>"#;
    let options = ScanOptions::new().with_blacklist(vec!["Pocket Notes".to_string()]);
    let extraction = Extraction::from_text(text, options).unwrap();
    assert_eq!(extraction.requests(), vec!["Welcome to", "online"]);

    let rendered = extraction
        .render("de", pseudo(&extraction, "de"), OutputFilters::new())
        .unwrap();
    assert_eq!(
        rendered.text,
        r#"<string name="w">[de:Welcome to] Pocket Notes [de:online]</string>"#
    );
}

#[test]
fn unterminated_array_is_a_structural_error() {
    let text = indoc! {r#"
        <resources>
            <string name="a">A</string>
            <string-array name="x">
                <item>B</item>
        </resources>
    "#};
    let result = Extraction::from_text(text, ScanOptions::new());
    assert!(matches!(result, Err(Error::UnterminatedArray { opened_at: 2 })));
}

#[test]
fn comment_and_blank_line_filters() {
    let filters = OutputFilters::new()
        .with_comments_stripped(true)
        .with_whitespace_stripped(true);
    let extraction = Extraction::scan(fixture(), ScanOptions::new()).unwrap();
    let rendered = extraction
        .render("en", extraction.requests(), filters)
        .unwrap();
    assert!(!rendered.text.contains("<!--"));
    assert!(!rendered.text.ends_with('\n'));
    assert!(rendered.text.lines().all(|line| !line.trim().is_empty()));
}
