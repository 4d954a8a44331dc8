#![forbid(unsafe_code)]
//! Machine translation for Android `strings.xml` files that leaves the
//! markup alone.
//!
//! The text of every `<string>`, `<string-array>` item and `<!ENTITY>` is
//! extracted into offset-tagged fragments, sent to a translation provider once
//! per distinct value, and written back at the recorded positions. Comments,
//! attributes, inner markup and formatting placeholders are copied byte for
//! byte.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use strxlate::{Extraction, IdentityTranslator, OutputFilters, ScanOptions};
//!
//! # async fn run() -> Result<(), strxlate::Error> {
//! let extraction = Extraction::scan(
//!     strxlate::Document::read_from("res/values/strings.xml")?,
//!     ScanOptions::new().with_arrays_disabled(true),
//! )?;
//! let rendered = extraction
//!     .translate(&IdentityTranslator, "en", "de", OutputFilters::new())
//!     .await?;
//! std::fs::write("strings.de.xml", rendered.text)?;
//! # Ok(())
//! # }
//! ```
//!
//! # What is extracted
//!
//! - `<string>` values, unless marked `translatable="false"` or holding an
//!   `@string/` alias
//! - `<item>` values of `<string-array>` elements, on one line or spanning many
//! - `<!ENTITY name "value">` declarations
//!
//! Values are split on markup, entity references, escaped newlines and tabs,
//! and printf-style placeholders, so that only plain text reaches the provider.

pub mod dedup;
pub mod document;
pub mod error;
pub mod fragment;
pub mod normalize;
pub mod options;
pub mod paths;
pub mod pipeline;
pub mod reinsert;
pub mod scanner;
pub mod translator;

// Re-export most used types for easy consumption
pub use crate::{
    dedup::DuplicateStore,
    document::Document,
    error::{CountStage, Error},
    fragment::{Cursor, Fragment, FragmentStore},
    normalize::{Splitter, add_escape_characters, remove_escape_characters},
    options::{OutputFilters, ScanOptions},
    paths::{output_path, resource_dir_name},
    pipeline::Extraction,
    reinsert::{Reinserter, Rendered},
    scanner::{ArrayContext, Scanner},
    translator::{IdentityTranslator, PseudoTranslator, Translator},
};
