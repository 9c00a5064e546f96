//! Imports recipes from web pages into normalized records.
//!
//! Given a URL, the pipeline tries a cascade of extraction strategies of
//! decreasing reliability: schema.org markup embedded in the page first,
//! then one or two generative-text backends reading the reduced page text.
//! Whichever strategy wins, the resulting [`model::RecipeDraft`] has the
//! same shape and the same cleanliness guarantees, and the report records
//! which strategy produced it.
//!
//! ```no_run
//! use recipe_import::{ImportConfig, Importer};
//!
//! # async fn run() {
//! let importer = Importer::new(ImportConfig::default());
//! let report = importer.import("https://example.com/pie").await;
//! if report.succeeded() {
//!     println!("{}", report.draft.title);
//! }
//! # }
//! ```

pub mod config;
pub mod error;
pub mod extractors;
pub mod fetch;
pub mod importer;
pub mod model;
pub mod normalize;
pub mod providers;
pub mod reduce;

pub use config::ImportConfig;
pub use error::ImportError;
pub use importer::Importer;
pub use model::{ImportMethod, ImportReport, RecipeDraft};

/// Imports one recipe with configuration loaded from file and environment.
///
/// Convenience wrapper for callers that do not hold a configuration of
/// their own. Only configuration loading can fail; the import itself
/// always produces a report.
pub async fn import_recipe(url: &str) -> Result<ImportReport, ImportError> {
    let config = ImportConfig::load()?;
    Ok(Importer::new(config).import(url).await)
}
