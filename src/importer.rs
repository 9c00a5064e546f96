use log::{error, info, warn};

use crate::config::ImportConfig;
use crate::extractors::{ExtractStrategy, LlmExtractor, StructuredExtractor};
use crate::model::{ImportMethod, ImportReport, RecipeDraft, StrategyFailure};

/// Runs the extraction cascade for a URL.
///
/// Strategies run strictly in order, each at most once: structured markup
/// first, then the configured model backend, then the other one. A strategy
/// is beaten either by an error or by a draft with no title. There are no
/// retries within a strategy; a transient failure simply moves the cascade
/// along, and only exhaustion of the whole chain is a user-visible failure.
pub struct Importer {
    config: ImportConfig,
}

impl Importer {
    pub fn new(config: ImportConfig) -> Self {
        Importer { config }
    }

    fn strategies(&self) -> Vec<Box<dyn ExtractStrategy>> {
        vec![
            Box::new(StructuredExtractor::new(&self.config)),
            Box::new(LlmExtractor::new(&self.config.provider, &self.config)),
            Box::new(LlmExtractor::new(
                self.config.secondary_provider(),
                &self.config,
            )),
        ]
    }

    /// Imports one recipe. Always yields a report, never an error.
    pub async fn import(&self, url: &str) -> ImportReport {
        let url = url.trim();
        let mut failures: Vec<StrategyFailure> = Vec::new();

        for strategy in self.strategies() {
            let name = strategy.name().to_string();
            match strategy.extract(url).await {
                Ok(draft) if draft.is_usable() => {
                    info!("Imported {} using the {} strategy", url, name);
                    return ImportReport {
                        draft,
                        method: strategy.method(),
                        failures,
                    };
                }
                Ok(_) => {
                    warn!("Strategy {} produced a draft with no title for {}", name, url);
                    failures.push(StrategyFailure::new(&name, "returned a draft with no title"));
                }
                Err(e) => {
                    warn!("Strategy {} failed for {}: {}", name, url, e);
                    failures.push(StrategyFailure::new(&name, &e.to_string()));
                }
            }
        }

        error!("All strategies failed for {}", url);
        ImportReport {
            draft: RecipeDraft::empty(url),
            method: ImportMethod::Failed,
            failures,
        }
    }
}
