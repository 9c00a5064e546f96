mod llm;
mod structured;

pub use self::llm::LlmExtractor;
pub use self::structured::StructuredExtractor;

use async_trait::async_trait;

use crate::error::ImportError;
use crate::model::{ImportMethod, RecipeDraft};

/// One way of turning a recipe URL into a draft.
///
/// Each strategy owns its whole attempt, network fetch included, so the
/// cascade can treat them uniformly.
#[async_trait]
pub trait ExtractStrategy: Send + Sync {
    /// Name used in logs and failure diagnostics
    fn name(&self) -> &str;

    /// Tag recorded on the report when this strategy wins
    fn method(&self) -> ImportMethod;

    /// Run the extraction end to end for one URL
    async fn extract(&self, url: &str) -> Result<RecipeDraft, ImportError>;
}
