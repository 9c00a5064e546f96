//! Simple API usage with the convenience function
//!
//! This example shows the two ways to run an import: the one-call
//! convenience function, and an explicitly configured importer.

use recipe_import::{import_recipe, ImportConfig, Importer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Simple import: configuration comes from config.toml and the environment
    println!("=== Simple Import ===");
    let report = import_recipe("https://www.bbcgoodfood.com/recipes/classic-cottage-pie").await?;
    println!("{}", report.summary());
    if report.succeeded() {
        println!("Title: {}", report.draft.title);
        println!("Ingredients:\n{}", report.draft.ingredients);
    }

    // Explicit configuration: pick the model backend in code
    println!("\n=== Configured Import ===");
    let mut config = ImportConfig::default();
    config.provider = "ollama".to_string();
    config.ollama.model = "llama3.2".to_string();

    let importer = Importer::new(config);
    let report = importer
        .import("https://www.bbcgoodfood.com/recipes/classic-cottage-pie")
        .await;
    println!("Method: {}", report.method);
    for failure in &report.failures {
        println!("Tried {}: {}", failure.strategy, failure.message);
    }

    Ok(())
}
