use std::env;

use serde_json::json;

use recipe_import::{import_recipe, ImportReport};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut json_output = false;
    let mut url: Option<String> = None;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--json" => json_output = true,
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            other => url = Some(other.to_string()),
        }
    }
    let url = url.ok_or("Please provide a URL as an argument")?;

    let report = import_recipe(&url).await?;

    if json_output {
        let payload = json!({
            "recipe": report.draft,
            "method": report.method.to_string(),
            "error": report.diagnostic(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        // The payload is printed either way; the exit status carries failure
        if !report.succeeded() {
            std::process::exit(1);
        }
        return Ok(());
    }

    if !report.succeeded() {
        return Err(report.summary().into());
    }

    print_report(&report);
    Ok(())
}

fn print_usage() {
    println!("Usage: recipe-import <URL> [--json]");
    println!();
    println!("Imports a recipe from a web page and prints the normalized record.");
    println!("  --json    print the result as JSON instead of a readable block");
}

fn print_report(report: &ImportReport) {
    let draft = &report.draft;
    println!("{}", report.summary());
    println!();
    println!("Title:    {}", draft.title);
    println!("Source:   {}", draft.source_url);
    if let Some(minutes) = draft.prep_time_minutes {
        println!("Prep:     {} minutes", minutes);
    }
    if let Some(minutes) = draft.cook_time_minutes {
        println!("Cook:     {} minutes", minutes);
    }
    if !draft.servings.is_empty() {
        println!("Servings: {}", draft.servings);
    }
    if !draft.image_url.is_empty() {
        println!("Image:    {}", draft.image_url);
    }
    if !draft.ingredients.is_empty() {
        println!("\nIngredients:\n{}", draft.ingredients);
    }
    if !draft.instructions.is_empty() {
        println!("\nInstructions:\n{}", draft.instructions);
    }
}
