use async_trait::async_trait;
use html_escape::decode_html_entities;
use log::debug;
use scraper::{Html, Selector};
use serde_json::Value;
use std::time::Duration;

use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::extractors::ExtractStrategy;
use crate::fetch::PageFetcher;
use crate::model::{ImportMethod, RecipeDraft};
use crate::normalize::normalize;

/// Extracts recipes from pages that publish schema.org Recipe markup as
/// JSON-LD. Fastest and most precise strategy, but only covers sites that
/// embed the markup.
///
/// Every field is mapped independently: a single malformed field falls back
/// to its default instead of sinking the whole extraction.
pub struct StructuredExtractor {
    fetcher: PageFetcher,
}

impl StructuredExtractor {
    pub fn new(config: &ImportConfig) -> Self {
        StructuredExtractor {
            fetcher: PageFetcher::new(Duration::from_secs(config.fetch_timeout)),
        }
    }
}

#[async_trait]
impl ExtractStrategy for StructuredExtractor {
    fn name(&self) -> &str {
        "standard"
    }

    fn method(&self) -> ImportMethod {
        ImportMethod::Standard
    }

    async fn extract(&self, url: &str) -> Result<RecipeDraft, ImportError> {
        let html = self.fetcher.fetch(url).await?;
        parse_document(url, &html)
    }
}

/// Parses the first schema.org Recipe node found in a page's JSON-LD blocks.
pub fn parse_document(url: &str, html: &str) -> Result<RecipeDraft, ImportError> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("script[type='application/ld+json']").unwrap();

    // Try each script element until one yields a recipe node
    for script in document.select(&selector) {
        let cleaned_json = sanitize_json(&script.inner_html());
        if let Ok(json_ld) = serde_json::from_str::<Value>(&cleaned_json) {
            if let Some(node) = find_recipe_node(&json_ld) {
                debug!("Recipe node: {:#?}", node);
                return Ok(draft_from_node(url, node));
            }
        }
    }

    Err(ImportError::NoStructuredData)
}

// Clean JSON strings before parsing
fn sanitize_json(json_str: &str) -> String {
    let mut cleaned = json_str.trim().to_string();

    // Some sites prepend comments or CDATA noise before the object
    if !cleaned.starts_with('{') && !cleaned.starts_with('[') {
        if let Some(start) = cleaned.find('{') {
            cleaned = cleaned[start..].to_string();
        }
    }

    // Trailing commas and stray HTML comments break strict parsers
    cleaned = cleaned.replace(",]", "]").replace(",}", "}");
    cleaned = cleaned.replace("<!--", "").replace("-->", "");

    cleaned
}

/// The node may sit at the top level, inside an array, or inside an @graph.
fn find_recipe_node(json_ld: &Value) -> Option<&Value> {
    if let Some(items) = json_ld.as_array() {
        return items.iter().find(|item| is_recipe_node(item));
    }
    if is_recipe_node(json_ld) {
        return Some(json_ld);
    }
    if let Some(graph) = json_ld.get("@graph").and_then(Value::as_array) {
        return graph.iter().find(|item| is_recipe_node(item));
    }
    None
}

fn is_recipe_node(node: &Value) -> bool {
    match node.get("@type") {
        Some(Value::String(kind)) => kind == "Recipe",
        Some(Value::Array(kinds)) => kinds.iter().any(|kind| kind.as_str() == Some("Recipe")),
        _ => false,
    }
}

fn decode_html_symbols(text: &str) -> String {
    // for some reason need to decode twice to get the correct string
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

fn draft_from_node(url: &str, node: &Value) -> RecipeDraft {
    RecipeDraft {
        title: string_field(node, "name"),
        source_url: url.to_string(),
        ingredients: normalize(&ingredient_lines(node).join("\n")),
        instructions: normalize(&instruction_lines(node).join("\n")),
        prep_time_minutes: duration_field(node, "prepTime"),
        cook_time_minutes: duration_field(node, "cookTime"),
        servings: yield_text(node),
        image_url: image_field(node),
    }
}

fn string_field(node: &Value, key: &str) -> String {
    node.get(key)
        .and_then(Value::as_str)
        .map(decode_html_symbols)
        .unwrap_or_default()
}

fn ingredient_lines(node: &Value) -> Vec<String> {
    match node.get("recipeIngredient") {
        Some(Value::Array(items)) => items.iter().filter_map(ingredient_entry).collect(),
        Some(Value::String(blob)) => vec![decode_html_symbols(blob)],
        _ => Vec::new(),
    }
}

// Usually a bare string; some sites publish ingredient objects with
// separate amount and name fields, which join amount-first.
fn ingredient_entry(entry: &Value) -> Option<String> {
    if let Some(text) = entry.as_str() {
        return Some(decode_html_symbols(text));
    }
    if let Some(name) = entry.get("name").and_then(Value::as_str) {
        let amount = entry.get("amount").and_then(Value::as_str).unwrap_or("");
        let line = format!("{amount} {name}");
        return Some(decode_html_symbols(line.trim()));
    }
    None
}

fn instruction_lines(node: &Value) -> Vec<String> {
    match node.get("recipeInstructions") {
        Some(Value::String(blob)) => vec![decode_html_symbols(blob)],
        Some(Value::Array(items)) => items.iter().flat_map(instruction_entry).collect(),
        _ => Vec::new(),
    }
}

// One entry of a recipeInstructions array: a bare string, a HowToStep, a
// HowToSection wrapping further steps, or another nested array.
fn instruction_entry(entry: &Value) -> Vec<String> {
    if let Some(text) = entry.as_str() {
        return vec![decode_html_symbols(text)];
    }
    if let Some(items) = entry.as_array() {
        return items.iter().flat_map(instruction_entry).collect();
    }
    if let Some(steps) = entry.get("itemListElement").and_then(Value::as_array) {
        return steps.iter().flat_map(instruction_entry).collect();
    }
    if let Some(text) = entry.get("text").and_then(Value::as_str) {
        return vec![decode_html_symbols(text)];
    }
    Vec::new()
}

fn duration_field(node: &Value, key: &str) -> Option<u32> {
    node.get(key)
        .and_then(Value::as_str)
        .and_then(parse_duration_minutes)
}

/// Parses an ISO-8601 duration ("PT1H30M", "P0DT0H45M", "PT5400.0S") into
/// whole minutes.
///
/// Fractional parts are truncated and leftover seconds round up, so a
/// sub-minute duration never reads as zero. Malformed values yield None; a
/// bad duration must not cost the rest of the fields.
fn parse_duration_minutes(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    let rest = trimmed
        .strip_prefix('P')
        .or_else(|| trimmed.strip_prefix('p'))?;

    let mut minutes: u32 = 0;
    let mut seconds: u32 = 0;
    let mut number = String::new();
    let mut in_time = false;
    let mut in_fraction = false;
    let mut matched = false;

    for c in rest.chars() {
        match c {
            'T' | 't' => {
                in_time = true;
                number.clear();
                in_fraction = false;
            }
            '0'..='9' => {
                if !in_fraction {
                    number.push(c);
                }
            }
            '.' | ',' => {
                if number.is_empty() {
                    return None;
                }
                in_fraction = true;
            }
            'D' | 'd' => {
                let value = take_number(&mut number, &mut in_fraction)?;
                minutes = minutes.checked_add(value.checked_mul(24 * 60)?)?;
                matched = true;
            }
            'H' | 'h' => {
                let value = take_number(&mut number, &mut in_fraction)?;
                minutes = minutes.checked_add(value.checked_mul(60)?)?;
                matched = true;
            }
            'M' | 'm' => {
                // Calendar months before the T separator have no minute value
                if !in_time {
                    return None;
                }
                let value = take_number(&mut number, &mut in_fraction)?;
                minutes = minutes.checked_add(value)?;
                matched = true;
            }
            'S' | 's' => {
                seconds = take_number(&mut number, &mut in_fraction)?;
                matched = true;
            }
            _ => return None,
        }
    }

    if seconds > 0 {
        minutes = minutes.checked_add(seconds.div_ceil(60))?;
    }
    if matched {
        Some(minutes)
    } else {
        None
    }
}

fn take_number(number: &mut String, in_fraction: &mut bool) -> Option<u32> {
    let value = number.parse().ok();
    number.clear();
    *in_fraction = false;
    value
}

fn yield_text(node: &Value) -> String {
    match node.get("recipeYield") {
        Some(Value::String(text)) => decode_html_symbols(text),
        Some(Value::Number(count)) => count.to_string(),
        Some(Value::Array(items)) => {
            let texts: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(text) => Some(decode_html_symbols(text)),
                    Value::Number(count) => Some(count.to_string()),
                    _ => None,
                })
                .collect();
            // Sites publish ["8", "8 servings"]; prefer the wordier form
            texts
                .iter()
                .find(|text| text.chars().any(|c| c.is_alphabetic()))
                .or_else(|| texts.first())
                .cloned()
                .unwrap_or_default()
        }
        _ => String::new(),
    }
}

fn image_field(node: &Value) -> String {
    node.get("image").map(image_value).unwrap_or_default()
}

fn image_value(value: &Value) -> String {
    match value {
        Value::String(url) => decode_html_symbols(url),
        Value::Array(items) => items.first().map(image_value).unwrap_or_default(),
        Value::Object(_) => value
            .get("url")
            .and_then(Value::as_str)
            .map(decode_html_symbols)
            .unwrap_or_default(),
        _ => String::new(),
    }
}
