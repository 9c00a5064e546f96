use async_trait::async_trait;
use log::debug;
use serde_json::Value;
use std::time::Duration;

use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::extractors::ExtractStrategy;
use crate::fetch::PageFetcher;
use crate::model::{ImportMethod, RecipeDraft};
use crate::normalize::{normalize, strip_code_fences};
use crate::providers::{build_extraction_prompt, ProviderFactory};
use crate::reduce::reduce;

/// Extracts recipes by asking a generative-text backend to read the page.
///
/// One implementation covers every backend; which provider answers is a
/// configuration value, not a structural difference. The strategy fetches
/// the page itself, reduces it, prompts the model, and decodes the JSON it
/// returns.
pub struct LlmExtractor {
    provider_name: String,
    config: ImportConfig,
    fetcher: PageFetcher,
}

impl LlmExtractor {
    pub fn new(provider_name: &str, config: &ImportConfig) -> Self {
        LlmExtractor {
            provider_name: provider_name.to_string(),
            config: config.clone(),
            fetcher: PageFetcher::new(Duration::from_secs(config.fetch_timeout)),
        }
    }
}

#[async_trait]
impl ExtractStrategy for LlmExtractor {
    fn name(&self) -> &str {
        &self.provider_name
    }

    fn method(&self) -> ImportMethod {
        ImportMethod::Llm(self.provider_name.clone())
    }

    async fn extract(&self, url: &str) -> Result<RecipeDraft, ImportError> {
        // Built per attempt: a missing API key should fail this strategy,
        // not the process, and earlier strategies may make it moot.
        let provider = ProviderFactory::create(&self.provider_name, &self.config)?;

        let html = self.fetcher.fetch(url).await?;
        let page_text = reduce(&html);
        debug!(
            "Sending {} reduced characters to {}",
            page_text.chars().count(),
            self.provider_name
        );

        let prompt = build_extraction_prompt(url, &page_text);
        let reply = provider.complete(&prompt).await?;

        decode_reply(url, &reply)
    }
}

/// Decodes a model reply into a draft: fence stripping, JSON parsing, field
/// mapping with escape repair, then normalization.
pub fn decode_reply(url: &str, reply: &str) -> Result<RecipeDraft, ImportError> {
    let stripped = strip_code_fences(reply);
    if stripped.is_empty() {
        return Err(ImportError::ParseError(
            "Model reply contained no JSON".to_string(),
        ));
    }

    let parsed: Value = serde_json::from_str(stripped)
        .map_err(|e| ImportError::ParseError(format!("Model reply is not valid JSON: {e}")))?;

    Ok(draft_from_value(url, &parsed))
}

fn draft_from_value(url: &str, parsed: &Value) -> RecipeDraft {
    RecipeDraft {
        title: string_field(parsed, "title"),
        source_url: url.to_string(),
        ingredients: normalize(&string_field(parsed, "ingredients")),
        instructions: normalize(&string_field(parsed, "instructions")),
        prep_time_minutes: minutes_field(parsed, "prep_time_minutes"),
        cook_time_minutes: minutes_field(parsed, "cook_time_minutes"),
        servings: servings_field(parsed),
        image_url: string_field(parsed, "image_url"),
    }
}

// Missing and null both mean "not provided". Models sometimes emit the
// two-character sequence \n inside a JSON string instead of a real line
// break; repair it on every string field.
fn string_field(parsed: &Value, key: &str) -> String {
    match parsed.get(key) {
        Some(Value::String(text)) => text.replace("\\n", "\n").trim().to_string(),
        _ => String::new(),
    }
}

// Absent stays absent: a missing time must not turn into zero minutes.
fn minutes_field(parsed: &Value, key: &str) -> Option<u32> {
    match parsed.get(key) {
        Some(Value::Number(minutes)) => minutes.as_u64().and_then(|v| u32::try_from(v).ok()),
        Some(Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    }
}

fn servings_field(parsed: &Value) -> String {
    match parsed.get("servings") {
        Some(Value::Number(count)) => count.to_string(),
        _ => string_field(parsed, "servings"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    const URL: &str = "https://example.com/recipe";

    #[test]
    fn test_decode_plain_json_reply() {
        let reply = r#"{
            "title": "Manhattan",
            "ingredients": "2 ounces rye whiskey\n1 ounce sweet vermouth",
            "instructions": "Stir with ice.\nStrain into a glass.",
            "prep_time_minutes": 5,
            "cook_time_minutes": null,
            "servings": "1",
            "image_url": "https://example.com/manhattan.jpg"
        }"#;

        let draft = decode_reply(URL, reply).unwrap();

        assert!(draft.is_usable());
        assert_eq!(draft.title, "Manhattan");
        assert_eq!(draft.source_url, URL);
        assert_eq!(
            draft.ingredients,
            "2 ounces rye whiskey\n1 ounce sweet vermouth"
        );
        assert_eq!(draft.instructions, "Stir with ice.\nStrain into a glass.");
        assert_eq!(draft.prep_time_minutes, Some(5));
        assert_eq!(draft.cook_time_minutes, None);
        assert_eq!(draft.servings, "1");
        assert_eq!(draft.image_url, "https://example.com/manhattan.jpg");
    }

    #[test]
    fn test_decode_fenced_reply() {
        let reply = "```json\n{\"title\": \"X\"}\n```";
        let draft = decode_reply(URL, reply).unwrap();
        assert_eq!(draft.title, "X");
    }

    #[test]
    fn test_decode_repairs_escaped_newlines() {
        // The model emitted literal backslash-n sequences inside the string
        let reply = r#"{"title": "Cake", "ingredients": "flour\\nsugar"}"#;
        let draft = decode_reply(URL, reply).unwrap();
        assert_eq!(draft.ingredients, "flour\nsugar");
    }

    #[test]
    fn test_decode_missing_fields_default() {
        let reply = r#"{"title": "Toast"}"#;
        let draft = decode_reply(URL, reply).unwrap();

        assert_eq!(draft.prep_time_minutes, None);
        assert_eq!(draft.cook_time_minutes, None);
        assert_eq!(draft.ingredients, "");
        assert_eq!(draft.instructions, "");
        assert_eq!(draft.servings, "");
        assert_eq!(draft.image_url, "");
    }

    #[test]
    fn test_decode_coerces_numeric_servings() {
        let reply = r#"{"title": "Stew", "servings": 4}"#;
        let draft = decode_reply(URL, reply).unwrap();
        assert_eq!(draft.servings, "4");
    }

    #[test]
    fn test_decode_accepts_numeric_strings_for_times() {
        let reply = r#"{"title": "Stew", "prep_time_minutes": "20"}"#;
        let draft = decode_reply(URL, reply).unwrap();
        assert_eq!(draft.prep_time_minutes, Some(20));
    }

    #[test]
    fn test_decode_rejects_out_of_range_times() {
        // Past the u32 ceiling; must read as absent, not wrap
        let reply = r#"{"title": "Stew", "prep_time_minutes": 4294967297, "cook_time_minutes": -5}"#;
        let draft = decode_reply(URL, reply).unwrap();
        assert_eq!(draft.prep_time_minutes, None);
        assert_eq!(draft.cook_time_minutes, None);
    }

    #[test]
    fn test_decode_repairs_escapes_in_servings() {
        let reply = r#"{"title": "Focaccia", "servings": "2\\nsheet pans"}"#;
        let draft = decode_reply(URL, reply).unwrap();
        assert_eq!(draft.servings, "2\nsheet pans");
    }

    #[test]
    fn test_decode_rejects_non_json() {
        let reply = "Sorry, I could not find a recipe on this page.";
        let result = decode_reply(URL, reply);
        assert!(matches!(result, Err(ImportError::ParseError(_))));

        let result = decode_reply(URL, "```json\n```");
        assert!(matches!(result, Err(ImportError::ParseError(_))));
    }

    #[test]
    fn test_decode_empty_title_is_ok_but_unusable() {
        // Valid JSON with nothing in it decodes fine; the cascade judges it
        let draft = decode_reply(URL, "{}").unwrap();
        assert!(!draft.is_usable());
    }

    #[tokio::test]
    async fn test_extract_against_local_backend() {
        let mut server = Server::new_async().await;

        let page_mock = server
            .mock("GET", "/recipe")
            .with_status(200)
            .with_body("<html><body><h1>Manhattan</h1><p>2 ounces rye whiskey</p></body></html>")
            .create_async()
            .await;

        let chat_mock = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "message": {
                        "role": "assistant",
                        "content": "{\"title\": \"Manhattan\", \"ingredients\": \"2 ounces rye whiskey\"}"
                    },
                    "done": true
                }"#,
            )
            .create_async()
            .await;

        let mut config = ImportConfig::default();
        config.ollama.host = server.url();

        let extractor = LlmExtractor::new("ollama", &config);
        let draft = extractor
            .extract(&format!("{}/recipe", server.url()))
            .await
            .unwrap();

        page_mock.assert_async().await;
        chat_mock.assert_async().await;
        assert_eq!(draft.title, "Manhattan");
        assert_eq!(draft.ingredients, "2 ounces rye whiskey");
    }

    #[tokio::test]
    async fn test_extract_with_unknown_provider_fails_before_fetching() {
        let config = ImportConfig::default();
        let extractor = LlmExtractor::new("grok", &config);

        let result = extractor.extract("http://127.0.0.1:1/unreachable").await;
        assert!(matches!(result, Err(ImportError::UnknownProvider(_))));
    }
}
