/// System message for chat-style backends that take one.
pub const EXTRACTION_SYSTEM_PROMPT: &str = "You are a recipe extraction API. Only output JSON.";

/// Builds the extraction prompt for one reduced page.
///
/// The keys listed here are exactly the fields of
/// [`crate::model::RecipeDraft`]; the amount-first examples exist because
/// smaller models otherwise invent "name - amount" layouts that read badly
/// as shopping lists.
pub fn build_extraction_prompt(url: &str, page_text: &str) -> String {
    format!(
        r#"You are a recipe extraction API. Extract recipe details from the following web page content.

Return ONLY a valid JSON object with these keys:
- title: str
- ingredients: str (newline separated list, one ingredient per line with amount)
- instructions: str (newline separated list, one step per line)
- prep_time_minutes: int or null
- cook_time_minutes: int or null
- servings: str or null
- image_url: str or null

IMPORTANT for ingredients: Format each ingredient on its own line with the amount and measurement included.
Example format:
2 ounces rye whiskey
1 ounce sweet vermouth
2 dashes Angostura bitters
1 maraschino cherry

Do NOT use formats like:
- "rye whiskey - 2 oz"
- "rye whiskey (2 oz)"
- "2 oz - rye whiskey"

Put the amount FIRST, then the ingredient name.

If data is missing, use null or empty string appropriately.

Source URL: {url}
Page text:
{page_text}"#
    )
}
