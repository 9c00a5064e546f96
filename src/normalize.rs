//! Whitespace and escape repair for extracted text blobs.
//!
//! Every multi-line field that ends up on a [`crate::model::RecipeDraft`]
//! passes through [`normalize`], whichever extractor produced it. Model
//! output in particular tends to arrive with literal `\n` sequences instead
//! of real newlines, stray tabs, and ragged indentation; scraped markup
//! contributes carriage returns and runs of spaces.

/// Normalizes a text blob into clean newline-delimited lines.
///
/// Rules, applied in order:
/// 1. tab and carriage-return characters are removed, in both literal and
///    escaped (`\t`, `\r`) forms
/// 2. literal `\n` escape sequences become real newlines
/// 3. each line collapses internal whitespace runs to single spaces and
///    loses leading/trailing whitespace
/// 4. blank lines are dropped
///
/// The output never has leading, trailing, or consecutive newlines, and
/// running the function twice gives the same result as running it once.
pub fn normalize(blob: &str) -> String {
    // Deleting a tab or CR can glue a backslash onto the next character,
    // minting a fresh escape sequence; repeat until nothing changes, then
    // repair newlines on the settled text.
    let mut repaired = blob.to_string();
    loop {
        let cleaned = repaired
            .replace('\t', "")
            .replace('\r', "")
            .replace("\\t", "")
            .replace("\\r", "");
        if cleaned == repaired {
            break;
        }
        repaired = cleaned;
    }
    let repaired = repaired.replace("\\n", "\n");

    repaired
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strips a Markdown code fence wrapped around a JSON payload.
///
/// Models asked for raw JSON still reply with ` ```json ... ``` ` often
/// enough that the decoder treats the fence as noise. Text without a fence
/// passes through untouched (modulo outer whitespace).
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}
