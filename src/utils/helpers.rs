use serde_json::Value;

/// Removes a surrounding Markdown code fence, if any
///
/// Handles an opening ```` ``` ```` optionally followed by a `json` tag and a
/// closing ```` ``` ````. Text without a leading fence is only trimmed.
///
/// # Arguments
/// * `content` - Raw model output
///
/// # Returns
/// * `&str` - The content between the fences, trimmed
pub fn strip_code_fence(content: &str) -> &str {
    let content = content.trim();
    let Some(inner) = content.strip_prefix("```") else {
        return content;
    };

    let inner = inner.strip_prefix("json").unwrap_or(inner).trim();
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

/// Parses model output as JSON, tolerating a surrounding code fence
///
/// # Returns
/// * `Option<Value>` - The parsed document, or `None` if it is not valid JSON
pub fn extract_json_blob(content: &str) -> Option<Value> {
    serde_json::from_str(strip_code_fence(content)).ok()
}
