use std::sync::LazyLock;

use regex::Regex;

const MAX_VISIBLE_CHARS: usize = 80;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.+-]+@[\w-]+(\.[\w-]+)+").unwrap());
static DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d[\d \-]{4,}\d").unwrap());

/// Shortens text for log output and masks what looks like credentials,
/// email addresses or long digit sequences. Document text is sensitive by
/// definition, so nothing longer than a short prefix is ever logged.
pub fn preview_text(text: &str) -> String {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total_chars = trimmed.chars().count();
    let preview = if total_chars > MAX_VISIBLE_CHARS {
        let prefix: String = trimmed.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{}... ({} chars total)", prefix, total_chars)
    } else {
        trimmed.to_string()
    };

    let redacted = redact_credentials(&preview);
    let redacted = EMAIL.replace_all(&redacted, "[EMAIL]");
    DIGIT_RUN.replace_all(&redacted, "[DIGITS]").into_owned()
}

fn redact_credentials(text: &str) -> String {
    let patterns = [
        ("Bearer ", "Bearer [REDACTED]"),
        ("api_key=", "api_key=[REDACTED]"),
        ("x-api-key: ", "x-api-key: [REDACTED]"),
        ("password=", "password=[REDACTED]"),
        ("token=", "token=[REDACTED]"),
    ];

    let mut result = text.to_string();
    for (pattern, replacement) in patterns {
        if let Some(idx) = result.find(pattern) {
            let end = result[idx + pattern.len()..]
                .find(|c: char| c.is_whitespace() || c == '&' || c == '"' || c == '\'')
                .map(|i| idx + pattern.len() + i)
                .unwrap_or(result.len());
            result = format!("{}{}{}", &result[..idx], replacement, &result[end..]);
        }
    }

    result
}
