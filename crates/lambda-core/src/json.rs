//! JSON error descriptions
//!
//! Decoding failures end up in response bodies. `serde_json`'s own `Display`
//! is terse; these helpers name the category and position instead.

use serde_json::error::Category;

/// Human-readable description of a JSON decoding failure
///
/// ```rust
/// let error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
/// let description = lambda_core::json::describe_json_error(&error);
/// assert!(description.starts_with("The body is not complete JSON"));
/// ```
pub fn describe_json_error(error: &serde_json::Error) -> String {
    let what = match error.classify() {
        Category::Io => "The body could not be read",
        Category::Syntax => "The body is not valid JSON",
        Category::Data => "The body does not match the expected shape",
        Category::Eof => "The body is not complete JSON",
    };
    if error.line() == 0 {
        return format!("{what}: {error}");
    }
    format!(
        "{what} (line {}, column {}): {}",
        error.line(),
        error.column(),
        inner_message(error)
    )
}

/// The message without serde_json's trailing position suffix
fn inner_message(error: &serde_json::Error) -> String {
    let full = error.to_string();
    let suffix = format!(" at line {} column {}", error.line(), error.column());
    match full.strip_suffix(&suffix) {
        Some(message) => message.to_string(),
        None => full,
    }
}
