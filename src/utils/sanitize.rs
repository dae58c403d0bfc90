use serde_json::Value;

/// Escape `< > & " '` for embedding in HTML text or attribute values.
/// Everything else passes through unchanged.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a dynamically typed value; anything but a string yields `""`
pub fn escape_value(value: &Value) -> String {
    match value {
        Value::String(s) => escape(s),
        _ => String::new(),
    }
}
