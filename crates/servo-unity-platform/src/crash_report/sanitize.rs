use std::sync::LazyLock;

use regex::Regex;

/// Pattern and replacement, most specific first.
static REDACTIONS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        // user:password@ in any scheme://
        (
            r"(?i)\b([a-z][a-z0-9+.\-]*://)[^/\s:@]+:[^/\s@]+@",
            "${1}[REDACTED]@",
        ),
        // Query strings of URLs; page addresses often carry session tokens.
        (
            r#"(?i)\b([a-z][a-z0-9+.\-]*://[^\s?#"']*)\?[^\s#"']*"#,
            "${1}?[REDACTED]",
        ),
        (r"Bearer [a-zA-Z0-9._\-]+", "Bearer [REDACTED]"),
        (
            r"(?i)((?:key|token|secret|password)=)[a-zA-Z0-9]{16,}",
            "${1}[REDACTED]",
        ),
    ]
    .into_iter()
    .filter_map(|(pattern, replacement)| Regex::new(pattern).ok().map(|re| (re, replacement)))
    .collect()
});

/// Redacts URL credentials, URL query strings and token-like values.
pub fn sanitize_secrets(input: &str) -> String {
    let mut result = input.to_string();
    for (re, replacement) in REDACTIONS.iter() {
        result = re.replace_all(&result, *replacement).into_owned();
    }
    result
}
