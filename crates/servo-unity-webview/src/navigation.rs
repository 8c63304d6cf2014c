//! Turning address-bar text into a URI to load.

use tracing::{debug, warn};

/// Placeholder replaced by the query in a search template.
pub const SEARCH_PLACEHOLDER: &str = "%s";

/// Fill a search template with `query`. Templates without a placeholder
/// get the query appended.
pub fn search_uri(template: &str, query: &str) -> String {
    if template.contains(SEARCH_PLACEHOLDER) {
        template.replace(SEARCH_PLACEHOLDER, query)
    } else {
        format!("{template}{query}")
    }
}

/// True when the text has a `.` and no `/` comes before it, e.g.
/// `example.com` or `example.com/path`, but not `docs/readme.md`.
fn looks_like_host(text: &str) -> bool {
    match (text.find('.'), text.find('/')) {
        (Some(dot), Some(slash)) => dot < slash,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

/// Resolve navigation input to the URI that should be loaded.
///
/// 1. A valid URI is used as-is.
/// 2. Host-like text is tried with an `https://` prefix.
/// 3. Otherwise the search template is filled with the text.
///
/// The composed search URI is itself checked; `None` means nothing valid
/// could be built and no load should be issued.
pub fn resolve(input: &str, search_template: &str, is_valid: impl Fn(&str) -> bool) -> Option<String> {
    let text = input.trim();
    if text.is_empty() {
        debug!("ignoring empty navigation input");
        return None;
    }

    if is_valid(text) {
        return Some(text.to_string());
    }

    if looks_like_host(text) {
        let prefixed = format!("https://{text}");
        if is_valid(&prefixed) {
            return Some(prefixed);
        }
    }

    let search = search_uri(search_template, text);
    if is_valid(&search) {
        Some(search)
    } else {
        warn!(input = text, search = %search, "navigation input did not resolve to a valid URI");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "https://duckduckgo.com/?q=%s";

    fn is_valid(uri: &str) -> bool {
        url::Url::parse(uri).is_ok()
    }

    #[test]
    fn valid_uri_is_used_as_is() {
        assert_eq!(
            resolve("https://servo.org/", TEMPLATE, is_valid).as_deref(),
            Some("https://servo.org/")
        );
    }

    #[test]
    fn input_is_trimmed() {
        assert_eq!(
            resolve("  https://servo.org/  ", TEMPLATE, is_valid).as_deref(),
            Some("https://servo.org/")
        );
    }

    #[test]
    fn host_like_text_gets_https() {
        assert_eq!(
            resolve("example.com", TEMPLATE, is_valid).as_deref(),
            Some("https://example.com")
        );
        assert_eq!(
            resolve("example.com/a/b", TEMPLATE, is_valid).as_deref(),
            Some("https://example.com/a/b")
        );
    }

    #[test]
    fn plain_text_goes_to_search() {
        assert_eq!(
            resolve("just text", TEMPLATE, is_valid).as_deref(),
            Some("https://duckduckgo.com/?q=just text")
        );
    }

    #[test]
    fn slash_before_dot_goes_to_search() {
        assert_eq!(
            resolve("docs/readme.md", TEMPLATE, is_valid).as_deref(),
            Some("https://duckduckgo.com/?q=docs/readme.md")
        );
    }

    #[test]
    fn prefixed_host_that_is_invalid_falls_back_to_search() {
        // Validity check that only accepts the search endpoint.
        let only_search = |uri: &str| uri.starts_with("https://duckduckgo.com/");
        assert_eq!(
            resolve("bad.host", TEMPLATE, only_search).as_deref(),
            Some("https://duckduckgo.com/?q=bad.host")
        );
    }

    #[test]
    fn invalid_search_uri_yields_nothing() {
        assert_eq!(resolve("just text", "not a template ", is_valid), None);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert_eq!(resolve("   ", TEMPLATE, is_valid), None);
    }

    #[test]
    fn template_without_placeholder_appends() {
        assert_eq!(
            search_uri("https://search.example/?q=", "rust"),
            "https://search.example/?q=rust"
        );
        assert_eq!(
            search_uri("https://s.example/%s/x?q=%s", "a"),
            "https://s.example/a/x?q=a"
        );
    }
}
