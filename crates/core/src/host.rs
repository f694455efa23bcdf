use std::sync::OnceLock;

use regex::Regex;
use url::Url;

/// Derives the host of a call target from a `url.full` value.
///
/// Well-formed absolute URLs go through the WHATWG parser, which lowercases
/// domains of special schemes. Strings the parser rejects fall back to a loose
/// `http(s)://host` scan. A URL that parses but has no host yields `None`.
pub fn host_from_url(url_full: &str) -> Option<String> {
    match Url::parse(url_full) {
        Ok(url) => url
            .host_str()
            .filter(|host| !host.is_empty())
            .map(str::to_string),
        Err(_) => host_pattern()
            .captures(url_full)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string()),
    }
}

fn host_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"https?://([^:/]+)").expect("host pattern compiles"))
}
