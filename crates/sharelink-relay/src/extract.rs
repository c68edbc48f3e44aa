//! Extraction of the `pcodes` parameter from a resolved location.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use regex::Regex;
use reqwest::Url;

type PcodesStrategy = fn(&str) -> Option<String>;

const PCODES_STRATEGIES: [PcodesStrategy; 2] = [pcodes_from_query, pcodes_from_pattern];

/// Percent-decodes `raw`, keeping the original when the decoded bytes are
/// not valid UTF-8. `+` is left as-is.
#[must_use]
pub fn decode_location(raw: &str) -> String {
    percent_decode_str(raw)
        .decode_utf8()
        .map_or_else(|_| raw.to_owned(), Cow::into_owned)
}

/// Returns the `pcodes` value carried by `location`, if any.
///
/// The location is decoded once up front, then handed to each strategy in
/// order: a proper query-string parse first, a pattern scan for locations
/// that are not absolute URLs (custom schemes, fragments of markup).
#[must_use]
pub fn extract_pcodes(location: &str) -> Option<String> {
    let decoded = decode_location(location);
    PCODES_STRATEGIES
        .iter()
        .find_map(|strategy| strategy(&decoded))
}

fn pcodes_from_query(location: &str) -> Option<String> {
    let url = Url::parse(location).ok()?;
    url.query_pairs()
        .find(|(key, value)| key == "pcodes" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

fn pcodes_from_pattern(location: &str) -> Option<String> {
    let re = Regex::new(r#"(?i)pcodes=([^&"'<>#\s]+)"#).expect("valid pcodes regex");
    re.captures(location)
        .and_then(|caps| caps.get(1))
        .map(|m| decode_location(m.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_location_decodes_percent_escapes() {
        assert_eq!(
            decode_location("https%3A%2F%2Fwww.iherb.com%2Fc%3Fpcodes%3DA1"),
            "https://www.iherb.com/c?pcodes=A1"
        );
    }

    #[test]
    fn decode_location_keeps_plus() {
        assert_eq!(decode_location("a+b%20c"), "a+b c");
    }

    #[test]
    fn decode_location_keeps_original_on_invalid_utf8() {
        assert_eq!(decode_location("pcodes=%FF%FE"), "pcodes=%FF%FE");
    }

    #[test]
    fn extracts_from_query_string() {
        assert_eq!(
            extract_pcodes("https://www.iherb.com/cart?lang=ar&pcodes=ABC123&x=1").as_deref(),
            Some("ABC123")
        );
    }

    #[test]
    fn extracts_from_encoded_location() {
        assert_eq!(
            extract_pcodes("https://www.iherb.com/cart?pcodes=ABC123%2CDEF456").as_deref(),
            Some("ABC123,DEF456")
        );
    }

    #[test]
    fn skips_empty_query_value() {
        assert_eq!(
            extract_pcodes("https://www.iherb.com/cart?pcodes=&pcodes=B2").as_deref(),
            Some("B2")
        );
    }

    #[test]
    fn falls_back_to_pattern_for_custom_scheme_fragment() {
        assert_eq!(
            extract_pcodes("/share#frag PCODES=XYZ9&y=2").as_deref(),
            Some("XYZ9")
        );
    }

    #[test]
    fn pattern_stops_at_hash_and_whitespace() {
        assert_eq!(
            extract_pcodes("not a url pcodes=Q1#top").as_deref(),
            Some("Q1")
        );
        assert_eq!(extract_pcodes("x pcodes=Q2 tail").as_deref(), Some("Q2"));
    }

    #[test]
    fn missing_pcodes_yields_none() {
        assert_eq!(extract_pcodes("https://www.iherb.com/page?other=1"), None);
    }
}
