//! Picks the location string to mine for `pcodes` out of the signals
//! collected while resolving a share link.
//!
//! Each signal is read by a small pure strategy. Strategies are tried in
//! [`LOCATION_STRATEGIES`] order; every non-empty result is a candidate, and
//! the relay takes `pcodes` from the first candidate that carries them.

use regex::Regex;

/// Raw signals from the share-link GET.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The caller-supplied URL, as parsed.
    pub requested_url: String,
    /// URL of the final response once redirect-following stopped.
    pub effective_url: String,
    /// `true` when following completed at a URL other than the requested one.
    /// A chain that stopped on a redirect response does not count.
    pub redirected: bool,
    /// `Location` header of the final response.
    pub header_location: Option<String>,
    pub body: String,
}

type LocationStrategy = fn(&Resolution) -> Option<String>;

const LOCATION_STRATEGIES: [LocationStrategy; 4] = [
    from_final_url,
    from_header_location,
    from_body,
    from_requested_url,
];

impl Resolution {
    /// Non-empty locations produced by the ordered strategies.
    pub fn location_candidates(&self) -> impl Iterator<Item = String> + '_ {
        LOCATION_STRATEGIES
            .iter()
            .filter_map(|strategy| strategy(self).filter(|s| !s.trim().is_empty()))
    }

    /// Returns the first location candidate, or `None` when the response
    /// carries no usable signal.
    #[must_use]
    pub fn location_to_parse(&self) -> Option<String> {
        self.location_candidates().next()
    }
}

/// The effective URL counts when following ended somewhere new, or when it
/// already carries `pcodes` (a direct link, or a chain that stopped on a
/// deep link after reaching the cart page).
fn from_final_url(resolution: &Resolution) -> Option<String> {
    (resolution.redirected || carries_pcodes(&resolution.effective_url))
        .then(|| resolution.effective_url.clone())
}

fn from_header_location(resolution: &Resolution) -> Option<String> {
    resolution.header_location.clone()
}

/// Scans the body for an absolute URL carrying `pcodes=`, as emitted by
/// interstitial pages that redirect via script or meta refresh.
fn from_body(resolution: &Resolution) -> Option<String> {
    let re = Regex::new(r#"(?i)https?://[^\s"'<>]*pcodes=[^"'<>]*"#).expect("valid body URL regex");
    re.find(&resolution.body).map(|m| m.as_str().to_owned())
}

/// A link that already points at the share page needs no redirect.
fn from_requested_url(resolution: &Resolution) -> Option<String> {
    carries_pcodes(&resolution.requested_url).then(|| resolution.requested_url.clone())
}

fn carries_pcodes(url: &str) -> bool {
    url.to_ascii_lowercase().contains("pcodes=")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolution() -> Resolution {
        Resolution {
            requested_url: "https://iherb.co/abc".to_owned(),
            effective_url: "https://iherb.co/abc".to_owned(),
            redirected: false,
            header_location: None,
            body: String::new(),
        }
    }

    #[test]
    fn final_url_wins_when_redirected() {
        let r = Resolution {
            effective_url: "https://www.iherb.com/cart?pcodes=ABC123".to_owned(),
            redirected: true,
            header_location: Some("https://other.example.com/?pcodes=ZZZ".to_owned()),
            ..resolution()
        };
        assert_eq!(
            r.location_to_parse().as_deref(),
            Some("https://www.iherb.com/cart?pcodes=ABC123")
        );
    }

    #[test]
    fn header_location_used_when_not_redirected() {
        let r = Resolution {
            header_location: Some("iherb://share?pcodes=XYZ".to_owned()),
            ..resolution()
        };
        assert_eq!(
            r.location_to_parse().as_deref(),
            Some("iherb://share?pcodes=XYZ")
        );
    }

    #[test]
    fn empty_header_location_is_skipped() {
        let r = Resolution {
            header_location: Some("  ".to_owned()),
            body: r#"<a href="https://www.iherb.com/c?pcodes=B1">"#.to_owned(),
            ..resolution()
        };
        assert_eq!(
            r.location_to_parse().as_deref(),
            Some("https://www.iherb.com/c?pcodes=B1")
        );
    }

    #[test]
    fn body_match_stops_at_quote() {
        let r = Resolution {
            body: r#"<script>location.href='HTTPS://www.iherb.com/c?x=1&PCODES=A%2CB';</script>"#
                .to_owned(),
            ..resolution()
        };
        assert_eq!(
            r.location_to_parse().as_deref(),
            Some("HTTPS://www.iherb.com/c?x=1&PCODES=A%2CB")
        );
    }

    #[test]
    fn requested_url_used_when_it_carries_pcodes() {
        let r = Resolution {
            requested_url: "https://www.iherb.com/cart?pcodes=DIRECT".to_owned(),
            effective_url: "https://www.iherb.com/cart?pcodes=DIRECT".to_owned(),
            ..resolution()
        };
        assert_eq!(
            r.location_to_parse().as_deref(),
            Some("https://www.iherb.com/cart?pcodes=DIRECT")
        );
    }

    #[test]
    fn direct_link_beats_other_pcodes_in_body() {
        let r = Resolution {
            requested_url: "https://www.iherb.com/cart?pcodes=DIRECT".to_owned(),
            effective_url: "https://www.iherb.com/cart?pcodes=DIRECT".to_owned(),
            body: r#"<a href="https://www.iherb.com/cart?pcodes=OTHER">"#.to_owned(),
            ..resolution()
        };
        assert_eq!(
            r.location_to_parse().as_deref(),
            Some("https://www.iherb.com/cart?pcodes=DIRECT")
        );
    }

    #[test]
    fn stopped_chain_lists_cart_url_before_deep_link() {
        let r = Resolution {
            effective_url: "https://www.iherb.com/cart?pcodes=ABC123".to_owned(),
            redirected: false,
            header_location: Some("iherb://open".to_owned()),
            ..resolution()
        };
        let candidates: Vec<String> = r.location_candidates().collect();
        assert_eq!(
            candidates,
            vec![
                "https://www.iherb.com/cart?pcodes=ABC123".to_owned(),
                "iherb://open".to_owned()
            ]
        );
    }

    #[test]
    fn no_signal_yields_none() {
        let r = Resolution {
            body: "<html>nothing to see</html>".to_owned(),
            ..resolution()
        };
        assert_eq!(r.location_to_parse(), None);
    }
}
