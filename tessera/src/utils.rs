use url::Url;

/// Returns true if `input` parses as an absolute URI, i.e. one with a scheme.
pub(crate) fn is_absolute_uri(input: &str) -> bool {
    match Url::parse(input) {
        Ok(url) => !url.scheme().is_empty(),
        Err(_) => false,
    }
}

/// Reduces a URL to its origin (`scheme://host[:port]`), the unit access is granted to.
pub(crate) fn origin_of(input: &str) -> Option<String> {
    let url = Url::parse(input).ok()?;
    let origin = url.origin();
    if origin.is_tuple() {
        Some(origin.ascii_serialization())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assay::assay;

    #[assay]
    fn absolute_uris() {
        assert!(is_absolute_uri("https://rpc.cosmos.network:443"));
        assert!(is_absolute_uri("http://localhost:26657"));
        assert!(is_absolute_uri("tcp://127.0.0.1:26657"));
        assert!(!is_absolute_uri("rpc.cosmos.network"));
        assert!(!is_absolute_uri("/relative/path"));
        assert!(!is_absolute_uri(""));
    }

    #[assay]
    fn origins() {
        assert_eq!(
            origin_of("https://app.osmosis.zone/swap?from=ATOM"),
            Some("https://app.osmosis.zone".to_string())
        );
        assert_eq!(
            origin_of("http://localhost:8080/"),
            Some("http://localhost:8080".to_string())
        );
        assert_eq!(origin_of("not a url"), None);
    }
}
