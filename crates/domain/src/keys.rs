//! URL to domain-key extraction
//!
//! Extraction never fails: anything that does not parse to a URL with a host
//! degrades to empty keys, so one bad tab never aborts a pass.

use url::Url;

use crate::model::DomainKey;

/// Derive the `(base, sub)` domain key for a raw tab URL
///
/// The base domain is the last two dot-separated hostname labels joined by
/// `.`; everything before them forms the sub-domain (empty if fewer than
/// three labels). Both are lower-cased. Missing scheme, empty input, or any
/// other parse failure yields `("", "")`.
pub fn domain_key(raw: &str) -> DomainKey {
    let Ok(parsed) = Url::parse(raw) else {
        return DomainKey::default();
    };
    let Some(host) = parsed.host_str().filter(|h| !h.is_empty()) else {
        return DomainKey::default();
    };

    let host = host.to_ascii_lowercase();
    let labels: Vec<&str> = host.split('.').collect();
    let cut = labels.len().saturating_sub(2);

    DomainKey {
        base: labels[cut..].join("."),
        sub: labels[..cut].join("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_base_and_sub() {
        let key = domain_key("https://mail.x.com/inbox");
        assert_eq!(key.base, "x.com");
        assert_eq!(key.sub, "mail");
    }

    #[test]
    fn deep_sub_domains_join_with_dots() {
        let key = domain_key("https://a.b.example.com/");
        assert_eq!(key.base, "example.com");
        assert_eq!(key.sub, "a.b");
    }

    #[test]
    fn two_label_host_has_empty_sub() {
        let key = domain_key("https://example.com/path?q=1");
        assert_eq!(key.base, "example.com");
        assert_eq!(key.sub, "");
    }

    #[test]
    fn single_label_host_is_its_own_base() {
        let key = domain_key("http://localhost:8080/");
        assert_eq!(key.base, "localhost");
        assert_eq!(key.sub, "");
    }

    #[test]
    fn host_is_lower_cased() {
        let key = domain_key("https://Mail.Example.COM/");
        assert_eq!(key.base, "example.com");
        assert_eq!(key.sub, "mail");
    }

    #[test]
    fn unparseable_urls_degrade_to_empty_keys() {
        for raw in ["", "not a url", "example.com", "://missing-scheme"] {
            let key = domain_key(raw);
            assert_eq!(key, DomainKey::default(), "input: {raw:?}");
        }
    }

    #[test]
    fn hostless_schemes_degrade_to_empty_keys() {
        let key = domain_key("file:///tmp/notes.txt");
        assert_eq!(key, DomainKey::default());
    }

    #[test]
    fn ipv4_host_takes_last_two_octets() {
        let key = domain_key("http://192.168.0.1/");
        assert_eq!(key.base, "0.1");
        assert_eq!(key.sub, "192.168");
    }
}
