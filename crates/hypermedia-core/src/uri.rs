//! URI resolution and canonical resource identity.
//!
//! The service is free to hand out the same resource as a relative
//! reference, an absolute URL, or either of those with volatile query
//! parameters attached. Cache identity has to survive all of those
//! spellings, so the canonical key is the absolute URL with query and
//! fragment stripped.

use url::Url;

use crate::error::ModelError;

/// Resolve a possibly-relative reference against a base URL.
pub fn absolute_url(base: &Url, href: &str) -> Result<Url, ModelError> {
    Ok(base.join(href)?)
}

/// Canonical identity of a resource reference.
///
/// Resolves `href` against `base`, then strips query and fragment. Two
/// references normalize equal exactly when they name the same resource.
pub fn normalize_uri(base: &Url, href: &str) -> Result<String, ModelError> {
    let mut url = base.join(href)?;
    url.set_query(None);
    url.set_fragment(None);
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://service.example.com/comm/v1/applications/42").expect("valid base")
    }

    #[test]
    fn relative_reference_resolves_against_base() {
        let uri = normalize_uri(&base(), "/comm/v1/conversations/137").expect("should normalize");
        assert_eq!(uri, "https://service.example.com/comm/v1/conversations/137");
    }

    #[test]
    fn absolute_reference_passes_through() {
        let uri = normalize_uri(&base(), "https://other.example.com/x/1").expect("should normalize");
        assert_eq!(uri, "https://other.example.com/x/1");
    }

    #[test]
    fn query_and_fragment_are_stripped() {
        let with_noise = normalize_uri(&base(), "/comm/v1/conversations/137?session=9f#frag")
            .expect("should normalize");
        let plain = normalize_uri(&base(), "/comm/v1/conversations/137").expect("should normalize");
        assert_eq!(with_noise, plain);
    }

    #[test]
    fn differing_spellings_share_identity() {
        let relative = normalize_uri(&base(), "/comm/v1/conversations/137").expect("should normalize");
        let absolute = normalize_uri(
            &base(),
            "https://service.example.com/comm/v1/conversations/137?epoch=3",
        )
        .expect("should normalize");
        assert_eq!(relative, absolute);
    }

    #[test]
    fn unresolvable_reference_is_an_error() {
        let opaque = Url::parse("mailto:ops@example.com").expect("valid url");
        assert!(normalize_uri(&opaque, "conversations/137").is_err());
    }

    #[test]
    fn absolute_url_keeps_query() {
        let url = absolute_url(&base(), "/comm/v1/conversations/137?session=9f").expect("should resolve");
        assert_eq!(url.query(), Some("session=9f"));
    }
}
