//! Typed wrappers over [`MarketplaceClient::request`](crate::MarketplaceClient::request)
//!
//! Each module adds a handful of methods for one area of the backend. They
//! carry no logic of their own beyond choosing the path, method and body.

mod auth;
mod cart;
mod catalog;
mod favorites;
mod orders;
mod reviews;
mod vendor;

use url::form_urlencoded;

/// Percent-encode a caller-supplied ID for use as one path segment
///
/// `/`, `?` and `#` inside an ID must not change which endpoint is hit.
pub(crate) fn segment(id: &str) -> String {
    // Form encoding writes spaces as `+`; a literal `+` is already `%2B`
    form_urlencoded::byte_serialize(id.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment("p-1"), "p-1");
        assert_eq!(segment("a/b"), "a%2Fb");
        assert_eq!(segment("x?y#z"), "x%3Fy%23z");
        assert_eq!(segment("two words+"), "two%20words%2B");
    }
}
