//! Shared plumbing for the reqwest-based adapters.

use reqwest::Client;
use std::time::Duration;

/// Header carrying the per-submission correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Builds a client with the given overall request timeout.
pub fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder().timeout(timeout).build()
}

/// Joins a base URL and an absolute path without doubling the slash.
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_handles_slashes() {
        assert_eq!(
            endpoint_url("http://localhost:8000", "/api/construction/quote"),
            "http://localhost:8000/api/construction/quote"
        );
        assert_eq!(
            endpoint_url("http://localhost:8000/", "/api/email/send"),
            "http://localhost:8000/api/email/send"
        );
        assert_eq!(endpoint_url("http://h", "x"), "http://h/x");
    }
}
