use std::time::Duration;

/// Shared HTTP client.
///
/// The server keeps the produced summary in its session cookie, so uploads
/// and summary page loads must go through the same cookie store. No total
/// request timeout is set; only connecting is bounded.
pub fn build_client(connect_timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .connect_timeout(connect_timeout)
        .cookie_store(true)
        .build()
}
