// Shared outbound HTTP client.
//
// One pooled client for every outbound fetch (JWKS keys, the directory,
// per-user datasets), so connection reuse and any future timeout settings
// apply uniformly.

use once_cell::sync::Lazy;

static CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

pub fn client() -> &'static reqwest::Client {
    &CLIENT
}
