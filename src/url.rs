//! URL-construction helpers driven by environment configuration.
//!
//! The application's public host lives in the `APP_HOST` environment
//! variable (scheme included, e.g. `https://example.com`). These helpers
//! build absolute URLs from it for redirects, callback URLs, and links in
//! outbound payloads.

use std::env;

/// Environment variable holding the public host, scheme included.
pub const HOST_VAR: &str = "APP_HOST";

const DEFAULT_HOST: &str = "http://localhost:3000";

/// The configured application host.
///
/// With `include_scheme = false` the `scheme://` prefix is stripped, which
/// is what cookie domains and TLS certificate checks want.
pub fn app_host(include_scheme: bool) -> String {
    let host = env::var(HOST_VAR).unwrap_or_else(|_| DEFAULT_HOST.to_owned());
    if include_scheme { host } else { strip_scheme(&host).to_owned() }
}

/// An absolute URL for `path` on the configured host.
pub fn full_url(path: &str) -> String {
    join(&app_host(true), path)
}

/// Drops the `scheme://` prefix if present.
pub fn strip_scheme(host: &str) -> &str {
    host.split_once("://").map_or(host, |(_, rest)| rest)
}

/// Joins a host and a path with exactly one `/` between them.
pub fn join(host: &str, path: &str) -> String {
    format!("{}/{}", host.trim_end_matches('/'), path.trim_start_matches('/'))
}
