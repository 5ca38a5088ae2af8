//! Response headers required on every Actions endpoint.

use http::header::{
    HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN,
};

pub const X_ACTION_VERSION: &str = "x-action-version";
pub const X_BLOCKCHAIN_IDS: &str = "x-blockchain-ids";

pub const ACTION_VERSION: &str = "1";
pub const ALLOW_METHODS: &str = "GET, POST, PUT, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization, Content-Encoding, Accept-Encoding";

/// Permissive CORS plus the protocol headers wallets look for.
///
/// Attached explicitly (rather than by a CORS layer) so the OPTIONS response
/// carries the Actions headers too.
pub fn action_headers(blockchain_id: &str) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(5);
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS));
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS));
    headers.insert(X_ACTION_VERSION, HeaderValue::from_static(ACTION_VERSION));
    headers.insert(
        X_BLOCKCHAIN_IDS,
        HeaderValue::from_str(blockchain_id).unwrap_or_else(|_| HeaderValue::from_static("solana")),
    );
    headers
}
