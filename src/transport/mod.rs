//! Transport layer: the seam between domain services and the wire.
//!
//! The `Transport` trait abstracts request/response delivery so that domain
//! services can run against different backends unchanged:
//! - `http::HttpTransport`: the real backend over HTTP (reqwest)
//! - `crate::mock::MockTransport`: in-memory simulator for offline demos
//!
//! A transport returns the response *body* as `serde_json::Value`; envelope
//! interpretation (`{code, message, data}`) belongs to the service layer.

pub mod error;
#[cfg(feature = "http-client")]
pub mod http;

pub use error::{ClientError, ClientResult};
#[cfg(feature = "http-client")]
pub use http::HttpTransport;

use async_trait::async_trait;
use serde_json::Value;

/// Query parameters in insertion order.
pub type Params = Vec<(String, String)>;

/// Request/response transport to the library backend.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str, params: Params) -> ClientResult<Value>;
    async fn post(&self, path: &str, body: Value) -> ClientResult<Value>;
    async fn put(&self, path: &str, body: Value) -> ClientResult<Value>;
    async fn patch(&self, path: &str, body: Value) -> ClientResult<Value>;
    async fn delete(&self, path: &str) -> ClientResult<Value>;
}

/// Translate UI-style `page`/`size` parameters into the backend's zero-based
/// `offset`/`limit`, removing the originals.
///
/// The contract is `offset = max(0, page - 1) * size`, `limit = size`.
/// Applied only when both keys are present; a lone `page` or `size` is
/// passed through untouched.
pub fn translate_pagination(params: &mut Params) {
    let page = lookup_u64(params, "page");
    let size = lookup_u64(params, "size");
    let (page, size) = match (page, size) {
        (Some(p), Some(s)) => (p, s),
        _ => return,
    };

    params.retain(|(key, _)| key != "page" && key != "size");
    let offset = page.saturating_sub(1) * size;
    params.push(("offset".to_string(), offset.to_string()));
    params.push(("limit".to_string(), size.to_string()));
}

fn lookup_u64(params: &Params, key: &str) -> Option<u64> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .and_then(|(_, v)| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_page_size_become_offset_limit() {
        let mut p = params(&[("search", "java"), ("page", "3"), ("size", "20")]);
        translate_pagination(&mut p);
        assert_eq!(
            p,
            params(&[("search", "java"), ("offset", "40"), ("limit", "20")])
        );
    }

    #[test]
    fn test_first_page_maps_to_offset_zero() {
        let mut p = params(&[("page", "1"), ("size", "10")]);
        translate_pagination(&mut p);
        assert_eq!(p, params(&[("offset", "0"), ("limit", "10")]));
    }

    #[test]
    fn test_page_zero_clamps_to_offset_zero() {
        let mut p = params(&[("page", "0"), ("size", "10")]);
        translate_pagination(&mut p);
        assert_eq!(p, params(&[("offset", "0"), ("limit", "10")]));
    }

    #[test]
    fn test_lone_page_is_untouched() {
        let mut p = params(&[("page", "2")]);
        translate_pagination(&mut p);
        assert_eq!(p, params(&[("page", "2")]));
    }

    #[test]
    fn test_non_numeric_page_is_untouched() {
        let mut p = params(&[("page", "first"), ("size", "10")]);
        translate_pagination(&mut p);
        assert_eq!(p, params(&[("page", "first"), ("size", "10")]));
    }
}
