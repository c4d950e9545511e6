//! Domain API modules.
//!
//! Each module exposes list/get/create/update/delete plus entity-specific
//! operations as free async functions over `&dyn Transport`, so callers and
//! tests run identically against the HTTP backend and the mock. Read paths
//! route through the lenient normalizer; write echoes that must be
//! well-formed (receipts, return outcomes) are strict-decoded.

pub mod auth;
pub mod books;
pub mod borrow;
pub mod readers;
pub mod statistics;

use serde_json::Value;

use crate::transport::{ClientError, ClientResult, Params};

/// Optional pagination for list calls. Sent as `page`/`size`; the transport
/// translates to `offset`/`limit` before transmission.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageOptions {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl PageOptions {
    pub fn new(page: u32, size: u32) -> Self {
        PageOptions {
            page: Some(page),
            size: Some(size),
        }
    }

    pub(crate) fn push_params(&self, params: &mut Params) {
        if let Some(page) = self.page {
            params.push(("page".to_string(), page.to_string()));
        }
        if let Some(size) = self.size {
            params.push(("size".to_string(), size.to_string()));
        }
    }
}

/// Unwrap a response envelope.
///
/// `{code: 0, data}` yields the payload; a non-zero code becomes
/// [`ClientError::Domain`] with the server's message verbatim. Bodies
/// without a `code` key are treated as the payload itself (older backends
/// answer unwrapped).
pub(crate) fn expect_data(body: Value) -> ClientResult<Value> {
    match body {
        Value::Object(mut obj) if obj.contains_key("code") => {
            let code = obj.get("code").and_then(Value::as_i64).unwrap_or(0);
            if code != 0 {
                let message = obj
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("request failed")
                    .to_string();
                return Err(ClientError::domain(code, message));
            }
            Ok(obj.remove("data").unwrap_or(Value::Null))
        }
        other => Ok(other),
    }
}
