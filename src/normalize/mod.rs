//! Response normalization over heterogeneous backend shapes.
//!
//! The backend (and its predecessors) answer with two vocabularies for the
//! same entities (`title` vs `bookName`, `borrowLimit` vs `maxBorrowNumber`)
//! and three wrapper shapes for lists (bare array, `{items}`,
//! `{items,total}`). This module maps all of them onto the canonical types
//! in [`crate::api`].
//!
//! The per-entity functions implement a *lenient decode* contract: they
//! always return a value, substituting documented defaults (empty strings,
//! zero counts, `None` for a non-object), and never error. Write echoes that
//! must be well-formed use strict serde decoding in the service layer
//! instead.

pub mod book;
pub mod reader;
pub mod record;
pub mod statistics;

pub use book::{normalize_book, normalize_book_list};
pub use reader::{normalize_reader, normalize_reader_list};
pub use record::{normalize_record, normalize_record_list};
pub use statistics::{normalize_overdue_list, normalize_overview, normalize_popular_list};

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::api::Page;

pub(crate) type Obj = Map<String, Value>;

/// The known wrapper shapes a list response arrives in.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEnvelope {
    /// `{items: [...]}` with an optional `total`.
    Items {
        items: Vec<Value>,
        total: Option<u64>,
    },
    /// A bare JSON array.
    Array(Vec<Value>),
    /// `{code: N, message}` with non-zero code.
    Error { code: i64, message: String },
    /// Anything else (null, scalars, objects without `items`).
    Empty,
}

impl ListEnvelope {
    /// Classify a raw response body. Success envelopes (`{code:0, data}`)
    /// are unwrapped and their payload classified recursively.
    pub fn classify(value: Value) -> Self {
        match value {
            Value::Array(items) => ListEnvelope::Array(items),
            Value::Object(mut obj) => {
                let code = obj.get("code").and_then(Value::as_i64);
                if let Some(code) = code {
                    if code != 0 {
                        let message = obj
                            .get("message")
                            .and_then(Value::as_str)
                            .unwrap_or_default()
                            .to_string();
                        return ListEnvelope::Error { code, message };
                    }
                }
                if code.is_some() || obj.contains_key("data") {
                    if let Some(data) = obj.remove("data") {
                        return Self::classify(data);
                    }
                }
                match obj.remove("items") {
                    Some(Value::Array(items)) => ListEnvelope::Items {
                        items,
                        total: obj.get("total").and_then(Value::as_u64),
                    },
                    _ => ListEnvelope::Empty,
                }
            }
            _ => ListEnvelope::Empty,
        }
    }

    /// Collapse to the uniform page shape. `total` defaults to the item
    /// count; errors and unrecognized shapes yield an empty page, never a
    /// failure.
    pub fn into_page(self) -> Page<Value> {
        match self {
            ListEnvelope::Items { items, total } => {
                let total = total.unwrap_or(items.len() as u64);
                Page { items, total }
            }
            ListEnvelope::Array(items) => {
                let total = items.len() as u64;
                Page { items, total }
            }
            ListEnvelope::Error { .. } | ListEnvelope::Empty => Page::empty(),
        }
    }
}

/// Normalize any list response body to `{items, total}`.
pub fn normalize_list(value: Value) -> Page<Value> {
    ListEnvelope::classify(value).into_page()
}

/// First present key wins; numbers are stringified; anything else is skipped.
pub(crate) fn text(obj: &Obj, keys: &[&str]) -> String {
    for key in keys {
        match obj.get(*key) {
            Some(Value::String(s)) => return s.clone(),
            Some(Value::Number(n)) => return n.to_string(),
            _ => {}
        }
    }
    String::new()
}

/// Integer with fallback chain; missing or malformed coerces to 0.
pub(crate) fn integer(obj: &Obj, keys: &[&str]) -> i64 {
    for key in keys {
        match obj.get(*key) {
            Some(Value::Number(n)) => {
                if let Some(i) = n.as_i64() {
                    return i;
                }
                if let Some(f) = n.as_f64() {
                    return f as i64;
                }
            }
            Some(Value::String(s)) => {
                if let Ok(i) = s.parse::<i64>() {
                    return i;
                }
                // Non-numeric status strings fall through to the default.
            }
            _ => {}
        }
    }
    0
}

pub(crate) fn float(obj: &Obj, keys: &[&str]) -> Option<f64> {
    for key in keys {
        if let Some(f) = obj.get(*key).and_then(Value::as_f64) {
            return Some(f);
        }
    }
    None
}

/// ISO date with fallback chain; malformed dates decode to `None`.
pub(crate) fn date(obj: &Obj, keys: &[&str]) -> Option<NaiveDate> {
    for key in keys {
        if let Some(s) = obj.get(*key).and_then(Value::as_str) {
            if let Ok(parsed) = s.parse::<NaiveDate>() {
                return Some(parsed);
            }
        }
    }
    None
}

pub(crate) fn opt_text(obj: &Obj, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(s) = obj.get(*key).and_then(Value::as_str) {
            return Some(s.to_string());
        }
    }
    None
}
