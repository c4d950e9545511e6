//! In-memory backend simulator.
//!
//! `MockTransport` implements [`Transport`] over a seeded [`MockLibrary`],
//! answering every route the real backend exposes with the same envelope
//! shape (`{code, message, data}`). It exists so demos and integration tests
//! run without a server; the transaction quirks documented in
//! [`engine`] are reproduced on purpose.

pub mod data;
pub mod engine;

pub use engine::MockLibrary;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use log::debug;
use parking_lot::Mutex;
use serde_json::{json, Value};

use crate::api::BorrowStatus;
use crate::services::borrow::{BorrowRequest, ReturnRequest};
use crate::transport::{translate_pagination, ClientResult, Params, Transport};

const DEFAULT_LIMIT: usize = usize::MAX;

/// Transport backed by the in-memory library.
pub struct MockTransport {
    library: Mutex<MockLibrary>,
    today: NaiveDate,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    /// Seeded simulator with "today" taken from the local clock.
    pub fn new() -> Self {
        Self::with_today(Local::now().date_naive())
    }

    /// Seeded simulator with a pinned clock, for deterministic tests.
    pub fn with_today(today: NaiveDate) -> Self {
        MockTransport {
            library: Mutex::new(data::seed()),
            today,
        }
    }

    /// Copy of the current state, for assertions.
    pub fn snapshot(&self) -> MockLibrary {
        self.library.lock().clone()
    }

    fn ok(data: Value) -> Value {
        json!({"code": 0, "message": "success", "data": data})
    }

    fn error(code: i64, message: &str) -> Value {
        json!({"code": code, "message": message})
    }

    fn not_found(path: &str) -> Value {
        Self::error(404, &format!("no such route: {}", path))
    }

    fn page(items: Vec<Value>, total: usize) -> Value {
        json!({"items": items, "total": total})
    }

    fn to_values<T: serde::Serialize>(items: &[T]) -> Vec<Value> {
        items
            .iter()
            .filter_map(|item| serde_json::to_value(item).ok())
            .collect()
    }
}

fn param<'a>(params: &'a Params, key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn usize_param(params: &Params, key: &str, default: usize) -> usize {
    param(params, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Split a path into its non-empty segments, ignoring the query-less
/// leading slash.
fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, path: &str, mut params: Params) -> ClientResult<Value> {
        // Mirror the wire transport: page/size arrive here too and become
        // offset/limit before routing.
        translate_pagination(&mut params);
        debug!("mock GET {} {:?}", path, params);

        let offset = usize_param(&params, "offset", 0);
        let limit = usize_param(&params, "limit", DEFAULT_LIMIT);
        let library = self.library.lock();

        let body = match segments(path).as_slice() {
            ["books"] => {
                let (items, total) =
                    library.list_books(param(&params, "search"), param(&params, "category"), offset, limit);
                Self::ok(Self::page(Self::to_values(&items), total))
            }
            ["books", "categories"] => Self::ok(json!(library.categories())),
            ["books", id] => match library.book(id) {
                Some(book) => Self::ok(serde_json::to_value(book)?),
                None => Self::error(404, "book not found"),
            },
            ["readers"] => {
                let (items, total) =
                    library.list_readers(param(&params, "search"), offset, limit);
                Self::ok(Self::page(Self::to_values(&items), total))
            }
            ["readers", "byCard", card] => match library.reader_by_card(card) {
                Some(reader) => Self::ok(serde_json::to_value(reader)?),
                None => Self::error(404, "reader not found"),
            },
            ["readers", id] => match library.reader(id) {
                Some(reader) => Self::ok(serde_json::to_value(reader)?),
                None => Self::error(404, "reader not found"),
            },
            // `/borrow/record` is the legacy spelling of the listing route;
            // both answer identically.
            ["borrow"] | ["borrow", "record"] => {
                let status = param(&params, "status").and_then(BorrowStatus::from_query);
                let records = library.list_records(param(&params, "readerId"), status);
                let total = records.len();
                let window: Vec<_> = records.into_iter().skip(offset).take(limit).collect();
                Self::ok(Self::page(Self::to_values(&window), total))
            }
            ["statistics", "overview"] => {
                Self::ok(serde_json::to_value(library.overview(self.today))?)
            }
            ["statistics", "popular-books"] => {
                let top = usize_param(&params, "top", 10);
                Self::ok(json!(Self::to_values(&library.popular_books(top))))
            }
            ["statistics", "overdue-books"] => {
                let (items, total) = library.overdue_books(self.today, offset, limit);
                Self::ok(Self::page(Self::to_values(&items), total))
            }
            ["statistics", "vacant-books"] => {
                let (items, total) = library.vacant_books(offset, limit);
                Self::ok(Self::page(Self::to_values(&items), total))
            }
            ["statistics", "borrow-details", reader_id] => {
                let records = library.list_records(Some(reader_id), None);
                let total = records.len();
                Self::ok(Self::page(Self::to_values(&records), total))
            }
            _ => Self::not_found(path),
        };
        Ok(body)
    }

    async fn post(&self, path: &str, body: Value) -> ClientResult<Value> {
        debug!("mock POST {}", path);
        let mut library = self.library.lock();

        let response = match segments(path).as_slice() {
            ["auth", "login"] => {
                let username = body.get("username").and_then(Value::as_str).unwrap_or("");
                let password = body.get("password").and_then(Value::as_str).unwrap_or("");
                if username == "admin" && password == "123456" {
                    Self::ok(json!({
                        "token": "mock-token-admin",
                        "user": {"id": 1, "name": "admin", "role": "admin"}
                    }))
                } else {
                    Self::error(401, "invalid username or password")
                }
            }
            ["auth", "logout"] => Self::ok(Value::Null),
            ["borrow"] => match serde_json::from_value::<BorrowRequest>(body) {
                Ok(request) if !request.books.is_empty() => {
                    let confirmation = library.borrow(&request);
                    Self::ok(serde_json::to_value(confirmation)?)
                }
                Ok(_) => Self::error(400, "no books selected"),
                Err(_) => Self::error(400, "malformed borrow request"),
            },
            ["return"] => match serde_json::from_value::<ReturnRequest>(body) {
                Ok(request) => {
                    let outcome = library.return_books(&request);
                    Self::ok(serde_json::to_value(outcome)?)
                }
                Err(_) => Self::error(400, "malformed return request"),
            },
            ["books"] => match library.create_book(&body) {
                Some(book) => Self::ok(serde_json::to_value(book)?),
                None => Self::error(400, "malformed book"),
            },
            ["readers"] => match library.create_reader(&body) {
                Some(reader) => Self::ok(serde_json::to_value(reader)?),
                None => Self::error(400, "malformed reader"),
            },
            _ => Self::not_found(path),
        };
        Ok(response)
    }

    async fn put(&self, path: &str, body: Value) -> ClientResult<Value> {
        debug!("mock PUT {}", path);
        let mut library = self.library.lock();

        let response = match segments(path).as_slice() {
            ["books", id] => match library.update_book(id, &body) {
                Some(book) => Self::ok(serde_json::to_value(book)?),
                None => Self::error(404, "book not found"),
            },
            ["readers", id] => match library.update_reader(id, &body) {
                Some(reader) => Self::ok(serde_json::to_value(reader)?),
                None => Self::error(404, "reader not found"),
            },
            _ => Self::not_found(path),
        };
        Ok(response)
    }

    async fn patch(&self, path: &str, body: Value) -> ClientResult<Value> {
        debug!("mock PATCH {}", path);
        let mut library = self.library.lock();

        let response = match segments(path).as_slice() {
            ["books", id, "stock"] => match library.patch_stock(id, &body) {
                Some(book) => Self::ok(serde_json::to_value(book)?),
                None => Self::error(404, "book not found"),
            },
            _ => Self::not_found(path),
        };
        Ok(response)
    }

    async fn delete(&self, path: &str) -> ClientResult<Value> {
        debug!("mock DELETE {}", path);
        let mut library = self.library.lock();

        let response = match segments(path).as_slice() {
            ["books", id] => {
                if library.delete_book(id) {
                    Self::ok(Value::Null)
                } else {
                    Self::error(404, "book not found")
                }
            }
            ["readers", id] => {
                if library.delete_reader(id) {
                    Self::ok(Value::Null)
                } else {
                    Self::error(404, "reader not found")
                }
            }
            _ => Self::not_found(path),
        };
        Ok(response)
    }
}
