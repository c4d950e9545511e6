//! Book catalogue operations.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{expect_data, PageOptions};
use crate::api::{Book, BookId, Page};
use crate::normalize::{normalize_book, normalize_book_list};
use crate::transport::{ClientResult, Params, Transport};

/// Filters for the book listing.
#[derive(Debug, Clone, Default)]
pub struct BookQuery {
    /// Matches title, author or ISBN server-side.
    pub search: Option<String>,
    pub category: Option<String>,
    pub page: PageOptions,
}

impl BookQuery {
    fn into_params(self) -> Params {
        let mut params = Params::new();
        if let Some(search) = self.search {
            params.push(("search".to_string(), search));
        }
        if let Some(category) = self.category {
            params.push(("category".to_string(), category));
        }
        self.page.push_params(&mut params);
        params
    }
}

/// Partial stock update for `PATCH /books/{id}/stock`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_copies: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_copies: Option<i64>,
}

pub async fn list_books(transport: &dyn Transport, query: BookQuery) -> ClientResult<Page<Book>> {
    let body = transport.get("/books", query.into_params()).await?;
    let data = expect_data(body)?;
    Ok(normalize_book_list(data))
}

pub async fn get_book(transport: &dyn Transport, id: &BookId) -> ClientResult<Option<Book>> {
    let path = format!("/books/{}", id.value());
    let body = transport.get(&path, Params::new()).await?;
    let data = expect_data(body)?;
    Ok(normalize_book(&data))
}

/// Create a book; the server echo is passed through unmodified (the server
/// is the source of truth for the assigned id and defaults).
pub async fn create_book(transport: &dyn Transport, book: &Book) -> ClientResult<Value> {
    let body = transport.post("/books", serde_json::to_value(book)?).await?;
    expect_data(body)
}

pub async fn update_book(
    transport: &dyn Transport,
    id: &BookId,
    book: &Book,
) -> ClientResult<Value> {
    let path = format!("/books/{}", id.value());
    let body = transport.put(&path, serde_json::to_value(book)?).await?;
    expect_data(body)
}

pub async fn delete_book(transport: &dyn Transport, id: &BookId) -> ClientResult<()> {
    let path = format!("/books/{}", id.value());
    let body = transport.delete(&path).await?;
    expect_data(body)?;
    Ok(())
}

pub async fn patch_stock(
    transport: &dyn Transport,
    id: &BookId,
    patch: &StockPatch,
) -> ClientResult<Value> {
    let path = format!("/books/{}/stock", id.value());
    let body = transport.patch(&path, serde_json::to_value(patch)?).await?;
    expect_data(body)
}

/// Distinct category names, lenient: non-string entries are dropped.
pub async fn list_categories(transport: &dyn Transport) -> ClientResult<Vec<String>> {
    let body = transport.get("/books/categories", Params::new()).await?;
    let data = expect_data(body)?;
    let categories = crate::normalize::normalize_list(data)
        .items
        .into_iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect();
    Ok(categories)
}
