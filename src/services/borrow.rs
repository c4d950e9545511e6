//! Borrow/return transaction submission and record queries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{expect_data, PageOptions};
use crate::api::{
    BookId, BorrowConfirmation, BorrowRecord, BorrowStatus, Page, ReaderId, ReturnOutcome,
};
use crate::normalize::normalize_record_list;
use crate::transport::{ClientResult, Params, Transport};

/// One line of a borrow request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowLine {
    pub book_id: BookId,
    pub count: i64,
}

/// Payload for `POST /borrow`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRequest {
    pub reader_id: ReaderId,
    pub books: Vec<BorrowLine>,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
}

/// Payload for `POST /return`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequest {
    pub borrow_ids: Vec<crate::api::BorrowId>,
    pub return_date: NaiveDate,
}

/// Filters for borrow-record listings.
#[derive(Debug, Clone, Default)]
pub struct BorrowQuery {
    pub reader_id: Option<ReaderId>,
    pub status: Option<BorrowStatus>,
    pub page: PageOptions,
}

impl BorrowQuery {
    fn into_params(self) -> Params {
        let mut params = Params::new();
        if let Some(reader_id) = self.reader_id {
            params.push(("readerId".to_string(), reader_id.value().to_string()));
        }
        if let Some(status) = self.status {
            params.push(("status".to_string(), status.as_query().to_string()));
        }
        self.page.push_params(&mut params);
        params
    }
}

/// Submit a borrow transaction. The confirmation is strict-decoded: a
/// malformed receipt is a real failure, not something to paper over.
pub async fn create_borrow(
    transport: &dyn Transport,
    request: &BorrowRequest,
) -> ClientResult<BorrowConfirmation> {
    let body = transport
        .post("/borrow", serde_json::to_value(request)?)
        .await?;
    let data = expect_data(body)?;
    Ok(serde_json::from_value(data)?)
}

/// Submit a return transaction for one or more borrow groups.
pub async fn return_books(
    transport: &dyn Transport,
    request: &ReturnRequest,
) -> ClientResult<ReturnOutcome> {
    let body = transport
        .post("/return", serde_json::to_value(request)?)
        .await?;
    let data = expect_data(body)?;
    Ok(serde_json::from_value(data)?)
}

/// List borrow records with optional reader/status filters.
pub async fn list_borrow_records(
    transport: &dyn Transport,
    query: BorrowQuery,
) -> ClientResult<Page<BorrowRecord>> {
    let body = transport.get("/borrow", query.into_params()).await?;
    let data = expect_data(body)?;
    Ok(normalize_record_list(data))
}

/// Records currently out with the given reader, the input to a return
/// workflow.
pub async fn list_borrowed_by_reader(
    transport: &dyn Transport,
    reader_id: &ReaderId,
    page: PageOptions,
) -> ClientResult<Page<BorrowRecord>> {
    let query = BorrowQuery {
        reader_id: Some(reader_id.clone()),
        status: Some(BorrowStatus::Borrowed),
        page,
    };
    list_borrow_records(transport, query).await
}
