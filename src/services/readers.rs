//! Reader registry operations.

use serde_json::Value;

use super::{expect_data, PageOptions};
use crate::api::{Page, Reader, ReaderId};
use crate::normalize::{normalize_reader, normalize_reader_list};
use crate::transport::{ClientResult, Params, Transport};

/// Filters for the reader listing.
#[derive(Debug, Clone, Default)]
pub struct ReaderQuery {
    /// Matches name or card number server-side.
    pub search: Option<String>,
    pub page: PageOptions,
}

impl ReaderQuery {
    fn into_params(self) -> Params {
        let mut params = Params::new();
        if let Some(search) = self.search {
            params.push(("search".to_string(), search));
        }
        self.page.push_params(&mut params);
        params
    }
}

pub async fn list_readers(
    transport: &dyn Transport,
    query: ReaderQuery,
) -> ClientResult<Page<Reader>> {
    let body = transport.get("/readers", query.into_params()).await?;
    let data = expect_data(body)?;
    Ok(normalize_reader_list(data))
}

pub async fn get_reader(transport: &dyn Transport, id: &ReaderId) -> ClientResult<Option<Reader>> {
    let path = format!("/readers/{}", id.value());
    let body = transport.get(&path, Params::new()).await?;
    let data = expect_data(body)?;
    Ok(normalize_reader(&data))
}

pub async fn create_reader(transport: &dyn Transport, reader: &Reader) -> ClientResult<Value> {
    let body = transport
        .post("/readers", serde_json::to_value(reader)?)
        .await?;
    expect_data(body)
}

pub async fn update_reader(
    transport: &dyn Transport,
    id: &ReaderId,
    reader: &Reader,
) -> ClientResult<Value> {
    let path = format!("/readers/{}", id.value());
    let body = transport.put(&path, serde_json::to_value(reader)?).await?;
    expect_data(body)
}

pub async fn delete_reader(transport: &dyn Transport, id: &ReaderId) -> ClientResult<()> {
    let path = format!("/readers/{}", id.value());
    let body = transport.delete(&path).await?;
    expect_data(body)?;
    Ok(())
}

/// Look a reader up by card number, the entry point of the borrow workflow.
pub async fn get_reader_by_card(
    transport: &dyn Transport,
    card_number: &str,
) -> ClientResult<Option<Reader>> {
    let path = format!("/readers/byCard/{}", card_number);
    let body = transport.get(&path, Params::new()).await?;
    let data = expect_data(body)?;
    Ok(normalize_reader(&data))
}
