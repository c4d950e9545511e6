//! Statistics dashboard queries.

use super::{expect_data, PageOptions};
use crate::api::{Book, BorrowRecord, OverdueBook, Page, PopularBook, ReaderId, StatisticsOverview};
use crate::normalize::{
    normalize_book_list, normalize_overdue_list, normalize_overview, normalize_popular_list,
    normalize_record_list,
};
use crate::transport::{ClientResult, Params, Transport};

pub async fn overview(transport: &dyn Transport) -> ClientResult<StatisticsOverview> {
    let body = transport.get("/statistics/overview", Params::new()).await?;
    let data = expect_data(body)?;
    Ok(normalize_overview(&data))
}

pub async fn popular_books(transport: &dyn Transport, top: u32) -> ClientResult<Vec<PopularBook>> {
    let params = vec![("top".to_string(), top.to_string())];
    let body = transport.get("/statistics/popular-books", params).await?;
    let data = expect_data(body)?;
    Ok(normalize_popular_list(data))
}

pub async fn overdue_books(
    transport: &dyn Transport,
    page: PageOptions,
) -> ClientResult<Page<OverdueBook>> {
    let mut params = Params::new();
    page.push_params(&mut params);
    let body = transport.get("/statistics/overdue-books", params).await?;
    let data = expect_data(body)?;
    Ok(normalize_overdue_list(data))
}

/// Books with at least one copy on the shelf.
pub async fn vacant_books(
    transport: &dyn Transport,
    page: PageOptions,
) -> ClientResult<Page<Book>> {
    let mut params = Params::new();
    page.push_params(&mut params);
    let body = transport.get("/statistics/vacant-books", params).await?;
    let data = expect_data(body)?;
    Ok(normalize_book_list(data))
}

/// Full borrow history for one reader.
pub async fn borrow_details(
    transport: &dyn Transport,
    reader_id: &ReaderId,
) -> ClientResult<Page<BorrowRecord>> {
    let path = format!("/statistics/borrow-details/{}", reader_id.value());
    let body = transport.get(&path, Params::new()).await?;
    let data = expect_data(body)?;
    Ok(normalize_record_list(data))
}
