//! Statistics normalization.
//!
//! The overview endpoint is the worst offender for field drift: the current
//! backend answers camelCase, the previous one snake_case, and an
//! intermediate build used `borrowedNow`/`overdue`. All aliases collapse
//! here.

use serde_json::Value;

use super::{date, integer, normalize_list, text};
use crate::api::{BorrowId, OverdueBook, Page, PopularBook, StatisticsOverview};

/// Lenient decode of the dashboard overview; a non-object yields zeroed
/// counters.
pub fn normalize_overview(value: &Value) -> StatisticsOverview {
    let Some(obj) = value.as_object() else {
        return StatisticsOverview::default();
    };
    StatisticsOverview {
        total_books: integer(obj, &["totalBooks", "total_books"]),
        total_readers: integer(obj, &["totalReaders", "total_readers"]),
        borrowed_count: integer(obj, &["borrowedCount", "borrowedNow", "borrowed_count"]),
        overdue_count: integer(obj, &["overdueCount", "overdue", "overdue_count"]),
        today_borrows: integer(obj, &["todayBorrows", "today_borrows"]),
        today_returns: integer(obj, &["todayReturns", "today_returns"]),
    }
}

/// Popular-books ranking: tolerates bare arrays and `{items}` envelopes,
/// plus the `bookTitle`/`borrowTimes` aliases of older backends.
pub fn normalize_popular_list(value: Value) -> Vec<PopularBook> {
    normalize_list(value)
        .items
        .iter()
        .filter_map(|row| {
            let obj = row.as_object()?;
            Some(PopularBook {
                title: text(obj, &["title", "bookTitle", "bookName"]),
                author: text(obj, &["author", "bookAuthor"]),
                category: text(obj, &["category", "bookCategory"]),
                borrow_count: integer(obj, &["borrowCount", "borrowTimes"]),
            })
        })
        .collect()
}

pub fn normalize_overdue_list(value: Value) -> Page<OverdueBook> {
    let page = normalize_list(value);
    let total = page.total;
    let items = page
        .items
        .iter()
        .filter_map(|row| {
            let obj = row.as_object()?;
            Some(OverdueBook {
                borrow_id: BorrowId::new(text(obj, &["borrowId"])),
                book_title: text(obj, &["bookTitle", "title", "bookName"]),
                reader_name: text(obj, &["readerName"]),
                due_date: date(obj, &["dueDate"]),
                overdue_days: integer(obj, &["overdueDays"]),
                category: text(obj, &["category", "bookCategory"]),
            })
        })
        .collect();
    Page { items, total }
}
