//! Borrow-record normalization.

use serde_json::Value;

use super::{date, float, integer, opt_text, text};
use crate::api::{BookId, BorrowId, BorrowRecord, BorrowStatus, Page, ReaderId};
use crate::normalize::normalize_list;

/// Lenient decode of a single borrow record. The status field has gone by
/// three names across backend generations (`status`, `borrowStates`,
/// `borrowStatus`); all map to the canonical enum.
pub fn normalize_record(value: &Value) -> Option<BorrowRecord> {
    let obj = value.as_object()?;
    Some(BorrowRecord {
        borrow_id: BorrowId::new(text(obj, &["borrowId"])),
        book_id: BookId::new(text(obj, &["bookId"])),
        reader_id: ReaderId::new(text(obj, &["readerId"])),
        borrow_date: date(obj, &["borrowDate"]),
        due_date: date(obj, &["dueDate"]),
        status: BorrowStatus::from(integer(obj, &["status", "borrowStates", "borrowStatus"])),
        return_date: date(obj, &["returnDate"]),
        fine: float(obj, &["fine"]),
        book_title: opt_text(obj, &["bookTitle"]),
        book_author: opt_text(obj, &["bookAuthor"]),
        reader_name: opt_text(obj, &["readerName"]),
        reader_id_number: opt_text(obj, &["readerIdNumber"]),
    })
}

pub fn normalize_record_list(value: Value) -> Page<BorrowRecord> {
    let page = normalize_list(value);
    let total = page.total;
    let items = page
        .items
        .iter()
        .filter_map(normalize_record)
        .collect();
    Page { items, total }
}
