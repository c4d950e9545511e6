//! Book normalization.

use serde_json::Value;

use super::{date, integer, normalize_list, text};
use crate::api::{Book, BookId, Page};

/// Lenient decode of a single book. Accepts both canonical field names and
/// the legacy `bookXxx` vocabulary; `null` or non-object input yields `None`.
/// Idempotent on canonical input.
pub fn normalize_book(value: &Value) -> Option<Book> {
    let obj = value.as_object()?;
    Some(Book {
        id: BookId::new(text(obj, &["id", "bookId"])),
        title: text(obj, &["title", "bookName"]),
        author: text(obj, &["author", "bookAuthor"]),
        publisher: text(obj, &["publisher", "bookPublisher"]),
        publish_date: date(obj, &["publishDate", "bookPubDate"]),
        category: text(obj, &["category", "bookCategory"]),
        location: text(obj, &["location", "bookLocation"]),
        total_copies: integer(obj, &["totalCopies", "bookTotalCopies"]),
        available_copies: integer(obj, &["availableCopies", "bookAvailableCopies"]),
        isbn: text(obj, &["isbn"]),
        borrow_count: integer(obj, &["borrowCount", "borrowTimes"]),
    })
}

/// Normalize a list response into a page of books. The envelope total is
/// preserved even when individual rows fail to decode.
pub fn normalize_book_list(value: Value) -> Page<Book> {
    let page = normalize_list(value);
    let total = page.total;
    let items = page
        .items
        .iter()
        .filter_map(normalize_book)
        .collect();
    Page { items, total }
}
