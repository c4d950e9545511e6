//! Public API surface for the library client.
//!
//! This file consolidates the canonical domain types shared by the transport
//! layer, the domain services and the mock backend. All types derive
//! Serialize/Deserialize with camelCase wire names, matching the backend's
//! canonical response shape. Legacy field aliases are handled by the
//! `normalize` module, not here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Book identifier (backend-assigned, opaque string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookId(pub String);

/// Reader identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReaderId(pub String);

/// Borrow-group identifier, shared by every record created in one borrow
/// submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BorrowId(pub String);

impl BookId {
    pub fn new(value: impl Into<String>) -> Self {
        BookId(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl ReaderId {
    pub fn new(value: impl Into<String>) -> Self {
        ReaderId(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl BorrowId {
    pub fn new(value: impl Into<String>) -> Self {
        BorrowId(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for ReaderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for BorrowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalogued book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub publish_date: Option<NaiveDate>,
    #[serde(default)]
    pub category: String,
    /// Shelf/floor location within the library.
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub total_copies: i64,
    /// Copies currently on the shelf. Expected to stay within
    /// `0..=total_copies`; the mock backend does not enforce the lower bound.
    #[serde(default)]
    pub available_copies: i64,
    #[serde(default)]
    pub isbn: String,
    /// Cumulative number of times this book has been borrowed.
    #[serde(default)]
    pub borrow_count: i64,
}

/// A registered reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reader {
    pub id: ReaderId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id_type: String,
    #[serde(default)]
    pub id_number: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub register_date: Option<NaiveDate>,
    /// Reader status code. 0 = active; non-zero values encode lost-card and
    /// similar states.
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub borrow_limit: i64,
    /// Count of this reader's records in Borrowed or Overdue state.
    #[serde(default)]
    pub current_borrow_count: i64,
}

/// Lifecycle state of a borrow record.
///
/// `Borrowed` transitions to `Returned` (on-time return) or `Overdue` (late
/// return); both are terminal. No transition leads back to `Borrowed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum BorrowStatus {
    #[default]
    Borrowed,
    Returned,
    Overdue,
}

impl From<i64> for BorrowStatus {
    fn from(code: i64) -> Self {
        match code {
            1 => BorrowStatus::Returned,
            2 => BorrowStatus::Overdue,
            _ => BorrowStatus::Borrowed,
        }
    }
}

impl From<BorrowStatus> for i64 {
    fn from(status: BorrowStatus) -> Self {
        match status {
            BorrowStatus::Borrowed => 0,
            BorrowStatus::Returned => 1,
            BorrowStatus::Overdue => 2,
        }
    }
}

impl BorrowStatus {
    pub fn code(self) -> i64 {
        self.into()
    }

    /// Lowercase name used in query-string filters.
    pub fn as_query(self) -> &'static str {
        match self {
            BorrowStatus::Borrowed => "borrowed",
            BorrowStatus::Returned => "returned",
            BorrowStatus::Overdue => "overdue",
        }
    }

    pub fn from_query(value: &str) -> Option<Self> {
        match value {
            "borrowed" => Some(BorrowStatus::Borrowed),
            "returned" => Some(BorrowStatus::Returned),
            "overdue" => Some(BorrowStatus::Overdue),
            _ => None,
        }
    }
}

/// One borrow record: a single copy of a single book loaned to a reader.
///
/// Created by a borrow transaction and mutated only by a return transaction,
/// which sets the terminal status plus the return date and fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRecord {
    pub borrow_id: BorrowId,
    pub book_id: BookId,
    pub reader_id: ReaderId,
    #[serde(default)]
    pub borrow_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: BorrowStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fine: Option<f64>,
    // Denormalized display fields some list endpoints attach.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reader_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reader_id_number: Option<String>,
}

/// One line of a borrow receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptItem {
    #[serde(default)]
    pub book_title: String,
    #[serde(default)]
    pub book_author: String,
}

/// Receipt echoed back by a successful borrow submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowReceipt {
    pub borrow_id: BorrowId,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub items: Vec<ReceiptItem>,
}

/// Response of a borrow submission: the minted group id plus the receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowConfirmation {
    pub borrow_id: BorrowId,
    pub receipt: BorrowReceipt,
}

/// Per-record result of a return submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnedLine {
    pub borrow_id: BorrowId,
    pub book_id: BookId,
    #[serde(default)]
    pub fine: f64,
}

/// Aggregate fine entry, present only when the total fine is positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FineEntry {
    pub amount: f64,
}

/// Response of a return submission.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReturnOutcome {
    #[serde(default)]
    pub returned: Vec<ReturnedLine>,
    #[serde(default)]
    pub fines: Vec<FineEntry>,
}

impl ReturnOutcome {
    /// Sum of all per-record fines.
    pub fn total_fine(&self) -> f64 {
        self.returned.iter().map(|line| line.fine).sum()
    }
}

/// Dashboard overview counters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsOverview {
    #[serde(default)]
    pub total_books: i64,
    #[serde(default)]
    pub total_readers: i64,
    #[serde(default)]
    pub borrowed_count: i64,
    #[serde(default)]
    pub overdue_count: i64,
    #[serde(default)]
    pub today_borrows: i64,
    #[serde(default)]
    pub today_returns: i64,
}

/// Entry in the popular-books ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularBook {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub borrow_count: i64,
}

/// Entry in the overdue-books listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverdueBook {
    pub borrow_id: BorrowId,
    #[serde(default)]
    pub book_title: String,
    #[serde(default)]
    pub reader_name: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub overdue_days: i64,
    #[serde(default)]
    pub category: String,
}

/// A normalized page of results. Every list endpoint resolves to this shape
/// regardless of how the backend wrapped it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Page {
            items: Vec::new(),
            total: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Page::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_id_roundtrip() {
        let id = BookId::new("42");
        assert_eq!(id.value(), "42");
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_id_equality_and_hash() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(ReaderId::new("1001"));
        set.insert(ReaderId::new("1002"));
        set.insert(ReaderId::new("1001"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_borrow_status_codes() {
        assert_eq!(BorrowStatus::Borrowed.code(), 0);
        assert_eq!(BorrowStatus::Returned.code(), 1);
        assert_eq!(BorrowStatus::Overdue.code(), 2);
        assert_eq!(BorrowStatus::from(2), BorrowStatus::Overdue);
        // Unknown codes fall back to Borrowed.
        assert_eq!(BorrowStatus::from(99), BorrowStatus::Borrowed);
    }

    #[test]
    fn test_borrow_status_wire_encoding() {
        let json = serde_json::to_string(&BorrowStatus::Overdue).unwrap();
        assert_eq!(json, "2");
        let status: BorrowStatus = serde_json::from_str("1").unwrap();
        assert_eq!(status, BorrowStatus::Returned);
    }

    #[test]
    fn test_borrow_status_query_names() {
        assert_eq!(BorrowStatus::Overdue.as_query(), "overdue");
        assert_eq!(
            BorrowStatus::from_query("returned"),
            Some(BorrowStatus::Returned)
        );
        assert_eq!(BorrowStatus::from_query("stolen"), None);
    }

    #[test]
    fn test_book_serializes_camel_case() {
        let book = Book {
            id: BookId::new("1"),
            title: "Core Java".to_string(),
            author: "Cay S. Horstmann".to_string(),
            publisher: String::new(),
            publish_date: None,
            category: String::new(),
            location: String::new(),
            total_copies: 10,
            available_copies: 5,
            isbn: String::new(),
            borrow_count: 0,
        };
        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(value["totalCopies"], 10);
        assert_eq!(value["availableCopies"], 5);
        assert!(value.get("total_copies").is_none());
    }

    #[test]
    fn test_return_outcome_total_fine() {
        let outcome = ReturnOutcome {
            returned: vec![
                ReturnedLine {
                    borrow_id: BorrowId::new("a"),
                    book_id: BookId::new("1"),
                    fine: 2.5,
                },
                ReturnedLine {
                    borrow_id: BorrowId::new("b"),
                    book_id: BookId::new("2"),
                    fine: 0.0,
                },
            ],
            fines: vec![FineEntry { amount: 2.5 }],
        };
        assert!((outcome.total_fine() - 2.5).abs() < f64::EPSILON);
    }
}
