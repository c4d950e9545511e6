//! In-memory dataset and transaction engine for the mock backend.
//!
//! The borrow/return semantics here mirror the real backend closely enough
//! for demos, including two knowingly inherited quirks (see the borrow and
//! return transactions): available copies are decremented without a floor
//! check, and the reader counter moves by line items on borrow but by
//! single records on return. Both are preserved as-is pending a decision on
//! the server-side rules; do not "fix" one without the other.

use chrono::NaiveDate;
use serde_json::Value;

use crate::api::{
    Book, BookId, BorrowConfirmation, BorrowId, BorrowReceipt, BorrowRecord, BorrowStatus,
    FineEntry, OverdueBook, PopularBook, Reader, ReaderId, ReceiptItem, ReturnOutcome,
    ReturnedLine, StatisticsOverview,
};
use crate::normalize::{normalize_book, normalize_reader};
use crate::services::borrow::{BorrowRequest, ReturnRequest};

/// Daily fine for overdue returns, in currency units.
pub const FINE_PER_DAY: f64 = 0.5;

/// The mock backend's entire state.
#[derive(Debug, Clone, Default)]
pub struct MockLibrary {
    pub books: Vec<Book>,
    pub readers: Vec<Reader>,
    pub records: Vec<BorrowRecord>,
}

impl MockLibrary {
    // ---------------------------------------------------------------- books

    pub fn list_books(
        &self,
        search: Option<&str>,
        category: Option<&str>,
        offset: usize,
        limit: usize,
    ) -> (Vec<Book>, usize) {
        let filtered: Vec<&Book> = self
            .books
            .iter()
            .filter(|book| match search {
                Some(term) => {
                    book.title.contains(term)
                        || book.author.contains(term)
                        || book.isbn.contains(term)
                }
                None => true,
            })
            .filter(|book| match category {
                Some(wanted) => book.category == wanted,
                None => true,
            })
            .collect();
        let total = filtered.len();
        let items = filtered
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        (items, total)
    }

    pub fn book(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id.value() == id)
    }

    fn book_mut(&mut self, id: &str) -> Option<&mut Book> {
        self.books.iter_mut().find(|b| b.id.value() == id)
    }

    /// Create a book from a raw payload. Zero or missing copy counts default
    /// to 1, matching the backend's create behavior.
    pub fn create_book(&mut self, payload: &Value) -> Option<Book> {
        let mut book = normalize_book(payload)?;
        book.id = BookId::new((self.books.len() + 1).to_string());
        if book.total_copies == 0 {
            book.total_copies = 1;
        }
        if book.available_copies == 0 {
            book.available_copies = 1;
        }
        self.books.push(book.clone());
        Some(book)
    }

    /// Merge raw fields over the stored record, then renormalize. The id is
    /// never overwritten by the payload.
    pub fn update_book(&mut self, id: &str, payload: &Value) -> Option<Book> {
        let index = self.books.iter().position(|b| b.id.value() == id)?;
        let mut merged = match serde_json::to_value(&self.books[index]) {
            Ok(Value::Object(map)) => map,
            _ => return None,
        };
        if let Some(updates) = payload.as_object() {
            for (key, value) in updates {
                merged.insert(key.clone(), value.clone());
            }
        }
        let mut updated = normalize_book(&Value::Object(merged))?;
        updated.id = BookId::new(id);
        self.books[index] = updated.clone();
        Some(updated)
    }

    pub fn delete_book(&mut self, id: &str) -> bool {
        let before = self.books.len();
        self.books.retain(|b| b.id.value() != id);
        self.books.len() != before
    }

    pub fn patch_stock(&mut self, id: &str, payload: &Value) -> Option<Book> {
        let book = self.book_mut(id)?;
        if let Some(total) = payload.get("totalCopies").and_then(Value::as_i64) {
            book.total_copies = total;
        }
        if let Some(available) = payload.get("availableCopies").and_then(Value::as_i64) {
            book.available_copies = available;
        }
        Some(book.clone())
    }

    /// Distinct categories in catalogue order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for book in &self.books {
            if !book.category.is_empty() && !seen.contains(&book.category) {
                seen.push(book.category.clone());
            }
        }
        seen
    }

    // -------------------------------------------------------------- readers

    pub fn list_readers(
        &self,
        search: Option<&str>,
        offset: usize,
        limit: usize,
    ) -> (Vec<Reader>, usize) {
        let filtered: Vec<&Reader> = self
            .readers
            .iter()
            .filter(|reader| match search {
                Some(term) => reader.name.contains(term) || reader.id_number.contains(term),
                None => true,
            })
            .collect();
        let total = filtered.len();
        let items = filtered
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        (items, total)
    }

    pub fn reader(&self, id: &str) -> Option<&Reader> {
        self.readers.iter().find(|r| r.id.value() == id)
    }

    fn reader_mut(&mut self, id: &str) -> Option<&mut Reader> {
        self.readers.iter_mut().find(|r| r.id.value() == id)
    }

    pub fn reader_by_card(&self, card_number: &str) -> Option<&Reader> {
        self.readers.iter().find(|r| r.id_number == card_number)
    }

    /// Create a reader. Ids continue the 1000-series; a fresh reader starts
    /// with no borrows.
    pub fn create_reader(&mut self, payload: &Value) -> Option<Reader> {
        let mut reader = normalize_reader(payload)?;
        reader.id = ReaderId::new((1000 + self.readers.len() + 1).to_string());
        reader.current_borrow_count = 0;
        self.readers.push(reader.clone());
        Some(reader)
    }

    pub fn update_reader(&mut self, id: &str, payload: &Value) -> Option<Reader> {
        let index = self.readers.iter().position(|r| r.id.value() == id)?;
        let mut merged = match serde_json::to_value(&self.readers[index]) {
            Ok(Value::Object(map)) => map,
            _ => return None,
        };
        if let Some(updates) = payload.as_object() {
            for (key, value) in updates {
                merged.insert(key.clone(), value.clone());
            }
        }
        let mut updated = normalize_reader(&Value::Object(merged))?;
        updated.id = ReaderId::new(id);
        self.readers[index] = updated.clone();
        Some(updated)
    }

    pub fn delete_reader(&mut self, id: &str) -> bool {
        let before = self.readers.len();
        self.readers.retain(|r| r.id.value() != id);
        self.readers.len() != before
    }

    // -------------------------------------------------------------- records

    /// Records filtered by reader and status, enriched with book/reader
    /// display fields.
    pub fn list_records(
        &self,
        reader_id: Option<&str>,
        status: Option<BorrowStatus>,
    ) -> Vec<BorrowRecord> {
        self.records
            .iter()
            .filter(|record| match reader_id {
                Some(id) => record.reader_id.value() == id,
                None => true,
            })
            .filter(|record| match status {
                Some(wanted) => record.status == wanted,
                None => true,
            })
            .map(|record| self.enrich(record))
            .collect()
    }

    fn enrich(&self, record: &BorrowRecord) -> BorrowRecord {
        let book = self.book(record.book_id.value());
        let reader = self.reader(record.reader_id.value());
        let mut enriched = record.clone();
        enriched.book_title = Some(
            book.map(|b| b.title.clone())
                .unwrap_or_else(|| "Unknown Book".to_string()),
        );
        enriched.book_author = Some(
            book.map(|b| b.author.clone())
                .unwrap_or_else(|| "Unknown Author".to_string()),
        );
        enriched.reader_name = Some(
            reader
                .map(|r| r.name.clone())
                .unwrap_or_else(|| "Unknown Reader".to_string()),
        );
        enriched.reader_id_number = Some(
            reader
                .map(|r| r.id_number.clone())
                .unwrap_or_else(|| "Unknown ID".to_string()),
        );
        enriched
    }

    // --------------------------------------------------------- transactions

    /// Borrow transaction: one record per book line, all sharing a freshly
    /// minted group id.
    ///
    /// Two inherited quirks, kept intentionally:
    /// - available copies are decremented by the requested count with no
    ///   floor check, so over-borrowing drives the count negative;
    /// - the reader's counter increases by the number of *lines*, not the
    ///   total quantity, while a return decreases it by one per record.
    pub fn borrow(&mut self, request: &BorrowRequest) -> BorrowConfirmation {
        let borrow_id = BorrowId::new((20_230_000 + self.records.len() as i64 + 1).to_string());

        for line in &request.books {
            self.records.push(BorrowRecord {
                borrow_id: borrow_id.clone(),
                book_id: line.book_id.clone(),
                reader_id: request.reader_id.clone(),
                borrow_date: Some(request.borrow_date),
                due_date: Some(request.due_date),
                status: BorrowStatus::Borrowed,
                return_date: None,
                fine: None,
                book_title: None,
                book_author: None,
                reader_name: None,
                reader_id_number: None,
            });
        }

        for line in &request.books {
            if let Some(book) = self.book_mut(line.book_id.value()) {
                book.available_copies -= line.count;
                book.borrow_count += line.count;
            }
        }

        if let Some(reader) = self.reader_mut(request.reader_id.value()) {
            reader.current_borrow_count += request.books.len() as i64;
        }

        let items = request
            .books
            .iter()
            .map(|line| {
                let book = self.book(line.book_id.value());
                ReceiptItem {
                    book_title: book.map(|b| b.title.clone()).unwrap_or_default(),
                    book_author: book.map(|b| b.author.clone()).unwrap_or_default(),
                }
            })
            .collect();

        BorrowConfirmation {
            borrow_id: borrow_id.clone(),
            receipt: BorrowReceipt {
                borrow_id,
                borrow_date: request.borrow_date,
                due_date: request.due_date,
                items,
            },
        }
    }

    /// Return transaction. Per submitted group id, only the group's *first*
    /// record is ever looked at; it is processed when still Borrowed and
    /// silently skipped otherwise, indistinguishably from an unknown id.
    /// Later records of a multi-line group are unreachable through this
    /// path. Mutations are applied in array order.
    pub fn return_books(&mut self, request: &ReturnRequest) -> ReturnOutcome {
        let mut returned = Vec::new();
        let mut total_fine = 0.0;

        for borrow_id in &request.borrow_ids {
            let Some(index) = self.records.iter().position(|r| &r.borrow_id == borrow_id) else {
                continue;
            };
            if self.records[index].status != BorrowStatus::Borrowed {
                continue;
            }

            let diff_days = match self.records[index].due_date {
                Some(due) => (request.return_date - due).num_days(),
                None => 0,
            };
            let fine = if diff_days > 0 {
                diff_days as f64 * FINE_PER_DAY
            } else {
                0.0
            };

            {
                let record = &mut self.records[index];
                record.status = if fine > 0.0 {
                    BorrowStatus::Overdue
                } else {
                    BorrowStatus::Returned
                };
                record.return_date = Some(request.return_date);
                record.fine = Some(fine);
            }

            let book_id = self.records[index].book_id.clone();
            let reader_id = self.records[index].reader_id.clone();

            if let Some(book) = self.book_mut(book_id.value()) {
                book.available_copies += 1;
            }
            if let Some(reader) = self.reader_mut(reader_id.value()) {
                if reader.current_borrow_count > 0 {
                    reader.current_borrow_count -= 1;
                }
            }

            total_fine += fine;
            returned.push(ReturnedLine {
                borrow_id: borrow_id.clone(),
                book_id,
                fine,
            });
        }

        let fines = if total_fine > 0.0 {
            vec![FineEntry { amount: total_fine }]
        } else {
            Vec::new()
        };
        ReturnOutcome { returned, fines }
    }

    // ----------------------------------------------------------- statistics

    pub fn overview(&self, today: NaiveDate) -> StatisticsOverview {
        StatisticsOverview {
            total_books: self.books.len() as i64,
            total_readers: self.readers.len() as i64,
            borrowed_count: self
                .records
                .iter()
                .filter(|r| r.status == BorrowStatus::Borrowed)
                .count() as i64,
            overdue_count: self
                .records
                .iter()
                .filter(|r| r.status == BorrowStatus::Overdue)
                .count() as i64,
            today_borrows: self
                .records
                .iter()
                .filter(|r| r.status == BorrowStatus::Borrowed && r.borrow_date == Some(today))
                .count() as i64,
            today_returns: self
                .records
                .iter()
                .filter(|r| r.status == BorrowStatus::Returned && r.return_date == Some(today))
                .count() as i64,
        }
    }

    /// Top books by cumulative borrow count, descending.
    pub fn popular_books(&self, top: usize) -> Vec<PopularBook> {
        let mut ranked: Vec<&Book> = self.books.iter().collect();
        ranked.sort_by(|a, b| b.borrow_count.cmp(&a.borrow_count));
        ranked
            .into_iter()
            .take(top)
            .map(|book| PopularBook {
                title: book.title.clone(),
                author: book.author.clone(),
                category: book.category.clone(),
                borrow_count: book.borrow_count,
            })
            .collect()
    }

    pub fn overdue_books(
        &self,
        today: NaiveDate,
        offset: usize,
        limit: usize,
    ) -> (Vec<OverdueBook>, usize) {
        let overdue: Vec<&BorrowRecord> = self
            .records
            .iter()
            .filter(|r| r.status == BorrowStatus::Overdue)
            .collect();
        let total = overdue.len();
        let items = overdue
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|record| {
                let book = self.book(record.book_id.value());
                let reader = self.reader(record.reader_id.value());
                let overdue_days = record
                    .due_date
                    .map(|due| (today - due).num_days().max(1))
                    .unwrap_or(1);
                OverdueBook {
                    borrow_id: record.borrow_id.clone(),
                    book_title: book
                        .map(|b| b.title.clone())
                        .unwrap_or_else(|| "Unknown Book".to_string()),
                    reader_name: reader
                        .map(|r| r.name.clone())
                        .unwrap_or_else(|| "Unknown Reader".to_string()),
                    due_date: record.due_date,
                    overdue_days,
                    category: book.map(|b| b.category.clone()).unwrap_or_default(),
                }
            })
            .collect();
        (items, total)
    }

    /// Books with at least one copy on the shelf.
    pub fn vacant_books(&self, offset: usize, limit: usize) -> (Vec<Book>, usize) {
        let vacant: Vec<&Book> = self
            .books
            .iter()
            .filter(|b| b.available_copies > 0)
            .collect();
        let total = vacant.len();
        let items = vacant
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        (items, total)
    }
}
