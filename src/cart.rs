//! Borrow cart: the draft a borrow workflow builds up before submission.
//!
//! Purely client-side state with a single owner; nothing here touches the
//! server. The cart holds at most one reader and one line per distinct book,
//! and is cleared when the workflow submits or cancels.

use chrono::NaiveDate;

use crate::api::{Book, BookId, Reader};
use crate::services::borrow::{BorrowLine, BorrowRequest};

/// Workflow position, reset to `SelectReader` on clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowStep {
    #[default]
    SelectReader,
    SelectBooks,
    Confirm,
}

/// One cart line: a chosen book and the desired copy count.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub book: Book,
    pub count: i64,
}

/// The borrow cart.
#[derive(Debug, Default)]
pub struct SelectionCart {
    reader: Option<Reader>,
    lines: Vec<CartLine>,
    step: WorkflowStep,
}

impl SelectionCart {
    pub fn new() -> Self {
        SelectionCart::default()
    }

    /// Add `qty` copies of a book. An existing line for the same book is
    /// merged (quantity clamped at zero); a new line preserves insertion
    /// order. No two lines ever share a book id.
    pub fn add_book(&mut self, book: &Book, qty: i64) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.book.id == book.id) {
            line.count = (line.count + qty).max(0);
            return;
        }
        self.lines.push(CartLine {
            book: book.clone(),
            count: qty.max(0),
        });
    }

    pub fn remove_book(&mut self, book_id: &BookId) {
        self.lines.retain(|line| &line.book.id != book_id);
    }

    /// Set a line's quantity to `max(0, count)`; zero removes the line.
    pub fn set_count(&mut self, book_id: &BookId, count: i64) {
        let Some(line) = self.lines.iter_mut().find(|l| &l.book.id == book_id) else {
            return;
        };
        line.count = count.max(0);
        if line.count == 0 {
            self.remove_book(book_id);
        }
    }

    /// Assign the single selected reader, replacing any previous choice.
    pub fn set_reader(&mut self, reader: Reader) {
        self.reader = Some(reader);
    }

    pub fn advance_to(&mut self, step: WorkflowStep) {
        self.step = step;
    }

    /// Reset reader, lines and workflow step.
    pub fn clear(&mut self) {
        self.reader = None;
        self.lines.clear();
        self.step = WorkflowStep::default();
    }

    pub fn reader(&self) -> Option<&Reader> {
        self.reader.as_ref()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn step(&self) -> WorkflowStep {
        self.step
    }

    /// Total quantity across all lines (not the line count). This is the
    /// number of copies the submitted transaction will take off the shelves.
    pub fn selected_count(&self) -> i64 {
        self.lines.iter().map(|line| line.count).sum()
    }

    /// Build the borrow payload. `None` until a reader is selected and at
    /// least one line has a positive quantity.
    pub fn to_borrow_request(
        &self,
        borrow_date: NaiveDate,
        due_date: NaiveDate,
    ) -> Option<BorrowRequest> {
        let reader = self.reader.as_ref()?;
        let books: Vec<BorrowLine> = self
            .lines
            .iter()
            .filter(|line| line.count > 0)
            .map(|line| BorrowLine {
                book_id: line.book.id.clone(),
                count: line.count,
            })
            .collect();
        if books.is_empty() {
            return None;
        }
        Some(BorrowRequest {
            reader_id: reader.id.clone(),
            books,
            borrow_date,
            due_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ReaderId;

    fn book(id: &str, title: &str) -> Book {
        Book {
            id: BookId::new(id),
            title: title.to_string(),
            author: String::new(),
            publisher: String::new(),
            publish_date: None,
            category: String::new(),
            location: String::new(),
            total_copies: 10,
            available_copies: 10,
            isbn: String::new(),
            borrow_count: 0,
        }
    }

    fn reader(id: &str) -> Reader {
        Reader {
            id: ReaderId::new(id),
            name: "Test Reader".to_string(),
            id_type: String::new(),
            id_number: String::new(),
            phone: String::new(),
            register_date: None,
            status: 0,
            borrow_limit: 5,
            current_borrow_count: 0,
        }
    }

    #[test]
    fn test_add_merges_duplicates_and_sums_quantities() {
        let mut cart = SelectionCart::new();
        let a = book("A", "Book A");
        let b = book("B", "Book B");

        cart.add_book(&a, 2);
        cart.add_book(&a, 3);
        cart.add_book(&b, 1);

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.selected_count(), 6);
    }

    #[test]
    fn test_set_count_zero_removes_line() {
        let mut cart = SelectionCart::new();
        let a = book("A", "Book A");
        cart.add_book(&a, 2);

        cart.set_count(&BookId::new("A"), 0);
        assert!(cart.lines().is_empty());
        assert_eq!(cart.selected_count(), 0);
    }

    #[test]
    fn test_set_count_clamps_negative_to_removal() {
        let mut cart = SelectionCart::new();
        let a = book("A", "Book A");
        cart.add_book(&a, 2);

        cart.set_count(&BookId::new("A"), -5);
        assert!(cart.lines().is_empty());
    }

    #[test]
    fn test_set_count_on_unknown_book_is_noop() {
        let mut cart = SelectionCart::new();
        cart.set_count(&BookId::new("nope"), 3);
        assert!(cart.lines().is_empty());
    }

    #[test]
    fn test_remove_book() {
        let mut cart = SelectionCart::new();
        cart.add_book(&book("A", "Book A"), 1);
        cart.add_book(&book("B", "Book B"), 1);

        cart.remove_book(&BookId::new("A"));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].book.id, BookId::new("B"));
    }

    #[test]
    fn test_set_reader_replaces_previous() {
        let mut cart = SelectionCart::new();
        cart.set_reader(reader("1001"));
        cart.set_reader(reader("1002"));
        assert_eq!(cart.reader().unwrap().id, ReaderId::new("1002"));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut cart = SelectionCart::new();
        cart.set_reader(reader("1001"));
        cart.add_book(&book("A", "Book A"), 2);
        cart.advance_to(WorkflowStep::Confirm);

        cart.clear();
        assert!(cart.reader().is_none());
        assert!(cart.lines().is_empty());
        assert_eq!(cart.step(), WorkflowStep::SelectReader);
    }

    #[test]
    fn test_borrow_request_requires_reader_and_lines() {
        let date = NaiveDate::from_ymd_opt(2023, 10, 1).unwrap();
        let due = NaiveDate::from_ymd_opt(2023, 10, 31).unwrap();

        let mut cart = SelectionCart::new();
        assert!(cart.to_borrow_request(date, due).is_none());

        cart.set_reader(reader("1001"));
        assert!(cart.to_borrow_request(date, due).is_none());

        cart.add_book(&book("A", "Book A"), 2);
        let request = cart.to_borrow_request(date, due).unwrap();
        assert_eq!(request.reader_id, ReaderId::new("1001"));
        assert_eq!(request.books.len(), 1);
        assert_eq!(request.books[0].count, 2);
    }
}
