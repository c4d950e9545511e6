//! Seed dataset for the mock backend.

use chrono::NaiveDate;

use super::engine::MockLibrary;
use crate::api::{Book, BookId, BorrowId, BorrowRecord, BorrowStatus, Reader, ReaderId};

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("static seed date")
}

#[allow(clippy::too_many_arguments)]
fn book(
    id: &str,
    title: &str,
    author: &str,
    publisher: &str,
    publish_date: NaiveDate,
    category: &str,
    location: &str,
    total: i64,
    available: i64,
    isbn: &str,
    borrow_count: i64,
) -> Book {
    Book {
        id: BookId::new(id),
        title: title.to_string(),
        author: author.to_string(),
        publisher: publisher.to_string(),
        publish_date: Some(publish_date),
        category: category.to_string(),
        location: location.to_string(),
        total_copies: total,
        available_copies: available,
        isbn: isbn.to_string(),
        borrow_count,
    }
}

fn reader(
    id: &str,
    name: &str,
    id_type: &str,
    id_number: &str,
    phone: &str,
    register_date: NaiveDate,
    borrow_limit: i64,
    current: i64,
) -> Reader {
    Reader {
        id: ReaderId::new(id),
        name: name.to_string(),
        id_type: id_type.to_string(),
        id_number: id_number.to_string(),
        phone: phone.to_string(),
        register_date: Some(register_date),
        status: 0,
        borrow_limit,
        current_borrow_count: current,
    }
}

fn record(
    borrow_id: &str,
    book_id: &str,
    reader_id: &str,
    borrow_date: NaiveDate,
    due_date: NaiveDate,
    status: BorrowStatus,
) -> BorrowRecord {
    BorrowRecord {
        borrow_id: BorrowId::new(borrow_id),
        book_id: BookId::new(book_id),
        reader_id: ReaderId::new(reader_id),
        borrow_date: Some(borrow_date),
        due_date: Some(due_date),
        status,
        return_date: None,
        fine: None,
        book_title: None,
        book_author: None,
        reader_name: None,
        reader_id_number: None,
    }
}

/// The demo dataset. Stock is seeded consistent with the open records:
/// `available + on-loan == total` for every book.
pub fn seed() -> MockLibrary {
    MockLibrary {
        books: vec![
            book(
                "1",
                "Core Java",
                "Cay S. Horstmann",
                "China Machine Press",
                ymd(2022, 1, 1),
                "Computing",
                "A-001-01",
                10,
                10,
                "9787111601157",
                12,
            ),
            book(
                "2",
                "Professional JavaScript for Web Developers",
                "Matt Frisbie",
                "Posts & Telecom Press",
                ymd(2020, 5, 15),
                "Computing",
                "A-002-03",
                8,
                7,
                "9787115547345",
                9,
            ),
            book(
                "3",
                "Dream of the Red Chamber",
                "Cao Xueqin",
                "People's Literature Publishing House",
                ymd(2019, 8, 20),
                "Literature",
                "B-005-02",
                15,
                14,
                "9787020002207",
                7,
            ),
            book(
                "4",
                "Journey to the West",
                "Wu Cheng'en",
                "People's Literature Publishing House",
                ymd(2018, 12, 10),
                "Literature",
                "B-006-01",
                12,
                12,
                "9787020002221",
                4,
            ),
            book(
                "5",
                "Data Structures and Algorithm Analysis",
                "Mark Allen Weiss",
                "China Machine Press",
                ymd(2021, 3, 18),
                "Computing",
                "A-003-02",
                6,
                5,
                "9787111128069",
                15,
            ),
        ],
        readers: vec![
            reader(
                "1001",
                "Zhang San",
                "ID card",
                "110101199003077856",
                "13800138000",
                ymd(2023, 1, 15),
                5,
                2,
            ),
            reader(
                "1002",
                "Li Si",
                "ID card",
                "110101198512038914",
                "13900139000",
                ymd(2023, 2, 20),
                5,
                1,
            ),
            reader(
                "1003",
                "Wang Wu",
                "ID card",
                "110101199208156732",
                "13700137000",
                ymd(2023, 3, 10),
                5,
                0,
            ),
            reader(
                "1004",
                "Zhao Liu",
                "student card",
                "2023001234",
                "13600136000",
                ymd(2023, 9, 1),
                3,
                0,
            ),
        ],
        records: vec![
            record(
                "20230001",
                "2",
                "1001",
                ymd(2023, 9, 20),
                ymd(2023, 10, 20),
                BorrowStatus::Borrowed,
            ),
            record(
                "20230002",
                "5",
                "1001",
                ymd(2023, 8, 1),
                ymd(2023, 8, 31),
                BorrowStatus::Overdue,
            ),
            record(
                "20230003",
                "3",
                "1002",
                ymd(2023, 9, 25),
                ymd(2023, 10, 25),
                BorrowStatus::Borrowed,
            ),
        ],
    }
}
