//! Service-layer integration tests against the in-memory backend.
//!
//! Every test drives the real service functions through the `Transport`
//! trait, exactly as a caller using the HTTP backend would.

use chrono::NaiveDate;

use biblio_client::api::{BookId, BorrowStatus, ReaderId};
use biblio_client::mock::MockTransport;
use biblio_client::services::borrow::{BorrowLine, BorrowQuery, BorrowRequest, ReturnRequest};
use biblio_client::services::{auth, books, borrow, readers, statistics, PageOptions};
use biblio_client::session::SessionStore;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn transport() -> MockTransport {
    MockTransport::with_today(ymd(2023, 10, 1))
}

// ---------------------------------------------------------------- auth

#[tokio::test]
async fn test_login_installs_session() {
    let transport = transport();
    let store = SessionStore::in_memory();
    let credentials = auth::Credentials {
        username: "admin".to_string(),
        password: "123456".to_string(),
    };

    let user = auth::login(&transport, &store, &credentials).await.unwrap();
    assert_eq!(user.name, "admin");
    assert!(store.is_logged_in());
    assert_eq!(store.token().as_deref(), Some("mock-token-admin"));
}

#[tokio::test]
async fn test_failed_login_leaves_store_untouched() {
    let transport = transport();
    let store = SessionStore::in_memory();
    let credentials = auth::Credentials {
        username: "admin".to_string(),
        password: "wrong".to_string(),
    };

    let err = auth::login(&transport, &store, &credentials)
        .await
        .unwrap_err();
    assert_eq!(err.domain_code(), Some(401));
    assert!(!store.is_logged_in());
}

#[tokio::test]
async fn test_logout_clears_session_even_before_server_answers() {
    let transport = transport();
    let store = SessionStore::in_memory();
    store.set_session("tok", None);

    auth::logout(&transport, &store).await.unwrap();
    assert!(!store.is_logged_in());
}

// --------------------------------------------------------------- books

#[tokio::test]
async fn test_list_books_with_pagination() {
    let transport = transport();
    let query = books::BookQuery {
        page: PageOptions::new(1, 2),
        ..Default::default()
    };
    let page = books::list_books(&transport, query).await.unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total, 5);
    assert_eq!(page.items[0].title, "Core Java");
}

#[tokio::test]
async fn test_search_matches_title_author_isbn() {
    let transport = transport();

    for term in ["Weiss", "Algorithm", "9787111128069"] {
        let query = books::BookQuery {
            search: Some(term.to_string()),
            ..Default::default()
        };
        let page = books::list_books(&transport, query).await.unwrap();
        assert_eq!(page.total, 1, "search term {:?}", term);
        assert_eq!(page.items[0].id, BookId::new("5"));
    }
}

#[tokio::test]
async fn test_get_book_found_and_missing() {
    let transport = transport();
    let book = books::get_book(&transport, &BookId::new("3")).await.unwrap();
    assert_eq!(book.unwrap().title, "Dream of the Red Chamber");

    let err = books::get_book(&transport, &BookId::new("404"))
        .await
        .unwrap_err();
    assert_eq!(err.domain_code(), Some(404));
}

#[tokio::test]
async fn test_create_update_delete_book() {
    let transport = transport();

    let mut book = books::get_book(&transport, &BookId::new("1"))
        .await
        .unwrap()
        .unwrap();
    book.title = "Rust in Action".to_string();
    book.isbn = "9781617294556".to_string();
    let created = books::create_book(&transport, &book).await.unwrap();
    let new_id = BookId::new(created["id"].as_str().unwrap());
    assert_ne!(new_id, book.id);

    let mut created_book = books::get_book(&transport, &new_id).await.unwrap().unwrap();
    created_book.location = "C-001-01".to_string();
    books::update_book(&transport, &new_id, &created_book)
        .await
        .unwrap();
    let reread = books::get_book(&transport, &new_id).await.unwrap().unwrap();
    assert_eq!(reread.location, "C-001-01");

    books::delete_book(&transport, &new_id).await.unwrap();
    assert!(books::delete_book(&transport, &new_id).await.is_err());
}

#[tokio::test]
async fn test_patch_stock() {
    let transport = transport();
    let patch = books::StockPatch {
        total_copies: Some(25),
        available_copies: None,
    };
    books::patch_stock(&transport, &BookId::new("1"), &patch)
        .await
        .unwrap();

    let book = books::get_book(&transport, &BookId::new("1"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(book.total_copies, 25);
    // Untouched by the partial patch.
    assert_eq!(book.available_copies, 10);
}

#[tokio::test]
async fn test_list_categories_is_distinct() {
    let transport = transport();
    let categories = books::list_categories(&transport).await.unwrap();
    assert_eq!(categories, vec!["Computing", "Literature"]);
}

// ------------------------------------------------------------- readers

#[tokio::test]
async fn test_reader_lookup_by_card_number() {
    let transport = transport();
    let reader = readers::get_reader_by_card(&transport, "110101198512038914")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reader.id, ReaderId::new("1002"));
    assert_eq!(reader.name, "Li Si");
}

#[tokio::test]
async fn test_reader_search_filters_by_name() {
    let transport = transport();
    let query = readers::ReaderQuery {
        search: Some("Zhang".to_string()),
        ..Default::default()
    };
    let page = readers::list_readers(&transport, query).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].name, "Zhang San");
}

// -------------------------------------------------------------- borrow

#[tokio::test]
async fn test_borrow_then_on_time_return_is_stock_neutral() {
    let transport = transport();
    let before = books::get_book(&transport, &BookId::new("1"))
        .await
        .unwrap()
        .unwrap()
        .available_copies;

    let request = BorrowRequest {
        reader_id: ReaderId::new("1003"),
        books: vec![BorrowLine {
            book_id: BookId::new("1"),
            count: 1,
        }],
        borrow_date: ymd(2023, 10, 1),
        due_date: ymd(2023, 10, 31),
    };
    let confirmation = borrow::create_borrow(&transport, &request).await.unwrap();
    assert_eq!(confirmation.receipt.items[0].book_title, "Core Java");

    let during = books::get_book(&transport, &BookId::new("1"))
        .await
        .unwrap()
        .unwrap()
        .available_copies;
    assert_eq!(during, before - 1);

    let outcome = borrow::return_books(
        &transport,
        &ReturnRequest {
            borrow_ids: vec![confirmation.borrow_id],
            return_date: ymd(2023, 10, 30),
        },
    )
    .await
    .unwrap();
    assert_eq!(outcome.total_fine(), 0.0);
    assert!(outcome.fines.is_empty());

    let after = books::get_book(&transport, &BookId::new("1"))
        .await
        .unwrap()
        .unwrap()
        .available_copies;
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_late_return_charges_half_per_day() {
    let transport = transport();
    let request = BorrowRequest {
        reader_id: ReaderId::new("1003"),
        books: vec![BorrowLine {
            book_id: BookId::new("1"),
            count: 1,
        }],
        borrow_date: ymd(2023, 10, 1),
        due_date: ymd(2023, 10, 31),
    };
    let confirmation = borrow::create_borrow(&transport, &request).await.unwrap();

    let outcome = borrow::return_books(
        &transport,
        &ReturnRequest {
            borrow_ids: vec![confirmation.borrow_id.clone()],
            return_date: ymd(2023, 11, 5),
        },
    )
    .await
    .unwrap();
    assert_eq!(outcome.total_fine(), 2.5);
    assert_eq!(outcome.fines.len(), 1);

    // The record now carries the terminal Overdue status.
    let page = borrow::list_borrow_records(
        &transport,
        BorrowQuery {
            reader_id: Some(ReaderId::new("1003")),
            status: Some(BorrowStatus::Overdue),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(page
        .items
        .iter()
        .any(|r| r.borrow_id == confirmation.borrow_id));
}

#[tokio::test]
async fn test_returning_already_settled_group_is_a_noop() {
    let transport = transport();
    let request = BorrowRequest {
        reader_id: ReaderId::new("1003"),
        books: vec![BorrowLine {
            book_id: BookId::new("1"),
            count: 1,
        }],
        borrow_date: ymd(2023, 10, 1),
        due_date: ymd(2023, 10, 31),
    };
    let confirmation = borrow::create_borrow(&transport, &request).await.unwrap();
    let return_request = ReturnRequest {
        borrow_ids: vec![confirmation.borrow_id],
        return_date: ymd(2023, 10, 30),
    };

    let first = borrow::return_books(&transport, &return_request).await.unwrap();
    assert_eq!(first.returned.len(), 1);
    let second = borrow::return_books(&transport, &return_request).await.unwrap();
    assert!(second.returned.is_empty());
}

#[tokio::test]
async fn test_list_borrowed_by_reader_filters_open_records() {
    let transport = transport();
    let page = borrow::list_borrowed_by_reader(
        &transport,
        &ReaderId::new("1001"),
        PageOptions::default(),
    )
    .await
    .unwrap();
    // Seeded: one Borrowed and one Overdue record for this reader.
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].status, BorrowStatus::Borrowed);
    assert_eq!(page.items[0].book_title.as_deref(), Some("Professional JavaScript for Web Developers"));
}

// ---------------------------------------------------------- statistics

#[tokio::test]
async fn test_overview_counters() {
    let transport = transport();
    let overview = statistics::overview(&transport).await.unwrap();
    assert_eq!(overview.total_books, 5);
    assert_eq!(overview.total_readers, 4);
    assert_eq!(overview.borrowed_count, 2);
    assert_eq!(overview.overdue_count, 1);
}

#[tokio::test]
async fn test_popular_books_ranked_by_borrow_count() {
    let transport = transport();
    let popular = statistics::popular_books(&transport, 2).await.unwrap();
    assert_eq!(popular.len(), 2);
    assert!(popular[0].borrow_count >= popular[1].borrow_count);
    assert_eq!(popular[0].title, "Data Structures and Algorithm Analysis");
}

#[tokio::test]
async fn test_overdue_books_listing() {
    let transport = MockTransport::with_today(ymd(2023, 9, 10));
    let page = statistics::overdue_books(&transport, PageOptions::default())
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].reader_name, "Zhang San");
    assert_eq!(page.items[0].overdue_days, 10);
}

#[tokio::test]
async fn test_vacant_books_excludes_exhausted_stock() {
    let transport = transport();
    // Borrow every remaining copy of book 5.
    let request = BorrowRequest {
        reader_id: ReaderId::new("1003"),
        books: vec![BorrowLine {
            book_id: BookId::new("5"),
            count: 5,
        }],
        borrow_date: ymd(2023, 10, 1),
        due_date: ymd(2023, 10, 31),
    };
    borrow::create_borrow(&transport, &request).await.unwrap();

    let page = statistics::vacant_books(&transport, PageOptions::default())
        .await
        .unwrap();
    assert_eq!(page.total, 4);
    assert!(page.items.iter().all(|b| b.id != BookId::new("5")));
}

#[tokio::test]
async fn test_borrow_details_returns_full_history() {
    let transport = transport();
    let page = statistics::borrow_details(&transport, &ReaderId::new("1001"))
        .await
        .unwrap();
    assert_eq!(page.items.len(), 2);
    assert!(page.items.iter().any(|r| r.status == BorrowStatus::Overdue));
}
