//! Reader normalization.

use serde_json::Value;

use super::{date, integer, normalize_list, text};
use crate::api::{Page, Reader, ReaderId};

/// Lenient decode of a single reader. Accepts both canonical field names and
/// the legacy `readerXxx` vocabulary. Non-numeric status strings coerce to 0
/// (active).
pub fn normalize_reader(value: &Value) -> Option<Reader> {
    let obj = value.as_object()?;
    Some(Reader {
        id: ReaderId::new(text(obj, &["id", "readerId"])),
        name: text(obj, &["name", "readerName"]),
        id_type: text(obj, &["idType", "readerCardType"]),
        id_number: text(obj, &["idNumber", "readerCardNumber"]),
        phone: text(obj, &["phone", "readerPhoneNumber"]),
        register_date: date(obj, &["registerDate"]),
        status: integer(obj, &["status", "readerStatus"]),
        borrow_limit: integer(obj, &["borrowLimit", "maxBorrowNumber"]),
        current_borrow_count: integer(obj, &["currentBorrowCount", "nowBorrowNumber"]),
    })
}

pub fn normalize_reader_list(value: Value) -> Page<Reader> {
    let page = normalize_list(value);
    let total = page.total;
    let items = page
        .items
        .iter()
        .filter_map(normalize_reader)
        .collect();
    Page { items, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_legacy_aliases_map_to_canonical() {
        let raw = json!({
            "readerId": "1001",
            "readerName": "Zhang San",
            "readerCardType": "ID card",
            "readerCardNumber": "110101199003077856",
            "readerPhoneNumber": "13800138000",
            "registerDate": "2023-01-15",
            "readerStatus": 0,
            "maxBorrowNumber": 5,
            "nowBorrowNumber": 3
        });
        let reader = normalize_reader(&raw).unwrap();
        assert_eq!(reader.id, ReaderId::new("1001"));
        assert_eq!(reader.name, "Zhang San");
        assert_eq!(reader.id_number, "110101199003077856");
        assert_eq!(reader.borrow_limit, 5);
        assert_eq!(reader.current_borrow_count, 3);
    }

    #[test]
    fn test_textual_status_coerces_to_active() {
        let reader = normalize_reader(&json!({"id": "1", "status": "normal"})).unwrap();
        assert_eq!(reader.status, 0);
    }

    #[test]
    fn test_idempotent_on_canonical_records() {
        let reader = normalize_reader(&json!({
            "id": "1002",
            "name": "Li Si",
            "borrowLimit": 5,
            "currentBorrowCount": 1,
            "registerDate": "2023-02-20"
        }))
        .unwrap();
        let reencoded = serde_json::to_value(&reader).unwrap();
        assert_eq!(normalize_reader(&reencoded).unwrap(), reader);
    }

    #[test]
    fn test_list_of_bare_array() {
        let page = normalize_reader_list(json!([{"id": "1001"}, {"id": "1002"}]));
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 2);
    }
}
