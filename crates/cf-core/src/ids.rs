//! Identifier generation
//!
//! All keys are stored as text. Primary ids are random UUIDv4; identifiers
//! that must sort by creation time (user codes, team membership ids,
//! activity ids) use UUIDv7, whose textual form is lexicographically
//! creation-ordered.

use uuid::Uuid;

/// Random identifier for primary keys
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Time-ordered identifier
pub fn new_sortable_id() -> String {
    Uuid::now_v7().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id_is_v4() {
        let id = new_id();
        let parsed = Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn test_new_sortable_id_is_v7() {
        let id = new_sortable_id();
        let parsed = Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 7);
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(new_id(), new_id());
        assert_ne!(new_sortable_id(), new_sortable_id());
    }

    #[test]
    fn test_sortable_ids_order_by_creation() {
        let first = new_sortable_id();
        // v7 timestamps have millisecond precision
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = new_sortable_id();
        assert!(first < second);
    }
}
