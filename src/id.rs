//! Unique identifier generation.

use std::fmt::Debug;

use uuid::Uuid;

/// Source of new, globally unique resource identifiers.
pub trait IdGenerator: Send + Sync + Debug {
    fn generate(&self) -> String;
}

/// Random UUID v4 identifiers in hyphenated form.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV4;

impl IdGenerator for UuidV4 {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_v4_ids_are_valid_and_unique() {
        let first = UuidV4.generate();
        let second = UuidV4.generate();

        assert_eq!(first.len(), 36);
        assert_eq!(Uuid::parse_str(&first).unwrap().get_version_num(), 4);
        assert_ne!(first, second);
    }
}
