//! Record lookup
//!
//! A record is anything that can answer "what is your value for key X?".
//! Keys are field-type wire names (`COUNTRY`, `CLIENT_VERSION`, ...);
//! implementations fall back to their custom fields for keys they do not
//! model directly.

mod user;

pub use user::UserRecord;

use std::collections::HashMap;
use targeting_core::FieldType;

/// Field lookup capability consumed by the evaluator
pub trait RecordLookup: Send + Sync {
    /// Value for a lookup key, or `None` when absent
    fn lookup(&self, key: &str) -> Option<&str>;

    /// Value for a field type
    fn value_of(&self, field: FieldType) -> Option<&str> {
        self.lookup(field.as_str())
    }

    /// Identifier used for distribution-list membership
    fn identifier(&self) -> Option<&str> {
        self.value_of(FieldType::Smid)
    }
}

impl RecordLookup for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_map_lookup() {
        let mut record = HashMap::new();
        record.insert("COUNTRY".to_string(), "UA".to_string());
        record.insert("SMID".to_string(), "42".to_string());

        assert_eq!(record.value_of(FieldType::Country), Some("UA"));
        assert_eq!(record.value_of(FieldType::Browser), None);
        assert_eq!(record.identifier(), Some("42"));
    }
}
