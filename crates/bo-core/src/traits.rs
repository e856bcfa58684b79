//! Core traits shared by the model and store layers.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Primary key type: opaque unique identifiers assigned by the store.
pub type Id = Uuid;

/// Trait for entities that have a primary key
pub trait Identifiable {
    fn id(&self) -> Option<Id>;
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
    fn is_new_record(&self) -> bool {
        !self.is_persisted()
    }
}

/// Trait for entities with a creation timestamp assigned by the store
pub trait Timestamped {
    fn created_at(&self) -> Option<DateTime<Utc>>;
}

/// Base trait for all domain entities
pub trait Entity: Identifiable + Timestamped + Send + Sync {
    /// The database table name
    const TABLE_NAME: &'static str;

    /// Human-readable type name for error messages
    const TYPE_NAME: &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy {
        id: Option<Id>,
    }

    impl Identifiable for Dummy {
        fn id(&self) -> Option<Id> {
            self.id
        }
    }

    #[test]
    fn test_persistence_flags() {
        let fresh = Dummy { id: None };
        assert!(fresh.is_new_record());

        let saved = Dummy {
            id: Some(Uuid::new_v4()),
        };
        assert!(saved.is_persisted());
    }
}
