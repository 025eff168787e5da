//! Repository trait and its in-memory implementation.

use crate::error::{StoreError, StoreResult};
use crate::ids::SequentialIds;

/// A record that can live in a repository.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Human-readable kind used in messages (`"Dish"`, `"Order"`).
    const KIND: &'static str;

    /// Returns the record's identifier.
    fn id(&self) -> &str;
}

/// Ordered storage for one resource collection.
///
/// Reads return clones so callers never hold references into the store.
pub trait Repository<E: Entity>: Send {
    /// Returns every record in insertion order.
    fn list(&self) -> Vec<E>;

    /// Finds a record by identifier.
    fn find(&self, id: &str) -> Option<E>;

    /// Reserves a fresh identifier not used by any stored record.
    fn next_id(&mut self) -> String;

    /// Appends a record.
    ///
    /// Fails with [`StoreError::DuplicateId`] if the identifier is taken.
    fn create(&mut self, entity: E) -> StoreResult<E>;

    /// Replaces the record with the same identifier, keeping its position.
    fn update(&mut self, entity: E) -> StoreResult<E>;

    /// Removes a record and returns it.
    fn remove(&mut self, id: &str) -> StoreResult<E>;

    /// Returns the number of stored records.
    fn len(&self) -> usize;

    /// Returns true if the store holds no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A [`Repository`] backed by a `Vec`.
///
/// Lookups are linear scans, matching the small collection sizes this
/// service handles.
#[derive(Debug, Clone)]
pub struct MemoryRepository<E> {
    records: Vec<E>,
    ids: SequentialIds,
}

impl<E: Entity> MemoryRepository<E> {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            ids: SequentialIds::new(),
        }
    }

    /// Creates a repository pre-populated with `records`.
    ///
    /// Fails if two records share an identifier.
    pub fn with_records(records: Vec<E>) -> StoreResult<Self> {
        let mut repo = Self::new();
        for record in records {
            repo.create(record)?;
        }
        Ok(repo)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }
}

impl<E: Entity> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> Repository<E> for MemoryRepository<E> {
    fn list(&self) -> Vec<E> {
        self.records.clone()
    }

    fn find(&self, id: &str) -> Option<E> {
        self.records.iter().find(|record| record.id() == id).cloned()
    }

    fn next_id(&mut self) -> String {
        // Seeded records may already occupy counter values.
        loop {
            let id = self.ids.next_id();
            if self.position(&id).is_none() {
                return id;
            }
        }
    }

    fn create(&mut self, entity: E) -> StoreResult<E> {
        if self.position(entity.id()).is_some() {
            return Err(StoreError::DuplicateId {
                kind: E::KIND,
                id: entity.id().to_string(),
            });
        }
        tracing::trace!(kind = E::KIND, id = entity.id(), "record appended");
        self.records.push(entity.clone());
        Ok(entity)
    }

    fn update(&mut self, entity: E) -> StoreResult<E> {
        let index = self.position(entity.id()).ok_or_else(|| StoreError::NotFound {
            kind: E::KIND,
            id: entity.id().to_string(),
        })?;
        tracing::trace!(kind = E::KIND, id = entity.id(), "record replaced");
        self.records[index] = entity.clone();
        Ok(entity)
    }

    fn remove(&mut self, id: &str) -> StoreResult<E> {
        let index = self.position(id).ok_or_else(|| StoreError::NotFound {
            kind: E::KIND,
            id: id.to_string(),
        })?;
        tracing::trace!(kind = E::KIND, id, "record removed");
        Ok(self.records.remove(index))
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
        label: String,
    }

    impl Entity for Item {
        const KIND: &'static str = "Item";

        fn id(&self) -> &str {
            &self.id
        }
    }

    fn item(id: &str, label: &str) -> Item {
        Item {
            id: id.to_string(),
            label: label.to_string(),
        }
    }

    #[test]
    fn test_create_and_find() {
        let mut repo = MemoryRepository::new();
        let id = repo.next_id();
        repo.create(item(&id, "soup")).unwrap();

        assert_eq!(repo.len(), 1);
        assert_eq!(repo.find(&id), Some(item(&id, "soup")));
        assert_eq!(repo.find("missing"), None);
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let mut repo = MemoryRepository::new();
        repo.create(item("b", "second")).unwrap();
        repo.create(item("a", "first")).unwrap();

        let ids: Vec<_> = repo.list().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut repo = MemoryRepository::new();
        repo.create(item("1", "one")).unwrap();
        let err = repo.create(item("1", "again")).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId { .. }));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut repo = MemoryRepository::new();
        repo.create(item("1", "one")).unwrap();
        repo.create(item("2", "two")).unwrap();

        repo.update(item("1", "uno")).unwrap();

        let list = repo.list();
        assert_eq!(list[0], item("1", "uno"));
        assert_eq!(list[1], item("2", "two"));
    }

    #[test]
    fn test_update_missing_fails() {
        let mut repo = MemoryRepository::<Item>::new();
        let err = repo.update(item("9", "nine")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_remove() {
        let mut repo = MemoryRepository::new();
        repo.create(item("1", "one")).unwrap();

        assert_eq!(repo.remove("1").unwrap(), item("1", "one"));
        assert!(repo.is_empty());
        assert!(repo.remove("1").is_err());
    }

    #[test]
    fn test_next_id_skips_seeded_ids() {
        let mut repo =
            MemoryRepository::with_records(vec![item("1", "one"), item("2", "two")]).unwrap();
        assert_eq!(repo.next_id(), "3");
    }

    #[test]
    fn test_with_records_rejects_duplicates() {
        let result = MemoryRepository::with_records(vec![item("1", "a"), item("1", "b")]);
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn prop_next_id_never_collides(seeded in proptest::collection::hash_set(1u64..50, 0..20)) {
            let records = seeded.iter().map(|n| item(&n.to_string(), "seed")).collect();
            let mut repo = MemoryRepository::with_records(records).unwrap();

            for _ in 0..10 {
                let id = repo.next_id();
                prop_assert!(repo.find(&id).is_none());
                repo.create(item(&id, "fresh")).unwrap();
            }
        }
    }
}
