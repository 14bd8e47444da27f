//! In-memory adapter for the `CourseCore` domain library
//!
//! This crate provides an in-memory implementation of the `CourseStore`
//! trait from the coursecore crate, useful for testing and development
//! scenarios where persistence is not required.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::significant_drop_tightening)]

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use coursecore::course::Course;
use coursecore::errors::{StoreError, StoreResult};
use coursecore::store::{CourseRevision, CourseStore, ExpectedRevision, StoredCourse};
use coursecore::types::CourseId;

/// Thread-safe in-memory course store for testing.
///
/// Clones share the same storage, so a test can hand a clone to the service
/// under test and keep one for assertions. Soft-deleted courses stay in the
/// map but are hidden from [`CourseStore::load`], matching the contract that
/// a storage adapter excludes deleted rows unless explicitly overridden.
#[derive(Clone, Default)]
pub struct InMemoryCourseStore {
    // Maps course ids to the stored aggregate and its current revision
    courses: Arc<RwLock<HashMap<CourseId, StoredCourse>>>,
}

impl InMemoryCourseStore {
    /// Create a new empty in-memory course store
    pub fn new() -> Self {
        Self {
            courses: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of courses stored, including soft-deleted ones.
    pub fn len(&self) -> usize {
        self.courses.read().expect("RwLock poisoned").len()
    }

    /// Whether the store holds no courses at all.
    pub fn is_empty(&self) -> bool {
        self.courses.read().expect("RwLock poisoned").is_empty()
    }
}

#[async_trait]
impl CourseStore for InMemoryCourseStore {
    async fn insert(&self, course: Course) -> StoreResult<CourseRevision> {
        let mut courses = self.courses.write().expect("RwLock poisoned");

        let id = course.id();
        if courses.contains_key(&id) {
            return Err(StoreError::CourseAlreadyExists(id));
        }

        let revision = CourseRevision::initial();
        courses.insert(id, StoredCourse { course, revision });
        tracing::debug!(course_id = %id, "course inserted");
        Ok(revision)
    }

    async fn load(&self, id: CourseId) -> StoreResult<StoredCourse> {
        let courses = self.courses.read().expect("RwLock poisoned");

        courses
            .get(&id)
            .filter(|stored| !stored.course.is_deleted())
            .cloned()
            .ok_or(StoreError::CourseNotFound(id))
    }

    async fn load_any(&self, id: CourseId) -> StoreResult<StoredCourse> {
        let courses = self.courses.read().expect("RwLock poisoned");

        courses
            .get(&id)
            .cloned()
            .ok_or(StoreError::CourseNotFound(id))
    }

    async fn save(
        &self,
        course: Course,
        expected: ExpectedRevision,
    ) -> StoreResult<CourseRevision> {
        let mut courses = self.courses.write().expect("RwLock poisoned");

        let id = course.id();
        let Some(stored) = courses.get_mut(&id) else {
            return Err(StoreError::CourseNotFound(id));
        };

        if let ExpectedRevision::Exact(expected) = expected {
            if stored.revision != expected {
                return Err(StoreError::RevisionConflict {
                    id,
                    expected,
                    current: stored.revision,
                });
            }
        }

        let next = stored.revision.next();
        *stored = StoredCourse {
            course,
            revision: next,
        };
        tracing::debug!(course_id = %id, revision = %next, "course saved");
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursecore::types::{CourseTitle, Timestamp};

    fn course(title: &str) -> Course {
        Course::new(CourseTitle::try_new(title).unwrap(), Timestamp::now())
    }

    #[tokio::test]
    async fn new_store_is_empty() {
        let store = InMemoryCourseStore::new();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn clone_shares_storage() {
        let store1 = InMemoryCourseStore::new();
        let store2 = store1.clone();
        assert!(Arc::ptr_eq(&store1.courses, &store2.courses));

        store1.insert(course("Rust 101")).await.unwrap();
        assert_eq!(store2.len(), 1);
    }

    #[tokio::test]
    async fn insert_then_load_roundtrips_at_revision_zero() {
        let store = InMemoryCourseStore::new();
        let c = course("Rust 101");
        let id = c.id();

        let revision = store.insert(c.clone()).await.unwrap();
        assert_eq!(revision, CourseRevision::initial());

        let stored = store.load(id).await.unwrap();
        assert_eq!(stored.course, c);
        assert_eq!(stored.revision, CourseRevision::initial());
    }

    #[tokio::test]
    async fn double_insert_fails() {
        let store = InMemoryCourseStore::new();
        let c = course("Rust 101");
        let id = c.id();

        store.insert(c.clone()).await.unwrap();
        let result = store.insert(c).await;
        assert_eq!(result, Err(StoreError::CourseAlreadyExists(id)));
    }

    #[tokio::test]
    async fn load_unknown_course_fails_with_not_found() {
        let store = InMemoryCourseStore::new();
        let id = CourseId::new();
        assert_eq!(store.load(id).await, Err(StoreError::CourseNotFound(id)));
    }

    #[tokio::test]
    async fn save_advances_the_revision() {
        let store = InMemoryCourseStore::new();
        let c = course("Rust 101");
        let id = c.id();
        store.insert(c).await.unwrap();

        let stored = store.load(id).await.unwrap();
        let revision = store
            .save(stored.course, ExpectedRevision::Exact(stored.revision))
            .await
            .unwrap();
        assert_eq!(revision, CourseRevision::initial().next());
    }

    #[tokio::test]
    async fn stale_save_fails_with_revision_conflict() {
        let store = InMemoryCourseStore::new();
        let c = course("Rust 101");
        let id = c.id();
        store.insert(c).await.unwrap();

        // Two writers load the same revision.
        let first = store.load(id).await.unwrap();
        let second = store.load(id).await.unwrap();

        store
            .save(first.course, ExpectedRevision::Exact(first.revision))
            .await
            .unwrap();

        let result = store
            .save(second.course, ExpectedRevision::Exact(second.revision))
            .await;
        assert!(matches!(
            result,
            Err(StoreError::RevisionConflict { .. })
        ));
    }

    #[tokio::test]
    async fn save_with_expected_any_skips_the_check() {
        let store = InMemoryCourseStore::new();
        let c = course("Rust 101");
        let id = c.id();
        store.insert(c).await.unwrap();

        let stored = store.load(id).await.unwrap();
        store
            .save(stored.course.clone(), ExpectedRevision::Any)
            .await
            .unwrap();
        let revision = store
            .save(stored.course, ExpectedRevision::Any)
            .await
            .unwrap();
        assert_eq!(revision, CourseRevision::initial().next().next());
    }

    #[tokio::test]
    async fn soft_deleted_course_is_hidden_from_load_but_not_load_any() {
        let store = InMemoryCourseStore::new();
        let mut c = course("Rust 101");
        let id = c.id();
        store.insert(c.clone()).await.unwrap();

        c.soft_delete(Timestamp::now());
        store
            .save(c, ExpectedRevision::Exact(CourseRevision::initial()))
            .await
            .unwrap();

        assert_eq!(store.load(id).await, Err(StoreError::CourseNotFound(id)));
        let stored = store.load_any(id).await.unwrap();
        assert!(stored.course.is_deleted());
    }
}
