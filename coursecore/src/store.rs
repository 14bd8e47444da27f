//! Storage abstraction for course aggregates.
//!
//! A course and its lessons are loaded, mutated, and saved as one unit. The
//! aggregate assumes exclusive access for the duration of an operation, so
//! stores implement optimistic concurrency control: every stored course
//! carries a revision, and a save that names a stale revision fails with
//! [`StoreError::RevisionConflict`] instead of overwriting.
//!
//! Soft-deleted courses are excluded from [`CourseStore::load`] by default;
//! [`CourseStore::load_any`] is the explicit override for callers that need
//! to see them (admin tooling, audits).

use crate::course::Course;
use crate::errors::StoreResult;
use crate::types::CourseId;
use async_trait::async_trait;
use nutype::nutype;
use serde::{Deserialize, Serialize};

/// The revision of a course aggregate within a store.
///
/// Revisions start at 0 on insert and increment with each successful save.
#[nutype(
    validate(greater_or_equal = 0),
    derive(
        Debug,
        Clone,
        Copy,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        Display,
        Into,
        Serialize,
        Deserialize
    )
)]
pub struct CourseRevision(u64);

impl CourseRevision {
    /// The revision assigned to a freshly inserted course (0).
    pub fn initial() -> Self {
        Self::try_new(0).expect("0 is always a valid revision")
    }

    /// Returns the revision after this one.
    #[must_use]
    pub fn next(self) -> Self {
        let current: u64 = self.into();
        Self::try_new(current + 1).expect("next revision should always be valid")
    }
}

/// The revision a save expects to find in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpectedRevision {
    /// Overwrite whatever is stored. Skips the optimistic check.
    Any,
    /// The stored revision must match exactly, or the save fails with
    /// [`StoreError::RevisionConflict`](crate::errors::StoreError::RevisionConflict).
    Exact(CourseRevision),
}

/// A course together with the revision it was loaded at.
///
/// Callers pass the revision back to [`CourseStore::save`] so concurrent
/// writers cannot silently overwrite each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCourse {
    /// The aggregate.
    pub course: Course,
    /// Revision at load time.
    pub revision: CourseRevision,
}

/// Persistence collaborator for [`Course`] aggregates.
///
/// Implementations must treat each `insert`/`save` atomically: either the
/// whole aggregate (course plus lessons) is stored, or nothing is.
#[async_trait]
pub trait CourseStore: Send + Sync {
    /// Inserts a brand-new course at [`CourseRevision::initial`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CourseAlreadyExists`](crate::errors::StoreError::CourseAlreadyExists)
    /// if a course with this id was already inserted.
    async fn insert(&self, course: Course) -> StoreResult<CourseRevision>;

    /// Loads a course by id, excluding soft-deleted courses.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CourseNotFound`](crate::errors::StoreError::CourseNotFound)
    /// if the course does not exist or has been soft-deleted.
    async fn load(&self, id: CourseId) -> StoreResult<StoredCourse>;

    /// Loads a course by id, including soft-deleted courses.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CourseNotFound`](crate::errors::StoreError::CourseNotFound)
    /// only if no course with this id was ever stored.
    async fn load_any(&self, id: CourseId) -> StoreResult<StoredCourse>;

    /// Saves a mutated course, advancing its revision.
    ///
    /// # Errors
    ///
    /// - [`StoreError::CourseNotFound`](crate::errors::StoreError::CourseNotFound)
    ///   if the course vanished from the store.
    /// - [`StoreError::RevisionConflict`](crate::errors::StoreError::RevisionConflict)
    ///   if `expected` is `Exact` and does not match the stored revision.
    async fn save(&self, course: Course, expected: ExpectedRevision)
        -> StoreResult<CourseRevision>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_revision_is_zero() {
        let initial = CourseRevision::initial();
        let value: u64 = initial.into();
        assert_eq!(value, 0);
    }

    #[test]
    fn next_revision_increments_by_one() {
        let r = CourseRevision::initial().next().next();
        let value: u64 = r.into();
        assert_eq!(value, 2);
    }

    #[test]
    fn expected_revision_roundtrip_serialization() {
        let expected = ExpectedRevision::Exact(CourseRevision::initial().next());
        let json = serde_json::to_string(&expected).unwrap();
        let deserialized: ExpectedRevision = serde_json::from_str(&json).unwrap();
        assert_eq!(expected, deserialized);
    }
}
