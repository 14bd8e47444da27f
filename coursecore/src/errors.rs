//! Error types for `CourseCore`.
//!
//! The error design follows these principles:
//!
//! - **Type safety**: different error types for different layers
//! - **Actionable**: callers can determine how to handle each error
//! - **Composable**: errors convert cleanly between layers
//!
//! # Error Categories
//!
//! - **CourseError**: business-rule failures raised by the aggregate
//! - **StoreError**: storage and persistence failures raised by adapters
//! - **CatalogError**: union surfaced by the application service
//!
//! Every domain failure is deterministic given the same input and aggregate
//! state, so nothing here is worth retrying without changing the input.

use crate::store::CourseRevision;
use crate::types::{CourseId, LessonId, LessonOrder};
use thiserror::Error;

/// Transport-facing classification of a domain failure.
///
/// Callers map these onto their protocol's client-error space (HTTP status
/// codes, gRPC codes, and so on) without matching on individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input failed validation.
    InvalidArgument,
    /// A referenced entity is absent or soft-deleted.
    NotFound,
    /// The aggregate is not in a state that permits the operation.
    PreconditionFailed,
    /// The operation collides with existing state.
    Conflict,
    /// An infrastructure failure unrelated to the request.
    Internal,
}

/// Errors raised by [`Course`](crate::course::Course) operations.
///
/// A failed operation leaves the aggregate's in-memory state untouched:
/// every operation validates fully before applying any mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CourseError {
    /// Raw input could not be parsed into a validated domain type.
    ///
    /// Rare in practice: validation happens once, at type construction, so
    /// this only surfaces from the service layer's parsing entry points.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The referenced lesson does not exist in this course, or has been
    /// soft-deleted.
    #[error("lesson '{0}' not found or deleted")]
    LessonNotFound(LessonId),

    /// A course must have at least one active lesson to be published.
    #[error("a course must have at least one active lesson to be published")]
    NoActiveLessons,

    /// Another active lesson already holds the requested order and cannot
    /// make room: always under the reject policy, or under the shift policy
    /// when the occupied run ends at the highest representable order.
    #[error("a lesson with order {0} already exists")]
    OrderConflict(LessonOrder),
}

impl CourseError {
    /// Classifies this error for transport mapping.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::LessonNotFound(_) => ErrorKind::NotFound,
            Self::NoActiveLessons => ErrorKind::PreconditionFailed,
            Self::OrderConflict(_) => ErrorKind::Conflict,
        }
    }
}

/// Errors raised by [`CourseStore`](crate::store::CourseStore) adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The requested course does not exist (or is soft-deleted and the load
    /// did not ask for deleted courses).
    #[error("course '{0}' not found")]
    CourseNotFound(CourseId),

    /// Optimistic concurrency control detected a conflicting update.
    #[error("revision conflict on course '{id}': expected {expected}, but current is {current}")]
    RevisionConflict {
        /// The course with the conflicting revision.
        id: CourseId,
        /// The revision the caller expected to overwrite.
        expected: CourseRevision,
        /// The revision actually stored.
        current: CourseRevision,
    },

    /// A course with this id has already been inserted.
    #[error("course '{0}' already exists")]
    CourseAlreadyExists(CourseId),

    /// The backing store failed in a way unrelated to the aggregate.
    #[error("storage failure: {0}")]
    Io(String),
}

impl StoreError {
    /// Classifies this error for transport mapping.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::CourseNotFound(_) => ErrorKind::NotFound,
            Self::RevisionConflict { .. } | Self::CourseAlreadyExists(_) => ErrorKind::Conflict,
            Self::Io(_) => ErrorKind::Internal,
        }
    }
}

/// Errors surfaced by the [`CourseCatalog`](crate::catalog::CourseCatalog)
/// application service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The aggregate rejected the operation.
    #[error(transparent)]
    Course(#[from] CourseError),

    /// The storage adapter failed to load or save the aggregate.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CatalogError {
    /// Classifies this error for transport mapping.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Course(e) => e.kind(),
            Self::Store(e) => e.kind(),
        }
    }
}

/// Result type for aggregate operations.
pub type CourseResult<T> = Result<T, CourseError>;

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for application-service operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_error_kinds_follow_the_taxonomy() {
        assert_eq!(
            CourseError::InvalidArgument("empty title".to_string()).kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            CourseError::LessonNotFound(LessonId::new()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            CourseError::NoActiveLessons.kind(),
            ErrorKind::PreconditionFailed
        );
        assert_eq!(
            CourseError::OrderConflict(crate::types::LessonOrder::first()).kind(),
            ErrorKind::Conflict
        );
    }

    #[test]
    fn store_error_kinds_follow_the_taxonomy() {
        assert_eq!(
            StoreError::CourseNotFound(CourseId::new()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            StoreError::CourseAlreadyExists(CourseId::new()).kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            StoreError::Io("disk full".to_string()).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn catalog_error_preserves_the_underlying_kind() {
        let err: CatalogError = CourseError::NoActiveLessons.into();
        assert_eq!(err.kind(), ErrorKind::PreconditionFailed);

        let err: CatalogError = StoreError::CourseNotFound(CourseId::new()).into();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn error_messages_name_the_offending_entity() {
        let id = LessonId::new();
        let msg = CourseError::LessonNotFound(id).to_string();
        assert!(msg.contains(&id.to_string()));
    }
}
