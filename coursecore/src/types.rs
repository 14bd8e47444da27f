//! Core types for the `CourseCore` domain library.
//!
//! This module defines the fundamental types used throughout the library.
//! All types use smart constructors to ensure validity at construction time,
//! following the "parse, don't validate" principle: once a value exists, no
//! further validation is ever needed.

use chrono::{DateTime, Utc};
use nutype::nutype;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of a course, using UUIDv7 format.
///
/// `CourseId` values are guaranteed to be UUIDv7, which provides:
/// - Time-based ordering capability
/// - Globally unique identification
#[nutype(
    validate(predicate = |id: &Uuid| id.get_version() == Some(uuid::Version::SortRand)),
    derive(
        Debug,
        Clone,
        Copy,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        AsRef,
        Deref,
        Display,
        Serialize,
        Deserialize
    )
)]
pub struct CourseId(Uuid);

impl CourseId {
    /// Creates a fresh `CourseId` from the current timestamp.
    pub fn new() -> Self {
        // Uuid::now_v7() always returns a valid v7 UUID
        Self::try_new(Uuid::now_v7()).expect("Uuid::now_v7() should always return a valid v7 UUID")
    }
}

impl Default for CourseId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier of a lesson, using UUIDv7 format.
#[nutype(
    validate(predicate = |id: &Uuid| id.get_version() == Some(uuid::Version::SortRand)),
    derive(
        Debug,
        Clone,
        Copy,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        AsRef,
        Deref,
        Display,
        Serialize,
        Deserialize
    )
)]
pub struct LessonId(Uuid);

impl LessonId {
    /// Creates a fresh `LessonId` from the current timestamp.
    pub fn new() -> Self {
        // Uuid::now_v7() always returns a valid v7 UUID
        Self::try_new(Uuid::now_v7()).expect("Uuid::now_v7() should always return a valid v7 UUID")
    }
}

impl Default for LessonId {
    fn default() -> Self {
        Self::new()
    }
}

/// Title of a course.
///
/// Guaranteed non-empty after trimming and at most 255 characters.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 255),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        AsRef,
        Deref,
        Display,
        Serialize,
        Deserialize
    )
)]
pub struct CourseTitle(String);

/// Title of a lesson.
///
/// Guaranteed non-empty after trimming and at most 255 characters.
#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_max = 255),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        AsRef,
        Deref,
        Display,
        Serialize,
        Deserialize
    )
)]
pub struct LessonTitle(String);

/// Position of a lesson within its course.
///
/// Orders start at 1; the type system makes a zero or negative order
/// unrepresentable. Uniqueness among the active lessons of a course is the
/// aggregate's job, not this type's.
#[nutype(
    validate(greater_or_equal = 1),
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
pub struct LessonOrder(u32);

impl LessonOrder {
    /// The first position (1).
    pub fn first() -> Self {
        Self::try_new(1).expect("1 is always a valid order")
    }

    /// The largest representable position.
    pub fn max() -> Self {
        Self::try_new(u32::MAX).expect("u32::MAX is always a valid order")
    }

    /// Returns the position directly after this one, saturating at
    /// [`LessonOrder::max`].
    #[must_use]
    pub fn next(self) -> Self {
        let current: u32 = self.into();
        Self::try_new(current.saturating_add(1)).expect("incremented order should always be valid")
    }

    /// Returns the position directly after this one, or `None` at
    /// [`LessonOrder::max`].
    #[must_use]
    pub fn checked_next(self) -> Option<Self> {
        let current: u32 = self.into();
        current
            .checked_add(1)
            .map(|next| Self::try_new(next).expect("incremented order should always be valid"))
    }

    /// Returns the position directly before this one, or `None` at the front.
    #[must_use]
    pub fn prev(self) -> Option<Self> {
        let current: u32 = self.into();
        Self::try_new(current - 1).ok()
    }

    /// Returns the raw position value.
    pub fn get(self) -> u32 {
        self.into()
    }
}

/// A 1-based page number for paged lesson listings.
#[nutype(
    validate(greater_or_equal = 1),
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
pub struct PageNumber(u32);

impl PageNumber {
    /// The first page (1).
    pub fn first() -> Self {
        Self::try_new(1).expect("1 is always a valid page number")
    }

    /// Returns the raw page number.
    pub fn get(self) -> u32 {
        self.into()
    }
}

/// Number of items per page for paged lesson listings.
#[nutype(
    validate(greater_or_equal = 1),
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
pub struct PageSize(u32);

impl PageSize {
    /// Returns the raw page size.
    pub fn get(self) -> u32 {
        self.into()
    }
}

/// A timestamp recording when an entity was created or last mutated.
///
/// This wrapper ensures consistent timestamp handling throughout the system.
/// Timestamps are produced by a [`Clock`](crate::clock::Clock) rather than
/// read inline, so aggregate behaviour stays deterministic under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a new timestamp from a UTC `DateTime`.
    pub const fn new(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }

    /// Creates a timestamp representing the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Returns the underlying `DateTime`.
    pub const fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Converts the timestamp into the underlying `DateTime`.
    pub const fn into_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::new(datetime)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(timestamp: Timestamp) -> Self {
        timestamp.into_datetime()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
