//! `CourseCore` - course catalog domain library
//!
//! Courses own an ordered set of lessons; the aggregate keeps active lesson
//! orders collision-free under insertion, reordering, and soft deletion,
//! and enforces the publish state machine. Storage, transport, and auth are
//! collaborators behind the [`store::CourseStore`] trait.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod clock;
pub mod course;
pub mod errors;
pub mod lesson;
pub mod read_model;
pub mod store;
pub mod types;

pub use catalog::CourseCatalog;
pub use clock::{Clock, FixedClock, SystemClock};
pub use course::{Course, CourseStatus, OrderingPolicy};
pub use errors::{CatalogError, CatalogResult, CourseError, ErrorKind, StoreError};
pub use lesson::Lesson;
pub use read_model::{CourseSummary, LessonView, Page};
pub use store::{CourseRevision, CourseStore, ExpectedRevision, StoredCourse};
pub use types::{CourseId, CourseTitle, LessonId, LessonOrder, LessonTitle, Timestamp};
