//! Read models returned by the catalog service.
//!
//! Plain serializable snapshots of aggregate state, decoupled from the
//! entities so transport layers can render them without touching the
//! aggregate's mutation surface.

use crate::course::{Course, CourseStatus};
use crate::lesson::Lesson;
use crate::types::{CourseId, LessonId, PageNumber, PageSize, Timestamp};
use serde::{Deserialize, Serialize};

/// Summary view of a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSummary {
    /// Course identifier.
    pub id: CourseId,
    /// Course title.
    pub title: String,
    /// Current publication state.
    pub status: CourseStatus,
    /// Number of active lessons.
    pub total_lessons: usize,
    /// When the course was last mutated.
    pub last_modified: Timestamp,
}

impl From<&Course> for CourseSummary {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id(),
            title: course.title().to_string(),
            status: course.status(),
            total_lessons: course.active_lesson_count(),
            last_modified: course.updated_at(),
        }
    }
}

/// Snapshot of a single lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonView {
    /// Lesson identifier.
    pub id: LessonId,
    /// Identifier of the owning course.
    pub course_id: CourseId,
    /// Lesson title.
    pub title: String,
    /// Position among the active lessons of the course.
    pub order: u32,
    /// When the lesson was created.
    pub created_at: Timestamp,
    /// When the lesson was last mutated.
    pub updated_at: Timestamp,
}

impl From<&Lesson> for LessonView {
    fn from(lesson: &Lesson) -> Self {
        Self {
            id: lesson.id(),
            course_id: lesson.course_id(),
            title: lesson.title().to_string(),
            order: lesson.order().get(),
            created_at: lesson.created_at(),
            updated_at: lesson.updated_at(),
        }
    }
}

/// One page of a larger result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items on this page, in result order.
    pub items: Vec<T>,
    /// Total number of items across all pages.
    pub total: usize,
    /// The page that was requested (1-based).
    pub page: PageNumber,
    /// The requested page size.
    pub page_size: PageSize,
}

impl<T> Page<T> {
    /// Slices one page out of a full, ordered result set.
    pub fn slice(all: Vec<T>, page: PageNumber, page_size: PageSize) -> Self {
        let total = all.len();
        let size = page_size.get() as usize;
        let start = (page.get() as usize - 1).saturating_mul(size);
        let items: Vec<T> = all.into_iter().skip(start).take(size).collect();
        Self {
            items,
            total,
            page,
            page_size,
        }
    }

    /// Number of pages needed for the full result set.
    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size.get() as usize)
    }
}
