//! The `Lesson` child entity.
//!
//! Lessons have no lifecycle of their own: they are created, re-ordered, and
//! soft-deleted only through the [`Course`](crate::course::Course) that owns
//! them. The mutation surface here is `pub(crate)` so no caller can bypass
//! the course's invariant-preserving operations.

use crate::types::{CourseId, LessonId, LessonOrder, LessonTitle, Timestamp};
use serde::{Deserialize, Serialize};

/// A single lesson within a course.
///
/// The `order` field positions the lesson among the active lessons of its
/// course; the owning course guarantees that no two active lessons share an
/// order. Soft-deleted lessons keep their last order for audit purposes but
/// are excluded from every ordering computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    id: LessonId,
    course_id: CourseId,
    title: LessonTitle,
    order: LessonOrder,
    is_deleted: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Lesson {
    /// Creates a new active lesson. Only the owning course constructs
    /// lessons, after it has made room at `order`.
    pub(crate) fn new(
        course_id: CourseId,
        title: LessonTitle,
        order: LessonOrder,
        now: Timestamp,
    ) -> Self {
        Self {
            id: LessonId::new(),
            course_id,
            title,
            order,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Moves the lesson to a new position.
    ///
    /// Callable only from the owning course's ordering operations, which are
    /// responsible for keeping active orders collision-free.
    pub(crate) fn update_order(&mut self, new_order: LessonOrder, now: Timestamp) {
        self.order = new_order;
        self.updated_at = now;
    }

    /// Marks the lesson as deleted. Terminal: there is no un-delete.
    ///
    /// The lesson keeps its last order value but disappears from all
    /// active-lesson views.
    pub(crate) fn soft_delete(&mut self, now: Timestamp) {
        self.is_deleted = true;
        self.updated_at = now;
    }

    /// Unique identifier of this lesson.
    pub const fn id(&self) -> LessonId {
        self.id
    }

    /// Identifier of the course that owns this lesson.
    pub const fn course_id(&self) -> CourseId {
        self.course_id
    }

    /// Lesson title.
    pub const fn title(&self) -> &LessonTitle {
        &self.title
    }

    /// Position among the active lessons of the course.
    pub const fn order(&self) -> LessonOrder {
        self.order
    }

    /// Whether the lesson has been soft-deleted.
    pub const fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    /// When the lesson was created.
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// When the lesson was last mutated.
    pub const fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson_at(order: u32) -> Lesson {
        Lesson::new(
            CourseId::new(),
            LessonTitle::try_new("Intro").unwrap(),
            LessonOrder::try_new(order).unwrap(),
            Timestamp::now(),
        )
    }

    #[test]
    fn new_lesson_is_active_with_matching_audit_fields() {
        let lesson = lesson_at(3);
        assert!(!lesson.is_deleted());
        assert_eq!(lesson.order().get(), 3);
        assert_eq!(lesson.created_at(), lesson.updated_at());
    }

    #[test]
    fn update_order_refreshes_updated_at_only() {
        let mut lesson = lesson_at(1);
        let created = lesson.created_at();
        let later = Timestamp::now();
        lesson.update_order(LessonOrder::try_new(5).unwrap(), later);
        assert_eq!(lesson.order().get(), 5);
        assert_eq!(lesson.created_at(), created);
        assert_eq!(lesson.updated_at(), later);
    }

    #[test]
    fn soft_delete_keeps_the_historical_order() {
        let mut lesson = lesson_at(7);
        lesson.soft_delete(Timestamp::now());
        assert!(lesson.is_deleted());
        assert_eq!(lesson.order().get(), 7);
    }

    #[test]
    fn lesson_roundtrip_serialization() {
        let lesson = lesson_at(2);
        let json = serde_json::to_string(&lesson).unwrap();
        let deserialized: Lesson = serde_json::from_str(&json).unwrap();
        assert_eq!(lesson, deserialized);
    }
}
