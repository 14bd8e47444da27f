//! The `Course` aggregate root.
//!
//! A course owns an ordered set of lessons and is the only place where
//! lesson ordering is computed. The central invariant: among the lessons of
//! a course with `is_deleted = false`, all order values are unique. Every
//! operation either upholds that invariant or fails without mutating
//! anything — shift sets are computed in full before a single lesson moves.

use crate::errors::{CourseError, CourseResult};
use crate::lesson::Lesson;
use crate::types::{CourseId, CourseTitle, LessonId, LessonOrder, LessonTitle, Timestamp};
use serde::{Deserialize, Serialize};

/// Publication state of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseStatus {
    /// Not yet visible to learners. Every course starts here.
    Draft,
    /// Visible to learners. Requires at least one active lesson at the
    /// moment of publishing.
    Published,
}

/// Strategy applied when an insertion or reorder targets an order value.
///
/// The policy is fixed per course and applies to both
/// [`Course::add_lesson`] and [`Course::reorder_lesson`], so the two
/// operations can never disagree about collision handling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderingPolicy {
    /// Make room by renumbering neighbouring active lessons, like inserting
    /// into a list. Insertion never fails on an occupied order.
    #[default]
    Shift,
    /// Fail with [`CourseError::OrderConflict`] when the target order is
    /// already held by another active lesson.
    Reject,
}

/// A course: the aggregate root owning lessons and their ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    id: CourseId,
    title: CourseTitle,
    status: CourseStatus,
    is_deleted: bool,
    policy: OrderingPolicy,
    created_at: Timestamp,
    updated_at: Timestamp,
    lessons: Vec<Lesson>,
}

impl Course {
    /// Creates a new draft course with the default ([`OrderingPolicy::Shift`])
    /// ordering policy.
    pub fn new(title: CourseTitle, now: Timestamp) -> Self {
        Self::with_policy(title, OrderingPolicy::default(), now)
    }

    /// Creates a new draft course with an explicit ordering policy.
    pub fn with_policy(title: CourseTitle, policy: OrderingPolicy, now: Timestamp) -> Self {
        Self {
            id: CourseId::new(),
            title,
            status: CourseStatus::Draft,
            is_deleted: false,
            policy,
            created_at: now,
            updated_at: now,
            lessons: Vec::new(),
        }
    }

    /// Publishes the course, making it visible to learners.
    ///
    /// Idempotent: publishing an already-published course is a no-op and
    /// does not re-validate the lesson precondition.
    ///
    /// # Errors
    ///
    /// Returns [`CourseError::NoActiveLessons`] if the course has no active
    /// lesson; the course stays in `Draft`.
    pub fn publish(&mut self, now: Timestamp) -> CourseResult<()> {
        if self.status == CourseStatus::Published {
            return Ok(());
        }
        if self.active_lessons().next().is_none() {
            return Err(CourseError::NoActiveLessons);
        }
        self.status = CourseStatus::Published;
        self.updated_at = now;
        Ok(())
    }

    /// Returns the course to draft. Idempotent; no lesson precondition.
    pub fn unpublish(&mut self, now: Timestamp) {
        if self.status == CourseStatus::Draft {
            return;
        }
        self.status = CourseStatus::Draft;
        self.updated_at = now;
    }

    /// Inserts a new lesson at the requested position.
    ///
    /// Under [`OrderingPolicy::Shift`], the contiguous run of active
    /// lessons occupying `order` and the slots directly above it moves up
    /// by one first — the same semantics as inserting into a list. The
    /// shift stops at the first free slot, so a position vacated by a soft
    /// delete is reused without disturbing lessons beyond the gap, and
    /// inserting into a free slot shifts nothing. Under
    /// [`OrderingPolicy::Reject`] the requested order must be free.
    ///
    /// Returns the id of the new lesson.
    ///
    /// # Errors
    ///
    /// Returns [`CourseError::OrderConflict`] when another active lesson
    /// already holds `order` (reject policy), or when the occupied run
    /// ends at [`LessonOrder::max`] and there is no room to shift it
    /// (shift policy).
    pub fn add_lesson(
        &mut self,
        title: LessonTitle,
        order: LessonOrder,
        now: Timestamp,
    ) -> CourseResult<LessonId> {
        match self.policy {
            OrderingPolicy::Shift => {
                let run = self.occupied_run_from(order);
                let full = run
                    .last()
                    .is_some_and(|&idx| self.lessons[idx].order().checked_next().is_none());
                if full {
                    return Err(CourseError::OrderConflict(order));
                }
                for idx in run {
                    let next = self.lessons[idx].order().next();
                    self.lessons[idx].update_order(next, now);
                }
            }
            OrderingPolicy::Reject => {
                if self.active_lessons().any(|l| l.order() == order) {
                    return Err(CourseError::OrderConflict(order));
                }
            }
        }

        let lesson = Lesson::new(self.id, title, order, now);
        let lesson_id = lesson.id();
        self.lessons.push(lesson);
        self.updated_at = now;
        Ok(lesson_id)
    }

    /// Moves an active lesson to a new position.
    ///
    /// A no-op when `new_order` equals the lesson's current order. Under
    /// [`OrderingPolicy::Shift`] the move behaves like a list splice:
    /// lessons between the old and new positions slide one step toward the
    /// vacated slot, and no collision can occur.
    ///
    /// # Errors
    ///
    /// - [`CourseError::LessonNotFound`] if no active lesson has `lesson_id`.
    /// - [`CourseError::OrderConflict`] under the reject policy when another
    ///   active lesson already holds `new_order`.
    pub fn reorder_lesson(
        &mut self,
        lesson_id: LessonId,
        new_order: LessonOrder,
        now: Timestamp,
    ) -> CourseResult<()> {
        let target = self
            .lessons
            .iter()
            .position(|l| l.id() == lesson_id && !l.is_deleted())
            .ok_or(CourseError::LessonNotFound(lesson_id))?;

        let current = self.lessons[target].order();
        if current == new_order {
            return Ok(());
        }

        match self.policy {
            OrderingPolicy::Shift => {
                // Full shift set is computed before anything moves.
                let moving_up = new_order < current;
                let affected: Vec<usize> = self
                    .lessons
                    .iter()
                    .enumerate()
                    .filter(|(idx, l)| {
                        *idx != target
                            && !l.is_deleted()
                            && if moving_up {
                                l.order() >= new_order && l.order() < current
                            } else {
                                l.order() > current && l.order() <= new_order
                            }
                    })
                    .map(|(idx, _)| idx)
                    .collect();

                for idx in affected {
                    let shifted = if moving_up {
                        self.lessons[idx].order().next()
                    } else {
                        self.lessons[idx]
                            .order()
                            .prev()
                            .expect("orders above the vacated slot are always at least 2")
                    };
                    self.lessons[idx].update_order(shifted, now);
                }
            }
            OrderingPolicy::Reject => {
                let occupied = self
                    .lessons
                    .iter()
                    .any(|l| !l.is_deleted() && l.id() != lesson_id && l.order() == new_order);
                if occupied {
                    return Err(CourseError::OrderConflict(new_order));
                }
            }
        }

        self.lessons[target].update_order(new_order, now);
        self.updated_at = now;
        Ok(())
    }

    /// Soft-deletes an active lesson.
    ///
    /// The lesson keeps its last order value and is excluded from every
    /// active-lesson view from this point on; its slot is immediately
    /// reusable. Deleting the last active lesson of a published course is
    /// allowed — the publish precondition is checked only at publish time.
    ///
    /// # Errors
    ///
    /// Returns [`CourseError::LessonNotFound`] if no active lesson has
    /// `lesson_id`.
    pub fn soft_delete_lesson(&mut self, lesson_id: LessonId, now: Timestamp) -> CourseResult<()> {
        let target = self
            .lessons
            .iter_mut()
            .find(|l| l.id() == lesson_id && !l.is_deleted())
            .ok_or(CourseError::LessonNotFound(lesson_id))?;
        target.soft_delete(now);
        self.updated_at = now;
        Ok(())
    }

    /// Soft-deletes the course. Terminal; does not cascade to lessons and
    /// does not change the publication status.
    pub fn soft_delete(&mut self, now: Timestamp) {
        self.is_deleted = true;
        self.updated_at = now;
    }

    /// Unique identifier of this course.
    pub const fn id(&self) -> CourseId {
        self.id
    }

    /// Course title.
    pub const fn title(&self) -> &CourseTitle {
        &self.title
    }

    /// Current publication state.
    pub const fn status(&self) -> CourseStatus {
        self.status
    }

    /// Whether the course has been soft-deleted.
    pub const fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    /// The collision policy applied by the ordering operations.
    pub const fn ordering_policy(&self) -> OrderingPolicy {
        self.policy
    }

    /// When the course was created.
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// When the course was last mutated.
    pub const fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// The active lessons of this course, sorted by order.
    ///
    /// Soft-deleted lessons never appear here.
    pub fn lessons(&self) -> Vec<&Lesson> {
        let mut active: Vec<&Lesson> = self.active_lessons().collect();
        active.sort_by_key(|l| l.order());
        active
    }

    /// Looks up an active lesson by id.
    pub fn lesson(&self, lesson_id: LessonId) -> Option<&Lesson> {
        self.active_lessons().find(|l| l.id() == lesson_id)
    }

    /// Number of active lessons.
    pub fn active_lesson_count(&self) -> usize {
        self.active_lessons().count()
    }

    fn active_lessons(&self) -> impl Iterator<Item = &Lesson> {
        self.lessons.iter().filter(|l| !l.is_deleted())
    }

    /// Indices of the contiguous run of active lessons starting exactly at
    /// `start`, ascending by order. The run ends at the first free slot, so
    /// lessons beyond a gap are never shifted.
    fn occupied_run_from(&self, start: LessonOrder) -> Vec<usize> {
        let mut candidates: Vec<usize> = self
            .lessons
            .iter()
            .enumerate()
            .filter(|(_, l)| !l.is_deleted() && l.order() >= start)
            .map(|(idx, _)| idx)
            .collect();
        candidates.sort_by_key(|&idx| self.lessons[idx].order());

        let mut run = Vec::new();
        let mut expected = start;
        for idx in candidates {
            if self.lessons[idx].order() != expected {
                break;
            }
            run.push(idx);
            match expected.checked_next() {
                Some(next) => expected = next,
                None => break,
            }
        }
        run
    }
}
