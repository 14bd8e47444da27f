//! Application service over [`Course`] aggregates.
//!
//! `CourseCatalog` is the use-case layer: it parses raw input into validated
//! domain types, drives one load–mutate–save cycle per operation, and maps
//! results into read models. All ordering math stays inside the aggregate;
//! the catalog never recomputes it.

use crate::clock::{Clock, SystemClock};
use crate::course::{Course, CourseStatus, OrderingPolicy};
use crate::errors::{CatalogResult, CourseError};
use crate::read_model::{CourseSummary, LessonView, Page};
use crate::store::{CourseStore, ExpectedRevision, StoredCourse};
use crate::types::{
    CourseId, CourseTitle, LessonId, LessonOrder, LessonTitle, PageNumber, PageSize, Timestamp,
};

/// Use-case layer for creating and mutating courses.
///
/// Each operation loads the aggregate, applies exactly one mutation, and
/// saves it back under the revision it was loaded at, so concurrent writers
/// surface as [`StoreError::RevisionConflict`](crate::errors::StoreError::RevisionConflict)
/// rather than lost updates.
#[derive(Debug, Clone)]
pub struct CourseCatalog<S, C = SystemClock> {
    store: S,
    clock: C,
}

impl<S: CourseStore> CourseCatalog<S> {
    /// Creates a catalog over `store` using the system clock.
    pub const fn new(store: S) -> Self {
        Self {
            store,
            clock: SystemClock,
        }
    }
}

impl<S: CourseStore, C: Clock> CourseCatalog<S, C> {
    /// Creates a catalog with an explicit clock, for deterministic tests.
    pub const fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// Creates a new draft course and returns its id.
    #[tracing::instrument(skip(self))]
    pub async fn create_course(&self, title: &str) -> CatalogResult<CourseId> {
        self.create_course_with_policy(title, OrderingPolicy::default())
            .await
    }

    /// Creates a new draft course with an explicit ordering policy.
    #[tracing::instrument(skip(self))]
    pub async fn create_course_with_policy(
        &self,
        title: &str,
        policy: OrderingPolicy,
    ) -> CatalogResult<CourseId> {
        let title = parse_course_title(title)?;
        let course = Course::with_policy(title, policy, self.clock.now());
        let id = course.id();
        self.store.insert(course).await?;
        tracing::info!(course_id = %id, "course created");
        Ok(id)
    }

    /// Publishes a course. Idempotent.
    #[tracing::instrument(skip(self))]
    pub async fn publish_course(&self, course_id: CourseId) -> CatalogResult<()> {
        self.update(course_id, |course, now| course.publish(now))
            .await
    }

    /// Returns a course to draft. Idempotent.
    #[tracing::instrument(skip(self))]
    pub async fn unpublish_course(&self, course_id: CourseId) -> CatalogResult<()> {
        self.update(course_id, |course, now| {
            course.unpublish(now);
            Ok(())
        })
        .await
    }

    /// Soft-deletes a course. Terminal: subsequent loads fail with
    /// `NotFound`.
    #[tracing::instrument(skip(self))]
    pub async fn soft_delete_course(&self, course_id: CourseId) -> CatalogResult<()> {
        self.update(course_id, |course, now| {
            course.soft_delete(now);
            Ok(())
        })
        .await
    }

    /// Adds a lesson to a course at the requested position and returns the
    /// new lesson's id.
    #[tracing::instrument(skip(self))]
    pub async fn add_lesson(
        &self,
        course_id: CourseId,
        title: &str,
        order: u32,
    ) -> CatalogResult<LessonId> {
        let title = parse_lesson_title(title)?;
        let order = parse_order(order)?;
        self.update(course_id, |course, now| {
            course.add_lesson(title, order, now)
        })
        .await
    }

    /// Moves a lesson to a new position within its course.
    #[tracing::instrument(skip(self))]
    pub async fn reorder_lesson(
        &self,
        course_id: CourseId,
        lesson_id: LessonId,
        new_order: u32,
    ) -> CatalogResult<()> {
        let new_order = parse_order(new_order)?;
        self.update(course_id, |course, now| {
            course.reorder_lesson(lesson_id, new_order, now)
        })
        .await
    }

    /// Soft-deletes a lesson.
    ///
    /// Allowed even when it is the last active lesson of a published
    /// course; the publish precondition applies only at publish time.
    #[tracing::instrument(skip(self))]
    pub async fn soft_delete_lesson(
        &self,
        course_id: CourseId,
        lesson_id: LessonId,
    ) -> CatalogResult<()> {
        self.update(course_id, |course, now| {
            course.soft_delete_lesson(lesson_id, now)?;
            if course.status() == CourseStatus::Published && course.active_lesson_count() == 0 {
                tracing::warn!(
                    course_id = %course.id(),
                    "published course no longer has any active lessons"
                );
            }
            Ok(())
        })
        .await
    }

    /// Returns a summary view of a course.
    #[tracing::instrument(skip(self))]
    pub async fn course_summary(&self, course_id: CourseId) -> CatalogResult<CourseSummary> {
        let stored = self.store.load(course_id).await?;
        Ok(CourseSummary::from(&stored.course))
    }

    /// Returns a single active lesson of a course.
    #[tracing::instrument(skip(self))]
    pub async fn get_lesson(
        &self,
        course_id: CourseId,
        lesson_id: LessonId,
    ) -> CatalogResult<LessonView> {
        let stored = self.store.load(course_id).await?;
        let lesson = stored
            .course
            .lesson(lesson_id)
            .ok_or(CourseError::LessonNotFound(lesson_id))?;
        Ok(LessonView::from(lesson))
    }

    /// Returns one page of a course's active lessons, sorted by order.
    #[tracing::instrument(skip(self))]
    pub async fn list_lessons(
        &self,
        course_id: CourseId,
        page: u32,
        page_size: u32,
    ) -> CatalogResult<Page<LessonView>> {
        let page = PageNumber::try_new(page)
            .map_err(|e| CourseError::InvalidArgument(e.to_string()))?;
        let page_size = PageSize::try_new(page_size)
            .map_err(|e| CourseError::InvalidArgument(e.to_string()))?;

        let stored = self.store.load(course_id).await?;
        let views: Vec<LessonView> = stored
            .course
            .lessons()
            .into_iter()
            .map(LessonView::from)
            .collect();
        Ok(Page::slice(views, page, page_size))
    }

    /// One load–mutate–save cycle under the loaded revision.
    async fn update<F, T>(&self, course_id: CourseId, mutate: F) -> CatalogResult<T>
    where
        F: FnOnce(&mut Course, Timestamp) -> Result<T, CourseError> + Send,
    {
        let StoredCourse {
            mut course,
            revision,
        } = self.store.load(course_id).await?;
        let out = mutate(&mut course, self.clock.now())?;
        self.store
            .save(course, ExpectedRevision::Exact(revision))
            .await?;
        Ok(out)
    }
}

fn parse_course_title(raw: &str) -> Result<CourseTitle, CourseError> {
    CourseTitle::try_new(raw).map_err(|e| CourseError::InvalidArgument(e.to_string()))
}

fn parse_lesson_title(raw: &str) -> Result<LessonTitle, CourseError> {
    LessonTitle::try_new(raw).map_err(|e| CourseError::InvalidArgument(e.to_string()))
}

fn parse_order(raw: u32) -> Result<LessonOrder, CourseError> {
    LessonOrder::try_new(raw).map_err(|e| CourseError::InvalidArgument(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn blank_titles_parse_to_invalid_argument() {
        let err = parse_course_title("   ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let err = parse_lesson_title("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn zero_order_parses_to_invalid_argument() {
        let err = parse_order(0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn valid_input_parses_to_domain_types() {
        assert_eq!(parse_course_title(" Rust ").unwrap().as_ref(), "Rust");
        assert_eq!(parse_order(3).unwrap().get(), 3);
    }
}
