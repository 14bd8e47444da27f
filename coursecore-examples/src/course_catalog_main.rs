//! Course catalog example application
//!
//! This example demonstrates the full course lifecycle:
//! - Course creation and publishing rules
//! - Lesson insertion with shift-based reordering
//! - Splice-style reordering and soft deletion
//!
//! Run with `cargo run --example course_catalog`.

use anyhow::Result;
use coursecore::{CourseCatalog, ErrorKind};
use coursecore_memory::InMemoryCourseStore;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting course catalog example");

    let catalog = CourseCatalog::new(InMemoryCourseStore::new());

    // Create a draft course.
    let course_id = catalog.create_course("Rust for Backend Engineers").await?;
    info!(%course_id, "created draft course");

    // Publishing an empty course is refused.
    match catalog.publish_course(course_id).await {
        Err(e) if e.kind() == ErrorKind::PreconditionFailed => {
            warn!("cannot publish yet: {e}");
        }
        other => anyhow::bail!("expected a precondition failure, got {other:?}"),
    }

    // Build out the syllabus.
    catalog.add_lesson(course_id, "Ownership", 1).await?;
    catalog.add_lesson(course_id, "Traits", 2).await?;
    let async_lesson = catalog.add_lesson(course_id, "Async", 3).await?;

    // A late arrival at position 1 shifts everything else up.
    catalog
        .add_lesson(course_id, "Installing the toolchain", 1)
        .await?;

    // Move "Async" to the end explicitly (a no-op here, it is already last).
    catalog.reorder_lesson(course_id, async_lesson, 4).await?;

    catalog.publish_course(course_id).await?;
    let summary = catalog.course_summary(course_id).await?;
    info!(
        status = ?summary.status,
        total_lessons = summary.total_lessons,
        "course published"
    );

    // Print the final syllabus.
    let page = catalog.list_lessons(course_id, 1, 10).await?;
    for lesson in &page.items {
        info!(order = lesson.order, title = %lesson.title, "lesson");
    }

    // Drop a lesson; its slot becomes reusable.
    catalog
        .soft_delete_lesson(course_id, async_lesson)
        .await?;
    let summary = catalog.course_summary(course_id).await?;
    info!(
        total_lessons = summary.total_lessons,
        "after soft-deleting a lesson"
    );

    Ok(())
}
