//! Example applications using the `CourseCore` domain library
//!
//! This crate holds runnable examples demonstrating how the catalog service,
//! the course aggregate, and a store adapter fit together.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
