//! Wolf Scheduler Core Library
//!
//! This library provides the course catalog, the personal schedule with its
//! conflict and duplicate checks, and the flat record format used to load a
//! catalog and export a schedule.

pub mod activity;
pub mod catalog;
pub mod course;
pub mod error;
pub mod event;
pub mod records;
pub mod schedule;
pub mod scheduler;

// Re-export core types and error handling
pub use error::{Error, Field, Result};

/// Commonly used items
pub mod prelude {
    pub use crate::{
        activity::*, catalog::Catalog, course::Course, event::Event, records, schedule::*,
        scheduler::Scheduler,
    };
}
