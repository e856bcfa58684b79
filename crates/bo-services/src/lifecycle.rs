//! Task status lifecycle
//!
//! The overdue-override and completion rules live on the `Task` model; this
//! module re-exposes them as the single entry point every read path uses,
//! so no caller re-implements the date comparison ad hoc.

use bo_models::{Task, TaskStatus};
use chrono::NaiveDate;

pub use bo_models::task::is_completed_label;

/// The status a task reports after the overdue-override rule, given today's
/// date. A completed task is never auto-flipped to overdue.
pub fn effective_status(task: &Task, today: NaiveDate) -> TaskStatus {
    task.effective_status(today)
}
