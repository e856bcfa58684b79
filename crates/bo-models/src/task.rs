//! Task model and status lifecycle
//!
//! Table: tasks
//!
//! The overdue rule lives here as pure functions so every read and write path
//! derives status the same way instead of re-implementing the comparison.

use bo_core::{Entity, Id, Identifiable, Timestamped};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Parse a priority label, ignoring case.
    pub fn parse(s: &str) -> Result<Self, ParseEnumError> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(ParseEnumError {
                kind: "priority",
                value: s.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Urgent => "Urgent",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task status
///
/// `Overdue` is derived, never accepted verbatim from callers: a write that
/// targets any non-completed status while the due date is in the past is
/// silently overridden (see [`Task::apply_status_rules`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TaskStatus {
    #[default]
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Overdue,
}

impl TaskStatus {
    /// Parse a status label, ignoring case. Source data is inconsistently
    /// cased ("Completed" vs "completed"), so comparison is always lowercase.
    pub fn parse(s: &str) -> Result<Self, ParseEnumError> {
        match s.trim().to_lowercase().as_str() {
            "open" | "pending" => Ok(Self::Open),
            "in progress" | "in_progress" | "inprogress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "overdue" => Ok(Self::Overdue),
            _ => Err(ParseEnumError {
                kind: "status",
                value: s.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Overdue => "Overdue",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive completion check on a raw status label.
///
/// Used wherever status arrives as loose text (CSV import, legacy rows)
/// rather than as the typed enum.
pub fn is_completed_label(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("completed")
}

#[derive(Debug, Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Task entity
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Option<Id>,

    #[validate(length(min = 1, message = "can't be blank"))]
    pub title: String,

    pub description: Option<String>,

    pub due_date: NaiveDate,

    pub priority: Priority,

    pub status: TaskStatus,

    /// Assigned employee (optional foreign key)
    pub employee_id: Option<Id>,

    /// Associated customer (optional foreign key)
    pub customer_id: Option<Id>,

    #[validate(range(min = 0.0, message = "must be non-negative"))]
    pub billing_amount: Option<f64>,

    #[validate(range(min = 0.0, message = "must be non-negative"))]
    pub paid_amount: f64,

    /// Set once the task has been billed; a billed task leaves the
    /// unbilled pool permanently.
    pub invoice_id: Option<Id>,

    /// Stamped exactly once, on the first transition into Completed.
    pub completed_at: Option<DateTime<Utc>>,

    pub created_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(title: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: None,
            due_date,
            priority: Priority::default(),
            status: TaskStatus::default(),
            employee_id: None,
            customer_id: None,
            billing_amount: None,
            paid_amount: 0.0,
            invoice_id: None,
            completed_at: None,
            created_at: None,
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn assigned_to(mut self, employee_id: Id) -> Self {
        self.employee_id = Some(employee_id);
        self
    }

    pub fn for_customer(mut self, customer_id: Id) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn with_billing(mut self, billing_amount: f64, paid_amount: f64) -> Self {
        self.billing_amount = Some(billing_amount);
        self.paid_amount = paid_amount;
        self
    }

    /// Whether this task has been converted into an invoice.
    pub fn is_billed(&self) -> bool {
        self.invoice_id.is_some()
    }

    /// Outstanding amount on this task, treating a missing billing amount as zero.
    pub fn balance_due(&self) -> f64 {
        self.billing_amount.unwrap_or(0.0) - self.paid_amount
    }

    /// The status after applying the overdue-override rule, without mutating
    /// the stored record. A completed task is never reported overdue.
    pub fn effective_status(&self, today: NaiveDate) -> TaskStatus {
        if self.status != TaskStatus::Completed && self.due_date < today {
            TaskStatus::Overdue
        } else {
            self.status
        }
    }

    /// Normalize status-derived fields at write time.
    ///
    /// - forces `Overdue` when the due date is past and the target status is
    ///   not `Completed`, regardless of what the caller supplied;
    /// - stamps `completed_at` on the first transition into `Completed` and
    ///   never overwrites an existing stamp.
    ///
    /// Called by the store on every task create and update, and re-applied
    /// whenever a due date or status is written.
    pub fn apply_status_rules(&mut self, now: DateTime<Utc>) {
        let today = now.date_naive();
        if self.status != TaskStatus::Completed && self.due_date < today {
            self.status = TaskStatus::Overdue;
        }
        if self.status == TaskStatus::Completed && self.completed_at.is_none() {
            self.completed_at = Some(now);
        }
    }
}

impl Identifiable for Task {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for Task {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl Entity for Task {
    const TABLE_NAME: &'static str = "tasks";
    const TYPE_NAME: &'static str = "Task";
}

/// Partial update for a task.
///
/// Outer `None` means "leave unchanged"; for nullable foreign keys the inner
/// option distinguishes "set" from "clear".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
    pub employee_id: Option<Option<Id>>,
    pub customer_id: Option<Option<Id>>,
    pub billing_amount: Option<Option<f64>>,
    pub paid_amount: Option<f64>,
    pub invoice_id: Option<Option<Id>>,
}

impl TaskPatch {
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(employee_id) = self.employee_id {
            task.employee_id = employee_id;
        }
        if let Some(customer_id) = self.customer_id {
            task.customer_id = customer_id;
        }
        if let Some(billing_amount) = self.billing_amount {
            task.billing_amount = billing_amount;
        }
        if let Some(paid_amount) = self.paid_amount {
            task.paid_amount = paid_amount;
        }
        if let Some(invoice_id) = self.invoice_id {
            task.invoice_id = invoice_id;
        }
    }

    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn unassign_employee() -> Self {
        Self {
            employee_id: Some(None),
            ..Default::default()
        }
    }

    pub fn link_invoice(invoice_id: Id) -> Self {
        Self {
            invoice_id: Some(Some(invoice_id)),
            ..Default::default()
        }
    }
}
