//! Grouped task summaries
//!
//! One accumulation algorithm serves both the per-employee and per-customer
//! reports; only the grouping key differs. Tasks whose grouping key is null
//! contribute to no group, but null numeric fields are zeros, never skips.

use std::collections::HashMap;

use bo_core::{Id, ServiceResult};
use bo_models::Task;
use bo_store::TaskStore;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::instrument;

/// Which foreign key to group tasks by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    Employee,
    Customer,
}

impl GroupKey {
    fn of(&self, task: &Task) -> Option<Id> {
        match self {
            Self::Employee => task.employee_id,
            Self::Customer => task.customer_id,
        }
    }
}

/// Inclusive due-date window; a missing bound is unbounded on that side.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        if let Some(from) = self.from {
            if date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if date > to {
                return false;
            }
        }
        true
    }
}

/// Accumulated figures for one employee or customer.
#[derive(Debug, Clone)]
pub struct GroupSummary {
    pub group_id: Id,
    pub total_billing: f64,
    pub total_paid: f64,
    pub completed_tasks: u32,
    pub pending_tasks: u32,
}

// hand-written so the derived figures travel with the accumulated ones
impl Serialize for GroupSummary {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("GroupSummary", 7)?;
        state.serialize_field("groupId", &self.group_id)?;
        state.serialize_field("totalBilling", &self.total_billing)?;
        state.serialize_field("totalPaid", &self.total_paid)?;
        state.serialize_field("completedTasks", &self.completed_tasks)?;
        state.serialize_field("pendingTasks", &self.pending_tasks)?;
        state.serialize_field("balanceDue", &self.balance_due())?;
        state.serialize_field("completionRate", &self.completion_rate())?;
        state.end()
    }
}

impl GroupSummary {
    fn new(group_id: Id) -> Self {
        Self {
            group_id,
            total_billing: 0.0,
            total_paid: 0.0,
            completed_tasks: 0,
            pending_tasks: 0,
        }
    }

    pub fn balance_due(&self) -> f64 {
        self.total_billing - self.total_paid
    }

    /// Completed share as a rounded whole percentage; 0 for an empty group.
    pub fn completion_rate(&self) -> u32 {
        let total = self.completed_tasks + self.pending_tasks;
        if total == 0 {
            return 0;
        }
        (f64::from(self.completed_tasks) / f64::from(total) * 100.0).round() as u32
    }
}

/// Group tasks by the chosen key within the date window.
///
/// Completion is classified on the effective status (overdue override
/// applied), compared case-insensitively against "completed" because stored
/// labels are inconsistently cased. The output carries no ordering; callers
/// sort.
pub fn summarize(
    tasks: &[Task],
    key: GroupKey,
    range: DateRange,
    today: NaiveDate,
) -> Vec<GroupSummary> {
    let mut groups: HashMap<Id, GroupSummary> = HashMap::new();

    for task in tasks {
        let Some(group_id) = key.of(task) else {
            continue;
        };
        if !range.contains(task.due_date) {
            continue;
        }

        let entry = groups
            .entry(group_id)
            .or_insert_with(|| GroupSummary::new(group_id));
        entry.total_billing += task.billing_amount.unwrap_or(0.0);
        entry.total_paid += task.paid_amount;

        let label = task.effective_status(today).to_string();
        if label.eq_ignore_ascii_case("completed") {
            entry.completed_tasks += 1;
        } else {
            entry.pending_tasks += 1;
        }
    }

    groups.into_values().collect()
}

/// Store-backed entry point for the grouped reports.
pub struct ReportService<'a, S: TaskStore> {
    store: &'a S,
}

impl<'a, S: TaskStore> ReportService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn grouped(
        &self,
        key: GroupKey,
        range: DateRange,
        today: NaiveDate,
    ) -> ServiceResult<Vec<GroupSummary>> {
        match self.store.list().await {
            Ok(tasks) => ServiceResult::success(summarize(&tasks, key, range, today)),
            Err(e) => ServiceResult::failure_with_message(e.to_string()),
        }
    }

    /// Summary for a single employee, if they have any tasks in the window.
    pub async fn for_employee(
        &self,
        employee_id: Id,
        range: DateRange,
        today: NaiveDate,
    ) -> ServiceResult<Option<GroupSummary>> {
        self.grouped(GroupKey::Employee, range, today)
            .await
            .map(|groups| groups.into_iter().find(|g| g.group_id == employee_id))
    }

    /// Summary for a single customer, if they have any tasks in the window.
    pub async fn for_customer(
        &self,
        customer_id: Id,
        range: DateRange,
        today: NaiveDate,
    ) -> ServiceResult<Option<GroupSummary>> {
        self.grouped(GroupKey::Customer, range, today)
            .await
            .map(|groups| groups.into_iter().find(|g| g.group_id == customer_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bo_models::TaskStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task_for(customer: Id, due: NaiveDate, status: TaskStatus, billing: f64, paid: f64) -> Task {
        Task::new("t", due)
            .for_customer(customer)
            .with_status(status)
            .with_billing(billing, paid)
    }

    #[test]
    fn test_null_key_tasks_contribute_nothing() {
        let today = date(2024, 6, 1);
        let tasks = vec![Task::new("orphan", today).with_billing(999.0, 0.0)];
        assert!(summarize(&tasks, GroupKey::Customer, DateRange::default(), today).is_empty());
    }

    #[test]
    fn test_accumulation_and_derived_fields() {
        let today = date(2024, 6, 1);
        let customer = Id::new_v4();
        let tasks = vec![
            task_for(customer, date(2024, 5, 1), TaskStatus::Completed, 500.0, 500.0),
            task_for(customer, date(2024, 7, 1), TaskStatus::Open, 300.0, 0.0),
        ];

        let groups = summarize(&tasks, GroupKey::Customer, DateRange::default(), today);
        assert_eq!(groups.len(), 1);
        let g = &groups[0];
        assert_eq!(g.total_billing, 800.0);
        assert_eq!(g.total_paid, 500.0);
        assert_eq!(g.completed_tasks, 1);
        assert_eq!(g.pending_tasks, 1);
        assert_eq!(g.balance_due(), 300.0);
        assert_eq!(g.completion_rate(), 50);
    }

    #[test]
    fn test_missing_billing_counts_as_zero_not_skip() {
        let today = date(2024, 6, 1);
        let customer = Id::new_v4();
        let mut unbilled = Task::new("t", date(2024, 6, 10)).for_customer(customer);
        unbilled.paid_amount = 50.0;
        let tasks = vec![
            unbilled,
            task_for(customer, date(2024, 6, 11), TaskStatus::Open, 200.0, 0.0),
        ];

        let groups = summarize(&tasks, GroupKey::Customer, DateRange::default(), today);
        assert_eq!(groups[0].total_billing, 200.0);
        assert_eq!(groups[0].total_paid, 50.0);
        assert_eq!(groups[0].pending_tasks, 2);
    }

    #[test]
    fn test_date_range_is_inclusive_on_both_ends() {
        let today = date(2024, 6, 1);
        let customer = Id::new_v4();
        let tasks = vec![
            task_for(customer, date(2024, 6, 1), TaskStatus::Open, 10.0, 0.0),
            task_for(customer, date(2024, 6, 30), TaskStatus::Open, 20.0, 0.0),
            task_for(customer, date(2024, 7, 1), TaskStatus::Open, 40.0, 0.0),
        ];
        let range = DateRange::new(Some(date(2024, 6, 1)), Some(date(2024, 6, 30)));

        let groups = summarize(&tasks, GroupKey::Customer, range, today);
        assert_eq!(groups[0].total_billing, 30.0);

        let open_ended = DateRange::new(Some(date(2024, 6, 30)), None);
        let groups = summarize(&tasks, GroupKey::Customer, open_ended, today);
        assert_eq!(groups[0].total_billing, 60.0);
    }

    #[test]
    fn test_overdue_tasks_classify_as_pending() {
        let today = date(2024, 6, 15);
        let employee = Id::new_v4();
        // past-due, stored status still Open
        let task = Task::new("late", date(2024, 6, 1))
            .assigned_to(employee)
            .with_billing(100.0, 0.0);

        let groups = summarize(&[task], GroupKey::Employee, DateRange::default(), today);
        assert_eq!(groups[0].pending_tasks, 1);
        assert_eq!(groups[0].completed_tasks, 0);
    }

    #[test]
    fn test_empty_group_rate_guard() {
        let summary = GroupSummary::new(Id::new_v4());
        assert_eq!(summary.completion_rate(), 0);
    }

    #[test]
    fn test_serialized_summary_carries_derived_fields() {
        let mut summary = GroupSummary::new(Id::new_v4());
        summary.total_billing = 1000.0;
        summary.total_paid = 400.0;
        summary.completed_tasks = 1;
        summary.pending_tasks = 1;

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["balanceDue"], 600.0);
        assert_eq!(value["completionRate"], 50);
        assert_eq!(value["totalBilling"], 1000.0);
    }
}
