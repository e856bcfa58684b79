//! Task create and update services
//!
//! Validation is a pre-store gate: a task that fails field validation never
//! reaches the store. The overdue override itself is a store-side contract,
//! applied on every write regardless of which service issued it.

use bo_core::config::ValidationRules;
use bo_core::{Id, ServiceResult, ValidationErrors};
use bo_models::{validate_record, Priority, Task, TaskPatch, TaskStatus};
use bo_store::TaskStore;
use chrono::NaiveDate;
use tracing::instrument;

/// Builder-style input for task creation.
#[derive(Debug, Clone, Default)]
pub struct TaskParams {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
    pub employee_id: Option<Id>,
    pub customer_id: Option<Id>,
    pub billing_amount: Option<f64>,
    pub paid_amount: Option<f64>,
}

impl TaskParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
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
        self.paid_amount = Some(paid_amount);
        self
    }

    fn into_task(self) -> Result<Task, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.title.as_deref().map_or(true, |t| t.trim().is_empty()) {
            errors.add("title", "can't be blank");
        }
        if self.due_date.is_none() {
            errors.add("due_date", "can't be blank");
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let mut task = Task::new(self.title.unwrap(), self.due_date.unwrap());
        task.description = self.description;
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        task.employee_id = self.employee_id;
        task.customer_id = self.customer_id;
        task.billing_amount = self.billing_amount;
        task.paid_amount = self.paid_amount.unwrap_or(0.0);
        Ok(task)
    }
}

fn check_overpayment(task: &Task, rules: &ValidationRules, errors: &mut ValidationErrors) {
    if rules.forbid_overpayment {
        if let Some(billing) = task.billing_amount {
            if task.paid_amount > billing {
                errors.add("paid_amount", "can't exceed the billing amount");
            }
        }
    }
}

/// Service for creating tasks
pub struct CreateTaskService<'a, S: TaskStore> {
    store: &'a S,
    rules: ValidationRules,
}

impl<'a, S: TaskStore> CreateTaskService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            rules: ValidationRules::default(),
        }
    }

    pub fn with_rules(mut self, rules: ValidationRules) -> Self {
        self.rules = rules;
        self
    }

    #[instrument(skip(self, params))]
    pub async fn call(&self, params: TaskParams) -> ServiceResult<Task> {
        let task = match params.into_task() {
            Ok(task) => task,
            Err(errors) => return ServiceResult::failure(errors),
        };

        let mut errors = match validate_record(&task) {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        check_overpayment(&task, &self.rules, &mut errors);
        if !errors.is_empty() {
            return ServiceResult::failure(errors);
        }

        match self.store.create(task).await {
            Ok(created) => ServiceResult::success(created),
            Err(e) => ServiceResult::failure_with_message(e.to_string()),
        }
    }
}

/// Service for updating tasks
pub struct UpdateTaskService<'a, S: TaskStore> {
    store: &'a S,
    rules: ValidationRules,
}

impl<'a, S: TaskStore> UpdateTaskService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            rules: ValidationRules::default(),
        }
    }

    pub fn with_rules(mut self, rules: ValidationRules) -> Self {
        self.rules = rules;
        self
    }

    #[instrument(skip(self, patch))]
    pub async fn call(&self, id: Id, patch: TaskPatch) -> ServiceResult<Task> {
        let existing = match self.store.get(id).await {
            Ok(Some(task)) => task,
            Ok(None) => {
                return ServiceResult::failure_with_message(format!("Task not found: {id}"))
            }
            Err(e) => return ServiceResult::failure_with_message(e.to_string()),
        };

        // validate against the merged record before anything is written
        let mut merged = existing.clone();
        patch.apply_to(&mut merged);
        let mut errors = match validate_record(&merged) {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        check_overpayment(&merged, &self.rules, &mut errors);
        if !errors.is_empty() {
            return ServiceResult::failure(errors);
        }

        match self.store.update(id, patch).await {
            Ok(Some(updated)) => ServiceResult::success(updated),
            Ok(None) => ServiceResult::failure_with_message(format!("Task not found: {id}")),
            Err(e) => ServiceResult::failure_with_message(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bo_store::MemoryStore;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_create_requires_title_and_due_date() {
        let store = MemoryStore::new();
        let service = CreateTaskService::new(&store);
        let result = service.call(TaskParams::new()).await;
        assert!(result.is_failure());
        assert!(result.errors.has_error("title"));
        assert!(result.errors.has_error("due_date"));
    }

    #[tokio::test]
    async fn test_create_rejects_negative_billing() {
        let store = MemoryStore::new();
        let service = CreateTaskService::new(&store);
        let params = TaskParams::new()
            .with_title("Audit")
            .with_due_date(Utc::now().date_naive())
            .with_billing(-5.0, 0.0);
        let result = service.call(params).await;
        assert!(result.is_failure());
        assert!(result.errors.has_error("billing_amount"));
    }

    #[tokio::test]
    async fn test_overpayment_allowed_unless_forbidden() {
        let store = MemoryStore::new();
        let due = Utc::now().date_naive() + Duration::days(7);
        let params = TaskParams::new()
            .with_title("Audit")
            .with_due_date(due)
            .with_billing(100.0, 150.0);

        let permissive = CreateTaskService::new(&store);
        assert!(permissive.call(params.clone()).await.is_success());

        let strict = CreateTaskService::new(&store).with_rules(ValidationRules {
            forbid_overpayment: true,
        });
        let result = strict.call(params).await;
        assert!(result.is_failure());
        assert!(result.errors.has_error("paid_amount"));
    }

    #[tokio::test]
    async fn test_create_overrides_stale_status() {
        let store = MemoryStore::new();
        let yesterday = Utc::now().date_naive() - Duration::days(1);
        let service = CreateTaskService::new(&store);
        let result = service
            .call(
                TaskParams::new()
                    .with_title("Audit")
                    .with_due_date(yesterday)
                    .with_status(TaskStatus::InProgress),
            )
            .await;
        assert_eq!(result.value().unwrap().status, TaskStatus::Overdue);
    }

    #[tokio::test]
    async fn test_update_missing_task_reports_not_found() {
        let store = MemoryStore::new();
        let service = UpdateTaskService::new(&store);
        let result = service
            .call(uuid::Uuid::new_v4(), TaskPatch::default())
            .await;
        assert!(result.is_failure());
        assert!(result.errors.full_messages()[0].contains("not found"));
    }
}
