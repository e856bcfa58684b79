//! In-memory store backend
//!
//! The test double behind the store traits: one RwLock'd map per entity type,
//! identifiers assigned on create. Mirrors the durable backend's observable
//! behavior, including the task status side effects and the case→hearing
//! cascade.

use std::collections::HashMap;

use async_trait::async_trait;
use bo_core::Id;
use bo_models::{
    Customer, CustomerPatch, Employee, EmployeePatch, Hearing, HearingPatch, Invoice,
    InvoicePatch, LegalCase, LegalCasePatch, Payment, Task, TaskPatch,
};
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::store::{EntityStore, HearingQueries, PaymentStore, TaskQueries};

/// In-memory store over every entity type.
#[derive(Default)]
pub struct MemoryStore {
    employees: RwLock<HashMap<Id, Employee>>,
    customers: RwLock<HashMap<Id, Customer>>,
    tasks: RwLock<HashMap<Id, Task>>,
    invoices: RwLock<HashMap<Id, Invoice>>,
    payments: RwLock<HashMap<Id, Payment>>,
    cases: RwLock<HashMap<Id, LegalCase>>,
    hearings: RwLock<HashMap<Id, Hearing>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore<Employee, EmployeePatch> for MemoryStore {
    async fn get(&self, id: Id) -> StoreResult<Option<Employee>> {
        Ok(self.employees.read().await.get(&id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Employee>> {
        Ok(self.employees.read().await.values().cloned().collect())
    }

    async fn create(&self, mut record: Employee) -> StoreResult<Employee> {
        record.id = Some(Uuid::new_v4());
        record.created_at = Some(Utc::now());
        self.employees
            .write()
            .await
            .insert(record.id.unwrap(), record.clone());
        Ok(record)
    }

    async fn update(&self, id: Id, patch: EmployeePatch) -> StoreResult<Option<Employee>> {
        let mut employees = self.employees.write().await;
        Ok(employees.get_mut(&id).map(|employee| {
            patch.apply_to(employee);
            employee.clone()
        }))
    }

    async fn delete(&self, id: Id) -> StoreResult<bool> {
        Ok(self.employees.write().await.remove(&id).is_some())
    }

    async fn count(&self) -> StoreResult<i64> {
        Ok(self.employees.read().await.len() as i64)
    }
}

#[async_trait]
impl EntityStore<Customer, CustomerPatch> for MemoryStore {
    async fn get(&self, id: Id) -> StoreResult<Option<Customer>> {
        Ok(self.customers.read().await.get(&id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Customer>> {
        Ok(self.customers.read().await.values().cloned().collect())
    }

    async fn create(&self, mut record: Customer) -> StoreResult<Customer> {
        record.id = Some(Uuid::new_v4());
        record.created_at = Some(Utc::now());
        self.customers
            .write()
            .await
            .insert(record.id.unwrap(), record.clone());
        Ok(record)
    }

    async fn update(&self, id: Id, patch: CustomerPatch) -> StoreResult<Option<Customer>> {
        let mut customers = self.customers.write().await;
        Ok(customers.get_mut(&id).map(|customer| {
            patch.apply_to(customer);
            customer.clone()
        }))
    }

    async fn delete(&self, id: Id) -> StoreResult<bool> {
        Ok(self.customers.write().await.remove(&id).is_some())
    }

    async fn count(&self) -> StoreResult<i64> {
        Ok(self.customers.read().await.len() as i64)
    }
}

#[async_trait]
impl EntityStore<Task, TaskPatch> for MemoryStore {
    async fn get(&self, id: Id) -> StoreResult<Option<Task>> {
        Ok(self.tasks.read().await.get(&id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Task>> {
        Ok(self.tasks.read().await.values().cloned().collect())
    }

    async fn create(&self, mut record: Task) -> StoreResult<Task> {
        let now = Utc::now();
        record.id = Some(Uuid::new_v4());
        record.created_at = Some(now);
        // caller-supplied status is overridden when the due date is past
        record.apply_status_rules(now);
        self.tasks
            .write()
            .await
            .insert(record.id.unwrap(), record.clone());
        Ok(record)
    }

    async fn update(&self, id: Id, patch: TaskPatch) -> StoreResult<Option<Task>> {
        let mut tasks = self.tasks.write().await;
        Ok(tasks.get_mut(&id).map(|task| {
            patch.apply_to(task);
            task.apply_status_rules(Utc::now());
            task.clone()
        }))
    }

    async fn delete(&self, id: Id) -> StoreResult<bool> {
        Ok(self.tasks.write().await.remove(&id).is_some())
    }

    async fn count(&self) -> StoreResult<i64> {
        Ok(self.tasks.read().await.len() as i64)
    }
}

#[async_trait]
impl TaskQueries for MemoryStore {
    async fn find_by_employee(&self, employee_id: Id) -> StoreResult<Vec<Task>> {
        Ok(self
            .tasks
            .read()
            .await
            .values()
            .filter(|t| t.employee_id == Some(employee_id))
            .cloned()
            .collect())
    }

    async fn find_by_customer(&self, customer_id: Id) -> StoreResult<Vec<Task>> {
        Ok(self
            .tasks
            .read()
            .await
            .values()
            .filter(|t| t.customer_id == Some(customer_id))
            .cloned()
            .collect())
    }

    async fn find_unbilled(&self, customer_id: Id) -> StoreResult<Vec<Task>> {
        Ok(self
            .tasks
            .read()
            .await
            .values()
            .filter(|t| t.customer_id == Some(customer_id) && !t.is_billed())
            .cloned()
            .collect())
    }

    async fn find_by_invoice(&self, invoice_id: Id) -> StoreResult<Vec<Task>> {
        Ok(self
            .tasks
            .read()
            .await
            .values()
            .filter(|t| t.invoice_id == Some(invoice_id))
            .cloned()
            .collect())
    }

    async fn clear_employee(&self, employee_id: Id) -> StoreResult<u64> {
        let mut tasks = self.tasks.write().await;
        let mut cleared = 0;
        for task in tasks.values_mut() {
            if task.employee_id == Some(employee_id) {
                task.employee_id = None;
                cleared += 1;
            }
        }
        Ok(cleared)
    }
}

#[async_trait]
impl EntityStore<Invoice, InvoicePatch> for MemoryStore {
    async fn get(&self, id: Id) -> StoreResult<Option<Invoice>> {
        Ok(self.invoices.read().await.get(&id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Invoice>> {
        Ok(self.invoices.read().await.values().cloned().collect())
    }

    async fn create(&self, mut record: Invoice) -> StoreResult<Invoice> {
        record.id = Some(Uuid::new_v4());
        record.created_at = Some(Utc::now());
        self.invoices
            .write()
            .await
            .insert(record.id.unwrap(), record.clone());
        Ok(record)
    }

    async fn update(&self, id: Id, patch: InvoicePatch) -> StoreResult<Option<Invoice>> {
        let mut invoices = self.invoices.write().await;
        Ok(invoices.get_mut(&id).map(|invoice| {
            patch.apply_to(invoice);
            invoice.clone()
        }))
    }

    async fn delete(&self, id: Id) -> StoreResult<bool> {
        Ok(self.invoices.write().await.remove(&id).is_some())
    }

    async fn count(&self) -> StoreResult<i64> {
        Ok(self.invoices.read().await.len() as i64)
    }
}

#[async_trait]
impl PaymentStore for MemoryStore {
    async fn get(&self, id: Id) -> StoreResult<Option<Payment>> {
        Ok(self.payments.read().await.get(&id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Payment>> {
        Ok(self.payments.read().await.values().cloned().collect())
    }

    async fn create(&self, mut record: Payment) -> StoreResult<Payment> {
        record.id = Some(Uuid::new_v4());
        record.created_at = Some(Utc::now());
        self.payments
            .write()
            .await
            .insert(record.id.unwrap(), record.clone());
        Ok(record)
    }

    async fn delete(&self, id: Id) -> StoreResult<bool> {
        Ok(self.payments.write().await.remove(&id).is_some())
    }

    async fn find_by_invoice(&self, invoice_id: Id) -> StoreResult<Vec<Payment>> {
        Ok(self
            .payments
            .read()
            .await
            .values()
            .filter(|p| p.invoice_id == invoice_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl EntityStore<LegalCase, LegalCasePatch> for MemoryStore {
    async fn get(&self, id: Id) -> StoreResult<Option<LegalCase>> {
        Ok(self.cases.read().await.get(&id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<LegalCase>> {
        Ok(self.cases.read().await.values().cloned().collect())
    }

    async fn create(&self, mut record: LegalCase) -> StoreResult<LegalCase> {
        record.id = Some(Uuid::new_v4());
        record.created_at = Some(Utc::now());
        self.cases
            .write()
            .await
            .insert(record.id.unwrap(), record.clone());
        Ok(record)
    }

    async fn update(&self, id: Id, patch: LegalCasePatch) -> StoreResult<Option<LegalCase>> {
        let mut cases = self.cases.write().await;
        Ok(cases.get_mut(&id).map(|case| {
            patch.apply_to(case);
            case.clone()
        }))
    }

    async fn delete(&self, id: Id) -> StoreResult<bool> {
        let removed = self.cases.write().await.remove(&id).is_some();
        if removed {
            // the durable backend cascades via foreign key; mirror it here
            self.hearings
                .write()
                .await
                .retain(|_, hearing| hearing.case_id != id);
        }
        Ok(removed)
    }

    async fn count(&self) -> StoreResult<i64> {
        Ok(self.cases.read().await.len() as i64)
    }
}

#[async_trait]
impl EntityStore<Hearing, HearingPatch> for MemoryStore {
    async fn get(&self, id: Id) -> StoreResult<Option<Hearing>> {
        Ok(self.hearings.read().await.get(&id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Hearing>> {
        Ok(self.hearings.read().await.values().cloned().collect())
    }

    async fn create(&self, mut record: Hearing) -> StoreResult<Hearing> {
        record.id = Some(Uuid::new_v4());
        record.created_at = Some(Utc::now());
        self.hearings
            .write()
            .await
            .insert(record.id.unwrap(), record.clone());
        Ok(record)
    }

    async fn update(&self, id: Id, patch: HearingPatch) -> StoreResult<Option<Hearing>> {
        let mut hearings = self.hearings.write().await;
        Ok(hearings.get_mut(&id).map(|hearing| {
            patch.apply_to(hearing);
            hearing.clone()
        }))
    }

    async fn delete(&self, id: Id) -> StoreResult<bool> {
        Ok(self.hearings.write().await.remove(&id).is_some())
    }

    async fn count(&self) -> StoreResult<i64> {
        Ok(self.hearings.read().await.len() as i64)
    }
}

#[async_trait]
impl HearingQueries for MemoryStore {
    async fn find_by_case(&self, case_id: Id) -> StoreResult<Vec<Hearing>> {
        Ok(self
            .hearings
            .read()
            .await
            .values()
            .filter(|h| h.case_id == case_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bo_models::TaskStatus;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamp() {
        let store = MemoryStore::new();
        let employee =
            EntityStore::create(&store, Employee::new("Jane Doe", "jane@x.com", "Auditor"))
                .await
                .unwrap();
        assert!(employee.id.is_some());
        assert!(employee.created_at.is_some());
    }

    #[tokio::test]
    async fn test_update_missing_record_returns_none() {
        let store = MemoryStore::new();
        let result: Option<Employee> = store
            .update(Uuid::new_v4(), EmployeePatch::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_whether_record_existed() {
        let store = MemoryStore::new();
        let customer =
            EntityStore::create(&store, Customer::new("Acme", "Wile E.", "wile@acme.example"))
                .await
                .unwrap();
        let id = customer.id.unwrap();

        assert!(EntityStore::<Customer, CustomerPatch>::delete(&store, id)
            .await
            .unwrap());
        assert!(!EntityStore::<Customer, CustomerPatch>::delete(&store, id)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_task_create_forces_overdue_for_past_due_date() {
        let store = MemoryStore::new();
        let yesterday = Utc::now().date_naive() - Duration::days(1);
        let task = EntityStore::create(
            &store,
            Task::new("Audit", yesterday).with_status(TaskStatus::Open),
        )
        .await
        .unwrap();
        assert_eq!(task.status, TaskStatus::Overdue);
    }

    #[tokio::test]
    async fn test_task_update_rechecks_overdue_on_due_date_write() {
        let store = MemoryStore::new();
        let tomorrow = Utc::now().date_naive() + Duration::days(1);
        let task = EntityStore::create(&store, Task::new("Audit", tomorrow))
            .await
            .unwrap();
        assert_eq!(task.status, TaskStatus::Open);

        let yesterday = Utc::now().date_naive() - Duration::days(1);
        let patch = TaskPatch {
            due_date: Some(yesterday),
            ..Default::default()
        };
        let updated = store.update(task.id.unwrap(), patch).await.unwrap().unwrap();
        assert_eq!(updated.status, TaskStatus::Overdue);
    }

    #[tokio::test]
    async fn test_task_completion_stamps_once() {
        let store = MemoryStore::new();
        let tomorrow = Utc::now().date_naive() + Duration::days(1);
        let task = EntityStore::create(&store, Task::new("Audit", tomorrow))
            .await
            .unwrap();
        let id = task.id.unwrap();

        let completed = store
            .update(id, TaskPatch::status(TaskStatus::Completed))
            .await
            .unwrap()
            .unwrap();
        let stamp = completed.completed_at.unwrap();

        // a second update that keeps the task completed must not move the stamp
        let touched = store
            .update(
                id,
                TaskPatch {
                    title: Some("Audit Q2".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(touched.completed_at, Some(stamp));
        assert_eq!(touched.status, TaskStatus::Completed);
    }

    #[tokio::test]
    async fn test_unbilled_pool_excludes_invoiced_tasks() {
        let store = MemoryStore::new();
        let customer_id = Uuid::new_v4();
        let tomorrow = Utc::now().date_naive() + Duration::days(1);

        let billed = EntityStore::create(
            &store,
            Task::new("Billed", tomorrow).for_customer(customer_id),
        )
        .await
        .unwrap();
        EntityStore::create(
            &store,
            Task::new("Unbilled", tomorrow).for_customer(customer_id),
        )
        .await
        .unwrap();
        store
            .update(billed.id.unwrap(), TaskPatch::link_invoice(Uuid::new_v4()))
            .await
            .unwrap();

        let unbilled = store.find_unbilled(customer_id).await.unwrap();
        assert_eq!(unbilled.len(), 1);
        assert_eq!(unbilled[0].title, "Unbilled");
    }

    #[tokio::test]
    async fn test_clear_employee_unassigns_all_tasks() {
        let store = MemoryStore::new();
        let employee_id = Uuid::new_v4();
        let tomorrow = Utc::now().date_naive() + Duration::days(1);

        for i in 0..3 {
            EntityStore::create(
                &store,
                Task::new(format!("Task {i}"), tomorrow).assigned_to(employee_id),
            )
            .await
            .unwrap();
        }

        let cleared = store.clear_employee(employee_id).await.unwrap();
        assert_eq!(cleared, 3);
        assert!(store.find_by_employee(employee_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_case_delete_cascades_hearings() {
        let store = MemoryStore::new();
        let case = EntityStore::create(&store, LegalCase::new("C-100", "High Court"))
            .await
            .unwrap();
        let case_id = case.id.unwrap();
        EntityStore::create(&store, Hearing::new(case_id, Utc::now().date_naive()))
            .await
            .unwrap();

        assert!(
            EntityStore::<LegalCase, LegalCasePatch>::delete(&store, case_id)
                .await
                .unwrap()
        );
        assert!(store.find_by_case(case_id).await.unwrap().is_empty());
    }
}
