//! Billing sagas
//!
//! Converting a task to an invoice and recording a payment are both two
//! store writes with no surrounding transaction. When the second write
//! fails the first is NOT undone; the result's step trail says exactly
//! which writes landed so the caller can reconcile.

use bo_core::{Id, ServiceResult, StepOutcome};
use bo_models::{validate_record, Invoice, InvoicePatch, Payment, Task, TaskPatch};
use bo_store::{InvoiceStore, PaymentStore, TaskStore};
use chrono::NaiveDate;
use tracing::{info, instrument, warn};

/// Convert a billable task into an invoice.
///
/// Preconditions: the task exists, has a customer, and has not been billed
/// before. Billing is one-way; once `invoice_id` is set the task never
/// re-enters the unbilled pool.
pub struct BillTaskService<'a, T: TaskStore, I: InvoiceStore> {
    tasks: &'a T,
    invoices: &'a I,
}

impl<'a, T: TaskStore, I: InvoiceStore> BillTaskService<'a, T, I> {
    pub fn new(tasks: &'a T, invoices: &'a I) -> Self {
        Self { tasks, invoices }
    }

    #[instrument(skip(self, invoice_number), fields(invoice_number = %invoice_number.as_ref()))]
    pub async fn call(
        &self,
        task_id: Id,
        invoice_number: impl AsRef<str>,
        invoice_date: NaiveDate,
    ) -> ServiceResult<Invoice> {
        let task = match self.tasks.get(task_id).await {
            Ok(Some(task)) => task,
            Ok(None) => {
                return ServiceResult::failure_with_message(format!("Task not found: {task_id}"))
            }
            Err(e) => return ServiceResult::failure_with_message(e.to_string()),
        };

        let customer_id = match task.customer_id {
            Some(id) => id,
            None => {
                return ServiceResult::failure_with_message(
                    "Task has no customer and cannot be billed",
                )
            }
        };
        if task.is_billed() {
            return ServiceResult::failure_with_message("Task has already been billed");
        }

        let invoice = Invoice::new(invoice_number.as_ref(), invoice_date, customer_id)
            .with_amounts(task.billing_amount.unwrap_or(0.0), task.paid_amount);
        if let Err(errors) = validate_record(&invoice) {
            return ServiceResult::failure(errors);
        }

        let created = match self.invoices.create(invoice).await {
            Ok(created) => created,
            Err(e) => {
                return ServiceResult::failure_with_message(e.to_string())
                    .with_step(StepOutcome::failed("create invoice", e.to_string()));
            }
        };
        let invoice_id = match created.id {
            Some(id) => id,
            None => {
                return ServiceResult::failure_with_message("store returned invoice without id")
            }
        };
        info!(%task_id, %invoice_id, "invoice created from task");

        match self.tasks.update(task_id, TaskPatch::link_invoice(invoice_id)).await {
            Ok(Some(_)) => ServiceResult::success(created)
                .with_step(StepOutcome::ok("create invoice"))
                .with_step(StepOutcome::ok("link task")),
            Ok(None) => {
                warn!(%task_id, %invoice_id, "task vanished after invoice creation; invoice is orphaned");
                ServiceResult::failure_with_message(format!(
                    "Invoice {invoice_id} was created but task {task_id} no longer exists"
                ))
                .with_step(StepOutcome::ok("create invoice"))
                .with_step(StepOutcome::failed("link task", "task not found"))
            }
            Err(e) => {
                warn!(%task_id, %invoice_id, error = %e, "task link failed; invoice is orphaned");
                ServiceResult::failure_with_message(format!(
                    "Invoice {invoice_id} was created but could not be linked to the task: {e}"
                ))
                .with_step(StepOutcome::ok("create invoice"))
                .with_step(StepOutcome::failed("link task", e.to_string()))
            }
        }
    }
}

/// Record a payment against an invoice and accrue it onto the invoice's
/// paid amount.
pub struct RecordPaymentService<'a, P: PaymentStore, I: InvoiceStore> {
    payments: &'a P,
    invoices: &'a I,
}

impl<'a, P: PaymentStore, I: InvoiceStore> RecordPaymentService<'a, P, I> {
    pub fn new(payments: &'a P, invoices: &'a I) -> Self {
        Self { payments, invoices }
    }

    #[instrument(skip(self, payment), fields(invoice_id = %payment.invoice_id))]
    pub async fn call(&self, payment: Payment) -> ServiceResult<Payment> {
        if let Err(errors) = validate_record(&payment) {
            return ServiceResult::failure(errors);
        }

        let invoice = match self.invoices.get(payment.invoice_id).await {
            Ok(Some(invoice)) => invoice,
            Ok(None) => {
                return ServiceResult::failure_with_message(format!(
                    "Invoice not found: {}",
                    payment.invoice_id
                ))
            }
            Err(e) => return ServiceResult::failure_with_message(e.to_string()),
        };
        let invoice_id = payment.invoice_id;

        let recorded = match self.payments.create(payment).await {
            Ok(recorded) => recorded,
            Err(e) => {
                return ServiceResult::failure_with_message(e.to_string())
                    .with_step(StepOutcome::failed("record payment", e.to_string()));
            }
        };

        let patch = InvoicePatch {
            paid_amount: Some(invoice.paid_amount + recorded.amount),
            ..Default::default()
        };
        match self.invoices.update(invoice_id, patch).await {
            Ok(Some(_)) => ServiceResult::success(recorded)
                .with_step(StepOutcome::ok("record payment"))
                .with_step(StepOutcome::ok("accrue paid amount")),
            Ok(None) => {
                warn!(%invoice_id, "invoice vanished before paid-amount accrual");
                ServiceResult::failure_with_message(format!(
                    "Payment was recorded but invoice {invoice_id} no longer exists"
                ))
                .with_step(StepOutcome::ok("record payment"))
                .with_step(StepOutcome::failed("accrue paid amount", "invoice not found"))
            }
            Err(e) => {
                warn!(%invoice_id, error = %e, "paid-amount accrual failed; payment stands");
                ServiceResult::failure_with_message(format!(
                    "Payment was recorded but the invoice paid amount was not updated: {e}"
                ))
                .with_step(StepOutcome::ok("record payment"))
                .with_step(StepOutcome::failed("accrue paid amount", e.to_string()))
            }
        }
    }
}

/// Linked tasks for an invoice, discovered through `tasks.invoice_id`.
pub async fn invoice_tasks<T: TaskStore>(tasks: &T, invoice_id: Id) -> ServiceResult<Vec<Task>> {
    match tasks.find_by_invoice(invoice_id).await {
        Ok(found) => ServiceResult::success(found),
        Err(e) => ServiceResult::failure_with_message(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::{BillTaskService, RecordPaymentService};
    use bo_core::Id;
    use bo_models::{Customer, Invoice, Payment, PaymentMethod, Task};
    use bo_store::{EntityStore, MemoryStore, TaskQueries};
    use chrono::{Duration, Utc};

    async fn seed_task(store: &MemoryStore) -> (Id, Id) {
        let customer = store
            .create(Customer::new("Acme Corp", "Wile E.", "wile@acme.example"))
            .await
            .unwrap();
        let customer_id = customer.id.unwrap();

        let due = Utc::now().date_naive() + Duration::days(7);
        let task = store
            .create(
                Task::new("Quarterly filing", due)
                    .for_customer(customer_id)
                    .with_billing(800.0, 200.0),
            )
            .await
            .unwrap();
        (task.id.unwrap(), customer_id)
    }

    #[tokio::test]
    async fn test_billing_links_task_and_seeds_amounts() {
        let store = MemoryStore::new();
        let (task_id, customer_id) = seed_task(&store).await;
        let date = Utc::now().date_naive();

        let result = BillTaskService::new(&store, &store)
            .call(task_id, "INV-7", date)
            .await;
        assert!(result.is_success());
        let invoice = result.into_value().unwrap();
        assert_eq!(invoice.customer_id, customer_id);
        assert_eq!(invoice.total_amount, 800.0);
        assert_eq!(invoice.paid_amount, 200.0);

        let task: Task = store.get(task_id).await.unwrap().unwrap();
        assert_eq!(task.invoice_id, invoice.id);
        // the task has left the unbilled pool
        assert!(store.find_unbilled(customer_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_double_billing_is_rejected() {
        let store = MemoryStore::new();
        let (task_id, _) = seed_task(&store).await;
        let date = Utc::now().date_naive();

        let service = BillTaskService::new(&store, &store);
        assert!(service.call(task_id, "INV-1", date).await.is_success());
        let second = service.call(task_id, "INV-2", date).await;
        assert!(second.is_failure());
        assert_eq!(
            second.errors.full_messages(),
            vec!["Task has already been billed".to_string()]
        );
    }

    #[tokio::test]
    async fn test_task_without_customer_cannot_be_billed() {
        let store = MemoryStore::new();
        let due = Utc::now().date_naive() + Duration::days(1);
        let task = store.create(Task::new("Internal chore", due)).await.unwrap();

        let result = BillTaskService::new(&store, &store)
            .call(task.id.unwrap(), "INV-9", Utc::now().date_naive())
            .await;
        assert!(result.is_failure());
    }

    #[tokio::test]
    async fn test_payment_accrues_onto_invoice() {
        let store = MemoryStore::new();
        let (task_id, _) = seed_task(&store).await;
        let date = Utc::now().date_naive();
        let invoice = BillTaskService::new(&store, &store)
            .call(task_id, "INV-7", date)
            .await
            .into_value()
            .unwrap();
        let invoice_id = invoice.id.unwrap();

        let result = RecordPaymentService::new(&store, &store)
            .call(Payment::new(invoice_id, date, 300.0, PaymentMethod::BankTransfer))
            .await;
        assert!(result.is_success());
        assert_eq!(result.steps.len(), 2);

        let invoice: Invoice = store.get(invoice_id).await.unwrap().unwrap();
        assert_eq!(invoice.paid_amount, 500.0);
        assert_eq!(invoice.outstanding(), 300.0);
    }

    #[tokio::test]
    async fn test_payment_against_unknown_invoice_is_rejected() {
        let store = MemoryStore::new();
        let result = RecordPaymentService::new(&store, &store)
            .call(Payment::new(
                Id::new_v4(),
                Utc::now().date_naive(),
                50.0,
                PaymentMethod::Cash,
            ))
            .await;
        assert!(result.is_failure());
        assert!(result.steps.is_empty());
    }
}
