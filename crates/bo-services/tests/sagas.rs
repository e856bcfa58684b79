//! End-to-end saga behavior over the in-memory store: confirmed and
//! unconfirmed employee deletion, task-to-invoice conversion, and payment
//! accrual, each checked for the exact partial state left behind.

use bo_models::{Customer, Employee, Payment, PaymentMethod, Task, TaskStatus};
use bo_services::{
    notify_assignment, BillTaskService, DeleteEmployeeService, RecordPaymentService, TaskParams,
};
use bo_store::{EntityStore, MemoryStore, TaskQueries};
use chrono::{Duration, Utc};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;

async fn employee(store: &MemoryStore) -> Employee {
    let name: String = Name().fake();
    store
        .create(Employee::new(name, SafeEmail().fake::<String>(), "Associate"))
        .await
        .unwrap()
}

async fn customer(store: &MemoryStore) -> Customer {
    let company: String = CompanyName().fake();
    store
        .create(Customer::new(
            company,
            Name().fake::<String>(),
            SafeEmail().fake::<String>(),
        ))
        .await
        .unwrap()
}

#[tokio::test]
async fn unconfirmed_employee_deletion_leaves_everything_in_place() {
    let store = MemoryStore::new();
    let employee = employee(&store).await;
    let employee_id = employee.id.unwrap();

    let due = Utc::now().date_naive() + Duration::days(5);
    let task = store
        .create(Task::new("Prepare filing", due).assigned_to(employee_id))
        .await
        .unwrap();

    let service = DeleteEmployeeService::new(&store, &store);
    let result = service.call(employee_id, false).await;
    assert!(result.is_failure());
    assert!(result.steps.is_empty());
    assert!(result.errors.full_messages()[0].contains("1 task"));

    // the abort had no side effects
    let still_there: Option<Employee> = store.get(employee_id).await.unwrap();
    assert!(still_there.is_some());
    let task: Task = store.get(task.id.unwrap()).await.unwrap().unwrap();
    assert_eq!(task.employee_id, Some(employee_id));
}

#[tokio::test]
async fn confirmed_employee_deletion_unassigns_every_task_first() {
    let store = MemoryStore::new();
    let employee = employee(&store).await;
    let employee_id = employee.id.unwrap();

    let due = Utc::now().date_naive() + Duration::days(5);
    let mut task_ids = Vec::new();
    for i in 0..3 {
        let task = store
            .create(Task::new(format!("Task {i}"), due).assigned_to(employee_id))
            .await
            .unwrap();
        task_ids.push(task.id.unwrap());
    }

    let service = DeleteEmployeeService::new(&store, &store);
    let result = service.call(employee_id, true).await;
    assert!(result.is_success());
    assert!(result.steps.iter().all(|s| s.success));

    let gone: Option<Employee> = store.get(employee_id).await.unwrap();
    assert!(gone.is_none());
    for task_id in task_ids {
        let task: Task = store.get(task_id).await.unwrap().unwrap();
        assert!(task.employee_id.is_none());
    }
}

#[tokio::test]
async fn billing_then_payment_settles_the_invoice() {
    let store = MemoryStore::new();
    let customer = customer(&store).await;
    let customer_id = customer.id.unwrap();
    let today = Utc::now().date_naive();

    let task = store
        .create(
            Task::new("Contract review", today + Duration::days(10))
                .for_customer(customer_id)
                .with_billing(1000.0, 400.0),
        )
        .await
        .unwrap();
    let task_id = task.id.unwrap();

    let invoice = BillTaskService::new(&store, &store)
        .call(task_id, "INV-2024-0001", today)
        .await
        .into_value()
        .unwrap();
    let invoice_id = invoice.id.unwrap();
    assert_eq!(invoice.outstanding(), 600.0);

    // linkage is discoverable from both sides
    let linked = store.find_by_invoice(invoice_id).await.unwrap();
    assert_eq!(linked.len(), 1);
    assert_eq!(linked[0].id, Some(task_id));
    assert!(store.find_unbilled(customer_id).await.unwrap().is_empty());

    let payments = RecordPaymentService::new(&store, &store);
    payments
        .call(Payment::new(invoice_id, today, 600.0, PaymentMethod::BankTransfer))
        .await
        .into_value()
        .unwrap();

    let settled: bo_models::Invoice = store.get(invoice_id).await.unwrap().unwrap();
    assert_eq!(settled.paid_amount, 1000.0);
    assert_eq!(settled.outstanding(), 0.0);
}

#[tokio::test]
async fn create_task_notifies_the_assignee() {
    let store = MemoryStore::new();
    let mailer = bo_notifications::LogMailer::new();
    let employee = employee(&store).await;

    let due = Utc::now().date_naive() + Duration::days(2);
    let task = bo_services::CreateTaskService::new(&store)
        .call(
            TaskParams::new()
                .with_title("Draft response")
                .with_due_date(due)
                .with_status(TaskStatus::Open)
                .assigned_to(employee.id.unwrap()),
        )
        .await
        .into_value()
        .unwrap();

    let result = notify_assignment(&store, &mailer, &task).await;
    assert!(result.is_success());
    let sent = mailer.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, employee.email);
}
