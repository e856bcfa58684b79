//! Report scenarios run against the in-memory store through the real write
//! services, so the overdue override and billing seeding feed the numbers the
//! reports see.

use bo_models::{Customer, Employee, Task, TaskStatus};
use bo_reports::{DashboardService, DateRange, GroupKey, ReportService};
use bo_services::{CreateEmployeeService, CreateTaskService, TaskParams};
use bo_store::{EntityStore, MemoryStore};
use chrono::{Duration, Utc};

#[tokio::test]
async fn overdue_task_reports_jane_balance() {
    let store = MemoryStore::new();
    let today = Utc::now().date_naive();

    let jane = CreateEmployeeService::new(&store)
        .call(Employee::new("Jane Doe", "jane@x.com", "Auditor"))
        .await
        .into_value()
        .unwrap();
    let jane_id = jane.id.unwrap();

    let task = CreateTaskService::new(&store)
        .call(
            TaskParams::new()
                .with_title("Audit")
                .with_due_date(today - Duration::days(1))
                .with_status(TaskStatus::Open)
                .assigned_to(jane_id)
                .with_billing(1000.0, 400.0),
        )
        .await
        .into_value()
        .unwrap();

    // the caller said Open; the store said Overdue
    let fetched: Task = store.get(task.id.unwrap()).await.unwrap().unwrap();
    assert_eq!(fetched.status, TaskStatus::Overdue);
    assert_eq!(fetched.effective_status(today), TaskStatus::Overdue);

    let summary = ReportService::new(&store)
        .for_employee(jane_id, DateRange::default(), today)
        .await
        .into_value()
        .unwrap()
        .expect("jane has a group");
    assert_eq!(summary.balance_due(), 600.0);
    assert_eq!(summary.pending_tasks, 1);
}

#[tokio::test]
async fn customer_group_accumulates_mixed_statuses() {
    let store = MemoryStore::new();
    let today = Utc::now().date_naive();

    let customer = store
        .create(Customer::new("Acme Corp", "Wile E.", "wile@acme.example"))
        .await
        .unwrap();
    let customer_id = customer.id.unwrap();

    let service = CreateTaskService::new(&store);
    service
        .call(
            TaskParams::new()
                .with_title("Done work")
                .with_due_date(today - Duration::days(3))
                .with_status(TaskStatus::Completed)
                .for_customer(customer_id)
                .with_billing(500.0, 500.0),
        )
        .await
        .into_value()
        .unwrap();
    service
        .call(
            TaskParams::new()
                .with_title("Open work")
                .with_due_date(today + Duration::days(14))
                .with_status(TaskStatus::Open)
                .for_customer(customer_id)
                .with_billing(300.0, 0.0),
        )
        .await
        .into_value()
        .unwrap();

    let groups = ReportService::new(&store)
        .grouped(GroupKey::Customer, DateRange::default(), today)
        .await
        .into_value()
        .unwrap();
    assert_eq!(groups.len(), 1);
    let g = &groups[0];
    assert_eq!(g.group_id, customer_id);
    assert_eq!(g.total_billing, 800.0);
    assert_eq!(g.total_paid, 500.0);
    assert_eq!(g.completed_tasks, 1);
    assert_eq!(g.pending_tasks, 1);
    assert_eq!(g.completion_rate(), 50);
}

#[tokio::test]
async fn dashboard_counts_every_collection_independently() {
    let store = MemoryStore::new();
    let today = Utc::now().date_naive();

    store
        .create(Employee::new("Jane Doe", "jane@x.com", "Auditor"))
        .await
        .unwrap();
    let customer = store
        .create(Customer::new("Acme Corp", "Wile E.", "wile@acme.example"))
        .await
        .unwrap();
    let customer_id = customer.id.unwrap();

    let service = CreateTaskService::new(&store);
    for (status, due) in [
        (TaskStatus::InProgress, today + Duration::days(5)),
        (TaskStatus::Completed, today - Duration::days(5)),
        (TaskStatus::Open, today + Duration::days(5)),
    ] {
        service
            .call(
                TaskParams::new()
                    .with_title("work")
                    .with_due_date(due)
                    .with_status(status)
                    .for_customer(customer_id),
            )
            .await
            .into_value()
            .unwrap();
    }

    let invoice = bo_models::Invoice::new("INV-1", today, customer_id).with_amounts(900.0, 250.0);
    store.create(invoice).await.unwrap();

    let stats = DashboardService::new(&store, &store, &store, &store)
        .stats(today)
        .await
        .into_value()
        .unwrap();
    assert_eq!(stats.employee_count, 1);
    assert_eq!(stats.customer_count, 1);
    assert_eq!(stats.tasks_in_progress, 1);
    assert_eq!(stats.tasks_completed, 1);
    assert_eq!(stats.invoice_count, 1);
    assert_eq!(stats.total_paid, 250.0);
    assert_eq!(stats.total_outstanding, 650.0);
}
