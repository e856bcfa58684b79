//! System-wide dashboard counters
//!
//! Each figure is an independent scan over its own collection, not a
//! derivation of the grouped reports.

use bo_core::ServiceResult;
use bo_store::{CustomerStore, EmployeeStore, InvoiceStore, TaskStore};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::instrument;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub employee_count: i64,
    pub customer_count: i64,
    pub tasks_in_progress: u32,
    pub tasks_completed: u32,
    pub invoice_count: i64,
    pub total_paid: f64,
    pub total_outstanding: f64,
}

pub struct DashboardService<'a, E, C, T, I>
where
    E: EmployeeStore,
    C: CustomerStore,
    T: TaskStore,
    I: InvoiceStore,
{
    employees: &'a E,
    customers: &'a C,
    tasks: &'a T,
    invoices: &'a I,
}

impl<'a, E, C, T, I> DashboardService<'a, E, C, T, I>
where
    E: EmployeeStore,
    C: CustomerStore,
    T: TaskStore,
    I: InvoiceStore,
{
    pub fn new(employees: &'a E, customers: &'a C, tasks: &'a T, invoices: &'a I) -> Self {
        Self {
            employees,
            customers,
            tasks,
            invoices,
        }
    }

    #[instrument(skip(self))]
    pub async fn stats(&self, today: NaiveDate) -> ServiceResult<DashboardStats> {
        let employee_count = match self.employees.count().await {
            Ok(n) => n,
            Err(e) => return ServiceResult::failure_with_message(e.to_string()),
        };
        let customer_count = match self.customers.count().await {
            Ok(n) => n,
            Err(e) => return ServiceResult::failure_with_message(e.to_string()),
        };
        let tasks = match self.tasks.list().await {
            Ok(tasks) => tasks,
            Err(e) => return ServiceResult::failure_with_message(e.to_string()),
        };
        let invoices = match self.invoices.list().await {
            Ok(invoices) => invoices,
            Err(e) => return ServiceResult::failure_with_message(e.to_string()),
        };

        let mut tasks_in_progress = 0;
        let mut tasks_completed = 0;
        for task in &tasks {
            let label = task.effective_status(today).to_string();
            if label.eq_ignore_ascii_case("in progress") {
                tasks_in_progress += 1;
            } else if label.eq_ignore_ascii_case("completed") {
                tasks_completed += 1;
            }
        }

        let invoice_count = invoices.len() as i64;
        let total_paid: f64 = invoices.iter().map(|i| i.paid_amount).sum();
        let total_outstanding: f64 = invoices.iter().map(|i| i.outstanding()).sum();

        ServiceResult::success(DashboardStats {
            employee_count,
            customer_count,
            tasks_in_progress,
            tasks_completed,
            invoice_count,
            total_paid,
            total_outstanding,
        })
    }
}
