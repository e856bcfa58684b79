//! Notification hooks for write-side events
//!
//! Sending is best-effort and happens after the store write has committed;
//! a mail failure never unwinds the write it announces.

use bo_core::ServiceResult;
use bo_models::{Invoice, Task};
use bo_notifications::{mailer::validate_recipient, messages, Mailer};
use bo_store::{CustomerStore, EmployeeStore};
use tracing::{info, instrument};

/// Tell the assigned employee about their task.
///
/// A task without an assignee is a successful no-op.
#[instrument(skip_all, fields(task_id = ?task.id))]
pub async fn notify_assignment<E: EmployeeStore>(
    employees: &E,
    mailer: &dyn Mailer,
    task: &Task,
) -> ServiceResult<()> {
    let employee_id = match task.employee_id {
        Some(id) => id,
        None => return ServiceResult::success(()),
    };

    let employee = match employees.get(employee_id).await {
        Ok(Some(employee)) => employee,
        Ok(None) => {
            return ServiceResult::failure_with_message(format!(
                "Employee not found: {employee_id}"
            ))
        }
        Err(e) => return ServiceResult::failure_with_message(e.to_string()),
    };

    if let Err(e) = validate_recipient(&employee.email) {
        return ServiceResult::failure_with_message(e.to_string());
    }

    let message = messages::task_assigned(&employee, task);
    match mailer
        .send(&message.to, &message.subject, &message.html_body)
        .await
    {
        Ok(()) => {
            info!(to = %message.to, "assignment notification sent");
            ServiceResult::success(())
        }
        Err(e) => ServiceResult::failure_with_message(e.to_string()),
    }
}

/// Tell the invoice's customer contact that an invoice was issued.
#[instrument(skip_all, fields(invoice_id = ?invoice.id))]
pub async fn notify_invoice_issued<C: CustomerStore>(
    customers: &C,
    mailer: &dyn Mailer,
    invoice: &Invoice,
) -> ServiceResult<()> {
    let customer = match customers.get(invoice.customer_id).await {
        Ok(Some(customer)) => customer,
        Ok(None) => {
            return ServiceResult::failure_with_message(format!(
                "Customer not found: {}",
                invoice.customer_id
            ))
        }
        Err(e) => return ServiceResult::failure_with_message(e.to_string()),
    };

    if let Err(e) = validate_recipient(&customer.email) {
        return ServiceResult::failure_with_message(e.to_string());
    }

    let message = messages::invoice_issued(&customer.email, invoice);
    match mailer
        .send(&message.to, &message.subject, &message.html_body)
        .await
    {
        Ok(()) => ServiceResult::success(()),
        Err(e) => ServiceResult::failure_with_message(e.to_string()),
    }
}
