//! Message builders for domain events

use bo_models::{Employee, Invoice, Task};

use crate::email::EmailMessage;

/// Email to an employee who was just assigned a task.
pub fn task_assigned(employee: &Employee, task: &Task) -> EmailMessage {
    let subject = format!("New task assigned: {}", task.title);
    let html_body = format!(
        "<p>Hello {},</p>\
         <p>You have been assigned the task <strong>{}</strong>, due {}.</p>",
        employee.full_name, task.title, task.due_date
    );
    EmailMessage::new(&employee.email, subject, html_body)
}

/// Email to a customer contact when an invoice is issued.
pub fn invoice_issued(contact_email: &str, invoice: &Invoice) -> EmailMessage {
    let subject = format!("Invoice {}", invoice.invoice_number);
    let html_body = format!(
        "<p>Invoice <strong>{}</strong> dated {} has been issued.</p>\
         <p>Total: {:.2}, paid: {:.2}, balance: {:.2}.</p>",
        invoice.invoice_number,
        invoice.invoice_date,
        invoice.total_amount,
        invoice.paid_amount,
        invoice.outstanding()
    );
    EmailMessage::new(contact_email, subject, html_body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_task_assigned_addresses_the_employee() {
        let employee = Employee::new("Jane Doe", "jane@x.com", "Auditor");
        let task = Task::new("Audit", NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        let message = task_assigned(&employee, &task);
        assert_eq!(message.to, "jane@x.com");
        assert!(message.subject.contains("Audit"));
        assert!(message.html_body.contains("Jane Doe"));
    }
}
