//! Employee services
//!
//! Deletion is the interesting one: an employee referenced by tasks may only
//! be removed after the caller explicitly confirms the bulk unassignment.
//! Unassign-then-delete is two independent writes, not a transaction; the
//! step trail on the result records how far the sequence got.

use bo_core::{Id, ServiceResult, StepOutcome};
use bo_models::{validate_record, Employee, EmployeePatch};
use bo_store::{EmployeeStore, TaskStore};
use tracing::{info, instrument, warn};

/// Service for creating employees
pub struct CreateEmployeeService<'a, S: EmployeeStore> {
    store: &'a S,
}

impl<'a, S: EmployeeStore> CreateEmployeeService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn call(&self, employee: Employee) -> ServiceResult<Employee> {
        if let Err(errors) = validate_record(&employee) {
            return ServiceResult::failure(errors);
        }
        match self.store.create(employee).await {
            Ok(created) => ServiceResult::success(created),
            Err(e) => ServiceResult::failure_with_message(e.to_string()),
        }
    }
}

/// Service for updating employees
pub struct UpdateEmployeeService<'a, S: EmployeeStore> {
    store: &'a S,
}

impl<'a, S: EmployeeStore> UpdateEmployeeService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn call(&self, id: Id, patch: EmployeePatch) -> ServiceResult<Employee> {
        let existing = match self.store.get(id).await {
            Ok(Some(employee)) => employee,
            Ok(None) => {
                return ServiceResult::failure_with_message(format!("Employee not found: {id}"))
            }
            Err(e) => return ServiceResult::failure_with_message(e.to_string()),
        };

        let mut merged = existing.clone();
        patch.apply_to(&mut merged);
        if let Err(errors) = validate_record(&merged) {
            return ServiceResult::failure(errors);
        }

        match self.store.update(id, patch).await {
            Ok(Some(updated)) => ServiceResult::success(updated),
            Ok(None) => ServiceResult::failure_with_message(format!("Employee not found: {id}")),
            Err(e) => ServiceResult::failure_with_message(e.to_string()),
        }
    }
}

/// Two-phase employee deletion.
///
/// Phase 1 (only with the caller's confirmation): null the employee
/// reference on every task that points at the employee. Phase 2: delete the
/// employee record. Without confirmation, a referenced employee is not
/// touched at all.
pub struct DeleteEmployeeService<'a, E: EmployeeStore, T: TaskStore> {
    employees: &'a E,
    tasks: &'a T,
}

impl<'a, E: EmployeeStore, T: TaskStore> DeleteEmployeeService<'a, E, T> {
    pub fn new(employees: &'a E, tasks: &'a T) -> Self {
        Self { employees, tasks }
    }

    /// Tasks that still reference the employee; the caller uses this to ask
    /// the user for confirmation before a destructive cascade.
    pub async fn referencing_tasks(&self, employee_id: Id) -> ServiceResult<usize> {
        match self.tasks.find_by_employee(employee_id).await {
            Ok(tasks) => ServiceResult::success(tasks.len()),
            Err(e) => ServiceResult::failure_with_message(e.to_string()),
        }
    }

    #[instrument(skip(self))]
    pub async fn call(&self, employee_id: Id, confirm_unassign: bool) -> ServiceResult<()> {
        let linked = match self.tasks.find_by_employee(employee_id).await {
            Ok(tasks) => tasks,
            Err(e) => return ServiceResult::failure_with_message(e.to_string()),
        };

        if !linked.is_empty() && !confirm_unassign {
            // abort with no partial effect
            return ServiceResult::failure_with_message(format!(
                "Employee is assigned to {} task(s); confirm unassignment to proceed",
                linked.len()
            ));
        }

        let mut result = ServiceResult::success(());

        if !linked.is_empty() {
            match self.tasks.clear_employee(employee_id).await {
                Ok(cleared) => {
                    info!(%employee_id, cleared, "unassigned tasks before employee deletion");
                    result.record_step(StepOutcome::ok(format!("unassigned {cleared} task(s)")));
                }
                Err(e) => {
                    return ServiceResult::failure_with_message(e.to_string())
                        .with_step(StepOutcome::failed("unassign tasks", e.to_string()));
                }
            }
        }

        match self.employees.delete(employee_id).await {
            Ok(true) => {
                result.record_step(StepOutcome::ok("deleted employee"));
                result
            }
            Ok(false) => {
                // tasks may already have been unassigned; report the partial state
                warn!(%employee_id, "employee vanished after unassignment step");
                let mut failure = ServiceResult::failure_with_message(format!(
                    "Employee not found: {employee_id}"
                ));
                failure.steps = result.steps;
                failure.record_step(StepOutcome::failed(
                    "delete employee",
                    "record not found",
                ));
                failure
            }
            Err(e) => {
                let mut failure = ServiceResult::failure_with_message(e.to_string());
                failure.steps = result.steps;
                failure.record_step(StepOutcome::failed("delete employee", e.to_string()));
                failure
            }
        }
    }
}
