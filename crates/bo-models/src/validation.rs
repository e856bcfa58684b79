//! Bridge between `validator` derive output and the core error collection.

use bo_core::ValidationErrors;
use validator::Validate;

/// Run a model's derived validations, flattening the result into the
/// field-keyed [`ValidationErrors`] collection the service layer reports.
pub fn validate_record<T: Validate>(record: &T) -> Result<(), ValidationErrors> {
    match record.validate() {
        Ok(()) => Ok(()),
        Err(errors) => {
            let mut out = ValidationErrors::new();
            for (field, field_errors) in errors.field_errors() {
                for err in field_errors {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("is invalid ({})", err.code));
                    out.add(field, message);
                }
            }
            Err(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::Employee;

    #[test]
    fn test_empty_name_is_rejected() {
        let employee = Employee::new("", "jane@example.com", "Auditor");
        let errors = validate_record(&employee).unwrap_err();
        assert!(errors.has_error("full_name"));
    }

    #[test]
    fn test_valid_record_passes() {
        let employee = Employee::new("Jane Doe", "jane@example.com", "Auditor");
        assert!(validate_record(&employee).is_ok());
    }
}
