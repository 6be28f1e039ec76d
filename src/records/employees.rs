//! Employee record parsing.
//!
//! Employees arrive as a JSON array of `{Name, Title, Skills}` objects, one
//! object per employee.

use crate::error::RecordError;
use crate::records::model::Employee;

/// Parse the employee record set.
pub fn parse_employees(content: &str) -> Result<Vec<Employee>, RecordError> {
    serde_json::from_str(content).map_err(|e| RecordError::EmployeeParse(e.to_string()))
}
