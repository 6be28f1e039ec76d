//! Workload calculation — committed hours per employee.

use crate::error::RecordError;
use crate::records::{Roster, Task};

/// Sum the estimated hours of a set of tasks.
///
/// A task without a parseable estimated-hours value is an error, not a zero:
/// silently skipping it would understate the workload and overstate
/// availability. The error propagates to the caller.
pub fn sum_hours<'a, I>(tasks: I) -> Result<f64, RecordError>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut total = 0.0;
    for task in tasks {
        total += task.parsed_hours()?;
    }
    Ok(total)
}

/// Current workload of an employee: estimated hours summed over their
/// active (assigned, not yet completed) tasks.
pub fn workload_for(roster: &Roster, employee_name: &str) -> Result<f64, RecordError> {
    // Resolve the name first so a typo surfaces as a lookup miss rather
    // than an empty workload.
    roster.employee(employee_name)?;
    sum_hours(roster.active_tasks_for(employee_name))
}
