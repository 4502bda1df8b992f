use crate::core::{RoleDirectory, ShiftValidation};
use crate::domain::model::{EmployeeId, RoleId, ShiftView, ShiftViolation, ValidationResult};
use crate::utils::error::Result;
use chrono::NaiveTime;
use std::sync::Arc;

/// Half-open interval intersection: touching ranges do not overlap.
pub fn overlaps(
    a_start: NaiveTime,
    a_end: NaiveTime,
    b_start: NaiveTime,
    b_end: NaiveTime,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Applies every shift rule and collects the violations in rule order.
/// Only the first overlapping shift is reported.
pub fn check_shift(
    start_time: NaiveTime,
    end_time: NaiveTime,
    role_eligible: bool,
    existing_day_shifts: &[ShiftView],
) -> ValidationResult {
    let mut result = ValidationResult::valid();

    if !role_eligible {
        result.push(ShiftViolation::InvalidRole);
    }

    if start_time >= end_time {
        result.push(ShiftViolation::InvalidTimeRange);
    }

    if existing_day_shifts
        .iter()
        .any(|shift| overlaps(start_time, end_time, shift.start_time, shift.end_time))
    {
        result.push(ShiftViolation::Overlap);
    }

    result
}

pub struct ShiftValidator<D: RoleDirectory> {
    roles: Arc<D>,
}

impl<D: RoleDirectory> ShiftValidator<D> {
    pub fn new(roles: Arc<D>) -> Self {
        Self { roles }
    }
}

#[async_trait::async_trait]
impl<D: RoleDirectory> ShiftValidation for ShiftValidator<D> {
    async fn validate(
        &self,
        start_time: NaiveTime,
        end_time: NaiveTime,
        employee_id: EmployeeId,
        role_id: RoleId,
        existing_day_shifts: &[ShiftView],
    ) -> Result<ValidationResult> {
        let role_eligible = self.roles.employee_has_role(employee_id, role_id).await?;
        let result = check_shift(start_time, end_time, role_eligible, existing_day_shifts);

        if !result.is_valid() {
            tracing::debug!(
                "Shift {}-{} for employee {} as role {} rejected: {:?}",
                start_time,
                end_time,
                employee_id,
                role_id,
                result.violations()
            );
        }

        Ok(result)
    }
}
