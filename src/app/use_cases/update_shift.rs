use crate::core::{ShiftRepository, ShiftValidation};
use crate::domain::model::{Shift, ShiftChange};
use crate::utils::error::{Result, SchedulerError};
use std::sync::Arc;

pub struct UpdateShiftUseCase<R: ShiftRepository, V: ShiftValidation> {
    shifts: Arc<R>,
    validator: Arc<V>,
}

impl<R: ShiftRepository, V: ShiftValidation> UpdateShiftUseCase<R, V> {
    pub fn new(shifts: Arc<R>, validator: Arc<V>) -> Self {
        Self { shifts, validator }
    }

    /// Changes role and times of a stored shift. Employee and date stay as
    /// they were; the overlap check runs against that employee's other shifts
    /// on the stored date.
    pub async fn execute(&self, change: ShiftChange) -> Result<Shift> {
        let mut shift = self
            .shifts
            .find_by_id(change.id)
            .await?
            .ok_or(SchedulerError::ShiftNotFound { id: change.id })?;

        let existing = self
            .shifts
            .shifts_on_day(shift.employee_id, shift.date, Some(shift.id))
            .await?;

        let validation = self
            .validator
            .validate(
                change.start_time,
                change.end_time,
                shift.employee_id,
                change.role_id,
                &existing,
            )
            .await?;
        if !validation.is_valid() {
            tracing::warn!(
                "Rejected update of shift {}: {:?}",
                shift.id,
                validation.errors()
            );
            return Err(SchedulerError::validation(validation.errors()));
        }

        shift.role_id = change.role_id;
        shift.start_time = change.start_time;
        shift.end_time = change.end_time;

        self.shifts.update(&shift).await?;
        self.shifts.save().await?;

        tracing::info!(
            "✅ Updated shift {} ({}-{}, role {})",
            shift.id,
            shift.start_time,
            shift.end_time,
            shift.role_id
        );
        Ok(shift)
    }
}
