use crate::core::{ShiftRepository, ShiftValidation};
use crate::domain::model::{Shift, ShiftDraft};
use crate::utils::error::{Result, SchedulerError};
use std::sync::Arc;

pub struct CreateShiftUseCase<R: ShiftRepository, V: ShiftValidation> {
    shifts: Arc<R>,
    validator: Arc<V>,
}

impl<R: ShiftRepository, V: ShiftValidation> CreateShiftUseCase<R, V> {
    pub fn new(shifts: Arc<R>, validator: Arc<V>) -> Self {
        Self { shifts, validator }
    }

    pub async fn execute(&self, draft: ShiftDraft) -> Result<Shift> {
        let existing = self
            .shifts
            .shifts_on_day(draft.employee_id, draft.date, None)
            .await?;

        let validation = self
            .validator
            .validate(
                draft.start_time,
                draft.end_time,
                draft.employee_id,
                draft.role_id,
                &existing,
            )
            .await?;
        if !validation.is_valid() {
            tracing::warn!(
                "Rejected new shift for employee {} on {}: {:?}",
                draft.employee_id,
                draft.date,
                validation.errors()
            );
            return Err(SchedulerError::validation(validation.errors()));
        }

        let shift = self.shifts.add(draft).await?;
        self.shifts.save().await?;

        tracing::info!(
            "✅ Created shift {} for employee {} on {} ({}-{})",
            shift.id,
            shift.employee_id,
            shift.date,
            shift.start_time,
            shift.end_time
        );
        Ok(shift)
    }
}
