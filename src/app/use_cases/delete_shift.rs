use crate::core::ShiftRepository;
use crate::domain::model::{Shift, ShiftId};
use crate::utils::error::{Result, SchedulerError};
use std::sync::Arc;

pub struct DeleteShiftUseCase<R: ShiftRepository> {
    shifts: Arc<R>,
}

impl<R: ShiftRepository> DeleteShiftUseCase<R> {
    pub fn new(shifts: Arc<R>) -> Self {
        Self { shifts }
    }

    /// Removes the shift permanently and returns what was removed.
    pub async fn execute(&self, id: ShiftId) -> Result<Shift> {
        let shift = self
            .shifts
            .find_by_id(id)
            .await?
            .ok_or(SchedulerError::ShiftNotFound { id })?;

        self.shifts.hard_delete(shift.id).await?;
        self.shifts.save().await?;

        tracing::info!("🗑️ Deleted shift {} ({})", shift.id, shift.date);
        Ok(shift)
    }
}
