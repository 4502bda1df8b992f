use crate::adapters::ScheduleStore;
use crate::app::rota::WeeklyRota;
use crate::app::use_cases::{
    CreateShiftUseCase, DeleteShiftUseCase, GetEmployeesUseCase, UpdateShiftUseCase,
};
use crate::config::LocalStorage;
use crate::core::shift_validation::ShiftValidator;
use crate::core::week::{FixedClock, SystemClock, WeekService};
use crate::core::{Clock, ConfigProvider, RoleDirectory, Storage};
use crate::domain::model::{RoleMembers, Roster, Shift, ShiftChange, ShiftDraft, ShiftId};
use crate::utils::error::Result;
use std::sync::Arc;

/// Entry point tying the store, the validator and the clock together.
pub struct Scheduler<S: Storage, C: Clock + Clone> {
    store: Arc<ScheduleStore<S>>,
    validator: Arc<ShiftValidator<ScheduleStore<S>>>,
    clock: C,
}

impl<S: Storage, C: Clock + Clone> Scheduler<S, C> {
    pub fn new(store: ScheduleStore<S>, clock: C) -> Self {
        let store = Arc::new(store);
        let validator = Arc::new(ShiftValidator::new(store.clone()));
        Self {
            store,
            validator,
            clock,
        }
    }

    pub fn store(&self) -> &ScheduleStore<S> {
        &self.store
    }

    pub async fn create_shift(&self, draft: ShiftDraft) -> Result<Shift> {
        CreateShiftUseCase::new(self.store.clone(), self.validator.clone())
            .execute(draft)
            .await
    }

    pub async fn update_shift(&self, change: ShiftChange) -> Result<Shift> {
        UpdateShiftUseCase::new(self.store.clone(), self.validator.clone())
            .execute(change)
            .await
    }

    pub async fn delete_shift(&self, id: ShiftId) -> Result<Shift> {
        DeleteShiftUseCase::new(self.store.clone()).execute(id).await
    }

    pub async fn weekly_rota(&self) -> Result<WeeklyRota> {
        let week = WeekService::new(self.clock.clone());
        let range = week.current_week()?;
        let employees = GetEmployeesUseCase::new(self.store.clone(), week)
            .execute()
            .await?;
        Ok(WeeklyRota::new(range, employees))
    }

    pub async fn roles(&self) -> Result<Vec<RoleMembers>> {
        self.store.roles().await
    }
}

/// Opens the roster file named by `config` on the local filesystem. "Today"
/// is fixed when the scheduler is opened.
pub async fn open_local<P: ConfigProvider>(
    config: &P,
    seed: Roster,
) -> Result<Scheduler<LocalStorage, FixedClock>> {
    let today = config.today().unwrap_or_else(|| SystemClock.today());
    let store = ScheduleStore::open(LocalStorage::new("."), config.data_file(), seed).await?;
    tracing::debug!("Opened roster {} (today is {})", config.data_file(), today);
    Ok(Scheduler::new(store, FixedClock(today)))
}
