use crate::core::{EmployeeRepository, RoleDirectory, ShiftRepository, Storage};
use crate::domain::model::{
    EmployeeId, EmployeeSchedule, RoleId, RoleMembers, Roster, Shift, ShiftDraft, ShiftId,
    ShiftView,
};
use crate::utils::error::{Result, SchedulerError};
use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::{Mutex, RwLock};

/// Roster held in memory and written back through a [`Storage`] as a JSON
/// snapshot on every `save`. Changes made since the last successful `save`
/// are discarded when a `save` fails.
pub struct ScheduleStore<S: Storage> {
    roster: RwLock<Roster>,
    committed: Mutex<Roster>,
    storage: S,
    snapshot_path: String,
}

impl<S: Storage> ScheduleStore<S> {
    pub fn new(storage: S, snapshot_path: impl Into<String>, roster: Roster) -> Self {
        Self {
            committed: Mutex::new(roster.clone()),
            roster: RwLock::new(roster),
            storage,
            snapshot_path: snapshot_path.into(),
        }
    }

    /// Loads the snapshot at `snapshot_path`, or starts from `seed` when none
    /// has been written yet.
    pub async fn open(storage: S, snapshot_path: impl Into<String>, seed: Roster) -> Result<Self> {
        let snapshot_path = snapshot_path.into();

        let roster = if storage.exists(&snapshot_path).await? {
            let data = storage.read_file(&snapshot_path).await?;
            let mut roster: Roster = serde_json::from_slice(&data)?;

            if let Some(id) = roster.duplicate_shift_id() {
                return Err(SchedulerError::StorageError {
                    message: format!("{} holds shift id {} more than once", snapshot_path, id),
                });
            }
            if roster.reconcile_next_shift_id() {
                tracing::warn!(
                    "⚠️ {} had a stale next shift id, continuing from {}",
                    snapshot_path,
                    roster.next_shift_id
                );
            }

            tracing::debug!(
                "Loaded roster from {}: {} employees, {} roles, {} shifts",
                snapshot_path,
                roster.employees.len(),
                roster.roles.len(),
                roster.shifts.len()
            );
            roster
        } else {
            tracing::info!("📄 No roster at {}, starting from seed data", snapshot_path);
            seed
        };

        Ok(Self::new(storage, snapshot_path, roster))
    }

    pub async fn snapshot(&self) -> Roster {
        self.roster.read().await.clone()
    }
}

#[async_trait]
impl<S: Storage> ShiftRepository for ScheduleStore<S> {
    async fn find_by_id(&self, id: ShiftId) -> Result<Option<Shift>> {
        Ok(self.roster.read().await.shift(id).cloned())
    }

    async fn shifts_on_day(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
        exclude: Option<ShiftId>,
    ) -> Result<Vec<ShiftView>> {
        let roster = self.roster.read().await;
        Ok(roster
            .shifts
            .iter()
            .filter(|s| s.employee_id == employee_id && s.date == date)
            .filter(|s| Some(s.id) != exclude)
            .map(|s| roster.view(s))
            .collect())
    }

    async fn add(&self, draft: ShiftDraft) -> Result<Shift> {
        let mut roster = self.roster.write().await;
        let shift = Shift {
            id: roster.next_shift_id,
            date: draft.date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            employee_id: draft.employee_id,
            role_id: draft.role_id,
        };
        roster.next_shift_id += 1;
        roster.shifts.push(shift.clone());
        Ok(shift)
    }

    async fn update(&self, shift: &Shift) -> Result<()> {
        let mut roster = self.roster.write().await;
        let stored = roster
            .shifts
            .iter_mut()
            .find(|s| s.id == shift.id)
            .ok_or(SchedulerError::ShiftNotFound { id: shift.id })?;
        *stored = shift.clone();
        Ok(())
    }

    async fn hard_delete(&self, id: ShiftId) -> Result<()> {
        let mut roster = self.roster.write().await;
        let before = roster.shifts.len();
        roster.shifts.retain(|s| s.id != id);
        if roster.shifts.len() == before {
            return Err(SchedulerError::ShiftNotFound { id });
        }
        Ok(())
    }

    async fn save(&self) -> Result<()> {
        let mut roster = self.roster.write().await;
        let written = match serde_json::to_vec_pretty(&*roster) {
            Ok(data) => self.storage.write_file(&self.snapshot_path, &data).await,
            Err(e) => Err(e.into()),
        };

        let mut committed = self.committed.lock().await;
        match written {
            Ok(()) => {
                *committed = roster.clone();
                tracing::debug!("💾 Roster written to {}", self.snapshot_path);
                Ok(())
            }
            Err(e) => {
                *roster = committed.clone();
                tracing::warn!(
                    "⚠️ Could not write {}, unsaved changes discarded: {}",
                    self.snapshot_path,
                    e
                );
                Err(e)
            }
        }
    }
}

#[async_trait]
impl<S: Storage> RoleDirectory for ScheduleStore<S> {
    async fn employee_has_role(&self, employee_id: EmployeeId, role_id: RoleId) -> Result<bool> {
        let roster = self.roster.read().await;
        Ok(roster.role(role_id).is_some()
            && roster
                .employee(employee_id)
                .is_some_and(|e| e.has_role(role_id)))
    }

    async fn roles(&self) -> Result<Vec<RoleMembers>> {
        let roster = self.roster.read().await;
        let mut roles: Vec<RoleMembers> = roster
            .roles
            .iter()
            .map(|role| RoleMembers {
                role: role.clone(),
                employees: roster.members_of(role.id).map(|e| e.name.clone()).collect(),
            })
            .collect();
        roles.sort_by_key(|r| r.role.id);
        Ok(roles)
    }
}

#[async_trait]
impl<S: Storage> EmployeeRepository for ScheduleStore<S> {
    async fn employees_with_shifts_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<EmployeeSchedule>> {
        let roster = self.roster.read().await;

        let mut schedules: Vec<EmployeeSchedule> = roster
            .employees
            .iter()
            .map(|employee| {
                let mut shifts: Vec<ShiftView> = roster
                    .shifts
                    .iter()
                    .filter(|s| s.employee_id == employee.id)
                    .filter(|s| start <= s.date && s.date <= end)
                    .map(|s| roster.view(s))
                    .collect();
                shifts.sort_by_key(|s| (s.date, s.start_time));

                EmployeeSchedule {
                    id: employee.id,
                    name: employee.name.clone(),
                    roles: employee
                        .roles
                        .iter()
                        .filter_map(|id| roster.role(*id).cloned())
                        .collect(),
                    shifts,
                }
            })
            .collect();
        schedules.sort_by_key(|e| e.id);

        Ok(schedules)
    }
}
