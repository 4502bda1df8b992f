use anyhow::Result;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use shift_scheduler::app::use_cases::{
    CreateShiftUseCase, DeleteShiftUseCase, GetEmployeesUseCase, UpdateShiftUseCase,
};
use shift_scheduler::core::{EmployeeRepository, ShiftRepository, ShiftValidation};
use shift_scheduler::domain::model::{
    EmployeeId, EmployeeSchedule, RoleId, Shift, ShiftChange, ShiftDraft, ShiftId, ShiftView,
    ShiftViolation, ValidationResult,
};
use shift_scheduler::{FixedClock, SchedulerError, WeekService};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio_test::{assert_err, assert_ok};

fn at(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 記錄每次呼叫的假倉儲，取代資料庫
#[derive(Default)]
struct RecordingShiftRepository {
    stored: Mutex<Vec<Shift>>,
    added: Mutex<Vec<ShiftDraft>>,
    updated: Mutex<Vec<Shift>>,
    deleted: Mutex<Vec<ShiftId>>,
    day_queries: Mutex<Vec<(EmployeeId, NaiveDate, Option<ShiftId>)>>,
    saves: AtomicUsize,
}

impl RecordingShiftRepository {
    fn with_shift(shift: Shift) -> Self {
        let repo = Self::default();
        repo.stored.lock().unwrap().push(shift);
        repo
    }
}

#[async_trait]
impl ShiftRepository for RecordingShiftRepository {
    async fn find_by_id(&self, id: ShiftId) -> shift_scheduler::Result<Option<Shift>> {
        Ok(self.stored.lock().unwrap().iter().find(|s| s.id == id).cloned())
    }

    async fn shifts_on_day(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
        exclude: Option<ShiftId>,
    ) -> shift_scheduler::Result<Vec<ShiftView>> {
        self.day_queries
            .lock()
            .unwrap()
            .push((employee_id, date, exclude));
        Ok(Vec::new())
    }

    async fn add(&self, draft: ShiftDraft) -> shift_scheduler::Result<Shift> {
        self.added.lock().unwrap().push(draft.clone());
        Ok(Shift {
            id: 100,
            date: draft.date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            employee_id: draft.employee_id,
            role_id: draft.role_id,
        })
    }

    async fn update(&self, shift: &Shift) -> shift_scheduler::Result<()> {
        self.updated.lock().unwrap().push(shift.clone());
        Ok(())
    }

    async fn hard_delete(&self, id: ShiftId) -> shift_scheduler::Result<()> {
        self.deleted.lock().unwrap().push(id);
        Ok(())
    }

    async fn save(&self) -> shift_scheduler::Result<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// 固定回傳結果的驗證器
struct StubValidation {
    violations: Vec<ShiftViolation>,
    calls: Mutex<Vec<(NaiveTime, NaiveTime, EmployeeId, RoleId)>>,
}

impl StubValidation {
    fn returning(violations: &[ShiftViolation]) -> Self {
        Self {
            violations: violations.to_vec(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ShiftValidation for StubValidation {
    async fn validate(
        &self,
        start_time: NaiveTime,
        end_time: NaiveTime,
        employee_id: EmployeeId,
        role_id: RoleId,
        _existing_day_shifts: &[ShiftView],
    ) -> shift_scheduler::Result<ValidationResult> {
        self.calls
            .lock()
            .unwrap()
            .push((start_time, end_time, employee_id, role_id));
        Ok(self.violations.iter().copied().collect())
    }
}

fn draft() -> ShiftDraft {
    ShiftDraft {
        employee_id: 1,
        role_id: 1,
        date: date(2025, 1, 15),
        start_time: at(10),
        end_time: at(12),
    }
}

fn stored_shift() -> Shift {
    Shift {
        id: 7,
        date: date(2025, 1, 15),
        start_time: at(9),
        end_time: at(11),
        employee_id: 1,
        role_id: 1,
    }
}

#[tokio::test]
async fn create_rejects_when_validation_fails() {
    let repo = Arc::new(RecordingShiftRepository::default());
    let validator = Arc::new(StubValidation::returning(&[ShiftViolation::InvalidRole]));
    let use_case = CreateShiftUseCase::new(repo.clone(), validator);

    let err = assert_err!(use_case.execute(draft()).await);
    assert!(err.to_string().contains("Invalid Role."));
    assert!(repo.added.lock().unwrap().is_empty());
    assert_eq!(repo.saves.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn create_joins_all_reasons() {
    let repo = Arc::new(RecordingShiftRepository::default());
    let validator = Arc::new(StubValidation::returning(&[
        ShiftViolation::InvalidRole,
        ShiftViolation::InvalidTimeRange,
    ]));
    let use_case = CreateShiftUseCase::new(repo, validator);

    match use_case.execute(draft()).await {
        Err(SchedulerError::Validation { reasons }) => {
            assert_eq!(reasons, vec!["Invalid Role.", "Invalid Start and End time."]);
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn create_adds_and_saves_once_when_valid() -> Result<()> {
    let repo = Arc::new(RecordingShiftRepository::default());
    let validator = Arc::new(StubValidation::returning(&[]));
    let use_case = CreateShiftUseCase::new(repo.clone(), validator.clone());

    let shift = use_case.execute(draft()).await?;

    assert_eq!(shift.id, 100);
    assert_eq!(*repo.added.lock().unwrap(), vec![draft()]);
    assert_eq!(repo.saves.load(Ordering::SeqCst), 1);
    // 新班表不排除任何既有班次
    assert_eq!(
        *repo.day_queries.lock().unwrap(),
        vec![(1, date(2025, 1, 15), None)]
    );
    assert_eq!(*validator.calls.lock().unwrap(), vec![(at(10), at(12), 1, 1)]);
    Ok(())
}

#[tokio::test]
async fn update_fails_for_unknown_shift() {
    let repo = Arc::new(RecordingShiftRepository::default());
    let validator = Arc::new(StubValidation::returning(&[]));
    let use_case = UpdateShiftUseCase::new(repo.clone(), validator.clone());

    let change = ShiftChange {
        id: 3,
        role_id: 1,
        start_time: at(10),
        end_time: at(12),
    };
    let err = assert_err!(use_case.execute(change).await);
    assert!(matches!(err, SchedulerError::ShiftNotFound { id: 3 }));
    assert!(validator.calls.lock().unwrap().is_empty());
    assert!(repo.updated.lock().unwrap().is_empty());
}

#[tokio::test]
async fn update_excludes_itself_and_keeps_date() -> Result<()> {
    let repo = Arc::new(RecordingShiftRepository::with_shift(stored_shift()));
    let validator = Arc::new(StubValidation::returning(&[]));
    let use_case = UpdateShiftUseCase::new(repo.clone(), validator.clone());

    let updated = use_case
        .execute(ShiftChange {
            id: 7,
            role_id: 2,
            start_time: at(13),
            end_time: at(15),
        })
        .await?;

    assert_eq!(
        *repo.day_queries.lock().unwrap(),
        vec![(1, date(2025, 1, 15), Some(7))]
    );
    assert_eq!(*validator.calls.lock().unwrap(), vec![(at(13), at(15), 1, 2)]);

    assert_eq!(updated.date, date(2025, 1, 15));
    assert_eq!(updated.role_id, 2);
    assert_eq!(updated.start_time, at(13));
    assert_eq!(updated.end_time, at(15));
    assert_eq!(*repo.updated.lock().unwrap(), vec![updated]);
    assert_eq!(repo.saves.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn update_rejects_when_validation_fails() {
    let repo = Arc::new(RecordingShiftRepository::with_shift(stored_shift()));
    let validator = Arc::new(StubValidation::returning(&[ShiftViolation::Overlap]));
    let use_case = UpdateShiftUseCase::new(repo.clone(), validator);

    let err = assert_err!(
        use_case
            .execute(ShiftChange {
                id: 7,
                role_id: 1,
                start_time: at(10),
                end_time: at(12),
            })
            .await
    );
    assert_eq!(err.to_string(), "Overlap schedule.");
    assert!(repo.updated.lock().unwrap().is_empty());
    assert_eq!(repo.saves.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn delete_removes_existing_shift() {
    let repo = Arc::new(RecordingShiftRepository::with_shift(stored_shift()));
    let use_case = DeleteShiftUseCase::new(repo.clone());

    let removed = assert_ok!(use_case.execute(7).await);
    assert_eq!(removed.id, 7);
    assert_eq!(*repo.deleted.lock().unwrap(), vec![7]);
    assert_eq!(repo.saves.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn delete_of_unknown_shift_touches_nothing() {
    let repo = Arc::new(RecordingShiftRepository::default());
    let use_case = DeleteShiftUseCase::new(repo.clone());

    let err = assert_err!(use_case.execute(1).await);
    assert!(matches!(err, SchedulerError::ShiftNotFound { id: 1 }));
    assert!(repo.deleted.lock().unwrap().is_empty());
    assert_eq!(repo.saves.load(Ordering::SeqCst), 0);
}

/// 記錄查詢區間的員工倉儲
#[derive(Default)]
struct WeekRecordingEmployees {
    ranges: Mutex<Vec<(NaiveDate, NaiveDate)>>,
}

#[async_trait]
impl EmployeeRepository for WeekRecordingEmployees {
    async fn employees_with_shifts_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> shift_scheduler::Result<Vec<EmployeeSchedule>> {
        self.ranges.lock().unwrap().push((start, end));
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn get_employees_queries_current_week() -> Result<()> {
    let repo = Arc::new(WeekRecordingEmployees::default());
    let use_case =
        GetEmployeesUseCase::new(repo.clone(), WeekService::new(FixedClock(date(2025, 1, 15))));

    let employees = use_case.execute().await?;

    assert!(employees.is_empty());
    assert_eq!(
        *repo.ranges.lock().unwrap(),
        vec![(date(2025, 1, 13), date(2025, 1, 19))]
    );
    Ok(())
}

#[tokio::test]
async fn get_employees_rejects_a_week_past_the_calendar_end() {
    let repo = Arc::new(WeekRecordingEmployees::default());
    let use_case =
        GetEmployeesUseCase::new(repo.clone(), WeekService::new(FixedClock(NaiveDate::MAX)));

    let err = assert_err!(use_case.execute().await);
    assert!(matches!(err, SchedulerError::DateOutOfRange { .. }));
    assert!(repo.ranges.lock().unwrap().is_empty());
}
