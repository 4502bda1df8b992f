use crate::domain::model::{
    EmployeeId, EmployeeSchedule, RoleId, RoleMembers, Shift, ShiftDraft, ShiftId, ShiftView,
    ValidationResult,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

pub trait Storage: Send + Sync {
    fn exists(&self, path: &str) -> impl std::future::Future<Output = Result<bool>> + Send;
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn data_file(&self) -> &str;
    /// Date to treat as "today" instead of the system date.
    fn today(&self) -> Option<NaiveDate>;
}

pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

#[async_trait]
pub trait ShiftRepository: Send + Sync {
    async fn find_by_id(&self, id: ShiftId) -> Result<Option<Shift>>;

    /// Shifts of `employee_id` on `date`, leaving out `exclude` when given.
    async fn shifts_on_day(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
        exclude: Option<ShiftId>,
    ) -> Result<Vec<ShiftView>>;

    async fn add(&self, draft: ShiftDraft) -> Result<Shift>;
    async fn update(&self, shift: &Shift) -> Result<()>;
    async fn hard_delete(&self, id: ShiftId) -> Result<()>;

    /// Commits pending changes.
    async fn save(&self) -> Result<()>;
}

#[async_trait]
pub trait RoleDirectory: Send + Sync {
    async fn employee_has_role(&self, employee_id: EmployeeId, role_id: RoleId) -> Result<bool>;
    async fn roles(&self) -> Result<Vec<RoleMembers>>;
}

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// All employees, each with the shifts dated within `start..=end`.
    async fn employees_with_shifts_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<EmployeeSchedule>>;
}

#[async_trait]
pub trait ShiftValidation: Send + Sync {
    async fn validate(
        &self,
        start_time: NaiveTime,
        end_time: NaiveTime,
        employee_id: EmployeeId,
        role_id: RoleId,
        existing_day_shifts: &[ShiftView],
    ) -> Result<ValidationResult>;
}
