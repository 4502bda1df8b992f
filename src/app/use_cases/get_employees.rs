use crate::core::week::WeekService;
use crate::core::{Clock, EmployeeRepository};
use crate::domain::model::EmployeeSchedule;
use crate::utils::error::Result;
use std::sync::Arc;

pub struct GetEmployeesUseCase<R: EmployeeRepository, C: Clock> {
    employees: Arc<R>,
    week: WeekService<C>,
}

impl<R: EmployeeRepository, C: Clock> GetEmployeesUseCase<R, C> {
    pub fn new(employees: Arc<R>, week: WeekService<C>) -> Self {
        Self { employees, week }
    }

    /// Every employee with their roles and the shifts of the current week.
    pub async fn execute(&self) -> Result<Vec<EmployeeSchedule>> {
        let start = self.week.start_of_week()?;
        let end = self.week.end_of_week()?;
        tracing::debug!("Listing employees for week {} .. {}", start, end);

        self.employees.employees_with_shifts_between(start, end).await
    }
}
