use crate::core::week::WeekRange;
use crate::domain::model::{EmployeeSchedule, ShiftView};
use crate::utils::error::{Result, SchedulerError};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write;

/// One week of shifts, laid out per employee and day.
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyRota {
    pub week: WeekRange,
    pub days: Vec<NaiveDate>,
    pub employees: Vec<EmployeeSchedule>,
}

impl WeeklyRota {
    pub fn new(week: WeekRange, employees: Vec<EmployeeSchedule>) -> Self {
        Self {
            week,
            days: week.days().collect(),
            employees,
        }
    }

    fn shifts_on<'a>(
        employee: &'a EmployeeSchedule,
        day: NaiveDate,
    ) -> impl Iterator<Item = &'a ShiftView> {
        employee.shifts.iter().filter(move |s| s.date == day)
    }

    fn cell(employee: &EmployeeSchedule, day: NaiveDate) -> String {
        Self::shifts_on(employee, day)
            .map(|s| {
                format!(
                    "#{} {}-{} {}",
                    s.id,
                    s.start_time.format("%H:%M"),
                    s.end_time.format("%H:%M"),
                    s.role_name
                )
            })
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn render_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Week {} .. {}", self.week.start, self.week.end);

        for employee in &self.employees {
            let roles: Vec<&str> = employee.roles.iter().map(|r| r.name.as_str()).collect();
            let _ = writeln!(
                out,
                "\n{} (#{}) [{}]",
                employee.name,
                employee.id,
                roles.join(", ")
            );
            for day in &self.days {
                let cell = Self::cell(employee, *day);
                let cell = if cell.is_empty() { "-".to_string() } else { cell };
                let _ = writeln!(out, "  {} {}  {}", day.format("%a"), day, cell);
            }
        }
        out
    }

    pub fn render_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        let mut header = vec!["employee_id".to_string(), "employee".to_string()];
        header.extend(self.days.iter().map(|d| d.format("%a %Y-%m-%d").to_string()));
        writer.write_record(&header)?;

        for employee in &self.employees {
            let mut row = vec![employee.id.to_string(), employee.name.clone()];
            row.extend(self.days.iter().map(|d| Self::cell(employee, *d)));
            writer.write_record(&row)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| SchedulerError::StorageError {
                message: format!("CSV buffer flush failed: {}", e),
            })?;
        String::from_utf8(bytes).map_err(|e| SchedulerError::StorageError {
            message: format!("CSV output is not UTF-8: {}", e),
        })
    }

    pub fn render_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
