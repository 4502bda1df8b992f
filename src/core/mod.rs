pub mod shift_validation;
pub mod week;

pub use crate::domain::ports::{
    Clock, ConfigProvider, EmployeeRepository, RoleDirectory, ShiftRepository, ShiftValidation,
    Storage,
};
pub use crate::utils::error::Result;
