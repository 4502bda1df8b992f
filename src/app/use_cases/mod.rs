pub mod create_shift;
pub mod delete_shift;
pub mod get_employees;
pub mod update_shift;

pub use create_shift::CreateShiftUseCase;
pub use delete_shift::DeleteShiftUseCase;
pub use get_employees::GetEmployeesUseCase;
pub use update_shift::UpdateShiftUseCase;
