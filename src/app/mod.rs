pub mod rota;
pub mod scheduler;
pub mod use_cases;

pub use rota::WeeklyRota;
pub use scheduler::Scheduler;
