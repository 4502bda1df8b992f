pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{MemoryStorage, ScheduleStore};
pub use app::{Scheduler, WeeklyRota};
pub use config::{LocalStorage, SchedulerConfig};
pub use crate::core::week::{FixedClock, SystemClock, WeekRange, WeekService};
pub use utils::error::{Result, SchedulerError};
