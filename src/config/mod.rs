pub mod cli;
pub mod toml_config;

pub use cli::LocalStorage;
pub use toml_config::SchedulerConfig;

#[cfg(feature = "cli")]
pub use args::{CliConfig, Command, OutputFormat};

#[cfg(feature = "cli")]
mod args {
    use super::toml_config::{SchedulerConfig, DEFAULT_DATA_FILE};
    use crate::core::ConfigProvider;
    use crate::domain::model::{EmployeeId, RoleId, ShiftId};
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use chrono::{NaiveDate, NaiveTime};
    use clap::{Parser, Subcommand, ValueEnum};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "shift-scheduler")]
    #[command(about = "Schedule employee shifts by role without overlaps")]
    pub struct CliConfig {
        /// Path to a TOML configuration file
        #[arg(short, long, global = true)]
        pub config: Option<String>,

        /// Roster data file, overrides `storage.data_file`
        #[arg(long, global = true)]
        pub data_file: Option<String>,

        /// Treat this date (YYYY-MM-DD) as today
        #[arg(long, global = true)]
        pub today: Option<NaiveDate>,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, global = true, help = "Emit logs as JSON")]
        pub json_logs: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Show this week's shifts for every employee
        Week {
            #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
            format: OutputFormat,
        },
        /// List roles and the employees eligible for them
        Roles,
        /// Schedule a new shift
        Create {
            #[arg(long)]
            employee: EmployeeId,
            #[arg(long)]
            role: RoleId,
            #[arg(long)]
            date: NaiveDate,
            #[arg(long, value_parser = parse_time_of_day)]
            start: NaiveTime,
            #[arg(long, value_parser = parse_time_of_day)]
            end: NaiveTime,
        },
        /// Change role and times of an existing shift
        Update {
            #[arg(long)]
            id: ShiftId,
            #[arg(long)]
            role: RoleId,
            #[arg(long, value_parser = parse_time_of_day)]
            start: NaiveTime,
            #[arg(long, value_parser = parse_time_of_day)]
            end: NaiveTime,
        },
        /// Permanently remove a shift
        Delete {
            #[arg(long)]
            id: ShiftId,
        },
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
    pub enum OutputFormat {
        Table,
        Csv,
        Json,
    }

    /// Accepts `HH:MM` or `HH:MM:SS`.
    pub fn parse_time_of_day(value: &str) -> std::result::Result<NaiveTime, String> {
        NaiveTime::parse_from_str(value, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
            .map_err(|_| format!("'{}' is not a time of day (expected HH:MM)", value))
    }

    impl CliConfig {
        /// 命令列參數優先，未指定的部分由設定檔補上
        pub fn apply_file_config(&mut self, file: &SchedulerConfig) {
            if self.data_file.is_none() {
                self.data_file = Some(file.data_file().to_string());
            }
            if file.json_logs() {
                self.json_logs = true;
            }
        }
    }

    impl ConfigProvider for CliConfig {
        fn data_file(&self) -> &str {
            self.data_file.as_deref().unwrap_or(DEFAULT_DATA_FILE)
        }

        fn today(&self) -> Option<NaiveDate> {
            self.today
        }
    }

    impl Validate for CliConfig {
        /// Checks the merged settings, after `apply_file_config`.
        fn validate(&self) -> Result<()> {
            validation::validate_path("data_file", self.data_file())
        }
    }

}
