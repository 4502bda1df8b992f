use crate::domain::model::ShiftId;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("{}", .reasons.join("\n"))]
    Validation { reasons: Vec<String> },

    #[error("Shift not found: {id}")]
    ShiftNotFound { id: ShiftId },

    #[error("The week containing {date} falls outside the supported calendar")]
    DateOutOfRange { date: NaiveDate },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Storage error: {message}")]
    StorageError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Rejected,
    Configuration,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SchedulerError {
    pub fn validation<I, S>(reasons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Validation {
            reasons: reasons.into_iter().map(Into::into).collect(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation { .. } | Self::ShiftNotFound { .. } | Self::DateOutOfRange { .. } => {
                ErrorCategory::Rejected
            }
            Self::TomlError(_) | Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::IoError(_)
            | Self::SerializationError(_)
            | Self::CsvError(_)
            | Self::StorageError { .. } => ErrorCategory::Storage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Rejected => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// 依錯誤種類對應 CLI 的結束代碼
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Rejected => 1,
            ErrorCategory::Configuration => 2,
            ErrorCategory::Storage => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::Validation { .. } => {
                "Pick a role the employee holds, make sure start is before end and that the shift does not overlap another one that day".to_string()
            }
            Self::ShiftNotFound { .. } => {
                "Run `shift-scheduler week` to list the current shift ids".to_string()
            }
            Self::DateOutOfRange { .. } => {
                "Pass a realistic date with --today".to_string()
            }
            Self::TomlError(_) => "Check the TOML syntax of the configuration file".to_string(),
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run the command again".to_string()
            }
            Self::SerializationError(_) => {
                "The data file is corrupted; restore a backup or remove it to start from the seed roster".to_string()
            }
            Self::IoError(_) | Self::CsvError(_) | Self::StorageError { .. } => {
                "Check that the data directory exists and is writable".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Validation { reasons } => {
                format!("The shift was rejected:\n  - {}", reasons.join("\n  - "))
            }
            Self::ShiftNotFound { id } => format!("No shift with id {} exists", id),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
