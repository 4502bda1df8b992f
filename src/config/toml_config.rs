use crate::domain::model::{Employee, EmployeeId, Role, RoleId, Roster};
use crate::utils::error::{Result, SchedulerError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

pub const DEFAULT_DATA_FILE: &str = "roster.json";
pub const LOG_FORMATS: [&str; 2] = ["compact", "json"];
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    pub logging: Option<LoggingConfig>,
    pub seed: Option<SeedConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_file")]
    pub data_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
        }
    }
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    #[serde(default)]
    pub roles: Vec<SeedRole>,
    #[serde(default)]
    pub employees: Vec<SeedEmployee>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedRole {
    pub id: RoleId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedEmployee {
    pub id: EmployeeId,
    pub name: String,
    #[serde(default)]
    pub roles: Vec<RoleId>,
}

impl SchedulerConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SchedulerError::ConfigError {
            message: format!("cannot read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SchedulerError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn data_file(&self) -> &str {
        &self.storage.data_file
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .is_some_and(|f| f == "json")
    }

    /// 初始名冊：設定檔有 seed 區段時使用設定檔，否則用內建資料
    pub fn seed_roster(&self) -> Roster {
        match &self.seed {
            Some(seed) => Roster::new(
                seed.roles
                    .iter()
                    .map(|r| Role {
                        id: r.id,
                        name: r.name.clone(),
                    })
                    .collect(),
                seed.employees
                    .iter()
                    .map(|e| Employee {
                        id: e.id,
                        name: e.name.clone(),
                        roles: e.roles.iter().copied().collect(),
                    })
                    .collect(),
            ),
            None => Roster::seed(),
        }
    }
}

impl Validate for SchedulerConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("storage.data_file", &self.storage.data_file)?;

        if let Some(logging) = &self.logging {
            if let Some(level) = &logging.level {
                validation::validate_one_of("logging.level", level, &LOG_LEVELS)?;
            }
            if let Some(format) = &logging.format {
                validation::validate_one_of("logging.format", format, &LOG_FORMATS)?;
            }
        }

        if let Some(seed) = &self.seed {
            validation::validate_unique_ids("seed.roles", seed.roles.iter().map(|r| r.id))?;
            validation::validate_unique_ids(
                "seed.employees",
                seed.employees.iter().map(|e| e.id),
            )?;

            let role_ids: HashSet<RoleId> = seed.roles.iter().map(|r| r.id).collect();
            for role in &seed.roles {
                validation::validate_non_empty_string("seed.roles.name", &role.name)?;
            }
            for employee in &seed.employees {
                validation::validate_non_empty_string("seed.employees.name", &employee.name)?;
                if let Some(unknown) = employee.roles.iter().find(|id| !role_ids.contains(id)) {
                    return Err(SchedulerError::InvalidConfigValueError {
                        field: "seed.employees.roles".to_string(),
                        value: unknown.to_string(),
                        reason: format!("{} references a role that is not seeded", employee.name),
                    });
                }
            }
        }

        Ok(())
    }
}
