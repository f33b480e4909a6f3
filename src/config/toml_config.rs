use crate::config::DEFAULT_REQUEST_TIMEOUT_SECONDS;
use crate::core::occupation::DEFAULT_MAX_OCCUPATION_PERCENTAGE;
use crate::core::ConfigProvider;
use crate::utils::error::{Result, TicketOfficeError};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub service: ServiceConfig,
    pub train_data: EndpointConfig,
    pub booking_reference: EndpointConfig,
    pub policy: Option<PolicyConfig>,
    pub http: Option<HttpConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    pub max_occupation_percentage: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TicketOfficeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TicketOfficeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TRAIN_DATA_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TicketOfficeError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 命令列參數優先於設定檔
    #[cfg(feature = "cli")]
    pub fn apply_overrides(&mut self, cli: &crate::config::CliConfig) {
        if let Some(url) = &cli.train_data_url {
            self.train_data.url = url.clone();
        }
        if let Some(url) = &cli.booking_reference_url {
            self.booking_reference.url = url.clone();
        }
        if let Some(percentage) = cli.max_occupation {
            self.policy = Some(PolicyConfig {
                max_occupation_percentage: Some(percentage),
            });
        }
        if let Some(seconds) = cli.timeout_seconds {
            self.http = Some(HttpConfig {
                timeout_seconds: Some(seconds),
            });
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("service.name", &self.service.name)?;
        validate_url("train_data.url", &self.train_data.url)?;
        validate_url("booking_reference.url", &self.booking_reference.url)?;
        validate_range(
            "policy.max_occupation_percentage",
            self.max_occupation_percentage(),
            0,
            100,
        )?;
        validate_positive_number("http.timeout_seconds", self.request_timeout().as_secs(), 1)?;
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn train_data_url(&self) -> &str {
        &self.train_data.url
    }

    fn booking_reference_url(&self) -> &str {
        &self.booking_reference.url
    }

    fn max_occupation_percentage(&self) -> u8 {
        self.policy
            .as_ref()
            .and_then(|p| p.max_occupation_percentage)
            .unwrap_or(DEFAULT_MAX_OCCUPATION_PERCENTAGE)
    }

    fn request_timeout(&self) -> Duration {
        let seconds = self
            .http
            .as_ref()
            .and_then(|h| h.timeout_seconds)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECONDS);
        Duration::from_secs(seconds)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
