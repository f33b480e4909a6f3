use crate::adapters::booking_reference::DEFAULT_BOOKING_REFERENCE_URL;
use crate::adapters::train_data::DEFAULT_TRAIN_DATA_URL;
use crate::config::DEFAULT_REQUEST_TIMEOUT_SECONDS;
use crate::core::occupation::DEFAULT_MAX_OCCUPATION_PERCENTAGE;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, validate_range, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "ticket-office")]
#[command(about = "Reserve seats on a train, keeping coaches below the occupation limit")]
pub struct CliConfig {
    /// Train to book on
    pub train_id: String,

    /// Number of seats to reserve
    pub seat_count: String,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, help = "Train data service base URL [default: http://127.0.0.1:8081]")]
    pub train_data_url: Option<String>,

    #[arg(long, help = "Booking reference service base URL [default: http://127.0.0.1:8082]")]
    pub booking_reference_url: Option<String>,

    #[arg(long, help = "Maximum train occupation percentage after booking [default: 70]")]
    pub max_occupation: Option<u8>,

    #[arg(long, help = "HTTP request timeout in seconds [default: 30]")]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl ConfigProvider for CliConfig {
    fn train_data_url(&self) -> &str {
        self.train_data_url.as_deref().unwrap_or(DEFAULT_TRAIN_DATA_URL)
    }

    fn booking_reference_url(&self) -> &str {
        self.booking_reference_url
            .as_deref()
            .unwrap_or(DEFAULT_BOOKING_REFERENCE_URL)
    }

    fn max_occupation_percentage(&self) -> u8 {
        self.max_occupation.unwrap_or(DEFAULT_MAX_OCCUPATION_PERCENTAGE)
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECONDS))
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("train_data_url", self.train_data_url())?;
        validate_url("booking_reference_url", self.booking_reference_url())?;
        validate_range("max_occupation", self.max_occupation_percentage(), 0, 100)?;
        validate_positive_number("timeout_seconds", self.request_timeout().as_secs(), 1)?;
        Ok(())
    }
}
