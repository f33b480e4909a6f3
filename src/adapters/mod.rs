// Adapters layer: HTTP clients for the train data and booking reference services.

pub mod booking_reference;
pub mod train_data;

pub use booking_reference::HttpBookingReferenceAdapter;
pub use train_data::HttpTrainDataAdapter;

use crate::utils::error::{Result, TicketOfficeError};
use crate::utils::validation::validate_url;
use reqwest::{Client, Response};
use std::time::Duration;
use url::Url;

/// 兩個 adapter 共用同一個 client (連線池與逾時設定)
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| TicketOfficeError::ConfigError {
            message: format!("Failed to build HTTP client: {}", e),
        })
}

pub(crate) fn parse_base_url(field_name: &str, base_url: &str) -> Result<Url> {
    validate_url(field_name, base_url)?;
    Url::parse(base_url).map_err(|e| TicketOfficeError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: base_url.to_string(),
        reason: e.to_string(),
    })
}

/// Appends percent-encoded path segments to a base URL.
pub(crate) fn endpoint(base_url: &Url, segments: &[&str]) -> Url {
    let mut url = base_url.clone();
    // http(s) 的 URL 一定可以當作 base
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// 非 2xx 回應轉成錯誤，保留回應內容方便除錯
pub(crate) async fn ensure_success(service: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!(service, status = status.as_u16(), "Service answered with an error");
    Err(TicketOfficeError::UnexpectedResponse {
        service: service.to_string(),
        status: status.as_u16(),
        body,
    })
}
