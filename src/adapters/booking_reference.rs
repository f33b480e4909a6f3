use crate::adapters::{endpoint, ensure_success, parse_base_url};
use crate::domain::ports::ReferenceIssuer;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

pub const DEFAULT_BOOKING_REFERENCE_URL: &str = "http://127.0.0.1:8082";

#[derive(Debug, Clone)]
pub struct HttpBookingReferenceAdapter {
    base_url: Url,
    client: Client,
}

impl HttpBookingReferenceAdapter {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: &str, client: Client) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url("booking_reference.url", base_url)?,
            client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl ReferenceIssuer for HttpBookingReferenceAdapter {
    async fn get_booking_reference(&self) -> Result<String> {
        let url = endpoint(&self.base_url, &["booking_reference"]);
        tracing::debug!("Making API request to: {}", url);

        let response = self.client.get(url).send().await?;
        let response = ensure_success("booking reference", response).await?;
        let reference = response.text().await?;

        if reference.is_empty() {
            tracing::warn!("Booking reference service returned an empty reference");
        }
        Ok(reference)
    }
}
