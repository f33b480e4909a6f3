use crate::adapters::{endpoint, ensure_success, parse_base_url};
use crate::domain::model::{Seat, TrainSnapshot};
use crate::domain::ports::TrainDataProvider;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_TRAIN_DATA_URL: &str = "http://127.0.0.1:8081";

const SERVICE: &str = "train data";

#[derive(Debug, Deserialize)]
struct TrainDataResponse {
    /// 依伺服器回傳的順序保留 (serde_json preserve_order)
    seats: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct SeatData {
    seat_number: Option<String>,
    coach: Option<String>,
    booking_reference: Option<String>,
}

impl SeatData {
    fn into_seat(self, seat_name: String) -> Seat {
        Seat {
            seat_name,
            seat_number: self.seat_number.unwrap_or_default(),
            coach: self.coach.unwrap_or_default(),
            booking_reference: self.booking_reference.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpTrainDataAdapter {
    base_url: Url,
    client: Client,
}

impl HttpTrainDataAdapter {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: &str, client: Client) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url("train_data.url", base_url)?,
            client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

fn parse_train_data(body: &[u8]) -> Result<Option<TrainSnapshot>> {
    let response: TrainDataResponse = serde_json::from_slice(body)?;
    let Some(seats) = response.seats else {
        return Ok(None);
    };

    let seats = seats
        .into_iter()
        .map(|(seat_name, data)| -> Result<Seat> {
            let data: SeatData = serde_json::from_value(data)?;
            Ok(data.into_seat(seat_name))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(TrainSnapshot::new(seats)))
}

#[async_trait]
impl TrainDataProvider for HttpTrainDataAdapter {
    async fn get_train_data(&self, train_id: &str) -> Result<Option<TrainSnapshot>> {
        let url = endpoint(&self.base_url, &["data_for_train", train_id]);
        tracing::debug!("Making API request to: {}", url);

        let response = self.client.get(url).send().await?;
        tracing::debug!("API response status: {}", response.status());

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = ensure_success(SERVICE, response).await?;
        let body = response.bytes().await?;
        parse_train_data(&body)
    }

    async fn reserve(
        &self,
        train_id: &str,
        seats: &[String],
        booking_reference: &str,
    ) -> Result<serde_json::Value> {
        let url = endpoint(&self.base_url, &["reserve"]);
        let seats = serde_json::to_string(seats)?;
        let form = [
            ("train_id", train_id),
            ("seats", seats.as_str()),
            ("booking_reference", booking_reference),
        ];
        tracing::debug!("Posting reservation to: {}", url);

        let response = self.client.post(url).form(&form).send().await?;
        let response = ensure_success(SERVICE, response).await?;

        let body = response.bytes().await?;
        if body.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_slice(&body)?)
    }
}
